//! Menu bar and keyboard shortcuts as one static table.
//!
//! The shell draws menus from [`MENUS`] and matches key presses against the
//! same entries, so a label, its shortcut and its command never drift apart.

use crate::host::Mode;
use egui::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New,
    Open,
    Save,
    SaveAs,
    Quit,
    SetMode(Mode),
    ShowShortcuts,
    ShowAbout,
}

/// ⌘ (Ctrl on Linux) plus a key, optionally with shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub key: Key,
    pub shift: bool,
}

impl Shortcut {
    const fn cmd(key: Key) -> Self {
        Self { key, shift: false }
    }

    const fn cmd_shift(key: Key) -> Self {
        Self { key, shift: true }
    }

    pub fn matches(&self, key: Key, modifiers: egui::Modifiers) -> bool {
        modifiers.command && self.key == key && self.shift == modifiers.shift
    }

    /// e.g. `⌘N`, `⇧⌘S`
    pub fn display(&self) -> String {
        let shift = if self.shift { "\u{21e7}" } else { "" };
        format!("{}\u{2318}{}", shift, self.key.symbol_or_name())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Entry {
    Item {
        label: &'static str,
        shortcut: Option<Shortcut>,
        command: Command,
    },
    Separator,
}

pub struct Menu {
    pub title: &'static str,
    pub entries: &'static [Entry],
}

const fn item(label: &'static str, shortcut: Option<Shortcut>, command: Command) -> Entry {
    Entry::Item { label, shortcut, command }
}

pub const MENUS: &[Menu] = &[
    Menu {
        title: "file",
        entries: &[
            item("new", Some(Shortcut::cmd(Key::N)), Command::New),
            item("open...", Some(Shortcut::cmd(Key::O)), Command::Open),
            Entry::Separator,
            item("save", Some(Shortcut::cmd(Key::S)), Command::Save),
            item("save as...", Some(Shortcut::cmd_shift(Key::S)), Command::SaveAs),
            Entry::Separator,
            item("quit", Some(Shortcut::cmd(Key::Q)), Command::Quit),
        ],
    },
    Menu {
        title: "view",
        entries: &[
            item("plain", Some(Shortcut::cmd(Key::Num1)), Command::SetMode(Mode::Plain)),
            item("structured", Some(Shortcut::cmd(Key::Num2)), Command::SetMode(Mode::Structured)),
        ],
    },
    Menu {
        title: "help",
        entries: &[
            item("keyboard shortcuts", None, Command::ShowShortcuts),
            Entry::Separator,
            item("about", None, Command::ShowAbout),
        ],
    },
];

/// Every (label, shortcut, command) in menu order.
pub fn items() -> impl Iterator<Item = (&'static str, Option<Shortcut>, Command)> {
    MENUS.iter().flat_map(|menu| menu.entries.iter()).filter_map(|entry| match *entry {
        Entry::Item { label, shortcut, command } => Some((label, shortcut, command)),
        Entry::Separator => None,
    })
}

/// The command bound to a key press, if any.
pub fn command_for(key: Key, modifiers: egui::Modifiers) -> Option<Command> {
    items().find_map(|(_, shortcut, command)| {
        shortcut.filter(|s| s.matches(key, modifiers)).map(|_| command)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Modifiers;

    #[test]
    fn test_no_two_items_share_a_shortcut() {
        let shortcuts: Vec<Shortcut> = items().filter_map(|(_, s, _)| s).collect();
        for (i, a) in shortcuts.iter().enumerate() {
            for b in &shortcuts[i + 1..] {
                assert_ne!(a, b, "shortcut {} bound twice", a.display());
            }
        }
    }

    #[test]
    fn test_new_and_open_have_distinct_keys() {
        assert_eq!(command_for(Key::N, Modifiers::COMMAND), Some(Command::New));
        assert_eq!(command_for(Key::O, Modifiers::COMMAND), Some(Command::Open));
    }

    #[test]
    fn test_shift_selects_save_as() {
        assert_eq!(command_for(Key::S, Modifiers::COMMAND), Some(Command::Save));
        let shifted = Modifiers { shift: true, ..Modifiers::COMMAND };
        assert_eq!(command_for(Key::S, shifted), Some(Command::SaveAs));
    }

    #[test]
    fn test_keys_without_command_are_ignored() {
        assert_eq!(command_for(Key::S, Modifiers::NONE), None);
        assert_eq!(command_for(Key::Z, Modifiers::COMMAND), None);
    }

    #[test]
    fn test_mode_items() {
        assert_eq!(
            command_for(Key::Num2, Modifiers::COMMAND),
            Some(Command::SetMode(Mode::Structured))
        );
        assert_eq!(Shortcut::cmd_shift(Key::S).display(), "\u{21e7}\u{2318}S");
    }
}
