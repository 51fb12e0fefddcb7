//! slowMark application
//!
//! Owns the document state and the egui front-end. Menu clicks and shortcuts
//! become [`Command`]s; file commands that need a location open the picker
//! first and run the document operation once the user has answered.

use crate::config::Config;
use crate::error::Result;
use crate::host::{Event, HostServices, Mode, NoticeKind, PickRequest};
use crate::menu::{self, Command, Entry, MENUS};
use crate::picker::{Outcome, Picker, Purpose};
use crate::preview;
use crate::shell::ShellHost;
use crate::state::{is_supported_document, DocumentState};
use egui::Context;
use slowcore::theme::{consume_special_keys, menu_bar, SlowColors, SlowTheme};
use slowcore::widgets::{shortcut_row, status_bar};
use std::path::PathBuf;

pub struct SlowMarkApp {
    state: DocumentState,
    host: ShellHost,
    config: Config,
    /// Text as the editor widget sees it; pushed into `state` on every edit
    editor_text: String,
    mode: Mode,
    picker: Option<Picker>,
    window_title: String,
    show_about: bool,
    show_shortcuts: bool,
}

impl SlowMarkApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        Self {
            state: DocumentState::new(),
            host: ShellHost::new(),
            mode: config.default_mode,
            config,
            editor_text: String::new(),
            picker: None,
            window_title: String::new(),
            show_about: false,
            show_shortcuts: false,
        }
    }

    fn run(&mut self, command: Command) {
        log::debug!("command {:?}", command);
        match command {
            Command::New => self.state.new_file(&mut self.host),
            Command::Open => {
                self.picker = Some(Picker::new(
                    Purpose::Open,
                    self.config.browse_dir(),
                    PickRequest::open(),
                ));
            }
            Command::Save => {
                if self.state.current_file().is_some() {
                    let result = self.state.save_file(&mut self.host);
                    settle(Purpose::Save, result);
                } else {
                    self.show_save_picker(Purpose::Save);
                }
            }
            Command::SaveAs => self.show_save_picker(Purpose::SaveAs),
            Command::Quit => self.state.shutdown(&mut self.host),
            Command::SetMode(mode) => self.host.emit(Event::ModeChangeRequested(mode)),
            Command::ShowShortcuts => self.show_shortcuts = true,
            Command::ShowAbout => self.show_about = true,
        }
    }

    fn show_save_picker(&mut self, purpose: Purpose) {
        let start_dir = self
            .state
            .current_file()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.config.browse_dir());
        self.picker = Some(Picker::new(purpose, start_dir, PickRequest::save()));
    }

    /// Hand the picker's answer to the document operation it was opened for.
    fn finish_pick(&mut self, purpose: Purpose, answer: Option<PathBuf>) {
        self.host.stage_pick(answer);
        let result = match purpose {
            Purpose::Open => self.state.open_file(&mut self.host).map(|_| ()),
            Purpose::Save => self.state.save_file(&mut self.host),
            Purpose::SaveAs => self.state.save_as_file(&mut self.host),
        };
        if let Some(request) = self.host.last_request() {
            log::debug!("answered \"{}\" for {:?}", request.title, purpose);
        }
        settle(purpose, result);
    }

    fn open_dropped(&mut self, path: PathBuf) {
        if !is_supported_document(&path) {
            log::debug!("ignoring dropped file {}", path.display());
            return;
        }
        self.finish_pick(Purpose::Open, Some(path));
    }

    fn apply_events(&mut self) {
        for event in self.host.drain_events() {
            match event {
                Event::DocumentOpened(content) => self.editor_text = content,
                Event::ModeChangeRequested(mode) => self.mode = mode,
            }
        }
    }

    fn is_blocked(&self) -> bool {
        self.picker.is_some() || self.host.current_notice().is_some()
    }

    fn handle_keyboard(&mut self, ctx: &Context) {
        consume_special_keys(ctx);
        if self.is_blocked() {
            return;
        }

        let mut commands = Vec::new();
        ctx.input_mut(|i| {
            i.events.retain(|event| match event {
                egui::Event::Key { key, pressed: true, modifiers, .. } => {
                    match menu::command_for(*key, *modifiers) {
                        Some(command) => {
                            commands.push(command);
                            false
                        }
                        None => true,
                    }
                }
                _ => true,
            });
        });

        for command in commands {
            self.run(command);
        }
    }

    fn render_menu_bar(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        menu_bar(ui, |ui| {
            for menu in MENUS {
                ui.menu_button(menu.title, |ui| {
                    for entry in menu.entries {
                        match *entry {
                            Entry::Separator => {
                                ui.separator();
                            }
                            Entry::Item { label, shortcut, command } => {
                                let text = match shortcut {
                                    Some(s) => format!("{:<12}{}", self.menu_label(label, command), s.display()),
                                    None => self.menu_label(label, command),
                                };
                                if ui.button(text).clicked() {
                                    clicked = Some(command);
                                    ui.close_menu();
                                }
                            }
                        }
                    }
                });
            }
        });
        if let Some(command) = clicked {
            self.run(command);
        }
    }

    /// Mode items carry a marker for the active view.
    fn menu_label(&self, label: &str, command: Command) -> String {
        match command {
            Command::SetMode(mode) if mode == self.mode => format!("> {}", label),
            Command::SetMode(_) => format!("  {}", label),
            _ => label.to_string(),
        }
    }

    fn render_editor(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let font_size = self.config.editor_font_size;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.mode {
                Mode::Plain => {
                    let output = egui::TextEdit::multiline(&mut self.editor_text)
                        .font(egui::FontId::monospace(font_size))
                        .desired_width(available.x)
                        .desired_rows((available.y / 20.0).max(4.0) as usize)
                        .frame(false)
                        .show(ui);
                    if output.response.changed() {
                        self.state.set_content(self.editor_text.clone());
                    }
                }
                Mode::Structured => {
                    egui::Frame::none()
                        .inner_margin(egui::Margin::same(12.0))
                        .show(ui, |ui| {
                            let blocks = preview::parse(self.state.content());
                            preview::render(ui, &blocks, font_size);
                        });
                }
            });
    }

    fn render_notice(&mut self, ctx: &Context) {
        let Some(notice) = self.host.current_notice().cloned() else {
            return;
        };
        let heading = match notice.kind {
            NoticeKind::Error => format!("error: {}", notice.title),
            NoticeKind::Info => notice.title.clone(),
        };
        egui::Window::new(heading)
            .id(egui::Id::new("notice"))
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&notice.message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.host.dismiss_notice();
                    }
                });
            });
    }

    fn render_picker(&mut self, ctx: &Context) {
        let Some(picker) = self.picker.as_mut() else {
            return;
        };
        let purpose = picker.purpose;
        match picker.show(ctx) {
            Some(Outcome::Chosen(path)) => {
                self.picker = None;
                self.finish_pick(purpose, Some(path));
            }
            Some(Outcome::Cancelled) => {
                self.picker = None;
                self.finish_pick(purpose, None);
            }
            None => {}
        }
    }

    fn render_about(&mut self, ctx: &Context) {
        egui::Window::new("about slowMark")
            .collapsible(false)
            .resizable(false)
            .default_width(300.0)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.heading("slowMark");
                    ui.label(format!("version {}", env!("CARGO_PKG_VERSION")));
                    ui.add_space(8.0);
                    ui.label("a minimal markdown editor for slowOS");
                });
                ui.add_space(8.0);
                ui.separator();
                ui.label("formats: .md, .txt");
                ui.label("views: plain (edit), structured (read)");
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_about = false;
                    }
                });
            });
    }

    fn render_shortcuts(&mut self, ctx: &Context) {
        egui::Window::new("keyboard shortcuts")
            .collapsible(false)
            .resizable(false)
            .default_width(320.0)
            .show(ctx, |ui| {
                for menu in MENUS {
                    let rows: Vec<_> = menu
                        .entries
                        .iter()
                        .filter_map(|entry| match *entry {
                            Entry::Item { label, shortcut: Some(s), .. } => Some((s.display(), label)),
                            _ => None,
                        })
                        .collect();
                    if rows.is_empty() {
                        continue;
                    }
                    ui.label(egui::RichText::new(menu.title).strong());
                    ui.separator();
                    for (keys, label) in rows {
                        shortcut_row(ui, &keys, label);
                    }
                    ui.add_space(8.0);
                }
                ui.vertical_centered(|ui| {
                    if ui.button("ok").clicked() {
                        self.show_shortcuts = false;
                    }
                });
            });
    }

    fn sync_window_title(&mut self, ctx: &Context) {
        let title = format!("{} \u{2014} slowMark", self.state.title());
        if title != self.window_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.window_title = title;
        }
    }
}

/// Whether a file operation went through. Failures were already shown by the
/// state and the editor keeps its text.
fn settle(purpose: Purpose, result: Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) if e.is_cancelled() => false,
        Err(e) => {
            log::debug!("{:?} failed: {}", purpose, e);
            false
        }
    }
}

impl eframe::App for SlowMarkApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);

        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect()
        });
        if let Some(path) = dropped.into_iter().next() {
            if !self.is_blocked() {
                self.open_dropped(path);
            }
        }

        let blocked = self.is_blocked();

        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| self.render_menu_bar(ui));
        });
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            SlowTheme::title_bar_frame().show(ui, |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(self.state.title());
                });
            });
        });
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            let doc = self.state.document();
            let status = format!(
                "{} lines  |  {} words, {} chars  |  {}",
                doc.line_count(),
                doc.word_count(),
                doc.char_count(),
                self.mode.as_str()
            );
            status_bar(ui, &status);
        });
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(SlowColors::WHITE))
            .show(ctx, |ui| {
                ui.add_enabled_ui(!blocked, |ui| self.render_editor(ui));
            });

        self.render_picker(ctx);
        self.render_notice(ctx);
        if self.show_about {
            self.render_about(ctx);
        }
        if self.show_shortcuts {
            self.render_shortcuts(ctx);
        }

        self.apply_events();
        self.sync_window_title(ctx);

        if self.host.take_quit() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
