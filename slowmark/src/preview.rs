//! Structured view: a read-only rendering of the markdown.
//!
//! Only block-level structure is recognised. Inline markup is shown as typed.

use egui::{FontId, RichText, Ui};
use slowcore::theme::SlowColors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(u8, String),
    Bullet(String),
    Numbered(String, String),
    Quote(String),
    Code(Vec<String>),
    Rule,
    Paragraph(String),
}

/// Split markdown text into blocks. Consecutive plain lines join into one
/// paragraph; a blank line ends it. An unterminated fence runs to the end.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut code: Option<Vec<String>> = None;

    for line in text.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            match code.take() {
                Some(lines) => blocks.push(Block::Code(lines)),
                None => {
                    flush_paragraph(&mut paragraph, &mut blocks);
                    code = Some(Vec::new());
                }
            }
            continue;
        }
        if let Some(lines) = code.as_mut() {
            lines.push(line.to_string());
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        let block = if let Some(heading) = heading(trimmed) {
            Some(heading)
        } else if is_rule(trimmed) {
            Some(Block::Rule)
        } else if let Some(rest) = trimmed.strip_prefix('>') {
            Some(Block::Quote(rest.trim().to_string()))
        } else if let Some(rest) = ["- ", "* ", "+ "].iter().find_map(|m| trimmed.strip_prefix(m)) {
            Some(Block::Bullet(rest.trim().to_string()))
        } else {
            numbered(trimmed)
        };

        match block {
            Some(block) => {
                flush_paragraph(&mut paragraph, &mut blocks);
                blocks.push(block);
            }
            None => paragraph.push(trimmed.trim_end()),
        }
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    if let Some(lines) = code {
        blocks.push(Block::Code(lines));
    }
    blocks
}

fn flush_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(paragraph.join(" ")));
        paragraph.clear();
    }
}

fn heading(line: &str) -> Option<Block> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(' ') {
        return None;
    }
    Some(Block::Heading(level as u8, rest.trim().to_string()))
}

fn is_rule(line: &str) -> bool {
    let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|m| compact.chars().all(|c| c == *m))
}

fn numbered(line: &str) -> Option<Block> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix(". ")?;
    Some(Block::Numbered(line[..digits].to_string(), rest.trim().to_string()))
}

pub fn render(ui: &mut Ui, blocks: &[Block], font_size: f32) {
    for block in blocks {
        match block {
            Block::Heading(level, text) => {
                let size = font_size + (7 - *level as i32).max(1) as f32 * 2.0;
                ui.add_space(4.0);
                ui.label(RichText::new(text).font(FontId::proportional(size)).strong());
            }
            Block::Bullet(text) => {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("\u{2022}").size(font_size));
                    ui.label(RichText::new(text).size(font_size));
                });
            }
            Block::Numbered(number, text) => {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new(format!("{}.", number)).size(font_size));
                    ui.label(RichText::new(text).size(font_size));
                });
            }
            Block::Quote(text) => {
                egui::Frame::none()
                    .stroke(egui::Stroke::new(1.0, SlowColors::BLACK))
                    .inner_margin(egui::Margin::symmetric(8.0, 2.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new(text).size(font_size).italics());
                    });
            }
            Block::Code(lines) => {
                egui::Frame::none()
                    .stroke(egui::Stroke::new(1.0, SlowColors::BLACK))
                    .inner_margin(egui::Margin::same(6.0))
                    .show(ui, |ui| {
                        ui.label(RichText::new(lines.join("\n")).font(FontId::monospace(font_size - 2.0)));
                    });
            }
            Block::Rule => {
                ui.separator();
            }
            Block::Paragraph(text) => {
                ui.label(RichText::new(text).size(font_size));
                ui.add_space(4.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_paragraphs() {
        let blocks = parse("# Title\nBody line\ncontinues\n\n## Part two\n#hashtag");
        assert_eq!(
            blocks,
            vec![
                Block::Heading(1, "Title".into()),
                Block::Paragraph("Body line continues".into()),
                Block::Heading(2, "Part two".into()),
                Block::Paragraph("#hashtag".into()),
            ]
        );
    }

    #[test]
    fn test_lists_quotes_and_rules() {
        let blocks = parse("- one\n* two\n3. three\n> quoted\n---\n");
        assert_eq!(
            blocks,
            vec![
                Block::Bullet("one".into()),
                Block::Bullet("two".into()),
                Block::Numbered("3".into(), "three".into()),
                Block::Quote("quoted".into()),
                Block::Rule,
            ]
        );
    }

    #[test]
    fn test_code_fence_keeps_lines_verbatim() {
        let blocks = parse("```rust\n# not a heading\n  indented\n```\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::Code(vec!["# not a heading".into(), "  indented".into()]),
                Block::Paragraph("after".into()),
            ]
        );
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        assert_eq!(parse("```\nlast"), vec![Block::Code(vec!["last".into()])]);
    }

    #[test]
    fn test_empty_text_has_no_blocks() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }
}
