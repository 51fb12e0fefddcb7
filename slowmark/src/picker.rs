//! The open/save file browser window.

use crate::host::PickRequest;
use egui::Context;
use slowcore::storage::{FileBrowser, FileFilter};
use slowcore::widgets::FileListItem;
use std::path::{Path, PathBuf};

/// What the document state should do once the user has answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Open,
    /// First save of a new document
    Save,
    SaveAs,
}

pub enum Outcome {
    Chosen(PathBuf),
    Cancelled,
}

pub struct Picker {
    pub purpose: Purpose,
    title: String,
    browser: FileBrowser,
    filename: String,
}

impl Picker {
    /// A browser window for `request`, the same one the document state will
    /// hand to the host once the user answers.
    pub fn new(purpose: Purpose, start_dir: PathBuf, request: PickRequest) -> Self {
        Self {
            purpose,
            title: request.title,
            browser: FileBrowser::new(start_dir).with_filters(request.filters),
            filename: request.default_name.unwrap_or_default(),
        }
    }

    fn is_save(&self) -> bool {
        self.purpose != Purpose::Open
    }

    /// Draw the window. Returns an outcome on the frame the user decides.
    pub fn show(&mut self, ctx: &Context) -> Option<Outcome> {
        let mut outcome = None;

        egui::Window::new(self.title.as_str())
            .collapsible(false)
            .resizable(false)
            .default_width(380.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("location:");
                    ui.label(self.browser.current_dir.to_string_lossy().to_string());
                });
                ui.separator();

                egui::ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                    let entries = self.browser.entries.clone();
                    for (idx, entry) in entries.iter().enumerate() {
                        let selected = self.browser.selected_index == Some(idx);
                        let response =
                            ui.add(FileListItem::new(&entry.name, entry.is_directory).selected(selected));
                        if response.clicked() {
                            self.browser.selected_index = Some(idx);
                            if self.is_save() && !entry.is_directory {
                                self.filename = entry.name.clone();
                            }
                        }
                        if response.double_clicked() {
                            if entry.is_directory {
                                self.browser.navigate_to(entry.path.clone());
                            } else if !self.is_save() {
                                outcome = Some(Outcome::Chosen(entry.path.clone()));
                            }
                        }
                    }
                });

                ui.separator();
                self.filter_row(ui);

                if self.is_save() {
                    ui.horizontal(|ui| {
                        ui.label("filename:");
                        ui.text_edit_singleline(&mut self.filename);
                    });
                }

                ui.separator();
                ui.horizontal(|ui| {
                    if ui.button("cancel").clicked() {
                        outcome = Some(Outcome::Cancelled);
                    }
                    let action = if self.is_save() { "save" } else { "open" };
                    if ui.button(action).clicked() {
                        if let Some(path) = self.confirmed_path() {
                            outcome = Some(Outcome::Chosen(path));
                        }
                    }
                });
            });

        outcome
    }

    fn filter_row(&mut self, ui: &mut egui::Ui) {
        let mut active = self.browser.active_filter;
        let selected_text = self
            .browser
            .active_filter()
            .map(FileFilter::label)
            .unwrap_or_default();
        ui.horizontal(|ui| {
            ui.label("show:");
            egui::ComboBox::from_id_source("picker_filter")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for (idx, filter) in self.browser.filters.iter().enumerate() {
                        ui.selectable_value(&mut active, idx, filter.label());
                    }
                });
        });
        self.browser.set_active_filter(active);
    }

    fn confirmed_path(&self) -> Option<PathBuf> {
        if self.is_save() {
            let name = self.filename.trim();
            if name.is_empty() {
                return None;
            }
            return Some(save_target(
                &self.browser.save_directory(),
                name,
                self.browser.active_filter(),
            ));
        }
        self.browser
            .selected_entry()
            .filter(|entry| !entry.is_directory)
            .map(|entry| entry.path.clone())
    }
}

/// Where a save lands: `name` inside `dir`, with the filter's extension added
/// when the name has none.
pub fn save_target(dir: &Path, name: &str, filter: Option<&FileFilter>) -> PathBuf {
    let mut path = dir.join(name);
    if path.extension().is_none() {
        if let Some(ext) = filter
            .and_then(|f| f.extensions.first())
            .filter(|ext| ext.as_str() != "*")
        {
            path.set_extension(ext);
        }
    }
    path
}
