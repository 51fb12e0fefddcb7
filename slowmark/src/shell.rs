//! [`HostServices`] for the egui shell.
//!
//! egui dialogs cannot block, so the app runs the file browser window first
//! and stages the user's answer here before calling into the document state.
//! Notices and events are queued and drained by the app each frame.

use crate::host::{Event, HostError, HostServices, NoticeKind, PickRequest};
use slowcore::storage::FileFilter;
use std::collections::VecDeque;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct ShellHost {
    staged_pick: Option<PathBuf>,
    last_request: Option<PickRequest>,
    notices: VecDeque<Notice>,
    events: VecDeque<Event>,
    quit_requested: bool,
}

impl ShellHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer for the next pick call. `None` reads as a cancelled dialog.
    pub fn stage_pick(&mut self, answer: Option<PathBuf>) -> &mut Self {
        self.staged_pick = answer;
        self
    }

    /// The dialog the core asked for most recently.
    pub fn last_request(&self) -> Option<&PickRequest> {
        self.last_request.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }

    /// The notice currently on screen, oldest first.
    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn take_quit(&mut self) -> bool {
        std::mem::take(&mut self.quit_requested)
    }

    fn take_pick(&mut self, request: PickRequest) -> Result<Option<PathBuf>, HostError> {
        let answer = self.staged_pick.take();
        if answer.is_none() {
            log::debug!("{}: no file chosen", request.title);
        }
        self.last_request = Some(request);
        Ok(answer)
    }
}

impl HostServices for ShellHost {
    fn pick_open_file(
        &mut self,
        title: &str,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>, HostError> {
        self.take_pick(PickRequest {
            title: title.to_string(),
            filters: filters.to_vec(),
            default_name: None,
        })
    }

    fn pick_save_file(
        &mut self,
        title: &str,
        filters: &[FileFilter],
        default_name: &str,
    ) -> Result<Option<PathBuf>, HostError> {
        self.take_pick(PickRequest {
            title: title.to_string(),
            filters: filters.to_vec(),
            default_name: Some(default_name.to_string()),
        })
    }

    fn notify(&mut self, kind: NoticeKind, title: &str, message: &str) {
        self.notices.push_back(Notice {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn emit(&mut self, event: Event) {
        self.events.push_back(event);
    }

    fn quit(&mut self) {
        self.quit_requested = true;
    }
}
