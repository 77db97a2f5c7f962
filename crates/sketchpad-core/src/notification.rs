//! User-facing notices about save and load results.

use std::fmt;

/// A message the host shows to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    SaveSucceeded,
    SaveFailed,
    LoadSucceeded,
    /// Nothing usable was saved: missing, corrupt or unreadable data.
    LoadFoundNothing,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::SaveSucceeded => "Drawing saved!",
            Notice::SaveFailed => "Could not save drawing",
            Notice::LoadSucceeded => "Drawing loaded",
            Notice::LoadFoundNothing => "No saved drawing found!",
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Notice::SaveFailed)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Receives notices; the host decides how to present them.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        if notice.is_error() {
            log::warn!("{notice}");
        } else {
            log::info!("{notice}");
        }
    }
}

/// Keeps every notice it receives, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.last().copied()
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
