use crate::config::DogShowConfig;
use crate::index::DisplayEntry;
use crate::model::DogEntry;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod load;
pub mod report;
pub mod save;
pub mod search;
pub mod select;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<DogEntry>,
    pub listed_entries: Vec<DisplayEntry>,
    /// Zero-based positions the command wants selected.
    pub selected_rows: Vec<usize>,
    pub written_path: Option<PathBuf>,
    pub config: Option<DogShowConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_entries(mut self, entries: Vec<DogEntry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<DisplayEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_selected_rows(mut self, rows: Vec<usize>) -> Self {
        self.selected_rows = rows;
        self
    }

    pub fn with_written_path(mut self, path: PathBuf) -> Self {
        self.written_path = Some(path);
        self
    }

    pub fn with_config(mut self, config: DogShowConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// File name for user-facing messages, falling back to the full path.
pub(crate) fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
