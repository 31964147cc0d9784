//! UI-specific state (ephemeral)

use autocut_core::config::ThemePreference;
use autocut_core::progress::ProgressIndicator;

/// UI-specific state that doesn't need to be persisted beyond the theme.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Current theme (dark/light)
    pub theme: ThemePreference,

    /// True while files are being dragged over the window.
    pub drag_active: bool,

    /// Progress bar model for the current/last submission.
    pub progress: ProgressIndicator,

    /// Activity log entries. Append-only for the lifetime of the session:
    /// entries are never removed, trimmed, or reordered.
    pub activity_log: Vec<LogEntry>,

    /// Output-path prompt, when open.
    pub path_prompt: Option<PathPrompt>,
}

impl UiState {
    pub fn new(theme: ThemePreference) -> Self {
        Self {
            theme,
            drag_active: false,
            progress: ProgressIndicator::hidden(),
            activity_log: Vec::new(),
            path_prompt: None,
        }
    }

    pub fn push_entry(&mut self, entry: LogEntry) {
        self.activity_log.push(entry);
    }
}

/// Modal prompt state for editing the output directory.
#[derive(Debug, Clone)]
pub struct PathPrompt {
    pub buffer: String,
}

/// One activity log line.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Local time, HH:MM:SS
    pub timestamp: String,

    /// Log level
    pub level: LogLevel,

    /// Message (for link entries, the file name)
    pub message: String,

    /// Download URL, for link entries.
    pub link: Option<String>,
}

/// Log level for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}
