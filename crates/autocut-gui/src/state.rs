//! Application state management for the AutoCut GUI.

use std::path::Path;

use autocut_core::config::FileConfig;
use autocut_core::file::{SelectError, SelectedFile};
use autocut_core::submit::SubmissionGate;
use tracing::warn;

/// Main application state (domain/persistent).
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration from autocut-core
    pub config: FileConfig,

    /// The file queued for the next submission, if any.
    pub selected: Option<SelectedFile>,

    /// Submission affordance gate.
    pub gate: SubmissionGate,
}

impl AppState {
    pub fn new() -> Self {
        let load = autocut_core::load_config();
        for warning in &load.warnings {
            warn!("{warning}");
        }

        Self {
            config: load.config,
            selected: None,
            gate: SubmissionGate::new(),
        }
    }

    /// Save configuration to disk
    pub fn save_config(&self) -> Result<(), String> {
        autocut_core::save_config(&self.config).map_err(|e| e.to_string())
    }

    /// Take a file from a drag-and-drop. A rejected candidate leaves any
    /// previous selection in place.
    pub fn select_dropped(&mut self, path: &Path) -> Result<SelectedFile, SelectError> {
        let file = SelectedFile::inspect(path)?;
        self.selected = Some(file.clone());
        Ok(file)
    }

    /// Take a file from the picker dialog. A rejected candidate also clears
    /// any previous selection, mirroring the reset of a file input.
    pub fn select_picked(&mut self, path: &Path) -> Result<SelectedFile, SelectError> {
        match SelectedFile::inspect(path) {
            Ok(file) => {
                self.selected = Some(file.clone());
                Ok(file)
            }
            Err(err) => {
                self.selected = None;
                Err(err)
            }
        }
    }

    /// Unconditionally drop the selection; legal when nothing is selected.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
