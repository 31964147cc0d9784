//! Core library crate for the MP3 AutoCut desktop client.
//!
//! Everything UI-independent lives here: the parameter model, file
//! selection rules, the HTTP client for the processing server, the
//! submission workflow, configuration persistence, and structured logging.

pub mod client;
pub mod config;
pub mod file;
pub mod logging;
pub mod output;
pub mod params;
pub mod progress;
pub mod submit;

pub use client::{AutocutClient, ClientError, DEFAULT_SERVER_URL, ProcessRequest, ProcessResponse};
pub use config::{
    ConfigError, ConfigLoadResult, ConfigSource, FileConfig, ServerPreferences, ThemePreference,
    UiPreferences, config_directory, config_path, load_config, save_config,
};
pub use file::{MP3_MIME, SelectError, SelectedFile};
pub use logging::{LoggingDestination, LoggingError, init_logging};
pub use output::{DEFAULT_OUTPUT_DIR, apply_path_edit};
pub use params::Parameters;
pub use progress::{ERROR_MARKER, ProgressIndicator};
pub use submit::{
    GENERIC_SERVER_ERROR, RESUBMIT_COOLDOWN, SubmissionGate, SubmissionState, SubmitOutcome,
    SubmitProgressCallback, SubmitProgressEvent, run_submission,
};
