//! UI widgets for the AutoCut GUI

pub mod activity_log;
pub mod file_drop;
pub mod output_path;
pub mod parameter_panel;
pub mod progress_display;
