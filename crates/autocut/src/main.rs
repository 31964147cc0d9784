//! Main entry point for the MP3 AutoCut desktop client.

use anyhow::Result;
use autocut_core::logging::LoggingDestination;

fn main() -> Result<()> {
    match autocut_core::init_logging(LoggingDestination::FileAndStderr) {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "logging to file"),
        Ok(None) => {}
        Err(e) => eprintln!("Failed to initialize logging: {e}"),
    }

    autocut_gui::run().map_err(|e| anyhow::anyhow!("GUI error: {e}"))
}
