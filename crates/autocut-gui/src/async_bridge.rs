//! Async runtime bridge for running the network exchange off the UI thread.

use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

/// Bridge between the tokio runtime and egui.
pub struct AsyncBridge {
    /// Tokio runtime for async operations (wrapped in Option for clean shutdown)
    runtime: Option<Runtime>,

    /// Channel for receiving submission updates
    update_rx: Arc<Mutex<Option<mpsc::UnboundedReceiver<SubmitUpdate>>>>,
}

/// Update from the in-flight submission task.
#[derive(Clone, Debug)]
pub enum SubmitUpdate {
    /// Upload about to start; bar moves to 10%.
    Uploading { file_name: String },
    /// Server accepted the upload; bar moves to 50%.
    RemoteProcessing,
    /// `success: true`; bar completes at 100%.
    Completed {
        message: String,
        downloads: Vec<DownloadLink>,
    },
    /// `success: false`; bar completes at 100% with an error log line.
    Rejected { error: String },
    /// HTTP, transport, or decode failure; bar shows the error marker.
    Failed { error: String },
}

/// One produced output file with its resolved download URL.
#[derive(Clone, Debug)]
pub struct DownloadLink {
    pub file_name: String,
    pub url: String,
}

impl AsyncBridge {
    /// Create a new async bridge
    pub fn new() -> Self {
        let runtime = Runtime::new().expect("Failed to create tokio runtime");

        Self {
            runtime: Some(runtime),
            update_rx: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the runtime handle for spawning tasks
    pub fn runtime(&self) -> &Runtime {
        self.runtime.as_ref().expect("Runtime has been shut down")
    }

    /// Register the receiver for the submission that just started.
    pub fn register_update_receiver(&self, rx: mpsc::UnboundedReceiver<SubmitUpdate>) {
        let mut guard = self.update_rx.lock().unwrap();
        *guard = Some(rx);
    }

    /// Poll for pending updates and call the handler.
    pub fn poll_updates<F>(&self, mut handler: F)
    where
        F: FnMut(SubmitUpdate),
    {
        let mut guard = self.update_rx.lock().unwrap();
        if let Some(rx) = guard.as_mut() {
            while let Ok(update) = rx.try_recv() {
                handler(update);
            }
        }
    }
}

impl Default for AsyncBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AsyncBridge {
    fn drop(&mut self) {
        // Shutdown the runtime without blocking
        // This prevents the "Cannot drop a runtime in a context where blocking is not allowed" panic
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
