//! Spawns one submission on the async runtime and adapts its events into
//! channel updates for the UI thread.

use std::sync::Arc;

use autocut_core::client::{AutocutClient, ProcessRequest};
use autocut_core::submit::{
    SubmitOutcome, SubmitProgressCallback, SubmitProgressEvent, run_submission,
};
use tokio::sync::mpsc;
use tracing::info;

use crate::async_bridge::{AsyncBridge, DownloadLink, SubmitUpdate};

/// Start one submission against the configured server.
///
/// The request snapshot is immutable from here on; later edits to the
/// parameter sliders or the output path do not affect a submission already
/// in flight.
pub fn start_submission(
    bridge: &AsyncBridge,
    base_url: &str,
    request: ProcessRequest,
) -> mpsc::UnboundedReceiver<SubmitUpdate> {
    let (tx, rx) = mpsc::unbounded_channel();
    let client = AutocutClient::new(base_url);

    info!(file = %request.file_name, server = %client.base_url(), "submission started");

    let progress_tx = tx.clone();
    let progress: SubmitProgressCallback = Arc::new(move |event| {
        let update = match event {
            SubmitProgressEvent::Uploading { file_name } => SubmitUpdate::Uploading { file_name },
            SubmitProgressEvent::RemoteProcessing => SubmitUpdate::RemoteProcessing,
        };
        let _ = progress_tx.send(update);
    });

    bridge.runtime().spawn(async move {
        match run_submission(&client, &request, progress).await {
            Ok(SubmitOutcome::Completed {
                message,
                output_files,
            }) => {
                let downloads = output_files
                    .iter()
                    .map(|name| DownloadLink {
                        file_name: name.clone(),
                        url: client.download_url(name),
                    })
                    .collect();
                let _ = tx.send(SubmitUpdate::Completed { message, downloads });
            }
            Ok(SubmitOutcome::Rejected { error }) => {
                let _ = tx.send(SubmitUpdate::Rejected { error });
            }
            Err(err) => {
                let _ = tx.send(SubmitUpdate::Failed {
                    error: err.to_string(),
                });
            }
        }
    });

    rx
}
