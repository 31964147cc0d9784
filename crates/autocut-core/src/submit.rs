//! The upload-and-progress workflow: one submission from POST to settlement,
//! plus the gate that keeps a second submission from starting meanwhile.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::client::{AutocutClient, ClientError, ProcessRequest, ProcessResponse};

/// How long the submission affordance stays disabled after settlement.
pub const RESUBMIT_COOLDOWN: Duration = Duration::from_millis(2000);

/// Fallback error text when the server says `success: false` with no detail.
pub const GENERIC_SERVER_ERROR: &str = "Unknown error";

/// Lifecycle of the submission affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    InFlight,
    /// Settled; re-enables once the cooldown deadline passes.
    CoolingDown { until: Instant },
}

/// Keeps at most one submission in flight.
///
/// The clock is passed in by the caller, so the cooldown is deterministic
/// under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionGate {
    state: SubmissionState,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn can_submit(&self) -> bool {
        self.state == SubmissionState::Idle
    }

    /// Close the gate for a new submission. Refused unless idle.
    pub fn begin(&mut self) -> bool {
        if self.state != SubmissionState::Idle {
            return false;
        }
        self.state = SubmissionState::InFlight;
        true
    }

    /// The in-flight request settled (any outcome); start the cooldown.
    pub fn settle(&mut self, now: Instant) {
        if self.state == SubmissionState::InFlight {
            self.state = SubmissionState::CoolingDown {
                until: now + RESUBMIT_COOLDOWN,
            };
        }
    }

    /// Advance the cooldown; returns true the moment the gate re-opens.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let SubmissionState::CoolingDown { until } = self.state
            && now >= until
        {
            self.state = SubmissionState::Idle;
            return true;
        }
        false
    }
}

impl Default for SubmissionGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Coarse stages reported while a submission runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitProgressEvent {
    /// The multipart POST is about to go out.
    Uploading { file_name: String },
    /// The server accepted the upload and is processing.
    RemoteProcessing,
}

pub type SubmitProgressCallback = Arc<dyn Fn(SubmitProgressEvent) + Send + Sync>;

/// How a submission resolved when the HTTP exchange itself succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// `success: true`.
    Completed {
        message: String,
        output_files: Vec<String>,
    },
    /// `success: false`; `error` carries the server text or the generic fallback.
    Rejected { error: String },
}

/// Drive one submission to settlement.
///
/// Emits [`SubmitProgressEvent::Uploading`] before the POST and
/// [`SubmitProgressEvent::RemoteProcessing`] once a 2xx status has arrived,
/// before the body is parsed. A non-2xx status, a transport failure, or a
/// malformed body all surface as [`ClientError`]; no retry is attempted.
pub async fn run_submission(
    client: &AutocutClient,
    request: &ProcessRequest,
    progress: SubmitProgressCallback,
) -> Result<SubmitOutcome, ClientError> {
    progress(SubmitProgressEvent::Uploading {
        file_name: request.file_name.clone(),
    });

    let response = client.send_process(request).await?;

    let status = response.status();
    if !status.is_success() {
        warn!(%status, "processing request rejected by server");
        return Err(ClientError::Status(status));
    }

    progress(SubmitProgressEvent::RemoteProcessing);

    let reply: ProcessResponse = response.json().await.map_err(ClientError::Decode)?;

    if reply.success {
        let output_files = reply.output_files.unwrap_or_default();
        info!(
            files = output_files.len(),
            "processing completed successfully"
        );
        Ok(SubmitOutcome::Completed {
            message: reply.message.unwrap_or_default(),
            output_files,
        })
    } else {
        let error = reply
            .error
            .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
        warn!(%error, "server reported processing failure");
        Ok(SubmitOutcome::Rejected { error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_refuses_a_second_submission_while_in_flight() {
        let mut gate = SubmissionGate::new();
        assert!(gate.can_submit());
        assert!(gate.begin());
        assert!(!gate.can_submit());
        assert!(!gate.begin());
    }

    #[test]
    fn gate_reopens_only_after_the_full_cooldown() {
        let mut gate = SubmissionGate::new();
        assert!(gate.begin());

        let settled = Instant::now();
        gate.settle(settled);
        assert!(!gate.can_submit());

        assert!(!gate.tick(settled + Duration::from_millis(1999)));
        assert!(!gate.can_submit());

        assert!(gate.tick(settled + RESUBMIT_COOLDOWN));
        assert!(gate.can_submit());
    }

    #[test]
    fn tick_reports_the_reopen_exactly_once() {
        let mut gate = SubmissionGate::new();
        assert!(gate.begin());
        let settled = Instant::now();
        gate.settle(settled);

        let later = settled + RESUBMIT_COOLDOWN;
        assert!(gate.tick(later));
        assert!(!gate.tick(later));
    }

    #[test]
    fn settle_is_a_no_op_when_idle() {
        let mut gate = SubmissionGate::new();
        gate.settle(Instant::now());
        assert_eq!(gate.state(), SubmissionState::Idle);
    }
}
