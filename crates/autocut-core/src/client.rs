//! HTTP client for the processing server.

use std::path::PathBuf;

use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::file::{MP3_MIME, SelectedFile};
use crate::params::Parameters;

/// Server base URL the tool talks to when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

/// Errors from one upload-and-await-result exchange.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("HTTP error: {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("unexpected server response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Immutable snapshot of everything one submission sends to the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRequest {
    pub file_path: PathBuf,
    pub file_name: String,
    pub params: Parameters,
    pub output_dir: String,
}

impl ProcessRequest {
    pub fn snapshot(file: &SelectedFile, params: &Parameters, output_dir: &str) -> Self {
        Self {
            file_path: file.path.clone(),
            file_name: file.name.clone(),
            params: *params,
            output_dir: output_dir.to_string(),
        }
    }
}

/// JSON body returned by `POST /process`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub output_files: Option<Vec<String>>,
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Thin wrapper over [`reqwest::Client`] bound to one server base URL.
#[derive(Debug, Clone)]
pub struct AutocutClient {
    base_url: String,
    http: reqwest::Client,
}

impl AutocutClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn process_url(&self) -> String {
        format!("{}/process", self.base_url)
    }

    /// Download URL for one produced output file.
    pub fn download_url(&self, file_name: &str) -> String {
        format!(
            "{}/download/{}",
            self.base_url,
            urlencoding::encode(file_name)
        )
    }

    /// Upload the file and parameters as a multipart POST.
    ///
    /// Returns the raw response once headers have arrived; status and body
    /// handling belong to the submission workflow.
    pub async fn send_process(
        &self,
        request: &ProcessRequest,
    ) -> Result<reqwest::Response, ClientError> {
        let bytes = tokio::fs::read(&request.file_path)
            .await
            .map_err(|source| ClientError::ReadFile {
                path: request.file_path.clone(),
                source,
            })?;

        debug!(
            file = %request.file_name,
            size_bytes = bytes.len(),
            url = %self.process_url(),
            "uploading file for processing"
        );

        let part = Part::bytes(bytes)
            .file_name(request.file_name.clone())
            .mime_str(MP3_MIME)
            .map_err(ClientError::Transport)?;

        let params = &request.params;
        let form = Form::new()
            .part("file", part)
            .text("duration", params.duration_secs.to_string())
            .text("window", params.window_secs.to_string())
            .text("threshold", params.threshold_db.to_string())
            .text("minSilence", params.min_silence_ms.to_string())
            .text("speed", params.speed.to_string())
            .text("outputDir", request.output_dir.clone());

        self.http
            .post(self.process_url())
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::Transport)
    }
}

impl Default for AutocutClient {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_stripped_from_base_url() {
        let client = AutocutClient::new("http://localhost:5000///");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.process_url(), "http://localhost:5000/process");
    }

    #[test]
    fn download_url_percent_encodes_the_file_name() {
        let client = AutocutClient::default();
        assert_eq!(
            client.download_url("episode_01.mp3"),
            "http://127.0.0.1:5000/download/episode_01.mp3"
        );
        assert_eq!(
            client.download_url("my mix.mp3"),
            "http://127.0.0.1:5000/download/my%20mix.mp3"
        );
    }

    #[test]
    fn response_body_parses_with_optional_fields_absent() {
        let reply: ProcessResponse =
            serde_json::from_str(r#"{"success": false}"#).expect("minimal body");
        assert!(!reply.success);
        assert!(reply.message.is_none());
        assert!(reply.error.is_none());
        assert!(reply.output_files.is_none());
    }
}
