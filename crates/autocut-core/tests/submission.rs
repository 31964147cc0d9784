use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use autocut_core::{
    AutocutClient, ClientError, GENERIC_SERVER_ERROR, Parameters, ProcessRequest, SelectedFile,
    SubmitOutcome, SubmitProgressCallback, SubmitProgressEvent, run_submission,
};

// Integration tests for the submission workflow against a fake HTTP
// collaborator: a one-shot server that captures the request and answers
// with a canned response.

struct CapturedRequest {
    head: String,
    body: Vec<u8>,
}

impl CapturedRequest {
    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

async fn spawn_fake_server(
    status_line: &str,
    response_body: &str,
) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let status_line = status_line.to_string();
    let response_body = response_body.to_string();

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");

        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];
        let header_end = loop {
            let n = stream.read(&mut chunk).await.expect("read headers");
            assert!(n > 0, "connection closed before headers were complete");
            buffer.extend_from_slice(&chunk[..n]);
            if let Some(pos) = find_subsequence(&buffer, b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buffer[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);

        while buffer.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.expect("read body");
            assert!(n > 0, "connection closed before body was complete");
            buffer.extend_from_slice(&chunk[..n]);
        }
        let body = buffer[header_end..header_end + content_length].to_vec();

        let response = format!(
            "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response_body}",
            response_body.len()
        );
        stream
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        stream.flush().await.expect("flush response");

        CapturedRequest { head, body }
    });

    (format!("http://{addr}"), handle)
}

fn request_fixture(dir: &tempfile::TempDir) -> ProcessRequest {
    let path = dir.path().join("clip.mp3");
    std::fs::write(&path, b"ID3 fake mpeg payload").expect("write fixture");
    let file = SelectedFile::inspect(&path).expect("mp3 accepted");
    ProcessRequest::snapshot(&file, &Parameters::default(), "ready_mp3")
}

fn event_collector() -> (SubmitProgressCallback, Arc<Mutex<Vec<SubmitProgressEvent>>>) {
    let events: Arc<Mutex<Vec<SubmitProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let callback: SubmitProgressCallback = Arc::new(move |event| {
        sink.lock().unwrap().push(event);
    });
    (callback, events)
}

#[tokio::test]
async fn successful_submission_reports_stages_and_output_files() {
    let (base_url, server) = spawn_fake_server(
        "HTTP/1.1 200 OK",
        r#"{"success": true, "message": "File processed. Created 2 parts.", "output_files": ["clip_1.mp3", "clip_2.mp3"]}"#,
    )
    .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let request = request_fixture(&dir);
    let (callback, events) = event_collector();

    let client = AutocutClient::new(base_url);
    let outcome = run_submission(&client, &request, callback)
        .await
        .expect("submission settled");

    assert_eq!(
        outcome,
        SubmitOutcome::Completed {
            message: "File processed. Created 2 parts.".to_string(),
            output_files: vec!["clip_1.mp3".to_string(), "clip_2.mp3".to_string()],
        }
    );

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            SubmitProgressEvent::Uploading {
                file_name: "clip.mp3".to_string()
            },
            SubmitProgressEvent::RemoteProcessing,
        ]
    );

    let captured = server.await.expect("server task");
    assert!(
        captured.head.starts_with("POST /process HTTP/1.1\r\n"),
        "unexpected request line in: {}",
        captured.head
    );

    let body = captured.body_text();
    for field in [
        "name=\"file\"",
        "filename=\"clip.mp3\"",
        "name=\"duration\"",
        "name=\"window\"",
        "name=\"threshold\"",
        "name=\"minSilence\"",
        "name=\"speed\"",
        "name=\"outputDir\"",
    ] {
        assert!(body.contains(field), "missing {field} in multipart body");
    }
    assert!(body.contains("ID3 fake mpeg payload"));
    assert!(body.contains("100"), "default duration value missing");
    assert!(body.contains("-40"), "default threshold value missing");
    assert!(body.contains("1.4"), "default speed value missing");
    assert!(body.contains("ready_mp3"), "output dir missing");
}

#[tokio::test]
async fn server_rejection_carries_its_error_text() {
    let (base_url, server) =
        spawn_fake_server("HTTP/1.1 200 OK", r#"{"success": false, "error": "bad params"}"#).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let request = request_fixture(&dir);
    let (callback, _events) = event_collector();

    let client = AutocutClient::new(base_url);
    let outcome = run_submission(&client, &request, callback)
        .await
        .expect("submission settled");

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            error: "bad params".to_string()
        }
    );
    server.await.expect("server task");
}

#[tokio::test]
async fn server_rejection_without_detail_uses_the_generic_fallback() {
    let (base_url, server) = spawn_fake_server("HTTP/1.1 200 OK", r#"{"success": false}"#).await;

    let dir = tempfile::tempdir().expect("tempdir");
    let request = request_fixture(&dir);
    let (callback, _events) = event_collector();

    let client = AutocutClient::new(base_url);
    let outcome = run_submission(&client, &request, callback)
        .await
        .expect("submission settled");

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            error: GENERIC_SERVER_ERROR.to_string()
        }
    );
    server.await.expect("server task");
}

#[tokio::test]
async fn http_error_status_fails_before_remote_processing() {
    let (base_url, server) = spawn_fake_server(
        "HTTP/1.1 500 Internal Server Error",
        r#"{"success": false, "error": "boom"}"#,
    )
    .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let request = request_fixture(&dir);
    let (callback, events) = event_collector();

    let client = AutocutClient::new(base_url);
    let err = run_submission(&client, &request, callback)
        .await
        .expect_err("non-2xx must fail");

    match err {
        ClientError::Status(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other:?}"),
    }

    let events = events.lock().unwrap();
    assert_eq!(
        *events,
        vec![SubmitProgressEvent::Uploading {
            file_name: "clip.mp3".to_string()
        }],
        "RemoteProcessing must not be reported on an HTTP error"
    );
    server.await.expect("server task");
}

#[tokio::test]
async fn malformed_response_body_is_a_decode_failure() {
    let (base_url, server) = spawn_fake_server("HTTP/1.1 200 OK", "this is not json").await;

    let dir = tempfile::tempdir().expect("tempdir");
    let request = request_fixture(&dir);
    let (callback, events) = event_collector();

    let client = AutocutClient::new(base_url);
    let err = run_submission(&client, &request, callback)
        .await
        .expect_err("garbage body must fail");

    assert!(matches!(err, ClientError::Decode(_)), "got {err:?}");

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 2, "upload and remote-processing stages ran");
    server.await.expect("server task");
}

#[tokio::test]
async fn missing_file_on_disk_is_a_read_failure_with_no_request_sent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut request = request_fixture(&dir);
    request.file_path = dir.path().join("vanished.mp3");

    let (callback, events) = event_collector();

    // Nothing is listening on this port; a read failure must surface first.
    let client = AutocutClient::new("http://127.0.0.1:9");
    let err = run_submission(&client, &request, callback)
        .await
        .expect_err("missing file must fail");

    assert!(matches!(err, ClientError::ReadFile { .. }), "got {err:?}");
    assert_eq!(events.lock().unwrap().len(), 1, "only the upload stage ran");
}
