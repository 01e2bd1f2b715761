use std::path::PathBuf;
use std::sync::Arc;

use documind::application::{UploadDocumentsUseCase, UploadOutcome};
use documind::domain::ports::DocumentQaPort;
use documind::domain::{AskError, UploadError};
use documind::infrastructure::DocumentQaClient;
use tempfile::TempDir;
use test_case::test_case;
use wiremock::matchers::{body_json, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_files(dir: &TempDir, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(name, content)| {
            let path = dir.path().join(name);
            std::fs::write(&path, content).unwrap();
            path
        })
        .collect()
}

fn client(server: &MockServer) -> DocumentQaClient {
    DocumentQaClient::with_base_url(server.uri()).unwrap()
}

#[tokio::test]
async fn test_upload_sends_one_part_per_file_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "success", "chunks": 12 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &[("b.txt", "second body"), ("a.pdf", "first body")]);

    let receipt = client(&server).upload_documents(&files).await.unwrap();
    assert!(receipt.is_success());
    assert_eq!(receipt.chunks, Some(12));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8_lossy(&requests[0].body).to_string();

    assert_eq!(body.matches("name=\"files\"").count(), 2);
    let b = body.find("filename=\"b.txt\"").unwrap();
    let a = body.find("filename=\"a.pdf\"").unwrap();
    assert!(b < a);
    assert!(body.find("second body").unwrap() < body.find("first body").unwrap());
}

#[tokio::test]
async fn test_upload_rejected_status_is_generic_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(serde_json::json!({ "detail": "disk full" })),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &[("a.txt", "x")]);

    let err = client(&server).upload_documents(&files).await.unwrap_err();
    assert!(matches!(err, UploadError::Rejected { status: 500 }));
    assert_eq!(err.to_string(), "Upload failed");
}

#[tokio::test]
async fn test_upload_unexpected_status_is_not_processed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "queued" })),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &[("a.txt", "x")]);
    let use_case = UploadDocumentsUseCase::new(Arc::new(client(&server)));

    let outcome = use_case.execute(&files).await.unwrap();
    assert_eq!(
        outcome,
        UploadOutcome::UnexpectedResponse {
            status: Some("queued".to_string())
        }
    );
}

async fn upload_outcome(body: ResponseTemplate) -> UploadOutcome {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(body)
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let files = write_files(&dir, &[("a.txt", "x")]);
    let use_case = UploadDocumentsUseCase::new(Arc::new(client(&server)));

    use_case.execute(&files).await.unwrap()
}

#[test_case(serde_json::json!({ "status": "success", "chunks": "12" }) ; "string_chunks")]
#[test_case(serde_json::json!({ "status": "success", "chunks": 1.5 }) ; "float_chunks")]
#[test_case(serde_json::json!({ "status": "success", "chunks": -3 }) ; "negative_chunks")]
#[tokio::test]
async fn test_odd_chunk_counts_still_succeed(body: serde_json::Value) {
    let outcome = upload_outcome(ResponseTemplate::new(200).set_body_json(body)).await;
    assert_eq!(outcome, UploadOutcome::Processed { chunks: None });
}

#[test_case(serde_json::json!({ "status": 1 }), Some("1") ; "numeric_status")]
#[test_case(serde_json::json!(["success"]), None ; "array_body")]
#[test_case(serde_json::json!({ "result": "success" }), None ; "missing_status")]
#[tokio::test]
async fn test_odd_upload_bodies_are_unexpected(body: serde_json::Value, status: Option<&str>) {
    let outcome = upload_outcome(ResponseTemplate::new(200).set_body_json(body)).await;
    assert_eq!(
        outcome,
        UploadOutcome::UnexpectedResponse {
            status: status.map(str::to_string)
        }
    );
}

#[tokio::test]
async fn test_non_json_upload_body_is_unexpected() {
    let outcome = upload_outcome(ResponseTemplate::new(200).set_body_string("ok")).await;
    assert_eq!(outcome, UploadOutcome::UnexpectedResponse { status: None });
}

#[tokio::test]
async fn test_ask_sends_question_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(body_json(serde_json::json!({ "question": "What is X?" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "answer": "X is Y" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let answer = client(&server).ask_question("What is X?").await.unwrap();
    assert_eq!(answer.answer, "X is Y");
}

#[test_case(serde_json::json!(["X is Y"]) ; "array_body")]
#[test_case(serde_json::json!({ "answer": 42 }) ; "numeric_answer")]
#[test_case(serde_json::json!({ "text": "X is Y" }) ; "missing_answer")]
#[tokio::test]
async fn test_malformed_answer_is_decode_error(body: serde_json::Value) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let err = client(&server).ask_question("Q").await.unwrap_err();
    assert!(matches!(err, AskError::Decode { .. }));
}

#[tokio::test]
async fn test_ask_failure_uses_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(serde_json::json!({ "detail": "Upload documents first" })),
        )
        .mount(&server)
        .await;

    let err = client(&server).ask_question("Q").await.unwrap_err();
    assert_eq!(err.to_string(), "Upload documents first");
    assert!(err.is_missing_index());
}

#[tokio::test]
async fn test_ask_failure_without_detail_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client(&server).ask_question("Q").await.unwrap_err();
    assert!(matches!(err, AskError::Rejected { status: 500, detail: None }));
    assert_eq!(err.to_string(), "Ask failed");
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = DocumentQaClient::with_base_url(format!("http://{addr}")).unwrap();
    let err = client.ask_question("Q").await.unwrap_err();

    assert!(matches!(err, AskError::Network { .. }));
}
