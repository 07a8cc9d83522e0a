//! Integration tests for the background request dispatcher.
//!
//! These tests are synchronous: the dispatcher owns its own runtime, exactly
//! as it does inside the TUI loop.

mod common;

use anyhow::Result;
use common::{api_path, client, question_json};
use mcqdesk::api::{Difficulty, ExportFilter, QuestionFilter};
use mcqdesk::services::{ApiRequest, ApiResponse, Dispatcher};
use mockito::Server;
use serde_json::json;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const WAIT: Duration = Duration::from_secs(5);

fn wait_until_idle(dispatcher: &Dispatcher) {
    let deadline = Instant::now() + WAIT;
    while dispatcher.is_busy() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn dispatched_request_delivers_response() -> Result<()> {
    // Given: a service with one stored question
    let mut server = Server::new();
    server
        .mock("GET", api_path("/mcq/questions").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([question_json("q1", "Capital of France?")]).to_string())
        .create();
    let mut dispatcher = Dispatcher::new(client(&server.url()))?;

    // When: the list is requested
    dispatcher.dispatch(ApiRequest::ListQuestions(QuestionFilter::default()));

    // Then: the questions arrive on the channel
    match dispatcher.recv_timeout(WAIT) {
        Some(ApiResponse::Questions(Ok(questions))) => assert_eq!(questions[0].id, "q1"),
        other => panic!("unexpected response: {:?}", other),
    }
    Ok(())
}

#[test]
fn remount_drops_responses_for_the_old_view() -> Result<()> {
    // Given: a finished request whose result is still queued
    let mut server = Server::new();
    server
        .mock("GET", api_path("/documents/uploaded").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    let mut dispatcher = Dispatcher::new(client(&server.url()))?;
    let first_mount = dispatcher.mount();
    dispatcher.dispatch(ApiRequest::ListDocuments);
    wait_until_idle(&dispatcher);

    // When: the user navigates away
    let second_mount = dispatcher.remount();

    // Then: the late result never reaches the new view
    assert_eq!(second_mount, first_mount + 1);
    assert!(dispatcher.try_recv().is_none());
    assert!(dispatcher.recv_timeout(Duration::from_millis(100)).is_none());
    Ok(())
}

#[test]
fn export_saves_without_overwriting() -> Result<()> {
    // Given: an export endpoint and an empty download directory
    let mut server = Server::new();
    server
        .mock("GET", api_path("/export/json").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"_id":"q1"}]"#)
        .expect(2)
        .create();
    let dir = TempDir::new()?;
    let mut dispatcher = Dispatcher::new(client(&server.url()))?;

    // When: exporting twice
    let mut saved = Vec::new();
    for _ in 0..2 {
        dispatcher.dispatch(ApiRequest::ExportJson {
            filter: ExportFilter::default(),
            dir: dir.path().to_path_buf(),
        });
        match dispatcher.recv_timeout(WAIT) {
            Some(ApiResponse::Exported(Ok(path))) => saved.push(path),
            other => panic!("unexpected response: {:?}", other),
        }
    }

    // Then: the second export gets a numbered name and both hold the payload
    assert_eq!(saved[0], dir.path().join("mcq_questions.json"));
    assert_eq!(saved[1], dir.path().join("mcq_questions (1).json"));
    for path in &saved {
        assert_eq!(std::fs::read_to_string(path)?, r#"[{"_id":"q1"}]"#);
    }
    Ok(())
}

#[test]
fn upload_of_missing_file_fails_without_request() -> Result<()> {
    // Given: a path that does not exist
    let server = Server::new();
    let dir = TempDir::new()?;
    let mut dispatcher = Dispatcher::new(client(&server.url()))?;

    // When: it is uploaded
    dispatcher.dispatch(ApiRequest::UploadDocument {
        path: dir.path().join("missing.pdf"),
        num_questions_per_chunk: 2,
        difficulty: Difficulty::Medium,
        category: None,
    });

    // Then: the read failure comes back as an API error
    match dispatcher.recv_timeout(WAIT) {
        Some(ApiResponse::DocumentUploaded(Err(err))) => {
            assert!(err.message().starts_with("Failed to read"));
        }
        other => panic!("unexpected response: {:?}", other),
    }
    Ok(())
}

#[test]
fn service_errors_are_delivered_not_raised() -> Result<()> {
    let mut server = Server::new();
    server
        .mock("DELETE", api_path("/mcq/questions/q1").as_str())
        .with_status(404)
        .with_body(json!({"detail": "Question not found"}).to_string())
        .create();
    let mut dispatcher = Dispatcher::new(client(&server.url()))?;

    dispatcher.dispatch(ApiRequest::DeleteQuestion { id: "q1".into() });

    match dispatcher.recv_timeout(WAIT) {
        Some(ApiResponse::QuestionDeleted { id, result }) => {
            assert_eq!(id, "q1");
            assert_eq!(result.unwrap_err().message(), "Question not found");
        }
        other => panic!("unexpected response: {:?}", other),
    }
    Ok(())
}
