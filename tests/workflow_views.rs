//! End-to-end view workflows through the router against a mock service.
//!
//! Keys go in through `Router::handle_event`, API results come back through
//! the dispatcher, and assertions read the rendered screen.

mod common;

use anyhow::Result;
use common::{
    api_path, client, config, question_json, quiz_question_json, router, screen_text,
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use mcqdesk::api::{Difficulty, QuestionDraft, QuestionFilter};
use mcqdesk::app::Router;
use mcqdesk::ui::ViewId;
use mockito::{Matcher, Server};
use serde_json::json;
use std::collections::BTreeSet;
use std::time::Duration;
use tempfile::TempDir;

const WAIT: Duration = Duration::from_secs(5);

fn press(router: &mut Router, code: KeyCode) -> Result<()> {
    router.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
}

fn type_text(router: &mut Router, text: &str) -> Result<()> {
    for c in text.chars() {
        press(router, KeyCode::Char(c))?;
    }
    Ok(())
}

// ============================================================================
// QUIZ
// ============================================================================

#[test]
fn quiz_round_trip_shows_score() -> Result<()> {
    // Given: a service that serves two quiz questions and scores the answers
    let mut server = Server::new();
    server
        .mock("POST", api_path("/quiz/generate").as_str())
        .match_body(Matcher::PartialJson(json!({"num_questions": 5, "difficulty": "medium"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                quiz_question_json("q1", "What is 1 + 1?"),
                quiz_question_json("q2", "What is 2 + 2?")
            ])
            .to_string(),
        )
        .create();
    let submit = server
        .mock("POST", api_path("/quiz/submit").as_str())
        .match_body(Matcher::PartialJson(json!({
            "answers": [
                {"question_id": "q1", "user_answer_index": 1},
                {"question_id": "q2", "user_answer_index": -1}
            ],
            "user_id": "tester"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"total_questions": 2, "correct_answers": 1, "score": 50.0}).to_string(),
        )
        .create();
    let dir = TempDir::new()?;
    let mut router = router(config(&server.url(), dir.path()))?;
    router.start(ViewId::TakeQuiz)?;

    // When: the quiz is drawn, q1 answered with B and q2 skipped
    press(&mut router, KeyCode::Enter)?;
    assert!(router.wait_for_response(WAIT)?);
    assert!(screen_text(&mut router)?.contains("What is 1 + 1?"));
    press(&mut router, KeyCode::Char('b'))?;
    press(&mut router, KeyCode::Char('s'))?;
    assert!(router.wait_for_response(WAIT)?);

    // Then: the score is shown with two decimals
    submit.assert();
    let text = screen_text(&mut router)?;
    assert!(text.contains("Score: 50.00%"));
    Ok(())
}

#[test]
fn empty_quiz_offers_try_again() -> Result<()> {
    let mut server = Server::new();
    server
        .mock("POST", api_path("/quiz/generate").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    let dir = TempDir::new()?;
    let mut router = router(config(&server.url(), dir.path()))?;
    router.start(ViewId::TakeQuiz)?;

    press(&mut router, KeyCode::Enter)?;
    assert!(router.wait_for_response(WAIT)?);

    let text = screen_text(&mut router)?;
    assert!(text.contains("No questions found matching your criteria"));
    assert!(text.contains("Try Again"));
    Ok(())
}

// ============================================================================
// QUESTION BANK
// ============================================================================

#[test]
fn delete_after_confirmation_removes_question() -> Result<()> {
    // Given: two stored questions
    let mut server = Server::new();
    server
        .mock("GET", api_path("/mcq/questions").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                question_json("q1", "Capital of France?"),
                question_json("q2", "Capital of Spain?")
            ])
            .to_string(),
        )
        .create();
    let delete = server
        .mock("DELETE", api_path("/mcq/questions/q1").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"message": "deleted"}).to_string())
        .create();
    let dir = TempDir::new()?;
    let mut router = router(config(&server.url(), dir.path()))?;

    // When: the list loads and the first question is deleted and confirmed
    router.start(ViewId::AllQuestions)?;
    assert!(router.wait_for_response(WAIT)?);
    press(&mut router, KeyCode::Char('d'))?;
    press(&mut router, KeyCode::Char('y'))?;
    assert!(router.wait_for_response(WAIT)?);

    // Then: the question is gone and the success banner shows
    delete.assert();
    let text = screen_text(&mut router)?;
    assert!(text.contains("Question deleted successfully!"));
    assert!(!text.contains("Capital of France?"));
    assert!(text.contains("Capital of Spain?"));
    Ok(())
}

#[test]
fn create_question_posts_trimmed_fields() -> Result<()> {
    // Given: a create endpoint expecting the trimmed draft
    let mut server = Server::new();
    let create = server
        .mock("POST", api_path("/mcq/questions").as_str())
        .match_body(Matcher::PartialJson(json!({
            "question_text": "Largest planet?",
            "options": ["Jupiter", "Mars", "Venus", "Earth"],
            "correct_answer_index": 0
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(question_json("new", "Largest planet?").to_string())
        .create();
    let dir = TempDir::new()?;
    let mut router = router(config(&server.url(), dir.path()))?;
    router.start(ViewId::CreateQuestion)?;

    // When: the form is filled in and submitted
    type_text(&mut router, "  Largest planet?  ")?;
    for option in ["Jupiter", "Mars", "Venus", "Earth"] {
        press(&mut router, KeyCode::Tab)?;
        type_text(&mut router, option)?;
    }
    // Correct answer selector: first non-empty option
    press(&mut router, KeyCode::Tab)?;
    press(&mut router, KeyCode::Right)?;
    press(&mut router, KeyCode::Enter)?;
    assert!(router.wait_for_response(WAIT)?);

    // Then: the service received the draft and the form confirms
    create.assert();
    assert!(screen_text(&mut router)?.contains("Question created successfully!"));
    Ok(())
}

// ============================================================================
// EXPORT
// ============================================================================

#[test]
fn export_writes_file_and_reports_path() -> Result<()> {
    let mut server = Server::new();
    server
        .mock("GET", api_path("/export/json").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    let dir = TempDir::new()?;
    let mut router = router(config(&server.url(), dir.path()))?;
    router.start(ViewId::ExportOptions)?;

    press(&mut router, KeyCode::Enter)?;
    assert!(router.wait_for_response(WAIT)?);

    assert!(dir.path().join("mcq_questions.json").exists());
    assert!(screen_text(&mut router)?.contains("Questions exported successfully as JSON!"));
    Ok(())
}

#[test]
fn navigating_away_discards_pending_result() -> Result<()> {
    let mut server = Server::new();
    server
        .mock("GET", api_path("/documents/uploaded").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    let dir = TempDir::new()?;
    let mut router = router(config(&server.url(), dir.path()))?;

    // The upload view fetches documents on mount; leave before it lands
    router.start(ViewId::UploadDocument)?;
    press(&mut router, KeyCode::F(1))?;

    assert_eq!(router.current_view(), ViewId::Home);
    assert!(!router.wait_for_response(Duration::from_millis(300))?);
    Ok(())
}

// ============================================================================
// LISTING
// ============================================================================

#[test]
fn listing_twice_returns_same_ids() -> Result<()> {
    let mut server = Server::new();
    let list = server
        .mock("GET", api_path("/mcq/questions").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                question_json("a1", "Capital of France?"),
                question_json("b2", "Capital of Spain?")
            ])
            .to_string(),
        )
        .expect(2)
        .create();
    let client = client(&server.url());
    let runtime = tokio::runtime::Runtime::new()?;

    let ids = |questions: Vec<mcqdesk::api::Question>| {
        questions.into_iter().map(|q| q.id).collect::<BTreeSet<_>>()
    };
    let first = ids(runtime.block_on(client.list_questions(&QuestionFilter::default()))?);
    let second = ids(runtime.block_on(client.list_questions(&QuestionFilter::default()))?);

    list.assert();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    Ok(())
}

#[test]
fn created_question_is_listed_unchanged() -> Result<()> {
    let stored = json!({
        "_id": "new1",
        "question_text": "Largest planet?",
        "options": ["Jupiter", "Mars", "Venus"],
        "correct_answer_index": 0,
        "explanation": null,
        "difficulty": "hard",
        "categories": ["Astronomy", "Science"],
        "source": "Manual"
    });
    let mut server = Server::new();
    server
        .mock("POST", api_path("/mcq/questions").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(stored.to_string())
        .create();
    server
        .mock("GET", api_path("/mcq/questions").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([question_json("old", "Capital of France?"), stored]).to_string())
        .create();
    let client = client(&server.url());
    let runtime = tokio::runtime::Runtime::new()?;

    let draft = QuestionDraft {
        question_text: "Largest planet?".to_string(),
        options: vec!["Jupiter".into(), "Mars".into(), "Venus".into()],
        correct_answer_index: 0,
        explanation: None,
        difficulty: Difficulty::Hard,
        categories: vec!["Astronomy".into(), "Science".into()],
    };
    let created = runtime.block_on(client.create_question(&draft))?;
    let listed = runtime.block_on(client.list_questions(&QuestionFilter::default()))?;

    let found = listed
        .iter()
        .find(|q| q.id == created.id)
        .expect("created question should be listed");
    assert_eq!(found.to_draft(), draft);
    assert_eq!(created.to_draft(), draft);
    Ok(())
}
