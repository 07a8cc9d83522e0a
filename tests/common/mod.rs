//! Shared test utilities for the API integration tests.
//!
//! Every test runs against its own `mockito` server, so nothing here touches
//! a real MCQ service.

#![allow(dead_code)]

use anyhow::Result;
use mcqdesk::api::ApiClient;
use mcqdesk::app::Router;
use mcqdesk::config::Config;
use mcqdesk::services::Dispatcher;
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use serde_json::{json, Value};
use std::path::Path;

/// Prefix every endpoint lives under.
pub const API_PREFIX: &str = "/api/v1";

pub fn api_path(path: &str) -> String {
    format!("{}{}", API_PREFIX, path)
}

pub fn base_url(server_url: &str) -> String {
    format!("{}{}", server_url, API_PREFIX)
}

pub fn client(server_url: &str) -> ApiClient {
    ApiClient::new(base_url(server_url))
}

pub fn config(server_url: &str, export_dir: &Path) -> Config {
    Config {
        api_base_url: base_url(server_url),
        user_id: Some("tester".to_string()),
        export_dir: export_dir.to_path_buf(),
        ..Config::default()
    }
}

pub fn router(config: Config) -> Result<Router> {
    let client = ApiClient::new(config.api_base_url.clone());
    let dispatcher = Dispatcher::new(client)?;
    Ok(Router::new(config, dispatcher))
}

/// Draw one frame and return the screen text.
pub fn screen_text(router: &mut Router) -> Result<String> {
    let mut terminal = Terminal::new(TestBackend::new(140, 50))?;
    let mut result = Ok(());
    terminal.draw(|frame| result = router.render(frame))?;
    result?;
    Ok(terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect())
}

/// A stored question the way the service returns it.
pub fn question_json(id: &str, text: &str) -> Value {
    json!({
        "_id": id,
        "question_text": text,
        "options": ["Paris", "Berlin", "Madrid", "Rome"],
        "correct_answer_index": 0,
        "explanation": "Paris is the capital of France.",
        "difficulty": "easy",
        "categories": ["Geography"],
        "created_at": "2024-05-01T10:00:00",
        "source": "Manual"
    })
}

/// A quiz question: no answer or explanation.
pub fn quiz_question_json(id: &str, text: &str) -> Value {
    json!({
        "_id": id,
        "question_text": text,
        "options": ["1", "2", "3", "4"]
    })
}
