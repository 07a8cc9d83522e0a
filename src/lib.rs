//! mcqdesk - a terminal client for an MCQ question bank service
//!
//! This library provides the API client, the request dispatcher and the
//! views of the TUI, plus a headless CLI over the same client.

// Core modules
pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod screens;
pub mod services;
pub mod state;
pub mod styles;
pub mod tui;
pub mod ui;
pub mod utils;
pub mod widgets;

// Re-exports for convenience
pub use api::{ApiClient, ApiError, ApiResult};
pub use config::Config;
pub use services::{ApiRequest, ApiResponse, Dispatcher};
pub use ui::ViewId;
