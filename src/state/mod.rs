//! Application state management.
//!
//! The router holds exactly one mounted view. Its state lives in the
//! [`ScreenState`] enum, so leaving a view drops everything it owned.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                       App                           │
//! ├─────────────────────────────────────────────────────┤
//! │  ┌───────────────┐    ┌──────────────────────────┐  │
//! │  │ GlobalState   │    │ ScreenState              │  │
//! │  │               │    │ ┌────────────────────┐   │  │
//! │  │ - dialog      │    │ │ Home(screen)       │   │  │
//! │  │ - tick        │    │ │ Generate(screen)   │   │  │
//! │  │ - should_quit │    │ │ AllQuestions(...)  │   │  │
//! │  │               │    │ │ ...                │   │  │
//! │  └───────────────┘    │ └────────────────────┘   │  │
//! │                       └──────────────────────────┘  │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod global;
pub mod screen;

pub use global::GlobalState;
pub use screen::ScreenState;

/// A dismissable notice shown over the current view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub content: String,
}
