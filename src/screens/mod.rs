//! View controllers.
//!
//! Each view implements the [`Screen`] trait and owns its state. The router
//! in [`crate::app`] mounts exactly one of them at a time.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                      App                               │
//! │  ┌────────────────────────────────────────────────┐    │
//! │  │               View Router                      │    │
//! │  │  match screen_state {                          │    │
//! │  │    Home(s) => s.handle_event(...)              │    │
//! │  │    Generate(s) => s.handle_event(...)          │    │
//! │  │    ...                                         │    │
//! │  │  }                                             │    │
//! │  └────────────────────────────────────────────────┘    │
//! │                                                        │
//! │  ┌────────────────────────────────────────────────┐    │
//! │  │               Screen Trait                     │    │
//! │  │  - render(frame, area, context)                │    │
//! │  │  - handle_event(event, context) -> Action      │    │
//! │  │  - on_response(response, context) -> Action    │    │
//! │  └────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────┘
//! ```

pub mod all_questions;
pub mod create_question;
pub mod document_upload;
pub mod export_options;
pub mod generate;
pub mod home;
pub mod quiz_taker;
pub mod screen_trait;

pub use all_questions::AllQuestionsScreen;
pub use create_question::CreateQuestionScreen;
pub use document_upload::DocumentUploadScreen;
pub use export_options::ExportOptionsScreen;
pub use generate::GenerateScreen;
pub use home::HomeScreen;
pub use quiz_taker::QuizTakerScreen;
pub use screen_trait::{RenderContext, Screen, ScreenAction, ScreenContext};
