//! Application services layer.
//!
//! Services sit between the views and the API client.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 UI Layer                    │
//! │  (App, Screens, Components)                 │
//! └─────────────────────┬───────────────────────┘
//!                       │ ApiRequest / ApiResponse
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │              Services Layer                 │
//! │  ┌────────────┐ ┌───────────────┐           │
//! │  │ Dispatcher │ │ export saving │           │
//! │  └────────────┘ └───────────────┘           │
//! └─────────────────────┬───────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │          Infrastructure Layer               │
//! │  (ApiClient, Config, filesystem)            │
//! └─────────────────────────────────────────────┘
//! ```

pub mod dispatcher;
pub mod export;

pub use dispatcher::{ApiRequest, ApiResponse, Dispatcher};
pub use export::{save_export, EXPORT_FILE_NAME};
