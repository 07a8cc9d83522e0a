//! Screen trait and associated types.
//!
//! Each view is a screen that owns its state for exactly as long as it is
//! mounted. Screens never touch the network or global state directly: they
//! return a [`ScreenAction`] and receive API results through
//! [`Screen::on_response`].

use crate::config::Config;
use crate::services::{ApiRequest, ApiResponse};
use crate::ui::ViewId;
use anyhow::Result;
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Read-only resources for rendering.
pub struct RenderContext<'a> {
    pub config: &'a Config,
    /// Frame counter, drives spinner animation.
    pub tick: u64,
}

impl<'a> RenderContext<'a> {
    pub fn new(config: &'a Config, tick: u64) -> Self {
        Self { config, tick }
    }
}

/// Read-only resources for event handling.
pub struct ScreenContext<'a> {
    pub config: &'a Config,
}

impl<'a> ScreenContext<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }
}

/// What the router should do after a screen handled an event.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScreenAction {
    /// Stay on the current screen.
    #[default]
    None,
    /// Mount a different view.
    Navigate(ViewId),
    /// Run an API call; the result arrives via [`Screen::on_response`].
    Request(ApiRequest),
    /// Show a dismissable notice.
    ShowMessage { title: String, content: String },
    Quit,
}

/// Trait for view controllers.
///
/// # Example
///
/// ```rust,ignore
/// impl Screen for MyScreen {
///     fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
///         Ok(())
///     }
///
///     fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction> {
///         Ok(ScreenAction::Request(ApiRequest::ListDocuments))
///     }
/// }
/// ```
pub trait Screen {
    fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;

    /// Handle an input event.
    fn handle_event(&mut self, event: Event, ctx: &ScreenContext) -> Result<ScreenAction>;

    /// Receive the result of a request this screen issued.
    fn on_response(&mut self, _response: ApiResponse, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    /// Whether a text field has focus.
    ///
    /// While true the router leaves `q` to the screen instead of quitting.
    fn is_input_focused(&self) -> bool {
        false
    }

    /// Whether a modal owned by the screen should receive Esc instead of the router.
    fn has_modal(&self) -> bool {
        false
    }

    /// Called when the screen is mounted.
    fn on_enter(&mut self, _ctx: &ScreenContext) -> Result<ScreenAction> {
        Ok(ScreenAction::None)
    }

    /// Key hints for the footer.
    fn footer_hints(&self) -> &'static str {
        "Switch: F1-F7 | Field: Tab/Shift+Tab | Home: Esc | Quit: Ctrl+C"
    }
}
