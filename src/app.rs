//! The application shell: terminal loop plus the view router.

use crate::api::ApiClient;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::config::Config;
use crate::screens::{RenderContext, ScreenAction, ScreenContext};
use crate::services::Dispatcher;
use crate::state::{GlobalState, ScreenState};
use crate::styles::theme;
use crate::tui::Tui;
use crate::ui::ViewId;
use crate::utils::create_standard_layout;
use crate::widgets::Dialog;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::widgets::Block;
use ratatui::Frame;
use std::time::Duration;
use tracing::{debug, info};

const NOTICE_FOOTER: &str = "Close: Enter/Esc";

/// Owns the mounted view and routes input, API results and actions to it.
///
/// Exactly one view is mounted at a time. Switching views drops the old view's
/// state and abandons its pending requests.
pub struct Router {
    config: Config,
    dispatcher: Dispatcher,
    screen: ScreenState,
    global: GlobalState,
}

impl Router {
    pub fn new(config: Config, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            dispatcher,
            screen: ScreenState::default(),
            global: GlobalState::new(),
        }
    }

    pub fn current_view(&self) -> ViewId {
        self.screen.view()
    }

    pub fn should_quit(&self) -> bool {
        self.global.should_quit
    }

    pub fn notice(&self) -> Option<&crate::state::Notice> {
        self.global.dialog.as_ref()
    }

    /// Mount the first view.
    pub fn start(&mut self, view: ViewId) -> Result<()> {
        info!("Starting on view {}", view);
        self.mount(view)
    }

    /// Switch to `view`. Selecting the mounted view again keeps its state.
    pub fn navigate(&mut self, view: ViewId) -> Result<()> {
        if view == self.screen.view() {
            return Ok(());
        }
        info!("Navigating {} -> {}", self.screen.view(), view);
        self.mount(view)
    }

    fn mount(&mut self, view: ViewId) -> Result<()> {
        self.dispatcher.remount();
        self.screen = ScreenState::for_view(view);
        let ctx = ScreenContext::new(&self.config);
        let action = self.screen.as_screen_mut().on_enter(&ctx)?;
        self.apply(action)
    }

    fn apply(&mut self, action: ScreenAction) -> Result<()> {
        match action {
            ScreenAction::None => {}
            ScreenAction::Navigate(view) => self.navigate(view)?,
            ScreenAction::Request(request) => self.dispatcher.dispatch(request),
            ScreenAction::ShowMessage { title, content } => {
                self.global.show_message(title, content);
            }
            ScreenAction::Quit => {
                info!("Quit requested");
                self.global.should_quit = true;
            }
        }
        Ok(())
    }

    /// Deliver every API result that has arrived for the mounted view.
    pub fn poll_responses(&mut self) -> Result<()> {
        while let Some(response) = self.dispatcher.try_recv() {
            let ctx = ScreenContext::new(&self.config);
            let action = self.screen.as_screen_mut().on_response(response, &ctx)?;
            self.apply(action)?;
        }
        Ok(())
    }

    /// Block up to `timeout` for one API result and deliver it.
    pub fn wait_for_response(&mut self, timeout: Duration) -> Result<bool> {
        let Some(response) = self.dispatcher.recv_timeout(timeout) else {
            return Ok(false);
        };
        let ctx = ScreenContext::new(&self.config);
        let action = self.screen.as_screen_mut().on_response(response, &ctx)?;
        self.apply(action)?;
        Ok(true)
    }

    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }
            if self.handle_global_key(key)? {
                return Ok(());
            }
        }

        let ctx = ScreenContext::new(&self.config);
        let action = self.screen.as_screen_mut().handle_event(event, &ctx)?;
        self.apply(action)
    }

    /// Keys the router handles before the view sees them. Returns true when consumed.
    fn handle_global_key(&mut self, key: KeyEvent) -> Result<bool> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.global.should_quit = true;
            return Ok(true);
        }

        if self.global.has_dialog() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.global.close_dialog();
            }
            return Ok(true);
        }

        match key.code {
            KeyCode::F(n) => {
                if let Some(view) = ViewId::from_function_key(n) {
                    self.navigate(view)?;
                }
                Ok(true)
            }
            KeyCode::Char('q')
                if key.modifiers == KeyModifiers::NONE
                    && !self.screen.as_screen().is_input_focused()
                    && !self.screen.as_screen().has_modal() =>
            {
                self.apply(ScreenAction::Quit)?;
                Ok(true)
            }
            KeyCode::Esc if !self.screen.as_screen().has_modal() => {
                if self.screen.view() != ViewId::Home {
                    self.navigate(ViewId::Home)?;
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn render(&mut self, frame: &mut Frame) -> Result<()> {
        let t = theme();
        let area = frame.area();
        frame.render_widget(Block::default().style(t.background_style()), area);

        let [header, content, footer] =
            create_standard_layout(area, Header::HEIGHT, Footer::HEIGHT);
        Header::render(frame, header, self.screen.view())?;

        let ctx = RenderContext::new(&self.config, self.global.tick);
        self.screen.as_screen_mut().render(frame, content, &ctx)?;

        let hints = if self.global.has_dialog() {
            NOTICE_FOOTER
        } else {
            self.screen.as_screen().footer_hints()
        };
        Footer::render(frame, footer, hints)?;

        if let Some(notice) = &self.global.dialog {
            frame.render_widget(
                Dialog::new(&notice.title, &notice.content).footer(NOTICE_FOOTER),
                area,
            );
        }

        self.global.advance_tick();
        Ok(())
    }
}

/// Main application
pub struct App {
    tui: Tui,
    router: Router,
    initial_view: ViewId,
}

impl App {
    pub fn new(config: Config, initial_view: ViewId) -> Result<Self> {
        let client = ApiClient::with_timeout(config.api_base_url.clone(), config.request_timeout())?;
        info!("Using MCQ service at {}", client.base_url());
        let dispatcher = Dispatcher::new(client)?;
        let tui = Tui::new()?;
        Ok(Self {
            tui,
            router: Router::new(config, dispatcher),
            initial_view,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        self.router.start(self.initial_view)?;

        // Main event loop
        loop {
            self.draw()?;

            if self.router.should_quit() {
                break;
            }

            self.router.poll_responses()?;

            // Poll for events with 250ms timeout
            if let Some(event) = self.tui.poll_event(Duration::from_millis(250))? {
                self.router.handle_event(event)?;
            }
        }

        debug!("Leaving event loop");
        self.tui.exit()?;
        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let router = &mut self.router;
        let mut result = Ok(());
        self.tui.draw(|frame| result = router.render(frame))?;
        result
    }
}
