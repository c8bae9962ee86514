//! Main application orchestrator.

use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::application::GalleryHandle;
use crate::domain::{GalleryEvent, SearchQuery};
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::ui::{GalleryKeyResult, GalleryScreen, GalleryScreenState};

const TICK_RATE: Duration = Duration::from_millis(250);

/// Drives terminal input, gallery signals and redraws.
pub struct App {
    screen: GalleryScreenState,
    gallery: GalleryHandle,
    events_rx: mpsc::UnboundedReceiver<GalleryEvent>,
    running: bool,
}

impl App {
    #[must_use]
    pub fn new(
        gallery: GalleryHandle,
        events_rx: mpsc::UnboundedReceiver<GalleryEvent>,
        notification_duration: Duration,
    ) -> Self {
        Self {
            screen: GalleryScreenState::new(notification_duration),
            gallery,
            events_rx,
            running: true,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(
        mut self,
        terminal: &mut DefaultTerminal,
        initial_query: Option<SearchQuery>,
    ) -> color_eyre::Result<()> {
        if let Some(query) = initial_query {
            info!(query = %query, "Running initial search");
            self.submit_search(query);
        }

        self.run_event_loop(terminal).await?;

        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick_interval = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                biased;

                Some(event) = self.events_rx.recv() => {
                    self.screen.apply_event(event);
                    while let Ok(event) = self.events_rx.try_recv() {
                        self.screen.apply_event(event);
                    }
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.running = false;
                    }
                }

                _ = tick_interval.tick() => {
                    self.screen.tick();
                }
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if EventHandler::is_press(&key) => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        match self.screen.handle_key(key) {
            GalleryKeyResult::None => {}
            GalleryKeyResult::Quit => return EventResult::Exit,
            GalleryKeyResult::Search(query) => self.submit_search(query),
            GalleryKeyResult::LoadMore => {
                debug!("Requesting next page");
                if !self.gallery.load_more() {
                    warn!("Gallery service is gone, load more dropped");
                }
            }
            GalleryKeyResult::OpenUrl(url) => open_url(&url),
        }
        EventResult::Continue
    }

    fn submit_search(&mut self, query: SearchQuery) {
        if !self.gallery.search(query) {
            warn!("Gallery service is gone, search dropped");
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(GalleryScreen::new(), frame.area(), &mut self.screen);
    }
}

fn open_url(url: &str) {
    match opener::open_browser(url) {
        Ok(()) => debug!(url, "Opened in browser"),
        Err(e) => warn!(url, error = %e, "Failed to open URL"),
    }
}
