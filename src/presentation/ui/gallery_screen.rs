//! Gallery screen: search input, card grid, status footer and toasts.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, StatefulWidget, Widget},
};
use tracing::debug;

use super::notification_popup::NotificationPopup;
use super::toasts::{ToastKind, ToastQueue};
use crate::domain::{GalleryEvent, ImageRecord, SearchQuery};
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{GalleryGrid, GalleryGridState, StatusBar, StatusLevel, TextInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryFocus {
    Search,
    Gallery,
}

/// Where the gallery stands with respect to "load more".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing searched yet.
    Idle,
    /// A request is outstanding.
    Loading,
    /// Another page can be requested.
    MoreAvailable,
    /// The current search has nothing more to show.
    Exhausted,
}

/// Outcome of a key press on the gallery screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryKeyResult {
    None,
    Quit,
    Search(SearchQuery),
    LoadMore,
    OpenUrl(String),
}

pub struct GalleryScreenState {
    input: TextInput,
    focus: GalleryFocus,
    grid: GalleryGridState,
    phase: LoadPhase,
    phase_before_loading: LoadPhase,
    query: Option<SearchQuery>,
    shown: u64,
    total: u64,
    toasts: ToastQueue,
}

impl GalleryScreenState {
    #[must_use]
    pub fn new(toast_duration: Duration) -> Self {
        let mut input = TextInput::new(" Search images ").placeholder("Type a query and press Enter");
        input.set_focused(true);

        Self {
            input,
            focus: GalleryFocus::Search,
            grid: GalleryGridState::new(),
            phase: LoadPhase::Idle,
            phase_before_loading: LoadPhase::Idle,
            query: None,
            shown: 0,
            total: 0,
            toasts: ToastQueue::new(toast_duration),
        }
    }

    #[must_use]
    pub const fn focus(&self) -> GalleryFocus {
        self.focus
    }

    #[must_use]
    pub const fn phase(&self) -> LoadPhase {
        self.phase
    }

    #[must_use]
    pub const fn grid(&self) -> &GalleryGridState {
        &self.grid
    }

    #[must_use]
    pub const fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// "Load more" is offered only between requests of a live search.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.phase == LoadPhase::MoreAvailable
    }

    fn set_focus(&mut self, focus: GalleryFocus) {
        self.focus = focus;
        self.input.set_focused(focus == GalleryFocus::Search);
    }

    /// Expires toasts.
    pub fn tick(&mut self) {
        self.toasts.tick();
    }

    /// Applies one gallery signal.
    pub fn apply_event(&mut self, event: GalleryEvent) {
        if let Some(kind) = ToastKind::from_event(&event) {
            self.toasts.push(kind);
        }

        match event {
            GalleryEvent::ClearGallery { query } => {
                self.grid.clear();
                self.shown = 0;
                self.total = 0;
                self.query = Some(query);
            }
            GalleryEvent::Loading { page } => {
                debug!(page, "Gallery loading");
                if self.phase != LoadPhase::Loading {
                    self.phase_before_loading = self.phase;
                }
                self.phase = LoadPhase::Loading;
            }
            GalleryEvent::LoadingDone => {}
            GalleryEvent::AppendBatch(batch) => {
                self.shown += batch.len() as u64;
                self.grid.append(batch);
            }
            GalleryEvent::NoResults | GalleryEvent::EndOfResults => {
                self.phase = LoadPhase::Exhausted;
            }
            GalleryEvent::MoreAvailable { shown, total } => {
                self.shown = shown;
                self.total = total;
                self.phase = LoadPhase::MoreAvailable;
            }
            GalleryEvent::Failed { reason, transient } => {
                debug!(reason = %reason, transient, "Gallery request failed");
                if self.phase == LoadPhase::Loading {
                    self.phase = self.phase_before_loading;
                }
            }
        }
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> GalleryKeyResult {
        if EventHandler::is_force_quit_event(&key) {
            return GalleryKeyResult::Quit;
        }

        match self.focus {
            GalleryFocus::Search => self.handle_search_key(key),
            GalleryFocus::Gallery => self.handle_gallery_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> GalleryKeyResult {
        if EventHandler::is_submit_event(&key) {
            let Some(query) = SearchQuery::new(self.input.value()) else {
                return GalleryKeyResult::None;
            };
            self.input.clear();
            self.set_focus(GalleryFocus::Gallery);
            return GalleryKeyResult::Search(query);
        }

        match key.code {
            KeyCode::Esc => self.set_focus(GalleryFocus::Gallery),
            KeyCode::Char(c) => self.input.input_char(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_start(),
            KeyCode::End => self.input.move_end(),
            _ => {}
        }
        GalleryKeyResult::None
    }

    fn handle_gallery_key(&mut self, key: KeyEvent) -> GalleryKeyResult {
        if EventHandler::is_quit_event(&key) {
            return GalleryKeyResult::Quit;
        }

        match key.code {
            KeyCode::Char('/' | 'i') => self.set_focus(GalleryFocus::Search),
            KeyCode::Char('m') => {
                if self.can_load_more() {
                    return GalleryKeyResult::LoadMore;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.grid.select_next_row(),
            KeyCode::Char('k') | KeyCode::Up => self.grid.select_previous_row(),
            KeyCode::Char('l') | KeyCode::Right => self.grid.select_next(),
            KeyCode::Char('h') | KeyCode::Left => self.grid.select_previous(),
            KeyCode::Char('g') | KeyCode::Home => self.grid.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.grid.select_last(),
            KeyCode::Char('o') | KeyCode::Enter => {
                if let Some(record) = self.grid.selected_record() {
                    return GalleryKeyResult::OpenUrl(record.full_url().to_string());
                }
            }
            KeyCode::Char('p') => {
                if let Some(url) = self.grid.selected_record().and_then(ImageRecord::page_url) {
                    return GalleryKeyResult::OpenUrl(url.to_string());
                }
            }
            _ => {}
        }
        GalleryKeyResult::None
    }

    fn status_bar(&self) -> StatusBar {
        let left = match &self.query {
            Some(query) if self.total > 0 => format!(" {query}  {}/{}", self.shown, self.total),
            Some(query) => format!(" {query}  {}", self.shown),
            None => " No search yet".to_string(),
        };

        let (center, level) = match self.phase {
            LoadPhase::Idle => (String::new(), StatusLevel::Info),
            LoadPhase::Loading => ("Loading images, please wait...".to_string(), StatusLevel::Busy),
            LoadPhase::MoreAvailable => ("[m] Load more".to_string(), StatusLevel::Info),
            LoadPhase::Exhausted => ("End of results".to_string(), StatusLevel::Done),
        };

        let right = match self.focus {
            GalleryFocus::Search => "Enter search  Esc gallery ",
            GalleryFocus::Gallery => "/ search  hjkl move  o open  p page  q quit ",
        };

        StatusBar::new().left(left).center(center).right(right).level(level)
    }
}

/// Stateless renderer for [`GalleryScreenState`].
pub struct GalleryScreen;

impl GalleryScreen {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for GalleryScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl StatefulWidget for GalleryScreen {
    type State = GalleryScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [input_area, grid_area, status_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        (&state.input).render(input_area, buf);

        let border_color = if state.focus == GalleryFocus::Gallery {
            Color::Cyan
        } else {
            Color::Gray
        };
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(border_color))
            .title(" Gallery ");

        if state.grid.is_empty() {
            let hint = if state.phase == LoadPhase::Loading {
                "Loading images, please wait..."
            } else {
                "Search for images to fill the gallery"
            };
            let inner = block.inner(grid_area);
            block.render(grid_area, buf);
            Line::styled(hint, Style::default().fg(Color::DarkGray))
                .centered()
                .render(inner, buf);
        } else {
            GalleryGrid::new()
                .block(block)
                .render(grid_area, buf, &mut state.grid);
        }

        (&state.status_bar()).render(status_area, buf);

        if let Some(toast) = state.toasts.current() {
            NotificationPopup::new(toast).render(area, buf);
        }
    }
}
