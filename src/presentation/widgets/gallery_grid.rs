//! Gallery grid widget.
//!
//! Cards are laid out `ROW_WIDTH` per row and scrolled by whole rows.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget, Wrap},
};

use crate::domain::entities::ImageRecord;
use crate::domain::session::ROW_WIDTH;

/// Rows occupied by one card, borders included.
pub const CARD_HEIGHT: u16 = 7;

/// Records shown in the gallery plus selection and scroll position.
#[derive(Debug, Default)]
pub struct GalleryGridState {
    records: Vec<ImageRecord>,
    selected: Option<usize>,
    offset_row: usize,
}

impl GalleryGridState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every card.
    pub fn clear(&mut self) {
        self.records.clear();
        self.selected = None;
        self.offset_row = 0;
    }

    /// Appends cards after existing ones and re-validates the selection.
    pub fn append(&mut self, batch: Vec<ImageRecord>) {
        self.records.extend(batch);
        self.selected = match self.selected {
            _ if self.records.is_empty() => None,
            None => Some(0),
            Some(i) => Some(i.min(self.records.len() - 1)),
        };
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_record(&self) -> Option<&ImageRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.records.len().div_ceil(ROW_WIDTH)
    }

    /// Returns whether the selection sits on the last row.
    #[must_use]
    pub fn is_on_last_row(&self) -> bool {
        self.selected
            .is_some_and(|i| i / ROW_WIDTH + 1 >= self.row_count())
    }

    fn select(&mut self, index: usize) {
        if !self.records.is_empty() {
            self.selected = Some(index.min(self.records.len() - 1));
        }
    }

    pub fn select_next_row(&mut self) {
        if let Some(i) = self.selected {
            if i + ROW_WIDTH < self.records.len() {
                self.select(i + ROW_WIDTH);
            }
        }
    }

    pub fn select_previous_row(&mut self) {
        if let Some(i) = self.selected {
            self.select(i.saturating_sub(ROW_WIDTH));
        }
    }

    pub fn select_next(&mut self) {
        if let Some(i) = self.selected {
            self.select(i + 1);
        }
    }

    pub fn select_previous(&mut self) {
        if let Some(i) = self.selected {
            self.select(i.saturating_sub(1));
        }
    }

    pub fn select_first(&mut self) {
        self.select(0);
    }

    pub fn select_last(&mut self) {
        self.select(self.records.len().saturating_sub(1));
    }

    fn scroll_to_selection(&mut self, visible_rows: usize) {
        let Some(selected) = self.selected else {
            self.offset_row = 0;
            return;
        };
        let row = selected / ROW_WIDTH;
        let visible_rows = visible_rows.max(1);

        if row < self.offset_row {
            self.offset_row = row;
        } else if row >= self.offset_row + visible_rows {
            self.offset_row = row + 1 - visible_rows;
        }
    }
}

/// Stateless renderer for [`GalleryGridState`].
#[derive(Debug, Default)]
pub struct GalleryGrid<'a> {
    block: Option<Block<'a>>,
}

impl<'a> GalleryGrid<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

fn card_lines(record: &ImageRecord) -> Vec<Line<'_>> {
    let stats = record.stats();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);

    let tag_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC);
    let tags: Vec<Span<'_>> = record
        .tag_list()
        .flat_map(|tag| [Span::styled(format!("#{tag}"), tag_style), Span::raw(" ")])
        .collect();

    vec![
        Line::from(tags),
        Line::from(vec![
            Span::styled("Likes ", label),
            Span::styled(stats.likes.to_string(), value),
            Span::styled("  Views ", label),
            Span::styled(stats.views.to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Comments ", label),
            Span::styled(stats.comments.to_string(), value),
            Span::styled("  Downloads ", label),
            Span::styled(stats.downloads.to_string(), value),
        ]),
        Line::from(Span::styled(
            record.display_url(),
            Style::default().fg(Color::Blue),
        )),
    ]
}

fn render_card(record: &ImageRecord, selected: bool, area: Rect, buf: &mut Buffer) {
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    let title = record.author().map_or_else(
        || format!(" #{} ", record.id()),
        |author| format!(" {author} "),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border_style)
        .title(title);

    Paragraph::new(card_lines(record))
        .block(block)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

impl StatefulWidget for GalleryGrid<'_> {
    type State = GalleryGridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let visible_rows = usize::from((inner.height / CARD_HEIGHT).max(1));
        state.scroll_to_selection(visible_rows);

        let row_areas = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
            .split(inner);

        for (row_offset, row_area) in row_areas.iter().enumerate() {
            let first = (state.offset_row + row_offset) * ROW_WIDTH;
            if first >= state.records.len() {
                break;
            }

            let cells = Layout::horizontal(vec![
                Constraint::Ratio(1, ROW_WIDTH as u32);
                ROW_WIDTH
            ])
            .split(*row_area);

            for (column, cell) in cells.iter().enumerate() {
                let index = first + column;
                if let Some(record) = state.records.get(index) {
                    render_card(record, state.selected == Some(index), *cell, buf);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(count: u64) -> Vec<ImageRecord> {
        (0..count)
            .map(|i| {
                ImageRecord::new(i, format!("https://cdn.test/{i}.jpg"), "l.jpg", "tag")
                    .with_author(format!("user{i}"))
            })
            .collect()
    }

    #[test]
    fn test_append_selects_first_card() {
        let mut state = GalleryGridState::new();
        assert_eq!(state.selected(), None);

        state.append(records(6));
        assert_eq!(state.selected(), Some(0));
        assert_eq!(state.row_count(), 2);
    }

    #[test]
    fn test_append_keeps_existing_selection() {
        let mut state = GalleryGridState::new();
        state.append(records(6));
        state.select_last();
        state.append(records(3));

        assert_eq!(state.selected(), Some(5));
        assert_eq!(state.len(), 9);
    }

    #[test]
    fn test_row_navigation() {
        let mut state = GalleryGridState::new();
        state.append(records(8));

        state.select_next_row();
        assert_eq!(state.selected(), Some(3));
        state.select_next();
        state.select_next_row();
        assert_eq!(state.selected(), Some(7));
        assert!(state.is_on_last_row());

        state.select_next_row();
        assert_eq!(state.selected(), Some(7));

        state.select_previous_row();
        assert_eq!(state.selected(), Some(4));
        state.select_first();
        state.select_previous();
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_clear_resets_state() {
        let mut state = GalleryGridState::new();
        state.append(records(9));
        state.select_last();
        state.clear();

        assert!(state.is_empty());
        assert_eq!(state.selected(), None);
        assert!(state.selected_record().is_none());
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut state = GalleryGridState::new();
        state.append(records(30));
        state.select_last();

        let area = Rect::new(0, 0, 90, CARD_HEIGHT * 2);
        let mut buf = Buffer::empty(area);
        GalleryGrid::new().render(area, &mut buf, &mut state);

        assert_eq!(state.offset_row, 8);
    }

    #[test]
    fn test_render_draws_cards_in_rows() {
        let mut state = GalleryGridState::new();
        state.append(records(3));

        let area = Rect::new(0, 0, 90, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        GalleryGrid::new().render(area, &mut buf, &mut state);

        let top: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(top.contains("user0"));
        assert!(top.contains("user1"));
        assert!(top.contains("user2"));
    }

    #[test]
    fn test_card_shows_tags_as_hashtags() {
        let record = ImageRecord::new(1u64, "d.jpg", "f.jpg", "flower, , yellow ");
        let lines = card_lines(&record);

        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first, "#flower #yellow ");
    }
}
