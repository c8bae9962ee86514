//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

/// Status bar emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Neutral.
    Info,
    /// A request is in flight.
    Busy,
    /// Nothing more to load.
    Done,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Busy => Color::Yellow,
            Self::Done => Color::DarkGray,
        }
    }
}

/// One-line footer with left, centered and right-aligned segments.
#[derive(Debug, Clone)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    level: StatusLevel,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            level: StatusLevel::Info,
        }
    }

    /// Sets left content.
    #[must_use]
    pub fn left(mut self, content: impl Into<String>) -> Self {
        self.left = content.into();
        self
    }

    /// Sets center content.
    #[must_use]
    pub fn center(mut self, content: impl Into<String>) -> Self {
        self.center = content.into();
        self
    }

    /// Sets right content.
    #[must_use]
    pub fn right(mut self, content: impl Into<String>) -> Self {
        self.right = content.into();
        self
    }

    /// Sets status level.
    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);

        let side = |text: &str| u16::try_from(text.width()).unwrap_or(u16::MAX);
        let [left, center, right] = Layout::horizontal([
            Constraint::Length(side(&self.left)),
            Constraint::Fill(1),
            Constraint::Length(side(&self.right)),
        ])
        .areas(area);

        Line::styled(self.left.as_str(), style).render(left, buf);
        Line::styled(self.center.as_str(), style)
            .alignment(Alignment::Center)
            .render(center, buf);
        Line::styled(self.right.as_str(), Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Right)
            .render(right, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_are_laid_out_across_width() {
        let bar = StatusBar::new()
            .left("cats 6/500")
            .center("[m] load more")
            .right("q quit")
            .level(StatusLevel::Info);

        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        (&bar).render(area, &mut buf);

        let line: String = (0..area.width).map(|x| buf[(x, 0)].symbol()).collect();
        assert!(line.starts_with("cats 6/500"));
        assert!(line.contains("[m] load more"));
        assert!(line.trim_end().ends_with("q quit"));
    }
}
