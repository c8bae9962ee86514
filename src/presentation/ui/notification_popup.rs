use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::toasts::Toast;

const MAX_POPUP_WIDTH: u16 = 50;

/// Toast anchored to the top-right corner.
pub struct NotificationPopup<'a> {
    toast: &'a Toast,
}

impl<'a> NotificationPopup<'a> {
    #[must_use]
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    fn popup_area(&self, area: Rect) -> Rect {
        let kind = self.toast.kind();
        let title_width = u16::try_from(kind.title().width()).unwrap_or(u16::MAX);
        let message_width = u16::try_from(kind.message().width()).unwrap_or(u16::MAX);

        let width = message_width
            .max(title_width.saturating_add(2))
            .saturating_add(4)
            .min(MAX_POPUP_WIDTH)
            .min(area.width.saturating_sub(2));

        let inner_width = width.saturating_sub(2).max(1);
        let lines = message_width.div_ceil(inner_width).max(1);
        let height = lines.saturating_add(2).min(8);

        let x = area.x + area.width.saturating_sub(width).saturating_sub(1);
        let y = area.y + 1;

        Rect::new(x, y, width, height).intersection(area)
    }
}

impl Widget for NotificationPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = self.popup_area(area);
        if popup_area.area() == 0 {
            return;
        }

        let kind = self.toast.kind();
        let color = if kind.is_error() { Color::Red } else { Color::Cyan };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", kind.title()))
            .style(Style::default().fg(color));

        let para = Paragraph::new(kind.message())
            .block(block)
            .wrap(Wrap { trim: true })
            .style(Style::default().add_modifier(Modifier::BOLD));

        Clear.render(popup_area, buf);
        para.render(popup_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::ui::toasts::{ToastKind, ToastQueue};
    use std::time::Duration;

    fn toast(kind: ToastKind) -> ToastQueue {
        let mut queue = ToastQueue::new(Duration::from_secs(4));
        queue.push(kind);
        queue
    }

    #[test]
    fn test_popup_stays_inside_area() {
        let queue = toast(ToastKind::NoResults);
        let area = Rect::new(0, 0, 30, 20);

        let popup = NotificationPopup::new(queue.current().unwrap()).popup_area(area);

        assert!(popup.width <= 28);
        assert!(popup.right() <= area.right());
        assert!(popup.height >= 3);
    }

    #[test]
    fn test_popup_on_tiny_area_is_skipped() {
        let queue = toast(ToastKind::EndOfResults);
        let area = Rect::new(0, 0, 2, 1);
        let mut buf = Buffer::empty(area);

        NotificationPopup::new(queue.current().unwrap()).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
