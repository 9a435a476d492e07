//! # Toast Component
//!
//! Bottom-right notice overlay. At most one is ever on screen; a newer
//! notice replaces the old one, and the event loop drops it after the
//! configured number of seconds.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::core::notify::{Notice, Severity};

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 5;

pub struct Toast;

impl Toast {
    pub fn render(frame: &mut Frame, area: Rect, notice: &Notice) {
        let width = TOAST_WIDTH.min(area.width);
        let height = TOAST_HEIGHT.min(area.height);
        let rect = Rect {
            x: area.right().saturating_sub(width + 1),
            y: area.bottom().saturating_sub(height + 1),
            width,
            height,
        };
        frame.render_widget(Clear, rect);

        let accent = match notice.severity {
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
            Severity::Info => Color::Blue,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(Line::styled(
                format!(" {} ", notice.title),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));

        let body = Paragraph::new(notice.description.as_str())
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true })
            .block(block);

        frame.render_widget(body, rect);
    }
}
