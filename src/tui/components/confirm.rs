//! # Delete Confirmation Component
//!
//! The gate in front of every destructive delete. Nothing reaches the
//! store's `delete` until this overlay has been confirmed.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

use super::centered_rect;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEvent {
    Confirm,
    Cancel,
}

pub struct ConfirmDelete {
    pub post_id: String,
    pub post_title: String,
}

impl ConfirmDelete {
    pub fn new(post_id: String, post_title: String) -> Self {
        Self {
            post_id,
            post_title,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 30, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(Line::styled(
                " Delete post ",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(" y Confirm  n / Esc Cancel ").centered())
            .padding(Padding::uniform(1));

        let body = Paragraph::new(format!(
            "Are you sure you want to delete \"{}\"?",
            self.post_title
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);

        frame.render_widget(body, overlay);
    }
}

impl EventHandler for ConfirmDelete {
    type Event = ConfirmEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ConfirmEvent> {
        match event {
            TuiEvent::InputChar('y') | TuiEvent::Submit => Some(ConfirmEvent::Confirm),
            TuiEvent::InputChar('n') | TuiEvent::Escape => Some(ConfirmEvent::Cancel),
            _ => None,
        }
    }
}
