//! # PostView Component
//!
//! A single post, rendered: bold title, dimmed metadata line, then the
//! body as markdown inside a scroll view. Shows a loading placeholder
//! until the fetch lands.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::storage::Post;
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

use super::dashboard::format_timestamp;

pub struct PostViewState {
    pub scroll: ScrollViewState,
}

impl PostViewState {
    pub fn new() -> Self {
        Self {
            scroll: ScrollViewState::default(),
        }
    }

    /// Scroll events go straight to the scroll view; everything else is
    /// ignored here.
    pub fn handle_event(&mut self, event: &TuiEvent) {
        match event {
            TuiEvent::ScrollUp | TuiEvent::CursorUp => self.scroll.scroll_up(),
            TuiEvent::ScrollDown | TuiEvent::CursorDown => self.scroll.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll.scroll_page_down(),
            TuiEvent::Home => self.scroll.scroll_to_top(),
            TuiEvent::End => self.scroll.scroll_to_bottom(),
            _ => {}
        }
    }
}

impl Default for PostViewState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct PostView<'a> {
    post: Option<&'a Post>,
    state: &'a mut PostViewState,
}

impl<'a> PostView<'a> {
    pub fn new(post: Option<&'a Post>, state: &'a mut PostViewState) -> Self {
        Self { post, state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));

        let Some(post) = self.post else {
            let loading = Paragraph::new("Loading...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(loading, area);
            return;
        };

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut text = Text::default();
        text.lines.push(Line::styled(
            post.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        text.lines.push(Line::styled(
            format!("updated {}", format_timestamp(post.updated_at)),
            Style::default().fg(Color::DarkGray),
        ));
        text.lines.push(Line::default());
        text.extend(markdown::render(&post.body, Color::Gray));

        // Leave a column for the scrollbar, then size the scroll view to
        // the wrapped line count.
        let content_width = inner.width.saturating_sub(1);
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let total_height = paragraph.line_count(content_width) as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(
            paragraph,
            Rect::new(0, 0, content_width, total_height),
        );

        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll);
    }
}
