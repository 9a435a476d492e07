//! # Dashboard Component
//!
//! The post list. Rows carry a date and the post title; the focused row is
//! highlighted and tracked by the focus store, not by this component —
//! mouse hover and j/k both go through the store so there is exactly one
//! notion of "focused".
//!
//! With no posts yet, renders the welcome card instead.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::storage::Post;

/// Persistent presentation state (ratatui list offset).
pub struct DashboardState {
    pub list_state: ListState,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            list_state: ListState::default(),
        }
    }

    /// Map a screen row to a post index, if it lands on a list row.
    /// Rows sit inside the block border, one line per post; `offset` is
    /// the list's current scroll position.
    pub fn hit_test(area: Rect, y: u16, post_count: usize, offset: usize) -> Option<usize> {
        let top = area.y + 1; // border
        let bottom = area.bottom().saturating_sub(1);
        if y < top || y >= bottom {
            return None;
        }
        let index = (y - top) as usize + offset;
        (index < post_count).then_some(index)
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper, created each frame with borrowed state.
pub struct Dashboard<'a> {
    posts: &'a [Post],
    focus_index: Option<usize>,
    state: &'a mut DashboardState,
}

impl<'a> Dashboard<'a> {
    pub fn new(
        posts: &'a [Post],
        focus_index: Option<usize>,
        state: &'a mut DashboardState,
    ) -> Self {
        Self {
            posts,
            focus_index,
            state,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.posts.is_empty() {
            render_welcome(frame, area);
            return;
        }

        // A stale index past the end highlights nothing.
        let selected = self.focus_index.filter(|&i| i < self.posts.len());
        self.state.list_state.select(selected);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Journal ")
            .padding(Padding::horizontal(1));

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .posts
            .iter()
            .enumerate()
            .map(|(i, post)| {
                let date = format_timestamp(post.updated_at);
                let title_width = inner_width.saturating_sub(date.len() + 2);
                let title = truncate_str(&post.title, title_width);

                let style = if selected == Some(i) {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let padded = format!("{:<width$}", title, width = title_width);
                ListItem::new(Line::from(vec![
                    Span::styled(date, style.patch(Style::default().fg(Color::DarkGray))),
                    Span::styled("  ", style),
                    Span::styled(padded, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let [_, center, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(7),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, card, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(46),
        Constraint::Fill(1),
    ])
    .areas(center);

    let text = vec![
        Line::styled(
            "Welcome to quill!",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::default(),
        Line::raw("So glad that you're trying this app out,"),
        Line::raw("feel free to have some fun!"),
        Line::default(),
        Line::styled("Press c to create your first entry", Style::default().fg(Color::Cyan)),
    ];

    let card_widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(card_widget, card);
}

/// Format a Unix timestamp as "Jan 15" style date.
pub(crate) fn format_timestamp(ts: i64) -> String {
    use chrono::{DateTime, Local, Utc};
    let dt: DateTime<Local> = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local);
    dt.format("%b %d").to_string()
}

/// Truncate a string to fit within `max_width` chars, adding "..." if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_post;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(posts: &[Post], focus: Option<usize>) -> String {
        let backend = TestBackend::new(60, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = DashboardState::new();
        terminal
            .draw(|f| Dashboard::new(posts, focus, &mut state).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_empty_dashboard_shows_welcome() {
        let text = rendered(&[], None);
        assert!(text.contains("Welcome to quill!"));
    }

    #[test]
    fn test_posts_render_titles() {
        let posts = vec![test_post("a", "first post"), test_post("b", "second post")];
        let text = rendered(&posts, Some(0));
        assert!(text.contains("first post"));
        assert!(text.contains("second post"));
    }

    #[test]
    fn test_hit_test_maps_rows() {
        let area = Rect::new(0, 1, 60, 10);
        // First row sits just inside the border.
        assert_eq!(DashboardState::hit_test(area, 2, 3, 0), Some(0));
        assert_eq!(DashboardState::hit_test(area, 4, 3, 0), Some(2));
        // Border row and rows past the list are misses.
        assert_eq!(DashboardState::hit_test(area, 1, 3, 0), None);
        assert_eq!(DashboardState::hit_test(area, 8, 3, 0), None);
    }

    #[test]
    fn test_hit_test_respects_scroll_offset() {
        let area = Rect::new(0, 1, 60, 10);
        assert_eq!(DashboardState::hit_test(area, 2, 20, 5), Some(5));
        assert_eq!(DashboardState::hit_test(area, 3, 20, 5), Some(6));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a very long title", 10), "a very ...");
    }
}
