//! # EntryForm Component
//!
//! Title + body text entry, used by both the new-entry dialog and in-place
//! editing. Plain text only: the body is markdown source and gets rendered
//! on the post page, not here.
//!
//! ## State Management
//!
//! The buffers and cursor are internal state; which post is being edited
//! (if any) rides along in `editing_id` so the event loop can rebuild the
//! post on save. The cursor is a byte offset into the active field and is
//! only ever moved across char boundaries.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::storage::{Post, PostDraft};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Body,
}

/// High-level events emitted by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Ctrl+S — the caller decides whether this is a create or an update.
    Save,
    /// Esc — abandon the form.
    Cancel,
}

pub struct EntryFormState {
    pub title: String,
    pub body: String,
    pub field: FormField,
    /// `Some(id)` when editing an existing post, `None` for a new draft.
    pub editing_id: Option<String>,
    /// Byte offset within the active field's text.
    cursor: usize,
    /// First visible body line, kept so the cursor stays on screen.
    scroll: u16,
}

impl EntryFormState {
    /// An empty form for the new-entry dialog. Starts in the title field.
    pub fn new_draft() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            field: FormField::Title,
            editing_id: None,
            cursor: 0,
            scroll: 0,
        }
    }

    /// A form pre-filled from an existing post, cursor at the end of the
    /// body.
    pub fn for_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
            field: FormField::Body,
            editing_id: Some(post.id.clone()),
            cursor: post.body.len(),
            scroll: 0,
        }
    }

    pub fn draft(&self) -> PostDraft {
        PostDraft {
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }

    /// Copy the edited fields onto `post`, keeping its identity.
    pub fn apply_to(&self, mut post: Post) -> Post {
        post.title = self.title.clone();
        post.body = self.body.clone();
        post
    }

    fn text(&self) -> &str {
        match self.field {
            FormField::Title => &self.title,
            FormField::Body => &self.body,
        }
    }

    fn text_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Body => &mut self.body,
        }
    }

    fn switch_to(&mut self, field: FormField) {
        self.field = field;
        self.cursor = self.text().len();
    }

    fn insert(&mut self, s: &str) {
        // The title stays single-line; newlines pasted into it are dropped.
        let cleaned;
        let s = if self.field == FormField::Title && s.contains('\n') {
            cleaned = s.replace('\n', " ");
            &cleaned
        } else {
            s
        };
        let at = self.cursor;
        self.text_mut().insert_str(at, s);
        self.cursor += s.len();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char_boundary(self.text(), self.cursor);
        let at = self.cursor;
        self.text_mut().replace_range(prev..at, "");
        self.cursor = prev;
    }

    fn delete_forward(&mut self) {
        if self.cursor >= self.text().len() {
            return;
        }
        let next = next_char_boundary(self.text(), self.cursor);
        let at = self.cursor;
        self.text_mut().replace_range(at..next, "");
    }

    fn move_left(&mut self) {
        self.cursor = prev_char_boundary(self.text(), self.cursor);
    }

    fn move_right(&mut self) {
        if self.cursor < self.text().len() {
            self.cursor = next_char_boundary(self.text(), self.cursor);
        }
    }

    fn move_up(&mut self) {
        match self.field {
            FormField::Title => {}
            FormField::Body => {
                let start = line_start(&self.body, self.cursor);
                if start == 0 {
                    // First body line: hop back into the title.
                    self.switch_to(FormField::Title);
                } else {
                    let col = self.body[start..self.cursor].chars().count();
                    let prev_start = line_start(&self.body, start - 1);
                    self.cursor = offset_at_col(&self.body, prev_start, col);
                }
            }
        }
    }

    fn move_down(&mut self) {
        match self.field {
            FormField::Title => {
                self.field = FormField::Body;
                self.cursor = 0;
            }
            FormField::Body => {
                let end = line_end(&self.body, self.cursor);
                if end < self.body.len() {
                    let start = line_start(&self.body, self.cursor);
                    let col = self.body[start..self.cursor].chars().count();
                    self.cursor = offset_at_col(&self.body, end + 1, col);
                }
            }
        }
    }

    /// Cursor position within the active field as (line, display column).
    fn cursor_line_col(&self) -> (u16, u16) {
        let text = self.text();
        let start = line_start(text, self.cursor);
        let line = text[..start].matches('\n').count() as u16;
        let col = text[start..self.cursor].width() as u16;
        (line, col)
    }

    fn update_scroll(&mut self, visible_lines: u16) {
        let (line, _) = self.cursor_line_col();
        if self.field != FormField::Body || visible_lines == 0 {
            return;
        }
        if line < self.scroll {
            self.scroll = line;
        } else if line >= self.scroll + visible_lines {
            self.scroll = line + 1 - visible_lines;
        }
    }
}

impl EventHandler for EntryFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Save => return Some(FormEvent::Save),
            TuiEvent::Escape => return Some(FormEvent::Cancel),

            TuiEvent::Tab => match self.field {
                FormField::Title => self.switch_to(FormField::Body),
                FormField::Body => self.switch_to(FormField::Title),
            },
            // Enter finishes the title, or breaks the line in the body.
            TuiEvent::Submit => match self.field {
                FormField::Title => {
                    self.field = FormField::Body;
                    self.cursor = self.body.len();
                }
                FormField::Body => self.insert("\n"),
            },

            TuiEvent::InputChar(c) => self.insert(&c.to_string()),
            TuiEvent::Paste(data) => self.insert(data),
            TuiEvent::Backspace => self.backspace(),
            TuiEvent::DeleteKey => self.delete_forward(),

            TuiEvent::CursorLeft => self.move_left(),
            TuiEvent::CursorRight => self.move_right(),
            TuiEvent::CursorUp => self.move_up(),
            TuiEvent::CursorDown => self.move_down(),
            TuiEvent::Home => self.cursor = line_start(self.text(), self.cursor),
            TuiEvent::End => self.cursor = line_end(self.text(), self.cursor),

            _ => {}
        }
        None
    }
}

/// Transient render wrapper for the form.
pub struct EntryForm<'a> {
    state: &'a mut EntryFormState,
}

impl<'a> EntryForm<'a> {
    pub fn new(state: &'a mut EntryFormState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let heading = if self.state.editing_id.is_some() {
            " Edit entry "
        } else {
            " New entry "
        };
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(heading)
            .title_bottom(
                Line::from(" Ctrl+S Save  Esc Cancel  Tab Switch field ").centered(),
            );
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let [title_area, body_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(inner);

        let field_block = |label: &'static str, active: bool| {
            let border = if active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(label)
        };

        let title_active = self.state.field == FormField::Title;
        let title_widget = Paragraph::new(self.state.title.as_str())
            .block(field_block(" Title ", title_active));
        frame.render_widget(title_widget, title_area);

        let body_visible = body_area.height.saturating_sub(2);
        self.state.update_scroll(body_visible);
        let body_widget = Paragraph::new(self.state.body.as_str())
            .scroll((self.state.scroll, 0))
            .block(field_block(" Body ", !title_active));
        frame.render_widget(body_widget, body_area);

        // Put the terminal cursor inside the active field.
        let (line, col) = self.state.cursor_line_col();
        let (x, y) = if title_active {
            (title_area.x + 1 + col, title_area.y + 1)
        } else {
            let row = line.saturating_sub(self.state.scroll);
            (body_area.x + 1 + col, body_area.y + 1 + row)
        };
        if x < area.right() && y < area.bottom() {
            frame.set_cursor_position((x, y));
        }
    }
}

fn prev_char_boundary(s: &str, idx: usize) -> usize {
    s[..idx]
        .chars()
        .next_back()
        .map(|c| idx - c.len_utf8())
        .unwrap_or(0)
}

fn next_char_boundary(s: &str, idx: usize) -> usize {
    s[idx..]
        .chars()
        .next()
        .map(|c| idx + c.len_utf8())
        .unwrap_or(s.len())
}

/// Byte index just after the previous '\n' (or 0 on the first line).
fn line_start(s: &str, idx: usize) -> usize {
    s[..idx].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Byte index of the next '\n' (or the end of the text).
fn line_end(s: &str, idx: usize) -> usize {
    s[idx..].find('\n').map(|i| idx + i).unwrap_or(s.len())
}

/// Byte offset of the `col`-th char on the line starting at `start`,
/// clamped to that line's end.
fn offset_at_col(s: &str, start: usize, col: usize) -> usize {
    let end = line_end(s, start);
    let mut offset = start;
    for (taken, c) in s[start..end].chars().enumerate() {
        if taken == col {
            break;
        }
        offset += c.len_utf8();
    }
    offset
}
