//! Markdown → ratatui `Text` renderer.
//!
//! Thin wrapper around `pulldown_cmark` that converts markdown events into
//! styled `Line`/`Span` values. Headings, bold, italic, inline code, fenced
//! code blocks (verbatim, no highlighting), lists, blockquotes, and links.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

/// Parse markdown content into styled `Text`.
///
/// Returns owned text (`'static`) so callers aren't constrained by input
/// lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TASKLISTS);

    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        w.handle(event);
    }
    w.flush_current();
    w.text
}

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack (bold, italic, heading text). Styles compose via
    /// `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Spans accumulated for the line being built.
    current: Vec<Span<'static>>,
    /// Per-line prefix (blockquote bar, list bullet indentation).
    prefix: String,
    /// List nesting: None = unordered, Some(n) = next ordered index.
    list_indices: Vec<Option<u64>>,
    /// True inside a fenced or indented code block.
    in_code_block: bool,
    /// Stored link URL, appended after the link text closes.
    link_url: Option<String>,
    /// Whether the next block element should be preceded by a blank line.
    needs_blank: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            current: vec![],
            prefix: String::new(),
            list_indices: vec![],
            in_code_block: false,
            link_url: None,
            needs_blank: false,
        }
    }

    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    /// Finish the line under construction, prefix included.
    fn flush_current(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let mut spans = Vec::with_capacity(self.current.len() + 1);
        if !self.prefix.is_empty() {
            spans.push(Span::styled(
                self.prefix.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        }
        spans.append(&mut self.current);
        self.text.lines.push(Line::from(spans));
    }

    fn blank_line(&mut self) {
        self.text.lines.push(Line::default());
    }

    fn start_block(&mut self) {
        self.flush_current();
        if self.needs_blank && !self.text.lines.is_empty() {
            self.blank_line();
        }
        self.needs_blank = false;
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),

            Event::Text(text) => {
                if self.in_code_block {
                    // Code arrives with embedded newlines; keep them.
                    for line in text.lines() {
                        self.current.push(Span::styled(
                            format!("  {}", line),
                            Style::default().fg(Color::Gray),
                        ));
                        self.flush_current();
                    }
                } else {
                    self.current
                        .push(Span::styled(text.into_string(), self.style()));
                }
            }
            Event::Code(code) => {
                self.current.push(Span::styled(
                    code.into_string(),
                    self.style().bg(Color::Rgb(48, 48, 48)),
                ));
            }
            Event::SoftBreak => {
                self.current.push(Span::styled(" ".to_string(), self.style()));
            }
            Event::HardBreak => self.flush_current(),
            Event::Rule => {
                self.start_block();
                self.text.lines.push(Line::styled(
                    "─".repeat(24),
                    Style::default().fg(Color::DarkGray),
                ));
                self.needs_blank = true;
            }
            Event::TaskListMarker(done) => {
                let marker = if done { "[x] " } else { "[ ] " };
                self.current
                    .push(Span::styled(marker.to_string(), self.style()));
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            // Inside a loose list item the bullet is already pending; don't
            // flush it onto its own line.
            Tag::Paragraph if self.current.is_empty() => self.start_block(),
            Tag::Paragraph => {}
            Tag::Heading { level, .. } => {
                self.start_block();
                let style = match level {
                    HeadingLevel::H1 => Style::default()
                        .fg(self.base_fg)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    _ => Style::default().fg(self.base_fg).add_modifier(Modifier::BOLD),
                };
                self.styles.push(style);
            }
            Tag::BlockQuote(_) => {
                self.start_block();
                self.prefix.push_str("▏ ");
                self.push_style(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(_) => {
                self.start_block();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.start_block();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.flush_current();
                let depth = self.list_indices.len().saturating_sub(1);
                let bullet = match self.list_indices.last_mut() {
                    Some(Some(n)) => {
                        let b = format!("{}{}. ", "  ".repeat(depth), n);
                        *n += 1;
                        b
                    }
                    _ => format!("{}• ", "  ".repeat(depth)),
                };
                self.current
                    .push(Span::styled(bullet, Style::default().fg(Color::DarkGray)));
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT));
            }
            Tag::Link { dest_url, .. } => {
                self.push_style(
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                );
                self.link_url = Some(dest_url.into_string());
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                self.flush_current();
                self.needs_blank = true;
            }
            TagEnd::Heading(_) => {
                self.flush_current();
                self.pop_style();
                self.needs_blank = true;
            }
            TagEnd::BlockQuote(_) => {
                self.flush_current();
                self.pop_style();
                // Drop the "▏ " added at block start.
                self.prefix.truncate(self.prefix.len().saturating_sub(4));
                self.needs_blank = true;
            }
            TagEnd::CodeBlock => {
                self.flush_current();
                self.in_code_block = false;
                self.needs_blank = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                if self.list_indices.is_empty() {
                    self.flush_current();
                    self.needs_blank = true;
                }
            }
            TagEnd::Item => self.flush_current(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => self.pop_style(),
            TagEnd::Link => {
                if let Some(url) = self.link_url.take() {
                    self.pop_style();
                    self.current.push(Span::styled(
                        format!(" ({})", url),
                        Style::default().fg(Color::DarkGray),
                    ));
                } else {
                    self.pop_style();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered_string(md: &str) -> String {
        render(md, Color::White)
            .lines
            .iter()
            .map(|l| {
                l.spans
                    .iter()
                    .map(|s| s.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let out = rendered_string("first\n\nsecond");
        assert_eq!(out, "first\n\nsecond");
    }

    #[test]
    fn test_heading_is_bold() {
        let text = render("# Title", Color::White);
        let span = &text.lines[0].spans[0];
        assert!(span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_unordered_list_bullets() {
        let out = rendered_string("- one\n- two");
        assert!(out.contains("• one"));
        assert!(out.contains("• two"));
    }

    #[test]
    fn test_ordered_list_numbers() {
        let out = rendered_string("1. one\n2. two");
        assert!(out.contains("1. one"));
        assert!(out.contains("2. two"));
    }

    #[test]
    fn test_code_block_kept_verbatim() {
        let out = rendered_string("```\nlet x = 1;\n```");
        assert!(out.contains("let x = 1;"));
    }

    #[test]
    fn test_blockquote_prefixed() {
        let out = rendered_string("> quoted");
        assert!(out.contains("▏ quoted"));
    }

    #[test]
    fn test_link_url_appended() {
        let out = rendered_string("[here](https://example.com)");
        assert!(out.contains("here"));
        assert!(out.contains("(https://example.com)"));
    }
}
