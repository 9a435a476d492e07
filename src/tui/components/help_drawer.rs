//! # Help Drawer Component
//!
//! Right-hand overlay listing every shortcut with its description and key,
//! straight from [`crate::core::shortcut::SHORTCUTS`]. Opens over whichever
//! page is active and closes back to it.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::shortcut::SHORTCUTS;

const DRAWER_WIDTH: u16 = 48;

pub struct HelpDrawer;

impl HelpDrawer {
    pub fn render(frame: &mut Frame, area: Rect) {
        let width = DRAWER_WIDTH.min(area.width);
        let drawer = Rect {
            x: area.right().saturating_sub(width),
            y: area.y,
            width,
            height: area.height,
        };
        frame.render_widget(Clear, drawer);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Help ")
            .title_bottom(Line::from(" Esc Close ").centered())
            .padding(Padding::new(1, 1, 1, 0));

        let key_width = 8;
        let label_width = 14;
        let lines: Vec<Line> = SHORTCUTS
            .iter()
            .map(|s| {
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$}", s.label, width = label_width),
                        Style::default()
                            .fg(Color::Gray)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:<width$}", s.key, width = key_width),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::styled(s.description, Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), drawer);
    }
}
