use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::Entry;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Columns reserved on the right for the delete marker.
pub const TRASH_WIDTH: u16 = 4;
const TRASH_LABEL: &str = " del";
/// Borders + padding + delete marker.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2 + TRASH_WIDTH;
/// Top + bottom borders.
const VERTICAL_OVERHEAD: u16 = 2;

/// A single entry drawn as a rounded card with a delete marker on the right.
///
/// Transient: built each frame by `EntryList` for the visible rows.
#[derive(Clone, Copy)]
pub struct EntryCard<'a> {
    pub entry: &'a Entry,
    pub is_selected: bool,
}

impl<'a> EntryCard<'a> {
    pub fn new(entry: &'a Entry, is_selected: bool) -> Self {
        Self { entry, is_selected }
    }

    /// Rendered height at `width`, predicted with the same wrapping rules
    /// the paragraph uses so the list can lay out without rendering.
    pub fn calculate_height(entry: &Entry, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let text = entry.text.trim();
        if text.is_empty() {
            return 1 + VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(usize::from(content_width))
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines = textwrap::wrap(text, options);
        u16::try_from(lines.len()).unwrap_or(u16::MAX).max(1) + VERTICAL_OVERHEAD
    }

    /// Whether screen column `col` falls on the delete marker of a card
    /// drawn across `area_x..area_x + width`.
    pub fn is_trash_column(area_x: u16, width: u16, col: u16) -> bool {
        let right_edge = area_x + width.saturating_sub(1 + CONTENT_PAD_H);
        col >= right_edge.saturating_sub(TRASH_WIDTH) && col < right_edge
    }
}

impl<'a> Widget for EntryCard<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(area);
        block.render(area, buf);

        let [text_area, trash_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(TRASH_WIDTH)]).areas(inner);

        let mut text_style = Style::default().fg(Color::White);
        if self.is_selected {
            text_style = text_style.add_modifier(Modifier::BOLD);
        }
        Paragraph::new(self.entry.text.trim())
            .style(text_style)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        let trash_style = if self.is_selected {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::DIM)
        };
        Paragraph::new(TRASH_LABEL)
            .style(trash_style)
            .render(trash_area, buf);
    }
}

impl<'a> Component for EntryCard<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
