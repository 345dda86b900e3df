//! # StatusBar Component
//!
//! Bottom line showing the active list, how many entries it holds and the
//! keys that apply in the current mode.
//!
//! Stateless: every field is a prop supplied by the parent each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::ListTag;
use crate::tui::component::Component;

const INPUT_HINTS: &str = "Enter Add  Tab Switch list  Up Select  Ctrl+C Quit";
const SELECT_HINTS: &str = "Up/Down Move  Del Delete  Tab Switch list  Esc Back";

pub struct StatusBar {
    pub list: ListTag,
    pub count: usize,
    /// Whether an entry is selected (changes the key hints)
    pub selecting: bool,
}

impl StatusBar {
    pub fn new(list: ListTag, count: usize, selecting: bool) -> Self {
        Self {
            list,
            count,
            selecting,
        }
    }

    fn summary(&self) -> String {
        let noun = if self.count == 1 { "entry" } else { "entries" };
        format!(" {} · {} {} ", self.list, self.count, noun)
    }
}

impl Component for StatusBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let hints = if self.selecting {
            SELECT_HINTS
        } else {
            INPUT_HINTS
        };
        let line = Line::from(vec![
            Span::styled(self.summary(), Style::default().fg(Color::Black).bg(Color::Gray)),
            Span::styled(format!(" {}", hints), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(line, area);
    }
}
