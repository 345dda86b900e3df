//! # ListTabs Component
//!
//! The "Work / Travel" header. The active list is drawn bold white, the
//! other one grey. Stateless: the active list is a prop.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::ListTag;
use crate::tui::component::Component;

pub struct ListTabs {
    pub active: ListTag,
}

impl ListTabs {
    pub fn new(active: ListTag) -> Self {
        Self { active }
    }

    /// Which tab a click at column `col` lands on. The header is split in
    /// half: Work on the left, Travel on the right.
    pub fn tab_at(area: Rect, col: u16, row: u16) -> Option<ListTag> {
        if row < area.y || row >= area.y + area.height || col < area.x || col >= area.x + area.width {
            return None;
        }
        let [left, _] = Self::halves(area);
        if col < left.x + left.width {
            Some(ListTag::Work)
        } else {
            Some(ListTag::Travel)
        }
    }

    fn halves(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area)
    }

    fn style_for(&self, list: ListTag) -> Style {
        if list == self.active {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }
}

impl Component for ListTabs {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [left, right] = Self::halves(area);
        let block = || Block::default().padding(Padding::new(1, 1, 1, 0));

        let work = Paragraph::new(ListTag::Work.label())
            .style(self.style_for(ListTag::Work))
            .alignment(Alignment::Left)
            .block(block());
        let travel = Paragraph::new(ListTag::Travel.label())
            .style(self.style_for(ListTag::Travel))
            .alignment(Alignment::Right)
            .block(block());

        frame.render_widget(work, left);
        frame.render_widget(travel, right);
    }
}
