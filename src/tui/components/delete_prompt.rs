//! # DeletePrompt Component
//!
//! Modal "Delete To Do?" confirmation drawn over the list.
//!
//! The prompt never touches the store. It resolves to a [`Confirmation`]
//! and the parent passes that to `ListStore::remove_entry`.
//!
//! Keys: `y` proceeds, `n`/Esc cancel, Left/Right/Tab move focus between
//! the buttons and Enter picks the focused one. Focus starts on Cancel.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph};

use crate::core::{Confirmation, Entry, EntryId};
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const TITLE: &str = " Delete To Do? ";
const MESSAGE: &str = "Are you sure?";
const CANCEL_LABEL: &str = "[ Cancel ]";
const OK_LABEL: &str = "[ OK ]";
const PROMPT_WIDTH: u16 = 44;
const PROMPT_HEIGHT: u16 = 7;

/// Emitted once the user has answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
    Resolved(Confirmation),
}

/// The entry awaiting confirmation plus the focused button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePromptState {
    pub entry_id: EntryId,
    pub text: String,
    pub focus: Confirmation,
}

impl DeletePromptState {
    pub fn new(entry: &Entry) -> Self {
        Self {
            entry_id: entry.id,
            text: entry.text.clone(),
            focus: Confirmation::Cancel,
        }
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Confirmation::Cancel => Confirmation::Proceed,
            Confirmation::Proceed => Confirmation::Cancel,
        };
    }

    /// Which button (if any) sits under (`col`, `row`) for a prompt centered in `area`.
    pub fn button_at(area: Rect, col: u16, row: u16) -> Option<Confirmation> {
        let [cancel, ok] = button_areas(prompt_rect(area));
        let hit = |r: Rect| row == r.y && col >= r.x && col < r.x + r.width;
        if hit(cancel) {
            Some(Confirmation::Cancel)
        } else if hit(ok) {
            Some(Confirmation::Proceed)
        } else {
            None
        }
    }
}

impl EventHandler for DeletePromptState {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PromptEvent::Resolved(Confirmation::Cancel)),
            TuiEvent::InputChar('n' | 'N') => Some(PromptEvent::Resolved(Confirmation::Cancel)),
            TuiEvent::InputChar('y' | 'Y') => Some(PromptEvent::Resolved(Confirmation::Proceed)),
            TuiEvent::CursorLeft | TuiEvent::CursorRight | TuiEvent::ToggleList => {
                self.switch_focus();
                None
            }
            TuiEvent::Submit => Some(PromptEvent::Resolved(self.focus)),
            _ => None,
        }
    }
}

/// Fixed-size box centered in `outer`, shrunk to fit small terminals.
fn prompt_rect(outer: Rect) -> Rect {
    let [center_v] = Layout::vertical([Constraint::Length(PROMPT_HEIGHT.min(outer.height))])
        .flex(Flex::Center)
        .areas(outer);
    let [center] = Layout::horizontal([Constraint::Length(PROMPT_WIDTH.min(outer.width))])
        .flex(Flex::Center)
        .areas(center_v);
    center
}

fn inner_rows(prompt: Rect) -> [Rect; 4] {
    let inner = prompt_block().inner(prompt);
    Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner)
}

fn button_areas(prompt: Rect) -> [Rect; 2] {
    let [_, _, _, buttons] = inner_rows(prompt);
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(buttons);
    let centered = |half: Rect, label: &str| {
        let width = (label.len() as u16).min(half.width);
        Rect::new(half.x + (half.width - width) / 2, half.y, width, half.height)
    };
    [centered(left, CANCEL_LABEL), centered(right, OK_LABEL)]
}

fn prompt_block() -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red))
        .title(Line::from(TITLE).centered())
        .padding(Padding::horizontal(1))
}

pub struct DeletePrompt<'a> {
    pub state: &'a DeletePromptState,
}

impl<'a> DeletePrompt<'a> {
    pub fn new(state: &'a DeletePromptState) -> Self {
        Self { state }
    }

    fn button_style(&self, button: Confirmation) -> Style {
        if self.state.focus == button {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        }
    }
}

impl<'a> Component for DeletePrompt<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let prompt = prompt_rect(area);
        frame.render_widget(Clear, prompt);
        frame.render_widget(prompt_block(), prompt);

        let [message, text, _, _] = inner_rows(prompt);
        frame.render_widget(
            Paragraph::new(MESSAGE)
                .style(Style::default().fg(Color::White))
                .alignment(Alignment::Center),
            message,
        );
        frame.render_widget(
            Paragraph::new(self.state.text.trim())
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center),
            text,
        );

        let [cancel, ok] = button_areas(prompt);
        frame.render_widget(
            Paragraph::new(CANCEL_LABEL).style(self.button_style(Confirmation::Cancel)),
            cancel,
        );
        frame.render_widget(
            Paragraph::new(OK_LABEL).style(self.button_style(Confirmation::Proceed)),
            ok,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ListTag;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn prompt_state() -> DeletePromptState {
        DeletePromptState::new(&Entry {
            id: 42,
            text: "Buy milk".to_string(),
            list: ListTag::Work,
        })
    }

    #[test]
    fn test_focus_starts_on_cancel() {
        let mut state = prompt_state();
        assert_eq!(state.entry_id, 42);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(PromptEvent::Resolved(Confirmation::Cancel))
        );
    }

    #[test]
    fn test_switch_focus_then_submit_proceeds() {
        let mut state = prompt_state();
        assert_eq!(state.handle_event(&TuiEvent::CursorRight), None);
        assert_eq!(state.focus, Confirmation::Proceed);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(PromptEvent::Resolved(Confirmation::Proceed))
        );
        state.handle_event(&TuiEvent::ToggleList);
        assert_eq!(state.focus, Confirmation::Cancel);
    }

    #[test]
    fn test_shortcut_keys() {
        let mut state = prompt_state();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('y')),
            Some(PromptEvent::Resolved(Confirmation::Proceed))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('n')),
            Some(PromptEvent::Resolved(Confirmation::Cancel))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(PromptEvent::Resolved(Confirmation::Cancel))
        );
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_render_shows_title_and_buttons() {
        let state = prompt_state();
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| DeletePrompt::new(&state).render(f, f.area()))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Delete To Do?"));
        assert!(text.contains("Are you sure?"));
        assert!(text.contains("Buy milk"));
        assert!(text.contains("Cancel"));
        assert!(text.contains("OK"));
    }

    #[test]
    fn test_button_at_matches_rendered_labels() {
        let area = Rect::new(0, 0, 60, 20);
        let [cancel, ok] = button_areas(prompt_rect(area));
        assert_eq!(
            DeletePromptState::button_at(area, cancel.x, cancel.y),
            Some(Confirmation::Cancel)
        );
        assert_eq!(
            DeletePromptState::button_at(area, ok.x + 1, ok.y),
            Some(Confirmation::Proceed)
        );
        assert_eq!(DeletePromptState::button_at(area, 0, 0), None);
    }
}
