//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the two lists
//! and translates keyboard and mouse events into `ListStore` calls.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Input Modes
//!
//! - **Input**: keys edit the input box, Enter adds an entry.
//!   Esc (or Up on a single-line buffer) selects the newest entry.
//! - **Cursor**: Up/Down move the selection, Delete/Backspace/Ctrl+D ask to
//!   delete it. Esc or Enter go back to the input box; typing does too.
//!
//! Tab switches lists in either mode. Ctrl+C always quits.
//! While the delete prompt is open it receives every event.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms waiting for input and
//! only redraws after events.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::{Confirmation, ListStore, ListTag};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DeletePromptState, EntryListState, InputBox, InputEvent, ListTabs, PromptEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(500);

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigate entries with arrow keys. Typing auto-switches to Input.
    Cursor,
    /// Text editing in the input box. Esc switches to Cursor.
    Input,
}

/// TUI-specific presentation state (not part of the list data)
pub struct TuiState {
    // Persistent component states
    pub entry_list: EntryListState,
    pub input_box: InputBox,
    pub input_mode: InputMode,
    // Delete confirmation overlay (None = hidden)
    pub delete_prompt: Option<DeletePromptState>,
}

impl TuiState {
    pub fn new(active: ListTag) -> Self {
        Self {
            entry_list: EntryListState::new(),
            input_box: InputBox::new(active),
            input_mode: InputMode::Input, // User expects to type immediately
            delete_prompt: None,
        }
    }

    /// Copy store-derived props into the components before drawing.
    fn sync_props(&mut self, store: &ListStore) {
        self.input_box.list = store.active_list();
        self.input_box.dimmed = self.input_mode == InputMode::Cursor || self.delete_prompt.is_some();
    }
}

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

/// Run the interactive shell until the user quits.
///
/// Writes started by the store keep running in the background; the caller
/// should `flush` the store afterwards.
pub fn run(store: &mut ListStore) -> std::io::Result<()> {
    let mut tui = TuiState::new(store.active_list());

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        log::warn!("Failed to enable terminal modes: {}", e);
    }

    let mut needs_redraw = true;
    let result = loop {
        tui.sync_props(store);

        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, store, &mut tui)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain pending events before the next draw
        let frame_area = terminal.get_frame().area();
        let mut flow = Flow::Continue;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            tui.sync_props(store);
            flow = handle_event(store, &mut tui, event, frame_area);
            if flow == Flow::Quit {
                break;
            }
        }

        if flow == Flow::Quit {
            info!("Quit requested");
            break Ok(());
        }
    };

    drop(terminal_mode_guard);
    ratatui::restore();
    result
}

/// Apply one event to the store and presentation state.
///
/// `frame_area` is the full terminal area, used to hit test mouse clicks
/// against the layout drawn last frame.
fn handle_event(
    store: &mut ListStore,
    tui: &mut TuiState,
    event: TuiEvent,
    frame_area: Rect,
) -> Flow {
    match event {
        // Ctrl+C always quits regardless of mode
        TuiEvent::ForceQuit => return Flow::Quit,
        // Resize just needs a redraw
        TuiEvent::Resize => return Flow::Continue,
        _ => {}
    }

    // When the prompt is open, route all events to it
    if let Some(prompt) = tui.delete_prompt.as_mut() {
        let answer = match event {
            TuiEvent::MouseClick(col, row) => DeletePromptState::button_at(frame_area, col, row),
            _ => prompt
                .handle_event(&event)
                .map(|PromptEvent::Resolved(answer)| answer),
        };
        if let Some(answer) = answer {
            resolve_delete(store, tui, answer);
        }
        return Flow::Continue;
    }

    if let TuiEvent::MouseClick(col, row) = event {
        handle_click(store, tui, col, row, frame_area);
        return Flow::Continue;
    }

    // Scroll events always go to the list regardless of mode
    if matches!(
        event,
        TuiEvent::ScrollUp | TuiEvent::ScrollDown | TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown
    ) {
        tui.entry_list.handle_event(&event);
        return Flow::Continue;
    }

    if event == TuiEvent::ToggleList {
        let next = store.active_list().toggle();
        switch_list(store, tui, next);
        return Flow::Continue;
    }

    match tui.input_mode {
        InputMode::Input => {
            if event == TuiEvent::Escape {
                enter_cursor_mode(store, tui);
                return Flow::Continue;
            }

            match tui.input_box.handle_event(&event) {
                Some(InputEvent::Submit(text)) => {
                    // The buffer survives a rejected submit
                    if store.add_entry(&text).is_some() {
                        tui.input_box.clear();
                        tui.entry_list.scroll_to_end();
                    }
                }
                Some(InputEvent::ContentChanged) => {}
                // Up the input box had no use for moves into the list
                None if event == TuiEvent::CursorUp => enter_cursor_mode(store, tui),
                None => {}
            }
        }
        InputMode::Cursor => match event {
            TuiEvent::Escape | TuiEvent::Submit => leave_cursor_mode(tui),
            // Typing auto-switches to Input mode and forwards the event
            TuiEvent::InputChar(_) | TuiEvent::Paste(_) => {
                leave_cursor_mode(tui);
                tui.input_box.handle_event(&event);
            }
            TuiEvent::CursorUp => tui.entry_list.select_previous(),
            TuiEvent::CursorDown => {
                let count = store.active_view().count();
                tui.entry_list.select_next(count);
            }
            TuiEvent::DeleteEntry | TuiEvent::Delete | TuiEvent::Backspace => {
                open_delete_prompt(store, tui);
            }
            _ => {}
        },
    }

    Flow::Continue
}

fn handle_click(store: &mut ListStore, tui: &mut TuiState, col: u16, row: u16, frame_area: Rect) {
    let input_height = tui.input_box.calculate_height(frame_area.width);
    let areas = ui::layout_areas(frame_area, input_height);

    if let Some(list) = ListTabs::tab_at(areas.tabs, col, row) {
        if list != store.active_list() {
            switch_list(store, tui, list);
        }
        return;
    }

    if let Some(hit) = tui.entry_list.hit_test(areas.list, col, row) {
        tui.input_mode = InputMode::Cursor;
        tui.entry_list.selected_index = Some(hit.index);
        if hit.on_trash {
            open_delete_prompt(store, tui);
        }
        return;
    }

    if areas.input.contains(ratatui::layout::Position { x: col, y: row }) {
        leave_cursor_mode(tui);
    }
}

fn switch_list(store: &mut ListStore, tui: &mut TuiState, list: ListTag) {
    store.set_active_list(list);
    tui.entry_list.reset();
    tui.input_mode = InputMode::Input;
    debug!("Switched to {} list", list);
}

fn enter_cursor_mode(store: &ListStore, tui: &mut TuiState) {
    let count = store.active_view().count();
    if count == 0 {
        return;
    }
    tui.input_mode = InputMode::Cursor;
    tui.entry_list.select_last(count);
}

fn leave_cursor_mode(tui: &mut TuiState) {
    tui.input_mode = InputMode::Input;
    tui.entry_list.selected_index = None;
}

fn open_delete_prompt(store: &ListStore, tui: &mut TuiState) {
    let Some(index) = tui.entry_list.selected_index else {
        return;
    };
    if let Some(entry) = store.active_view().nth(index) {
        debug!("Asking to delete entry {}", entry.id);
        tui.delete_prompt = Some(DeletePromptState::new(entry));
    }
}

fn resolve_delete(store: &mut ListStore, tui: &mut TuiState, answer: Confirmation) {
    let Some(prompt) = tui.delete_prompt.take() else {
        return;
    };
    store.remove_entry(prompt.entry_id, answer);

    let count = store.active_view().count();
    tui.entry_list.clamp_selection(count);
    if tui.entry_list.selected_index.is_none() {
        tui.input_mode = InputMode::Input;
    }
}
