//! # EntryList Component
//!
//! Scrollable view of the active list's entries.
//!
//! ## Architecture
//!
//! `EntryList` is a transient component (created each frame) that wraps
//! `&'a mut EntryListState` (persistent state) and the filtered entries
//! (props). Card heights are measured every frame and kept in the state as
//! prefix sums, which is what keyboard scrolling and mouse hit testing read.

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::{Entry, ListTag};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::entry_card::EntryCard;
use crate::tui::event::TuiEvent;

/// Where a click landed inside the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHit {
    pub index: usize,
    pub on_trash: bool,
}

/// Selection, scroll and layout state for the entry list.
/// Must be persisted in the parent TuiState.
pub struct EntryListState {
    pub scroll_state: ScrollViewState,
    /// Currently selected row (index into the filtered view)
    pub selected_index: Option<usize>,
    /// Card heights from the last render
    pub heights: Vec<u16>,
    /// Running totals of `heights`
    pub prefix_heights: Vec<u16>,
    /// Last known viewport height
    pub viewport_height: u16,
}

impl Default for EntryListState {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            selected_index: None,
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            viewport_height: 0,
        }
    }

    /// Forget selection and scroll position (e.g. after switching lists).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Show the newest entry. The offset is clamped on the next render.
    pub fn scroll_to_end(&mut self) {
        self.scroll_state.set_offset(Position { x: 0, y: u16::MAX });
    }

    pub fn select_last(&mut self, count: usize) {
        self.selected_index = count.checked_sub(1);
        self.scroll_to_selected();
    }

    pub fn select_previous(&mut self) {
        if let Some(idx) = self.selected_index {
            self.selected_index = Some(idx.saturating_sub(1));
            self.scroll_to_selected();
        }
    }

    /// Move down one row. Returns `false` when already on the last row.
    pub fn select_next(&mut self, count: usize) -> bool {
        match self.selected_index {
            Some(idx) if idx + 1 < count => {
                self.selected_index = Some(idx + 1);
                self.scroll_to_selected();
                true
            }
            _ => false,
        }
    }

    /// Keep the selection inside `0..count` after entries disappear.
    pub fn clamp_selection(&mut self, count: usize) {
        if let Some(idx) = self.selected_index {
            self.selected_index = if count == 0 {
                None
            } else {
                Some(idx.min(count - 1))
            };
        }
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.total_height().saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position { x: current.x, y: max_y });
        }
    }

    /// Scroll so the selected card is fully visible, aligning its top edge
    /// if it is taller than the viewport.
    pub fn scroll_to_selected(&mut self) {
        let Some(idx) = self.selected_index else {
            return;
        };
        let Some(&item_bottom) = self.prefix_heights.get(idx) else {
            return;
        };
        let item_top = match idx.checked_sub(1) {
            Some(prev) => self.prefix_heights.get(prev).copied().unwrap_or(0),
            None => 0,
        };
        let offset_y = self.scroll_state.offset().y;

        if item_top < offset_y {
            self.scroll_state.set_offset(Position { x: 0, y: item_top });
        } else if item_bottom > offset_y + self.viewport_height {
            let new_y = item_bottom.saturating_sub(self.viewport_height);
            self.scroll_state.set_offset(Position { x: 0, y: new_y });
        }
    }

    /// Find the card under screen position (`col`, `row`) for a list drawn in `area`.
    pub fn hit_test(&self, area: Rect, col: u16, row: u16) -> Option<EntryHit> {
        if row < area.y || row >= area.y + area.height || col < area.x || col >= area.x + area.width {
            return None;
        }
        let content_y = (row - area.y).saturating_add(self.scroll_state.offset().y);
        let index = self.prefix_heights.partition_point(|&end| end <= content_y);
        if index >= self.prefix_heights.len() {
            return None;
        }
        let content_width = area.width.saturating_sub(1);
        Some(EntryHit {
            index,
            on_trash: EntryCard::is_trash_column(area.x, content_width, col),
        })
    }
}

/// Scrollable list of entry cards.
/// Created fresh each frame with references to state and data.
pub struct EntryList<'a> {
    pub state: &'a mut EntryListState,
    pub entries: &'a [&'a Entry],
    pub list: ListTag,
}

impl<'a> EntryList<'a> {
    pub fn new(state: &'a mut EntryListState, entries: &'a [&'a Entry], list: ListTag) -> Self {
        Self {
            state,
            entries,
            list,
        }
    }

    fn empty_message(list: ListTag) -> &'static str {
        match list {
            ListTag::Work => "Nothing to do. Type above to add a to-do.",
            ListTag::Travel => "No trips planned. Type above to add one.",
        }
    }
}

impl<'a> Component for EntryList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        self.state.heights = self
            .entries
            .iter()
            .map(|entry| EntryCard::calculate_height(entry, content_width))
            .collect();
        self.state.rebuild_prefix_heights();
        self.state.viewport_height = area.height;
        self.state.clamp_selection(self.entries.len());
        self.state.clamp_scroll();

        if self.entries.is_empty() {
            let empty = Paragraph::new(Self::empty_message(self.list))
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let total_height = self.state.total_height();
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (i, entry) in self.entries.iter().enumerate() {
            let height = self.state.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            let is_selected = self.state.selected_index == Some(i);
            scroll_view.render_widget(EntryCard::new(entry, is_selected), rect);
            y_offset = y_offset.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the state: scrolling needs to persist across frames.
impl EventHandler for EntryListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.clamp_scroll();
            }
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.clamp_scroll();
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn entry(id: i64, text: &str) -> Entry {
        Entry {
            id,
            text: text.to_string(),
            list: ListTag::Work,
        }
    }

    fn state_with_heights(heights: &[u16], viewport: u16) -> EntryListState {
        let mut state = EntryListState::new();
        state.heights = heights.to_vec();
        state.rebuild_prefix_heights();
        state.viewport_height = viewport;
        state
    }

    #[test]
    fn test_prefix_heights() {
        let state = state_with_heights(&[3, 4, 3], 10);
        assert_eq!(state.prefix_heights, vec![3, 7, 10]);
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut state = state_with_heights(&[3, 3, 3], 10);
        state.select_last(3);
        assert_eq!(state.selected_index, Some(2));
        assert!(!state.select_next(3));
        state.select_previous();
        state.select_previous();
        state.select_previous();
        assert_eq!(state.selected_index, Some(0));
        assert!(state.select_next(3));
        assert_eq!(state.selected_index, Some(1));
    }

    #[test]
    fn test_select_last_on_empty_list() {
        let mut state = EntryListState::new();
        state.select_last(0);
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn test_clamp_selection_after_removal() {
        let mut state = EntryListState::new();
        state.selected_index = Some(4);
        state.clamp_selection(2);
        assert_eq!(state.selected_index, Some(1));
        state.clamp_selection(0);
        assert_eq!(state.selected_index, None);
    }

    #[test]
    fn test_scroll_to_selected_below_viewport() {
        let mut state = state_with_heights(&[3, 3, 3, 3], 6);
        state.selected_index = Some(3);
        state.scroll_to_selected();
        assert_eq!(state.scroll_state.offset().y, 6);

        state.selected_index = Some(0);
        state.scroll_to_selected();
        assert_eq!(state.scroll_state.offset().y, 0);
    }

    #[test]
    fn test_hit_test_maps_rows_to_entries() {
        let state = state_with_heights(&[3, 3], 10);
        let area = Rect::new(0, 5, 41, 10);
        assert_eq!(
            state.hit_test(area, 3, 5),
            Some(EntryHit { index: 0, on_trash: false })
        );
        assert_eq!(
            state.hit_test(area, 3, 8),
            Some(EntryHit { index: 1, on_trash: false })
        );
        // content width 40 → marker columns 34..38
        assert_eq!(
            state.hit_test(area, 35, 6),
            Some(EntryHit { index: 0, on_trash: true })
        );
        assert_eq!(state.hit_test(area, 3, 11), None);
        assert_eq!(state.hit_test(area, 3, 4), None);
    }

    #[test]
    fn test_render_lists_entries() {
        let a = entry(1, "Buy milk");
        let b = entry(2, "Call Sam");
        let entries = vec![&a, &b];
        let mut state = EntryListState::new();

        let backend = TestBackend::new(40, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                EntryList::new(&mut state, &entries, ListTag::Work).render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Buy milk"));
        assert!(text.contains("Call Sam"));
        assert_eq!(state.prefix_heights, vec![3, 6]);
    }

    #[test]
    fn test_render_empty_travel_list() {
        let entries: Vec<&Entry> = Vec::new();
        let mut state = EntryListState::new();

        let backend = TestBackend::new(50, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                EntryList::new(&mut state, &entries, ListTag::Travel).render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No trips planned"));
    }
}
