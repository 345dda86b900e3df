use crate::core::{Entry, ListStore};
use crate::tui::component::Component;
use crate::tui::components::{DeletePrompt, EntryList, ListTabs, StatusBar};
use crate::tui::{InputMode, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

const TABS_HEIGHT: u16 = 3;

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutAreas {
    pub tabs: Rect,
    pub input: Rect,
    pub list: Rect,
    pub status: Rect,
}

/// Split the frame. Shared by drawing and mouse hit testing so both agree.
pub fn layout_areas(area: Rect, input_height: u16) -> LayoutAreas {
    use Constraint::{Length, Min};
    let [tabs, input, list, status] =
        Layout::vertical([Length(TABS_HEIGHT), Length(input_height), Min(0), Length(1)])
            .areas(area);
    LayoutAreas {
        tabs,
        input,
        list,
        status,
    }
}

pub fn draw_ui(frame: &mut Frame, store: &ListStore, tui: &mut TuiState) {
    let frame_area = frame.area();
    let input_height = tui.input_box.calculate_height(frame_area.width);
    let areas = layout_areas(frame_area, input_height);
    let active = store.active_list();

    ListTabs::new(active).render(frame, areas.tabs);
    tui.input_box.render(frame, areas.input);

    let entries: Vec<&Entry> = store.active_view().collect();
    EntryList::new(&mut tui.entry_list, &entries, active).render(frame, areas.list);

    let selecting = tui.input_mode == InputMode::Cursor;
    StatusBar::new(active, entries.len(), selecting).render(frame, areas.status);

    if let Some(prompt) = &tui.delete_prompt {
        DeletePrompt::new(prompt).render(frame, frame_area);
    }
}
