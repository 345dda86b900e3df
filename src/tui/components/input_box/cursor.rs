//! Cursor position tracking and navigation for the InputBox.
//!
//! `CursorState` owns the cursor byte offset and scroll offset. Methods take
//! the buffer explicitly; the text itself is owned by `InputBox`.

use super::text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, display_width, inner_width, wrap_line_count, wrap_options,
};
use ratatui::layout::Rect;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
    /// Line offset for internal scrolling (0 when content fits in viewport)
    pub scroll_offset: u16,
    /// Content width from the last render (used for vertical movement)
    pub last_content_width: u16,
}

impl CursorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
            last_content_width: Self::DEFAULT_WIDTH,
        }
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.scroll_offset = 0;
    }

    /// Wrapped line index and byte offset within that line for the cursor.
    fn locate(&self, lines: &[std::borrow::Cow<'_, str>], buffer: &str) -> (usize, usize) {
        let mut line_start = 0;
        for (idx, line) in lines.iter().enumerate() {
            let start = buffer[line_start..]
                .find(line.as_ref())
                .map(|i| line_start + i)
                .unwrap_or(line_start);
            let end = start + line.len();
            let is_last = idx + 1 == lines.len();
            if self.pos <= end || is_last {
                return (idx, self.pos.saturating_sub(start));
            }
            line_start = end;
        }
        (0, self.pos)
    }

    /// Move the cursor one wrapped line up (`-1`) or down (`1`), keeping the
    /// column where possible. Returns `false` at the first/last line.
    pub fn move_vertically(&mut self, buffer: &str, direction: i16, content_width: u16) -> bool {
        let width = inner_width(content_width);
        if width == 0 || buffer.is_empty() {
            return false;
        }

        let lines = textwrap::wrap(buffer, wrap_options(width));
        if lines.len() < 2 {
            return false;
        }

        let (current, column) = self.locate(&lines, buffer);
        let target = if direction < 0 {
            if current == 0 {
                return false;
            }
            current - 1
        } else {
            if current + 1 >= lines.len() {
                return false;
            }
            current + 1
        };

        // Byte offset of the target line's start
        let mut search_from = 0;
        let mut target_start = 0;
        for line in lines.iter().take(target + 1) {
            target_start = buffer[search_from..]
                .find(line.as_ref())
                .map(|i| search_from + i)
                .unwrap_or(search_from);
            search_from = target_start + line.len();
        }

        let target_line = &lines[target];
        let mut column = column.min(target_line.len());
        while !target_line.is_char_boundary(column) {
            column -= 1;
        }
        self.pos = target_start + column;
        true
    }

    /// Which wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, buffer: &str, content_width: u16) -> u16 {
        let width = inner_width(content_width);
        if width == 0 {
            return 0;
        }
        let lines = textwrap::wrap(&buffer[..self.pos], wrap_options(width));
        u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    /// Keep the cursor line inside the visible window.
    pub fn update_scroll_offset(&mut self, buffer: &str, content_width: u16) {
        let width = inner_width(content_width);
        if wrap_line_count(buffer, width) <= MAX_VISIBLE_LINES {
            self.scroll_offset = 0;
            return;
        }

        let cursor_line = self.calculate_line(buffer, content_width);
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen position (column, row) for the terminal cursor.
    pub fn screen_pos(&self, buffer: &str, area: Rect) -> (u16, u16) {
        let width = inner_width(area.width);
        if width == 0 {
            return (area.x + CONTENT_OFFSET, area.y + 1);
        }

        let before = &buffer[..self.pos];
        let lines = textwrap::wrap(before, wrap_options(width));
        let cursor_line = u16::try_from(lines.len().saturating_sub(1)).unwrap_or(u16::MAX);

        // textwrap trims trailing spaces, so measure the raw tail instead of
        // the last wrapped line.
        let consumed: usize = lines
            .iter()
            .take(lines.len().saturating_sub(1))
            .map(|l| l.len())
            .sum();
        let tail_start = before
            .char_indices()
            .map(|(i, _)| i)
            .find(|&i| i >= consumed)
            .unwrap_or(before.len());
        let tail = before[tail_start..].trim_start_matches(' ');
        let cursor_col = display_width(tail).min(width);

        let visible_line = cursor_line.saturating_sub(self.scroll_offset);
        (
            area.x + CONTENT_OFFSET + cursor_col,
            area.y + 1 + visible_line,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_vertically_single_line_is_boundary() {
        let mut cursor = CursorState::new();
        cursor.pos = 3;
        assert!(!cursor.move_vertically("hello", -1, 40));
        assert!(!cursor.move_vertically("hello", 1, 40));
        assert_eq!(cursor.pos, 3);
    }

    #[test]
    fn test_move_vertically_between_wrapped_lines() {
        // inner width 6 → "aaaa" / "bbbb"
        let buffer = "aaaa bbbb";
        let mut cursor = CursorState::new();
        cursor.pos = buffer.len();
        assert!(cursor.move_vertically(buffer, -1, 10));
        assert_eq!(cursor.pos, 4);
        assert!(!cursor.move_vertically(buffer, -1, 10));
        assert!(cursor.move_vertically(buffer, 1, 10));
        assert_eq!(cursor.pos, buffer.len());
    }

    #[test]
    fn test_screen_pos_empty_buffer() {
        let cursor = CursorState::new();
        let area = Rect::new(0, 5, 40, 3);
        assert_eq!(cursor.screen_pos("", area), (2, 6));
    }

    #[test]
    fn test_screen_pos_after_text() {
        let mut cursor = CursorState::new();
        cursor.pos = 3;
        let area = Rect::new(0, 0, 40, 3);
        assert_eq!(cursor.screen_pos("abc", area), (5, 1));
    }

    #[test]
    fn test_update_scroll_offset_stays_zero_when_fits() {
        let mut cursor = CursorState::new();
        cursor.pos = 5;
        cursor.update_scroll_offset("hello", 40);
        assert_eq!(cursor.scroll_offset, 0);
    }
}
