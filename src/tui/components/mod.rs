//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as struct fields:
//! - `ListTabs`: the Work / Travel header
//! - `EntryCard`: a single entry with its delete marker
//! - `StatusBar`: list summary and key hints
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep local state and emit events:
//! - `InputBox`: text field for new entries
//! - `EntryList`: scrollable, selectable list of cards
//! - `DeletePrompt`: the "Delete To Do?" confirmation
//!
//! Components never mutate the `ListStore`. They emit events and the shell
//! in `tui/mod.rs` turns those into store calls.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── list_tabs.rs     (Work / Travel header)
//! ├── input_box/       (Text input with wrapping cursor)
//! ├── entry_card.rs    (Single entry renderer)
//! ├── entry_list.rs    (Scrollable entry container)
//! ├── delete_prompt.rs (Confirmation overlay)
//! └── status_bar.rs    (Bottom line)
//! ```

pub mod delete_prompt;
pub mod entry_card;
pub mod entry_list;
pub mod input_box;
pub mod list_tabs;
pub mod status_bar;

pub use delete_prompt::{DeletePrompt, DeletePromptState, PromptEvent};
pub use entry_list::{EntryList, EntryListState};
pub use input_box::{InputBox, InputEvent};
pub use list_tabs::ListTabs;
pub use status_bar::StatusBar;
