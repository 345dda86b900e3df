//! # Core Application Logic
//!
//! This module contains Jotlist's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Entry / ListTag      │
//!                    │  • ListStore            │
//!                    │  • Config               │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Storage   │
//!     │  Adapter   │                          │ (file/mem) │
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`entry`]: `Entry`, `ListTag` and the `EntryCollection` map
//! - [`store`]: `ListStore`, the owner of all list state and its persistence
//! - [`clock`]: time source for entry ids
//! - [`config`]: settings file and override resolution

pub mod clock;
pub mod config;
pub mod entry;
pub mod store;

pub use entry::{Entry, EntryCollection, EntryId, ListTag};
pub use store::{Confirmation, ListStore, StoreOptions};
