//! # ListStore
//!
//! Owns the entry collection and the active-list flag, and keeps both
//! persisted through a [`KeyValueStore`].
//!
//! ```text
//! user action ──▶ ListStore (mutate memory, return immediately)
//!                     │
//!                     └── tokio::spawn ──▶ storage.set(key, json)
//! ```
//!
//! Writes are fire-and-forget: callers never wait and never see a storage
//! error. A failed write is logged and the in-memory state stays as it is.
//! Writes for the same key are chained so the last mutation is the last
//! value written; [`ListStore::flush`] awaits everything still in flight.
//!
//! Loading is equally forgiving: a missing or unreadable value falls back to
//! its default (no entries, Work list).

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;

use crate::core::clock::{self, Clock};
use crate::core::entry::{Entry, EntryCollection, EntryId, ListTag};
use crate::storage::{ACTIVE_LIST_KEY, ENTRIES_KEY, KeyValueStore};

/// Answer to the "Delete To Do?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Cancel,
    Proceed,
}

/// Behaviour switches for a [`ListStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreOptions {
    /// Reject text made only of whitespace, not just the empty string.
    pub reject_whitespace_only: bool,
    /// Active list when nothing has been persisted yet.
    pub default_list: ListTag,
}

pub struct ListStore {
    entries: EntryCollection,
    active: ListTag,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    options: StoreOptions,
    /// Most recent write per key. Each write awaits its predecessor.
    pending: HashMap<&'static str, JoinHandle<()>>,
}

/// Read both persisted values, substituting defaults for anything missing
/// or unreadable. Never fails.
pub async fn load_state(
    storage: &dyn KeyValueStore,
    default_list: ListTag,
) -> (EntryCollection, ListTag) {
    let entries = read_value::<EntryCollection>(storage, ENTRIES_KEY)
        .await
        .unwrap_or_default();
    let active = read_value::<ListTag>(storage, ACTIVE_LIST_KEY)
        .await
        .unwrap_or(default_list);
    (entries, active)
}

async fn read_value<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    match storage.get(key).await {
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Ignoring unreadable value under {}: {}", key, e);
                None
            }
        },
        Ok(None) => {
            debug!("Nothing stored under {}, using default", key);
            None
        }
        Err(e) => {
            warn!("Failed to read {} from {} storage: {}", key, storage.name(), e);
            None
        }
    }
}

impl ListStore {
    /// An empty store (no entries, default list) that has not read storage.
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        options: StoreOptions,
    ) -> Self {
        Self {
            entries: EntryCollection::new(),
            active: options.default_list,
            storage,
            clock,
            options,
            pending: HashMap::new(),
        }
    }

    /// Build a store from whatever `storage` currently holds.
    pub async fn load(
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        options: StoreOptions,
    ) -> Self {
        let (entries, active) = load_state(storage.as_ref(), options.default_list).await;
        info!(
            "Loaded {} entries from {} storage, active list: {}",
            entries.len(),
            storage.name(),
            active
        );
        let mut store = Self::new(storage, clock, options);
        store.entries = entries;
        store.active = active;
        store
    }

    pub fn active_list(&self) -> ListTag {
        self.active
    }

    pub fn entries(&self) -> &EntryCollection {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Switch the displayed list. Visible immediately; persisted in the background.
    pub fn set_active_list(&mut self, list: ListTag) {
        self.active = list;
        debug!("Active list set to {}", list);
        self.persist_active_list();
    }

    pub fn toggle_active_list(&mut self) -> ListTag {
        let next = self.active.toggle();
        self.set_active_list(next);
        next
    }

    /// Add `text` to the active list. See [`ListStore::add_entry_to`].
    pub fn add_entry(&mut self, text: &str) -> Option<EntryId> {
        self.add_entry_to(self.active, text)
    }

    /// Add `text` to `list`, returning the new entry's id.
    ///
    /// Empty text is ignored and returns `None`. Whitespace-only text is
    /// ignored only when `reject_whitespace_only` is set.
    pub fn add_entry_to(&mut self, list: ListTag, text: &str) -> Option<EntryId> {
        if !self.accepts(text) {
            debug!("Ignoring blank entry");
            return None;
        }

        let Some(id) = clock::next_id(self.clock.now_millis(), self.entries.last_id()) else {
            warn!("No entry id left above {:?}; ignoring new entry", self.entries.last_id());
            return None;
        };
        self.entries.insert(Entry {
            id,
            text: text.to_string(),
            list,
        });
        info!("Added entry {} to {} list", id, list);
        self.persist_entries();
        Some(id)
    }

    /// Delete an entry once the user has answered the confirmation prompt.
    ///
    /// `Cancel` changes nothing and writes nothing. `Proceed` removes the
    /// entry with `id` (if present) and returns it.
    pub fn remove_entry(&mut self, id: EntryId, confirmation: Confirmation) -> Option<Entry> {
        if confirmation == Confirmation::Cancel {
            debug!("Delete of entry {} cancelled", id);
            return None;
        }

        let removed = self.entries.remove(id);
        match removed {
            Some(_) => {
                info!("Removed entry {}", id);
                self.persist_entries();
            }
            None => warn!("Delete requested for unknown entry {}", id),
        }
        removed
    }

    /// Entries of `list` in display order.
    pub fn filtered_view(&self, list: ListTag) -> impl Iterator<Item = &Entry> + Clone {
        self.entries.filtered(list)
    }

    /// Entries of the active list in display order.
    pub fn active_view(&self) -> impl Iterator<Item = &Entry> + Clone {
        self.filtered_view(self.active)
    }

    /// Wait for every write launched so far to finish.
    pub async fn flush(&mut self) {
        let handles: Vec<JoinHandle<()>> = self.pending.drain().map(|(_, h)| h).collect();
        if handles.is_empty() {
            return;
        }
        debug!("Flushing {} pending writes", handles.len());
        for result in futures::future::join_all(handles).await {
            if let Err(e) = result {
                warn!("Persistence task did not finish: {}", e);
            }
        }
    }

    fn accepts(&self, text: &str) -> bool {
        if self.options.reject_whitespace_only {
            !text.trim().is_empty()
        } else {
            !text.is_empty()
        }
    }

    fn persist_entries(&mut self) {
        match serde_json::to_string(&self.entries) {
            Ok(json) => self.spawn_write(ENTRIES_KEY, json),
            Err(e) => error!("Failed to serialize entries: {}", e),
        }
    }

    fn persist_active_list(&mut self) {
        match serde_json::to_string(&self.active) {
            Ok(json) => self.spawn_write(ACTIVE_LIST_KEY, json),
            Err(e) => error!("Failed to serialize active list: {}", e),
        }
    }

    fn spawn_write(&mut self, key: &'static str, json: String) {
        let storage = Arc::clone(&self.storage);
        let previous = self.pending.remove(key);
        let handle = tokio::spawn(async move {
            if let Some(previous) = previous
                && let Err(e) = previous.await
            {
                warn!("Earlier write to {} did not finish: {}", key, e);
            }
            match storage.set(key, &json).await {
                Ok(()) => debug!("Saved {} ({} bytes)", key, json.len()),
                Err(e) => error!("Failed to save {} to {} storage: {}", key, storage.name(), e),
            }
        });
        self.pending.insert(key, handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::test_support::{FailingStore, FixedClock, StepClock};

    fn store_with(storage: Arc<dyn KeyValueStore>) -> ListStore {
        ListStore::new(storage, Arc::new(StepClock::starting_at(1_000)), StoreOptions::default())
    }

    fn texts<'a>(view: impl Iterator<Item = &'a Entry>) -> Vec<&'a str> {
        view.map(|e| e.text.as_str()).collect()
    }

    #[tokio::test]
    async fn test_add_grows_active_view_only() {
        let mut store = store_with(Arc::new(MemoryStore::new()));
        store.add_entry_to(ListTag::Travel, "Book flight");

        let work_before = store.filtered_view(ListTag::Work).count();
        let travel_before: Vec<Entry> = store.filtered_view(ListTag::Travel).cloned().collect();

        assert!(store.add_entry("Buy milk").is_some());

        assert_eq!(store.filtered_view(ListTag::Work).count(), work_before + 1);
        let travel_after: Vec<Entry> = store.filtered_view(ListTag::Travel).cloned().collect();
        assert_eq!(travel_after, travel_before);
    }

    #[tokio::test]
    async fn test_empty_text_is_a_no_op() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = store_with(storage.clone());
        store.add_entry("keep");
        store.flush().await;
        let before = store.entries().clone();

        assert_eq!(store.add_entry(""), None);
        store.flush().await;

        assert_eq!(store.entries(), &before);
        assert_eq!(store.filtered_view(ListTag::Travel).count(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_accepted_by_default() {
        let mut store = store_with(Arc::new(MemoryStore::new()));
        assert!(store.add_entry("   ").is_some());
    }

    #[tokio::test]
    async fn test_whitespace_rejected_when_configured() {
        let options = StoreOptions {
            reject_whitespace_only: true,
            ..Default::default()
        };
        let mut store = ListStore::new(
            Arc::new(MemoryStore::new()),
            Arc::new(StepClock::starting_at(1)),
            options,
        );
        assert_eq!(store.add_entry(" \t "), None);
        assert!(store.is_empty());
        assert!(store.add_entry(" x ").is_some());
    }

    #[tokio::test]
    async fn test_same_millisecond_adds_get_distinct_ids() {
        let mut store = ListStore::new(
            Arc::new(MemoryStore::new()),
            Arc::new(FixedClock(5_000)),
            StoreOptions::default(),
        );
        let first = store.add_entry("one").unwrap();
        let second = store.add_entry("two").unwrap();

        assert_eq!(first, 5_000);
        assert_eq!(second, 5_001);
        assert_eq!(texts(store.active_view()), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_add_after_largest_possible_id_is_ignored() {
        let storage = Arc::new(MemoryStore::with_values([(
            ENTRIES_KEY,
            r#"{"9223372036854775807":{"text":"x","work":true}}"#,
        )]));
        let mut store = ListStore::load(
            storage,
            Arc::new(FixedClock(5_000)),
            StoreOptions::default(),
        )
        .await;

        assert_eq!(store.add_entry("y"), None);
        assert_eq!(store.len(), 1);
        assert_eq!(texts(store.active_view()), vec!["x"]);
    }

    #[tokio::test]
    async fn test_every_entry_is_in_exactly_its_own_view() {
        let mut store = store_with(Arc::new(MemoryStore::new()));
        store.add_entry_to(ListTag::Work, "a");
        store.add_entry_to(ListTag::Travel, "b");
        store.add_entry_to(ListTag::Work, "c");

        for entry in store.entries().iter() {
            assert!(store.filtered_view(entry.list).any(|e| e.id == entry.id));
            assert!(!store.filtered_view(entry.list.toggle()).any(|e| e.id == entry.id));
        }
    }

    #[tokio::test]
    async fn test_remove_cancel_changes_nothing() {
        let storage = Arc::new(MemoryStore::new());
        let mut store = store_with(storage.clone());
        let id = store.add_entry("stay").unwrap();
        store.flush().await;
        let stored_before = storage.get(ENTRIES_KEY).await.unwrap();

        assert_eq!(store.remove_entry(id, Confirmation::Cancel), None);

        assert!(store.pending.is_empty());
        assert!(store.get(id).is_some());
        assert_eq!(storage.get(ENTRIES_KEY).await.unwrap(), stored_before);
    }

    #[tokio::test]
    async fn test_remove_proceed_removes_only_that_entry() {
        let mut store = store_with(Arc::new(MemoryStore::new()));
        let a = store.add_entry("a").unwrap();
        let b = store.add_entry("b").unwrap();

        let removed = store.remove_entry(a, Confirmation::Proceed);

        assert_eq!(removed.map(|e| e.text), Some("a".to_string()));
        assert!(store.get(a).is_none());
        assert!(store.get(b).is_some());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_harmless() {
        let mut store = store_with(Arc::new(MemoryStore::new()));
        store.add_entry("a");
        assert_eq!(store.remove_entry(42, Confirmation::Proceed), None);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_last_active_list_wins_after_reload() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut store = store_with(storage.clone());
        store.set_active_list(ListTag::Travel);
        store.set_active_list(ListTag::Work);
        store.set_active_list(ListTag::Travel);
        store.flush().await;

        let reloaded =
            ListStore::load(storage, Arc::new(FixedClock(0)), StoreOptions::default()).await;
        assert_eq!(reloaded.active_list(), ListTag::Travel);
    }

    #[tokio::test]
    async fn test_toggle_flips_and_returns_new_list() {
        let mut store = store_with(Arc::new(MemoryStore::new()));
        assert_eq!(store.toggle_active_list(), ListTag::Travel);
        assert_eq!(store.active_list(), ListTag::Travel);
        assert_eq!(store.toggle_active_list(), ListTag::Work);
    }

    #[tokio::test]
    async fn test_write_failures_keep_memory() {
        let mut store = store_with(Arc::new(FailingStore));
        let id = store.add_entry("survives").unwrap();
        store.set_active_list(ListTag::Travel);
        store.flush().await;

        assert_eq!(store.get(id).map(|e| e.text.as_str()), Some("survives"));
        assert_eq!(store.active_list(), ListTag::Travel);
    }

    #[tokio::test]
    async fn test_load_from_failing_storage_uses_defaults() {
        let store =
            ListStore::load(Arc::new(FailingStore), Arc::new(FixedClock(0)), StoreOptions::default())
                .await;
        assert!(store.is_empty());
        assert_eq!(store.active_list(), ListTag::Work);
    }

    #[tokio::test]
    async fn test_load_uses_configured_default_list() {
        let options = StoreOptions {
            default_list: ListTag::Travel,
            ..Default::default()
        };
        let (_, active) = load_state(&MemoryStore::new(), options.default_list).await;
        assert_eq!(active, ListTag::Travel);
    }

    #[tokio::test]
    async fn test_load_corrupt_entries_gives_empty_collection() {
        let storage = MemoryStore::with_values([(ENTRIES_KEY, "{not json"), (ACTIVE_LIST_KEY, "false")]);
        let (entries, active) = load_state(&storage, ListTag::Work).await;
        assert!(entries.is_empty());
        assert_eq!(active, ListTag::Travel);
    }

    #[tokio::test]
    async fn test_flush_with_nothing_pending() {
        let mut store = store_with(Arc::new(MemoryStore::new()));
        store.flush().await;
        assert!(store.pending.is_empty());
    }
}
