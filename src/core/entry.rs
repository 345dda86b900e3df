//! # Entries
//!
//! The data model behind both lists.
//!
//! ```text
//! EntryCollection
//! └── BTreeMap<EntryId, Entry>
//!     ├── 1718000000000 → Entry { text: "Buy milk",    list: Work }
//!     └── 1718000004211 → Entry { text: "Book flight", list: Travel }
//! ```
//!
//! On disk the collection is a JSON object keyed by the id's decimal string:
//!
//! ```json
//! { "1718000000000": { "text": "Buy milk", "work": true } }
//! ```
//!
//! Ids are issued in increasing order, so iterating the map by key is the
//! same as iterating in creation order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Milliseconds since the Unix epoch at the moment the entry was created.
pub type EntryId = i64;

/// Which of the two lists an entry belongs to (and which one is on screen).
///
/// Persisted as a bare boolean: `true` is Work, `false` is Travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum ListTag {
    #[default]
    Work,
    Travel,
}

impl ListTag {
    /// The other list.
    pub fn toggle(self) -> Self {
        match self {
            ListTag::Work => ListTag::Travel,
            ListTag::Travel => ListTag::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ListTag::Work => "Work",
            ListTag::Travel => "Travel",
        }
    }

    pub fn is_work(self) -> bool {
        self == ListTag::Work
    }
}

impl From<bool> for ListTag {
    fn from(work: bool) -> Self {
        if work { ListTag::Work } else { ListTag::Travel }
    }
}

impl From<ListTag> for bool {
    fn from(tag: ListTag) -> Self {
        tag.is_work()
    }
}

impl fmt::Display for ListTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub id: EntryId,
    pub text: String,
    pub list: ListTag,
}

/// Stored shape of an entry. The id lives in the enclosing object's key.
#[derive(Serialize, Deserialize)]
struct EntryRecord {
    text: String,
    work: bool,
}

/// All entries of both lists, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryCollection {
    entries: BTreeMap<EntryId, Entry>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any existing entry with the same id.
    /// Returns the replaced entry.
    pub fn insert(&mut self, entry: Entry) -> Option<Entry> {
        self.entries.insert(entry.id, entry)
    }

    pub fn remove(&mut self, id: EntryId) -> Option<Entry> {
        self.entries.remove(&id)
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest id in the collection, if any.
    pub fn last_id(&self) -> Option<EntryId> {
        self.entries.keys().next_back().copied()
    }

    /// All entries in display order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Entry> + Clone {
        self.entries.values()
    }

    /// Entries belonging to `list`, in display order.
    ///
    /// The returned iterator borrows the collection and can be cloned to
    /// walk the same view again.
    pub fn filtered(&self, list: ListTag) -> impl Iterator<Item = &Entry> + Clone {
        self.entries.values().filter(move |entry| entry.list == list)
    }
}

impl Serialize for EntryCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, entry) in &self.entries {
            let record = EntryRecord {
                text: entry.text.clone(),
                work: entry.list.is_work(),
            };
            map.serialize_entry(id, &record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EntryCollection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let records = BTreeMap::<EntryId, EntryRecord>::deserialize(deserializer)?;
        let entries = records
            .into_iter()
            .map(|(id, record)| {
                let entry = Entry {
                    id,
                    text: record.text,
                    list: ListTag::from(record.work),
                };
                (id, entry)
            })
            .collect();
        Ok(Self { entries })
    }
}

impl FromIterator<Entry> for EntryCollection {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let mut collection = Self::new();
        for entry in iter {
            collection.insert(entry);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: EntryId, text: &str, list: ListTag) -> Entry {
        Entry {
            id,
            text: text.to_string(),
            list,
        }
    }

    #[test]
    fn test_list_tag_toggle() {
        assert_eq!(ListTag::Work.toggle(), ListTag::Travel);
        assert_eq!(ListTag::Travel.toggle(), ListTag::Work);
        assert_eq!(ListTag::default(), ListTag::Work);
    }

    #[test]
    fn test_list_tag_persists_as_bool() {
        assert_eq!(serde_json::to_string(&ListTag::Work).unwrap(), "true");
        assert_eq!(serde_json::to_string(&ListTag::Travel).unwrap(), "false");
        let tag: ListTag = serde_json::from_str("false").unwrap();
        assert_eq!(tag, ListTag::Travel);
    }

    #[test]
    fn test_collection_serializes_with_string_keys() {
        let collection: EntryCollection =
            [entry(1_700_000_000_000, "Buy milk", ListTag::Work)].into_iter().collect();
        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "1700000000000": { "text": "Buy milk", "work": true } })
        );
    }

    #[test]
    fn test_collection_reads_stored_object() {
        let json = r#"{
            "1700000000000": {"text": "Buy milk", "work": true},
            "1700000000500": {"text": "Book flight", "work": false}
        }"#;
        let collection: EntryCollection = serde_json::from_str(json).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(
            collection.get(1_700_000_000_500),
            Some(&entry(1_700_000_000_500, "Book flight", ListTag::Travel))
        );
    }

    #[test]
    fn test_collection_rejects_non_numeric_keys() {
        let json = r#"{"abc": {"text": "x", "work": true}}"#;
        assert!(serde_json::from_str::<EntryCollection>(json).is_err());
    }

    #[test]
    fn test_filtered_keeps_order_and_list() {
        let collection: EntryCollection = [
            entry(3, "c", ListTag::Work),
            entry(1, "a", ListTag::Work),
            entry(2, "b", ListTag::Travel),
        ]
        .into_iter()
        .collect();

        let work: Vec<&str> = collection
            .filtered(ListTag::Work)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(work, vec!["a", "c"]);

        let travel = collection.filtered(ListTag::Travel);
        assert_eq!(travel.clone().count(), 1);
        assert_eq!(travel.count(), 1);
    }

    #[test]
    fn test_insert_same_id_replaces() {
        let mut collection = EntryCollection::new();
        collection.insert(entry(5, "first", ListTag::Work));
        let replaced = collection.insert(entry(5, "second", ListTag::Work));
        assert_eq!(replaced.map(|e| e.text), Some("first".to_string()));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.last_id(), Some(5));
    }
}
