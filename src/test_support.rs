//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::core::clock::Clock;
use crate::core::store::{ListStore, StoreOptions};
use crate::storage::{KeyValueStore, MemoryStore, StorageError};

/// A clock stuck at one instant.
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}

/// A clock that advances by 1ms every time it is read.
pub struct StepClock {
    next: AtomicI64,
}

impl StepClock {
    pub fn starting_at(millis: i64) -> Self {
        Self {
            next: AtomicI64::new(millis),
        }
    }
}

impl Clock for StepClock {
    fn now_millis(&self) -> i64 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

/// A storage provider whose every call fails.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("always fails".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("always fails".to_string()))
    }
}

/// Creates an empty ListStore backed by a fresh MemoryStore.
pub fn test_store() -> ListStore {
    ListStore::new(
        Arc::new(MemoryStore::new()),
        Arc::new(StepClock::starting_at(1_700_000_000_000)),
        StoreOptions::default(),
    )
}
