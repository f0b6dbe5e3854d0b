//! Local identity for items created before the server has seen them.
//!
//! Tool documents are saved whole, so the server never assigns item ids.
//! Whatever id is allocated here is the id the item keeps forever.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier of an item inside a tool document.
///
/// Documents written by older clients carry clock-derived ids such as
/// `"1718012345678"`; those are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Source of fresh item ids. Needs no coordination with the server.
pub trait IdAllocator: Send + Sync {
    fn next(&self) -> ItemId;
}

/// Random v4 UUIDs. The default for real sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidAllocator;

impl IdAllocator for UuidAllocator {
    fn next(&self) -> ItemId {
        ItemId(Uuid::new_v4().to_string())
    }
}

/// Monotonic counter ids (`item-1`, `item-2`, ...).
///
/// Deterministic, which makes it the allocator of choice in tests.
#[derive(Debug)]
pub struct SequentialAllocator {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialAllocator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialAllocator {
    fn default() -> Self {
        Self::new("item")
    }
}

impl IdAllocator for SequentialAllocator {
    fn next(&self) -> ItemId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        ItemId(format!("{}-{}", self.prefix, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sequential_ids_count_up_from_one() {
        let ids = SequentialAllocator::new("idea");
        assert_eq!(ids.next().as_str(), "idea-1");
        assert_eq!(ids.next().as_str(), "idea-2");
    }

    #[test]
    fn uuid_ids_do_not_collide_in_a_burst() {
        let ids = UuidAllocator;
        let seen: HashSet<ItemId> = (0..1_000).map(|_| ids.next()).collect();
        assert_eq!(seen.len(), 1_000);
    }

    #[test]
    fn legacy_ids_survive_serialization() {
        let id: ItemId = serde_json::from_str("\"1718012345678\"").unwrap();
        assert_eq!(id.as_str(), "1718012345678");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"1718012345678\"");
    }
}
