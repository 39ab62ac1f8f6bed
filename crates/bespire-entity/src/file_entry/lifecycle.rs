//! Entry lifecycle as a tagged state.
//!
//! Persisted as a nullable `deleted_at` column; modeled as an enum so the
//! Live/Trashed state machine is explicit in the type system. The third
//! state, Destroyed, is the absence of the row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle state of a [`FileEntry`](super::FileEntry).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// The entry is visible in default listings.
    Live,
    /// The entry is in the trash; `at` records when it was moved there.
    Trashed {
        /// When the entry was trashed.
        at: DateTime<Utc>,
    },
}

impl Lifecycle {
    /// Build from the persisted nullable timestamp.
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            None => Self::Live,
            Some(at) => Self::Trashed { at },
        }
    }

    /// The nullable timestamp form used for persistence and JSON.
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Live => None,
            Self::Trashed { at } => Some(*at),
        }
    }

    /// Whether the entry is live.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    /// Transition to Trashed. Trashing an already-trashed entry refreshes
    /// the timestamp (last write wins, matching the store semantics).
    pub fn trash(self, now: DateTime<Utc>) -> Self {
        Self::Trashed { at: now }
    }

    /// Transition back to Live. Restoring a live entry is a no-op.
    pub fn restore(self) -> Self {
        Self::Live
    }
}

// JSON form is the nullable timestamp, so API payloads expose a plain
// `deleted_at` field rather than an enum encoding.
impl Serialize for Lifecycle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.deleted_at().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Lifecycle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let deleted_at = Option::<DateTime<Utc>>::deserialize(deserializer)?;
        Ok(Self::from_deleted_at(deleted_at))
    }
}
