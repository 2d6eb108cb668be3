//! Soft-delete metadata and bulk change summaries

use bson::DateTime;
use serde::{Deserialize, Serialize};

/// Key under which the metadata sub-document is conventionally stored
pub const DEFAULT_METADATA_KEY: &str = "timestamps";

pub const UPDATED_AT_FIELD: &str = "updated_at";
pub const DELETED_AT_FIELD: &str = "deleted_at";

/// Timestamps every soft-deletable entity embeds
///
/// Unset timestamps are omitted from the stored document. `deleted_at` is only
/// ever written by the repository's remove paths and is never cleared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftDeleteMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime>,
}

impl SoftDeleteMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// A live entity has no deletion timestamp
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Stamp `updated_at` with the current time and return it
    pub fn touch(&mut self) -> DateTime {
        let now = DateTime::now();
        self.updated_at = Some(now);
        now
    }
}

/// Outcome of a bulk operation
///
/// `updated <= matched` always holds; the gap counts documents that were
/// already deleted or whose individual update failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub matched: u64,
    pub updated: u64,
    pub removed: u64,
}

impl ChangeSummary {
    pub fn removed(count: u64) -> Self {
        Self {
            matched: count,
            updated: 0,
            removed: count,
        }
    }

    /// Documents that matched but were not changed
    pub fn skipped(&self) -> u64 {
        self.matched.saturating_sub(self.updated.max(self.removed))
    }
}
