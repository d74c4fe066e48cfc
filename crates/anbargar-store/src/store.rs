//! # Receipt Store
//!
//! Append/list/get/delete over stored receipts, on top of a
//! [`ReceiptSlot`].
//!
//! ## Save Is Read-Modify-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  save(title, document)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  read slot ──► decode list (corrupt? start fresh, warn)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  append { fresh UUID, title, now, document }   (newest LAST)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  encode + write the FULL list back                                      │
//! │                                                                         │
//! │  list() reverses: newest FIRST for display.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::slot::ReceiptSlot;

/// The fixed storage namespace. The `v1` suffix versions the layout; a
/// future layout change gets a new slot instead of migrating in place.
pub const STORAGE_NAMESPACE: &str = "anbargar_receipts_v1";

// =============================================================================
// Stored Receipt
// =============================================================================

/// One persisted receipt record.
///
/// `document` is the serialized receipt exactly as handed to
/// [`ReceiptStore::save`]; the store never re-encodes or normalizes it,
/// so a later `get` returns byte-identical content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReceipt {
    /// Unique for the lifetime of the store, never reused after deletion
    /// (UUID v4).
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub document: String,
}

// =============================================================================
// Receipt Store
// =============================================================================

/// The local receipt store. Owns every [`StoredReceipt`] record.
#[derive(Debug)]
pub struct ReceiptStore<S: ReceiptSlot> {
    slot: S,
}

impl<S: ReceiptSlot> ReceiptStore<S> {
    pub fn new(slot: S) -> Self {
        ReceiptStore { slot }
    }

    /// Persists a document under a fresh identifier and returns the id.
    ///
    /// Storage faults propagate; the caller surfaces them as a single
    /// operator message and the already-stored receipts stay untouched.
    pub fn save(&self, title: &str, document: &str) -> StoreResult<String> {
        let mut records = self.load_lenient()?;

        let id = Uuid::new_v4().to_string();
        records.push(StoredReceipt {
            id: id.clone(),
            title: title.to_string(),
            created_at: Utc::now(),
            document: document.to_string(),
        });

        self.persist(&records)?;
        Ok(id)
    }

    /// All stored receipts, newest first.
    ///
    /// Unreadable or corrupted storage yields an empty list (with a
    /// warning) - the store degrades rather than blocking the UI.
    pub fn list(&self) -> Vec<StoredReceipt> {
        match self.load_lenient() {
            Ok(mut records) => {
                records.reverse();
                records
            }
            Err(err) => {
                warn!(namespace = STORAGE_NAMESPACE, %err, "receipt storage unreadable, listing empty");
                Vec::new()
            }
        }
    }

    /// Fetches one stored receipt by id.
    pub fn get(&self, id: &str) -> Option<StoredReceipt> {
        self.list().into_iter().find(|record| record.id == id)
    }

    /// Removes a stored receipt. Deleting an id that does not exist is a
    /// no-op, not an error, and leaves storage untouched.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let mut records = self.load_lenient()?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            return Ok(());
        }
        self.persist(&records)
    }

    /// Decodes the slot's current list. A present-but-corrupted blob is
    /// treated as empty (warned); a slot read failure propagates.
    fn load_lenient(&self) -> StoreResult<Vec<StoredReceipt>> {
        let Some(payload) = self.slot.read()? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&payload) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(namespace = STORAGE_NAMESPACE, %err, "stored receipt list corrupted, starting fresh");
                Ok(Vec::new())
            }
        }
    }

    fn persist(&self, records: &[StoredReceipt]) -> StoreResult<()> {
        let payload = serde_json::to_string(records)?;
        self.slot.write(&payload)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemorySlot;

    fn store() -> ReceiptStore<MemorySlot> {
        ReceiptStore::new(MemorySlot::new())
    }

    #[test]
    fn test_save_then_get_is_byte_identical() {
        let store = store();
        let document = r#"{"kind":"seller","total":86.0}"#;

        let id = store.save("receipt-sell-e1", document).unwrap();
        let fetched = store.get(&id).unwrap();

        assert_eq!(fetched.document, document);
        assert_eq!(fetched.title, "receipt-sell-e1");
    }

    #[test]
    fn test_list_is_newest_first() {
        let store = store();
        store.save("first", "{}").unwrap();
        let last_id = store.save("second", "{}").unwrap();

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, last_id);
        assert_eq!(listed[0].title, "second");
    }

    #[test]
    fn test_storage_keeps_newest_last() {
        // On-disk order is append-only: oldest first, newest last.
        let slot = MemorySlot::new();
        let store = ReceiptStore::new(slot);
        store.save("first", "{}").unwrap();
        store.save("second", "{}").unwrap();

        let raw = store.slot.read().unwrap().unwrap();
        let decoded: Vec<StoredReceipt> = serde_json::from_str(&raw).unwrap();
        assert_eq!(decoded[0].title, "first");
        assert_eq!(decoded[1].title, "second");
    }

    #[test]
    fn test_ids_are_unique() {
        let store = store();
        let a = store.save("a", "{}").unwrap();
        let b = store.save("b", "{}").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let store = store();
        store.save("a", "{}").unwrap();
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_delete_removes_the_record() {
        let store = store();
        let id = store.save("a", "{}").unwrap();
        store.delete(&id).unwrap();
        assert!(store.get(&id).is_none());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_delete_missing_id_is_a_noop() {
        let store = store();
        store.save("a", "{}").unwrap();

        store.delete("nope").unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_corrupted_storage_lists_empty() {
        let store = ReceiptStore::new(MemorySlot::with_content("not json at all"));
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_save_over_corrupted_storage_starts_fresh() {
        let store = ReceiptStore::new(MemorySlot::with_content("{broken"));
        let id = store.save("recovered", "{}").unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.get(&id).unwrap().title, "recovered");
    }
}
