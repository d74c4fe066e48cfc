//! # Storage Slot Port
//!
//! The store persists everything through ONE text slot. This trait is the
//! whole storage surface: implementations only need to read and replace a
//! single blob, which keeps the store testable with an in-memory fake and
//! portable across runtimes (browser local storage, a file, a KV table).

use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;

use crate::error::{StoreError, StoreResult};

/// A single named text slot.
pub trait ReceiptSlot: Send + Sync {
    /// Reads the current blob; `None` when nothing was ever written.
    fn read(&self) -> StoreResult<Option<String>>;

    /// Replaces the blob wholesale.
    fn write(&self, payload: &str) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Slot
// =============================================================================

/// Volatile slot for tests and previews.
#[derive(Debug, Default)]
pub struct MemorySlot {
    cell: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        MemorySlot::default()
    }

    /// Seeds the slot with existing content (e.g. a corrupted blob in
    /// degradation tests).
    pub fn with_content(payload: &str) -> Self {
        MemorySlot {
            cell: Mutex::new(Some(payload.to_string())),
        }
    }
}

impl ReceiptSlot for MemorySlot {
    fn read(&self) -> StoreResult<Option<String>> {
        Ok(self.cell.lock().expect("slot mutex poisoned").clone())
    }

    fn write(&self, payload: &str) -> StoreResult<()> {
        *self.cell.lock().expect("slot mutex poisoned") = Some(payload.to_string());
        Ok(())
    }
}

// =============================================================================
// File-Backed Slot
// =============================================================================

/// Durable slot backed by a single file.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Uses an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSlot { path: path.into() }
    }

    /// Places the slot in the platform app-data directory:
    ///
    /// - **macOS**: `~/Library/Application Support/ir.anbargar.anbargar/`
    /// - **Windows**: `%APPDATA%\anbargar\anbargar\data\`
    /// - **Linux**: `~/.local/share/anbargar/`
    pub fn in_app_data(file_name: &str) -> StoreResult<Self> {
        let dirs = ProjectDirs::from("ir", "anbargar", "anbargar").ok_or_else(|| {
            StoreError::Unavailable(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "could not determine the app data directory",
            ))
        })?;
        std::fs::create_dir_all(dirs.data_dir())?;
        Ok(FileSlot::new(dirs.data_dir().join(file_name)))
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ReceiptSlot for FileSlot {
    fn read(&self) -> StoreResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, payload: &str) -> StoreResult<()> {
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_slot_round_trip() {
        let slot = MemorySlot::new();
        assert!(slot.read().unwrap().is_none());

        slot.write("[]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_slot_missing_file_reads_none() {
        let slot = FileSlot::new(std::env::temp_dir().join("anbargar-missing-slot.json"));
        let _ = std::fs::remove_file(slot.path());
        assert!(slot.read().unwrap().is_none());
    }

    #[test]
    fn test_file_slot_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "anbargar-slot-test-{}.json",
            std::process::id()
        ));
        let slot = FileSlot::new(&path);

        slot.write("[{\"id\":\"r1\"}]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[{\"id\":\"r1\"}]"));

        let _ = std::fs::remove_file(&path);
    }
}
