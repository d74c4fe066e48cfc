//! # anbargar-store: Local Receipt Store
//!
//! Durable, client-local persistence for generated receipts.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Persistence                                 │
//! │                                                                         │
//! │  anbargar-app (save_receipt / list / get / delete)                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 anbargar-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐         ┌───────────────────────────────┐  │   │
//! │  │   │ ReceiptStore  │ ──────► │  ReceiptSlot (port trait)     │  │   │
//! │  │   │ append/list/  │         │  read / write ONE text blob   │  │   │
//! │  │   │ get/delete    │         │                               │  │   │
//! │  │   └───────────────┘         │  MemorySlot   (tests)         │  │   │
//! │  │                             │  FileSlot     (app data dir)  │  │   │
//! │  │                             └───────────────────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Storage layout: a single namespaced slot (`anbargar_receipts_v1`)      │
//! │  holding a JSON array of stored receipts, newest LAST in storage,       │
//! │  newest FIRST when listed.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Degradation Policy
//! Reads never block the UI: corrupted or unreadable storage lists as
//! empty (with a warning). Writes propagate their error so the operator
//! sees one human-readable message; nothing crashes the session.
//!
//! ## Known Limitation
//! `save` is a read-modify-write of the whole list and is NOT protected
//! against concurrent writers from multiple processes; two simultaneous
//! saves can race and one can be lost. Accepted for a single-operator
//! tool.

pub mod error;
pub mod slot;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use slot::{FileSlot, MemorySlot, ReceiptSlot};
pub use store::{ReceiptStore, StoredReceipt, STORAGE_NAMESPACE};
