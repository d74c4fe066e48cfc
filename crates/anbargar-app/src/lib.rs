//! # anbargar-app: Orchestration Layer
//!
//! Wires the pure pipeline from `anbargar-core` to the external inventory
//! service and the local receipt store.
//!
//! ## Module Organization
//! ```text
//! anbargar_app/
//! ├── lib.rs          ◄─── You are here (exports + tracing setup)
//! ├── context.rs      ◄─── SessionContext: catalog snapshot + event list
//! ├── gateway.rs      ◄─── Port traits for the inventory service
//! ├── commands.rs     ◄─── Command handlers (the pipeline end to end)
//! └── error.rs        ◄─── Operator-facing error type
//! ```
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  user input                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  reconcile_lines ──► validate_event ──► EventGateway::submit_event      │
//! │      (rejections return to the user as ONE complete report)             │
//! │                                                                         │
//! │  later:                                                                 │
//! │  SessionContext.events ──► EventGateway::event_detail ──► compose       │
//! │      (detail fetch failure degrades to a partial receipt)               │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ReceiptStore (save/list/get/delete) / standalone HTML export           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All operations run on one logical thread of control; the surrounding
//! application serializes user-triggered actions, so no two pipeline
//! passes ever race on a shared catalog snapshot.

pub mod commands;
pub mod context;
pub mod error;
pub mod gateway;

pub use commands::{EventDraft, EventService, ExportedReceipt};
pub use context::SessionContext;
pub use error::AppError;
pub use gateway::{CatalogGateway, EventGateway, EventSubmission, GatewayError, GatewayResult};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=anbargar=trace` - Show trace for anbargar crates only
/// - Default: INFO level
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,anbargar=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
