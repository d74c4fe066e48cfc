//! # Application Error Type
//!
//! Unified error type for the command layer.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow in Anbargar                              │
//! │                                                                         │
//! │  Validation findings are DATA, not exceptions: every broken rule is     │
//! │  collected first, then returned together as one Rejected value so       │
//! │  the operator gets a single complete report.                            │
//! │                                                                         │
//! │  Storage and network faults surface as one human-readable message       │
//! │  (Display) and never crash the session. No automatic retries: the       │
//! │  operator re-triggers the action explicitly.                            │
//! │                                                                         │
//! │  Flow: Violation[] ──► AppError::Rejected ──┐                           │
//! │        GatewayError ────────────────────────┼──► Display ──► operator   │
//! │        StoreError ──────────────────────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use anbargar_core::Violation;
use anbargar_store::StoreError;

use crate::gateway::GatewayError;

/// Errors surfaced by the command layer.
#[derive(Debug, Error)]
pub enum AppError {
    /// The event broke one or more validation rules. Carries every
    /// violation so the caller can render the full report in one pass.
    #[error("event rejected: {}", .violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
    Rejected { violations: Vec<Violation> },

    /// The referenced event is not in the known event list. Fatal to
    /// receipt generation.
    #[error("event not found: {0}")]
    EventNotFound(String),

    /// Receipts only exist for stock in/out events; transfers have no
    /// counterparty to issue one to.
    #[error("receipts are only available for stock in/out events")]
    ReceiptNotSupported,

    /// No stored receipt with this id.
    #[error("stored receipt not found: {0}")]
    ReceiptNotFound(String),

    /// The inventory service rejected the call or could not be reached.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Local receipt storage failed.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl AppError {
    /// Convenience accessor for the violation list, when present.
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            AppError::Rejected { violations } => Some(violations),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
