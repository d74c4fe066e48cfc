//! # Command Handlers
//!
//! The pipeline end to end, as explicit command handlers over the data
//! model - rendering is a separate projection consuming the structured
//! results.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  record_event(ctx, draft)                                               │
//! │    reconcile ──► validate ──► submit                                    │
//! │        │             │                                                  │
//! │        │             └── violations? return them ALL as one Rejected    │
//! │        └── unresolved names block inventory-affecting submissions       │
//! │                                                                         │
//! │  generate_receipt(ctx, event_id, kind)                                  │
//! │    find summary ──► fetch detail ──► compose                            │
//! │        │                 │                                              │
//! │        │                 └── fetch failed? compose from the summary,    │
//! │        │                     items flagged unavailable (no retries)     │
//! │        └── unknown id is fatal: EventNotFound                           │
//! │                                                                         │
//! │  save_receipt / saved_receipts / open_receipt / delete_receipt          │
//! │    JSON document ◄──► local receipt store                               │
//! │                                                                         │
//! │  export_receipt                                                         │
//! │    standalone HTML, renderable offline                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use anbargar_core::{
    compose_receipt, reconcile_lines, render, validate_event, CustomerSnapshot, EnteredLine,
    EventDetail, EventSummary, EventType, MovementEvent, Receipt, ReceiptKind,
};
use anbargar_store::{ReceiptSlot, ReceiptStore, StoreError, StoredReceipt};

use crate::context::SessionContext;
use crate::error::AppError;
use crate::gateway::{EventGateway, EventSubmission};

// =============================================================================
// Inputs / Outputs
// =============================================================================

/// A movement event as entered in the form, before reconciliation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub event_type: EventType,
    #[serde(default)]
    pub folder_id: Option<String>,
    #[serde(default)]
    pub origin_folder_id: Option<String>,
    #[serde(default)]
    pub destination_folder_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub customer: CustomerSnapshot,
    pub lines: Vec<EnteredLine>,
}

/// A receipt packaged for download or printing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedReceipt {
    pub file_name: String,
    pub html: String,
}

// =============================================================================
// Event Service
// =============================================================================

/// The command surface of the event/receipt pipeline.
///
/// Holds the event gateway and the local receipt store; the catalog
/// snapshot arrives per call inside the [`SessionContext`].
pub struct EventService<E: EventGateway, S: ReceiptSlot> {
    events: E,
    receipts: ReceiptStore<S>,
}

impl<E: EventGateway, S: ReceiptSlot> EventService<E, S> {
    pub fn new(events: E, receipts: ReceiptStore<S>) -> Self {
        EventService { events, receipts }
    }

    /// Reconciles, validates and submits a drafted event.
    ///
    /// Validation rejections carry every violation together; a gateway
    /// rejection carries the service's own detail message.
    pub async fn record_event(
        &self,
        ctx: &SessionContext,
        draft: EventDraft,
    ) -> Result<EventSummary, AppError> {
        debug!(event_type = ?draft.event_type, lines = draft.lines.len(), "record_event command");

        let outcome = reconcile_lines(&draft.lines, &ctx.catalog, draft.event_type);
        let event = MovementEvent {
            event_type: draft.event_type,
            folder_id: draft.folder_id,
            origin_folder_id: draft.origin_folder_id,
            destination_folder_id: draft.destination_folder_id,
            description: draft.description,
            customer: draft.customer,
            lines: outcome.lines,
        };

        validate_event(&event, &outcome.unresolved)
            .map_err(|violations| AppError::Rejected { violations })?;

        let summary = self.events.submit_event(&EventSubmission::from(event)).await?;
        info!(event_id = %summary.id, "event recorded");
        Ok(summary)
    }

    /// Composes a receipt for a known event.
    ///
    /// The detail fetch is best-effort: on failure the receipt is built
    /// from the already-known summary with its items flagged
    /// unavailable - a partial receipt beats no receipt. An unknown id
    /// is fatal.
    pub async fn generate_receipt(
        &self,
        ctx: &SessionContext,
        event_id: &str,
        kind: ReceiptKind,
    ) -> Result<Receipt, AppError> {
        debug!(event_id, kind = ?kind, "generate_receipt command");

        let summary = ctx
            .find_event(event_id)
            .ok_or_else(|| AppError::EventNotFound(event_id.to_string()))?;
        if !summary.event_type.receipt_eligible() {
            return Err(AppError::ReceiptNotSupported);
        }

        let detail = match self.events.event_detail(event_id).await {
            Ok(detail) => detail,
            Err(err) => {
                warn!(event_id, %err, "detail fetch failed, composing from summary");
                EventDetail::from_summary(summary)
            }
        };

        Ok(compose_receipt(kind, &detail))
    }

    /// Persists a receipt locally; returns the stored id.
    pub async fn save_receipt(&self, receipt: &Receipt) -> Result<String, AppError> {
        let document = serde_json::to_string(receipt).map_err(StoreError::Corrupted)?;
        let id = self.receipts.save(&receipt.default_title(), &document)?;
        info!(receipt_id = %id, "receipt saved locally");
        Ok(id)
    }

    /// All locally stored receipts, newest first.
    pub async fn saved_receipts(&self) -> Vec<StoredReceipt> {
        self.receipts.list()
    }

    /// Re-opens a stored receipt document for viewing.
    pub async fn open_receipt(&self, id: &str) -> Result<Receipt, AppError> {
        let record = self
            .receipts
            .get(id)
            .ok_or_else(|| AppError::ReceiptNotFound(id.to_string()))?;
        let receipt = serde_json::from_str(&record.document).map_err(StoreError::Corrupted)?;
        Ok(receipt)
    }

    /// Deletes a stored receipt; a missing id is a no-op.
    pub async fn delete_receipt(&self, id: &str) -> Result<(), AppError> {
        self.receipts.delete(id)?;
        Ok(())
    }

    /// Packages a receipt as a self-contained HTML file.
    pub fn export_receipt(&self, receipt: &Receipt) -> ExportedReceipt {
        let title = receipt.default_title();
        ExportedReceipt {
            html: render::standalone_document(&title, receipt),
            file_name: format!("{}.html", title),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
