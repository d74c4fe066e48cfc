//! # Receipt Compositor
//!
//! Turns a recorded event into a structured, presentable receipt.
//!
//! ## One Document, Many Renderers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  EventDetail ──► compose_receipt() ──► Receipt (structured)             │
//! │                                            │                            │
//! │                         ┌──────────────────┼──────────────────┐         │
//! │                         ▼                  ▼                  ▼         │
//! │                  screen preview      HTML export          printer       │
//! │                                                                         │
//! │  The Receipt is the single source of truth; every renderer consumes     │
//! │  the same structure (see [`crate::render`]), so preview, file export    │
//! │  and print can never disagree.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Total Policy
//! A line amount exists only when quantity AND value are finite. The
//! grand total is published only when the line list is non-empty and
//! EVERY line had an amount; otherwise the receipt carries
//! `total: None` / `total_complete: false` and renders "not computable".
//! A receipt with one un-priced line never shows a partial sum.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::amount::Amount;
use crate::types::{CustomerSnapshot, EventDetail, EventType};

// =============================================================================
// Receipt Kind
// =============================================================================

/// Which side of the transaction the receipt is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
    /// Purchase receipt (stock in).
    Buyer,
    /// Sales receipt (stock out).
    Seller,
}

impl ReceiptKind {
    /// Heading shown on the rendered document.
    pub const fn label(&self) -> &'static str {
        match self {
            ReceiptKind::Buyer => "رسید خرید",
            ReceiptKind::Seller => "رسید فروش",
        }
    }

    /// Short slug used in titles and file names.
    pub const fn slug(&self) -> &'static str {
        match self {
            ReceiptKind::Buyer => "buy",
            ReceiptKind::Seller => "sell",
        }
    }
}

// =============================================================================
// Receipt Document
// =============================================================================

/// One row of a receipt's item table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RenderedLine {
    pub name: String,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub value: Option<f64>,
    /// quantity × value, present only when both sides were finite.
    pub amount: Option<Amount>,
}

/// A derived, read-only projection of a recorded event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Receipt {
    pub kind: ReceiptKind,
    pub event_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub customer: CustomerSnapshot,
    pub description: Option<String>,
    pub lines: Vec<RenderedLine>,
    /// Grand total; `None` when not computable from the data at hand.
    pub total: Option<Amount>,
    /// True only when the total was computed from complete data. Kept as
    /// an explicit flag so renderers never conflate "zero" with
    /// "unknown".
    pub total_complete: bool,
    /// True when the detail fetch returned no line items and the receipt
    /// was composed from the event summary alone.
    pub items_unavailable: bool,
}

impl Receipt {
    /// Default document title: `receipt-<kind>-<event id>`.
    pub fn default_title(&self) -> String {
        format!("receipt-{}-{}", self.kind.slug(), self.event_id)
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Builds a receipt from a fully detailed event. Deterministic: the same
/// event and kind always produce the same document.
pub fn compose_receipt(kind: ReceiptKind, event: &EventDetail) -> Receipt {
    let items_unavailable = event.items.is_none();

    let lines: Vec<RenderedLine> = event
        .items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| RenderedLine {
            name: item.name.clone(),
            quantity: item.quantity,
            unit: item.unit.clone(),
            value: item.value,
            amount: Amount::line_amount(item.quantity, item.value),
        })
        .collect();

    let total = if !lines.is_empty() && lines.iter().all(|l| l.amount.is_some()) {
        Some(
            lines
                .iter()
                .filter_map(|l| l.amount)
                .fold(Amount::zero(), |acc, a| acc + a),
        )
    } else {
        None
    };

    Receipt {
        kind,
        event_id: event.id.clone(),
        event_type: event.event_type,
        created_at: event.created_at,
        customer: CustomerSnapshot {
            name: event.customer_name.clone(),
            phone: event.customer_phone.clone(),
            address: event.customer_address.clone(),
        },
        description: event.description.clone(),
        lines,
        total_complete: total.is_some(),
        total,
        items_unavailable,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
