//! # Domain Types
//!
//! Core domain types used throughout Anbargar.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog (read-only snapshot)          Event pipeline                   │
//! │  ┌──────────────┐ ┌───────────┐        ┌──────────────┐                 │
//! │  │ CatalogItem  │ │  Folder   │        │ EnteredLine  │  user draft     │
//! │  │  id, name    │ │  id, name │        │      │       │                 │
//! │  │  sku?        │ └───────────┘        │      ▼       │                 │
//! │  │  barcode?    │ ┌───────────┐        │ReconciledLine│  + itemRef      │
//! │  │  value?      │ │ Customer  │        │      │       │    sku/barcode  │
//! │  └──────────────┘ │  Unit     │        │      ▼       │                 │
//! │                   └───────────┘        │MovementEvent │  BUY/SELL/MOVE  │
//! │                                        └──────────────┘                 │
//! │                                                                         │
//! │  Wire shapes (inventory service)                                        │
//! │  EventSummary (list endpoint, no lines)                                 │
//! │  EventDetail  (detail endpoint, lines + customer snapshot)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! All entity ids are opaque strings minted by the inventory service
//! (UUIDs upstream). The core never generates catalog or event ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Event Type
// =============================================================================

/// The kind of inventory movement an event records.
///
/// Wire values are the upstream service's: `BUY`, `SELL`, `MOVE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Stock in: goods enter a folder.
    Buy,
    /// Stock out: goods leave a folder.
    Sell,
    /// Transfer: goods move from an origin folder to a destination folder.
    Move,
}

impl EventType {
    /// Whether events of this type change tracked inventory.
    ///
    /// Lines of inventory-affecting events must reconcile against the
    /// catalog before submission; any future non-stock event kind passes
    /// its lines through unreconciled.
    pub const fn affects_inventory(&self) -> bool {
        matches!(self, EventType::Buy | EventType::Sell | EventType::Move)
    }

    /// Whether a receipt can be generated for events of this type.
    ///
    /// Transfers are internal movements with no counterparty, so the
    /// receipt picker only offers stock in/out events.
    pub const fn receipt_eligible(&self) -> bool {
        matches!(self, EventType::Buy | EventType::Sell)
    }

    /// The wire value, as shown on rendered receipts.
    pub const fn wire_name(&self) -> &'static str {
        match self {
            EventType::Buy => "BUY",
            EventType::Sell => "SELL",
            EventType::Move => "MOVE",
        }
    }
}

// =============================================================================
// Catalog Entities
// =============================================================================

/// A canonical item in the inventory catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier minted by the inventory service.
    pub id: String,

    /// Display name. Reconciliation matches entered names against this,
    /// case-insensitively and ignoring surrounding whitespace.
    pub name: String,

    /// Stock Keeping Unit - business identifier.
    #[serde(default)]
    pub sku: Option<String>,

    /// Barcode (EAN-13, UPC-A, etc.).
    #[serde(default)]
    pub barcode: Option<String>,

    /// Default per-unit value. Fills a line's value when the operator
    /// left it blank.
    #[serde(default)]
    pub value: Option<f64>,
}

/// A storage folder (warehouse/location).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

/// A measurement unit offered for line entry. Line units stay free text;
/// this list only feeds the entry suggestions.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Unit {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A known customer in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl Customer {
    /// Full display name, `"first last"` with a lone first name when the
    /// last name is absent.
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.trim().is_empty() => {
                format!("{} {}", self.first_name.trim(), last.trim())
            }
            _ => self.first_name.trim().to_string(),
        }
    }

    /// Freezes this customer into the free-text snapshot carried by an
    /// event. The operator can still edit the fields afterwards.
    pub fn snapshot(&self) -> CustomerSnapshot {
        CustomerSnapshot {
            name: Some(self.display_name()),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}

// =============================================================================
// Customer Snapshot
// =============================================================================

/// Free-text customer fields recorded on an event.
///
/// A snapshot, not a reference: the event keeps whatever the operator
/// typed (or prefilled from a catalog [`Customer`]) even if the catalog
/// record changes later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerSnapshot {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl CustomerSnapshot {
    /// True when no field carries a non-blank value.
    pub fn is_empty(&self) -> bool {
        fn blank(field: &Option<String>) -> bool {
            field.as_deref().map_or(true, |s| s.trim().is_empty())
        }
        blank(&self.name) && blank(&self.phone) && blank(&self.address)
    }
}

// =============================================================================
// Event Lines
// =============================================================================

/// A user-supplied draft line, before reconciliation.
///
/// `item_id` is present only when the operator picked from the catalog;
/// a free-text entry leaves it `None` and relies on name matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EnteredLine {
    #[serde(default)]
    pub item_id: Option<String>,
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// An [`EnteredLine`] after reconciliation against the catalog.
///
/// Invariant: when `item_id` is set by reconciliation, `sku`/`barcode`
/// come from the matched catalog item, and the catalog `value` is used
/// only as a default - an operator-entered value is never overwritten.
///
/// This shape is also the submission wire format for event items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReconciledLine {
    #[serde(default)]
    pub item_id: Option<String>,
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
}

impl ReconciledLine {
    /// Carries an entered line over unchanged, with no catalog data.
    pub fn passthrough(line: &EnteredLine) -> Self {
        ReconciledLine {
            item_id: line.item_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit: line.unit.clone(),
            value: line.value,
            sku: None,
            barcode: None,
        }
    }
}

// =============================================================================
// Movement Event
// =============================================================================

/// A candidate movement event, post-reconciliation, ready for validation
/// and submission.
///
/// ## Invariants (enforced by [`crate::validation`])
/// - `MOVE` carries both `origin_folder_id` and `destination_folder_id`;
///   `BUY`/`SELL` carry `folder_id`
/// - `lines` is non-empty, every line has a name and a finite, positive
///   quantity
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MovementEvent {
    #[serde(rename = "type")]
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
    pub lines: Vec<ReconciledLine>,
}

// =============================================================================
// Wire Shapes (inventory service)
// =============================================================================

/// An event as returned by the list endpoint: no line items.
///
/// `createdAt` is camelCase on the wire; the upstream API mixes casings
/// and we match it field by field.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "createdAt")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A line item of a recorded event, as returned by the detail endpoint.
///
/// `quantity` is optional here: the detail payload reflects whatever was
/// stored, and receipt composition treats a missing or non-finite
/// quantity as "amount not computable" rather than assuming zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventLine {
    pub name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

/// A fully detailed recorded event, input to the receipt compositor.
///
/// `items: None` means the detail fetch did not return line items (or
/// failed and the caller fell back to the summary); the compositor then
/// produces a partial receipt flagged "items unavailable".
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EventDetail {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "createdAt")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_address: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<EventLine>>,
}

impl EventDetail {
    /// Degrades a summary into a detail with no line items. Used when the
    /// detail fetch fails: a partial receipt is preferable to no receipt.
    pub fn from_summary(summary: &EventSummary) -> Self {
        EventDetail {
            id: summary.id.clone(),
            event_type: summary.event_type,
            description: summary.description.clone(),
            created_at: summary.created_at,
            customer_name: None,
            customer_phone: None,
            customer_address: None,
            items: None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_wire_values() {
        assert_eq!(serde_json::to_string(&EventType::Buy).unwrap(), "\"BUY\"");
        assert_eq!(serde_json::to_string(&EventType::Sell).unwrap(), "\"SELL\"");
        assert_eq!(serde_json::to_string(&EventType::Move).unwrap(), "\"MOVE\"");
        assert_eq!(EventType::Move.wire_name(), "MOVE");
    }

    #[test]
    fn test_receipt_eligibility() {
        assert!(EventType::Buy.receipt_eligible());
        assert!(EventType::Sell.receipt_eligible());
        assert!(!EventType::Move.receipt_eligible());
    }

    #[test]
    fn test_customer_display_name() {
        let customer = Customer {
            id: "c1".to_string(),
            first_name: "Sara".to_string(),
            last_name: Some("Ahmadi".to_string()),
            phone: None,
            email: None,
            address: None,
        };
        assert_eq!(customer.display_name(), "Sara Ahmadi");

        let single = Customer {
            last_name: None,
            ..customer
        };
        assert_eq!(single.display_name(), "Sara");
    }

    #[test]
    fn test_customer_snapshot_is_empty() {
        assert!(CustomerSnapshot::default().is_empty());
        assert!(CustomerSnapshot {
            name: Some("   ".to_string()),
            ..Default::default()
        }
        .is_empty());
        assert!(!CustomerSnapshot {
            phone: Some("0912".to_string()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_event_summary_created_at_is_camel_case() {
        let json = r#"{"id":"e1","type":"SELL","description":null,"createdAt":"2024-05-01T10:00:00Z"}"#;
        let summary: EventSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.event_type, EventType::Sell);
        assert!(serde_json::to_string(&summary).unwrap().contains("createdAt"));
    }

    #[test]
    fn test_detail_from_summary_has_no_items() {
        let summary = EventSummary {
            id: "e1".to_string(),
            event_type: EventType::Buy,
            description: Some("restock".to_string()),
            created_at: Utc::now(),
        };
        let detail = EventDetail::from_summary(&summary);
        assert_eq!(detail.id, "e1");
        assert!(detail.items.is_none());
        assert!(detail.customer_name.is_none());
    }
}
