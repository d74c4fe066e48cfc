//! # Session Context
//!
//! The explicit context value every command operates on, replacing the
//! ambient globals the dashboard used to keep.
//!
//! ## Refresh Cycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  full reload                                                            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  SessionContext::load(catalog gateway, event gateway)                   │
//! │      ├── items / folders / units / customers ──► CatalogIndex           │
//! │      └── event summaries ─────────────────────► events                  │
//! │                                                                         │
//! │  The context is immutable once built; commands borrow it. The caller    │
//! │  rebuilds a fresh context on the next reload - never mutates one while  │
//! │  a reconciliation pass is in flight.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use anbargar_core::{CatalogIndex, CustomerSnapshot, EventSummary};

use crate::error::AppError;
use crate::gateway::{CatalogGateway, EventGateway};

/// One load cycle's snapshot: the catalog index plus the known events.
#[derive(Debug, Default)]
pub struct SessionContext {
    pub catalog: CatalogIndex,
    pub events: Vec<EventSummary>,
}

impl SessionContext {
    /// Loads a fresh snapshot from the inventory service.
    pub async fn load(
        catalog: &impl CatalogGateway,
        events: &impl EventGateway,
    ) -> Result<Self, AppError> {
        let items = catalog.items().await?;
        let folders = catalog.folders().await?;
        let units = catalog.units().await?;
        let customers = catalog.customers().await?;
        let summaries = events.list_events().await?;

        info!(
            items = items.len(),
            folders = folders.len(),
            customers = customers.len(),
            events = summaries.len(),
            "session context loaded"
        );

        Ok(SessionContext {
            catalog: CatalogIndex::new(items, folders, units, customers),
            events: summaries,
        })
    }

    /// Builds a context from already-loaded data (tests, previews).
    pub fn new(catalog: CatalogIndex, events: Vec<EventSummary>) -> Self {
        SessionContext { catalog, events }
    }

    /// Finds a known event summary by id.
    pub fn find_event(&self, event_id: &str) -> Option<&EventSummary> {
        self.events.iter().find(|event| event.id == event_id)
    }

    /// The events a receipt can be generated for (stock in/out only).
    pub fn receipt_candidates(&self) -> impl Iterator<Item = &EventSummary> {
        self.events
            .iter()
            .filter(|event| event.event_type.receipt_eligible())
    }

    /// Prefills an event's customer snapshot from a catalog customer, the
    /// way the form does when the operator picks one from the list.
    pub fn customer_snapshot(&self, customer_id: &str) -> Option<CustomerSnapshot> {
        self.catalog
            .customer(customer_id)
            .map(|customer| customer.snapshot())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
