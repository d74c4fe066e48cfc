//! # Inventory Service Gateways
//!
//! Port traits for the services owned by the surrounding CRUD layer. The
//! command handlers only ever talk to these traits; tests plug in
//! in-memory fakes, the production shell plugs in its HTTP client.
//!
//! ## Wire Shapes
//! The submission payload mirrors the inventory service's event endpoint:
//! snake_case fields, the event type under `type`, the customer snapshot
//! flattened into `customer_*` fields, and line items under `items`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use anbargar_core::{
    CatalogItem, Customer, EventDetail, EventSummary, EventType, Folder, MovementEvent,
    ReconciledLine, Unit,
};

// =============================================================================
// Gateway Errors
// =============================================================================

/// Failures of the consumed inventory service.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The service rejected the request and returned its human-readable
    /// detail message (shown to the operator verbatim).
    #[error("{detail}")]
    Rejected { detail: String },

    /// The service could not be reached or answered garbage.
    #[error("could not reach the inventory service: {0}")]
    Unavailable(String),
}

/// Convenience type alias for Results with GatewayError.
pub type GatewayResult<T> = Result<T, GatewayError>;

// =============================================================================
// Submission Payload
// =============================================================================

/// The event-creation payload, exactly as the service expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSubmission {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub description: Option<String>,
    pub folder_id: Option<String>,
    pub origin_folder_id: Option<String>,
    pub destination_folder_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub items: Vec<ReconciledLine>,
}

impl From<MovementEvent> for EventSubmission {
    fn from(event: MovementEvent) -> Self {
        EventSubmission {
            event_type: event.event_type,
            description: event.description,
            folder_id: event.folder_id,
            origin_folder_id: event.origin_folder_id,
            destination_folder_id: event.destination_folder_id,
            customer_name: event.customer.name,
            customer_phone: event.customer.phone,
            customer_address: event.customer.address,
            items: event.lines,
        }
    }
}

// =============================================================================
// Gateway Traits
// =============================================================================

/// Catalog queries: the datasets one load cycle snapshots into a
/// [`anbargar_core::CatalogIndex`].
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn items(&self) -> GatewayResult<Vec<CatalogItem>>;
    async fn folders(&self) -> GatewayResult<Vec<Folder>>;
    async fn units(&self) -> GatewayResult<Vec<Unit>>;
    async fn customers(&self) -> GatewayResult<Vec<Customer>>;
}

/// Event submission and retrieval.
#[async_trait]
pub trait EventGateway: Send + Sync {
    /// Creates an event; returns the created summary or the service's
    /// structured rejection.
    async fn submit_event(&self, submission: &EventSubmission) -> GatewayResult<EventSummary>;

    /// Lists event summaries (no line items).
    async fn list_events(&self) -> GatewayResult<Vec<EventSummary>>;

    /// Fetches one event with its resolved line items. Used because the
    /// list endpoint omits line detail.
    async fn event_detail(&self, event_id: &str) -> GatewayResult<EventDetail>;
}

// =============================================================================
// Unit Tests
// =============================================================================
