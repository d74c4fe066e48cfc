//! # Event Validation
//!
//! Structural rules for a candidate movement event, post-reconciliation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Rules, evaluated in order                              │
//! │                                                                         │
//! │  1. Folder topology      MOVE: origin + destination                     │
//! │                          BUY/SELL: single folder                        │
//! │         │                → MissingFolderSelection                       │
//! │         ▼                                                               │
//! │  2. Non-empty line set   → NoLineItems                                  │
//! │         ▼                                                               │
//! │  3. Per-line validity    finite positive quantity, non-blank name       │
//! │                          → InvalidLineItem(index)                       │
//! │         ▼                                                               │
//! │  4. Unresolved check     inventory-affecting types only                 │
//! │                          → UnresolvedCatalogReference(names)            │
//! │                                                                         │
//! │  ALL rules run; every violation is collected and returned together      │
//! │  so the operator gets one complete report, never a drip-feed.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::Violation;
use crate::reconcile::UnresolvedReference;
use crate::types::{EventType, MovementEvent};

/// Accepts the event or returns every violated rule. Never partially
/// accepts, never throws.
pub fn validate_event(
    event: &MovementEvent,
    unresolved: &[UnresolvedReference],
) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    // 1. Folder topology
    let folders_ok = match event.event_type {
        EventType::Move => {
            present(&event.origin_folder_id) && present(&event.destination_folder_id)
        }
        _ => present(&event.folder_id),
    };
    if !folders_ok {
        violations.push(Violation::MissingFolderSelection);
    }

    // 2. Non-empty line set
    if event.lines.is_empty() {
        violations.push(Violation::NoLineItems);
    }

    // 3. Per-line validity
    for (index, line) in event.lines.iter().enumerate() {
        let quantity_ok = line.quantity.is_finite() && line.quantity > 0.0;
        let name_ok = !line.name.trim().is_empty();
        if !quantity_ok || !name_ok {
            violations.push(Violation::InvalidLineItem { index });
        }
    }

    // 4. Unresolved references block inventory-affecting submissions
    if event.event_type.affects_inventory() && !unresolved.is_empty() {
        violations.push(Violation::UnresolvedCatalogReference {
            names: unresolved.iter().map(|u| u.name.clone()).collect(),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// A folder selection counts only when it is a non-blank id. The form
/// layer sends empty strings for unselected dropdowns.
fn present(id: &Option<String>) -> bool {
    id.as_deref().map_or(false, |s| !s.trim().is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================
