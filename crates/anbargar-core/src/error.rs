//! # Violations
//!
//! The structural rules a movement event can break, as data.
//!
//! ## Design Principles
//! 1. Violations are returned, never thrown - validation collects every
//!    broken rule so the operator sees one complete report
//! 2. Use `thiserror` for the operator-facing messages
//! 3. Violations are enum variants carrying context, never bare strings

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Violation
// =============================================================================

/// A single broken validation rule.
///
/// Produced by [`crate::validation::validate_event`], which evaluates all
/// rules and returns every violation together (not fail-fast).
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// Folder topology is incomplete for the event type: `MOVE` needs
    /// both an origin and a destination folder, every other type needs
    /// a single folder.
    #[error("select the folders for this event: a transfer needs an origin and a destination, stock in/out needs one folder")]
    MissingFolderSelection,

    /// The event has no line items at all.
    #[error("an event needs at least one line item")]
    NoLineItems,

    /// A line is structurally unusable: blank name, or a quantity that
    /// is not a finite positive number.
    #[error("line {index}: a name and a positive quantity are required")]
    InvalidLineItem { index: usize },

    /// Lines could not be bound to catalog items (no match, or more than
    /// one match). Blocks submission of inventory-affecting events.
    #[error("these lines could not be matched to a catalog item: {}", .names.join(", "))]
    UnresolvedCatalogReference { names: Vec<String> },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        let violation = Violation::InvalidLineItem { index: 2 };
        assert_eq!(
            violation.to_string(),
            "line 2: a name and a positive quantity are required"
        );

        let violation = Violation::UnresolvedCatalogReference {
            names: vec!["Washer".to_string(), "Bolt".to_string()],
        };
        assert_eq!(
            violation.to_string(),
            "these lines could not be matched to a catalog item: Washer, Bolt"
        );
    }

    #[test]
    fn test_violation_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Violation::NoLineItems).unwrap();
        assert!(json.contains("\"kind\":\"no_line_items\""));
    }
}
