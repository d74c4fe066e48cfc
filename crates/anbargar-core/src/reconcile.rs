//! # Reconciliation Engine
//!
//! Binds user-entered lines to canonical catalog items.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Line Resolution                                      │
//! │                                                                         │
//! │  EnteredLine                                                            │
//! │       │                                                                 │
//! │       ├── has explicit item_id? ──► use it, NO name search              │
//! │       │         (denormalize sku/barcode/value if the id is known)      │
//! │       │                                                                 │
//! │       └── free-text name ──► normalize, search catalog                  │
//! │                 │                                                       │
//! │                 ├── exactly 1 match ──► bind silently                   │
//! │                 │     copy sku/barcode, default value from catalog      │
//! │                 │                                                       │
//! │                 ├── 0 matches ──► unresolved (NoMatch)                  │
//! │                 │                                                       │
//! │                 └── 2+ matches ──► unresolved (Ambiguous + candidates)  │
//! │                        ambiguity NEVER silently picks an item           │
//! │                                                                         │
//! │  Unresolved lines are returned as data; for inventory-affecting         │
//! │  event types the validator turns them into a blocking violation.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pure function over its inputs: no side effects, nothing thrown.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::CatalogIndex;
use crate::types::{EnteredLine, EventType, ReconciledLine};

// =============================================================================
// Outcome Types
// =============================================================================

/// Why a line stayed unresolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// No catalog item carries this name.
    NoMatch,
    /// More than one catalog item carries this name. The candidate ids
    /// are surfaced so the operator can disambiguate instead of being
    /// forced back to a full catalog pick.
    Ambiguous { candidates: Vec<String> },
}

/// A line that could not be bound to exactly one catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UnresolvedReference {
    /// Index of the line in the entered list.
    pub line_index: usize,
    /// The entered name, as typed.
    pub name: String,
    pub reason: UnresolvedReason,
}

/// The result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReconcileOutcome {
    pub lines: Vec<ReconciledLine>,
    /// Non-empty when lines stayed unbound. Callers must treat this as a
    /// blocking failure for inventory-affecting event types.
    pub unresolved: Vec<UnresolvedReference>,
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Resolves entered lines against the catalog snapshot.
///
/// The catalog is only borrowed for lookups, never mutated. Event types
/// that do not affect tracked inventory skip name matching entirely and
/// pass their lines through unresolved-tolerant.
pub fn reconcile_lines(
    lines: &[EnteredLine],
    catalog: &CatalogIndex,
    event_type: EventType,
) -> ReconcileOutcome {
    let mut reconciled = Vec::with_capacity(lines.len());
    let mut unresolved = Vec::new();

    for (line_index, entered) in lines.iter().enumerate() {
        let mut line = ReconciledLine::passthrough(entered);

        if let Some(item_id) = &entered.item_id {
            // Explicit pick: trusted as-is. A stale id that is no longer
            // in the snapshot still counts as resolved, just without
            // denormalized catalog data.
            if let Some(item) = catalog.item(item_id) {
                bind(&mut line, item);
            }
            reconciled.push(line);
            continue;
        }

        if !event_type.affects_inventory() {
            reconciled.push(line);
            continue;
        }

        let matches = catalog.items_named(&entered.name);
        match matches.as_slice() {
            [single] => bind(&mut line, single),
            [] => unresolved.push(UnresolvedReference {
                line_index,
                name: entered.name.clone(),
                reason: UnresolvedReason::NoMatch,
            }),
            candidates => unresolved.push(UnresolvedReference {
                line_index,
                name: entered.name.clone(),
                reason: UnresolvedReason::Ambiguous {
                    candidates: candidates.iter().map(|c| c.id.clone()).collect(),
                },
            }),
        }
        reconciled.push(line);
    }

    ReconcileOutcome {
        lines: reconciled,
        unresolved,
    }
}

/// Copies catalog data onto a line. The catalog value is a default only:
/// an operator-entered value is never overwritten.
fn bind(line: &mut ReconciledLine, item: &crate::types::CatalogItem) {
    line.item_id = Some(item.id.clone());
    line.sku = item.sku.clone();
    line.barcode = item.barcode.clone();
    if line.value.is_none() {
        line.value = item.value;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CatalogItem;

    fn item(id: &str, name: &str, sku: Option<&str>, value: Option<f64>) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            sku: sku.map(str::to_string),
            barcode: sku.map(|s| format!("860{}", s)),
            value,
        }
    }

    fn entered(name: &str, quantity: f64, value: Option<f64>) -> EnteredLine {
        EnteredLine {
            item_id: None,
            name: name.to_string(),
            quantity,
            unit: None,
            value,
        }
    }

    fn catalog(items: Vec<CatalogItem>) -> CatalogIndex {
        CatalogIndex::new(items, Vec::new(), Vec::new(), Vec::new())
    }

    #[test]
    fn test_explicit_reference_skips_name_search() {
        // The entered name matches a DIFFERENT item; the explicit pick wins.
        let index = catalog(vec![
            item("i1", "Bolt", Some("B-1"), Some(12.0)),
            item("i2", "Washer", Some("W-1"), Some(3.0)),
        ]);
        let mut line = entered("Washer", 2.0, None);
        line.item_id = Some("i1".to_string());

        let outcome = reconcile_lines(&[line], &index, EventType::Sell);
        assert!(outcome.unresolved.is_empty());
        assert_eq!(outcome.lines[0].item_id.as_deref(), Some("i1"));
        assert_eq!(outcome.lines[0].sku.as_deref(), Some("B-1"));
        assert_eq!(outcome.lines[0].value, Some(12.0));
    }

    #[test]
    fn test_stale_explicit_reference_passes_through() {
        let index = catalog(vec![item("i1", "Bolt", Some("B-1"), None)]);
        let mut line = entered("Bolt", 1.0, None);
        line.item_id = Some("gone".to_string());

        let outcome = reconcile_lines(&[line], &index, EventType::Buy);
        assert!(outcome.unresolved.is_empty());
        assert_eq!(outcome.lines[0].item_id.as_deref(), Some("gone"));
        assert!(outcome.lines[0].sku.is_none());
    }

    #[test]
    fn test_single_name_match_binds_and_defaults_value() {
        // Entered "Bolt" with value 10 against catalog "bolt" valued 12:
        // binds to i1 but keeps the entered value.
        let index = catalog(vec![item("i1", "bolt", Some("B-1"), Some(12.0))]);
        let outcome = reconcile_lines(
            &[entered("Bolt", 5.0, Some(10.0))],
            &index,
            EventType::Sell,
        );

        assert!(outcome.unresolved.is_empty());
        let line = &outcome.lines[0];
        assert_eq!(line.item_id.as_deref(), Some("i1"));
        assert_eq!(line.sku.as_deref(), Some("B-1"));
        assert_eq!(line.value, Some(10.0));
    }

    #[test]
    fn test_single_match_fills_missing_value_from_catalog() {
        let index = catalog(vec![item("i1", "bolt", None, Some(12.0))]);
        let outcome = reconcile_lines(&[entered("bolt", 2.0, None)], &index, EventType::Buy);
        assert_eq!(outcome.lines[0].value, Some(12.0));
    }

    #[test]
    fn test_zero_matches_is_unresolved() {
        let index = catalog(vec![item("i1", "bolt", None, None)]);
        let outcome = reconcile_lines(&[entered("Washer", 3.0, None)], &index, EventType::Sell);

        assert_eq!(outcome.unresolved.len(), 1);
        assert_eq!(outcome.unresolved[0].name, "Washer");
        assert_eq!(outcome.unresolved[0].reason, UnresolvedReason::NoMatch);
        assert!(outcome.lines[0].item_id.is_none());
    }

    #[test]
    fn test_ambiguous_match_never_auto_binds() {
        let index = catalog(vec![
            item("i1", "Bolt", None, None),
            item("i2", " bolt", None, None),
        ]);
        let outcome = reconcile_lines(&[entered("bolt", 1.0, None)], &index, EventType::Move);

        assert!(outcome.lines[0].item_id.is_none());
        assert_eq!(outcome.unresolved.len(), 1);
        match &outcome.unresolved[0].reason {
            UnresolvedReason::Ambiguous { candidates } => {
                assert_eq!(candidates, &vec!["i1".to_string(), "i2".to_string()]);
            }
            other => panic!("expected ambiguous, got {:?}", other),
        }
    }

    #[test]
    fn test_unresolved_keeps_line_index() {
        let index = catalog(vec![item("i1", "bolt", None, None)]);
        let outcome = reconcile_lines(
            &[entered("bolt", 1.0, None), entered("Washer", 2.0, None)],
            &index,
            EventType::Sell,
        );
        assert_eq!(outcome.unresolved.len(), 1);
        assert_eq!(outcome.unresolved[0].line_index, 1);
    }
}
