//! # Catalog Index
//!
//! Read-only snapshot of the canonical catalog, with the name lookup the
//! reconciliation engine needs.
//!
//! ## Snapshot Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The surrounding application loads the catalog from the inventory       │
//! │  service on each full refresh and builds ONE immutable index from it.   │
//! │                                                                         │
//! │   load items/folders/units/customers ──► CatalogIndex::new(...)         │
//! │                                              │                          │
//! │                      reconcile / validate ◄──┘ (borrow only)            │
//! │                                                                         │
//! │  The core never mutates the index; a new load cycle builds a new one.   │
//! │  No reconciliation pass ever observes a half-refreshed snapshot.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use crate::types::{CatalogItem, Customer, Folder, Unit};

/// Normalizes a name for catalog matching: surrounding whitespace is
/// ignored and matching is case-insensitive.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// =============================================================================
// Catalog Index
// =============================================================================

/// An immutable snapshot of the catalog datasets, indexed for lookup.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    items: Vec<CatalogItem>,
    folders: Vec<Folder>,
    units: Vec<Unit>,
    customers: Vec<Customer>,
    /// item id → position in `items`
    by_id: HashMap<String, usize>,
    /// normalized item name → positions in `items` (collisions kept, the
    /// reconciliation engine treats more than one as ambiguous)
    by_name: HashMap<String, Vec<usize>>,
}

impl CatalogIndex {
    /// Builds an index over one load cycle's datasets.
    pub fn new(
        items: Vec<CatalogItem>,
        folders: Vec<Folder>,
        units: Vec<Unit>,
        customers: Vec<Customer>,
    ) -> Self {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            by_id.insert(item.id.clone(), position);
            by_name
                .entry(normalize_name(&item.name))
                .or_default()
                .push(position);
        }

        CatalogIndex {
            items,
            folders,
            units,
            customers,
            by_id,
            by_name,
        }
    }

    /// Looks an item up by its canonical id.
    pub fn item(&self, id: &str) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|&position| &self.items[position])
    }

    /// All items whose normalized name equals the entered name.
    pub fn items_named(&self, name: &str) -> Vec<&CatalogItem> {
        self.by_name
            .get(&normalize_name(name))
            .map(|positions| positions.iter().map(|&p| &self.items[p]).collect())
            .unwrap_or_default()
    }

    /// Looks a customer up by id (used to prefill the event's customer
    /// snapshot).
    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, name: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            sku: None,
            barcode: None,
            value: None,
        }
    }

    fn index_of(items: Vec<CatalogItem>) -> CatalogIndex {
        CatalogIndex::new(items, Vec::new(), Vec::new(), Vec::new())
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Bolt "), "bolt");
        assert_eq!(normalize_name("BOLT"), "bolt");
    }

    #[test]
    fn test_lookup_by_id() {
        let index = index_of(vec![item("i1", "Bolt")]);
        assert_eq!(index.item("i1").unwrap().name, "Bolt");
        assert!(index.item("missing").is_none());
    }

    #[test]
    fn test_items_named_is_case_insensitive() {
        let index = index_of(vec![item("i1", "bolt")]);
        let matches = index.items_named("  BOLT ");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id, "i1");
    }

    #[test]
    fn test_items_named_keeps_collisions() {
        let index = index_of(vec![item("i1", "Bolt"), item("i2", "bolt ")]);
        assert_eq!(index.items_named("bolt").len(), 2);
    }

    #[test]
    fn test_items_named_unknown_is_empty() {
        let index = index_of(vec![item("i1", "Bolt")]);
        assert!(index.items_named("washer").is_empty());
    }
}
