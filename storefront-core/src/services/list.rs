//! List stores - cart and favorites
//!
//! Both lists share one contract: products are unique by id, kept in
//! insertion order, and the whole list is rewritten to storage after every
//! mutation. A full rewrite per change is O(n), fine for tens of items.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::Product;
use crate::ports::KeyValueStorage;

/// Which persisted list a store manages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Cart,
    Favorites,
}

impl ListKind {
    /// Storage slot holding the JSON array
    pub fn storage_key(&self) -> &'static str {
        match self {
            ListKind::Cart => "cart",
            ListKind::Favorites => "favorites",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// De-duplicated, insertion-ordered, persisted list of product snapshots
pub struct ListStore {
    kind: ListKind,
    storage: Arc<dyn KeyValueStorage>,
    items: Vec<Product>,
}

impl ListStore {
    /// Open the store, hydrating it from storage
    pub fn open(storage: Arc<dyn KeyValueStorage>, kind: ListKind) -> Self {
        let items = hydrate(storage.as_ref(), kind);
        Self {
            kind,
            storage,
            items,
        }
    }

    pub fn cart(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::open(storage, ListKind::Cart)
    }

    pub fn favorites(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::open(storage, ListKind::Favorites)
    }

    /// Append the product unless one with the same id is already present
    ///
    /// The in-memory list changes even if persisting fails; the error only
    /// reports that storage is now behind.
    pub fn add(&mut self, product: Product) -> Result<()> {
        if self.contains(product.id) {
            return Ok(());
        }
        self.items.push(product);
        self.persist()
    }

    /// Remove the product with this id; unknown ids are ignored
    pub fn remove(&mut self, product_id: u64) -> Result<()> {
        let before = self.items.len();
        self.items.retain(|item| item.id != product_id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist()
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.items.iter().any(|item| item.id == product_id)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.persist()
    }

    /// Items in insertion order
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of item prices
    pub fn total(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Overwrite the persisted slot with the current list
    pub fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.items)?;
        self.storage.set(self.kind.storage_key(), &json)
    }
}

/// Read the persisted list; anything missing or undecodable starts empty
fn hydrate(storage: &dyn KeyValueStorage, kind: ListKind) -> Vec<Product> {
    let raw = match storage.get(kind.storage_key()) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(list = %kind, error = %e, "error loading list, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Product>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(list = %kind, error = %e, "error decoding list, starting empty");
            Vec::new()
        }
    }
}
