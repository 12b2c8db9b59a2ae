//! Per-user cart ledger.
//!
//! A cart is an ordered list of [`CartItem`]s, unique by product ID, owned by
//! one user and persisted under [`keys::cart`] for that user's email. Every
//! mutation recomputes the total from the lines and writes the cart back.
//!
//! The owner is always passed in as `Option<&Session>`. With no session the
//! cart is anonymous: mutations still apply in memory, but nothing is read
//! from or written to the store.

use fakestore_core::{CartItem, Price, Product, ProductId};
use tracing::debug;

use crate::auth::Session;
use crate::storage::{KeyValueStore, StorageError, keys, read_json, write_json};

/// The visible cart and its derived total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartLedger {
    items: Vec<CartItem>,
    total: Price,
}

impl CartLedger {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cart persisted for `session`; empty when there is no session.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored cart cannot be read.
    pub fn load<S>(store: &S, session: Option<&Session>) -> Result<Self, StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        let mut cart = Self::new();
        cart.initialize(store, session)?;
        Ok(cart)
    }

    /// Replace the in-memory cart with the one persisted for `session`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the stored cart cannot be read.
    pub fn initialize<S>(&mut self, store: &S, session: Option<&Session>) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        let stored: Vec<CartItem> = match session {
            Some(session) => read_json(store, &keys::cart(session.email()))?.unwrap_or_default(),
            None => Vec::new(),
        };
        self.items = normalize(stored);
        self.recompute();
        Ok(())
    }

    /// Add one unit of `product`, inserting a new line if it is not in the cart.
    ///
    /// Quantities saturate at `u32::MAX`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn add<S>(
        &mut self,
        store: &S,
        session: Option<&Session>,
        product: &Product,
    ) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem::from_product(product)),
        }
        self.commit(store, session)
    }

    /// Drop the line for `product_id`, if present.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn remove<S>(
        &mut self,
        store: &S,
        session: Option<&Session>,
        product_id: ProductId,
    ) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        self.items.retain(|i| i.product_id != product_id);
        self.commit(store, session)
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// Negative quantities are clamped to zero, and a zero quantity removes
    /// the line. An unknown `product_id` leaves the lines unchanged.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be persisted.
    pub fn update_quantity<S>(
        &mut self,
        store: &S,
        session: Option<&Session>,
        product_id: ProductId,
        quantity: i64,
    ) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);

        if quantity == 0 {
            self.items.retain(|i| i.product_id != product_id);
        } else if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
        self.commit(store, session)
    }

    /// Empty the cart and delete the persisted record for `session`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the persisted record cannot be removed.
    pub fn clear<S>(&mut self, store: &S, session: Option<&Session>) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        self.reset();
        if let Some(session) = session {
            store.remove(&keys::cart(session.email()))?;
            debug!(owner = session.email(), "Cart cleared");
        }
        Ok(())
    }

    /// Empty the in-memory cart without touching the store.
    pub fn reset(&mut self) {
        self.items.clear();
        self.total = Price::ZERO;
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// The line for `product_id`.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.total
    }

    /// Number of distinct products.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
    }

    fn commit<S>(&mut self, store: &S, session: Option<&Session>) -> Result<(), StorageError>
    where
        S: KeyValueStore + ?Sized,
    {
        self.recompute();

        let Some(session) = session else {
            return Ok(());
        };
        write_json(store, &keys::cart(session.email()), &self.items)?;
        debug!(
            owner = session.email(),
            lines = self.items.len(),
            total = %self.total,
            "Cart saved"
        );
        Ok(())
    }
}

/// Drop zero-quantity lines and merge lines sharing a product ID.
///
/// The first line for a product keeps its position and snapshot.
fn normalize(stored: Vec<CartItem>) -> Vec<CartItem> {
    let mut items: Vec<CartItem> = Vec::with_capacity(stored.len());
    for line in stored.into_iter().filter(|i| i.quantity > 0) {
        match items.iter_mut().find(|i| i.product_id == line.product_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(line.quantity),
            None => items.push(line),
        }
    }
    items
}


// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------
