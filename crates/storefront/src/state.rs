//! Storefront state shared by the interface.

use fakestore_core::{Product, ProductId, User};
use tracing::{info, instrument};

use crate::auth::{AuthError, AuthService, AuthState, Session};
use crate::cart::CartLedger;
use crate::catalog::{CatalogCache, CatalogClient, CatalogError};
use crate::error::Result;
use crate::storage::KeyValueStore;

/// The whole storefront: session, visible cart and catalog snapshot.
///
/// Interface events map one-to-one onto methods here. Every method updates
/// the in-memory state synchronously and reads or writes the store as it
/// goes; only the catalog fetches suspend.
pub struct Storefront<S> {
    store: S,
    client: CatalogClient,
    auth: AuthState,
    cart: CartLedger,
    catalog: CatalogCache,
}

impl<S: KeyValueStore> Storefront<S> {
    /// Open the storefront over `store`, restoring the last session and its cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` or `AppError::Storage` if the persisted session
    /// or cart cannot be read.
    pub fn open(store: S, client: CatalogClient) -> Result<Self> {
        let mut auth = AuthState::default();
        if let Some(session) = AuthService::new(&store).restore()? {
            info!(email = session.email(), "Session restored");
            auth.sign_in(session);
        }
        let cart = CartLedger::load(&store, auth.session())?;

        Ok(Self {
            store,
            client,
            auth,
            cart,
            catalog: CatalogCache::new(),
        })
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthState {
        &self.auth
    }

    #[must_use]
    pub const fn cart(&self) -> &CartLedger {
        &self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The active session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.auth.session()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Register `user`, log them in and load their cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` with `AuthError::DuplicateEmail` if the email
    /// is taken. The message is also recorded in [`AuthState::error`].
    pub fn register(&mut self, user: User) -> Result<()> {
        let result = AuthService::new(&self.store).register(user);
        let session = self.record(result)?;
        self.start_session(session)
    }

    /// Log in and load the user's cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` with `AuthError::UserNotFound` or
    /// `AuthError::InvalidCredentials`. The message is also recorded in
    /// [`AuthState::error`].
    pub fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let result = AuthService::new(&self.store).login(email, password);
        let session = self.record(result)?;
        self.start_session(session)
    }

    /// Log out and empty the visible cart. The stored cart is kept.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the session record cannot be removed.
    pub fn logout(&mut self) -> Result<()> {
        AuthService::new(&self.store).logout()?;
        self.auth.sign_out();
        self.cart.reset();
        Ok(())
    }

    /// Dismiss the last authentication error.
    pub fn clear_auth_error(&mut self) {
        self.auth.clear_error();
    }

    fn record(&mut self, result: std::result::Result<Session, AuthError>) -> Result<Session> {
        result.map_err(|e| {
            self.auth.fail(&e);
            e.into()
        })
    }

    fn start_session(&mut self, session: Session) -> Result<()> {
        self.auth.sign_in(session);
        self.initialize_cart()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Reload the visible cart for the active session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the stored cart cannot be read.
    pub fn initialize_cart(&mut self) -> Result<()> {
        self.cart.initialize(&self.store, self.auth.session())?;
        Ok(())
    }

    /// Add one unit of `product` to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the cart cannot be persisted.
    pub fn add_to_cart(&mut self, product: &Product) -> Result<()> {
        self.cart.add(&self.store, self.auth.session(), product)?;
        Ok(())
    }

    /// Remove the line for `product_id` from the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the cart cannot be persisted.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> Result<()> {
        self.cart.remove(&self.store, self.auth.session(), product_id)?;
        Ok(())
    }

    /// Set the quantity for `product_id`; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the cart cannot be persisted.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<()> {
        self.cart
            .update_quantity(&self.store, self.auth.session(), product_id, quantity)?;
        Ok(())
    }

    /// Empty the cart and delete its stored record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Storage` if the stored record cannot be removed.
    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear(&self.store, self.auth.session())?;
        Ok(())
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch every product into the catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the request fails; the message is also
    /// recorded in [`CatalogCache::error`].
    #[instrument(skip(self))]
    pub async fn fetch_products(&mut self) -> Result<()> {
        self.catalog.begin();
        let result = self.client.list_products().await;
        let products = self.settle(result)?;
        self.catalog.fulfill_products(products);
        Ok(())
    }

    /// Fetch the category list into the catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the request fails; the message is also
    /// recorded in [`CatalogCache::error`].
    #[instrument(skip(self))]
    pub async fn fetch_categories(&mut self) -> Result<()> {
        self.catalog.begin();
        let result = self.client.list_categories().await;
        let categories = self.settle(result)?;
        self.catalog.fulfill_categories(categories);
        Ok(())
    }

    /// Fetch one product and make it the selected product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if the request fails; the message is also
    /// recorded in [`CatalogCache::error`].
    #[instrument(skip(self))]
    pub async fn fetch_product(&mut self, id: ProductId) -> Result<()> {
        self.catalog.begin();
        let result = self.client.get_product(id).await;
        let product = self.settle(result)?;
        self.catalog.fulfill_product(product);
        Ok(())
    }

    /// Select a product without fetching it, or clear the selection.
    pub fn select_product(&mut self, product: Option<Product>) {
        self.catalog.set_selected_product(product);
    }

    fn settle<T>(&mut self, result: std::result::Result<T, CatalogError>) -> Result<T> {
        result.map_err(|e| {
            let err = crate::AppError::from(e);
            self.catalog.reject(err.user_message());
            err
        })
    }
}
