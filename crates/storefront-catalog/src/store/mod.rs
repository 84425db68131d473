//! Catalog store: the state holder views observe.
//!
//! The store owns the product snapshot, the favorites view derived from it,
//! the selected-product slot and per-operation status flags. Observers read
//! them through [`StateStream`]s and change them only through store
//! operations. Every client failure ends up on an error stream; no store
//! operation returns an error or panics on a network fault.

mod status;
mod stream;

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_data::FetchError;
use tracing::{debug, info, warn};

use crate::catalog::Product;
use crate::client::CatalogClient;
use crate::error::CatalogError;
use crate::ids::ProductId;
use crate::search::{categories, ProductFilter};

pub use status::Operation;
pub use stream::StateStream;

use status::OperationStatus;
use stream::StateCell;

/// Immutable, shareable product sequence.
pub type Snapshot = Arc<[Product]>;

struct Inner<C> {
    client: C,
    products: StateCell<Snapshot>,
    favorites: StateCell<Snapshot>,
    selected: StateCell<Option<Product>>,
    list: OperationStatus,
    detail: OperationStatus,
    /// Held across a snapshot write and the favorites recompute that follows.
    snapshot_writer: Mutex<()>,
}

/// Product state holder for one screen or session.
///
/// Constructed explicitly around an injected [`CatalogClient`]; clones share
/// the same state.
pub struct CatalogStore<C> {
    inner: Arc<Inner<C>>,
}

impl<C> Clone for CatalogStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: CatalogClient> CatalogStore<C> {
    pub fn new(client: C) -> Self {
        let empty: Snapshot = Arc::from(Vec::new());
        Self {
            inner: Arc::new(Inner {
                client,
                products: StateCell::new(Arc::clone(&empty)),
                favorites: StateCell::new(empty),
                selected: StateCell::new(None),
                list: OperationStatus::new(),
                detail: OperationStatus::new(),
                snapshot_writer: Mutex::new(()),
            }),
        }
    }

    // === Operations ===

    /// Load the product list and replace the snapshot.
    ///
    /// Entries with a blank title, image, description or category are dropped,
    /// as are repeated ids. Favorite flags are reset. On failure the snapshot
    /// is left as it was and the list error is set.
    pub async fn fetch_products(&self) {
        let status = &self.inner.list;
        let _loading = status.begin();

        match self.inner.client.fetch_all_products().await {
            Ok(fetched) => {
                let received = fetched.len();
                let products = normalize(fetched);
                if products.is_empty() {
                    warn!(received, "catalog fetch produced no displayable products");
                } else {
                    info!(received, kept = products.len(), "catalog loaded");
                }
                self.replace_snapshot(Arc::from(products));
            }
            Err(err) => {
                warn!(error = %err, "catalog fetch failed");
                status.fail(describe_failure("Failed to fetch products", &err));
            }
        }
    }

    /// Fetch one product into the selected slot.
    ///
    /// Callers should try [`get_product_from_list`](Self::get_product_from_list)
    /// first; [`open_product`](Self::open_product) does that for you.
    pub async fn fetch_product_by_id(&self, id: ProductId) {
        let status = &self.inner.detail;
        let _loading = status.begin();

        match self.inner.client.fetch_product_by_id(id).await {
            Ok(product) => {
                debug!(%id, "product detail loaded");
                self.inner.selected.set(Some(product));
            }
            Err(err) => {
                warn!(%id, error = %err, "product fetch failed");
                status.fail(describe_failure(&format!("Failed to fetch product {id}"), &err));
            }
        }
    }

    /// Select a product for the detail view, using the snapshot when it
    /// already holds the id and the network otherwise.
    pub async fn open_product(&self, id: ProductId) {
        match self.get_product_from_list(id) {
            Some(product) => {
                debug!(%id, "detail served from snapshot");
                self.set_selected_product(product);
            }
            None => self.fetch_product_by_id(id).await,
        }
    }

    /// Current snapshot entry for `id`, favorite flag included.
    pub fn get_product_from_list(&self, id: ProductId) -> Option<Product> {
        self.inner
            .products
            .get()
            .iter()
            .find(|product| product.id == id)
            .cloned()
    }

    /// Overwrite the selected slot. The value is a copy: later snapshot
    /// changes to the same id do not reach it.
    pub fn set_selected_product(&self, product: Product) {
        self.inner.selected.set(Some(product));
    }

    /// Empty the selected slot.
    pub fn clear_selected_product(&self) {
        self.inner.selected.set(None);
    }

    /// Flip the favorite flag for `product.id` and return the new flag.
    ///
    /// Builds a new snapshot in which the matching entry is replaced by a copy
    /// with the flag flipped; every other entry is carried over unchanged. An
    /// id missing from the snapshot is treated as not-favorite, so the result
    /// is `true` and the snapshot content is unchanged.
    pub fn toggle_favorite(&self, product: &Product) -> bool {
        let id = product.id;
        let _writer = self.lock_snapshot();

        let current = self.inner.products.get();
        let flag = !current
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.is_favorite)
            .unwrap_or(false);
        let next: Snapshot = current
            .iter()
            .map(|p| if p.id == id { p.with_favorite(flag) } else { p.clone() })
            .collect();
        self.publish(next);

        debug!(%id, favorite = flag, "favorite toggled");
        flag
    }

    /// Like [`toggle_favorite`](Self::toggle_favorite), for callers that only
    /// hold an id. Fails if the id is not in the snapshot.
    pub fn toggle_favorite_by_id(&self, id: ProductId) -> Result<bool, CatalogError> {
        let product = self
            .get_product_from_list(id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        Ok(self.toggle_favorite(&product))
    }

    /// Dismiss the error of `operation` after it has been shown.
    pub fn clear_error(&self, operation: Operation) {
        self.status(operation).clear_error();
    }

    // === Current values ===

    pub fn products(&self) -> Snapshot {
        self.inner.products.get()
    }

    pub fn favorites(&self) -> Snapshot {
        self.inner.favorites.get()
    }

    pub fn selected_product(&self) -> Option<Product> {
        self.inner.selected.get()
    }

    pub fn is_loading(&self, operation: Operation) -> bool {
        self.status(operation).is_loading()
    }

    pub fn error(&self, operation: Operation) -> Option<String> {
        self.status(operation).error()
    }

    /// Distinct categories in snapshot order.
    pub fn categories(&self) -> Vec<String> {
        categories(&self.products())
    }

    /// Snapshot entries matching `filter`.
    pub fn search(&self, filter: &ProductFilter) -> Vec<Product> {
        filter.apply(&self.products())
    }

    /// Favorites matching `filter`.
    pub fn search_favorites(&self, filter: &ProductFilter) -> Vec<Product> {
        filter.apply(&self.favorites())
    }

    // === Streams ===

    pub fn watch_products(&self) -> StateStream<Snapshot> {
        self.inner.products.subscribe()
    }

    pub fn watch_favorites(&self) -> StateStream<Snapshot> {
        self.inner.favorites.subscribe()
    }

    pub fn watch_selected_product(&self) -> StateStream<Option<Product>> {
        self.inner.selected.subscribe()
    }

    pub fn watch_loading(&self, operation: Operation) -> StateStream<bool> {
        self.status(operation).watch_loading()
    }

    pub fn watch_error(&self, operation: Operation) -> StateStream<Option<String>> {
        self.status(operation).watch_error()
    }

    // === Internals ===

    fn status(&self, operation: Operation) -> &OperationStatus {
        match operation {
            Operation::List => &self.inner.list,
            Operation::Detail => &self.inner.detail,
        }
    }

    fn replace_snapshot(&self, snapshot: Snapshot) {
        let _writer = self.lock_snapshot();
        self.publish(snapshot);
    }

    fn lock_snapshot(&self) -> MutexGuard<'_, ()> {
        self.inner
            .snapshot_writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Write `snapshot` and the favorites view derived from it. Callers hold
    /// the snapshot writer lock.
    fn publish(&self, snapshot: Snapshot) {
        let favorites: Snapshot = snapshot.iter().filter(|p| p.is_favorite).cloned().collect();
        self.inner.products.set(snapshot);
        self.inner.favorites.set(favorites);
    }
}

/// Drop undisplayable entries and repeated ids, and clear favorite flags.
fn normalize(products: Vec<Product>) -> Vec<Product> {
    let received = products.len();
    let mut seen = HashSet::with_capacity(received);
    let mut blank = 0usize;
    let mut duplicate = 0usize;

    let kept: Vec<Product> = products
        .into_iter()
        .filter(|product| {
            if !product.is_displayable() {
                blank += 1;
                return false;
            }
            if !seen.insert(product.id) {
                duplicate += 1;
                return false;
            }
            true
        })
        .map(|product| product.with_favorite(false))
        .collect();

    if blank > 0 || duplicate > 0 {
        warn!(blank, duplicate, "discarded catalog entries");
    }
    kept
}

fn describe_failure(context: &str, err: &FetchError) -> String {
    match err {
        FetchError::Status { status, .. } => format!("{context}: HTTP {status}"),
        FetchError::Transport(cause) => format!("Network error: {cause}"),
        FetchError::Deserialization(cause) => format!("{context}: unexpected response ({cause})"),
        FetchError::InvalidUrl(cause) => format!("{context}: invalid request URL ({cause})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::{Currency, Money};

    fn product(id: i64) -> Product {
        Product::new(id, format!("Product {id}"), "tv", Money::new(1000, Currency::USD))
            .with_image(format!("/img/{id}.jpg"))
            .with_description("desc")
    }

    #[test]
    fn test_normalize_drops_blank_and_duplicates() {
        let input = vec![
            product(1),
            product(2).with_image(""),
            product(1).with_description("second copy"),
            product(3).with_favorite(true),
        ];

        let kept = normalize(input);

        let ids: Vec<i64> = kept.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(kept[0].description, "desc");
        assert!(kept.iter().all(|p| !p.is_favorite));
    }

    #[test]
    fn test_describe_failure() {
        let status = FetchError::Status {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(
            describe_failure("Failed to fetch products", &status),
            "Failed to fetch products: HTTP 500"
        );

        let transport = FetchError::Transport("connection refused".to_string());
        assert_eq!(
            describe_failure("Failed to fetch products", &transport),
            "Network error: connection refused"
        );
    }
}
