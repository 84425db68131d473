//! Store behaviour driven through a scripted in-memory client.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use storefront_catalog::prelude::*;
use storefront_data::FetchError;
use tokio::sync::Notify;

#[derive(Default)]
struct ScriptedClient {
    lists: Mutex<VecDeque<Result<Vec<Product>, FetchError>>>,
    details: Mutex<HashMap<ProductId, Result<Product, FetchError>>>,
    gate: Option<Arc<Notify>>,
    list_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl ScriptedClient {
    fn new() -> Self {
        Self::default()
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    fn then_list(self, result: Result<Vec<Product>, FetchError>) -> Self {
        self.lists.lock().unwrap().push_back(result);
        self
    }

    fn with_detail(self, id: i64, result: Result<Product, FetchError>) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(ProductId::new(id), result);
        self
    }
}

#[async_trait]
impl CatalogClient for ScriptedClient {
    async fn fetch_all_products(&self) -> Result<Vec<Product>, FetchError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn fetch_product_by_id(&self, id: ProductId) -> Result<Product, FetchError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_else(|| {
                Err(FetchError::Status {
                    status: 404,
                    message: "Not Found".to_string(),
                })
            })
    }
}

fn product(id: i64) -> Product {
    Product::new(id, format!("Product {id}"), "tv", Money::new(10_000, Currency::USD))
        .with_image(format!("/img/{id}.jpg"))
        .with_description(format!("Description {id}"))
}

fn server_error() -> FetchError {
    FetchError::Status {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

fn ids(products: &[Product]) -> Vec<i64> {
    products.iter().map(|p| p.id.get()).collect()
}

fn favorite_flags(store: &CatalogStore<Arc<ScriptedClient>>) -> Vec<(i64, bool)> {
    store
        .products()
        .iter()
        .map(|p| (p.id.get(), p.is_favorite))
        .collect()
}

fn assert_favorites_consistent(store: &CatalogStore<Arc<ScriptedClient>>) {
    let expected: Vec<Product> = store
        .products()
        .iter()
        .filter(|p| p.is_favorite)
        .cloned()
        .collect();
    assert_eq!(store.favorites().to_vec(), expected);
}

async fn loaded_store(products: Vec<Product>) -> (CatalogStore<Arc<ScriptedClient>>, Arc<ScriptedClient>) {
    let client = Arc::new(ScriptedClient::new().then_list(Ok(products)));
    let store = CatalogStore::new(Arc::clone(&client));
    store.fetch_products().await;
    (store, client)
}

// === fetch_products ===

#[tokio::test]
async fn fetch_discards_entries_with_blank_fields() {
    let mut blank_category = product(5);
    blank_category.category = "  ".to_string();

    let (store, _) = loaded_store(vec![
        product(1),
        product(2).with_image(""),
        product(3),
        product(4).with_description("   "),
        blank_category,
        Product::new(6, "", "tv", Money::new(1, Currency::USD))
            .with_image("/x.jpg")
            .with_description("d"),
    ])
    .await;

    assert_eq!(ids(&store.products()), vec![1, 3]);
    assert_eq!(store.get_product_from_list(ProductId::new(3)), Some(product(3)));
    assert_eq!(store.error(Operation::List), None);
}

#[tokio::test]
async fn fetch_resets_favorites() {
    let client = Arc::new(
        ScriptedClient::new()
            .then_list(Ok(vec![product(1), product(2)]))
            .then_list(Ok(vec![product(1).with_favorite(true), product(2)])),
    );
    let store = CatalogStore::new(Arc::clone(&client));

    store.fetch_products().await;
    store.toggle_favorite(&product(1));
    store.toggle_favorite(&product(2));
    assert_eq!(store.favorites().len(), 2);

    store.fetch_products().await;

    assert_eq!(favorite_flags(&store), vec![(1, false), (2, false)]);
    assert!(store.favorites().is_empty());
}

#[tokio::test]
async fn fetch_empty_result_is_not_an_error() {
    let (store, _) = loaded_store(vec![product(1).with_image("")]).await;

    assert!(store.products().is_empty());
    assert_eq!(store.error(Operation::List), None);
    assert!(!store.is_loading(Operation::List));
}

#[tokio::test]
async fn fetch_http_500_keeps_snapshot_and_sets_error() {
    let client = Arc::new(
        ScriptedClient::new()
            .then_list(Ok(vec![product(1), product(2)]))
            .then_list(Err(server_error())),
    );
    let store = CatalogStore::new(Arc::clone(&client));
    store.fetch_products().await;
    store.toggle_favorite(&product(2));
    let before = store.products();

    store.fetch_products().await;

    let error = store.error(Operation::List).expect("list error set");
    assert!(error.contains("500"), "unexpected message: {error}");
    assert!(!store.is_loading(Operation::List));
    assert_eq!(store.products(), before);
    assert_eq!(ids(&store.favorites()), vec![2]);
}

#[tokio::test]
async fn fetch_transport_failure_message_embeds_cause() {
    let client = Arc::new(
        ScriptedClient::new().then_list(Err(FetchError::Transport("dns error".to_string()))),
    );
    let store = CatalogStore::new(client);

    store.fetch_products().await;

    assert_eq!(
        store.error(Operation::List).as_deref(),
        Some("Network error: dns error")
    );
}

#[tokio::test]
async fn loading_flag_rises_and_falls_around_fetch() {
    let gate = Arc::new(Notify::new());
    let client = Arc::new(ScriptedClient::gated(Arc::clone(&gate)).then_list(Err(server_error())));
    let store = CatalogStore::new(client);
    let mut loading = store.watch_loading(Operation::List);
    assert_eq!(loading.next().await, Some(false));

    let task = tokio::spawn({
        let store = store.clone();
        async move { store.fetch_products().await }
    });

    assert_eq!(loading.wait_for(|l| *l).await, Some(true));
    assert!(!store.is_loading(Operation::Detail));

    gate.notify_one();
    task.await.unwrap();

    assert_eq!(loading.wait_for(|l| !*l).await, Some(false));
    assert!(store.error(Operation::List).is_some());
}

#[tokio::test]
async fn fetch_clears_previous_error_at_start() {
    let client = Arc::new(
        ScriptedClient::new()
            .then_list(Err(server_error()))
            .then_list(Ok(vec![product(1)])),
    );
    let store = CatalogStore::new(client);

    store.fetch_products().await;
    assert!(store.error(Operation::List).is_some());

    store.fetch_products().await;
    assert_eq!(store.error(Operation::List), None);
    assert_eq!(ids(&store.products()), vec![1]);
}

// === toggle_favorite ===

#[tokio::test]
async fn toggle_marks_only_matching_entry() {
    let (store, _) = loaded_store(vec![product(1), product(2)]).await;

    let flag = store.toggle_favorite(&product(1));

    assert!(flag);
    assert_eq!(favorite_flags(&store), vec![(1, true), (2, false)]);
    assert_eq!(ids(&store.favorites()), vec![1]);
    assert_favorites_consistent(&store);
}

#[tokio::test]
async fn toggle_twice_restores_snapshot() {
    let (store, _) = loaded_store(vec![product(1), product(2), product(3)]).await;
    store.toggle_favorite(&product(3));
    let before = store.products();

    store.toggle_favorite(&product(2));
    assert_favorites_consistent(&store);
    store.toggle_favorite(&product(2));

    assert_eq!(store.products(), before);
    assert_eq!(ids(&store.favorites()), vec![3]);
    assert_favorites_consistent(&store);
}

#[tokio::test]
async fn toggle_uses_snapshot_flag_not_argument_flag() {
    let (store, _) = loaded_store(vec![product(1)]).await;

    // A stale copy claiming to be a favorite still flips the snapshot's flag.
    assert!(store.toggle_favorite(&product(1).with_favorite(true)));
    assert!(!store.toggle_favorite(&product(1)));
}

#[tokio::test]
async fn toggle_does_not_mutate_previous_snapshot() {
    let (store, _) = loaded_store(vec![product(1), product(2)]).await;
    let held = store.products();

    store.toggle_favorite(&product(1));

    assert!(!held[0].is_favorite);
    assert!(store.products()[0].is_favorite);
}

#[tokio::test]
async fn concurrent_toggles_keep_favorites_in_sync() {
    let (store, _) = loaded_store((1..=8).map(product).collect()).await;

    for _ in 0..500 {
        std::thread::scope(|scope| {
            for id in 1..=8 {
                let store = store.clone();
                scope.spawn(move || {
                    store.toggle_favorite(&product(id));
                });
            }
        });
        assert_favorites_consistent(&store);
    }

    // Each id was toggled an even number of times.
    assert!(store.favorites().is_empty());
}

#[tokio::test]
async fn toggle_unknown_id_leaves_snapshot_alone() {
    let (store, _) = loaded_store(vec![product(1)]).await;
    let before = store.products();

    assert!(store.toggle_favorite(&product(99)));

    assert_eq!(store.products(), before);
    assert!(store.favorites().is_empty());
    assert_eq!(
        store.toggle_favorite_by_id(ProductId::new(99)),
        Err(CatalogError::ProductNotFound(ProductId::new(99)))
    );
    assert_eq!(store.toggle_favorite_by_id(ProductId::new(1)), Ok(true));
}

// === detail ===

#[tokio::test]
async fn get_product_from_list_reflects_current_flag() {
    let (store, _) = loaded_store(vec![product(1), product(2)]).await;

    assert_eq!(store.get_product_from_list(ProductId::new(7)), None);

    store.toggle_favorite(&product(2));
    let found = store.get_product_from_list(ProductId::new(2)).unwrap();
    assert!(found.is_favorite);
    assert_eq!(found, product(2).with_favorite(true));
}

#[tokio::test]
async fn open_product_in_snapshot_skips_network() {
    let (store, client) = loaded_store(vec![product(1), product(2)]).await;

    store.open_product(ProductId::new(2)).await;

    assert_eq!(client.detail_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store.selected_product(), Some(product(2)));
    assert!(!store.is_loading(Operation::Detail));
}

#[tokio::test]
async fn open_product_missing_from_snapshot_fetches_it() {
    let client = Arc::new(
        ScriptedClient::new()
            .then_list(Ok(vec![product(1)]))
            .with_detail(42, Ok(product(42))),
    );
    let store = CatalogStore::new(Arc::clone(&client));
    store.fetch_products().await;

    store.open_product(ProductId::new(42)).await;

    assert_eq!(client.detail_calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.selected_product(), Some(product(42)));
    assert_eq!(store.error(Operation::Detail), None);
}

#[tokio::test]
async fn detail_failure_is_scoped_to_detail() {
    let (store, _) = loaded_store(vec![product(1)]).await;

    store.fetch_product_by_id(ProductId::new(404)).await;

    let error = store.error(Operation::Detail).expect("detail error set");
    assert!(error.contains("404"), "unexpected message: {error}");
    assert_eq!(store.error(Operation::List), None);
    assert_eq!(store.selected_product(), None);
    assert!(!store.is_loading(Operation::Detail));

    store.clear_error(Operation::Detail);
    assert_eq!(store.error(Operation::Detail), None);
}

#[tokio::test]
async fn selection_is_not_live_bound_to_snapshot() {
    let (store, _) = loaded_store(vec![product(1)]).await;
    let mut selected = store.watch_selected_product();
    assert_eq!(selected.next().await, Some(None));

    store.open_product(ProductId::new(1)).await;
    let shown = selected.next().await.flatten().unwrap();
    assert_eq!(shown.id, ProductId::new(1));

    store.toggle_favorite(&product(1));

    assert!(!store.selected_product().unwrap().is_favorite);
    assert!(store.get_product_from_list(ProductId::new(1)).unwrap().is_favorite);

    store.clear_selected_product();
    assert_eq!(store.selected_product(), None);
}

// === observation ===

#[tokio::test]
async fn late_subscriber_gets_latest_not_backlog() {
    let (store, _) = loaded_store(vec![product(1), product(2)]).await;
    store.toggle_favorite(&product(1));
    store.toggle_favorite(&product(2));

    let mut favorites = store.watch_favorites();
    let first = favorites.next().await.unwrap();
    assert_eq!(ids(&first), vec![1, 2]);

    store.toggle_favorite(&product(1));
    let second = favorites.next().await.unwrap();
    assert_eq!(ids(&second), vec![2]);
}

#[tokio::test]
async fn multiple_observers_see_same_state() {
    let (store, _) = loaded_store(vec![product(1)]).await;
    let mut a = store.watch_products();
    let mut b = store.watch_products();
    a.next().await;
    b.next().await;

    store.toggle_favorite(&product(1));

    assert!(a.next().await.unwrap()[0].is_favorite);
    assert!(b.next().await.unwrap()[0].is_favorite);
}

#[tokio::test]
async fn updates_after_observers_are_gone_do_not_fail() {
    let client = Arc::new(ScriptedClient::new().then_list(Err(server_error())));
    let store = CatalogStore::new(client);
    drop(store.watch_products());
    drop(store.watch_error(Operation::List));

    store.fetch_products().await;
    store.toggle_favorite(&product(1));
    store.clear_error(Operation::List);

    assert_eq!(store.error(Operation::List), None);
}

#[tokio::test]
async fn error_stream_replays_until_cleared() {
    let client = Arc::new(ScriptedClient::new().then_list(Err(server_error())));
    let store = CatalogStore::new(client);
    store.fetch_products().await;

    let mut errors = store.watch_error(Operation::List);
    assert!(errors.next().await.unwrap().is_some());

    store.clear_error(Operation::List);
    assert_eq!(errors.next().await, Some(None));
    assert_eq!(store.watch_error(Operation::List).current(), None);
}

// === search ===

#[tokio::test]
async fn search_and_categories_read_current_snapshot() {
    let mut speaker = product(2).with_brand("JBL");
    speaker.category = "audio".to_string();
    let (store, _) = loaded_store(vec![product(1), speaker, product(3)]).await;
    store.toggle_favorite(&product(3));

    assert_eq!(store.categories(), vec!["tv", "audio"]);
    assert_eq!(ids(&store.search(&ProductFilter::new().text("jbl"))), vec![2]);
    assert_eq!(ids(&store.search(&ProductFilter::new().category("TV"))), vec![1, 3]);
    assert_eq!(
        ids(&store.search_favorites(&ProductFilter::new().text("product 3"))),
        vec![3]
    );
}
