//! Property-Based Tests for the product repository
//!
//! Runs the repository against the in-memory connectors with arbitrary
//! products and checks the read-after-write guarantees.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::{product_key, Cache, MemoryCache};
use crate::models::{NewProduct, Product};
use crate::repository::ProductRepository;
use crate::store::{MemoryProductStore, ProductStore};

// == Strategies ==
fn new_product_strategy() -> impl Strategy<Value = NewProduct> {
    ("[a-zA-Z0-9 ]{1,40}", 0u32..1_000_000, "[a-zA-Z0-9 .,]{0,80}").prop_map(
        |(name, cents, description)| NewProduct::new(name, f64::from(cents) / 100.0, description),
    )
}

fn repository() -> (ProductRepository, MemoryProductStore, MemoryCache) {
    let store = MemoryProductStore::new();
    let cache = MemoryCache::new();
    let repo = ProductRepository::new(Arc::new(store.clone()), Arc::new(cache.clone()));
    (repo, store, cache)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Creating a product and reading it back yields the same fields plus an
    // assigned id.
    #[test]
    fn prop_create_then_get(product in new_product_strategy()) {
        let (repo, _, _) = repository();

        let (created, fetched) = tokio_test::block_on(async {
            let created = repo.create(product.clone()).await.unwrap();
            let fetched = repo.get_by_id(created.id).await.unwrap();
            (created, fetched)
        });

        prop_assert!(created.id > 0);
        prop_assert_eq!(&created, &Product::with_id(created.id, product));
        prop_assert_eq!(fetched, Some(created));
    }

    // Delete removes the row and the cached copy; a second delete is a no-op.
    #[test]
    fn prop_delete_then_get(products in prop::collection::vec(new_product_strategy(), 1..8), pick in any::<prop::sample::Index>()) {
        let (repo, _, cache) = repository();

        let (first, second, after, cached) = tokio_test::block_on(async {
            let mut ids = Vec::new();
            for p in products {
                ids.push(repo.create(p).await.unwrap().id);
            }
            let id = ids[pick.index(ids.len())];
            let first = repo.delete(id).await.unwrap();
            let second = repo.delete(id).await.unwrap();
            let after = repo.get_by_id(id).await.unwrap();
            let cached = cache.get(&product_key(id)).await.unwrap();
            (first, second, after, cached)
        });

        prop_assert_eq!(first, 1);
        prop_assert_eq!(second, 0);
        prop_assert_eq!(after, None);
        prop_assert_eq!(cached, None);
    }

    // Whatever the cache held for an id, a get right after an update shows
    // the updated fields.
    #[test]
    fn prop_update_is_read_after_write(
        original in new_product_strategy(),
        stale in new_product_strategy(),
        changes in new_product_strategy(),
    ) {
        let (repo, store, cache) = repository();

        let fetched = tokio_test::block_on(async {
            let id = store.insert(&original).await.unwrap();
            let stale = Product::with_id(id, stale);
            cache
                .set(&product_key(id), serde_json::to_string(&stale).unwrap(), None)
                .await
                .unwrap();
            repo.update(id, changes.clone()).await.unwrap();
            repo.get_by_id(id).await.unwrap().map(|p| (id, p))
        });

        let (id, product) = fetched.expect("updated product should exist");
        prop_assert_eq!(product, Product::with_id(id, changes));
    }

    // Updating an id that was never created reports not-found and leaves the
    // table empty.
    #[test]
    fn prop_update_missing(id in 1i64..10_000, changes in new_product_strategy()) {
        let (repo, store, _) = repository();

        let (result, rows) = tokio_test::block_on(async {
            let result = repo.update(id, changes).await.unwrap();
            (result, store.fetch_all().await.unwrap())
        });

        prop_assert_eq!(result, None);
        prop_assert!(rows.is_empty());
    }

    // Two listings with no write in between are identical.
    #[test]
    fn prop_list_all_is_stable(products in prop::collection::vec(new_product_strategy(), 0..10)) {
        let (repo, _, _) = repository();

        let (first, second) = tokio_test::block_on(async {
            for p in products {
                repo.create(p).await.unwrap();
            }
            (repo.list_all().await.unwrap(), repo.list_all().await.unwrap())
        });

        prop_assert_eq!(first, second);
    }
}
