use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use goals_core::model::StudentId;
use goals_core::query::QueryKey;
use tokio::sync::OnceCell;
use tracing::debug;

/// Keyed cache of remote reads.
///
/// Each key owns a `OnceCell`: concurrent fetches of the same key run the
/// loader once and share its value. Failed loads leave the cell empty.
/// Invalidation swaps the cell out, so a load still in flight for the old
/// cell never becomes visible to later reads.
pub struct QueryCache<V> {
    entries: Mutex<HashMap<QueryKey, Arc<OnceCell<V>>>>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V: Clone> QueryCache<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, loading it if absent.
    ///
    /// # Errors
    ///
    /// Returns the loader's error. Errors are not cached.
    pub async fn fetch<F, Fut, E>(&self, key: QueryKey, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        let cell = self.cell(key);
        if let Some(value) = cell.get() {
            debug!(%key, "query cache hit");
            return Ok(value.clone());
        }
        debug!(%key, "query cache miss");
        let value = cell.get_or_try_init(load).await?;
        Ok(value.clone())
    }

    /// Whether a loaded value is cached for `key`.
    #[must_use]
    pub fn contains(&self, key: QueryKey) -> bool {
        self.lock()
            .get(&key)
            .is_some_and(|cell| cell.initialized())
    }

    /// Drop the entry for `key`; the next fetch reloads.
    pub fn invalidate(&self, key: QueryKey) {
        if self.lock().remove(&key).is_some() {
            debug!(%key, "query invalidated");
        }
    }

    /// Drop every entry belonging to `student`.
    pub fn invalidate_student(&self, student: StudentId) {
        self.lock().retain(|key, _| key.student() != student);
    }

    fn cell(&self, key: QueryKey) -> Arc<OnceCell<V>> {
        Arc::clone(self.lock().entry(key).or_default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<QueryKey, Arc<OnceCell<V>>>> {
        // Entries hold no invariants a panicking holder could break.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    fn key() -> QueryKey {
        QueryKey::today_progress(StudentId::new(1))
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let cache = QueryCache::<u64>::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        for _ in 0..2 {
            let value = cache
                .fetch(key(), move || async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(7)
                })
                .await
                .unwrap();
            assert_eq!(value, 7);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains(key()));
    }

    #[tokio::test]
    async fn concurrent_fetches_share_one_load() {
        let cache = QueryCache::<u64>::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let load = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, ()>(3)
        };

        let (a, b) = tokio::join!(cache.fetch(key(), load), cache.fetch(key(), load));
        assert_eq!((a, b), (Ok(3), Ok(3)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let cache = QueryCache::<u64>::new();
        let failed = cache.fetch(key(), || async { Err::<u64, _>("down") }).await;
        assert_eq!(failed, Err("down"));
        assert!(!cache.contains(key()));

        let value = cache.fetch(key(), || async { Ok::<_, &str>(5) }).await;
        assert_eq!(value, Ok(5));
    }

    #[tokio::test]
    async fn invalidate_forces_reload() {
        let cache = QueryCache::<u64>::new();
        cache.fetch(key(), || async { Ok::<_, ()>(1) }).await.unwrap();
        cache.invalidate(key());
        assert!(!cache.contains(key()));

        let value = cache.fetch(key(), || async { Ok::<_, ()>(2) }).await;
        assert_eq!(value, Ok(2));
    }

    #[tokio::test]
    async fn invalidate_student_leaves_other_students_cached() {
        let cache = QueryCache::<u64>::new();
        let other = QueryKey::today_progress(StudentId::new(2));
        cache.fetch(key(), || async { Ok::<_, ()>(1) }).await.unwrap();
        cache.fetch(other, || async { Ok::<_, ()>(1) }).await.unwrap();

        cache.invalidate_student(StudentId::new(1));
        assert!(!cache.contains(key()));
        assert!(cache.contains(other));
    }
}
