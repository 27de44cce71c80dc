//! Discount Engine
//!
//! Resolves a discount group by name (or legacy account type), applies its
//! percentage to a subtotal and keeps the group list cached between calls.
//! Lookup failures never reach the caller: a failed fetch serves the static
//! fallback table, an unknown group prices at 0 %.

use shared::models::{
    DiscountCalculation, DiscountGroup, DiscountResolution, group_name_for_account_type,
};
use std::sync::Arc;
use std::time::Duration;

use super::cache::{DEFAULT_CACHE_TTL, DiscountGroupCache};
use super::calculator::{apply_group_discount, sanitize_price};
use super::clock::{Clock, SystemClock};
use super::fallback::fallback_discount_groups;
use super::source::DiscountGroupSource;

/// Where a group list was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrigin {
    /// Fresh cache entry
    Cache,
    /// Fetched from the store on this call
    Live,
    /// Store failed, static table served
    Fallback,
}

impl GroupOrigin {
    pub fn resolution(&self) -> DiscountResolution {
        match self {
            GroupOrigin::Cache | GroupOrigin::Live => DiscountResolution::Live,
            GroupOrigin::Fallback => DiscountResolution::Fallback,
        }
    }
}

/// A group list tagged with its origin
#[derive(Debug, Clone)]
pub struct LoadedGroups {
    pub groups: Arc<Vec<DiscountGroup>>,
    pub origin: GroupOrigin,
}

impl LoadedGroups {
    /// First group whose name matches case-insensitively
    pub fn find(&self, name: &str) -> Option<&DiscountGroup> {
        self.groups.iter().find(|g| g.name_matches(name))
    }
}

/// Discount engine - one long-lived instance per process, cheap to clone
#[derive(Clone)]
pub struct DiscountEngine {
    source: Arc<dyn DiscountGroupSource>,
    cache: Arc<DiscountGroupCache>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for DiscountEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscountEngine")
            .field("source", &"<DiscountGroupSource>")
            .field("cache", &self.cache)
            .finish()
    }
}

impl DiscountEngine {
    /// Engine with the default 5 minute staleness window
    pub fn new(source: Arc<dyn DiscountGroupSource>) -> Self {
        Self::with_ttl(source, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(source: Arc<dyn DiscountGroupSource>, ttl: Duration) -> Self {
        Self::with_clock(source, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(
        source: Arc<dyn DiscountGroupSource>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            cache: Arc::new(DiscountGroupCache::new(ttl)),
            clock,
        }
    }

    pub fn cache(&self) -> &DiscountGroupCache {
        &self.cache
    }

    /// Group list plus where it came from.
    ///
    /// Fresh cache → cached list. Otherwise fetch; on success replace the
    /// cache, on failure serve the fallback table and leave the cache empty.
    pub async fn load_discount_groups(&self) -> LoadedGroups {
        if let Some(groups) = self.cache.get_fresh(self.clock.now()) {
            tracing::trace!(count = groups.len(), "Discount groups served from cache");
            return LoadedGroups {
                groups,
                origin: GroupOrigin::Cache,
            };
        }

        let generation = self.cache.generation();
        match self.source.fetch_all_ordered_by_name().await {
            Ok(groups) => {
                let groups = Arc::new(groups);
                if self
                    .cache
                    .store(Arc::clone(&groups), self.clock.now(), generation)
                {
                    tracing::debug!(
                        count = groups.len(),
                        ttl_secs = self.cache.ttl().as_secs(),
                        "Discount group cache refreshed"
                    );
                } else {
                    tracing::debug!("Discount group cache invalidated during fetch, result not cached");
                }
                LoadedGroups {
                    groups,
                    origin: GroupOrigin::Live,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch discount groups, serving fallback table");
                LoadedGroups {
                    groups: Arc::new(fallback_discount_groups()),
                    origin: GroupOrigin::Fallback,
                }
            }
        }
    }

    /// All discount groups, ordered as the store returned them
    pub async fn list_discount_groups(&self) -> Vec<DiscountGroup> {
        self.load_discount_groups().await.groups.as_ref().clone()
    }

    /// Case-insensitive exact name lookup
    pub async fn find_group_by_name(&self, name: &str) -> Option<DiscountGroup> {
        self.load_discount_groups().await.find(name).cloned()
    }

    /// Price a subtotal for a discount group name.
    ///
    /// An unknown or empty name is not an error: the full price is charged
    /// and the input is echoed back (or "Unbekannt" when empty).
    pub async fn calculate_discount_by_group_name(
        &self,
        original_price: f64,
        group_name: &str,
    ) -> DiscountCalculation {
        let loaded = self.load_discount_groups().await;
        match loaded.find(group_name) {
            Some(group) => apply_group_discount(original_price, group, loaded.origin.resolution()),
            None => {
                tracing::debug!(group_name, "No discount group matched, charging full price");
                DiscountCalculation::not_found(sanitize_price(original_price), group_name)
            }
        }
    }

    /// Price a subtotal for a legacy account type tag.
    ///
    /// `Student`/`Teacher`/`External` map to `Schüler`/`Lehrer`/`Externe`;
    /// any other string is used as the group name unchanged.
    pub async fn calculate_discount_by_account_type(
        &self,
        original_price: f64,
        account_type: &str,
    ) -> DiscountCalculation {
        let group_name = group_name_for_account_type(account_type);
        self.calculate_discount_by_group_name(original_price, group_name)
            .await
    }

    /// Force the next lookup to re-fetch. Call after every group mutation.
    pub fn invalidate_cache(&self) {
        self.cache.invalidate();
        tracing::debug!("Discount group cache invalidated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{RepoError, RepoResult};
    use crate::discount::clock::ManualClock;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    const EPSILON: f64 = 1e-9;

    /// In-memory source that counts fetches and can be switched to fail
    struct FakeSource {
        groups: Mutex<Vec<DiscountGroup>>,
        failing: Mutex<bool>,
        fetches: AtomicUsize,
    }

    impl FakeSource {
        fn new(groups: Vec<DiscountGroup>) -> Arc<Self> {
            Arc::new(Self {
                groups: Mutex::new(groups),
                failing: Mutex::new(false),
                fetches: AtomicUsize::new(0),
            })
        }

        fn set_failing(&self, failing: bool) {
            *self.failing.lock() = failing;
        }

        fn set_groups(&self, groups: Vec<DiscountGroup>) {
            *self.groups.lock() = groups;
        }

        fn fetches(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DiscountGroupSource for FakeSource {
        async fn fetch_all_ordered_by_name(&self) -> RepoResult<Vec<DiscountGroup>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if *self.failing.lock() {
                return Err(RepoError::Database("connection refused".into()));
            }
            Ok(self.groups.lock().clone())
        }
    }

    fn group(id: &str, name: &str, pct: f64) -> DiscountGroup {
        DiscountGroup {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{name} group"),
            discount_percentage: pct,
            created_at: 1,
            updated_at: 1,
        }
    }

    fn live_groups() -> Vec<DiscountGroup> {
        vec![
            group("g-ext", "Externe", 0.0),
            group("g-leh", "Lehrer", 12.0),
            group("g-sch", "Schüler", 15.0),
        ]
    }

    fn engine_with(source: Arc<FakeSource>) -> (DiscountEngine, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let engine = DiscountEngine::with_clock(source, DEFAULT_CACHE_TTL, clock.clone());
        (engine, clock)
    }

    #[tokio::test]
    async fn test_list_fetches_once_then_serves_cache() {
        let source = FakeSource::new(live_groups());
        let (engine, _clock) = engine_with(source.clone());

        let first = engine.load_discount_groups().await;
        assert_eq!(first.origin, GroupOrigin::Live);
        let second = engine.load_discount_groups().await;
        assert_eq!(second.origin, GroupOrigin::Cache);

        assert_eq!(source.fetches(), 1);
        assert_eq!(engine.list_discount_groups().await, live_groups());
        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn test_list_preserves_source_order() {
        let unsorted = vec![group("z", "Zeta", 1.0), group("a", "Alpha", 2.0)];
        let source = FakeSource::new(unsorted.clone());
        let (engine, _clock) = engine_with(source);

        assert_eq!(engine.list_discount_groups().await, unsorted);
        // cached copy keeps the same order
        assert_eq!(engine.list_discount_groups().await, unsorted);
    }

    #[tokio::test]
    async fn test_staleness_boundary() {
        let source = FakeSource::new(live_groups());
        let (engine, clock) = engine_with(source.clone());
        let epsilon = Duration::from_millis(1);

        engine.list_discount_groups().await;
        assert_eq!(source.fetches(), 1);

        clock.advance(DEFAULT_CACHE_TTL - epsilon);
        engine.list_discount_groups().await;
        assert_eq!(source.fetches(), 1, "still fresh just before the window");

        clock.advance(epsilon * 2);
        engine.list_discount_groups().await;
        assert_eq!(source.fetches(), 2, "stale just after the window");
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let source = FakeSource::new(live_groups());
        let (engine, _clock) = engine_with(source.clone());

        let before = engine
            .calculate_discount_by_group_name(100.0, "Lehrer")
            .await;
        assert_eq!(before.discount_percentage, 12.0);

        source.set_groups(vec![group("g-leh", "Lehrer", 20.0)]);
        // still cached
        let cached = engine
            .calculate_discount_by_group_name(100.0, "Lehrer")
            .await;
        assert_eq!(cached.discount_percentage, 12.0);

        engine.invalidate_cache();
        let after = engine
            .calculate_discount_by_group_name(100.0, "Lehrer")
            .await;
        assert_eq!(after.discount_percentage, 20.0);
        assert_eq!(after.final_price, 80.0);
        assert_eq!(source.fetches(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_serves_fallback_without_caching() {
        let source = FakeSource::new(live_groups());
        source.set_failing(true);
        let (engine, _clock) = engine_with(source.clone());

        let calc = engine
            .calculate_discount_by_account_type(100.0, "Teacher")
            .await;
        assert_eq!(calc.group_name, "Lehrer");
        assert_eq!(calc.discount_percentage, 10.0);
        assert_eq!(calc.discount_amount, 10.0);
        assert_eq!(calc.final_price, 90.0);
        assert_eq!(calc.resolution, DiscountResolution::Fallback);
        assert!(!engine.cache().is_populated());

        // next call retries the store
        source.set_failing(false);
        let loaded = engine.load_discount_groups().await;
        assert_eq!(loaded.origin, GroupOrigin::Live);
        assert_eq!(source.fetches(), 2);
        assert!(engine.cache().is_populated());
    }

    #[tokio::test]
    async fn test_fallback_list_contents() {
        let source = FakeSource::new(vec![]);
        source.set_failing(true);
        let (engine, _clock) = engine_with(source);

        let names: Vec<String> = engine
            .list_discount_groups()
            .await
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Schüler", "Lehrer", "Externe"]);
    }

    #[tokio::test]
    async fn test_unknown_group_charges_full_price() {
        let source = FakeSource::new(live_groups());
        let (engine, _clock) = engine_with(source);

        let calc = engine
            .calculate_discount_by_group_name(100.0, "NonexistentGroup")
            .await;
        assert_eq!(
            calc,
            DiscountCalculation {
                original_price: 100.0,
                discount_percentage: 0.0,
                discount_amount: 0.0,
                final_price: 100.0,
                group_name: "NonexistentGroup".into(),
                resolution: DiscountResolution::NotFound,
            }
        );
    }

    #[tokio::test]
    async fn test_empty_group_name_reports_placeholder() {
        let source = FakeSource::new(live_groups());
        let (engine, _clock) = engine_with(source);

        let calc = engine.calculate_discount_by_group_name(8.5, "").await;
        assert_eq!(calc.group_name, "Unbekannt");
        assert_eq!(calc.final_price, 8.5);
        assert_eq!(calc.resolution, DiscountResolution::NotFound);
    }

    #[tokio::test]
    async fn test_student_maps_to_schueler() {
        let source = FakeSource::new(live_groups());
        let (engine, _clock) = engine_with(source);

        let calc = engine
            .calculate_discount_by_account_type(200.0, "Student")
            .await;
        assert_eq!(
            calc,
            DiscountCalculation {
                original_price: 200.0,
                discount_percentage: 15.0,
                discount_amount: 30.0,
                final_price: 170.0,
                group_name: "Schüler".into(),
                resolution: DiscountResolution::Live,
            }
        );
    }

    #[tokio::test]
    async fn test_unknown_account_type_is_used_as_group_name() {
        let source = FakeSource::new(vec![group("g-mit", "Mitarbeiter", 25.0)]);
        let (engine, _clock) = engine_with(source);

        let calc = engine
            .calculate_discount_by_account_type(40.0, "Mitarbeiter")
            .await;
        assert_eq!(calc.group_name, "Mitarbeiter");
        assert_eq!(calc.final_price, 30.0);

        let missing = engine
            .calculate_discount_by_account_type(40.0, "Gast")
            .await;
        assert_eq!(missing.group_name, "Gast");
        assert_eq!(missing.final_price, 40.0);
    }

    #[tokio::test]
    async fn test_find_group_by_name_ignores_case() {
        let source = FakeSource::new(live_groups());
        let (engine, _clock) = engine_with(source);

        let exact = engine.find_group_by_name("Schüler").await.unwrap();
        let lower = engine.find_group_by_name("schüler").await.unwrap();
        let upper = engine.find_group_by_name("SCHÜLER").await.unwrap();
        assert_eq!(exact.id, "g-sch");
        assert_eq!(lower, exact);
        assert_eq!(upper, exact);

        assert!(engine.find_group_by_name("Schü").await.is_none());
        assert!(engine.find_group_by_name("").await.is_none());
    }

    #[tokio::test]
    async fn test_first_match_wins() {
        let source = FakeSource::new(vec![
            group("first", "Lehrer", 10.0),
            group("second", "LEHRER", 50.0),
        ]);
        let (engine, _clock) = engine_with(source);

        let found = engine.find_group_by_name("lehrer").await.unwrap();
        assert_eq!(found.id, "first");
    }

    #[tokio::test]
    async fn test_calculation_is_idempotent() {
        let source = FakeSource::new(live_groups());
        let (engine, _clock) = engine_with(source);

        let first = engine
            .calculate_discount_by_group_name(47.3, "Lehrer")
            .await;
        for _ in 0..5 {
            let again = engine
                .calculate_discount_by_group_name(47.3, "Lehrer")
                .await;
            assert_eq!(again, first);
        }
        assert!((first.discount_amount + first.final_price - 47.3).abs() < EPSILON);
        assert!((first.discount_amount - 47.3 * 12.0 / 100.0).abs() < EPSILON);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_see_consistent_results() {
        let source = FakeSource::new(live_groups());
        let (engine, _clock) = engine_with(source.clone());

        let mut handles = Vec::new();
        for _ in 0..32 {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                engine
                    .calculate_discount_by_account_type(10.0, "Student")
                    .await
            }));
        }

        for handle in handles {
            let calc = handle.await.unwrap();
            assert_eq!(calc.group_name, "Schüler");
            assert!((calc.final_price - 8.5).abs() < EPSILON);
        }
        assert!(source.fetches() >= 1);
        assert!(engine.cache().is_populated());
    }

    /// Source whose first fetch waits until released
    struct ParkedSource {
        groups: Vec<DiscountGroup>,
        park: AtomicBool,
        started: Notify,
        release: Notify,
        fetches: AtomicUsize,
    }

    #[async_trait]
    impl DiscountGroupSource for ParkedSource {
        async fn fetch_all_ordered_by_name(&self) -> RepoResult<Vec<DiscountGroup>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.park.swap(false, Ordering::SeqCst) {
                self.started.notify_one();
                self.release.notified().await;
            }
            Ok(self.groups.clone())
        }
    }

    #[tokio::test]
    async fn test_invalidation_during_fetch_is_not_overwritten() {
        let source = Arc::new(ParkedSource {
            groups: live_groups(),
            park: AtomicBool::new(true),
            started: Notify::new(),
            release: Notify::new(),
            fetches: AtomicUsize::new(0),
        });
        let engine = DiscountEngine::new(source.clone());

        let in_flight = tokio::spawn({
            let engine = engine.clone();
            async move { engine.load_discount_groups().await }
        });

        source.started.notified().await;
        engine.invalidate_cache();
        source.release.notify_one();

        let loaded = in_flight.await.unwrap();
        assert_eq!(loaded.origin, GroupOrigin::Live);
        assert_eq!(loaded.groups.len(), live_groups().len());
        assert!(!engine.cache().is_populated());

        let next = engine.load_discount_groups().await;
        assert_eq!(next.origin, GroupOrigin::Live);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
        assert!(engine.cache().is_populated());
    }
}
