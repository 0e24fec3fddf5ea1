//! Single-slot memo in front of the syntax-tree classifier.
//!
//! Cursor-driven callers ask the same question many times in a row (every
//! selection event, every keystroke that does not move the caret). One
//! remembered verdict, keyed by source identity, version and position, is
//! enough to avoid a re-parse for each of them.

use std::time::{Duration, Instant};

use crate::classify::{Strategy, classify_with};
use crate::models::Probe;

/// Source of "now"; injected so tests can move time by hand.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// The remembered verdict and what it is valid for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub source_id: String,
    pub version: u64,
    pub position: usize,
    pub timestamp: Instant,
    pub verdict: bool,
}

pub struct ResultCache<C: Clock = SystemClock> {
    ttl: Duration,
    clock: C,
    entry: Option<CacheEntry>,
}

impl ResultCache<SystemClock> {
    /// A zero `ttl` disables caching.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> ResultCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl,
            clock,
            entry: None,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn entry(&self) -> Option<&CacheEntry> {
        self.entry.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Return the remembered verdict if it is still valid for this key,
    /// otherwise run `compute` and remember its result.
    pub fn get_or_compute(
        &mut self,
        source_id: &str,
        version: u64,
        position: usize,
        compute: impl FnOnce() -> bool,
    ) -> bool {
        if self.ttl.is_zero() {
            return compute();
        }

        let now = self.clock.now();
        if let Some(entry) = &self.entry
            && entry.source_id == source_id
            && entry.version == version
            && entry.position == position
            && now.saturating_duration_since(entry.timestamp) < self.ttl
        {
            log::trace!("cache hit for {source_id}@{version}:{position}");
            return entry.verdict;
        }

        log::trace!("cache miss for {source_id}@{version}:{position}");
        let verdict = compute();
        self.entry = Some(CacheEntry {
            source_id: source_id.to_string(),
            version,
            position,
            timestamp: now,
            verdict,
        });
        verdict
    }
}

/// A classifier with a [`ResultCache`] in front of the code strategy.
///
/// Markup-only probes are cheap and skip the cache entirely.
pub struct CachedClassifier<C: Clock = SystemClock> {
    cache: ResultCache<C>,
    strategy: Strategy,
}

impl CachedClassifier<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_cache(ResultCache::new(ttl), Strategy::default())
    }
}

impl<C: Clock> CachedClassifier<C> {
    pub fn with_cache(cache: ResultCache<C>, strategy: Strategy) -> Self {
        Self { cache, strategy }
    }

    pub fn cache(&self) -> &ResultCache<C> {
        &self.cache
    }

    /// Classify `probe`, where `version` is the live document version.
    pub fn classify(&mut self, probe: &Probe<'_>, version: u64) -> bool {
        if probe.dialect.is_markup_only() {
            return classify_with(probe, self.strategy);
        }
        let strategy = self.strategy;
        self.cache
            .get_or_compute(probe.source_id, version, probe.offset, || {
                classify_with(probe, strategy)
            })
    }
}
