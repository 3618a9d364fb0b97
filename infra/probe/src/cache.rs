use crate::error::ProbeError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace, warn};

/// Raw answer of a hardware query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProbeValue {
    Version(u32),
    Limit(u64),
    Flag(bool),
}

impl ProbeValue {
    /// Shape name used in diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Version(_) => "version",
            Self::Limit(_) => "limit",
            Self::Flag(_) => "flag",
        }
    }
}

impl fmt::Display for ProbeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version(v) => write!(f, "version {v}"),
            Self::Limit(v) => write!(f, "limit {v}"),
            Self::Flag(v) => write!(f, "flag {v}"),
        }
    }
}

/// Counters of cache traffic since the cache was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProbeStats {
    /// Queries answered from the cache.
    pub hits: u64,
    /// Queries that reached the hardware and succeeded.
    pub misses: u64,
    /// Queries that reached the hardware and failed.
    pub failures: u64,
    /// Entries currently cached.
    pub entries: usize,
}

#[derive(Debug, Default)]
struct ProbeCacheInner {
    entries: RwLock<FxHashMap<Cow<'static, str>, ProbeValue>>,
    hits: AtomicU64,
    misses: AtomicU64,
    failures: AtomicU64,
}

/// Cache of expensive hardware answers.
///
/// The cache is a cheap handle (`Arc` inside); clones share entries. Its lifetime is unrelated to
/// any flag registry: registry resets never touch it and entries are dropped only through
/// [`ProbeCache::invalidate`] or [`ProbeCache::clear`].
///
/// The query closure runs without the lock held. Two threads missing the same probe at the same
/// time may both reach the hardware; the first stored answer wins and both callers observe it.
///
/// # Example
///
/// ```rust
/// use capflags_probe::{ProbeCache, ProbeError};
///
/// # fn main() -> Result<(), ProbeError> {
/// let cache = ProbeCache::new();
/// let size = cache.query_limit("max_texture_size", || Ok(4096))?;
/// assert_eq!(size, 4096);
/// assert!(cache.is_cached("max_texture_size"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProbeCache {
    inner: Arc<ProbeCacheInner>,
}

impl ProbeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached answer for `probe`, running `query` only when nothing is cached.
    ///
    /// # Errors
    /// Returns the error produced by `query`. Failures are not cached; the next call asks the
    /// hardware again.
    pub fn query<F>(
        &self,
        probe: impl Into<Cow<'static, str>>,
        query: F,
    ) -> Result<ProbeValue, ProbeError>
    where
        F: FnOnce() -> Result<ProbeValue, ProbeError>,
    {
        let probe = probe.into();

        if let Some(value) = self.inner.entries.read().get(probe.as_ref()).copied() {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            trace!(probe = %probe, %value, "Probe cache hit");
            return Ok(value);
        }

        let value = match query() {
            Ok(value) => value,
            Err(err) => {
                self.inner.failures.fetch_add(1, Ordering::Relaxed);
                warn!(probe = %probe, error = %err, "Hardware probe failed");
                return Err(err);
            },
        };

        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        debug!(probe = %probe, %value, "Hardware probe answered");

        let mut entries = self.inner.entries.write();
        Ok(*entries.entry(probe).or_insert(value))
    }

    /// Cached numeric limit.
    ///
    /// # Errors
    /// Returns the query error, or [`ProbeError::UnexpectedValue`] when the cached entry is not
    /// a limit.
    pub fn query_limit<F>(
        &self,
        probe: impl Into<Cow<'static, str>>,
        query: F,
    ) -> Result<u64, ProbeError>
    where
        F: FnOnce() -> Result<u64, ProbeError>,
    {
        let probe = probe.into();
        match self.query(probe.clone(), || query().map(ProbeValue::Limit))? {
            ProbeValue::Limit(value) => Ok(value),
            other => Err(unexpected(probe, "limit", other)),
        }
    }

    /// Cached yes/no capability.
    ///
    /// # Errors
    /// Returns the query error, or [`ProbeError::UnexpectedValue`] when the cached entry is not
    /// a flag.
    pub fn query_flag<F>(
        &self,
        probe: impl Into<Cow<'static, str>>,
        query: F,
    ) -> Result<bool, ProbeError>
    where
        F: FnOnce() -> Result<bool, ProbeError>,
    {
        let probe = probe.into();
        match self.query(probe.clone(), || query().map(ProbeValue::Flag))? {
            ProbeValue::Flag(value) => Ok(value),
            other => Err(unexpected(probe, "flag", other)),
        }
    }

    /// Cached version number.
    ///
    /// # Errors
    /// Returns the query error, or [`ProbeError::UnexpectedValue`] when the cached entry is not
    /// a version.
    pub fn query_version<F>(
        &self,
        probe: impl Into<Cow<'static, str>>,
        query: F,
    ) -> Result<u32, ProbeError>
    where
        F: FnOnce() -> Result<u32, ProbeError>,
    {
        let probe = probe.into();
        match self.query(probe.clone(), || query().map(ProbeValue::Version))? {
            ProbeValue::Version(value) => Ok(value),
            other => Err(unexpected(probe, "version", other)),
        }
    }

    /// Drops the entry for `probe`. Returns whether an entry existed.
    pub fn invalidate(&self, probe: &str) -> bool {
        let removed = self.inner.entries.write().remove(probe).is_some();
        if removed {
            debug!(probe, "Probe invalidated");
        }
        removed
    }

    /// Drops every entry and returns how many were dropped.
    pub fn clear(&self) -> usize {
        let mut entries = self.inner.entries.write();
        let dropped = entries.len();
        entries.clear();
        debug!(dropped, "Probe cache cleared");
        dropped
    }

    #[must_use]
    pub fn is_cached(&self, probe: &str) -> bool {
        self.inner.entries.read().contains_key(probe)
    }

    /// The cached answer for `probe`, without querying.
    #[must_use]
    pub fn peek(&self, probe: &str) -> Option<ProbeValue> {
        self.inner.entries.read().get(probe).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    /// Every cached entry, ordered by probe name.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<String, ProbeValue> {
        self.inner.entries.read().iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[must_use]
    pub fn stats(&self) -> ProbeStats {
        ProbeStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
            failures: self.inner.failures.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

fn unexpected(probe: Cow<'static, str>, expected: &'static str, actual: ProbeValue) -> ProbeError {
    ProbeError::UnexpectedValue { probe, expected, actual, context: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_are_not_cached() {
        let cache = ProbeCache::new();
        let err = cache
            .query_flag("fence_sync", || {
                Err(ProbeError::QueryFailed {
                    probe: "fence_sync".into(),
                    message: "context lost".into(),
                    context: None,
                })
            })
            .expect_err("query should fail");

        assert!(matches!(err, ProbeError::QueryFailed { .. }));
        assert!(!cache.is_cached("fence_sync"));
        assert_eq!(cache.stats().failures, 1);

        assert!(cache.query_flag("fence_sync", || Ok(true)).unwrap());
        assert_eq!(cache.peek("fence_sync"), Some(ProbeValue::Flag(true)));
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let cache = ProbeCache::new();
        cache.query_limit("max_texture_size", || Ok(2048)).unwrap();

        let err = cache.query_flag("max_texture_size", || Ok(true)).expect_err("wrong shape");
        match err {
            ProbeError::UnexpectedValue { expected, actual, .. } => {
                assert_eq!(expected, "flag");
                assert_eq!(actual, ProbeValue::Limit(2048));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn clones_share_entries() {
        let cache = ProbeCache::new();
        let clone = cache.clone();
        clone.query_version("context_version", || Ok(2)).unwrap();

        assert!(cache.is_cached("context_version"));
        assert_eq!(cache.clear(), 1);
        assert!(clone.is_empty());
    }

    #[test]
    fn values_render_with_their_shape() {
        assert_eq!(ProbeValue::Limit(16).to_string(), "limit 16");
        assert_eq!(ProbeValue::Flag(false).shape(), "flag");
    }
}
