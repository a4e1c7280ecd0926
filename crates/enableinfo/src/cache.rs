//! Per-snapshot verdict cache

use dashmap::DashMap;

use crate::enable_info::EnableInfo;
use crate::error::Result;
use crate::variables::EnableInfoVariables;

/// An [`EnableInfo`] that remembers its verdict for each snapshot it has
/// seen.
///
/// Hosts re-check every filter whenever the active document changes, but
/// the snapshot usually repeats. The map is concurrent, so a shared cache
/// can be queried from several threads. Errors are returned as-is and never
/// cached.
///
/// Every distinct snapshot (each new width/height pair, for instance) adds
/// an entry, so the map holds at most `limit` verdicts. Reaching the limit
/// flushes the whole map; hosts may also [`clear`](Self::clear) it when a
/// document closes.
#[derive(Debug)]
pub struct CachedEnableInfo {
    info: EnableInfo,
    verdicts: DashMap<EnableInfoVariables, bool>,
    limit: usize,
}

impl CachedEnableInfo {
    /// Default maximum number of cached snapshots.
    pub const DEFAULT_LIMIT: usize = 1024;

    /// Wrap a parsed expression with an empty cache of
    /// [`DEFAULT_LIMIT`](Self::DEFAULT_LIMIT) entries.
    pub fn new(info: EnableInfo) -> Self {
        Self::with_limit(info, Self::DEFAULT_LIMIT)
    }

    /// Wrap a parsed expression with an empty cache of at most `limit`
    /// entries. A limit of zero disables caching.
    pub fn with_limit(info: EnableInfo, limit: usize) -> Self {
        Self {
            info,
            verdicts: DashMap::new(),
            limit,
        }
    }

    /// Evaluate, consulting the cache first.
    pub fn evaluate(&self, vars: &EnableInfoVariables) -> Result<bool> {
        if let Some(hit) = self.verdicts.get(vars) {
            return Ok(*hit);
        }
        let verdict = self.info.evaluate(vars)?;
        if self.limit == 0 {
            return Ok(verdict);
        }
        if self.verdicts.len() >= self.limit {
            tracing::debug!(limit = self.limit, "verdict cache full, flushing");
            self.verdicts.clear();
        }
        self.verdicts.insert(vars.clone(), verdict);
        Ok(verdict)
    }

    /// Maximum number of cached snapshots.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The wrapped expression.
    pub fn info(&self) -> &EnableInfo {
        &self.info
    }

    /// Drop every cached verdict.
    pub fn clear(&self) {
        self.verdicts.clear();
    }

    /// Number of cached snapshots.
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    /// Whether nothing is cached yet.
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }
}

impl From<EnableInfo> for CachedEnableInfo {
    fn from(info: EnableInfo) -> Self {
        Self::new(info)
    }
}
