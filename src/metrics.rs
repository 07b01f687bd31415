//! Metrics hooks for the lookup service.
//!
//! Callers install a global [`LookupMetrics`] implementation via
//! [`set_lookup_metrics`]; [`LookupService`](crate::LookupService) then
//! reports per-query latency and refresh outcomes. This keeps
//! instrumentation decoupled from any specific metrics backend.

use std::sync::{Arc, OnceLock, RwLock};
use std::time::Duration;

use crate::service::LookupError;

/// Metrics observer for lookup operations.
pub trait LookupMetrics: Send + Sync {
    /// Record one `query` call: wall-clock latency, whether it was served
    /// from the cache, and how many results went back to the caller.
    fn record_query(&self, latency: Duration, cache_hit: bool, result_count: usize);

    /// Record one `refresh` attempt with the record count of the offered
    /// snapshot and its outcome.
    fn record_refresh(&self, latency: Duration, record_count: usize, result: Result<(), LookupError>);
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn LookupMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn LookupMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn LookupMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global lookup metrics recorder.
///
/// Typically called once during service startup so every
/// [`LookupService`](crate::LookupService) shares the same backend.
pub fn set_lookup_metrics(recorder: Option<Arc<dyn LookupMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
