// Evaluation Metrics
//
// Counts rule outcomes and times purchase evaluations so slow paths and
// rejection rates are visible through GET /metrics.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use utoipa::ToSchema;

/// Threshold above which an evaluation is reported as slow (100ms)
const SLOW_OPERATION_THRESHOLD_MS: u64 = 100;

/// Shared counters for registration and purchase evaluations
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    registrations_accepted: AtomicU64,
    registrations_rejected: AtomicU64,

    purchases_approved: AtomicU64,
    purchases_rejected: AtomicU64,
    discounts_granted: AtomicU64,

    // Timing (microseconds)
    purchase_evaluations: AtomicU64,
    total_purchase_time_us: AtomicU64,
    slow_purchase_evaluations: AtomicU64,
}

impl EvaluationMetrics {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    pub fn record_registration_accepted(&self) {
        self.inner.registrations_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_registration_rejected(&self) {
        self.inner.registrations_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an approved purchase; `discounted` when a benefit was applied
    pub fn record_purchase_approved(&self, discounted: bool) {
        self.inner.purchases_approved.fetch_add(1, Ordering::Relaxed);
        if discounted {
            self.inner.discounts_granted.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_purchase_rejected(&self) {
        self.inner.purchases_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Start timing a purchase evaluation; the duration is recorded on drop
    pub fn start_purchase_evaluation(&self) -> OperationTimer {
        OperationTimer {
            start: Instant::now(),
            metrics: self.clone(),
        }
    }

    fn record_purchase_evaluation(&self, duration: Duration) {
        self.inner.purchase_evaluations.fetch_add(1, Ordering::Relaxed);
        self.inner
            .total_purchase_time_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        if duration.as_millis() as u64 > SLOW_OPERATION_THRESHOLD_MS {
            self.inner.slow_purchase_evaluations.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("Slow purchase evaluation: {}ms", duration.as_millis());
        }
    }

    /// Average purchase evaluation time in milliseconds
    pub fn avg_purchase_time_ms(&self) -> f64 {
        let count = self.inner.purchase_evaluations.load(Ordering::Relaxed);
        let total_us = self.inner.total_purchase_time_us.load(Ordering::Relaxed);

        if count == 0 {
            0.0
        } else {
            (total_us as f64 / count as f64) / 1000.0
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            registrations_accepted: self.inner.registrations_accepted.load(Ordering::Relaxed),
            registrations_rejected: self.inner.registrations_rejected.load(Ordering::Relaxed),
            purchases_approved: self.inner.purchases_approved.load(Ordering::Relaxed),
            purchases_rejected: self.inner.purchases_rejected.load(Ordering::Relaxed),
            discounts_granted: self.inner.discounts_granted.load(Ordering::Relaxed),
            purchase_evaluations: self.inner.purchase_evaluations.load(Ordering::Relaxed),
            avg_purchase_time_ms: self.avg_purchase_time_ms(),
            slow_purchase_evaluations: self.inner.slow_purchase_evaluations.load(Ordering::Relaxed),
        }
    }
}

impl Default for EvaluationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer for a single purchase evaluation
pub struct OperationTimer {
    start: Instant,
    metrics: EvaluationMetrics,
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        self.metrics.record_purchase_evaluation(self.start.elapsed());
    }
}

/// Point-in-time view of the counters
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub registrations_accepted: u64,
    pub registrations_rejected: u64,
    pub purchases_approved: u64,
    pub purchases_rejected: u64,
    pub discounts_granted: u64,
    pub purchase_evaluations: u64,
    pub avg_purchase_time_ms: f64,
    pub slow_purchase_evaluations: u64,
}
