//! Query diagnostics
//!
//! Counters are atomics updated with relaxed ordering, so a frozen index can
//! be queried from many threads at once. They never influence query results.

use std::sync::atomic::{AtomicU64, Ordering};

/// Shared counters of a climbing index.
#[derive(Debug, Default)]
pub struct ClimbStats {
    queries: AtomicU64,
    climb_steps: AtomicU64,
    fallbacks: AtomicU64,
}

impl ClimbStats {
    /// Fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a query that climbed `steps` levels.
    #[inline]
    pub fn record_climb(&self, steps: u32) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.climb_steps.fetch_add(u64::from(steps), Ordering::Relaxed);
    }

    /// Record a query answered by a full top-down scan.
    #[inline]
    pub fn record_fallback(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
        self.fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    /// Zero all counters.
    pub fn reset(&self) {
        self.queries.store(0, Ordering::Relaxed);
        self.climb_steps.store(0, Ordering::Relaxed);
        self.fallbacks.store(0, Ordering::Relaxed);
    }

    /// Point-in-time copy of the counters.
    pub fn snapshot(&self) -> ClimbSnapshot {
        ClimbSnapshot {
            queries: self.queries.load(Ordering::Relaxed),
            climb_steps: self.climb_steps.load(Ordering::Relaxed),
            fallbacks: self.fallbacks.load(Ordering::Relaxed),
        }
    }
}

impl Clone for ClimbStats {
    fn clone(&self) -> Self {
        let snap = self.snapshot();
        Self {
            queries: AtomicU64::new(snap.queries),
            climb_steps: AtomicU64::new(snap.climb_steps),
            fallbacks: AtomicU64::new(snap.fallbacks),
        }
    }
}

/// Plain copy of [`ClimbStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct ClimbSnapshot {
    /// Queries answered.
    pub queries: u64,
    /// Levels climbed, summed over all predicted queries.
    pub climb_steps: u64,
    /// Queries whose domain had no model.
    pub fallbacks: u64,
}

impl ClimbSnapshot {
    /// Mean climb length over queries that used a prediction.
    pub fn mean_climb(&self) -> f64 {
        // Relaxed loads may observe a fallback before its query.
        let predicted = self.queries.saturating_sub(self.fallbacks);
        if predicted == 0 {
            0.0
        } else {
            self.climb_steps as f64 / predicted as f64
        }
    }
}
