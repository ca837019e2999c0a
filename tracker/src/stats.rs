// Copyright (c) 2025 uatrack contributors. Licensed under Apache License, Version 2.0.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uatrack_protocol_schema::HitType;

/// Cumulative hit counters for one facade instance. All counters are relaxed
/// atomics; exact cross-counter consistency is not a goal, these exist for
/// inspection and tests.
#[derive(Debug, Default)]
pub struct TrackerStats {
    page_view_hits: AtomicU64,
    screen_view_hits: AtomicU64,
    event_hits: AtomicU64,
    transaction_hits: AtomicU64,
    item_hits: AtomicU64,
    exception_hits: AtomicU64,
    timing_hits: AtomicU64,
    social_hits: AtomicU64,
    refund_hits: AtomicU64,
    total_hits: AtomicU64,
    failed_hits: AtomicU64,
}

impl TrackerStats {
    pub(crate) fn record_attempt(&self, hit_type: HitType) {
        let counter = match hit_type {
            HitType::PageView => &self.page_view_hits,
            HitType::ScreenView => &self.screen_view_hits,
            HitType::Event => &self.event_hits,
            HitType::Transaction => &self.transaction_hits,
            HitType::Item => &self.item_hits,
            HitType::Exception => &self.exception_hits,
            HitType::Timing => &self.timing_hits,
            HitType::Social => &self.social_hits,
            HitType::Refund => &self.refund_hits,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.total_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failed_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            page_view_hits: self.page_view_hits.load(Ordering::Relaxed),
            screen_view_hits: self.screen_view_hits.load(Ordering::Relaxed),
            event_hits: self.event_hits.load(Ordering::Relaxed),
            transaction_hits: self.transaction_hits.load(Ordering::Relaxed),
            item_hits: self.item_hits.load(Ordering::Relaxed),
            exception_hits: self.exception_hits.load(Ordering::Relaxed),
            timing_hits: self.timing_hits.load(Ordering::Relaxed),
            social_hits: self.social_hits.load(Ordering::Relaxed),
            refund_hits: self.refund_hits.load(Ordering::Relaxed),
            total_hits: self.total_hits.load(Ordering::Relaxed),
            failed_hits: self.failed_hits.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter.
    pub fn reset(&self) {
        self.page_view_hits.store(0, Ordering::Relaxed);
        self.screen_view_hits.store(0, Ordering::Relaxed);
        self.event_hits.store(0, Ordering::Relaxed);
        self.transaction_hits.store(0, Ordering::Relaxed);
        self.item_hits.store(0, Ordering::Relaxed);
        self.exception_hits.store(0, Ordering::Relaxed);
        self.timing_hits.store(0, Ordering::Relaxed);
        self.social_hits.store(0, Ordering::Relaxed);
        self.refund_hits.store(0, Ordering::Relaxed);
        self.total_hits.store(0, Ordering::Relaxed);
        self.failed_hits.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time copy of [`TrackerStats`], cheap to pass around and compare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub page_view_hits: u64,
    pub screen_view_hits: u64,
    pub event_hits: u64,
    pub transaction_hits: u64,
    pub item_hits: u64,
    pub exception_hits: u64,
    pub timing_hits: u64,
    pub social_hits: u64,
    pub refund_hits: u64,
    pub total_hits: u64,
    pub failed_hits: u64,
}

impl StatsSnapshot {
    /// JSON rendering for dashboards and debug logs.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
