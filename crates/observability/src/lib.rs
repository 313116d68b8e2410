use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Process-local counters. Every increment is also forwarded to the `metrics`
/// facade so a host can attach an exporter.
#[derive(Debug, Default)]
pub struct AppMetrics {
    wizard_transitions_total: AtomicU64,
    itineraries_saved_total: AtomicU64,
    backend_requests_total: AtomicU64,
    backend_failures_total: AtomicU64,
    backend_timeouts_total: AtomicU64,
    feed_fallbacks_total: AtomicU64,
    bookings_tracked_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub wizard_transitions_total: u64,
    pub itineraries_saved_total: u64,
    pub backend_requests_total: u64,
    pub backend_failures_total: u64,
    pub backend_timeouts_total: u64,
    pub feed_fallbacks_total: u64,
    pub bookings_tracked_total: u64,
    pub avg_backend_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_transition(&self) {
        self.wizard_transitions_total.fetch_add(1, Ordering::Relaxed);
        counter!("voyage_wizard_transitions_total").increment(1);
    }

    pub fn inc_saved(&self) {
        self.itineraries_saved_total.fetch_add(1, Ordering::Relaxed);
        counter!("voyage_itineraries_saved_total").increment(1);
    }

    pub fn inc_backend_request(&self) {
        self.backend_requests_total.fetch_add(1, Ordering::Relaxed);
        counter!("voyage_backend_requests_total").increment(1);
    }

    pub fn inc_backend_failure(&self) {
        self.backend_failures_total.fetch_add(1, Ordering::Relaxed);
        counter!("voyage_backend_failures_total").increment(1);
    }

    /// Timeouts also count as failures.
    pub fn inc_backend_timeout(&self) {
        self.backend_timeouts_total.fetch_add(1, Ordering::Relaxed);
        counter!("voyage_backend_timeouts_total").increment(1);
        self.inc_backend_failure();
    }

    pub fn inc_feed_fallback(&self) {
        self.feed_fallbacks_total.fetch_add(1, Ordering::Relaxed);
        counter!("voyage_feed_fallbacks_total").increment(1);
    }

    pub fn inc_booking(&self) {
        self.bookings_tracked_total.fetch_add(1, Ordering::Relaxed);
        counter!("voyage_bookings_tracked_total").increment(1);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.backend_requests_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            wizard_transitions_total: self.wizard_transitions_total.load(Ordering::Relaxed),
            itineraries_saved_total: self.itineraries_saved_total.load(Ordering::Relaxed),
            backend_requests_total: requests,
            backend_failures_total: self.backend_failures_total.load(Ordering::Relaxed),
            backend_timeouts_total: self.backend_timeouts_total.load(Ordering::Relaxed),
            feed_fallbacks_total: self.feed_fallbacks_total.load(Ordering::Relaxed),
            bookings_tracked_total: self.bookings_tracked_total.load(Ordering::Relaxed),
            avg_backend_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,voyage_wizard=info,voyage_social=info,voyage_core=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
