//! # Application State Management
//!
//! This module holds everything the HTTP handlers share: configuration, the question
//! catalog, the session store, the answer sink and request metrics.
//!
//! ## Key Rust Concepts (IMPORTANT for beginners):
//!
//! ### Arc (Atomically Reference Counted)
//! - **Purpose**: Allows multiple parts of the program to safely share ownership of data
//! - **Why needed**: actix-web builds one `App` per worker thread, and every worker
//!   must see the same sessions
//! - **Cloning**: `AppState::clone()` only bumps reference counts; nothing is copied
//!
//! ### RwLock (Reader-Writer Lock)
//! - **Purpose**: Allows multiple readers OR one writer at a time (but not both)
//! - **Used for**: Metrics, which every request writes and `/metrics` reads
//!
//! ### What is NOT locked
//! - **Config and catalog**: Loaded once at startup and never changed, so a plain `Arc` is enough
//! - **Sessions**: `SessionStore` does its own per-session locking (see `session.rs`)
//!
//! ### Poisoned locks
//! A lock is "poisoned" when a thread panicked while holding it. Counters are still
//! meaningful after that, so we keep using them via `PoisonError::into_inner`.

use crate::catalog::QuestionCatalog;
use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::sink::AnswerSink;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

/// The main application state that's shared across all HTTP request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Startup configuration (read-only after load)
    pub config: Arc<AppConfig>,

    /// Ordered interview questions
    pub catalog: Arc<QuestionCatalog>,

    /// Every session created since startup
    pub sessions: Arc<SessionStore>,

    /// Where uploaded recordings are written
    pub sink: Arc<AnswerSink>,

    /// Request metrics (updated by `MetricsMiddleware` on every request)
    pub metrics: Arc<RwLock<AppMetrics>>,

    /// When the server started; Instant is Copy, so no locking needed
    pub start_time: Instant,
}

/// Request metrics collected across all HTTP requests.
///
/// ## Why these metrics matter:
/// - **request_count**: Total requests processed (for load monitoring)
/// - **error_count**: Responses with a 4xx/5xx status (for reliability monitoring)
/// - **endpoint_metrics**: Per-route statistics keyed by route pattern, so
///   `GET /questions/session_1` and `GET /questions/session_2` share one entry
#[derive(Debug, Default, Clone)]
pub struct AppMetrics {
    pub request_count: u64,
    pub error_count: u64,
    pub endpoint_metrics: HashMap<String, EndpointMetric>,
}

/// Performance metrics for a single route.
#[derive(Debug, Default, Clone)]
pub struct EndpointMetric {
    pub request_count: u64,
    /// Total time spent processing all requests to this route (milliseconds)
    pub total_duration_ms: u64,
    pub error_count: u64,
}

impl AppState {
    /// Build the shared state from an already validated configuration and an opened sink.
    ///
    /// The sink is passed in rather than created here because opening it touches the
    /// filesystem, and `main` wants to report that failure before anything else starts.
    pub fn new(config: AppConfig, sink: AnswerSink) -> Self {
        let catalog = QuestionCatalog::new(config.interview.questions.iter().cloned());

        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            sessions: Arc::new(SessionStore::new()),
            sink: Arc::new(sink),
            metrics: Arc::new(RwLock::new(AppMetrics::default())),
            start_time: Instant::now(),
        }
    }

    /// Cursor value at which a session stops accepting answers, if any.
    ///
    /// ## Returns:
    /// - **None**: Default; finished sessions may keep submitting and skipping
    /// - **Some(len)**: `interview.reject_after_completion` is on; the catalog length is the cap
    pub fn answer_limit(&self) -> Option<usize> {
        self.config
            .interview
            .reject_after_completion
            .then(|| self.catalog.len())
    }

    /// Increment the total request counter (called by middleware for every request).
    pub fn increment_request_count(&self) {
        let mut metrics = self.metrics.write().unwrap_or_else(PoisonError::into_inner);
        metrics.request_count += 1;
    }

    /// Record one finished request against its route.
    ///
    /// ## Parameters:
    /// - **endpoint**: Method plus route pattern (e.g., "POST /submit/{session_id}")
    /// - **duration_ms**: How long the request took to process
    /// - **is_error**: Whether the response status was 4xx or 5xx
    ///
    /// ## HashMap operations:
    /// `.entry().or_default()` creates the route's entry the first time we see it.
    pub fn record_endpoint_request(&self, endpoint: &str, duration_ms: u64, is_error: bool) {
        let mut metrics = self.metrics.write().unwrap_or_else(PoisonError::into_inner);

        if is_error {
            metrics.error_count += 1;
        }

        let endpoint_metric = metrics.endpoint_metrics.entry(endpoint.to_string()).or_default();
        endpoint_metric.request_count += 1;
        endpoint_metric.total_duration_ms += duration_ms;

        if is_error {
            endpoint_metric.error_count += 1;
        }
    }

    /// Get a snapshot of current metrics.
    ///
    /// Clones under a read lock so the lock is not held while the response is serialized.
    pub fn get_metrics_snapshot(&self) -> AppMetrics {
        self.metrics.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn get_uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl EndpointMetric {
    /// Average = Total Duration ÷ Number of Requests (0.0 before the first request).
    pub fn average_duration_ms(&self) -> f64 {
        if self.request_count > 0 {
            self.total_duration_ms as f64 / self.request_count as f64
        } else {
            0.0
        }
    }

    /// Fraction of requests that failed, from 0.0 to 1.0.
    pub fn error_rate(&self) -> f64 {
        if self.request_count > 0 {
            self.error_count as f64 / self.request_count as f64
        } else {
            0.0
        }
    }
}
