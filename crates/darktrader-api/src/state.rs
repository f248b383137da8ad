//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! ## Architecture
//!
//! AppState holds one [`SubmissionStore`] per submission kind, the
//! service configuration and the Prometheus metrics handle. It is
//! constructed once in `main` and cloned into every handler; tests build a
//! fresh instance per app so stores never leak between cases. All state is process memory and is lost on exit.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use darktrader_core::{
    ContactForm, MentorshipApplicationForm, RegistrationForm, Submission, SubmissionId,
    SubmissionKind,
};
use parking_lot::RwLock;

use crate::config::AppConfig;
use crate::middleware::metrics::ApiMetrics;

// -- Submission Store ---------------------------------------------------------

/// Thread-safe, cloneable, append-only store for one submission kind.
///
/// All operations are synchronous (the RwLock is `parking_lot`, not
/// `tokio::sync`) because the lock is never held across `.await` points.
/// `parking_lot::RwLock` does not poison, so a panicking handler cannot
/// wedge the store for later requests.
///
/// Records come back in insertion order. There is no update or delete.
pub struct SubmissionStore<S: Submission> {
    inner: Arc<RwLock<Inner<S::Record>>>,
}

struct Inner<R> {
    records: Vec<R>,
    index: HashMap<SubmissionId, usize>,
}

impl<S: Submission> Clone for SubmissionStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Submission> std::fmt::Debug for SubmissionStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionStore")
            .field("kind", &S::KIND)
            .field("len", &self.len())
            .finish()
    }
}

impl<S: Submission> SubmissionStore<S> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: Vec::new(),
                index: HashMap::new(),
            })),
        }
    }

    /// The submission kind this store holds.
    pub fn kind(&self) -> SubmissionKind {
        S::KIND
    }

    /// Persist a validated form, returning the complete record.
    ///
    /// Id generation, timestamping and insertion happen under one write
    /// lock, so concurrent callers never share an id and no insert is lost.
    pub fn create(&self, form: S) -> S::Record {
        let mut guard = self.inner.write();
        let mut id = SubmissionId::new();
        while guard.index.contains_key(&id) {
            id = SubmissionId::new();
        }
        let record = form.into_record(id, Utc::now());
        let position = guard.records.len();
        guard.records.push(record.clone());
        guard.index.insert(id, position);
        record
    }

    /// Snapshot of every record, in insertion order.
    pub fn list(&self) -> Vec<S::Record> {
        self.inner.read().records.clone()
    }

    /// Retrieve a record by id.
    pub fn get(&self, id: &SubmissionId) -> Option<S::Record> {
        let guard = self.inner.read();
        guard
            .index
            .get(id)
            .and_then(|&position| guard.records.get(position))
            .cloned()
    }

    /// Return the number of records.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Submission> Default for SubmissionStore<S> {
    fn default() -> Self {
        Self::new()
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state accessible to all route handlers.
///
/// Clone-friendly via `Arc` internals in each store.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registrations: SubmissionStore<RegistrationForm>,
    pub contacts: SubmissionStore<ContactForm>,
    pub mentorship_applications: SubmissionStore<MentorshipApplicationForm>,
    pub config: AppConfig,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// Create a new application state with default configuration.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new application state with the given configuration.
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            registrations: SubmissionStore::new(),
            contacts: SubmissionStore::new(),
            mentorship_applications: SubmissionStore::new(),
            config,
            metrics: ApiMetrics::new(),
        }
    }

    /// Number of stored records of the given kind.
    pub fn count(&self, kind: SubmissionKind) -> usize {
        match kind {
            SubmissionKind::Registration => self.registrations.len(),
            SubmissionKind::ContactMessage => self.contacts.len(),
            SubmissionKind::MentorshipApplication => self.mentorship_applications.len(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
