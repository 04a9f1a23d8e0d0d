//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::repository::FullRepository;
use crate::db::UpdatePolicy;
use crate::models::{Clock, SystemClock};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Source of "now" for completion and working-day counts
    pub clock: Arc<dyn Clock>,
    /// Retry policy for coach updates
    pub updates: UpdatePolicy,
}

impl AppState {
    /// Create a new application state with the given repository, the system
    /// clock and the default update policy.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            clock: Arc::new(SystemClock),
            updates: UpdatePolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_update_policy(mut self, updates: UpdatePolicy) -> Self {
        self.updates = updates;
        self
    }
}
