// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once [`CancellationToken::cancel`] is called on any
/// of its clones.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the search to stop. Visible to every clone.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl TerminationCondition for CancellationToken {
    fn should_stop(&mut self) -> bool {
        self.is_cancelled()
    }
}
