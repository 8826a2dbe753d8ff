//! Fetch generations.
//!
//! Every load takes a new epoch before it starts and carries it back with its
//! result. A result whose epoch is no longer current was superseded by a newer
//! load and is dropped, which makes "last started wins" explicit instead of
//! "last resolved wins".

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Clone, Debug, Default)]
pub struct FetchEpoch {
    current: Arc<AtomicU64>,
}

impl FetchEpoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation; earlier ones become stale.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        self.current() == epoch
    }

    /// Make every in-flight load stale without starting a new one.
    pub fn invalidate(&self) {
        self.begin();
    }
}
