use std::sync::atomic::{AtomicU64, Ordering};

/// Hands out increasing tokens; only the newest one is current.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    latest: AtomicU64,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }
}
