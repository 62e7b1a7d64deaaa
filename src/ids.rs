use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

/// Characters used for record identifiers: lowercase base-36 tokens.
const RECORD_ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
/// Length of a generated record identifier.
const RECORD_ID_LEN: usize = 9;

/// Identifier source injected into services so generated ids stay
/// deterministic in tests.
pub trait IdGenerator {
    /// Identifier for a stored record (product, variation, user).
    fn record_id(&self) -> String;
    /// Human-facing order number in `ORD-NNNN` form.
    fn order_id(&self) -> String;
}

/// Production generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn record_id(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..RECORD_ID_LEN)
            .map(|_| RECORD_ID_CHARS[rng.gen_range(0..RECORD_ID_CHARS.len())] as char)
            .collect()
    }

    fn order_id(&self) -> String {
        let mut rng = rand::thread_rng();
        format!("ORD-{}", rng.gen_range(1000..10000))
    }
}

/// Deterministic generator handing out sequential ids.
#[derive(Debug, Default)]
pub struct SequentialIds {
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl IdGenerator for SequentialIds {
    fn record_id(&self) -> String {
        format!("rec-{}", self.next())
    }

    fn order_id(&self) -> String {
        format!("ORD-{}", 1000 + self.next())
    }
}
