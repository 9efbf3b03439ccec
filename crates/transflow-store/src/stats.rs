//! Ingestion counters.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Running totals of what the dispatcher did with bus messages.
///
/// Relaxed atomics: the counters are independent and only read for
/// reporting.
#[derive(Debug, Default)]
pub struct IngestStats {
    stored: AtomicU64,
    topic_rejected: AtomicU64,
    decode_rejected: AtomicU64,
}

/// A point-in-time copy of [`IngestStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestCounts {
    /// Messages decoded and stored.
    pub stored: u64,
    /// Messages dropped because the topic did not parse.
    pub topic_rejected: u64,
    /// Messages dropped because the payload did not decode.
    pub decode_rejected: u64,
}

impl IngestStats {
    pub(crate) fn record_stored(&self) {
        self.stored.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_topic_rejected(&self) {
        self.topic_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_decode_rejected(&self) {
        self.decode_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters.
    pub fn counts(&self) -> IngestCounts {
        IngestCounts {
            stored: self.stored.load(Ordering::Relaxed),
            topic_rejected: self.topic_rejected.load(Ordering::Relaxed),
            decode_rejected: self.decode_rejected.load(Ordering::Relaxed),
        }
    }
}
