use std::sync::atomic::{AtomicU64, Ordering};

use super::MessageType;

/// Track BMail codec counters without external dependencies.
pub(crate) struct Metrics;

static PACKED_FRAMES: AtomicU64 = AtomicU64::new(0);
static UNPACKED_FRAMES: AtomicU64 = AtomicU64::new(0);
static REJECTED_FRAMES: AtomicU64 = AtomicU64::new(0);
static PACKED_BY_TYPE: TypeCounters = TypeCounters::new();
static UNPACKED_BY_TYPE: TypeCounters = TypeCounters::new();

const TYPE_COUNT: usize = MessageType::ALL.len();

struct TypeCounters([AtomicU64; TYPE_COUNT]);

impl TypeCounters {
    const fn new() -> Self {
        Self([const { AtomicU64::new(0) }; TYPE_COUNT])
    }

    fn increment(&self, msg_type: MessageType) {
        self.0[slot(msg_type)].fetch_add(1, Ordering::Relaxed);
    }

    fn load(&self, msg_type: MessageType) -> u64 {
        self.0[slot(msg_type)].load(Ordering::Relaxed)
    }
}

// Tags start at 1.
const fn slot(msg_type: MessageType) -> usize {
    msg_type.as_u16() as usize - 1
}

/// Direction of frame flow for counting.
#[derive(Clone, Copy)]
pub(crate) enum FrameDirection {
    Packed,
    Unpacked,
}

impl Metrics {
    #[inline]
    pub(crate) fn record_frame(direction: FrameDirection, msg_type: MessageType) {
        match direction {
            FrameDirection::Packed => {
                PACKED_FRAMES.fetch_add(1, Ordering::Relaxed);
                PACKED_BY_TYPE.increment(msg_type);
            }
            FrameDirection::Unpacked => {
                UNPACKED_FRAMES.fetch_add(1, Ordering::Relaxed);
                UNPACKED_BY_TYPE.increment(msg_type);
            }
        }
    }

    #[inline]
    pub(crate) fn record_error() {
        REJECTED_FRAMES.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn totals() -> MetricsSnapshot {
        MetricsSnapshot {
            packed_frames: PACKED_FRAMES.load(Ordering::Relaxed),
            unpacked_frames: UNPACKED_FRAMES.load(Ordering::Relaxed),
            rejected_frames: REJECTED_FRAMES.load(Ordering::Relaxed),
            packed_by_type: MessageType::ALL.map(|t| PACKED_BY_TYPE.load(t)),
            unpacked_by_type: MessageType::ALL.map(|t| UNPACKED_BY_TYPE.load(t)),
        }
    }
}

/// Take a snapshot of the process-wide codec counters.
#[must_use]
pub fn metrics_snapshot() -> MetricsSnapshot {
    Metrics::totals()
}

/// Lightweight snapshot of codec counters.
#[derive(Default, Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    /// Frames packed successfully
    pub packed_frames: u64,
    /// Frames unpacked successfully
    pub unpacked_frames: u64,
    /// Pack or unpack attempts that failed validation
    pub rejected_frames: u64,
    packed_by_type: [u64; TYPE_COUNT],
    unpacked_by_type: [u64; TYPE_COUNT],
}

impl MetricsSnapshot {
    /// Frames of `msg_type` packed so far.
    #[must_use]
    pub fn packed(&self, msg_type: MessageType) -> u64 {
        self.packed_by_type[slot(msg_type)]
    }

    /// Frames of `msg_type` unpacked so far.
    #[must_use]
    pub fn unpacked(&self, msg_type: MessageType) -> u64 {
        self.unpacked_by_type[slot(msg_type)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counters are process-wide and other tests run concurrently, so only
    // monotonic growth is asserted.
    #[test]
    fn test_counters_grow() {
        let before = metrics_snapshot();

        Metrics::record_frame(FrameDirection::Packed, MessageType::LatestResp);
        Metrics::record_frame(FrameDirection::Unpacked, MessageType::Hello);
        Metrics::record_error();

        let after = metrics_snapshot();
        assert!(after.packed_frames > before.packed_frames);
        assert!(after.unpacked_frames > before.unpacked_frames);
        assert!(after.rejected_frames > before.rejected_frames);
        assert!(after.packed(MessageType::LatestResp) > before.packed(MessageType::LatestResp));
        assert!(after.unpacked(MessageType::Hello) > before.unpacked(MessageType::Hello));
    }
}
