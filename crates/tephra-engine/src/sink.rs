//! Snapshot sinks.
//!
//! The driver hands a borrowed grid to a [`SnapshotSink`] after every
//! tick. Sinks decide what to keep: nothing, an in-memory frame store,
//! or a channel feeding another thread.

use crossbeam_channel::{Sender, TrySendError};
use indexmap::IndexMap;
use tephra_core::{AshGrid, SnapshotSink, TickId};

/// A snapshot paired with the tick that produced it, as sent over a
/// [`ChannelSink`].
#[derive(Clone, Debug)]
pub struct Frame {
    /// The tick after which the snapshot was taken.
    pub tick: TickId,
    /// The full concentration grid at that tick.
    pub grid: AshGrid,
}

/// Discards every snapshot. Useful for benchmarks and balance-only
/// runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn accept(&mut self, _tick: TickId, _grid: &AshGrid) {}
}

/// Keeps every snapshot in memory, in tick order.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    frames: IndexMap<TickId, AshGrid>,
}

impl MemorySink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frames have been stored.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The frame for a given tick, if one was stored.
    pub fn frame(&self, tick: TickId) -> Option<&AshGrid> {
        self.frames.get(&tick)
    }

    /// The most recently stored frame.
    pub fn last(&self) -> Option<(&TickId, &AshGrid)> {
        self.frames.last()
    }

    /// Iterate frames in the order they were stored.
    pub fn iter(&self) -> impl Iterator<Item = (&TickId, &AshGrid)> {
        self.frames.iter()
    }
}

impl SnapshotSink for MemorySink {
    fn accept(&mut self, tick: TickId, grid: &AshGrid) {
        self.frames.insert(tick, grid.clone());
    }
}

/// Forwards snapshots over a crossbeam channel, e.g. to a writer or
/// renderer thread.
///
/// Sending never blocks the driver: if the channel is full or the
/// receiver has gone away, the frame is dropped and counted.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<Frame>,
    dropped: u64,
}

impl ChannelSink {
    /// Wrap a sender.
    pub fn new(tx: Sender<Frame>) -> Self {
        Self { tx, dropped: 0 }
    }

    /// Frames dropped because the channel was full or disconnected.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl SnapshotSink for ChannelSink {
    fn accept(&mut self, tick: TickId, grid: &AshGrid) {
        let frame = Frame {
            tick,
            grid: grid.clone(),
        };
        match self.tx.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
            }
        }
    }
}
