use crate::foundation::core::{CanvasSize, Rgb8};
use crate::foundation::error::{PaintlapseError, PaintlapseResult};

/// Total-order key of a paint event: chain block number, then position within the block.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct SequenceKey {
    /// Block number the paint transaction landed in.
    pub block: u64,
    /// Transaction/log/pixel position within the block.
    pub index: u32,
}

impl SequenceKey {
    /// Build a key from its parts.
    pub fn new(block: u64, index: u32) -> Self {
        Self { block, index }
    }
}

/// One atomic pixel-color change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PaintEvent {
    /// Day (canvas) the event belongs to.
    pub day: u32,
    /// Pixel column.
    pub x: u32,
    /// Pixel row.
    pub y: u32,
    /// Painted color.
    pub color: Rgb8,
    /// Authoritative ordering key.
    pub seq: SequenceKey,
}

/// Per-day metadata supplied alongside the event log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayInfo {
    /// Day number.
    pub day: u32,
    /// Theme title, used for output naming only.
    pub theme: String,
    /// Canvas dimensions for the whole day.
    pub size: CanvasSize,
    /// Unix timestamp (seconds) of the day's first paint, when known.
    pub started_at: Option<i64>,
}

/// A day's ordered paint events, validated against the day's canvas.
///
/// Construction is the single ingestion point: every coordinate is checked here so the render loop
/// can apply events without per-event bounds checks. Event order is kept exactly as supplied.
#[derive(Clone, Debug)]
pub struct DayLog {
    info: DayInfo,
    events: Vec<PaintEvent>,
}

impl DayLog {
    /// Validate `events` against `info` and build the log.
    ///
    /// Fails with [`PaintlapseError::CanvasMismatch`] when an event carries another day number and
    /// with [`PaintlapseError::OutOfBounds`] when an event addresses a pixel outside the canvas.
    /// An empty log is accepted here; rendering it fails with [`PaintlapseError::EmptyDay`].
    pub fn new(info: DayInfo, events: Vec<PaintEvent>) -> PaintlapseResult<Self> {
        let size = info.size;
        for ev in &events {
            if ev.day != info.day {
                return Err(PaintlapseError::canvas_mismatch(format!(
                    "event at block {} index {} belongs to day {}, not day {}",
                    ev.seq.block, ev.seq.index, ev.day, info.day
                )));
            }
            if !size.contains(ev.x, ev.y) {
                return Err(PaintlapseError::OutOfBounds {
                    x: ev.x,
                    y: ev.y,
                    width: size.width,
                    height: size.height,
                });
            }
        }
        Ok(Self { info, events })
    }

    /// Day metadata.
    pub fn info(&self) -> &DayInfo {
        &self.info
    }

    /// Day number.
    pub fn day(&self) -> u32 {
        self.info.day
    }

    /// Canvas dimensions.
    pub fn size(&self) -> CanvasSize {
        self.info.size
    }

    /// Events in authoritative order.
    pub fn events(&self) -> &[PaintEvent] {
        &self.events
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` when the day has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/events/model.rs"]
mod tests;
