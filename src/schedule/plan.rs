use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::error::{PaintlapseError, PaintlapseResult};

/// Number of output frames for a video of `duration_secs` at `fps`.
///
/// The product is rounded to the nearest frame. A non-positive duration, or one so short that it
/// rounds to zero frames, fails with [`PaintlapseError::InvalidParameters`].
pub fn frame_count(duration_secs: f64, fps: Fps) -> PaintlapseResult<u64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Err(PaintlapseError::invalid_parameters(format!(
            "duration must be a positive number of seconds, got {duration_secs}"
        )));
    }
    if fps.num == 0 || fps.den == 0 {
        return Err(PaintlapseError::invalid_parameters("fps must be non-zero"));
    }
    let n = fps.secs_to_frames_round(duration_secs);
    if n == 0 {
        return Err(PaintlapseError::invalid_parameters(format!(
            "{duration_secs}s at {fps} fps yields zero frames"
        )));
    }
    Ok(n)
}

/// Partition of a day's ordered events onto `N` frame slots.
///
/// Slot `i` owns a cumulative cursor `k_i`: events `[0, k_i)` are visible in frame `i`. Cursors
/// never decrease and the last one equals the event count. All arithmetic is integral, so the
/// same `(events, frames)` pair always yields the same partition.
///
/// - `E <= N`: event `j` becomes due in slot `floor(j * N / E)`, i.e. `k_i = ceil((i + 1) * E / N)`.
///   Slots where the cursor does not advance are hold frames.
/// - `E > N`: `k_i = floor((i + 1) * E / N)`, so every slot advances by `E / N` events give or
///   take one.
///
/// In both regimes an event sitting exactly on a boundary belongs to the earlier slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FramePlan {
    events: usize,
    frames: u64,
}

impl FramePlan {
    /// Plan `events` events for `day` across `frames` slots.
    pub fn new(day: u32, events: usize, frames: u64) -> PaintlapseResult<Self> {
        if events == 0 {
            return Err(PaintlapseError::EmptyDay { day });
        }
        if frames == 0 {
            return Err(PaintlapseError::invalid_parameters(
                "frame count must be at least 1",
            ));
        }
        Ok(Self { events, frames })
    }

    /// Number of events being scheduled.
    pub fn event_count(&self) -> usize {
        self.events
    }

    /// Number of frame slots.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Return `true` when there are at least as many slots as events.
    pub fn is_sparse(&self) -> bool {
        (self.events as u64) <= self.frames
    }

    /// Cumulative cursor for `slot`; slots past the end clamp to the event count.
    pub fn cursor(&self, slot: u64) -> usize {
        if slot.saturating_add(1) >= self.frames {
            return self.events;
        }
        let e = self.events as u128;
        let n = u128::from(self.frames);
        let num = u128::from(slot + 1) * e;
        let k = if self.is_sparse() {
            num.div_ceil(n)
        } else {
            num / n
        };
        k.min(e) as usize
    }

    /// Slot in which event `event_index` first becomes visible.
    pub fn slot_of(&self, event_index: usize) -> FrameIndex {
        let e = self.events as u128;
        let n = u128::from(self.frames);
        let j = event_index.min(self.events - 1) as u128;
        let slot = if self.is_sparse() {
            j * n / e
        } else {
            // Smallest i with floor((i + 1) * E / N) > j.
            ((j + 1) * n).div_ceil(e) - 1
        };
        FrameIndex(slot as u64)
    }

    /// Iterate all slots in order.
    pub fn slots(&self) -> FrameSlots {
        FrameSlots {
            plan: *self,
            next: 0,
            prev_cursor: 0,
        }
    }
}

/// One frame slot: the events `[start, end)` that become due in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSlot {
    /// Output frame index.
    pub index: FrameIndex,
    /// First newly due event.
    pub start: usize,
    /// Cumulative cursor after this slot.
    pub end: usize,
}

impl FrameSlot {
    /// Return `true` when no new events are due and the previous frame repeats.
    pub fn is_hold(&self) -> bool {
        self.start == self.end
    }

    /// Number of newly due events.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Return `true` when the slot carries no events.
    pub fn is_empty(&self) -> bool {
        self.is_hold()
    }
}

/// Iterator over the slots of a [`FramePlan`].
#[derive(Clone, Debug)]
pub struct FrameSlots {
    plan: FramePlan,
    next: u64,
    prev_cursor: usize,
}

impl Iterator for FrameSlots {
    type Item = FrameSlot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.plan.frames {
            return None;
        }
        let index = FrameIndex(self.next);
        let end = self.plan.cursor(self.next);
        let slot = FrameSlot {
            index,
            start: self.prev_cursor,
            end,
        };
        self.prev_cursor = end;
        self.next += 1;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.plan.frames - self.next) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for FrameSlots {}

impl std::iter::FusedIterator for FrameSlots {}

#[cfg(test)]
#[path = "../../tests/unit/schedule/plan.rs"]
mod tests;
