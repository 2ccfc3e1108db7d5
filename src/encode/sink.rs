use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::PaintlapseResult;
use crate::render::frame::FrameRGBA;

/// Configuration provided to a [`FrameSink`] at the start of a day's render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frames-per-second.
    pub fps: Fps,
    /// Number of frames that will be pushed before `end`.
    pub frame_count: u64,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// Ordering contract: `push_frame` is called exactly `frame_count` times with indices `0..N` in
/// increasing order, then `end` is called once. When rendering fails midway, `abort` is called
/// instead of `end`; when `end` itself fails, `abort` follows it. Sinks that write files must not
/// leave a finished-looking output behind.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> PaintlapseResult<()>;
    /// Push one frame in strictly increasing timeline order.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PaintlapseResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> PaintlapseResult<()>;
    /// Discard any partial output.
    fn abort(&mut self) {}
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn begin(&mut self, cfg: SinkConfig) -> PaintlapseResult<()> {
        (**self).begin(cfg)
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PaintlapseResult<()> {
        (**self).push_frame(idx, frame)
    }

    fn end(&mut self) -> PaintlapseResult<()> {
        (**self).end()
    }

    fn abort(&mut self) {
        (**self).abort()
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the sink configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg.clone()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Return `true` once `end` has been called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> PaintlapseResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PaintlapseResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> PaintlapseResult<()> {
        self.finished = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.frames.clear();
    }
}
