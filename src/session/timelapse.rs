use crate::canvas::state::CanvasState;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::events::model::{DayLog, PaintEvent};
use crate::foundation::core::{Fps, FrameIndex, Rgb8};
use crate::foundation::error::{PaintlapseError, PaintlapseResult};
use crate::render::frame::FrameRGBA;
use crate::render::raster::FrameRenderer;
use crate::schedule::plan::{FramePlan, FrameSlots, frame_count};

/// Rendering parameters for one day's timelapse.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimelapseSettings {
    /// Side length, in output pixels, of one canvas pixel.
    pub scale_factor: u32,
    /// Output frame rate.
    pub fps: Fps,
    /// Target video length in seconds.
    pub duration_secs: f64,
    /// Color of cells nobody has painted yet.
    pub background: Rgb8,
}

impl Default for TimelapseSettings {
    fn default() -> Self {
        Self {
            scale_factor: 5,
            fps: Fps::default(),
            duration_secs: 30.0,
            background: Rgb8::BLACK,
        }
    }
}

impl TimelapseSettings {
    /// Number of frames these settings produce.
    pub fn frame_count(&self) -> PaintlapseResult<u64> {
        let fps = Fps::new(self.fps.num, self.fps.den)?;
        frame_count(self.duration_secs, fps)
    }

    /// Check every parameter without touching any event data.
    pub fn validate(&self) -> PaintlapseResult<()> {
        FrameRenderer::new(self.scale_factor)?;
        self.frame_count()?;
        Ok(())
    }
}

/// Range render statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Total frames in the video.
    pub frames_total: u64,
    /// Frames rasterized from the canvas.
    pub frames_rendered: u64,
    /// Hold frames that repeated the previous raster.
    pub frames_held: u64,
    /// Paint events applied to the canvas.
    pub events_applied: u64,
}

/// One day's timelapse: a validated day log bound to a frame plan and a renderer.
///
/// Building a `Timelapse` performs every check up front (parameters, empty day, output size), so
/// iteration itself cannot fail. Frames are produced lazily by [`Timelapse::frames`]; each call
/// starts over from a fresh background canvas.
#[derive(Clone, Debug)]
pub struct Timelapse<'a> {
    log: &'a DayLog,
    plan: FramePlan,
    renderer: FrameRenderer,
    fps: Fps,
    background: Rgb8,
    width: u32,
    height: u32,
}

impl<'a> Timelapse<'a> {
    /// Bind `log` to `settings`.
    ///
    /// Parameter errors take precedence over [`PaintlapseError::EmptyDay`].
    pub fn new(log: &'a DayLog, settings: &TimelapseSettings) -> PaintlapseResult<Self> {
        let renderer = FrameRenderer::new(settings.scale_factor)?;
        let fps = Fps::new(settings.fps.num, settings.fps.den)?;
        let frames = frame_count(settings.duration_secs, fps)?;
        let (width, height) = renderer.output_size(log.size())?;
        let plan = FramePlan::new(log.day(), log.len(), frames)?;

        tracing::debug!(
            day = log.day(),
            events = log.len(),
            frames,
            sparse = plan.is_sparse(),
            width,
            height,
            "timelapse planned"
        );

        Ok(Self {
            log,
            plan,
            renderer,
            fps,
            background: settings.background,
            width,
            height,
        })
    }

    /// Day number being rendered.
    pub fn day(&self) -> u32 {
        self.log.day()
    }

    /// The event-to-slot partition.
    pub fn plan(&self) -> &FramePlan {
        &self.plan
    }

    /// Number of frames in the video.
    pub fn frame_count(&self) -> u64 {
        self.plan.frame_count()
    }

    /// Output frame dimensions.
    pub fn output_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Configuration handed to sinks in `begin`.
    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            width: self.width,
            height: self.height,
            fps: self.fps,
            frame_count: self.frame_count(),
        }
    }

    /// Start a fresh, forward-only pass over the frames.
    pub fn frames(&self) -> Frames<'a> {
        let frame_total = self.frame_count();
        Frames {
            events: self.log.events(),
            slots: self.plan.slots(),
            canvas: CanvasState::new(self.log.size(), self.background),
            renderer: self.renderer,
            frame: FrameRGBA::new(self.width, self.height),
            stats: RenderStats {
                frames_total: frame_total,
                ..RenderStats::default()
            },
        }
    }

    /// Render one frame in isolation by replaying the events due up to it.
    pub fn render_frame(&self, idx: FrameIndex) -> PaintlapseResult<FrameRGBA> {
        if idx.0 >= self.frame_count() {
            return Err(PaintlapseError::invalid_parameters(format!(
                "frame {} is outside the {}-frame timelapse",
                idx.0,
                self.frame_count()
            )));
        }
        let mut canvas = CanvasState::new(self.log.size(), self.background);
        for ev in &self.log.events()[..self.plan.cursor(idx.0)] {
            canvas.apply_validated(ev);
        }
        self.renderer.render(&canvas.snapshot())
    }

    /// Stream every frame into `sink`.
    ///
    /// On success the sink is ended after the last frame. Any failure, including one from `end`,
    /// aborts the sink so it can discard partial output.
    #[tracing::instrument(skip(self, sink), fields(day = self.day(), frames = self.frame_count()))]
    pub fn render_to(&self, sink: &mut dyn FrameSink) -> PaintlapseResult<RenderStats> {
        if let Err(e) = sink.begin(self.sink_config()) {
            sink.abort();
            return Err(e);
        }

        let mut frames = self.frames();
        while let Some((idx, frame)) = frames.next_frame() {
            if let Err(e) = sink.push_frame(idx, frame) {
                sink.abort();
                return Err(e);
            }
        }
        if let Err(e) = sink.end() {
            sink.abort();
            return Err(e);
        }

        let stats = frames.stats();
        tracing::info!(
            rendered = stats.frames_rendered,
            held = stats.frames_held,
            events = stats.events_applied,
            "timelapse rendered"
        );
        Ok(stats)
    }
}

/// Lazy, forward-only frame sequence of a [`Timelapse`].
///
/// Holds the live canvas and a single frame buffer. Hold slots hand out the previous raster
/// untouched.
#[derive(Debug)]
pub struct Frames<'a> {
    events: &'a [PaintEvent],
    slots: FrameSlots,
    canvas: CanvasState,
    renderer: FrameRenderer,
    frame: FrameRGBA,
    stats: RenderStats,
}

impl Frames<'_> {
    /// Advance one slot and borrow its frame.
    pub fn next_frame(&mut self) -> Option<(FrameIndex, &FrameRGBA)> {
        let slot = self.slots.next()?;
        if slot.is_hold() && slot.index.0 > 0 {
            self.stats.frames_held += 1;
        } else {
            for ev in &self.events[slot.start..slot.end] {
                self.canvas.apply_validated(ev);
            }
            self.stats.events_applied += slot.len() as u64;
            self.renderer.fill(&self.canvas.snapshot(), &mut self.frame.data);
            self.stats.frames_rendered += 1;
        }
        Some((slot.index, &self.frame))
    }

    /// Statistics for the frames produced so far.
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Live canvas after the most recent frame.
    pub fn canvas(&self) -> &CanvasState {
        &self.canvas
    }
}

impl Iterator for Frames<'_> {
    type Item = FrameRGBA;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().map(|(_, frame)| frame.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.slots.size_hint()
    }
}

impl ExactSizeIterator for Frames<'_> {}

impl std::iter::FusedIterator for Frames<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/session/timelapse.rs"]
mod tests;
