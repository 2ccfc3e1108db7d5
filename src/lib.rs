//! Paintlapse turns a collaborative pixel canvas's daily paint log into a timelapse video.
//!
//! Each day is rendered independently:
//!
//! - Load a validated [`DayLog`] from an [`EventSource`] (for example [`JsonEventLog`])
//! - Bind it to [`TimelapseSettings`] as a [`Timelapse`], which plans events onto frames
//! - Stream the frames into a [`FrameSink`], such as [`FfmpegSink`] for MP4 output
//!
//! Rendering is deterministic: the same log and settings always produce byte-identical frames.
//! [`render_days`] drives many days at once and reports a [`DayOutcome`] per day.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Per-day canvas state.
pub mod canvas;
/// Encoding sinks.
pub mod encode;
/// Paint-event model and sources.
pub mod events;
/// Canvas rasterization.
pub mod render;
/// Event-to-frame scheduling.
pub mod schedule;
/// Day-level rendering sessions.
pub mod session;

pub use crate::foundation::core::{CanvasSize, Fps, FrameIndex, Rgb8};
pub use crate::foundation::error::{PaintlapseError, PaintlapseResult};

pub use crate::canvas::state::{CanvasSnapshot, CanvasState};
pub use crate::encode::digest::DigestSink;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::events::color::{ColorRef, Palette};
pub use crate::events::model::{DayInfo, DayLog, PaintEvent, SequenceKey};
pub use crate::events::source::{EventSource, JsonEventLog};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::raster::FrameRenderer;
pub use crate::schedule::plan::{FramePlan, FrameSlot, frame_count};
pub use crate::session::batch::{
    DayOutcome, DayReport, RenderOpts, render_day, render_days, render_days_to_mp4,
};
pub use crate::session::naming::output_file_name;
pub use crate::session::timelapse::{Frames, RenderStats, Timelapse, TimelapseSettings};
