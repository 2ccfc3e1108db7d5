//! Day-level rendering sessions.
//!
//! A [`timelapse::Timelapse`] binds one validated day log to a frame plan and renders it into a
//! sink. [`batch`] drives many days, each as an independent unit of failure.

/// Multi-day batch rendering.
pub mod batch;
/// Output file naming.
pub mod naming;
/// Single-day timelapse assembly.
pub mod timelapse;
