//! Event-to-frame scheduling.

/// Frame-count resolution and the cumulative slot partition.
pub mod plan;
