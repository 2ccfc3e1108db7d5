//! Per-day canvas state.

/// Pixel grid and read-only snapshots.
pub mod state;
