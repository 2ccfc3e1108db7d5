/// Convenience result type used across paintlapse.
pub type PaintlapseResult<T> = Result<T, PaintlapseError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant aborts the render of the current day only. Batch runs report errors per day and
/// keep rendering sibling days.
#[derive(thiserror::Error, Debug)]
pub enum PaintlapseError {
    /// A paint event addresses a pixel outside the day's canvas.
    #[error("out of bounds: pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        /// Event x coordinate.
        x: u32,
        /// Event y coordinate.
        y: u32,
        /// Canvas width in pixels.
        width: u32,
        /// Canvas height in pixels.
        height: u32,
    },

    /// The requested day has no paint events.
    #[error("empty day: day {day} has no paint events")]
    EmptyDay {
        /// Day number.
        day: u32,
    },

    /// Non-positive scale/duration/frame rate, or a degenerate frame count.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Theme or canvas dimensions change within one day, or an event belongs to another day.
    #[error("canvas mismatch: {0}")]
    CanvasMismatch(String),

    /// Malformed input data that is not covered by a more specific variant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failures while handing frames to an encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PaintlapseError {
    /// Build a [`PaintlapseError::InvalidParameters`] value.
    pub fn invalid_parameters(msg: impl Into<String>) -> Self {
        Self::InvalidParameters(msg.into())
    }

    /// Build a [`PaintlapseError::CanvasMismatch`] value.
    pub fn canvas_mismatch(msg: impl Into<String>) -> Self {
        Self::CanvasMismatch(msg.into())
    }

    /// Build a [`PaintlapseError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PaintlapseError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`PaintlapseError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for errors that only mean "nothing to render".
    ///
    /// Batch runs log these as skipped days instead of failures.
    pub fn is_empty_day(&self) -> bool {
        matches!(self, Self::EmptyDay { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
