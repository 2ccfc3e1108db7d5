use crate::foundation::error::{PaintlapseError, PaintlapseResult};
use std::str::FromStr;

/// Absolute 0-based frame index in video timeline space.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> PaintlapseResult<Self> {
        if den == 0 {
            return Err(PaintlapseError::invalid_parameters("fps den must be > 0"));
        }
        if num == 0 {
            return Err(PaintlapseError::invalid_parameters("fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Convert frame count to seconds.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Convert seconds to a frame count, rounding to the nearest frame.
    pub fn secs_to_frames_round(self, secs: f64) -> u64 {
        (secs * f64::from(self.num) / f64::from(self.den))
            .round()
            .max(0.0) as u64
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.den == 1 {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}

/// Parses `30`, `30000/1001` and decimal rates such as `29.97`.
impl FromStr for Fps {
    type Err = PaintlapseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bad = || PaintlapseError::invalid_parameters(format!("invalid frame rate \"{s}\""));

        if let Some((num, den)) = s.split_once('/') {
            let num = num.trim().parse::<u32>().map_err(|_| bad())?;
            let den = den.trim().parse::<u32>().map_err(|_| bad())?;
            return Self::new(num, den);
        }

        let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(bad());
        }
        if frac_part.len() > 6 || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        let int_val = if int_part.is_empty() {
            0
        } else {
            int_part.parse::<u64>().map_err(|_| bad())?
        };
        let den = 10u64.pow(frac_part.len() as u32);
        let frac_val = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse::<u64>().map_err(|_| bad())?
        };
        let num = int_val
            .checked_mul(den)
            .and_then(|v| v.checked_add(frac_val))
            .ok_or_else(bad)?;

        let g = gcd(num, den).max(1);
        let num = u32::try_from(num / g).map_err(|_| bad())?;
        let den = u32::try_from(den / g).map_err(|_| bad())?;
        Self::new(num, den)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Canvas dimensions in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Largest accepted canvas edge, in source pixels.
    pub const MAX_EDGE: u32 = 16_384;

    /// Create validated, non-empty dimensions no larger than [`Self::MAX_EDGE`] per edge.
    pub fn new(width: u32, height: u32) -> PaintlapseResult<Self> {
        if width == 0 || height == 0 {
            return Err(PaintlapseError::validation(format!(
                "canvas dimensions must be non-zero, got {width}x{height}"
            )));
        }
        if width > Self::MAX_EDGE || height > Self::MAX_EDGE {
            return Err(PaintlapseError::validation(format!(
                "canvas {width}x{height} exceeds the {max}x{max} limit",
                max = Self::MAX_EDGE
            )));
        }
        Ok(Self { width, height })
    }

    /// Number of cells in the grid.
    pub fn cell_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Return `true` when `(x, y)` addresses a cell of this canvas.
    pub fn contains(self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Row-major cell index for an in-bounds coordinate.
    pub(crate) fn index_of(self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure black, the default canvas background.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA8 bytes for this color.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl std::fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
