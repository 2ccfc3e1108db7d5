use crate::canvas::state::CanvasSnapshot;
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{PaintlapseError, PaintlapseResult};
use crate::render::frame::FrameRGBA;

/// Largest output frame, in RGBA bytes, a renderer will allocate.
pub const MAX_FRAME_BYTES: usize = 1 << 30;

/// Nearest-neighbor upscaler from canvas snapshots to RGBA frames.
///
/// Every source pixel becomes a solid `scale x scale` block; neighbors are never blended. Output
/// is a pure function of the snapshot and the scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRenderer {
    scale: u32,
}

impl FrameRenderer {
    /// Create a renderer for a positive integer `scale`.
    pub fn new(scale: u32) -> PaintlapseResult<Self> {
        if scale == 0 {
            return Err(PaintlapseError::invalid_parameters(
                "scale factor must be a positive integer",
            ));
        }
        Ok(Self { scale })
    }

    /// Scale factor.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Output dimensions for a canvas of `size`.
    pub fn output_size(&self, size: CanvasSize) -> PaintlapseResult<(u32, u32)> {
        let w = size.width.checked_mul(self.scale);
        let h = size.height.checked_mul(self.scale);
        match (w, h) {
            (Some(w), Some(h)) if frame_bytes(w, h).is_some() => Ok((w, h)),
            _ => Err(PaintlapseError::invalid_parameters(format!(
                "{}x{} canvas at scale {} exceeds the {MAX_FRAME_BYTES}-byte frame limit",
                size.width, size.height, self.scale
            ))),
        }
    }

    /// Render `snap` into a new frame.
    pub fn render(&self, snap: &CanvasSnapshot<'_>) -> PaintlapseResult<FrameRGBA> {
        let (w, h) = self.output_size(snap.size())?;
        let mut frame = FrameRGBA::new(w, h);
        self.render_into(snap, &mut frame)?;
        Ok(frame)
    }

    /// Render `snap` into an existing frame buffer of matching size.
    pub fn render_into(
        &self,
        snap: &CanvasSnapshot<'_>,
        frame: &mut FrameRGBA,
    ) -> PaintlapseResult<()> {
        let (w, h) = self.output_size(snap.size())?;
        let expected_len = (w as usize) * (h as usize) * 4;
        if frame.width != w || frame.height != h || frame.data.len() != expected_len {
            return Err(PaintlapseError::validation(format!(
                "frame buffer is {}x{}, expected {w}x{h}",
                frame.width, frame.height
            )));
        }

        self.fill(snap, &mut frame.data);
        Ok(())
    }

    /// Rasterize into `data`, which must hold exactly the scaled RGBA8 image of `snap`.
    pub(crate) fn fill(&self, snap: &CanvasSnapshot<'_>, data: &mut [u8]) {
        let scale = self.scale as usize;
        let row_bytes = (snap.size().width as usize) * scale * 4;
        debug_assert_eq!(
            data.len(),
            row_bytes * (snap.size().height as usize) * scale
        );
        for (band, src_row) in data.chunks_exact_mut(row_bytes * scale).zip(snap.rows()) {
            let (first, rest) = band.split_at_mut(row_bytes);
            for (dst, color) in first.chunks_exact_mut(4 * scale).zip(src_row) {
                let rgba = color.to_rgba();
                for px in dst.chunks_exact_mut(4) {
                    px.copy_from_slice(&rgba);
                }
            }
            for line in rest.chunks_exact_mut(row_bytes) {
                line.copy_from_slice(first);
            }
        }
    }
}

fn frame_bytes(w: u32, h: u32) -> Option<usize> {
    u64::from(w)
        .checked_mul(u64::from(h))
        .and_then(|px| px.checked_mul(4))
        .and_then(|b| usize::try_from(b).ok())
        .filter(|&b| b <= MAX_FRAME_BYTES)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
