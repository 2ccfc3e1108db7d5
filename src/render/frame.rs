use crate::foundation::error::{PaintlapseError, PaintlapseResult};
use std::path::Path;

/// A rendered frame as opaque RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major. Alpha is always 255.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Allocate a zeroed frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// RGBA bytes of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.data[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy the frame into an `image` buffer.
    pub fn to_image(&self) -> PaintlapseResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            PaintlapseError::validation("frame.data size mismatch with width*height*4")
        })
    }

    /// Write the frame as a PNG file.
    pub fn save_png(&self, path: &Path) -> PaintlapseResult<()> {
        use anyhow::Context as _;
        crate::encode::ffmpeg::ensure_parent_dir(path)?;
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
