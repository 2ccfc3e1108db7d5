use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PaintlapseError, PaintlapseResult};
use crate::render::frame::FrameRGBA;
use sha2::{Digest as _, Sha256};

/// Sink that hashes the frame sequence instead of encoding it.
///
/// Two renders produce the same digest exactly when they produce the same frame dimensions, count
/// and bytes. Used to check determinism across runs and machines.
#[derive(Default)]
pub struct DigestSink {
    hasher: Sha256,
    frames: u64,
    digest: Option<String>,
}

impl DigestSink {
    /// Create an empty digest sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hex SHA-256 of the completed sequence, available after `end`.
    pub fn hex_digest(&self) -> Option<&str> {
        self.digest.as_deref()
    }

    /// Frames hashed so far.
    pub fn frames_hashed(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for DigestSink {
    fn begin(&mut self, cfg: SinkConfig) -> PaintlapseResult<()> {
        self.hasher = Sha256::new();
        self.hasher.update(cfg.width.to_le_bytes());
        self.hasher.update(cfg.height.to_le_bytes());
        self.hasher.update(cfg.frame_count.to_le_bytes());
        self.frames = 0;
        self.digest = None;
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, frame: &FrameRGBA) -> PaintlapseResult<()> {
        if self.digest.is_some() {
            return Err(PaintlapseError::encode("digest sink is already finalized"));
        }
        self.hasher.update(&frame.data);
        self.frames += 1;
        Ok(())
    }

    fn end(&mut self) -> PaintlapseResult<()> {
        let digest = std::mem::take(&mut self.hasher).finalize();
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{b:02x}"));
        }
        self.digest = Some(out);
        Ok(())
    }
}
