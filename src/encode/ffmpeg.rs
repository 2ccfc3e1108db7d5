use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{PaintlapseError, PaintlapseResult};
use crate::render::frame::FrameRGBA;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Command, Stdio};

/// Options for [`FfmpegSink`] MP4 output.
#[derive(Clone, Debug)]
pub struct FfmpegSinkOpts {
    /// Output MP4 file path.
    pub out_path: PathBuf,
    /// Overwrite output file if it already exists.
    pub overwrite: bool,
}

impl FfmpegSinkOpts {
    /// Create options for outputting an MP4 to `out_path`.
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            overwrite: true,
        }
    }
}

/// Sink that spawns the system `ffmpeg` and streams raw frames to its stdin.
///
/// `ffmpeg` writes to a hidden `.part` sibling of the output path. The file is renamed into place
/// only after every announced frame was written and `ffmpeg` exited cleanly; aborting or dropping
/// the sink early deletes the partial file.
pub struct FfmpegSink {
    opts: FfmpegSinkOpts,

    child: Option<Child>,
    stdin: Option<ChildStdin>,
    stderr_drain: Option<std::thread::JoinHandle<std::io::Result<Vec<u8>>>>,

    partial_path: Option<PathBuf>,
    cfg: Option<SinkConfig>,
    frames_written: u64,
}

impl FfmpegSink {
    /// Create a new sink that streams into `ffmpeg`.
    pub fn new(opts: FfmpegSinkOpts) -> Self {
        Self {
            opts,
            child: None,
            stdin: None,
            stderr_drain: None,
            partial_path: None,
            cfg: None,
            frames_written: 0,
        }
    }

    /// Final output path.
    pub fn out_path(&self) -> &Path {
        &self.opts.out_path
    }

    fn discard_partial(&mut self) {
        drop(self.stdin.take());
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(handle) = self.stderr_drain.take() {
            let _ = handle.join();
        }
        if let Some(path) = self.partial_path.take() {
            let _ = std::fs::remove_file(&path);
        }
        self.cfg = None;
    }

    fn finish(&mut self) -> PaintlapseResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| PaintlapseError::encode("ffmpeg sink not started"))?;
        if self.frames_written != cfg.frame_count {
            return Err(PaintlapseError::encode(format!(
                "ffmpeg sink received {} of {} frames",
                self.frames_written, cfg.frame_count
            )));
        }

        drop(self.stdin.take());
        let mut child = self
            .child
            .take()
            .ok_or_else(|| PaintlapseError::encode("ffmpeg sink not started"))?;

        let status = child.wait().map_err(|e| {
            PaintlapseError::encode(format!("failed to wait for ffmpeg to finish: {e}"))
        })?;
        let stderr_bytes = match self.stderr_drain.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| PaintlapseError::encode("ffmpeg stderr drain thread panicked"))?
                .map_err(|e| PaintlapseError::encode(format!("ffmpeg stderr read failed: {e}")))?,
            None => Vec::new(),
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr_bytes);
            return Err(PaintlapseError::encode(format!(
                "ffmpeg exited with status {}: {}",
                status,
                stderr.trim()
            )));
        }

        let partial = self
            .partial_path
            .take()
            .ok_or_else(|| PaintlapseError::encode("ffmpeg sink lost its partial output path"))?;
        if let Err(e) = std::fs::rename(&partial, &self.opts.out_path) {
            let _ = std::fs::remove_file(&partial);
            return Err(PaintlapseError::encode(format!(
                "move '{}' to '{}': {e}",
                partial.display(),
                self.opts.out_path.display()
            )));
        }

        self.cfg = None;
        Ok(())
    }
}

impl FrameSink for FfmpegSink {
    fn begin(&mut self, cfg: SinkConfig) -> PaintlapseResult<()> {
        if cfg.fps.num == 0 || cfg.fps.den == 0 {
            return Err(PaintlapseError::invalid_parameters("fps must be non-zero"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(PaintlapseError::invalid_parameters(
                "ffmpeg sink width/height must be non-zero",
            ));
        }
        if self.child.is_some() {
            return Err(PaintlapseError::encode("ffmpeg sink already started"));
        }

        ensure_parent_dir(&self.opts.out_path)?;
        if !self.opts.overwrite && self.opts.out_path.exists() {
            return Err(PaintlapseError::validation(format!(
                "output file '{}' already exists",
                self.opts.out_path.display()
            )));
        }

        if !is_ffmpeg_on_path() {
            return Err(PaintlapseError::encode(
                "ffmpeg is required for MP4 encoding, but was not found on PATH",
            ));
        }

        let partial_path = partial_path_for(&self.opts.out_path)?;

        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd.arg("-y");

        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", cfg.width, cfg.height),
        ]);
        push_input_fps(&mut cmd, cfg.fps);
        cmd.args(["-i", "pipe:0"]);

        // yuv420p needs even dimensions; odd canvases get one padding row/column.
        cmd.args([
            "-an",
            "-vf",
            "pad=ceil(iw/2)*2:ceil(ih/2)*2",
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
            "-f",
            "mp4",
        ]);
        cmd.arg(&partial_path);

        let mut child = cmd.spawn().map_err(|e| {
            PaintlapseError::encode(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| PaintlapseError::encode("failed to open ffmpeg stdin (unexpected)"))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| PaintlapseError::encode("failed to open ffmpeg stderr (unexpected)"))?;
        let stderr_drain = std::thread::spawn(move || {
            let mut stderr_bytes = Vec::new();
            stderr.read_to_end(&mut stderr_bytes)?;
            Ok(stderr_bytes)
        });

        tracing::debug!(
            out = %self.opts.out_path.display(),
            width = cfg.width,
            height = cfg.height,
            fps = %cfg.fps,
            frames = cfg.frame_count,
            "ffmpeg started"
        );

        self.child = Some(child);
        self.stdin = Some(stdin);
        self.stderr_drain = Some(stderr_drain);
        self.partial_path = Some(partial_path);
        self.cfg = Some(cfg);
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> PaintlapseResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| PaintlapseError::encode("ffmpeg sink not started"))?;
        if idx.0 != self.frames_written {
            return Err(PaintlapseError::encode(format!(
                "ffmpeg sink expected frame {}, got {}",
                self.frames_written, idx.0
            )));
        }
        if self.frames_written >= cfg.frame_count {
            return Err(PaintlapseError::encode(
                "ffmpeg sink received more frames than announced",
            ));
        }

        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(PaintlapseError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 4 {
            return Err(PaintlapseError::validation(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(PaintlapseError::encode("ffmpeg sink is already finalized"));
        };

        use std::io::Write as _;
        stdin.write_all(&frame.data).map_err(|e| {
            PaintlapseError::encode(format!("failed to write frame to ffmpeg stdin: {e}"))
        })?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> PaintlapseResult<()> {
        let res = self.finish();
        if res.is_err() {
            self.discard_partial();
        }
        res
    }

    fn abort(&mut self) {
        self.discard_partial();
    }
}

impl Drop for FfmpegSink {
    fn drop(&mut self) {
        if self.child.is_some() || self.partial_path.is_some() {
            self.discard_partial();
        }
    }
}

fn push_input_fps(cmd: &mut Command, fps: Fps) {
    // For rawvideo input, use `-r` before `-i` to specify the input framerate.
    cmd.args(["-r", &format!("{}/{}", fps.num, fps.den)]);
}

fn partial_path_for(out_path: &Path) -> PaintlapseResult<PathBuf> {
    let name = out_path.file_name().ok_or_else(|| {
        PaintlapseError::validation(format!(
            "output path '{}' has no file name",
            out_path.display()
        ))
    })?;
    let mut partial = std::ffi::OsString::from(".");
    partial.push(name);
    partial.push(".part");
    Ok(out_path.with_file_name(partial))
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> PaintlapseResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
