use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::FrameSink;
use crate::events::source::EventSource;
use crate::foundation::error::{PaintlapseError, PaintlapseResult};
use crate::session::naming::output_file_name;
use crate::session::timelapse::{RenderStats, Timelapse, TimelapseSettings};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Options controlling multi-day batch rendering.
#[derive(Clone, Debug)]
pub struct RenderOpts {
    /// Render independent days concurrently (rayon), using a dedicated thread pool.
    pub parallel: bool,
    /// Override the number of rayon worker threads. `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Overwrite existing output files.
    pub overwrite: bool,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            overwrite: true,
        }
    }
}

/// A successfully rendered day.
#[derive(Clone, Debug)]
pub struct DayReport {
    /// Day number.
    pub day: u32,
    /// Path the sink was created for.
    pub out_path: PathBuf,
    /// Render statistics.
    pub stats: RenderStats,
}

/// Result of one day inside a batch run.
#[derive(Debug)]
pub struct DayOutcome {
    /// Day number.
    pub day: u32,
    /// Report, or the error that stopped this day.
    pub result: PaintlapseResult<DayReport>,
}

impl DayOutcome {
    /// Return `true` when the day was skipped for having no events.
    pub fn is_skipped(&self) -> bool {
        matches!(&self.result, Err(e) if e.is_empty_day())
    }

    /// Return `true` when the day failed for any other reason.
    pub fn is_failed(&self) -> bool {
        self.result.is_err() && !self.is_skipped()
    }
}

/// Load, plan and render one day into the sink built by `make_sink`.
///
/// `make_sink` receives `out_dir` joined with the day's output file name.
pub fn render_day<S, F>(
    source: &dyn EventSource,
    day: u32,
    settings: &TimelapseSettings,
    out_dir: &Path,
    make_sink: &F,
) -> PaintlapseResult<DayReport>
where
    S: FrameSink,
    F: Fn(&Path) -> S,
{
    let log = source.load_day(day)?;
    let timelapse = Timelapse::new(&log, settings)?;
    let out_path = out_dir.join(output_file_name(log.info()));
    let mut sink = make_sink(&out_path);
    let stats = timelapse.render_to(&mut sink)?;
    Ok(DayReport {
        day,
        out_path,
        stats,
    })
}

/// Render every day in `days`, each as an independent unit of failure.
///
/// Settings are validated once before any day is touched; an invalid setting fails the whole call.
/// Past that point a failing day is recorded in its [`DayOutcome`] and the remaining days still
/// render. Outcomes are returned in the order of `days`.
pub fn render_days<S, F>(
    source: &dyn EventSource,
    days: &[u32],
    settings: &TimelapseSettings,
    out_dir: &Path,
    opts: &RenderOpts,
    make_sink: F,
) -> PaintlapseResult<Vec<DayOutcome>>
where
    S: FrameSink,
    F: Fn(&Path) -> S + Sync,
{
    settings.validate()?;

    let run = |day: u32| {
        let result = render_day(source, day, settings, out_dir, &make_sink);
        match &result {
            Ok(report) => tracing::info!(
                day,
                out = %report.out_path.display(),
                frames = report.stats.frames_total,
                "day rendered"
            ),
            Err(e) if e.is_empty_day() => tracing::warn!(day, "skipping day without events"),
            Err(e) => tracing::error!(day, error = %e, "day failed"),
        }
        DayOutcome { day, result }
    };

    if !opts.parallel || days.len() < 2 {
        return Ok(days.iter().map(|&d| run(d)).collect());
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = opts.threads {
        builder = builder.num_threads(threads.max(1));
    }
    let pool = builder.build().map_err(|e| {
        PaintlapseError::Other(anyhow::anyhow!("failed to build render thread pool: {e}"))
    })?;
    Ok(pool.install(|| days.par_iter().map(|&d| run(d)).collect()))
}

/// Render `days` to MP4 files in `out_dir` through the system `ffmpeg`.
pub fn render_days_to_mp4(
    source: &dyn EventSource,
    days: &[u32],
    settings: &TimelapseSettings,
    out_dir: &Path,
    opts: &RenderOpts,
) -> PaintlapseResult<Vec<DayOutcome>> {
    let overwrite = opts.overwrite;
    render_days(source, days, settings, out_dir, opts, |path: &Path| {
        FfmpegSink::new(FfmpegSinkOpts {
            out_path: path.to_path_buf(),
            overwrite,
        })
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/batch.rs"]
mod tests;
