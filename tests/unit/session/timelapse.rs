use super::*;
use crate::encode::sink::InMemorySink;
use crate::events::model::{DayInfo, SequenceKey};
use crate::foundation::core::CanvasSize;

fn day_log(w: u32, h: u32, pixels: &[(u32, u32, Rgb8)]) -> DayLog {
    let events = pixels
        .iter()
        .enumerate()
        .map(|(i, &(x, y, color))| PaintEvent {
            day: 1,
            x,
            y,
            color,
            seq: SequenceKey::new(100 + i as u64, 0),
        })
        .collect();
    DayLog::new(
        DayInfo {
            day: 1,
            theme: "unit".to_owned(),
            size: CanvasSize::new(w, h).unwrap(),
            started_at: None,
        },
        events,
    )
    .unwrap()
}

fn settings(scale: u32, fps: u32, secs: f64) -> TimelapseSettings {
    TimelapseSettings {
        scale_factor: scale,
        fps: Fps::new(fps, 1).unwrap(),
        duration_secs: secs,
        background: Rgb8::WHITE,
    }
}

const RED: Rgb8 = Rgb8::new(255, 0, 0);

#[test]
fn default_settings_match_cli_defaults() {
    let s = TimelapseSettings::default();
    assert_eq!(s.scale_factor, 5);
    assert_eq!(s.fps, Fps::new(30, 1).unwrap());
    assert_eq!(s.duration_secs, 30.0);
    assert_eq!(s.frame_count().unwrap(), 900);
}

#[test]
fn settings_deserialize_with_defaults() {
    let s: TimelapseSettings =
        serde_json::from_str(r##"{ "scale_factor": 2, "background": "#ffffff" }"##).unwrap();
    assert_eq!(s.scale_factor, 2);
    assert_eq!(s.background, Rgb8::WHITE);
    assert_eq!(s.duration_secs, 30.0);
}

#[test]
fn invalid_parameters_win_over_empty_day() {
    let log = day_log(2, 2, &[]);
    let err = Timelapse::new(&log, &settings(0, 2, 1.0)).unwrap_err();
    assert!(matches!(err, PaintlapseError::InvalidParameters(_)));

    let err = Timelapse::new(&log, &settings(1, 2, 1.0)).unwrap_err();
    assert!(matches!(err, PaintlapseError::EmptyDay { day: 1 }));
}

#[test]
fn frames_restart_from_background_each_pass() {
    let log = day_log(2, 1, &[(0, 0, RED), (1, 0, RED)]);
    let tl = Timelapse::new(&log, &settings(1, 2, 1.0)).unwrap();

    let first: Vec<FrameRGBA> = tl.frames().collect();
    let second: Vec<FrameRGBA> = tl.frames().collect();
    assert_eq!(first, second);
    assert_eq!(first[0].pixel(1, 0), Some([255, 255, 255, 255]));
    assert_eq!(first[1].pixel(1, 0), Some([255, 0, 0, 255]));
}

#[test]
fn hold_slots_repeat_previous_raster_without_rendering() {
    let log = day_log(1, 1, &[(0, 0, RED)]);
    let tl = Timelapse::new(&log, &settings(2, 4, 1.0)).unwrap();

    let mut frames = tl.frames();
    assert_eq!(frames.len(), 4);
    let first = frames.next().unwrap();
    for held in frames.by_ref() {
        assert_eq!(held, first);
    }
    let stats = frames.stats();
    assert_eq!(stats.frames_rendered, 1);
    assert_eq!(stats.frames_held, 3);
    assert_eq!(stats.events_applied, 1);
}

#[test]
fn render_frame_matches_streamed_frame() {
    let pixels: Vec<(u32, u32, Rgb8)> = (0..9)
        .map(|i| (i % 3, i / 3, Rgb8::new(i as u8 * 20, 0, 0)))
        .collect();
    let log = day_log(3, 3, &pixels);
    let tl = Timelapse::new(&log, &settings(2, 4, 1.0)).unwrap();

    for (i, frame) in tl.frames().enumerate() {
        assert_eq!(tl.render_frame(FrameIndex(i as u64)).unwrap(), frame);
    }
    assert!(tl.render_frame(FrameIndex(4)).is_err());
}

#[test]
fn render_to_reports_stats_and_finishes_sink() {
    let log = day_log(2, 2, &[(0, 0, RED), (1, 1, RED), (0, 1, RED)]);
    let tl = Timelapse::new(&log, &settings(3, 2, 3.0)).unwrap();
    let mut sink = InMemorySink::new();
    let stats = tl.render_to(&mut sink).unwrap();

    assert!(sink.is_finished());
    assert_eq!(
        sink.config().unwrap(),
        SinkConfig {
            width: 6,
            height: 6,
            fps: Fps::new(2, 1).unwrap(),
            frame_count: 6,
        }
    );
    assert_eq!(stats.frames_total, 6);
    assert_eq!(stats.frames_rendered + stats.frames_held, 6);
    assert_eq!(stats.events_applied, 3);
    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
}

struct FailingSink {
    fail_at: u64,
    fail_end: bool,
    aborted: bool,
    ended: bool,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> PaintlapseResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, _frame: &FrameRGBA) -> PaintlapseResult<()> {
        if idx.0 == self.fail_at {
            return Err(PaintlapseError::encode("disk full"));
        }
        Ok(())
    }

    fn end(&mut self) -> PaintlapseResult<()> {
        self.ended = true;
        if self.fail_end {
            return Err(PaintlapseError::encode("finalize failed"));
        }
        Ok(())
    }

    fn abort(&mut self) {
        self.aborted = true;
    }
}

#[test]
fn sink_failure_aborts_instead_of_ending() {
    let log = day_log(1, 1, &[(0, 0, RED)]);
    let tl = Timelapse::new(&log, &settings(1, 4, 1.0)).unwrap();
    let mut sink = FailingSink {
        fail_at: 2,
        fail_end: false,
        aborted: false,
        ended: false,
    };
    let err = tl.render_to(&mut sink).unwrap_err();
    assert!(matches!(err, PaintlapseError::Encode(_)));
    assert!(sink.aborted);
    assert!(!sink.ended);
}

#[test]
fn failed_end_still_aborts_the_sink() {
    let log = day_log(1, 1, &[(0, 0, RED)]);
    let tl = Timelapse::new(&log, &settings(1, 4, 1.0)).unwrap();
    let mut sink = FailingSink {
        fail_at: u64::MAX,
        fail_end: true,
        aborted: false,
        ended: false,
    };
    let err = tl.render_to(&mut sink).unwrap_err();
    assert!(matches!(err, PaintlapseError::Encode(_)));
    assert!(sink.ended);
    assert!(sink.aborted);
}
