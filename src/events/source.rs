use crate::events::color::{ColorRef, Palette};
use crate::events::model::{DayInfo, DayLog, PaintEvent, SequenceKey};
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{PaintlapseError, PaintlapseResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Supplier of per-day paint logs.
///
/// Implementations must hand out events already sorted by [`SequenceKey`]; the engine never
/// reorders them.
pub trait EventSource: Send + Sync {
    /// Day numbers available from this source, ascending.
    fn days(&self) -> PaintlapseResult<Vec<u32>>;

    /// Load and validate one day's log.
    ///
    /// A day the source has never seen fails with [`PaintlapseError::EmptyDay`].
    fn load_day(&self, day: u32) -> PaintlapseResult<DayLog>;
}

/// JSON event-log file, as exported by an upstream chain indexer.
///
/// ```json
/// {
///   "days": [
///     {
///       "day": 1,
///       "theme": "Sunrise",
///       "width": 256,
///       "height": 256,
///       "started_at": 1691596800,
///       "palette": ["#000000", "#ff3366"],
///       "events": [{ "block": 2385190, "index": 0, "x": 3, "y": 4, "color": 1 }]
///     }
///   ]
/// }
/// ```
///
/// A day may appear in several records (one per export chunk); the records are concatenated in
/// file order and must agree on theme and dimensions. `width`/`height` may be omitted together, in
/// which case the canvas is sized to fit the painted coordinates.
#[derive(Debug, Clone, Default)]
pub struct JsonEventLog {
    days: BTreeMap<u32, Vec<DayRecord>>,
}

#[derive(Debug, Clone, Deserialize)]
struct EventLogDef {
    days: Vec<DayRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct DayRecord {
    day: u32,
    #[serde(default)]
    theme: String,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    started_at: Option<i64>,
    #[serde(default)]
    palette: Palette,
    #[serde(default)]
    events: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
struct EventRecord {
    block: u64,
    #[serde(default)]
    index: u32,
    x: u32,
    y: u32,
    color: ColorRef,
    #[serde(default)]
    day: Option<u32>,
}

impl JsonEventLog {
    /// Parse an event log from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PaintlapseResult<Self> {
        let def: EventLogDef = serde_json::from_reader(r)
            .map_err(|e| PaintlapseError::serde(format!("parse event log JSON: {e}")))?;
        let mut days = BTreeMap::<u32, Vec<DayRecord>>::new();
        for rec in def.days {
            days.entry(rec.day).or_default().push(rec);
        }
        Ok(Self { days })
    }

    /// Parse an event log from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PaintlapseResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PaintlapseError::validation(format!("open event log '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    fn resolve_size(
        day: u32,
        first: &DayRecord,
        events: &[PaintEvent],
    ) -> PaintlapseResult<CanvasSize> {
        match (first.width, first.height) {
            (Some(w), Some(h)) => CanvasSize::new(w, h),
            (None, None) => {
                let max_x = events.iter().map(|e| e.x).max();
                let max_y = events.iter().map(|e| e.y).max();
                match (max_x, max_y) {
                    (Some(x), Some(y)) => {
                        CanvasSize::new(x.saturating_add(1), y.saturating_add(1))
                    }
                    _ => Err(PaintlapseError::EmptyDay { day }),
                }
            }
            _ => Err(PaintlapseError::validation(format!(
                "day {day} must declare both width and height, or neither"
            ))),
        }
    }
}

impl EventSource for JsonEventLog {
    fn days(&self) -> PaintlapseResult<Vec<u32>> {
        Ok(self.days.keys().copied().collect())
    }

    fn load_day(&self, day: u32) -> PaintlapseResult<DayLog> {
        let records = self
            .days
            .get(&day)
            .filter(|r| !r.is_empty())
            .ok_or(PaintlapseError::EmptyDay { day })?;
        let first = &records[0];

        for rec in &records[1..] {
            if rec.theme != first.theme {
                return Err(PaintlapseError::canvas_mismatch(format!(
                    "day {day} changes theme from \"{}\" to \"{}\"",
                    first.theme, rec.theme
                )));
            }
            if rec.width != first.width || rec.height != first.height {
                return Err(PaintlapseError::canvas_mismatch(format!(
                    "day {day} changes canvas dimensions from {:?}x{:?} to {:?}x{:?}",
                    first.width, first.height, rec.width, rec.height
                )));
            }
        }

        let total = records.iter().map(|r| r.events.len()).sum();
        let mut events = Vec::with_capacity(total);
        for rec in records {
            for ev in &rec.events {
                events.push(PaintEvent {
                    day: ev.day.unwrap_or(rec.day),
                    x: ev.x,
                    y: ev.y,
                    color: rec.palette.resolve(ev.color)?,
                    seq: SequenceKey::new(ev.block, ev.index),
                });
            }
        }

        let info = DayInfo {
            day,
            theme: first.theme.clone(),
            size: Self::resolve_size(day, first, &events)?,
            started_at: records.iter().filter_map(|r| r.started_at).min(),
        };
        DayLog::new(info, events)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/events/source.rs"]
mod tests;
