//! CSV routine loader.
//!
//! # CSV format
//!
//! One row per routine step, in playback order.  Rows for the same performer
//! need not be contiguous; their relative order is kept.
//!
//! ```csv
//! performer,action,hold_min_secs,hold_max_secs,fade_secs
//! Mint,sleepidle,5,10,0.5
//! Mint,sleeping,17.7,,0.5
//! Kariage,sitting,,,0.5
//! ```
//!
//! **Hold columns:**
//!
//! | `hold_min_secs` | `hold_max_secs` | Meaning                         |
//! |-----------------|-----------------|---------------------------------|
//! | empty           | empty           | `Hold::Forever`                 |
//! | *f*             | empty           | `Hold::Fixed(f)`                |
//! | *a*             | *b*             | `Hold::Between { min: a, max: b }` |
//!
//! Performers come back in order of first appearance.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::routine::{Hold, Routine, RoutineStep};
use crate::ScheduleError;

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RoutineRecord {
    performer:     String,
    action:        String,
    hold_min_secs: Option<f64>,
    hold_max_secs: Option<f64>,
    fade_secs:     f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load named routines from a CSV file.
pub fn load_routines_csv(path: &Path) -> Result<Vec<(String, Routine)>, ScheduleError> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_routines_reader(file)
}

/// Like [`load_routines_csv`] but accepts any `Read` source.
///
/// Useful for tests (pass a `std::io::Cursor`) and for routines embedded in
/// a binary.
pub fn load_routines_reader<R: Read>(reader: R) -> Result<Vec<(String, Routine)>, ScheduleError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut grouped: Vec<(String, Vec<RoutineStep>)> = Vec::new();

    for (line, result) in csv_reader.deserialize::<RoutineRecord>().enumerate() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        let hold = parse_hold(row.hold_min_secs, row.hold_max_secs).map_err(|msg| {
            ScheduleError::Parse(format!("row {}: {msg}", line + 1))
        })?;
        let step = RoutineStep::new(row.action, hold, row.fade_secs);

        match grouped.iter_mut().find(|(name, _)| *name == row.performer) {
            Some((_, steps)) => steps.push(step),
            None => grouped.push((row.performer, vec![step])),
        }
    }

    grouped
        .into_iter()
        .map(|(name, steps)| Routine::new(steps).map(|r| (name, r)))
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_hold(min: Option<f64>, max: Option<f64>) -> Result<Hold, String> {
    match (min, max) {
        (None, None) => Ok(Hold::Forever),
        (Some(secs), None) => Ok(Hold::Fixed(secs)),
        (Some(min), Some(max)) => Ok(Hold::Between { min, max }),
        (None, Some(max)) => Err(format!(
            "hold_max_secs {max} given without hold_min_secs"
        )),
    }
}
