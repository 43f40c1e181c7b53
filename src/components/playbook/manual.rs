use super::models::{DayEmployee, ZoneAssignment};
use crate::error::{Error, PlaybookResult};
use crate::utils::time::{parse_compact_time, TimeRange};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

lazy_static! {
    static ref SEGMENT_SEPARATOR_RE: Regex = Regex::new(r"\s*/\s*").expect("separator pattern");
    static ref COMPACT_RANGE_RE: Regex = Regex::new(
        r"(?i)^(\d{1,4}(?::\d{2})?\s*(?:AM|PM|A|P))\s*[-–]\s*(\d{1,4}(?::\d{2})?\s*(?:AM|PM|A|P))"
    )
    .expect("compact range pattern");
}

/// Parse typed shift text like `9A-5P` or `10A-2P / 3P-7P`.
///
/// Parts that do not parse are dropped.
pub fn parse_shift_text(text: &str) -> Vec<TimeRange> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    SEGMENT_SEPARATOR_RE
        .split(text)
        .filter_map(|part| {
            let caps = COMPACT_RANGE_RE.captures(part.trim())?;
            let start = parse_compact_time(&caps[1])?;
            let end = parse_compact_time(&caps[2])?;
            let range = TimeRange::new(start, end);
            if range.is_none() {
                debug!(part, "Ignoring shift part that does not move forward");
            }
            range
        })
        .collect()
}

/// Fields of an employee typed in by hand, or edited after import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualEntry {
    pub name: String,
    pub shift_text: String,
    pub break_text: String,
    pub job: String,
    pub zone: String,
}

impl ManualEntry {
    /// Prefill the form from an existing employee
    pub fn from_employee(employee: &DayEmployee) -> Self {
        Self {
            name: employee.name.clone(),
            shift_text: employee.shift_text.clone(),
            break_text: employee.break_text.clone(),
            job: employee.job.clone(),
            zone: employee.zone_label(),
        }
    }

    /// Build a day employee; the name must not be empty.
    ///
    /// Shift text is kept as typed and the zone becomes a single zone.
    pub fn into_employee(self) -> PlaybookResult<DayEmployee> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let shift_text = self.shift_text.trim().to_string();
        let zone = self.zone.trim();

        Ok(DayEmployee {
            name: name.to_string(),
            job: self.job.trim().to_string(),
            shift_segments: parse_shift_text(&shift_text),
            shift_text,
            break_text: self.break_text.trim().to_string(),
            zone: if zone.is_empty() {
                ZoneAssignment::Unassigned
            } else {
                ZoneAssignment::Single(zone.to_string())
            },
        })
    }
}
