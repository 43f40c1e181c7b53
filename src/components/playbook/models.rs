use super::split::{validate_segments, SplitError};
use crate::components::report::DayColumn;
use crate::components::zones::ZoneConfig;
use crate::error::{Error, PlaybookResult};
use crate::utils::time::{TimePoint, TimeRange};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One explicit zone assignment inside an employee's shift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSegment {
    pub range: TimeRange,
    pub zone: String,
}

impl ZoneSegment {
    pub fn new(range: TimeRange, zone: &str) -> Self {
        Self {
            range,
            zone: zone.to_string(),
        }
    }

    pub fn start(&self) -> TimePoint {
        self.range.start()
    }

    pub fn end(&self) -> TimePoint {
        self.range.end()
    }
}

/// How an employee's shift maps onto zones
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "zones", rename_all = "snake_case")]
pub enum ZoneAssignment {
    #[default]
    Unassigned,
    /// One zone for the whole shift, breaks included
    Single(String),
    /// Ordered segments; break gaps take the zone of the segment before them
    Split(Vec<ZoneSegment>),
}

impl ZoneAssignment {
    pub fn is_assigned(&self) -> bool {
        !matches!(self, ZoneAssignment::Unassigned)
    }

    /// Text for the zone column: the single zone, or split zones in first-use order
    pub fn label(&self) -> String {
        match self {
            ZoneAssignment::Unassigned => String::new(),
            ZoneAssignment::Single(name) => name.clone(),
            ZoneAssignment::Split(segments) => {
                let mut names: Vec<&str> = Vec::new();
                for segment in segments {
                    if !names.contains(&segment.zone.as_str()) {
                        names.push(&segment.zone);
                    }
                }
                names.join(" / ")
            }
        }
    }
}

/// An employee as scheduled on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEmployee {
    pub name: String,
    pub job: String,
    pub shift_text: String,
    pub shift_segments: Vec<TimeRange>,
    pub break_text: String,
    #[serde(default)]
    pub zone: ZoneAssignment,
}

impl DayEmployee {
    /// Overall shift from the first segment's start to the last segment's end
    pub fn span(&self) -> Option<TimeRange> {
        let first = self.shift_segments.first()?;
        let last = self.shift_segments.last()?;
        TimeRange::new(first.start(), last.end())
    }

    pub fn shift_start(&self) -> Option<TimePoint> {
        self.span().map(|s| s.start())
    }

    pub fn shift_end(&self) -> Option<TimePoint> {
        self.span().map(|s| s.end())
    }

    pub fn zone_label(&self) -> String {
        self.zone.label()
    }

    /// Give the whole shift one zone, replacing any split
    pub fn assign_zone(&mut self, zone: &str) {
        let zone = zone.trim();
        self.zone = if zone.is_empty() {
            ZoneAssignment::Unassigned
        } else {
            ZoneAssignment::Single(zone.to_string())
        };
    }

    pub fn clear_zone(&mut self) {
        self.zone = ZoneAssignment::Unassigned;
    }

    /// Replace the assignment with explicit zone segments
    pub fn apply_split(&mut self, segments: Vec<ZoneSegment>) -> Result<(), SplitError> {
        let span = self.span().ok_or(SplitError::NoShift)?;
        validate_segments(&segments, span)?;
        self.zone = ZoneAssignment::Split(segments);
        Ok(())
    }
}

/// The employees shown for one day, in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: Option<DayColumn>,
    employees: Vec<DayEmployee>,
}

impl DaySchedule {
    pub fn new(day: Option<DayColumn>, employees: Vec<DayEmployee>) -> Self {
        Self { day, employees }
    }

    pub fn employees(&self) -> &[DayEmployee] {
        &self.employees
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Title such as `Monday 3/3`
    pub fn title(&self) -> String {
        self.day.as_ref().map(DayColumn::title).unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> PlaybookResult<&DayEmployee> {
        self.employees
            .get(index)
            .ok_or(Error::UnknownEmployee(index))
    }

    pub fn get_mut(&mut self, index: usize) -> PlaybookResult<&mut DayEmployee> {
        self.employees
            .get_mut(index)
            .ok_or(Error::UnknownEmployee(index))
    }

    /// Swap an employee with the one above; false when already first
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.employees.len() {
            return false;
        }
        self.employees.swap(index, index - 1);
        true
    }

    /// Swap an employee with the one below; false when already last
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.employees.len() {
            return false;
        }
        self.employees.swap(index, index + 1);
        true
    }

    pub fn push(&mut self, employee: DayEmployee) {
        self.employees.push(employee);
    }

    pub fn replace(&mut self, index: usize, employee: DayEmployee) -> PlaybookResult<DayEmployee> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, employee))
    }

    pub fn remove(&mut self, index: usize) -> PlaybookResult<DayEmployee> {
        if index >= self.employees.len() {
            return Err(Error::UnknownEmployee(index));
        }
        Ok(self.employees.remove(index))
    }

    pub fn assign_zone(&mut self, index: usize, zone: &str) -> PlaybookResult<()> {
        self.get_mut(index)?.assign_zone(zone);
        Ok(())
    }

    /// Assign the zone bound to a numeric key; returns false when the key is unbound
    pub fn assign_hotkey(
        &mut self,
        index: usize,
        key: usize,
        zones: &ZoneConfig,
    ) -> PlaybookResult<bool> {
        let Some(zone) = zones.by_hotkey(key) else {
            debug!(key, "No zone bound to hotkey");
            return Ok(false);
        };
        self.assign_zone(index, &zone.name)?;
        Ok(true)
    }

    pub fn clear_zone(&mut self, index: usize) -> PlaybookResult<()> {
        self.get_mut(index)?.clear_zone();
        Ok(())
    }

    pub fn apply_split(&mut self, index: usize, segments: Vec<ZoneSegment>) -> PlaybookResult<()> {
        self.get_mut(index)?.apply_split(segments)?;
        Ok(())
    }

    /// How many employees have a zone
    pub fn zoned_count(&self) -> usize {
        self.employees
            .iter()
            .filter(|e| e.zone.is_assigned())
            .count()
    }
}
