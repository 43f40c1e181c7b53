use super::models::{DayEmployee, ZoneAssignment};
use crate::utils::time::TimePoint;

/// Zone shown in the slot starting at `slot`, or `""` when none applies.
///
/// A single zone covers the whole shift, break gaps included. With a split,
/// a slot inside a segment takes that segment's zone and a slot in a gap
/// takes the zone of the last segment ending at or before it.
pub fn zone_for_slot(employee: &DayEmployee, slot: TimePoint) -> &str {
    let Some(span) = employee.span() else {
        return "";
    };

    match &employee.zone {
        ZoneAssignment::Unassigned => "",
        ZoneAssignment::Single(zone) if span.contains(slot) => zone.as_str(),
        ZoneAssignment::Single(_) => "",
        ZoneAssignment::Split(segments) => {
            if let Some(segment) = segments.iter().find(|s| s.range.contains(slot)) {
                return segment.zone.as_str();
            }
            if !span.contains(slot) {
                return "";
            }
            segments
                .iter()
                .filter(|s| s.end() <= slot)
                .last()
                .map(|s| s.zone.as_str())
                .unwrap_or("")
        }
    }
}
