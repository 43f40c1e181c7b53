use super::models::{DayEmployee, DaySchedule, ZoneAssignment};
use crate::components::report::{DayColumn, ParsedReport};
use crate::utils::time::{format_time_short, TimeRange};
use tracing::info;

/// Shift text such as `10A-2P / 3P-7P`
pub fn shift_text(segments: &[TimeRange]) -> String {
    segments
        .iter()
        .map(TimeRange::format_short)
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Break start (end of the first segment) when the shift has a gap
pub fn break_text(segments: &[TimeRange]) -> String {
    match segments {
        [first, _, ..] => format_time_short(first.end()),
        _ => String::new(),
    }
}

/// Employees working in a day column, in report order.
///
/// Employees without a shift in the column are left out.
pub fn extract_day_schedule(report: &ParsedReport, column: usize) -> Vec<DayEmployee> {
    report
        .employees
        .iter()
        .filter_map(|employee| {
            let mut segments = employee.shifts_for(column).to_vec();
            if segments.is_empty() {
                return None;
            }
            segments.sort_by_key(TimeRange::start);

            Some(DayEmployee {
                name: employee.name.clone(),
                job: employee.job.clone(),
                shift_text: shift_text(&segments),
                break_text: break_text(&segments),
                shift_segments: segments,
                zone: ZoneAssignment::Unassigned,
            })
        })
        .collect()
}

/// Project one day of the report into an editable schedule
pub fn project_day(report: &ParsedReport, day: &DayColumn) -> DaySchedule {
    let employees = extract_day_schedule(report, day.index);
    info!(
        day = %day.label(),
        employees = employees.len(),
        "Loaded day schedule"
    );
    DaySchedule::new(Some(day.clone()), employees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::parse_time_range;

    fn ranges(texts: &[&str]) -> Vec<TimeRange> {
        texts.iter().filter_map(|t| parse_time_range(t)).collect()
    }

    #[test]
    fn test_shift_and_break_text() {
        let split = ranges(&["10 AM - 2 PM", "3 PM - 7:30 PM"]);
        assert_eq!(shift_text(&split), "10A-2P / 3P-730P");
        assert_eq!(break_text(&split), "2P");

        let single = ranges(&["9 AM - 5 PM"]);
        assert_eq!(shift_text(&single), "9A-5P");
        assert_eq!(break_text(&single), "");
        assert_eq!(shift_text(&[]), "");
    }
}
