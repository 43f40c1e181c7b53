use super::classifier::{find_reporting_period, RowClassifier, RowEvent};
use super::models::{DayColumn, EmployeeRecord, Grid, ParsedReport, ReportLayout};
use crate::utils::time::TimeRange;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Accumulates classified rows into employee records.
///
/// An employee stays pending while continuation rows may still add shifts to
/// it and is appended to the result when the next employee starts or the
/// grid ends.
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    department: String,
    days: BTreeMap<usize, DayColumn>,
    pending: Option<EmployeeRecord>,
    employees: Vec<EmployeeRecord>,
}

impl ScheduleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one classifier event into the model
    pub fn apply(&mut self, event: RowEvent) {
        match event {
            RowEvent::Department(department) => self.department = department,
            RowEvent::DayColumns(days) => self.days = days,
            RowEvent::Employee { name, job, shifts } => {
                self.close_pending();
                self.pending = Some(EmployeeRecord {
                    name,
                    job,
                    department: self.department.clone(),
                    shifts_by_day: shifts,
                });
            }
            RowEvent::Continuation { shifts } => match self.pending.as_mut() {
                Some(employee) => {
                    for (column, ranges) in shifts {
                        employee
                            .shifts_by_day
                            .entry(column)
                            .or_default()
                            .extend(ranges);
                    }
                }
                None => warn!("Continuation row without an employee, ignoring"),
            },
            RowEvent::Skipped => {}
        }
    }

    fn close_pending(&mut self) {
        if let Some(mut employee) = self.pending.take() {
            for (column, ranges) in employee.shifts_by_day.iter_mut() {
                normalize_ranges(&employee.name, *column, ranges);
            }
            self.employees.push(employee);
        }
    }

    /// Close the last employee and return the finished report
    pub fn finish(mut self, time_period: String) -> ParsedReport {
        self.close_pending();
        ParsedReport {
            time_period,
            days: self.days,
            employees: self.employees,
        }
    }
}

/// Sort a day's ranges by start and drop any that overlap an earlier one
fn normalize_ranges(name: &str, column: usize, ranges: &mut Vec<TimeRange>) {
    ranges.sort_by_key(TimeRange::start);
    let mut kept: Vec<TimeRange> = Vec::with_capacity(ranges.len());
    for range in ranges.drain(..) {
        match kept.last() {
            Some(prev) if range.start() < prev.end() => {
                warn!(employee = name, column, %range, "Dropping overlapping shift segment");
            }
            _ => kept.push(range),
        }
    }
    *ranges = kept;
}

/// Read a weekly schedule grid into employee records
pub fn parse_report(grid: &Grid, layout: &ReportLayout) -> ParsedReport {
    let time_period = find_reporting_period(grid, layout.period_scan_rows).unwrap_or_default();

    let mut builder = ScheduleBuilder::new();
    for classified in RowClassifier::new(grid, layout) {
        builder.apply(classified.event);
    }
    let report = builder.finish(time_period);

    info!(
        employees = report.employees.len(),
        days = report.days.len(),
        period = %report.time_period,
        "Parsed schedule report"
    );
    if report.days.is_empty() {
        warn!("No day columns found in the report");
    }
    report
}
