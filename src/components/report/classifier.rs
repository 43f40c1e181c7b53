//! Row classification for weekly schedule exports.
//!
//! The export carries no schema: a row's role is inferred from column A and
//! from where the scan currently is. The scanner walks the grid top to bottom
//! as a small state machine and yields one [`ClassifiedRow`] per step.

use super::models::{Cell, DayColumn, Grid, ReportLayout};
use crate::utils::time::{parse_time_range, weekday_from_abbrev, TimeRange};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

lazy_static! {
    static ref PERIOD_RE: Regex =
        Regex::new(r"^\d+/\d+/\d+\s*-\s*\d+/\d+/\d+").expect("reporting period pattern");
}

/// Where the scan is relative to the report structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Outside any employee block
    Scanning,
    /// Just read a day header, no employee yet
    InHeaderBlock,
    /// After an employee row; unnamed rows extend that employee
    InEmployeeBlock,
}

/// What column A says about a row, independent of scan state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowShape {
    Department(String),
    ColumnHeader,
    EmployeeName(String),
    Unnamed,
    Other,
}

/// What the scanner does with a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    EnterDepartment,
    ReadDayHeader,
    StartEmployee,
    ExtendEmployee,
    Skip,
}

/// Structural event produced for one or more rows
#[derive(Debug, Clone, PartialEq)]
pub enum RowEvent {
    Department(String),
    DayColumns(BTreeMap<usize, DayColumn>),
    Employee {
        name: String,
        job: String,
        shifts: BTreeMap<usize, Vec<TimeRange>>,
    },
    Continuation {
        shifts: BTreeMap<usize, Vec<TimeRange>>,
    },
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRow {
    /// Index of the first row consumed
    pub row: usize,
    /// Number of rows consumed (two for a header and its date row)
    pub consumed: usize,
    pub event: RowEvent,
}

/// Shape of a row judged from its first cell
pub fn row_shape(first: &Cell, layout: &ReportLayout) -> RowShape {
    if first.is_empty() {
        return RowShape::Unnamed;
    }
    let Some(text) = first.as_text() else {
        return RowShape::Other;
    };

    if text.starts_with(&layout.department_prefix) {
        let department = text.rsplit('/').next().unwrap_or(text).trim();
        return RowShape::Department(department.to_string());
    }
    let text = text.trim();
    if text == layout.header_label {
        return RowShape::ColumnHeader;
    }
    if text.contains(',') {
        return RowShape::EmployeeName(text.to_string());
    }
    RowShape::Other
}

/// Transition table of the scanner.
///
/// Only the next name row ends an employee block; department and header rows
/// repeated at page breaks keep it open for continuation rows.
pub fn transition(state: ScanState, shape: &RowShape) -> (ScanState, RowAction) {
    use RowAction::*;
    use ScanState::*;

    match (state, shape) {
        (InEmployeeBlock, RowShape::Department(_)) => (InEmployeeBlock, EnterDepartment),
        (_, RowShape::Department(_)) => (Scanning, EnterDepartment),
        (InEmployeeBlock, RowShape::ColumnHeader) => (InEmployeeBlock, ReadDayHeader),
        (_, RowShape::ColumnHeader) => (InHeaderBlock, ReadDayHeader),
        (_, RowShape::EmployeeName(_)) => (InEmployeeBlock, StartEmployee),
        (InEmployeeBlock, RowShape::Unnamed) => (InEmployeeBlock, ExtendEmployee),
        (state, RowShape::Unnamed | RowShape::Other) => (state, Skip),
    }
}

/// Find a `M/D/YYYY - M/D/YYYY` label in the first rows of the report
pub fn find_reporting_period(grid: &Grid, rows: usize) -> Option<String> {
    (0..rows.min(grid.len()))
        .flat_map(|r| grid.row(r).iter())
        .filter_map(Cell::as_text)
        .map(str::trim)
        .find(|text| PERIOD_RE.is_match(text))
        .map(str::to_string)
}

/// Streaming classifier over the rows of a report grid
#[derive(Debug)]
pub struct RowClassifier<'a> {
    grid: &'a Grid,
    layout: &'a ReportLayout,
    state: ScanState,
    days: BTreeMap<usize, DayColumn>,
    cursor: usize,
}

impl<'a> RowClassifier<'a> {
    pub fn new(grid: &'a Grid, layout: &'a ReportLayout) -> Self {
        Self {
            grid,
            layout,
            state: ScanState::Scanning,
            days: BTreeMap::new(),
            cursor: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Build the day map from a header row and the date row below it.
    ///
    /// A header on the last row has no date row and yields an empty map.
    fn read_day_header(&self, header_row: usize) -> BTreeMap<usize, DayColumn> {
        let date_row = header_row + 1;
        if date_row >= self.grid.len() {
            return BTreeMap::new();
        }
        self.grid
            .row(header_row)
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| {
                let weekday = weekday_from_abbrev(cell.as_text()?.trim())?;
                Some((
                    index,
                    DayColumn {
                        index,
                        weekday,
                        date: self.grid.cell(date_row, index).as_date(),
                    },
                ))
            })
            .collect()
    }

    /// Parse the time range cells under every known day column
    fn read_shifts(&self, row: usize) -> BTreeMap<usize, Vec<TimeRange>> {
        let mut shifts: BTreeMap<usize, Vec<TimeRange>> = BTreeMap::new();
        for &column in self.days.keys() {
            if let Some(range) = self
                .grid
                .cell(row, column)
                .as_text()
                .and_then(parse_time_range)
            {
                shifts.entry(column).or_default().push(range);
            }
        }
        shifts
    }
}

impl Iterator for RowClassifier<'_> {
    type Item = ClassifiedRow;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.cursor;
        if row >= self.grid.len() {
            return None;
        }

        let shape = row_shape(self.grid.cell(row, 0), self.layout);
        let (next_state, action) = transition(self.state, &shape);
        debug!(row, ?shape, from = ?self.state, to = ?next_state, ?action, "Classified row");
        self.state = next_state;

        let mut consumed = 1;
        let event = match (action, shape) {
            (RowAction::EnterDepartment, RowShape::Department(name)) => RowEvent::Department(name),
            (RowAction::ReadDayHeader, _) => {
                self.days = self.read_day_header(row);
                // The date row below the header belongs to it
                consumed = if row + 1 < self.grid.len() { 2 } else { 1 };
                RowEvent::DayColumns(self.days.clone())
            }
            (RowAction::StartEmployee, RowShape::EmployeeName(name)) => RowEvent::Employee {
                name,
                job: self.grid.cell(row, self.layout.job_column).display_text(),
                shifts: self.read_shifts(row),
            },
            (RowAction::ExtendEmployee, _) => {
                let shifts = self.read_shifts(row);
                if shifts.is_empty() {
                    RowEvent::Skipped
                } else {
                    RowEvent::Continuation { shifts }
                }
            }
            _ => RowEvent::Skipped,
        };

        self.cursor += consumed;
        Some(ClassifiedRow {
            row,
            consumed,
            event,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn layout() -> ReportLayout {
        ReportLayout::default()
    }

    #[test]
    fn test_row_shape_priority() {
        let layout = layout();
        assert_eq!(
            row_shape(&Cell::text("Under Armour/Retail/Store 112"), &layout),
            RowShape::Department("Store 112".to_string())
        );
        // Department prefix wins over the comma heuristic
        assert_eq!(
            row_shape(&Cell::text("Under Armour/Outlet, East"), &layout),
            RowShape::Department("Outlet, East".to_string())
        );
        assert_eq!(row_shape(&Cell::text("Employee"), &layout), RowShape::ColumnHeader);
        assert_eq!(
            row_shape(&Cell::text(" Smith, Jane "), &layout),
            RowShape::EmployeeName("Smith, Jane".to_string())
        );
        assert_eq!(row_shape(&Cell::Empty, &layout), RowShape::Unnamed);
        assert_eq!(row_shape(&Cell::text(""), &layout), RowShape::Unnamed);
        // Stray whitespace is not a continuation row
        assert_eq!(row_shape(&Cell::text("   "), &layout), RowShape::Other);
        assert_eq!(row_shape(&Cell::text("Total Hours"), &layout), RowShape::Other);
        assert_eq!(row_shape(&Cell::Number(3.0), &layout), RowShape::Other);
    }

    #[test]
    fn test_transition_table() {
        use RowAction::*;
        use ScanState::*;

        let name = RowShape::EmployeeName("Smith, Jane".to_string());
        let dept = RowShape::Department("Store".to_string());

        assert_eq!(transition(Scanning, &name), (InEmployeeBlock, StartEmployee));
        assert_eq!(transition(InHeaderBlock, &name), (InEmployeeBlock, StartEmployee));
        assert_eq!(
            transition(InEmployeeBlock, &RowShape::Unnamed),
            (InEmployeeBlock, ExtendEmployee)
        );
        assert_eq!(transition(Scanning, &RowShape::Unnamed), (Scanning, Skip));
        assert_eq!(transition(InHeaderBlock, &RowShape::Unnamed), (InHeaderBlock, Skip));
        assert_eq!(transition(Scanning, &dept), (Scanning, EnterDepartment));
        assert_eq!(transition(InEmployeeBlock, &dept), (InEmployeeBlock, EnterDepartment));
        assert_eq!(
            transition(Scanning, &RowShape::ColumnHeader),
            (InHeaderBlock, ReadDayHeader)
        );
        assert_eq!(
            transition(InEmployeeBlock, &RowShape::ColumnHeader),
            (InEmployeeBlock, ReadDayHeader)
        );
        assert_eq!(
            transition(InEmployeeBlock, &RowShape::Other),
            (InEmployeeBlock, Skip)
        );
    }

    #[test]
    fn test_header_block_consumes_date_row() {
        let mon = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let grid = Grid::new(vec![
            vec![Cell::text("Employee"), Cell::Empty, Cell::text("Sun"), Cell::text("Mon")],
            vec![Cell::Empty, Cell::Empty, Cell::text("not a date"), Cell::Date(mon)],
            vec![Cell::text("Smith, Jane")],
        ]);
        let layout = layout();
        let rows: Vec<ClassifiedRow> = RowClassifier::new(&grid, &layout).collect();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].consumed, 2);
        let RowEvent::DayColumns(days) = &rows[0].event else {
            panic!("expected day columns, got {:?}", rows[0].event);
        };
        assert_eq!(days.len(), 2);
        assert_eq!(days[&2].abbrev(), "Sun");
        assert_eq!(days[&2].date, None);
        assert_eq!(days[&3].date, Some(mon));
        assert_eq!(rows[1].row, 2);
    }

    #[test]
    fn test_header_on_last_row_has_no_days() {
        let grid = Grid::new(vec![
            vec![Cell::text("Employee"), Cell::text("Mon")],
            vec![Cell::Empty, Cell::Empty],
            vec![Cell::text("Smith, Jane"), Cell::text("9 AM - 1 PM")],
            vec![Cell::text("Employee"), Cell::text("Mon")],
        ]);
        let layout = layout();
        let rows: Vec<ClassifiedRow> = RowClassifier::new(&grid, &layout).collect();

        let last = rows.last().unwrap();
        assert_eq!(last.row, 3);
        assert_eq!(last.consumed, 1);
        assert_eq!(last.event, RowEvent::DayColumns(BTreeMap::new()));
    }

    #[test]
    fn test_unnamed_rows_without_shifts_are_skipped() {
        let grid = Grid::new(vec![
            vec![Cell::text("Employee"), Cell::text("Mon")],
            vec![Cell::Empty, Cell::Empty],
            vec![Cell::text("Smith, Jane"), Cell::text("9 AM - 1 PM")],
            vec![Cell::Empty, Cell::text("Sales Lead")],
            vec![Cell::Empty, Cell::text("2 PM - 6 PM")],
        ]);
        let layout = layout();
        let events: Vec<RowEvent> = RowClassifier::new(&grid, &layout)
            .map(|row| row.event)
            .collect();

        assert!(matches!(events[1], RowEvent::Employee { .. }));
        assert_eq!(events[2], RowEvent::Skipped);
        assert!(matches!(events[3], RowEvent::Continuation { .. }));
    }

    #[test]
    fn test_find_reporting_period() {
        let grid = Grid::new(vec![
            vec![Cell::text("Employee Schedule - Weekly")],
            vec![Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty, Cell::text("3/2/2025 - 3/8/2025")],
            vec![Cell::text("3/9/2025 - 3/15/2025")],
        ]);
        assert_eq!(
            find_reporting_period(&grid, 5),
            Some("3/2/2025 - 3/8/2025".to_string())
        );
        assert_eq!(find_reporting_period(&grid, 1), None);
    }
}
