use crate::error::{Error, PlaybookResult};
use crate::utils::time::{weekday_abbrev, weekday_name, TimeRange};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One value from the source spreadsheet, already resolved from formulas
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Date(NaiveDate),
    Number(f64),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    pub fn text(value: &str) -> Self {
        Cell::Text(value.to_string())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Empty cells and empty text; whitespace-only text counts as a value
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Human readable rendering of the cell value
    pub fn display_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

/// Raw report contents as rows of cells
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> &[Cell] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Cell at `(row, col)`; ragged or missing cells read as empty
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.row(row).get(col).unwrap_or(&EMPTY_CELL)
    }
}

/// Conventions of the weekly schedule export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    /// Prefix that marks a department path row, e.g. `Under Armour/Retail/Store 12`
    pub department_prefix: String,
    /// Literal in column A of the day header row
    pub header_label: String,
    /// Zero-based column holding the job title on employee rows
    pub job_column: usize,
    /// How many leading rows are searched for the reporting period
    pub period_scan_rows: usize,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            department_prefix: "Under Armour/".to_string(),
            header_label: "Employee".to_string(),
            job_column: 6,
            period_scan_rows: 5,
        }
    }
}

/// Position and identity of one weekday column in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayColumn {
    pub index: usize,
    pub weekday: Weekday,
    pub date: Option<NaiveDate>,
}

impl DayColumn {
    pub fn abbrev(&self) -> &'static str {
        weekday_abbrev(self.weekday)
    }

    /// `3/2` style date, empty when the report had no date for the column
    pub fn date_label(&self) -> String {
        self.date
            .map(|d| format!("{}/{}", d.month(), d.day()))
            .unwrap_or_default()
    }

    /// Selector label such as `Mon 3/2`
    pub fn label(&self) -> String {
        match self.date {
            Some(_) => format!("{} {}", self.abbrev(), self.date_label()),
            None => self.abbrev().to_string(),
        }
    }

    /// Full weekday name taken from the date when known
    pub fn day_name(&self) -> &'static str {
        match self.date {
            Some(d) => weekday_name(d.weekday()),
            None => self.abbrev(),
        }
    }

    /// Title line for the playbook, e.g. `Monday 3/2`
    pub fn title(&self) -> String {
        match self.date {
            Some(_) => format!("{} {}", self.day_name(), self.date_label()),
            None => self.day_name().to_string(),
        }
    }
}

/// One employee and their shifts for the whole week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub name: String,
    pub job: String,
    pub department: String,
    pub shifts_by_day: BTreeMap<usize, Vec<TimeRange>>,
}

impl EmployeeRecord {
    /// Shifts recorded under a day column, in start order
    pub fn shifts_for(&self, column: usize) -> &[TimeRange] {
        self.shifts_by_day
            .get(&column)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Result of reading a weekly schedule report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedReport {
    pub time_period: String,
    pub days: BTreeMap<usize, DayColumn>,
    pub employees: Vec<EmployeeRecord>,
}

impl ParsedReport {
    /// Day columns in column order, or an error when the report had none
    pub fn require_days(&self) -> PlaybookResult<Vec<&DayColumn>> {
        if self.days.is_empty() {
            return Err(Error::NoDaysFound);
        }
        Ok(self.days.values().collect())
    }

    /// Look up a day by its header abbreviation (`Mon`) or selector label (`Mon 3/2`)
    pub fn find_day(&self, key: &str) -> PlaybookResult<&DayColumn> {
        let key = key.trim();
        self.require_days()?
            .into_iter()
            .find(|day| day.abbrev().eq_ignore_ascii_case(key) || day.label() == key)
            .ok_or_else(|| Error::UnknownDay(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_reads_ragged_rows_as_empty() {
        let grid = Grid::new(vec![vec![Cell::text("a")], vec![]]);
        assert_eq!(grid.cell(0, 0), &Cell::text("a"));
        assert_eq!(grid.cell(0, 5), &Cell::Empty);
        assert_eq!(grid.cell(1, 0), &Cell::Empty);
        assert_eq!(grid.cell(9, 0), &Cell::Empty);
    }

    #[test]
    fn test_cell_serde_shape() {
        let cells = vec![
            Cell::Empty,
            Cell::text("Mon"),
            Cell::Date(NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()),
            Cell::Number(6.0),
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"empty"},{"type":"text","value":"Mon"},{"type":"date","value":"2025-03-03"},{"type":"number","value":6.0}]"#
        );
        let back: Vec<Cell> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cells);
    }

    #[test]
    fn test_day_column_labels() {
        let day = DayColumn {
            index: 8,
            weekday: Weekday::Mon,
            date: NaiveDate::from_ymd_opt(2025, 3, 3),
        };
        assert_eq!(day.label(), "Mon 3/3");
        assert_eq!(day.title(), "Monday 3/3");

        let undated = DayColumn {
            index: 9,
            weekday: Weekday::Tue,
            date: None,
        };
        assert_eq!(undated.label(), "Tue");
        assert_eq!(undated.title(), "Tue");
        assert_eq!(undated.date_label(), "");
    }

    #[test]
    fn test_require_days_reports_missing_header() {
        let report = ParsedReport::default();
        assert!(matches!(report.require_days(), Err(Error::NoDaysFound)));
        assert!(matches!(report.find_day("Mon"), Err(Error::NoDaysFound)));
    }
}
