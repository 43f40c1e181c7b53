//! Weekly schedule report reading: grid model, row classification and the
//! employee model built from it.

pub mod builder;
pub mod classifier;
pub mod models;

pub use builder::{parse_report, ScheduleBuilder};
pub use classifier::{RowClassifier, RowEvent, ScanState};
pub use models::{Cell, DayColumn, EmployeeRecord, Grid, ParsedReport, ReportLayout};
