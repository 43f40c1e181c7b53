use crate::components::grid_io::{GridSink, GridSource};
use crate::components::playbook::{project_day, DayEmployee, DaySchedule, ManualEntry};
use crate::components::render::{render_preview, OutputGrid, PlaybookRenderer};
use crate::components::report::{parse_report, DayColumn, ParsedReport};
use crate::config::Config;
use crate::error::{Error, PlaybookResult};
use tracing::info;

/// One editing session: a loaded report and the day being worked on
#[derive(Debug, Clone)]
pub struct PlaybookSession {
    config: Config,
    report: Option<ParsedReport>,
    schedule: DaySchedule,
}

impl PlaybookSession {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            report: None,
            schedule: DaySchedule::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn report(&self) -> Option<&ParsedReport> {
        self.report.as_ref()
    }

    /// Read and parse a report, replacing the previous one.
    ///
    /// Fails when the report has no day columns. The current day is cleared.
    pub fn load_report(&mut self, source: &impl GridSource) -> PlaybookResult<Vec<&DayColumn>> {
        let grid = source.read_grid()?;
        let report = parse_report(&grid, &self.config.report);
        report.require_days()?;

        self.schedule = DaySchedule::default();
        self.report.insert(report).require_days()
    }

    /// Switch to a day by abbreviation or label; edits to the previous day are dropped
    pub fn select_day(&mut self, key: &str) -> PlaybookResult<&mut DaySchedule> {
        let report = self.report.as_ref().ok_or(Error::NoDaysFound)?;
        let day = report.find_day(key)?;
        self.schedule = project_day(report, day);
        Ok(&mut self.schedule)
    }

    /// Switch to the first day of the report
    pub fn select_first_day(&mut self) -> PlaybookResult<&mut DaySchedule> {
        let report = self.report.as_ref().ok_or(Error::NoDaysFound)?;
        let day = report.days.values().next().ok_or(Error::NoDaysFound)?;
        self.schedule = project_day(report, day);
        Ok(&mut self.schedule)
    }

    pub fn schedule(&self) -> &DaySchedule {
        &self.schedule
    }

    pub fn schedule_mut(&mut self) -> &mut DaySchedule {
        &mut self.schedule
    }

    /// Append a hand-typed employee to the current day
    pub fn add_manual(&mut self, entry: ManualEntry) -> PlaybookResult<&DayEmployee> {
        let employee = entry.into_employee()?;
        info!(name = %employee.name, "Added employee manually");
        self.schedule.push(employee);
        self.schedule.get(self.schedule.len() - 1)
    }

    /// Replace an employee with edited form fields
    pub fn edit_employee(&mut self, index: usize, entry: ManualEntry) -> PlaybookResult<()> {
        let employee = entry.into_employee()?;
        self.schedule.replace(index, employee)?;
        Ok(())
    }

    /// Assign by numeric hotkey against the configured zones
    pub fn assign_hotkey(&mut self, index: usize, key: usize) -> PlaybookResult<bool> {
        self.schedule.assign_hotkey(index, key, &self.config.zones)
    }

    pub fn render(&self) -> OutputGrid {
        PlaybookRenderer::new(&self.config.zones, self.config.slot_window()).render(&self.schedule)
    }

    pub fn preview(&self) -> Option<String> {
        render_preview(&self.schedule.title(), self.schedule.employees())
    }

    /// Render the current day and hand it to `sink`; an empty day is an error
    pub fn export(&self, sink: &mut impl GridSink) -> PlaybookResult<OutputGrid> {
        if self.schedule.is_empty() {
            return Err(Error::Other("No employees to export".to_string()));
        }
        let grid = self.render();
        sink.write_grid(&grid)?;
        Ok(grid)
    }
}
