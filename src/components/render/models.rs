use crate::components::playbook::DayEmployee;
use crate::components::zones::Rgb;
use crate::utils::time::{generate_time_slots, TimePoint};
use serde::{Deserialize, Serialize};

pub const HEADER_NAME: &str = "TEAMMATE NAME";
pub const HEADER_SHIFT: &str = "SHIFT";
pub const HEADER_BREAK: &str = "BREAK";
pub const HEADER_ZONE: &str = "FOCUSES";

/// Background of the header row
pub const HEADER_FILL: Rgb = Rgb {
    r: 0xD9,
    g: 0xE1,
    b: 0xF2,
};

pub const NAME_WIDTH: f64 = 22.0;
pub const SHIFT_WIDTH: f64 = 18.0;
pub const BREAK_WIDTH: f64 = 10.0;
pub const SLOT_WIDTH: f64 = 5.0;
pub const ZONE_WIDTH: f64 = 12.0;

/// Hour window of the time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl SlotWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Widen the window so every employee's shift fits; never narrows it.
    ///
    /// Shift ends past the hour round up to the next hour.
    pub fn covering(self, employees: &[DayEmployee]) -> Self {
        let spans: Vec<_> = employees.iter().filter_map(DayEmployee::span).collect();
        let earliest = spans.iter().map(|s| s.start().hour()).min();
        let latest = spans
            .iter()
            .map(|s| s.end().hour() + u32::from(s.end().minute() > 0))
            .max();

        Self {
            start_hour: earliest.map_or(self.start_hour, |h| h.min(self.start_hour)),
            end_hour: latest.map_or(self.end_hour, |h| h.max(self.end_hour)),
        }
    }

    pub fn slots(&self) -> Vec<TimePoint> {
        generate_time_slots(self.start_hour, self.end_hour)
    }
}

/// Zone color painted into one slot cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFill {
    pub zone: String,
    pub color: Rgb,
    pub text_color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    pub name: String,
    pub shift: String,
    pub break_text: String,
    pub zone_label: String,
    /// One entry per slot of the time axis; `None` keeps the default background
    pub slots: Vec<Option<SlotFill>>,
}

/// Page setup requested from the spreadsheet writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintSetup {
    pub landscape: bool,
    /// Pages across; `1` keeps the whole grid one page wide
    pub fit_to_width: u32,
    /// Pages down; `0` lets the height grow freely
    pub fit_to_height: u32,
    /// Repeat the column header row on every printed page
    pub repeat_header_row: bool,
}

impl Default for PrintSetup {
    fn default() -> Self {
        Self {
            landscape: true,
            fit_to_width: 1,
            fit_to_height: 0,
            repeat_header_row: true,
        }
    }
}

/// Everything a spreadsheet writer needs to lay out the daily playbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputGrid {
    pub title: String,
    pub header: Vec<String>,
    pub header_fill: Rgb,
    pub slots: Vec<TimePoint>,
    pub rows: Vec<OutputRow>,
    pub column_widths: Vec<f64>,
    pub print: PrintSetup,
}

impl OutputGrid {
    /// Zero-based column of the first time slot
    pub const FIRST_SLOT_COLUMN: usize = 3;

    /// Zero-based column of the trailing zone label
    pub fn zone_column(&self) -> usize {
        Self::FIRST_SLOT_COLUMN + self.slots.len()
    }
}
