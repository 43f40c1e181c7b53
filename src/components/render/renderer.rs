use super::models::{
    OutputGrid, OutputRow, PrintSetup, SlotFill, SlotWindow, BREAK_WIDTH, HEADER_BREAK,
    HEADER_FILL, HEADER_NAME, HEADER_SHIFT, HEADER_ZONE, NAME_WIDTH, SHIFT_WIDTH, SLOT_WIDTH,
    ZONE_WIDTH,
};
use crate::components::playbook::{zone_for_slot, DayEmployee, DaySchedule};
use crate::components::zones::ZoneConfig;
use crate::utils::time::{format_time_short, TimePoint};
use std::collections::HashSet;
use tracing::{info, warn};

/// Lays out a day schedule as a zone-colored output grid
#[derive(Debug, Clone)]
pub struct PlaybookRenderer<'a> {
    zones: &'a ZoneConfig,
    window: SlotWindow,
}

impl<'a> PlaybookRenderer<'a> {
    /// `window` is the configured day window; it widens per day as needed
    pub fn new(zones: &'a ZoneConfig, window: SlotWindow) -> Self {
        Self { zones, window }
    }

    pub fn render(&self, schedule: &DaySchedule) -> OutputGrid {
        render_playbook(&schedule.title(), schedule.employees(), self.zones, self.window)
    }
}

/// Render employees into an output grid titled `title`.
///
/// The time axis covers `window` widened to fit every shift. Slots whose
/// zone is not in `zones` stay uncolored.
pub fn render_playbook(
    title: &str,
    employees: &[DayEmployee],
    zones: &ZoneConfig,
    window: SlotWindow,
) -> OutputGrid {
    let window = window.covering(employees);
    let slots = window.slots();
    let mut unknown = HashSet::new();

    let rows: Vec<OutputRow> = employees
        .iter()
        .map(|employee| render_row(employee, &slots, zones, &mut unknown))
        .collect();

    let mut header = vec![
        HEADER_NAME.to_string(),
        HEADER_SHIFT.to_string(),
        HEADER_BREAK.to_string(),
    ];
    header.extend(slots.iter().map(|slot| format_time_short(*slot)));
    header.push(HEADER_ZONE.to_string());

    let mut column_widths = vec![NAME_WIDTH, SHIFT_WIDTH, BREAK_WIDTH];
    column_widths.extend(std::iter::repeat(SLOT_WIDTH).take(slots.len()));
    column_widths.push(ZONE_WIDTH);

    info!(
        title,
        employees = rows.len(),
        start_hour = window.start_hour,
        end_hour = window.end_hour,
        "Rendered playbook"
    );

    OutputGrid {
        title: title.to_string(),
        header,
        header_fill: HEADER_FILL,
        slots,
        rows,
        column_widths,
        print: PrintSetup::default(),
    }
}

fn render_row(
    employee: &DayEmployee,
    slots: &[TimePoint],
    zones: &ZoneConfig,
    unknown: &mut HashSet<String>,
) -> OutputRow {
    let cells = slots
        .iter()
        .map(|slot| {
            let zone = zone_for_slot(employee, *slot);
            if zone.is_empty() {
                return None;
            }
            match zones.color_of(zone) {
                Some(color) => Some(SlotFill {
                    zone: zone.to_string(),
                    color,
                    text_color: color.text_color(),
                }),
                None => {
                    if unknown.insert(zone.to_string()) {
                        warn!(zone, employee = %employee.name, "Zone has no color, leaving slots blank");
                    }
                    None
                }
            }
        })
        .collect();

    OutputRow {
        name: employee.name.clone(),
        shift: employee.shift_text.clone(),
        break_text: employee.break_text.clone(),
        zone_label: employee.zone_label(),
        slots: cells,
    }
}
