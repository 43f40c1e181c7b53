//! One day's playbook: projecting a day out of the report, editing zone
//! assignments and resolving the zone of each time slot.

pub mod manual;
pub mod models;
pub mod projector;
pub mod resolver;
pub mod split;

pub use manual::ManualEntry;
pub use models::{DayEmployee, DaySchedule, ZoneAssignment, ZoneSegment};
pub use projector::{extract_day_schedule, project_day};
pub use resolver::zone_for_slot;
pub use split::{SplitEditor, SplitError};
