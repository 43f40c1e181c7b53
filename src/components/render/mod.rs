//! Output grid for the printed playbook and its text preview.
pub mod models;
pub mod preview;
pub mod renderer;

pub use models::{OutputGrid, OutputRow, PrintSetup, SlotFill, SlotWindow};
pub use preview::render_preview;
pub use renderer::{render_playbook, PlaybookRenderer};
