// Export components
pub mod grid_io;
pub mod playbook;
pub mod render;
pub mod report;
pub mod session;
pub mod zones;

pub use grid_io::{GridSink, GridSource, JsonGridFile, MemoryGrid};
pub use session::PlaybookSession;
pub use zones::{ZoneConfig, ZoneDefinition};
