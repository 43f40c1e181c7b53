use dco_creator::components::{JsonGridFile, PlaybookSession};
use dco_creator::error::other_error;
use dco_creator::startup::{self, ConfigSource};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

const USAGE: &str = "usage: dco-creator <report.json> [day] [output.json]";

fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting DCO creator");

    let mut args = env::args().skip(1);
    let report_path = args.next().ok_or_else(|| other_error(USAGE))?;
    let day = args.next();
    let output_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("playbook.json"));

    // Load configuration
    let (config, source) = startup::load_config(startup::config_path());
    if let ConfigSource::Fallback(reason) = &source {
        warn!(%reason, "Continuing with default zones and hours");
    }

    let mut session = PlaybookSession::new(config);
    let days = session.load_report(&JsonGridFile::new(&report_path))?;
    let labels: Vec<String> = days.iter().map(|d| d.label()).collect();
    info!(days = ?labels, "Report loaded");

    match day.as_deref() {
        Some(key) => session.select_day(key)?,
        None => session.select_first_day()?,
    };

    let grid = session.export(&mut JsonGridFile::new(&output_path))?;
    info!(
        output = %output_path.display(),
        rows = grid.rows.len(),
        "Playbook written"
    );

    if let Some(preview) = session.preview() {
        println!("{preview}");
    }

    Ok(())
}
