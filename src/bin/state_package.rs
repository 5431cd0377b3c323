use std::path::PathBuf;

use anyhow::{Context, Result};
use pattern_catalog::{scenario, telemetry, CatalogConfig};

fn main() -> Result<()> {
    telemetry::init();
    let path = std::env::args().nth(1).map(PathBuf::from);
    let config = CatalogConfig::load_or_default(path.as_deref())
        .with_context(|| format!("loading config from {path:?}"))?;

    let lines = scenario::state_package(&config).context("parcel scenario")?;
    scenario::print_trace("State Pattern", &lines);
    Ok(())
}
