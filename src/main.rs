use anyhow::Result;
use clap::Parser;

use warm_welcome::{backend, config::AppConfig, raster};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::parse();

    if let Some(path) = config.screenshot.clone() {
        raster::screenshot(&config, &path)?;
        tracing::info!(path = %path.display(), at = config.at, "frame written");
        return Ok(());
    }

    backend::run(config)?;
    Ok(())
}
