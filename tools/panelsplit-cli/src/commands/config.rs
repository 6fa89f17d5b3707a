//! Show the effective configuration.

use panelsplit_common::config::{config_file_path, AppConfig};

pub fn run() -> anyhow::Result<()> {
    let path = config_file_path();
    let config = AppConfig::load();

    let origin = if path.exists() { "file" } else { "defaults" };
    println!("Config: {} ({origin})", path.display());
    println!(
        "  Default grid: {}x{}",
        config.export.rows, config.export.columns
    );
    println!("  Artifact extension: {}", config.export.artifact_extension);
    println!("  Log level: {}", config.logging.level);
    println!(
        "  Telemetry: {}",
        if config.telemetry.enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    if let Some(file) = &config.telemetry.log_file {
        println!("  Telemetry log: {}", file.display());
    }

    Ok(())
}
