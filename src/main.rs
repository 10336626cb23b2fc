//! Aero Keyboard Lighting CLI
//!
//! Sets preset effects and uploads custom per-key images.

use aero_driver::config::DriverConfig;
use aero_transport::DeviceSelector;
use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

// Command handlers
mod commands;
use commands::DeviceOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // An explicit --config must exist; the default one is optional
    let config = match &cli.config {
        Some(path) => DriverConfig::load_existing(path)?,
        None => DriverConfig::load(&DriverConfig::default_path())?,
    };
    debug!("Config: {:?}", config);

    let opts = DeviceOptions {
        selector: resolve_selector(&cli, &config.device),
        printer_config: commands::create_printer_config(cli.monitor, cli.hex, cli.filter),
    };

    match cli.command {
        Commands::Preset {
            mode,
            speed,
            brightness,
            color,
        } => commands::lighting::preset(
            &opts,
            mode,
            speed.unwrap_or(config.preset.speed),
            brightness.unwrap_or(config.preset.brightness),
            color.unwrap_or(config.preset.color),
        ),
        Commands::Custom { file } => commands::lighting::custom(&opts, &file),
        Commands::Paint { file, dump } => {
            commands::lighting::paint(&opts, &file, dump.as_deref())
        }
        Commands::Layout => commands::utility::layout(),
        Commands::List { json } => commands::utility::list(&opts.selector, json),
        Commands::Modes => commands::utility::modes(),
    }
}

/// CLI flags override the config file
fn resolve_selector(cli: &Cli, config: &DeviceSelector) -> DeviceSelector {
    DeviceSelector {
        vendor_id: cli.vid.unwrap_or(config.vendor_id),
        product_id: cli.pid.unwrap_or(config.product_id),
        interface: cli.interface.unwrap_or(config.interface),
    }
}
