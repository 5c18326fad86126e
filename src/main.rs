use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use trailcam::{AppConfig, Options};

#[derive(Parser, Debug)]
#[command(name = "trailcam")]
#[command(about = "Fly a freelook camera and record a looping path for a cube", long_about = None)]
struct Cli {
    /// TOML options preset; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the effective options to this path and exit
    #[arg(long = "write-config")]
    write_config: Option<PathBuf>,

    /// Leave the cursor free instead of locking it to the window
    #[arg(long = "no-grab", default_value = "false")]
    no_grab: bool,

    #[arg(long, default_value_t = 1000)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn load_options(path: Option<&PathBuf>) -> anyhow::Result<Options> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    if !path.exists() {
        log::warn!("options file {} not found, using defaults", path.display());
        return Ok(Options::default());
    }
    let options = Options::load(path)
        .with_context(|| format!("failed to load options from {}", path.display()))?;
    log::info!("loaded options from {}", path.display());
    Ok(options)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let options = load_options(cli.config.as_ref())?;

    if let Some(path) = &cli.write_config {
        options
            .save(path)
            .with_context(|| format!("failed to write options to {}", path.display()))?;
        log::info!("wrote options to {}", path.display());
        return Ok(());
    }

    let config = AppConfig::new()
        .title("trailcam")
        .size(cli.width, cli.height)
        .grab_cursor(!cli.no_grab);
    trailcam::run(config, options)?;
    Ok(())
}
