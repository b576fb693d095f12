use anyhow::{Context, Result};
use face_detect::{config::Config, output::OutputMode};
use std::{env, path::PathBuf};
use structopt::StructOpt;
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

#[derive(Debug, Clone, StructOpt)]
/// Detect faces in the images under a directory
struct Args {
    /// directory to search for images recursively
    pub input_dir: PathBuf,
    #[structopt(long)]
    /// save annotated images to this directory instead of displaying them
    pub save: Option<PathBuf>,
    #[structopt(long)]
    /// configuration file
    pub config_file: Option<PathBuf>,
}

pub fn main() -> Result<()> {
    // setup tracing
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true).compact();
    let filter_layer = {
        let filter = EnvFilter::from_default_env();
        if env::var("RUST_LOG").is_err() {
            filter.add_directive(LevelFilter::INFO.into())
        } else {
            filter
        }
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    // parse arguments
    let Args {
        input_dir,
        save,
        config_file,
    } = Args::from_args();
    let config = match config_file {
        Some(config_file) => Config::open(&config_file).with_context(|| {
            format!("failed to load config file '{}'", config_file.display())
        })?,
        None => Config::default(),
    };
    let mode = match save {
        Some(dir) => OutputMode::Save { dir },
        None => OutputMode::Display,
    };

    // start detection
    face_detect::start(&config, &input_dir, mode)?;

    Ok(())
}
