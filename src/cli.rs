use std::{
    io::{self, Write as _},
    path::PathBuf,
};

use clap::Parser;
use thiserror::Error;
use tracing::{debug, warn, Level};

use crate::{
    config::{
        parse_colour_name, parse_fir_id, SigmetConfig, DEFAULT_FILENAME, DEFAULT_FIR_ID,
        ISIGMET_API_URL,
    },
    fetch::AdvisorySource,
    launch::{launch_detached, LaunchError},
    locate::{LocateError, Locator},
    pipeline::{Pipeline, RunError},
};

/// Fetch international SIGMETs and write them as a vatSys map for ATOP Oakland
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    /// Location of vatSys Maps folder for ATOP Oakland profile
    #[arg(long)]
    pub mapsdir: Option<PathBuf>,
    /// Full name of output XML file (including .xml)
    #[arg(long, default_value = DEFAULT_FILENAME)]
    pub filename: String,
    /// Location of vatSys executable
    #[arg(long)]
    pub exec: Option<PathBuf>,
    /// Name of vatSys colour (from Colours.xml) to use for SIGMETs
    #[arg(long, value_parser = parse_colour_name)]
    pub color: Option<String>,
    /// FIR whose SIGMETs are kept
    #[arg(long, default_value = DEFAULT_FIR_ID, value_parser = parse_fir_id)]
    pub fir: String,
    /// ISIGMET GeoJSON endpoint
    #[arg(long, default_value = ISIGMET_API_URL)]
    pub url: String,
    /// Read the ISIGMET GeoJSON from a file instead of the API
    #[arg(long, conflicts_with = "url")]
    pub input: Option<PathBuf>,
    /// Don't start vatSys after writing the map
    #[arg(long)]
    pub no_launch: bool,
    /// Wait for the enter key before exiting
    #[arg(long)]
    pub wait: bool,
    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn config(&self) -> SigmetConfig {
        let mut config = SigmetConfig {
            api_url: self.url.clone(),
            fir_id: self.fir.clone(),
            filename: self.filename.clone(),
            ..SigmetConfig::default()
        };
        if let Some(colour) = &self.color {
            config.map = config.map.with_colour(colour.as_str());
        }
        config
    }

    pub fn source(&self, config: &SigmetConfig) -> AdvisorySource {
        self.input.clone().map_or_else(
            || AdvisorySource::Url(config.api_url.clone()),
            AdvisorySource::File,
        )
    }

    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Locate(#[from] LocateError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl AppError {
    /// Distinct per failing stage, so wrappers can tell them apart.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Locate(_) => 2,
            AppError::Run(RunError::Fetch(_)) => 3,
            AppError::Run(RunError::Transform(_)) => 4,
            AppError::Run(RunError::Write(_)) => 5,
            AppError::Launch(_) => 6,
        }
    }
}

pub fn run(args: &Args) -> Result<(), AppError> {
    let config = args.config();
    debug!(?config);

    let maps_dir = Locator::maps_dir().resolve(args.mapsdir.clone())?;
    let summary = Pipeline::new(&config, args.source(&config)).run(&maps_dir)?;
    debug!(?summary);

    if args.no_launch {
        return Ok(());
    }
    let exec = Locator::vatsys_exec().resolve(args.exec.clone())?;
    launch_detached(&exec)?;
    Ok(())
}

pub fn wait_for_enter() {
    print!("Press enter key to exit...");
    let waited = io::stdout()
        .flush()
        .and_then(|()| io::stdin().read_line(&mut String::new()));
    if let Err(e) = waited {
        warn!("failed to wait for enter key: {e}");
    }
}
