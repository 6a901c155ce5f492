use std::{io, process::ExitCode};

use clap::Parser;
use kzak_sigmets::cli::{self, Args};
use tracing::error;

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(args.log_level())
        .init();

    let code = match cli::run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::from(e.exit_code())
        }
    };

    if args.wait {
        cli::wait_for_enter();
    }
    code
}
