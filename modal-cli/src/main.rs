use std::process::ExitCode;

use clap::Parser;
use log::error;

/// Rewrites the rules and subject terms in `file` to a fixed point and
/// prints the resulting subject.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a `.modal` source file.
    file: std::path::PathBuf,
}

fn run(args: Args) -> modal_core::Result<()> {
    let bytes = std::fs::read(&args.file).map_err(|e| modal_core::Error::IoOpenFailed {
        path: args.file.display().to_string(),
        reason: e.to_string(),
    })?;

    let (symbols, result) = modal_core::run_program(&bytes)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut id = 0;
    while id < result.len() {
        result
            .write_flat(&mut out, &symbols, id)
            .map_err(|e| modal_core::Error::IoWriteFailed { reason: e.to_string() })?;
        id += result.subtree_size(id);
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
