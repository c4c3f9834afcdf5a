use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use ihex_records::{HexFile, ParseError};
use log::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "ihexdump")]
#[command(version)]
#[command(
    about = "Print the records of an Intel HEX file.",
    long_about = None,
    after_help = "Examples:\n  ihexdump firmware.hex\n  ihexdump --summary firmware.hex\n  RUST_LOG=trace ihexdump firmware.hex"
)]
struct Cli {
    /// Path to a .hex file
    input: PathBuf,

    /// Only print the record count
    #[arg(long)]
    summary: bool,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

enum Failure {
    Io(anyhow::Error),
    Parse {
        path: PathBuf,
        text: Vec<u8>,
        error: ParseError,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Io(err)) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
        Err(Failure::Parse { path, text, error }) => {
            let (line, column) = error.position().line_column(&text);
            eprintln!("error: {}", error.kind());
            eprintln!("  --> {}:{}:{}", path.display(), line, column);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Failure> {
    let text = read_input(&cli.input).map_err(Failure::Io)?;
    debug!("read {} bytes from {}", text.len(), cli.input.display());

    let file = match HexFile::from_bytes(&text) {
        Ok(file) => file,
        Err(error) => {
            return Err(Failure::Parse {
                path: cli.input.clone(),
                text,
                error,
            })
        }
    };
    info!("{}: {}", cli.input.display(), file);

    if cli.summary {
        println!("{}", file);
    } else {
        println!("{:#}", file);
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))
}
