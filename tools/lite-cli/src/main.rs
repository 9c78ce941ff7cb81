//! Lite CLI - Inspect and edit LITE lighting chunks
//!
//! # Commands
//!
//! - `lite info` - Summarize a chunk (header and record counts)
//! - `lite dump` - Print every field of a chunk
//! - `lite verify` - Check that decoding and re-encoding is lossless
//! - `lite retype` - Change a light source's type and write the result
//! - `lite new` - Write an empty chunk
//!
//! # Usage
//!
//! ```bash
//! # Quick summary
//! lite info lights.lite
//!
//! # Turn light 2 into a tube light
//! lite retype lights.lite --index 2 --type TubeLight -o out.lite
//!
//! # Read a chunk whose tag is damaged
//! lite --lenient dump broken.lite
//! ```
//!
//! Tag checking follows `checking` in the settings file unless `--lenient`
//! is given.

mod chunk_file;
mod dump;
mod info;
mod new;
mod retype;
mod verify;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rcol_lite::settings;

/// Lite CLI - Inspect and edit LITE lighting chunks
#[derive(Parser)]
#[command(name = "lite")]
#[command(about = "Inspect and edit LITE lighting chunks")]
#[command(version)]
struct Cli {
    /// Accept chunks whose tag is not LITE
    #[arg(long, global = true)]
    lenient: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a chunk
    Info(info::InfoArgs),

    /// Print every field of a chunk
    Dump(dump::DumpArgs),

    /// Decode and re-encode a chunk, failing if the bytes differ
    Verify(verify::VerifyArgs),

    /// Change a light source's type, reinterpreting its payload
    Retype(retype::RetypeArgs),

    /// Write an empty chunk with default header values
    New(new::NewArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    let mut settings = settings::load();
    if cli.lenient {
        settings.checking = false;
    }
    settings.apply();
    tracing::debug!("Tag checking: {}", settings.checking);

    match cli.command {
        Commands::Info(args) => info::execute(args),
        Commands::Dump(args) => dump::execute(args),
        Commands::Verify(args) => verify::execute(args),
        Commands::Retype(args) => retype::execute(args),
        Commands::New(args) => new::execute(args),
    }
}
