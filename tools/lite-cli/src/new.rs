//! New command - write an empty chunk

use anyhow::{Result, bail};
use clap::Args;
use rcol_lite::LightingChunk;
use std::path::PathBuf;

use crate::chunk_file;

/// Arguments for the new command
#[derive(Args)]
pub struct NewArgs {
    /// Output file
    pub output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    pub force: bool,
}

/// Execute the new command
pub fn execute(args: NewArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }
    chunk_file::write(&args.output, &LightingChunk::new())
}
