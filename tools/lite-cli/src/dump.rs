//! Dump command - print every field of a chunk

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::chunk_file;

/// Arguments for the dump command
#[derive(Args)]
pub struct DumpArgs {
    /// Chunk file to dump
    pub file: PathBuf,
}

/// Execute the dump command
pub fn execute(args: DumpArgs) -> Result<()> {
    let chunk = chunk_file::read(&args.file)?;
    print!("{chunk}");
    Ok(())
}
