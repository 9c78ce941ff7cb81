//! Verify command - check that a chunk survives decode and re-encode

use anyhow::{Context, Result, bail};
use clap::Args;
use std::path::{Path, PathBuf};

use crate::chunk_file;

/// Arguments for the verify command
#[derive(Args)]
pub struct VerifyArgs {
    /// Chunk file to verify
    pub file: PathBuf,
}

/// Execute the verify command
pub fn execute(args: VerifyArgs) -> Result<()> {
    let len = verify_file(&args.file)?;
    println!("{}: OK ({} bytes)", args.file.display(), len);
    Ok(())
}

/// Round-trip a file, returning the number of bytes checked
fn verify_file(path: &Path) -> Result<usize> {
    let original = chunk_file::read_bytes(path)?;
    let chunk = rcol_lite::parse(&original)
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    let encoded = rcol_lite::serialize(&chunk).context("Failed to encode chunk")?;

    // Bytes after the last record are not part of the chunk
    if original.len() < encoded.len() || original[..encoded.len()] != encoded[..] {
        let at = first_difference(&original, &encoded);
        bail!("Round trip differs at byte 0x{:08X}", at);
    }
    if original.len() > encoded.len() {
        tracing::warn!(
            "{} trailing bytes after the chunk were ignored",
            original.len() - encoded.len()
        );
    }
    Ok(encoded.len())
}

fn first_difference(a: &[u8], b: &[u8]) -> usize {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .unwrap_or(a.len().min(b.len()))
}
