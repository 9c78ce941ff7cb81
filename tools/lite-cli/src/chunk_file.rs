//! Reading and writing chunk files

use anyhow::{Context, Result};
use rcol_lite::LightingChunk;
use std::path::Path;

/// Read and decode a chunk file, honouring the process-wide tag checking
pub fn read(path: &Path) -> Result<LightingChunk> {
    let bytes = read_bytes(path)?;
    rcol_lite::parse(&bytes).with_context(|| format!("Failed to decode {}", path.display()))
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Encode a chunk and write it to `path`
pub fn write(path: &Path, chunk: &LightingChunk) -> Result<()> {
    let bytes = rcol_lite::serialize(chunk).context("Failed to encode chunk")?;
    std::fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
