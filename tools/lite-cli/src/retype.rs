//! Retype command - change one light source's type
//!
//! The payload bytes are kept and read back as the new type's layout.

use anyhow::{Context, Result, anyhow};
use clap::Args;
use rcol_lite::{LightSourceType, LightingChunk};
use std::path::PathBuf;

use crate::chunk_file;

/// Arguments for the retype command
#[derive(Args)]
pub struct RetypeArgs {
    /// Chunk file to edit
    pub file: PathBuf,

    /// Index of the light source to change
    #[arg(short, long)]
    pub index: usize,

    /// New type: a name (e.g. "TubeLight") or a code (e.g. "6", "0x06")
    #[arg(short = 't', long = "type", value_parser = parse_light_type)]
    pub light_type: LightSourceType,

    /// Output file
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Execute the retype command
pub fn execute(args: RetypeArgs) -> Result<()> {
    let mut chunk = chunk_file::read(&args.file)?;
    let old = retype(&mut chunk, args.index, args.light_type)?;
    println!(
        "Light source [{}]: {} -> {}",
        args.index, old, args.light_type
    );
    chunk_file::write(&args.output, &chunk)
}

/// Change the type of light `index`, returning its previous type
fn retype(chunk: &mut LightingChunk, index: usize, light_type: LightSourceType) -> Result<LightSourceType> {
    let count = chunk.lights().len();
    let light = chunk
        .lights_mut()
        .get_mut(index)
        .ok_or_else(|| anyhow!("No light source at index {} (chunk has {})", index, count))?;
    let old = light.light_type();
    light
        .set_light_type(light_type)
        .context("Failed to reinterpret payload")?;
    Ok(old)
}

fn parse_light_type(text: &str) -> std::result::Result<LightSourceType, String> {
    LightSourceType::parse(text).ok_or_else(|| format!("unknown light source type '{text}'"))
}
