//! Info command - summarize a chunk

use anyhow::Result;
use clap::Args;
use rcol_lite::LightingChunk;
use std::path::PathBuf;

use crate::chunk_file;

/// Arguments for the info command
#[derive(Args)]
pub struct InfoArgs {
    /// Chunk file to inspect
    pub file: PathBuf,
}

/// Execute the info command
pub fn execute(args: InfoArgs) -> Result<()> {
    let chunk = chunk_file::read(&args.file)?;
    print!("{}", summary(&chunk));
    Ok(())
}

fn summary(chunk: &LightingChunk) -> String {
    let mut out = String::new();
    out.push_str(&format!("Tag:       {}\n", chunk.tag()));
    out.push_str(&format!("Version:   {}\n", chunk.version()));
    out.push_str(&format!("Unknown1:  0x{:08X}\n", chunk.unknown1()));
    out.push_str(&format!("Unknown2:  0x{:04X}\n", chunk.unknown2()));
    out.push_str(&format!("Lights:    {}\n", chunk.lights().len()));
    for (i, light) in chunk.lights().iter().enumerate() {
        out.push_str(&format!(
            "  [{i}] {} ({} payload), intensity {}\n",
            light.light_type(),
            light.payload().kind(),
            light.intensity()
        ));
    }
    out.push_str(&format!("Occluders: {}\n", chunk.occluders().len()));
    out
}
