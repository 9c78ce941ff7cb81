//! LITE chunk codec
//!
//! Decodes and encodes the lighting chunk (`LITE`, resource type
//! `0x03B4C61D`) stored inside RCOL resources: a small header followed by
//! up to 255 light sources and up to 255 occluders.
//!
//! # Format Overview
//!
//! | Part         | Size      | Notes                                      |
//! |--------------|-----------|--------------------------------------------|
//! | Header       | 16 bytes  | tag, version, unknown1, counts, unknown2   |
//! | Light source | 128 bytes | type, transform, color, intensity, payload |
//! | Occluder     | 56 bytes  | type, origin, normal, axes, pair offset    |
//!
//! All values are little-endian. The 96-byte light source payload is read
//! as one of six layouts depending on the light source type.
//!
//! # Example
//!
//! ```
//! use rcol_lite::{LightSource, LightSourceType, LightingChunk};
//!
//! let mut chunk = LightingChunk::new();
//! chunk
//!     .lights_mut()
//!     .push(LightSource::of_type(LightSourceType::Spot))
//!     .unwrap();
//!
//! let bytes = rcol_lite::serialize(&chunk).unwrap();
//! assert_eq!(bytes.len(), 16 + 128);
//!
//! let decoded = rcol_lite::parse_with(&bytes, true).unwrap();
//! assert_eq!(decoded, chunk);
//! ```

pub mod error;
pub mod settings;

mod chunk;
mod light_source;
mod list;
mod notify;
mod occluder;
mod payload;
mod vertex;

pub use chunk::{
    CHUNK_HEADER_SIZE, DEFAULT_UNKNOWN1, DEFAULT_UNKNOWN2, DEFAULT_VERSION, FourCc,
    LightSourceList, LightingChunk, OccluderList, RESOURCE_TYPE, TAG,
};
pub use error::{LiteError, Result};
pub use light_source::{LIGHT_SOURCE_SIZE, LightSource, LightSourceType, PayloadMut};
pub use list::{BoundedList, Element, LIST_CAPACITY};
pub use notify::ChangeHandler;
pub use occluder::{OCCLUDER_SIZE, Occluder, OccluderType};
pub use payload::{
    CircularWindowPayload, GeneralPayload, LampShadePayload, LightSourcePayload, PAYLOAD_FLOATS,
    PAYLOAD_SIZE, PayloadKind, SpotPayload, SquareWindowPayload, TubeLightPayload,
};
pub use vertex::{Rgb, VERTEX_SIZE, Vertex};

/// Decode a chunk, checking the tag according to [`settings::checking`]
pub fn parse(bytes: &[u8]) -> Result<LightingChunk> {
    LightingChunk::decode(bytes, settings::checking())
}

/// Decode a chunk with explicit tag checking
pub fn parse_with(bytes: &[u8], strict: bool) -> Result<LightingChunk> {
    LightingChunk::decode(bytes, strict)
}

/// Encode a chunk
pub fn serialize(chunk: &LightingChunk) -> Result<Vec<u8>> {
    chunk.encode()
}
