//! LITE chunk
//!
//! # Layout
//! ```text
//! 0x00: tag            [u8; 4]  "LITE"
//! 0x04: version        u32
//! 0x08: unknown1       u32
//! 0x0C: light_count    u8
//! 0x0D: occluder_count u8
//! 0x0E: unknown2       u16
//! 0x10: light_count × LightSource (128 bytes each)
//! var:  occluder_count × Occluder (56 bytes each)
//! ```
//!
//! Both counts come from the list lengths at encode time.

use std::fmt;
use std::io::{Cursor, Read, Seek, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{LiteError, Result};
use crate::light_source::{LIGHT_SOURCE_SIZE, LightSource};
use crate::list::{BoundedList, LIST_CAPACITY};
use crate::notify::{ChangeHandler, update};
use crate::occluder::{OCCLUDER_SIZE, Occluder};


/// Light sources of a chunk
pub type LightSourceList = BoundedList<LightSource>;

/// Occluders of a chunk
pub type OccluderList = BoundedList<Occluder>;

/// Four-character code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    pub const fn to_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &byte in &self.0 {
            if byte.is_ascii_graphic() || byte == b' ' {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "\\x{byte:02X}")?;
            }
        }
        Ok(())
    }
}

/// Tag every LITE chunk starts with
pub const TAG: FourCc = FourCc(*b"LITE");

/// Resource type code of LITE chunks inside RCOL containers
pub const RESOURCE_TYPE: u32 = 0x03B4_C61D;

/// Version written by new chunks
pub const DEFAULT_VERSION: u32 = 4;
/// First unknown header field of new chunks
pub const DEFAULT_UNKNOWN1: u32 = 0x84;
/// Second unknown header field of new chunks
pub const DEFAULT_UNKNOWN2: u16 = 0;

/// Size of the fixed header before the light sources
pub const CHUNK_HEADER_SIZE: usize = 16;

/// Lighting chunk: header fields plus light sources and occluders
#[derive(Debug, Clone, PartialEq)]
pub struct LightingChunk {
    tag: FourCc,
    version: u32,
    unknown1: u32,
    unknown2: u16,
    lights: LightSourceList,
    occluders: OccluderList,
    handler: ChangeHandler,
}

impl Default for LightingChunk {
    fn default() -> Self {
        Self::with_handler(ChangeHandler::none())
    }
}

impl LightingChunk {
    /// Empty chunk with default header values
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty chunk whose changes are reported to `handler`
    pub fn with_handler(handler: ChangeHandler) -> Self {
        Self {
            tag: TAG,
            version: DEFAULT_VERSION,
            unknown1: DEFAULT_UNKNOWN1,
            unknown2: DEFAULT_UNKNOWN2,
            lights: BoundedList::new(handler.clone()),
            occluders: BoundedList::new(handler.clone()),
            handler,
        }
    }

    /// Decode a chunk from a byte buffer
    pub fn decode(bytes: &[u8], strict: bool) -> Result<Self> {
        Self::read_from(&mut Cursor::new(bytes), strict, ChangeHandler::none())
    }

    /// Decode a chunk from a stream
    ///
    /// With `strict` set, a tag other than `LITE` fails with
    /// [`LiteError::Format`]. Without it the tag is kept as read and decoding
    /// carries on, which can mask corrupt input.
    pub fn read_from<R: Read + Seek>(
        reader: &mut R,
        strict: bool,
        handler: ChangeHandler,
    ) -> Result<Self> {
        let mut tag = [0u8; 4];
        reader.read_exact(&mut tag)?;
        let tag = FourCc(tag);
        if tag != TAG {
            let offset = reader.stream_position()?;
            if strict {
                return Err(LiteError::Format {
                    actual: tag,
                    expected: TAG,
                    offset,
                });
            }
            tracing::warn!(
                "Accepting chunk with tag '{}' (expected '{}') at 0x{:08X}: tag checking is off",
                tag,
                TAG,
                offset
            );
        }

        let version = reader.read_u32::<LittleEndian>()?;
        let unknown1 = reader.read_u32::<LittleEndian>()?;
        let light_count = reader.read_u8()?;
        let occluder_count = reader.read_u8()?;
        let unknown2 = reader.read_u16::<LittleEndian>()?;

        let lights: LightSourceList = BoundedList::read_from(light_count as usize, reader, &handler)?;
        let occluders: OccluderList = BoundedList::read_from(occluder_count as usize, reader, &handler)?;

        tracing::debug!(
            "Decoded LITE chunk v{}: {} light sources, {} occluders",
            version,
            lights.len(),
            occluders.len()
        );

        Ok(Self {
            tag,
            version,
            unknown1,
            unknown2,
            lights,
            occluders,
            handler,
        })
    }

    /// Encode the chunk
    ///
    /// Fails before producing any bytes if a list is too long for its
    /// count byte.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(self.encoded_len());
        self.write_to(&mut buffer)?;
        tracing::debug!("Encoded LITE chunk: {} bytes", buffer.len());
        Ok(buffer)
    }

    /// Encode the chunk into a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let light_count = count_byte(self.lights.len())?;
        let occluder_count = count_byte(self.occluders.len())?;

        writer.write_all(&self.tag.0)?;
        writer.write_u32::<LittleEndian>(self.version)?;
        writer.write_u32::<LittleEndian>(self.unknown1)?;
        writer.write_u8(light_count)?;
        writer.write_u8(occluder_count)?;
        writer.write_u16::<LittleEndian>(self.unknown2)?;
        self.lights.write_to(writer)?;
        self.occluders.write_to(writer)?;
        Ok(())
    }

    /// Number of bytes [`LightingChunk::encode`] produces
    pub fn encoded_len(&self) -> usize {
        CHUNK_HEADER_SIZE
            + self.lights.len() * LIGHT_SOURCE_SIZE
            + self.occluders.len() * OCCLUDER_SIZE
    }

    /// Deep copy whose changes are reported to `handler`
    pub fn copy_with_handler(&self, handler: ChangeHandler) -> Self {
        let mut copy = self.clone();
        copy.set_change_handler(handler);
        copy
    }

    /// Route change notifications from the whole chunk to `handler`
    pub fn set_change_handler(&mut self, handler: ChangeHandler) {
        self.lights.attach(&handler);
        self.occluders.attach(&handler);
        self.handler = handler;
    }

    pub fn tag(&self) -> FourCc {
        self.tag
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn unknown1(&self) -> u32 {
        self.unknown1
    }

    pub fn unknown2(&self) -> u16 {
        self.unknown2
    }

    pub fn lights(&self) -> &LightSourceList {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut LightSourceList {
        &mut self.lights
    }

    pub fn occluders(&self) -> &OccluderList {
        &self.occluders
    }

    pub fn occluders_mut(&mut self) -> &mut OccluderList {
        &mut self.occluders
    }

    pub fn set_version(&mut self, version: u32) {
        update(&mut self.version, version, &self.handler);
    }

    pub fn set_unknown1(&mut self, unknown1: u32) {
        update(&mut self.unknown1, unknown1, &self.handler);
    }

    pub fn set_unknown2(&mut self, unknown2: u16) {
        update(&mut self.unknown2, unknown2, &self.handler);
    }

    /// Replace all light sources
    pub fn set_lights(&mut self, mut lights: LightSourceList) {
        lights.attach(&self.handler);
        update(&mut self.lights, lights, &self.handler);
    }

    /// Replace all occluders
    pub fn set_occluders(&mut self, mut occluders: OccluderList) {
        occluders.attach(&self.handler);
        update(&mut self.occluders, occluders, &self.handler);
    }
}

fn count_byte(len: usize) -> Result<u8> {
    u8::try_from(len).map_err(|_| LiteError::Capacity {
        capacity: LIST_CAPACITY,
    })
}

impl fmt::Display for LightingChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tag: {}", self.tag)?;
        writeln!(f, "Version: 0x{:08X}", self.version)?;
        writeln!(f, "Unknown1: 0x{:08X}", self.unknown1)?;
        writeln!(f, "Unknown2: 0x{:04X}", self.unknown2)?;
        writeln!(f, "Light Sources: {}", self.lights.len())?;
        for (i, light) in self.lights.iter().enumerate() {
            writeln!(f, "--- Light Source[{i}] ---")?;
            write!(f, "{light}")?;
        }
        writeln!(f, "Occluders: {}", self.occluders.len())?;
        for (i, occluder) in self.occluders.iter().enumerate() {
            writeln!(f, "--- Occluder[{i}] ---")?;
            write!(f, "{occluder}")?;
        }
        Ok(())
    }
}
