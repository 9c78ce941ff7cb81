//! Occluder record
//!
//! # Layout (56 bytes)
//! ```text
//! 0x00: occluder_type u32
//! 0x04: origin        Vertex
//! 0x10: normal        Vertex
//! 0x1C: x_axis        Vertex
//! 0x28: y_axis        Vertex
//! 0x34: pair_offset   f32
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Result;
use crate::list::Element;
use crate::notify::{ChangeHandler, same_f32, update, update_f32};
use crate::vertex::{VERTEX_SIZE, Vertex};

/// Encoded size of one occluder
pub const OCCLUDER_SIZE: usize = 4 + 4 * VERTEX_SIZE + 4;

/// Occluder shape; does not affect the layout
///
/// `Other(0)` and `Other(1)` are the same types as `Disc` and `Rectangle`.
#[derive(Debug, Clone, Copy, Default)]
pub enum OccluderType {
    #[default]
    Disc,
    Rectangle,
    Other(u32),
}

impl OccluderType {
    pub const fn from_u32(code: u32) -> Self {
        match code {
            0x00 => Self::Disc,
            0x01 => Self::Rectangle,
            other => Self::Other(other),
        }
    }

    pub const fn canonical(self) -> Self {
        Self::from_u32(self.to_u32())
    }

    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Disc => 0x00,
            Self::Rectangle => 0x01,
            Self::Other(code) => code,
        }
    }
}

impl PartialEq for OccluderType {
    fn eq(&self, other: &Self) -> bool {
        self.to_u32() == other.to_u32()
    }
}

impl Eq for OccluderType {}

impl Hash for OccluderType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_u32().hash(state);
    }
}

impl fmt::Display for OccluderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical() {
            Self::Disc => f.write_str("Disc (0x00)"),
            Self::Rectangle => f.write_str("Rectangle (0x01)"),
            Self::Other(code) => write!(f, "0x{code:08X}"),
        }
    }
}

/// One light occluder
#[derive(Debug, Clone, Default)]
pub struct Occluder {
    occluder_type: OccluderType,
    origin: Vertex,
    normal: Vertex,
    x_axis: Vertex,
    y_axis: Vertex,
    pair_offset: f32,
    handler: ChangeHandler,
}

impl PartialEq for Occluder {
    fn eq(&self, other: &Self) -> bool {
        self.occluder_type == other.occluder_type
            && self.origin == other.origin
            && self.normal == other.normal
            && self.x_axis == other.x_axis
            && self.y_axis == other.y_axis
            && same_f32(self.pair_offset, other.pair_offset)
    }
}

impl Occluder {
    pub fn new(
        occluder_type: OccluderType,
        origin: Vertex,
        normal: Vertex,
        x_axis: Vertex,
        y_axis: Vertex,
        pair_offset: f32,
    ) -> Self {
        Self {
            occluder_type: occluder_type.canonical(),
            origin,
            normal,
            x_axis,
            y_axis,
            pair_offset,
            handler: ChangeHandler::none(),
        }
    }

    pub fn read_from<R: Read>(reader: &mut R, handler: &ChangeHandler) -> Result<Self> {
        Ok(Self {
            occluder_type: OccluderType::from_u32(reader.read_u32::<LittleEndian>()?),
            origin: Vertex::read_from(reader)?,
            normal: Vertex::read_from(reader)?,
            x_axis: Vertex::read_from(reader)?,
            y_axis: Vertex::read_from(reader)?,
            pair_offset: reader.read_f32::<LittleEndian>()?,
            handler: handler.clone(),
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.occluder_type.to_u32())?;
        self.origin.write_to(writer)?;
        self.normal.write_to(writer)?;
        self.x_axis.write_to(writer)?;
        self.y_axis.write_to(writer)?;
        writer.write_f32::<LittleEndian>(self.pair_offset)?;
        Ok(())
    }

    pub fn occluder_type(&self) -> OccluderType {
        self.occluder_type
    }

    pub fn origin(&self) -> Vertex {
        self.origin
    }

    pub fn normal(&self) -> Vertex {
        self.normal
    }

    pub fn x_axis(&self) -> Vertex {
        self.x_axis
    }

    pub fn y_axis(&self) -> Vertex {
        self.y_axis
    }

    pub fn pair_offset(&self) -> f32 {
        self.pair_offset
    }

    pub fn set_occluder_type(&mut self, occluder_type: OccluderType) {
        update(&mut self.occluder_type, occluder_type.canonical(), &self.handler);
    }

    pub fn set_origin(&mut self, origin: Vertex) {
        update(&mut self.origin, origin, &self.handler);
    }

    pub fn set_normal(&mut self, normal: Vertex) {
        update(&mut self.normal, normal, &self.handler);
    }

    pub fn set_x_axis(&mut self, x_axis: Vertex) {
        update(&mut self.x_axis, x_axis, &self.handler);
    }

    pub fn set_y_axis(&mut self, y_axis: Vertex) {
        update(&mut self.y_axis, y_axis, &self.handler);
    }

    pub fn set_pair_offset(&mut self, pair_offset: f32) {
        update_f32(&mut self.pair_offset, pair_offset, &self.handler);
    }
}

impl Element for Occluder {
    fn read_element<R: Read>(reader: &mut R, handler: &ChangeHandler) -> Result<Self> {
        Self::read_from(reader, handler)
    }

    fn write_element<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.write_to(writer)
    }

    fn attach(&mut self, handler: &ChangeHandler) {
        self.handler = handler.clone();
    }
}

impl fmt::Display for Occluder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Occluder Type: {}", self.occluder_type)?;
        writeln!(f, "Origin: {}", self.origin)?;
        writeln!(f, "Normal: {}", self.normal)?;
        writeln!(f, "X Axis: {}", self.x_axis)?;
        writeln!(f, "Y Axis: {}", self.y_axis)?;
        writeln!(f, "Pair Offset: {}", self.pair_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::{counting_handler, hits};

    fn sample() -> Occluder {
        Occluder::new(
            OccluderType::Rectangle,
            Vertex::new(1.0, 2.0, 3.0),
            Vertex::new(0.0, 1.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 0.0, 1.0),
            0.25,
        )
    }

    #[test]
    fn test_layout() {
        assert_eq!(OCCLUDER_SIZE, 56);

        let mut bytes = Vec::new();
        sample().write_to(&mut bytes).unwrap();
        assert_eq!(bytes.len(), OCCLUDER_SIZE);
        assert_eq!(&bytes[0..4], &1u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[20..24], &1.0f32.to_le_bytes()); // normal.y
        assert_eq!(&bytes[52..56], &0.25f32.to_le_bytes());
    }

    #[test]
    fn test_roundtrip_preserves_unknown_type() {
        let mut occluder = sample();
        occluder.set_occluder_type(OccluderType::Other(7));

        let mut bytes = Vec::new();
        occluder.write_to(&mut bytes).unwrap();
        let decoded = Occluder::read_from(&mut bytes.as_slice(), &ChangeHandler::none()).unwrap();

        assert_eq!(decoded, occluder);
        assert_eq!(decoded.occluder_type().to_u32(), 7);
    }

    #[test]
    fn test_type_does_not_change_layout() {
        let mut disc = Vec::new();
        let mut rect = Vec::new();
        let mut occluder = sample();
        occluder.write_to(&mut rect).unwrap();
        occluder.set_occluder_type(OccluderType::Disc);
        occluder.write_to(&mut disc).unwrap();

        assert_eq!(disc.len(), rect.len());
        assert_eq!(&disc[4..], &rect[4..]);
    }

    #[test]
    fn test_setters_notify_only_on_change() {
        let (handler, count) = counting_handler();
        let mut occluder = sample();
        occluder.attach(&handler);

        occluder.set_pair_offset(0.25);
        occluder.set_origin(Vertex::new(1.0, 2.0, 3.0));
        assert_eq!(hits(&count), 0);

        occluder.set_pair_offset(0.5);
        occluder.set_normal(Vertex::new(0.0, -1.0, 0.0));
        occluder.set_occluder_type(OccluderType::Disc);
        assert_eq!(hits(&count), 3);
    }

    #[test]
    fn test_other_with_named_code_is_canonical() {
        assert_eq!(OccluderType::Other(1), OccluderType::Rectangle);
        assert_eq!(OccluderType::Other(0).to_string(), "Disc (0x00)");

        let mut occluder = sample();
        occluder.set_occluder_type(OccluderType::Other(0));
        assert!(matches!(occluder.occluder_type(), OccluderType::Disc));

        let (handler, count) = counting_handler();
        occluder.attach(&handler);
        occluder.set_occluder_type(OccluderType::Disc);
        assert_eq!(hits(&count), 0);
    }

    #[test]
    fn test_nan_pair_offset_is_not_a_change() {
        let (handler, count) = counting_handler();
        let mut occluder = sample();
        occluder.attach(&handler);
        occluder.set_pair_offset(f32::NAN);
        assert_eq!(hits(&count), 1);

        occluder.set_pair_offset(f32::NAN);
        assert_eq!(hits(&count), 1);
        assert_eq!(occluder, occluder.clone());
    }

    #[test]
    fn test_truncated_occluder_fails() {
        let bytes = [0u8; OCCLUDER_SIZE - 4];
        assert!(Occluder::read_from(&mut bytes.as_slice(), &ChangeHandler::none()).is_err());
    }

    #[test]
    fn test_display() {
        let text = sample().to_string();
        assert!(text.starts_with("Occluder Type: Rectangle (0x01)\n"));
        assert!(text.contains("Pair Offset: 0.25"));
    }
}
