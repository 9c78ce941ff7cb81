//! Three-float value types
//!
//! [`Vertex`] and [`Rgb`] share the same 12-byte layout (three little-endian
//! `f32`); only the field names differ.

use std::fmt;
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::Vec3;

use crate::notify::same_f32;

/// Encoded size of a vertex or colour
pub const VERTEX_SIZE: usize = 12;

/// Position or direction
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vertex {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let [x, y, z] = read_triple(reader)?;
        Ok(Self { x, y, z })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_triple(writer, [self.x, self.y, self.z])
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Linear colour, stored exactly like a [`Vertex`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn read_from<R: Read>(reader: &mut R) -> std::io::Result<Self> {
        let [r, g, b] = read_triple(reader)?;
        Ok(Self { r, g, b })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        write_triple(writer, [self.r, self.g, self.b])
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

fn read_triple<R: Read>(reader: &mut R) -> std::io::Result<[f32; 3]> {
    Ok([
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
        reader.read_f32::<LittleEndian>()?,
    ])
}

fn write_triple<W: Write>(writer: &mut W, values: [f32; 3]) -> std::io::Result<()> {
    for value in values {
        writer.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}

// =============================================================================
// Conversions
// =============================================================================

// NaN components compare equal, so a value always equals its copy
impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        same_f32(self.x, other.x) && same_f32(self.y, other.y) && same_f32(self.z, other.z)
    }
}

impl PartialEq for Rgb {
    fn eq(&self, other: &Self) -> bool {
        same_f32(self.r, other.r) && same_f32(self.g, other.g) && same_f32(self.b, other.b)
    }
}

impl From<[f32; 3]> for Vertex {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for Vertex {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vertex> for Vec3 {
    fn from(v: Vertex) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for Rgb {
    fn from([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Vec3> for Rgb {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Rgb> for Vec3 {
    fn from(c: Rgb) -> Self {
        Vec3::new(c.r, c.g, c.b)
    }
}

/// Same storage, relabelled
impl From<Vertex> for Rgb {
    fn from(v: Vertex) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Rgb> for Vertex {
    fn from(c: Rgb) -> Self {
        Self::new(c.r, c.g, c.b)
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X: {}; Y: {}; Z: {}", self.x, self.y, self.z)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R: {}; G: {}; B: {}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_is_three_le_floats() {
        let mut buffer = Vec::new();
        Vertex::new(1.0, -2.0, 0.5).write_to(&mut buffer).unwrap();

        assert_eq!(buffer.len(), VERTEX_SIZE);
        assert_eq!(&buffer[0..4], &1.0f32.to_le_bytes());
        assert_eq!(&buffer[4..8], &(-2.0f32).to_le_bytes());
        assert_eq!(&buffer[8..12], &0.5f32.to_le_bytes());
    }

    #[test]
    fn test_rgb_shares_vertex_layout() {
        let mut from_vertex = Vec::new();
        let mut from_rgb = Vec::new();
        Vertex::new(0.25, 0.5, 0.75).write_to(&mut from_vertex).unwrap();
        Rgb::new(0.25, 0.5, 0.75).write_to(&mut from_rgb).unwrap();
        assert_eq!(from_vertex, from_rgb);

        let decoded = Rgb::read_from(&mut from_vertex.as_slice()).unwrap();
        assert_eq!(decoded, Rgb::from(Vertex::new(0.25, 0.5, 0.75)));
    }

    #[test]
    fn test_truncated_vertex_fails() {
        let bytes = [0u8; 8];
        assert!(Vertex::read_from(&mut bytes.as_slice()).is_err());
    }

    #[test]
    fn test_glam_conversions() {
        let v: Vertex = Vec3::new(1.0, 2.0, 3.0).into();
        assert_eq!(v, Vertex::new(1.0, 2.0, 3.0));
        assert_eq!(Vec3::from(Rgb::new(0.1, 0.2, 0.3)), Vec3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vertex::new(1.0, 2.5, -3.0).to_string(), "X: 1; Y: 2.5; Z: -3");
        assert_eq!(Rgb::new(1.0, 0.0, 0.5).to_string(), "R: 1; G: 0; B: 0.5");
    }
}
