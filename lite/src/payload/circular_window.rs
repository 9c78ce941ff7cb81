//! Circular window payload

use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Result;
use crate::notify::{ChangeHandler, same_f32, same_floats, update, update_f32, update_floats};
use crate::vertex::Vertex;

use super::{PAYLOAD_FLOATS, exact, read_floats, tail, write_floats};

const UNUSED_START: usize = 7;
const UNUSED_LEN: usize = 17;

#[derive(Debug, Clone, Default)]
pub struct CircularWindowPayload {
    at: Vertex,
    right: Vertex,
    radius: f32,
    unused: [f32; UNUSED_LEN],
    pub(crate) handler: ChangeHandler,
}

const _: () = assert!(UNUSED_START + UNUSED_LEN == PAYLOAD_FLOATS);

impl PartialEq for CircularWindowPayload {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
            && self.right == other.right
            && same_f32(self.radius, other.radius)
            && same_floats(&self.unused, &other.unused)
    }
}

impl CircularWindowPayload {
    pub const UNUSED_LEN: usize = UNUSED_LEN;

    pub fn new(at: Vertex, right: Vertex, radius: f32, unused: &[f32]) -> Result<Self> {
        Ok(Self {
            at,
            right,
            radius,
            unused: exact("unused", unused)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn from_floats(values: &[f32]) -> Result<Self> {
        let raw: [f32; PAYLOAD_FLOATS] = exact("data", values)?;
        Ok(Self {
            at: Vertex::new(raw[0], raw[1], raw[2]),
            right: Vertex::new(raw[3], raw[4], raw[5]),
            radius: raw[6],
            unused: tail(&raw, UNUSED_START),
            handler: ChangeHandler::none(),
        })
    }

    pub fn to_floats(&self) -> [f32; PAYLOAD_FLOATS] {
        let mut raw = [0.0f32; PAYLOAD_FLOATS];
        raw[0..3].copy_from_slice(&self.at.to_array());
        raw[3..6].copy_from_slice(&self.right.to_array());
        raw[6] = self.radius;
        raw[UNUSED_START..].copy_from_slice(&self.unused);
        raw
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            at: Vertex::read_from(reader)?,
            right: Vertex::read_from(reader)?,
            radius: reader.read_f32::<LittleEndian>()?,
            unused: read_floats(reader)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.at.write_to(writer)?;
        self.right.write_to(writer)?;
        writer.write_f32::<LittleEndian>(self.radius)?;
        write_floats(writer, &self.unused)
    }

    pub fn at(&self) -> Vertex {
        self.at
    }

    pub fn right(&self) -> Vertex {
        self.right
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn unused(&self) -> &[f32] {
        &self.unused
    }

    pub fn set_at(&mut self, at: Vertex) {
        update(&mut self.at, at, &self.handler);
    }

    pub fn set_right(&mut self, right: Vertex) {
        update(&mut self.right, right, &self.handler);
    }

    pub fn set_radius(&mut self, radius: f32) {
        update_f32(&mut self.radius, radius, &self.handler);
    }

    pub fn set_unused(&mut self, unused: &[f32]) -> Result<()> {
        let unused = exact("unused", unused)?;
        update_floats(&mut self.unused, unused, &self.handler);
        Ok(())
    }
}

impl fmt::Display for CircularWindowPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "At: {}", self.at)?;
        writeln!(f, "Right: {}", self.right)?;
        writeln!(f, "Radius: {}", self.radius)?;
        writeln!(f, "Unused Light Source Data: {:?}", self.unused)
    }
}
