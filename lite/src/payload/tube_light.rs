//! Tube light payload

use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Result;
use crate::notify::{ChangeHandler, same_f32, same_floats, update, update_f32, update_floats};
use crate::vertex::Vertex;

use super::{PAYLOAD_FLOATS, exact, read_floats, tail, write_floats};

const UNUSED_START: usize = 5;
const UNUSED_LEN: usize = 19;

#[derive(Debug, Clone, Default)]
pub struct TubeLightPayload {
    at: Vertex,
    tube_length: f32,
    blur_scale: f32,
    unused: [f32; UNUSED_LEN],
    pub(crate) handler: ChangeHandler,
}

const _: () = assert!(UNUSED_START + UNUSED_LEN == PAYLOAD_FLOATS);

impl PartialEq for TubeLightPayload {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
            && same_f32(self.tube_length, other.tube_length)
            && same_f32(self.blur_scale, other.blur_scale)
            && same_floats(&self.unused, &other.unused)
    }
}

impl TubeLightPayload {
    pub const UNUSED_LEN: usize = UNUSED_LEN;

    pub fn new(at: Vertex, tube_length: f32, blur_scale: f32, unused: &[f32]) -> Result<Self> {
        Ok(Self {
            at,
            tube_length,
            blur_scale,
            unused: exact("unused", unused)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn from_floats(values: &[f32]) -> Result<Self> {
        let raw: [f32; PAYLOAD_FLOATS] = exact("data", values)?;
        Ok(Self {
            at: Vertex::new(raw[0], raw[1], raw[2]),
            tube_length: raw[3],
            blur_scale: raw[4],
            unused: tail(&raw, UNUSED_START),
            handler: ChangeHandler::none(),
        })
    }

    pub fn to_floats(&self) -> [f32; PAYLOAD_FLOATS] {
        let mut raw = [0.0f32; PAYLOAD_FLOATS];
        raw[0..3].copy_from_slice(&self.at.to_array());
        raw[3] = self.tube_length;
        raw[4] = self.blur_scale;
        raw[UNUSED_START..].copy_from_slice(&self.unused);
        raw
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            at: Vertex::read_from(reader)?,
            tube_length: reader.read_f32::<LittleEndian>()?,
            blur_scale: reader.read_f32::<LittleEndian>()?,
            unused: read_floats(reader)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.at.write_to(writer)?;
        writer.write_f32::<LittleEndian>(self.tube_length)?;
        writer.write_f32::<LittleEndian>(self.blur_scale)?;
        write_floats(writer, &self.unused)
    }

    pub fn at(&self) -> Vertex {
        self.at
    }

    pub fn tube_length(&self) -> f32 {
        self.tube_length
    }

    pub fn blur_scale(&self) -> f32 {
        self.blur_scale
    }

    pub fn unused(&self) -> &[f32] {
        &self.unused
    }

    pub fn set_at(&mut self, at: Vertex) {
        update(&mut self.at, at, &self.handler);
    }

    pub fn set_tube_length(&mut self, tube_length: f32) {
        update_f32(&mut self.tube_length, tube_length, &self.handler);
    }

    pub fn set_blur_scale(&mut self, blur_scale: f32) {
        update_f32(&mut self.blur_scale, blur_scale, &self.handler);
    }

    pub fn set_unused(&mut self, unused: &[f32]) -> Result<()> {
        let unused = exact("unused", unused)?;
        update_floats(&mut self.unused, unused, &self.handler);
        Ok(())
    }
}

impl fmt::Display for TubeLightPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "At: {}", self.at)?;
        writeln!(f, "Tube Length: {}", self.tube_length)?;
        writeln!(f, "Blur Scale: {}", self.blur_scale)?;
        writeln!(f, "Unused Light Source Data: {:?}", self.unused)
    }
}
