//! Square window payload

use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Result;
use crate::notify::{ChangeHandler, same_f32, same_floats, update, update_f32, update_floats};
use crate::vertex::Vertex;

use super::{PAYLOAD_FLOATS, exact, read_floats, tail, write_floats};

const UNUSED_START: usize = 10;
const UNUSED_LEN: usize = 14;

#[derive(Debug, Clone, Default)]
pub struct SquareWindowPayload {
    at: Vertex,
    right: Vertex,
    width: f32,
    height: f32,
    falloff_angle: f32,
    window_top_bottom_angle: f32,
    unused: [f32; UNUSED_LEN],
    pub(crate) handler: ChangeHandler,
}

const _: () = assert!(UNUSED_START + UNUSED_LEN == PAYLOAD_FLOATS);

impl PartialEq for SquareWindowPayload {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
            && self.right == other.right
            && same_f32(self.width, other.width)
            && same_f32(self.height, other.height)
            && same_f32(self.falloff_angle, other.falloff_angle)
            && same_f32(self.window_top_bottom_angle, other.window_top_bottom_angle)
            && same_floats(&self.unused, &other.unused)
    }
}

impl SquareWindowPayload {
    pub const UNUSED_LEN: usize = UNUSED_LEN;

    /// Build from fields; `unused` must hold exactly 14 floats
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        at: Vertex,
        right: Vertex,
        width: f32,
        height: f32,
        falloff_angle: f32,
        window_top_bottom_angle: f32,
        unused: &[f32],
    ) -> Result<Self> {
        Ok(Self {
            at,
            right,
            width,
            height,
            falloff_angle,
            window_top_bottom_angle,
            unused: exact("unused", unused)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn from_floats(values: &[f32]) -> Result<Self> {
        let raw: [f32; PAYLOAD_FLOATS] = exact("data", values)?;
        Ok(Self {
            at: Vertex::new(raw[0], raw[1], raw[2]),
            right: Vertex::new(raw[3], raw[4], raw[5]),
            width: raw[6],
            height: raw[7],
            falloff_angle: raw[8],
            window_top_bottom_angle: raw[9],
            unused: tail(&raw, UNUSED_START),
            handler: ChangeHandler::none(),
        })
    }

    pub fn to_floats(&self) -> [f32; PAYLOAD_FLOATS] {
        let mut raw = [0.0f32; PAYLOAD_FLOATS];
        raw[0..3].copy_from_slice(&self.at.to_array());
        raw[3..6].copy_from_slice(&self.right.to_array());
        raw[6] = self.width;
        raw[7] = self.height;
        raw[8] = self.falloff_angle;
        raw[9] = self.window_top_bottom_angle;
        raw[UNUSED_START..].copy_from_slice(&self.unused);
        raw
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            at: Vertex::read_from(reader)?,
            right: Vertex::read_from(reader)?,
            width: reader.read_f32::<LittleEndian>()?,
            height: reader.read_f32::<LittleEndian>()?,
            falloff_angle: reader.read_f32::<LittleEndian>()?,
            window_top_bottom_angle: reader.read_f32::<LittleEndian>()?,
            unused: read_floats(reader)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.at.write_to(writer)?;
        self.right.write_to(writer)?;
        writer.write_f32::<LittleEndian>(self.width)?;
        writer.write_f32::<LittleEndian>(self.height)?;
        writer.write_f32::<LittleEndian>(self.falloff_angle)?;
        writer.write_f32::<LittleEndian>(self.window_top_bottom_angle)?;
        write_floats(writer, &self.unused)
    }

    pub fn at(&self) -> Vertex {
        self.at
    }

    pub fn right(&self) -> Vertex {
        self.right
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn falloff_angle(&self) -> f32 {
        self.falloff_angle
    }

    pub fn window_top_bottom_angle(&self) -> f32 {
        self.window_top_bottom_angle
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

    pub fn set_width(&mut self, width: f32) {
        update_f32(&mut self.width, width, &self.handler);
    }

    pub fn set_height(&mut self, height: f32) {
        update_f32(&mut self.height, height, &self.handler);
    }

    pub fn set_falloff_angle(&mut self, falloff_angle: f32) {
        update_f32(&mut self.falloff_angle, falloff_angle, &self.handler);
    }

    pub fn set_window_top_bottom_angle(&mut self, angle: f32) {
        update_f32(&mut self.window_top_bottom_angle, angle, &self.handler);
    }

    pub fn set_unused(&mut self, unused: &[f32]) -> Result<()> {
        let unused = exact("unused", unused)?;
        update_floats(&mut self.unused, unused, &self.handler);
        Ok(())
    }
}

impl fmt::Display for SquareWindowPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "At: {}", self.at)?;
        writeln!(f, "Right: {}", self.right)?;
        writeln!(f, "Width: {}", self.width)?;
        writeln!(f, "Height: {}", self.height)?;
        writeln!(f, "Falloff Angle: {}", self.falloff_angle)?;
        writeln!(
            f,
            "Window Top Bottom Angle: {}",
            self.window_top_bottom_angle
        )?;
        writeln!(f, "Unused Light Source Data: {:?}", self.unused)
    }
}
