//! Lamp shade payload

use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Result;
use crate::notify::{ChangeHandler, same_f32, same_floats, update, update_f32, update_floats};
use crate::vertex::{Rgb, Vertex};

use super::{PAYLOAD_FLOATS, exact, read_floats, tail, write_floats};

const UNUSED_START: usize = 9;
const UNUSED_LEN: usize = 15;

#[derive(Debug, Clone, Default)]
pub struct LampShadePayload {
    at: Vertex,
    falloff_angle: f32,
    shade_light_rig_multiplier: f32,
    bottom_angle: f32,
    shade_color: Rgb,
    unused: [f32; UNUSED_LEN],
    pub(crate) handler: ChangeHandler,
}

const _: () = assert!(UNUSED_START + UNUSED_LEN == PAYLOAD_FLOATS);

impl PartialEq for LampShadePayload {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
            && self.shade_color == other.shade_color
            && same_f32(self.falloff_angle, other.falloff_angle)
            && same_f32(self.shade_light_rig_multiplier, other.shade_light_rig_multiplier)
            && same_f32(self.bottom_angle, other.bottom_angle)
            && same_floats(&self.unused, &other.unused)
    }
}

impl LampShadePayload {
    pub const UNUSED_LEN: usize = UNUSED_LEN;

    /// Build from fields; `unused` must hold exactly 15 floats
    pub fn new(
        at: Vertex,
        falloff_angle: f32,
        shade_light_rig_multiplier: f32,
        bottom_angle: f32,
        shade_color: Rgb,
        unused: &[f32],
    ) -> Result<Self> {
        Ok(Self {
            at,
            falloff_angle,
            shade_light_rig_multiplier,
            bottom_angle,
            shade_color,
            unused: exact("unused", unused)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn from_floats(values: &[f32]) -> Result<Self> {
        let raw: [f32; PAYLOAD_FLOATS] = exact("data", values)?;
        Ok(Self {
            at: Vertex::new(raw[0], raw[1], raw[2]),
            falloff_angle: raw[3],
            shade_light_rig_multiplier: raw[4],
            bottom_angle: raw[5],
            shade_color: Rgb::new(raw[6], raw[7], raw[8]),
            unused: tail(&raw, UNUSED_START),
            handler: ChangeHandler::none(),
        })
    }

    pub fn to_floats(&self) -> [f32; PAYLOAD_FLOATS] {
        let mut raw = [0.0f32; PAYLOAD_FLOATS];
        raw[0..3].copy_from_slice(&self.at.to_array());
        raw[3] = self.falloff_angle;
        raw[4] = self.shade_light_rig_multiplier;
        raw[5] = self.bottom_angle;
        raw[6..9].copy_from_slice(&self.shade_color.to_array());
        raw[UNUSED_START..].copy_from_slice(&self.unused);
        raw
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            at: Vertex::read_from(reader)?,
            falloff_angle: reader.read_f32::<LittleEndian>()?,
            shade_light_rig_multiplier: reader.read_f32::<LittleEndian>()?,
            bottom_angle: reader.read_f32::<LittleEndian>()?,
            shade_color: Rgb::read_from(reader)?,
            unused: read_floats(reader)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.at.write_to(writer)?;
        writer.write_f32::<LittleEndian>(self.falloff_angle)?;
        writer.write_f32::<LittleEndian>(self.shade_light_rig_multiplier)?;
        writer.write_f32::<LittleEndian>(self.bottom_angle)?;
        self.shade_color.write_to(writer)?;
        write_floats(writer, &self.unused)
    }

    pub fn at(&self) -> Vertex {
        self.at
    }

    pub fn falloff_angle(&self) -> f32 {
        self.falloff_angle
    }

    pub fn shade_light_rig_multiplier(&self) -> f32 {
        self.shade_light_rig_multiplier
    }

    pub fn bottom_angle(&self) -> f32 {
        self.bottom_angle
    }

    pub fn shade_color(&self) -> Rgb {
        self.shade_color
    }

    pub fn unused(&self) -> &[f32] {
        &self.unused
    }

    pub fn set_at(&mut self, at: Vertex) {
        update(&mut self.at, at, &self.handler);
    }

    pub fn set_falloff_angle(&mut self, falloff_angle: f32) {
        update_f32(&mut self.falloff_angle, falloff_angle, &self.handler);
    }

    pub fn set_shade_light_rig_multiplier(&mut self, multiplier: f32) {
        update_f32(&mut self.shade_light_rig_multiplier, multiplier, &self.handler);
    }

    pub fn set_bottom_angle(&mut self, bottom_angle: f32) {
        update_f32(&mut self.bottom_angle, bottom_angle, &self.handler);
    }

    pub fn set_shade_color(&mut self, shade_color: Rgb) {
        update(&mut self.shade_color, shade_color, &self.handler);
    }

    pub fn set_unused(&mut self, unused: &[f32]) -> Result<()> {
        let unused = exact("unused", unused)?;
        update_floats(&mut self.unused, unused, &self.handler);
        Ok(())
    }
}

impl fmt::Display for LampShadePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "At: {}", self.at)?;
        writeln!(f, "Falloff Angle: {}", self.falloff_angle)?;
        writeln!(
            f,
            "Shade Light Rig Multiplier: {}",
            self.shade_light_rig_multiplier
        )?;
        writeln!(f, "Bottom Angle: {}", self.bottom_angle)?;
        writeln!(f, "Shade Color: {}", self.shade_color)?;
        writeln!(f, "Unused Light Source Data: {:?}", self.unused)
    }
}
