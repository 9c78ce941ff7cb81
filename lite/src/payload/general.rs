//! General payload: 24 raw floats

use std::fmt;
use std::io::{self, Read, Write};

use crate::error::Result;
use crate::notify::{ChangeHandler, same_floats, update_floats};

use super::{PAYLOAD_FLOATS, exact, read_floats, write_floats};

/// Payload for every light source type without a dedicated layout
#[derive(Debug, Clone, Default)]
pub struct GeneralPayload {
    data: [f32; PAYLOAD_FLOATS],
    pub(crate) handler: ChangeHandler,
}

impl PartialEq for GeneralPayload {
    fn eq(&self, other: &Self) -> bool {
        same_floats(&self.data, &other.data)
    }
}

impl GeneralPayload {
    pub const DATA_LEN: usize = PAYLOAD_FLOATS;

    /// Build from exactly 24 floats
    pub fn new(data: &[f32]) -> Result<Self> {
        Ok(Self {
            data: exact("data", data)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        Ok(Self {
            data: read_floats(reader)?,
            handler: ChangeHandler::none(),
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write_floats(writer, &self.data)
    }

    pub fn to_floats(&self) -> [f32; PAYLOAD_FLOATS] {
        self.data
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Replace all 24 floats; any other length is rejected
    pub fn set_data(&mut self, data: &[f32]) -> Result<()> {
        let data = exact("data", data)?;
        update_floats(&mut self.data, data, &self.handler);
        Ok(())
    }
}

impl fmt::Display for GeneralPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Light Source Data: {:?}", self.data)
    }
}
