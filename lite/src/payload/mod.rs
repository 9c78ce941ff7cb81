//! Light source payloads
//!
//! Every light source ends with a 96-byte block (24 little-endian `f32`).
//! What those floats mean depends on the light source type:
//!
//! ```text
//! General         24 × f32
//! Spot            at(3) falloff_angle blur_scale                        unused(19)
//! LampShade       at(3) falloff_angle shade_light_rig_multiplier
//!                 bottom_angle shade_color(3)                           unused(15)
//! TubeLight       at(3) tube_length blur_scale                          unused(19)
//! SquareWindow    at(3) right(3) width height falloff_angle
//!                 window_top_bottom_angle                               unused(14)
//! CircularWindow  at(3) right(3) radius                                 unused(17)
//! ```
//!
//! Changing a record's type re-encodes the current payload and decodes the
//! raw bytes as the new variant ([`LightSourcePayload::reinterpret`]), so
//! float N of the old layout becomes float N of the new one.

mod circular_window;
mod general;
mod lamp_shade;
mod spot;
mod square_window;
mod tube_light;


use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{LiteError, Result};
use crate::notify::ChangeHandler;

pub use circular_window::CircularWindowPayload;
pub use general::GeneralPayload;
pub use lamp_shade::LampShadePayload;
pub use spot::SpotPayload;
pub use square_window::SquareWindowPayload;
pub use tube_light::TubeLightPayload;

/// Number of floats in every payload
pub const PAYLOAD_FLOATS: usize = 24;

/// Encoded payload size in bytes
pub const PAYLOAD_SIZE: usize = PAYLOAD_FLOATS * 4;

/// Payload layout selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    General,
    Spot,
    LampShade,
    TubeLight,
    SquareWindow,
    CircularWindow,
}

impl PayloadKind {
    pub const ALL: [PayloadKind; 6] = [
        PayloadKind::General,
        PayloadKind::Spot,
        PayloadKind::LampShade,
        PayloadKind::TubeLight,
        PayloadKind::SquareWindow,
        PayloadKind::CircularWindow,
    ];

    /// Length of the trailing float array for this layout
    ///
    /// For `General` that is the whole payload.
    pub const fn unused_len(self) -> usize {
        match self {
            PayloadKind::General => GeneralPayload::DATA_LEN,
            PayloadKind::Spot => SpotPayload::UNUSED_LEN,
            PayloadKind::LampShade => LampShadePayload::UNUSED_LEN,
            PayloadKind::TubeLight => TubeLightPayload::UNUSED_LEN,
            PayloadKind::SquareWindow => SquareWindowPayload::UNUSED_LEN,
            PayloadKind::CircularWindow => CircularWindowPayload::UNUSED_LEN,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PayloadKind::General => "General",
            PayloadKind::Spot => "Spot",
            PayloadKind::LampShade => "LampShade",
            PayloadKind::TubeLight => "TubeLight",
            PayloadKind::SquareWindow => "SquareWindow",
            PayloadKind::CircularWindow => "CircularWindow",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Light source payload, one variant per layout
#[derive(Debug, Clone, PartialEq)]
pub enum LightSourcePayload {
    General(GeneralPayload),
    Spot(SpotPayload),
    LampShade(LampShadePayload),
    TubeLight(TubeLightPayload),
    SquareWindow(SquareWindowPayload),
    CircularWindow(CircularWindowPayload),
}

impl Default for LightSourcePayload {
    fn default() -> Self {
        LightSourcePayload::General(GeneralPayload::default())
    }
}

impl LightSourcePayload {
    /// All-zero payload of the given layout
    pub fn zeroed(kind: PayloadKind) -> Self {
        match kind {
            PayloadKind::General => Self::General(GeneralPayload::default()),
            PayloadKind::Spot => Self::Spot(SpotPayload::default()),
            PayloadKind::LampShade => Self::LampShade(LampShadePayload::default()),
            PayloadKind::TubeLight => Self::TubeLight(TubeLightPayload::default()),
            PayloadKind::SquareWindow => Self::SquareWindow(SquareWindowPayload::default()),
            PayloadKind::CircularWindow => Self::CircularWindow(CircularWindowPayload::default()),
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::General(_) => PayloadKind::General,
            Self::Spot(_) => PayloadKind::Spot,
            Self::LampShade(_) => PayloadKind::LampShade,
            Self::TubeLight(_) => PayloadKind::TubeLight,
            Self::SquareWindow(_) => PayloadKind::SquareWindow,
            Self::CircularWindow(_) => PayloadKind::CircularWindow,
        }
    }

    /// Decode 96 bytes as the given layout
    pub fn read_from<R: Read>(
        kind: PayloadKind,
        reader: &mut R,
        handler: &ChangeHandler,
    ) -> io::Result<Self> {
        let mut payload = match kind {
            PayloadKind::General => Self::General(GeneralPayload::read_from(reader)?),
            PayloadKind::Spot => Self::Spot(SpotPayload::read_from(reader)?),
            PayloadKind::LampShade => Self::LampShade(LampShadePayload::read_from(reader)?),
            PayloadKind::TubeLight => Self::TubeLight(TubeLightPayload::read_from(reader)?),
            PayloadKind::SquareWindow => {
                Self::SquareWindow(SquareWindowPayload::read_from(reader)?)
            }
            PayloadKind::CircularWindow => {
                Self::CircularWindow(CircularWindowPayload::read_from(reader)?)
            }
        };
        payload.set_handler(handler.clone());
        Ok(payload)
    }

    /// Encode the 96-byte block
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match self {
            Self::General(p) => p.write_to(writer),
            Self::Spot(p) => p.write_to(writer),
            Self::LampShade(p) => p.write_to(writer),
            Self::TubeLight(p) => p.write_to(writer),
            Self::SquareWindow(p) => p.write_to(writer),
            Self::CircularWindow(p) => p.write_to(writer),
        }
    }

    /// Encoded bytes of the payload
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut raw = Vec::with_capacity(PAYLOAD_SIZE);
        self.write_to(&mut raw)?;
        Ok(raw)
    }

    /// Decode raw bytes as the given layout
    pub fn from_bytes(kind: PayloadKind, bytes: &[u8]) -> Result<Self> {
        let mut reader = bytes;
        Ok(Self::read_from(kind, &mut reader, &ChangeHandler::none())?)
    }

    /// Build a payload of the given layout from exactly 24 floats
    pub fn from_floats(kind: PayloadKind, values: &[f32]) -> Result<Self> {
        Ok(match kind {
            PayloadKind::General => Self::General(GeneralPayload::new(values)?),
            PayloadKind::Spot => Self::Spot(SpotPayload::from_floats(values)?),
            PayloadKind::LampShade => Self::LampShade(LampShadePayload::from_floats(values)?),
            PayloadKind::TubeLight => Self::TubeLight(TubeLightPayload::from_floats(values)?),
            PayloadKind::SquareWindow => {
                Self::SquareWindow(SquareWindowPayload::from_floats(values)?)
            }
            PayloadKind::CircularWindow => {
                Self::CircularWindow(CircularWindowPayload::from_floats(values)?)
            }
        })
    }

    /// The payload as a flat float array, in wire order
    pub fn to_floats(&self) -> [f32; PAYLOAD_FLOATS] {
        match self {
            Self::General(p) => p.to_floats(),
            Self::Spot(p) => p.to_floats(),
            Self::LampShade(p) => p.to_floats(),
            Self::TubeLight(p) => p.to_floats(),
            Self::SquareWindow(p) => p.to_floats(),
            Self::CircularWindow(p) => p.to_floats(),
        }
    }

    /// Re-read this payload's encoded bytes as another layout
    ///
    /// Always goes through encode and decode, even when `kind` is the current
    /// layout. The result carries `handler`.
    pub fn reinterpret(&self, kind: PayloadKind, handler: &ChangeHandler) -> Result<Self> {
        tracing::trace!("Reinterpreting {} payload as {}", self.kind(), kind);
        let raw = self.to_bytes()?;
        let mut reader = raw.as_slice();
        Ok(Self::read_from(kind, &mut reader, handler)?)
    }

    pub(crate) fn set_handler(&mut self, handler: ChangeHandler) {
        match self {
            Self::General(p) => p.handler = handler,
            Self::Spot(p) => p.handler = handler,
            Self::LampShade(p) => p.handler = handler,
            Self::TubeLight(p) => p.handler = handler,
            Self::SquareWindow(p) => p.handler = handler,
            Self::CircularWindow(p) => p.handler = handler,
        }
    }

    pub fn as_general(&self) -> Option<&GeneralPayload> {
        match self {
            Self::General(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_spot(&self) -> Option<&SpotPayload> {
        match self {
            Self::Spot(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_lamp_shade(&self) -> Option<&LampShadePayload> {
        match self {
            Self::LampShade(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_tube_light(&self) -> Option<&TubeLightPayload> {
        match self {
            Self::TubeLight(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_square_window(&self) -> Option<&SquareWindowPayload> {
        match self {
            Self::SquareWindow(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_circular_window(&self) -> Option<&CircularWindowPayload> {
        match self {
            Self::CircularWindow(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for LightSourcePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::General(p) => fmt::Display::fmt(p, f),
            Self::Spot(p) => fmt::Display::fmt(p, f),
            Self::LampShade(p) => fmt::Display::fmt(p, f),
            Self::TubeLight(p) => fmt::Display::fmt(p, f),
            Self::SquareWindow(p) => fmt::Display::fmt(p, f),
            Self::CircularWindow(p) => fmt::Display::fmt(p, f),
        }
    }
}

// =============================================================================
// Shared helpers for the variant codecs
// =============================================================================

pub(crate) fn read_floats<R: Read, const N: usize>(reader: &mut R) -> io::Result<[f32; N]> {
    let mut values = [0.0f32; N];
    reader.read_f32_into::<LittleEndian>(&mut values)?;
    Ok(values)
}

pub(crate) fn write_floats<W: Write>(writer: &mut W, values: &[f32]) -> io::Result<()> {
    for &value in values {
        writer.write_f32::<LittleEndian>(value)?;
    }
    Ok(())
}

/// Copy a caller-supplied slice into a fixed array, checking its length
pub(crate) fn exact<const N: usize>(field: &'static str, values: &[f32]) -> Result<[f32; N]> {
    <[f32; N]>::try_from(values).map_err(|_| LiteError::Argument {
        field,
        expected: N,
        actual: values.len(),
    })
}

/// The `N` floats of `raw` starting at `start`
pub(crate) fn tail<const N: usize>(raw: &[f32; PAYLOAD_FLOATS], start: usize) -> [f32; N] {
    let mut out = [0.0f32; N];
    out.copy_from_slice(&raw[start..start + N]);
    out
}
