//! Light source record
//!
//! # Layout (128 bytes)
//! ```text
//! 0x00: light_type u32
//! 0x04: transform  Vertex (12 bytes)
//! 0x10: color      Rgb (12 bytes)
//! 0x1C: intensity  f32
//! 0x20: payload    96 bytes, layout chosen by light_type
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{LiteError, Result};
use crate::list::Element;
use crate::notify::{ChangeHandler, same_f32, update, update_f32};
use crate::payload::{
    CircularWindowPayload, GeneralPayload, LampShadePayload, LightSourcePayload, PAYLOAD_SIZE,
    PayloadKind, SpotPayload, SquareWindowPayload, TubeLightPayload,
};
use crate::vertex::{Rgb, VERTEX_SIZE, Vertex};

/// Encoded size of one light source
pub const LIGHT_SOURCE_SIZE: usize = 4 + VERTEX_SIZE + VERTEX_SIZE + 4 + PAYLOAD_SIZE;

/// Light source discriminant
///
/// Codes without a name are kept as `Other` so they survive a round trip.
/// `Other` holding a named code (e.g. `Other(4)`) is the same type as the
/// named variant: equality, hashing and layout dispatch all go by the code,
/// and records store the canonical form.
#[derive(Debug, Clone, Copy, Default)]
pub enum LightSourceType {
    #[default]
    Unknown,
    Ambient,
    Directional,
    Point,
    Spot,
    LampShade,
    TubeLight,
    SquareWindow,
    CircularWindow,
    SquareAreaLight,
    DiscAreaLight,
    WorldLight,
    Other(u32),
}

impl LightSourceType {
    pub const NAMED: [LightSourceType; 12] = [
        LightSourceType::Unknown,
        LightSourceType::Ambient,
        LightSourceType::Directional,
        LightSourceType::Point,
        LightSourceType::Spot,
        LightSourceType::LampShade,
        LightSourceType::TubeLight,
        LightSourceType::SquareWindow,
        LightSourceType::CircularWindow,
        LightSourceType::SquareAreaLight,
        LightSourceType::DiscAreaLight,
        LightSourceType::WorldLight,
    ];

    pub const fn from_u32(code: u32) -> Self {
        match code {
            0x00 => Self::Unknown,
            0x01 => Self::Ambient,
            0x02 => Self::Directional,
            0x03 => Self::Point,
            0x04 => Self::Spot,
            0x05 => Self::LampShade,
            0x06 => Self::TubeLight,
            0x07 => Self::SquareWindow,
            0x08 => Self::CircularWindow,
            0x09 => Self::SquareAreaLight,
            0x0A => Self::DiscAreaLight,
            0x0B => Self::WorldLight,
            other => Self::Other(other),
        }
    }

    /// The named variant for this code, if there is one
    pub const fn canonical(self) -> Self {
        Self::from_u32(self.to_u32())
    }

    pub const fn to_u32(self) -> u32 {
        match self {
            Self::Unknown => 0x00,
            Self::Ambient => 0x01,
            Self::Directional => 0x02,
            Self::Point => 0x03,
            Self::Spot => 0x04,
            Self::LampShade => 0x05,
            Self::TubeLight => 0x06,
            Self::SquareWindow => 0x07,
            Self::CircularWindow => 0x08,
            Self::SquareAreaLight => 0x09,
            Self::DiscAreaLight => 0x0A,
            Self::WorldLight => 0x0B,
            Self::Other(code) => code,
        }
    }

    /// Payload layout used by this type
    ///
    /// Only five types have a dedicated layout; everything else is `General`.
    pub const fn payload_kind(self) -> PayloadKind {
        match self.canonical() {
            Self::Spot => PayloadKind::Spot,
            Self::LampShade => PayloadKind::LampShade,
            Self::TubeLight => PayloadKind::TubeLight,
            Self::SquareWindow => PayloadKind::SquareWindow,
            Self::CircularWindow => PayloadKind::CircularWindow,
            _ => PayloadKind::General,
        }
    }

    pub const fn name(self) -> Option<&'static str> {
        Some(match self.canonical() {
            Self::Unknown => "Unknown",
            Self::Ambient => "Ambient",
            Self::Directional => "Directional",
            Self::Point => "Point",
            Self::Spot => "Spot",
            Self::LampShade => "LampShade",
            Self::TubeLight => "TubeLight",
            Self::SquareWindow => "SquareWindow",
            Self::CircularWindow => "CircularWindow",
            Self::SquareAreaLight => "SquareAreaLight",
            Self::DiscAreaLight => "DiscAreaLight",
            Self::WorldLight => "WorldLight",
            Self::Other(_) => return None,
        })
    }

    /// Look up a type by name (case-insensitive) or numeric code
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if let Some(found) = Self::NAMED
            .iter()
            .find(|t| t.name().is_some_and(|n| n.eq_ignore_ascii_case(text)))
        {
            return Some(*found);
        }
        let code = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => text.parse().ok()?,
        };
        Some(Self::from_u32(code))
    }
}

impl PartialEq for LightSourceType {
    fn eq(&self, other: &Self) -> bool {
        self.to_u32() == other.to_u32()
    }
}

impl Eq for LightSourceType {}

impl Hash for LightSourceType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_u32().hash(state);
    }
}

impl From<u32> for LightSourceType {
    fn from(code: u32) -> Self {
        Self::from_u32(code)
    }
}

impl From<LightSourceType> for u32 {
    fn from(t: LightSourceType) -> Self {
        t.to_u32()
    }
}

impl fmt::Display for LightSourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:02X})", name, self.to_u32()),
            None => write!(f, "0x{:08X}", self.to_u32()),
        }
    }
}

/// One light source
#[derive(Debug, Clone, Default)]
pub struct LightSource {
    light_type: LightSourceType,
    transform: Vertex,
    color: Rgb,
    intensity: f32,
    payload: LightSourcePayload,
    handler: ChangeHandler,
}

impl PartialEq for LightSource {
    fn eq(&self, other: &Self) -> bool {
        self.light_type == other.light_type
            && self.transform == other.transform
            && self.color == other.color
            && same_f32(self.intensity, other.intensity)
            && self.payload == other.payload
    }
}

impl LightSource {
    /// Build a record; `payload` must use the layout `light_type` selects
    pub fn new(
        light_type: LightSourceType,
        transform: Vertex,
        color: Rgb,
        intensity: f32,
        mut payload: LightSourcePayload,
    ) -> Result<Self> {
        check_kind(light_type.payload_kind(), payload.kind())?;
        payload.set_handler(ChangeHandler::none());
        Ok(Self {
            light_type: light_type.canonical(),
            transform,
            color,
            intensity,
            payload,
            handler: ChangeHandler::none(),
        })
    }

    /// A record of the given type with an all-zero payload
    pub fn of_type(light_type: LightSourceType) -> Self {
        Self {
            light_type: light_type.canonical(),
            payload: LightSourcePayload::zeroed(light_type.payload_kind()),
            ..Self::default()
        }
    }

    pub fn read_from<R: Read>(reader: &mut R, handler: &ChangeHandler) -> Result<Self> {
        let light_type = LightSourceType::from_u32(reader.read_u32::<LittleEndian>()?);
        let transform = Vertex::read_from(reader)?;
        let color = Rgb::read_from(reader)?;
        let intensity = reader.read_f32::<LittleEndian>()?;
        let payload = LightSourcePayload::read_from(light_type.payload_kind(), reader, handler)?;
        Ok(Self {
            light_type,
            transform,
            color,
            intensity,
            payload,
            handler: handler.clone(),
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.light_type.to_u32())?;
        self.transform.write_to(writer)?;
        self.color.write_to(writer)?;
        writer.write_f32::<LittleEndian>(self.intensity)?;
        self.payload.write_to(writer)?;
        Ok(())
    }

    pub fn light_type(&self) -> LightSourceType {
        self.light_type
    }

    pub fn transform(&self) -> Vertex {
        self.transform
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn payload(&self) -> &LightSourcePayload {
        &self.payload
    }

    /// Mutable payload access for the per-field setters
    ///
    /// Assigning a whole payload goes through [`LightSource::set_payload`].
    pub fn payload_mut(&mut self) -> PayloadMut<'_> {
        PayloadMut(&mut self.payload)
    }

    /// Change the type, reinterpreting the payload bytes as the new layout
    pub fn set_light_type(&mut self, light_type: LightSourceType) -> Result<()> {
        let light_type = light_type.canonical();
        if self.light_type == light_type {
            return Ok(());
        }
        let payload = self
            .payload
            .reinterpret(light_type.payload_kind(), &self.handler)?;
        self.light_type = light_type;
        self.payload = payload;
        self.handler.notify();
        Ok(())
    }

    pub fn set_transform(&mut self, transform: Vertex) {
        update(&mut self.transform, transform, &self.handler);
    }

    pub fn set_color(&mut self, color: Rgb) {
        update(&mut self.color, color, &self.handler);
    }

    pub fn set_intensity(&mut self, intensity: f32) {
        update_f32(&mut self.intensity, intensity, &self.handler);
    }

    /// Replace the payload with one of the same layout
    ///
    /// Fails with [`LiteError::TypeMismatch`] if `payload` uses a different
    /// layout; change the type with [`LightSource::set_light_type`] instead.
    pub fn set_payload(&mut self, payload: LightSourcePayload) -> Result<()> {
        check_kind(self.payload.kind(), payload.kind())?;
        if self.payload == payload {
            return Ok(());
        }
        let raw = payload.to_bytes()?;
        self.payload = LightSourcePayload::read_from(
            self.light_type.payload_kind(),
            &mut raw.as_slice(),
            &self.handler,
        )?;
        self.handler.notify();
        Ok(())
    }

    pub fn general(&self) -> Option<&GeneralPayload> {
        self.payload.as_general()
    }

    pub fn spot(&self) -> Option<&SpotPayload> {
        self.payload.as_spot()
    }

    pub fn lamp_shade(&self) -> Option<&LampShadePayload> {
        self.payload.as_lamp_shade()
    }

    pub fn tube_light(&self) -> Option<&TubeLightPayload> {
        self.payload.as_tube_light()
    }

    pub fn square_window(&self) -> Option<&SquareWindowPayload> {
        self.payload.as_square_window()
    }

    pub fn circular_window(&self) -> Option<&CircularWindowPayload> {
        self.payload.as_circular_window()
    }
}

/// Borrow of a record's payload that allows field edits but not variant swaps
pub struct PayloadMut<'a>(&'a mut LightSourcePayload);

impl PayloadMut<'_> {
    pub fn kind(&self) -> PayloadKind {
        self.0.kind()
    }

    pub fn general(&mut self) -> Option<&mut GeneralPayload> {
        match &mut *self.0 {
            LightSourcePayload::General(p) => Some(p),
            _ => None,
        }
    }

    pub fn spot(&mut self) -> Option<&mut SpotPayload> {
        match &mut *self.0 {
            LightSourcePayload::Spot(p) => Some(p),
            _ => None,
        }
    }

    pub fn lamp_shade(&mut self) -> Option<&mut LampShadePayload> {
        match &mut *self.0 {
            LightSourcePayload::LampShade(p) => Some(p),
            _ => None,
        }
    }

    pub fn tube_light(&mut self) -> Option<&mut TubeLightPayload> {
        match &mut *self.0 {
            LightSourcePayload::TubeLight(p) => Some(p),
            _ => None,
        }
    }

    pub fn square_window(&mut self) -> Option<&mut SquareWindowPayload> {
        match &mut *self.0 {
            LightSourcePayload::SquareWindow(p) => Some(p),
            _ => None,
        }
    }

    pub fn circular_window(&mut self) -> Option<&mut CircularWindowPayload> {
        match &mut *self.0 {
            LightSourcePayload::CircularWindow(p) => Some(p),
            _ => None,
        }
    }
}

fn check_kind(expected: PayloadKind, actual: PayloadKind) -> Result<()> {
    if expected != actual {
        return Err(LiteError::TypeMismatch { expected, actual });
    }
    Ok(())
}

impl Element for LightSource {
    fn read_element<R: Read>(reader: &mut R, handler: &ChangeHandler) -> Result<Self> {
        Self::read_from(reader, handler)
    }

    fn write_element<W: Write>(&self, writer: &mut W) -> Result<()> {
        self.write_to(writer)
    }

    fn attach(&mut self, handler: &ChangeHandler) {
        self.handler = handler.clone();
        self.payload.set_handler(handler.clone());
    }
}

impl fmt::Display for LightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Light Type: {}", self.light_type)?;
        writeln!(f, "Transform: {}", self.transform)?;
        writeln!(f, "Color: {}", self.color)?;
        writeln!(f, "Intensity: {}", self.intensity)?;
        writeln!(f, "{} Light Source Data:", self.payload.kind())?;
        write!(f, "{}", self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::{counting_handler, hits};
    use crate::payload::PAYLOAD_FLOATS;

    fn ramp() -> [f32; PAYLOAD_FLOATS] {
        std::array::from_fn(|i| i as f32 * 0.5)
    }

    fn encode(light: &LightSource) -> Vec<u8> {
        let mut buffer = Vec::new();
        light.write_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_dispatch_table() {
        use LightSourceType as T;
        assert_eq!(T::Spot.payload_kind(), PayloadKind::Spot);
        assert_eq!(T::LampShade.payload_kind(), PayloadKind::LampShade);
        assert_eq!(T::TubeLight.payload_kind(), PayloadKind::TubeLight);
        assert_eq!(T::SquareWindow.payload_kind(), PayloadKind::SquareWindow);
        assert_eq!(T::CircularWindow.payload_kind(), PayloadKind::CircularWindow);
        for general in [
            T::Unknown,
            T::Ambient,
            T::Directional,
            T::Point,
            T::SquareAreaLight,
            T::DiscAreaLight,
            T::WorldLight,
            T::Other(0x42),
        ] {
            assert_eq!(general.payload_kind(), PayloadKind::General, "{general}");
        }
    }

    #[test]
    fn test_type_codes_roundtrip() {
        for t in LightSourceType::NAMED {
            assert_eq!(LightSourceType::from_u32(t.to_u32()), t);
        }
        assert_eq!(LightSourceType::from_u32(0x0B), LightSourceType::WorldLight);
        assert_eq!(LightSourceType::from_u32(0x1234), LightSourceType::Other(0x1234));
        assert_eq!(LightSourceType::Other(0x1234).to_u32(), 0x1234);
    }

    #[test]
    fn test_parse_type_names_and_codes() {
        assert_eq!(LightSourceType::parse("spot"), Some(LightSourceType::Spot));
        assert_eq!(
            LightSourceType::parse("CircularWindow"),
            Some(LightSourceType::CircularWindow)
        );
        assert_eq!(LightSourceType::parse("3"), Some(LightSourceType::Point));
        assert_eq!(LightSourceType::parse("0x0a"), Some(LightSourceType::DiscAreaLight));
        assert_eq!(LightSourceType::parse("0x20"), Some(LightSourceType::Other(0x20)));
        assert_eq!(LightSourceType::parse("lamp"), None);
    }

    #[test]
    fn test_record_is_128_bytes() {
        assert_eq!(LIGHT_SOURCE_SIZE, 128);
        for t in LightSourceType::NAMED {
            assert_eq!(encode(&LightSource::of_type(t)).len(), LIGHT_SOURCE_SIZE);
        }
    }

    #[test]
    fn test_record_layout() {
        let light = LightSource::new(
            LightSourceType::Spot,
            Vertex::new(1.0, 2.0, 3.0),
            Rgb::new(0.1, 0.2, 0.3),
            7.5,
            LightSourcePayload::from_floats(PayloadKind::Spot, &ramp()).unwrap(),
        )
        .unwrap();
        let bytes = encode(&light);

        assert_eq!(&bytes[0..4], &4u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &1.0f32.to_le_bytes());
        assert_eq!(&bytes[16..20], &0.1f32.to_le_bytes());
        assert_eq!(&bytes[28..32], &7.5f32.to_le_bytes());
        assert_eq!(&bytes[32..36], &0.0f32.to_le_bytes());
        assert_eq!(&bytes[124..128], &11.5f32.to_le_bytes());

        let decoded = LightSource::read_from(&mut bytes.as_slice(), &ChangeHandler::none()).unwrap();
        assert_eq!(decoded, light);
        assert!(decoded.spot().is_some());
    }

    #[test]
    fn test_decode_selects_layout_from_type() {
        let mut bytes = encode(&LightSource::of_type(LightSourceType::SquareWindow));
        let decoded = LightSource::read_from(&mut bytes.as_slice(), &ChangeHandler::none()).unwrap();
        assert_eq!(decoded.payload().kind(), PayloadKind::SquareWindow);

        // Unrecognised code falls back to the general layout
        bytes[0..4].copy_from_slice(&0x77u32.to_le_bytes());
        let decoded = LightSource::read_from(&mut bytes.as_slice(), &ChangeHandler::none()).unwrap();
        assert_eq!(decoded.light_type(), LightSourceType::Other(0x77));
        assert_eq!(decoded.payload().kind(), PayloadKind::General);
        assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn test_new_rejects_mismatched_payload() {
        let err = LightSource::new(
            LightSourceType::Spot,
            Vertex::ZERO,
            Rgb::BLACK,
            0.0,
            LightSourcePayload::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LiteError::TypeMismatch {
                expected: PayloadKind::Spot,
                actual: PayloadKind::General
            }
        ));
    }

    #[test]
    fn test_set_light_type_reinterprets_payload() {
        let (handler, count) = counting_handler();
        let mut light = LightSource::of_type(LightSourceType::Spot);
        light.attach(&handler);
        light
            .payload_mut()
            .spot()
            .unwrap()
            .set_unused(&ramp()[5..])
            .unwrap();
        assert_eq!(hits(&count), 1);

        let before = light.payload().to_bytes().unwrap();
        light.set_light_type(LightSourceType::LampShade).unwrap();
        assert_eq!(hits(&count), 2);

        assert_eq!(light.light_type(), LightSourceType::LampShade);
        assert_eq!(light.payload().kind(), PayloadKind::LampShade);
        assert_eq!(light.payload().to_bytes().unwrap(), before);
        // Float 5 was the first unused Spot value; it is now the bottom angle
        assert_eq!(light.lamp_shade().unwrap().bottom_angle(), ramp()[5]);
    }

    #[test]
    fn test_set_light_type_between_general_types() {
        let (handler, count) = counting_handler();
        let mut light = LightSource::of_type(LightSourceType::Point);
        light.attach(&handler);

        light.set_light_type(LightSourceType::Point).unwrap();
        assert_eq!(hits(&count), 0);

        light.set_light_type(LightSourceType::WorldLight).unwrap();
        assert_eq!(hits(&count), 1);
        assert_eq!(light.payload().kind(), PayloadKind::General);
    }

    #[test]
    fn test_payload_handler_follows_reinterpretation() {
        let (handler, count) = counting_handler();
        let mut light = LightSource::of_type(LightSourceType::Point);
        light.attach(&handler);
        light.set_light_type(LightSourceType::TubeLight).unwrap();
        assert_eq!(hits(&count), 1);

        light.payload_mut().tube_light().unwrap().set_tube_length(4.0);
        assert_eq!(hits(&count), 2);
    }

    #[test]
    fn test_set_payload_requires_matching_layout() {
        let mut light = LightSource::of_type(LightSourceType::CircularWindow);
        let err = light
            .set_payload(LightSourcePayload::zeroed(PayloadKind::Spot))
            .unwrap_err();
        assert!(matches!(err, LiteError::TypeMismatch { .. }));

        let replacement =
            LightSourcePayload::from_floats(PayloadKind::CircularWindow, &ramp()).unwrap();
        light.set_payload(replacement.clone()).unwrap();
        assert_eq!(light.payload(), &replacement);
    }

    #[test]
    fn test_setters_notify_only_on_change() {
        let (handler, count) = counting_handler();
        let mut light = LightSource::default();
        light.attach(&handler);

        light.set_intensity(0.0);
        light.set_color(Rgb::BLACK);
        light
            .set_payload(LightSourcePayload::zeroed(PayloadKind::General))
            .unwrap();
        assert_eq!(hits(&count), 0);

        light.set_intensity(1.0);
        light.set_transform(Vertex::new(0.0, 1.0, 0.0));
        assert_eq!(hits(&count), 2);
    }

    #[test]
    fn test_other_with_named_code_is_canonical() {
        let aliased = LightSourceType::Other(4);
        assert_eq!(aliased, LightSourceType::Spot);
        assert_eq!(aliased.canonical(), LightSourceType::Spot);
        assert_eq!(aliased.payload_kind(), PayloadKind::Spot);
        assert_eq!(aliased.to_string(), "Spot (0x04)");
        assert_eq!(LightSourceType::Other(0), LightSourceType::Unknown);
        assert_ne!(LightSourceType::Other(0x42), LightSourceType::Unknown);

        let light = LightSource::of_type(aliased);
        assert!(matches!(light.light_type(), LightSourceType::Spot));
        assert_eq!(light.payload().kind(), PayloadKind::Spot);

        let decoded = LightSource::read_from(&mut encode(&light).as_slice(), &ChangeHandler::none())
            .unwrap();
        assert_eq!(decoded, light);
    }

    #[test]
    fn test_set_light_type_to_alias_is_noop() {
        let (handler, count) = counting_handler();
        let mut light = LightSource::of_type(LightSourceType::TubeLight);
        light.attach(&handler);

        light.set_light_type(LightSourceType::Other(6)).unwrap();
        assert_eq!(hits(&count), 0);
        assert!(matches!(light.light_type(), LightSourceType::TubeLight));
    }

    #[test]
    fn test_nan_fields_compare_equal() {
        let mut light = LightSource::of_type(LightSourceType::Spot);
        light.set_intensity(f32::NAN);
        light.set_transform(Vertex::new(f32::NAN, 0.0, 0.0));
        light.payload_mut().spot().unwrap().set_blur_scale(f32::NAN);
        assert_eq!(light, light.clone());

        let decoded = LightSource::read_from(&mut encode(&light).as_slice(), &ChangeHandler::none())
            .unwrap();
        assert_eq!(decoded, light);
    }

    #[test]
    fn test_new_detaches_borrowed_payload() {
        let (handler, count) = counting_handler();
        let mut owner = LightSource::of_type(LightSourceType::Spot);
        owner.attach(&handler);

        let mut light = LightSource::new(
            LightSourceType::Spot,
            Vertex::ZERO,
            Rgb::BLACK,
            0.0,
            owner.payload().clone(),
        )
        .unwrap();
        light.payload_mut().spot().unwrap().set_falloff_angle(1.0);
        assert_eq!(hits(&count), 0);
    }

    #[test]
    fn test_truncated_record_fails() {
        let bytes = encode(&LightSource::default());
        let err = LightSource::read_from(&mut &bytes[..100], &ChangeHandler::none()).unwrap_err();
        assert!(matches!(err, LiteError::Io(_)));
    }

    #[test]
    fn test_display() {
        let text = LightSource::of_type(LightSourceType::Spot).to_string();
        assert!(text.starts_with("Light Type: Spot (0x04)\n"));
        assert!(text.contains("Spot Light Source Data:"));
        assert!(text.contains("Blur Scale: 0"));
    }
}
