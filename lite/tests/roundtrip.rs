//! Round trips through the public API

use rcol_lite::{
    BoundedList, ChangeHandler, LightSource, LightSourcePayload, LightSourceType, LightingChunk,
    LiteError, Occluder, OccluderType, PayloadKind, Rgb, SpotPayload, Vertex,
};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn header(tag: &[u8; 4], lights: u8, occluders: u8) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(tag);
    bytes.extend_from_slice(&4u32.to_le_bytes());
    bytes.extend_from_slice(&0x84u32.to_le_bytes());
    bytes.push(lights);
    bytes.push(occluders);
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes
}

fn single_point_light() -> Vec<u8> {
    let mut bytes = header(b"LITE", 1, 0);
    bytes.extend_from_slice(&3u32.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 124]);
    bytes
}

fn sample_chunk() -> LightingChunk {
    let mut chunk = LightingChunk::new();

    let spot = SpotPayload::new(Vertex::new(0.0, -1.0, 0.0), 0.75, 0.1, &[0.0; 19]).unwrap();
    let light = LightSource::new(
        LightSourceType::Spot,
        Vertex::new(10.0, 2.5, -4.0),
        Rgb::new(1.0, 0.9, 0.8),
        3.5,
        LightSourcePayload::Spot(spot),
    )
    .unwrap();
    chunk.lights_mut().push(light).unwrap();

    let mut world = LightSource::of_type(LightSourceType::WorldLight);
    world.set_intensity(0.2);
    chunk.lights_mut().push(world).unwrap();

    chunk
        .occluders_mut()
        .push(Occluder::new(
            OccluderType::Disc,
            Vertex::new(0.0, 1.0, 0.0),
            Vertex::new(0.0, 0.0, 1.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
            0.5,
        ))
        .unwrap();
    chunk
}

// ============================================================================
// Round trips
// ============================================================================

#[test]
fn test_single_point_light_is_144_bytes() {
    let bytes = single_point_light();
    assert_eq!(bytes.len(), 144);

    let chunk = rcol_lite::parse_with(&bytes, true).unwrap();
    assert_eq!(chunk.lights().len(), 1);
    let light = &chunk.lights()[0];
    assert_eq!(light.intensity(), 0.0);
    assert_eq!(light.payload().kind(), PayloadKind::General);
    assert_eq!(light.payload().to_floats(), [0.0; 24]);

    assert_eq!(rcol_lite::serialize(&chunk).unwrap(), bytes);
}

#[test]
fn test_built_chunk_roundtrip() {
    let chunk = sample_chunk();
    let bytes = rcol_lite::serialize(&chunk).unwrap();
    assert_eq!(bytes.len(), 16 + 2 * 128 + 56);
    assert_eq!(bytes[12], 2);
    assert_eq!(bytes[13], 1);

    let decoded = rcol_lite::parse_with(&bytes, true).unwrap();
    assert_eq!(decoded, chunk);
    assert_eq!(rcol_lite::serialize(&decoded).unwrap(), bytes);
}

#[test]
fn test_unknown_discriminants_are_preserved() {
    let mut bytes = header(b"LITE", 1, 1);
    bytes.extend_from_slice(&0x42u32.to_le_bytes());
    bytes.extend((0..124u8).map(|i| i.wrapping_mul(7)));
    bytes.extend_from_slice(&9u32.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 52]);

    let chunk = rcol_lite::parse_with(&bytes, true).unwrap();
    assert_eq!(chunk.lights()[0].light_type(), LightSourceType::Other(0x42));
    assert_eq!(chunk.lights()[0].payload().kind(), PayloadKind::General);
    assert_eq!(chunk.occluders()[0].occluder_type(), OccluderType::Other(9));
    assert_eq!(rcol_lite::serialize(&chunk).unwrap(), bytes);
}

#[test]
fn test_aliased_type_codes_roundtrip() {
    let mut chunk = LightingChunk::new();
    chunk
        .lights_mut()
        .push(LightSource::of_type(LightSourceType::Other(4)))
        .unwrap();
    chunk
        .lights_mut()
        .push(LightSource::of_type(LightSourceType::Other(0)))
        .unwrap();
    let mut occluder = Occluder::default();
    occluder.set_occluder_type(OccluderType::Other(1));
    chunk.occluders_mut().push(occluder).unwrap();

    assert_eq!(chunk.lights()[0].payload().kind(), PayloadKind::Spot);

    let bytes = rcol_lite::serialize(&chunk).unwrap();
    let decoded = rcol_lite::parse_with(&bytes, true).unwrap();
    assert_eq!(decoded, chunk);
    assert_eq!(decoded.lights()[0].light_type(), LightSourceType::Spot);
    assert_eq!(decoded.occluders()[0].occluder_type(), OccluderType::Rectangle);
    assert_eq!(rcol_lite::serialize(&decoded).unwrap(), bytes);
}

#[test]
fn test_nan_payload_roundtrip() {
    let mut data = [0.0f32; 24];
    data[23] = f32::NAN;

    let mut chunk = LightingChunk::new();
    let mut light = LightSource::of_type(LightSourceType::Point);
    light
        .payload_mut()
        .general()
        .unwrap()
        .set_data(&data)
        .unwrap();
    chunk.lights_mut().push(light).unwrap();

    let bytes = rcol_lite::serialize(&chunk).unwrap();
    let decoded = rcol_lite::parse_with(&bytes, true).unwrap();
    assert_eq!(decoded, chunk);
    assert_eq!(decoded, decoded.clone());
    assert_eq!(rcol_lite::serialize(&decoded).unwrap(), bytes);

    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let mut edited = decoded.copy_with_handler(ChangeHandler::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    edited
        .lights_mut()
        .get_mut(0)
        .unwrap()
        .payload_mut()
        .general()
        .unwrap()
        .set_data(&data)
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_every_type_survives_retyping_roundtrip() {
    let data: Vec<f32> = (0..24).map(|i| i as f32 + 0.25).collect();
    let mut light = LightSource::of_type(LightSourceType::Point);
    light
        .payload_mut()
        .general()
        .unwrap()
        .set_data(&data)
        .unwrap();

    for light_type in LightSourceType::NAMED {
        light.set_light_type(light_type).unwrap();
        assert_eq!(light.payload().kind(), light_type.payload_kind());
        assert_eq!(light.payload().to_floats().as_slice(), data.as_slice());
    }
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn test_count_bytes_track_mutations() {
    let mut chunk = sample_chunk();
    chunk.occluders_mut().clear();
    chunk.lights_mut().remove(1).unwrap();
    chunk
        .lights_mut()
        .insert(0, LightSource::of_type(LightSourceType::Ambient))
        .unwrap();
    chunk
        .lights_mut()
        .push(LightSource::of_type(LightSourceType::DiscAreaLight))
        .unwrap();

    let bytes = rcol_lite::serialize(&chunk).unwrap();
    assert_eq!(bytes[12], 3);
    assert_eq!(bytes[13], 0);
    assert_eq!(bytes.len(), 16 + 3 * 128);
}

#[test]
fn test_list_capacity() {
    let mut chunk = LightingChunk::new();
    for _ in 0..255 {
        chunk
            .lights_mut()
            .push(LightSource::of_type(LightSourceType::Point))
            .unwrap();
    }
    let err = chunk
        .lights_mut()
        .push(LightSource::of_type(LightSourceType::Point))
        .unwrap_err();
    assert!(matches!(err, LiteError::Capacity { capacity: 255 }));

    let bytes = rcol_lite::serialize(&chunk).unwrap();
    assert_eq!(bytes[12], 255);
}

#[test]
fn test_change_handler_sees_edits() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let handler = ChangeHandler::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let bytes = single_point_light();
    let mut chunk = rcol_lite::parse_with(&bytes, true).unwrap();
    chunk.set_change_handler(handler);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    let light = chunk.lights_mut().get_mut(0).unwrap();
    light.set_intensity(0.0);
    assert_eq!(count.load(Ordering::SeqCst), 0);

    light.set_intensity(1.0);
    light.set_light_type(LightSourceType::Spot).unwrap();
    light
        .payload_mut()
        .spot()
        .unwrap()
        .set_blur_scale(2.0);
    chunk
        .occluders_mut()
        .push(Occluder::default())
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 4);
}

#[test]
fn test_set_payload_requires_matching_kind() {
    let mut light = LightSource::of_type(LightSourceType::TubeLight);
    let err = light
        .set_payload(LightSourcePayload::zeroed(PayloadKind::Spot))
        .unwrap_err();
    assert!(matches!(
        err,
        LiteError::TypeMismatch {
            expected: PayloadKind::TubeLight,
            actual: PayloadKind::Spot,
        }
    ));

    light
        .set_payload(LightSourcePayload::zeroed(PayloadKind::TubeLight))
        .unwrap();
}

#[test]
fn test_from_elements_list() {
    let occluders = BoundedList::from_elements(
        (0..3).map(|i| {
            let mut occluder = Occluder::default();
            occluder.set_pair_offset(i as f32);
            occluder
        }),
        ChangeHandler::none(),
    )
    .unwrap();

    let mut chunk = LightingChunk::new();
    chunk.set_occluders(occluders);
    let decoded = rcol_lite::parse_with(&rcol_lite::serialize(&chunk).unwrap(), true).unwrap();
    let offsets: Vec<f32> = decoded.occluders().iter().map(Occluder::pair_offset).collect();
    assert_eq!(offsets, [0.0, 1.0, 2.0]);
}
