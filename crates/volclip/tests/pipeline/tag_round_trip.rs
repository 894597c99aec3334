use volclip::clip::SegmentTag;
use volclip::math::Point;

#[test]
fn random_bit_patterns_survive_the_round_trip() {
    let mut rng = oorandom::Rand32::new(9);
    let mut points = Vec::new();

    for _ in 0..64 {
        let mut coord = || {
            let bits = (u64::from(rng.rand_u32()) << 32) | u64::from(rng.rand_u32());
            f64::from_bits(bits)
        };
        points.push(Point::new(coord(), coord(), coord()));
    }

    let tag = SegmentTag::from_points(&points);
    let decoded = SegmentTag::decode(&tag.encode()).unwrap();

    assert_eq!(decoded.len(), points.len());

    for (stored, original) in decoded.wire_points().iter().zip(points.iter()) {
        for k in 0..3 {
            assert_eq!(stored[k].to_bits(), original[k].to_bits());
        }
    }
}

#[test]
fn truncated_tags_are_detected() {
    let bytes = SegmentTag::from_points(&[Point::new(1.0, 2.0, 3.0)]).encode();

    assert!(SegmentTag::decode(&bytes[..bytes.len() - 1]).is_err());
}
