//! Track curvature lookup and validation

use horizon_racer::simulation::{Track, TrackSegment};

#[test]
fn test_default_circuit_length() {
    let track = Track::default_circuit();
    assert_eq!(track.segments().len(), 6);
    assert_eq!(track.total_length(), 11700.0);
}

#[test]
fn test_curvature_lookup_by_segment() {
    let track = Track::default_circuit();

    assert_eq!(track.curvature_at(0.0), 0.0);
    assert_eq!(track.curvature_at(1000.0), 0.0);
    assert_eq!(track.curvature_at(2100.0), 0.7);
    assert_eq!(track.curvature_at(4300.0), 0.0);
    assert_eq!(track.curvature_at(6000.0), -0.85);
    assert_eq!(track.curvature_at(9000.0), 0.35);
    assert_eq!(track.curvature_at(11000.0), 0.0);
}

#[test]
fn test_segment_end_is_inclusive() {
    let track = Track::default_circuit();
    // 2000 is the last point of the opening straight
    assert_eq!(track.curvature_at(2000.0), 0.0);
    assert_eq!(track.segment_index_at(2000.0), 0);
    assert_eq!(track.segment_index_at(2000.5), 1);
}

#[test]
fn test_curvature_is_periodic() {
    let track = Track::default_circuit();
    let total = track.total_length();

    for distance in [0.5, 100.0, 1999.0, 2500.0, 5000.0, 7000.0, 9999.0, 11000.0, 12345.0] {
        assert_eq!(
            track.curvature_at(distance),
            track.curvature_at(distance + total),
            "curvature differs one lap later at {}",
            distance
        );
        assert_eq!(
            track.curvature_at(distance),
            track.curvature_at(distance + 2.0 * total),
            "curvature differs two laps later at {}",
            distance
        );
    }
}

#[test]
fn test_negative_distance_wraps() {
    let track = Track::default_circuit();
    // -100 wraps to 11600, inside the closing straight
    assert_eq!(track.curvature_at(-100.0), 0.0);
    // -2000 wraps to 9700, inside the gentle right
    assert_eq!(track.curvature_at(-2000.0), 0.35);
}

#[test]
fn test_single_segment_track() {
    let track = Track::new(vec![TrackSegment::new(500.0, -0.4)]).unwrap();
    assert_eq!(track.total_length(), 500.0);
    for distance in [0.0, 250.0, 499.0, 500.0, 750.0, 100000.0] {
        assert_eq!(track.curvature_at(distance), -0.4);
    }
}

#[test]
fn test_malformed_tracks_are_rejected() {
    assert!(Track::new(Vec::new()).is_err());
    assert!(Track::new(vec![TrackSegment::new(0.0, 0.0)]).is_err());
    assert!(Track::new(vec![TrackSegment::new(-10.0, 0.0)]).is_err());
    assert!(Track::new(vec![TrackSegment::new(f32::NAN, 0.0)]).is_err());
    assert!(Track::new(vec![TrackSegment::new(100.0, 1.5)]).is_err());
    assert!(Track::new(vec![
        TrackSegment::new(100.0, 0.2),
        TrackSegment::new(100.0, -1.01),
    ])
    .is_err());
}
