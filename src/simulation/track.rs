//! Track curvature model
//!
//! A track is a closed loop of straight and curved segments. Curvature is
//! looked up by world distance and wraps around forever.

use anyhow::{ensure, Result};

/// One stretch of road with constant curvature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSegment {
    pub length: f32,
    /// Signed bend strength in [-1, 1]; positive bends right
    pub curvature: f32,
}

impl TrackSegment {
    pub fn new(length: f32, curvature: f32) -> Self {
        Self { length, curvature }
    }
}

/// Closed loop of segments
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    segments: Vec<TrackSegment>,
    total_length: f32,
}

impl Track {
    /// Build a track, rejecting empty or malformed segment lists
    pub fn new(segments: Vec<TrackSegment>) -> Result<Self> {
        ensure!(!segments.is_empty(), "track needs at least one segment");

        for (index, segment) in segments.iter().enumerate() {
            ensure!(
                segment.length.is_finite() && segment.length > 0.0,
                "segment {} has invalid length {}",
                index,
                segment.length
            );
            ensure!(
                segment.curvature.is_finite() && (-1.0..=1.0).contains(&segment.curvature),
                "segment {} has curvature {} outside [-1, 1]",
                index,
                segment.curvature
            );
        }

        let total_length = segments.iter().map(|s| s.length).sum();
        Ok(Self {
            segments,
            total_length,
        })
    }

    /// The standard circuit: straight, right sweeper, straight, hard left,
    /// gentle right, straight
    pub fn default_circuit() -> Self {
        let segments = vec![
            TrackSegment::new(2000.0, 0.0),
            TrackSegment::new(2200.0, 0.7),
            TrackSegment::new(1500.0, 0.0),
            TrackSegment::new(2500.0, -0.85),
            TrackSegment::new(2000.0, 0.35),
            TrackSegment::new(1500.0, 0.0),
        ];
        let total_length = segments.iter().map(|s| s.length).sum();
        Self {
            segments,
            total_length,
        }
    }

    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }

    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    /// Curvature at a world distance; any real distance is accepted
    pub fn curvature_at(&self, distance: f32) -> f32 {
        let mut remaining = distance.rem_euclid(self.total_length);
        for segment in &self.segments {
            if remaining <= segment.length {
                return segment.curvature;
            }
            remaining -= segment.length;
        }
        // Rounding can leave a sliver past the last boundary
        self.segments.last().map_or(0.0, |s| s.curvature)
    }

    /// Index of the segment containing a world distance
    pub fn segment_index_at(&self, distance: f32) -> usize {
        let mut remaining = distance.rem_euclid(self.total_length);
        for (index, segment) in self.segments.iter().enumerate() {
            if remaining <= segment.length {
                return index;
            }
            remaining -= segment.length;
        }
        self.segments.len() - 1
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::default_circuit()
    }
}
