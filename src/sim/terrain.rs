//! Ground height queries
//!
//! Terrain is a pure function of world x: a scaled noise term plus a gentle
//! global slope. Heights are y-down like the rest of the world, so a larger
//! value is lower on screen.

use glam::Vec2;

use super::noise::NoiseField;
use crate::consts::{TERRAIN_AMPLITUDE, TERRAIN_DRIFT, TERRAIN_FREQUENCY};

/// Tile-aligned x-coordinates bracketing `x`: `(x1, x1 + spacing)`
#[inline]
pub fn tile_bracket(x: f32, spacing: f32) -> (f32, f32) {
    let x1 = x - x.rem_euclid(spacing);
    (x1, x1 + spacing)
}

/// Terrain height sampler backed by a noise field
#[derive(Debug, Clone)]
pub struct TerrainSampler {
    noise: NoiseField,
}

impl TerrainSampler {
    pub fn new(noise: NoiseField) -> Self {
        Self { noise }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(NoiseField::new(seed))
    }

    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    pub fn noise_mut(&mut self) -> &mut NoiseField {
        &mut self.noise
    }

    /// Ground height at world x
    pub fn ground_height(&mut self, x: f32) -> f32 {
        self.noise.sample(x * TERRAIN_FREQUENCY, 0.0) * TERRAIN_AMPLITUDE + x * TERRAIN_DRIFT
    }

    /// Ground point at world x
    #[inline]
    pub fn ground_point(&mut self, x: f32) -> Vec2 {
        Vec2::new(x, self.ground_height(x))
    }

    /// The ground segment between the two tile boundaries around `x`
    pub fn segment_at(&mut self, x: f32, spacing: f32) -> (Vec2, Vec2) {
        let (x1, x2) = tile_bracket(x, spacing);
        (self.ground_point(x1), self.ground_point(x2))
    }

    /// Ground outline covering `[left, right]`
    ///
    /// Begins with the exact point at `left`, then every tile boundary from
    /// one tile below the boundary at or before `left` (the lower end of
    /// `tile_bracket(left)`, minus one spacing) through one tile past `right`.
    /// Sampling on tile boundaries keeps the memo hit rate high from frame to
    /// frame. A non-positive or non-finite `spacing` yields only the first
    /// point.
    pub fn polyline(&mut self, left: f32, right: f32, spacing: f32) -> Vec<Vec2> {
        let mut points = vec![self.ground_point(left)];
        if !(spacing.is_finite() && spacing > 0.0) {
            return points;
        }

        let (first, _) = tile_bracket(left, spacing);
        let mut i = 0;
        loop {
            let x = first + (i as f32 - 1.0) * spacing;
            if x > right + spacing {
                break;
            }
            points.push(self.ground_point(x));
            i += 1;
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_bracket_positive() {
        assert_eq!(tile_bracket(120.0, 50.0), (100.0, 150.0));
        assert_eq!(tile_bracket(100.0, 50.0), (100.0, 150.0));
    }

    #[test]
    fn test_tile_bracket_negative() {
        // Euclidean remainder keeps x1 at or below x
        assert_eq!(tile_bracket(-10.0, 50.0), (-50.0, 0.0));
        assert_eq!(tile_bracket(-50.0, 50.0), (-50.0, 0.0));
    }

    #[test]
    fn test_ground_height_formula() {
        let mut terrain = TerrainSampler::with_seed(4);
        let x = 1234.0;
        let expected = terrain.noise_mut().sample(x * 0.002, 0.0) * 300.0 + x * 0.01;
        assert_eq!(terrain.ground_height(x), expected);
    }

    #[test]
    fn test_ground_height_at_origin() {
        let mut terrain = TerrainSampler::with_seed(4);
        assert_eq!(terrain.ground_height(0.0), 0.0);
    }

    #[test]
    fn test_ground_height_deterministic_across_samplers() {
        let mut a = TerrainSampler::with_seed(21);
        let mut b = TerrainSampler::with_seed(21);
        for x in [-700.0, -3.5, 0.0, 49.0, 812.25, 10_000.0] {
            assert_eq!(a.ground_height(x), b.ground_height(x));
        }
    }

    #[test]
    fn test_segment_at_brackets_x() {
        let mut terrain = TerrainSampler::with_seed(8);
        let (p1, p2) = terrain.segment_at(73.0, 50.0);
        assert_eq!(p1.x, 50.0);
        assert_eq!(p2.x, 100.0);
        assert_eq!(p1.y, terrain.ground_height(50.0));
    }

    #[test]
    fn test_polyline_covers_range() {
        let mut terrain = TerrainSampler::with_seed(8);
        let points = terrain.polyline(-130.0, 400.0, 50.0);

        assert_eq!(points[0].x, -130.0);
        // Bracket of -130 is [-150, -100); one more tile below that
        assert_eq!(points[1].x, -200.0);
        assert!(points.last().unwrap().x >= 400.0);
        // Tile points are evenly spaced
        for pair in points[1..].windows(2) {
            assert_eq!(pair[1].x - pair[0].x, 50.0);
        }

        let points = terrain.polyline(130.0, 400.0, 50.0);
        assert_eq!(points[1].x, 50.0);
    }

    #[test]
    fn test_polyline_degenerate_spacing_terminates() {
        let mut terrain = TerrainSampler::with_seed(8);
        assert_eq!(terrain.polyline(-400.0, 400.0, 0.0).len(), 1);
        assert_eq!(terrain.polyline(-400.0, 400.0, -50.0).len(), 1);
        assert_eq!(terrain.polyline(-400.0, 400.0, f32::NAN).len(), 1);
    }
}
