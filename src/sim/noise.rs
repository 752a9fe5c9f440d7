//! Seeded 2D gradient noise with memoization
//!
//! Each integer lattice point owns one random unit gradient, generated the
//! first time any sample touches it and kept for the life of the field. A
//! sample blends the four surrounding corner contributions with a quintic
//! smoother-step, so the field is continuous across cells.
//!
//! Neither cache is ever evicted. That is fine for a play session, but a
//! player that travels far enough will grow both maps without bound.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Integer lattice coordinate (gradient cache key)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatticeKey(pub i32, pub i32);

impl LatticeKey {
    /// Lattice corner at or below `(x, y)`
    #[inline]
    pub fn floor_of(x: f32, y: f32) -> Self {
        Self(x.floor() as i32, y.floor() as i32)
    }

    /// Neighbouring lattice point; wraps at the edge of the `i32` range
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self(self.0.wrapping_add(dx), self.1.wrapping_add(dy))
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.0 as f32, self.1 as f32)
    }
}

/// Exact sample coordinate (value memo key)
///
/// Keyed by bit pattern, with `-0.0` folded onto `0.0` so the two zeros share
/// an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleKey(u32, u32);

impl SampleKey {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self((x + 0.0).to_bits(), (y + 0.0).to_bits())
    }
}

/// Cache occupancy, for watching memory growth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub gradients: usize,
    pub samples: usize,
}

/// Quintic smoother-step: `6t^5 - 15t^4 + 10t^3`
///
/// Zero first and second derivative at both ends.
#[inline]
pub fn smootherstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Interpolate from `a` to `b` along the smoother-step curve
#[inline]
pub fn lerp_smooth(t: f32, a: f32, b: f32) -> f32 {
    a + smootherstep(t) * (b - a)
}

/// Mix the field seed with a lattice coordinate into an RNG seed
fn lattice_hash(seed: u64, key: LatticeKey) -> u64 {
    let mut h = seed;
    h = h
        .wrapping_add(key.0 as u32 as u64)
        .wrapping_mul(6364136223846793005);
    h = h
        .wrapping_add(key.1 as u32 as u64)
        .wrapping_mul(6364136223846793005);
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51afd7ed558ccd);
    h ^= h >> 33;
    h
}

/// Seeded gradient noise field
#[derive(Debug, Clone)]
pub struct NoiseField {
    seed: u64,
    gradients: HashMap<LatticeKey, Vec2>,
    memo: HashMap<SampleKey, f32>,
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            gradients: HashMap::new(),
            memo: HashMap::new(),
        }
    }

    /// Seed this field was created with
    pub fn seed_value(&self) -> u64 {
        self.seed
    }

    /// Drop both caches. Gradients regenerate identically from the seed.
    pub fn seed(&mut self) {
        self.gradients.clear();
        self.memo.clear();
    }

    /// Switch to a different seed (produces a different terrain)
    pub fn reseed(&mut self, seed: u64) {
        log::debug!("Noise field reseeded: {} -> {}", self.seed, seed);
        self.seed = seed;
        self.seed();
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            gradients: self.gradients.len(),
            samples: self.memo.len(),
        }
    }

    /// Gradient at a lattice point, generating it on first request
    pub fn gradient_at(&mut self, key: LatticeKey) -> Vec2 {
        let seed = self.seed;
        *self.gradients.entry(key).or_insert_with(|| {
            let mut rng = Pcg32::seed_from_u64(lattice_hash(seed, key));
            let theta: f32 = rng.random_range(0.0..TAU);
            Vec2::new(theta.cos(), theta.sin())
        })
    }

    /// Dot product of a corner's gradient with the offset from that corner
    fn corner_dot(&mut self, p: Vec2, corner: LatticeKey) -> f32 {
        let offset = p - corner.as_vec2();
        self.gradient_at(corner).dot(offset)
    }

    /// Noise value at `(x, y)`, in `[-1, 1]`
    ///
    /// Repeated calls with the same coordinates return the memoized value.
    pub fn sample(&mut self, x: f32, y: f32) -> f32 {
        let key = SampleKey::new(x, y);
        if let Some(&v) = self.memo.get(&key) {
            return v;
        }

        let p = Vec2::new(x, y);
        let base = LatticeKey::floor_of(x, y);
        let frac = p - base.as_vec2();

        let tl = self.corner_dot(p, base);
        let tr = self.corner_dot(p, base.offset(1, 0));
        let bl = self.corner_dot(p, base.offset(0, 1));
        let br = self.corner_dot(p, base.offset(1, 1));

        let top = lerp_smooth(frac.x, tl, tr);
        let bottom = lerp_smooth(frac.x, bl, br);
        let v = lerp_smooth(frac.y, top, bottom);

        self.memo.insert(key, v);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smootherstep_endpoints() {
        assert_eq!(smootherstep(0.0), 0.0);
        assert_eq!(smootherstep(1.0), 1.0);
        assert!((smootherstep(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_sample_memoized() {
        let mut field = NoiseField::new(7);
        let a = field.sample(1.37, 0.0);
        let stats = field.cache_stats();
        let b = field.sample(1.37, 0.0);
        assert_eq!(a, b);
        // Second call is a pure cache hit
        assert_eq!(field.cache_stats(), stats);
    }

    #[test]
    fn test_sample_on_lattice_is_zero() {
        let mut field = NoiseField::new(99);
        assert_eq!(field.sample(0.0, 0.0), 0.0);
        assert_eq!(field.sample(3.0, -2.0), 0.0);
    }

    #[test]
    fn test_lattice_offset_at_i32_edge() {
        let key = LatticeKey::floor_of(1e12, -1e12);
        assert_eq!(key, LatticeKey(i32::MAX, i32::MIN));
        assert_eq!(key.offset(1, 1), LatticeKey(i32::MIN, i32::MIN + 1));

        // Far outside the lattice range sampling still completes
        let mut field = NoiseField::new(3);
        field.sample(1e12, 0.0);
        field.sample(0.0, 1e12);
        assert_eq!(field.cache_stats().samples, 2);
    }

    #[test]
    fn test_negative_zero_shares_entry() {
        let mut field = NoiseField::new(1);
        field.sample(0.0, 0.0);
        field.sample(-0.0, 0.0);
        assert_eq!(field.cache_stats().samples, 1);
    }

    #[test]
    fn test_gradients_unit_length() {
        let mut field = NoiseField::new(42);
        for ix in -5..5 {
            for iy in -2..2 {
                let g = field.gradient_at(LatticeKey(ix, iy));
                assert!((g.length() - 1.0).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_gradient_independent_of_request_order() {
        let mut a = NoiseField::new(5);
        let mut b = NoiseField::new(5);

        let va1 = a.sample(0.3, 0.0);
        let va2 = a.sample(7.8, 0.0);
        let vb2 = b.sample(7.8, 0.0);
        let vb1 = b.sample(0.3, 0.0);

        assert_eq!(va1, vb1);
        assert_eq!(va2, vb2);
        assert_eq!(a.gradient_at(LatticeKey(8, 1)), b.gradient_at(LatticeKey(8, 1)));
    }

    #[test]
    fn test_seed_clears_caches_and_reproduces() {
        let mut field = NoiseField::new(11);
        let before = field.sample(2.25, 0.5);
        assert!(field.cache_stats().gradients > 0);

        field.seed();
        assert_eq!(field.cache_stats(), CacheStats::default());
        assert_eq!(field.sample(2.25, 0.5), before);
    }

    #[test]
    fn test_reseed_changes_field() {
        let mut field = NoiseField::new(1);
        let a: Vec<f32> = (0..20).map(|i| field.sample(i as f32 * 0.37, 0.0)).collect();
        field.reseed(2);
        let b: Vec<f32> = (0..20).map(|i| field.sample(i as f32 * 0.37, 0.0)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_continuous_across_cell_boundary() {
        let mut field = NoiseField::new(3);
        let left = field.sample(0.9999, 0.0);
        let right = field.sample(1.0001, 0.0);
        assert!((left - right).abs() < 1e-3);
    }
}
