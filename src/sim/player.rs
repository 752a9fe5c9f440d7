//! The rolling player body
//!
//! Integrated once per host frame with no timestep: velocity is in world units
//! per tick and gravity in units per tick². "Grounded" and "airborne" are not
//! stored states, just a per-tick comparison of clearance against the body
//! size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{circle_segment_collision, resolve_contact};
use super::terrain::TerrainSampler;
use crate::camera::Camera;
use crate::consts::*;
use crate::renderer::{DrawingSurface, INK_COLOR};
use crate::settings::PhysicsSettings;

/// Physics state of the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub gravity: f32,
    pub boost_multiplier: f32,
    pub min_ground_speed: f32,
    /// Distance from the body down to the higher of the two nearby ground samples
    #[serde(skip)]
    pub ground_clearance: f32,
    #[serde(skip)]
    pub grounded: bool,
}

impl Default for PlayerBody {
    fn default() -> Self {
        Self::new(&PhysicsSettings::default())
    }
}

impl PlayerBody {
    pub fn new(physics: &PhysicsSettings) -> Self {
        Self {
            pos: Vec2::from(PLAYER_START_POS),
            vel: Vec2::from(PLAYER_START_VEL),
            radius: physics.radius,
            gravity: physics.gravity,
            boost_multiplier: physics.boost_multiplier,
            min_ground_speed: physics.min_ground_speed,
            ground_clearance: 0.0,
            grounded: false,
        }
    }

    /// Distance at which the body touches the ground
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.radius * 2.0
    }

    #[inline]
    pub fn is_airborne(&self) -> bool {
        !self.grounded
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Advance one tick
    ///
    /// `boost` is the fast-fall input: gravity is multiplied while it is held.
    pub fn update(&mut self, terrain: &mut TerrainSampler, tile_spacing: f32, boost: bool) {
        self.pos += self.vel;

        let gravity = if boost {
            self.gravity * self.boost_multiplier
        } else {
            self.gravity
        };
        self.vel.y += gravity;

        let (p1, p2) = terrain.segment_at(self.pos.x, tile_spacing);
        self.ground_clearance = p1.y.min(p2.y) - self.pos.y;
        self.grounded = self.ground_clearance < self.radius * GROUNDED_FACTOR;

        self.collide_platform(p1, p2);

        if self.grounded && self.vel.x < self.min_ground_speed {
            self.vel.x = self.min_ground_speed;
        }
    }

    /// Resolve overlap with the ground segment `p1..p2`
    ///
    /// Returns whether there was contact.
    pub fn collide_platform(&mut self, p1: Vec2, p2: Vec2) -> bool {
        let contact = circle_segment_collision(self.pos, self.contact_distance(), p1, p2);
        if contact.hit {
            log::trace!(
                "Ground contact at ({:.1}, {:.1}), depth {:.3}",
                contact.point.x,
                contact.point.y,
                contact.penetration
            );
        }
        resolve_contact(&mut self.pos, &mut self.vel, &contact);
        contact.hit
    }

    /// Outline the body; an inner ring marks an active boost
    pub fn draw(&self, camera: &Camera, surface: &mut impl DrawingSurface, boost: bool) {
        let center = camera.world_to_screen(self.pos);

        surface.set_stroke_color(INK_COLOR);
        surface.set_line_width(camera.world_length_to_screen(2.0));
        surface.stroke_circle(center, camera.world_length_to_screen(self.contact_distance()));

        if boost {
            surface.stroke_circle(center, camera.world_length_to_screen(self.radius));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::Recorder;

    fn body_at(pos: Vec2, vel: Vec2) -> PlayerBody {
        PlayerBody {
            pos,
            vel,
            ..PlayerBody::default()
        }
    }

    #[test]
    fn test_collide_platform_from_above() {
        let mut body = body_at(Vec2::new(0.0, -15.0), Vec2::new(0.0, 2.0));
        let hit = body.collide_platform(Vec2::new(-25.0, 0.0), Vec2::new(25.0, 0.0));

        assert!(hit);
        let dist = body.pos.y.abs();
        assert!(dist >= body.contact_distance());
        assert!((dist - body.contact_distance() - CONTACT_BIAS).abs() < 1e-4);
        // Not moving further into the ground
        assert!(body.vel.dot(Vec2::NEG_Y) >= 0.0);
    }

    #[test]
    fn test_collide_platform_pins_separating_body() {
        let mut body = body_at(Vec2::new(0.0, -15.0), Vec2::new(3.0, -2.0));
        assert!(body.collide_platform(Vec2::new(-25.0, 0.0), Vec2::new(25.0, 0.0)));
        assert_eq!(body.vel.x, 3.0);
        assert!(body.vel.y.abs() < 1e-6);
    }

    #[test]
    fn test_collide_platform_beyond_segment_end() {
        // Left of p1 and well clear of it: no response past the segment end
        let mut body = body_at(Vec2::new(-60.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(!body.collide_platform(Vec2::new(0.0, 0.0), Vec2::new(50.0, 0.0)));
        assert_eq!(body.pos, Vec2::new(-60.0, 0.0));
    }

    #[test]
    fn test_collide_platform_slope_keeps_tangential_motion() {
        // 45 degree slope, falling straight down onto it
        let p1 = Vec2::new(0.0, 0.0);
        let p2 = Vec2::new(50.0, 50.0);
        let mut body = body_at(Vec2::new(25.0, 10.0), Vec2::new(0.0, 3.0));
        assert!(body.collide_platform(p1, p2));

        // Velocity now runs along the slope
        let tangent = (p2 - p1).normalize();
        let normal = tangent.perp();
        assert!(body.vel.dot(normal).abs() < 1e-4 || body.vel.dot(-normal).abs() < 1e-4);
        assert!(body.vel.dot(tangent) > 0.0);
    }

    #[test]
    fn test_update_applies_gravity() {
        let mut terrain = TerrainSampler::with_seed(1);
        let mut body = body_at(Vec2::new(0.0, -5000.0), Vec2::ZERO);
        body.update(&mut terrain, TILE_SPACING, false);
        assert!((body.vel.y - GRAVITY).abs() < 1e-6);
        assert!(body.is_airborne());

        body.update(&mut terrain, TILE_SPACING, true);
        assert!((body.vel.y - GRAVITY * (1.0 + BOOST_MULTIPLIER)).abs() < 1e-5);
    }

    #[test]
    fn test_update_moves_by_velocity_before_gravity() {
        let mut terrain = TerrainSampler::with_seed(1);
        let mut body = body_at(Vec2::new(0.0, -5000.0), Vec2::new(2.0, 1.0));
        body.update(&mut terrain, TILE_SPACING, false);
        assert_eq!(body.pos, Vec2::new(2.0, -4999.0));
    }

    #[test]
    fn test_grounded_enforces_min_speed() {
        let mut terrain = TerrainSampler::with_seed(1);
        let ground = terrain.ground_height(0.0);
        let mut body = body_at(Vec2::new(0.0, ground - 5.0), Vec2::new(-3.0, 0.0));
        body.update(&mut terrain, TILE_SPACING, false);
        assert!(body.grounded);
        assert!(body.vel.x >= MIN_GROUND_SPEED);
    }

    #[test]
    fn test_draw_boost_ring() {
        let cam = Camera::new(Vec2::ZERO, Vec2::new(800.0, 600.0), TILE_SPACING);
        let body = body_at(Vec2::ZERO, Vec2::ZERO);

        let mut rec = Recorder::new();
        body.draw(&cam, &mut rec, false);
        assert_eq!(rec.circles(), vec![(Vec2::new(400.0, 300.0), 20.0)]);

        rec.reset();
        body.draw(&cam, &mut rec, true);
        assert_eq!(
            rec.circles(),
            vec![(Vec2::new(400.0, 300.0), 20.0), (Vec2::new(400.0, 300.0), 10.0)]
        );
    }
}
