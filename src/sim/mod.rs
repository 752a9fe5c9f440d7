//! Simulation module
//!
//! Everything that moves or decides lives here: terrain generation, player
//! physics, ground collision and input state. Nothing in this module draws
//! except `PlayerBody::draw`, which goes through the host surface trait.

pub mod collision;
pub mod input;
pub mod noise;
pub mod player;
pub mod terrain;
pub mod vector;

pub use collision::{CollisionResult, circle_segment_collision, closest_point_on_segment, resolve_contact};
pub use input::{Action, KeyState};
pub use noise::{CacheStats, LatticeKey, NoiseField, lerp_smooth, smootherstep};
pub use player::PlayerBody;
pub use terrain::{TerrainSampler, tile_bracket};
pub use vector::{VectorError, normalized};
