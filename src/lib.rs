//! Hill Roller - a ball rolling over endless noise-generated hills
//!
//! Core modules:
//! - `sim`: Simulation (noise terrain, player physics, collisions, input state)
//! - `camera`: World/screen transform, smoothed follow and zoom, tile grid
//! - `renderer`: Drawing surface abstraction (canvas, recorder)
//! - `session`: Per-frame orchestration of the above
//! - `settings`: Data-driven tuning

pub mod camera;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use camera::{Camera, GridLines};
pub use session::Session;
pub use settings::{CameraSettings, PhysicsSettings, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// World-space spacing of the background grid and terrain samples
    pub const TILE_SPACING: f32 = 50.0;

    /// Terrain shape
    pub const TERRAIN_FREQUENCY: f32 = 0.002;
    pub const TERRAIN_AMPLITUDE: f32 = 300.0;
    /// Global slope added on top of the noise (positive = downhill to the right)
    pub const TERRAIN_DRIFT: f32 = 0.01;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 10.0;
    pub const PLAYER_START_POS: (f32, f32) = (0.0, -200.0);
    pub const PLAYER_START_VEL: (f32, f32) = (10.0, -5.0);
    /// Per-tick gravity (world units / tick²)
    pub const GRAVITY: f32 = 0.05;
    /// Gravity multiplier while boost is held
    pub const BOOST_MULTIPLIER: f32 = 6.0;
    /// Grounded players never roll slower than this
    pub const MIN_GROUND_SPEED: f32 = 1.0;
    /// Grounded when clearance < radius * this
    pub const GROUNDED_FACTOR: f32 = 2.1;
    /// Extra push-out when resting on upward-facing ground
    pub const CONTACT_BIAS: f32 = 0.1;

    /// Camera zoom limits (screen pixels per world unit)
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 4.0;
    /// Camera follow easing per tick
    pub const FOLLOW_SMOOTHING: f32 = 0.05;
    /// Camera leads the player by velocity.x * this
    pub const LOOK_AHEAD: f32 = 40.0;
    /// Zoom easing per tick
    pub const ZOOM_SMOOTHING: f32 = 0.03;
    /// Speed above which the camera starts zooming out
    pub const ZOOM_SPEED_THRESHOLD: f32 = 10.0;
    /// How quickly the camera zooms out past the threshold
    pub const ZOOM_FALLOFF: f32 = 0.015;
    /// Manual camera pan per tick
    pub const PAN_SPEED: f32 = 3.0;
    /// Manual zoom change per tick
    pub const ZOOM_STEP: f32 = 0.03;
}
