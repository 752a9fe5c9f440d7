//! Per-frame orchestration
//!
//! A [`Session`] owns everything that lives for one play session and advances
//! it one host frame at a time. There is no fixed timestep: physics constants
//! assume one call to [`Session::frame`] per display refresh, so the game runs
//! faster on faster displays.

use glam::Vec2;

use crate::camera::Camera;
use crate::renderer::{DrawingSurface, INK_COLOR};
use crate::settings::{CameraSettings, Settings};
use crate::sim::{Action, KeyState, PlayerBody, TerrainSampler};

/// Frames between FPS log lines
const FPS_LOG_INTERVAL: u64 = 60;

/// Speed-dependent zoom with exponential easing
#[derive(Debug, Clone)]
pub struct ZoomController {
    /// Current smoothed zoom
    pub zoom: f32,
    /// Manual offset from the zoom keys
    pub bias: f32,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            bias: 0.0,
        }
    }
}

impl ZoomController {
    /// Zoom the camera wants at a given player speed
    ///
    /// 1.0 up to the threshold, then shrinking with the square root of the
    /// excess speed.
    pub fn target_for_speed(speed: f32, tuning: &CameraSettings) -> f32 {
        if speed < tuning.zoom_speed_threshold {
            1.0
        } else {
            1.0 - ((speed - tuning.zoom_speed_threshold) * tuning.zoom_falloff).sqrt()
        }
    }

    /// Nudge the manual bias, keeping the combined target reachable
    pub fn adjust_bias(&mut self, delta: f32) {
        use crate::consts::{MAX_ZOOM, MIN_ZOOM};
        self.bias = (self.bias + delta).clamp(MIN_ZOOM - 1.0, MAX_ZOOM - 1.0);
    }

    /// Ease toward the target for this speed and return the new zoom
    pub fn step(&mut self, speed: f32, tuning: &CameraSettings) -> f32 {
        let target = Self::target_for_speed(speed, tuning) + self.bias;
        self.zoom += (target - self.zoom) * tuning.zoom_smoothing;
        self.zoom
    }
}

/// Frame counter and rolling FPS estimate
#[derive(Debug, Clone)]
pub struct FrameStats {
    pub frame_count: u64,
    /// Host timestamps (ms) of the last 60 frames
    frame_times: [f64; 60],
    frame_index: usize,
    pub fps: u32,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self {
            frame_count: 0,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }
}

impl FrameStats {
    /// Record a host timestamp in milliseconds
    pub fn record_frame_time(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the one we'll overwrite next
        let oldest = self.frame_times[self.frame_index];
        if oldest > 0.0 {
            let elapsed = time_ms - oldest;
            if elapsed > 0.0 {
                let intervals = (self.frame_times.len() - 1) as f64;
                self.fps = (intervals * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

/// One play session: camera, player, terrain and zoom state
#[derive(Debug, Clone)]
pub struct Session {
    pub camera: Camera,
    pub player: PlayerBody,
    pub terrain: TerrainSampler,
    pub zoom: ZoomController,
    pub stats: FrameStats,
    settings: Settings,
}

impl Session {
    pub fn new(settings: Settings, seed: u64, viewport: Vec2) -> Self {
        log::info!("Session started with seed: {}", seed);
        Self {
            camera: Camera::new(Vec2::ZERO, viewport, settings.physics.tile_spacing),
            player: PlayerBody::new(&settings.physics),
            terrain: TerrainSampler::with_seed(seed),
            zoom: ZoomController::default(),
            stats: FrameStats::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Flip periodic FPS logging; returns the new state
    pub fn toggle_show_fps(&mut self) -> bool {
        self.settings.show_fps = !self.settings.show_fps;
        self.settings.show_fps
    }

    /// Start over on a new terrain
    pub fn restart(&mut self, seed: u64) {
        let viewport = self.camera.viewport();
        *self = Self::new(self.settings.clone(), seed, viewport);
    }

    /// Apply held keys: pan the camera, adjust manual zoom
    fn apply_input(&mut self, keys: &KeyState) {
        let tuning = &self.settings.camera;
        let pan = keys.pan_direction();
        if pan != Vec2::ZERO {
            self.camera.pan(pan * tuning.pan_speed);
        }
        let zoom_dir = keys.zoom_direction();
        if zoom_dir != 0.0 {
            self.zoom.adjust_bias(zoom_dir * tuning.zoom_step);
        }
    }

    /// Run one frame: input, camera, grid, terrain, player
    ///
    /// `viewport` is re-read every frame so host resizes take effect
    /// immediately.
    pub fn frame(&mut self, keys: &KeyState, viewport: Vec2, surface: &mut impl DrawingSurface) {
        self.camera.set_viewport(viewport);
        self.apply_input(keys);

        surface.clear(self.camera.viewport());

        let tuning = &self.settings.camera;
        self.camera.follow_target(
            self.player.pos.x + self.player.vel.x * tuning.look_ahead,
            self.player.pos.y,
            tuning.follow_smoothing,
        );

        let zoom = self.zoom.step(self.player.speed(), tuning);
        self.camera.set_zoom(zoom);

        self.camera.render_tile_grid(surface);
        self.render_terrain(surface);

        let boost = keys.is_down(Action::Boost);
        self.player
            .update(&mut self.terrain, self.settings.physics.tile_spacing, boost);
        self.player.draw(&self.camera, surface, boost);

        self.stats.frame_count += 1;
        if self.stats.frame_count % FPS_LOG_INTERVAL == 0 {
            let cache = self.terrain.noise().cache_stats();
            if self.settings.show_fps {
                log::info!("FPS: {}", self.stats.fps);
            }
            log::debug!(
                "Frame {}: player ({:.0}, {:.0}) speed {:.2}, zoom {:.2}, noise cache {} gradients / {} samples",
                self.stats.frame_count,
                self.player.pos.x,
                self.player.pos.y,
                self.player.speed(),
                self.camera.zoom(),
                cache.gradients,
                cache.samples
            );
        }
    }

    /// Stroke the visible ground as one polyline path
    fn render_terrain(&mut self, surface: &mut impl DrawingSurface) {
        let spacing = self.settings.physics.tile_spacing;
        let (left, right) = self.camera.visible_range();
        let points = self.terrain.polyline(left, right, spacing);

        surface.begin_path();
        let mut last = self.camera.world_to_screen(points[0]);
        for p in &points[1..] {
            let screen = self.camera.world_to_screen(*p);
            surface.move_to(last);
            surface.line_to(screen);
            last = screen;
        }
        surface.set_line_width(self.camera.world_length_to_screen(2.0));
        surface.set_stroke_color(INK_COLOR);
        surface.stroke();
    }
}
