//! 2D follow camera
//!
//! The camera maps a world-space window (`position` at its center, `size` wide
//! and tall) onto the pixel viewport. Zoom is screen pixels per world unit and
//! is always derived from `size`, never stored separately.

use glam::Vec2;

use crate::consts::{MAX_ZOOM, MIN_ZOOM};
use crate::renderer::{DrawingSurface, GRID_COLOR};

/// Screen-space positions of background grid lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridLines {
    /// x of each vertical line (pixels)
    pub xs: Vec<f32>,
    /// y of each horizontal line (pixels)
    pub ys: Vec<f32>,
}

/// Viewport transform with smoothed follow and clamped zoom
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space center
    pub position: Vec2,
    /// World-space extents
    size: Vec2,
    /// Viewport in pixels
    viewport: Vec2,
    /// World-space grid spacing
    tile_spacing: f32,
}

impl Camera {
    /// Camera at zoom 1 (one pixel per world unit)
    pub fn new(position: Vec2, viewport: Vec2, tile_spacing: f32) -> Self {
        let viewport = viewport.max(Vec2::ONE);
        Self {
            position,
            size: viewport,
            viewport,
            tile_spacing,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn tile_spacing(&self) -> f32 {
        self.tile_spacing
    }

    /// Update the pixel viewport, keeping the current zoom
    ///
    /// Degenerate (zero or negative) viewports are clamped to one pixel so
    /// `size` stays positive.
    pub fn set_viewport(&mut self, viewport: Vec2) {
        let viewport = viewport.max(Vec2::ONE);
        if viewport == self.viewport {
            return;
        }
        let zoom = self.zoom();
        self.viewport = viewport;
        self.set_zoom(zoom);
    }

    /// Effective zoom: screen pixels per world unit
    #[inline]
    pub fn zoom(&self) -> f32 {
        self.viewport.x / self.size.x
    }

    /// Set zoom, clamped to `[MIN_ZOOM, MAX_ZOOM]`
    pub fn set_zoom(&mut self, factor: f32) {
        // `clamp` passes NaN through
        let factor = if factor.is_nan() {
            MIN_ZOOM
        } else {
            factor.clamp(MIN_ZOOM, MAX_ZOOM)
        };
        self.size = self.viewport / factor;
    }

    pub fn add_zoom(&mut self, delta: f32) {
        self.set_zoom(self.zoom() + delta);
    }

    /// Ease toward a target by `smoothing` of the remaining distance
    pub fn follow_target(&mut self, target_x: f32, target_y: f32, smoothing: f32) {
        self.position.x += (target_x - self.position.x) * smoothing;
        self.position.y += (target_y - self.position.y) * smoothing;
    }

    /// Move the camera directly
    pub fn pan(&mut self, delta: Vec2) {
        self.position += delta;
    }

    #[inline]
    pub fn world_to_screen(&self, p: Vec2) -> Vec2 {
        (p - self.position) / self.size * self.viewport + self.viewport * 0.5
    }

    #[inline]
    pub fn screen_to_world(&self, s: Vec2) -> Vec2 {
        (s - self.viewport * 0.5) / self.viewport * self.size + self.position
    }

    /// Scale a world length to pixels (line widths, radii)
    #[inline]
    pub fn world_length_to_screen(&self, n: f32) -> f32 {
        n / self.size.x * self.viewport.x
    }

    /// World-space left/right edges of the view
    pub fn visible_range(&self) -> (f32, f32) {
        let half = self.size.x / 2.0;
        (self.position.x - half, self.position.x + half)
    }

    /// Grid lines on world multiples of `tile_spacing`
    pub fn grid_lines(&self) -> GridLines {
        let top_left = self.position - self.size / 2.0;
        let xs = grid_axis(top_left.x, self.size.x, self.viewport.x, self.tile_spacing);
        let ys = grid_axis(top_left.y, self.size.y, self.viewport.y, self.tile_spacing);
        GridLines { xs, ys }
    }

    /// Stroke the background grid as one path
    pub fn render_tile_grid(&self, surface: &mut impl DrawingSurface) {
        let lines = self.grid_lines();

        surface.begin_path();
        surface.set_line_width(self.world_length_to_screen(1.0));
        for x in &lines.xs {
            surface.move_to(Vec2::new(*x, 0.0));
            surface.line_to(Vec2::new(*x, self.viewport.y));
        }
        for y in &lines.ys {
            surface.move_to(Vec2::new(0.0, *y));
            surface.line_to(Vec2::new(self.viewport.x, *y));
        }
        surface.set_stroke_color(GRID_COLOR);
        surface.stroke();
    }
}

/// Pixel positions of grid lines along one axis
///
/// `start` is the world coordinate at the screen edge. The first line sits at
/// the non-negative offset `(-start) mod spacing` into the view. No lines for a
/// non-positive or non-finite spacing.
fn grid_axis(start: f32, extent: f32, pixels: f32, spacing: f32) -> Vec<f32> {
    let mut lines = Vec::new();
    if !(spacing.is_finite() && spacing > 0.0) {
        return lines;
    }
    let mut offset = (-start).rem_euclid(spacing);
    while offset <= extent {
        lines.push(offset / extent * pixels);
        offset += spacing;
    }
    lines
}
