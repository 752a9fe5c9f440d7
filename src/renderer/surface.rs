//! Host drawing surface abstraction

use glam::Vec2;

/// 2D stroke-only drawing surface supplied by the host
///
/// Mirrors the subset of the canvas 2D context the game needs. Coordinates and
/// widths are in screen pixels.
pub trait DrawingSurface {
    /// Clear a `size.x` by `size.y` region from the origin
    fn clear(&mut self, size: Vec2);
    /// Start a new path, discarding any unstroked segments
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Vec2);
    fn line_to(&mut self, p: Vec2);
    fn set_line_width(&mut self, width: f32);
    fn set_stroke_color(&mut self, color: &str);
    /// Stroke the current path
    fn stroke(&mut self);
    /// Stroke a full circle outline as its own path
    fn stroke_circle(&mut self, center: Vec2, radius: f32);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Vec2),
    BeginPath,
    MoveTo(Vec2),
    LineTo(Vec2),
    LineWidth(f32),
    StrokeColor(String),
    Stroke,
    Circle { center: Vec2, radius: f32 },
}

/// Surface that records every call instead of drawing
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// All circles drawn, in order
    pub fn circles(&self) -> Vec<(Vec2, f32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Circle { center, radius } => Some((*center, *radius)),
                _ => None,
            })
            .collect()
    }

    /// Number of `MoveTo`/`LineTo` pairs (line segments) recorded
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::LineTo(_)))
            .count()
    }
}

impl DrawingSurface for Recorder {
    fn clear(&mut self, size: Vec2) {
        self.commands.push(DrawCommand::Clear(size));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Vec2) {
        self.commands.push(DrawCommand::LineTo(p));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_stroke_color(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeColor(color.to_string()));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Circle { center, radius });
    }
}
