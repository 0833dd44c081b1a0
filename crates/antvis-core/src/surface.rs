//! Drawing surface abstraction.
//!
//! Widgets paint through [`Surface`], a canvas-like interface with a stack of
//! paint states. Backends live outside this crate; [`RecordingSurface`] keeps a
//! log of calls for tests and headless hosts.

use kurbo::{Affine, BezPath, Point, Rect, Vec2};
use peniko::Color;

use crate::style::FontSpec;

/// Handle to an image resource owned by the surface backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageSource {
    /// Backend-specific identifier.
    pub id: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSource {
    pub fn new(id: u32, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }
}

/// Drop shadow applied to subsequent fills, blits and text.
#[derive(Debug, Clone, Copy)]
pub struct Shadow {
    pub color: Color,
    pub blur: f64,
    pub offset: Vec2,
}

impl Shadow {
    /// A shadow that paints nothing.
    pub fn none() -> Self {
        Self {
            color: Color::TRANSPARENT,
            blur: 0.0,
            offset: Vec2::ZERO,
        }
    }

    /// Whether drawing with this shadow would leave any mark.
    pub fn is_visible(&self) -> bool {
        self.color.to_rgba8().a > 0 && (self.blur > 0.0 || self.offset != Vec2::ZERO)
    }
}

impl Default for Shadow {
    fn default() -> Self {
        Self::none()
    }
}

/// A 2D drawing surface with scoped paint state.
///
/// `save`/`restore` bracket the transform, clip and shadow state, like a
/// canvas 2D context.
pub trait Surface {
    /// Push a copy of the current paint state.
    fn save(&mut self);

    /// Pop the paint state pushed by the matching `save`.
    fn restore(&mut self);

    /// Translate subsequent drawing.
    fn translate(&mut self, offset: Vec2);

    /// Intersect the clip with `rect` until the next `restore`.
    fn clip(&mut self, rect: Rect);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_path(&mut self, path: &BezPath, color: Color);

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64);

    fn set_shadow(&mut self, shadow: Shadow);

    /// Change only the shadow color, keeping blur and offset.
    fn set_shadow_color(&mut self, color: Color);

    fn clear_shadow(&mut self) {
        self.set_shadow(Shadow::none());
    }

    /// Blit the `src` region of `image` into `dst`.
    fn draw_image(&mut self, image: &ImageSource, src: Rect, dst: Rect);

    /// Width of `text` rendered with `font`.
    fn measure_text(&mut self, text: &str, font: &FontSpec) -> f64;

    /// Draw `text` left-aligned with its baseline at the bottom, anchored at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, font: &FontSpec, color: Color);
}

/// One recorded surface call, with geometry already mapped to surface space.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    Save,
    Restore,
    Clip(Rect),
    FillRect { rect: Rect, color: Color, shadow: Shadow },
    FillPath { bounds: Rect, color: Color, shadow: Shadow },
    StrokePath { bounds: Rect, color: Color, width: f64 },
    Image { image: ImageSource, src: Rect, dst: Rect, shadow: Shadow },
    Text { text: String, origin: Point, color: Color, shadow: Shadow },
}

#[derive(Debug, Clone, Copy)]
struct PaintState {
    transform: Affine,
    shadow: Shadow,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            shadow: Shadow::none(),
        }
    }
}

/// Surface that records every call instead of rasterizing.
///
/// Text is measured with a fixed advance per character, which keeps layouts
/// deterministic.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    state: PaintState,
    stack: Vec<PaintState>,
    char_width: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// Advance per character used by [`RecordingSurface::new`].
    pub const DEFAULT_CHAR_WIDTH: f64 = 10.0;

    pub fn new() -> Self {
        Self::with_char_width(Self::DEFAULT_CHAR_WIDTH)
    }

    /// Create a surface measuring text at `char_width` per character.
    pub fn with_char_width(char_width: f64) -> Self {
        Self {
            commands: Vec::new(),
            state: PaintState::default(),
            stack: Vec::new(),
            char_width,
        }
    }

    /// Recorded commands, oldest first.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded commands, keeping the paint state.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Depth of the save stack (0 when balanced).
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn map_rect(&self, rect: Rect) -> Rect {
        self.state.transform.transform_rect_bbox(rect)
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.stack.push(self.state);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        } else {
            log::warn!("restore() without matching save()");
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform * Affine::translate(offset);
    }

    fn clip(&mut self, rect: Rect) {
        let rect = self.map_rect(rect);
        self.commands.push(DrawCommand::Clip(rect));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.map_rect(rect);
        self.commands.push(DrawCommand::FillRect {
            rect,
            color,
            shadow: self.state.shadow,
        });
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        let bounds = self.map_rect(kurbo::Shape::bounding_box(path));
        self.commands.push(DrawCommand::FillPath {
            bounds,
            color,
            shadow: self.state.shadow,
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let bounds = self.map_rect(kurbo::Shape::bounding_box(path));
        self.commands.push(DrawCommand::StrokePath { bounds, color, width });
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.state.shadow = shadow;
    }

    fn set_shadow_color(&mut self, color: Color) {
        self.state.shadow.color = color;
    }

    fn draw_image(&mut self, image: &ImageSource, src: Rect, dst: Rect) {
        let dst = self.map_rect(dst);
        self.commands.push(DrawCommand::Image {
            image: *image,
            src,
            dst,
            shadow: self.state.shadow,
        });
    }

    fn measure_text(&mut self, text: &str, _font: &FontSpec) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn fill_text(&mut self, text: &str, origin: Point, _font: &FontSpec, color: Color) {
        let origin = self.state.transform * origin;
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            origin,
            color,
            shadow: self.state.shadow,
        });
    }
}
