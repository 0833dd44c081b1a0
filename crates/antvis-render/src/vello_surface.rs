//! Vello-based drawing surface.

use std::borrow::Cow;

use antvis_core::{FontSpec, ImageSource, Shadow, Surface};
use kurbo::{Affine, BezPath, Point, Rect, Shape as KurboShape, Stroke, Vec2};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, Layout, LayoutContext, StyleProperty};
use peniko::{Brush, Color, Fill, ImageBrush};
use vello::Scene;

use crate::images::ImageStore;
use crate::RenderResult;

#[derive(Debug, Clone, Copy)]
struct PaintState {
    transform: Affine,
    shadow: Shadow,
    /// Clip layers pushed since the matching save.
    clips: usize,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            shadow: Shadow::none(),
            clips: 0,
        }
    }
}

/// [`Surface`] that records drawing into a Vello scene.
///
/// Shadows are approximated by a blurred rectangle under the bounds of each
/// shadowed fill, blit or label.
pub struct VelloSurface {
    scene: Scene,
    font_cx: FontContext,
    layout_cx: LayoutContext<Brush>,
    images: ImageStore,
    state: PaintState,
    stack: Vec<PaintState>,
}

impl Default for VelloSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloSurface {
    /// Create a surface using the system font collection.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            images: ImageStore::new(),
            state: PaintState::default(),
            stack: Vec::new(),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene and paint state).
    pub fn take_scene(&mut self) -> Scene {
        self.close_layers();
        std::mem::take(&mut self.scene)
    }

    /// Start a new frame.
    pub fn reset(&mut self) {
        self.scene.reset();
        self.state = PaintState::default();
        self.stack.clear();
    }

    /// Register an encoded image (PNG, JPEG, WebP).
    pub fn load_image(&mut self, bytes: &[u8]) -> RenderResult<ImageSource> {
        self.images.decode(bytes)
    }

    /// Register raw RGBA8 pixels.
    pub fn insert_image(&mut self, width: u32, height: u32, pixels: Vec<u8>) -> RenderResult<ImageSource> {
        self.images.insert_rgba(width, height, pixels)
    }

    fn close_layers(&mut self) {
        while let Some(state) = self.stack.pop() {
            for _ in 0..self.state.clips {
                self.scene.pop_layer();
            }
            self.state = state;
        }
        for _ in 0..self.state.clips {
            self.scene.pop_layer();
        }
        self.state = PaintState::default();
    }

    fn build_layout(&mut self, text: &str, font: &FontSpec, brush: &Brush) -> Layout<Brush> {
        let weight = if font.bold {
            parley::FontWeight::BOLD
        } else {
            parley::FontWeight::NORMAL
        };
        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, false);
        builder.push_default(StyleProperty::FontSize(font.size as f32));
        builder.push_default(StyleProperty::Brush(brush.clone()));
        builder.push_default(StyleProperty::FontWeight(weight));
        builder.push_default(StyleProperty::FontStack(parley::FontStack::Source(Cow::Borrowed(
            font.family.as_str(),
        ))));
        let mut layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, parley::Alignment::Start, parley::AlignmentOptions::default());
        layout
    }

    /// Paint the current shadow under `bounds` (given in local coordinates).
    fn draw_shadow(&mut self, bounds: Rect) {
        let shadow = self.state.shadow;
        if !shadow.is_visible() {
            return;
        }
        let transform = self.state.transform * Affine::translate(shadow.offset);
        self.scene
            .draw_blurred_rounded_rect(transform, bounds, shadow.color, 0.0, shadow.blur / 2.0);
    }
}

impl Surface for VelloSurface {
    fn save(&mut self) {
        self.stack.push(self.state);
        self.state.clips = 0;
    }

    fn restore(&mut self) {
        let Some(state) = self.stack.pop() else {
            log::warn!("restore() without matching save()");
            return;
        };
        for _ in 0..self.state.clips {
            self.scene.pop_layer();
        }
        self.state = state;
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform * Affine::translate(offset);
    }

    fn clip(&mut self, rect: Rect) {
        self.scene.push_clip_layer(self.state.transform, &rect);
        self.state.clips += 1;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.draw_shadow(rect);
        self.scene.fill(Fill::NonZero, self.state.transform, color, None, &rect);
    }

    fn fill_path(&mut self, path: &BezPath, color: Color) {
        self.draw_shadow(path.bounding_box());
        self.scene.fill(Fill::NonZero, self.state.transform, color, None, path);
    }

    fn stroke_path(&mut self, path: &BezPath, color: Color, width: f64) {
        let stroke = Stroke::new(width);
        self.scene.stroke(&stroke, self.state.transform, color, None, path);
    }

    fn set_shadow(&mut self, shadow: Shadow) {
        self.state.shadow = shadow;
    }

    fn set_shadow_color(&mut self, color: Color) {
        self.state.shadow.color = color;
    }

    fn draw_image(&mut self, image: &ImageSource, src: Rect, dst: Rect) {
        let Some(data) = self.images.get(image).cloned() else {
            log::warn!("Drawing unregistered image {}", image.id);
            return;
        };
        if src.width() <= 0.0 || src.height() <= 0.0 {
            return;
        }
        self.draw_shadow(dst);

        let scale_x = dst.width() / src.width();
        let scale_y = dst.height() / src.height();
        let image_transform = self.state.transform
            * Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(scale_x, scale_y)
            * Affine::translate((-src.x0, -src.y0));

        self.scene.push_clip_layer(self.state.transform, &dst);
        self.scene.draw_image(&ImageBrush::from(data), image_transform);
        self.scene.pop_layer();
    }

    fn measure_text(&mut self, text: &str, font: &FontSpec) -> f64 {
        let brush = Brush::Solid(Color::BLACK);
        self.build_layout(text, font, &brush).width() as f64
    }

    fn fill_text(&mut self, text: &str, origin: Point, font: &FontSpec, color: Color) {
        if text.is_empty() {
            return;
        }
        let brush = Brush::Solid(color);
        let layout = self.build_layout(text, font, &brush);
        let width = layout.width() as f64;
        let height = layout.height() as f64;

        // Bottom baseline: the layout box ends at the origin.
        let top_left = Point::new(origin.x, origin.y - height);
        self.draw_shadow(Rect::from_origin_size(top_left, (width, height)));
        let text_transform = self.state.transform * Affine::translate(top_left.to_vec2());

        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        vello::Glyph { id: glyph.id, x: gx, y: gy }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(run.font())
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(run.font_size())
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }
    }
}
