//! Widgets: clickable or decorative elements owned by a group.
//!
//! A [`Widget`] carries the interactive state (hover, pressed, click handler)
//! and a [`Face`] that decides where it sits and what its interior looks like.

use kurbo::{Point, Rect, Vec2};
use peniko::Color;

use crate::geometry::rounded_rect_path;
use crate::group::Axis;
use crate::style::ButtonStyle;
use crate::surface::{ImageSource, Shadow, Surface};

/// Callback invoked when a press and release land on the same widget.
pub type ClickHandler = Box<dyn FnMut()>;

/// Group geometry a face needs to place and paint itself.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Top-left corner of the owning group.
    pub origin: Point,
    pub axis: Axis,
    /// Inset of the image inside each cell.
    pub border: f64,
    /// Square cell size of image groups (0 for text groups).
    pub cell: f64,
    /// Shared image of image groups.
    pub image: Option<&'a ImageSource>,
}

/// Placement and interior painting of a widget variant.
pub trait WidgetFace {
    /// Screen rectangle of the widget inside `frame`.
    fn rect(&self, frame: &Frame) -> Rect;

    /// Paint the interior in widget-local coordinates (origin at the top-left corner).
    fn paint(&self, surface: &mut dyn Surface, frame: &Frame, style: &ButtonStyle);
}

/// A cell of an image group showing one square of the group's image strip.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFace {
    /// Pixel offset of the source square inside the image.
    pub source_offset: f64,
    /// Offset of the cell along the group's axis.
    pub delta: f64,
}

impl ImageFace {
    pub fn new(source_offset: f64, delta: f64) -> Self {
        Self { source_offset, delta }
    }
}

impl WidgetFace for ImageFace {
    fn rect(&self, frame: &Frame) -> Rect {
        let (dx, dy) = match frame.axis {
            Axis::Horizontal => (self.delta, 0.0),
            Axis::Vertical => (0.0, self.delta),
        };
        Rect::from_origin_size(
            (frame.origin.x + dx, frame.origin.y + dy),
            (frame.cell, frame.cell),
        )
    }

    fn paint(&self, surface: &mut dyn Surface, frame: &Frame, _style: &ButtonStyle) {
        let Some(image) = frame.image else {
            return;
        };
        let b = frame.border;
        let bs = frame.cell - 2.0 * b;
        let src = Rect::from_origin_size((self.source_offset, 0.0), (bs, bs));
        let dst = Rect::from_origin_size((b, b), (bs, bs));
        surface.draw_image(image, src, dst);
    }
}

/// A text label with its measured size and position inside a text group.
#[derive(Debug, Clone)]
pub struct TextFace {
    pub text: String,
    pub color: Color,
    /// Position relative to the group origin, assigned by cascade.
    pub offset: Point,
    pub width: f64,
    pub height: f64,
}

impl TextFace {
    /// Create a label, measuring its width once with the style's font.
    pub fn measured(
        surface: &mut dyn Surface,
        style: &ButtonStyle,
        text: impl Into<String>,
        color: Color,
    ) -> Self {
        let text = text.into();
        let width = surface.measure_text(&text, &style.font) + style.text_padding;
        Self {
            text,
            color,
            offset: Point::ZERO,
            width,
            height: style.text_height,
        }
    }
}

impl WidgetFace for TextFace {
    fn rect(&self, frame: &Frame) -> Rect {
        Rect::from_origin_size(
            (frame.origin.x + self.offset.x, frame.origin.y + self.offset.y),
            (self.width, self.height),
        )
    }

    fn paint(&self, surface: &mut dyn Surface, _frame: &Frame, style: &ButtonStyle) {
        surface.set_shadow_color(style.text_halo.color());
        surface.fill_text(
            &self.text,
            Point::new(style.text_inset, style.text_baseline),
            &style.font,
            self.color,
        );
    }
}

/// Widget variants.
#[derive(Debug, Clone)]
pub enum Face {
    Image(ImageFace),
    Text(TextFace),
}

impl WidgetFace for Face {
    fn rect(&self, frame: &Frame) -> Rect {
        match self {
            Face::Image(f) => f.rect(frame),
            Face::Text(f) => f.rect(frame),
        }
    }

    fn paint(&self, surface: &mut dyn Surface, frame: &Frame, style: &ButtonStyle) {
        match self {
            Face::Image(f) => f.paint(surface, frame, style),
            Face::Text(f) => f.paint(surface, frame, style),
        }
    }
}

/// A single button: a face plus hover/press state and an optional click handler.
pub struct Widget {
    pub face: Face,
    pub hovered: bool,
    pub pressed: bool,
    on_click: Option<ClickHandler>,
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("face", &self.face)
            .field("hovered", &self.hovered)
            .field("pressed", &self.pressed)
            .field("clickable", &self.is_clickable())
            .finish()
    }
}

impl Widget {
    pub fn new(face: Face, on_click: Option<ClickHandler>) -> Self {
        Self {
            face,
            hovered: false,
            pressed: false,
            on_click,
        }
    }

    /// A widget is clickable exactly when it has a click handler.
    pub fn is_clickable(&self) -> bool {
        self.on_click.is_some()
    }

    /// Replace (or remove) the click handler.
    pub fn set_on_click(&mut self, on_click: Option<ClickHandler>) {
        self.on_click = on_click;
    }

    /// Run the click handler, if any. Returns whether one ran.
    pub fn click(&mut self) -> bool {
        match self.on_click.as_mut() {
            Some(handler) => {
                handler();
                true
            }
            None => false,
        }
    }

    pub fn rect(&self, frame: &Frame) -> Rect {
        self.face.rect(frame)
    }

    /// Paint the widget: background tile, highlight and shadow, face, outline.
    pub fn draw(&self, surface: &mut dyn Surface, frame: &Frame, style: &ButtonStyle) {
        let rect = self.rect(frame);
        let active = self.is_clickable() && (self.hovered || self.pressed);
        let radius = style.corner_ratio * rect.width().min(rect.height());
        let outline = rounded_rect_path(rect, style.highlight_margin, radius);

        surface.save();
        surface.fill_rect(rect, style.background.color());
        surface.clip(rect);

        if self.is_clickable() {
            if active {
                surface.fill_path(&outline, style.highlight.color());
            }
            let shadow = if self.pressed {
                Shadow {
                    color: style.shadow_color.color(),
                    blur: style.pressed_shadow_blur,
                    offset: Vec2::ZERO,
                }
            } else {
                Shadow {
                    color: style.shadow_color.color(),
                    blur: style.shadow_blur,
                    offset: style.shadow_offset,
                }
            };
            surface.set_shadow(shadow);
        }

        let shift = if self.pressed { style.press_shift } else { -style.press_shift };
        surface.save();
        surface.translate(Vec2::new(rect.x0, rect.y0 + shift));
        self.face.paint(surface, frame, style);
        surface.restore();

        if active {
            surface.clear_shadow();
            surface.stroke_path(&outline, style.outline.color(), style.outline_width);
        }
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn image_frame(image: &ImageSource) -> Frame<'_> {
        Frame {
            origin: Point::new(100.0, 10.0),
            axis: Axis::Vertical,
            border: 2.0,
            cell: 36.0,
            image: Some(image),
        }
    }

    #[test]
    fn test_image_face_rect_follows_axis() {
        let image = ImageSource::new(1, 320, 32);
        let face = ImageFace::new(64.0, 72.0);
        let mut frame = image_frame(&image);
        assert_eq!(face.rect(&frame), Rect::new(100.0, 82.0, 136.0, 118.0));
        frame.axis = Axis::Horizontal;
        assert_eq!(face.rect(&frame), Rect::new(172.0, 10.0, 208.0, 46.0));
    }

    #[test]
    fn test_image_face_blits_inset_square() {
        let image = ImageSource::new(1, 320, 32);
        let frame = image_frame(&image);
        let widget = Widget::new(Face::Image(ImageFace::new(64.0, 0.0)), None);
        let mut surface = RecordingSurface::new();
        widget.draw(&mut surface, &frame, &ButtonStyle::default());

        let blit = surface.commands().iter().find_map(|c| match c {
            DrawCommand::Image { src, dst, .. } => Some((*src, *dst)),
            _ => None,
        });
        let (src, dst) = blit.expect("image drawn");
        assert_eq!(src, Rect::new(64.0, 0.0, 96.0, 32.0));
        // Face is shifted up by one pixel when not pressed.
        assert_eq!(dst, Rect::new(102.0, 11.0, 134.0, 43.0));
    }

    #[test]
    fn test_text_face_measures_once() {
        let mut surface = RecordingSurface::with_char_width(5.0);
        let style = ButtonStyle::default();
        let face = TextFace::measured(&mut surface, &style, "Player 1", Color::BLACK);
        assert!((face.width - 48.0).abs() < f64::EPSILON);
        assert!((face.height - 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decorative_widget_has_no_highlight() {
        let mut surface = RecordingSurface::new();
        let style = ButtonStyle::default();
        let face = TextFace::measured(&mut surface, &style, "score", Color::BLACK);
        let mut widget = Widget::new(Face::Text(face), None);
        widget.hovered = true;
        widget.pressed = true;
        let frame = Frame {
            origin: Point::ZERO,
            axis: Axis::Horizontal,
            border: 0.0,
            cell: 0.0,
            image: None,
        };
        surface.clear();
        widget.draw(&mut surface, &frame, &style);

        assert!(!surface
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillPath { .. } | DrawCommand::StrokePath { .. })));
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_hovered_widget_draws_highlight_and_outline() {
        let mut surface = RecordingSurface::new();
        let style = ButtonStyle::default();
        let face = TextFace::measured(&mut surface, &style, "go", Color::BLACK);
        let mut widget = Widget::new(Face::Text(face), Some(Box::new(|| {})));
        widget.hovered = true;
        let frame = Frame {
            origin: Point::new(0.0, 0.0),
            axis: Axis::Horizontal,
            border: 0.0,
            cell: 0.0,
            image: None,
        };
        widget.draw(&mut surface, &frame, &style);

        let cmds = surface.commands();
        assert!(cmds.iter().any(|c| matches!(c, DrawCommand::FillPath { .. })));
        match cmds.iter().find(|c| matches!(c, DrawCommand::Text { .. })) {
            Some(DrawCommand::Text { origin, shadow, .. }) => {
                // Not pressed: shifted up by one.
                assert_eq!(*origin, Point::new(4.0, 24.0));
                assert!((shadow.blur - 4.0).abs() < f64::EPSILON);
                assert_eq!(shadow.color.to_rgba8().r, 255);
            }
            _ => panic!("label not drawn"),
        }
        match cmds.iter().find(|c| matches!(c, DrawCommand::StrokePath { .. })) {
            Some(DrawCommand::StrokePath { width, .. }) => assert!((width - 2.0).abs() < f64::EPSILON),
            _ => panic!("outline not drawn"),
        }
    }

    #[test]
    fn test_pressed_widget_shifts_face_down() {
        let mut surface = RecordingSurface::new();
        let style = ButtonStyle::default();
        let face = TextFace::measured(&mut surface, &style, "go", Color::BLACK);
        let mut widget = Widget::new(Face::Text(face), Some(Box::new(|| {})));
        widget.pressed = true;
        let frame = Frame {
            origin: Point::new(0.0, 0.0),
            axis: Axis::Horizontal,
            border: 0.0,
            cell: 0.0,
            image: None,
        };
        widget.draw(&mut surface, &frame, &style);

        match surface.commands().iter().find(|c| matches!(c, DrawCommand::Text { .. })) {
            Some(DrawCommand::Text { origin, shadow, .. }) => {
                assert_eq!(*origin, Point::new(4.0, 26.0));
                assert!((shadow.blur - 1.0).abs() < f64::EPSILON);
                assert_eq!(shadow.offset, Vec2::ZERO);
            }
            _ => panic!("label not drawn"),
        }
    }

    #[test]
    fn test_click_runs_handler() {
        use std::cell::Cell;
        use std::rc::Rc;

        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let mut widget = Widget::new(
            Face::Image(ImageFace::new(0.0, 0.0)),
            Some(Box::new(move || c.set(c.get() + 1))),
        );
        assert!(widget.is_clickable());
        assert!(widget.click());
        assert_eq!(count.get(), 1);

        widget.set_on_click(None);
        assert!(!widget.is_clickable());
        assert!(!widget.click());
    }
}
