//! Widget groups: ordered widgets sharing a layout axis and interaction mode.

use kurbo::{Point, Rect, Size};
use peniko::Color;
use thiserror::Error;

use crate::geometry::contains;
use crate::style::ButtonStyle;
use crate::surface::{ImageSource, Surface};
use crate::widget::{ClickHandler, Face, Frame, ImageFace, TextFace, Widget};

/// Gap between cascaded text widgets.
pub const DEFAULT_GUTTER: f64 = 2.0;

/// Group construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    #[error("Group '{group}' is not an {expected} group")]
    WrongKind { group: String, expected: &'static str },
    #[error("Unknown group: {0}")]
    UnknownGroup(String),
}

/// Layout axis of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// How a group reacts to pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupMode {
    /// Not drawn and never receives events.
    Hidden,
    /// Buttons are pressed while held and released on pointer up.
    #[default]
    Normal,
    /// At most one button stays pressed; release keeps the toggle.
    RadioExclusive,
}

/// What a group is backed by.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKind {
    /// Square cells cut from a horizontal strip image.
    Image {
        image: ImageSource,
        /// Side of a cell: image height plus the border on both sides.
        cell: f64,
    },
    /// Variable-width text labels laid out by cascade.
    Text,
}

/// Space reserved along the axis of an image group without a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacer {
    pub delta: f64,
    pub size: f64,
}

/// An entry of a group.
#[derive(Debug)]
pub enum Slot {
    Widget(Widget),
    Spacer(Spacer),
}

impl Slot {
    pub fn as_widget(&self) -> Option<&Widget> {
        match self {
            Slot::Widget(w) => Some(w),
            Slot::Spacer(_) => None,
        }
    }

    pub fn as_widget_mut(&mut self) -> Option<&mut Widget> {
        match self {
            Slot::Widget(w) => Some(w),
            Slot::Spacer(_) => None,
        }
    }
}

/// Result of a hit test inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResult {
    /// No widget under the point.
    Miss,
    /// A non-clickable widget covers the point and shadows anything behind it.
    Blocked,
    /// A clickable widget at this slot index.
    Hit(usize),
}

impl HitResult {
    /// The clickable slot under the point, if any.
    pub fn target(self) -> Option<usize> {
        match self {
            HitResult::Hit(index) => Some(index),
            HitResult::Miss | HitResult::Blocked => None,
        }
    }
}

/// A named, ordered collection of widgets.
#[derive(Debug)]
pub struct WidgetGroup {
    name: String,
    kind: GroupKind,
    slots: Vec<Slot>,
    /// Interaction mode; may be changed at any time.
    pub mode: GroupMode,
    pub axis: Axis,
    pub border: f64,
    /// Top-left corner on the surface.
    pub origin: Point,
    /// Bounding size; grows as image widgets are added, set by cascade for text groups.
    pub size: Size,
}

impl WidgetGroup {
    /// Create an image group. Cells are `image.height + 2 * border` square.
    pub fn image(name: impl Into<String>, image: ImageSource, axis: Axis, mode: GroupMode, border: f64) -> Self {
        let cell = image.height as f64 + 2.0 * border;
        let size = match axis {
            Axis::Vertical => Size::new(cell, 0.0),
            Axis::Horizontal => Size::new(0.0, cell),
        };
        Self {
            name: name.into(),
            kind: GroupKind::Image { image, cell },
            slots: Vec::new(),
            mode,
            axis,
            border,
            origin: Point::ZERO,
            size,
        }
    }

    /// Create a text group. Its size stays zero until [`WidgetGroup::cascade`] runs.
    pub fn text(name: impl Into<String>, axis: Axis, mode: GroupMode, border: f64) -> Self {
        Self {
            name: name.into(),
            kind: GroupKind::Text,
            slots: Vec::new(),
            mode,
            axis,
            border,
            origin: Point::ZERO,
            size: Size::ZERO,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &GroupKind {
        &self.kind
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn widget(&self, index: usize) -> Option<&Widget> {
        self.slots.get(index).and_then(Slot::as_widget)
    }

    pub fn widget_mut(&mut self, index: usize) -> Option<&mut Widget> {
        self.slots.get_mut(index).and_then(Slot::as_widget_mut)
    }

    /// Iterate over widgets with their slot indices, skipping spacers.
    pub fn widgets(&self) -> impl Iterator<Item = (usize, &Widget)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_widget().map(|w| (i, w)))
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn set_mode(&mut self, mode: GroupMode) {
        self.mode = mode;
    }

    pub fn is_visible(&self) -> bool {
        self.mode != GroupMode::Hidden
    }

    /// Bounding box on the surface.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Geometry handed to widget faces.
    pub fn frame(&self) -> Frame<'_> {
        let (cell, image) = match &self.kind {
            GroupKind::Image { image, cell } => (*cell, Some(image)),
            GroupKind::Text => (0.0, None),
        };
        Frame {
            origin: self.origin,
            axis: self.axis,
            border: self.border,
            cell,
            image,
        }
    }

    fn extent(&self) -> f64 {
        match self.axis {
            Axis::Vertical => self.size.height,
            Axis::Horizontal => self.size.width,
        }
    }

    fn grow(&mut self, amount: f64) {
        match self.axis {
            Axis::Vertical => self.size.height += amount,
            Axis::Horizontal => self.size.width += amount,
        }
    }

    fn wrong_kind(&self, expected: &'static str) -> GroupError {
        GroupError::WrongKind {
            group: self.name.clone(),
            expected,
        }
    }

    /// Append a cell showing square `index` of the group's image strip.
    ///
    /// Returns the slot index of the new widget.
    pub fn add_image_widget(&mut self, index: usize, on_click: Option<ClickHandler>) -> Result<usize, GroupError> {
        let GroupKind::Image { cell, .. } = self.kind else {
            return Err(self.wrong_kind("image"));
        };
        let source_offset = (cell - 2.0 * self.border) * index as f64;
        let face = ImageFace::new(source_offset, self.extent());
        self.slots.push(Slot::Widget(Widget::new(Face::Image(face), on_click)));
        self.grow(cell);
        Ok(self.slots.len() - 1)
    }

    /// Reserve `size` along the axis without adding a widget.
    pub fn add_spacer(&mut self, size: f64) -> Result<(), GroupError> {
        if !matches!(self.kind, GroupKind::Image { .. }) {
            return Err(self.wrong_kind("image"));
        }
        self.slots.push(Slot::Spacer(Spacer {
            delta: self.extent(),
            size,
        }));
        self.grow(size);
        Ok(())
    }

    /// Append a text label. The group is not resized; call [`WidgetGroup::cascade`] afterwards.
    pub fn add_text_widget(
        &mut self,
        surface: &mut dyn Surface,
        style: &ButtonStyle,
        text: impl Into<String>,
        color: Color,
        on_click: Option<ClickHandler>,
    ) -> Result<usize, GroupError> {
        if self.kind != GroupKind::Text {
            return Err(self.wrong_kind("text"));
        }
        let face = TextFace::measured(surface, style, text, color);
        self.slots.push(Slot::Widget(Widget::new(Face::Text(face), on_click)));
        Ok(self.slots.len() - 1)
    }

    /// Flow text widgets left to right, wrapping rows at `max_width`.
    ///
    /// A widget wraps only when its row already holds something, so a label
    /// wider than `max_width` sits alone on its row. Sets the group size and
    /// returns the total height (0 for an empty group).
    pub fn cascade(&mut self, max_width: f64) -> Result<f64, GroupError> {
        self.cascade_with_gutter(max_width, DEFAULT_GUTTER)
    }

    /// [`WidgetGroup::cascade`] with a custom gap between widgets and rows.
    pub fn cascade_with_gutter(&mut self, max_width: f64, gutter: f64) -> Result<f64, GroupError> {
        if self.kind != GroupKind::Text {
            return Err(self.wrong_kind("text"));
        }
        let mut x = 0.0;
        let mut y = 0.0;
        let mut last_height = None;
        for slot in &mut self.slots {
            let Some(Face::Text(face)) = slot.as_widget_mut().map(|w| &mut w.face) else {
                continue;
            };
            if x > 0.0 && x + face.width > max_width {
                x = 0.0;
                y += face.height + gutter;
            }
            face.offset = Point::new(x, y);
            x += face.width + gutter;
            last_height = Some(face.height);
        }
        let height = last_height.map_or(0.0, |h| y + h);
        self.size = Size::new(max_width, height);
        Ok(height)
    }

    /// Draw every widget; spacers are skipped.
    pub fn draw(&self, surface: &mut dyn Surface, style: &ButtonStyle) {
        let frame = self.frame();
        for (_, widget) in self.widgets() {
            widget.draw(surface, &frame, style);
        }
    }

    /// Redraw a single widget.
    pub fn draw_widget(&self, index: usize, surface: &mut dyn Surface, style: &ButtonStyle) {
        if let Some(widget) = self.widget(index) {
            widget.draw(surface, &self.frame(), style);
        }
    }

    /// Find the first widget (in insertion order) containing `point`.
    pub fn hit_test(&self, point: Point) -> HitResult {
        let frame = self.frame();
        for (index, widget) in self.widgets() {
            if contains(widget.rect(&frame), point) {
                return if widget.is_clickable() {
                    HitResult::Hit(index)
                } else {
                    HitResult::Blocked
                };
            }
        }
        HitResult::Miss
    }

    /// Press the widget at `index`.
    ///
    /// In radio mode every other pressed sibling is released first; pressing
    /// an already pressed radio button does nothing.
    pub fn pressed_down(&mut self, index: usize, surface: &mut dyn Surface, style: &ButtonStyle) {
        match self.mode {
            GroupMode::Hidden => return,
            GroupMode::RadioExclusive => {
                if self.widget(index).is_none_or(|w| w.pressed) {
                    return;
                }
                let released: Vec<usize> = self
                    .widgets()
                    .filter(|(_, w)| w.pressed)
                    .map(|(i, _)| i)
                    .collect();
                for i in released {
                    if let Some(w) = self.widget_mut(i) {
                        w.pressed = false;
                    }
                    self.draw_widget(i, surface, style);
                }
            }
            GroupMode::Normal => {}
        }
        if let Some(widget) = self.widget_mut(index) {
            widget.pressed = true;
            self.draw_widget(index, surface, style);
        }
    }

    /// Release the widget at `index`. Only normal groups un-press on release.
    pub fn pressed_up(&mut self, index: usize, surface: &mut dyn Surface, style: &ButtonStyle) {
        if self.mode != GroupMode::Normal {
            return;
        }
        if let Some(widget) = self.widget_mut(index) {
            widget.pressed = false;
            self.draw_widget(index, surface, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    fn noop() -> Option<ClickHandler> {
        Some(Box::new(|| {}))
    }

    fn text_group(widths: &[usize]) -> WidgetGroup {
        // One character per pixel; padding brings each label to the requested width.
        let mut surface = RecordingSurface::with_char_width(1.0);
        let style = ButtonStyle::default();
        let mut group = WidgetGroup::text("players", Axis::Horizontal, GroupMode::Normal, 0.0);
        for &w in widths {
            let label = "x".repeat(w - 8);
            group.add_text_widget(&mut surface, &style, label, Color::BLACK, noop()).unwrap();
        }
        group
    }

    fn offsets(group: &WidgetGroup) -> Vec<Point> {
        group
            .widgets()
            .filter_map(|(_, w)| match &w.face {
                Face::Text(f) => Some(f.offset),
                Face::Image(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_vertical_image_group_layout() {
        let mut group = WidgetGroup::image("tools", ImageSource::new(0, 256, 32), Axis::Vertical, GroupMode::Normal, 0.0);
        group.set_origin(Point::new(500.0, 0.0));
        group.add_image_widget(0, noop()).unwrap();
        group.add_image_widget(1, noop()).unwrap();

        let frame = group.frame();
        assert_eq!(group.widget(0).unwrap().rect(&frame), Rect::new(500.0, 0.0, 532.0, 32.0));
        assert_eq!(group.widget(1).unwrap().rect(&frame), Rect::new(500.0, 32.0, 532.0, 64.0));
        assert!((group.size.height - 64.0).abs() < f64::EPSILON);
        assert!((group.size.width - 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_image_group_border_grows_cell() {
        let mut group = WidgetGroup::image("tools", ImageSource::new(0, 256, 32), Axis::Horizontal, GroupMode::Normal, 2.0);
        group.add_image_widget(3, noop()).unwrap();
        match &group.widget(0).unwrap().face {
            Face::Image(face) => assert!((face.source_offset - 96.0).abs() < f64::EPSILON),
            Face::Text(_) => panic!("expected image face"),
        }
        assert!((group.size.width - 36.0).abs() < f64::EPSILON);
        assert!((group.size.height - 36.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_spacer_reserves_extent() {
        let mut group = WidgetGroup::image("tools", ImageSource::new(0, 256, 32), Axis::Horizontal, GroupMode::Normal, 0.0);
        group.add_image_widget(0, noop()).unwrap();
        group.add_spacer(16.0).unwrap();
        let idx = group.add_image_widget(1, noop()).unwrap();

        assert_eq!(idx, 2);
        assert!(group.widget(1).is_none());
        assert!(matches!(group.slots()[1], Slot::Spacer(Spacer { delta, size }) if delta == 32.0 && size == 16.0));
        assert_eq!(group.widget(2).unwrap().rect(&group.frame()), Rect::new(48.0, 0.0, 80.0, 32.0));
        assert_eq!(group.hit_test(Point::new(40.0, 10.0)), HitResult::Miss);
    }

    #[test]
    fn test_kind_mismatch_is_error() {
        let mut surface = RecordingSurface::new();
        let style = ButtonStyle::default();
        let mut text = WidgetGroup::text("t", Axis::Horizontal, GroupMode::Normal, 0.0);
        assert!(matches!(text.add_image_widget(0, None), Err(GroupError::WrongKind { expected: "image", .. })));
        assert!(text.add_spacer(4.0).is_err());

        let mut image = WidgetGroup::image("i", ImageSource::new(0, 32, 32), Axis::Horizontal, GroupMode::Normal, 0.0);
        assert!(image.add_text_widget(&mut surface, &style, "a", Color::BLACK, None).is_err());
        assert!(image.cascade(100.0).is_err());
    }

    #[test]
    fn test_cascade_wraps_rows() {
        let mut group = text_group(&[50, 60, 40]);
        let height = group.cascade(100.0).unwrap();

        assert!((height - 88.0).abs() < f64::EPSILON);
        assert_eq!(offsets(&group), vec![Point::new(0.0, 0.0), Point::new(0.0, 30.0), Point::new(0.0, 60.0)]);
        assert_eq!(group.size, Size::new(100.0, 88.0));
    }

    #[test]
    fn test_cascade_packs_row() {
        let mut group = text_group(&[30, 30, 30, 30]);
        let height = group.cascade(100.0).unwrap();

        assert!((height - 58.0).abs() < f64::EPSILON);
        assert_eq!(
            offsets(&group),
            vec![Point::new(0.0, 0.0), Point::new(32.0, 0.0), Point::new(64.0, 0.0), Point::new(0.0, 30.0)]
        );
    }

    #[test]
    fn test_cascade_wide_widget_alone_on_row() {
        let mut group = text_group(&[150, 20]);
        group.cascade(100.0).unwrap();
        assert_eq!(offsets(&group), vec![Point::new(0.0, 0.0), Point::new(0.0, 30.0)]);
    }

    #[test]
    fn test_cascade_stays_within_width() {
        let mut group = text_group(&[40, 25, 33, 12, 60, 9, 48, 70, 18]);
        group.cascade(120.0).unwrap();
        let frame = group.frame();
        for (_, w) in group.widgets() {
            let rect = w.rect(&frame);
            assert!(rect.x0 >= 0.0);
            assert!(rect.x1 <= 120.0);
        }
    }

    #[test]
    fn test_cascade_empty_group() {
        let mut group = text_group(&[]);
        assert!((group.cascade(100.0).unwrap()).abs() < f64::EPSILON);
        assert_eq!(group.bounds(), Rect::new(0.0, 0.0, 100.0, 0.0));
    }

    #[test]
    fn test_hit_test_blocked_by_decorative_widget() {
        let mut surface = RecordingSurface::with_char_width(1.0);
        let style = ButtonStyle::default();
        let mut group = WidgetGroup::text("t", Axis::Horizontal, GroupMode::Normal, 0.0);
        group.add_text_widget(&mut surface, &style, "label", Color::BLACK, None).unwrap();
        group.add_text_widget(&mut surface, &style, "go", Color::BLACK, noop()).unwrap();
        group.cascade(200.0).unwrap();

        assert_eq!(group.hit_test(Point::new(3.0, 3.0)), HitResult::Blocked);
        assert_eq!(group.hit_test(Point::new(16.0, 3.0)), HitResult::Hit(1));
        assert_eq!(group.hit_test(Point::new(190.0, 3.0)), HitResult::Miss);
        assert_eq!(group.hit_test(Point::new(3.0, 3.0)).target(), None);
    }

    #[test]
    fn test_hit_test_before_cascade_uses_zero_origin() {
        let group = text_group(&[50]);
        assert_eq!(group.bounds(), Rect::ZERO);
        assert_eq!(group.hit_test(Point::new(10.0, 10.0)), HitResult::Hit(0));
    }

    #[test]
    fn test_radio_press_is_exclusive() {
        let mut surface = RecordingSurface::new();
        let style = ButtonStyle::default();
        let mut group = text_group(&[50, 50, 50]);
        group.set_mode(GroupMode::RadioExclusive);

        group.pressed_down(0, &mut surface, &style);
        assert!(group.widget(0).unwrap().pressed);
        group.pressed_down(2, &mut surface, &style);
        group.pressed_up(2, &mut surface, &style);

        let pressed: Vec<bool> = group.widgets().map(|(_, w)| w.pressed).collect();
        assert_eq!(pressed, vec![false, false, true]);
    }

    #[test]
    fn test_radio_repress_does_not_redraw() {
        let mut surface = RecordingSurface::new();
        let style = ButtonStyle::default();
        let mut group = text_group(&[50, 50]);
        group.set_mode(GroupMode::RadioExclusive);
        group.pressed_down(1, &mut surface, &style);
        surface.clear();
        group.pressed_down(1, &mut surface, &style);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_normal_press_and_release() {
        let mut surface = RecordingSurface::new();
        let style = ButtonStyle::default();
        let mut group = text_group(&[50, 50]);

        group.pressed_down(0, &mut surface, &style);
        group.pressed_down(1, &mut surface, &style);
        assert!(group.widget(0).unwrap().pressed && group.widget(1).unwrap().pressed);
        group.pressed_up(1, &mut surface, &style);
        assert!(!group.widget(1).unwrap().pressed);
    }

    #[test]
    fn test_hidden_group_ignores_presses() {
        let mut surface = RecordingSurface::new();
        let style = ButtonStyle::default();
        let mut group = text_group(&[50]);
        group.set_mode(GroupMode::Hidden);
        group.pressed_down(0, &mut surface, &style);
        assert!(!group.widget(0).unwrap().pressed);
        assert!(!group.is_visible());
        assert!(surface.commands().is_empty());
    }
}
