//! Widget manager: named groups plus pointer routing.
//!
//! The manager tracks two handles:
//! - `hover`: the clickable widget under the last pointer position
//! - `nailed`: the widget captured by the last press, until release
//!
//! A click fires on release only when the pointer is back over the nailed widget.

use kurbo::Point;
use peniko::Color;

use crate::geometry::contains;
use crate::group::{Axis, GroupError, GroupMode, WidgetGroup};
use crate::style::ButtonStyle;
use crate::surface::{ImageSource, Surface};
use crate::widget::{ClickHandler, Widget};

/// Hook run after interactive state changed, for hosts that must repaint explicitly.
pub type RepaintHook = Box<dyn FnMut()>;

/// Handle to a widget: group registration index and slot index inside the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId {
    pub group: usize,
    pub index: usize,
}

impl WidgetId {
    pub fn new(group: usize, index: usize) -> Self {
        Self { group, index }
    }
}

/// Registry of named widget groups drawing onto one surface.
pub struct WidgetManager<S: Surface> {
    surface: S,
    style: ButtonStyle,
    /// Groups in registration order, which is also hit-test and draw order.
    groups: Vec<WidgetGroup>,
    hover: Option<WidgetId>,
    nailed: Option<WidgetId>,
    repaint: Option<RepaintHook>,
}

impl<S: Surface> WidgetManager<S> {
    /// Create a manager drawing onto `surface` with the default style.
    pub fn new(surface: S) -> Self {
        Self::with_style(surface, ButtonStyle::default())
    }

    pub fn with_style(surface: S, style: ButtonStyle) -> Self {
        Self {
            surface,
            style,
            groups: Vec::new(),
            hover: None,
            nailed: None,
            repaint: None,
        }
    }

    /// Install a hook run after every pointer event that changed widget state.
    pub fn with_repaint_hook(mut self, hook: impl FnMut() + 'static) -> Self {
        self.repaint = Some(Box::new(hook));
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    pub fn hover(&self) -> Option<WidgetId> {
        self.hover
    }

    pub fn nailed(&self) -> Option<WidgetId> {
        self.nailed
    }

    /// Register an image-backed group, replacing any group with the same name.
    pub fn add_image_group(
        &mut self,
        name: &str,
        image: ImageSource,
        axis: Axis,
        mode: GroupMode,
        border: f64,
    ) -> &mut WidgetGroup {
        self.insert_group(WidgetGroup::image(name, image, axis, mode, border))
    }

    /// Register a text-backed group, replacing any group with the same name.
    pub fn add_text_group(&mut self, name: &str, axis: Axis, mode: GroupMode, border: f64) -> &mut WidgetGroup {
        self.insert_group(WidgetGroup::text(name, axis, mode, border))
    }

    fn insert_group(&mut self, group: WidgetGroup) -> &mut WidgetGroup {
        log::debug!("Registering button group '{}' ({:?})", group.name(), group.mode);
        let index = match self.group_index(group.name()) {
            Some(index) => {
                // Handles into the old group would dangle.
                if self.hover.is_some_and(|id| id.group == index) {
                    self.hover = None;
                }
                if self.nailed.is_some_and(|id| id.group == index) {
                    self.nailed = None;
                }
                self.groups[index] = group;
                index
            }
            None => {
                self.groups.push(group);
                self.groups.len() - 1
            }
        };
        &mut self.groups[index]
    }

    fn group_index(&self, name: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.name() == name)
    }

    pub fn group(&self, name: &str) -> Option<&WidgetGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut WidgetGroup> {
        self.groups.iter_mut().find(|g| g.name() == name)
    }

    /// Groups in registration order.
    pub fn groups(&self) -> &[WidgetGroup] {
        &self.groups
    }

    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.groups.get(id.group).and_then(|g| g.widget(id.index))
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.groups.get_mut(id.group).and_then(|g| g.widget_mut(id.index))
    }

    /// Append an image cell to the named group.
    pub fn add_image_widget(
        &mut self,
        group: &str,
        index: usize,
        on_click: Option<ClickHandler>,
    ) -> Result<WidgetId, GroupError> {
        let g = self.group_index(group).ok_or_else(|| GroupError::UnknownGroup(group.to_string()))?;
        let slot = self.groups[g].add_image_widget(index, on_click)?;
        Ok(WidgetId::new(g, slot))
    }

    /// Append a text label to the named group, measured with the manager's surface and font.
    pub fn add_text_widget(
        &mut self,
        group: &str,
        text: &str,
        color: Color,
        on_click: Option<ClickHandler>,
    ) -> Result<WidgetId, GroupError> {
        let g = self.group_index(group).ok_or_else(|| GroupError::UnknownGroup(group.to_string()))?;
        let slot = self.groups[g].add_text_widget(&mut self.surface, &self.style, text, color, on_click)?;
        Ok(WidgetId::new(g, slot))
    }

    /// Cascade the named text group with the style's gutter. Returns its height.
    pub fn cascade(&mut self, group: &str, max_width: f64) -> Result<f64, GroupError> {
        let gutter = self.style.gutter;
        self.group_mut(group)
            .ok_or_else(|| GroupError::UnknownGroup(group.to_string()))?
            .cascade_with_gutter(max_width, gutter)
    }

    /// Draw every visible group.
    pub fn draw(&mut self) {
        for group in self.groups.iter().filter(|g| g.is_visible()) {
            group.draw(&mut self.surface, &self.style);
        }
    }

    fn redraw(&mut self, id: WidgetId) {
        if let Some(group) = self.groups.get(id.group) {
            group.draw_widget(id.index, &mut self.surface, &self.style);
        }
    }

    fn is_radio(&self, id: WidgetId) -> bool {
        self.groups
            .get(id.group)
            .is_some_and(|g| g.mode == GroupMode::RadioExclusive)
    }

    /// The clickable widget under `point`, searching visible groups in order.
    pub fn target_at(&self, point: Point) -> Option<WidgetId> {
        self.groups.iter().enumerate().find_map(|(g, group)| {
            if !group.is_visible() || !contains(group.bounds(), point) {
                return None;
            }
            group.hit_test(point).target().map(|index| WidgetId::new(g, index))
        })
    }

    /// Route a pointer move. Returns the widget now hovered, if any.
    pub fn pointer_move(&mut self, point: Point) -> Option<WidgetId> {
        let target = self.target_at(point);
        if target == self.hover {
            return target;
        }
        log::trace!("Hover {:?} -> {:?}", self.hover, target);

        let previous = self.hover;
        if let Some(old) = previous {
            let keep_pressed = self.is_radio(old);
            let changed = match self.widget_mut(old) {
                Some(w) if w.hovered || w.pressed => {
                    w.hovered = false;
                    w.pressed = w.pressed && keep_pressed;
                    true
                }
                _ => false,
            };
            if changed {
                self.redraw(old);
            }
        }

        if let Some(new) = target {
            if self.nailed.is_none() || self.nailed == Some(new) {
                // A press carries over from the nailed widget, or persists when
                // coming from nothing or from a radio group.
                let carry = previous.is_none() || previous.is_some_and(|p| self.is_radio(p));
                let is_nailed = self.nailed == Some(new);
                let changed = match self.widget_mut(new) {
                    Some(w) if !w.hovered => {
                        w.hovered = true;
                        w.pressed = is_nailed || (w.pressed && carry);
                        true
                    }
                    _ => false,
                };
                if changed {
                    self.redraw(new);
                }
            }
        }

        self.hover = target;
        self.repaint_check();
        target
    }

    /// Route a pointer press to the hovered widget and capture it.
    pub fn pointer_down(&mut self) {
        let Some(id) = self.hover else {
            return;
        };
        if let Some(group) = self.groups.get_mut(id.group) {
            group.pressed_down(id.index, &mut self.surface, &self.style);
        }
        self.nailed = Some(id);
        self.repaint_check();
    }

    /// Route a pointer release. Returns whether a click handler ran.
    pub fn pointer_up(&mut self) -> bool {
        let Some(id) = self.nailed.take() else {
            return false;
        };
        if let Some(group) = self.groups.get_mut(id.group) {
            group.pressed_up(id.index, &mut self.surface, &self.style);
        }
        let clicked = self.hover == Some(id) && self.widget_mut(id).is_some_and(|w| w.click());
        if clicked {
            log::debug!("Clicked widget {:?}", id);
        }
        self.repaint_check();
        clicked
    }

    fn repaint_check(&mut self) {
        if let Some(hook) = self.repaint.as_mut() {
            log::trace!("Requesting repaint");
            hook();
        }
    }
}

impl<S: Surface + std::fmt::Debug> std::fmt::Debug for WidgetManager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetManager")
            .field("surface", &self.surface)
            .field("groups", &self.groups)
            .field("hover", &self.hover)
            .field("nailed", &self.nailed)
            .finish()
    }
}
