//! antvis Core Library
//!
//! Button and widget-group layer of the antvis replay visualizer: widgets drawn
//! onto an abstract 2D surface, with hover, press and radio-group semantics
//! driven by pointer coordinates delivered by the host.

pub mod geometry;
pub mod group;
pub mod manager;
pub mod style;
pub mod surface;
pub mod widget;

pub use geometry::{contains, rounded_rect_path};
pub use group::{Axis, DEFAULT_GUTTER, GroupError, GroupKind, GroupMode, HitResult, Slot, Spacer, WidgetGroup};
pub use manager::{RepaintHook, WidgetId, WidgetManager};
pub use style::{ButtonStyle, ConfigError, FontSpec, RgbaColor};
pub use surface::{DrawCommand, ImageSource, RecordingSurface, Shadow, Surface};
pub use widget::{ClickHandler, Face, Frame, ImageFace, TextFace, Widget, WidgetFace};
