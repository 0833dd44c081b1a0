//! Geometry helpers shared by widgets and groups.

use kurbo::{BezPath, Point, Rect, RoundedRect, Shape as KurboShape};

/// Tolerance used when flattening rounded corners into a path.
const PATH_TOLERANCE: f64 = 0.1;

/// Build a rounded rectangle path inset by `margin` on every side.
///
/// The radius is clamped by kurbo to half of the shorter side of the inset box.
pub fn rounded_rect_path(rect: Rect, margin: f64, radius: f64) -> BezPath {
    let inset = rect.inflate(-margin, -margin);
    RoundedRect::from_rect(inset, radius).to_path(PATH_TOLERANCE)
}

/// Half-open containment test: inclusive on the min edges, exclusive on the max edges.
pub fn contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x < rect.x1 && point.y >= rect.y0 && point.y < rect.y1
}
