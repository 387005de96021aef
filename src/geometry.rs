//! Element geometry: rotation, rotated bounds, and viewport/scene coordinate
//! conversion.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Position, size and rotation (radians, clockwise in screen space) of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub angle: f64,
}

impl ElementBox {
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    fn spanning(points: &[Point]) -> Self {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }
}

/// Rotate `point` around `center` by `angle` radians.
pub fn rotate(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(dx * cos - dy * sin + center.x, dx * sin + dy * cos + center.y)
}

/// Box spanned by the element's top-left and bottom-right corners after rotation.
///
/// This is the placement box the drawing engine expects for rotated
/// elements. For the box enclosing every corner use [`rotated_bounding_box`].
pub fn rotated_dimensions(element: &ElementBox) -> Bounds {
    if element.angle == 0.0 {
        return Bounds {
            x: element.x,
            y: element.y,
            width: element.width,
            height: element.height,
        };
    }
    let center = element.center();
    let top_left = rotate(Point::new(element.x, element.y), center, element.angle);
    let bottom_right = rotate(
        Point::new(element.x + element.width, element.y + element.height),
        center,
        element.angle,
    );
    Bounds::spanning(&[top_left, bottom_right])
}

/// Axis-aligned bounding box of all four corners after rotation.
pub fn rotated_bounding_box(element: &ElementBox) -> Bounds {
    let center = element.center();
    let (x1, y1) = (element.x, element.y);
    let (x2, y2) = (element.x + element.width, element.y + element.height);
    let corners = [
        Point::new(x1, y1),
        Point::new(x2, y1),
        Point::new(x2, y2),
        Point::new(x1, y2),
    ]
    .map(|p| rotate(p, center, element.angle));
    Bounds::spanning(&corners)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zoom {
    pub value: f64,
    #[serde(default)]
    pub translation: Point,
}

impl Default for Zoom {
    fn default() -> Self {
        Self {
            value: 1.0,
            translation: Point::default(),
        }
    }
}

/// Pan/zoom state of the canvas and its offset inside the page
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub zoom: Zoom,
    pub offset_left: f64,
    pub offset_top: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

/// Convert a pointer position in client (viewport) pixels to scene coordinates.
pub fn viewport_coords_to_scene_coords(client: Point, viewport: &Viewport) -> Point {
    let inv_scale = 1.0 / viewport.zoom.value;
    let x = (client.x - viewport.zoom.translation.x - viewport.offset_left) * inv_scale
        - viewport.scroll_x;
    let y = (client.y - viewport.zoom.translation.y - viewport.offset_top) * inv_scale
        - viewport.scroll_y;
    Point::new(x, y)
}

/// Inverse of [`viewport_coords_to_scene_coords`].
pub fn scene_coords_to_viewport_coords(scene: Point, viewport: &Viewport) -> Point {
    let scale = viewport.zoom.value;
    let x = (scene.x + viewport.scroll_x) * scale
        + viewport.zoom.translation.x
        + viewport.offset_left;
    let y = (scene.y + viewport.scroll_y) * scale
        + viewport.zoom.translation.y
        + viewport.offset_top;
    Point::new(x, y)
}
