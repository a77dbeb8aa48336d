use crate::foundation::core::{Point, Rect, Vec2};

/// Where the source image is drawn inside the viewport.
///
/// `x`/`y` is the top-left corner in viewport pixels; `width`/`height` is the rendered size,
/// which is independent of the image's native size after a zoom. Nothing here is clamped: the
/// image may leave the viewport entirely and the size may reach zero or go negative.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Transform {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pan: shift the image by `(dx, dy)`.
    pub fn moving(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Zoom by an absolute pixel amount on both axes, growing around the current center.
    pub fn scaling(&mut self, delta: f64) {
        self.width += delta;
        self.height += delta;
        self.x -= delta / 2.0;
        self.y -= delta / 2.0;
    }

    /// Like [`Transform::scaling`], but a shrinking `delta` stops once the smaller side reaches
    /// `min_size`. Growth is never limited.
    pub fn scaling_with_floor(&mut self, delta: f64, min_size: f64) {
        let smaller = self.width.min(self.height);
        let floor_delta = (min_size - smaller).min(0.0);
        let delta = if delta < 0.0 {
            delta.max(floor_delta)
        } else {
            delta
        };
        self.scaling(delta);
    }

    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The same placement moved by `offset`; used to re-project into another surface.
    pub fn offset_by(self, offset: Vec2) -> Self {
        Self {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }

    /// Whether drawing would cover any area at all.
    pub fn is_drawable(self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.x.is_finite()
            && self.y.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn bounds(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/transform.rs"]
mod tests;
