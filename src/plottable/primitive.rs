//! Drawing-primitive records handed to the host's vector-drawing layer.
use nalgebra::Rotation2;

use crate::math::ellipse_arc::parameter_to_percent;
use crate::math::{Point2, Vector2};
use crate::style::Hsla;

/// Number of bisection steps used to invert the arc-length parameterization.
const INVERSE_STEPS: usize = 64;

/// An elliptical path drawn between two perimeter fractions.
///
/// The local ellipse has semi-axes `width / 2` along local x and
/// `height / 2` along local y. Percent 0 is the local point `(width / 2, 0)`
/// and percentages grow counter-clockwise by arc length. The local ellipse
/// is rotated by `rotation` and then moved to `translation`.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsePath {
    pub translation: Point2,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub beginning: f64,
    pub ending: f64,
    pub closed: bool,
    pub visible: bool,
    /// `None` draws no stroke.
    pub stroke: Option<Hsla>,
    pub linewidth: f64,
    pub dashes: Vec<f64>,
}

impl Default for EllipsePath {
    fn default() -> Self {
        Self {
            translation: Point2::origin(),
            width: 0.0,
            height: 0.0,
            rotation: 0.0,
            beginning: 0.0,
            ending: 0.0,
            closed: false,
            visible: true,
            stroke: None,
            linewidth: 1.0,
            dashes: Vec::new(),
        }
    }
}

impl EllipsePath {
    /// Creates an empty, visible, open path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of the perimeter that is drawn.
    #[must_use]
    pub fn drawn_fraction(&self) -> f64 {
        self.ending - self.beginning
    }

    /// Canvas point at perimeter fraction `percent` (clamped to `[0, 1]`).
    #[must_use]
    pub fn point_at(&self, percent: f64) -> Point2 {
        let rx = self.width / 2.0;
        let ry = self.height / 2.0;
        let percent = percent.clamp(0.0, 1.0);

        let (mut lo, mut hi) = (0.0, std::f64::consts::TAU);
        for _ in 0..INVERSE_STEPS {
            let mid = 0.5 * (lo + hi);
            if parameter_to_percent(rx, ry, mid) < percent {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let t = 0.5 * (lo + hi);
        let local = Vector2::new(rx * t.cos(), ry * t.sin());
        self.translation + Rotation2::new(self.rotation) * local
    }

    /// Copies the geometry (not the style) of `other`.
    pub fn copy_geometry_from(&mut self, other: &EllipsePath) {
        self.translation = other.translation;
        self.width = other.width;
        self.height = other.height;
        self.rotation = other.rotation;
        self.beginning = other.beginning;
        self.ending = other.ending;
        self.closed = other.closed;
    }
}

/// A color stop at `offset`, a fraction of the gradient radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Hsla,
}

/// Radial gradient in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point2,
    pub radius: f64,
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// Gradient from `inner` at the center to `outer` at `radius`.
    #[must_use]
    pub fn two_stop(center: Point2, radius: f64, inner: Hsla, outer: Hsla) -> Self {
        Self {
            center,
            radius,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: inner,
                },
                GradientStop {
                    offset: 1.0,
                    color: outer,
                },
            ],
        }
    }

    /// Color of the last stop.
    #[must_use]
    pub fn outer_color(&self) -> Option<Hsla> {
        self.stops.last().map(|stop| stop.color)
    }
}

/// A filled polygon whose vertices live in an anchor pool.
#[derive(Debug, Clone, PartialEq)]
pub struct FillPath {
    pub visible: bool,
    /// `None` draws no fill.
    pub fill: Option<RadialGradient>,
}

impl Default for FillPath {
    fn default() -> Self {
        Self {
            visible: true,
            fill: None,
        }
    }
}

/// A drawn path together with its highlight duplicate.
///
/// Both share the same geometry; the highlight is hidden unless the object
/// is glowing.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowingPath {
    pub drawn: EllipsePath,
    pub glowing: EllipsePath,
}

impl Default for GlowingPath {
    fn default() -> Self {
        Self {
            drawn: EllipsePath::new(),
            glowing: EllipsePath {
                visible: false,
                ..EllipsePath::new()
            },
        }
    }
}

impl GlowingPath {
    /// Sets the shared geometry and drawn range of both paths.
    pub fn set_arc(&mut self, arc: &ArcGeometry, beginning: f64, ending: f64, closed: bool) {
        let drawn = &mut self.drawn;
        drawn.translation = arc.translation;
        drawn.width = arc.width;
        drawn.height = arc.height;
        drawn.rotation = arc.rotation;
        drawn.beginning = beginning;
        drawn.ending = ending;
        drawn.closed = closed;
        self.glowing.copy_geometry_from(&self.drawn);
    }

    pub fn normal_display(&mut self) {
        self.drawn.visible = true;
        self.glowing.visible = false;
    }

    pub fn glowing_display(&mut self) {
        self.drawn.visible = true;
        self.glowing.visible = true;
    }

    pub fn hide(&mut self) {
        self.drawn.visible = false;
        self.glowing.visible = false;
    }
}

/// Placement of a projected ellipse on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcGeometry {
    pub translation: Point2,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn path(width: f64, height: f64, rotation: f64) -> EllipsePath {
        EllipsePath {
            translation: Point2::new(10.0, -5.0),
            width,
            height,
            rotation,
            ..EllipsePath::new()
        }
    }

    #[test]
    fn percent_zero_is_local_x_tip() {
        let p = path(8.0, 4.0, 0.0).point_at(0.0);
        assert!((p.x - 14.0).abs() < 1e-9);
        assert!((p.y + 5.0).abs() < 1e-9);
    }

    #[test]
    fn quarter_points_follow_rotation() {
        let e = path(8.0, 4.0, FRAC_PI_2);
        // Local (0, 2) rotated by a quarter turn is (-2, 0).
        let p = e.point_at(0.25);
        assert!((p.x - 8.0).abs() < 1e-9);
        assert!((p.y + 5.0).abs() < 1e-9);
        let q = e.point_at(0.5);
        assert!((q.x - 10.0).abs() < 1e-9);
        assert!((q.y + 9.0).abs() < 1e-9);
    }

    #[test]
    fn set_arc_updates_highlight() {
        let mut pair = GlowingPath::default();
        let arc = ArcGeometry {
            translation: Point2::new(1.0, 2.0),
            width: 3.0,
            height: 4.0,
            rotation: 0.5,
        };
        pair.set_arc(&arc, 0.1, 0.6, false);
        assert_eq!(pair.glowing.beginning, 0.1);
        assert_eq!(pair.glowing.width, 3.0);
        assert!(!pair.glowing.visible);
        pair.glowing_display();
        assert!(pair.glowing.visible && pair.drawn.visible);
        pair.hide();
        assert!(!pair.glowing.visible && !pair.drawn.visible);
    }
}
