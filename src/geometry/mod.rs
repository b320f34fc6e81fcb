mod great_arc;
mod spherical_circle;

pub use great_arc::GreatCircleArc;
pub use spherical_circle::SphericalCircle;

use crate::math::Vector3;

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }
}

/// Trait for parametric curves on the unit sphere.
///
/// Parameters are angles about the curve's normal, so evaluation is total.
pub trait SphericalCurve {
    /// Evaluates the curve at parameter `t`, returning a unit vector.
    fn evaluate(&self, t: f64) -> Vector3;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;
}
