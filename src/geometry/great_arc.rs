use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{UnitVector3, Vector3, TOLERANCE};

use super::{CurveDomain, SphericalCurve};

/// An arc of a great circle (a spherical segment).
///
/// Starts at `start` and turns counter-clockwise about `normal` by
/// `arc_length` radians, which lies in `(0, 2*pi)`.
///
/// `P(t) = cos(t) * start + sin(t) * (normal x start)` for `t` in `[0, arc_length]`.
#[derive(Debug, Clone)]
pub struct GreatCircleArc {
    start: UnitVector3,
    normal: UnitVector3,
    arc_length: f64,
}

impl GreatCircleArc {
    /// Creates a new arc.
    ///
    /// # Arguments
    ///
    /// * `start` - Start point on the sphere (normalized here)
    /// * `normal` - Normal of the great circle (must be perpendicular to `start`)
    /// * `arc_length` - Angular length, strictly between 0 and 2*pi
    ///
    /// # Errors
    ///
    /// Returns an error if either vector is zero-length, the normal is not
    /// perpendicular to the start, or the length is out of range.
    pub fn new(start: Vector3, normal: Vector3, arc_length: f64) -> Result<Self> {
        let start = UnitVector3::try_new(start, TOLERANCE).ok_or(GeometryError::ZeroVector)?;
        let normal = UnitVector3::try_new(normal, TOLERANCE).ok_or(GeometryError::ZeroVector)?;

        if start.dot(&normal.into_inner()).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "segment normal must be perpendicular to its start".into(),
            )
            .into());
        }

        if !(arc_length > TOLERANCE && arc_length < TAU - TOLERANCE) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "arc_length",
                value: arc_length,
                min: 0.0,
                max: TAU,
            }
            .into());
        }

        Ok(Self {
            start,
            normal,
            arc_length,
        })
    }

    /// Creates the shorter arc between two points.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide or are antipodal, since the
    /// great circle through them is then not unique.
    pub fn between(start: Vector3, end: Vector3) -> Result<Self> {
        let normal = start.cross(&end);
        if normal.norm() < TOLERANCE {
            return Err(GeometryError::Degenerate(
                "segment endpoints must be distinct and not antipodal".into(),
            )
            .into());
        }
        let arc_length = start.angle(&end);
        Self::new(start, normal, arc_length)
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &UnitVector3 {
        &self.start
    }

    /// Returns the unit normal of the supporting great circle.
    #[must_use]
    pub fn normal(&self) -> &UnitVector3 {
        &self.normal
    }

    /// Returns the angular length.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.arc_length
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> Vector3 {
        self.evaluate(self.arc_length)
    }
}

impl SphericalCurve for GreatCircleArc {
    fn evaluate(&self, t: f64) -> Vector3 {
        let binormal = self.normal.cross(&self.start);
        self.start.into_inner() * t.cos() + binormal * t.sin()
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, self.arc_length)
    }

    fn is_closed(&self) -> bool {
        false
    }
}
