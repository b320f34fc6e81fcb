use std::f64::consts::{PI, TAU};

use crate::error::{GeometryError, Result};
use crate::math::{UnitVector3, Vector3, TOLERANCE};

use super::{CurveDomain, SphericalCurve};

/// A circle on the unit sphere.
///
/// Defined by the unit normal of its plane (equivalently, its spherical
/// center) and an angular radius in `(0, pi)`. A radius of `pi/2` is a great
/// circle, i.e. a line in spherical geometry.
///
/// `P(t) = normal * cos(radius) + sin(radius) * (cos(t) * ref_dir + sin(t) * binormal)`
/// where `binormal = normal x ref_dir`.
#[derive(Debug, Clone)]
pub struct SphericalCircle {
    normal: UnitVector3,
    radius: f64,
    ref_dir: Vector3,
}

impl SphericalCircle {
    /// Creates a new circle.
    ///
    /// # Arguments
    ///
    /// * `normal` - Normal of the circle plane (normalized here)
    /// * `radius` - Angular radius, strictly between 0 and pi
    ///
    /// # Errors
    ///
    /// Returns an error if the normal is zero-length or the radius is outside
    /// `(0, pi)`.
    pub fn new(normal: Vector3, radius: f64) -> Result<Self> {
        let normal = UnitVector3::try_new(normal, TOLERANCE).ok_or(GeometryError::ZeroVector)?;
        Self::with_unit_normal(normal, radius)
    }

    /// Creates a circle from an already normalized normal.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is outside `(0, pi)`.
    pub fn with_unit_normal(normal: UnitVector3, radius: f64) -> Result<Self> {
        if !(radius > TOLERANCE && radius < PI - TOLERANCE) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "radius",
                value: radius,
                min: 0.0,
                max: PI,
            }
            .into());
        }
        Ok(Self {
            normal,
            radius,
            ref_dir: perpendicular(&normal),
        })
    }

    /// Returns the unit normal (the spherical center).
    #[must_use]
    pub fn normal(&self) -> &UnitVector3 {
        &self.normal
    }

    /// Returns the angular radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl SphericalCurve for SphericalCircle {
    fn evaluate(&self, t: f64) -> Vector3 {
        let binormal = self.normal.cross(&self.ref_dir);
        self.normal.into_inner() * self.radius.cos()
            + (self.ref_dir * t.cos() + binormal * t.sin()) * self.radius.sin()
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }

    fn is_closed(&self) -> bool {
        true
    }
}

/// Returns a unit vector perpendicular to `normal`.
pub(crate) fn perpendicular(normal: &UnitVector3) -> Vector3 {
    let axis = if normal.x.abs() < 0.9 {
        Vector3::x()
    } else {
        Vector3::y()
    };
    normal.cross(&axis).normalize()
}
