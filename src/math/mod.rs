pub mod arc_2d;
pub mod ellipse_arc;
#[cfg(test)]
pub(crate) mod polygon_2d;
pub mod projection;

use std::f64::consts::TAU;

/// 2D point type (canvas coordinates).
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type (directions on and around the unit sphere).
pub type Vector3 = nalgebra::Vector3<f64>;

/// Unit-length 3D vector.
pub type UnitVector3 = nalgebra::Unit<Vector3>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Reduces an angle to `[0, 2*pi)`.
#[must_use]
pub fn mod_two_pi(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if reduced >= TAU {
        0.0
    } else {
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn mod_two_pi_wraps_negative() {
        assert!((mod_two_pi(-PI / 2.0) - 1.5 * PI).abs() < 1e-12);
    }

    #[test]
    fn mod_two_pi_maps_full_turn_to_zero() {
        assert!(mod_two_pi(TAU).abs() < 1e-12);
        assert!(mod_two_pi(-1e-18) < TAU);
    }
}
