//! Arc-length parameterization of ellipses.
//!
//! Drawing primitives address a curve by the fraction of its perimeter
//! (`beginning`/`ending` in `[0, 1]`), while the projection reports angles.
//! The functions here convert between the two for an axis-aligned ellipse
//! `x = a cos t`, `y = b sin t`.
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::warn;

use super::TOLERANCE;

/// Number of Simpson subdivisions used for partial arc lengths (must be even).
const SIMPSON_SUBDIVISIONS: usize = 10;

/// Maximum number of Gauss–Kummer terms summed for the perimeter.
const PERIMETER_TERMS: usize = 40;

/// Returns the perimeter of the ellipse with semi-axes `a` and `b`.
///
/// Uses the Gauss–Kummer series
/// `pi (a + b) sum_n (binom(1/2, n))^2 h^n` with `h = ((a - b) / (a + b))^2`,
/// truncated once terms stop contributing.
#[must_use]
pub fn ellipse_perimeter(a: f64, b: f64) -> f64 {
    let sum = a + b;
    if sum <= 0.0 {
        return 0.0;
    }
    let h = ((a - b) / sum).powi(2);

    let mut total = 1.0;
    let mut coefficient = 1.0; // binom(1/2, n)
    let mut h_power = 1.0;
    for n in 1..PERIMETER_TERMS {
        #[allow(clippy::cast_precision_loss)]
        let n = n as f64;
        coefficient *= (0.5 - (n - 1.0)) / n;
        h_power *= h;
        let term = coefficient * coefficient * h_power;
        total += term;
        if term < f64::EPSILON * total {
            break;
        }
    }
    PI * sum * total
}

/// Speed of the parameterization `(a cos t, b sin t)`.
fn speed(a: f64, b: f64, t: f64) -> f64 {
    let (sin, cos) = t.sin_cos();
    (a * a * sin * sin + b * b * cos * cos).sqrt()
}

/// Arc length from parameter 0 to `t` by composite Simpson's rule.
fn partial_arc_length(a: f64, b: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let h = t / SIMPSON_SUBDIVISIONS as f64;
    let mut sum = speed(a, b, 0.0) + speed(a, b, t);
    for i in 1..SIMPSON_SUBDIVISIONS {
        #[allow(clippy::cast_precision_loss)]
        let x = i as f64 * h;
        let weight = if i % 2 == 1 { 4.0 } else { 2.0 };
        sum += weight * speed(a, b, x);
    }
    sum * h / 3.0
}

/// Maps a polar angle in the first quadrant to the curve parameter.
fn polar_to_parameter(a: f64, b: f64, theta: f64) -> f64 {
    if b < TOLERANCE {
        // A flattened ellipse: every point off the x-axis is at t = pi/2.
        return if theta < TOLERANCE { 0.0 } else { FRAC_PI_2 };
    }
    ((a / b) * theta.tan()).atan()
}

/// Converts a polar angle to the fraction of the ellipse perimeter swept
/// counter-clockwise from angle 0.
///
/// `a` is the semi-axis along x, `b` along y, and `angle` is the polar angle
/// of the point as seen from the ellipse center, in `[0, 2*pi]`. The result
/// is exact at the quadrant boundaries, equals `angle / 2*pi` for a circle,
/// and is non-decreasing in `angle`.
///
/// Angles outside `[0, 2*pi]` by more than [`TOLERANCE`] are reported with a
/// warning and yield `0`, so a bad angle produces a wrong arc instead of a
/// failed render.
#[must_use]
pub fn convert_ellipse_angle_to_percent(a: f64, b: f64, angle: f64) -> f64 {
    if !(-TOLERANCE..=TAU + TOLERANCE).contains(&angle) {
        warn!(angle, a, b, "ellipse angle outside [0, 2pi]; using 0");
        return 0.0;
    }
    let angle = angle.clamp(0.0, TAU);

    let scaled = angle / FRAC_PI_2;
    let nearest = scaled.round();
    if (scaled - nearest).abs() < TOLERANCE {
        return nearest * 0.25;
    }

    let perimeter = ellipse_perimeter(a, b);
    if perimeter <= 0.0 {
        return angle / TAU;
    }
    let quarter = perimeter / 4.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let quadrant = scaled.floor() as usize;
    #[allow(clippy::cast_precision_loss)]
    let reduced = angle - quadrant as f64 * FRAC_PI_2;
    #[allow(clippy::cast_precision_loss)]
    let base = quadrant as f64 * 0.25;

    // Odd quadrants are mirror images: measure back from the next axis.
    let (theta, mirrored) = if quadrant % 2 == 0 {
        (reduced, false)
    } else {
        (FRAC_PI_2 - reduced, true)
    };
    let t = polar_to_parameter(a, b, theta);
    let arc = partial_arc_length(a, b, t).min(quarter);

    if mirrored {
        base + 0.25 - arc / perimeter
    } else {
        base + arc / perimeter
    }
}

/// Converts an ellipse-parameter angle `t` to the polar angle of the point
/// `(a cos t, b sin t)`, in `[0, 2*pi]`.
///
/// Both angles share quadrants, so a full turn `t = 2*pi` maps to `2*pi`.
#[must_use]
pub fn parameter_to_polar_angle(a: f64, b: f64, t: f64) -> f64 {
    if (t - TAU).abs() < TOLERANCE {
        return TAU;
    }
    super::mod_two_pi((b * t.sin()).atan2(a * t.cos()))
}

/// Fraction of the perimeter swept counter-clockwise from parameter 0 to
/// parameter `t`.
///
/// A flattened ellipse (one semi-axis below [`TOLERANCE`]) is treated as
/// the segment traced out and back along the other axis.
#[must_use]
pub fn parameter_to_percent(a: f64, b: f64, t: f64) -> f64 {
    if a < TOLERANCE || b < TOLERANCE {
        return flattened_percent(a, b, t);
    }
    convert_ellipse_angle_to_percent(a, b, parameter_to_polar_angle(a, b, t))
}

fn flattened_percent(a: f64, b: f64, t: f64) -> f64 {
    let t = t.clamp(0.0, TAU);
    if a < TOLERANCE && b < TOLERANCE {
        return t / TAU;
    }
    if b < TOLERANCE {
        return if t <= PI {
            (1.0 - t.cos()) / 4.0
        } else {
            0.5 + (1.0 + t.cos()) / 4.0
        };
    }
    let sin = t.sin();
    match (t / FRAC_PI_2).floor() {
        q if q < 1.0 => sin / 4.0,
        q if q < 2.0 => 0.25 + (1.0 - sin) / 4.0,
        q if q < 3.0 => 0.5 - sin / 4.0,
        _ => 0.75 + (1.0 + sin) / 4.0,
    }
}
