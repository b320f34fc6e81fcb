//! 2D circular-arc utilities for the silhouette (boundary) circle.
//!
//! Angles are polar angles about the origin of the canvas, in radians.
//! A positive sweep is counter-clockwise, a negative sweep clockwise.
use std::f64::consts::TAU;

use super::{mod_two_pi, Point2};

/// Returns the counter-clockwise sweep from `from` to `to`, in `[0, 2*pi)`.
#[must_use]
pub fn ccw_sweep(from: f64, to: f64) -> f64 {
    mod_two_pi(to - from)
}

/// Returns whether `angle` lies on the arc that starts at `start_angle` and
/// sweeps by `sweep` (either direction).
#[must_use]
pub fn angle_in_arc_range(angle: f64, start_angle: f64, sweep: f64) -> bool {
    let eps = 1e-10;
    if sweep >= 0.0 {
        let delta = ccw_sweep(start_angle, angle);
        delta <= sweep + eps || delta >= TAU - eps
    } else {
        let delta = ccw_sweep(angle, start_angle);
        delta <= -sweep + eps || delta >= TAU - eps
    }
}

/// Evaluates a point on an arc at parameter `t` in `[0, 1]`.
#[must_use]
pub fn arc_point_at(center: Point2, radius: f64, start_angle: f64, sweep: f64, t: f64) -> Point2 {
    let angle = start_angle + sweep * t;
    Point2::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

/// Samples `count` points strictly inside an arc of the circle of `radius`
/// about the origin.
///
/// Consecutive samples, and the first and last sample and their neighbouring
/// arc endpoint, are separated by the same angle `sweep / (count + 1)`; the
/// endpoints themselves are not returned.
pub fn boundary_arc_points(
    radius: f64,
    start_angle: f64,
    sweep: f64,
    count: usize,
) -> impl DoubleEndedIterator<Item = Point2> + ExactSizeIterator + Clone {
    #[allow(clippy::cast_precision_loss)]
    let steps = (count + 1) as f64;
    (0..count).map(move |i| {
        #[allow(clippy::cast_precision_loss)]
        let t = (i + 1) as f64 / steps;
        arc_point_at(Point2::origin(), radius, start_angle, sweep, t)
    })
}

/// Samples the full circle of `radius` about the origin with `count`
/// evenly spaced points, counter-clockwise from angle 0.
#[must_use]
pub fn boundary_ring(radius: f64, count: usize) -> Vec<Point2> {
    #[allow(clippy::cast_precision_loss)]
    let steps = count as f64;
    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / steps;
            arc_point_at(Point2::origin(), radius, 0.0, TAU, t)
        })
        .collect()
}

/// Index of the ring sample (as produced by [`boundary_ring`]) whose angle is
/// closest to the polar angle of `point`.
#[must_use]
pub fn nearest_ring_index(point: &Point2, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let angle = mod_two_pi(point.y.atan2(point.x));
    #[allow(clippy::cast_precision_loss)]
    let step = TAU / count as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (angle / step).round() as usize;
    index % count
}
