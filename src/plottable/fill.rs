//! Front and back fill polygons of a circle.
//!
//! The region inside a circle's cap is cut by the silhouette into a front
//! part and a back part. Each part is traced as one closed polygon out of
//! the circle's [`AnchorPool`]: curve samples, plus silhouette samples where
//! the region touches the silhouette.
use std::f64::consts::TAU;

use tracing::debug;

use crate::math::arc_2d::{
    angle_in_arc_range, boundary_arc_points, ccw_sweep, nearest_ring_index,
};
use crate::math::{mod_two_pi, Point2};

use super::{AnchorPool, Side};

/// Shape of the fill regions for one display update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillCase {
    /// Curve wholly on the front, cap at most a hemisphere: the front fill
    /// is the curve itself.
    FrontCap,
    /// Curve wholly on the back, cap at most a hemisphere.
    BackCap,
    /// Curve crosses the silhouette: each fill is its half of the curve
    /// closed along the silhouette.
    Split,
    /// Curve wholly on the back, cap larger than a hemisphere: the front
    /// fill is the whole disk and the back fill is the disk with the curve's
    /// interior cut out.
    BackAnnulus,
    /// Curve wholly on the front, cap larger than a hemisphere.
    FrontAnnulus,
}

impl FillCase {
    /// Selects the case from the side holding an unsplit curve (`None` when
    /// split) and whether the cap is larger than a hemisphere.
    #[must_use]
    pub fn select(curve_side: Option<Side>, larger_than_hemisphere: bool) -> Self {
        match (curve_side, larger_than_hemisphere) {
            (None, _) => Self::Split,
            (Some(Side::Front), false) => Self::FrontCap,
            (Some(Side::Back), false) => Self::BackCap,
            (Some(Side::Back), true) => Self::BackAnnulus,
            (Some(Side::Front), true) => Self::FrontAnnulus,
        }
    }
}

/// Point data the fills are built from, all in canvas coordinates.
#[derive(Debug, Clone, Copy)]
pub struct FillSources<'a> {
    /// Curve samples on the front, in drawing order.
    pub front: &'a [Point2],
    /// Curve samples on the back, in drawing order.
    pub back: &'a [Point2],
    /// Silhouette ring, counter-clockwise from angle 0.
    pub ring: &'a [Point2],
    pub boundary_radius: f64,
    /// Polar angle of the cap center's projection; the silhouette arc that
    /// closes a split fill passes through it.
    pub cap_direction: f64,
    /// Number of silhouette samples used to close a split fill.
    pub seam_points: usize,
}

/// Rebuilds the front and back fills in `pool`.
///
/// Every anchor is first returned to spare storage; anchors the case does not
/// need stay there.
pub fn stitch_fills(pool: &mut AnchorPool, case: FillCase, sources: &FillSources<'_>) {
    pool.reclaim();
    match case {
        FillCase::FrontCap => {
            pool.extend(Side::Front, sources.front.iter().copied());
        }
        FillCase::BackCap => {
            pool.extend(Side::Back, sources.back.iter().copied());
        }
        FillCase::Split => {
            let seam = silhouette_seam(sources);
            pool.extend(Side::Front, sources.front.iter().copied().chain(seam.clone()));
            pool.extend(Side::Back, sources.back.iter().copied().chain(seam.rev()));
        }
        FillCase::BackAnnulus => {
            pool.extend(Side::Front, disk(sources.ring));
            pool.extend(Side::Back, annulus(sources.ring, sources.back));
        }
        FillCase::FrontAnnulus => {
            pool.extend(Side::Back, disk(sources.ring));
            pool.extend(Side::Front, annulus(sources.ring, sources.front));
        }
    }
    debug!(
        ?case,
        front = pool.ids(Side::Front).len(),
        back = pool.ids(Side::Back).len(),
        spare = pool.spare_len(),
        "fills stitched"
    );
}

/// Silhouette samples from the last front sample back to the first, along
/// the arc inside the cap. Empty without front samples.
fn silhouette_seam(sources: &FillSources<'_>) -> impl DoubleEndedIterator<Item = Point2> + Clone {
    let (from, sweep, count) = match (sources.front.first(), sources.front.last()) {
        (Some(first), Some(last)) => {
            let from = mod_two_pi(last.y.atan2(last.x));
            let to = mod_two_pi(first.y.atan2(first.x));
            let width = ccw_sweep(from, to);
            let sweep = if angle_in_arc_range(sources.cap_direction, from, width) {
                width
            } else {
                -(TAU - width)
            };
            (from, sweep, sources.seam_points)
        }
        _ => (0.0, 0.0, 0),
    };
    boundary_arc_points(sources.boundary_radius, from, sweep, count)
}

/// Every other ring point, clockwise.
fn disk(ring: &[Point2]) -> impl Iterator<Item = Point2> + '_ {
    ring.iter().rev().step_by(2).copied()
}

/// The ring clockwise from the point nearest the first curve sample, a
/// bridge to the curve, the curve, and a bridge back. Empty without curve
/// samples.
fn annulus<'a>(ring: &'a [Point2], curve: &'a [Point2]) -> impl Iterator<Item = Point2> + 'a {
    let count = ring.len();
    let start = curve.first().copied();
    let j0 = start.map_or(0, |p| nearest_ring_index(&p, count));
    let outer = if start.is_some() { count / 2 } else { 0 };
    let bridge = start.and(ring.get(j0).copied());
    (0..outer)
        .map(move |i| ring[(j0 + count - (2 * i) % count) % count])
        .chain(bridge)
        .chain(curve.iter().copied())
        .chain(start)
}
