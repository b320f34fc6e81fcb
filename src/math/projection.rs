//! Orthographic projection of circles on the unit sphere.
//!
//! A circle on the unit sphere is given by the unit normal of its plane and
//! its angular radius `r` in `(0, pi)`. Viewed along `-Z` it projects to an
//! ellipse (a segment when the plane is edge-on) centered at
//! `(n.x cos r, n.y cos r)`. The part of the circle with `z > 0` faces the
//! viewer; the silhouette is the unit circle `x^2 + y^2 = 1`.
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::debug;

use super::arc_2d::ccw_sweep;
use super::{mod_two_pi, Point2, UnitVector3, Vector2, Vector3};

/// Where a projected curve lies relative to the silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EllipsePosition {
    /// The circle's center is on the viewer side and the curve does not
    /// meet the silhouette.
    EntirelyFront,
    /// The circle's center is on the far side and the curve does not meet
    /// the silhouette.
    EntirelyBack,
    /// The curve crosses the silhouette twice.
    SplitFrontBack,
}

/// Planar description of a projected spherical circle.
///
/// The curve is `center + major_axis cos t e1 + minor_axis sin t e2` with
/// `e1 = (cos tilt, sin tilt)` and `e2 = (-sin tilt, cos tilt)`. When the
/// position is [`EllipsePosition::SplitFrontBack`], sweeping `t`
/// counter-clockwise from `front_start_angle` to `front_end_angle` traces
/// the visible arc; otherwise both angles are `0`.
///
/// For an unsplit curve the position names the hemisphere of the circle's
/// center. A circle with radius above `pi/2` therefore lies on the opposite
/// hemisphere; see [`ProjectedEllipse::curve_side`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedEllipse {
    pub center: Point2,
    pub tilt_angle: f64,
    pub major_axis: f64,
    pub minor_axis: f64,
    pub position: EllipsePosition,
    pub front_start_angle: f64,
    pub front_end_angle: f64,
}

impl ProjectedEllipse {
    /// Unit vector along the major axis.
    #[must_use]
    pub fn major_direction(&self) -> Vector2 {
        Vector2::new(self.tilt_angle.cos(), self.tilt_angle.sin())
    }

    /// Unit vector along the minor axis (major axis turned by `pi/2`).
    #[must_use]
    pub fn minor_direction(&self) -> Vector2 {
        Vector2::new(-self.tilt_angle.sin(), self.tilt_angle.cos())
    }

    /// Evaluates the projected curve at ellipse parameter `t`, in unit-sphere
    /// coordinates.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        self.center
            + self.major_direction() * (self.major_axis * t.cos())
            + self.minor_direction() * (self.minor_axis * t.sin())
    }

    /// Returns `true` if the curve crosses the silhouette.
    #[must_use]
    pub fn is_split(&self) -> bool {
        self.position == EllipsePosition::SplitFrontBack
    }

    /// Counter-clockwise parameter sweep of the front arc, in `[0, 2*pi)`.
    #[must_use]
    pub fn front_sweep(&self) -> f64 {
        ccw_sweep(self.front_start_angle, self.front_end_angle)
    }

    /// The hemisphere holding an unsplit curve of angular radius `radius`.
    ///
    /// Returns `None` for a split curve.
    #[must_use]
    pub fn curve_side(&self, radius: f64, tolerance: f64) -> Option<EllipsePosition> {
        let flipped = radius > FRAC_PI_2 + tolerance;
        match (self.position, flipped) {
            (EllipsePosition::SplitFrontBack, _) => None,
            (side, false) => Some(side),
            (EllipsePosition::EntirelyFront, true) => Some(EllipsePosition::EntirelyBack),
            (EllipsePosition::EntirelyBack, true) => Some(EllipsePosition::EntirelyFront),
        }
    }
}

/// Orthonormal in-plane frame `(u, w)` of a circle with the given normal.
///
/// `u` is horizontal and projects onto the major axis `(cos tilt, sin tilt)`;
/// `w` is chosen so that its projection points along `+e2`. A point of the
/// circle at ellipse parameter `t` is
/// `n cos r + sin r (cos t u + sin t w)`.
#[must_use]
pub fn ellipse_frame(unit_normal: &UnitVector3, tilt_angle: f64) -> (Vector3, Vector3) {
    let u = Vector3::new(tilt_angle.cos(), tilt_angle.sin(), 0.0);
    let sign = if unit_normal.z >= 0.0 { 1.0 } else { -1.0 };
    let w = unit_normal.cross(&u) * sign;
    (u, w)
}

/// Height above the view plane of the circle point at ellipse parameter `t`.
fn height_at(unit_normal: &UnitVector3, radius: f64, w: &Vector3, t: f64) -> f64 {
    unit_normal.z * radius.cos() + radius.sin() * t.sin() * w.z
}

fn hemisphere_of(unit_normal: &UnitVector3) -> EllipsePosition {
    if unit_normal.z > 0.0 {
        EllipsePosition::EntirelyFront
    } else {
        EllipsePosition::EntirelyBack
    }
}

/// Projects the circle with `unit_normal` and angular `radius` onto the view
/// plane and splits it at the silhouette.
///
/// `tolerance` governs the degenerate branches: a normal within `tolerance`
/// of `+Z` or `-Z` yields an undistorted circle about the origin (even for
/// `radius = pi/2`), and a radius within `tolerance` of `pi/2` takes the
/// great-circle branch, which always splits.
///
/// The result is unspecified, but finite, for a radius outside `(0, pi)`.
#[must_use]
pub fn projected_ellipse_data(
    unit_normal: &UnitVector3,
    radius: f64,
    tolerance: f64,
) -> ProjectedEllipse {
    let n = unit_normal.into_inner();
    let (sin_r, cos_r) = radius.sin_cos();

    if (n.z - 1.0).abs() < tolerance || (n.z + 1.0).abs() < tolerance {
        debug!(nz = n.z, radius, "projection: normal along the view axis");
        return ProjectedEllipse {
            center: Point2::origin(),
            tilt_angle: 0.0,
            major_axis: sin_r,
            minor_axis: sin_r,
            position: hemisphere_of(unit_normal),
            front_start_angle: 0.0,
            front_end_angle: 0.0,
        };
    }

    let alpha = n.z.clamp(-1.0, 1.0).acos();
    let center = Point2::new(n.x * cos_r, n.y * cos_r);
    let major_axis = sin_r;
    let minor_axis = sin_r * (FRAC_PI_2 - alpha).abs().sin();
    // `+ 0.0` turns a negative zero into zero.
    let tilt_angle = if n.y.abs() < tolerance {
        FRAC_PI_2
    } else {
        (-n.x / n.y).atan() + 0.0
    };

    let mut ellipse = ProjectedEllipse {
        center,
        tilt_angle,
        major_axis,
        minor_axis,
        position: EllipsePosition::SplitFrontBack,
        front_start_angle: 0.0,
        front_end_angle: 0.0,
    };
    let (_, w) = ellipse_frame(unit_normal, tilt_angle);

    if (radius - FRAC_PI_2).abs() < tolerance {
        // The highest point of a great circle marks the middle of its front half.
        let z_axis = Vector3::z();
        let mut highest = z_axis.cross(&n).cross(&n);
        if highest.z < 0.0 {
            highest = -highest;
        }
        let side = Vector2::new(highest.x, highest.y).dot(&ellipse.minor_direction());
        let upper_front = if side.abs() > tolerance {
            side > 0.0
        } else {
            w.z > 0.0
        };
        (ellipse.front_start_angle, ellipse.front_end_angle) =
            if upper_front { (0.0, PI) } else { (PI, TAU) };
        debug!(side, upper_front, "projection: great circle");
        return ellipse;
    }

    let misses_silhouette = alpha + radius < FRAC_PI_2
        || alpha + radius > 3.0 * FRAC_PI_2
        || (alpha - radius).abs() > FRAC_PI_2;
    if misses_silhouette {
        ellipse.position = hemisphere_of(unit_normal);
        debug!(alpha, radius, position = ?ellipse.position, "projection: unsplit");
        return ellipse;
    }

    // Tangent to the silhouette: the line `x n.x + y n.y = cos r` where the
    // circle's plane meets the view plane touches the unit circle. The curve
    // lies on the side of the point opposite the contact.
    if (n.x.hypot(n.y) - cos_r.abs()).abs() < tolerance {
        let reach = cos_r / (n.x * n.x + n.y * n.y);
        let touch = Point2::new(n.x * reach, n.y * reach);
        let contact = crossing_parameter(&ellipse, touch, tolerance);
        let curve_on_front = height_at(unit_normal, radius, &w, contact + PI) > 0.0;
        let flipped = radius > FRAC_PI_2 + tolerance;
        ellipse.position = if curve_on_front == flipped {
            EllipsePosition::EntirelyBack
        } else {
            EllipsePosition::EntirelyFront
        };
        debug!(contact, curve_on_front, "projection: tangent to the silhouette");
        return ellipse;
    }

    let (first, second) = silhouette_crossings(&n, cos_r, tolerance);
    let t1 = crossing_parameter(&ellipse, first, tolerance);
    let t2 = crossing_parameter(&ellipse, second, tolerance);

    // Of the two arcs between the crossings, the front one is higher.
    let mid_forward = t1 + ccw_sweep(t1, t2) / 2.0;
    let mid_backward = t2 + ccw_sweep(t2, t1) / 2.0;
    let forward_is_front = height_at(unit_normal, radius, &w, mid_forward)
        >= height_at(unit_normal, radius, &w, mid_backward);
    (ellipse.front_start_angle, ellipse.front_end_angle) =
        if forward_is_front { (t1, t2) } else { (t2, t1) };

    debug!(
        alpha,
        radius,
        start = ellipse.front_start_angle,
        end = ellipse.front_end_angle,
        "projection: split"
    );
    ellipse
}

/// Intersections of the plane `x n.x + y n.y = cos r` with the unit circle.
fn silhouette_crossings(n: &Vector3, cos_r: f64, tolerance: f64) -> (Point2, Point2) {
    if n.y.abs() < tolerance {
        let x = cos_r / n.x;
        let y = (1.0 - x * x).max(0.0).sqrt();
        return (Point2::new(x, y), Point2::new(x, -y));
    }
    let m = -n.x / n.y;
    let b = cos_r / n.y;
    let root = (m * m - b * b + 1.0).max(0.0).sqrt();
    let denominator = 1.0 + m * m;
    let x1 = (-m * b + root) / denominator;
    let x2 = (-m * b - root) / denominator;
    (Point2::new(x1, m * x1 + b), Point2::new(x2, m * x2 + b))
}

/// Ellipse parameter of a point on the projected curve, in `[0, 2*pi)`.
fn crossing_parameter(ellipse: &ProjectedEllipse, point: Point2, tolerance: f64) -> f64 {
    let offset = point - ellipse.center;
    let u = offset.dot(&ellipse.major_direction()) / ellipse.major_axis;
    let v = if ellipse.minor_axis > tolerance {
        offset.dot(&ellipse.minor_direction()) / ellipse.minor_axis
    } else {
        0.0
    };
    mod_two_pi(v.atan2(u))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    const EPS: f64 = 1e-9;

    fn unit(x: f64, y: f64, z: f64) -> UnitVector3 {
        UnitVector3::new_normalize(Vector3::new(x, y, z))
    }

    fn sample_normals() -> Vec<UnitVector3> {
        vec![
            unit(0.0, 0.6, 0.8),
            unit(0.3, -0.5, 0.2),
            unit(-0.7, 0.1, -0.4),
            unit(1.0, 0.0, 0.3),
            unit(0.2, 0.9, -0.1),
            unit(-0.4, -0.4, 0.8),
        ]
    }

    /// Height of the 3D circle point at parameter `t`, for checks.
    fn lifted(normal: &UnitVector3, radius: f64, tilt: f64, t: f64) -> Vector3 {
        let (u, w) = ellipse_frame(normal, tilt);
        normal.into_inner() * radius.cos() + (u * t.cos() + w * t.sin()) * radius.sin()
    }

    #[test]
    fn axis_normal_gives_circle_about_origin() {
        for r in [0.1, FRAC_PI_4, 1.2, 2.0, 3.0] {
            let e = projected_ellipse_data(&unit(0.0, 0.0, 1.0), r, EPS);
            assert_relative_eq!(e.major_axis, r.sin());
            assert_relative_eq!(e.minor_axis, r.sin());
            assert_relative_eq!(e.center.x, 0.0);
            assert_relative_eq!(e.center.y, 0.0);
            assert_eq!(e.position, EllipsePosition::EntirelyFront);
        }
    }

    #[test]
    fn scenario_cap_facing_viewer() {
        let e = projected_ellipse_data(&unit(0.0, 0.0, 1.0), FRAC_PI_4, EPS);
        assert!((e.major_axis - 0.707_106_781).abs() < 1e-8);
        assert_eq!(e.position, EllipsePosition::EntirelyFront);
        assert!(e.front_start_angle.abs() < f64::EPSILON);
        assert!(e.front_end_angle.abs() < f64::EPSILON);
    }

    #[test]
    fn great_circle_along_view_axis_is_full_silhouette() {
        // The axis branch wins over the great-circle branch.
        let front = projected_ellipse_data(&unit(0.0, 0.0, 1.0), FRAC_PI_2, EPS);
        assert_eq!(front.position, EllipsePosition::EntirelyFront);
        assert_relative_eq!(front.major_axis, 1.0);
        assert_relative_eq!(front.minor_axis, 1.0);
        let back = projected_ellipse_data(&unit(0.0, 0.0, -1.0), FRAC_PI_2, EPS);
        assert_eq!(back.position, EllipsePosition::EntirelyBack);
    }

    #[test]
    fn antipodal_normals_swap_sides() {
        for n in sample_normals() {
            for r in [0.3, 1.0, 2.5] {
                let e = projected_ellipse_data(&n, r, EPS);
                let f = projected_ellipse_data(&-n, r, EPS);
                assert_relative_eq!(e.major_axis, f.major_axis, epsilon = 1e-12);
                assert_relative_eq!(e.minor_axis, f.minor_axis, epsilon = 1e-12);
                assert_relative_eq!(e.center.x, -f.center.x, epsilon = 1e-12);
                assert_relative_eq!(e.center.y, -f.center.y, epsilon = 1e-12);
                let swapped = match e.position {
                    EllipsePosition::EntirelyFront => EllipsePosition::EntirelyBack,
                    EllipsePosition::EntirelyBack => EllipsePosition::EntirelyFront,
                    EllipsePosition::SplitFrontBack => EllipsePosition::SplitFrontBack,
                };
                assert_eq!(f.position, swapped);
            }
        }
    }

    #[test]
    fn great_circles_always_split() {
        for n in sample_normals() {
            let e = projected_ellipse_data(&n, FRAC_PI_2, EPS);
            assert_eq!(e.position, EllipsePosition::SplitFrontBack);
            let pair = (e.front_start_angle, e.front_end_angle);
            assert!(pair == (0.0, PI) || pair == (PI, TAU), "{pair:?}");
        }
    }

    #[test]
    fn great_circle_front_half_is_visible() {
        for n in sample_normals() {
            let e = projected_ellipse_data(&n, FRAC_PI_2, EPS);
            let mid = e.front_start_angle + FRAC_PI_2;
            assert!(lifted(&n, FRAC_PI_2, e.tilt_angle, mid).z > 0.0);
        }
    }

    #[test]
    fn scenario_vertical_great_circle() {
        let e = projected_ellipse_data(&unit(1.0, 0.0, 0.0), FRAC_PI_2, EPS);
        assert_eq!(e.position, EllipsePosition::SplitFrontBack);
        assert_relative_eq!(e.tilt_angle, FRAC_PI_2);
        assert!(e.minor_axis.abs() < 1e-12);
        // The front half is the one with positive height.
        let top_parameter = e.front_start_angle + FRAC_PI_2;
        let top = lifted(&unit(1.0, 0.0, 0.0), FRAC_PI_2, e.tilt_angle, top_parameter);
        assert!(top.z > 0.0);
    }

    #[test]
    fn scenario_tilted_cap_straddles_silhouette() {
        let n = unit(0.0, 0.6, 0.8);
        let r = PI / 3.0;
        let e = projected_ellipse_data(&n, r, EPS);
        assert_eq!(e.position, EllipsePosition::SplitFrontBack);
        assert_relative_eq!(e.center.y, 0.3, epsilon = 1e-12);
        assert_relative_eq!(e.minor_axis, r.sin() * 0.8, epsilon = 1e-12);
        assert!(e.front_start_angle > 0.0 && e.front_end_angle > 0.0);
        assert_relative_eq!(e.front_start_angle, 2.263_2, epsilon = 1e-3);
        assert_relative_eq!(e.front_end_angle, 0.878_4, epsilon = 1e-3);
    }

    #[test]
    fn crossings_lie_on_silhouette() {
        for n in sample_normals() {
            for r in [0.5, 1.2, 2.0, 2.8] {
                let e = projected_ellipse_data(&n, r, EPS);
                if !e.is_split() {
                    continue;
                }
                for t in [e.front_start_angle, e.front_end_angle] {
                    let p = e.point_at(t);
                    assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-9);
                    assert!(lifted(&n, r, e.tilt_angle, t).z.abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn front_arc_has_positive_height() {
        for n in sample_normals() {
            for r in [0.5, 1.2, 2.0, 2.8] {
                let e = projected_ellipse_data(&n, r, EPS);
                if !e.is_split() {
                    continue;
                }
                let sweep = e.front_sweep();
                for k in 1..10 {
                    let t = e.front_start_angle + sweep * f64::from(k) / 10.0;
                    assert!(lifted(&n, r, e.tilt_angle, t).z > 0.0, "n={n:?} r={r}");
                    let back = e.front_end_angle + (TAU - sweep) * f64::from(k) / 10.0;
                    assert!(lifted(&n, r, e.tilt_angle, back).z < 0.0, "n={n:?} r={r}");
                }
            }
        }
    }

    #[test]
    fn projection_matches_lifted_circle() {
        for n in sample_normals() {
            for r in [0.5, 1.2, 2.8] {
                let e = projected_ellipse_data(&n, r, EPS);
                for k in 0..8 {
                    let t = f64::from(k) * 0.8;
                    let p = e.point_at(t);
                    let q = lifted(&n, r, e.tilt_angle, t);
                    assert_relative_eq!(p.x, q.x, epsilon = 1e-12);
                    assert_relative_eq!(p.y, q.y, epsilon = 1e-12);
                    // Every lifted point lies on the sphere and in the circle's plane.
                    assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-12);
                    assert_relative_eq!(q.dot(&n.into_inner()), r.cos(), epsilon = 1e-12);
                }
            }
        }
    }

    #[test]
    fn unsplit_curve_side() {
        // Small cap around +Z: curve on front.
        let e = projected_ellipse_data(&unit(0.1, 0.1, 1.0), 0.3, EPS);
        assert_eq!(e.position, EllipsePosition::EntirelyFront);
        assert_eq!(e.curve_side(0.3, EPS), Some(EllipsePosition::EntirelyFront));
        // Large cap around +Z: the curve itself is on the back.
        let f = projected_ellipse_data(&unit(0.1, 0.1, 1.0), 2.8, EPS);
        assert_eq!(f.position, EllipsePosition::EntirelyFront);
        assert_eq!(f.curve_side(2.8, EPS), Some(EllipsePosition::EntirelyBack));
        assert!(lifted(&unit(0.1, 0.1, 1.0), 2.8, f.tilt_angle, 1.0).z < 0.0);
    }

    #[test]
    fn circle_touching_the_silhouette_is_not_split() {
        let touch = FRAC_PI_2 - 0.8_f64.acos();

        // Cap centered 0.6435 rad above the silhouette with a matching radius.
        for n in [unit(0.0, 0.6, 0.8), unit(0.6, 0.0, 0.8), unit(0.36, 0.48, 0.8)] {
            let e = projected_ellipse_data(&n, touch, EPS);
            assert_eq!(e.position, EllipsePosition::EntirelyFront);
            assert_eq!(e.curve_side(touch, EPS), Some(EllipsePosition::EntirelyFront));
            assert_eq!((e.front_start_angle, e.front_end_angle), (0.0, 0.0));
        }
        let e = projected_ellipse_data(&unit(0.0, 0.8, 0.6), FRAC_PI_2 - 0.6_f64.acos(), EPS);
        assert_eq!(e.position, EllipsePosition::EntirelyFront);

        // Mirrored behind the sphere.
        let e = projected_ellipse_data(&unit(0.0, 0.6, -0.8), touch, EPS);
        assert_eq!(e.position, EllipsePosition::EntirelyBack);

        // A large cap centered behind whose curve touches from the front.
        let large = FRAC_PI_2 + 0.8_f64.acos();
        let e = projected_ellipse_data(&unit(0.0, 0.6, -0.8), large, EPS);
        assert_eq!(e.position, EllipsePosition::EntirelyBack);
        assert_eq!(e.curve_side(large, EPS), Some(EllipsePosition::EntirelyFront));
        assert!(lifted(&unit(0.0, 0.6, -0.8), large, e.tilt_angle, 1.0).z > -EPS);
    }

    #[test]
    fn axes_are_ordered_and_tilt_in_range() {
        for n in sample_normals() {
            for r in [0.2, 1.0, FRAC_PI_2, 2.5] {
                let e = projected_ellipse_data(&n, r, EPS);
                assert!(e.major_axis >= e.minor_axis);
                assert!(e.minor_axis >= 0.0);
                assert!(e.tilt_angle > -FRAC_PI_2 && e.tilt_angle <= FRAC_PI_2);
            }
        }
    }
}
