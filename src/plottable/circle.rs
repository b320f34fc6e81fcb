use std::f64::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;

use tracing::trace;

use crate::geometry::SphericalCircle;
use crate::math::arc_2d::boundary_ring;
use crate::math::ellipse_arc::parameter_to_percent;
use crate::math::projection::{projected_ellipse_data, EllipsePosition, ProjectedEllipse};
use crate::math::{mod_two_pi, Point2, UnitVector3, Vector3};
use crate::settings::{RenderSettings, Settings, ShapeKind};
use crate::style::DisplayStyle;

use super::fill::{stitch_fills, FillSources};
use super::primitive::{ArcGeometry, FillPath, GlowingPath};
use super::{AnchorPool, FillCase, Plottable, Side, Styling};

/// Renderer of a spherical circle: a front and a back elliptical arc and a
/// front and a back fill polygon.
///
/// The setters only store the new geometry; call
/// [`Plottable::update_display`] to rebuild the primitives.
#[derive(Debug, Clone)]
pub struct Circle {
    center_vector: UnitVector3,
    circle_radius: f64,
    front: GlowingPath,
    back: GlowingPath,
    front_fill: FillPath,
    back_fill: FillPath,
    pool: AnchorPool,
    ring: Vec<Point2>,
    samples: CurveSamples,
    fill_case: FillCase,
    styling: Styling,
}

impl Circle {
    /// Creates a renderer for `circle`, drawn with the default style.
    ///
    /// `settings` is expected to have passed [`Settings::validate`].
    #[must_use]
    pub fn new(circle: &SphericalCircle, settings: Rc<Settings>) -> Self {
        let render = settings.render;
        let mut this = Self {
            center_vector: *circle.normal(),
            circle_radius: circle.radius(),
            front: GlowingPath::default(),
            back: GlowingPath::default(),
            front_fill: FillPath::default(),
            back_fill: FillPath::default(),
            pool: AnchorPool::new(render.pool_size()),
            ring: boundary_ring(render.boundary_radius, render.ring_points()),
            samples: CurveSamples::with_capacity(render.num_points),
            fill_case: FillCase::FrontCap,
            styling: Styling::new(ShapeKind::Circle, settings),
        };
        this.update_display();
        this.stylize(DisplayStyle::ApplyCurrentVariables);
        this.adjust_size(this.styling.zoom());
        this
    }

    #[must_use]
    pub fn center_vector(&self) -> &UnitVector3 {
        &self.center_vector
    }

    pub fn set_center_vector(&mut self, center: UnitVector3) {
        self.center_vector = center;
    }

    #[must_use]
    pub fn circle_radius(&self) -> f64 {
        self.circle_radius
    }

    /// Stores the angular radius; expected in `(0, pi)`.
    pub fn set_circle_radius(&mut self, radius: f64) {
        self.circle_radius = radius;
    }

    #[must_use]
    pub fn front(&self) -> &GlowingPath {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &GlowingPath {
        &self.back
    }

    #[must_use]
    pub fn front_fill(&self) -> &FillPath {
        &self.front_fill
    }

    #[must_use]
    pub fn back_fill(&self) -> &FillPath {
        &self.back_fill
    }

    /// Vertices of the front fill polygon.
    #[must_use]
    pub fn front_fill_points(&self) -> Vec<Point2> {
        self.pool.points(Side::Front)
    }

    /// Vertices of the back fill polygon.
    #[must_use]
    pub fn back_fill_points(&self) -> Vec<Point2> {
        self.pool.points(Side::Back)
    }

    #[must_use]
    pub fn pool(&self) -> &AnchorPool {
        &self.pool
    }

    /// Fill case chosen by the last display update.
    #[must_use]
    pub fn fill_case(&self) -> FillCase {
        self.fill_case
    }
}

fn side_of(position: EllipsePosition) -> Option<Side> {
    match position {
        EllipsePosition::EntirelyFront => Some(Side::Front),
        EllipsePosition::EntirelyBack => Some(Side::Back),
        EllipsePosition::SplitFrontBack => None,
    }
}

/// Perimeter fraction covered by the front arc.
fn front_share(ellipse: &ProjectedEllipse) -> f64 {
    let (a, b) = (ellipse.major_axis, ellipse.minor_axis);
    let start = parameter_to_percent(a, b, ellipse.front_start_angle);
    let end = parameter_to_percent(a, b, ellipse.front_end_angle);
    if end >= start {
        end - start
    } else {
        1.0 - (start - end)
    }
}

/// Curve samples in canvas coordinates, reused across display updates.
#[derive(Debug, Clone, Default)]
struct CurveSamples {
    front: Vec<Point2>,
    back: Vec<Point2>,
}

impl CurveSamples {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            front: Vec::with_capacity(capacity),
            back: Vec::with_capacity(capacity),
        }
    }

    /// Resamples the curve with `num_points` points in total.
    ///
    /// A split curve gives each side a share proportional to its arc length,
    /// at least two points, both crossings included on both sides.
    fn resample(
        &mut self,
        ellipse: &ProjectedEllipse,
        curve_side: Option<Side>,
        share: f64,
        render: &RenderSettings,
    ) {
        let n = render.num_points;
        let scale = render.boundary_radius;
        self.front.clear();
        self.back.clear();
        match curve_side {
            None => {
                #[allow(
                    clippy::cast_precision_loss,
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss
                )]
                let rounded = (n as f64 * share).round() as usize;
                let front_count = rounded.clamp(2, n.saturating_sub(2).max(2));
                let back_count = n.saturating_sub(front_count);
                let sweep = ellipse.front_sweep();
                let (start, end) = (ellipse.front_start_angle, ellipse.front_end_angle);
                self.front.extend(sample_arc(ellipse, scale, start, sweep, front_count));
                self.back.extend(sample_arc(ellipse, scale, end, TAU - sweep, back_count));
            }
            Some(side) => {
                let target = match side {
                    Side::Front => &mut self.front,
                    Side::Back => &mut self.back,
                };
                #[allow(clippy::cast_precision_loss)]
                target.extend((0..n).map(|i| {
                    let t = TAU * i as f64 / n as f64;
                    Point2::from(ellipse.point_at(t).coords * scale)
                }));
            }
        }
    }
}

/// `count` canvas points from parameter `from` over `sweep`, both ends
/// included.
fn sample_arc(
    ellipse: &ProjectedEllipse,
    scale: f64,
    from: f64,
    sweep: f64,
    count: usize,
) -> impl Iterator<Item = Point2> + '_ {
    #[allow(clippy::cast_precision_loss)]
    let steps = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |i| {
        #[allow(clippy::cast_precision_loss)]
        let t = from + sweep * i as f64 / steps;
        Point2::from(ellipse.point_at(t).coords * scale)
    })
}

impl Plottable for Circle {
    fn update_display(&mut self) {
        let render = self.styling.settings().render;
        let ellipse =
            projected_ellipse_data(&self.center_vector, self.circle_radius, render.tolerance);
        let scale = render.boundary_radius;

        // The primitives put the minor axis on local x, so an arc centered on
        // parameter pi/2 is centered on percent 1/2 after turning by -pi/2.
        let front_up = !ellipse.is_split()
            || (ellipse.front_start_angle + ellipse.front_sweep() / 2.0).sin() > 0.0;
        let (front_rotation, back_rotation) = if front_up {
            (ellipse.tilt_angle - FRAC_PI_2, ellipse.tilt_angle + FRAC_PI_2)
        } else {
            (ellipse.tilt_angle + FRAC_PI_2, ellipse.tilt_angle - FRAC_PI_2)
        };
        let arc = |rotation| ArcGeometry {
            translation: Point2::from(ellipse.center.coords * scale),
            width: 2.0 * ellipse.minor_axis * scale,
            height: 2.0 * ellipse.major_axis * scale,
            rotation,
        };

        let curve_side = ellipse
            .curve_side(self.circle_radius, render.tolerance)
            .and_then(side_of);
        let share = match curve_side {
            None => {
                let share = front_share(&ellipse);
                self.front
                    .set_arc(&arc(front_rotation), 0.5 - share / 2.0, 0.5 + share / 2.0, false);
                self.back
                    .set_arc(&arc(back_rotation), share / 2.0, 1.0 - share / 2.0, false);
                share
            }
            Some(side) => {
                let on_front = side == Side::Front;
                let (front_end, back_end) = if on_front { (1.0, 0.0) } else { (0.0, 1.0) };
                self.front
                    .set_arc(&arc(front_rotation), 0.0, front_end, on_front);
                self.back
                    .set_arc(&arc(back_rotation), 0.0, back_end, !on_front);
                if on_front {
                    1.0
                } else {
                    0.0
                }
            }
        };

        self.samples.resample(&ellipse, curve_side, share, &render);
        let larger_than_hemisphere = self.circle_radius > FRAC_PI_2 + render.tolerance;
        self.fill_case = FillCase::select(curve_side, larger_than_hemisphere);
        let normal: &Vector3 = &self.center_vector;
        let sources = FillSources {
            front: &self.samples.front,
            back: &self.samples.back,
            ring: &self.ring,
            boundary_radius: scale,
            cap_direction: mod_two_pi(normal.y.atan2(normal.x)),
            seam_points: render.num_points + 1,
        };
        stitch_fills(&mut self.pool, self.fill_case, &sources);

        trace!(
            position = ?ellipse.position,
            fill_case = ?self.fill_case,
            front = ?(self.front.drawn.beginning, self.front.drawn.ending),
            back = ?(self.back.drawn.beginning, self.back.drawn.ending),
            "circle display updated"
        );
    }

    fn styling(&self) -> &Styling {
        &self.styling
    }

    fn styling_mut(&mut self) -> &mut Styling {
        &mut self.styling
    }

    fn paths_mut(&mut self) -> Vec<(Side, &mut GlowingPath)> {
        vec![(Side::Front, &mut self.front), (Side::Back, &mut self.back)]
    }

    fn stylize(&mut self, display: DisplayStyle) {
        let styling = &self.styling;
        styling.apply_stroke(&mut self.front, Side::Front, display);
        styling.apply_stroke(&mut self.back, Side::Back, display);
        styling.apply_fill(&mut self.front_fill, Side::Front, display);
        styling.apply_fill(&mut self.back_fill, Side::Back, display);
    }

    fn set_visible(&mut self, visible: bool) {
        if visible {
            self.normal_display();
        } else {
            self.front.hide();
            self.back.hide();
        }
        self.front_fill.visible = visible;
        self.back_fill.visible = visible;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::polygon_2d::max_edge_length;
    use crate::style::{StyleOptions, StylePanel, ZoomContext};
    use std::f64::consts::PI;

    const R: f64 = 250.0;

    fn circle(normal: Vector3, radius: f64) -> Circle {
        let sphere_circle = SphericalCircle::new(normal, radius).unwrap();
        Circle::new(&sphere_circle, Rc::new(Settings::default()))
    }

    /// Lifts a drawn canvas point back onto the sphere, on the given side,
    /// and measures its angular distance from `normal`.
    fn lifted_radius(p: Point2, side: Side, normal: &Vector3) -> f64 {
        let (x, y) = (p.x / R, p.y / R);
        let z = (1.0 - x * x - y * y).max(0.0).sqrt();
        let z = if side == Side::Front { z } else { -z };
        Vector3::new(x, y, z).dot(&normal.normalize()).clamp(-1.0, 1.0).acos()
    }

    fn assert_path_on_circle(path: &GlowingPath, side: Side, normal: &Vector3, radius: f64) {
        let (begin, end) = (path.drawn.beginning, path.drawn.ending);
        for k in 1..10 {
            let percent = begin + (end - begin) * f64::from(k) / 10.0;
            let p = path.drawn.point_at(percent);
            assert!(
                (lifted_radius(p, side, normal) - radius).abs() < 1e-6,
                "{side:?} percent {percent} is off the circle"
            );
        }
    }

    fn assert_conserved(c: &Circle) {
        let pool = c.pool();
        assert_eq!(
            pool.ids(Side::Front).len() + pool.ids(Side::Back).len() + pool.spare_len(),
            Settings::default().render.pool_size()
        );
    }

    #[test]
    fn small_front_cap_is_closed_on_the_front() {
        let c = circle(Vector3::new(0.1, 0.1, 1.0), 0.3);
        assert_eq!((c.front().drawn.beginning, c.front().drawn.ending), (0.0, 1.0));
        assert!(c.front().drawn.closed);
        assert_eq!((c.back().drawn.beginning, c.back().drawn.ending), (0.0, 0.0));
        assert!(!c.back().drawn.closed);
        assert_eq!(c.fill_case(), FillCase::FrontCap);
        assert_eq!(c.front_fill_points().len(), 60);
        assert!(c.back_fill_points().is_empty());
        assert_path_on_circle(c.front(), Side::Front, &Vector3::new(0.1, 0.1, 1.0), 0.3);
        assert_conserved(&c);
    }

    #[test]
    fn circle_touching_the_silhouette_stays_on_the_front() {
        let normal = Vector3::new(0.0, 0.6, 0.8);
        let c = circle(normal, FRAC_PI_2 - 0.8_f64.acos());
        assert_eq!(c.fill_case(), FillCase::FrontCap);
        assert_eq!((c.front().drawn.beginning, c.front().drawn.ending), (0.0, 1.0));
        assert!(c.front().drawn.closed);
        assert_eq!((c.back().drawn.beginning, c.back().drawn.ending), (0.0, 0.0));
        assert!(!c.back().drawn.closed);
        assert_eq!(c.front_fill_points().len(), 60);
        assert!(c.back_fill_points().is_empty());
        assert_conserved(&c);
    }

    #[test]
    fn sample_buffers_are_reused() {
        let mut c = circle(Vector3::new(0.9, 0.1, 0.2), 1.0);
        let capacity = (c.samples.front.capacity(), c.samples.back.capacity());
        for (normal, radius) in [
            (Vector3::new(0.0, 0.0, 1.0), 0.4),
            (Vector3::new(0.1, 0.0, -1.0), 2.7),
            (Vector3::new(-0.6, 0.3, 0.5), 1.2),
        ] {
            c.set_center_vector(UnitVector3::new_normalize(normal));
            c.set_circle_radius(radius);
            c.update_display();
            assert_eq!((c.samples.front.capacity(), c.samples.back.capacity()), capacity);
            assert!(c.samples.front.len() + c.samples.back.len() <= 62);
        }
    }

    #[test]
    fn large_cap_around_the_viewer_draws_on_the_back() {
        let normal = Vector3::new(0.1, -0.2, 1.0);
        let c = circle(normal, 2.8);
        assert_eq!((c.back().drawn.beginning, c.back().drawn.ending), (0.0, 1.0));
        assert!(c.back().drawn.closed);
        assert!(!c.front().drawn.closed);
        assert_eq!(c.front().drawn.drawn_fraction(), 0.0);
        assert_eq!(c.fill_case(), FillCase::BackAnnulus);
        assert_eq!(c.pool().spare_len(), 0);
        assert_eq!(c.front_fill_points().len(), 60);
        assert_eq!(c.back_fill_points().len(), 60 + 1 + 60 + 1);
        assert_path_on_circle(c.back(), Side::Back, &normal, 2.8);
    }

    #[test]
    fn caps_centered_behind_the_sphere() {
        let c = circle(Vector3::new(0.2, 0.0, -1.0), 0.4);
        assert_eq!(c.fill_case(), FillCase::BackCap);
        assert!(c.back().drawn.closed);
        assert_eq!(c.back_fill_points().len(), 60);
        assert_conserved(&c);

        let c = circle(Vector3::new(0.2, 0.0, -1.0), 2.9);
        assert_eq!(c.fill_case(), FillCase::FrontAnnulus);
        assert!(c.front().drawn.closed);
        assert_eq!(c.back_fill_points().len(), 60);
        assert_eq!(c.front_fill_points().len(), 122);
        assert_conserved(&c);
    }

    #[test]
    fn split_circle_ranges_share_the_perimeter() {
        let normal = Vector3::new(0.5, 0.5, 0.5_f64.sqrt());
        let c = circle(normal, PI / 3.0);
        assert_eq!(c.fill_case(), FillCase::Split);

        let front = &c.front().drawn;
        let back = &c.back().drawn;
        assert!(!front.closed && !back.closed);
        let share = front.drawn_fraction();
        assert!(share > 0.0 && share < 1.0);
        assert!((front.beginning + front.ending - 1.0).abs() < 1e-12);
        assert!((back.beginning - share / 2.0).abs() < 1e-12);
        assert!((back.ending - (1.0 - share / 2.0)).abs() < 1e-12);
        // The unit normal leans towards the viewer, so most of the curve is
        // on the front.
        assert!(share > 0.5);

        assert_path_on_circle(c.front(), Side::Front, &normal, PI / 3.0);
        assert_path_on_circle(c.back(), Side::Back, &normal, PI / 3.0);
        // Both ends of the front arc sit on the silhouette.
        for p in [front.point_at(front.beginning), front.point_at(front.ending)] {
            assert!((p.coords.norm() - R).abs() < 1e-3 * R);
        }
    }

    #[test]
    fn split_fills_use_the_seam_on_both_sides() {
        let c = circle(Vector3::new(0.9, 0.1, 0.2), 1.0);
        assert_eq!(c.fill_case(), FillCase::Split);
        let front = c.front_fill_points();
        let back = c.back_fill_points();
        assert_eq!(front.len() + back.len(), 3 * 60 + 2);
        assert_conserved(&c);
        // Curve and seam join without jumps.
        assert!(max_edge_length(&front) < 0.2 * R);
        assert!(max_edge_length(&back) < 0.2 * R);
    }

    #[test]
    fn great_circle_always_splits() {
        let c = circle(Vector3::new(0.3, -0.4, 0.5), FRAC_PI_2);
        assert_eq!(c.fill_case(), FillCase::Split);
        assert!((c.front().drawn.drawn_fraction() - 0.5).abs() < 1e-6);
        assert!((c.back().drawn.drawn_fraction() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn setters_wait_for_update_display() {
        let mut c = circle(Vector3::new(0.0, 0.0, 1.0), 0.5);
        let before = c.front().clone();
        c.set_center_vector(UnitVector3::new_normalize(Vector3::new(1.0, 0.0, 0.0)));
        c.set_circle_radius(1.0);
        assert_eq!(*c.front(), before);
        c.update_display();
        assert_eq!(c.fill_case(), FillCase::Split);
        assert_ne!(*c.front(), before);
    }

    #[test]
    fn update_display_is_idempotent() {
        let mut c = circle(Vector3::new(0.4, 0.7, -0.2), 1.1);
        let front = c.front().clone();
        let back = c.back().clone();
        let fill = c.front_fill_points();
        c.update_display();
        assert_eq!(*c.front(), front);
        assert_eq!(*c.back(), back);
        assert_eq!(c.front_fill_points(), fill);
    }

    #[test]
    fn anchors_are_conserved_across_updates() {
        let mut c = circle(Vector3::new(0.0, 0.0, 1.0), 0.3);
        let steps = [
            (Vector3::new(0.0, 0.0, 1.0), 2.9),
            (Vector3::new(1.0, 0.2, 0.1), 0.8),
            (Vector3::new(0.1, 0.0, -1.0), 0.2),
            (Vector3::new(0.1, 0.0, -1.0), 2.7),
            (Vector3::new(-0.6, 0.3, 0.5), FRAC_PI_2),
            (Vector3::new(0.0, 0.0, 1.0), 0.3),
        ];
        for (normal, radius) in steps {
            c.set_center_vector(UnitVector3::new_normalize(normal));
            c.set_circle_radius(radius);
            c.update_display();
            assert_conserved(&c);
        }
        assert_eq!(c.fill_case(), FillCase::FrontCap);
    }

    #[test]
    fn hiding_hides_fills() {
        let mut c = circle(Vector3::new(0.3, 0.2, 0.9), 0.6);
        c.set_visible(false);
        assert!(!c.front().drawn.visible && !c.back().drawn.visible);
        assert!(!c.front_fill().visible && !c.back_fill().visible);
        c.set_visible(true);
        assert!(c.front().drawn.visible && !c.front().glowing.visible);
        assert!(c.back_fill().visible);
        c.glowing_display();
        assert!(c.front().glowing.visible);
    }

    #[test]
    fn style_updates_reach_the_fills() {
        let mut c = circle(Vector3::new(0.3, 0.2, 0.9), 0.6);
        assert!(c.front_fill().fill.is_some());
        let options = StyleOptions {
            fill_color: Some(crate::style::Hsla::NONE),
            ..StyleOptions::default()
        };
        c.update_style(StylePanel::Front, &options, ZoomContext::default());
        assert!(c.front_fill().fill.is_none());
        // A dynamic back fill follows the front one.
        assert!(c.back_fill().fill.is_none());

        c.stylize(DisplayStyle::ApplyTemporaryVariables);
        assert!(c.front_fill().fill.is_some() && c.back_fill().fill.is_some());
    }
}
