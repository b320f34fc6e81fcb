use std::f64::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;

use tracing::trace;

use crate::geometry::GreatCircleArc;
use crate::math::ellipse_arc::parameter_to_percent;
use crate::math::projection::{ellipse_frame, projected_ellipse_data, EllipsePosition};
use crate::math::{mod_two_pi, Point2};
use crate::settings::{Settings, ShapeKind};
use crate::style::DisplayStyle;

use super::primitive::{ArcGeometry, GlowingPath};
use super::{Plottable, Side, Styling};

/// A parameter interval `[start, end]` with `0 <= start <= end <= 2*pi`.
type Interval = (f64, f64);

/// Renderer of a great-circle arc.
///
/// A segment can enter a hemisphere twice, so each side owns a main piece
/// and an extra piece; a piece the segment does not need is drawn with a
/// zero-length range.
#[derive(Debug, Clone)]
pub struct Segment {
    arc: GreatCircleArc,
    front: GlowingPath,
    front_extra: GlowingPath,
    back: GlowingPath,
    back_extra: GlowingPath,
    styling: Styling,
}

impl Segment {
    #[must_use]
    pub fn new(arc: GreatCircleArc, settings: Rc<Settings>) -> Self {
        let mut this = Self {
            arc,
            front: GlowingPath::default(),
            front_extra: GlowingPath::default(),
            back: GlowingPath::default(),
            back_extra: GlowingPath::default(),
            styling: Styling::new(ShapeKind::Segment, settings),
        };
        this.update_display();
        this.stylize(DisplayStyle::ApplyCurrentVariables);
        this.adjust_size(this.styling.zoom());
        this
    }

    #[must_use]
    pub fn arc(&self) -> &GreatCircleArc {
        &self.arc
    }

    /// Stores `arc` and redraws.
    pub fn set_arc(&mut self, arc: GreatCircleArc) {
        self.arc = arc;
        self.update_display();
    }

    #[must_use]
    pub fn front(&self) -> &GlowingPath {
        &self.front
    }

    #[must_use]
    pub fn front_extra(&self) -> &GlowingPath {
        &self.front_extra
    }

    #[must_use]
    pub fn back(&self) -> &GlowingPath {
        &self.back
    }

    #[must_use]
    pub fn back_extra(&self) -> &GlowingPath {
        &self.back_extra
    }

    /// Total perimeter fraction drawn on `side`.
    #[must_use]
    pub fn drawn_fraction(&self, side: Side) -> f64 {
        let (main, extra) = match side {
            Side::Front => (&self.front, &self.front_extra),
            Side::Back => (&self.back, &self.back_extra),
        };
        main.drawn.drawn_fraction() + extra.drawn.drawn_fraction()
    }
}

/// Splits the counter-clockwise interval of `length` from `start` at `2*pi`.
fn unwrap_interval(start: f64, length: f64) -> Vec<Interval> {
    let end = start + length;
    if end <= TAU {
        vec![(start, end)]
    } else {
        vec![(start, TAU), (0.0, end - TAU)]
    }
}

/// Non-empty overlaps of `pieces` with `half`.
fn clip(pieces: &[Interval], half: Interval, tolerance: f64) -> Vec<Interval> {
    pieces
        .iter()
        .filter_map(|&(start, end)| {
            let (lo, hi) = (start.max(half.0), end.min(half.1));
            (hi - lo > tolerance).then_some((lo, hi))
        })
        .collect()
}

impl Plottable for Segment {
    fn update_display(&mut self) {
        let render = self.styling.settings().render;
        let normal = *self.arc.normal();
        let ellipse = projected_ellipse_data(&normal, FRAC_PI_2, render.tolerance);
        let scale = render.boundary_radius;

        // Turning about the normal runs along the ellipse parameter, backwards
        // when the normal points away from the viewer.
        let (u, w) = ellipse_frame(&normal, ellipse.tilt_angle);
        let start = self.arc.start().into_inner();
        let start_parameter = start.dot(&w).atan2(start.dot(&u));
        let length = self.arc.arc_length();
        let first = if normal.z >= 0.0 {
            mod_two_pi(start_parameter)
        } else {
            mod_two_pi(start_parameter - length)
        };
        let pieces = unwrap_interval(first, length);

        let (front_half, back_half): (Vec<Interval>, Vec<Interval>) = match ellipse.position {
            EllipsePosition::SplitFrontBack => {
                let front = (ellipse.front_start_angle, ellipse.front_end_angle);
                let back = if front.0 < render.tolerance {
                    (front.1, TAU)
                } else {
                    (0.0, front.0)
                };
                (vec![front], vec![back])
            }
            EllipsePosition::EntirelyFront => (vec![(0.0, TAU)], Vec::new()),
            EllipsePosition::EntirelyBack => (Vec::new(), vec![(0.0, TAU)]),
        };
        let front: Vec<Interval> = front_half
            .iter()
            .flat_map(|&half| clip(&pieces, half, render.tolerance))
            .collect();
        let back: Vec<Interval> = back_half
            .iter()
            .flat_map(|&half| clip(&pieces, half, render.tolerance))
            .collect();

        let arc = ArcGeometry {
            translation: Point2::origin(),
            width: 2.0 * ellipse.major_axis * scale,
            height: 2.0 * ellipse.minor_axis * scale,
            rotation: ellipse.tilt_angle,
        };
        let (a, b) = (ellipse.major_axis, ellipse.minor_axis);
        let percents = |piece: Option<&Interval>| {
            piece.map_or((0.0, 0.0), |&(lo, hi)| {
                (parameter_to_percent(a, b, lo), parameter_to_percent(a, b, hi))
            })
        };
        for (path, piece) in [
            (&mut self.front, front.first()),
            (&mut self.front_extra, front.get(1)),
            (&mut self.back, back.first()),
            (&mut self.back_extra, back.get(1)),
        ] {
            let (beginning, ending) = percents(piece);
            path.set_arc(&arc, beginning, ending, false);
        }

        trace!(
            first,
            length,
            front = front.len(),
            back = back.len(),
            "segment display updated"
        );
    }

    fn styling(&self) -> &Styling {
        &self.styling
    }

    fn styling_mut(&mut self) -> &mut Styling {
        &mut self.styling
    }

    fn paths_mut(&mut self) -> Vec<(Side, &mut GlowingPath)> {
        vec![
            (Side::Front, &mut self.front),
            (Side::Front, &mut self.front_extra),
            (Side::Back, &mut self.back),
            (Side::Back, &mut self.back_extra),
        ]
    }
}
