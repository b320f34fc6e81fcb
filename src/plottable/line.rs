use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;

use tracing::trace;

use crate::math::projection::projected_ellipse_data;
use crate::math::{Point2, UnitVector3, Vector3};
use crate::settings::{Settings, ShapeKind};
use crate::style::DisplayStyle;

use super::primitive::{ArcGeometry, GlowingPath};
use super::{Plottable, Side, Styling};

/// Renderer of a great circle: its front and back halves.
///
/// A great circle always meets the silhouette in two antipodal points, so
/// each half is exactly half of the projected ellipse.
#[derive(Debug, Clone)]
pub struct Line {
    normal_vector: UnitVector3,
    front: GlowingPath,
    back: GlowingPath,
    styling: Styling,
}

impl Line {
    /// Creates a renderer for the great circle with normal `normal`.
    #[must_use]
    pub fn new(normal: UnitVector3, settings: Rc<Settings>) -> Self {
        let mut this = Self {
            normal_vector: normal,
            front: GlowingPath::default(),
            back: GlowingPath::default(),
            styling: Styling::new(ShapeKind::Line, settings),
        };
        this.update_display();
        this.stylize(DisplayStyle::ApplyCurrentVariables);
        this.adjust_size(this.styling.zoom());
        this
    }

    /// The great circle through the poles and the viewer.
    #[must_use]
    pub fn with_defaults(settings: Rc<Settings>) -> Self {
        Self::new(Vector3::x_axis(), settings)
    }

    #[must_use]
    pub fn normal_vector(&self) -> &UnitVector3 {
        &self.normal_vector
    }

    /// Stores `normal` and redraws.
    pub fn set_normal_vector(&mut self, normal: UnitVector3) {
        self.normal_vector = normal;
        self.update_display();
    }

    #[must_use]
    pub fn front(&self) -> &GlowingPath {
        &self.front
    }

    #[must_use]
    pub fn back(&self) -> &GlowingPath {
        &self.back
    }
}

impl Plottable for Line {
    fn update_display(&mut self) {
        let render = self.styling.settings().render;
        let ellipse = projected_ellipse_data(&self.normal_vector, FRAC_PI_2, render.tolerance);
        let scale = render.boundary_radius;
        let arc = ArcGeometry {
            translation: Point2::origin(),
            width: 2.0 * ellipse.major_axis * scale,
            height: 2.0 * ellipse.minor_axis * scale,
            rotation: ellipse.tilt_angle,
        };

        let (front, back) = if ellipse.front_start_angle < render.tolerance {
            ((0.0, 0.5), (0.5, 1.0))
        } else {
            ((0.5, 1.0), (0.0, 0.5))
        };
        self.front.set_arc(&arc, front.0, front.1, false);
        self.back.set_arc(&arc, back.0, back.1, false);

        trace!(
            tilt = ellipse.tilt_angle,
            minor = ellipse.minor_axis,
            ?front,
            "line display updated"
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
}
