//! Render configuration.
//!
//! Plain data with `Default`; [`Settings::validate`] checks the constraints
//! the renderers rely on. Renderers share one validated instance through
//! `Rc<Settings>`.
use crate::error::{Result, SettingsError};
use crate::math::Point2;
use crate::style::{
    contrast_color, contrast_stroke_width_percent, FrontBack, Hsla, StyleOptions, StylePanel,
};

/// Smallest number of curve samples a circle can be split into.
pub const MIN_CURVE_POINTS: usize = 4;

/// Numeric and sampling parameters shared by all renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Tolerance for the degenerate projection branches.
    pub tolerance: f64,
    /// Number of samples along a circle (front and back together).
    pub num_points: usize,
    /// Size of a circle's fill anchor budget on top of `num_points`; the
    /// silhouette ring uses `boundary_points - 2` samples.
    pub boundary_points: usize,
    /// On-screen radius of the silhouette, in canvas units.
    pub boundary_radius: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            num_points: 60,
            boundary_points: 122,
            boundary_radius: 250.0,
        }
    }
}

impl RenderSettings {
    /// Number of samples in the silhouette ring.
    #[must_use]
    pub fn ring_points(&self) -> usize {
        self.boundary_points.saturating_sub(2)
    }

    /// Total anchors owned by each circle's pool.
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.boundary_points + self.num_points
    }
}

/// Shading of circle fills.
///
/// The front fill brightens towards the light source and the back fill
/// darkens towards its antipode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillShading {
    /// Light position in units of the boundary radius.
    pub light_source: Point2,
    /// Color at the center of the front gradient.
    pub front_white: Hsla,
    /// Color at the center of the back gradient.
    pub back_gray: Hsla,
}

impl Default for FillShading {
    fn default() -> Self {
        Self {
            light_source: Point2::new(-1.0 / 3.0, 1.0 / 3.0),
            front_white: Hsla::new(0.0, 0.0, 0.9, 0.2),
            back_gray: Hsla::new(0.0, 0.0, 0.5, 0.1),
        }
    }
}

/// Drawn, temporary and highlight style of one kind of shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeStyleSettings {
    /// Stroke width at zoom 1 and 100 percent.
    pub stroke_width: FrontBack<f64>,
    pub stroke_color: FrontBack<Hsla>,
    /// `None` for shapes without an interior.
    pub fill_color: Option<FrontBack<Hsla>>,
    pub temp_stroke_color: FrontBack<Hsla>,
    pub temp_fill_color: Option<FrontBack<Hsla>>,
    pub glowing_stroke_color: FrontBack<Hsla>,
    /// Extra width of the highlight stroke over the drawn one.
    pub glowing_edge_width: f64,
    pub dash_array: FrontBack<Vec<f64>>,
    pub reverse_dash_array: FrontBack<bool>,
    /// Derive the back style from the front one and the global contrast.
    pub dynamic_back_style: bool,
}

impl ShapeStyleSettings {
    /// Defaults for great circles.
    #[must_use]
    pub fn line() -> Self {
        Self {
            stroke_width: FrontBack::new(2.5, 2.0),
            stroke_color: FrontBack::new(
                Hsla::new(217.0, 0.9, 0.61, 1.0),
                Hsla::new(217.0, 0.9, 0.8, 1.0),
            ),
            fill_color: None,
            temp_stroke_color: FrontBack::new(
                Hsla::new(0.0, 0.0, 0.42, 1.0),
                Hsla::new(0.0, 0.0, 0.72, 1.0),
            ),
            temp_fill_color: None,
            glowing_stroke_color: FrontBack::new(
                Hsla::new(0.0, 1.0, 0.5, 1.0),
                Hsla::new(0.0, 1.0, 0.75, 1.0),
            ),
            glowing_edge_width: 5.0,
            dash_array: FrontBack::new(Vec::new(), vec![10.0, 5.0]),
            reverse_dash_array: FrontBack::new(false, false),
            dynamic_back_style: true,
        }
    }

    /// Defaults for circles.
    #[must_use]
    pub fn circle() -> Self {
        Self {
            fill_color: Some(FrontBack::new(
                Hsla::new(254.0, 1.0, 0.9, 0.2),
                Hsla::new(10.0, 1.0, 0.5, 0.1),
            )),
            temp_fill_color: Some(FrontBack::new(
                Hsla::new(0.0, 0.0, 0.9, 0.3),
                Hsla::new(0.0, 0.0, 0.5, 0.2),
            )),
            ..Self::line()
        }
    }

    /// Defaults for segments.
    #[must_use]
    pub fn segment() -> Self {
        Self {
            stroke_color: FrontBack::new(
                Hsla::new(244.0, 0.8, 0.5, 1.0),
                Hsla::new(244.0, 0.8, 0.75, 1.0),
            ),
            ..Self::line()
        }
    }

    /// Default style options for `panel`.
    ///
    /// With dynamic back styling the back options are derived from the front
    /// defaults through `back_style_contrast`.
    #[must_use]
    pub fn default_style(&self, panel: StylePanel, back_style_contrast: f64) -> StyleOptions {
        let mut options = StyleOptions {
            stroke_width_percent: Some(100.0),
            stroke_color: Some(*self.stroke_color.get(panel)),
            fill_color: self.fill_color.as_ref().map(|fill| *fill.get(panel)),
            dash_array: Some(self.dash_array.get(panel).clone()),
            reverse_dash_array: Some(*self.reverse_dash_array.get(panel)),
            dynamic_back_style: None,
        };
        if panel == StylePanel::Back {
            options.dynamic_back_style = Some(self.dynamic_back_style);
            if self.dynamic_back_style {
                options.stroke_width_percent =
                    Some(contrast_stroke_width_percent(100.0, back_style_contrast));
                options.stroke_color =
                    Some(contrast_color(self.stroke_color.front, back_style_contrast));
                options.fill_color = self
                    .fill_color
                    .as_ref()
                    .map(|fill| contrast_color(fill.front, back_style_contrast));
            }
        }
        options
    }
}

/// Complete configuration consumed by the renderers.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub render: RenderSettings,
    pub line: ShapeStyleSettings,
    pub circle: ShapeStyleSettings,
    pub segment: ShapeStyleSettings,
    pub fill: FillShading,
    /// Highlight color of selected objects.
    pub selected_color: FrontBack<Hsla>,
    /// Global back-style contrast in `[0, 1]`: `1` draws the back like the
    /// front, `0` hides it.
    pub back_style_contrast: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render: RenderSettings::default(),
            line: ShapeStyleSettings::line(),
            circle: ShapeStyleSettings::circle(),
            segment: ShapeStyleSettings::segment(),
            fill: FillShading::default(),
            selected_color: FrontBack::new(
                Hsla::new(0.0, 1.0, 0.75, 1.0),
                Hsla::new(0.0, 1.0, 0.9, 1.0),
            ),
            back_style_contrast: 0.5,
        }
    }
}

impl Settings {
    /// Checks the constraints the renderers rely on.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance or boundary radius is not positive,
    /// `num_points` is below [`MIN_CURVE_POINTS`], `boundary_points` is odd
    /// or smaller than `2 * num_points + 2`, or the contrast is outside
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let render = &self.render;
        if render.tolerance <= 0.0 || render.tolerance.is_nan() {
            return Err(SettingsError::NotPositive {
                name: "tolerance",
                value: render.tolerance,
            }
            .into());
        }
        if render.boundary_radius <= 0.0 || render.boundary_radius.is_nan() {
            return Err(SettingsError::NotPositive {
                name: "boundary_radius",
                value: render.boundary_radius,
            }
            .into());
        }
        if render.num_points < MIN_CURVE_POINTS {
            return Err(SettingsError::TooFewCurvePoints {
                value: render.num_points,
                min: MIN_CURVE_POINTS,
            }
            .into());
        }
        if render.boundary_points % 2 != 0 {
            return Err(SettingsError::OddBoundaryPoints(render.boundary_points).into());
        }
        // Case 3 fills need 3n + 2 anchors out of boundary_points + n.
        let required = 2 * render.num_points + 2;
        if render.boundary_points < required {
            return Err(SettingsError::TooFewBoundaryPoints {
                value: render.boundary_points,
                num_points: render.num_points,
                required,
            }
            .into());
        }
        if !(0.0..=1.0).contains(&self.back_style_contrast) {
            return Err(SettingsError::ContrastOutOfRange(self.back_style_contrast).into());
        }
        Ok(())
    }

    /// Style settings for the given shape.
    #[must_use]
    pub fn shape(&self, kind: ShapeKind) -> &ShapeStyleSettings {
        match kind {
            ShapeKind::Line => &self.line,
            ShapeKind::Circle => &self.circle,
            ShapeKind::Segment => &self.segment,
        }
    }
}

/// The kinds of curve the renderers draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Circle,
    Segment,
}
