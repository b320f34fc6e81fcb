use std::rc::Rc;

use crate::math::Point2;
use crate::settings::{Settings, ShapeKind, ShapeStyleSettings};
use crate::style::{
    contrast_color, contrast_stroke_width_percent, DisplayStyle, FrontBack, Hsla, StyleOptions,
    StylePanel, ZoomContext,
};

use super::primitive::{FillPath, GlowingPath, RadialGradient};
use super::Side;

/// Stroke color used when the front style leaves it unset.
const DEFAULT_STROKE: Hsla = Hsla::new(0.0, 0.0, 0.0, 1.0);

/// Per-object style state: the merged style options of both panels, the
/// selection highlight and the current zoom.
#[derive(Debug, Clone)]
pub struct Styling {
    kind: ShapeKind,
    settings: Rc<Settings>,
    options: FrontBack<StyleOptions>,
    selected: bool,
    zoom: ZoomContext,
}

impl Styling {
    /// Creates the style state of a new object, starting from the defaults.
    #[must_use]
    pub fn new(kind: ShapeKind, settings: Rc<Settings>) -> Self {
        let shape = settings.shape(kind);
        let contrast = settings.back_style_contrast;
        let options = FrontBack::new(
            shape.default_style(StylePanel::Front, contrast),
            shape.default_style(StylePanel::Back, contrast),
        );
        Self {
            kind,
            settings,
            options,
            selected: false,
            zoom: ZoomContext::default(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn shape(&self) -> &ShapeStyleSettings {
        self.settings.shape(self.kind)
    }

    fn contrast(&self) -> f64 {
        self.settings.back_style_contrast
    }

    /// Default options of `panel`.
    #[must_use]
    pub fn default_options(&self, panel: StylePanel) -> StyleOptions {
        self.shape().default_style(panel, self.contrast())
    }

    /// Current options of `panel`.
    #[must_use]
    pub fn options(&self, panel: StylePanel) -> &StyleOptions {
        self.options.get(panel)
    }

    /// Merges `options` into the current options of `panel`.
    pub fn merge(&mut self, panel: StylePanel, options: &StyleOptions) {
        self.options.get_mut(panel).merge(options);
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomContext {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: ZoomContext) {
        self.zoom = zoom;
    }

    fn dynamic_back(&self) -> bool {
        self.options.back.dynamic_back_style.unwrap_or(false)
    }

    fn stroke(&self, side: Side, display: DisplayStyle) -> Option<Hsla> {
        let color = match (display, side) {
            (DisplayStyle::ApplyTemporaryVariables, _) => {
                *self.shape().temp_stroke_color.get(side.into())
            }
            (DisplayStyle::ApplyCurrentVariables, Side::Front) => {
                self.options.front.stroke_color.unwrap_or(DEFAULT_STROKE)
            }
            (DisplayStyle::ApplyCurrentVariables, Side::Back) if self.dynamic_back() => {
                let front = self.options.front.stroke_color.unwrap_or(DEFAULT_STROKE);
                contrast_color(front, self.contrast())
            }
            (DisplayStyle::ApplyCurrentVariables, Side::Back) => {
                self.options.back.stroke_color.unwrap_or(Hsla::NONE)
            }
        };
        color.paint()
    }

    fn fill(&self, side: Side, display: DisplayStyle) -> Option<Hsla> {
        let color = match (display, side) {
            (DisplayStyle::ApplyTemporaryVariables, _) => self
                .shape()
                .temp_fill_color
                .as_ref()
                .map_or(Hsla::NONE, |fill| *fill.get(side.into())),
            (DisplayStyle::ApplyCurrentVariables, Side::Front) => {
                self.options.front.fill_color.unwrap_or(Hsla::NONE)
            }
            (DisplayStyle::ApplyCurrentVariables, Side::Back) if self.dynamic_back() => {
                contrast_color(
                    self.options.front.fill_color.unwrap_or(Hsla::NONE),
                    self.contrast(),
                )
            }
            (DisplayStyle::ApplyCurrentVariables, Side::Back) => {
                self.options.back.fill_color.unwrap_or(Hsla::NONE)
            }
        };
        color.paint()
    }

    fn dashes(&self, side: Side, display: DisplayStyle) -> Vec<f64> {
        match display {
            DisplayStyle::ApplyTemporaryVariables => {
                let shape = self.shape();
                StyleOptions {
                    dash_array: Some(shape.dash_array.get(side.into()).clone()),
                    reverse_dash_array: Some(*shape.reverse_dash_array.get(side.into())),
                    ..StyleOptions::default()
                }
                .effective_dashes()
            }
            DisplayStyle::ApplyCurrentVariables => {
                self.options.get(side.into()).effective_dashes()
            }
        }
    }

    fn glowing_stroke(&self, side: Side) -> Option<Hsla> {
        let colors = if self.selected {
            &self.settings.selected_color
        } else {
            &self.shape().glowing_stroke_color
        };
        colors.get(side.into()).paint()
    }

    /// Stroke width percentage applied to `side`.
    fn width_percent(&self, side: Side) -> f64 {
        let front = self.options.front.stroke_width_percent_or_default();
        match side {
            Side::Front => front,
            Side::Back if self.dynamic_back() => {
                contrast_stroke_width_percent(front, self.contrast())
            }
            Side::Back => self.options.back.stroke_width_percent_or_default(),
        }
    }

    /// Stroke width of the drawn or highlight path of `side` at the current
    /// zoom.
    #[must_use]
    pub fn linewidth(&self, side: Side, glowing: bool) -> f64 {
        let shape = self.shape();
        let mut base = *shape.stroke_width.get(side.into());
        if glowing {
            base += shape.glowing_edge_width;
        }
        base * self.zoom.stroke_scale * self.width_percent(side) / 100.0
    }

    /// Copies the style of `side` onto a path pair.
    pub fn apply_stroke(&self, path: &mut GlowingPath, side: Side, display: DisplayStyle) {
        path.drawn.stroke = self.stroke(side, display);
        path.drawn.dashes = self.dashes(side, display);
        match display {
            DisplayStyle::ApplyTemporaryVariables => {
                path.drawn.linewidth =
                    *self.shape().stroke_width.get(side.into()) * self.zoom.stroke_scale;
                // The temporary look is never highlighted.
                path.glowing.visible = false;
            }
            DisplayStyle::ApplyCurrentVariables => {
                path.glowing.stroke = self.glowing_stroke(side);
                path.glowing.dashes.clone_from(&path.drawn.dashes);
            }
        }
    }

    /// Shades `color` for `side`: the front is lit from the light source
    /// over one boundary radius, the back darkens from its antipode over two.
    fn gradient(&self, side: Side, color: Hsla) -> RadialGradient {
        let shading = &self.settings.fill;
        let radius = self.settings.render.boundary_radius;
        let light = shading.light_source.coords * radius;
        match side {
            Side::Front => {
                RadialGradient::two_stop(Point2::from(light), radius, shading.front_white, color)
            }
            Side::Back => RadialGradient::two_stop(
                Point2::from(-light),
                2.0 * radius,
                shading.back_gray,
                color,
            ),
        }
    }

    /// Sets the fill gradient of `side`, whose outer stop is the fill color.
    pub fn apply_fill(&self, fill: &mut FillPath, side: Side, display: DisplayStyle) {
        fill.fill = self.fill(side, display).map(|color| self.gradient(side, color));
    }

    /// Sets the stroke widths of a path pair for the current zoom.
    pub fn apply_size(&self, path: &mut GlowingPath, side: Side) {
        path.drawn.linewidth = self.linewidth(side, false);
        path.glowing.linewidth = self.linewidth(side, true);
    }
}
