//! Renderers that turn spherical curves into drawing primitives.
//!
//! Each renderer owns its primitives for its whole life and rewrites them in
//! place on every [`Plottable::update_display`].
mod anchor_pool;
mod circle;
mod fill;
mod line;
mod primitive;
mod segment;
mod styling;

pub use anchor_pool::{AnchorId, AnchorPool};
pub use circle::Circle;
pub use fill::FillCase;
pub use line::Line;
pub use primitive::{
    ArcGeometry, EllipsePath, FillPath, GlowingPath, GradientStop, RadialGradient,
};
pub use segment::Segment;
pub use styling::Styling;

use crate::style::{DisplayStyle, StyleOptions, StylePanel, ZoomContext};

/// Hemisphere a primitive is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Front,
    Back,
}

impl From<Side> for StylePanel {
    fn from(side: Side) -> Self {
        match side {
            Side::Front => StylePanel::Front,
            Side::Back => StylePanel::Back,
        }
    }
}

/// Capabilities shared by every renderer.
///
/// Implementors provide geometry updates and access to their style state
/// and stroked paths; visibility, sizing and styling of the stroked paths
/// are provided.
pub trait Plottable {
    /// Recomputes every primitive from the current geometry.
    fn update_display(&mut self);

    /// Returns the style state.
    fn styling(&self) -> &Styling;

    /// Returns the style state mutably.
    fn styling_mut(&mut self) -> &mut Styling;

    /// Returns every stroked path pair with the hemisphere it is drawn on.
    fn paths_mut(&mut self) -> Vec<(Side, &mut GlowingPath)>;

    /// Copies style onto the primitives.
    fn stylize(&mut self, display: DisplayStyle) {
        let styling = self.styling().clone();
        for (side, path) in self.paths_mut() {
            styling.apply_stroke(path, side, display);
        }
    }

    /// Sets stroke widths for `zoom`.
    fn adjust_size(&mut self, zoom: ZoomContext) {
        self.styling_mut().set_zoom(zoom);
        let styling = self.styling().clone();
        for (side, path) in self.paths_mut() {
            styling.apply_size(path, side);
        }
    }

    /// Shows the object normally, or hides it entirely.
    fn set_visible(&mut self, visible: bool) {
        if visible {
            self.normal_display();
        } else {
            for (_, path) in self.paths_mut() {
                path.hide();
            }
        }
    }

    fn normal_display(&mut self) {
        for (_, path) in self.paths_mut() {
            path.normal_display();
        }
    }

    fn glowing_display(&mut self) {
        for (_, path) in self.paths_mut() {
            path.glowing_display();
        }
    }

    /// Switches the highlight between the selection and the glowing colors.
    fn set_selected_coloring(&mut self, selected: bool) {
        self.styling_mut().set_selected(selected);
        self.stylize(DisplayStyle::ApplyCurrentVariables);
    }

    /// Default style options of `panel`.
    fn default_style_state(&self, panel: StylePanel) -> StyleOptions {
        self.styling().default_options(panel)
    }

    /// Current style options of `panel`.
    fn current_style_state(&self, panel: StylePanel) -> StyleOptions {
        self.styling().options(panel).clone()
    }

    /// Merges `options` into the style of `panel` and reapplies style and
    /// size.
    fn update_style(&mut self, panel: StylePanel, options: &StyleOptions, zoom: ZoomContext) {
        self.styling_mut().merge(panel, options);
        self.stylize(DisplayStyle::ApplyCurrentVariables);
        self.adjust_size(zoom);
    }
}
