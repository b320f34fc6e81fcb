mod color;

pub use color::{contrast_color, contrast_stroke_width_percent, Hsla};

/// Which style panel (hemisphere) a set of options applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StylePanel {
    Front,
    Back,
}

/// How a renderer copies style onto its primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStyle {
    /// Use the temporary look of an object still being constructed.
    ApplyTemporaryVariables,
    /// Use the object's current style options.
    ApplyCurrentVariables,
}

/// A value held separately for the front and back hemispheres.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontBack<T> {
    pub front: T,
    pub back: T,
}

impl<T> FrontBack<T> {
    /// Creates a pair.
    #[must_use]
    pub fn new(front: T, back: T) -> Self {
        Self { front, back }
    }

    /// Returns the value for `panel`.
    #[must_use]
    pub fn get(&self, panel: StylePanel) -> &T {
        match panel {
            StylePanel::Front => &self.front,
            StylePanel::Back => &self.back,
        }
    }

    /// Returns the value for `panel` mutably.
    pub fn get_mut(&mut self, panel: StylePanel) -> &mut T {
        match panel {
            StylePanel::Front => &mut self.front,
            StylePanel::Back => &mut self.back,
        }
    }
}

/// User-editable style of one hemisphere of an object.
///
/// Every field is optional; unset fields fall back to the renderer's
/// defaults when the style is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOptions {
    pub stroke_width_percent: Option<f64>,
    pub stroke_color: Option<Hsla>,
    pub fill_color: Option<Hsla>,
    pub dash_array: Option<Vec<f64>>,
    pub reverse_dash_array: Option<bool>,
    pub dynamic_back_style: Option<bool>,
}

impl StyleOptions {
    /// Overwrites the fields that are set in `other`.
    pub fn merge(&mut self, other: &StyleOptions) {
        if other.stroke_width_percent.is_some() {
            self.stroke_width_percent = other.stroke_width_percent;
        }
        if other.stroke_color.is_some() {
            self.stroke_color = other.stroke_color;
        }
        if other.fill_color.is_some() {
            self.fill_color = other.fill_color;
        }
        if other.dash_array.is_some() {
            self.dash_array.clone_from(&other.dash_array);
        }
        if other.reverse_dash_array.is_some() {
            self.reverse_dash_array = other.reverse_dash_array;
        }
        if other.dynamic_back_style.is_some() {
            self.dynamic_back_style = other.dynamic_back_style;
        }
    }

    /// Stroke width percentage, `100` when unset.
    #[must_use]
    pub fn stroke_width_percent_or_default(&self) -> f64 {
        self.stroke_width_percent.unwrap_or(100.0)
    }

    /// Dash pattern to draw with: the dash array, reversed if requested, or
    /// the solid pattern `[0]` when none is set.
    #[must_use]
    pub fn effective_dashes(&self) -> Vec<f64> {
        match (&self.dash_array, self.reverse_dash_array) {
            (Some(dashes), Some(reverse)) if !dashes.is_empty() => {
                let mut dashes = dashes.clone();
                if reverse {
                    dashes.reverse();
                }
                dashes
            }
            _ => vec![0.0],
        }
    }
}

/// Display magnification threaded into `adjust_size`.
///
/// `stroke_scale` multiplies every configured stroke width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomContext {
    pub stroke_scale: f64,
}

impl Default for ZoomContext {
    fn default() -> Self {
        Self { stroke_scale: 1.0 }
    }
}

impl ZoomContext {
    /// Creates a zoom context from the magnification factor.
    #[must_use]
    pub fn new(stroke_scale: f64) -> Self {
        Self { stroke_scale }
    }
}
