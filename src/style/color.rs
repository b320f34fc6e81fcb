use std::fmt;
use std::str::FromStr;

use crate::error::StyleError;
use crate::math::TOLERANCE;

/// A color in hue/saturation/lightness/alpha form.
///
/// `h` is in degrees, `s`, `l` and `a` are fractions in `[0, 1]`. The
/// all-zero color is the "no stroke / no fill" marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Hsla {
    /// The "no paint" marker, `hsla(0, 0%, 0%, 0)`.
    pub const NONE: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color from its components.
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Returns `true` if this is the "no paint" marker.
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.h.max(self.s).max(self.l).max(self.a) < TOLERANCE
    }

    /// Converts to the paint a primitive carries: `None` means no stroke or
    /// no fill.
    #[must_use]
    pub fn paint(self) -> Option<Self> {
        (!self.is_none()).then_some(self)
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.h,
            self.s * 100.0,
            self.l * 100.0,
            self.a
        )
    }
}

impl FromStr for Hsla {
    type Err = StyleError;

    /// Parses `hsla(h, s%, l%, a)`. Percent signs are optional and
    /// surrounding whitespace is ignored; a non-positive alpha reads as `0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StyleError::InvalidColor(s.to_owned());
        let body = s
            .trim()
            .strip_prefix("hsla(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let values = body
            .split(',')
            .map(|part| part.trim().trim_end_matches('%').trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        let [h, saturation, lightness, alpha] = values[..] else {
            return Err(invalid());
        };
        Ok(Self::new(h, saturation / 100.0, lightness / 100.0, alpha.max(0.0)))
    }
}

/// Derives a back-side color from a front color.
///
/// `contrast = 1` keeps the front color, `contrast = 0` makes the back
/// invisible; in between the lightness moves toward white as
/// `l' = 1 - (1 - l) * contrast`. A front color of "no paint" stays
/// transparent.
#[must_use]
pub fn contrast_color(front: Hsla, contrast: f64) -> Hsla {
    if front.is_none() || contrast == 0.0 {
        return Hsla::NONE;
    }
    Hsla {
        l: 1.0 - (1.0 - front.l) * contrast,
        ..front
    }
}

/// Back stroke width percentage derived from the front one; the back is up
/// to 20 points thinner.
#[must_use]
pub fn contrast_stroke_width_percent(front_percent: f64, contrast: f64) -> f64 {
    front_percent - 20.0 * contrast
}
