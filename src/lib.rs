pub mod error;
pub mod geometry;
pub mod math;
pub mod plottable;
pub mod settings;
pub mod style;

pub use error::{PlotError, Result};
pub use geometry::{GreatCircleArc, SphericalCircle};
pub use plottable::{Circle, Line, Plottable, Segment};
pub use settings::Settings;
