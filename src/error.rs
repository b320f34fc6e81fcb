use thiserror::Error;

/// Top-level error type for the sphere rendering core.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Errors raised by the validated geometry constructors.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range ({min}, {max})")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors in the render configuration.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("num_points must be at least {min}, got {value}")]
    TooFewCurvePoints { value: usize, min: usize },

    #[error("boundary_points must be even, got {0}")]
    OddBoundaryPoints(usize),

    #[error(
        "boundary_points must be at least {required} for num_points = {num_points}, got {value}"
    )]
    TooFewBoundaryPoints {
        value: usize,
        num_points: usize,
        required: usize,
    },

    #[error("back style contrast must lie in [0, 1], got {0}")]
    ContrastOutOfRange(f64),
}

/// Errors in style values.
#[derive(Debug, Error, PartialEq)]
pub enum StyleError {
    #[error("invalid hsla color string: {0:?}")]
    InvalidColor(String),
}

/// Convenience type alias for results using [`PlotError`].
pub type Result<T> = std::result::Result<T, PlotError>;
