//! Error types.
//!
//! Failures while computing a single bar are either a [`ConfigurationError`]
//! or a [`DomainError`]. Neither ever escapes [`solve`][crate::solver::solve]:
//! the affected bar is simply left out. The only error that reaches the
//! caller of a paint operation is a [`RenderError`].

use std::io;
use thiserror::Error;


//------------ ConfigurationError --------------------------------------------

/// A unit system is malformed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("unit system has no units")]
    EmptySystem,

    #[error("unbounded unit '{0}' is not the last unit of its system")]
    MisplacedUnbounded(String),

    #[error("unit '{name}' has invalid inches per unit {value}")]
    InvalidUnitFactor { name: String, value: f64 },

    #[error("unit '{name}' has invalid maximum unit number {value}")]
    InvalidUnitLimit { name: String, value: f64 },

    #[error("no unit covers a length of {0}")]
    NoMatchingUnit(f64),
}


//------------ DomainError ---------------------------------------------------

/// A numeric input is outside what the bar computation can handle.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum DomainError {
    #[error("bar length must be positive and finite, got {0}")]
    InvalidLength(f64),

    #[error("bar length {0} is too long to display")]
    TooLong(f64),

    #[error("scale denominator must be positive and finite, got {0}")]
    InvalidScale(f64),

    #[error("dpi must be positive and finite, got {0}")]
    InvalidDpi(f64),

    #[error("no pixels left for the bar (budget {0})")]
    NoPixelBudget(i64),

    #[error("bar rounds to a length of zero")]
    EmptyBar,
}


//------------ BarError ------------------------------------------------------

/// Why a single bar could not be computed.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum BarError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}


//------------ OptionError ---------------------------------------------------

/// A decoration option was rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum OptionError {
    #[error("'{key}' must be a float, got '{value}'")]
    Float { key: &'static str, value: String },

    #[error("'{key}' must be an integer, got '{value}'")]
    Integer { key: &'static str, value: String },

    #[error("'{key}' must be a boolean, got '{value}'")]
    Bool { key: &'static str, value: String },

    #[error("'{key}' is not a valid color: '{value}'")]
    Color { key: &'static str, value: String },

    #[error("'alignment' must be one of left, center or right, got '{0}'")]
    Alignment(String),

    #[error("'{key}' names unknown unit system '{value}'")]
    UnknownUnit { key: &'static str, value: String },

    #[error(
        "'measurement-system' must be one of 'metric', 'imperial' or 'both', \
         for others use 'topunit' and 'bottomunit' instead, got '{0}'"
    )]
    MeasurementSystem(String),

    #[error("'{key}' is out of range: {value}")]
    OutOfRange { key: &'static str, value: f64 },
}


//------------ RenderError ---------------------------------------------------

/// Drawing or writing the decoration failed.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl From<cairo::IoError> for RenderError {
    fn from(err: cairo::IoError) -> Self {
        match err {
            cairo::IoError::Cairo(err) => RenderError::Cairo(err),
            cairo::IoError::Io(err) => RenderError::Io(err),
        }
    }
}
