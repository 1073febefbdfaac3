//! Error and warning types for pixcmap-core
//!
//! Every fallible operation returns [`Result`]. Parameter problems that
//! can be corrected locally are not errors: the operation substitutes a
//! safe value and hands a [`Warning`] back to the caller.
//!
//! # See also
//!
//! C Leptonica uses integer return codes and `L_WARNING` / `L_ERROR` macros.
//! This module replaces those with `Result<T, Error>` and returned warnings.

use std::fmt;

use thiserror::Error;

/// pixcmap error type
#[derive(Error, Debug)]
pub enum Error {
    /// Colormap depth is not 1, 2, 4 or 8
    #[error("invalid colormap depth: {0} bpp (must be 1, 2, 4 or 8)")]
    InvalidDepth(u32),

    /// Null handle or absent input
    #[error("null or empty input: {0}")]
    NullInput(&'static str),

    /// Index does not refer to a defined entry
    #[error("index out of range: {index} >= {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// No free slot remains
    #[error("no free color entries (capacity {capacity})")]
    CapacityExhausted { capacity: usize },

    /// Numeric parameter outside its domain
    #[error("parameter out of range: {0}")]
    InvalidRange(String),

    /// Operation needs at least one defined entry
    #[error("colormap has no colors")]
    EmptyColormap,

    /// Serialized colormap could not be parsed
    #[error("malformed colormap data: {0}")]
    MalformedInput(String),

    /// Memory allocation failed
    #[error("memory allocation failed")]
    AllocationFailed,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for colormap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable anomaly reported by an operation that carried on anyway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warning {
    /// `gamma` was not > 0.0; 1.0 was used instead
    GammaReset { requested: f32 },
    /// contrast `factor` was negative; 0.0 was used instead
    ContrastFactorReset { requested: f32 },
    /// `destroy` was called on a handle that held no colormap
    DestroyEmptyHandle,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::GammaReset { requested } => {
                write!(f, "gamma must be > 0.0 (got {requested}); setting to 1.0")
            }
            Warning::ContrastFactorReset { requested } => {
                write!(f, "factor must be >= 0.0 (got {requested}); setting to 0.0")
            }
            Warning::DestroyEmptyHandle => write!(f, "colormap handle is already empty"),
        }
    }
}
