use std::io;

use thiserror::Error;

/// Errors surfaced by the simulation and its exporters.
///
/// Numeric divergence is not an error: an unstable `dt` simply drives the
/// fields to non-finite values.
#[derive(Debug, Error)]
pub enum RdError {
    /// `update()` was called before `initialise()`.
    #[error("system has not been initialised")]
    NotInitialised,

    /// An initialiser or reaction returned a field of the wrong shape.
    #[error("{what} returned a {got:?} field, expected {expected:?}")]
    ShapeMismatch {
        what: String,
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// An animation was requested from zero frames.
    #[error("recording has no frames")]
    EmptyRecording,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
