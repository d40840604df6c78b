// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type returned by every fallible operation in the
//! crate.

use failure::Fail;

/// Everything that can go wrong while generating or emitting an
/// artwork.  Argument problems are always reported before any buffer
/// is allocated, so an error never comes with a partial result.
#[derive(Debug, Fail, PartialEq)]
pub enum FractalError {
    /// A dimension, size, count or bound that cannot be honoured.
    #[fail(display = "invalid argument: {}", _0)]
    InvalidArgument(String),

    /// An iteration step that cannot be computed, such as the zero
    /// derivative of Newton's method at the origin.  The evaluator
    /// maps this to a sentinel; it never escapes to callers.
    #[fail(display = "numeric degenerate: {}", _0)]
    NumericDegenerate(String),

    /// The renderer could not produce or write its image.
    #[fail(display = "render failure: {}", _0)]
    Render(String),

    /// A sampling thread died before finishing its band.
    #[fail(display = "worker failure: {}", _0)]
    Worker(String),
}

impl FractalError {
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        FractalError::InvalidArgument(msg.into())
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, FractalError>;
