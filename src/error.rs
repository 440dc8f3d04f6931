//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`RunError`] - Errors from the combined button and display loop
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level SPI errors
//!
//! Out-of-range pixel coordinates, brightness levels and malformed upstream
//! messages are never errors: they are clamped or ignored at the call site.
//!
//! ## Example
//!
//! ```
//! use matrix_informer::{Builder, BuilderError};
//!
//! // Missing segment count
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingSegments)));
//!
//! // Chain too long
//! let result = Builder::new().segments(40).build();
//! assert!(result.is_err());
//! ```

use crate::interface::MatrixInterface;

/// Maximum number of chained segments
///
/// Bounds the per-transaction word buffer used by the interface.
pub const MAX_SEGMENTS: u8 = 32;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
#[derive(Debug)]
pub enum Error<I: MatrixInterface> {
    /// Interface error (SPI)
    ///
    /// Wraps the underlying hardware error from the [`MatrixInterface`] implementation.
    Interface(I::Error),
    /// Frame buffer is too small for the chain
    ///
    /// The provided buffer must be at least `8 * segments` bytes.
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: MatrixInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: MatrixInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug)]
pub enum BuilderError {
    /// Segment count was not specified
    ///
    /// [`Builder::segments()`](crate::config::Builder::segments) must be called before building.
    MissingSegments,
    /// Segment count outside `1..=MAX_SEGMENTS`
    InvalidSegments {
        /// Number of segments requested
        segments: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingSegments => write!(f, "Segment count must be specified"),
            Self::InvalidSegments { segments } => write!(
                f,
                "Invalid segment count {segments} (must be 1..={MAX_SEGMENTS})"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors from the combined button and display loop
///
/// Returned by [`Informer::step`](crate::informer::Informer::step).
#[derive(Debug)]
pub enum RunError<I: MatrixInterface, E> {
    /// Display error
    Display(Error<I>),
    /// Button input pin error
    Input(E),
}

impl<I: MatrixInterface, E> From<Error<I>> for RunError<I, E> {
    fn from(error: Error<I>) -> Self {
        Self::Display(error)
    }
}

impl<I: MatrixInterface, E: core::fmt::Debug> core::fmt::Display for RunError<I, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Display(e) => write!(f, "Display error: {e}"),
            Self::Input(e) => write!(f, "Button input error: {e:?}"),
        }
    }
}

impl<I, E> core::error::Error for RunError<I, E>
where
    I: MatrixInterface + core::fmt::Debug,
    E: core::fmt::Debug,
{
}
