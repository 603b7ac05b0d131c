//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `DioError` as one
//! variant with `#[from]`.

use thiserror::Error;

/// Errors raised by `dio-core` validation.
#[derive(Debug, Error)]
pub enum DioError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `dio-core`.
pub type DioResult<T> = Result<T, DioError>;
