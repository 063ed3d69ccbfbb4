use thiserror::Error;

/// Configuration errors reported when constructing or reconfiguring a [`crate::ListWindow`].
///
/// The window computation divides by `row_height`, so degenerate geometry is rejected up front
/// instead of producing undefined ranges.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// `row_height` must be a positive number of pixels.
    #[error("row_height must be positive (got 0)")]
    ZeroRowHeight,
}
