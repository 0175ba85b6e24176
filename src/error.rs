//! Error types for vehicle packing.

use thiserror::Error;

/// Result type alias for packing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a packing run.
#[derive(Debug, Error)]
pub enum Error {
    /// A product record, the vehicle or the packing configuration is malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The product catalog could not be read.
    #[error("Product source unavailable: {0}")]
    SourceUnavailable(String),

    /// The result could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A report or run log could not be written.
    #[error("Output error: {0}")]
    Output(String),
}

/// Per-product placement failure. Never aborts a run; it is recorded in the
/// unplaced report instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CapacityError {
    #[error(
        "no free space admits product {product_id} in any orientation \
         (padded {length:.2} x {breadth:.2} x {height:.2})"
    )]
    NoFit {
        product_id: String,
        length: f64,
        breadth: f64,
        height: f64,
    },
}
