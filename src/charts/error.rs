//! Chart layer error types

use thiserror::Error;

use super::dataset::ChartSlot;

/// Errors raised while decoding, validating or rendering chart data
#[derive(Error, Debug)]
pub enum ChartError {
    /// Endpoint body did not match the aggregate payload shape
    #[error("Failed to decode chart data: {0}")]
    Decode(String),

    /// Labels and values are not positionally paired
    #[error("Dataset for {slot} has {labels} labels but {values} values")]
    LengthMismatch {
        slot: ChartSlot,
        labels: usize,
        values: usize,
    },

    /// NaN or infinite value in a series
    #[error("Dataset for {slot} has a non-finite value at index {index}")]
    NonFiniteValue { slot: ChartSlot, index: usize },

    /// The page has no mount point for this slot
    #[error("No mount point for the {0} chart")]
    MissingMount(ChartSlot),

    /// The charting library refused to build the chart
    #[error("Chart backend error for {slot}: {message}")]
    Backend { slot: ChartSlot, message: String },
}

/// Result type for chart operations
pub type ChartResult<T> = Result<T, ChartError>;
