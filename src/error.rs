//! Error taxonomy for the mining core

/// Errors raised by the encoder, the miner and the rule generator.
///
/// Every variant is detected before any counting starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MiningError {
    /// The transaction collection was empty
    #[error("no transactions to analyse")]
    EmptyInput,

    /// Transactions were present but none of them contained an item
    #[error("no items found in any transaction")]
    NoItems,

    /// A threshold fell outside the half-open range (0, 1]
    #[error("{name} must be in (0, 1], got {value}")]
    InvalidThreshold {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
    },

    /// A maximum itemset length of zero was requested
    #[error("max_len must be at least 1")]
    InvalidMaxLen,
}

/// Check that `value` lies in (0, 1]. NaN is rejected.
pub(crate) fn validate_threshold(name: &'static str, value: f64) -> Result<(), MiningError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(MiningError::InvalidThreshold { name, value })
    }
}
