use thiserror::Error;

/// Why a distribution was refused at table-construction time.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DistributionFault {
    /// No outcomes at all.
    #[error("distribution has no outcomes")]
    Empty,
    /// A probability below zero, or not a finite number.
    #[error("probability at index {index} is invalid: {value}")]
    NegativeProbability { index: usize, value: f64 },
    /// Probabilities do not add up to one within the configured tolerance.
    #[error("probabilities sum to {sum}, expected 1 ± {tolerance}")]
    SumOutOfTolerance { sum: f64, tolerance: f64 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AliasError {
    #[error("weight at index {index} is negative or not finite: {value}")]
    InvalidWeight { index: usize, value: f64 },

    #[error("total weight is zero; nothing to sample")]
    DegenerateDistribution,

    #[error("outcome at index {index} repeats an earlier outcome")]
    DuplicateOutcome { index: usize },

    #[error("invalid distribution: {reason}")]
    InvalidDistribution { reason: DistributionFault },

    #[error("sample size must be a positive integer, got {requested}")]
    InvalidSampleSize { requested: i64 },

    #[error("tolerance must be a finite, non-negative number, got {value}")]
    InvalidTolerance { value: f64 },
}

impl From<DistributionFault> for AliasError {
    fn from(reason: DistributionFault) -> Self {
        AliasError::InvalidDistribution { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_messages_reach_the_outer_error() {
        let err = AliasError::from(DistributionFault::SumOutOfTolerance {
            sum: 0.9,
            tolerance: 1e-6,
        });
        assert_eq!(
            err.to_string(),
            "invalid distribution: probabilities sum to 0.9, expected 1 ± 0.000001"
        );
        assert_eq!(
            DistributionFault::Empty.to_string(),
            "distribution has no outcomes"
        );
    }
}
