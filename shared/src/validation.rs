use thiserror::Error;

use crate::allocation::{
    AllocationVector, BALANCE_TOLERANCE, MAX_PERCENT, MIN_PERCENT, TARGET_TOTAL,
};
use crate::sector::Sector;

/// Why the server refused a submitted distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationRejected {
    #[error("Invalid input: {sector} must be a number")]
    NotANumber { sector: Sector },
    #[error("Invalid input: {sector} must be between 0 and 100, got {value:.1}")]
    OutOfRange { sector: Sector, value: f64 },
    #[error("Population distribution must total 100%. Current total: {total:.1}%")]
    BadTotal { total: f64 },
}

/// Authoritative check applied when a distribution is saved.
///
/// Unlike the client gate, a total exactly 0.1 away from 100 is accepted.
pub fn validate_submission(allocation: &AllocationVector) -> Result<(), AllocationRejected> {
    for (sector, value) in allocation.iter() {
        if !value.is_finite() {
            return Err(AllocationRejected::NotANumber { sector });
        }
        if !(MIN_PERCENT..=MAX_PERCENT).contains(&value) {
            return Err(AllocationRejected::OutOfRange { sector, value });
        }
    }

    let total = allocation.total();
    // inclusive tolerance plus summation slack
    if (total - TARGET_TOTAL).abs() > BALANCE_TOLERANCE + f64::EPSILON * TARGET_TOTAL {
        return Err(AllocationRejected::BadTotal { total });
    }
    Ok(())
}
