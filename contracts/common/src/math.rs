//! Checked Math for pool accounting
//!
//! Unsigned integers only. Division truncates; any overflow surfaces as
//! `ArithmeticOverflow` instead of wrapping.

use crate::errors::{PoolError, PoolResult};
use crate::types::Amount;

/// `a + b`, failing on overflow
pub fn checked_add(a: Amount, b: Amount) -> PoolResult<Amount> {
    a.checked_add(b).ok_or(PoolError::ArithmeticOverflow)
}

/// `a - b`, failing on underflow
pub fn checked_sub(a: Amount, b: Amount) -> PoolResult<Amount> {
    a.checked_sub(b).ok_or(PoolError::ArithmeticOverflow)
}

/// Floor of `amount * numerator / denominator`
///
/// The product is widened to `u128`; the quotient must fit back into
/// `Amount`.
pub fn mul_div_floor(amount: Amount, numerator: Amount, denominator: Amount) -> PoolResult<Amount> {
    let quotient = (amount as u128)
        .checked_mul(numerator as u128)
        .ok_or(PoolError::ArithmeticOverflow)?
        .checked_div(denominator as u128)
        .ok_or(PoolError::ArithmeticOverflow)?;

    Amount::try_from(quotient).map_err(|_| PoolError::ArithmeticOverflow)
}

/// Reward share for a member holding `balance` out of `pool_total`
///
/// `floor(reward * balance / pool_total)`
pub fn proportional_share(reward: Amount, balance: Amount, pool_total: Amount) -> PoolResult<Amount> {
    mul_div_floor(reward, balance, pool_total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_overflow() {
        assert_eq!(checked_add(1, 2), Ok(3));
        assert_eq!(checked_add(Amount::MAX, 1), Err(PoolError::ArithmeticOverflow));
    }

    #[test]
    fn test_checked_sub_underflow() {
        assert_eq!(checked_sub(5, 2), Ok(3));
        assert_eq!(checked_sub(2, 5), Err(PoolError::ArithmeticOverflow));
    }

    #[test]
    fn test_proportional_share_truncates() {
        // 60 * 100 / 600 = 10
        assert_eq!(proportional_share(60, 100, 600), Ok(10));
        // 10 * 1 / 3 = 3.33 -> 3
        assert_eq!(proportional_share(10, 1, 3), Ok(3));
        // sole member receives everything
        assert_eq!(proportional_share(77, 500, 500), Ok(77));
    }

    #[test]
    fn test_wide_product_does_not_overflow() {
        let share = proportional_share(Amount::MAX, Amount::MAX / 2, Amount::MAX).unwrap();
        assert_eq!(share, Amount::MAX / 2);
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(mul_div_floor(1, 1, 0), Err(PoolError::ArithmeticOverflow));
    }

    #[test]
    fn test_quotient_too_large() {
        assert_eq!(mul_div_floor(Amount::MAX, 2, 1), Err(PoolError::ArithmeticOverflow));
    }
}
