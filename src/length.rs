//! Rounding of bar lengths to legible numbers.

use std::fmt;
use crate::error::DomainError;


/// Rounds a length down into the 1-2-5 sequence.
///
/// The result has the same order of magnitude as `max_length` and a leading
/// digit of 5 if the leading digit of `max_length` is greater than 5, of 2
/// if it is greater than 2, and of 1 otherwise. Both boundaries are
/// exclusive, so 500 rounds to 200 and 200 rounds to 100.
///
/// Lengths below one round to zero as only whole numbers are returned.
pub fn round_bar_length(max_length: f64) -> Result<u64, DomainError> {
    if !max_length.is_finite() || max_length <= 0. {
        return Err(DomainError::InvalidLength(max_length))
    }
    // log10 may round across an integer right next to a power of ten.
    let mut digits = max_length.log10().floor() as i32;
    if 10f64.powi(digits) > max_length {
        digits -= 1;
    }
    else if 10f64.powi(digits + 1) <= max_length {
        digits += 1;
    }
    let pow10 = 10f64.powi(digits);
    let leading = (max_length / pow10).floor() as u64;

    let factor = if leading > 5 {
        5.
    }
    else if leading > 2 {
        2.
    }
    else {
        1.
    };
    let res = (factor * pow10).round();
    if res >= u64::MAX as f64 {
        return Err(DomainError::TooLong(max_length))
    }
    Ok(res as u64)
}


//------------ HalfLength ----------------------------------------------------

/// Displays half of a rounded length with at most one decimal.
///
/// Whole numbers are shown without a fractional part.
#[derive(Clone, Copy, Debug)]
pub struct HalfLength(pub u64);

impl fmt::Display for HalfLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        }
        else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}


//============ Tests =========================================================
