//! # Fixed-point Errors
//!
//! Ordinary overflow never produces an error: the operators and `*_with` methods resolve it
//! through the [`Overflow`](crate::Overflow) policy. Errors are only returned by the checked
//! conversions and operations, which refuse to clamp or wrap.
//!
//! # Examples
//!
//! ```rust
//! use fixedpt::{UFixed, Error, consts::{U3, U5}};
//! use std::str::FromStr;
//!
//! type Q5_3 = UFixed<U5, U3>;
//!
//! let twenty = Q5_3::from_f64(20.0);
//! let zero = Q5_3::default();
//!
//! assert_eq!(twenty.checked_add(twenty), Err(Error::Overflow));
//! assert_eq!(zero.checked_sub(twenty), Err(Error::Underflow));
//! assert_eq!(twenty.checked_div(zero), Err(Error::DivByZero));
//! assert_eq!(Q5_3::checked_from_f64(f64::NAN), Err(Error::NotANumber));
//!
//! assert_eq!(Q5_3::from_str("0.0.0"), Err(Error::InvalidStr("0.0.0".to_string())));
//! ```

use std::fmt::{self, Display, Formatter};

/// # Fixed-point errors
///
/// # Examples
///
/// ```rust
/// use fixedpt::{IFixed, Error, consts::U4};
///
/// type Q4_4 = IFixed<U4, U4>;
///
/// let seven = Q4_4::from_f64(7.0);
/// let minus_seven = Q4_4::from_f64(-7.0);
///
/// assert_eq!(seven.checked_mul(Q4_4::from_f64(2.0)), Err(Error::Overflow));
/// assert_eq!(minus_seven.checked_mul(Q4_4::from_f64(2.0)), Err(Error::Underflow));
/// assert_eq!(Q4_4::checked_from_f64(8.0), Err(Error::Overflow));
/// assert_eq!(Q4_4::checked_from_f64(-8.0), Ok(Q4_4::min_value()));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Result is larger than the maximum value of the fixed-point type.
    Overflow,

    /// Result is smaller than the minimum value of the fixed-point type.
    ///
    /// For unsigned types this is any negative result.
    Underflow,

    /// Set as the result of a division operation where the denominator is zero.
    DivByZero,

    /// A `NaN` was converted into a fixed-point type.
    NotANumber,

    /// Invalid string passed to `from_str`.
    InvalidStr(String),
}

impl From<&str> for Error {
    fn from(text: &str) -> Self {
        Error::InvalidStr(text.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Error::Overflow => f.write_str("Fixed-point overflow error"),
            Error::Underflow => f.write_str("Fixed-point underflow error"),
            Error::DivByZero => f.write_str("Divide by zero error"),
            Error::NotANumber => f.write_str("NaN cannot be converted to a fixed-point type"),
            Error::InvalidStr(string) =>
                write!(f, "Failed conversion from {:?} to fixed-point type", string),
        }
    }
}

impl std::error::Error for Error {}

/// Error handling with the `Result` type for the [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
