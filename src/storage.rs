//! # Backing storage selection
//!
//! Every fixed-point type stores its raw value in the smallest primitive integer that can hold
//! `INT_BITS + FRAC_BITS` bits. The selection is done entirely by trait resolution over
//! [`typenum`] widths, so a [`FixedPoint`](crate::FixedPoint) is exactly as large as its backing
//! integer.
//!
//! | total bits | unsigned | signed |
//! |------------|----------|--------|
//! | 1 - 8      | `u8`     | `i8`   |
//! | 9 - 16     | `u16`    | `i16`  |
//! | 17 - 32    | `u32`    | `i32`  |
//! | 33 - 64    | `u64`    | `i64`  |
//!
//! Total widths of zero or more than 64 bits, and integer widths of zero, have no [`Layout`] and
//! are rejected at compile time.
//!
//! ```compile_fail
//! use fixedpt::{UFixed, consts::{U0, U8}};
//!
//! let no_integer_bits = UFixed::<U0, U8>::from_f64(0.5);
//! ```
//!
//! ```compile_fail
//! use fixedpt::{UFixed, consts::{U33, U32}};
//!
//! let too_wide = UFixed::<U33, U32>::from_f64(0.5);
//! ```

use std::{
    fmt::{Binary, Debug, Display},
    hash::Hash,
    ops::Add,
};
use typenum::{
    consts::*,
    marker_traits::{NonZero, Unsigned},
    operator_aliases::Sum,
};

mod sealed {
    pub trait Sealed {}
}

/// Primitive integer used as the backing storage of a fixed-point value.
///
/// All arithmetic is carried out on `i128`, which holds every 64-bit value and every product of
/// two of them. This trait is sealed and implemented only for the eight primitive integer types
/// from 8 to 64 bits.
pub trait RawInt:
    Copy + Default + Eq + Ord + Hash + Debug + Display + Binary + Send + Sync + 'static
    + sealed::Sealed
{
    /// Size of the integer in bits.
    const BITS: u32;

    /// `true` for the `i*` types.
    const SIGNED: bool;

    /// Widen to `i128` (sign-extending the signed types).
    fn to_i128(self) -> i128;

    /// Narrow from `i128`, keeping the low `BITS` bits.
    fn from_i128(value: i128) -> Self;
}

macro_rules! raw_int_impl {
    ($($int: ident),+) => {
        $(
            impl sealed::Sealed for $int {}

            impl RawInt for $int {
                const BITS: u32 = <$int>::BITS;
                const SIGNED: bool = <$int>::MIN != 0;

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn from_i128(value: i128) -> Self {
                    value as $int
                }
            }
        )+
    };
}

raw_int_impl!(u8, u16, u32, u64, i8, i16, i32, i64);

/// Map a total bit width to the smallest backing integer that holds it.
///
/// Implemented for the [`typenum`] widths `U1` through `U64`. The `SIGNED` parameter selects
/// between the `u*` and `i*` integers of the same size.
pub trait Storage<const SIGNED: bool> {
    /// Backing integer for this width.
    type Raw: RawInt;
}

macro_rules! storage_impl {
    ($ux: ident, $ix: ident; $($width: ident),+) => {
        $(
            impl Storage<false> for $width {
                type Raw = $ux;
            }

            impl Storage<true> for $width {
                type Raw = $ix;
            }
        )+
    };
}

storage_impl!(u8, i8; U1, U2, U3, U4, U5, U6, U7, U8);
storage_impl!(u16, i16; U9, U10, U11, U12, U13, U14, U15, U16);
storage_impl!(u32, i32; U17, U18, U19, U20, U21, U22, U23, U24, U25, U26, U27, U28, U29, U30,
    U31, U32);
storage_impl!(u64, i64; U33, U34, U35, U36, U37, U38, U39, U40, U41, U42, U43, U44, U45, U46,
    U47, U48, U49, U50, U51, U52, U53, U54, U55, U56, U57, U58, U59, U60, U61, U62, U63, U64);

/// Bit layout of a fixed-point type: an integer width (`Self`) paired with a fractional width
/// (`F`) and a signedness.
///
/// This is implemented for every integer width that is non-zero and whose total width with `F`
/// has a [`Storage`]. It is the only bound needed to name a [`FixedPoint`](crate::FixedPoint).
///
/// # Examples
///
/// ```rust
/// use fixedpt::{Layout, consts::{U3, U5, U16, U17}};
///
/// assert_eq!(<U5 as Layout<U3, false>>::TOTAL_BITS, 8);
/// assert_eq!(<U17 as Layout<U16, true>>::TOTAL_BITS, 33);
///
/// let raw: <U17 as Layout<U16, true>>::Raw = -1_i64;
/// assert_eq!(raw, -1);
/// ```
pub trait Layout<F, const SIGNED: bool> {
    /// Backing integer of the layout.
    type Raw: RawInt;

    /// Number of integer bits (including the sign bit for signed layouts).
    const INT_BITS: u32;

    /// Number of fractional bits.
    const FRAC_BITS: u32;

    /// Total number of significant bits in the raw value.
    const TOTAL_BITS: u32 = Self::INT_BITS + Self::FRAC_BITS;
}

impl<I, F, const SIGNED: bool> Layout<F, SIGNED> for I
where
    I: Unsigned + NonZero + Add<F>,
    F: Unsigned,
    Sum<I, F>: Storage<SIGNED>,
{
    type Raw = <Sum<I, F> as Storage<SIGNED>>::Raw;

    const INT_BITS: u32 = I::U32;
    const FRAC_BITS: u32 = F::U32;
}

/// Shorthand for the backing integer of a layout.
pub type RawOf<I, F, const SIGNED: bool> = <I as Layout<F, SIGNED>>::Raw;
