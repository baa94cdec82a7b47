#![doc = include_str!("../README.md")]
//!
#![doc = include_str!("doc/overflow_policy.doc")]

#![forbid(future_incompatible)]
#![warn(missing_docs, missing_debug_implementations, bare_trait_objects)]

use std::{
    cmp::Ordering,
    fmt::{self, Binary, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
    str::FromStr,
};

pub mod error;
pub mod storage;
pub mod arithmetic;
#[cfg(any(test, feature = "proptest"))]
pub mod proptest;

pub use crate::{
    error::{Error, Result},
    storage::{Layout, RawInt, RawOf, Storage},
    arithmetic::{Combine, Combined, Overflow},
};
pub use typenum::{self, consts};

/// Fixed-point number with `I` integer bits and `F` fractional bits.
///
/// The widths are [`typenum`] unsigned integers (re-exported as [`consts`]), and the raw value is
/// kept in the smallest primitive integer that holds `I + F` bits (see [`storage`]). Signed types
/// use two's-complement, with the sign bit counted in `I`.
///
/// Every instantiation is its own type. Arithmetic between different instantiations is
/// supported as long as the signedness matches, and produces the type with the larger of each
/// width (see [`Combined`]).
///
/// # Examples
///
/// ```rust
/// use fixedpt::{FixedPoint, consts::{U3, U4, U5}};
///
/// let a = FixedPoint::<U5, U3>::from_f64(8.25);
/// let b = FixedPoint::<U4, U4>::from_f64(2.5);
/// assert_eq!(std::mem::size_of_val(&a), 1);
/// assert_eq!(a.to_bit_string(), "01000.010");
///
/// let sum: FixedPoint<U5, U4> = a + b;
/// assert_eq!(sum.to_f64(), 10.75);
/// assert_eq!(sum.to_bit_string(), "01010.1100");
/// ```
pub struct FixedPoint<I, F, const SIGNED: bool = false>
where
    I: Layout<F, SIGNED>,
{
    raw: RawOf<I, F, SIGNED>,
    widths: PhantomData<(I, F)>,
}

/// Unsigned fixed-point number.
pub type UFixed<I, F> = FixedPoint<I, F, false>;

/// Signed (two's-complement) fixed-point number.
pub type IFixed<I, F> = FixedPoint<I, F, true>;

impl<I, F, const SIGNED: bool> FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    /// Number of integer bits (including the sign bit of signed types).
    pub const INT_BITS: u32 = <I as Layout<F, SIGNED>>::INT_BITS;

    /// Number of fractional bits.
    pub const FRAC_BITS: u32 = <I as Layout<F, SIGNED>>::FRAC_BITS;

    /// Total number of bits used by the raw value.
    pub const TOTAL_BITS: u32 = <I as Layout<F, SIGNED>>::TOTAL_BITS;

    /// `true` for two's-complement types.
    pub const IS_SIGNED: bool = SIGNED;

    /// Largest raw value.
    pub(crate) const RAW_MAX: i128 = if SIGNED {
        (1_i128 << (Self::TOTAL_BITS - 1)) - 1
    }
    else {
        (1_i128 << Self::TOTAL_BITS) - 1
    };

    /// Smallest raw value.
    pub(crate) const RAW_MIN: i128 = if SIGNED { -(1_i128 << (Self::TOTAL_BITS - 1)) } else { 0 };

    /// Mask of the `TOTAL_BITS` significant bits.
    const RAW_MASK: i128 = (1_i128 << Self::TOTAL_BITS) - 1;

    /// Mask of the fractional bits.
    const FRAC_MASK: i128 = (1_i128 << Self::FRAC_BITS) - 1;

    /// Scale factor (`2^FRAC_BITS`) as a float.
    const SCALE: f64 = (1_u64 << Self::FRAC_BITS) as f64;

    /// Create a fixed-point value from an already scaled raw integer.
    ///
    /// Bits outside of `TOTAL_BITS` are discarded, the same as storing into a bit field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, IFixed, consts::{U3, U4, U5}};
    ///
    /// assert_eq!(UFixed::<U5, U3>::from_raw(66).to_f64(), 8.25);
    /// assert_eq!(IFixed::<U4, U4>::from_raw(-24).to_f64(), -1.5);
    /// // Only the low 7 bits are kept.
    /// assert_eq!(UFixed::<U4, U3>::from_raw(0xFF).to_raw(), 0x7F);
    /// ```
    pub fn from_raw(raw: RawOf<I, F, SIGNED>) -> Self {
        Self::wrap_wide(raw.to_i128())
    }

    /// Return the raw (scaled) integer.
    ///
    /// Signed values are sign-extended to the width of the backing integer.
    #[inline]
    pub fn to_raw(&self) -> RawOf<I, F, SIGNED> {
        self.raw
    }

    /// Number of integer bits.
    #[inline]
    pub fn int_bits(&self) -> u32 {
        Self::INT_BITS
    }

    /// Number of fractional bits.
    #[inline]
    pub fn frac_bits(&self) -> u32 {
        Self::FRAC_BITS
    }

    /// Total number of bits.
    #[inline]
    pub fn total_bits(&self) -> u32 {
        Self::TOTAL_BITS
    }

    /// Largest raw value of this type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, IFixed, consts::{U3, U16, U17}};
    ///
    /// assert_eq!(UFixed::<U3, U3>::max_raw(), 0b111_111);
    /// assert_eq!(IFixed::<U17, U16>::max_raw(), 0xFFFF_FFFF);
    /// ```
    pub fn max_raw() -> RawOf<I, F, SIGNED> {
        RawInt::from_i128(Self::RAW_MAX)
    }

    /// Smallest raw value of this type (zero for unsigned types).
    pub fn min_raw() -> RawOf<I, F, SIGNED> {
        RawInt::from_i128(Self::RAW_MIN)
    }

    /// Largest value of this type.
    pub fn max_value() -> Self {
        Self::from_wide_unchecked(Self::RAW_MAX)
    }

    /// Smallest value of this type.
    pub fn min_value() -> Self {
        Self::from_wide_unchecked(Self::RAW_MIN)
    }

    /// Returns true if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.to_wide() < 0
    }

    /// Whole part of the value (`raw >> FRAC_BITS`).
    ///
    /// This is also the truncating conversion to an integer: the fractional bits are dropped
    /// without rounding. The shift is arithmetic, so negative values round towards negative
    /// infinity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, IFixed, consts::{U3, U4, U5}};
    ///
    /// assert_eq!(UFixed::<U5, U3>::from_f64(16.875).whole(), 16);
    /// assert_eq!(IFixed::<U4, U4>::from_f64(-1.5).whole(), -2);
    /// // The `From` conversions to Rust integers truncate towards zero instead.
    /// assert_eq!(i64::from(IFixed::<U4, U4>::from_f64(-1.5)), -1);
    /// ```
    pub fn whole(&self) -> RawOf<I, F, SIGNED> {
        RawInt::from_i128(self.to_wide() >> Self::FRAC_BITS)
    }

    /// Fractional bits of the value as an integer (`raw & (2^FRAC_BITS - 1)`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, IFixed, consts::{U3, U4, U5}};
    ///
    /// assert_eq!(UFixed::<U5, U3>::from_f64(16.875).frac(), 0b111);
    /// assert_eq!(IFixed::<U4, U4>::from_f64(-1.5).frac(), 0b1000);
    /// ```
    pub fn frac(&self) -> RawOf<I, F, SIGNED> {
        RawInt::from_i128(self.to_wide() & Self::FRAC_MASK)
    }

    /// Convert from [`f64`] to a fixed-point value, saturating at the limits of the type.
    ///
    /// The value is scaled by `2^FRAC_BITS` and rounded to the nearest raw value (half away from
    /// zero). Same as `from_f64_with(value, Overflow::Saturate)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, IFixed, consts::{U3, U5, U16, U17}};
    ///
    /// let a = UFixed::<U5, U3>::from_f64(8.25);
    /// assert_eq!(a.to_raw(), 66);
    /// // Rounded to the nearest eighth.
    /// assert_eq!(UFixed::<U5, U3>::from_f64(8.3).to_f64(), 8.25);
    /// // Saturates at the maximum.
    /// let zz = IFixed::<U17, U16>::from_f64(8589934591.25);
    /// assert_eq!(zz, IFixed::<U17, U16>::max_value());
    /// ```
    pub fn from_f64(value: f64) -> Self {
        Self::from_f64_with(value, Overflow::Saturate)
    }

    /// Convert from [`f64`] to a fixed-point value using the given overflow policy.
    ///
    /// With [`Overflow::Saturate`], values beyond the range of the type are clamped to the
    /// largest or smallest value. With [`Overflow::Wrap`], the rounded raw value is wrapped modulo
    /// `2^TOTAL_BITS`. `NaN` is converted to zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, Overflow, consts::{U3, U5}};
    ///
    /// type Q5_3 = UFixed<U5, U3>;
    ///
    /// assert_eq!(Q5_3::from_f64_with(40.0, Overflow::Saturate).to_f64(), 31.875);
    /// assert_eq!(Q5_3::from_f64_with(40.0, Overflow::Wrap).to_f64(), 8.0);
    /// assert_eq!(Q5_3::from_f64_with(-1.0, Overflow::Saturate).to_f64(), 0.0);
    /// ```
    pub fn from_f64_with(value: f64, overflow: Overflow) -> Self {
        if value.is_nan() {
            return Self::default();
        }
        // `as` saturates infinities at the i128 limits.
        Self::from_wide(Self::scale_f64(value) as i128, overflow)
    }

    /// Convert from [`f64`], returning an error instead of clamping or wrapping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, Error, consts::{U3, U5}};
    ///
    /// type Q5_3 = UFixed<U5, U3>;
    ///
    /// assert_eq!(Q5_3::checked_from_f64(31.875), Ok(Q5_3::max_value()));
    /// assert_eq!(Q5_3::checked_from_f64(32.0), Err(Error::Overflow));
    /// assert_eq!(Q5_3::checked_from_f64(-0.5), Err(Error::Underflow));
    /// ```
    pub fn checked_from_f64(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(Error::NotANumber);
        }
        Self::from_wide_checked(Self::scale_f64(value) as i128)
    }

    /// Convert from [`f32`] to a fixed-point value, saturating at the limits of the type.
    pub fn from_f32(value: f32) -> Self {
        Self::from_f64(value as f64)
    }

    /// Convert from [`f32`] to a fixed-point value using the given overflow policy.
    pub fn from_f32_with(value: f32, overflow: Overflow) -> Self {
        Self::from_f64_with(value as f64, overflow)
    }

    /// Convert a fixed-point value to [`f64`].
    ///
    /// The integer part is the arithmetic shift `raw >> FRAC_BITS`. Each set fractional bit is
    /// added in as `2^-k`, starting from the least significant bit (`k = FRAC_BITS`). The result
    /// is exact for types of up to 53 bits, where `from_f64(x.to_f64()) == x` always holds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, IFixed, consts::{U3, U4, U5}};
    ///
    /// assert_eq!(UFixed::<U5, U3>::from_raw(0b01000_010).to_f64(), 8.25);
    /// assert_eq!(IFixed::<U4, U4>::from_raw(-1).to_f64(), -0.0625);
    /// ```
    pub fn to_f64(&self) -> f64 {
        let raw = self.to_wide();
        let mut fraction = 0.0_f64;
        let mut bits = raw & Self::FRAC_MASK;
        for k in (1..=Self::FRAC_BITS).rev() {
            if 0 != (bits & 1) {
                fraction += 1.0 / (1_u64 << k) as f64;
            }
            bits >>= 1;
        }
        ((raw >> Self::FRAC_BITS) as f64) + fraction
    }

    /// Convert a fixed-point value to [`f32`].
    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }

    /// Render the raw bits, most significant first, with a `.` between the integer and the
    /// fractional bits.
    ///
    /// The separator is left out for types without fractional bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, IFixed, consts::{U0, U3, U4, U5, U8}};
    ///
    /// assert_eq!(UFixed::<U5, U3>::from_f64(8.25).to_bit_string(), "01000.010");
    /// assert_eq!(IFixed::<U4, U4>::from_f64(-1.5).to_bit_string(), "1110.1000");
    /// assert_eq!(UFixed::<U8, U0>::from_f64(5.0).to_bit_string(), "00000101");
    /// ```
    pub fn to_bit_string(&self) -> String {
        let mut text = self.binary_digits();
        if 0 != Self::FRAC_BITS {
            text.insert(Self::INT_BITS as usize, '.');
        }
        text
    }

    /// The `TOTAL_BITS` binary digits of the raw value.
    fn binary_digits(&self) -> String {
        format!("{:0width$b}", self.to_wide() & Self::RAW_MASK, width = Self::TOTAL_BITS as usize)
    }

    /// Scale a float by `2^FRAC_BITS` and round it.
    #[inline]
    fn scale_f64(value: f64) -> f64 {
        (value * Self::SCALE).round()
    }

    /// Integer part of the value, truncated towards zero.
    #[inline]
    fn truncated_wide(self) -> i128 {
        self.to_wide() / (1_i128 << Self::FRAC_BITS)
    }

    /// Widen the raw value to `i128`.
    #[inline]
    pub(crate) fn to_wide(self) -> i128 {
        self.raw.to_i128()
    }

    /// Create a value from a wide raw value already known to be in range.
    #[inline]
    pub(crate) fn from_wide_unchecked(value: i128) -> Self {
        debug_assert!((Self::RAW_MIN..=Self::RAW_MAX).contains(&value),
            "raw value {} out of range", value);
        FixedPoint {
            raw: RawInt::from_i128(value),
            widths: PhantomData,
        }
    }

    /// Create a value from a wide raw value, keeping only the low `TOTAL_BITS` bits.
    pub(crate) fn wrap_wide(value: i128) -> Self {
        let low = value & Self::RAW_MASK;
        let sign_bit = 1_i128 << (Self::TOTAL_BITS - 1);
        if SIGNED && 0 != (low & sign_bit) {
            Self::from_wide_unchecked(low - (1_i128 << Self::TOTAL_BITS))
        }
        else {
            Self::from_wide_unchecked(low)
        }
    }

    /// Create a value from a wide raw value, resolving overflow with the given policy.
    pub(crate) fn from_wide(value: i128, overflow: Overflow) -> Self {
        match overflow {
            Overflow::Saturate => Self::from_wide_unchecked(value.clamp(Self::RAW_MIN, Self::RAW_MAX)),
            Overflow::Wrap => Self::wrap_wide(value),
        }
    }

    /// Create a value from a wide raw value, or the error describing why it doesn't fit.
    pub(crate) fn from_wide_checked(value: i128) -> Result<Self> {
        if value > Self::RAW_MAX {
            Err(Error::Overflow)
        }
        else if value < Self::RAW_MIN {
            Err(Error::Underflow)
        }
        else {
            Ok(Self::from_wide_unchecked(value))
        }
    }
}

impl<I, F, const SIGNED: bool> Clone for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, F, const SIGNED: bool> Copy for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
}

impl<I, F, const SIGNED: bool> Default for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn default() -> Self {
        FixedPoint {
            raw: Default::default(),
            widths: PhantomData,
        }
    }
}

impl<I, F, const SIGNED: bool> PartialEq for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<I, F, const SIGNED: bool> Eq for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
}

impl<I, F, const SIGNED: bool> PartialOrd for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I, F, const SIGNED: bool> Ord for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<I, F, const SIGNED: bool> Hash for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<I, F, const SIGNED: bool> Debug for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FixedPoint")
            .field("int_bits", &Self::INT_BITS)
            .field("frac_bits", &Self::FRAC_BITS)
            .field("signed", &SIGNED)
            .field("bits", &self.to_bit_string())
            .field("value", &self.to_f64())
            .finish()
    }
}

impl<I, F, const SIGNED: bool> Display for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        Display::fmt(&self.to_f64(), f)
    }
}

impl<I, F, const SIGNED: bool> Binary for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.pad_integral(true, "0b", &self.binary_digits())
    }
}

impl<I, F, const SIGNED: bool> FromStr for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    type Err = Error;

    /// Parse a decimal string.
    ///
    /// Unlike [`FixedPoint::from_f64`], values that don't fit in the type are errors.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, Error, consts::{U3, U5}};
    /// use std::str::FromStr;
    ///
    /// type Q5_3 = UFixed<U5, U3>;
    ///
    /// assert_eq!(Q5_3::from_str("8.25"), Ok(Q5_3::from_f64(8.25)));
    /// assert_eq!(Q5_3::from_str("100"), Err(Error::Overflow));
    /// assert_eq!("eight".parse::<Q5_3>(), Err(Error::InvalidStr("eight".to_string())));
    /// ```
    fn from_str(text: &str) -> Result<Self> {
        let value = f64::from_str(text.trim()).map_err(|_| Error::from(text))?;
        Self::checked_from_f64(value)
    }
}

impl<I, F, const SIGNED: bool> From<f64> for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn from(src: f64) -> Self {
        Self::from_f64(src)
    }
}

impl<I, F, const SIGNED: bool> From<&f64> for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn from(src: &f64) -> Self {
        Self::from_f64(*src)
    }
}

impl<I, F, const SIGNED: bool> From<f32> for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn from(src: f32) -> Self {
        Self::from_f32(src)
    }
}

impl<I, F, const SIGNED: bool> From<&f32> for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn from(src: &f32) -> Self {
        Self::from_f32(*src)
    }
}

impl<I, F, const SIGNED: bool> From<FixedPoint<I, F, SIGNED>> for f64
where
    I: Layout<F, SIGNED>,
{
    fn from(src: FixedPoint<I, F, SIGNED>) -> Self {
        src.to_f64()
    }
}

impl<I, F, const SIGNED: bool> From<&FixedPoint<I, F, SIGNED>> for f64
where
    I: Layout<F, SIGNED>,
{
    fn from(src: &FixedPoint<I, F, SIGNED>) -> Self {
        src.to_f64()
    }
}

impl<I, F, const SIGNED: bool> From<FixedPoint<I, F, SIGNED>> for f32
where
    I: Layout<F, SIGNED>,
{
    fn from(src: FixedPoint<I, F, SIGNED>) -> Self {
        src.to_f32()
    }
}

impl<I, F, const SIGNED: bool> From<&FixedPoint<I, F, SIGNED>> for f32
where
    I: Layout<F, SIGNED>,
{
    fn from(src: &FixedPoint<I, F, SIGNED>) -> Self {
        src.to_f32()
    }
}

macro_rules! to_rust_int_impl {
    (@single $int: ty) => {
        impl<I, F, const SIGNED: bool> From<FixedPoint<I, F, SIGNED>> for $int
        where
            I: Layout<F, SIGNED>,
        {
            #[doc = concat!("Convert to [`", stringify!($int), "`], truncating the fraction towards \
                zero.")]
            ///
            /// An integer part that doesn't fit wraps, the same as an `as` cast between integers.
            fn from(src: FixedPoint<I, F, SIGNED>) -> Self {
                src.truncated_wide() as $int
            }
        }

        impl<I, F, const SIGNED: bool> From<&FixedPoint<I, F, SIGNED>> for $int
        where
            I: Layout<F, SIGNED>,
        {
            fn from(src: &FixedPoint<I, F, SIGNED>) -> Self {
                Self::from(*src)
            }
        }
    };
    ($($int: ty),+) => {
        $(to_rust_int_impl!(@single $int);)+
    };
}

to_rust_int_impl!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize);

#[cfg(test)]
mod tests {
    use super::{
        FixedPoint,
        UFixed,
        IFixed,
        Error,
        Overflow,
    };
    use crate::consts::*;
    use proptest::prelude::*;
    use typenum::Unsigned;
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
        mem::size_of,
        str::FromStr,
    };

    macro_rules! size_test {
        ($int: ident, $frac: ident, $bytes: literal) => {
            assert_eq!(size_of::<UFixed<$int, $frac>>(), $bytes,
                concat!("size of UFixed<", stringify!($int), ", ", stringify!($frac), ">"));
            assert_eq!(size_of::<IFixed<$int, $frac>>(), $bytes,
                concat!("size of IFixed<", stringify!($int), ", ", stringify!($frac), ">"));
        };
    }

    #[test]
    fn size_matches_storage() {
        size_test!(U1, U0, 1);
        size_test!(U5, U3, 1);
        size_test!(U4, U4, 1);
        size_test!(U5, U4, 2);
        size_test!(U6, U5, 2);
        size_test!(U16, U0, 2);
        size_test!(U16, U1, 4);
        size_test!(U17, U15, 4);
        size_test!(U17, U16, 8);
        size_test!(U32, U32, 8);
        size_test!(U1, U63, 8);
    }

    #[test]
    fn width_queries() {
        let a = UFixed::<U5, U3>::from_f64(8.25);
        assert_eq!(a.int_bits(), 5);
        assert_eq!(a.frac_bits(), 3);
        assert_eq!(a.total_bits(), 8);
        assert_eq!(UFixed::<U5, U3>::max_raw(), 0xFF);
        assert_eq!(UFixed::<U5, U3>::min_raw(), 0);
        assert_eq!(IFixed::<U5, U3>::max_raw(), 0x7F);
        assert_eq!(IFixed::<U5, U3>::min_raw(), -0x80);
        assert!(IFixed::<U5, U3>::IS_SIGNED);
        assert!(!UFixed::<U5, U3>::IS_SIGNED);
        assert_eq!(UFixed::<U3, U3>::max_value().to_bit_string(), "111.111");
    }

    #[test]
    fn verify_defaults() {
        assert_eq!(UFixed::<U5, U3>::default().to_raw(), 0);
        assert_eq!(IFixed::<U17, U16>::default().to_f64(), 0.0);
        assert_eq!(UFixed::<U64, U0>::default().to_bit_string(), "0".repeat(64));
    }

    #[test]
    fn literal_conversions() {
        let a = UFixed::<U5, U3>::from_f64(8.25);
        assert_eq!(a.to_f64(), 8.25);
        assert_eq!(a.to_f32(), 8.25);
        assert_eq!(a.to_bit_string(), "01000.010");
        let copy = a;
        assert_eq!(copy, a);

        let b = UFixed::<U4, U4>::from_f32(2.5);
        assert_eq!(b.to_f64(), 2.5);
        assert_eq!(b.to_bit_string(), "0010.1000");

        assert_eq!(f64::from(a), 8.25);
        assert_eq!(f32::from(&b), 2.5);
        assert_eq!(UFixed::<U5, U3>::from(8.25_f64), a);
        assert_eq!(UFixed::<U4, U4>::from(&2.5_f32), b);
    }

    #[test]
    fn saturating_construction() {
        // Just over the maximum value.
        let zz = IFixed::<U17, U16>::from_f64(8589934591.25);
        assert_eq!(zz.to_raw(), 0xFFFF_FFFF);
        assert_eq!(zz.whole(), 65535);
        assert_eq!(zz.frac(), 65535);
        assert_eq!(zz.to_bit_string(), "01111111111111111.1111111111111111");
        assert_eq!(size_of::<IFixed<U17, U16>>(), 8);

        assert_eq!(IFixed::<U4, U4>::from_f64(-100.0), IFixed::<U4, U4>::min_value());
        assert_eq!(IFixed::<U4, U4>::from_f64(f64::INFINITY), IFixed::<U4, U4>::max_value());
        assert_eq!(UFixed::<U4, U4>::from_f64(f64::NEG_INFINITY).to_raw(), 0);
        assert_eq!(UFixed::<U4, U4>::from_f64(f64::NAN).to_raw(), 0);
    }

    #[test]
    fn wrapping_construction() {
        // 40.0 * 8 = 320, 320 mod 256 = 64
        assert_eq!(UFixed::<U5, U3>::from_f64_with(40.0, Overflow::Wrap).to_raw(), 64);
        // 9.0 * 16 = 144, which is -112 as an 8-bit signed value
        assert_eq!(IFixed::<U4, U4>::from_f64_with(9.0, Overflow::Wrap).to_f64(), -7.0);
        assert_eq!(UFixed::<U4, U4>::from_f32_with(-1.0, Overflow::Wrap).to_raw(), 0xF0);
    }

    #[test]
    fn signed_values() {
        let neg = IFixed::<U5, U4>::from_f64(-1.5);
        assert!(neg.is_negative());
        assert_eq!(neg.to_raw(), -24);
        assert_eq!(neg.to_f64(), -1.5);
        assert_eq!(neg.whole(), -2);
        assert_eq!(neg.frac(), 8);
        assert_eq!(neg.to_bit_string(), "11110.1000");
        assert!(!IFixed::<U5, U4>::from_f64(1.5).is_negative());
        assert!(IFixed::<U5, U4>::from_f64(-1.5) < IFixed::<U5, U4>::from_f64(-1.0));
    }

    #[test]
    fn from_raw_wraps() {
        assert_eq!(UFixed::<U6, U5>::from_raw(0xFFFF).to_raw(), 0x7FF);
        assert_eq!(IFixed::<U2, U2>::from_raw(0b0111).to_raw(), 7);
        assert_eq!(IFixed::<U2, U2>::from_raw(0b1000).to_raw(), -8);
        assert_eq!(IFixed::<U2, U2>::from_raw(0b1_0000).to_raw(), 0);
        assert_eq!(UFixed::<U64, U0>::from_raw(u64::MAX).to_raw(), u64::MAX);
        assert_eq!(IFixed::<U32, U32>::from_raw(i64::MIN).to_raw(), i64::MIN);
    }

    #[test]
    fn integer_conversions() {
        let product = UFixed::<U5, U3>::from_f64(16.5);
        assert_eq!(i32::from(product), 16);
        assert_eq!(u8::from(&product), 0x10);

        let zz = IFixed::<U17, U16>::from_f64(8589934591.25);
        assert_eq!(i64::from(zz), 65535);
        assert_eq!(u64::from(zz), 65535);

        // Truncates towards zero, unlike whole().
        let negative = IFixed::<U4, U4>::from_f64(-1.5);
        assert_eq!(i32::from(negative), -1);
        assert_eq!(negative.whole(), -2);
        assert_eq!(i8::from(IFixed::<U4, U4>::from_f64(-0.0625)), 0);
        assert_eq!(i128::from(IFixed::<U64, U0>::min_value()), i64::MIN as i128);

        // Wraps when the integer part doesn't fit.
        assert_eq!(u8::from(UFixed::<U17, U16>::from_f64(300.5)), 44);
        assert_eq!(u8::from(negative), 255);
    }

    #[test]
    fn checked_conversions() {
        type Q4_4 = IFixed<U4, U4>;
        assert_eq!(Q4_4::checked_from_f64(7.9375), Ok(Q4_4::max_value()));
        assert_eq!(Q4_4::checked_from_f64(7.97), Err(Error::Overflow));
        assert_eq!(Q4_4::checked_from_f64(-8.0), Ok(Q4_4::min_value()));
        assert_eq!(Q4_4::checked_from_f64(-8.1), Err(Error::Underflow));
        assert_eq!(Q4_4::checked_from_f64(f64::NAN), Err(Error::NotANumber));
    }

    #[test]
    fn parse_strings() {
        assert_eq!(UFixed::<U5, U3>::from_str("8.25"), Ok(UFixed::<U5, U3>::from_f64(8.25)));
        assert_eq!(IFixed::<U5, U3>::from_str(" -2.5 "), Ok(IFixed::<U5, U3>::from_f64(-2.5)));
        assert_eq!(UFixed::<U5, U3>::from_str("32"), Err(Error::Overflow));
        assert_eq!(UFixed::<U5, U3>::from_str(""), Err(Error::InvalidStr(String::new())));
        assert_eq!("1e1".parse::<UFixed<U5, U3>>(), Ok(UFixed::<U5, U3>::from_f64(10.0)));
    }

    #[test]
    fn formatting() {
        let a = UFixed::<U5, U3>::from_f64(8.25);
        assert_eq!(format!("{}", a), "8.25");
        assert_eq!(format!("{:.3}", a), "8.250");
        assert_eq!(format!("{:b}", a), "01000010");
        assert_eq!(format!("{:#b}", a), "0b01000010");
        assert_eq!(format!("{:b}", IFixed::<U2, U2>::from_f64(-0.25)), "1111");
        assert_eq!(format!("{:?}", a),
            "FixedPoint { int_bits: 5, frac_bits: 3, signed: false, bits: \"01000.010\", value: 8.25 }");
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn hash_follows_equality() {
        let a = UFixed::<U6, U5>::from_f64(2.5);
        let b = UFixed::<U6, U5>::from_raw(80);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    macro_rules! round_trip_test {
        ($name: ident, $int: ident, $frac: ident, $signed: literal) => {
            proptest! {
                #[test]
                fn $name(
                    raw in FixedPoint::<$int, $frac, $signed>::RAW_MIN..=FixedPoint::<$int, $frac, $signed>::RAW_MAX,
                ) {
                    let value = FixedPoint::<$int, $frac, $signed>::from_wide_unchecked(raw);
                    let float = value.to_f64();
                    prop_assert_eq!(float, (raw as f64) / ((1_u64 << $frac::U32) as f64));
                    prop_assert_eq!(FixedPoint::<$int, $frac, $signed>::from_f64(float), value);
                    prop_assert_eq!(FixedPoint::<$int, $frac, $signed>::checked_from_f64(float), Ok(value));
                }
            }
        };
    }

    round_trip_test!(round_trip_u5_3, U5, U3, false);
    round_trip_test!(round_trip_i5_3, U5, U3, true);
    round_trip_test!(round_trip_u4_12, U4, U12, false);
    round_trip_test!(round_trip_i17_16, U17, U16, true);
    round_trip_test!(round_trip_u1_52, U1, U52, false);
    round_trip_test!(round_trip_i30_23, U30, U23, true);
    round_trip_test!(round_trip_u32_0, U32, U0, false);

    proptest! {
        #[test]
        fn whole_and_frac_rebuild_raw(value in any::<IFixed<U9, U7>>()) {
            let rebuilt = ((value.whole() as i32) << 7) | (value.frac() as i32);
            prop_assert_eq!(rebuilt, value.to_raw() as i32);
        }
    }

    proptest! {
        #[test]
        fn display_matches_f64(value in any::<UFixed<U20, U12>>()) {
            prop_assert_eq!(value.to_string(), value.to_f64().to_string());
            prop_assert_eq!(value.to_string().parse::<UFixed<U20, U12>>(), Ok(value));
        }
    }
}
