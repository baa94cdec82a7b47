//! # Fixed-point arithmetic
//!
//! Binary operations are defined between any two [`FixedPoint`] types of the same signedness. The
//! result type has the larger integer width and the larger fractional width of the two operands
//! (see [`Combine`]). Before the operation, the operand with fewer fractional bits is shifted left
//! so that both raw values share the scale of the result. All intermediate values are held in
//! `i128`, which holds the full product of any two 64-bit raw values.
//!
//! | operation | `Overflow::Saturate` (default)           | `Overflow::Wrap`   |
//! |-----------|------------------------------------------|--------------------|
//! | `+`       | clamp to max (and to min when signed)    | modulo `2^TOTAL`   |
//! | `*`       | clamp to max (and to min when signed)    | modulo `2^TOTAL`   |
//! | `-`       | modulo `2^TOTAL`                         | modulo `2^TOTAL`   |
//! | `/`       | modulo `2^TOTAL`                         | modulo `2^TOTAL`   |
//!
//! Subtraction and division always wrap. Use [`FixedPoint::checked_sub`] and
//! [`FixedPoint::checked_div`] to detect their overflow.
//!
//! The operators use the default policy. The `*_with` methods take it explicitly.
//!
//! ```rust
//! use fixedpt::{UFixed, Overflow, consts::{U3, U4, U5}};
//!
//! let a = UFixed::<U5, U3>::from_f64(8.25);
//! let b = UFixed::<U4, U4>::from_f64(2.5);
//!
//! // Mixed widths combine into UFixed<U5, U4>.
//! let sum: UFixed<U5, U4> = a + b;
//! assert_eq!(sum.to_bit_string(), "01010.1100");
//!
//! let big = UFixed::<U5, U3>::from_f64(20.0);
//! assert_eq!((big + big).to_f64(), 31.875);
//! assert_eq!(big.add_with(big, Overflow::Wrap).to_f64(), 8.0);
//! ```
//!
//! Operands of different signedness have no operator:
//!
//! ```compile_fail
//! use fixedpt::{IFixed, UFixed, consts::{U3, U5}};
//!
//! let _ = UFixed::<U5, U3>::from_f64(1.0) + IFixed::<U5, U3>::from_f64(1.0);
//! ```
//!
//! Neither do operands whose combined width is over 64 bits:
//!
//! ```compile_fail
//! use fixedpt::{UFixed, consts::{U4, U60}};
//!
//! let _ = UFixed::<U60, U4>::default() * UFixed::<U4, U60>::default();
//! ```

use std::ops::{
    Add,
    AddAssign,
    Div,
    DivAssign,
    Mul,
    MulAssign,
    Sub,
    SubAssign,
};
use typenum::{
    operator_aliases::Maximum,
    type_operators::Max,
};
use crate::{
    error::{Error, Result},
    storage::Layout,
    FixedPoint,
};

/// Overflow policy for fixed-point arithmetic and conversions.
///
/// # Examples
///
/// ```rust
/// use fixedpt::{IFixed, Overflow, consts::U4};
///
/// type Q4_4 = IFixed<U4, U4>;
///
/// let seven = Q4_4::from_f64(7.0);
/// let two = Q4_4::from_f64(2.0);
///
/// assert_eq!(Overflow::default(), Overflow::Saturate);
/// assert_eq!(seven.mul_with(two, Overflow::Saturate).to_bit_string(), "0111.1111");
/// // Same-sign products keep a clear sign bit.
/// assert_eq!(seven.mul_with(two, Overflow::Wrap).to_f64(), 6.0);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Overflow {
    /// Results outside of the range of the type are clamped to the largest or smallest value.
    #[default]
    Saturate,

    /// Results outside of the range of the type keep only the low `TOTAL_BITS` bits.
    Wrap,
}

/// Width combination of two fixed-point layouts.
///
/// Implemented for integer width `Self` with fractional width `F1`, combined with integer width
/// `I2` and fractional width `F2`, whenever the widened layout `(max(Self, I2), max(F1, F2))` fits
/// in 64 bits.
pub trait Combine<F1, I2, F2, const SIGNED: bool>: Layout<F1, SIGNED> {
    /// Integer width of the combined layout.
    type Int: Layout<Self::Frac, SIGNED>;

    /// Fractional width of the combined layout.
    type Frac;
}

impl<I1, F1, I2, F2, const SIGNED: bool> Combine<F1, I2, F2, SIGNED> for I1
where
    I1: Layout<F1, SIGNED> + Max<I2>,
    I2: Layout<F2, SIGNED>,
    F1: Max<F2>,
    Maximum<I1, I2>: Layout<Maximum<F1, F2>, SIGNED>,
{
    type Int = Maximum<I1, I2>;
    type Frac = Maximum<F1, F2>;
}

/// Result type of a binary operation between `FixedPoint<I1, F1, SIGNED>` and
/// `FixedPoint<I2, F2, SIGNED>`.
///
/// # Examples
///
/// ```rust
/// use fixedpt::{Combined, UFixed, consts::{U2, U3, U4, U5}};
///
/// let product: Combined<U2, U4, U5, U3, false> =
///     UFixed::<U2, U4>::from_f64(2.25) * UFixed::<U5, U3>::from_f64(1.5);
/// let same: UFixed<U5, U4> = product;
/// assert_eq!(same.to_f64(), 3.375);
/// ```
pub type Combined<I1, F1, I2, F2, const SIGNED: bool> = FixedPoint<
    <I1 as Combine<F1, I2, F2, SIGNED>>::Int,
    <I1 as Combine<F1, I2, F2, SIGNED>>::Frac,
    SIGNED,
>;

/// Raw-value kernels, run on the result type with operands already aligned to its scale.
impl<I, F, const SIGNED: bool> FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    /// Raw value of `value` shifted to the scale of this type.
    #[inline]
    fn align<I2, F2>(value: FixedPoint<I2, F2, SIGNED>) -> i128
    where
        I2: Layout<F2, SIGNED>,
    {
        value.to_wide() << (Self::FRAC_BITS - FixedPoint::<I2, F2, SIGNED>::FRAC_BITS)
    }

    fn add_aligned(lhs: i128, rhs: i128, overflow: Overflow) -> Self {
        Self::from_wide(lhs + rhs, overflow)
    }

    fn sub_aligned(lhs: i128, rhs: i128) -> Self {
        Self::wrap_wide(lhs - rhs)
    }

    fn mul_aligned(lhs: i128, rhs: i128, overflow: Overflow) -> Self {
        let same_sign = (lhs < 0) == (rhs < 0);
        let product = match (lhs.checked_mul(rhs), overflow) {
            (Some(product), _) => product >> Self::FRAC_BITS,
            (None, Overflow::Wrap) => lhs.wrapping_mul(rhs) >> Self::FRAC_BITS,
            (None, Overflow::Saturate) => if same_sign { i128::MAX } else { i128::MIN },
        };
        let result = Self::from_wide(product, overflow);
        if SIGNED && same_sign && result.is_negative() {
            // Same-sign products can't be negative.
            Self::from_wide_unchecked((result.to_wide() & Self::RAW_MASK) & Self::RAW_MAX)
        }
        else {
            result
        }
    }

    fn div_aligned(lhs: i128, rhs: i128) -> Self {
        if 0 == rhs {
            panic!("attempt to divide by zero");
        }
        Self::wrap_wide(Self::div_quotient(lhs, rhs) as i128)
    }

    /// Quotient scaled to this type and rounded, as a float.
    #[inline]
    fn div_quotient(lhs: i128, rhs: i128) -> f64 {
        ((lhs as f64 / rhs as f64) * Self::SCALE).round()
    }

    fn checked_mul_aligned(lhs: i128, rhs: i128) -> Result<Self> {
        match lhs.checked_mul(rhs) {
            Some(product) => Self::from_wide_checked(product >> Self::FRAC_BITS),
            None if (lhs < 0) == (rhs < 0) => Err(Error::Overflow),
            None => Err(Error::Underflow),
        }
    }

    fn checked_div_aligned(lhs: i128, rhs: i128) -> Result<Self> {
        if 0 == rhs {
            return Err(Error::DivByZero);
        }
        // `as` saturates, which keeps out-of-range quotients out of range.
        Self::from_wide_checked(Self::div_quotient(lhs, rhs) as i128)
    }

    /// Add `rhs` to `self` in place, using the given overflow policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, Overflow, consts::{U5, U6}};
    ///
    /// let mut total = UFixed::<U6, U5>::from_f64(60.0);
    /// total.add_assign_with(UFixed::<U6, U5>::from_f64(5.0), Overflow::Wrap);
    /// assert_eq!(total.to_f64(), 1.0);
    ///
    /// let mut total = UFixed::<U6, U5>::from_f64(60.0);
    /// total.add_assign_with(UFixed::<U6, U5>::from_f64(5.0), Overflow::Saturate);
    /// assert_eq!(total, UFixed::<U6, U5>::max_value());
    /// ```
    pub fn add_assign_with(&mut self, rhs: Self, overflow: Overflow) {
        *self = Self::add_aligned(self.to_wide(), rhs.to_wide(), overflow);
    }
}

impl<I1, F1, const SIGNED: bool> FixedPoint<I1, F1, SIGNED>
where
    I1: Layout<F1, SIGNED>,
{
    /// Add two fixed-point values using the given overflow policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{IFixed, Overflow, consts::U4};
    ///
    /// let a = IFixed::<U4, U4>::from_f64(-5.0);
    /// assert_eq!(a.add_with(a, Overflow::Saturate).to_f64(), -8.0);
    /// assert_eq!(a.add_with(a, Overflow::Wrap).to_f64(), 6.0);
    /// ```
    pub fn add_with<I2, F2>(
        self,
        rhs: FixedPoint<I2, F2, SIGNED>,
        overflow: Overflow,
    ) -> Combined<I1, F1, I2, F2, SIGNED>
    where
        I1: Combine<F1, I2, F2, SIGNED>,
        I2: Layout<F2, SIGNED>,
    {
        <Combined<I1, F1, I2, F2, SIGNED>>::add_aligned(
            <Combined<I1, F1, I2, F2, SIGNED>>::align(self),
            <Combined<I1, F1, I2, F2, SIGNED>>::align(rhs),
            overflow,
        )
    }

    /// Multiply two fixed-point values using the given overflow policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, Overflow, consts::U3};
    ///
    /// let a = UFixed::<U3, U3>::from_f64(4.25);
    /// let b = UFixed::<U3, U3>::from_f64(4.0);
    /// assert_eq!(a.mul_with(b, Overflow::Saturate).to_bit_string(), "111.111");
    /// assert_eq!(a.mul_with(b, Overflow::Wrap).to_bit_string(), "001.000");
    /// ```
    pub fn mul_with<I2, F2>(
        self,
        rhs: FixedPoint<I2, F2, SIGNED>,
        overflow: Overflow,
    ) -> Combined<I1, F1, I2, F2, SIGNED>
    where
        I1: Combine<F1, I2, F2, SIGNED>,
        I2: Layout<F2, SIGNED>,
    {
        <Combined<I1, F1, I2, F2, SIGNED>>::mul_aligned(
            <Combined<I1, F1, I2, F2, SIGNED>>::align(self),
            <Combined<I1, F1, I2, F2, SIGNED>>::align(rhs),
            overflow,
        )
    }

    /// Add two fixed-point values, returning an error if the sum doesn't fit.
    pub fn checked_add<I2, F2>(
        self,
        rhs: FixedPoint<I2, F2, SIGNED>,
    ) -> Result<Combined<I1, F1, I2, F2, SIGNED>>
    where
        I1: Combine<F1, I2, F2, SIGNED>,
        I2: Layout<F2, SIGNED>,
    {
        <Combined<I1, F1, I2, F2, SIGNED>>::from_wide_checked(
            <Combined<I1, F1, I2, F2, SIGNED>>::align(self)
            + <Combined<I1, F1, I2, F2, SIGNED>>::align(rhs))
    }

    /// Subtract two fixed-point values, returning an error if the difference doesn't fit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, Error, consts::{U5, U6}};
    ///
    /// let a = UFixed::<U6, U5>::from_f64(2.5);
    /// let b = UFixed::<U6, U5>::from_f64(3.5);
    /// assert_eq!(b.checked_sub(a), Ok(UFixed::<U6, U5>::from_f64(1.0)));
    /// assert_eq!(a.checked_sub(b), Err(Error::Underflow));
    /// // The operator wraps instead.
    /// assert_eq!((a - b).to_raw(), 0x7E0);
    /// ```
    pub fn checked_sub<I2, F2>(
        self,
        rhs: FixedPoint<I2, F2, SIGNED>,
    ) -> Result<Combined<I1, F1, I2, F2, SIGNED>>
    where
        I1: Combine<F1, I2, F2, SIGNED>,
        I2: Layout<F2, SIGNED>,
    {
        <Combined<I1, F1, I2, F2, SIGNED>>::from_wide_checked(
            <Combined<I1, F1, I2, F2, SIGNED>>::align(self)
            - <Combined<I1, F1, I2, F2, SIGNED>>::align(rhs))
    }

    /// Multiply two fixed-point values, returning an error if the product doesn't fit.
    pub fn checked_mul<I2, F2>(
        self,
        rhs: FixedPoint<I2, F2, SIGNED>,
    ) -> Result<Combined<I1, F1, I2, F2, SIGNED>>
    where
        I1: Combine<F1, I2, F2, SIGNED>,
        I2: Layout<F2, SIGNED>,
    {
        <Combined<I1, F1, I2, F2, SIGNED>>::checked_mul_aligned(
            <Combined<I1, F1, I2, F2, SIGNED>>::align(self),
            <Combined<I1, F1, I2, F2, SIGNED>>::align(rhs),
        )
    }

    /// Divide two fixed-point values, returning an error if the divisor is zero or the quotient
    /// doesn't fit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fixedpt::{UFixed, Error, consts::{U3, U5}};
    ///
    /// let a = UFixed::<U5, U3>::from_f64(31.0);
    /// let b = UFixed::<U5, U3>::from_f64(0.125);
    /// assert_eq!(a.checked_div(b), Err(Error::Overflow));
    /// assert_eq!(a.checked_div(UFixed::<U5, U3>::default()), Err(Error::DivByZero));
    /// // The operator wraps instead.
    /// assert_eq!((a / b).to_f64(), 24.0);
    /// ```
    pub fn checked_div<I2, F2>(
        self,
        rhs: FixedPoint<I2, F2, SIGNED>,
    ) -> Result<Combined<I1, F1, I2, F2, SIGNED>>
    where
        I1: Combine<F1, I2, F2, SIGNED>,
        I2: Layout<F2, SIGNED>,
    {
        <Combined<I1, F1, I2, F2, SIGNED>>::checked_div_aligned(
            <Combined<I1, F1, I2, F2, SIGNED>>::align(self),
            <Combined<I1, F1, I2, F2, SIGNED>>::align(rhs),
        )
    }
}

/// Implement `&a op b`, `a op &b` and `&a op &b` for a mixed-width operator.
macro_rules! forward_ref_mixed_binop {
    (impl $imp: ident, $method: ident) => {
        impl<'a, I1, F1, I2, F2, const SIGNED: bool> $imp<FixedPoint<I2, F2, SIGNED>>
            for &'a FixedPoint<I1, F1, SIGNED>
        where
            I1: Combine<F1, I2, F2, SIGNED>,
            I2: Layout<F2, SIGNED>,
        {
            type Output = Combined<I1, F1, I2, F2, SIGNED>;

            #[inline]
            fn $method(self, rhs: FixedPoint<I2, F2, SIGNED>) -> Self::Output {
                $imp::$method(*self, rhs)
            }
        }

        impl<'a, I1, F1, I2, F2, const SIGNED: bool> $imp<&'a FixedPoint<I2, F2, SIGNED>>
            for FixedPoint<I1, F1, SIGNED>
        where
            I1: Combine<F1, I2, F2, SIGNED>,
            I2: Layout<F2, SIGNED>,
        {
            type Output = Combined<I1, F1, I2, F2, SIGNED>;

            #[inline]
            fn $method(self, rhs: &'a FixedPoint<I2, F2, SIGNED>) -> Self::Output {
                $imp::$method(self, *rhs)
            }
        }

        impl<'a, 'b, I1, F1, I2, F2, const SIGNED: bool> $imp<&'a FixedPoint<I2, F2, SIGNED>>
            for &'b FixedPoint<I1, F1, SIGNED>
        where
            I1: Combine<F1, I2, F2, SIGNED>,
            I2: Layout<F2, SIGNED>,
        {
            type Output = Combined<I1, F1, I2, F2, SIGNED>;

            #[inline]
            fn $method(self, rhs: &'a FixedPoint<I2, F2, SIGNED>) -> Self::Output {
                $imp::$method(*self, *rhs)
            }
        }
    };
}

/// Implement `a op= &b` for a same-width assignment operator.
macro_rules! forward_ref_op_assign {
    (impl $imp: ident, $method: ident) => {
        impl<'a, I, F, const SIGNED: bool> $imp<&'a FixedPoint<I, F, SIGNED>>
            for FixedPoint<I, F, SIGNED>
        where
            I: Layout<F, SIGNED>,
        {
            #[inline]
            fn $method(&mut self, other: &'a FixedPoint<I, F, SIGNED>) {
                $imp::$method(self, *other);
            }
        }
    };
}

impl<I1, F1, I2, F2, const SIGNED: bool> Add<FixedPoint<I2, F2, SIGNED>>
    for FixedPoint<I1, F1, SIGNED>
where
    I1: Combine<F1, I2, F2, SIGNED>,
    I2: Layout<F2, SIGNED>,
{
    type Output = Combined<I1, F1, I2, F2, SIGNED>;

    fn add(self, rhs: FixedPoint<I2, F2, SIGNED>) -> Self::Output {
        self.add_with(rhs, Overflow::default())
    }
}
forward_ref_mixed_binop!(impl Add, add);

impl<I1, F1, I2, F2, const SIGNED: bool> Sub<FixedPoint<I2, F2, SIGNED>>
    for FixedPoint<I1, F1, SIGNED>
where
    I1: Combine<F1, I2, F2, SIGNED>,
    I2: Layout<F2, SIGNED>,
{
    type Output = Combined<I1, F1, I2, F2, SIGNED>;

    fn sub(self, rhs: FixedPoint<I2, F2, SIGNED>) -> Self::Output {
        <Combined<I1, F1, I2, F2, SIGNED>>::sub_aligned(
            <Combined<I1, F1, I2, F2, SIGNED>>::align(self),
            <Combined<I1, F1, I2, F2, SIGNED>>::align(rhs),
        )
    }
}
forward_ref_mixed_binop!(impl Sub, sub);

impl<I1, F1, I2, F2, const SIGNED: bool> Mul<FixedPoint<I2, F2, SIGNED>>
    for FixedPoint<I1, F1, SIGNED>
where
    I1: Combine<F1, I2, F2, SIGNED>,
    I2: Layout<F2, SIGNED>,
{
    type Output = Combined<I1, F1, I2, F2, SIGNED>;

    fn mul(self, rhs: FixedPoint<I2, F2, SIGNED>) -> Self::Output {
        self.mul_with(rhs, Overflow::default())
    }
}
forward_ref_mixed_binop!(impl Mul, mul);

impl<I1, F1, I2, F2, const SIGNED: bool> Div<FixedPoint<I2, F2, SIGNED>>
    for FixedPoint<I1, F1, SIGNED>
where
    I1: Combine<F1, I2, F2, SIGNED>,
    I2: Layout<F2, SIGNED>,
{
    type Output = Combined<I1, F1, I2, F2, SIGNED>;

    /// # Panics
    ///
    /// Panics if `rhs` is zero. This is the one operator with a failure mode beyond overflow
    /// handling, and it matches Rust integer division. Use [`FixedPoint::checked_div`] to get
    /// [`Error::DivByZero`](crate::Error::DivByZero) instead.
    fn div(self, rhs: FixedPoint<I2, F2, SIGNED>) -> Self::Output {
        <Combined<I1, F1, I2, F2, SIGNED>>::div_aligned(
            <Combined<I1, F1, I2, F2, SIGNED>>::align(self),
            <Combined<I1, F1, I2, F2, SIGNED>>::align(rhs),
        )
    }
}
forward_ref_mixed_binop!(impl Div, div);

impl<I, F, const SIGNED: bool> AddAssign for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn add_assign(&mut self, other: Self) {
        self.add_assign_with(other, Overflow::default());
    }
}
forward_ref_op_assign!(impl AddAssign, add_assign);

impl<I, F, const SIGNED: bool> SubAssign for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn sub_assign(&mut self, other: Self) {
        *self = Self::sub_aligned(self.to_wide(), other.to_wide());
    }
}
forward_ref_op_assign!(impl SubAssign, sub_assign);

impl<I, F, const SIGNED: bool> MulAssign for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn mul_assign(&mut self, other: Self) {
        *self = Self::mul_aligned(self.to_wide(), other.to_wide(), Overflow::default());
    }
}
forward_ref_op_assign!(impl MulAssign, mul_assign);

impl<I, F, const SIGNED: bool> DivAssign for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn div_assign(&mut self, other: Self) {
        *self = Self::div_aligned(self.to_wide(), other.to_wide());
    }
}
forward_ref_op_assign!(impl DivAssign, div_assign);
