//! Implement [proptest] Arbitrary, Strategy, and ValueTree for fixed-point types
//!
//! # Examples
//!
//! ```rust
//! use proptest::prelude::*;
//! use fixedpt::{
//!     IFixed,
//!     consts::{U4, U12},
//!     proptest::{Any, FixedPointRange},
//! };
//!
//! type Q4_12 = IFixed<U4, U12>;
//!
//! proptest! {
//!     fn arbitrary(value in any::<Q4_12>()) {
//!         prop_assert!(value >= Q4_12::min_value());
//!         prop_assert!(value <= Q4_12::max_value());
//!     }
//! }
//!
//! proptest! {
//!     fn negative(value in Any::<U4, U12, true>::NEGATIVE) {
//!         prop_assert!(value.is_negative());
//!     }
//! }
//!
//! proptest! {
//!     fn float_range(value in FixedPointRange::<U4, U12, true>::from(-1.0..1.0)) {
//!         prop_assert!(value.to_f64() >= -1.0);
//!         prop_assert!(value.to_f64() < 1.0);
//!     }
//! }
//!
//! // Run the tests manually for doc tests
//! arbitrary();
//! negative();
//! float_range();
//! ```
// This code is largely based on the value trees defined in `proptest::num`, but modified for
// raw fixed-point values.

use bitflags::bitflags;
use core::ops::{
    self,
    Range,
    RangeFrom,
    RangeInclusive,
    RangeTo,
    RangeToInclusive,
};
use proptest::{
    arbitrary::Arbitrary,
    prop_oneof,
    strategy::{Just, NewTree, Strategy, ValueTree},
    test_runner::TestRunner,
};
use rand::{
    distributions::{
        uniform::Uniform,
        Distribution,
    },
    Rng,
};
use std::{
    fmt::{self, Debug, Formatter},
    marker::PhantomData,
};
use crate::{
    storage::Layout,
    FixedPoint,
};

bitflags! {
    /// Bit flags used to categorize different classes of fixed-point values.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub(crate) struct ValueClasses: u32 {
        const POSITIVE          = 0b0000_0001;
        const NEGATIVE          = 0b0000_0010;
        const ZERO              = 0b0000_0100;
        const EXTREME           = 0b0000_1000;
        const ANY =
            Self::POSITIVE.bits() |
            Self::NEGATIVE.bits() |
            Self::ZERO.bits() |
            Self::EXTREME.bits();
    }
}

impl ValueClasses {
    /// Drop the classes a type can't produce, falling back to `ZERO` if nothing is left.
    fn normalise(mut self, has_positive: bool, has_negative: bool) -> Self {
        if !has_positive {
            self.remove(ValueClasses::POSITIVE);
        }
        if !has_negative {
            self.remove(ValueClasses::NEGATIVE);
        }
        if self.is_empty() {
            self = ValueClasses::ZERO;
        }
        self
    }
}

/// Strategies which produce fixed-point values from particular classes. See the associated
/// constants.
///
/// `Any` can be OR'ed to combine multiple classes. For example, `POSITIVE | ZERO` will generate
/// arbitrary non-negative values.
///
/// The classes are assigned fixed weights for generation. `POSITIVE` and `NEGATIVE` are evenly
/// distributed and are much more likely than `EXTREME`, which is more likely than `ZERO`.
/// Classes that the type can't represent (`NEGATIVE` for unsigned types) are ignored.
#[must_use = "strategies do nothing unless used"]
pub struct Any<I, F, const SIGNED: bool>(ValueClasses, PhantomData<(I, F)>);

impl<I, F, const SIGNED: bool> Any<I, F, SIGNED> {
    /// Generates values greater than zero, uniformly over the raw values.
    pub const POSITIVE: Self = Any(ValueClasses::POSITIVE, PhantomData);

    /// Generates values less than zero, uniformly over the raw values.
    pub const NEGATIVE: Self = Any(ValueClasses::NEGATIVE, PhantomData);

    /// Generates zero.
    pub const ZERO: Self = Any(ValueClasses::ZERO, PhantomData);

    /// Generates the largest and smallest values of the type.
    pub const EXTREME: Self = Any(ValueClasses::EXTREME, PhantomData);

    /// Generates literally arbitrary values.
    ///
    /// Equivalent to `POSITIVE | NEGATIVE | ZERO | EXTREME`.
    pub const ANY: Self = Any(ValueClasses::ANY, PhantomData);
}

impl<I, F, const SIGNED: bool> Clone for Any<I, F, SIGNED> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, F, const SIGNED: bool> Copy for Any<I, F, SIGNED> {}

impl<I, F, const SIGNED: bool> Debug for Any<I, F, SIGNED> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_tuple("Any").field(&self.0).finish()
    }
}

impl<I, F, const SIGNED: bool> ops::BitOr for Any<I, F, SIGNED> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Any(self.0 | rhs.0, PhantomData)
    }
}

impl<I, F, const SIGNED: bool> ops::BitOrAssign for Any<I, F, SIGNED> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}

impl<I, F, const SIGNED: bool> Strategy for Any<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    type Tree = BinarySearch<I, F, SIGNED>;
    type Value = FixedPoint<I, F, SIGNED>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        let max = FixedPoint::<I, F, SIGNED>::RAW_MAX;
        let min = FixedPoint::<I, F, SIGNED>::RAW_MIN;
        let classes = self.0.normalise(0 < max, 0 > min);

        macro_rules! weight {
            ($case:ident, $weight:expr) => {
                if classes.contains(ValueClasses::$case) {
                    $weight
                } else {
                    0
                }
            }
        }

        let class = prop_oneof![
            weight!(POSITIVE, 20) => Just(ValueClasses::POSITIVE),
            weight!(NEGATIVE, 20) => Just(ValueClasses::NEGATIVE),
            weight!(ZERO, 2) => Just(ValueClasses::ZERO),
            weight!(EXTREME, 4) => Just(ValueClasses::EXTREME),
        ].new_tree(runner)?.current();

        let raw = if ValueClasses::POSITIVE == class {
            Uniform::new_inclusive(1, max).sample(runner.rng())
        }
        else if ValueClasses::NEGATIVE == class {
            Uniform::new_inclusive(min, -1).sample(runner.rng())
        }
        else if ValueClasses::EXTREME == class {
            if runner.rng().gen::<bool>() { max } else { min }
        }
        else {
            0
        };

        Ok(BinarySearch::from_raw(raw))
    }
}

/// Shrinks a fixed-point value towards 0, using binary search over the raw values to find
/// boundary points.
///
/// This is originally from `proptest::num` and modified to search over the `i128` raw value of a
/// fixed-point type.
///
/// # Original Version Copyright
///
/// Copyright 2017, 2018 Jason Lingle
///
/// Licensed under the [Apache License, Version 2.0] or the [MIT license], at your option. This
/// file may not be copied, modified, or distributed except according to those terms.
///
/// # Modified Version Copyright
///
/// Copyright 2024 Thomas Mundar
///
/// Licensed under the [MIT license]. This file may not be copied, modified, or distributed except
/// according to those terms.
///
/// [Apache License, Version 2.0]: http://www.apache.org/licenses/LICENSE-2.0
/// [MIT license]: http://opensource.org/licenses/MIT
pub struct BinarySearch<I, F, const SIGNED: bool> {
    lo: i128,
    curr: i128,
    hi: i128,
    widths: PhantomData<(I, F)>,
}

impl<I, F, const SIGNED: bool> BinarySearch<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    /// Creates a new binary searcher starting at the given value.
    pub fn new(start: FixedPoint<I, F, SIGNED>) -> Self {
        Self::from_raw(start.to_wide())
    }

    fn from_raw(start: i128) -> Self {
        BinarySearch {
            lo: 0,
            curr: start,
            hi: start,
            widths: PhantomData,
        }
    }

    /// Creates a new binary searcher which will not produce values on the other side of `lo` or
    /// `hi` from `start`. `lo` is inclusive, `hi` is exclusive unless `inclusive` is set.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty.
    fn from_range(
        runner: &mut TestRunner,
        lo: FixedPoint<I, F, SIGNED>,
        hi: FixedPoint<I, F, SIGNED>,
        inclusive: bool,
    ) -> Self {
        let lo_raw = lo.to_wide();
        let hi_raw = hi.to_wide();
        assert!(lo_raw < hi_raw || (inclusive && lo_raw == hi_raw),
            "empty fixed-point range: {} {} {}", lo, if inclusive { "..=" } else { ".." }, hi);
        let start = if inclusive {
            Uniform::new_inclusive(lo_raw, hi_raw).sample(runner.rng())
        }
        else {
            Uniform::new(lo_raw, hi_raw).sample(runner.rng())
        };
        BinarySearch {
            lo: if start < 0 {
                std::cmp::min(0, hi_raw - 1)
            }
            else {
                std::cmp::max(0, lo_raw)
            },
            hi: start,
            curr: start,
            widths: PhantomData,
        }
    }

    /// Return the current value.
    pub fn curr(&self) -> FixedPoint<I, F, SIGNED> {
        FixedPoint::from_wide_unchecked(self.curr)
    }

    fn reposition(&mut self) -> bool {
        // Won't ever overflow since lo starts at 0 and advances towards hi.
        let interval = self.hi - self.lo;
        let new_mid = self.lo + interval / 2;

        if new_mid == self.curr {
            false
        } else {
            self.curr = new_mid;
            true
        }
    }

    fn magnitude_greater(lhs: i128, rhs: i128) -> bool {
        if 0 == lhs {
            false
        } else if lhs < 0 {
            lhs < rhs
        } else {
            lhs > rhs
        }
    }
}

impl<I, F, const SIGNED: bool> Clone for BinarySearch<I, F, SIGNED> {
    fn clone(&self) -> Self {
        BinarySearch {
            lo: self.lo,
            curr: self.curr,
            hi: self.hi,
            widths: PhantomData,
        }
    }
}

impl<I, F, const SIGNED: bool> Debug for BinarySearch<I, F, SIGNED> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("BinarySearch")
            .field("lo", &self.lo)
            .field("curr", &self.curr)
            .field("hi", &self.hi)
            .finish()
    }
}

impl<I, F, const SIGNED: bool> ValueTree for BinarySearch<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    type Value = FixedPoint<I, F, SIGNED>;

    fn current(&self) -> Self::Value {
        self.curr()
    }

    fn simplify(&mut self) -> bool {
        if !Self::magnitude_greater(self.hi, self.lo) {
            return false;
        }

        self.hi = self.curr;
        self.reposition()
    }

    fn complicate(&mut self) -> bool {
        if !Self::magnitude_greater(self.hi, self.lo) {
            return false;
        }

        self.lo = self.curr + if self.hi < 0 { -1 } else { 1 };

        self.reposition()
    }
}

/// [`Strategy`] for a range of fixed-point values.
///
/// Ranges can be given as fixed-point values or as [`f64`] bounds, which are converted with
/// [`FixedPoint::from_f64`]. Float bounds saturate, so `..0.0` on an unsigned type is the empty
/// range `0..0`.
///
/// # Panics
///
/// Generating a value panics if the range is empty: an exclusive range whose start is not below
/// its end, or an inclusive range whose start is above its end.
///
/// # Examples
///
/// ```rust
/// use proptest::prelude::*;
/// use fixedpt::{UFixed, consts::{U3, U5}, proptest::FixedPointRange};
///
/// type Q5_3 = UFixed<U5, U3>;
///
/// const ONE: f64 = 1.0;
///
/// proptest! {
///     fn fixed_range(value in FixedPointRange::from(Q5_3::from_f64(ONE)..=Q5_3::max_value())) {
///         prop_assert!(value >= Q5_3::from_f64(ONE));
///     }
/// }
///
/// proptest! {
///     fn float_range(value in FixedPointRange::<U5, U3, false>::from(..ONE)) {
///         prop_assert!(value.to_f64() < ONE);
///     }
/// }
///
/// // Run the tests manually for doc tests
/// fixed_range();
/// float_range();
/// ```
#[must_use = "strategies do nothing unless used"]
pub struct FixedPointRange<I, F, const SIGNED: bool>
where
    I: Layout<F, SIGNED>,
{
    start: FixedPoint<I, F, SIGNED>,
    end: FixedPoint<I, F, SIGNED>,
    include_end: bool,
}

impl<I, F, const SIGNED: bool> FixedPointRange<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn new(start: FixedPoint<I, F, SIGNED>, end: FixedPoint<I, F, SIGNED>, include_end: bool) -> Self {
        FixedPointRange {
            start,
            end,
            include_end,
        }
    }
}

impl<I, F, const SIGNED: bool> Clone for FixedPointRange<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn clone(&self) -> Self {
        Self::new(self.start, self.end, self.include_end)
    }
}

impl<I, F, const SIGNED: bool> Debug for FixedPointRange<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("FixedPointRange")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("include_end", &self.include_end)
            .finish()
    }
}

macro_rules! range_from_impl {
    ($($bound: ty),+) => {
        $(
            impl<I, F, const SIGNED: bool> From<Range<$bound>> for FixedPointRange<I, F, SIGNED>
            where
                I: Layout<F, SIGNED>,
            {
                fn from(range: Range<$bound>) -> Self {
                    Self::new(range.start.into(), range.end.into(), false)
                }
            }

            impl<I, F, const SIGNED: bool> From<RangeInclusive<$bound>> for FixedPointRange<I, F, SIGNED>
            where
                I: Layout<F, SIGNED>,
            {
                fn from(range: RangeInclusive<$bound>) -> Self {
                    Self::new((*range.start()).into(), (*range.end()).into(), true)
                }
            }

            impl<I, F, const SIGNED: bool> From<RangeFrom<$bound>> for FixedPointRange<I, F, SIGNED>
            where
                I: Layout<F, SIGNED>,
            {
                fn from(range: RangeFrom<$bound>) -> Self {
                    Self::new(range.start.into(), FixedPoint::max_value(), true)
                }
            }

            impl<I, F, const SIGNED: bool> From<RangeTo<$bound>> for FixedPointRange<I, F, SIGNED>
            where
                I: Layout<F, SIGNED>,
            {
                fn from(range: RangeTo<$bound>) -> Self {
                    Self::new(FixedPoint::min_value(), range.end.into(), false)
                }
            }

            impl<I, F, const SIGNED: bool> From<RangeToInclusive<$bound>> for FixedPointRange<I, F, SIGNED>
            where
                I: Layout<F, SIGNED>,
            {
                fn from(range: RangeToInclusive<$bound>) -> Self {
                    Self::new(FixedPoint::min_value(), range.end.into(), true)
                }
            }
        )+
    };
}

range_from_impl!(FixedPoint<I, F, SIGNED>, f64);

impl<I, F, const SIGNED: bool> Strategy for FixedPointRange<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    type Tree = BinarySearch<I, F, SIGNED>;
    type Value = FixedPoint<I, F, SIGNED>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        Ok(BinarySearch::from_range(
            runner,
            self.start,
            self.end,
            self.include_end,
        ))
    }
}

impl<I, F, const SIGNED: bool> Arbitrary for FixedPoint<I, F, SIGNED>
where
    I: Layout<F, SIGNED>,
{
    type Parameters = ();
    type Strategy = Any<I, F, SIGNED>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        Any::<I, F, SIGNED>::ANY
    }
}
