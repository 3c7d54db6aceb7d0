//! Positions and interval accessors
//!
//! Items are opaque to the index. The only things it needs are two pure
//! accessors, `beg` and `end`, describing a half-open interval `[beg, end)`.

use std::fmt::Debug;
use std::ops::Range;

/// Ordered coordinate type usable as an interval endpoint.
///
/// `MIN` and `MAX` double as the "negative infinity" and "positive infinity"
/// sentinels of the augmentation. Floating-point positions must not be NaN.
pub trait Position: Copy + PartialOrd + Debug {
    /// Smallest representable position.
    const MIN: Self;
    /// Largest representable position.
    const MAX: Self;

    /// Lossy conversion used by the interpolation model and domain bucketing.
    fn to_f64(self) -> f64;
}

macro_rules! impl_position_int {
    ($($t:ty),*) => {
        $(
            impl Position for $t {
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_position_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Position for f32 {
    const MIN: Self = f32::NEG_INFINITY;
    const MAX: Self = f32::INFINITY;

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Position for f64 {
    const MIN: Self = f64::NEG_INFINITY;
    const MAX: Self = f64::INFINITY;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Larger of two positions (`a` wins ties).
#[inline]
pub(crate) fn max_pos<P: Position>(a: P, b: P) -> P {
    if b > a {
        b
    } else {
        a
    }
}

/// Anything carrying a half-open interval `[beg, end)`.
///
/// Implementations must be deterministic and side-effect free; `beg <= end`
/// is assumed but not enforced.
pub trait Interval {
    /// Coordinate type of the endpoints.
    type Pos: Position;

    /// Inclusive start.
    fn beg(&self) -> Self::Pos;

    /// Exclusive end.
    fn end(&self) -> Self::Pos;

    /// Whether this interval intersects the query `[qbeg, qend)`.
    #[inline]
    fn overlaps(&self, qbeg: Self::Pos, qend: Self::Pos) -> bool {
        self.beg() < qend && self.end() > qbeg
    }
}

impl<P: Position> Interval for Range<P> {
    type Pos = P;

    #[inline]
    fn beg(&self) -> P {
        self.start
    }

    #[inline]
    fn end(&self) -> P {
        self.end
    }
}

impl<P: Position> Interval for (P, P) {
    type Pos = P;

    #[inline]
    fn beg(&self) -> P {
        self.0
    }

    #[inline]
    fn end(&self) -> P {
        self.1
    }
}

impl<I: Interval + ?Sized> Interval for &I {
    type Pos = I::Pos;

    #[inline]
    fn beg(&self) -> Self::Pos {
        (**self).beg()
    }

    #[inline]
    fn end(&self) -> Self::Pos {
        (**self).end()
    }
}
