use std::{
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lower bound of the `i64` range as an `f64` (exact: -2^63).
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
/// Exclusive upper bound of the `i64` range as an `f64` (exact: 2^63).
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

/// Returns `true` when `v` converts to an `i64` without any loss.
///
/// NaN, infinities, fractional values and values outside the `i64` range are
/// all rejected.
#[inline]
pub fn is_exact_long(v: f64) -> bool {
    v.is_finite() && v.fract() == 0.0 && (I64_MIN_F64..I64_END_F64).contains(&v)
}

/// A number that is either a 64-bit integer or a double.
///
/// Used wherever a value must keep its integer identity (replacement values,
/// the current x of an alignment step, snapshots) instead of being widened to
/// `f64` up front.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, Copy)]
pub enum Scalar {
    Long(i64),
    Double(f64),
}

impl Scalar {
    #[inline]
    pub fn as_f64(&self) -> f64 {
        match *self {
            Scalar::Long(v) => v as f64,
            Scalar::Double(v) => v,
        }
    }

    /// Integer view of the value. Doubles are truncated toward zero and
    /// saturate at the `i64` bounds (NaN maps to 0).
    #[inline]
    pub fn as_i64(&self) -> i64 {
        match *self {
            Scalar::Long(v) => v,
            Scalar::Double(v) => v as i64,
        }
    }

    #[inline]
    pub fn is_long(&self) -> bool {
        matches!(self, Scalar::Long(_))
    }

    /// `true` if the value can be stored as an `i64` with no loss.
    pub fn is_exact_long(&self) -> bool {
        match *self {
            Scalar::Long(_) => true,
            Scalar::Double(v) => is_exact_long(v),
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Scalar::Double(v) if v.is_nan())
    }

    /// Re-tag an integral double as `Long`; everything else is returned as is.
    pub fn normalized(self) -> Self {
        match self {
            Scalar::Double(v) if is_exact_long(v) => Scalar::Long(v as i64),
            other => other,
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Long(0)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Long(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Scalar::Long(v as i64)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Double(v)
    }
}

/// Numeric equality across tags: `Long(3) == Double(3.0)`.
///
/// Longs beyond 2^53 are compared exactly against each other; mixed
/// comparisons go through `f64`.
impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Scalar::Long(a), Scalar::Long(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.normalized() {
            Scalar::Long(i) => {
                state.write_u8(0);
                i.hash(state);
            }
            Scalar::Double(n) => {
                state.write_u8(1);
                n.to_bits().hash(state);
            }
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Long(i) => write!(f, "{i}"),
            Scalar::Double(n) => write!(f, "{n}"),
        }
    }
}
