use curvealign_common::Scalar;

/// The `x` of the current alignment step.
///
/// Holds either a 64-bit integer or a double depending on the run mode; the
/// tag never changes within a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericCursor {
    value: Scalar,
}

impl NumericCursor {
    pub fn new_long() -> Self {
        Self {
            value: Scalar::Long(0),
        }
    }

    pub fn new_double() -> Self {
        Self {
            value: Scalar::Double(f64::NAN),
        }
    }

    #[inline]
    pub fn set_long(&mut self, v: i64) {
        self.value = Scalar::Long(v);
    }

    #[inline]
    pub fn set_double(&mut self, v: f64) {
        self.value = Scalar::Double(v);
    }

    #[inline]
    pub fn value(&self) -> Scalar {
        self.value
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.value.is_long()
    }

    #[inline]
    pub fn as_f64(&self) -> f64 {
        self.value.as_f64()
    }

    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.value.as_i64()
    }
}
