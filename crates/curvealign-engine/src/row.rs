use curvealign_common::{Matrix, Scalar};
use smallvec::SmallVec;

/// Inline capacity before a step's values spill to the heap.
const INLINE: usize = 8;

/// Typed backing store of a [`RowAccumulator`].
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    Long(SmallVec<[i64; INLINE]>),
    Double(SmallVec<[f64; INLINE]>),
}

/// The `y` values contributed at one `x`, and where each came from.
///
/// `sources()[i]` is the index of the source matrix that produced value `i`.
/// The accumulator is also a one-row [`Matrix`] so it can be handed to code
/// that only understands matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct RowAccumulator {
    values: RowValues,
    sources: SmallVec<[usize; INLINE]>,
}

impl RowAccumulator {
    pub fn new_long(capacity: usize) -> Self {
        Self {
            values: RowValues::Long(SmallVec::with_capacity(capacity)),
            sources: SmallVec::with_capacity(capacity),
        }
    }

    pub fn new_double(capacity: usize) -> Self {
        Self {
            values: RowValues::Double(SmallVec::with_capacity(capacity)),
            sources: SmallVec::with_capacity(capacity),
        }
    }

    /// Logically truncate to zero values, keeping the allocation.
    pub fn clear(&mut self) {
        match &mut self.values {
            RowValues::Long(v) => v.clear(),
            RowValues::Double(v) => v.clear(),
        }
        self.sources.clear();
    }

    pub fn push_long(&mut self, source: usize, v: i64) {
        match &mut self.values {
            RowValues::Long(vals) => vals.push(v),
            RowValues::Double(vals) => vals.push(v as f64),
        }
        self.sources.push(source);
    }

    /// Append a double. A long-backed row is widened first.
    pub fn push_double(&mut self, source: usize, v: f64) {
        if let RowValues::Long(vals) = &self.values {
            self.values = RowValues::Double(vals.iter().map(|&x| x as f64).collect());
        }
        if let RowValues::Double(vals) = &mut self.values {
            vals.push(v);
        }
        self.sources.push(source);
    }

    pub fn push_scalar(&mut self, source: usize, v: Scalar) {
        match v {
            Scalar::Long(i) => self.push_long(source, i),
            Scalar::Double(d) => self.push_double(source, d),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        matches!(self.values, RowValues::Long(_))
    }

    pub fn values(&self) -> &RowValues {
        &self.values
    }

    #[inline]
    pub fn sources(&self) -> &[usize] {
        &self.sources
    }

    #[inline]
    pub fn source(&self, i: usize) -> usize {
        self.sources[i]
    }

    #[inline]
    pub fn get(&self, i: usize) -> Scalar {
        match &self.values {
            RowValues::Long(v) => Scalar::Long(v[i]),
            RowValues::Double(v) => Scalar::Double(v[i]),
        }
    }

    #[inline]
    pub fn get_f64(&self, i: usize) -> f64 {
        match &self.values {
            RowValues::Long(v) => v[i] as f64,
            RowValues::Double(v) => v[i],
        }
    }

    pub fn as_longs(&self) -> Option<&[i64]> {
        match &self.values {
            RowValues::Long(v) => Some(v.as_slice()),
            RowValues::Double(_) => None,
        }
    }

    pub fn as_doubles(&self) -> Option<&[f64]> {
        match &self.values {
            RowValues::Long(_) => None,
            RowValues::Double(v) => Some(v.as_slice()),
        }
    }

    /// Copy every value as `f64` into `out` (cleared first).
    pub fn fill_f64(&self, out: &mut Vec<f64>) {
        out.clear();
        match &self.values {
            RowValues::Long(v) => out.extend(v.iter().map(|&x| x as f64)),
            RowValues::Double(v) => out.extend_from_slice(v),
        }
    }

    /// `(source, value)` pairs in contribution order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Scalar)> + '_ {
        (0..self.len()).map(move |i| (self.sources[i], self.get(i)))
    }
}

impl Matrix for RowAccumulator {
    #[inline]
    fn rows(&self) -> usize {
        1
    }

    #[inline]
    fn cols(&self) -> usize {
        self.len()
    }

    #[inline]
    fn get_double(&self, row: usize, col: usize) -> f64 {
        debug_assert_eq!(row, 0);
        self.get_f64(col)
    }

    #[inline]
    fn get_long(&self, row: usize, col: usize) -> i64 {
        debug_assert_eq!(row, 0);
        self.get(col).as_i64()
    }

    #[inline]
    fn is_integer(&self) -> bool {
        RowAccumulator::is_integer(self)
    }
}
