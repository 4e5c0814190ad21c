//! Fixtures shared by the curvealign test suites and benches.

use std::sync::Arc;

use curvealign_common::{DenseMatrix, Matrix};
use proptest::collection::{btree_set, vec};
use proptest::prelude::*;

pub fn shared<M: Matrix + 'static>(m: M) -> Arc<dyn Matrix> {
    Arc::new(m)
}

/// Two-column integer series `[x, y]`.
pub fn long_series(points: &[(i64, i64)]) -> Arc<dyn Matrix> {
    shared(DenseMatrix::from_long_pairs(points))
}

/// Two-column double series `[x, y]`.
pub fn double_series(points: &[(f64, f64)]) -> Arc<dyn Matrix> {
    shared(DenseMatrix::from_pairs(points))
}

/// Three-column series `[iteration, x, y]`, the layout optimizers usually log.
pub fn logged_series(points: &[(f64, f64)]) -> Arc<dyn Matrix> {
    let rows: Vec<[f64; 3]> = points
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| [i as f64, x, y])
        .collect();
    match DenseMatrix::from_double_rows(&rows) {
        Ok(m) => shared(m),
        Err(e) => panic!("logged_series: {e}"),
    }
}

/// Deterministic convergence-like curve: `len` samples with fractional,
/// strictly increasing `x` and a decaying `y`. `seed` shifts both axes so
/// curves built from different seeds rarely share an `x`.
pub fn convergence_curve(seed: u64, len: usize) -> DenseMatrix {
    let offset = (seed % 97) as f64 / 97.0;
    let scale = 1.0 + (seed % 13) as f64 / 10.0;
    let points: Vec<(f64, f64)> = (0..len)
        .map(|i| {
            let x = i as f64 * scale + offset + 0.25;
            (x, 100.0 / (1.0 + x) + offset)
        })
        .collect();
    DenseMatrix::from_pairs(&points)
}

/// The `x` column of a two-column matrix as `f64`.
pub fn xs(m: &dyn Matrix) -> Vec<f64> {
    (0..m.rows()).map(|r| m.get_double(r, 0)).collect()
}

/// Strictly increasing integer `(x, y)` pairs, between 1 and `max_len` rows.
pub fn increasing_points(max_len: usize) -> impl Strategy<Value = Vec<(i64, i64)>> {
    btree_set(-500i64..500, 1..=max_len.max(1)).prop_flat_map(|xs| {
        let n = xs.len();
        vec(-10_000i64..10_000, n)
            .prop_map(move |ys| xs.iter().copied().zip(ys).collect::<Vec<_>>())
    })
}

/// Between 1 and `max_series` independent series of [`increasing_points`].
pub fn series_set(
    max_series: usize,
    max_len: usize,
) -> impl Strategy<Value = Vec<Vec<(i64, i64)>>> {
    vec(increasing_points(max_len), 1..=max_series.max(1))
}

/// Strictly increasing `(x, y)` pairs whose `x` values are never integral,
/// so any run over them is a double run.
pub fn fractional_points(max_len: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    increasing_points(max_len).prop_map(|points| {
        points
            .into_iter()
            .map(|(x, y)| (x as f64 / 4.0 + 0.125, y as f64 / 8.0))
            .collect::<Vec<_>>()
    })
}

/// Between 1 and `max_series` independent series of [`fractional_points`].
pub fn fractional_set(
    max_series: usize,
    max_len: usize,
) -> impl Strategy<Value = Vec<Vec<(f64, f64)>>> {
    vec(fractional_points(max_len), 1..=max_series.max(1))
}
