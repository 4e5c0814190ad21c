use super::common::{run, xs, ys};
use crate::{AlignConfig, AlignEngine, AlignError, IterationMode, MissingValueMode, Phase};
use curvealign_testkit::double_series;

const NAN: f64 = f64::NAN;

#[test]
fn interior_y_nan_is_fatal_without_skipping() {
    let config = AlignConfig::builder()
        .shared_matrix(double_series(&[(0.5, 1.0), (1.5, NAN), (2.5, 3.0)]))
        .build()
        .unwrap();
    let mut engine = AlignEngine::new(config);
    assert!(engine.next_step().unwrap().is_some());

    let err = engine.next_step().unwrap_err();
    assert!(matches!(
        err,
        AlignError::UnexpectedNan {
            matrix: 0,
            row: 1,
            column: 1
        }
    ));
    assert_eq!(engine.phase(), Phase::Done);
    assert!(engine.next_step().unwrap().is_none());
}

#[test]
fn y_nan_replacement_wins() {
    let steps = run(AlignConfig::builder()
        .shared_matrix(double_series(&[(0.5, NAN), (1.5, NAN), (2.5, 3.0)]))
        .skip_leading_trailing_y_nans(false)
        .y_nan_replacement(-9.0));
    assert_eq!(ys(&steps), vec![vec![-9.0], vec![-9.0], vec![3.0]]);
}

#[test]
fn y_trimming_narrows_window_and_passes_interior_nan() {
    let config = AlignConfig::builder()
        .shared_matrix(double_series(&[
            (0.5, NAN),
            (1.5, 2.5),
            (2.5, NAN),
            (3.5, 4.5),
            (4.5, NAN),
        ]))
        .skip_leading_trailing_y_nans(true)
        .build()
        .unwrap();
    assert_eq!(AlignEngine::new(config.clone()).windows(), vec![(1, 4)]);

    let steps = crate::collect_steps(config).unwrap();
    assert_eq!(xs(&steps), vec![1.5, 2.5, 3.5]);
    assert_eq!(steps[0].ys_f64(), vec![2.5]);
    assert!(steps[1].ys_f64()[0].is_nan());
    assert_eq!(steps[2].ys_f64(), vec![4.5]);
}

#[test]
fn x_trimming_drops_nan_ends() {
    let config = AlignConfig::builder()
        .shared_matrix(double_series(&[(NAN, 1.5), (0.5, 2.5), (1.5, 3.5), (NAN, 4.5)]))
        .skip_leading_trailing_x_nans(true)
        .build()
        .unwrap();
    assert_eq!(AlignEngine::new(config.clone()).windows(), vec![(1, 3)]);

    let steps = crate::collect_steps(config).unwrap();
    assert_eq!(xs(&steps), vec![0.5, 1.5]);
    assert_eq!(ys(&steps), vec![vec![2.5], vec![3.5]]);
}

#[test]
fn interior_x_nan_is_never_visited() {
    let steps = run(AlignConfig::builder()
        .shared_matrix(double_series(&[(0.5, 1.5), (NAN, 2.5), (1.5, 3.5)])));
    assert_eq!(xs(&steps), vec![0.5, 1.5]);
    assert_eq!(ys(&steps), vec![vec![1.5], vec![3.5]]);
}

#[test]
fn all_nan_matrix_never_contributes() {
    let config = AlignConfig::builder()
        .shared_matrix(double_series(&[(NAN, NAN), (NAN, NAN)]))
        .shared_matrix(double_series(&[(0.5, 1.0)]))
        .skip_leading_trailing_x_nans(true)
        .skip_leading_trailing_y_nans(true)
        .build()
        .unwrap();
    assert_eq!(AlignEngine::new(config.clone()).windows(), vec![(0, 0), (0, 1)]);

    let steps = crate::collect_steps(config).unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].sources, vec![1]);
}

#[test]
fn goals_across_a_nan_x_row_use_real_neighbours() {
    let series = || {
        [
            double_series(&[(0.0, 1.0), (NAN, 99.0), (2.0, 3.0)]),
            double_series(&[(1.0, 50.0)]),
        ]
    };

    let keep = run(AlignConfig::builder().shared_matrices(series()));
    assert_eq!(xs(&keep), vec![0.0, 1.0, 2.0]);
    assert_eq!(ys(&keep), vec![vec![1.0], vec![1.0, 50.0], vec![3.0, 50.0]]);

    let preview = run(AlignConfig::builder()
        .shared_matrices(series())
        .mode(IterationMode::PreviewNext)
        .end_mode(MissingValueMode::Skip));
    assert_eq!(ys(&preview), vec![vec![1.0], vec![3.0, 50.0], vec![3.0]]);
}
