//! Common test helpers
use crate::{AlignConfigBuilder, Scalar, StepSnapshot, collect_steps};

pub fn run(builder: AlignConfigBuilder) -> Vec<StepSnapshot> {
    let config = builder.build().expect("valid config");
    collect_steps(config).expect("run succeeds")
}

pub fn xs(steps: &[StepSnapshot]) -> Vec<f64> {
    steps.iter().map(|s| s.x.as_f64()).collect()
}

pub fn ys(steps: &[StepSnapshot]) -> Vec<Vec<f64>> {
    steps.iter().map(StepSnapshot::ys_f64).collect()
}

pub fn long_rows(steps: &[StepSnapshot]) -> Vec<Vec<i64>> {
    steps
        .iter()
        .map(|s| s.ys.iter().map(Scalar::as_i64).collect())
        .collect()
}
