#![cfg(feature = "json")]

use curvealign_engine::{
    Aggregate, AlignConfig, AlignSettings, Direction, IterationMode, MissingValueMode, Scalar,
    collect_steps,
};
use curvealign_testkit::long_series;

#[test]
fn partial_settings_fill_in_defaults() {
    let settings = AlignSettings::from_json_str(
        r#"{
            "direction": "decreasing",
            "mode": "preview_next",
            "end_mode": "set_to_value",
            "end_replacement": -31.5
        }"#,
    )
    .unwrap();
    assert_eq!(settings.direction, Direction::Decreasing);
    assert_eq!(settings.mode, IterationMode::PreviewNext);
    assert_eq!(settings.start_mode, MissingValueMode::Skip);
    assert_eq!(settings.end_mode, MissingValueMode::SetToValue);
    assert_eq!(settings.end_replacement, Some(Scalar::Double(-31.5)));
    assert_eq!(settings.y_column, 1);
    assert!(settings.validate_modes().is_ok());
}

#[test]
fn settings_round_trip() {
    let settings = AlignSettings {
        x_column: 1,
        y_column: 3,
        start_mode: MissingValueMode::SetToValue,
        start_replacement: Some(Scalar::Long(7)),
        skip_leading_trailing_y_nans: true,
        y_nan_replacement: Some(0.5),
        ..AlignSettings::default()
    };
    let json = settings.to_json_string().unwrap();
    assert!(json.contains("\"start_replacement\": 7"));
    assert_eq!(AlignSettings::from_json_str(&json).unwrap(), settings);
}

#[test]
fn stored_settings_drive_a_run() {
    let settings = AlignSettings::from_json_str(r#"{ "end_mode": "skip" }"#).unwrap();
    let config = AlignConfig::builder()
        .shared_matrix(long_series(&[(0, 1), (1, 2)]))
        .shared_matrix(long_series(&[(0, 5)]))
        .settings(settings)
        .build()
        .unwrap();
    let steps = collect_steps(config).unwrap();
    let json = serde_json::to_value(&steps).unwrap();
    assert_eq!(json[1]["x"], 1);
    assert_eq!(json[1]["ys"], serde_json::json!([2]));
    assert_eq!(json[1]["sources"], serde_json::json!([0]));
}

#[test]
fn aggregates_use_lowercase_names() {
    let parsed: Vec<Aggregate> = serde_json::from_str(r#"["min", "median", "count"]"#).unwrap();
    assert_eq!(parsed, vec![Aggregate::Min, Aggregate::Median, Aggregate::Count]);
}
