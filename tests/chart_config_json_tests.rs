use chart_painters::ChartError;
use chart_painters::api::{GanttChartConfig, Pie3dChartConfig, StackedAreaChartConfig};
use chart_painters::core::{PlotOrientation, Range, Viewport};
use chart_painters::data::{GanttDataset, PieDataset, TableXyDataset};
use chart_painters::painters::GanttStyle;
use chart_painters::render::Color;

#[test]
fn gantt_config_round_trips_through_json() {
    let style = GanttStyle {
        start_percent: 0.25,
        end_percent: 0.75,
        item_labels_visible: true,
        ..GanttStyle::default()
    };
    let config = GanttChartConfig::new(Viewport::new(800, 600))
        .with_orientation(PlotOrientation::Vertical)
        .with_time_range(Range::new(0.0, 86_400_000.0).expect("range"))
        .with_style(style)
        .with_crosshair_locked_on_data(false);

    let json = config.to_json_pretty().expect("serialize");
    let restored = GanttChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn partial_style_json_fills_in_defaults() {
    let json = r#"{
        "viewport": { "width": 320, "height": 200 },
        "style": { "complete_paint": { "red": 0.0, "green": 0.0, "blue": 1.0, "alpha": 1.0 } }
    }"#;
    let config = GanttChartConfig::from_json_str(json).expect("parse");
    assert_eq!(config.style.complete_paint, Color::rgb(0.0, 0.0, 1.0));
    assert_eq!(config.style.incomplete_paint, Color::RED);
    assert_eq!(config.style.start_percent, 0.35);
    assert_eq!(config.style.end_percent, 0.65);
    assert!(config.style.shadows_visible);
}

#[test]
fn pie_and_stacked_configs_keep_their_defaults() {
    let pie = Pie3dChartConfig::from_json_str(r#"{"viewport":{"width":10,"height":10}}"#)
        .expect("parse");
    assert_eq!(pie.start_angle_deg, 90.0);
    assert!(pie.clockwise);
    assert_eq!(pie.depth_factor, 0.12);

    let stacked =
        StackedAreaChartConfig::from_json_str(r#"{"viewport":{"width":10,"height":10}}"#)
            .expect("parse");
    assert_eq!(stacked.orientation, PlotOrientation::Vertical);
    assert!(!stacked.round_x_coordinates);
    assert!(stacked.domain_range.is_none());
}

#[test]
fn malformed_json_maps_to_invalid_data() {
    let err = GanttChartConfig::from_json_str("{").expect_err("must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
    let err = TableXyDataset::from_json_str(r#"{"x_values":[0.0],"series":{"s":[1.0,2.0]}}"#)
        .expect_err("length mismatch");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(GanttDataset::from_json_str("[]").is_err());
    assert!(PieDataset::from_json_str("nope").is_err());
}

#[test]
fn direct_dataset_deserialization_is_validated() {
    let short = r#"{"x_values":[0.0,1.0,2.0],"series":{"s":[1.0]}}"#;
    assert!(serde_json::from_str::<TableXyDataset>(short).is_err());

    let mismatched = r#"{
        "series": {
            "scheduled": {
                "tasks": {
                    "build": {
                        "description": "other",
                        "duration": {
                            "start": "2024-01-03T00:00:00Z",
                            "end": "2024-01-09T00:00:00Z"
                        }
                    }
                }
            }
        }
    }"#;
    let err = GanttDataset::from_json_str(mismatched).expect_err("key mismatch");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert!(serde_json::from_str::<GanttDataset>(mismatched).is_err());

    let matched = mismatched.replace(r#""other""#, r#""build""#);
    let data: GanttDataset = serde_json::from_str(&matched).expect("parse");
    assert_eq!(data.column_count(), 1);
    assert_eq!(data.column_key(0).expect("key"), "build");
    assert!(data.start_value(0, 0).expect("lookup").is_some());
}
