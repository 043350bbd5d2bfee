use chart_painters::api::{Pie3dChart, Pie3dChartConfig, StackedAreaChart, StackedAreaChartConfig};
use chart_painters::core::{PlotOrientation, Viewport};
use chart_painters::data::{PieDataset, TableXyDataset};
use chart_painters::render::{DrawCommand, NullRenderer};
use proptest::prelude::*;

fn series_strategy(len: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::weighted(0.9, -500.0f64..500.0f64), len)
}

proptest! {
    #[test]
    fn stacked_area_frames_are_deterministic_and_finite(
        len in 2usize..24,
        horizontal in any::<bool>(),
        seeds in prop::collection::vec(series_strategy(24), 1..5),
    ) {
        let xs: Vec<f64> = (0..len).map(|i| i as f64 * 1.5).collect();
        let mut data = TableXyDataset::new(xs).expect("dataset");
        for (index, values) in seeds.into_iter().enumerate() {
            data.add_series(format!("s{index}"), values[..len].to_vec()).expect("series");
        }
        let orientation = if horizontal {
            PlotOrientation::Horizontal
        } else {
            PlotOrientation::Vertical
        };
        let config = StackedAreaChartConfig::new(Viewport::new(640, 360))
            .with_orientation(orientation)
            .with_round_x_coordinates(true);
        let mut chart =
            StackedAreaChart::new(NullRenderer::default(), config, data).expect("chart");

        let first = chart.build_render_frame().expect("first frame");
        let second = chart.build_render_frame().expect("second frame");
        prop_assert_eq!(&first, &second);
        prop_assert!(first.validate().is_ok());

        let area = chart.plot_context().expect("context").data_area;
        for entity in chart.entities().iter() {
            let bounds = entity.area.bounds().expect("bounds");
            prop_assert!(bounds.min_x() >= area.min_x() - 1e-6);
            prop_assert!(bounds.max_y() <= area.max_y() + 1e-6);
        }
    }

    #[test]
    fn pie_sections_sweep_a_full_turn(
        values in prop::collection::vec(0.01f64..1000.0f64, 1..12),
        start in -360.0f64..360.0f64,
        clockwise in any::<bool>(),
    ) {
        let mut data = PieDataset::new();
        for (index, value) in values.iter().enumerate() {
            data.set_value(format!("k{index}"), *value).expect("value");
        }
        let config = Pie3dChartConfig::new(Viewport::new(480, 320))
            .with_start_angle(start)
            .with_clockwise(clockwise);
        let mut chart = Pie3dChart::new(NullRenderer::default(), config, data).expect("chart");

        let layout = chart.layout();
        let sweep: f64 = layout.sections.iter().map(|s| s.arc.extent_deg.abs()).sum();
        prop_assert!((sweep - 360.0).abs() < 1e-6);

        let frame = chart.build_render_frame().expect("frame");
        prop_assert!(frame.validate().is_ok());
        let wedge_fills = frame
            .commands
            .iter()
            .filter(|command| match command {
                DrawCommand::FillPolygon { polygon, .. } => {
                    polygon.points()[0] == layout.top_frame.center()
                }
                _ => false,
            })
            .count();
        prop_assert!(wedge_fills <= values.len());
        prop_assert_eq!(chart.entities().len(), values.len());
    }
}
