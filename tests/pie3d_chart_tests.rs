use approx::assert_relative_eq;
use chart_painters::api::{Pie3dChart, Pie3dChartConfig};
use chart_painters::core::{Point, Viewport};
use chart_painters::data::PieDataset;
use chart_painters::interaction::EntityKind;
use chart_painters::painters::Palette;
use chart_painters::render::{DrawCommand, NullRenderer};

fn dataset() -> PieDataset {
    PieDataset::new()
        .with_value("a", 1.0)
        .and_then(|data| data.with_value("b", 1.0))
        .and_then(|data| data.with_value("c", 2.0))
        .expect("dataset")
}

// Plot area (8, 8, 384, 284); top face framed by (8, 8, 384, 249.92).
fn config() -> Pie3dChartConfig {
    Pie3dChartConfig::new(Viewport::new(400, 300))
}

#[test]
fn sections_run_clockwise_from_twelve_o_clock() {
    let chart = Pie3dChart::new(NullRenderer::default(), config(), dataset()).expect("chart");
    let layout = chart.layout();

    assert_relative_eq!(layout.depth, 284.0 * 0.12, epsilon = 1e-9);
    assert_eq!(layout.sections.len(), 3);
    let arcs: Vec<_> = layout.sections.iter().map(|s| s.arc).collect();
    assert_relative_eq!(arcs[0].start_deg, 90.0);
    assert_relative_eq!(arcs[0].extent_deg, -90.0);
    assert_relative_eq!(arcs[1].start_deg, 0.0);
    assert_relative_eq!(arcs[2].start_deg, -90.0);
    assert_relative_eq!(arcs[2].extent_deg, -180.0);
}

#[test]
fn non_positive_values_get_no_section() {
    let data = dataset()
        .with_value("zero", 0.0)
        .and_then(|data| data.with_value("neg", -3.0))
        .expect("dataset");
    let config = config().with_clockwise(false);
    let chart = Pie3dChart::new(NullRenderer::default(), config, data).expect("chart");
    let layout = chart.layout();

    assert_eq!(layout.sections.len(), 3);
    let sweep: f64 = layout.sections.iter().map(|s| s.arc.extent_deg).sum();
    assert_relative_eq!(sweep, 360.0, epsilon = 1e-9);
}

#[test]
fn top_faces_are_painted_last_and_registered_as_entities() {
    let mut chart = Pie3dChart::new(NullRenderer::default(), config(), dataset()).expect("chart");
    let frame = chart.build_render_frame().expect("frame");
    let center = chart.layout().top_frame.center();
    let palette = Palette::default();

    let tail = &frame.commands[frame.commands.len() - 6..];
    for (index, pair) in tail.chunks(2).enumerate() {
        match (&pair[0], &pair[1]) {
            (
                DrawCommand::FillPolygon { polygon, color },
                DrawCommand::StrokePolygon { .. },
            ) => {
                assert_eq!(polygon.points()[0], center);
                assert_eq!(*color, palette.color(index));
            }
            other => panic!("expected wedge fill and outline, got {other:?}"),
        }
    }
    // Side faces come before the tops.
    assert!(frame.commands.len() > 7);

    assert_eq!(chart.entities().len(), 3);
    let a = chart.entity_at(Point::new(260.0, 80.0)).expect("section a");
    assert_eq!(
        a.kind,
        EntityKind::PieSection {
            key: "a".to_owned()
        }
    );
    assert_eq!(a.tooltip.as_deref(), Some("a: (1, 25%)"));

    let c = chart.entity_at(Point::new(120.0, 140.0)).expect("section c");
    assert_eq!(
        c.kind,
        EntityKind::PieSection {
            key: "c".to_owned()
        }
    );
}

#[test]
fn darker_sides_shade_side_fills() {
    let config = config().with_darker_sides(true);
    let mut chart = Pie3dChart::new(NullRenderer::default(), config, dataset()).expect("chart");
    let frame = chart.build_render_frame().expect("frame");
    let shaded = Palette::default().color(2).darker();

    assert!(frame.commands.iter().any(|command| matches!(
        command,
        DrawCommand::FillPolygon { color, .. } if *color == shaded
    )));
}

#[test]
fn single_section_renders_full_wrap() {
    let data = PieDataset::new().with_value("only", 5.0).expect("dataset");
    let mut chart = Pie3dChart::new(NullRenderer::default(), config(), data).expect("chart");
    chart.render().expect("render");

    assert_eq!(chart.entities().len(), 1);
    let renderer = chart.into_renderer();
    assert_eq!(renderer.frames_rendered, 1);
    assert!(renderer.last_counts.fills >= 3);
}

#[test]
fn empty_dataset_renders_background_only() {
    let mut chart =
        Pie3dChart::new(NullRenderer::default(), config(), PieDataset::new()).expect("chart");
    let frame = chart.build_render_frame().expect("frame");
    assert_eq!(frame.commands.len(), 1);
    assert!(chart.entities().is_empty());
}
