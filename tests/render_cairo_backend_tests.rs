#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chart_painters::ChartError;
use chart_painters::api::{Pie3dChart, Pie3dChartConfig, StackedAreaChart, StackedAreaChartConfig};
use chart_painters::core::Viewport;
use chart_painters::data::{PieDataset, TableXyDataset};
use chart_painters::render::CairoRenderer;

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_pie_sides_and_tops() {
    let renderer = CairoRenderer::new(400, 300).expect("renderer");
    let data = PieDataset::new()
        .with_value("a", 3.0)
        .and_then(|data| data.with_value("b", 1.0))
        .expect("dataset");
    let mut chart = Pie3dChart::new(renderer, Pie3dChartConfig::new(Viewport::new(400, 300)), data)
        .expect("chart");

    chart.render().expect("render");
    let stats = chart.into_renderer().last_stats();
    assert!(stats.fills_drawn >= 5);
    assert!(stats.strokes_drawn >= 2);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let renderer = CairoRenderer::new(600, 320).expect("renderer");
    let data = TableXyDataset::new(vec![0.0, 1.0, 2.0])
        .and_then(|data| data.with_series("a", vec![Some(1.0), Some(2.0), Some(1.5)]))
        .expect("dataset");
    let mut chart = StackedAreaChart::new(
        renderer,
        StackedAreaChartConfig::new(Viewport::new(600, 320)),
        data,
    )
    .expect("chart");

    let surface = ImageSurface::create(Format::ARgb32, 600, 320).expect("surface");
    let context = Context::new(&surface).expect("context");
    chart
        .render_on_cairo_context(&context)
        .expect("render on context");

    assert!(chart.into_renderer().last_stats().fills_drawn >= 4);
}
