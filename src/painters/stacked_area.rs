use tracing::{debug, trace};

use crate::core::{Polygon, Range, Region};
use crate::data::{StackValues, TableXyDataset};
use crate::error::ChartResult;
use crate::interaction::{ChartEntity, EntityArea, EntityCollection, EntityKind};
use crate::render::RenderFrame;

use super::{Palette, XyPlotContext, XyToolTipGenerator};

/// The two polygons painted for one item: from the midpoint with the previous
/// item to the item itself, and from the item to the midpoint with the next.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StackedAreaSegment {
    pub left: Polygon,
    pub right: Polygon,
}

impl StackedAreaSegment {
    #[must_use]
    pub fn hotspot(&self) -> Region {
        Region::from_polygon(self.left.clone()).union(Region::from_polygon(self.right.clone()))
    }
}

/// Stacked area renderer for [`TableXyDataset`]s.
///
/// Each item contributes a left and a right half segment so neighbouring
/// items meet at x midpoints; positive and negative values stack separately.
#[derive(Debug, Default)]
pub struct StackedXyAreaPainter {
    /// Round translated x coordinates to whole pixels, avoiding hairline gaps
    /// between adjacent segments.
    pub round_x_coordinates: bool,
    pub palette: Palette,
    pub tool_tip_generator: Option<Box<dyn XyToolTipGenerator>>,
}

impl StackedXyAreaPainter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_round_x_coordinates(mut self, round: bool) -> Self {
        self.round_x_coordinates = round;
        self
    }

    #[must_use]
    pub fn with_tool_tip_generator(mut self, generator: Box<dyn XyToolTipGenerator>) -> Self {
        self.tool_tip_generator = Some(generator);
        self
    }

    /// Everything is filled in a single pass.
    #[must_use]
    pub fn pass_count(&self) -> usize {
        1
    }

    #[must_use]
    pub fn find_range_bounds(&self, dataset: &TableXyDataset) -> Option<Range> {
        dataset.stacked_range_bounds()
    }

    fn translate_x(&self, ctx: &XyPlotContext, x: f64) -> f64 {
        let px = ctx
            .domain_axis
            .value_to_pixel(x, ctx.data_area, ctx.orientation.domain_axis_edge());
        if self.round_x_coordinates {
            (px + 0.5).floor()
        } else {
            px
        }
    }

    fn translate_y(&self, ctx: &XyPlotContext, y: f64) -> f64 {
        ctx.range_axis
            .value_to_pixel(y, ctx.data_area, ctx.orientation.range_axis_edge())
    }

    fn sample(
        dataset: &TableXyDataset,
        series: usize,
        item: usize,
    ) -> ChartResult<(f64, f64, StackValues)> {
        let x = dataset.x_value(item)?;
        let y = dataset.y_value(series, item)?.unwrap_or(0.0);
        let stack = dataset.stack_values(series, item)?;
        Ok((x, y, stack))
    }

    /// Computes the left and right polygons for one item in screen space.
    pub fn segment(
        &self,
        ctx: &XyPlotContext,
        dataset: &TableXyDataset,
        series: usize,
        item: usize,
    ) -> ChartResult<StackedAreaSegment> {
        let item_count = dataset.item_count();
        let (x1, y1, stack1) = Self::sample(dataset, series, item)?;
        let (x0, y0, stack0) = Self::sample(dataset, series, item.saturating_sub(1))?;
        let (x2, y2, stack2) =
            Self::sample(dataset, series, (item + 1).min(item_count.saturating_sub(1)))?;

        let x_left = (x0 + x1) / 2.0;
        let x_right = (x1 + x2) / 2.0;
        let stack_left = stack0.average(stack1);
        let stack_right = stack1.average(stack2);
        let adj_stack_left = stack0.adjusted_average(stack1);
        let adj_stack_right = stack1.adjusted_average(stack2);

        let t_x1 = self.translate_x(ctx, x1);
        let t_x_left = self.translate_x(ctx, x_left);
        let t_x_right = self.translate_x(ctx, x_right);

        let point = |domain: f64, range: f64| ctx.orientation.point(domain, range);
        let positive = y1 >= 0.0;
        // Stack side matching the item's sign.
        let side = |stack: StackValues| stack.base_for(y1);

        let t_y1 = self.translate_y(ctx, y1 + side(stack1));
        let t_stack1 = self.translate_y(ctx, side(stack1));
        let t_stack_left = self.translate_y(ctx, side(adj_stack_left));
        let t_stack_right = self.translate_y(ctx, side(adj_stack_right));

        let left_same_sign = (y0 >= 0.0) == positive;
        let left = if left_same_sign {
            let t_y_left = self.translate_y(ctx, (y0 + y1) / 2.0 + side(stack_left));
            Polygon::from_points([
                point(t_x1, t_y1),
                point(t_x1, t_stack1),
                point(t_x_left, t_stack_left),
                point(t_x_left, t_y_left),
            ])
        } else {
            Polygon::from_points([
                point(t_x1, t_stack1),
                point(t_x1, t_y1),
                point(t_x_left, t_stack_left),
            ])
        };

        let right_same_sign = (y2 >= 0.0) == positive;
        let right = if right_same_sign {
            let t_y_right = self.translate_y(ctx, (y1 + y2) / 2.0 + side(stack_right));
            Polygon::from_points([
                point(t_x1, t_stack1),
                point(t_x1, t_y1),
                point(t_x_right, t_y_right),
                point(t_x_right, t_stack_right),
            ])
        } else {
            Polygon::from_points([
                point(t_x1, t_stack1),
                point(t_x1, t_y1),
                point(t_x_right, t_stack_right),
            ])
        };

        Ok(StackedAreaSegment { left, right })
    }

    /// Paints one item and registers its hotspot.
    ///
    /// Fills happen on pass 0 only; entities are recorded on every pass the
    /// caller runs, so callers iterating passes should pass `entities` once.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_item(
        &self,
        frame: &mut RenderFrame,
        entities: Option<&mut EntityCollection>,
        ctx: &XyPlotContext,
        dataset: &TableXyDataset,
        series: usize,
        item: usize,
        pass: usize,
    ) -> ChartResult<()> {
        let segment = self.segment(ctx, dataset, series, item)?;
        trace!(series, item, pass, "draw stacked area item");

        if pass == 0 {
            let paint = self.palette.color(series);
            frame.fill_polygon(&segment.left, paint);
            frame.fill_polygon(&segment.right, paint);
        }

        if let Some(entities) = entities {
            let hotspot = segment.hotspot().intersect_rect(ctx.data_area);
            if !hotspot.is_empty() {
                let tooltip = self
                    .tool_tip_generator
                    .as_ref()
                    .and_then(|generator| generator.generate_tool_tip(dataset, series, item));
                entities.add(ChartEntity {
                    area: EntityArea::Region(hotspot),
                    kind: EntityKind::XyItem { series, item },
                    tooltip,
                });
            }
        }

        Ok(())
    }

    /// Paints every item of every series, series in dataset order.
    pub fn draw_all(
        &self,
        frame: &mut RenderFrame,
        mut entities: Option<&mut EntityCollection>,
        ctx: &XyPlotContext,
        dataset: &TableXyDataset,
    ) -> ChartResult<()> {
        debug!(
            series = dataset.series_count(),
            items = dataset.item_count(),
            "draw stacked area dataset"
        );
        for pass in 0..self.pass_count() {
            for series in 0..dataset.series_count() {
                for item in 0..dataset.item_count() {
                    let entities = if pass == 0 {
                        entities.as_deref_mut()
                    } else {
                        None
                    };
                    self.draw_item(frame, entities, ctx, dataset, series, item, pass)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::StackedXyAreaPainter;
    use crate::core::{PlotOrientation, Point, Polygon, Range, Rect, ValueAxis};
    use crate::data::TableXyDataset;
    use crate::painters::XyPlotContext;
    use approx::assert_relative_eq;

    fn context(orientation: PlotOrientation) -> XyPlotContext {
        // 1 value unit == 10 px on both axes, origin at the bottom-left corner.
        context_with_range(orientation, 0.0, 10.0)
    }

    fn context_with_range(orientation: PlotOrientation, lower: f64, upper: f64) -> XyPlotContext {
        XyPlotContext {
            data_area: Rect::new(0.0, 0.0, 100.0, 100.0),
            orientation,
            domain_axis: ValueAxis::new(Range::new(0.0, 10.0).expect("range")).expect("axis"),
            range_axis: ValueAxis::new(Range::new(lower, upper).expect("range")).expect("axis"),
        }
    }

    fn assert_points(polygon: &Polygon, expected: &[(f64, f64)]) {
        assert_eq!(polygon.len(), expected.len(), "{polygon:?}");
        for (point, &(x, y)) in polygon.points().iter().zip(expected) {
            assert_relative_eq!(point.x, x, epsilon = 1e-9);
            assert_relative_eq!(point.y, y, epsilon = 1e-9);
        }
    }

    /// Negative band under a negative base, x at 2, 4, 6.
    fn negative_stack(first: f64) -> TableXyDataset {
        TableXyDataset::new(vec![2.0, 4.0, 6.0])
            .and_then(|data| data.with_series("base", vec![Some(-2.0), Some(-2.0), Some(-2.0)]))
            .and_then(|data| data.with_series("low", vec![Some(first), Some(-3.0), Some(-5.0)]))
            .expect("dataset")
    }

    #[test]
    fn positive_item_with_positive_neighbours_builds_quads() {
        let data = TableXyDataset::new(vec![2.0, 4.0, 6.0])
            .and_then(|data| data.with_series("base", vec![Some(2.0), Some(2.0), Some(2.0)]))
            .and_then(|data| data.with_series("top", vec![Some(1.0), Some(3.0), Some(5.0)]))
            .expect("dataset");
        let painter = StackedXyAreaPainter::new();
        let segment = painter
            .segment(&context(PlotOrientation::Vertical), &data, 1, 1)
            .expect("segment");

        // x1 = 40px, stack base 2 -> y 80px, top 5 -> y 50px, left mid y (1+3)/2+2 = 4.
        assert_eq!(
            segment.left.points(),
            &[
                Point::new(40.0, 50.0),
                Point::new(40.0, 80.0),
                Point::new(30.0, 80.0),
                Point::new(30.0, 60.0),
            ]
        );
        assert_eq!(
            segment.right.points(),
            &[
                Point::new(40.0, 80.0),
                Point::new(40.0, 50.0),
                Point::new(50.0, 40.0),
                Point::new(50.0, 80.0),
            ]
        );
    }

    #[test]
    fn horizontal_orientation_swaps_coordinates() {
        let data = TableXyDataset::new(vec![2.0, 4.0])
            .and_then(|data| data.with_series("only", vec![Some(1.0), Some(3.0)]))
            .expect("dataset");
        let painter = StackedXyAreaPainter::new();
        let vertical = painter
            .segment(&context(PlotOrientation::Vertical), &data, 0, 1)
            .expect("segment");
        let horizontal = painter
            .segment(&context(PlotOrientation::Horizontal), &data, 0, 1)
            .expect("segment");
        // Horizontal plots map range values left-to-right and domain values bottom-up.
        assert_eq!(horizontal.left.len(), vertical.left.len());
        assert_eq!(horizontal.left.points()[0], Point::new(30.0, 60.0));
    }

    #[test]
    fn sign_change_produces_triangle() {
        let data = TableXyDataset::new(vec![0.0, 2.0, 4.0])
            .and_then(|data| data.with_series("s", vec![Some(-2.0), Some(4.0), Some(-1.0)]))
            .expect("dataset");
        let painter = StackedXyAreaPainter::new();
        let segment = painter
            .segment(&context(PlotOrientation::Vertical), &data, 0, 1)
            .expect("segment");
        // x1 = 20px, y1 = 4 -> 60px, zero stack -> 100px.
        assert_points(&segment.left, &[(20.0, 100.0), (20.0, 60.0), (10.0, 100.0)]);
        assert_points(&segment.right, &[(20.0, 100.0), (20.0, 60.0), (30.0, 100.0)]);
    }

    #[test]
    fn negative_item_with_negative_neighbours_builds_quads() {
        let data = negative_stack(-1.0);
        let painter = StackedXyAreaPainter::new();

        // Range -10..0: value v maps to -10v px vertically, 100 + 10v px horizontally.
        let vertical = painter
            .segment(&context_with_range(PlotOrientation::Vertical, -10.0, 0.0), &data, 1, 1)
            .expect("segment");
        assert_points(
            &vertical.left,
            &[(40.0, 50.0), (40.0, 20.0), (30.0, 20.0), (30.0, 40.0)],
        );
        assert_points(
            &vertical.right,
            &[(40.0, 20.0), (40.0, 50.0), (50.0, 60.0), (50.0, 20.0)],
        );

        let horizontal = painter
            .segment(&context_with_range(PlotOrientation::Horizontal, -10.0, 0.0), &data, 1, 1)
            .expect("segment");
        assert_points(
            &horizontal.left,
            &[(50.0, 60.0), (80.0, 60.0), (80.0, 70.0), (60.0, 70.0)],
        );
        assert_points(
            &horizontal.right,
            &[(80.0, 60.0), (50.0, 60.0), (40.0, 50.0), (80.0, 50.0)],
        );
    }

    #[test]
    fn negative_item_next_to_positive_neighbour_builds_triangle() {
        let data = negative_stack(3.0);
        let painter = StackedXyAreaPainter::new();

        let vertical = painter
            .segment(&context_with_range(PlotOrientation::Vertical, -10.0, 0.0), &data, 1, 1)
            .expect("segment");
        assert_points(&vertical.left, &[(40.0, 20.0), (40.0, 50.0), (30.0, 20.0)]);
        assert_points(
            &vertical.right,
            &[(40.0, 20.0), (40.0, 50.0), (50.0, 60.0), (50.0, 20.0)],
        );

        let horizontal = painter
            .segment(&context_with_range(PlotOrientation::Horizontal, -10.0, 0.0), &data, 1, 1)
            .expect("segment");
        assert_points(&horizontal.left, &[(80.0, 60.0), (50.0, 60.0), (80.0, 70.0)]);
    }

    #[test]
    fn empty_neighbour_stack_pins_midpoint_to_zero() {
        let data = TableXyDataset::new(vec![2.0, 4.0, 6.0])
            .and_then(|data| data.with_series("base", vec![Some(-2.0), Some(-2.0), None]))
            .and_then(|data| data.with_series("low", vec![Some(-1.0), Some(-3.0), Some(-5.0)]))
            .expect("dataset");
        let painter = StackedXyAreaPainter::new();

        // Right midpoint: top edge uses the plain average stack (-1), base collapses to 0.
        let vertical = painter
            .segment(&context_with_range(PlotOrientation::Vertical, -10.0, 0.0), &data, 1, 1)
            .expect("segment");
        assert_points(
            &vertical.right,
            &[(40.0, 20.0), (40.0, 50.0), (50.0, 50.0), (50.0, 0.0)],
        );

        let horizontal = painter
            .segment(&context_with_range(PlotOrientation::Horizontal, -10.0, 0.0), &data, 1, 1)
            .expect("segment");
        assert_points(
            &horizontal.right,
            &[(80.0, 60.0), (50.0, 60.0), (50.0, 50.0), (100.0, 50.0)],
        );
    }

    #[test]
    fn rounding_snaps_x_to_whole_pixels() {
        let data = TableXyDataset::new(vec![0.0, 0.33, 0.66])
            .and_then(|data| data.with_series("s", vec![Some(1.0), Some(1.0), Some(1.0)]))
            .expect("dataset");
        let painter = StackedXyAreaPainter::new().with_round_x_coordinates(true);
        let segment = painter
            .segment(&context(PlotOrientation::Vertical), &data, 0, 1)
            .expect("segment");
        assert!(
            segment
                .left
                .points()
                .iter()
                .all(|p| p.x == p.x.round())
        );
    }
}
