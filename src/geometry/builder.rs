use std::f64::consts::FRAC_PI_2;

use super::path::{Arc, ArcDirection, ConnectorPath, Point};

/// Default horizontal inset of the arcs from the row edges, in pixels.
pub const DEFAULT_X_PADDING: f64 = 36.0;

/// Arcs enter at the top of the circle and leave at the bottom.
const ARC_START_ANGLE: f64 = 3.0 * FRAC_PI_2;
const ARC_END_ANGLE: f64 = FRAC_PI_2;

/// Pixel size of a single row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowGeometry {
    pub width: f64,
    pub height: f64,
}

impl RowGeometry {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Where a row sits in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowRole {
    Last,
    First,
    /// Odd 0-based index: arc on the right, line travels left.
    Even { second_last: bool },
    /// Even 0-based index past the first: arc on the left, line travels right.
    Odd { second_last: bool },
}

impl RowRole {
    fn classify(position: usize, total: usize) -> Self {
        let second_last = position + 2 == total;
        if position + 1 == total {
            RowRole::Last
        } else if position == 0 {
            RowRole::First
        } else if (position + 1) % 2 == 0 {
            RowRole::Even { second_last }
        } else {
            RowRole::Odd { second_last }
        }
    }
}

/// Builds the connector drawn under row `position` of `total` rows.
///
/// Consecutive connectors join into a single snake: the first row draws a
/// baseline, then rows alternate between a right-hand and a left-hand
/// half-turn followed by a baseline running back across the row. The last row
/// draws nothing.
pub fn build(position: usize, total: usize, geometry: RowGeometry, x_padding: f64) -> ConnectorPath {
    debug_assert!(total >= 1, "row count must be at least 1");
    debug_assert!(position < total, "row {position} out of range for {total} rows");

    let RowGeometry { width, height } = geometry;

    match RowRole::classify(position, total) {
        RowRole::Last => ConnectorPath::empty(),
        RowRole::First => {
            let padding = if total == 2 { 0.0 } else { x_padding };
            ConnectorPath::builder()
                .move_to(Point::new(0.0, height))
                .line_to(Point::new(width - padding, height))
                .finish()
        }
        RowRole::Even { second_last } => {
            let end_x = if second_last { 0.0 } else { x_padding };
            half_turn(
                Point::new(width - x_padding, height / 2.0),
                height / 2.0,
                ArcDirection::Clockwise,
                Point::new(end_x, height),
            )
        }
        RowRole::Odd { second_last } => {
            let end_x = if second_last { width } else { width - x_padding };
            half_turn(
                Point::new(x_padding, height / 2.0),
                height / 2.0,
                ArcDirection::CounterClockwise,
                Point::new(end_x, height),
            )
        }
    }
}

fn half_turn(center: Point, radius: f64, direction: ArcDirection, line_end: Point) -> ConnectorPath {
    let arc = Arc {
        center,
        radius,
        start_angle: ARC_START_ANGLE,
        end_angle: ARC_END_ANGLE,
        direction,
    };
    ConnectorPath::builder()
        .move_to(arc.start_point())
        .arc(arc)
        .line_to(line_end)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathSegment;
    use std::f64::consts::PI;

    const ROW: RowGeometry = RowGeometry::new(320.0, 44.0);

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn approx_point(a: Point, b: Point) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y)
    }

    fn only_arc(path: &ConnectorPath) -> Arc {
        let arcs: Vec<Arc> = path
            .segments()
            .iter()
            .filter_map(|seg| match seg {
                PathSegment::Arc(arc) => Some(*arc),
                _ => None,
            })
            .collect();
        assert_eq!(arcs.len(), 1, "expected exactly one arc in {path:?}");
        arcs[0]
    }

    #[test]
    fn test_single_row_draws_nothing() {
        assert!(build(0, 1, ROW, DEFAULT_X_PADDING).is_empty());
    }

    #[test]
    fn test_last_row_draws_nothing() {
        for total in 2..10 {
            assert!(
                build(total - 1, total, ROW, DEFAULT_X_PADDING).is_empty(),
                "last row of {total} should be empty"
            );
        }
    }

    #[test]
    fn test_first_row_of_two_spans_full_width() {
        let path = build(0, 2, ROW, DEFAULT_X_PADDING);
        assert_eq!(
            path.segments(),
            &[
                PathSegment::MoveTo(Point::new(0.0, 44.0)),
                PathSegment::LineTo(Point::new(320.0, 44.0)),
            ]
        );
    }

    #[test]
    fn test_first_row_of_three_stops_at_padding() {
        let path = build(0, 3, ROW, 36.0);
        assert_eq!(
            path.segments(),
            &[
                PathSegment::MoveTo(Point::new(0.0, 44.0)),
                PathSegment::LineTo(Point::new(284.0, 44.0)),
            ]
        );
    }

    #[test]
    fn test_second_last_even_row_reaches_left_edge() {
        let path = build(1, 3, ROW, DEFAULT_X_PADDING);
        let arc = only_arc(&path);
        assert!(approx_point(arc.center, Point::new(284.0, 22.0)));
        assert!(approx(arc.radius, 22.0));
        assert_eq!(arc.direction, ArcDirection::Clockwise);
        assert!(approx_point(path.end_point().unwrap(), Point::new(0.0, 44.0)));
    }

    #[test]
    fn test_four_rows() {
        // Row 1 is an inner even row, row 2 the second-to-last odd row.
        let row1 = build(1, 4, ROW, DEFAULT_X_PADDING);
        assert_eq!(only_arc(&row1).direction, ArcDirection::Clockwise);
        assert!(approx_point(row1.end_point().unwrap(), Point::new(36.0, 44.0)));

        let row2 = build(2, 4, ROW, DEFAULT_X_PADDING);
        assert_eq!(only_arc(&row2).direction, ArcDirection::CounterClockwise);
        assert!(approx_point(row2.end_point().unwrap(), Point::new(320.0, 44.0)));

        assert!(build(3, 4, ROW, DEFAULT_X_PADDING).is_empty());
    }

    #[test]
    fn test_inner_odd_row_stops_at_padding() {
        let path = build(2, 6, ROW, DEFAULT_X_PADDING);
        let arc = only_arc(&path);
        assert!(approx_point(arc.center, Point::new(36.0, 22.0)));
        assert!(approx_point(path.end_point().unwrap(), Point::new(284.0, 44.0)));
    }

    #[test]
    fn test_arcs_are_mirrored_half_turns() {
        let even = only_arc(&build(1, 8, ROW, DEFAULT_X_PADDING));
        let odd = only_arc(&build(2, 8, ROW, DEFAULT_X_PADDING));

        assert!(approx(even.sweep(), PI));
        assert!(approx(odd.sweep(), -PI));
        assert!(approx(even.start_angle, odd.start_angle));
        assert!(approx(even.end_angle, odd.end_angle));

        // Both enter at the top edge and leave at the bottom edge.
        for arc in [even, odd] {
            assert!(approx(arc.start_point().y, 0.0));
            assert!(approx(arc.end_point().y, 44.0));
        }
    }

    #[test]
    fn test_path_starts_with_move_to_arc_start() {
        let path = build(1, 5, ROW, DEFAULT_X_PADDING);
        let arc = only_arc(&path);
        match path.segments()[0] {
            PathSegment::MoveTo(p) => assert!(approx_point(p, arc.start_point())),
            other => panic!("expected MoveTo, got {other:?}"),
        }
    }

    #[test]
    fn test_consecutive_rows_join_up() {
        // Each connector's end sits directly above the next arc's entry point,
        // one row lower.
        let total = 8;
        for position in 0..total - 2 {
            let this = build(position, total, ROW, DEFAULT_X_PADDING);
            let next = build(position + 1, total, ROW, DEFAULT_X_PADDING);
            let end = this.end_point().unwrap();
            let entry = next.start_point().unwrap();
            assert!(approx(end.x, entry.x), "row {position} ends at {end:?}, next enters at {entry:?}");
            assert!(approx(end.y - ROW.height, entry.y));
        }
    }
}
