// Drawing layer for a row's connector
// Strokes the visible part of the slot's path with cairo and keeps redrawing
// at frame rate while the connector is drawing on

use gtk4::prelude::*;
use gtk4::{cairo, glib, DrawingArea};
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::animation::ConnectorSlot;
use crate::geometry::{ArcDirection, ConnectorPath, PathSegment};

/// Redraw interval while a reveal is in progress (~60fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Connector stroke colour: 40% grey, opaque.
const STROKE_RGBA: (f64, f64, f64, f64) = (0.4, 0.4, 0.4, 1.0);

pub struct ConnectorLayer {
    area: DrawingArea,
    slot: ConnectorSlot,
}

impl ConnectorLayer {
    pub fn new(line_width: f64) -> Self {
        let area = DrawingArea::new();
        area.set_hexpand(true);
        area.set_vexpand(true);
        area.set_can_target(false);
        area.add_css_class("connector-layer");

        let slot = ConnectorSlot::new();

        let draw_slot = slot.clone();
        area.set_draw_func(move |_area, cr, _width, height| {
            if draw_slot.stroke_end() == 0.0 {
                return;
            }
            let path = draw_slot.visible_path(Instant::now());
            if path.is_empty() {
                return;
            }
            if let Err(err) = stroke_connector(cr, &path, f64::from(height), line_width) {
                tracing::warn!(error = ?err, "Failed to stroke connector");
            }
        });

        // Each reveal gets its own frame pump; a newer pump retires older ones.
        let pump_id = Rc::new(Cell::new(0u64));
        let revealing = Rc::new(Cell::new(false));
        let area_weak = area.downgrade();
        slot.connect_changed(move |state| {
            let is_revealing = state.is_animating();
            let was_revealing = revealing.replace(is_revealing);

            let Some(area) = area_weak.upgrade() else {
                return;
            };
            area.queue_draw();

            if is_revealing && !was_revealing {
                let id = pump_id.get() + 1;
                pump_id.set(id);
                let pump_id = pump_id.clone();
                let revealing = revealing.clone();
                let area_weak = area.downgrade();
                glib::timeout_add_local(FRAME_INTERVAL, move || {
                    if pump_id.get() != id || !revealing.get() {
                        return glib::ControlFlow::Break;
                    }
                    match area_weak.upgrade() {
                        Some(area) => {
                            area.queue_draw();
                            glib::ControlFlow::Continue
                        }
                        None => glib::ControlFlow::Break,
                    }
                });
            }
        });

        Self { area, slot }
    }

    pub fn widget(&self) -> &DrawingArea {
        &self.area
    }

    pub fn slot(&self) -> &ConnectorSlot {
        &self.slot
    }
}

/// Vertical `(offset, scale)` that keeps a stroke of `line_width` centred on
/// `y = 0` and `y = height` inside the allocation.
fn stroke_inset(height: f64, line_width: f64) -> (f64, f64) {
    if height <= line_width || line_width <= 0.0 {
        return (0.0, 1.0);
    }
    (line_width / 2.0, (height - line_width) / height)
}

/// Stroke `path` in the connector colour.
///
/// The path is traced under the inset transform and stroked after restoring
/// it, so the pen keeps its full width in both directions.
fn stroke_connector(
    cr: &cairo::Context,
    path: &ConnectorPath,
    height: f64,
    line_width: f64,
) -> Result<(), cairo::Error> {
    let (offset, scale) = stroke_inset(height, line_width);
    cr.save()?;
    cr.translate(0.0, offset);
    cr.scale(1.0, scale);
    trace_path(cr, path);
    cr.restore()?;

    let (r, g, b, a) = STROKE_RGBA;
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(line_width);
    cr.stroke()
}

/// Append `path` to the context's current path, replacing whatever was there.
fn trace_path(cr: &cairo::Context, path: &ConnectorPath) {
    cr.new_path();
    for segment in path.segments() {
        match *segment {
            PathSegment::MoveTo(p) => cr.move_to(p.x, p.y),
            PathSegment::LineTo(p) => cr.line_to(p.x, p.y),
            PathSegment::Arc(arc) => {
                let end = arc.start_angle + arc.sweep();
                match arc.direction {
                    ArcDirection::Clockwise => {
                        cr.arc(arc.center.x, arc.center.y, arc.radius, arc.start_angle, end)
                    }
                    ArcDirection::CounterClockwise => {
                        cr.arc_negative(arc.center.x, arc.center.y, arc.radius, arc.start_angle, end)
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke_span(y: f64, height: f64, line_width: f64) -> (f64, f64) {
        let (offset, scale) = stroke_inset(height, line_width);
        let centre = offset + y * scale;
        (centre - line_width / 2.0, centre + line_width / 2.0)
    }

    #[test]
    fn test_edge_strokes_stay_inside_allocation() {
        let (height, line_width) = (44.0, 1.0);

        let (top, _) = stroke_span(0.0, height, line_width);
        assert!(top >= 0.0, "top stroke starts at {top}");

        let (_, bottom) = stroke_span(height, height, line_width);
        assert!(bottom <= height, "baseline stroke ends at {bottom}");
        assert!((bottom - height).abs() < 1e-9);
    }

    #[test]
    fn test_inset_keeps_mid_row_centred() {
        let (offset, scale) = stroke_inset(44.0, 2.0);
        assert!((offset + 22.0 * scale - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_inset_for_degenerate_rows() {
        assert_eq!(stroke_inset(1.0, 1.0), (0.0, 1.0));
        assert_eq!(stroke_inset(0.0, 1.0), (0.0, 1.0));
        assert_eq!(stroke_inset(44.0, 0.0), (0.0, 1.0));
    }
}
