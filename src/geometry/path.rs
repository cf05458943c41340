//! Value-type 2D paths made of straight lines and circular arcs.
//!
//! Coordinates are screen pixels with y growing downward. Angles are radians
//! measured the same way cairo measures them, so a `Clockwise` arc increases
//! its angle and looks clockwise on screen.

use std::f64::consts::TAU;

/// Tolerance used when comparing accumulated lengths.
const LENGTH_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

/// A circular arc from `start_angle` to `end_angle` travelling in `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub direction: ArcDirection,
}

impl Arc {
    /// Signed angular distance travelled: positive for clockwise, negative
    /// for counter-clockwise. Always within (-2π, 2π].
    pub fn sweep(&self) -> f64 {
        let raw = self.end_angle - self.start_angle;
        match self.direction {
            ArcDirection::Clockwise => {
                let s = raw.rem_euclid(TAU);
                if s == 0.0 && raw != 0.0 {
                    TAU
                } else {
                    s
                }
            }
            ArcDirection::CounterClockwise => {
                let s = (-raw).rem_euclid(TAU);
                if s == 0.0 && raw != 0.0 {
                    -TAU
                } else {
                    -s
                }
            }
        }
    }

    pub fn point_at_angle(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }

    pub fn start_point(&self) -> Point {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Point {
        self.point_at_angle(self.start_angle + self.sweep())
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep().abs()
    }

    /// Same arc cut short after `t` (0..=1) of its sweep.
    fn truncated(&self, t: f64) -> Arc {
        Arc {
            end_angle: self.start_angle + self.sweep() * t,
            ..*self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    Arc(Arc),
}

/// One row's connector. Built once, never edited; a new binding gets a new
/// path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorPath {
    segments: Vec<PathSegment>,
}

impl ConnectorPath {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> PathRecorder {
        PathRecorder::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[cfg(test)]
    pub fn start_point(&self) -> Option<Point> {
        self.segments.first().map(|seg| match seg {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => *p,
            PathSegment::Arc(arc) => arc.start_point(),
        })
    }

    pub fn end_point(&self) -> Option<Point> {
        self.segments.last().map(|seg| match seg {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => *p,
            PathSegment::Arc(arc) => arc.end_point(),
        })
    }

    /// Total stroked length. Moves contribute nothing.
    pub fn length(&self) -> f64 {
        let mut current: Option<Point> = None;
        let mut total = 0.0;
        for seg in &self.segments {
            match seg {
                PathSegment::MoveTo(p) => current = Some(*p),
                PathSegment::LineTo(p) => {
                    if let Some(from) = current {
                        total += from.distance(*p);
                    }
                    current = Some(*p);
                }
                PathSegment::Arc(arc) => {
                    if let Some(from) = current {
                        total += from.distance(arc.start_point());
                    }
                    total += arc.length();
                    current = Some(arc.end_point());
                }
            }
        }
        total
    }

    /// Prefix of this path covering `fraction` of its length.
    ///
    /// This is the stroke-end trim a renderer applies while a connector is
    /// being revealed. `fraction` is clamped to `[0, 1]`.
    pub fn trimmed(&self, fraction: f64) -> ConnectorPath {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };
        if fraction >= 1.0 {
            return self.clone();
        }
        let total = self.length();
        if fraction <= 0.0 || total <= LENGTH_EPSILON {
            return ConnectorPath::empty();
        }

        let mut budget = total * fraction;
        let mut out = PathRecorder::default();
        let mut current: Option<Point> = None;

        for seg in &self.segments {
            if budget <= LENGTH_EPSILON {
                break;
            }
            match *seg {
                PathSegment::MoveTo(p) => {
                    out = out.move_to(p);
                    current = Some(p);
                }
                PathSegment::LineTo(p) => {
                    let Some(from) = current else {
                        out = out.move_to(p);
                        current = Some(p);
                        continue;
                    };
                    let len = from.distance(p);
                    if len <= budget {
                        out = out.line_to(p);
                        budget -= len;
                    } else {
                        out = out.line_to(from.lerp(p, budget / len));
                        budget = 0.0;
                    }
                    current = Some(p);
                }
                PathSegment::Arc(arc) => {
                    // An arc starting away from the current point is joined by
                    // an implicit line, as cairo does.
                    if let Some(from) = current {
                        let join = from.distance(arc.start_point());
                        if join > LENGTH_EPSILON {
                            if join >= budget {
                                out = out.line_to(from.lerp(arc.start_point(), budget / join));
                                break;
                            }
                            budget -= join;
                        }
                    }
                    let len = arc.length();
                    if len <= budget {
                        out = out.arc(arc);
                        budget -= len;
                    } else {
                        out = out.arc(arc.truncated(budget / len));
                        budget = 0.0;
                    }
                    current = Some(arc.end_point());
                }
            }
        }

        out.finish()
    }
}

/// Records segments in drawing order and seals them into a `ConnectorPath`.
#[derive(Debug, Default)]
pub struct PathRecorder {
    segments: Vec<PathSegment>,
}

impl PathRecorder {
    pub fn move_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn arc(mut self, arc: Arc) -> Self {
        self.segments.push(PathSegment::Arc(arc));
        self
    }

    pub fn finish(self) -> ConnectorPath {
        ConnectorPath {
            segments: self.segments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    fn approx_point(a: Point, b: Point) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y)
    }

    fn half_turn(direction: ArcDirection) -> Arc {
        Arc {
            center: Point::new(50.0, 22.0),
            radius: 22.0,
            start_angle: 3.0 * FRAC_PI_2,
            end_angle: FRAC_PI_2,
            direction,
        }
    }

    #[test]
    fn test_sweep_direction() {
        assert!(approx(half_turn(ArcDirection::Clockwise).sweep(), PI));
        assert!(approx(half_turn(ArcDirection::CounterClockwise).sweep(), -PI));
    }

    #[test]
    fn test_clockwise_half_turn_passes_right_side() {
        let arc = half_turn(ArcDirection::Clockwise);
        let mid = arc.point_at_angle(arc.start_angle + arc.sweep() / 2.0);
        assert!(approx_point(mid, Point::new(72.0, 22.0)));

        let arc = half_turn(ArcDirection::CounterClockwise);
        let mid = arc.point_at_angle(arc.start_angle + arc.sweep() / 2.0);
        assert!(approx_point(mid, Point::new(28.0, 22.0)));
    }

    #[test]
    fn test_length_of_line_and_arc() {
        let arc = half_turn(ArcDirection::Clockwise);
        let path = ConnectorPath::builder()
            .move_to(arc.start_point())
            .arc(arc)
            .line_to(Point::new(0.0, 44.0))
            .finish();
        let expected = 22.0 * PI + 50.0;
        assert!(approx(path.length(), expected));
    }

    #[test]
    fn test_trim_bounds() {
        let path = ConnectorPath::builder()
            .move_to(Point::new(0.0, 44.0))
            .line_to(Point::new(100.0, 44.0))
            .finish();
        assert!(path.trimmed(0.0).is_empty());
        assert_eq!(path.trimmed(1.0), path);
        assert_eq!(path.trimmed(3.0), path);
        assert!(path.trimmed(f64::NAN).is_empty());
    }

    #[test]
    fn test_trim_line_midpoint() {
        let path = ConnectorPath::builder()
            .move_to(Point::new(0.0, 44.0))
            .line_to(Point::new(100.0, 44.0))
            .finish();
        let half = path.trimmed(0.5);
        assert!(approx_point(half.end_point().unwrap(), Point::new(50.0, 44.0)));
        assert!(approx(half.length(), 50.0));
    }

    #[test]
    fn test_trim_inside_arc_stays_on_circle() {
        let arc = half_turn(ArcDirection::Clockwise);
        let path = ConnectorPath::builder()
            .move_to(arc.start_point())
            .arc(arc)
            .line_to(Point::new(0.0, 44.0))
            .finish();
        let arc_share = arc.length() / path.length();
        let partial = path.trimmed(arc_share / 2.0);

        // Half of the arc lands at the rightmost point of the circle.
        let end = partial.end_point().unwrap();
        assert!(approx_point(end, Point::new(72.0, 22.0)));
        assert!(approx(end.distance(arc.center), arc.radius));
        assert_eq!(partial.segments().len(), 2);
    }

    #[test]
    fn test_empty_path_has_no_endpoints() {
        let path = ConnectorPath::empty();
        assert!(path.start_point().is_none());
        assert!(path.end_point().is_none());
        assert_eq!(path.length(), 0.0);
        assert!(path.trimmed(0.5).is_empty());
    }
}
