//! Cubic Bézier curves and axis-aligned boxes.

use glam::Vec2;

/// Samples used when estimating a segment's arc length
pub const ARC_SAMPLES: usize = 12;

/// One cubic Bézier segment in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicSegment {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    pub fn point_at(&self, t: f32) -> Vec2 {
        bezier3(self.p0, self.p1, self.p2, self.p3, t)
    }

    pub fn length(&self) -> f32 {
        arc_length(self)
    }
}

/// Evaluate a cubic Bézier at `t` in [0, 1].
///
/// The endpoints are returned exactly at `t == 0` and `t == 1`.
pub fn bezier3(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    if t <= 0.0 {
        return p0;
    }
    if t >= 1.0 {
        return p3;
    }
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    p0 * (uu * u) + p1 * (3.0 * uu * t) + p2 * (3.0 * u * tt) + p3 * (tt * t)
}

/// Polyline approximation of a segment's length.
pub fn arc_length(seg: &CubicSegment) -> f32 {
    let mut len = 0.0;
    let mut prev = seg.p0;
    for i in 1..=ARC_SAMPLES {
        let p = seg.point_at(i as f32 / ARC_SAMPLES as f32);
        len += prev.distance(p);
        prev = p;
    }
    len
}

/// Time needed to traverse `seg` at `speed` px/s, never below `min_duration`.
pub fn segment_duration(seg: &CubicSegment, speed: f32, min_duration: f32) -> f32 {
    if speed <= 0.0 {
        return min_duration;
    }
    (seg.length() / speed).max(min_duration)
}

/// Axis-aligned bounding box, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap; touching edges do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CubicSegment {
        CubicSegment::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 40.0),
            Vec2::new(50.0, 40.0),
            Vec2::new(60.0, 0.0),
        )
    }

    #[test]
    fn test_bezier_endpoints_exact() {
        let s = sample();
        assert_eq!(s.point_at(0.0), s.p0);
        assert_eq!(s.point_at(1.0), s.p3);
    }

    #[test]
    fn test_bezier_midpoint_symmetric_curve() {
        let p = sample().point_at(0.5);
        assert!((p.x - 30.0).abs() < 1e-4);
        assert!((p.y - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_arc_length_of_straight_line() {
        let line = CubicSegment::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 0.0),
            Vec2::new(30.0, 0.0),
        );
        assert!((arc_length(&line) - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_length_at_least_chord() {
        let s = sample();
        assert!(arc_length(&s) >= s.p0.distance(s.p3));
    }

    #[test]
    fn test_segment_duration_floor() {
        let tiny = CubicSegment::new(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, Vec2::ONE);
        assert_eq!(segment_duration(&tiny, 125.0, 0.06), 0.06);
        let d = segment_duration(&sample(), 10.0, 0.06);
        assert!((d - arc_length(&sample()) / 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_rect_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_degenerate_curve_is_a_point(
                x in -500.0f32..500.0,
                y in -500.0f32..500.0,
                t in 0.0f32..=1.0
            ) {
                let p = Vec2::new(x, y);
                let q = bezier3(p, p, p, p, t);
                prop_assert!((q - p).length() < 1e-3);
            }

            #[test]
            fn test_curve_stays_in_control_hull(
                pts in prop::collection::vec((-300.0f32..300.0, -300.0f32..300.0), 4),
                t in 0.0f32..=1.0
            ) {
                let v: Vec<Vec2> = pts.iter().map(|(x, y)| Vec2::new(*x, *y)).collect();
                let q = bezier3(v[0], v[1], v[2], v[3], t);
                let min_x = v.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
                let max_x = v.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
                prop_assert!(q.x >= min_x - 1e-2 && q.x <= max_x + 1e-2);
            }
        }
    }
}
