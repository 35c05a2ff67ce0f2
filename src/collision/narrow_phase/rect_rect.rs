use crate::collision::contact::{Axis, Feature, Impact};
use crate::geometry::Rect;
use crate::math::utils::{exact_overlap, has_overlap};
use crate::math::Vec2;

use super::toi::{axis_aligned, is_point_moving_towards_point, should_consider};

fn span(rect: &Rect, axis: Axis) -> (f64, f64) {
    match axis {
        Axis::X => (rect.x0(), rect.x1()),
        Axis::Y => (rect.y0(), rect.y1()),
    }
}

/// Time of impact of a moving rect against a stationary rect.
///
/// Each of the four side pairings crosses at a single linear time. The spans
/// across the axis must then overlap. When they overlap in exactly one point
/// the rects meet corner to corner, which only counts if the moving rect is
/// also closing in across the axis. A rect sliding flush past a corner is a
/// graze.
pub fn rect_vs_rect(moving: &Rect, velocity: Vec2, other: &Rect) -> Option<Impact> {
    // (axis, moving side, side it runs into, normal from other toward moving)
    let sides = [
        (Axis::X, moving.x1(), other.x0(), Vec2::new(-1.0, 0.0)),
        (Axis::X, moving.x0(), other.x1(), Vec2::new(1.0, 0.0)),
        (Axis::Y, moving.y1(), other.y0(), Vec2::new(0.0, -1.0)),
        (Axis::Y, moving.y0(), other.y1(), Vec2::new(0.0, 1.0)),
    ];

    let mut best: Option<Impact> = None;

    for (axis, side, target, normal) in sides {
        let across = axis.other();

        // only sides the rect is heading toward
        let facing = axis.compose(target, across.of(moving.center));
        if !is_point_moving_towards_point(moving.center, velocity, facing) {
            continue;
        }

        let time = axis_aligned(side, target, axis.of(velocity));
        let Some(time) = should_consider(time, best.map(|b| b.time)) else {
            continue;
        };

        let shift = across.of(velocity) * time;
        let (lo, hi) = span(moving, across);
        let (lo, hi) = (lo + shift, hi + shift);
        let (other_lo, other_hi) = span(other, across);

        if !has_overlap(lo, hi, other_lo, other_hi) {
            continue;
        }

        let impact = match exact_overlap(lo, hi, other_lo, other_hi) {
            Some(shared) => {
                let point = axis.compose(target, shared);
                let closing = across.compose(across.of(velocity), 0.0);
                if !is_point_moving_towards_point(point, closing, other.center) {
                    continue;
                }
                Impact {
                    time,
                    point: Some(point),
                    normal,
                    feature: Feature::Corner,
                }
            }
            None => Impact {
                time,
                point: Some(axis.compose(target, across.of(moving.center) + shift)),
                normal,
                feature: Feature::Side(axis),
            },
        };

        best = Some(impact);
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_side_hit() {
        let moving = Rect::from_corner(0.0, 0.0, 10.0, 10.0);
        let wall = Rect::from_corner(15.0, -20.0, 10.0, 50.0);

        let impact = rect_vs_rect(&moving, Vec2::new(10.0, 0.0), &wall).unwrap();
        assert_relative_eq!(impact.time, 0.5);
        assert_eq!(impact.feature, Feature::Side(Axis::X));
        assert_eq!(impact.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(impact.point, Some(Vec2::new(15.0, 5.0)));
    }

    #[test]
    fn test_diagonal_hit_on_top() {
        let moving = Rect::from_corner(0.0, 0.0, 10.0, 10.0);
        let floor = Rect::from_corner(-50.0, 14.0, 100.0, 10.0);

        let impact = rect_vs_rect(&moving, Vec2::new(5.0, 8.0), &floor).unwrap();
        assert_relative_eq!(impact.time, 0.5);
        assert_eq!(impact.feature, Feature::Side(Axis::Y));
        assert_eq!(impact.normal, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_flush_slide_past_corner_is_graze() {
        // top edge of the moving rect runs along the bottom edge line of the other
        let moving = Rect::from_corner(0.0, 10.0, 10.0, 10.0);
        let other = Rect::from_corner(15.0, 0.0, 10.0, 10.0);
        assert!(rect_vs_rect(&moving, Vec2::new(10.0, 0.0), &other).is_none());
    }

    #[test]
    fn test_corner_to_corner_hit() {
        let moving = Rect::from_corner(0.0, 0.0, 10.0, 10.0);
        let other = Rect::from_corner(15.0, 15.0, 10.0, 10.0);

        let impact = rect_vs_rect(&moving, Vec2::new(10.0, 10.0), &other).unwrap();
        assert_relative_eq!(impact.time, 0.5);
        assert_eq!(impact.feature, Feature::Corner);
        assert_eq!(impact.point, Some(Vec2::new(15.0, 15.0)));
    }

    #[test]
    fn test_miss_above() {
        let moving = Rect::from_corner(0.0, 0.0, 10.0, 10.0);
        let other = Rect::from_corner(15.0, 20.0, 10.0, 10.0);
        assert!(rect_vs_rect(&moving, Vec2::new(10.0, 0.0), &other).is_none());
    }

    #[test]
    fn test_moving_away() {
        let moving = Rect::from_corner(0.0, 0.0, 10.0, 10.0);
        let other = Rect::from_corner(10.0, 0.0, 10.0, 10.0);
        assert!(rect_vs_rect(&moving, Vec2::new(-10.0, 0.0), &other).is_none());

        let impact = rect_vs_rect(&moving, Vec2::new(10.0, 0.0), &other).unwrap();
        assert_eq!(impact.time, 0.0);
    }
}
