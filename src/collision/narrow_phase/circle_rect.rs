use crate::collision::contact::{Axis, Feature, Impact};
use crate::geometry::{Circle, Rect};
use crate::math::Vec2;

use super::toi::{axis_aligned, circle_vs_point, should_consider, will_penetrate};

/// Time of impact of a moving circle against a stationary rect.
///
/// Sides are tested first. Corners are only considered when no side is hit,
/// since reaching a side means the path never gets to a corner first.
pub fn circle_vs_rect(circle: &Circle, velocity: Vec2, rect: &Rect) -> Option<Impact> {
    side_impact(circle, velocity, rect).or_else(|| corner_impact(circle, velocity, rect))
}

fn side_impact(circle: &Circle, velocity: Vec2, rect: &Rect) -> Option<Impact> {
    // (axis, circle boundary, rect side it runs into, outward normal of that side)
    let sides = [
        (Axis::X, circle.x1(), rect.x0(), Vec2::new(-1.0, 0.0)),
        (Axis::X, circle.x0(), rect.x1(), Vec2::new(1.0, 0.0)),
        (Axis::Y, circle.y1(), rect.y0(), Vec2::new(0.0, -1.0)),
        (Axis::Y, circle.y0(), rect.y1(), Vec2::new(0.0, 1.0)),
    ];

    let mut best: Option<Impact> = None;

    for (axis, boundary, side, normal) in sides {
        let time = axis_aligned(boundary, side, axis.of(velocity));
        let Some(time) = should_consider(time, best.map(|b| b.time)) else {
            continue;
        };

        let across = axis.other();
        let center_across = across.of(circle.center) + across.of(velocity) * time;
        let (lo, hi) = match across {
            Axis::X => (rect.x0(), rect.x1()),
            Axis::Y => (rect.y0(), rect.y1()),
        };
        if !(lo <= center_across && center_across <= hi) {
            continue;
        }

        let point = axis.compose(side, center_across);
        if will_penetrate(circle.center, point, velocity, time) {
            best = Some(Impact {
                time,
                point: Some(point),
                normal,
                feature: Feature::Side(axis),
            });
        }
    }

    best
}

fn corner_impact(circle: &Circle, velocity: Vec2, rect: &Rect) -> Option<Impact> {
    let mut best: Option<Impact> = None;

    for corner in rect.corners() {
        let time = circle_vs_point(circle.center - corner, circle.radius, velocity);
        let Some(time) = should_consider(time, best.map(|b| b.time)) else {
            continue;
        };

        if will_penetrate(circle.center, corner, velocity, time) {
            best = Some(Impact {
                time,
                point: Some(corner),
                normal: circle.center + velocity * time - corner,
                feature: Feature::Corner,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn block() -> Rect {
        Rect::from_corner(100.0, 0.0, 24.0, 100.0)
    }

    #[test]
    fn test_side_hit() {
        let circle = Circle::new(Vec2::new(80.0, 50.0), 12.0);
        let impact = circle_vs_rect(&circle, Vec2::new(10.0, 0.0), &block()).unwrap();

        assert_relative_eq!(impact.time, 0.8);
        assert_eq!(impact.feature, Feature::Side(Axis::X));
        assert_eq!(impact.normal, Vec2::new(-1.0, 0.0));
        assert_eq!(impact.point, Some(Vec2::new(100.0, 50.0)));
    }

    #[test]
    fn test_too_far_for_one_step() {
        let circle = Circle::new(Vec2::new(0.0, 50.0), 12.0);
        assert!(circle_vs_rect(&circle, Vec2::new(10.0, 0.0), &block()).is_none());
    }

    #[test]
    fn test_corner_hit() {
        // heading diagonally at the top-left corner, center misses both side spans
        let circle = Circle::new(Vec2::new(90.0, -10.0), 5.0);
        let impact = circle_vs_rect(&circle, Vec2::new(10.0, 10.0), &block()).unwrap();

        assert_eq!(impact.feature, Feature::Corner);
        assert_eq!(impact.point, Some(Vec2::new(100.0, 0.0)));
        assert!(impact.time > 0.0 && impact.time < 1.0);
        // normal points from the corner toward the circle
        assert!(impact.normal.x < 0.0 && impact.normal.y < 0.0);
    }

    #[test]
    fn test_side_beats_corner() {
        // center path runs exactly along the top edge line: the side is
        // reached before any corner is considered
        let circle = Circle::new(Vec2::new(80.0, 0.0), 12.0);
        let impact = circle_vs_rect(&circle, Vec2::new(10.0, 0.0), &block()).unwrap();
        assert_eq!(impact.feature, Feature::Side(Axis::X));
        assert_relative_eq!(impact.time, 0.8);
    }

    #[test]
    fn test_graze_along_side() {
        // circle touching the left side, moving straight down
        let circle = Circle::new(Vec2::new(88.0, 50.0), 12.0);
        assert!(circle_vs_rect(&circle, Vec2::new(0.0, 10.0), &block()).is_none());
    }

    #[test]
    fn test_moving_away() {
        let circle = Circle::new(Vec2::new(80.0, 50.0), 12.0);
        assert!(circle_vs_rect(&circle, Vec2::new(-10.0, 0.0), &block()).is_none());
    }
}
