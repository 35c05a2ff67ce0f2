use crate::collision::contact::{Axis, Feature, Impact};
use crate::geometry::{Circle, Rect};
use crate::math::Vec2;

use super::toi::{axis_aligned, circle_vs_point, should_consider, will_penetrate};

/// Time of impact of a moving rect against a stationary circle.
///
/// Mirrors [`circle_vs_rect`](super::circle_vs_rect): the rect's sides are
/// tested against the circle's axis-aligned extremes, then the rect's corners
/// against the whole circle.
pub fn rect_vs_circle(rect: &Rect, velocity: Vec2, circle: &Circle) -> Option<Impact> {
    side_impact(rect, velocity, circle).or_else(|| corner_impact(rect, velocity, circle))
}

fn side_impact(rect: &Rect, velocity: Vec2, circle: &Circle) -> Option<Impact> {
    // (axis, rect side, circle extreme it runs into, normal from circle toward rect)
    let sides = [
        (Axis::X, rect.x1(), circle.x0(), Vec2::new(-1.0, 0.0)),
        (Axis::X, rect.x0(), circle.x1(), Vec2::new(1.0, 0.0)),
        (Axis::Y, rect.y1(), circle.y0(), Vec2::new(0.0, -1.0)),
        (Axis::Y, rect.y0(), circle.y1(), Vec2::new(0.0, 1.0)),
    ];

    let mut best: Option<Impact> = None;

    for (axis, side, extreme, normal) in sides {
        let time = axis_aligned(side, extreme, axis.of(velocity));
        let Some(time) = should_consider(time, best.map(|b| b.time)) else {
            continue;
        };

        // the rect's span across the axis at the time of impact must cover
        // the circle's center line
        let across = axis.other();
        let shift = across.of(velocity) * time;
        let (lo, hi) = match across {
            Axis::X => (rect.x0() + shift, rect.x1() + shift),
            Axis::Y => (rect.y0() + shift, rect.y1() + shift),
        };
        let center_across = across.of(circle.center);
        if !(lo <= center_across && center_across <= hi) {
            continue;
        }

        let point = axis.compose(extreme, center_across);
        if will_penetrate(point, circle.center, velocity, 0.0) {
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

fn corner_impact(rect: &Rect, velocity: Vec2, circle: &Circle) -> Option<Impact> {
    let mut best: Option<Impact> = None;

    for corner in rect.corners() {
        let time = circle_vs_point(corner - circle.center, circle.radius, velocity);
        let Some(time) = should_consider(time, best.map(|b| b.time)) else {
            continue;
        };

        if will_penetrate(corner, circle.center, velocity, time) {
            let point = corner + velocity * time;
            best = Some(Impact {
                time,
                point: Some(point),
                normal: point - circle.center,
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

    #[test]
    fn test_side_hit() {
        let rect = Rect::from_corner(0.0, 40.0, 20.0, 20.0);
        let circle = Circle::new(Vec2::new(35.0, 50.0), 10.0);

        let impact = rect_vs_circle(&rect, Vec2::new(10.0, 0.0), &circle).unwrap();
        assert_relative_eq!(impact.time, 0.5);
        assert_eq!(impact.feature, Feature::Side(Axis::X));
        assert_eq!(impact.point, Some(Vec2::new(25.0, 50.0)));
        assert_eq!(impact.normal, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_falling_onto_circle() {
        let rect = Rect::from_corner(40.0, 0.0, 20.0, 20.0);
        let circle = Circle::new(Vec2::new(50.0, 35.0), 10.0);

        let impact = rect_vs_circle(&rect, Vec2::new(0.0, 10.0), &circle).unwrap();
        assert_relative_eq!(impact.time, 0.5);
        assert_eq!(impact.feature, Feature::Side(Axis::Y));
        assert_eq!(impact.normal, Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_corner_hit() {
        // the rect's bottom-right corner leads into the circle
        let rect = Rect::from_corner(0.0, 0.0, 10.0, 10.0);
        let circle = Circle::new(Vec2::new(20.0, 20.0), 5.0);

        let impact = rect_vs_circle(&rect, Vec2::new(10.0, 10.0), &circle).unwrap();
        assert_eq!(impact.feature, Feature::Corner);
        assert!(impact.time > 0.0 && impact.time < 1.0);

        let point = impact.point.unwrap();
        assert_relative_eq!(point.distance(circle.center), 5.0, epsilon = 1e-9);
        assert!(impact.normal.x < 0.0 && impact.normal.y < 0.0);
    }

    #[test]
    fn test_miss_beside() {
        let rect = Rect::from_corner(0.0, 0.0, 20.0, 20.0);
        let circle = Circle::new(Vec2::new(50.0, 60.0), 10.0);
        assert!(rect_vs_circle(&rect, Vec2::new(10.0, 0.0), &circle).is_none());
    }
}
