use crate::collision::contact::{Feature, Impact};
use crate::geometry::Circle;
use crate::math::utils::quadratic;
use crate::math::Vec2;

use super::toi::{closest_time, is_within_timestep, will_penetrate};

/// Time of impact of a moving circle against a stationary circle.
///
/// Solves `|a + t·v − b|² = (r_a + r_b)²` for the earliest non-negative root.
pub fn circle_vs_circle(moving: &Circle, velocity: Vec2, other: &Circle) -> Option<Impact> {
    let diff = moving.center - other.center;
    let reach = moving.radius + other.radius;

    let a = velocity.length_squared();
    let b = 2.0 * velocity.dot(diff);
    let c = diff.length_squared() - reach * reach;

    let time = closest_time(quadratic(a, b, c))?;
    if !is_within_timestep(time) {
        return None;
    }

    if !will_penetrate(moving.center, other.center, velocity, time) {
        return None;
    }

    Some(Impact {
        time,
        point: None,
        normal: moving.center + velocity * time - other.center,
        feature: Feature::Centers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_head_on() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(25.0, 0.0), 10.0);

        let impact = circle_vs_circle(&a, Vec2::new(10.0, 0.0), &b).unwrap();
        assert_relative_eq!(impact.time, 0.5);
        assert_relative_eq!(impact.normal.x, -20.0);
        assert_eq!(impact.feature, Feature::Centers);
        assert!(impact.point.is_none());
    }

    #[test]
    fn test_out_of_reach() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(50.0, 0.0), 10.0);
        assert!(circle_vs_circle(&a, Vec2::new(10.0, 0.0), &b).is_none());
    }

    #[test]
    fn test_moving_away() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(20.0, 0.0), 10.0);
        assert!(circle_vs_circle(&a, Vec2::new(-10.0, 0.0), &b).is_none());
    }

    #[test]
    fn test_graze_is_ignored() {
        // touching side by side, sliding past each other
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(0.0, 20.0), 10.0);
        assert!(circle_vs_circle(&a, Vec2::new(5.0, 0.0), &b).is_none());
    }

    #[test]
    fn test_stationary_never_hits() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 10.0);
        let b = Circle::new(Vec2::new(20.0, 0.0), 10.0);
        assert!(circle_vs_circle(&a, Vec2::ZERO, &b).is_none());
    }
}
