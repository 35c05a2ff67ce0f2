//! Helpers shared by the time-of-impact solvers.

use crate::math::utils::{quadratic, round_for_float};
use crate::math::Vec2;

/// Picks the earliest root that is not in the past.
///
/// Roots are rounded before the negativity test so that a contact at
/// `t = -1e-12` still counts as happening now. The raw root is returned.
pub fn closest_time(roots: Option<(f64, f64)>) -> Option<f64> {
    let (r0, r1) = roots?;
    [r0, r1]
        .into_iter()
        .filter(|root| round_for_float(*root) >= 0.0)
        .fold(None, |acc, root| match acc {
            Some(best) if best <= root => Some(best),
            _ => Some(root),
        })
}

/// Time at which a circle of `radius` moving by `velocity` first touches a
/// point, where `diff` is the circle center minus the point.
pub fn circle_vs_point(diff: Vec2, radius: f64, velocity: Vec2) -> Option<f64> {
    // a stalled axis never closes the gap on that axis
    if velocity.x == 0.0 && diff.x.abs() >= radius {
        return None;
    }
    if velocity.y == 0.0 && diff.y.abs() >= radius {
        return None;
    }

    let a = velocity.length_squared();
    let b = 2.0 * diff.dot(velocity);
    let c = diff.length_squared() - radius * radius;

    closest_time(quadratic(a, b, c))
}

/// Time at which `moving` reaches `target` when changing by `change` per step
#[inline]
pub fn axis_aligned(moving: f64, target: f64, change: f64) -> Option<f64> {
    if change == 0.0 {
        return None;
    }
    Some((target - moving) / change)
}

/// Returns true if `time` falls within the current step
#[inline]
pub fn is_within_timestep(time: f64) -> bool {
    round_for_float(time) >= 0.0 && time <= 1.0
}

/// Returns the time if it lies within the step and is strictly earlier than
/// the best found so far
#[inline]
pub fn should_consider(time: Option<f64>, best: Option<f64>) -> Option<f64> {
    let time = time?;
    if !is_within_timestep(time) {
        return None;
    }
    match best {
        Some(best) if best <= time => None,
        _ => Some(time),
    }
}

/// Returns true if a point moving by `velocity` is heading toward `target`
#[inline]
pub fn is_point_moving_towards_point(point: Vec2, velocity: Vec2, target: Vec2) -> bool {
    round_for_float(velocity.dot(target - point)) > 0.0
}

/// Returns true if `point`, advanced to `time`, is still heading into
/// `target`. A tangential touch fails this test and is treated as a graze.
#[inline]
pub fn will_penetrate(point: Vec2, target: Vec2, velocity: Vec2, time: f64) -> bool {
    is_point_moving_towards_point(point + velocity * time, velocity, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closest_time() {
        assert_eq!(closest_time(Some((3.0, 1.0))), Some(1.0));
        assert_eq!(closest_time(Some((0.5, -2.0))), Some(0.5));
        assert_eq!(closest_time(Some((-1.0, -2.0))), None);
        assert_eq!(closest_time(None), None);
    }

    #[test]
    fn test_closest_time_keeps_tiny_negative_roots() {
        let t = closest_time(Some((-1e-12, 4.0))).unwrap();
        assert_eq!(t, -1e-12);
        assert!(is_within_timestep(t));
    }

    #[test]
    fn test_circle_vs_point() {
        // circle at x=0 moving right by 10 toward a point 15 away
        let t = circle_vs_point(Vec2::new(-15.0, 0.0), 5.0, Vec2::new(10.0, 0.0)).unwrap();
        assert!((t - 1.0).abs() < 1e-9);

        // stalled on y and too far off axis
        assert!(circle_vs_point(Vec2::new(-15.0, 5.0), 5.0, Vec2::new(10.0, 0.0)).is_none());
    }

    #[test]
    fn test_axis_aligned() {
        assert_eq!(axis_aligned(10.0, 15.0, 10.0), Some(0.5));
        assert_eq!(axis_aligned(10.0, 15.0, 0.0), None);
    }

    #[test]
    fn test_timestep_bounds() {
        assert!(is_within_timestep(0.0));
        assert!(is_within_timestep(1.0));
        assert!(is_within_timestep(-0.0004));
        assert!(!is_within_timestep(-0.001));
        assert!(!is_within_timestep(1.0001));
    }

    #[test]
    fn test_should_consider_is_strict() {
        assert_eq!(should_consider(Some(0.5), None), Some(0.5));
        assert_eq!(should_consider(Some(0.5), Some(0.6)), Some(0.5));
        assert_eq!(should_consider(Some(0.5), Some(0.5)), None);
        assert_eq!(should_consider(Some(1.5), None), None);
        assert_eq!(should_consider(None, None), None);
    }

    #[test]
    fn test_moving_towards() {
        let p = Vec2::ZERO;
        assert!(is_point_moving_towards_point(p, Vec2::X, Vec2::new(5.0, 1.0)));
        assert!(!is_point_moving_towards_point(p, Vec2::X, Vec2::new(0.0, 5.0)));
        assert!(!is_point_moving_towards_point(p, Vec2::X, Vec2::new(-5.0, 0.0)));

        // passes the target before the given time
        assert!(!will_penetrate(p, Vec2::new(5.0, 0.0), Vec2::new(10.0, 0.0), 1.0));
    }
}
