use crate::collision::Contact;
use crate::dynamics::Body;
use crate::math::utils::round_for_float;
use crate::math::Vec2;

/// What the resolver did with a contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Reflected off a fixed body
    Bounce { velocity: Vec2 },
    /// Momentum exchanged with a movable body
    Exchange { moving: Vec2, other: Vec2 },
    /// Kept only the velocity tangential to the contact
    Slide { velocity: Vec2 },
    /// The pair was already moving apart, so nothing changed
    Separating,
}

/// Coefficient of restitution of a pair: the lower elasticity of the two
#[inline]
pub fn restitution(a: &Body, b: &Body) -> f64 {
    a.elasticity().min(b.elasticity())
}

/// Velocity after bouncing off an immovable surface with the given normal
#[inline]
pub fn bounce_velocity(velocity: Vec2, normal: Vec2, restitution: f64) -> Vec2 {
    (velocity.reflect(normal) * restitution).round_for_float()
}

/// Angle-free 2D elastic collision along `axis`.
///
/// ```text
/// v_a' = v_a - (2 m_b / (m_a + m_b)) * (<v_a - v_b, x> / |x|²) * x
/// v_b' = (m_a v_a + m_b v_b - m_a v_a') / m_b
/// ```
///
/// Both results are scaled by `restitution` and rounded. A zero axis leaves
/// the velocities unchanged.
pub fn elastic_velocities(
    (mass_a, velocity_a): (f64, Vec2),
    (mass_b, velocity_b): (f64, Vec2),
    axis: Vec2,
    restitution: f64,
) -> (Vec2, Vec2) {
    let axis_len_sq = axis.length_squared();
    if axis_len_sq == 0.0 {
        return (velocity_a, velocity_b);
    }

    let mass_scalar = 2.0 * mass_b / (mass_a + mass_b);
    let coefficient = mass_scalar * ((velocity_a - velocity_b).dot(axis) / axis_len_sq);
    let final_a = velocity_a - axis * coefficient;

    // conservation of momentum
    let momentum = velocity_a * mass_a + velocity_b * mass_b;
    let final_b = (momentum - final_a * mass_a) / mass_b;

    (
        (final_a * restitution).round_for_float(),
        (final_b * restitution).round_for_float(),
    )
}

/// Returns true if the relative velocity of the pair does not close the gap
/// along `normal`, which points from the second body toward the first
#[inline]
pub fn is_separating(velocity: Vec2, other_velocity: Vec2, normal: Vec2) -> bool {
    round_for_float((velocity - other_velocity).dot(normal)) >= 0.0
}

/// Velocity component perpendicular to `normal`
#[inline]
pub fn slide_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity.reject_from(normal).round_for_float()
}

/// Resolves a contact between `moving` and the body it hit.
///
/// A fixed partner reflects the moving body. A movable partner exchanges
/// momentum with it along the contact normal, unless it is already pulling
/// away at least as fast as the moving body follows.
pub fn resolve(moving: &mut Body, other: &mut Body, contact: &Contact) -> Resolution {
    let cor = restitution(moving, other);

    if other.is_fixed() {
        let velocity = bounce_velocity(moving.velocity(), contact.normal, cor);
        moving.assign_velocity(velocity);
        return Resolution::Bounce { velocity };
    }

    if is_separating(moving.velocity(), other.velocity(), contact.normal) {
        return Resolution::Separating;
    }

    let (final_moving, final_other) = elastic_velocities(
        (moving.mass(), moving.velocity()),
        (other.mass(), other.velocity()),
        contact.normal,
        cor,
    );
    moving.assign_velocity(final_moving);
    other.assign_velocity(final_other);

    Resolution::Exchange {
        moving: final_moving,
        other: final_other,
    }
}

/// Resolves a zero-time contact against a body already settled this tick by
/// keeping only the tangential velocity, so a pushed body squeezes sideways
/// instead of stopping dead.
pub fn slide(moving: &mut Body, contact: &Contact) -> Resolution {
    let velocity = slide_velocity(moving.velocity(), contact.normal);
    moving.assign_velocity(velocity);
    Resolution::Slide { velocity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{Axis, Feature, Impact};
    use crate::dynamics::BodyDesc;
    use approx::assert_relative_eq;

    fn kinetic_energy(mass: f64, velocity: Vec2) -> f64 {
        0.5 * mass * velocity.length_squared()
    }

    fn contact(moving: &Body, other: &Body, normal: Vec2, feature: Feature) -> Contact {
        Contact::new(
            moving.id(),
            other.id(),
            Impact {
                time: 0.0,
                point: None,
                normal,
                feature,
            },
        )
    }

    #[test]
    fn test_head_on_exchange() {
        let (a, b) = elastic_velocities(
            (1.0, Vec2::new(5.0, 0.0)),
            (1.0, Vec2::new(-5.0, 0.0)),
            Vec2::new(-20.0, 0.0),
            1.0,
        );
        assert_eq!(a, Vec2::new(-5.0, 0.0));
        assert_eq!(b, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_elastic_conserves_energy() {
        let (ma, va) = (2.0, Vec2::new(3.0, 1.0));
        let (mb, vb) = (1.0, Vec2::new(-1.0, 2.0));
        let (fa, fb) = elastic_velocities((ma, va), (mb, vb), Vec2::new(-3.0, -4.0), 1.0);

        let before = kinetic_energy(ma, va) + kinetic_energy(mb, vb);
        let after = kinetic_energy(ma, fa) + kinetic_energy(mb, fb);
        assert_relative_eq!(before, after, epsilon = 0.05);

        let momentum_before = va * ma + vb * mb;
        let momentum_after = fa * ma + fb * mb;
        assert_relative_eq!(momentum_before.x, momentum_after.x, epsilon = 0.01);
        assert_relative_eq!(momentum_before.y, momentum_after.y, epsilon = 0.01);
    }

    #[test]
    fn test_restitution_loses_energy() {
        let (va, vb) = (Vec2::new(4.0, 0.0), Vec2::ZERO);
        let (fa, fb) = elastic_velocities((1.0, va), (1.0, vb), Vec2::new(-1.0, 0.0), 0.5);

        let before = kinetic_energy(1.0, va) + kinetic_energy(1.0, vb);
        let after = kinetic_energy(1.0, fa) + kinetic_energy(1.0, fb);
        assert!(after <= before);
        assert_eq!(fb, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_zero_axis_is_noop() {
        let va = Vec2::new(1.0, 2.0);
        let vb = Vec2::new(3.0, 4.0);
        assert_eq!(elastic_velocities((1.0, va), (1.0, vb), Vec2::ZERO, 1.0), (va, vb));
    }

    #[test]
    fn test_bounce_off_fixed_body() {
        let mut ball = BodyDesc::circle(5.0)
            .with_velocity(Vec2::new(10.0, 5.0))
            .with_elasticity(0.5)
            .build()
            .unwrap();
        let mut wall = BodyDesc::rect(10.0, 100.0)
            .with_elasticity(1.0)
            .fixed()
            .build()
            .unwrap();

        let c = contact(&ball, &wall, Vec2::new(-1.0, 0.0), Feature::Side(Axis::X));
        let resolution = resolve(&mut ball, &mut wall, &c);

        assert_eq!(resolution, Resolution::Bounce { velocity: Vec2::new(-5.0, 2.5) });
        assert_eq!(ball.velocity(), Vec2::new(-5.0, 2.5));
        assert_eq!(wall.velocity(), Vec2::ZERO);
        // moving away from the contact afterwards
        assert!(ball.velocity().dot(c.normal) > 0.0);
    }

    #[test]
    fn test_exchange_with_movable_body() {
        let mut a = BodyDesc::circle(10.0)
            .with_velocity(Vec2::new(5.0, 0.0))
            .with_elasticity(1.0)
            .build()
            .unwrap();
        let mut b = BodyDesc::circle(10.0)
            .with_elasticity(1.0)
            .build()
            .unwrap();

        let c = contact(&a, &b, Vec2::new(-20.0, 0.0), Feature::Centers);
        resolve(&mut a, &mut b, &c);

        assert_eq!(a.velocity(), Vec2::ZERO);
        assert_eq!(b.velocity(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_no_exchange_with_faster_leading_body() {
        let mut trailing = BodyDesc::circle(10.0)
            .with_position(Vec2::new(105.0, 100.0))
            .with_velocity(Vec2::new(5.0, 0.0))
            .with_elasticity(1.0)
            .build()
            .unwrap();
        let mut leading = BodyDesc::circle(10.0)
            .with_position(Vec2::new(125.0, 100.0))
            .with_velocity(Vec2::new(20.0, 0.0))
            .with_elasticity(1.0)
            .build()
            .unwrap();

        let c = contact(&trailing, &leading, Vec2::new(-20.0, 0.0), Feature::Centers);
        assert_eq!(resolve(&mut trailing, &mut leading, &c), Resolution::Separating);
        assert_eq!(trailing.velocity(), Vec2::new(5.0, 0.0));
        assert_eq!(leading.velocity(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_exchange_with_slower_leading_body() {
        let mut trailing = BodyDesc::circle(10.0)
            .with_velocity(Vec2::new(20.0, 0.0))
            .with_elasticity(1.0)
            .build()
            .unwrap();
        let mut leading = BodyDesc::circle(10.0)
            .with_velocity(Vec2::new(5.0, 0.0))
            .with_elasticity(1.0)
            .build()
            .unwrap();

        let c = contact(&trailing, &leading, Vec2::new(-20.0, 0.0), Feature::Centers);
        resolve(&mut trailing, &mut leading, &c);
        assert_eq!(trailing.velocity(), Vec2::new(5.0, 0.0));
        assert_eq!(leading.velocity(), Vec2::new(20.0, 0.0));
        assert!(is_separating(trailing.velocity(), leading.velocity(), c.normal));
    }

    #[test]
    fn test_slide_keeps_tangent() {
        let mut a = BodyDesc::rect(10.0, 10.0)
            .with_velocity(Vec2::new(3.0, -4.0))
            .build()
            .unwrap();
        let b = BodyDesc::rect(10.0, 10.0).build().unwrap();

        let c = contact(&a, &b, Vec2::new(-1.0, 0.0), Feature::Side(Axis::X));
        assert_eq!(slide(&mut a, &c), Resolution::Slide { velocity: Vec2::new(0.0, -4.0) });
        assert_eq!(a.velocity(), Vec2::new(0.0, -4.0));
    }
}
