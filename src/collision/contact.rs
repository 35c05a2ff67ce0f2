use std::fmt;

use crate::dynamics::BodyId;
use crate::math::Vec2;

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The perpendicular axis
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: Vec2) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Builds a vector from a value on this axis and a value on the other one
    #[inline]
    pub fn compose(self, along: f64, across: f64) -> Vec2 {
        match self {
            Axis::X => Vec2::new(along, across),
            Axis::Y => Vec2::new(across, along),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// The part of the collision body that was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Circle against circle, separated along the center axis
    Centers,
    /// A flat side perpendicular to the given axis
    Side(Axis),
    /// A rect corner
    Corner,
}

/// The result of a narrow-phase query, before it is tied to a pair of bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Fraction of the step at which the shapes first touch, in `[0, 1]`
    pub time: f64,
    /// Where the shapes touch, absent for circle against circle
    pub point: Option<Vec2>,
    /// Separation axis pointing from the collision body toward the moving body
    pub normal: Vec2,
    pub feature: Feature,
}

/// A contact between a moving body and the body it runs into.
///
/// Contacts only live for one tick: the world produces them, the resolver
/// consumes them, and collision listeners receive them by reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The body whose motion produced the contact
    pub moving: BodyId,
    /// The body that was hit
    pub other: BodyId,
    /// Fraction of the step at which the contact occurs, in `[0, 1]`
    pub time: f64,
    /// Point of contact, absent for circle against circle
    pub point: Option<Vec2>,
    /// Separation axis pointing from `other` toward `moving`
    pub normal: Vec2,
    pub feature: Feature,
}

impl Contact {
    /// Ties a narrow-phase impact to the two bodies involved
    #[inline]
    pub fn new(moving: BodyId, other: BodyId, impact: Impact) -> Self {
        Self {
            moving,
            other,
            time: impact.time,
            point: impact.point,
            normal: impact.normal,
            feature: impact.feature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_helpers() {
        let v = Vec2::new(3.0, 4.0);
        assert_eq!(Axis::X.of(v), 3.0);
        assert_eq!(Axis::Y.of(v), 4.0);
        assert_eq!(Axis::X.other(), Axis::Y);
        assert_eq!(Axis::Y.compose(1.0, 2.0), Vec2::new(2.0, 1.0));
    }

    #[test]
    fn test_contact_from_impact() {
        let impact = Impact {
            time: 0.5,
            point: Some(Vec2::new(1.0, 2.0)),
            normal: Vec2::new(-1.0, 0.0),
            feature: Feature::Side(Axis::X),
        };
        let contact = Contact::new(BodyId::from_raw(1), BodyId::from_raw(2), impact);
        assert_eq!(contact.moving, BodyId::from_raw(1));
        assert_eq!(contact.time, 0.5);
        assert_eq!(contact.other, BodyId::from_raw(2));
        assert_eq!(contact.normal, Vec2::new(-1.0, 0.0));
    }
}
