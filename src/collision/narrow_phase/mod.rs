//! Continuous narrow phase: exact time of impact per shape pair.
//!
//! Every solver treats the collision body as stationary for the step and
//! returns the earliest fraction `t ∈ [0, 1]` of the moving body's velocity
//! at which the two shapes touch and are heading into each other.

mod circle_circle;
mod circle_rect;
mod rect_circle;
mod rect_rect;
pub mod toi;

pub use circle_circle::circle_vs_circle;
pub use circle_rect::circle_vs_rect;
pub use rect_circle::rect_vs_circle;
pub use rect_rect::rect_vs_rect;

use crate::collision::contact::{Contact, Impact};
use crate::dynamics::Body;
use crate::geometry::Shape;
use crate::math::Vec2;

/// Time of impact of `moving` travelling by `velocity` against `other`.
///
/// A zero velocity never produces an impact. Roots that only round to zero
/// are reported as `0`, so the returned time always lies in `[0, 1]`.
pub fn time_of_impact(moving: &Shape, velocity: Vec2, other: &Shape) -> Option<Impact> {
    if velocity.is_zero() {
        return None;
    }

    let impact = match (moving, other) {
        (Shape::Circle(a), Shape::Circle(b)) => circle_vs_circle(a, velocity, b),
        (Shape::Circle(c), Shape::Rect(r)) => circle_vs_rect(c, velocity, r),
        (Shape::Rect(r), Shape::Circle(c)) => rect_vs_circle(r, velocity, c),
        (Shape::Rect(a), Shape::Rect(b)) => rect_vs_rect(a, velocity, b),
    }?;

    Some(Impact {
        time: impact.time.clamp(0.0, 1.0),
        ..impact
    })
}

/// The earliest contact of `moving` against any of `candidates` this step.
///
/// The body itself and bodies it already overlaps are skipped. On an exact
/// tie in time the candidate seen first wins.
pub fn closest_contact<'a, I>(moving: &Body, candidates: I) -> Option<Contact>
where
    I: IntoIterator<Item = &'a Body>,
{
    if !moving.is_moving() {
        return None;
    }

    let mut best: Option<Contact> = None;

    for candidate in candidates {
        if candidate.id() == moving.id() {
            continue;
        }
        if moving.shape().intersects(candidate.shape()) {
            continue;
        }

        let Some(impact) = time_of_impact(moving.shape(), moving.velocity(), candidate.shape())
        else {
            continue;
        };

        if best.map_or(true, |b| b.time > impact.time) {
            best = Some(Contact::new(moving.id(), candidate.id(), impact));
        }
    }

    best
}
