use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::collision::Contact;
use crate::error::{PhysicsError, Result};
use crate::geometry::{Aabb, Circle, Rect, Shape};
use crate::math::Vec2;

/// Friction keeps this share of a free body's speed each tick
pub const FRICTION_FACTOR: f64 = 0.8;

/// Speed below which friction brings a body to a stop
pub const MIN_VELOCITY_MAGNITUDE: f64 = 0.1;

/// Elasticity of a body built without an explicit one
pub const DEFAULT_ELASTICITY: f64 = 0.5;

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide unique identity of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    /// Allocates a fresh id
    fn next() -> Self {
        Self(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Wraps a raw id value
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Callback fired when a body takes part in a contact
pub type CollisionListener = Box<dyn FnMut(&Contact)>;

/// A rigid 2D body: one shape plus its motion state.
///
/// Position lives in the shape. A fixed body never has a nonzero velocity.
pub struct Body {
    id: BodyId,
    shape: Shape,
    mass: f64,
    velocity: Vec2,
    fixed: bool,
    elasticity: f64,
    name: Option<String>,
    listeners: Vec<CollisionListener>,
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("mass", &self.mass)
            .field("velocity", &self.velocity)
            .field("fixed", &self.fixed)
            .field("elasticity", &self.elasticity)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Body {
    /// Creates a movable body with default mass and elasticity
    pub fn new(shape: Shape) -> Self {
        Self {
            id: BodyId::next(),
            shape,
            mass: 1.0,
            velocity: Vec2::ZERO,
            fixed: false,
            elasticity: DEFAULT_ELASTICITY,
            name: None,
            listeners: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> BodyId {
        self.id
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Center of the body's shape
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.shape.center()
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    #[inline]
    pub fn is_fixed(&self) -> bool {
        self.fixed
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns true if the body has a nonzero velocity
    #[inline]
    pub fn is_moving(&self) -> bool {
        !self.velocity.is_zero()
    }

    /// Adds `force / mass` to the velocity. Does nothing on a fixed body.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.fixed {
            return;
        }
        self.velocity += force / self.mass;
    }

    /// Replaces the velocity.
    ///
    /// Fails with [`PhysicsError::FixedBodyVelocity`] on a fixed body.
    pub fn set_velocity(&mut self, velocity: Vec2) -> Result<()> {
        if self.fixed {
            return Err(PhysicsError::FixedBodyVelocity(self.id));
        }
        self.velocity = velocity;
        Ok(())
    }

    /// Marks the body fixed or movable. Fixing a body stops it.
    pub fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
        if fixed {
            self.velocity = Vec2::ZERO;
        }
    }

    /// Sets the coefficient of restitution, which must lie in `[0, 1]`
    pub fn set_elasticity(&mut self, elasticity: f64) -> Result<()> {
        validate_elasticity(elasticity)?;
        self.elasticity = elasticity;
        Ok(())
    }

    /// Sets the mass, which must be strictly positive
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        validate_mass(mass)?;
        self.mass = mass;
        Ok(())
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Teleports the body so its shape is centered at `position`
    #[inline]
    pub fn move_to(&mut self, position: Vec2) {
        self.shape.move_to(position);
    }

    /// Moves the body along its velocity for `time` of a step
    #[inline]
    pub fn advance(&mut self, time: f64) {
        if !self.is_moving() {
            return;
        }
        self.shape.translate(self.velocity * time);
    }

    /// Damps the speed by [`FRICTION_FACTOR`], stopping the body once it falls
    /// below [`MIN_VELOCITY_MAGNITUDE`]
    pub fn apply_friction(&mut self) {
        let magnitude = self.velocity.length() * FRICTION_FACTOR;
        if magnitude < MIN_VELOCITY_MAGNITUDE {
            self.velocity = Vec2::ZERO;
            return;
        }
        if let Some(velocity) = self.velocity.rescale(magnitude) {
            self.velocity = velocity;
        }
    }

    /// Bounds of the shape
    #[inline]
    pub fn aabb(&self) -> Aabb {
        self.shape.aabb()
    }

    /// Bounds of the area covered by the shape over one full step.
    ///
    /// `None` for a body that is not moving.
    pub fn swept_aabb(&self) -> Option<Aabb> {
        if !self.is_moving() {
            return None;
        }
        Some(self.shape.aabb().swept(self.velocity))
    }

    /// Registers a callback fired for every contact this body takes part in
    pub fn on_collision(&mut self, listener: impl FnMut(&Contact) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn clear_collision_listeners(&mut self) {
        self.listeners.clear();
    }

    pub(crate) fn notify(&mut self, contact: &Contact) {
        for listener in &mut self.listeners {
            listener(contact);
        }
    }

    /// Velocity write used by the resolver, which never targets fixed bodies
    pub(crate) fn assign_velocity(&mut self, velocity: Vec2) {
        debug_assert!(!self.fixed, "resolver wrote velocity of fixed body {}", self.id);
        if !self.fixed {
            self.velocity = velocity;
        }
    }
}

fn validate_elasticity(elasticity: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&elasticity) {
        return Err(PhysicsError::InvalidElasticity(elasticity));
    }
    Ok(())
}

fn validate_mass(mass: f64) -> Result<()> {
    if !(mass > 0.0 && mass.is_finite()) {
        return Err(PhysicsError::InvalidMass(mass));
    }
    Ok(())
}

fn validate_dimension(what: &'static str, value: f64) -> Result<()> {
    if !(value >= 0.0 && value.is_finite()) {
        return Err(PhysicsError::InvalidDimension { what, value });
    }
    Ok(())
}

/// Description used to build a [`Body`]
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub shape: Shape,
    pub velocity: Vec2,
    pub mass: f64,
    pub elasticity: f64,
    pub fixed: bool,
    pub name: Option<String>,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            shape: Shape::Circle(Circle::default()),
            velocity: Vec2::ZERO,
            mass: 1.0,
            elasticity: DEFAULT_ELASTICITY,
            fixed: false,
            name: None,
        }
    }
}

impl BodyDesc {
    /// A circle of the given radius, centered so its bounds start at the origin
    pub fn circle(radius: f64) -> Self {
        Self {
            shape: Shape::circle(Vec2::splat(radius), radius),
            ..Self::default()
        }
    }

    /// A rect of the given size, centered so its bounds start at the origin
    pub fn rect(width: f64, height: f64) -> Self {
        Self {
            shape: Shape::Rect(Rect::from_corner(0.0, 0.0, width, height)),
            ..Self::default()
        }
    }

    /// Uses an existing shape as is
    pub fn from_shape(shape: Shape) -> Self {
        Self {
            shape,
            ..Self::default()
        }
    }

    /// Sets the center position
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.shape.move_to(position);
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Makes the body immovable
    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Validates the description and creates the body with a fresh id
    pub fn build(self) -> Result<Body> {
        match &self.shape {
            Shape::Circle(c) => validate_dimension("radius", c.radius)?,
            Shape::Rect(r) => {
                validate_dimension("width", r.width)?;
                validate_dimension("height", r.height)?;
            }
        }
        validate_mass(self.mass)?;
        validate_elasticity(self.elasticity)?;

        let mut body = Body::new(self.shape);
        body.mass = self.mass;
        body.elasticity = self.elasticity;
        body.name = self.name;
        body.velocity = self.velocity;
        body.set_fixed(self.fixed);
        Ok(body)
    }
}
