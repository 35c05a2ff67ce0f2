mod body;

pub use body::{
    Body, BodyDesc, BodyId, CollisionListener, DEFAULT_ELASTICITY, FRICTION_FACTOR,
    MIN_VELOCITY_MAGNITUDE,
};
