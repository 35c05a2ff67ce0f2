mod resolver;

pub use resolver::{
    bounce_velocity, elastic_velocities, is_separating, resolve, restitution, slide,
    slide_velocity, Resolution,
};
