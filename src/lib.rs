//! # RustPhy2D
//!
//! A 2D physics engine for circles and axis-aligned rectangles with exact
//! continuous collision detection.
//!
//! ## Features
//!
//! - **Time of Impact**: Closed-form solvers for every circle/rect pairing, so
//!   fast bodies never tunnel through thin ones
//! - **Collision Response**: Elastic momentum exchange, reflection off fixed
//!   bodies and sliding for bodies pressed between others
//! - **Broad Phase**: Adaptive quad-tree that partitions and collapses as
//!   bodies move
//! - **Bounded World**: Fixed walls around the simulated area, per-tick
//!   friction and collision listeners
//!
//! ## Quick Start
//!
//! ```rust
//! use rustphy2d::prelude::*;
//!
//! let mut world = World::new(800.0, 600.0, WorldOptions::default()).unwrap();
//!
//! let block = BodyDesc::rect(24.0, 96.0)
//!     .with_position(Vec2::new(400.0, 300.0))
//!     .fixed()
//!     .build()
//!     .unwrap();
//! world.add_body(block).unwrap();
//!
//! let ball = BodyDesc::circle(12.0)
//!     .with_position(Vec2::new(100.0, 300.0))
//!     .with_velocity(Vec2::new(20.0, 0.0))
//!     .build()
//!     .unwrap();
//! let ball = world.add_body(ball).unwrap();
//!
//! for _ in 0..60 {
//!     world.update();
//! }
//! println!("ball at {:?}", world.body(ball).map(Body::position));
//! ```

pub mod collision;
pub mod dynamics;
pub mod error;
pub mod geometry;
pub mod math;
pub mod solver;
mod world;

pub use error::{PhysicsError, Result};
pub use world::{World, WorldConfig, WorldOptions, BOUNDARY_THICKNESS};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{Contact, Feature, QuadTree, QuadTreeOptions};
    pub use crate::dynamics::{Body, BodyDesc, BodyId};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::geometry::{Aabb, Circle, Dimensions, Rect, Shape, ShapeType};
    pub use crate::math::Vec2;
    pub use crate::solver::Resolution;
    pub use crate::world::{World, WorldConfig, WorldOptions};
}
