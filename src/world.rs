use std::collections::{HashMap, HashSet, VecDeque};
use std::io::Read;

use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::collision::{closest_contact, Contact, QuadTree, QuadTreeOptions};
use crate::dynamics::{Body, BodyDesc, BodyId};
use crate::error::{PhysicsError, Result};
use crate::geometry::{Rect, Shape};
use crate::math::utils::round_for_float;
use crate::solver::{resolve, slide};

/// Thickness of the fixed walls placed just outside the world's edges
pub const BOUNDARY_THICKNESS: f64 = 24.0;

/// Runtime switches for a [`World`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldOptions {
    /// Disables the per-tick velocity damping of free bodies
    pub no_friction: bool,
    /// Uses a quad-tree instead of a full scan to find collision candidates
    pub use_quad_tree: bool,
    /// Partitioning of the quad-tree, if enabled
    pub quad_tree: QuadTreeOptions,
}

/// Configuration for the physics world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub options: WorldOptions,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            options: WorldOptions::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a YAML document. Missing keys take defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a YAML document from a reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: Self = serde_yaml::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects sizes that cannot hold a simulation
    pub fn validate(&self) -> Result<()> {
        for (what, value) in [("width", self.width), ("height", self.height)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(PhysicsError::InvalidConfiguration(format!(
                    "world {what} must be positive, got {value}"
                )));
            }
        }

        let quad_tree = &self.options.quad_tree;
        if quad_tree.max_bodies_in_leaf == 0 {
            return Err(PhysicsError::InvalidConfiguration(
                "max_bodies_in_leaf must be at least 1".to_string(),
            ));
        }
        let min = quad_tree.min_leaf_dimensions;
        if !(min.width > 0.0 && min.height > 0.0) {
            return Err(PhysicsError::InvalidConfiguration(format!(
                "min_leaf_dimensions must be positive, got {}x{}",
                min.width, min.height
            )));
        }
        Ok(())
    }
}

/// A bounded 2D world stepped one tick at a time.
///
/// Bodies are simulated in insertion order. Four fixed walls surround the
/// area from `(0, 0)` to `(width, height)` so nothing escapes it.
pub struct World {
    width: f64,
    height: f64,
    options: WorldOptions,
    bodies: Vec<Body>,
    /// Position of each body in `bodies`
    index: HashMap<BodyId, usize>,
    boundaries: [BodyId; 4],
    quad_tree: Option<QuadTree>,
    tick: u64,
}

impl World {
    /// Creates a world with its boundary walls
    pub fn new(width: f64, height: f64, options: WorldOptions) -> Result<Self> {
        Self::from_config(WorldConfig {
            width,
            height,
            options,
        })
    }

    /// Creates a world from a validated configuration
    pub fn from_config(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        let WorldConfig {
            width,
            height,
            options,
        } = config;

        let quad_tree = options
            .use_quad_tree
            .then(|| QuadTree::new(width, height, options.quad_tree));

        let t = BOUNDARY_THICKNESS;
        let walls = [
            ("boundary-top", Rect::from_corner(-t, -t, width + 2.0 * t, t)),
            ("boundary-right", Rect::from_corner(width, -t, t, height + 2.0 * t)),
            ("boundary-bottom", Rect::from_corner(-t, height, width + 2.0 * t, t)),
            ("boundary-left", Rect::from_corner(-t, -t, t, height + 2.0 * t)),
        ];

        let mut world = Self {
            width,
            height,
            options,
            bodies: Vec::new(),
            index: HashMap::new(),
            boundaries: [BodyId::from_raw(0); 4],
            quad_tree,
            tick: 0,
        };

        for (slot, (name, rect)) in walls.into_iter().enumerate() {
            let wall = BodyDesc::from_shape(Shape::Rect(rect))
                .with_elasticity(1.0)
                .with_name(name)
                .fixed()
                .build()?;
            world.boundaries[slot] = world.add_body(wall)?;
        }

        info!(
            "created {}x{} world (friction: {}, quad-tree: {})",
            width,
            height,
            !options.no_friction,
            options.use_quad_tree
        );

        Ok(world)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    #[inline]
    pub fn options(&self) -> &WorldOptions {
        &self.options
    }

    /// Number of completed ticks
    #[inline]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Ids of the four boundary walls: top, right, bottom, left
    #[inline]
    pub fn boundaries(&self) -> [BodyId; 4] {
        self.boundaries
    }

    pub fn quad_tree(&self) -> Option<&QuadTree> {
        self.quad_tree.as_ref()
    }

    pub fn friction_enabled(&self) -> bool {
        !self.options.no_friction
    }

    pub fn set_friction_enabled(&mut self, enabled: bool) {
        self.options.no_friction = !enabled;
    }

    /// Registers a body, returning its id
    pub fn add_body(&mut self, body: Body) -> Result<BodyId> {
        let id = body.id();
        if self.index.contains_key(&id) {
            return Err(PhysicsError::DuplicateBody(id));
        }
        if let Some(tree) = self.quad_tree.as_mut() {
            tree.add_body(id, *body.shape())?;
        }

        debug!("added body {} ({})", id, body.name().unwrap_or("unnamed"));
        self.index.insert(id, self.bodies.len());
        self.bodies.push(body);
        Ok(id)
    }

    /// Unregisters a body and hands it back. Boundary walls cannot be removed.
    pub fn remove_body(&mut self, id: BodyId) -> Result<Body> {
        if self.boundaries.contains(&id) {
            return Err(PhysicsError::BoundaryBody(id));
        }
        let position = *self.index.get(&id).ok_or(PhysicsError::UnknownBody(id))?;

        if let Some(tree) = self.quad_tree.as_mut() {
            tree.remove_body(id)?;
        }

        let body = self.bodies.remove(position);
        self.index.remove(&id);
        for (i, later) in self.bodies.iter().enumerate().skip(position) {
            self.index.insert(later.id(), i);
        }

        debug!("removed body {}", id);
        Ok(body)
    }

    /// All bodies in simulation order, boundary walls included
    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Number of bodies, boundary walls included
    #[inline]
    pub fn num_bodies(&self) -> usize {
        self.bodies.len()
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.index.get(&id).map(|&i| &self.bodies[i])
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.index.get(&id).map(|&i| &mut self.bodies[i])
    }

    /// Ids of bodies whose shape overlaps `shape`, in simulation order.
    ///
    /// Touching is not overlapping. Bodies moved through
    /// [`body_mut`](World::body_mut) since they were last bucketed are checked
    /// directly, so the answer never depends on quad-tree staleness.
    pub fn bodies_intersecting(&self, shape: &Shape) -> Vec<BodyId> {
        let candidates: Vec<usize> = match &self.quad_tree {
            Some(tree) => {
                let mut found: Vec<usize> = tree
                    .query_shape(shape)
                    .into_iter()
                    .filter_map(|id| self.index.get(&id).copied())
                    .chain(
                        self.bodies
                            .iter()
                            .enumerate()
                            .filter(|(_, body)| !tree.is_synced(body.id(), body.shape()))
                            .map(|(i, _)| i),
                    )
                    .collect();
                found.sort_unstable();
                found.dedup();
                found
            }
            None => (0..self.bodies.len()).collect(),
        };

        candidates
            .into_iter()
            .map(|i| &self.bodies[i])
            .filter(|body| body.shape().intersects(shape))
            .map(Body::id)
            .collect()
    }

    /// Advances the simulation by one tick.
    ///
    /// Each movable body in turn either moves its full velocity and slows by
    /// friction, or moves up to its earliest contact and has that contact and
    /// any zero-time contacts it pushes on resolved.
    pub fn update(&mut self) {
        self.tick += 1;

        if let Some(tree) = self.quad_tree.as_mut() {
            tree.update(&self.bodies);
        }

        for position in 0..self.bodies.len() {
            let body = &self.bodies[position];
            if body.is_fixed() || !body.is_moving() {
                continue;
            }

            let candidates = self.candidates(position);
            let contact = closest_contact(body, candidates.iter().map(|&i| &self.bodies[i]));

            match contact {
                None => {
                    let friction = self.friction_enabled();
                    let body = &mut self.bodies[position];
                    body.advance(1.0);
                    if friction {
                        body.apply_friction();
                    }
                    self.sync_quad_tree(position);
                }
                Some(contact) => {
                    self.bodies[position].advance(contact.time);
                    self.sync_quad_tree(position);
                    self.resolve_chain(contact);
                }
            }
        }
    }

    /// Positions of the bodies that may be hit by the body at `position`
    /// this tick, in simulation order
    fn candidates(&self, position: usize) -> Vec<usize> {
        let body = &self.bodies[position];
        match (&self.quad_tree, body.swept_aabb()) {
            (Some(tree), Some(swept)) => {
                let mut found: Vec<usize> = tree
                    .query_region(&swept)
                    .into_iter()
                    .filter_map(|id| self.index.get(&id).copied())
                    .filter(|&i| i != position)
                    .collect();
                found.sort_unstable();
                found
            }
            _ => (0..self.bodies.len()).filter(|&i| i != position).collect(),
        }
    }

    fn sync_quad_tree(&mut self, position: usize) {
        if let Some(tree) = self.quad_tree.as_mut() {
            let body = &self.bodies[position];
            if let Err(err) = tree.sync_body(body.id(), *body.shape()) {
                warn!("quad-tree out of sync: {}", err);
            }
        }
    }

    /// Contact of the body at `position` that happens right now, if any
    fn immediate_contact(&self, position: usize) -> Option<Contact> {
        let candidates = self.candidates(position);
        closest_contact(
            &self.bodies[position],
            candidates.iter().map(|&i| &self.bodies[i]),
        )
        .filter(|contact| round_for_float(contact.time) == 0.0)
    }

    /// Resolves `first` and then every zero-time contact it sets off.
    ///
    /// Each body is the moving side of at most one step. A body pressed into
    /// one that already moved this chain slides along it instead.
    fn resolve_chain(&mut self, first: Contact) {
        let mut queue = VecDeque::from([first]);
        let mut visited: HashSet<BodyId> = HashSet::new();

        while let Some(contact) = queue.pop_front() {
            if !visited.insert(contact.moving) {
                continue;
            }
            let (Some(&moving), Some(&other)) = (
                self.index.get(&contact.moving),
                self.index.get(&contact.other),
            ) else {
                continue;
            };

            if visited.contains(&contact.other) {
                self.slide_into(moving, other, &contact);
            } else {
                let (moving_body, other_body) = pair_mut(&mut self.bodies, moving, other);
                let resolution = resolve(moving_body, other_body, &contact);
                trace!(
                    "tick {}: {} hit {} at t={:.3} via {:?}: {:?}",
                    self.tick,
                    contact.moving,
                    contact.other,
                    contact.time,
                    contact.feature,
                    resolution
                );
                self.notify(moving, other, &contact);
            }

            let partner = &self.bodies[other];
            if !partner.is_fixed() && !visited.contains(&partner.id()) {
                if let Some(next) = self.immediate_contact(other) {
                    queue.push_back(next);
                }
            }

            if let Some(next) = self.immediate_contact(moving) {
                if visited.contains(&next.other) {
                    if let Some(&pressed) = self.index.get(&next.other) {
                        self.slide_into(moving, pressed, &next);
                    }
                }
            }
        }
    }

    fn slide_into(&mut self, moving: usize, other: usize, contact: &Contact) {
        let resolution = slide(&mut self.bodies[moving], contact);
        trace!(
            "tick {}: {} pressed into {}: {:?}",
            self.tick,
            contact.moving,
            contact.other,
            resolution
        );
        self.notify(moving, other, contact);
    }

    fn notify(&mut self, moving: usize, other: usize, contact: &Contact) {
        self.bodies[moving].notify(contact);
        self.bodies[other].notify(contact);
    }
}

/// Mutable references to two distinct bodies
fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = bodies.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
