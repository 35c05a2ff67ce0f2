use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::dynamics::{Body, BodyId};
use crate::error::{PhysicsError, Result};
use crate::geometry::{Aabb, Dimensions, Rect, Shape};

/// Tuning for [`QuadTree`] partitioning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadTreeOptions {
    /// A leaf holding more bodies than this splits into four
    pub max_bodies_in_leaf: usize,
    /// A leaf only splits if each quadrant would be at least this large
    pub min_leaf_dimensions: Dimensions,
}

impl Default for QuadTreeOptions {
    fn default() -> Self {
        Self {
            max_bodies_in_leaf: 2,
            min_leaf_dimensions: Dimensions::new(24.0, 24.0),
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Leaf { region: Rect, bodies: Vec<BodyId> },
    Inner { region: Rect, children: Box<[Node; 4]> },
}

impl Node {
    fn leaf(region: Rect) -> Self {
        Node::Leaf {
            region,
            bodies: Vec::new(),
        }
    }

    fn region(&self) -> Rect {
        match self {
            Node::Leaf { region, .. } | Node::Inner { region, .. } => *region,
        }
    }

    /// Inclusive: a shape lying on a boundary line belongs to both sides
    fn overlaps(&self, shape: &Shape) -> bool {
        Shape::Rect(self.region()).intersects_inclusive(shape)
    }

    fn insert(&mut self, id: BodyId, shape: &Shape) {
        match self {
            Node::Leaf { bodies, .. } => bodies.push(id),
            Node::Inner { children, .. } => {
                for child in children.iter_mut() {
                    if child.overlaps(shape) {
                        child.insert(id, shape);
                    }
                }
            }
        }
    }

    fn remove(&mut self, id: BodyId) {
        match self {
            Node::Leaf { bodies, .. } => bodies.retain(|b| *b != id),
            Node::Inner { children, .. } => {
                for child in children.iter_mut() {
                    child.remove(id);
                }
            }
        }
    }

    fn collect(&self, out: &mut Vec<BodyId>, seen: &mut HashSet<BodyId>) {
        match self {
            Node::Leaf { bodies, .. } => {
                for id in bodies {
                    if seen.insert(*id) {
                        out.push(*id);
                    }
                }
            }
            Node::Inner { children, .. } => {
                for child in children.iter() {
                    child.collect(out, seen);
                }
            }
        }
    }

    fn unique_bodies(&self) -> Vec<BodyId> {
        let mut out = Vec::new();
        self.collect(&mut out, &mut HashSet::new());
        out
    }

    /// Collects ids from every leaf overlapping `shape`
    fn query(&self, shape: &Shape, out: &mut Vec<BodyId>, seen: &mut HashSet<BodyId>) {
        match self {
            Node::Leaf { .. } => self.collect(out, seen),
            Node::Inner { children, .. } => {
                for child in children.iter() {
                    if child.overlaps(shape) {
                        child.query(shape, out, seen);
                    }
                }
            }
        }
    }

    /// Splits crowded leaves and merges sparse inner nodes. A node changes
    /// state at most once per pass.
    fn restructure(&mut self, options: &QuadTreeOptions, tracked: &HashMap<BodyId, Shape>) {
        match self {
            Node::Leaf { region, bodies } => {
                if bodies.len() <= options.max_bodies_in_leaf || !can_partition(region, options) {
                    return;
                }

                let region = *region;
                let mut children = Box::new(region.quadrants().map(Node::leaf));
                for id in bodies.iter() {
                    let Some(shape) = tracked.get(id) else {
                        continue;
                    };
                    for child in children.iter_mut() {
                        if child.overlaps(shape) {
                            child.insert(*id, shape);
                        }
                    }
                }

                debug!(
                    "partitioned leaf at ({}, {}) {}x{} holding {} bodies",
                    region.x0(),
                    region.y0(),
                    region.width,
                    region.height,
                    bodies.len()
                );
                *self = Node::Inner { region, children };
            }
            Node::Inner { .. } => {
                let unique = self.unique_bodies();
                if unique.len() <= options.max_bodies_in_leaf {
                    let region = self.region();
                    debug!(
                        "collapsed node at ({}, {}) {}x{} holding {} bodies",
                        region.x0(),
                        region.y0(),
                        region.width,
                        region.height,
                        unique.len()
                    );
                    *self = Node::Leaf {
                        region,
                        bodies: unique,
                    };
                } else if let Node::Inner { children, .. } = self {
                    for child in children.iter_mut() {
                        child.restructure(options, tracked);
                    }
                }
            }
        }
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Inner { children, .. } => {
                1 + children.iter().map(Node::depth).max().unwrap_or(0)
            }
        }
    }

    fn leaf_regions(&self, out: &mut Vec<Rect>) {
        match self {
            Node::Leaf { region, .. } => out.push(*region),
            Node::Inner { children, .. } => {
                for child in children.iter() {
                    child.leaf_regions(out);
                }
            }
        }
    }
}

fn can_partition(region: &Rect, options: &QuadTreeOptions) -> bool {
    region.width / 2.0 >= options.min_leaf_dimensions.width
        && region.height / 2.0 >= options.min_leaf_dimensions.height
}

/// An adaptive quad-tree over a fixed rectangular region.
///
/// Bodies are registered by id in every leaf their shape touches. A side
/// table keeps the shape each body was bucketed with, so a body is only
/// re-bucketed when it actually moved or changed size. Leaves split and inner
/// nodes merge once per [`update`](QuadTree::update), never on insertion.
#[derive(Debug, Clone)]
pub struct QuadTree {
    root: Node,
    options: QuadTreeOptions,
    tracked: HashMap<BodyId, Shape>,
}

impl QuadTree {
    /// Creates an empty tree covering `(0, 0)` to `(width, height)`
    pub fn new(width: f64, height: f64, options: QuadTreeOptions) -> Self {
        Self {
            root: Node::leaf(Rect::from_corner(0.0, 0.0, width, height)),
            options,
            tracked: HashMap::new(),
        }
    }

    /// The region covered by the tree
    pub fn region(&self) -> Rect {
        self.root.region()
    }

    pub fn options(&self) -> &QuadTreeOptions {
        &self.options
    }

    /// Registers a body. A body outside the region is tracked but never
    /// returned by queries.
    pub fn add_body(&mut self, id: BodyId, shape: Shape) -> Result<()> {
        if self.tracked.contains_key(&id) {
            return Err(PhysicsError::DuplicateBody(id));
        }
        self.tracked.insert(id, shape);
        if self.root.overlaps(&shape) {
            self.root.insert(id, &shape);
        }
        Ok(())
    }

    pub fn remove_body(&mut self, id: BodyId) -> Result<()> {
        if self.tracked.remove(&id).is_none() {
            return Err(PhysicsError::UnknownBody(id));
        }
        self.root.remove(id);
        Ok(())
    }

    #[inline]
    pub fn contains(&self, id: BodyId) -> bool {
        self.tracked.contains_key(&id)
    }

    /// Number of tracked bodies
    #[inline]
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Returns true if the body is tracked with exactly this shape
    #[inline]
    pub fn is_synced(&self, id: BodyId, shape: &Shape) -> bool {
        self.tracked.get(&id) == Some(shape)
    }

    /// Re-buckets a body if its shape differs from the one it was stored with.
    ///
    /// Returns whether the body was moved within the tree.
    pub fn sync_body(&mut self, id: BodyId, shape: Shape) -> Result<bool> {
        match self.tracked.get(&id) {
            None => Err(PhysicsError::UnknownBody(id)),
            Some(stored) if *stored == shape => Ok(false),
            Some(_) => {
                self.rebucket(id, shape);
                Ok(true)
            }
        }
    }

    fn rebucket(&mut self, id: BodyId, shape: Shape) {
        self.root.remove(id);
        self.tracked.insert(id, shape);
        if self.root.overlaps(&shape) {
            self.root.insert(id, &shape);
        }
    }

    /// Re-buckets every tracked body that moved, then runs one restructuring
    /// pass over the tree.
    pub fn update<'a, I>(&mut self, bodies: I)
    where
        I: IntoIterator<Item = &'a Body>,
    {
        for body in bodies {
            let shape = *body.shape();
            if matches!(self.tracked.get(&body.id()), Some(stored) if *stored != shape) {
                self.rebucket(body.id(), shape);
            }
        }
        self.root.restructure(&self.options, &self.tracked);
    }

    /// Ids of bodies whose stored shape overlaps or touches `aabb`
    pub fn query_region(&self, aabb: &Aabb) -> Vec<BodyId> {
        self.query_shape(&aabb.to_shape())
    }

    /// Ids of bodies whose stored shape overlaps or touches `shape`.
    ///
    /// Only leaves overlapping the shape are visited. Each id appears once.
    pub fn query_shape(&self, shape: &Shape) -> Vec<BodyId> {
        let mut out = Vec::new();
        if self.root.overlaps(shape) {
            self.root.query(shape, &mut out, &mut HashSet::new());
        }
        out.retain(|id| {
            self.tracked
                .get(id)
                .map_or(false, |stored| stored.intersects_inclusive(shape))
        });
        out
    }

    /// Every body id stored in a leaf, each once
    pub fn bodies(&self) -> Vec<BodyId> {
        self.root.unique_bodies()
    }

    /// Regions of all leaves, for drawing the partition
    pub fn leaf_regions(&self) -> Vec<Rect> {
        let mut out = Vec::new();
        self.root.leaf_regions(&mut out);
        out
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_regions().len()
    }

    /// Number of levels, 1 for a tree that is a single leaf
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
