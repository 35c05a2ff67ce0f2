mod quad_tree;

pub use quad_tree::{QuadTree, QuadTreeOptions};
