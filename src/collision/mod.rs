pub mod broad_phase;
pub mod contact;
pub mod narrow_phase;

pub use broad_phase::{QuadTree, QuadTreeOptions};
pub use contact::{Axis, Contact, Feature, Impact};
pub use narrow_phase::{closest_contact, time_of_impact};
