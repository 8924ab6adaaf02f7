/// Index of a person in the tree arena.
pub type NodeId = usize;

/// Depth of a person measured in parent links from the synthetic root.
pub type Generation = u32;
