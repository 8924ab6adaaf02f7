// Genealogy module: tree construction, name search, traversal and ancestry

pub mod highlight;
pub mod search;
pub mod traversal;
pub mod tree;

pub use highlight::path_edges;
pub use search::find_names;
pub use traversal::{ancestry, branch_sizes, bfs, descendants, lookup, Lineage};
pub use tree::{FamilyTree, PersonNode};
