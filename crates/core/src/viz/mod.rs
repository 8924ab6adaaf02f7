//! Graphviz rendering of the family tree.
//!
//! Produces DOT text for an external layout tool (`dot -Tsvg`). An optional
//! ancestry path is drawn in red over the rest of the tree.

mod dot;

pub use dot::{edge_list, render_dot};
