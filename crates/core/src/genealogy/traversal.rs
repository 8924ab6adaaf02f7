use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::types::{Generation, NodeId};

use super::tree::FamilyTree;

/// Where a person sits in the tree: their generation and the chain of
/// names from the root down to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lineage {
    pub name: String,
    pub generation: Generation,
    /// Root first, the person last.
    pub ancestry: Vec<String>,
}

impl fmt::Display for Lineage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} is generation {}", self.name, self.generation)?;
        write!(f, "Ancestry: {}", self.ancestry.join(" -> "))
    }
}

/// Breadth-first search from `start` for the node named exactly `name`.
///
/// Children are visited in attachment order, level by level. Returns the
/// node id together with the number of levels below `start` at which it was
/// found, or `None` if no node in the subtree has that name.
pub fn bfs(tree: &FamilyTree, start: NodeId, name: &str) -> Option<(NodeId, Generation)> {
    let mut queue: VecDeque<(NodeId, Generation)> = VecDeque::new();
    queue.push_back((start, 0));

    while let Some((id, depth)) = queue.pop_front() {
        let node = tree.node(id);
        if node.name() == name {
            return Some((id, depth));
        }
        queue.extend(node.children().values().map(|&child| (child, depth + 1)));
    }

    None
}

/// Names from the root down to `id`, inclusive at both ends.
///
/// # Panics
/// Panics if `id` is out of bounds.
pub fn ancestry(tree: &FamilyTree, id: NodeId) -> Vec<String> {
    let mut names = Vec::new();
    let mut current = Some(id);
    while let Some(id) = current {
        let node = tree.node(id);
        names.push(node.name().to_string());
        current = node.parent();
    }
    names.reverse();
    names
}

/// Find a person by exact, case-sensitive name, searching from the root.
pub fn lookup(tree: &FamilyTree, name: &str) -> Option<Lineage> {
    let (id, _) = bfs(tree, tree.root(), name)?;
    let node = tree.node(id);
    Some(Lineage {
        name: node.name().to_string(),
        generation: node.generation(),
        ancestry: ancestry(tree, id),
    })
}

/// Every node below `id` in level order, excluding `id` itself.
pub fn descendants(tree: &FamilyTree, id: NodeId) -> Vec<NodeId> {
    let mut order = Vec::new();
    let mut queue: VecDeque<NodeId> = tree.node(id).children().values().copied().collect();
    while let Some(next) = queue.pop_front() {
        order.push(next);
        queue.extend(tree.node(next).children().values().copied());
    }
    order
}

/// Size of each branch directly below `id`: one entry per child, in
/// attachment order, counting the child and everyone under it.
pub fn branch_sizes(tree: &FamilyTree, id: NodeId) -> Vec<(NodeId, usize)> {
    tree.node(id)
        .children()
        .values()
        .map(|&child| (child, descendants(tree, child).len() + 1))
        .collect()
}
