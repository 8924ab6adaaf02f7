use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::config::TreeConfig;
use crate::data::record::is_missing_marker;
use crate::data::Record;
use crate::error::{Result, TaromboError};
use crate::types::{Generation, NodeId};

/// A single person in the family tree.
///
/// The parent link is a [`NodeId`] into the owning [`FamilyTree`] arena, not
/// an owning pointer. Children are kept in the order they were attached.
#[derive(Debug, Clone)]
pub struct PersonNode {
    name: String,
    parent: Option<NodeId>,
    children: IndexMap<String, NodeId>,
    /// `None` until the node is connected to the root.
    generation: Option<Generation>,
}

impl PersonNode {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            parent: None,
            children: IndexMap::new(),
            generation: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id of the parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children keyed by name, in attachment order.
    pub fn children(&self) -> &IndexMap<String, NodeId> {
        &self.children
    }

    /// Distance from the root in parent links. The root is generation 0.
    pub fn generation(&self) -> Generation {
        self.generation.unwrap_or_default()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A single-rooted family tree rebuilt from parent/child records.
///
/// Nodes live in a contiguous arena. The name index preserves first-seen
/// input order, with the synthetic root appended last; that order is what
/// name search reports.
///
/// The tree is immutable once built. Callers that serve several queries
/// concurrently should build one tree per request rather than share one.
#[derive(Debug, Clone)]
pub struct FamilyTree {
    nodes: Vec<PersonNode>,
    index: IndexMap<String, NodeId>,
    root: NodeId,
    /// Nodes whose declared parent matched no record and were attached to
    /// the root instead.
    unresolved: Vec<NodeId>,
}

impl FamilyTree {
    /// Build a tree from `(name, parent_name)` records.
    ///
    /// Every record becomes one node. A record with no parent, or whose
    /// parent name matches no record, is attached directly under the
    /// synthetic root named by [`TreeConfig::root_name`]. Generations are
    /// assigned as each link is made, so record order does not matter.
    ///
    /// A parent written as a missing-value marker (`NA`, `NaN`, `None`) also
    /// means "no parent", unless some record actually carries that name.
    ///
    /// An empty record list yields a tree holding only the root.
    ///
    /// # Errors
    /// - [`TaromboError::Input`] if a record has a blank name.
    /// - [`TaromboError::DuplicateName`] if two records share a name, or a
    ///   record reuses the root's name.
    /// - [`TaromboError::Cycle`] if some records' parent links loop back on
    ///   themselves and can never reach the root.
    /// - [`TaromboError::Config`] if the config is invalid.
    pub fn build(records: &[Record], config: &TreeConfig) -> Result<Self> {
        config.validate()?;

        let mut tree = Self {
            nodes: Vec::with_capacity(records.len() + 1),
            index: IndexMap::with_capacity(records.len() + 1),
            root: 0,
            unresolved: Vec::new(),
        };

        for (i, record) in records.iter().enumerate() {
            if record.name.trim().is_empty() {
                return Err(TaromboError::Input(format!("Blank name in record {}", i + 1)));
            }
            if record.name == config.root_name || tree.index.contains_key(&record.name) {
                return Err(TaromboError::DuplicateName(record.name.clone()));
            }
            tree.push_node(&record.name);
        }

        let root = tree.push_node(&config.root_name);
        tree.nodes[root].generation = Some(0);
        tree.root = root;

        // Records and nodes share indices: node i was created from record i.
        for (child, record) in records.iter().enumerate() {
            let parent = match record.parent_name.as_deref() {
                None => root,
                Some(parent_name) => match tree.index.get(parent_name) {
                    Some(&id) => id,
                    None if is_missing_marker(parent_name) => root,
                    None => {
                        warn!(
                            "Parent '{}' of '{}' not found; attaching to '{}'",
                            parent_name, record.name, config.root_name
                        );
                        tree.unresolved.push(child);
                        root
                    }
                },
            };
            tree.attach(child, parent);
        }

        let stranded: Vec<String> = tree
            .nodes
            .iter()
            .filter(|n| n.generation.is_none())
            .map(|n| n.name.clone())
            .collect();
        if !stranded.is_empty() {
            return Err(TaromboError::Cycle(stranded));
        }

        debug!(
            "{} of {} records attached to the root through a missing parent",
            tree.unresolved.len(),
            records.len()
        );
        info!(
            "Built family tree: {} people under '{}', {} generations deep",
            records.len(),
            config.root_name,
            tree.max_generation()
        );

        Ok(tree)
    }

    fn push_node(&mut self, name: &str) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(PersonNode::new(name));
        self.index.insert(name.to_string(), id);
        id
    }

    /// Link `child` under `parent` and assign its generation in the same step.
    ///
    /// If the child already has descendants attached, their generations are
    /// re-derived as well. Nothing is assigned while `parent` is itself still
    /// disconnected from the root; that happens when `parent` gets attached.
    fn attach(&mut self, child: NodeId, parent: NodeId) {
        self.nodes[child].parent = Some(parent);
        let name = self.nodes[child].name.clone();
        self.nodes[parent].children.insert(name, child);

        if let Some(generation) = self.nodes[parent].generation {
            self.assign_generation(child, generation + 1);
        }
    }

    fn assign_generation(&mut self, start: NodeId, generation: Generation) {
        let mut stack = vec![(start, generation)];
        while let Some((id, generation)) = stack.pop() {
            let node = &mut self.nodes[id];
            node.generation = Some(generation);
            stack.extend(node.children.values().map(|&c| (c, generation + 1)));
        }
    }

    /// Id of the synthetic root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &PersonNode {
        &self.nodes[self.root]
    }

    /// Look up a node by id.
    ///
    /// # Panics
    /// Panics if `id` is out of bounds.
    pub fn node(&self, id: NodeId) -> &PersonNode {
        &self.nodes[id]
    }

    /// Look up the id of a person by exact name.
    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    /// Look up a person by exact name.
    pub fn get(&self, name: &str) -> Option<&PersonNode> {
        self.id_of(name).map(|id| &self.nodes[id])
    }

    /// Number of nodes, including the synthetic root.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// All names in first-seen input order, root last.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.index.keys().map(String::as_str)
    }

    /// All nodes with their ids, in the same order as [`FamilyTree::names`].
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &PersonNode)> + '_ {
        self.nodes.iter().enumerate()
    }

    /// Parent of `id`, or `None` for the root.
    pub fn parent_of(&self, id: NodeId) -> Option<&PersonNode> {
        self.nodes[id].parent.map(|p| &self.nodes[p])
    }

    /// Children of `id` in attachment order.
    pub fn children_of(&self, id: NodeId) -> impl Iterator<Item = &PersonNode> + '_ {
        self.nodes[id].children.values().map(|&c| &self.nodes[c])
    }

    /// Names of people whose declared parent was not found and who were
    /// attached to the root instead. Usually a sign of a misspelt parent.
    pub fn unresolved_parents(&self) -> Vec<&str> {
        self.unresolved.iter().map(|&id| self.nodes[id].name()).collect()
    }

    /// Deepest generation in the tree. Zero for a root-only tree.
    pub fn max_generation(&self) -> Generation {
        self.nodes.iter().map(PersonNode::generation).max().unwrap_or(0)
    }

    /// Check the structural invariants of the tree.
    ///
    /// Checks:
    /// - Exactly one node (the root) has no parent, and it is generation 0.
    /// - Every parent link is mirrored by the parent's children map.
    /// - Every node's generation is its parent's generation plus one.
    /// - Following parent links from any node reaches the root within
    ///   `n_nodes` steps.
    ///
    /// # Errors
    /// Returns [`TaromboError::Invariant`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let n = self.nodes.len();

        for (id, node) in self.nodes.iter().enumerate() {
            match node.parent {
                None if id != self.root => {
                    return Err(TaromboError::Invariant(format!(
                        "'{}' has no parent but is not the root",
                        node.name
                    )));
                }
                None => {
                    if node.generation != Some(0) {
                        return Err(TaromboError::Invariant(format!(
                            "Root '{}' is not generation 0",
                            node.name
                        )));
                    }
                }
                Some(p) => {
                    let parent = self.nodes.get(p).ok_or_else(|| {
                        TaromboError::Invariant(format!(
                            "'{}' references parent index {} which is out of range",
                            node.name, p
                        ))
                    })?;
                    if parent.children.get(&node.name) != Some(&id) {
                        return Err(TaromboError::Invariant(format!(
                            "'{}' is not listed among the children of its parent '{}'",
                            node.name, parent.name
                        )));
                    }
                    match (parent.generation, node.generation) {
                        (Some(pg), Some(g)) if g == pg + 1 => {}
                        _ => {
                            return Err(TaromboError::Invariant(format!(
                                "'{}' has generation {:?} but its parent '{}' has {:?}",
                                node.name, node.generation, parent.name, parent.generation
                            )));
                        }
                    }
                }
            }

            let mut steps = 0;
            let mut current = id;
            while let Some(p) = self.nodes[current].parent {
                steps += 1;
                if steps > n {
                    return Err(TaromboError::Invariant(format!(
                        "Following parents from '{}' never reaches the root",
                        node.name
                    )));
                }
                current = p;
            }
        }

        Ok(())
    }
}
