use indexmap::IndexSet;

use crate::genealogy::{path_edges, FamilyTree};

const HIGHLIGHT_COLOR: &str = "#ff0000";
const EDGE_COLOR: &str = "#000000";

/// `(parent, child)` name pairs for every link in the tree.
///
/// One edge per input record, in input order. Records whose parent was
/// missing or unknown show up under the root, matching how the tree was
/// built.
pub fn edge_list(tree: &FamilyTree) -> Vec<(String, String)> {
    tree.nodes()
        .filter_map(|(_, node)| {
            let parent = node.parent()?;
            Some((tree.node(parent).name().to_string(), node.name().to_string()))
        })
        .collect()
}

/// Render edges as a top-down Graphviz digraph.
///
/// When `highlight` is given, its consecutive pairs and the names on it are
/// drawn in red; everything else is black.
pub fn render_dot(edges: &[(String, String)], highlight: Option<&[String]>) -> String {
    fn dot_escape(s: &str) -> String {
        s.replace('\\', "\\\\").replace('"', "\\\"")
    }

    let highlighted_edges = highlight.map(path_edges).unwrap_or_default();
    let highlighted_nodes: IndexSet<&str> = highlight
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect();

    let mut names: IndexSet<&str> = IndexSet::new();
    for (parent, child) in edges {
        names.insert(parent.as_str());
        names.insert(child.as_str());
    }
    // A root-only tree has no edges but still has a node worth drawing.
    for name in &highlighted_nodes {
        names.insert(*name);
    }

    let mut out = String::new();
    out.push_str("digraph tarombo {\n");
    out.push_str("  rankdir=TB;\n");
    out.push_str("  node [shape=box, fontname=\"Helvetica\"];\n");
    out.push_str("  edge [arrowhead=none];\n\n");

    for name in &names {
        if highlighted_nodes.contains(name) {
            out.push_str(&format!(
                "  \"{}\" [color=\"{}\", fontcolor=\"{}\"];\n",
                dot_escape(name),
                HIGHLIGHT_COLOR,
                HIGHLIGHT_COLOR
            ));
        } else {
            out.push_str(&format!("  \"{}\";\n", dot_escape(name)));
        }
    }
    if !names.is_empty() {
        out.push('\n');
    }

    for edge in edges {
        let (color, width) = if highlighted_edges.contains(edge) {
            (HIGHLIGHT_COLOR, "2.0")
        } else {
            (EDGE_COLOR, "0.5")
        };
        out.push_str(&format!(
            "  \"{}\" -> \"{}\" [color=\"{}\", penwidth={}];\n",
            dot_escape(&edge.0),
            dot_escape(&edge.1),
            color,
            width
        ));
    }

    out.push_str("}\n");
    out
}
