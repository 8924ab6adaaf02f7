//! Property-based tests for tree construction and traversal.
//!
//! Record sets are generated acyclic (every parent is an earlier person, a
//! missing parent, or a name that matches nobody) and then shuffled, so the
//! builder sees children before their parents as often as after.

use proptest::prelude::*;

use tarombo_core::config::TreeConfig;
use tarombo_core::data::Record;
use tarombo_core::genealogy::{ancestry, bfs, find_names, lookup, FamilyTree};

const ROOT: &str = "R";

fn config() -> TreeConfig {
    TreeConfig::default().with_root_name(ROOT)
}

/// Strategy for a shuffled, acyclic record set of up to 40 people.
fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec((0u8..4, any::<usize>()), 0..40)
        .prop_map(|links| {
            links
                .iter()
                .enumerate()
                .map(|(i, &(kind, pick))| {
                    let parent_name = match kind {
                        0 => None,
                        1 => Some(format!("Ghost {}", i)),
                        _ if i == 0 => None,
                        _ => Some(format!("Person {}", pick % i)),
                    };
                    Record {
                        name: format!("Person {}", i),
                        parent_name,
                    }
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
}

proptest! {
    #[test]
    fn single_root_and_generation_steps(records in arb_records()) {
        let tree = FamilyTree::build(&records, &config()).unwrap();
        prop_assert!(tree.validate().is_ok());
        prop_assert_eq!(tree.n_nodes(), records.len() + 1);

        let parentless: Vec<&str> = tree
            .nodes()
            .filter(|(_, n)| n.parent().is_none())
            .map(|(_, n)| n.name())
            .collect();
        prop_assert_eq!(parentless, vec![ROOT]);

        for (_, node) in tree.nodes() {
            if let Some(p) = node.parent() {
                prop_assert_eq!(node.generation(), tree.node(p).generation() + 1);
            }
        }
    }

    #[test]
    fn ancestry_runs_root_to_node(records in arb_records()) {
        let tree = FamilyTree::build(&records, &config()).unwrap();
        for (id, node) in tree.nodes() {
            let path = ancestry(&tree, id);
            prop_assert_eq!(path.first().map(String::as_str), Some(ROOT));
            prop_assert_eq!(path.last().map(String::as_str), Some(node.name()));
            prop_assert_eq!(path.len(), node.generation() as usize + 1);
        }
    }

    #[test]
    fn bfs_agrees_with_ancestry(records in arb_records()) {
        let tree = FamilyTree::build(&records, &config()).unwrap();
        for (id, node) in tree.nodes() {
            let (found, depth) = bfs(&tree, tree.root(), node.name()).unwrap();
            prop_assert_eq!(found, id);
            prop_assert_eq!(depth as usize, ancestry(&tree, id).len() - 1);
            prop_assert_eq!(depth, node.generation());
        }
    }

    #[test]
    fn rebuild_is_identical(records in arb_records()) {
        let first = FamilyTree::build(&records, &config()).unwrap();
        let second = FamilyTree::build(&records, &config()).unwrap();
        let a: Vec<&str> = first.names().collect();
        let b: Vec<&str> = second.names().collect();
        prop_assert_eq!(&a, &b);
        for name in a {
            prop_assert_eq!(lookup(&first, name), lookup(&second, name));
        }
    }

    #[test]
    fn empty_search_lists_everyone(records in arb_records()) {
        let tree = FamilyTree::build(&records, &config()).unwrap();
        let all: Vec<&str> = tree.names().collect();
        prop_assert_eq!(find_names(&tree, ""), all);
    }

    #[test]
    fn search_ignores_case(records in arb_records()) {
        let tree = FamilyTree::build(&records, &config()).unwrap();
        for record in &records {
            let upper = record.name.to_uppercase();
            prop_assert!(find_names(&tree, &upper).contains(&record.name.as_str()));
        }
    }

    #[test]
    fn unknown_parents_hang_from_root(records in arb_records()) {
        let tree = FamilyTree::build(&records, &config()).unwrap();
        let unresolved = tree.unresolved_parents();
        for record in &records {
            let is_ghost = record
                .parent_name
                .as_deref()
                .is_some_and(|p| p.starts_with("Ghost"));
            prop_assert_eq!(unresolved.contains(&record.name.as_str()), is_ghost);
            if is_ghost {
                let lineage = lookup(&tree, &record.name).unwrap();
                prop_assert_eq!(lineage.generation, 1);
                prop_assert_eq!(lineage.ancestry, vec![ROOT.to_string(), record.name.clone()]);
            }
        }
    }
}
