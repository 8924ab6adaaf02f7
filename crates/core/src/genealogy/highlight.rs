use indexmap::IndexSet;

/// Consecutive `(parent, child)` pairs along an ancestry path.
///
/// A path of `n` names gives `n - 1` edges, root edge first. Paths of zero or
/// one name give no edges.
pub fn path_edges(ancestry: &[String]) -> IndexSet<(String, String)> {
    ancestry
        .windows(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_path_edges_chain() {
        let edges = path_edges(&names(&["R", "A", "B", "C"]));
        let expected: Vec<(String, String)> = vec![
            ("R".into(), "A".into()),
            ("A".into(), "B".into()),
            ("B".into(), "C".into()),
        ];
        assert_eq!(edges.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_path_edges_short_paths() {
        assert!(path_edges(&names(&["R"])).is_empty());
        assert!(path_edges(&[]).is_empty());
    }

    #[test]
    fn test_path_edges_membership() {
        let edges = path_edges(&names(&["R", "A", "B"]));
        assert!(edges.contains(&("A".to_string(), "B".to_string())));
        assert!(!edges.contains(&("B".to_string(), "A".to_string())));
    }
}
