use super::tree::FamilyTree;

/// Names containing `query`, compared case-insensitively.
///
/// Results follow the tree's name order (input order, root last) and are
/// not sorted. An empty query matches every name; no match gives an empty
/// vector.
pub fn find_names<'a>(tree: &'a FamilyTree, query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    tree.names()
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TreeConfig;
    use crate::data::Record;

    fn tree() -> FamilyTree {
        let records = Record::from_pairs(&[
            ("Siraja Batak", ""),
            ("Guru Tatea Bulan", "Siraja Batak"),
            ("Raja Isumbaon", "Siraja Batak"),
            ("Ompu Raja Hutapea", "Raja Isumbaon"),
        ]);
        FamilyTree::build(&records, &TreeConfig::default()).unwrap()
    }

    #[test]
    fn test_case_insensitive_substring() {
        let tree = tree();
        assert_eq!(find_names(&tree, "BATAK"), vec!["Siraja Batak"]);
        assert_eq!(
            find_names(&tree, "raja"),
            vec!["Siraja Batak", "Raja Isumbaon", "Ompu Raja Hutapea"]
        );
    }

    #[test]
    fn test_empty_query_matches_all_in_order() {
        let tree = tree();
        assert_eq!(
            find_names(&tree, ""),
            vec![
                "Siraja Batak",
                "Guru Tatea Bulan",
                "Raja Isumbaon",
                "Ompu Raja Hutapea",
                "Mula Jadi Nabolon",
            ]
        );
    }

    #[test]
    fn test_root_is_searchable() {
        let tree = tree();
        assert_eq!(find_names(&tree, "nabolon"), vec!["Mula Jadi Nabolon"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let tree = tree();
        assert!(find_names(&tree, "Simanjuntak").is_empty());
    }
}
