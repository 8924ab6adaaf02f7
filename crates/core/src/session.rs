//! One query session over a freshly built tree.
//!
//! A [`Session`] owns its records and the tree built from them. Nothing is
//! shared between sessions, so a server can build one per request.

use std::fmt;
use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::config::TreeConfig;
use crate::data::{read_records_csv, Record};
use crate::error::Result;
use crate::genealogy::{find_names, lookup, FamilyTree, Lineage};
use crate::viz::{edge_list, render_dot};

/// Result of a free-text query.
///
/// `NoMatches` (the text matched no name) and `NotFound` (an exact name is
/// not in the tree) are different outcomes and are reported differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueryOutcome {
    NoMatches { query: String },
    NotFound { name: String },
    Found(Lineage),
}

impl QueryOutcome {
    pub fn lineage(&self) -> Option<&Lineage> {
        match self {
            QueryOutcome::Found(lineage) => Some(lineage),
            _ => None,
        }
    }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::NoMatches { query } => {
                write!(f, "No matching names found for '{}'", query)
            }
            QueryOutcome::NotFound { name } => {
                write!(f, "{} was not found in the family tree", name)
            }
            QueryOutcome::Found(lineage) => write!(f, "{}", lineage),
        }
    }
}

/// Records plus the tree built from them, for the length of one invocation.
#[derive(Debug, Clone)]
pub struct Session {
    records: Vec<Record>,
    tree: FamilyTree,
}

impl Session {
    /// Build a session from in-memory records.
    ///
    /// # Errors
    /// Returns any error from [`FamilyTree::build`].
    pub fn new(records: Vec<Record>, config: &TreeConfig) -> Result<Self> {
        let tree = FamilyTree::build(&records, config)?;
        Ok(Self { records, tree })
    }

    /// Read records from a CSV file and build a session.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the tree cannot be
    /// built. No partial session is returned.
    pub fn from_csv<P: AsRef<Path>>(path: P, config: &TreeConfig) -> Result<Self> {
        let records = read_records_csv(path, config)?;
        Self::new(records, config)
    }

    pub fn tree(&self) -> &FamilyTree {
        &self.tree
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Names containing `query`, case-insensitively, in input order.
    pub fn search(&self, query: &str) -> Vec<&str> {
        find_names(&self.tree, query)
    }

    /// Exact-name lookup from the root.
    pub fn lookup(&self, name: &str) -> Option<Lineage> {
        lookup(&self.tree, name)
    }

    /// Search for `text` and look up the first matching name.
    pub fn query(&self, text: &str) -> QueryOutcome {
        let matches = self.search(text);
        let Some(first) = matches.first() else {
            return QueryOutcome::NoMatches {
                query: text.to_string(),
            };
        };
        if matches.len() > 1 {
            debug!(
                "'{}' matched {} names; using the first, '{}'",
                text,
                matches.len(),
                first
            );
        }
        match self.lookup(first) {
            Some(lineage) => QueryOutcome::Found(lineage),
            None => QueryOutcome::NotFound {
                name: first.to_string(),
            },
        }
    }

    /// DOT rendering of the whole tree, highlighting `highlight`'s ancestry
    /// when given.
    pub fn render_dot(&self, highlight: Option<&Lineage>) -> String {
        let edges = edge_list(&self.tree);
        render_dot(&edges, highlight.map(|l| l.ancestry.as_slice()))
    }
}
