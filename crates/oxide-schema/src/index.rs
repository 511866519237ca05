//! Index definitions.

use serde::{Deserialize, Serialize};

use crate::definition::Render;
use crate::error::Result;
use crate::grammar::Grammar;

/// Kind of index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Primary,
    Unique,
    Index,
    Spatial,
    #[serde(rename = "fulltext")]
    FullText,
}

impl IndexKind {
    /// Returns the tag used in index names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Unique => "unique",
            Self::Index => "index",
            Self::Spatial => "spatial",
            Self::FullText => "fulltext",
        }
    }
}

/// Storage algorithm of an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexAlgorithm {
    /// Let the database choose.
    #[default]
    Default,
    BTree,
    Hash,
}

impl IndexAlgorithm {
    /// Returns the SQL spelling, empty for [`IndexAlgorithm::Default`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::BTree => "btree",
            Self::Hash => "hash",
        }
    }
}

/// An index over one or more columns of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    table: String,
    kind: IndexKind,
    columns: Vec<String>,
    algorithm: IndexAlgorithm,
}

impl Index {
    /// Creates an index with the default algorithm.
    #[must_use]
    pub fn new(table: impl Into<String>, kind: IndexKind, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            kind,
            columns,
            algorithm: IndexAlgorithm::Default,
        }
    }

    /// Sets the storage algorithm.
    pub const fn using(&mut self, algorithm: IndexAlgorithm) -> &mut Self {
        self.algorithm = algorithm;
        self
    }

    /// Table the index belongs to.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Index kind.
    #[must_use]
    pub const fn kind(&self) -> IndexKind {
        self.kind
    }

    /// Indexed columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Storage algorithm.
    #[must_use]
    pub const fn algorithm(&self) -> IndexAlgorithm {
        self.algorithm
    }

    /// Returns the index name: `<table>_<columns joined by _>_<kind>`, without
    /// a trailing underscore.
    #[must_use]
    pub fn name(&self) -> String {
        let name = format!(
            "{}_{}_{}",
            self.table,
            self.columns.join("_"),
            self.kind.as_str()
        );
        name.trim_end_matches('_').to_string()
    }
}

impl Render for Index {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        grammar.compile_index(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|&s| s.to_string()).collect()
    }

    #[test]
    fn test_index_name() {
        let index = Index::new("users", IndexKind::Unique, columns(&["username"]));
        assert_eq!(index.name(), "users_username_unique");

        let index = Index::new("users", IndexKind::Index, columns(&["first", "last"]));
        assert_eq!(index.name(), "users_first_last_index");
    }

    #[test]
    fn test_index_names_differ_by_kind_and_columns() {
        let unique = Index::new("users", IndexKind::Unique, columns(&["email"]));
        let plain = Index::new("users", IndexKind::Index, columns(&["email"]));
        let other = Index::new("users", IndexKind::Unique, columns(&["email", "site"]));
        assert_ne!(unique.name(), plain.name());
        assert_ne!(unique.name(), other.name());
    }

    #[test]
    fn test_index_name_has_no_trailing_underscore() {
        let index = Index::new("users", IndexKind::FullText, columns(&["bio"]));
        assert_eq!(index.name(), "users_bio_fulltext");
        assert!(!index.name().ends_with('_'));
    }

    #[test]
    fn test_using_sets_algorithm() {
        let mut index = Index::new("users", IndexKind::Index, columns(&["age"]));
        assert_eq!(index.algorithm(), IndexAlgorithm::Default);
        index.using(IndexAlgorithm::Hash);
        assert_eq!(index.algorithm(), IndexAlgorithm::Hash);
        assert_eq!(index.algorithm().as_str(), "hash");
    }
}
