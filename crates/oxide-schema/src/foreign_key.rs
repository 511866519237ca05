//! Foreign key constraints.
//!
//! A foreign key created without an explicit target discovers one from its
//! column name the first time it is rendered: `user_id` references `users`
//! (`id`). The first name segment is pluralized into the table, the rest of
//! the segments form the referenced column.

use std::cell::OnceCell;

use inflector::string::pluralize::to_plural;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::definition::Render;
use crate::error::Result;
use crate::grammar::Grammar;

/// Referential action on delete or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForeignKeyAction {
    #[serde(rename = "no action")]
    NoAction,
    #[serde(rename = "cascade")]
    Cascade,
    #[serde(rename = "set null")]
    SetNull,
    #[serde(rename = "set default")]
    SetDefault,
    #[serde(rename = "restrict")]
    Restrict,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "no action",
            Self::Cascade => "cascade",
            Self::SetNull => "set null",
            Self::SetDefault => "set default",
            Self::Restrict => "restrict",
        }
    }
}

/// Singular nouns whose plural the inflection rules get wrong, checked before
/// pluralizing a discovered table name.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("louse", "lice"),
    ("man", "men"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Pluralizes a table stem such as `user` or `person`.
fn pluralize(stem: &str) -> String {
    IRREGULAR_PLURALS
        .iter()
        .find(|(singular, _)| *singular == stem)
        .map_or_else(|| to_plural(stem), |(_, plural)| (*plural).to_string())
}

/// Table and column a foreign key points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// Referenced table.
    pub table: String,
    /// Referenced column.
    pub column: String,
}

impl Reference {
    /// Creates a reference to `table`.`column`.
    #[must_use]
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Derives the reference from a column name such as `user_id`.
    ///
    /// An empty first segment (as in `_id`) yields an empty table.
    #[must_use]
    pub fn discover(column: &str) -> Self {
        let mut parts = column.split('_');
        let stem = parts.next().unwrap_or_default();
        let rest: Vec<&str> = parts.collect();
        let table = if stem.is_empty() {
            String::new()
        } else {
            pluralize(stem)
        };
        Self {
            table,
            column: rest.join("_"),
        }
    }

    /// Whether both the table and the column are known.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.table.is_empty() && !self.column.is_empty()
    }
}

/// A foreign key constraint on a single column.
#[derive(Debug, Clone)]
pub struct ForeignKey {
    table: String,
    column: String,
    auto_discover: bool,
    on_delete: Option<ForeignKeyAction>,
    on_update: Option<ForeignKeyAction>,
    explicit: Option<Reference>,
    discovered: OnceCell<Reference>,
}

impl ForeignKey {
    /// Creates a foreign key on `table`.`column` with discovery enabled.
    #[must_use]
    pub fn new(column: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            auto_discover: true,
            on_delete: None,
            on_update: None,
            explicit: None,
            discovered: OnceCell::new(),
        }
    }

    /// Sets the referenced table and column explicitly.
    pub fn on(&mut self, table: impl Into<String>, column: impl Into<String>) -> &mut Self {
        self.explicit = Some(Reference::new(table, column));
        self
    }

    /// Turns off discovery; the reference must then be set with [`Self::on`].
    pub const fn disable_discovery(&mut self) -> &mut Self {
        self.auto_discover = false;
        self
    }

    /// Sets the action taken when the referenced row is deleted.
    pub const fn on_delete(&mut self, action: ForeignKeyAction) -> &mut Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the action taken when the referenced key is updated.
    pub const fn on_update(&mut self, action: ForeignKeyAction) -> &mut Self {
        self.on_update = Some(action);
        self
    }

    /// Cascades on deletes of the referenced row.
    pub const fn cascade_on_delete(&mut self) -> &mut Self {
        self.on_delete(ForeignKeyAction::Cascade)
    }

    /// Cascades on updates of the referenced row.
    pub const fn cascade_on_update(&mut self) -> &mut Self {
        self.on_update(ForeignKeyAction::Cascade)
    }

    /// Sets the column to NULL on deletes of the referenced row.
    pub const fn set_null_on_delete(&mut self) -> &mut Self {
        self.on_delete(ForeignKeyAction::SetNull)
    }

    /// Sets the column to NULL on updates of the referenced row.
    pub const fn set_null_on_update(&mut self) -> &mut Self {
        self.on_update(ForeignKeyAction::SetNull)
    }

    /// Rejects the change on deletes of the referenced row.
    pub const fn restrict_on_delete(&mut self) -> &mut Self {
        self.on_delete(ForeignKeyAction::Restrict)
    }

    /// Rejects the change on updates of the referenced row.
    pub const fn restrict_on_update(&mut self) -> &mut Self {
        self.on_update(ForeignKeyAction::Restrict)
    }

    /// Takes no action on deletes of the referenced row.
    pub const fn no_action_on_delete(&mut self) -> &mut Self {
        self.on_delete(ForeignKeyAction::NoAction)
    }

    /// Takes no action on updates of the referenced row.
    pub const fn no_action_on_update(&mut self) -> &mut Self {
        self.on_update(ForeignKeyAction::NoAction)
    }

    /// Sets the column to its default on deletes of the referenced row.
    pub const fn set_default_on_delete(&mut self) -> &mut Self {
        self.on_delete(ForeignKeyAction::SetDefault)
    }

    /// Sets the column to its default on updates of the referenced row.
    pub const fn set_default_on_update(&mut self) -> &mut Self {
        self.on_update(ForeignKeyAction::SetDefault)
    }

    /// Table owning the foreign key column.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The foreign key column.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Action on delete, if one was set.
    #[must_use]
    pub const fn on_delete_action(&self) -> Option<ForeignKeyAction> {
        self.on_delete
    }

    /// Action on update, if one was set.
    #[must_use]
    pub const fn on_update_action(&self) -> Option<ForeignKeyAction> {
        self.on_update
    }

    /// Resolves the reference from the column name unless a complete one was
    /// set explicitly. Discovery runs at most once; later calls return the
    /// same reference.
    #[must_use]
    pub fn discover_references(&self) -> Option<&Reference> {
        if let Some(explicit) = self.explicit.as_ref().filter(|r| r.is_complete()) {
            return Some(explicit);
        }
        if !self.auto_discover {
            return self.explicit.as_ref();
        }
        Some(self.discovered.get_or_init(|| {
            let reference = Reference::discover(&self.column);
            debug!(
                table = %self.table,
                column = %self.column,
                references = %reference.table,
                referenced_column = %reference.column,
                "discovered foreign key reference"
            );
            reference
        }))
    }

    fn reference(&self) -> Option<&Reference> {
        self.explicit
            .as_ref()
            .filter(|r| r.is_complete())
            .or_else(|| self.discovered.get())
            .or(self.explicit.as_ref())
    }

    /// Referenced table, empty until set or discovered.
    #[must_use]
    pub fn referenced_table(&self) -> &str {
        self.reference().map_or("", |r| r.table.as_str())
    }

    /// Referenced column, empty until set or discovered.
    #[must_use]
    pub fn referenced_column(&self) -> &str {
        self.reference().map_or("", |r| r.column.as_str())
    }
}

impl Render for ForeignKey {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        let _ = self.discover_references();
        grammar.compile_foreign_key(self)
    }
}
