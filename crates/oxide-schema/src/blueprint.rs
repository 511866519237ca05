//! Table blueprints.
//!
//! A [`Blueprint`] collects the definitions of one table in one structural
//! [`Mode`]. Operations that must run as their own ALTER statement are queued
//! as child blueprints in alter mode, in the order they were requested, and
//! are compiled after the parent statement.
//!
//! # Example
//!
//! ```rust
//! use oxide_schema::{Blueprint, IndexAlgorithm};
//!
//! let users = Blueprint::new("users").create(|table| {
//!     table.id();
//!     table.string("username", 255).not_null().unique();
//!     table.integer("age").index_using(IndexAlgorithm::BTree);
//! });
//!
//! assert_eq!(users.definitions().len(), 3);
//! assert_eq!(users.children().len(), 2);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::column::{Column, ColumnBuilder};
use crate::definition::{Definition, DropColumn, RenameColumn};
use crate::error::{Result, SchemaError};
use crate::foreign_key::ForeignKey;
use crate::grammar::{self, Grammar};
use crate::index::{Index, IndexKind};
use crate::types::ColumnType;

/// Structural mode of a blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Create,
    Alter,
    Drop,
}

impl Mode {
    /// Returns the statement prefix for this mode.
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Create => "create table if not exists",
            Self::Alter => "alter table",
            Self::Drop => "drop table if exists",
        }
    }

    /// Lowercase name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Alter => "alter",
            Self::Drop => "drop",
        }
    }
}

impl FromStr for Mode {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "create" => Ok(Self::Create),
            "alter" => Ok(Self::Alter),
            "drop" => Ok(Self::Drop),
            other => Err(SchemaError::InvalidBlueprintMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// PendingBlueprint
// =============================================================================

/// A table name waiting for its mode.
///
/// Returned by [`Blueprint::new`]; choosing a mode runs the builder callback
/// and yields the [`Blueprint`].
#[derive(Debug, Clone)]
pub struct PendingBlueprint {
    table: String,
    grammar: Arc<dyn Grammar>,
}

impl PendingBlueprint {
    /// Compiles with the given grammar instead of the process default.
    #[must_use]
    pub fn grammar(mut self, grammar: Arc<dyn Grammar>) -> Self {
        self.grammar = grammar;
        self
    }

    /// Creates the table.
    #[must_use]
    pub fn create(self, callback: impl FnOnce(&mut Blueprint)) -> Blueprint {
        self.with_mode(Mode::Create, callback)
    }

    /// Alters the existing table.
    #[must_use]
    pub fn alter(self, callback: impl FnOnce(&mut Blueprint)) -> Blueprint {
        self.with_mode(Mode::Alter, callback)
    }

    /// Drops the table.
    #[must_use]
    pub fn drop(self, callback: impl FnOnce(&mut Blueprint)) -> Blueprint {
        self.with_mode(Mode::Drop, callback)
    }

    /// Fixes the mode, then runs the callback against the blueprint.
    #[must_use]
    pub fn with_mode(self, mode: Mode, callback: impl FnOnce(&mut Blueprint)) -> Blueprint {
        let mut blueprint = Blueprint::empty(self.table, mode, self.grammar);
        callback(&mut blueprint);
        blueprint
    }
}

// =============================================================================
// Blueprint
// =============================================================================

/// Definitions of one table in one mode, plus deferred child blueprints.
#[derive(Debug, Clone)]
pub struct Blueprint {
    mode: Mode,
    table: String,
    charset: Option<String>,
    collation: Option<String>,
    grammar: Arc<dyn Grammar>,
    definitions: Vec<Definition>,
    children: Vec<Blueprint>,
}

impl Blueprint {
    /// Starts a blueprint for `table` using the process default grammar.
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new(table: impl Into<String>) -> PendingBlueprint {
        PendingBlueprint {
            table: table.into(),
            grammar: grammar::default_grammar(),
        }
    }

    const fn empty(table: String, mode: Mode, grammar: Arc<dyn Grammar>) -> Self {
        Self {
            mode,
            table,
            charset: None,
            collation: None,
            grammar,
            definitions: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Table the blueprint applies to.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Structural mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Grammar used by [`Self::build`].
    #[must_use]
    pub fn grammar(&self) -> &dyn Grammar {
        self.grammar.as_ref()
    }

    /// Definitions in the order they were added.
    #[must_use]
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub(crate) fn definition_mut(&mut self, position: usize) -> Option<&mut Definition> {
        self.definitions.get_mut(position)
    }

    /// Child blueprints in the order they were queued.
    #[must_use]
    pub fn children(&self) -> &[Blueprint] {
        &self.children
    }

    /// Sets the character set for the table.
    pub fn charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.charset = Some(charset.into());
        self
    }

    /// Sets the collation for the table.
    pub fn collate(&mut self, collation: impl Into<String>) -> &mut Self {
        self.collation = Some(collation.into());
        self
    }

    /// Character set of the table, or the grammar default when unset.
    #[must_use]
    pub fn charset_or_default(&self) -> &str {
        self.charset
            .as_deref()
            .unwrap_or_else(|| self.grammar.default_charset())
    }

    /// Collation of the table, or the grammar default when unset.
    #[must_use]
    pub fn collation_or_default(&self) -> &str {
        self.collation
            .as_deref()
            .unwrap_or_else(|| self.grammar.default_collation())
    }

    /// Compiles the blueprint with its grammar.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while compiling this blueprint or any
    /// of its children.
    pub fn build(&self) -> Result<String> {
        self.grammar.build(self)
    }

    // =========================================================================
    // Child deferral
    // =========================================================================

    /// Queues a single definition as an alter-mode child on `table`.
    fn defer_on(&mut self, table: &str, definition: Definition) -> &mut Self {
        trace!(
            table = %table,
            parent = %self.table,
            definition = definition.kind(),
            "deferring definition to child blueprint"
        );
        let mut child = Self::empty(table.to_string(), Mode::Alter, Arc::clone(&self.grammar));
        child.definitions.push(definition);
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    fn defer(&mut self, definition: Definition) -> &mut Self {
        let table = self.table.clone();
        self.defer_on(&table, definition)
    }

    pub(crate) fn defer_index(&mut self, kind: IndexKind, columns: Vec<String>) -> &mut Index {
        let index = Index::new(self.table.clone(), kind, columns);
        match self.defer(index.into()).definitions.last_mut() {
            Some(Definition::Index(index)) => index,
            _ => unreachable!("deferred blueprint holds the index it was created with"),
        }
    }

    pub(crate) fn defer_foreign_key(&mut self, column: &str) -> &mut ForeignKey {
        let foreign_key = ForeignKey::new(column, self.table.clone());
        match self.defer(foreign_key.into()).definitions.last_mut() {
            Some(Definition::ForeignKey(foreign_key)) => foreign_key,
            _ => unreachable!("deferred blueprint holds the foreign key it was created with"),
        }
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Appends a column and returns a fluent handle on it.
    pub fn add_column(&mut self, column: Column) -> ColumnBuilder<'_> {
        self.definitions.push(Definition::Column(column));
        let position = self.definitions.len() - 1;
        ColumnBuilder::new(self, position)
    }

    fn column(&mut self, name: &str, column_type: ColumnType, length: u32) -> ColumnBuilder<'_> {
        self.add_column(Column::new(name, column_type, length))
    }

    /// Auto-incrementing unsigned big integer primary key named `id`.
    pub fn id(&mut self) -> ColumnBuilder<'_> {
        let mut column = self.big_integer("id");
        column.unsigned().primary().auto_increment().not_null();
        column
    }

    /// `varchar(length)` column.
    pub fn string(&mut self, name: &str, length: u32) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Varchar, length)
    }

    /// `char(length)` column.
    pub fn char(&mut self, name: &str, length: u32) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Char, length)
    }

    /// `text` column.
    pub fn text(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Text, 0)
    }

    /// `mediumtext` column.
    pub fn medium_text(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::MediumText, 0)
    }

    /// `longtext` column.
    pub fn long_text(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::LongText, 0)
    }

    /// `integer(11)` column.
    pub fn integer(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Integer, 11)
    }

    /// `tinyint(4)` column.
    pub fn tiny_integer(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::TinyInt, 4)
    }

    /// `smallint(6)` column.
    pub fn small_integer(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::SmallInt, 6)
    }

    /// `mediumint(9)` column.
    pub fn medium_integer(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::MediumInt, 9)
    }

    /// `bigint` column.
    pub fn big_integer(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::BigInt, 0)
    }

    /// `float(8)` column.
    pub fn float(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Float, 8)
    }

    /// `double(16)` column.
    pub fn double(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Double, 16)
    }

    /// `decimal(precision,scale)` column.
    pub fn decimal(&mut self, name: &str, precision: u32, scale: u32) -> ColumnBuilder<'_> {
        let mut column = self.column(name, ColumnType::Decimal, 9);
        column.precision(precision).scale(scale);
        column
    }

    /// `tinyint(1)` column.
    pub fn boolean(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::TinyInt, 1)
    }

    /// Enum column over `values`, in order.
    pub fn enumeration<I, S>(&mut self, name: &str, values: I) -> ColumnBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut column = self.column(name, ColumnType::Enum, 0);
        column.values(values);
        column
    }

    /// Set column over `values`, in order.
    pub fn set<I, S>(&mut self, name: &str, values: I) -> ColumnBuilder<'_>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut column = self.column(name, ColumnType::Set, 0);
        column.values(values);
        column
    }

    /// `json` column.
    pub fn json(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Json, 0)
    }

    /// `date` column.
    pub fn date(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Date, 0)
    }

    /// `datetime` column.
    pub fn date_time(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::DateTime, 0)
    }

    /// `time` column.
    pub fn time(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Time, 0)
    }

    /// `timestamp` column.
    pub fn timestamp(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Timestamp, 0)
    }

    /// `binary` column.
    pub fn binary(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::Binary, 0)
    }

    /// `varbinary` column.
    pub fn var_binary(&mut self, name: &str) -> ColumnBuilder<'_> {
        self.column(name, ColumnType::VarBinary, 0)
    }

    /// Adds `created_at` and `updated_at` timestamps maintained by the
    /// database.
    pub fn timestamps(&mut self) {
        self.timestamp("created_at").default("CURRENT_TIMESTAMP");
        self.timestamp("updated_at")
            .default("CURRENT_TIMESTAMP on update CURRENT_TIMESTAMP");
    }

    /// Adds a nullable `deleted_at` timestamp.
    pub fn soft_deletes(&mut self) {
        self.timestamp("deleted_at").nullable();
    }

    /// Adds an unsigned big integer column and queues a foreign key on it.
    ///
    /// The foreign key discovers its target from the column name unless
    /// [`ForeignKey::on`] is called before the blueprint is built.
    pub fn foreign_id(&mut self, name: &str) -> (&mut ForeignKey, &mut Column) {
        self.big_integer(name).unsigned();
        self.defer_foreign_key(name);

        let Some(Definition::Column(column)) = self.definitions.last_mut() else {
            unreachable!("foreign id column was just appended")
        };
        let Some(Definition::ForeignKey(foreign_key)) = self
            .children
            .last_mut()
            .and_then(|child| child.definitions.last_mut())
        else {
            unreachable!("foreign key child was just queued")
        };
        (foreign_key, column)
    }

    // =========================================================================
    // Indexes
    // =========================================================================

    /// Queues a primary key over `columns`.
    pub fn primary(&mut self, columns: &[&str]) -> &mut Index {
        self.defer_index(IndexKind::Primary, to_owned(columns))
    }

    /// Queues a unique index over `columns`.
    pub fn unique(&mut self, columns: &[&str]) -> &mut Index {
        self.defer_index(IndexKind::Unique, to_owned(columns))
    }

    /// Queues a plain index over `columns`.
    pub fn index(&mut self, columns: &[&str]) -> &mut Index {
        self.defer_index(IndexKind::Index, to_owned(columns))
    }

    /// Queues a spatial index over `columns`.
    pub fn spatial_index(&mut self, columns: &[&str]) -> &mut Index {
        self.defer_index(IndexKind::Spatial, to_owned(columns))
    }

    /// Queues a full-text index over `columns`.
    pub fn full_text(&mut self, columns: &[&str]) -> &mut Index {
        self.defer_index(IndexKind::FullText, to_owned(columns))
    }

    // =========================================================================
    // Renames and drops
    // =========================================================================

    /// Renames a column. Alter blueprints take the rename inline; other modes
    /// queue it as a child.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        let rename = RenameColumn::new(from, to);
        if self.mode == Mode::Alter {
            self.definitions.push(rename.into());
            return;
        }
        self.defer(rename.into());
    }

    /// Queues dropping `column` from `table`.
    pub fn drop_column(&mut self, table: &str, column: &str) {
        self.defer_on(table, DropColumn::new(column).into());
    }
}

fn to_owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|&s| s.to_string()).collect()
}
