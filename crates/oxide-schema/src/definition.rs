//! Blueprint intermediate representation.
//!
//! Every node knows how to render itself through a [`Grammar`]: it forwards
//! to exactly one `compile_*` method of the grammar. Composite nodes such as
//! [`Column`] let the grammar render their parts through the same contract.

use crate::column::Column;
use crate::error::Result;
use crate::foreign_key::ForeignKey;
use crate::grammar::Grammar;
use crate::index::Index;

/// A node that renders itself through a grammar.
pub trait Render {
    /// Renders the node as SQL text.
    ///
    /// # Errors
    ///
    /// Returns the grammar's error unchanged, e.g. when the grammar does not
    /// implement this node.
    fn render(&self, grammar: &dyn Grammar) -> Result<String>;
}

/// A top-level entry of a blueprint.
#[derive(Debug, Clone)]
pub enum Definition {
    /// A column; additive in alter mode.
    Column(Column),
    /// An index clause.
    Index(Index),
    /// A foreign key constraint clause.
    ForeignKey(ForeignKey),
    /// A column rename clause.
    RenameColumn(RenameColumn),
    /// A column drop clause.
    DropColumn(DropColumn),
}

impl Definition {
    /// Short name of the variant, used in log events.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Column(_) => "column",
            Self::Index(_) => "index",
            Self::ForeignKey(_) => "foreign_key",
            Self::RenameColumn(_) => "rename_column",
            Self::DropColumn(_) => "drop_column",
        }
    }

    /// Returns the column if this is a column definition.
    #[must_use]
    pub const fn as_column(&self) -> Option<&Column> {
        match self {
            Self::Column(column) => Some(column),
            _ => None,
        }
    }
}

impl Render for Definition {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        match self {
            Self::Column(column) => column.render(grammar),
            Self::Index(index) => index.render(grammar),
            Self::ForeignKey(foreign_key) => foreign_key.render(grammar),
            Self::RenameColumn(rename) => rename.render(grammar),
            Self::DropColumn(drop) => drop.render(grammar),
        }
    }
}

impl From<Column> for Definition {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<Index> for Definition {
    fn from(index: Index) -> Self {
        Self::Index(index)
    }
}

impl From<ForeignKey> for Definition {
    fn from(foreign_key: ForeignKey) -> Self {
        Self::ForeignKey(foreign_key)
    }
}

impl From<RenameColumn> for Definition {
    fn from(rename: RenameColumn) -> Self {
        Self::RenameColumn(rename)
    }
}

impl From<DropColumn> for Definition {
    fn from(drop: DropColumn) -> Self {
        Self::DropColumn(drop)
    }
}

// =============================================================================
// Column parts
// =============================================================================

/// Marks a column as auto-incrementing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutoIncrement;

impl Render for AutoIncrement {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        grammar.compile_auto_increment(self)
    }
}

/// Nullability of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nullable {
    is: bool,
}

impl Nullable {
    /// Creates the marker; `true` allows NULL.
    #[must_use]
    pub const fn new(is: bool) -> Self {
        Self { is }
    }

    /// Whether the column accepts NULL.
    #[must_use]
    pub const fn is(self) -> bool {
        self.is
    }
}

impl Render for Nullable {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        grammar.compile_nullable(self)
    }
}

/// Raw default value of a column.
///
/// The value is stored exactly as given; the grammar decides on quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultValue {
    value: String,
}

impl DefaultValue {
    /// Wraps a raw default value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The raw default value.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.value
    }
}

impl Render for DefaultValue {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        grammar.compile_default_value(self)
    }
}

/// Column comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    text: String,
}

impl Comment {
    /// Wraps a comment text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The comment text.
    #[must_use]
    pub fn get(&self) -> &str {
        &self.text
    }
}

impl Render for Comment {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        grammar.compile_comment(self)
    }
}

/// Whether an [`EnumValues`] list describes an enum or a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    Enum,
    Set,
}

impl EnumKind {
    /// SQL keyword of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enum => "enum",
            Self::Set => "set",
        }
    }
}

/// Ordered list of allowed values for enum and set columns.
///
/// Order is preserved in the rendered type. An empty list is allowed and
/// renders an empty enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValues {
    kind: EnumKind,
    values: Vec<String>,
}

impl EnumValues {
    /// Creates a value list of the given kind.
    #[must_use]
    pub const fn new(kind: EnumKind, values: Vec<String>) -> Self {
        Self { kind, values }
    }

    /// Whether the list renders as an enum or a set.
    #[must_use]
    pub const fn kind(&self) -> EnumKind {
        self.kind
    }

    /// Allowed values, in declaration order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Render for EnumValues {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        grammar.compile_enum_values(self)
    }
}

// =============================================================================
// Alter clauses
// =============================================================================

/// Renames a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameColumn {
    from: String,
    to: String,
}

impl RenameColumn {
    /// Renames `from` to `to`.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Current column name.
    #[must_use]
    pub fn from(&self) -> &str {
        &self.from
    }

    /// New column name.
    #[must_use]
    pub fn to(&self) -> &str {
        &self.to
    }
}

impl Render for RenameColumn {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        grammar.compile_rename_column(self)
    }
}

/// Drops a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropColumn {
    column: String,
}

impl DropColumn {
    /// Drops `column`.
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }

    /// Column to drop.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }
}

impl Render for DropColumn {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        grammar.compile_drop_column(self)
    }
}
