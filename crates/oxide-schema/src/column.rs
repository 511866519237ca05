//! Column definitions and the fluent column builder.

use crate::blueprint::Blueprint;
use crate::definition::{
    AutoIncrement, Comment, Definition, DefaultValue, EnumKind, EnumValues, Nullable, Render,
};
use crate::error::Result;
use crate::foreign_key::ForeignKey;
use crate::grammar::Grammar;
use crate::index::{IndexAlgorithm, IndexKind};
use crate::types::ColumnType;

/// Default value that marks a column nullable instead of setting a default.
pub const NULL_DEFAULT: &str = "NULL";

/// A table column.
///
/// Optional parts are `None` until set; the grammar renders only the parts
/// that are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    data_type: ColumnType,
    length: u32,
    precision: u32,
    scale: u32,
    unsigned: bool,
    primary: bool,
    auto_increment: Option<AutoIncrement>,
    nullable: Option<Nullable>,
    default_value: Option<DefaultValue>,
    comment: Option<Comment>,
    enum_values: Option<EnumValues>,
}

impl Column {
    /// Creates a column with a name, a type and a length (0 for none).
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType, length: u32) -> Self {
        Self {
            name: name.into(),
            data_type: column_type,
            length,
            precision: 0,
            scale: 0,
            unsigned: false,
            primary: false,
            auto_increment: None,
            nullable: None,
            default_value: None,
            comment: None,
            enum_values: None,
        }
    }

    /// Column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logical type tag.
    #[must_use]
    pub const fn column_type(&self) -> ColumnType {
        self.data_type
    }

    /// Display length, 0 when unset.
    #[must_use]
    pub const fn length_value(&self) -> u32 {
        self.length
    }

    /// Numeric precision, 0 when unset.
    #[must_use]
    pub const fn precision_value(&self) -> u32 {
        self.precision
    }

    /// Numeric scale.
    #[must_use]
    pub const fn scale_value(&self) -> u32 {
        self.scale
    }

    /// Whether the column is unsigned.
    #[must_use]
    pub const fn is_unsigned(&self) -> bool {
        self.unsigned
    }

    /// Whether the column is the primary key.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.primary
    }

    /// Auto-increment marker, if set.
    #[must_use]
    pub const fn auto_increments(&self) -> Option<&AutoIncrement> {
        self.auto_increment.as_ref()
    }

    /// Nullability, if set explicitly.
    #[must_use]
    pub const fn nullability(&self) -> Option<&Nullable> {
        self.nullable.as_ref()
    }

    /// Default value, if any.
    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.default_value.as_ref()
    }

    /// Column comment, if any.
    #[must_use]
    pub const fn comment_value(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }

    /// Allowed values of an enum or set column.
    #[must_use]
    pub const fn enum_values(&self) -> Option<&EnumValues> {
        self.enum_values.as_ref()
    }

    /// Marks the column as auto-incrementing.
    pub const fn auto_increment(&mut self) -> &mut Self {
        self.auto_increment = Some(AutoIncrement);
        self
    }

    /// Sets the display length.
    pub const fn length(&mut self, length: u32) -> &mut Self {
        self.length = length;
        self
    }

    /// Sets the precision of a numeric column.
    pub const fn precision(&mut self, precision: u32) -> &mut Self {
        self.precision = precision;
        self
    }

    /// Sets the scale of a numeric column.
    pub const fn scale(&mut self, scale: u32) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Sets the default value.
    ///
    /// Any value other than `"NULL"` also marks the column NOT NULL. `"NULL"`
    /// marks it nullable and clears the default instead. Later nullability
    /// calls override what this sets.
    pub fn default(&mut self, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if value == NULL_DEFAULT {
            self.default_value = None;
            return self.nullable();
        }
        self.default_value = Some(DefaultValue::new(value));
        self.not_null()
    }

    /// Shorthand for `default("NULL")`.
    pub fn default_null(&mut self) -> &mut Self {
        self.default(NULL_DEFAULT)
    }

    /// Allows NULL values.
    pub const fn nullable(&mut self) -> &mut Self {
        self.nullable = Some(Nullable::new(true));
        self
    }

    /// Rejects NULL values.
    pub const fn not_null(&mut self) -> &mut Self {
        self.nullable = Some(Nullable::new(false));
        self
    }

    /// Marks the column unsigned.
    pub const fn unsigned(&mut self) -> &mut Self {
        self.unsigned = true;
        self
    }

    /// Marks the column as the primary key.
    pub const fn primary(&mut self) -> &mut Self {
        self.primary = true;
        self
    }

    /// Sets the column comment.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.comment = Some(Comment::new(text));
        self
    }

    /// Sets the allowed values, rendered as `set(...)` on set columns and as
    /// `enum(...)` otherwise.
    pub fn values<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kind = if self.data_type == ColumnType::Set {
            EnumKind::Set
        } else {
            EnumKind::Enum
        };
        self.enum_values = Some(EnumValues::new(
            kind,
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }
}

impl Render for Column {
    fn render(&self, grammar: &dyn Grammar) -> Result<String> {
        grammar.compile_column(self)
    }
}

// =============================================================================
// ColumnBuilder
// =============================================================================

/// Fluent handle on a column owned by a [`Blueprint`].
///
/// The handle refers to the column by its position in the blueprint, so the
/// blueprint stays the only owner. Modifiers that need their own ALTER
/// statement (`unique`, `index`, `foreign_key`) queue a child blueprint on
/// the owner instead of touching the column.
#[derive(Debug)]
pub struct ColumnBuilder<'a> {
    blueprint: &'a mut Blueprint,
    position: usize,
}

impl<'a> ColumnBuilder<'a> {
    pub(crate) const fn new(blueprint: &'a mut Blueprint, position: usize) -> Self {
        Self {
            blueprint,
            position,
        }
    }

    /// Returns the column this handle points at.
    #[must_use]
    pub fn column(&self) -> &Column {
        match &self.blueprint.definitions()[self.position] {
            Definition::Column(column) => column,
            _ => unreachable!("column builder points at a column definition"),
        }
    }

    fn column_mut(&mut self) -> &mut Column {
        match self.blueprint.definition_mut(self.position) {
            Some(Definition::Column(column)) => column,
            _ => unreachable!("column builder points at a column definition"),
        }
    }

    /// Releases the handle and returns the column.
    #[must_use]
    pub fn into_column(self) -> &'a mut Column {
        let Self {
            blueprint,
            position,
        } = self;
        match blueprint.definition_mut(position) {
            Some(Definition::Column(column)) => column,
            _ => unreachable!("column builder points at a column definition"),
        }
    }

    /// See [`Column::auto_increment`].
    pub fn auto_increment(&mut self) -> &mut Self {
        self.column_mut().auto_increment();
        self
    }

    /// See [`Column::length`].
    pub fn length(&mut self, length: u32) -> &mut Self {
        self.column_mut().length(length);
        self
    }

    /// See [`Column::precision`].
    pub fn precision(&mut self, precision: u32) -> &mut Self {
        self.column_mut().precision(precision);
        self
    }

    /// See [`Column::scale`].
    pub fn scale(&mut self, scale: u32) -> &mut Self {
        self.column_mut().scale(scale);
        self
    }

    /// See [`Column::default`].
    pub fn default(&mut self, value: impl Into<String>) -> &mut Self {
        self.column_mut().default(value);
        self
    }

    /// See [`Column::default_null`].
    pub fn default_null(&mut self) -> &mut Self {
        self.column_mut().default_null();
        self
    }

    /// See [`Column::nullable`].
    pub fn nullable(&mut self) -> &mut Self {
        self.column_mut().nullable();
        self
    }

    /// See [`Column::not_null`].
    pub fn not_null(&mut self) -> &mut Self {
        self.column_mut().not_null();
        self
    }

    /// See [`Column::unsigned`].
    pub fn unsigned(&mut self) -> &mut Self {
        self.column_mut().unsigned();
        self
    }

    /// See [`Column::primary`].
    pub fn primary(&mut self) -> &mut Self {
        self.column_mut().primary();
        self
    }

    /// See [`Column::comment`].
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.column_mut().comment(text);
        self
    }

    /// See [`Column::values`].
    pub fn values<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.column_mut().values(values);
        self
    }

    /// Queues a unique index on this column.
    pub fn unique(&mut self) -> &mut Self {
        self.queue_index(IndexKind::Unique, IndexAlgorithm::Default)
    }

    /// Queues a plain index on this column.
    pub fn index(&mut self) -> &mut Self {
        self.queue_index(IndexKind::Index, IndexAlgorithm::Default)
    }

    /// Queues a plain index on this column using the given algorithm.
    pub fn index_using(&mut self, algorithm: IndexAlgorithm) -> &mut Self {
        self.queue_index(IndexKind::Index, algorithm)
    }

    /// Queues a foreign key on this column and returns it for configuration.
    pub fn foreign_key(&mut self) -> &mut ForeignKey {
        let name = self.column().name().to_string();
        self.blueprint.defer_foreign_key(&name)
    }

    fn queue_index(&mut self, kind: IndexKind, algorithm: IndexAlgorithm) -> &mut Self {
        let name = self.column().name().to_string();
        self.blueprint.defer_index(kind, vec![name]).using(algorithm);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_has_no_markers() {
        let column = Column::new("title", ColumnType::Varchar, 255);
        assert!(column.nullability().is_none());
        assert!(column.default_value().is_none());
        assert!(column.auto_increments().is_none());
        assert!(!column.is_primary());
        assert!(!column.is_unsigned());
    }

    #[test]
    fn test_default_forces_not_null() {
        let mut column = Column::new("role", ColumnType::Varchar, 32);
        column.nullable().default("member");
        assert_eq!(column.nullability(), Some(&Nullable::new(false)));
        assert_eq!(column.default_value().map(DefaultValue::get), Some("member"));
    }

    #[test]
    fn test_null_default_marks_nullable_and_clears_default() {
        let mut column = Column::new("role", ColumnType::Varchar, 32);
        column.default("member").default_null();
        assert_eq!(column.nullability(), Some(&Nullable::new(true)));
        assert!(column.default_value().is_none());
    }

    #[test]
    fn test_later_nullability_call_wins() {
        let mut column = Column::new("role", ColumnType::Varchar, 32);
        column.default("member").nullable();
        assert_eq!(column.nullability(), Some(&Nullable::new(true)));
        assert!(column.default_value().is_some());
    }

    #[test]
    fn test_builder_modifiers_chain_on_the_owned_column() {
        let blueprint = Blueprint::new("products").create(|t| {
            t.string("sku", 32).not_null().comment("stock unit").unique();
            let mut price = t.decimal("price", 10, 2);
            price.unsigned();
            price.default("0.00");
            t.integer("stock").into_column().default("0");
        });

        let sku = blueprint.definitions()[0].as_column().unwrap();
        assert_eq!(sku.nullability(), Some(&Nullable::new(false)));
        assert_eq!(sku.comment_value().map(Comment::get), Some("stock unit"));
        assert_eq!(blueprint.children().len(), 1);

        let price = blueprint.definitions()[1].as_column().unwrap();
        assert!(price.is_unsigned());
        assert_eq!(price.precision_value(), 10);
        assert_eq!(price.scale_value(), 2);
        assert_eq!(price.default_value().map(DefaultValue::get), Some("0.00"));

        let stock = blueprint.definitions()[2].as_column().unwrap();
        assert_eq!(stock.default_value().map(DefaultValue::get), Some("0"));
    }

    #[test]
    fn test_values_follow_column_type() {
        let mut flags = Column::new("flags", ColumnType::Set, 0);
        flags.values(["a", "b"]);
        assert_eq!(flags.enum_values().map(EnumValues::kind), Some(EnumKind::Set));

        let mut status = Column::new("status", ColumnType::Enum, 0);
        status.values(vec!["on".to_string()]);
        assert_eq!(
            status.enum_values().map(EnumValues::kind),
            Some(EnumKind::Enum)
        );
    }
}
