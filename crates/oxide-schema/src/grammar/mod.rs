//! SQL grammars.
//!
//! A [`Grammar`] knows how to render every definition node and how to
//! assemble a whole [`Blueprint`] into statements. Every method has a
//! default that returns [`SchemaError::Unimplemented`], so a grammar only
//! overrides what its database supports.

mod mysql;

pub use mysql::{MySqlConfig, MySqlGrammar};

use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::blueprint::Blueprint;
use crate::column::Column;
use crate::definition::{
    AutoIncrement, Comment, DefaultValue, DropColumn, EnumValues, Nullable, RenameColumn,
};
use crate::error::{Result, SchemaError};
use crate::foreign_key::ForeignKey;
use crate::index::Index;

static DEFAULT_GRAMMAR: LazyLock<Arc<dyn Grammar>> =
    LazyLock::new(|| Arc::new(MySqlGrammar::new()));

/// Returns the process-wide default grammar, [`MySqlGrammar`].
#[must_use]
pub fn default_grammar() -> Arc<dyn Grammar> {
    Arc::clone(&DEFAULT_GRAMMAR)
}

/// Dialect-specific rendering of blueprints.
pub trait Grammar: fmt::Debug + Send + Sync {
    /// Returns the grammar name.
    #[must_use]
    fn name(&self) -> &'static str;

    /// Character set used when a blueprint sets none.
    #[must_use]
    fn default_charset(&self) -> &str {
        "utf8mb4"
    }

    /// Collation used when a blueprint sets none.
    #[must_use]
    fn default_collation(&self) -> &str {
        "utf8mb4_unicode_ci"
    }

    /// Compiles a blueprint, children included, into statements.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn build(&self, _blueprint: &Blueprint) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "build"))
    }

    /// Compiles a create-database statement.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_create_database(&self, _database: &str) -> Result<String> {
        Err(SchemaError::unimplemented(
            self.name(),
            "compile_create_database",
        ))
    }

    /// Compiles a drop-database statement.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_drop_database(&self, _database: &str) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_drop_database"))
    }

    /// Body of a create statement, following the table name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_create_table(&self, _blueprint: &Blueprint) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_create_table"))
    }

    /// Body of an alter statement, following the table name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_alter_table(&self, _blueprint: &Blueprint) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_alter_table"))
    }

    /// Body of a drop statement, following the table name.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_drop_table(&self, _blueprint: &Blueprint) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_drop_table"))
    }

    /// Compiles a column clause.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_column(&self, _column: &Column) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_column"))
    }

    /// Compiles the auto-increment marker of a column.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_auto_increment(&self, _marker: &AutoIncrement) -> Result<String> {
        Err(SchemaError::unimplemented(
            self.name(),
            "compile_auto_increment",
        ))
    }

    /// Compiles the raw default value of a column.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_default_value(&self, _value: &DefaultValue) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_default_value"))
    }

    /// Compiles a column comment.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_comment(&self, _comment: &Comment) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_comment"))
    }

    /// Compiles the nullability of a column.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_nullable(&self, _nullable: &Nullable) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_nullable"))
    }

    /// Compiles the value list of an enum or set column.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_enum_values(&self, _values: &EnumValues) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_enum_values"))
    }

    /// Compiles an index clause.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_index(&self, _index: &Index) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_index"))
    }

    /// Compiles a foreign key whose references have already been discovered.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_foreign_key(&self, _foreign_key: &ForeignKey) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_foreign_key"))
    }

    /// Compiles a column rename clause.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_rename_column(&self, _rename: &RenameColumn) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_rename_column"))
    }

    /// Compiles a column drop clause.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Unimplemented`] unless the grammar overrides it.
    fn compile_drop_column(&self, _drop: &DropColumn) -> Result<String> {
        Err(SchemaError::unimplemented(self.name(), "compile_drop_column"))
    }
}
