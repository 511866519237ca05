//! Error types for blueprint compilation.

/// Errors that can occur while compiling blueprints to SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The grammar does not support a definition variant or statement.
    #[error("{grammar} grammar: {method} not implemented")]
    Unimplemented {
        /// Name of the grammar that was asked to compile.
        grammar: &'static str,
        /// The grammar method that has no implementation.
        method: &'static str,
    },

    /// A foreign key has no referenced table or column after discovery.
    #[error("foreign key on `{table}`.`{column}`: referenced column and table are required")]
    MissingForeignKeyReference {
        /// Table owning the foreign key column.
        table: String,
        /// The foreign key column.
        column: String,
    },

    /// A blueprint mode outside create, alter and drop.
    #[error("invalid blueprint mode given: {0}")]
    InvalidBlueprintMode(String),
}

impl SchemaError {
    /// Creates an [`SchemaError::Unimplemented`] for a grammar method.
    #[must_use]
    pub const fn unimplemented(grammar: &'static str, method: &'static str) -> Self {
        Self::Unimplemented { grammar, method }
    }
}

/// Result type for blueprint compilation.
pub type Result<T> = std::result::Result<T, SchemaError>;
