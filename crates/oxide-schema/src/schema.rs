//! Schema registry.
//!
//! A [`Schema`] accumulates blueprints and compiles them in registration
//! order, one statement block per blueprint.

use std::sync::Arc;

use tracing::debug;

use crate::blueprint::Blueprint;
use crate::error::Result;
use crate::grammar::{self, Grammar};

/// Accumulates blueprints compiled with one grammar.
#[derive(Debug, Clone)]
pub struct Schema {
    grammar: Arc<dyn Grammar>,
    blueprints: Vec<Blueprint>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(grammar::default_grammar())
    }
}

impl Schema {
    /// Creates an empty schema compiled with `grammar`.
    #[must_use]
    pub fn new(grammar: Arc<dyn Grammar>) -> Self {
        Self {
            grammar,
            blueprints: Vec::new(),
        }
    }

    /// Grammar shared by every registered blueprint.
    #[must_use]
    pub fn grammar(&self) -> &dyn Grammar {
        self.grammar.as_ref()
    }

    /// Blueprints registered since the last successful build.
    #[must_use]
    pub fn blueprints(&self) -> &[Blueprint] {
        &self.blueprints
    }

    /// Registers a table creation.
    pub fn create(&mut self, table: &str, callback: impl FnOnce(&mut Blueprint)) -> &mut Self {
        let blueprint = Blueprint::new(table)
            .grammar(Arc::clone(&self.grammar))
            .create(callback);
        self.blueprints.push(blueprint);
        self
    }

    /// Registers a table alteration.
    pub fn alter(&mut self, table: &str, callback: impl FnOnce(&mut Blueprint)) -> &mut Self {
        let blueprint = Blueprint::new(table)
            .grammar(Arc::clone(&self.grammar))
            .alter(callback);
        self.blueprints.push(blueprint);
        self
    }

    /// Registers dropping a table.
    pub fn drop(&mut self, table: &str) -> &mut Self {
        let blueprint = Blueprint::new(table)
            .grammar(Arc::clone(&self.grammar))
            .drop(|_| {});
        self.blueprints.push(blueprint);
        self
    }

    /// Compiles every registered blueprint, one block per line.
    ///
    /// The registry is emptied only when every blueprint compiled.
    ///
    /// # Errors
    ///
    /// Returns the first compilation error; the registered blueprints are
    /// kept in that case.
    pub fn build(&mut self) -> Result<String> {
        debug!(
            blueprints = self.blueprints.len(),
            grammar = self.grammar.name(),
            "building schema"
        );
        let mut statements = Vec::with_capacity(self.blueprints.len());
        for blueprint in &self.blueprints {
            let sql = blueprint.build()?;
            if !sql.is_empty() {
                statements.push(sql);
            }
        }
        self.blueprints.clear();
        Ok(statements.join("\n"))
    }

    /// Compiles a create-database statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar does not support it.
    pub fn create_database(&self, database: &str) -> Result<String> {
        self.grammar.compile_create_database(database)
    }

    /// Compiles a drop-database statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the grammar does not support it.
    pub fn drop_database(&self, database: &str) -> Result<String> {
        self.grammar.compile_drop_database(database)
    }
}
