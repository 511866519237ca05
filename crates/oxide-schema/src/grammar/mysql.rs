//! Grammar for the `mysql` dialect.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::Grammar;
use crate::blueprint::{Blueprint, Mode};
use crate::column::Column;
use crate::definition::{
    AutoIncrement, Comment, Definition, DefaultValue, DropColumn, EnumValues, Nullable,
    RenameColumn, Render,
};
use crate::error::{Result, SchemaError};
use crate::foreign_key::ForeignKey;
use crate::index::{Index, IndexAlgorithm, IndexKind};

/// Table defaults of [`MySqlGrammar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MySqlConfig {
    /// Character set for tables that set none.
    pub charset: String,
    /// Collation for tables that set none.
    pub collation: String,
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            charset: String::from("utf8mb4"),
            collation: String::from("utf8mb4_unicode_ci"),
        }
    }
}

/// Reference grammar, compiling blueprints to `mysql` DDL.
#[derive(Debug, Clone, Default)]
pub struct MySqlGrammar {
    config: MySqlConfig,
}

impl MySqlGrammar {
    /// Creates the grammar with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the grammar with the given table defaults.
    #[must_use]
    pub const fn with_config(config: MySqlConfig) -> Self {
        Self { config }
    }

    /// Table defaults in use.
    #[must_use]
    pub const fn config(&self) -> &MySqlConfig {
        &self.config
    }

    /// Builds every child of `blueprint`, one statement per line.
    fn build_children(&self, blueprint: &Blueprint) -> Result<String> {
        let mut statements = Vec::with_capacity(blueprint.children().len());
        for child in blueprint.children() {
            let sql = self.build(child)?;
            if !sql.is_empty() {
                statements.push(sql);
            }
        }
        Ok(statements.join("\n"))
    }

    /// Appends the children of `blueprint` after the statement in `sql`.
    ///
    /// `sql` is left without its final terminator, which the caller adds.
    fn append_children(&self, sql: &mut String, blueprint: &Blueprint) -> Result<()> {
        let children = self.build_children(blueprint)?;
        if !children.is_empty() {
            sql.push_str(";\n");
            sql.push_str(children.strip_suffix(';').unwrap_or(&children));
        }
        Ok(())
    }
}

/// Quotes an identifier.
fn quote_identifier(name: &str) -> String {
    format!("`{name}`")
}

/// Quotes a string literal.
fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

impl Grammar for MySqlGrammar {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn default_charset(&self) -> &str {
        &self.config.charset
    }

    fn default_collation(&self) -> &str {
        &self.config.collation
    }

    fn build(&self, blueprint: &Blueprint) -> Result<String> {
        trace!(
            table = blueprint.table(),
            mode = %blueprint.mode(),
            children = blueprint.children().len(),
            "compiling blueprint"
        );
        if blueprint.mode() == Mode::Alter && blueprint.definitions().is_empty() {
            return self.build_children(blueprint);
        }
        let body = match blueprint.mode() {
            Mode::Create => self.compile_create_table(blueprint)?,
            Mode::Alter => self.compile_alter_table(blueprint)?,
            Mode::Drop => self.compile_drop_table(blueprint)?,
        };
        Ok(format!(
            "{} {}{body};",
            blueprint.mode().directive(),
            quote_identifier(blueprint.table())
        ))
    }

    fn compile_create_database(&self, database: &str) -> Result<String> {
        Ok(format!(
            "create database if not exists {} default character set {} collate {};",
            quote_identifier(database),
            self.config.charset,
            quote_string(&self.config.collation)
        ))
    }

    fn compile_drop_database(&self, database: &str) -> Result<String> {
        Ok(format!(
            "drop database if exists {};",
            quote_identifier(database)
        ))
    }

    fn compile_create_table(&self, blueprint: &Blueprint) -> Result<String> {
        let columns = blueprint
            .definitions()
            .iter()
            .map(|definition| definition.render(self))
            .collect::<Result<Vec<_>>>()?;

        let mut sql = format!(
            "({}) default character set {} collate {}",
            columns.join(","),
            blueprint.charset_or_default(),
            quote_string(blueprint.collation_or_default())
        );
        self.append_children(&mut sql, blueprint)?;
        Ok(sql)
    }

    fn compile_alter_table(&self, blueprint: &Blueprint) -> Result<String> {
        let mut clauses = Vec::with_capacity(blueprint.definitions().len());
        for definition in blueprint.definitions() {
            let clause = definition.render(self)?;
            clauses.push(match definition {
                Definition::Column(_) => format!(" add {clause}"),
                _ => clause.strip_suffix(';').unwrap_or(&clause).to_string(),
            });
        }

        // Every definition after the first opens its own statement.
        let separator = format!(
            ";\n{} {}",
            Mode::Alter.directive(),
            quote_identifier(blueprint.table())
        );
        let mut sql = clauses.join(&separator);
        self.append_children(&mut sql, blueprint)?;
        Ok(sql)
    }

    fn compile_drop_table(&self, _blueprint: &Blueprint) -> Result<String> {
        Ok(String::new())
    }

    fn compile_column(&self, column: &Column) -> Result<String> {
        let data_type = match column.enum_values() {
            Some(values) => values.render(self)?,
            None => column.column_type().to_string(),
        };
        let mut sql = format!("{} {data_type}", quote_identifier(column.name()));

        if column.precision_value() > 0 {
            let _ = write!(
                sql,
                "({},{})",
                column.precision_value(),
                column.scale_value()
            );
        } else if column.length_value() > 0 {
            let _ = write!(sql, "({})", column.length_value());
        }

        if column.is_unsigned() {
            sql.push_str(" unsigned");
        }

        if let Some(nullable) = column.nullability() {
            sql.push(' ');
            sql.push_str(&nullable.render(self)?);
        }

        if let Some(auto_increment) = column.auto_increments() {
            sql.push(' ');
            sql.push_str(&auto_increment.render(self)?);
        }

        if column.is_primary() {
            sql.push_str(" primary key");
        }

        if let Some(default) = column.default_value() {
            let value = default.render(self)?;
            sql.push_str(" default ");
            if column.column_type().is_string_kind() {
                sql.push_str(&quote_string(&value));
            } else {
                sql.push_str(&value);
            }
        }

        if let Some(comment) = column.comment_value() {
            sql.push_str(" comment ");
            sql.push_str(&comment.render(self)?);
        }

        Ok(sql)
    }

    fn compile_auto_increment(&self, _marker: &AutoIncrement) -> Result<String> {
        Ok(String::from("auto_increment"))
    }

    fn compile_default_value(&self, value: &DefaultValue) -> Result<String> {
        Ok(value.get().to_string())
    }

    fn compile_comment(&self, comment: &Comment) -> Result<String> {
        Ok(quote_string(comment.get()))
    }

    fn compile_nullable(&self, nullable: &Nullable) -> Result<String> {
        Ok(String::from(if nullable.is() { "null" } else { "not null" }))
    }

    fn compile_enum_values(&self, values: &EnumValues) -> Result<String> {
        let quoted: Vec<String> = values.values().iter().map(|v| quote_string(v)).collect();
        Ok(format!("{}({})", values.kind().as_str(), quoted.join(",")))
    }

    fn compile_index(&self, index: &Index) -> Result<String> {
        let keyword = match index.kind() {
            IndexKind::Primary => "primary key",
            kind => kind.as_str(),
        };
        let columns: Vec<String> = index.columns().iter().map(|c| quote_identifier(c)).collect();
        let mut sql = format!(
            " add {keyword} {}({})",
            quote_identifier(&index.name()),
            columns.join(", ")
        );
        if index.algorithm() != IndexAlgorithm::Default {
            let _ = write!(sql, " using {}", index.algorithm().as_str());
        }
        sql.push(';');
        Ok(sql)
    }

    fn compile_foreign_key(&self, foreign_key: &ForeignKey) -> Result<String> {
        if foreign_key.referenced_table().is_empty() || foreign_key.referenced_column().is_empty()
        {
            return Err(SchemaError::MissingForeignKeyReference {
                table: foreign_key.table().to_string(),
                column: foreign_key.column().to_string(),
            });
        }
        let name = format!("{}_{}_foreign", foreign_key.table(), foreign_key.column());
        let mut sql = format!(
            " add constraint {} foreign key ({}) references {} ({})",
            quote_identifier(&name),
            quote_identifier(foreign_key.column()),
            quote_identifier(foreign_key.referenced_table()),
            quote_identifier(foreign_key.referenced_column())
        );
        if let Some(action) = foreign_key.on_delete_action() {
            sql.push_str(" on delete ");
            sql.push_str(action.as_sql());
        }
        if let Some(action) = foreign_key.on_update_action() {
            sql.push_str(" on update ");
            sql.push_str(action.as_sql());
        }
        sql.push(';');
        Ok(sql)
    }

    fn compile_rename_column(&self, rename: &RenameColumn) -> Result<String> {
        Ok(format!(
            " rename column {} to {};",
            quote_identifier(rename.from()),
            quote_identifier(rename.to())
        ))
    }

    fn compile_drop_column(&self, drop: &DropColumn) -> Result<String> {
        Ok(format!(" drop column {};", quote_identifier(drop.column())))
    }
}
