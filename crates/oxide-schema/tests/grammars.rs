//! Grammar dispatch, fallbacks and configuration.

mod common;

use std::sync::Arc;

use common::build_create;
use oxide_schema::{
    AutoIncrement, Blueprint, Column, Definition, ForeignKey, Grammar, Index, Mode, MySqlConfig,
    MySqlGrammar, Nullable, Render, Result, Schema, SchemaError,
};

/// Grammar that implements nothing but its name.
#[derive(Debug)]
struct BareGrammar;

impl Grammar for BareGrammar {
    fn name(&self) -> &'static str {
        "bare"
    }
}

/// [`MySqlGrammar`] output except for foreign keys, which it cannot compile.
#[derive(Debug, Default)]
struct NoForeignKeys {
    inner: MySqlGrammar,
}

impl Grammar for NoForeignKeys {
    fn name(&self) -> &'static str {
        "no_foreign_keys"
    }

    fn build(&self, blueprint: &Blueprint) -> Result<String> {
        let body = match blueprint.mode() {
            Mode::Create => self.compile_create_table(blueprint)?,
            Mode::Alter if blueprint.definitions().is_empty() => {
                return blueprint
                    .children()
                    .iter()
                    .map(|child| self.build(child))
                    .collect::<Result<Vec<_>>>()
                    .map(|statements| statements.join("\n"));
            }
            Mode::Alter => self.compile_alter_table(blueprint)?,
            Mode::Drop => String::new(),
        };
        Ok(format!(
            "{} `{}`{body};",
            blueprint.mode().directive(),
            blueprint.table()
        ))
    }

    fn compile_create_table(&self, blueprint: &Blueprint) -> Result<String> {
        let columns = blueprint
            .definitions()
            .iter()
            .filter_map(Definition::as_column)
            .map(|column| self.compile_column(column))
            .collect::<Result<Vec<_>>>()?;
        let mut sql = format!("({})", columns.join(","));
        for child in blueprint.children() {
            sql.push_str(";\n");
            sql.push_str(self.build(child)?.trim_end_matches(';'));
        }
        Ok(sql)
    }

    fn compile_alter_table(&self, blueprint: &Blueprint) -> Result<String> {
        let clauses = blueprint
            .definitions()
            .iter()
            .map(|definition| definition.render(self))
            .collect::<Result<Vec<_>>>()?;
        Ok(clauses.concat().trim_end_matches(';').to_string())
    }

    fn compile_column(&self, column: &Column) -> Result<String> {
        self.inner.compile_column(column)
    }

    fn compile_nullable(&self, nullable: &Nullable) -> Result<String> {
        self.inner.compile_nullable(nullable)
    }

    fn compile_auto_increment(&self, marker: &AutoIncrement) -> Result<String> {
        self.inner.compile_auto_increment(marker)
    }

    fn compile_index(&self, index: &Index) -> Result<String> {
        self.inner.compile_index(index)
    }
}

#[test]
fn test_bare_grammar_reports_build() {
    let blueprint = Blueprint::new("users")
        .grammar(Arc::new(BareGrammar))
        .create(|t| {
            t.id();
        });
    assert_eq!(
        blueprint.build(),
        Err(SchemaError::unimplemented("bare", "build"))
    );
}

#[test]
fn test_bare_grammar_database_statements() {
    let schema = Schema::new(Arc::new(BareGrammar));
    assert_eq!(
        schema.create_database("shop"),
        Err(SchemaError::unimplemented("bare", "compile_create_database"))
    );
    assert_eq!(
        schema.drop_database("shop"),
        Err(SchemaError::unimplemented("bare", "compile_drop_database"))
    );
}

#[test]
fn test_partial_grammar_compiles_what_it_supports() {
    let mut schema = Schema::new(Arc::new(NoForeignKeys::default()));
    schema.create("users", |t| {
        t.id();
        t.string("email", 255).unique();
    });

    assert_eq!(
        schema.build().unwrap(),
        "create table if not exists `users`(\
         `id` bigint unsigned not null auto_increment primary key,\
         `email` varchar(255));\n\
         alter table `users` add unique `users_email_unique`(`email`);"
    );
}

#[test]
fn test_unsupported_definition_aborts_the_whole_build() {
    let mut schema = Schema::new(Arc::new(NoForeignKeys::default()));
    schema
        .create("users", |t| {
            t.id();
        })
        .create("posts", |t| {
            t.id();
            t.foreign_id("user_id");
        });

    assert_eq!(
        schema.build(),
        Err(SchemaError::unimplemented(
            "no_foreign_keys",
            "compile_foreign_key"
        ))
    );
    assert_eq!(schema.blueprints().len(), 2);
}

#[test]
fn test_foreign_key_render_discovers_before_compiling() {
    let grammar = MySqlGrammar::new();
    let foreign_key = ForeignKey::new("team_id", "players");
    assert_eq!(foreign_key.referenced_table(), "");
    assert!(foreign_key.render(&grammar).is_ok());
    assert_eq!(foreign_key.referenced_table(), "teams");
    assert_eq!(foreign_key.referenced_column(), "id");
}

#[test]
fn test_config_from_json_sets_table_defaults() {
    let config: MySqlConfig =
        serde_json::from_str(r#"{"charset": "latin1", "collation": "latin1_swedish_ci"}"#).unwrap();
    let mut schema = Schema::new(Arc::new(MySqlGrammar::with_config(config)));
    schema.create("logs", |t| {
        t.text("line");
    });

    assert_eq!(
        schema.build().unwrap(),
        "create table if not exists `logs`(`line` text) \
         default character set latin1 collate 'latin1_swedish_ci';"
    );
}

#[test]
fn test_config_fields_default_when_missing() {
    let config: MySqlConfig = serde_json::from_str(r#"{"charset": "utf8"}"#).unwrap();
    assert_eq!(config.charset, "utf8");
    assert_eq!(config.collation, MySqlConfig::default().collation);
}

#[test]
fn test_mode_serde_and_parse() {
    assert_eq!(serde_json::to_string(&Mode::Alter).unwrap(), r#""alter""#);
    assert_eq!(
        serde_json::from_str::<Mode>(r#""drop""#).unwrap(),
        Mode::Drop
    );
    assert_eq!(
        "rename".parse::<Mode>(),
        Err(SchemaError::InvalidBlueprintMode("rename".to_string()))
    );
}

#[test]
fn test_default_schema_uses_mysql() {
    let schema = Schema::default();
    assert_eq!(schema.grammar().name(), "mysql");
    assert!(build_create("t", |t| {
        t.id();
    })
    .starts_with("create table if not exists `t`("));
}
