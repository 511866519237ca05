#![allow(dead_code)]

use oxide_schema::{Blueprint, Schema};

/// Suffix the default grammar appends to every create statement by default.
pub const TABLE_DEFAULTS: &str = "default character set utf8mb4 collate 'utf8mb4_unicode_ci'";

pub fn build_create(table: &str, callback: impl FnOnce(&mut Blueprint)) -> String {
    let mut schema = Schema::default();
    schema.create(table, callback);
    schema
        .build()
        .unwrap_or_else(|e| panic!("Failed to build create `{table}`: {e}"))
}

pub fn build_alter(table: &str, callback: impl FnOnce(&mut Blueprint)) -> String {
    let mut schema = Schema::default();
    schema.alter(table, callback);
    schema
        .build()
        .unwrap_or_else(|e| panic!("Failed to build alter `{table}`: {e}"))
}

pub fn statements(sql: &str) -> Vec<&str> {
    sql.lines().collect()
}
