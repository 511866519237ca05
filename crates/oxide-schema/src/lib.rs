//! Fluent schema blueprints compiled to dialect-specific DDL.
//!
//! `oxide-schema` describes table changes through a fluent builder and
//! compiles them into SQL statements:
//! - A [`Blueprint`] holds the definitions of one table in one [`Mode`]
//!   (create, alter or drop)
//! - Operations that need their own ALTER statement (indexes, foreign keys,
//!   renames, drops) are queued as child blueprints and emitted after the
//!   parent statement
//! - Every node renders itself through a swappable [`Grammar`];
//!   [`MySqlGrammar`] is the reference grammar
//!
//! # Example
//!
//! ```rust
//! use oxide_schema::{IndexAlgorithm, Schema};
//!
//! let mut schema = Schema::default();
//! schema.create("users", |table| {
//!     table.id();
//!     table.string("username", 255).not_null().unique();
//!     table.integer("age").index_using(IndexAlgorithm::BTree);
//! });
//!
//! let sql = schema.build().unwrap();
//! assert_eq!(
//!     sql,
//!     "create table if not exists `users`(\
//!      `id` bigint unsigned not null auto_increment primary key,\
//!      `username` varchar(255) not null,\
//!      `age` integer(11)) \
//!      default character set utf8mb4 collate 'utf8mb4_unicode_ci';\n\
//!      alter table `users` add unique `users_username_unique`(`username`);\n\
//!      alter table `users` add index `users_age_index`(`age`) using btree;"
//! );
//! ```

pub mod blueprint;
pub mod column;
pub mod definition;
pub mod error;
pub mod foreign_key;
pub mod grammar;
pub mod index;
pub mod schema;
pub mod types;

pub use blueprint::{Blueprint, Mode, PendingBlueprint};
pub use column::{Column, ColumnBuilder, NULL_DEFAULT};
pub use definition::{
    AutoIncrement, Comment, Definition, DefaultValue, DropColumn, EnumKind, EnumValues, Nullable,
    RenameColumn, Render,
};
pub use error::{Result, SchemaError};
pub use foreign_key::{ForeignKey, ForeignKeyAction, Reference};
pub use grammar::{Grammar, MySqlConfig, MySqlGrammar, default_grammar};
pub use index::{Index, IndexAlgorithm, IndexKind};
pub use schema::Schema;
pub use types::{ColumnType, TypeKind};
