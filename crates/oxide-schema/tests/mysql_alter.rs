//! Alter-mode compilation with the default grammar.

mod common;

use common::{build_alter, statements};
use oxide_schema::{Blueprint, IndexAlgorithm, Schema};

#[test]
fn test_alter_users_table() {
    let sql = build_alter("users", |t| {
        t.timestamps();
        t.rename_column("name", "full_name");
        t.drop_column("users", "email");
    });

    assert_eq!(
        sql,
        "alter table `users` add `created_at` timestamp not null default CURRENT_TIMESTAMP;\n\
         alter table `users` add `updated_at` timestamp not null default CURRENT_TIMESTAMP on update CURRENT_TIMESTAMP;\n\
         alter table `users` rename column `name` to `full_name`;\n\
         alter table `users` drop column `email`;"
    );
}

#[test]
fn test_children_are_emitted_once_after_all_definitions() {
    let sql = build_alter("users", |t| {
        t.rename_column("name", "full_name");
        t.rename_column("mail", "email");
        t.drop_column("users", "legacy");
    });

    assert_eq!(
        statements(&sql),
        [
            "alter table `users` rename column `name` to `full_name`;",
            "alter table `users` rename column `mail` to `email`;",
            "alter table `users` drop column `legacy`;",
        ]
    );
}

#[test]
fn test_column_modifiers_in_alter_mode_emit_children() {
    let sql = build_alter("users", |t| {
        t.string("nickname", 64).nullable().unique();
        t.integer("score").index_using(IndexAlgorithm::Hash);
    });

    assert_eq!(
        statements(&sql),
        [
            "alter table `users` add `nickname` varchar(64) null;",
            "alter table `users` add `score` integer(11);",
            "alter table `users` add unique `users_nickname_unique`(`nickname`);",
            "alter table `users` add index `users_score_index`(`score`) using hash;",
        ]
    );
}

#[test]
fn test_alter_with_only_children() {
    let sql = build_alter("orders", |t| {
        t.index(&["customer_id", "created_at"]);
        t.drop_column("invoices", "draft");
    });

    assert_eq!(
        statements(&sql),
        [
            "alter table `orders` add index `orders_customer_id_created_at_index`(`customer_id`, `created_at`);",
            "alter table `invoices` drop column `draft`;",
        ]
    );
}

#[test]
fn test_empty_alter_emits_nothing() {
    assert_eq!(build_alter("users", |_| {}), "");

    let mut schema = Schema::default();
    schema
        .alter("users", |_| {})
        .drop("sessions");
    assert_eq!(schema.build().unwrap(), "drop table if exists `sessions`;");
}

#[test]
fn test_alter_adds_foreign_key() {
    let sql = build_alter("comments", |t| {
        let (foreign_key, _) = t.foreign_id("post_id");
        foreign_key.cascade_on_delete().cascade_on_update();
    });

    assert_eq!(
        statements(&sql),
        [
            "alter table `comments` add `post_id` bigint unsigned;",
            "alter table `comments` add constraint `comments_post_id_foreign` \
             foreign key (`post_id`) references `posts` (`id`) \
             on delete cascade on update cascade;",
        ]
    );
}

#[test]
fn test_drop_mode_ignores_children() {
    let blueprint = Blueprint::new("sessions").drop(|t| {
        t.string("token", 64).unique();
    });
    assert_eq!(blueprint.children().len(), 1);
    assert_eq!(blueprint.build().unwrap(), "drop table if exists `sessions`;");
}
