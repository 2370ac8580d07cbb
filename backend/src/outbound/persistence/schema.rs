//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: serial integer.
        id -> Int4,
        /// Login email, unique across accounts.
        email -> Text,
        /// Argon2 PHC-encoded password hash.
        password -> Text,
        /// Public display name (max 50 characters).
        username -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published posts. Rows cascade when the owning user is removed.
    posts (id) {
        id -> Int4,
        title -> Text,
        content -> Text,
        user_id -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments attached to posts. Rows cascade with their post.
    comments (id) {
        id -> Int4,
        post_id -> Int4,
        user_id -> Int4,
        content -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(posts -> users (user_id));
diesel::joinable!(comments -> posts (post_id));
diesel::joinable!(comments -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, posts, comments);
