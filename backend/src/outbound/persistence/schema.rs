//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When migrations
//! change the schema, regenerate this file with `diesel print-schema` or
//! update it by hand.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Public handle, unique.
        username -> Varchar,
        /// Sign-in address, unique ignoring case.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Back-office access flag.
        is_admin -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Saved code snippets.
    snippets (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Owning user.
        owner_id -> Int8,
        /// Display name.
        name -> Varchar,
        /// Source text.
        code -> Text,
        /// Share-link slug, unique per owner.
        slug -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// One settings row per user.
    user_settings (user_id) {
        /// Primary key and foreign key to `users.id`.
        user_id -> Int8,
        /// Interface language code (`en` or `ru`).
        language -> Varchar,
    }
}

diesel::joinable!(snippets -> users (owner_id));
diesel::joinable!(user_settings -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(snippets, user_settings, users);

diesel::define_sql_function! {
    /// SQL `LOWER()`, used for case-insensitive email matching.
    fn lower(value: diesel::sql_types::Text) -> diesel::sql_types::Text;
}
