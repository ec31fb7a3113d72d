//! Diesel table definitions for the users store.
//!
//! Kept in sync with `backend/migrations` by hand; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users keyed by a store-assigned sequence.
    ///
    /// `email` carries a unique index so concurrent writes cannot both claim
    /// the same address.
    users (id) {
        /// Primary key from the `users_id_seq` sequence. Never reused.
        id -> Int8,
        /// First name, 1 to 255 characters.
        first_name -> Varchar,
        /// Last name, 1 to 255 characters.
        last_name -> Varchar,
        /// Unique email address, at most 255 characters.
        email -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
