//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `migrations/` exactly; regenerate with `diesel print-schema`
//! when a migration changes a table.

diesel::table! {
    /// Access codes issued by partners.
    ///
    /// `claimed_profile_id` is set iff `is_claimed`, enforced by a CHECK
    /// constraint.
    access_codes (code) {
        /// Primary key: six ASCII digits.
        code -> Varchar,
        partner_name -> Text,
        partner_tagline -> Text,
        partner_accent -> Text,
        is_claimed -> Bool,
        claimed_profile_id -> Nullable<Int8>,
        created_at -> Timestamptz,
        /// Stamped by the claim transaction.
        claimed_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Profiles created by redeeming a code. One per code.
    profiles (id) {
        id -> Int8,
        /// Unique: the code that produced this profile.
        code -> Varchar,
        first_name -> Text,
        surname -> Text,
        gender -> Text,
        age -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> access_codes (code));

diesel::allow_tables_to_appear_in_same_query!(access_codes, profiles);
