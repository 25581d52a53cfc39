//! Shared embedded PostgreSQL helpers for integration tests.
//!
//! - Database creation and seeding use `postgres` so test setup does not
//!   depend on the adapter under test.
//! - Schema setup runs the backend's embedded Diesel migrations so test
//!   schemas do not drift.

use backend::outbound::persistence::apply_migrations;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use uuid::Uuid;

use super::format_postgres_error;

/// Creates a fresh, migrated database on `cluster` and returns its URL.
pub fn provision_database(cluster: &TestCluster) -> Result<String, String> {
    let name = format!("test_{}", Uuid::new_v4().simple());
    let connection = cluster.connection();

    let mut admin = Client::connect(&connection.database_url("postgres"), NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = connection.database_url(&name);
    apply_migrations(&url).map_err(|err| format!("migration: {err}"))?;
    Ok(url)
}

/// Inserts unclaimed access codes for a single partner.
pub fn seed_codes(url: &str, codes: &[&str], partner: (&str, &str, &str)) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let (name, tagline, accent) = partner;
    for code in codes {
        client
            .execute(
                "INSERT INTO access_codes (code, partner_name, partner_tagline, partner_accent) \
                 VALUES ($1, $2, $3, $4)",
                &[code, &name, &tagline, &accent],
            )
            .map_err(|err| format_postgres_error(&err))?;
    }
    Ok(())
}

/// Counts profile rows registered against `code`.
pub fn count_profiles(url: &str, code: &str) -> Result<i64, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one("SELECT COUNT(*) FROM profiles WHERE code = $1", &[&code])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Deletes the profile a claimed code points at, breaking the reference on
/// purpose so lookups observe a claimed code without a profile.
pub fn orphan_claimed_code(url: &str, code: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            "ALTER TABLE access_codes DROP CONSTRAINT access_codes_claimed_profile_id_fkey; \
             DELETE FROM profiles WHERE code = '{code}';"
        ))
        .map_err(|err| format_postgres_error(&err))
}

/// Drops the `profiles` table so store failures can be observed.
pub fn drop_profiles_table(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute("DROP TABLE profiles CASCADE")
        .map_err(|err| format_postgres_error(&err))
}

/// Makes every `access_codes` update fail, so a claim errors after its
/// profile insert has already run.
pub fn fail_access_code_updates(url: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(
            "CREATE FUNCTION reject_access_code_update() RETURNS trigger \
             LANGUAGE plpgsql AS $$ BEGIN RAISE EXCEPTION 'access code updates disabled'; END $$; \
             CREATE TRIGGER reject_access_code_update BEFORE UPDATE ON access_codes \
             FOR EACH ROW EXECUTE FUNCTION reject_access_code_update();",
        )
        .map_err(|err| format_postgres_error(&err))
}
