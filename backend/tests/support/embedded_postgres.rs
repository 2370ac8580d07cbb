//! Database reset and schema setup against an embedded cluster.
//!
//! Database creation goes through the `postgres` client on the admin
//! database because `DROP DATABASE` cannot run inside a transaction; the
//! schema itself comes from the crate's embedded Diesel migrations so tests
//! never drift from production.

use blog_backend::outbound::persistence::run_pending_migrations_blocking;
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};

use super::format_postgres_error;

const ADMIN_DATABASE: &str = "postgres";

/// Drop and recreate `name`, returning its connection URL.
pub fn reset_database(cluster: &TestCluster, name: &str) -> Result<String, String> {
    let admin_url = cluster.connection().database_url(ADMIN_DATABASE);
    let mut client = Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!(
            "DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE); CREATE DATABASE \"{name}\";"
        ))
        .map_err(|err| format_postgres_error(&err))?;
    Ok(cluster.connection().database_url(name))
}

/// Apply every embedded migration to the database at `url`.
pub fn migrate_schema(url: &str) -> Result<usize, String> {
    run_pending_migrations_blocking(url).map_err(|err| err.to_string())
}

/// Names of the indexes defined on `table` in the database at `url`.
pub fn index_names(url: &str, table: &str) -> Result<Vec<String>, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let rows = client
        .query(
            "SELECT indexname FROM pg_indexes WHERE tablename = $1 ORDER BY indexname",
            &[&table],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(rows.iter().map(|row| row.get::<_, String>(0)).collect())
}
