use anyhow::{Context, Result};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");
const DROP_SQL: &str = include_str!("drop.sql");

/// Creates any missing tables and indexes. Safe to run on every start.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    run_script(conn, SCHEMA_SQL)?;
    log::info!("Database schema ready");
    Ok(())
}

pub fn reset_database(conn: &Connection) -> Result<()> {
    run_script(conn, DROP_SQL)?;
    run_script(conn, SCHEMA_SQL)?;
    log::info!("Database schema reset successfully");
    Ok(())
}

fn run_script(conn: &Connection, script: &str) -> Result<()> {
    let statements = split_sql_statements(script);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &Connection, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
pub(crate) fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory database");
    super::connection::configure(&conn).expect("configure connection");
    initialize_schema(&conn).expect("schema");
    conn
}
