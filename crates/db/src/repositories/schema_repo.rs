//! Catalog introspection used by the schema check tool.

use std::collections::HashSet;

use sqlx::PgPool;

/// Reads `information_schema` and probes relations.
pub struct SchemaRepo;

impl SchemaRepo {
    /// Names of all tables and views in the `public` schema, in one query.
    pub async fn public_relations(pool: &PgPool) -> Result<HashSet<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT table_name::TEXT
             FROM information_schema.tables
             WHERE table_schema = 'public'
               AND table_type IN ('BASE TABLE', 'VIEW')",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    /// Attempt a zero-row select against `relation`.
    ///
    /// A missing relation surfaces as a database error with SQLSTATE `42P01`.
    pub async fn probe(pool: &PgPool, relation: &str) -> Result<(), sqlx::Error> {
        let query = format!("SELECT * FROM {} LIMIT 0", quote_ident(relation));
        sqlx::query(&query).execute(pool).await?;
        Ok(())
    }
}

/// Double-quote an identifier, doubling embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
