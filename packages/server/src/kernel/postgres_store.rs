//! Postgres-backed post store.
//!
//! Each post lives in `posts(id, record)` as a JSONB attribute map. Scans
//! compile a [`Filter`] into a `WHERE` clause and never add `ORDER BY`, so
//! callers see whatever order Postgres produces.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::traits::record_id;
use super::{BasePostStore, Filter, Record};

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the embedded schema migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run migrations")
    }
}

/// Append `filter` to the query as a boolean SQL expression over `record`.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &Filter) {
    match filter {
        Filter::Eq(attribute, value) => {
            query
                .push("(record -> ")
                .push_bind(attribute.clone())
                .push(") = ")
                .push_bind(Json(value.clone()));
        }
        Filter::Contains(attribute, needle) => {
            query
                .push("(CASE jsonb_typeof(record -> ")
                .push_bind(attribute.clone())
                .push(") WHEN 'array' THEN (record -> ")
                .push_bind(attribute.clone())
                .push(") @> ")
                .push_bind(Json(json!([needle])))
                .push(" WHEN 'string' THEN strpos(record ->> ")
                .push_bind(attribute.clone())
                .push(", ")
                .push_bind(needle.clone())
                .push(") > 0 ELSE false END)");
        }
        Filter::And(clauses) if clauses.is_empty() => {
            query.push("TRUE");
        }
        Filter::And(clauses) => {
            query.push("(");
            for (i, clause) in clauses.iter().enumerate() {
                if i > 0 {
                    query.push(" AND ");
                }
                push_filter(query, clause);
            }
            query.push(")");
        }
    }
}

#[async_trait]
impl BasePostStore for PgPostStore {
    async fn scan(&self, filter: &Filter) -> Result<Vec<Record>> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT record FROM posts WHERE ");
        push_filter(&mut query, filter);

        let rows: Vec<Json<Value>> = query
            .build_query_scalar::<Json<Value>>()
            .fetch_all(&self.pool)
            .await
            .context("Failed to scan posts")?;

        rows.into_iter()
            .map(|Json(value)| match value {
                Value::Object(record) => Ok(record),
                other => anyhow::bail!("stored post is not an attribute map: {}", other),
            })
            .collect()
    }

    async fn put(&self, record: Record) -> Result<()> {
        let id = record_id(&record)
            .context("record is missing a non-empty 'id' attribute")?
            .to_owned();

        sqlx::query(
            r#"
            INSERT INTO posts (id, record)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET record = EXCLUDED.record
            "#,
        )
        .bind(&id)
        .bind(Json(Value::Object(record)))
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to put post {}", id))?;

        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .context("Postgres ping failed")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(filter: &Filter) -> String {
        let mut query = QueryBuilder::<Postgres>::new("SELECT record FROM posts WHERE ");
        push_filter(&mut query, filter);
        query.sql().to_string()
    }

    #[test]
    fn test_published_filter_sql() {
        assert_eq!(
            sql_for(&Filter::eq("isDraft", false)),
            "SELECT record FROM posts WHERE (record -> $1) = $2"
        );
    }

    #[test]
    fn test_tag_filter_sql_has_no_ordering() {
        let sql = sql_for(&Filter::eq("isDraft", false).and(Filter::contains("tags", "rust")));
        assert!(sql.starts_with("SELECT record FROM posts WHERE ((record -> $1) = $2 AND (CASE"));
        assert!(sql.contains("@> $5"));
        assert!(!sql.contains("ORDER BY"));
    }

    #[test]
    fn test_empty_and_matches_all() {
        assert_eq!(sql_for(&Filter::all()), "SELECT record FROM posts WHERE TRUE");
    }
}
