//! Key/value operations on the client's durable local store.
//!
//! The ledger mapping, the historical claim records, and the current-user
//! record all live here under disjoint key namespaces.

use adcrate_core::{Error, Result};
use sqlx::SqlitePool;

/// Read a value by key
pub async fn get_value(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    sqlx::query_scalar::<_, String>("SELECT value FROM store WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .map_err(|e| Error::Storage(e.to_string()))
}

/// Insert or overwrite a value
pub async fn put_value(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        "INSERT INTO store (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(e.to_string()))?;

    Ok(())
}

/// Delete a key (no-op when absent)
pub async fn delete_value(pool: &SqlitePool, key: &str) -> Result<()> {
    sqlx::query("DELETE FROM store WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await
        .map_err(|e| Error::Storage(e.to_string()))?;

    Ok(())
}

/// List all (key, value) pairs under a key prefix, ordered by key
pub async fn list_prefix(pool: &SqlitePool, prefix: &str) -> Result<Vec<(String, String)>> {
    sqlx::query_as::<_, (String, String)>(
        "SELECT key, value FROM store WHERE key LIKE ? ORDER BY key",
    )
    .bind(format!("{}%", prefix))
    .fetch_all(pool)
    .await
    .map_err(|e| Error::Storage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_put_get_overwrite_delete() {
        let db = Database::connect_in_memory().await.unwrap();
        let pool = db.pool();

        assert_eq!(get_value(pool, "missing").await.unwrap(), None);

        put_value(pool, "k", "one").await.unwrap();
        assert_eq!(get_value(pool, "k").await.unwrap().as_deref(), Some("one"));

        put_value(pool, "k", "two").await.unwrap();
        assert_eq!(get_value(pool, "k").await.unwrap().as_deref(), Some("two"));

        delete_value(pool, "k").await.unwrap();
        assert_eq!(get_value(pool, "k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_prefix_is_scoped() {
        let db = Database::connect_in_memory().await.unwrap();
        let pool = db.pool();

        put_value(pool, "claim_1", "a").await.unwrap();
        put_value(pool, "claim_2", "b").await.unwrap();
        put_value(pool, "rewards", "c").await.unwrap();

        let rows = list_prefix(pool, "claim_").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "claim_1");
        assert_eq!(rows[1].0, "claim_2");
    }
}
