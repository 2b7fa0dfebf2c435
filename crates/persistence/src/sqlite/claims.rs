//! Claims table CRUD for the remote claim recorder

use adcrate_core::{Error, Result, StoredClaim};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

/// Database row for a stored claim
#[derive(Debug, sqlx::FromRow)]
struct ClaimRow {
    id: String,
    email: String,
    mcname: Option<String>,
    code: String,
    reward_type: String,
    reward_name: String,
    timestamp: String,
    status: Option<String>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl From<ClaimRow> for StoredClaim {
    fn from(row: ClaimRow) -> Self {
        StoredClaim {
            id: row.id,
            email: row.email,
            mcname: row.mcname.unwrap_or_default(),
            code: row.code,
            reward_type: row.reward_type,
            reward_name: row.reward_name,
            timestamp: row.timestamp,
            status: row.status.unwrap_or_else(|| "claimed".to_string()),
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            created_at: row.created_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Insert a new claim row
pub async fn insert_claim(pool: &SqlitePool, claim: &StoredClaim) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO claims (id, email, mcname, code, reward_type, reward_name,
                            timestamp, status, ip_address, user_agent)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&claim.id)
    .bind(&claim.email)
    .bind(&claim.mcname)
    .bind(&claim.code)
    .bind(&claim.reward_type)
    .bind(&claim.reward_name)
    .bind(&claim.timestamp)
    .bind(&claim.status)
    .bind(&claim.ip_address)
    .bind(&claim.user_agent)
    .execute(pool)
    .await
    .map_err(|e| Error::Storage(e.to_string()))?;

    Ok(())
}

/// List all claims, newest first
pub async fn list_claims(pool: &SqlitePool) -> Result<Vec<StoredClaim>> {
    let rows: Vec<ClaimRow> = sqlx::query_as(
        r#"
        SELECT id, email, mcname, code, reward_type, reward_name,
               timestamp, status, ip_address, user_agent, created_at
        FROM claims
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|e| Error::Storage(e.to_string()))?;

    Ok(rows.into_iter().map(StoredClaim::from).collect())
}

/// Delete a claim by id; returns the number of rows removed
pub async fn delete_claim(pool: &SqlitePool, id: &str) -> Result<u64> {
    let result = sqlx::query("DELETE FROM claims WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| Error::Storage(e.to_string()))?;

    Ok(result.rows_affected())
}
