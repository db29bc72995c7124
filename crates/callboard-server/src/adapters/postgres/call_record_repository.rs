//! PostgreSQL implementation of CallRecordRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use callboard::{CallRecord, CallRecordRepository, Country, DomainError, NewCallRecord};

/// PostgreSQL implementation of CallRecordRepository
pub struct PgCallRecordRepository {
    pool: PgPool,
}

impl PgCallRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct CallRecordRow {
    id: Uuid,
    phone: String,
    status: String,
    sentiment: String,
    call_human: bool,
    summary: String,
    attempt: i32,
    duration: i32,
    country: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CallRecordRow> for CallRecord {
    fn from(row: CallRecordRow) -> Self {
        Self {
            id: row.id,
            phone: row.phone,
            // Rows predating the current vocabulary map to the defaults
            // instead of failing the whole read
            sentiment: row.sentiment.parse().unwrap_or_default(),
            country: row.country.parse().unwrap_or_default(),
            status: row.status,
            call_human: row.call_human,
            summary: row.summary,
            attempt: row.attempt,
            duration: row.duration,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CallRecordRepository for PgCallRecordRepository {
    async fn append(&self, record: &NewCallRecord) -> Result<CallRecord, DomainError> {
        let row = if let Some(created_at) = record.created_at {
            sqlx::query_as::<_, CallRecordRow>(
                r#"
                INSERT INTO call_records
                    (phone, status, sentiment, call_human, summary, attempt, duration, country, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING *
                "#,
            )
            .bind(&record.phone)
            .bind(&record.status)
            .bind(record.sentiment.as_str())
            .bind(record.call_human)
            .bind(&record.summary)
            .bind(record.attempt)
            .bind(record.duration)
            .bind(record.country.as_str())
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, CallRecordRow>(
                r#"
                INSERT INTO call_records
                    (phone, status, sentiment, call_human, summary, attempt, duration, country)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
                "#,
            )
            .bind(&record.phone)
            .bind(&record.status)
            .bind(record.sentiment.as_str())
            .bind(record.call_human)
            .bind(&record.summary)
            .bind(record.attempt)
            .bind(record.duration)
            .bind(record.country.as_str())
            .fetch_one(&self.pool)
            .await
        }
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(row.into())
    }

    async fn scan(&self, country: Option<Country>) -> Result<Vec<CallRecord>, DomainError> {
        let rows = if let Some(country) = country {
            sqlx::query_as::<_, CallRecordRow>(
                "SELECT * FROM call_records WHERE country = $1",
            )
            .bind(country.as_str())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, CallRecordRow>("SELECT * FROM call_records")
                .fetch_all(&self.pool)
                .await
        }
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
