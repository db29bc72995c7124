//! CallRecord - One persisted row per phone call
//!
//! Records are append-only: created exactly once via ingestion, never
//! updated or deleted afterwards. The aggregator only reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::value_objects::{Country, Sentiment};

/// A persisted call record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CallRecord {
    /// Assigned by storage on insert
    pub id: Uuid,
    pub phone: String,
    pub status: String,
    pub sentiment: Sentiment,
    pub call_human: bool,
    pub summary: String,
    pub attempt: i32,
    pub duration: i32,
    pub country: Country,
    pub created_at: DateTime<Utc>,
}

/// A call record ready to append, before storage assigns an id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCallRecord {
    pub phone: String,
    pub status: String,
    pub sentiment: Sentiment,
    pub call_human: bool,
    pub summary: String,
    pub attempt: i32,
    pub duration: i32,
    pub country: Country,
    /// Explicit creation time; storage uses the current time when absent
    pub created_at: Option<DateTime<Utc>>,
}
