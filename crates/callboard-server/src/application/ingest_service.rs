//! Ingest Application Service (Use Case)
//!
//! Appends one normalized call record to the log. No retry: transient
//! storage failures surface to the caller, which owns retry policy.

use std::sync::Arc;

use callboard::{CallRecord, CallRecordRepository, DomainError, NewCallRecord};

/// Application service for record ingestion
pub struct IngestService<R: CallRecordRepository> {
    repo: Arc<R>,
}

impl<R: CallRecordRepository> IngestService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Append a normalized record, returning it with its assigned id
    pub async fn ingest(&self, record: NewCallRecord) -> Result<CallRecord, DomainError> {
        let saved = self.repo.append(&record).await?;

        tracing::info!(
            "New call record: {} | phone={} | status={} | attempt={}",
            saved.id,
            saved.phone,
            saved.status,
            saved.attempt
        );

        Ok(saved)
    }
}
