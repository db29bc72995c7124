//! Call Record Repository Port
//!
//! Abstract interface for call record persistence. The log is
//! append-only: there are no update or delete operations.

use async_trait::async_trait;

use crate::domain::{errors::DomainError, CallRecord, Country, NewCallRecord};

/// Repository interface for the call record log
#[async_trait]
pub trait CallRecordRepository: Send + Sync {
    /// Atomically append one record, returning it with its assigned id
    async fn append(&self, record: &NewCallRecord) -> Result<CallRecord, DomainError>;

    /// Read a consistent snapshot of the log, optionally restricted to a
    /// country. Order is unspecified.
    async fn scan(&self, country: Option<Country>) -> Result<Vec<CallRecord>, DomainError>;
}
