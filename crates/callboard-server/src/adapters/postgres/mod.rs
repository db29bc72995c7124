//! PostgreSQL Adapters

mod call_record_repository;

pub use call_record_repository::PgCallRecordRepository;
