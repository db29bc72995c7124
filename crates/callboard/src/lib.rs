//! Callboard Domain Library
//!
//! Core domain types and logic for the Callboard call analytics system.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (CallRecord)
//!   - `value_objects/`: Immutable value types (Sentiment, Country, OutcomeBreakdown)
//!   - `normalize`: Record normalization (dominant outcome, phone cleanup)
//!   - `analytics`: Read-only aggregation over the call record log
//!   - `errors`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use callboard::{CallRecord, OutcomeBreakdown, normalize, analytics};
//!
//! let status = normalize::dominant_status(&breakdown);
//! let report = analytics::analyze(&records, chrono::Utc::now());
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    analytics, normalize, AnalyticsReport, CallRecord, Country, DomainError, NewCallRecord,
    OutcomeBreakdown, Sentiment,
};
pub use ports::CallRecordRepository;
