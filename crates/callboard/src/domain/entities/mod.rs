//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - CallRecord: one persisted row per phone call, append-only

mod call_record;

pub use call_record::*;
