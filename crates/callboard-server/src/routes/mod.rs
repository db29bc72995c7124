//! Callboard API Routes
//!
//! - POST /api/calls - record ingestion
//! - GET /api/analytics - aggregated dashboard views
//! - /swagger-ui - OpenAPI documentation

pub mod analytics;
pub mod calls;
pub mod swagger;
