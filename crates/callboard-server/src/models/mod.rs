//! Callboard API Models
//!
//! Request/response DTOs for the HTTP surface.

mod call;

pub use call::*;
