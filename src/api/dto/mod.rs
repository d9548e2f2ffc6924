//! Data Transfer Objects for the JSON endpoints.
//!
//! News, help and error responses are plain text and have no DTOs.

pub mod analytics;
pub mod health;
