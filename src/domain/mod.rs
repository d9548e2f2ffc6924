//! Domain layer containing business entities and logic.
//!
//! It defines entities, the query grammar, and the interfaces of the external
//! collaborators, independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`query`] - Argument grammar, argument parser and country subdomains
//! - [`entities`] - Articles and headline requests
//! - [`repositories`] - Store and news source trait definitions
//! - [`access_event`] - Access log event model
//! - [`access_worker`] - Background writer for the analytics file
//!
//! # Access Logging Flow
//!
//! 1. The access-log middleware observes the finished response
//! 2. An [`access_event::AccessEvent`] is sent to a bounded channel
//! 3. [`access_worker::run_access_worker`] appends it to the analytics file
//! 4. [`crate::application::services::AnalyticsService`] reads the file back

pub mod access_event;
pub mod access_worker;
pub mod entities;
pub mod query;
pub mod repositories;
