//! Utility functions shared across the application:
//!
//! - [`clock`] - Injectable time source
//! - [`code_generator`] - Short code generation and validation
//! - [`extract_domain`] - Host and subdomain extraction from HTTP headers

pub mod clock;
pub mod code_generator;
pub mod extract_domain;
