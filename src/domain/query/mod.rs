//! Query argument grammar and parser.
//!
//! A request path such as `/trump,category=business,n=5` carries a
//! comma-delimited argument string, and the request host may carry a country
//! subdomain (`us.getnews.tech`). This module turns both into validated values
//! or fails fast with a [`ValidationError`] meant for the end user.
//!
//! - [`grammar`] - registry of recognized arguments and their value rules
//! - [`country`] - the fixed set of country codes
//! - [`parser`] - [`parse_args`] and [`parse_subdomain`]
//!
//! Everything here is pure and safe to call from any number of requests at once.

pub mod country;
mod error;
pub mod grammar;
pub mod parser;

pub use country::CountryCode;
pub use error::ValidationError;
pub use grammar::{ArgValue, ArgumentKind, ArgumentSpec};
pub use parser::{ParsedQuery, parse_args, parse_subdomain};
