use thiserror::Error;

/// A problem with user input: a bad argument name or value, a malformed chunk,
/// or an unknown country subdomain.
///
/// The message is written for the end user and is relayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
