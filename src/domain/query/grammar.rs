//! Registry of the arguments accepted in a query string.
//!
//! Each argument is described by an [`ArgumentSpec`]: a name, a human readable
//! description used by the help output, and an [`ArgumentKind`] that decides
//! how the raw value is parsed and validated.

use super::error::ValidationError;

/// News categories supported by the upstream API.
pub const VALID_CATEGORIES: &[&str] = &[
    "business",
    "entertainment",
    "general",
    "health",
    "science",
    "sports",
    "technology",
];

/// Exclusive upper bound for the result count argument.
pub const MAX_RESULTS: u32 = 100;

/// A parsed argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Str(String),
    Int(u32),
    Bool(bool),
}

/// How an argument's raw value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentKind {
    /// Integer in `1..MAX_RESULTS`.
    ResultCount,
    /// Integer greater than zero.
    PageNumber,
    /// Member of [`VALID_CATEGORIES`].
    Category,
    /// Boolean switch; the value may be omitted.
    Flag,
}

/// Static description of one recognized argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ArgumentKind,
}

/// Every argument the parser recognizes.
pub static ARGUMENTS: &[ArgumentSpec] = &[
    ArgumentSpec {
        name: "n",
        description: "Number of articles to show (1-99)",
        kind: ArgumentKind::ResultCount,
    },
    ArgumentSpec {
        name: "page",
        description: "Page of results to show",
        kind: ArgumentKind::PageNumber,
    },
    ArgumentSpec {
        name: "category",
        description: "Restrict headlines to a category",
        kind: ArgumentKind::Category,
    },
    ArgumentSpec {
        name: "reverse",
        description: "Reverse the order of the articles",
        kind: ArgumentKind::Flag,
    },
    ArgumentSpec {
        name: "nocolor",
        description: "Disable colored output",
        kind: ArgumentKind::Flag,
    },
];

/// Finds the spec registered under `name`.
pub fn lookup(name: &str) -> Option<&'static ArgumentSpec> {
    ARGUMENTS.iter().find(|spec| spec.name == name)
}

impl ArgumentSpec {
    /// Whether the argument may appear without a value.
    pub fn is_flag(&self) -> bool {
        self.kind == ArgumentKind::Flag
    }

    /// Parses the raw value supplied for this argument.
    ///
    /// `raw` is `None` when the argument appeared bare (no `=value`), which is
    /// only meaningful for flags.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the argument when the value is
    /// missing, malformed or out of range.
    pub fn parse(&self, raw: Option<&str>) -> Result<ArgValue, ValidationError> {
        match self.kind {
            ArgumentKind::Flag => Ok(ArgValue::Bool(raw != Some("false"))),
            ArgumentKind::ResultCount => {
                let n = raw.and_then(|v| v.parse::<u32>().ok());
                match n {
                    Some(n) if (1..MAX_RESULTS).contains(&n) => Ok(ArgValue::Int(n)),
                    _ => Err(ValidationError::new(format!(
                        "Argument \"{}\" must be an integer from 1 to {}.",
                        self.name,
                        MAX_RESULTS - 1
                    ))),
                }
            }
            ArgumentKind::PageNumber => {
                let page = raw.and_then(|v| v.parse::<u32>().ok());
                match page {
                    Some(page) if page > 0 => Ok(ArgValue::Int(page)),
                    _ => Err(ValidationError::new(format!(
                        "Argument \"{}\" must be an integer greater than 0.",
                        self.name
                    ))),
                }
            }
            ArgumentKind::Category => {
                let value = raw.unwrap_or_default();
                if VALID_CATEGORIES.contains(&value) {
                    Ok(ArgValue::Str(value.to_string()))
                } else {
                    Err(ValidationError::new(format!(
                        "\"{value}\" is not a valid category."
                    )))
                }
            }
        }
    }
}
