//! Parsing of comma-delimited argument strings and country subdomains.

use std::collections::BTreeMap;

use super::country::CountryCode;
use super::error::ValidationError;
use super::grammar::{self, ArgValue};

/// Subdomain label used by development deployments; never a country.
pub const DEV_SUBDOMAIN: &str = "dev";

/// The structured form of an argument string.
///
/// Every key in `values` is a name registered in [`grammar::ARGUMENTS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Free-text search term taken from a leading chunk without `=`.
    pub query: Option<String>,
    pub values: BTreeMap<&'static str, ArgValue>,
}

impl ParsedQuery {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn int(&self, name: &str) -> Option<u32> {
        match self.values.get(name) {
            Some(ArgValue::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    /// Value of a flag argument, `false` when it was not given.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(ArgValue::Bool(true)))
    }
}

/// Resolves the country to query from the request's subdomain labels.
///
/// `subdomains` is ordered outermost to innermost, so the last label is the most
/// specific one (`us.dev.getnews.tech` yields `["dev", "us"]`).
///
/// # Errors
///
/// Returns a [`ValidationError`] when the last label is neither the development
/// marker nor a known country.
///
/// # Examples
///
/// ```
/// use getnews::domain::query::parse_subdomain;
///
/// assert_eq!(parse_subdomain::<&str>(&[]).unwrap(), None);
/// assert_eq!(parse_subdomain(&["dev", "us"]).unwrap().unwrap().as_str(), "us");
/// assert!(parse_subdomain(&["xx"]).is_err());
/// ```
pub fn parse_subdomain<S: AsRef<str>>(
    subdomains: &[S],
) -> Result<Option<CountryCode>, ValidationError> {
    let Some(last) = subdomains.last() else {
        return Ok(None);
    };
    let label = last.as_ref();
    if label == DEV_SUBDOMAIN {
        return Ok(None);
    }
    CountryCode::new(label)
        .map(Some)
        .ok_or_else(|| ValidationError::new(format!("{label} is not a valid country to query.")))
}

/// Parses an argument string such as `trump,category=business,n=5`.
///
/// The first chunk is the search term when it contains no `=`, with `+`
/// decoded to spaces. Every other chunk is either `name=value` or the bare name
/// of a flag. Later chunks overwrite earlier ones with the same name.
///
/// Parsing is all-or-nothing and stops at the first bad chunk.
///
/// # Errors
///
/// - `Unable to parse "<chunk>".` for empty or malformed chunks
/// - `Invalid arguments "<chunk>".` for unregistered names
/// - the argument's own message when its value is rejected
///
/// # Examples
///
/// ```
/// use getnews::domain::query::parse_args;
///
/// let parsed = parse_args("multi+word+query,n=15").unwrap();
/// assert_eq!(parsed.query.as_deref(), Some("multi word query"));
/// assert_eq!(parsed.int("n"), Some(15));
/// ```
pub fn parse_args(arg_string: &str) -> Result<ParsedQuery, ValidationError> {
    let mut parsed = ParsedQuery::default();

    for (index, chunk) in arg_string.split(',').enumerate() {
        if index == 0 && !chunk.is_empty() && !chunk.contains('=') {
            parsed.query = Some(chunk.replace('+', " "));
            continue;
        }

        let (name, raw) = split_chunk(chunk)?;
        let spec = grammar::lookup(name)
            .ok_or_else(|| ValidationError::new(format!("Invalid arguments \"{chunk}\".")))?;
        let value = spec.parse(raw)?;
        parsed.values.insert(spec.name, value);
    }

    Ok(parsed)
}

fn is_flag(name: &str) -> bool {
    grammar::lookup(name).is_some_and(|spec| spec.is_flag())
}

/// Splits a chunk into its name and optional value.
///
/// A chunk without `=` is only accepted when it names a flag.
fn split_chunk(chunk: &str) -> Result<(&str, Option<&str>), ValidationError> {
    let mut parts = chunk.split('=');
    let name = parts.next().unwrap_or_default();
    let value = parts.next();

    if parts.next().is_some() || name.is_empty() || value.is_some_and(str::is_empty) {
        return Err(unparseable(chunk));
    }
    if value.is_none() && !is_flag(name) {
        return Err(unparseable(chunk));
    }

    Ok((name, value))
}

fn unparseable(chunk: &str) -> ValidationError {
    ValidationError::new(format!("Unable to parse \"{chunk}\"."))
}
