//! Country codes accepted as request subdomains.

use std::fmt;

/// Two-letter country codes the news API serves headlines for.
pub const VALID_COUNTRIES: &[&str] = &[
    "ae", "ar", "at", "au", "be", "bg", "br", "ca", "ch", "cn", "co", "cu", "cz", "de", "eg", "fr",
    "gb", "gr", "hk", "hu", "id", "ie", "il", "in", "it", "jp", "kr", "lt", "lv", "ma", "mx", "my",
    "ng", "nl", "no", "nz", "ph", "pl", "pt", "ro", "rs", "ru", "sa", "se", "sg", "si", "sk", "th",
    "tr", "tw", "ua", "us", "ve", "za",
];

/// A validated country code drawn from [`VALID_COUNTRIES`].
///
/// Can only be obtained through [`CountryCode::new`], so holding one means the
/// code is known to the news API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountryCode(&'static str);

impl CountryCode {
    /// Looks up `code` in the country set, returning `None` if it is not listed.
    pub fn new(code: &str) -> Option<Self> {
        VALID_COUNTRIES
            .iter()
            .find(|&&valid| valid == code)
            .map(|&valid| Self(valid))
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
