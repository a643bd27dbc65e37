//! Validated URI references
//!
//! Scryfall transmits links as plain strings. They are parsed once when the
//! record is decoded so that a malformed link fails the whole record instead
//! of surfacing later when the link is followed.

use crate::error::{DecodeError, UriError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::{ParseError, Url};

/// Base used only to check that a relative reference resolves
const RELATIVE_BASE: &str = "https://relative.invalid/";

/// An absolute or relative URI reference that is known to parse
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UriRef(String);

impl UriRef {
    /// Validate `input` as a URI reference
    pub fn parse(input: &str) -> Result<Self, DecodeError> {
        resolve(input)?;
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the reference carries its own scheme
    pub fn is_absolute(&self) -> bool {
        Url::parse(&self.0).is_ok()
    }

    /// Path plus query (`/cards/search?q=...`) of the reference.
    ///
    /// Relative references are resolved against the root first, so
    /// `cards/search` and `/cards/search` give the same result.
    pub fn path_and_query(&self) -> String {
        // Validated on construction, so resolving cannot fail here.
        match resolve(&self.0) {
            Ok(url) => match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            },
            Err(_) => self.0.clone(),
        }
    }
}

fn resolve(input: &str) -> Result<Url, DecodeError> {
    let invalid = |source: UriError| DecodeError::InvalidUri {
        uri: input.to_string(),
        source,
    };

    // The WHATWG parser repairs these silently, so they are checked first
    check_syntax(input).map_err(invalid)?;

    match Url::parse(input) {
        Ok(url) => Ok(url),
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(input))
            .map_err(|e| invalid(e.into())),
        Err(e) => Err(invalid(e.into())),
    }
}

fn check_syntax(input: &str) -> Result<(), UriError> {
    if input.starts_with(':') {
        return Err(UriError::EmptyScheme);
    }

    let bytes = input.as_bytes();
    for (i, &byte) in bytes.iter().enumerate() {
        if byte < 0x20 || byte == 0x7f {
            return Err(UriError::ControlCharacter(i));
        }
        if byte == b'%' {
            let escaped = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !escaped {
                return Err(UriError::InvalidEscape(i));
            }
        }
    }
    Ok(())
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UriRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for UriRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UriRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        UriRef::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_absolute_uri() {
        let uri = UriRef::parse("https://api.scryfall.com/cards/search?q=bolt").unwrap();
        assert!(uri.is_absolute());
        assert_eq!(uri.path_and_query(), "/cards/search?q=bolt");
    }

    #[test]
    fn parses_relative_uri() {
        let uri = UriRef::parse("/cards/search?order=released&q=oracleid%3Aabc").unwrap();
        assert!(!uri.is_absolute());
        assert_eq!(
            uri.path_and_query(),
            "/cards/search?order=released&q=oracleid%3Aabc"
        );
    }

    #[test]
    fn relative_without_leading_slash_resolves_from_root() {
        let uri = UriRef::parse("sets/lea").unwrap();
        assert_eq!(uri.path_and_query(), "/sets/lea");
    }

    #[test]
    fn rejects_invalid_port() {
        let err = UriRef::parse("https://api.scryfall.com:99999/cards").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidUri { .. }));
    }

    #[test]
    fn rejects_invalid_percent_escape() {
        for input in [
            "https://api.scryfall.com/cards/%zz",
            "https://api.scryfall.com/cards/search?q=%4",
            "/cards/%",
        ] {
            match UriRef::parse(input) {
                Err(DecodeError::InvalidUri { source, .. }) => {
                    assert!(matches!(source, UriError::InvalidEscape(_)), "{input}")
                }
                other => panic!("Expected InvalidUri for {input}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_control_characters() {
        for input in [
            "https://api.scryfall.com/cards/\nsearch",
            "https://api.scryfall.com/cards\t/x",
            "/sets/lea\u{7f}",
        ] {
            match UriRef::parse(input) {
                Err(DecodeError::InvalidUri { source, .. }) => {
                    assert!(matches!(source, UriError::ControlCharacter(_)), "{input:?}")
                }
                other => panic!("Expected InvalidUri for {input:?}, got: {other:?}"),
            }
        }
    }

    #[test]
    fn rejects_empty_scheme() {
        match UriRef::parse(":nope") {
            Err(DecodeError::InvalidUri { source, .. }) => {
                assert_eq!(source, UriError::EmptyScheme)
            }
            other => panic!("Expected InvalidUri, got: {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_percent_escapes() {
        let uri = UriRef::parse("https://api.scryfall.com/cards/named?exact=Fire%20%2F%2F%20Ice").unwrap();
        assert_eq!(uri.path_and_query(), "/cards/named?exact=Fire%20%2F%2F%20Ice");
    }

    #[test]
    fn rejects_unterminated_ipv6_host() {
        assert!(UriRef::parse("http://[::1/cards").is_err());
    }

    #[test]
    fn deserialize_fails_on_malformed_uri() {
        let result: Result<UriRef, _> = serde_json::from_str(r#""https://example.com:99999/""#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_plain_string() {
        let uri = UriRef::parse("https://scryfall.com/card/lea/161").unwrap();
        assert_eq!(
            serde_json::to_string(&uri).unwrap(),
            r#""https://scryfall.com/card/lea/161""#
        );
    }
}
