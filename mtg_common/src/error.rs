//! Decode errors for the Scryfall wire model

use thiserror::Error;

/// A wire record could not be turned into a typed value
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body was not valid JSON or did not match the expected shape
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A URI-bearing field is not a well-formed reference
    #[error("invalid URI reference {uri:?}: {source}")]
    InvalidUri {
        uri: String,
        #[source]
        source: UriError,
    },

    /// A field that the endpoint guarantees was absent
    #[error("missing required field `{field}` on {object} {id}")]
    MissingField {
        field: &'static str,
        object: &'static str,
        id: String,
    },
}

/// Why a URI reference was rejected
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UriError {
    #[error(transparent)]
    Parse(#[from] url::ParseError),

    /// `%` not followed by two hex digits
    #[error("invalid percent-escape at byte {0}")]
    InvalidEscape(usize),

    #[error("control character at byte {0}")]
    ControlCharacter(usize),

    /// Reference starts with `:`
    #[error("missing scheme before ':'")]
    EmptyScheme,
}
