//! Scryfall API wire model
//!
//! Record shapes as returned by `api.scryfall.com`. Only `id` and `name` are
//! required on cards; everything else defaults when absent.

mod card;
mod list;
mod rarity;
mod set;

pub use card::{Card, CardFace, CardPreview, RelatedCard};
pub use list::List;
pub use rarity::Rarity;
pub use set::{Set, SetType};

use crate::error::DecodeError;
use serde::de::DeserializeOwned;

/// Decode a JSON response body into a wire record
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, DecodeError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
#[path = "wire_tests.rs"]
mod tests;
