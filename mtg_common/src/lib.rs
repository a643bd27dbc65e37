//! Shared types for MTG tooling
//!
//! Holds the Scryfall wire model (cards, faces, related cards, sets, paginated
//! lists) together with the URI reference type that every URI-bearing field
//! is validated against at decode time.

pub mod error;
pub mod scryfall;
pub mod uri;

pub use error::{DecodeError, UriError};
pub use scryfall::{
    decode, Card, CardFace, CardPreview, List, Rarity, RelatedCard, Set, SetType,
};
pub use uri::UriRef;
