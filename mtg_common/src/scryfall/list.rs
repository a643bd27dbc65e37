use super::Card;
use crate::uri::UriRef;
use serde::{Deserialize, Serialize};

/// A page of results. Paginated when `has_more` is set.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct List<T = Card> {
    #[serde(default)]
    pub object: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    pub next_page: Option<UriRef>,
    /// Total across all pages, only present for card lists
    pub total_cards: Option<u32>,
    /// Non-fatal issues Scryfall found with the query
    pub warnings: Option<Vec<String>>,
}

impl<T> List<T> {
    /// The reference to follow for the next page, if there is one
    pub fn next(&self) -> Option<&UriRef> {
        if self.has_more {
            self.next_page.as_ref()
        } else {
            None
        }
    }
}
