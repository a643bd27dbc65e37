use crate::error::DecodeError;
use crate::uri::UriRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scryfall card object.
///
/// Every card object is one printing; the oracle-level fields repeat across
/// all printings that share an `oracle_id`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Card {
    // ── Core fields ────────────────────────────────────────────────────
    pub arena_id: Option<u64>,
    /// Unique per printing
    pub id: String,
    #[serde(default)]
    pub lang: String,
    pub mtgo_id: Option<u64>,
    pub mtgo_foil_id: Option<u64>,
    pub multiverse_ids: Option<Vec<u64>>,
    pub tcgplayer_id: Option<u64>,
    pub tcgplayer_etched_id: Option<u64>,
    pub cardmarket_id: Option<u64>,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub layout: String,
    /// Stable across reprints. Absent on reversible cards, where each face
    /// carries its own.
    pub oracle_id: Option<String>,
    pub prints_search_uri: Option<UriRef>,
    pub rulings_uri: Option<UriRef>,
    pub scryfall_uri: Option<UriRef>,
    pub uri: Option<UriRef>,

    // ── Gameplay fields ────────────────────────────────────────────────
    pub all_parts: Option<Vec<RelatedCard>>,
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub color_identity: Vec<String>,
    pub color_indicator: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub defense: Option<String>,
    pub edhrec_rank: Option<u32>,
    pub game_changer: Option<bool>,
    pub hand_modifier: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub legalities: BTreeMap<String, String>,
    pub life_modifier: Option<String>,
    pub loyalty: Option<String>,
    pub mana_cost: Option<String>,
    pub name: String,
    pub oracle_text: Option<String>,
    pub penny_rank: Option<u32>,
    /// Free text: may be `*`, `1+*` and similar
    pub power: Option<String>,
    pub produced_mana: Option<Vec<String>>,
    #[serde(default)]
    pub reserved: bool,
    pub toughness: Option<String>,
    #[serde(default)]
    pub type_line: String,

    // ── Print fields ───────────────────────────────────────────────────
    pub artist: Option<String>,
    pub artist_ids: Option<Vec<String>>,
    pub attraction_lights: Option<Vec<u32>>,
    #[serde(default)]
    pub booster: bool,
    #[serde(default)]
    pub border_color: String,
    #[serde(default)]
    pub card_back_id: String,
    #[serde(default)]
    pub collector_number: String,
    pub content_warning: Option<bool>,
    #[serde(default)]
    pub digital: bool,
    /// `foil`, `nonfoil`, `etched`
    #[serde(default)]
    pub finishes: Vec<String>,
    pub flavor_name: Option<String>,
    pub flavor_text: Option<String>,
    pub frame_effects: Option<Vec<String>>,
    #[serde(default)]
    pub frame: String,
    #[serde(default)]
    pub full_art: bool,
    /// Platforms this printing is available on: `paper`, `mtgo`, `arena`
    #[serde(default)]
    pub games: Vec<String>,
    #[serde(default)]
    pub highres_image: bool,
    pub illustration_id: Option<String>,
    #[serde(default)]
    pub image_status: String,
    pub image_uris: Option<BTreeMap<String, UriRef>>,
    #[serde(default)]
    pub oversized: bool,
    /// Currency code to price; each price may be null
    #[serde(default)]
    pub prices: BTreeMap<String, Option<String>>,
    pub printed_name: Option<String>,
    pub printed_text: Option<String>,
    pub printed_type_line: Option<String>,
    #[serde(default)]
    pub promo: bool,
    pub promo_types: Option<Vec<String>>,
    pub purchase_uris: Option<BTreeMap<String, UriRef>>,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub related_uris: BTreeMap<String, UriRef>,
    #[serde(default)]
    pub released_at: String,
    #[serde(default)]
    pub reprint: bool,
    pub scryfall_set_uri: Option<UriRef>,
    #[serde(default)]
    pub set_name: String,
    pub set_search_uri: Option<UriRef>,
    #[serde(default)]
    pub set_type: String,
    pub set_uri: Option<UriRef>,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub set_id: String,
    #[serde(default)]
    pub story_spotlight: bool,
    #[serde(default)]
    pub textless: bool,
    #[serde(default)]
    pub variation: bool,
    pub variation_of: Option<String>,
    pub security_stamp: Option<String>,
    pub watermark: Option<String>,
    pub preview: Option<CardPreview>,
}

impl Card {
    /// The oracle id, or a decode error naming this printing.
    ///
    /// The card-detail endpoint and the storage layer both need it.
    pub fn require_oracle_id(&self) -> Result<&str, DecodeError> {
        self.oracle_id
            .as_deref()
            .ok_or_else(|| DecodeError::MissingField {
                field: "oracle_id",
                object: "card",
                id: self.id.clone(),
            })
    }

    /// Exact, case-sensitive membership in `finishes`
    pub fn has_finish(&self, finish: &str) -> bool {
        self.finishes.iter().any(|f| f == finish)
    }
}

/// One face of a multi-faced card
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardFace {
    pub artist: Option<String>,
    pub artist_id: Option<String>,
    pub cmc: Option<f64>,
    pub color_indicator: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
    pub defense: Option<String>,
    pub flavor_text: Option<String>,
    pub illustration_id: Option<String>,
    pub image_uris: Option<BTreeMap<String, UriRef>>,
    pub layout: Option<String>,
    pub loyalty: Option<String>,
    #[serde(default)]
    pub mana_cost: String,
    pub name: String,
    #[serde(default)]
    pub object: String,
    pub oracle_id: Option<String>,
    pub oracle_text: Option<String>,
    pub power: Option<String>,
    pub printed_name: Option<String>,
    pub printed_text: Option<String>,
    pub printed_type_line: Option<String>,
    pub toughness: Option<String>,
    pub type_line: Option<String>,
    pub watermark: Option<String>,
}

/// A card closely related to another (tokens, meld parts, combo pieces)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelatedCard {
    pub id: String,
    #[serde(default)]
    pub object: String,
    /// `token`, `meld_part`, `meld_result` or `combo_piece`
    #[serde(default)]
    pub component: String,
    pub name: String,
    #[serde(default)]
    pub type_line: String,
    pub uri: Option<UriRef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardPreview {
    pub previewed_at: Option<String>,
    pub source_uri: Option<UriRef>,
    pub source: Option<String>,
}
