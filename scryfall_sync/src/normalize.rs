//! Mapping between Scryfall card objects and the two storage tables
//!
//! A Scryfall card object is one printing that also repeats its oracle-level
//! fields. Writing splits it into a [`CardRecord`] (keyed by `oracle_id`) and
//! a [`PrintingRecord`] (keyed by printing `id`). Reading joins them back
//! into a [`CardView`].
//!
//! Compound fields are stored as JSON text. Empty containers are written as
//! `[]` / `{}` so they read back as empty, while an absent optional field is
//! written as NULL and reads back as unknown.

use crate::error::{Result, SyncError};
use mtg_common::{Card, Rarity, UriRef};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

/// Oracle-level row for the `cards` table
#[derive(Debug, Clone, PartialEq)]
pub struct CardRecord {
    pub oracle_id: String,
    pub name: String,
    pub layout: String,
    pub prints_search_uri: Option<String>,
    pub rulings_uri: Option<String>,
    pub all_parts: Option<String>,
    pub card_faces: Option<String>,
    pub cmc: f64,
    pub color_identity: String,
    pub color_indicator: Option<String>,
    pub colors: Option<String>,
    pub defense: Option<String>,
    pub edhrec_rank: Option<u32>,
    pub game_changer: Option<bool>,
    pub hand_modifier: Option<String>,
    pub keywords: String,
    pub legalities: String,
    pub life_modifier: Option<String>,
    pub loyalty: Option<String>,
    pub mana_cost: Option<String>,
    pub oracle_text: Option<String>,
    pub penny_rank: Option<u32>,
    pub power: Option<String>,
    pub produced_mana: Option<String>,
    pub reserved: bool,
    pub toughness: Option<String>,
    pub type_line: String,
}

impl CardRecord {
    pub fn from_card(card: &Card) -> Result<Self> {
        Ok(Self {
            oracle_id: card.require_oracle_id()?.to_string(),
            name: card.name.clone(),
            layout: card.layout.clone(),
            prints_search_uri: uri_text(card.prints_search_uri.as_ref()),
            rulings_uri: uri_text(card.rulings_uri.as_ref()),
            all_parts: encode_optional(card.all_parts.as_ref())?,
            card_faces: encode_optional(card.card_faces.as_ref())?,
            cmc: card.cmc,
            color_identity: encode_json(&card.color_identity)?,
            color_indicator: encode_optional(card.color_indicator.as_ref())?,
            colors: encode_optional(card.colors.as_ref())?,
            defense: card.defense.clone(),
            edhrec_rank: card.edhrec_rank,
            game_changer: card.game_changer,
            hand_modifier: card.hand_modifier.clone(),
            keywords: encode_json(&card.keywords)?,
            legalities: encode_json(&card.legalities)?,
            life_modifier: card.life_modifier.clone(),
            loyalty: card.loyalty.clone(),
            mana_cost: card.mana_cost.clone(),
            oracle_text: card.oracle_text.clone(),
            penny_rank: card.penny_rank,
            power: card.power.clone(),
            produced_mana: encode_optional(card.produced_mana.as_ref())?,
            reserved: card.reserved,
            toughness: card.toughness.clone(),
            type_line: card.type_line.clone(),
        })
    }
}

/// Print-level row for the `printings` table
#[derive(Debug, Clone, PartialEq)]
pub struct PrintingRecord {
    pub id: String,
    pub oracle_id: String,
    pub arena_id: Option<u64>,
    pub lang: String,
    pub mtgo_id: Option<u64>,
    pub mtgo_foil_id: Option<u64>,
    pub multiverse_ids: Option<String>,
    pub tcgplayer_id: Option<u64>,
    pub tcgplayer_etched_id: Option<u64>,
    pub cardmarket_id: Option<u64>,
    pub object: String,
    pub scryfall_uri: Option<String>,
    pub uri: Option<String>,
    pub artist: Option<String>,
    pub artist_ids: Option<String>,
    pub attraction_lights: Option<String>,
    pub booster: bool,
    pub border_color: String,
    pub card_back_id: String,
    pub collector_number: String,
    pub content_warning: Option<bool>,
    pub digital: bool,
    pub finishes: String,
    pub foil: bool,
    pub nonfoil: bool,
    pub flavor_name: Option<String>,
    pub flavor_text: Option<String>,
    pub frame_effects: Option<String>,
    pub frame: String,
    pub full_art: bool,
    pub games: String,
    pub highres_image: bool,
    pub illustration_id: Option<String>,
    pub image_status: String,
    pub image_uris: Option<String>,
    pub oversized: bool,
    pub prices: String,
    pub printed_name: Option<String>,
    pub printed_text: Option<String>,
    pub printed_type_line: Option<String>,
    pub promo: bool,
    pub promo_types: Option<String>,
    pub purchase_uris: Option<String>,
    pub rarity: String,
    pub related_uris: String,
    pub released_at: String,
    pub reprint: bool,
    pub scryfall_set_uri: Option<String>,
    pub set_name: String,
    pub set_search_uri: Option<String>,
    pub set_type: String,
    pub set_uri: Option<String>,
    pub set_code: String,
    pub set_id: String,
    pub story_spotlight: bool,
    pub textless: bool,
    pub variation: bool,
    pub variation_of: Option<String>,
    pub security_stamp: Option<String>,
    pub watermark: Option<String>,
    pub preview: Option<String>,
    /// Decoded `games` for the filter. Not a column: the upsert never
    /// writes it and rows read back do not carry it.
    pub(crate) game_list: Vec<String>,
}

impl PrintingRecord {
    pub fn from_card(printing: &Card) -> Result<Self> {
        Ok(Self {
            id: printing.id.clone(),
            oracle_id: printing.require_oracle_id()?.to_string(),
            arena_id: printing.arena_id,
            lang: printing.lang.clone(),
            mtgo_id: printing.mtgo_id,
            mtgo_foil_id: printing.mtgo_foil_id,
            multiverse_ids: encode_optional(printing.multiverse_ids.as_ref())?,
            tcgplayer_id: printing.tcgplayer_id,
            tcgplayer_etched_id: printing.tcgplayer_etched_id,
            cardmarket_id: printing.cardmarket_id,
            object: printing.object.clone(),
            scryfall_uri: uri_text(printing.scryfall_uri.as_ref()),
            uri: uri_text(printing.uri.as_ref()),
            artist: printing.artist.clone(),
            artist_ids: encode_optional(printing.artist_ids.as_ref())?,
            attraction_lights: encode_optional(printing.attraction_lights.as_ref())?,
            booster: printing.booster,
            border_color: printing.border_color.clone(),
            card_back_id: printing.card_back_id.clone(),
            collector_number: printing.collector_number.clone(),
            content_warning: printing.content_warning,
            digital: printing.digital,
            finishes: encode_json(&printing.finishes)?,
            foil: printing.has_finish("foil"),
            nonfoil: printing.has_finish("nonfoil"),
            flavor_name: printing.flavor_name.clone(),
            flavor_text: printing.flavor_text.clone(),
            frame_effects: encode_optional(printing.frame_effects.as_ref())?,
            frame: printing.frame.clone(),
            full_art: printing.full_art,
            games: encode_json(&printing.games)?,
            highres_image: printing.highres_image,
            illustration_id: printing.illustration_id.clone(),
            image_status: printing.image_status.clone(),
            image_uris: encode_optional(printing.image_uris.as_ref())?,
            oversized: printing.oversized,
            prices: encode_json(&printing.prices)?,
            printed_name: printing.printed_name.clone(),
            printed_text: printing.printed_text.clone(),
            printed_type_line: printing.printed_type_line.clone(),
            promo: printing.promo,
            promo_types: encode_optional(printing.promo_types.as_ref())?,
            purchase_uris: encode_optional(printing.purchase_uris.as_ref())?,
            rarity: printing.rarity.clone(),
            related_uris: encode_json(&printing.related_uris)?,
            released_at: printing.released_at.clone(),
            reprint: printing.reprint,
            scryfall_set_uri: uri_text(printing.scryfall_set_uri.as_ref()),
            set_name: printing.set_name.clone(),
            set_search_uri: uri_text(printing.set_search_uri.as_ref()),
            set_type: printing.set_type.clone(),
            set_uri: uri_text(printing.set_uri.as_ref()),
            set_code: printing.set.clone(),
            set_id: printing.set_id.clone(),
            story_spotlight: printing.story_spotlight,
            textless: printing.textless,
            variation: printing.variation,
            variation_of: printing.variation_of.clone(),
            security_stamp: printing.security_stamp.clone(),
            watermark: printing.watermark.clone(),
            preview: encode_optional(printing.preview.as_ref())?,
            game_list: printing.games.clone(),
        })
    }
}

fn uri_text(uri: Option<&UriRef>) -> Option<String> {
    uri.map(|u| u.as_str().to_string())
}

// ── JSON column encoding ───────────────────────────────────────────────────

/// Encode a compound value as JSON text. Empty containers stay explicit.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(SyncError::Encode)
}

/// Encode an optional compound value; `None` becomes SQL NULL
pub fn encode_optional<T: Serialize>(value: Option<&T>) -> Result<Option<String>> {
    value.map(encode_json).transpose()
}

/// Decode a JSON column back into its value
pub fn decode_json<T: DeserializeOwned>(column: &'static str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|source| SyncError::StoredValue { column, source })
}

/// Decode a nullable JSON column; NULL stays unknown rather than empty
pub fn decode_optional<T: DeserializeOwned>(
    column: &'static str,
    text: Option<&str>,
) -> Result<Option<T>> {
    text.map(|t| decode_json(column, t)).transpose()
}

// ── Read path ──────────────────────────────────────────────────────────────

/// One row of `cards LEFT JOIN printings`, as read by the database layer
#[derive(Debug, Clone, Default)]
pub struct StoredCardRow {
    pub oracle_id: String,
    pub name: String,
    pub layout: String,
    pub cmc: f64,
    pub type_line: String,
    pub mana_cost: Option<String>,
    pub oracle_text: Option<String>,
    pub color_identity: String,
    pub colors: Option<String>,
    pub keywords: String,
    pub game_changer: Option<bool>,
    /// `None` when the card has no stored printings
    pub printing_id: Option<String>,
    pub printing_games: Option<String>,
    pub printing_rarity: Option<String>,
}

/// A card as shown to the user, assembled from its stored printings
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub oracle_id: String,
    pub name: String,
    pub layout: String,
    pub cmc: f64,
    pub type_line: String,
    pub mana_cost: Option<String>,
    pub oracle_text: Option<String>,
    pub color_identity: Vec<String>,
    /// `None` when the stored value is NULL (unknown, not colorless)
    pub colors: Option<Vec<String>>,
    pub keywords: Vec<String>,
    pub game_changer: Option<bool>,
    /// Platforms on which at least one printing is available
    pub games: BTreeSet<String>,
    /// For each platform, the rarities its printings were released at
    pub rarities_by_game: BTreeMap<String, BTreeSet<Rarity>>,
    pub printing_count: usize,
}

impl CardView {
    fn from_row(row: &StoredCardRow) -> Result<Self> {
        Ok(Self {
            oracle_id: row.oracle_id.clone(),
            name: row.name.clone(),
            layout: row.layout.clone(),
            cmc: row.cmc,
            type_line: row.type_line.clone(),
            mana_cost: row.mana_cost.clone(),
            oracle_text: row.oracle_text.clone(),
            color_identity: decode_json("color_identity", &row.color_identity)?,
            colors: decode_optional("colors", row.colors.as_deref())?,
            keywords: decode_json("keywords", &row.keywords)?,
            game_changer: row.game_changer,
            games: BTreeSet::new(),
            rarities_by_game: BTreeMap::new(),
            printing_count: 0,
        })
    }

    fn absorb_printing(&mut self, row: &StoredCardRow) -> Result<()> {
        if row.printing_id.is_none() {
            return Ok(());
        }

        let games: Vec<String> =
            decode_optional("games", row.printing_games.as_deref())?.unwrap_or_default();
        let rarity = row.printing_rarity.as_deref().map(Rarity::parse);

        self.printing_count += 1;
        for game in games {
            if let Some(rarity) = rarity {
                self.rarities_by_game
                    .entry(game.clone())
                    .or_default()
                    .insert(rarity);
            }
            self.games.insert(game);
        }
        Ok(())
    }

    pub fn is_available_on(&self, game: &str) -> bool {
        self.games.contains(game)
    }
}

/// Group joined rows by `oracle_id`, unioning each card's printing games.
///
/// Cards keep the order in which they first appear in `rows`. A card whose
/// own columns cannot be decoded is left out; a printing whose `games`
/// cannot be decoded is left out of its card. Both are logged.
pub fn merge_card_views(rows: &[StoredCardRow]) -> Vec<CardView> {
    let mut views: Vec<CardView> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut unreadable: HashSet<&str> = HashSet::new();

    for row in rows {
        if unreadable.contains(row.oracle_id.as_str()) {
            continue;
        }

        let position = match index.get(row.oracle_id.as_str()) {
            Some(&position) => position,
            None => match CardView::from_row(row) {
                Ok(view) => {
                    views.push(view);
                    index.insert(&row.oracle_id, views.len() - 1);
                    views.len() - 1
                }
                Err(e) => {
                    log::warn!("Skipping stored card {} ({}): {}", row.name, row.oracle_id, e);
                    unreadable.insert(&row.oracle_id);
                    continue;
                }
            },
        };

        if let Err(e) = views[position].absorb_printing(row) {
            log::warn!(
                "Skipping stored printing {} of {}: {}",
                row.printing_id.as_deref().unwrap_or_default(),
                row.name,
                e
            );
        }
    }

    views
}
