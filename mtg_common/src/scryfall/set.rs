use crate::uri::UriRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Computer-readable set classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetType {
    Core,
    Expansion,
    Masters,
    Eternal,
    Alchemy,
    Masterpiece,
    Arsenal,
    FromTheVault,
    Spellbook,
    PremiumDeck,
    DuelDeck,
    DraftInnovation,
    TreasureChest,
    Commander,
    Planechase,
    Archenemy,
    Vanguard,
    Funny,
    Starter,
    Box,
    Promo,
    Token,
    Memorabilia,
    Minigame,
    /// Any classification added after this list was written
    #[serde(other)]
    #[default]
    Unknown,
}

impl SetType {
    pub fn as_str(self) -> &'static str {
        match self {
            SetType::Core => "core",
            SetType::Expansion => "expansion",
            SetType::Masters => "masters",
            SetType::Eternal => "eternal",
            SetType::Alchemy => "alchemy",
            SetType::Masterpiece => "masterpiece",
            SetType::Arsenal => "arsenal",
            SetType::FromTheVault => "from_the_vault",
            SetType::Spellbook => "spellbook",
            SetType::PremiumDeck => "premium_deck",
            SetType::DuelDeck => "duel_deck",
            SetType::DraftInnovation => "draft_innovation",
            SetType::TreasureChest => "treasure_chest",
            SetType::Commander => "commander",
            SetType::Planechase => "planechase",
            SetType::Archenemy => "archenemy",
            SetType::Vanguard => "vanguard",
            SetType::Funny => "funny",
            SetType::Starter => "starter",
            SetType::Box => "box",
            SetType::Promo => "promo",
            SetType::Token => "token",
            SetType::Memorabilia => "memorabilia",
            SetType::Minigame => "minigame",
            SetType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scryfall set object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Set {
    #[serde(default)]
    pub object: String,
    pub id: String,
    pub code: String,
    pub mtgo_code: Option<String>,
    pub arena_code: Option<String>,
    pub tcgplayer_id: Option<u64>,
    pub name: String,
    #[serde(default)]
    pub set_type: SetType,
    pub released_at: Option<String>,
    pub block_code: Option<String>,
    pub block: Option<String>,
    pub parent_set_code: Option<String>,
    #[serde(default)]
    pub card_count: u32,
    pub printed_size: Option<u32>,
    #[serde(default)]
    pub digital: bool,
    #[serde(default)]
    pub foil_only: bool,
    #[serde(default)]
    pub nonfoil_only: bool,
    pub scryfall_uri: Option<UriRef>,
    pub uri: Option<UriRef>,
    pub icon_svg_uri: Option<UriRef>,
    pub search_uri: Option<UriRef>,
}
