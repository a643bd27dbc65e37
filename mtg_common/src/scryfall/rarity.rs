use std::fmt;

/// Rarity classes in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Special,
    Bonus,
    Other,
}

impl Rarity {
    pub fn parse(value: &str) -> Self {
        match value {
            "common" => Rarity::Common,
            "uncommon" => Rarity::Uncommon,
            "rare" => Rarity::Rare,
            "mythic" => Rarity::Mythic,
            "special" => Rarity::Special,
            "bonus" => Rarity::Bonus,
            _ => Rarity::Other,
        }
    }

    /// Single-letter form used in listings
    pub fn abbrev(self) -> &'static str {
        match self {
            Rarity::Common => "c",
            Rarity::Uncommon => "u",
            Rarity::Rare => "r",
            Rarity::Mythic => "m",
            Rarity::Special | Rarity::Bonus | Rarity::Other => "?",
        }
    }

    pub fn is_common_or_uncommon(self) -> bool {
        matches!(self, Rarity::Common | Rarity::Uncommon)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
            Rarity::Special => "special",
            Rarity::Bonus => "bonus",
            Rarity::Other => "other",
        };
        f.write_str(name)
    }
}
