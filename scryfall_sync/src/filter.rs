//! Which fetched cards are worth storing
//!
//! A card is kept only if none of its printings was released on Arena at
//! common or uncommon.

use crate::normalize::PrintingRecord;
use mtg_common::{Card, Rarity};

pub const ARENA: &str = "arena";

/// What the filter needs to know about one printing
pub trait Availability {
    fn games(&self) -> &[String];
    fn rarity(&self) -> &str;
}

impl Availability for Card {
    fn games(&self) -> &[String] {
        &self.games
    }

    fn rarity(&self) -> &str {
        &self.rarity
    }
}

impl Availability for PrintingRecord {
    fn games(&self) -> &[String] {
        &self.game_list
    }

    fn rarity(&self) -> &str {
        &self.rarity
    }
}

/// True for a printing available on Arena at common or uncommon
pub fn is_arena_common<P: Availability + ?Sized>(printing: &P) -> bool {
    printing.games().iter().any(|game| game == ARENA)
        && Rarity::parse(printing.rarity()).is_common_or_uncommon()
}

/// Decide whether a card, given all of its printings, should be stored.
///
/// Accepts vacuously when there are no printings.
pub fn should_include<P: Availability>(printings: &[P]) -> bool {
    !printings.iter().any(|printing| is_arena_common(printing))
}
