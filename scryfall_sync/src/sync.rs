//! The fetch → filter → load pass
//!
//! One search, then for every result: fetch all printings, apply the filter,
//! and upsert the accepted card with its printings. Only the initial search
//! can fail the pass; everything after it is logged and skipped per card or
//! per printing.

use crate::client::ScryfallClient;
use crate::database::load_card;
use crate::error::{Result, SyncError};
use crate::filter::should_include;
use crate::normalize::{CardRecord, PrintingRecord};
use mtg_common::{Card, DecodeError};
use rusqlite::Connection;

/// Cards printed on paper and MTGO at common/uncommon but on Arena only at
/// rare or above
pub const DEFAULT_QUERY: &str =
    "(game:paper game:mtgo -game:arena in:common or in:uncommon) game:arena r>=rare";

/// Counters for one sync pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Search results across all pages
    pub found: usize,
    /// Rejected by the filter
    pub skipped: usize,
    /// Printings could not be fetched, or the card row could not be written
    pub failed: usize,
    pub cards_upserted: usize,
    pub printings_upserted: usize,
    pub printings_failed: usize,
}

enum CardOutcome {
    Skipped,
    Loaded {
        printings_upserted: usize,
        printings_failed: usize,
    },
}

/// Run one full pass for `query` against `conn`
pub async fn run_sync(
    client: &ScryfallClient,
    conn: &Connection,
    query: &str,
) -> Result<SyncReport> {
    log::info!("Searching for query: {}", query);
    let cards = client.search_all_cards(query).await?;

    let mut report = SyncReport {
        found: cards.len(),
        ..Default::default()
    };
    log::info!("Found {} cards", report.found);

    for card in &cards {
        log::info!("Fetching printings for {}...", card.name);
        match sync_card(client, conn, card).await {
            Ok(CardOutcome::Skipped) => {
                report.skipped += 1;
                log::info!("Skipping {} - has common/uncommon Arena printing", card.name);
            }
            Ok(CardOutcome::Loaded {
                printings_upserted,
                printings_failed,
            }) => {
                report.cards_upserted += 1;
                report.printings_upserted += printings_upserted;
                report.printings_failed += printings_failed;
            }
            Err(e) => {
                report.failed += 1;
                log::error!("Error processing {}: {}", card.name, e);
            }
        }
    }

    log::info!(
        "Inserted {} filtered cards ({} printings) into database; {} skipped, {} failed",
        report.cards_upserted,
        report.printings_upserted,
        report.skipped,
        report.failed
    );
    Ok(report)
}

async fn sync_card(client: &ScryfallClient, conn: &Connection, card: &Card) -> Result<CardOutcome> {
    let prints_uri = card
        .prints_search_uri
        .as_ref()
        .ok_or_else(|| DecodeError::MissingField {
            field: "prints_search_uri",
            object: "card",
            id: card.id.clone(),
        })?;
    let printings = client.get_card_printings(prints_uri).await?;

    if !should_include(&printings) {
        return Ok(CardOutcome::Skipped);
    }

    let card_record = CardRecord::from_card(card)?;

    let mut records = Vec::with_capacity(printings.len());
    let mut printings_failed = 0;
    for printing in &printings {
        match PrintingRecord::from_card(printing) {
            Ok(record) => records.push(record),
            Err(e) => {
                printings_failed += 1;
                log::warn!(
                    "Error preparing printing {} ({}): {}",
                    printing.name,
                    printing.set,
                    e
                );
            }
        }
    }

    let loaded = load_card(conn, &card_record, &records).map_err(SyncError::from)?;
    Ok(CardOutcome::Loaded {
        printings_upserted: loaded.printings_upserted,
        printings_failed: printings_failed + loaded.printings_failed,
    })
}
