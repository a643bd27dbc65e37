//! Scryfall Sync - filtered card store
//!
//! Searches the Scryfall API, keeps the cards that have no common or
//! uncommon printing on Arena, and stores them with all their printings in
//! a two-table SQLite database.

pub mod client;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod formatters;
pub mod menu;
pub mod normalize;
pub mod sync;

pub use client::ScryfallClient;
pub use config::{default_db_path, ClientConfig};
pub use database::{
    get_card_count, get_printing_count, get_printings_for_card, init_schema, load_card,
    load_card_rows, load_card_views, open_database, upsert_card, upsert_printing, LoadResult,
};
pub use error::{Error, ErrorKind, Result, SyncError};
pub use filter::should_include;
pub use normalize::{merge_card_views, CardRecord, CardView, PrintingRecord};
pub use sync::{run_sync, SyncReport, DEFAULT_QUERY};
