//! Database operations for the card store
//!
//! Uses parameterized queries exclusively (no SQL string concatenation).
//! Every upsert is its own statement: a failing row does not roll back the
//! rows written before it.

use crate::normalize::{merge_card_views, CardRecord, CardView, PrintingRecord, StoredCardRow};
use rusqlite::{params, Connection};
use std::path::Path;

/// Result type for database operations
pub type DbResult<T> = rusqlite::Result<T>;

/// Open (or create) the store at `path` and make sure the schema exists
pub fn open_database(path: &Path) -> DbResult<Connection> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Initialize the database schema
///
/// Creates tables if they don't exist:
/// - `cards`: one row per oracle identity
/// - `printings`: one row per printing, referencing `cards`
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;

        -- Oracle-level card identity
        CREATE TABLE IF NOT EXISTS cards (
            oracle_id         TEXT NOT NULL PRIMARY KEY,
            name              TEXT NOT NULL,
            layout            TEXT NOT NULL,
            prints_search_uri TEXT,
            rulings_uri       TEXT,
            all_parts         TEXT,
            card_faces        TEXT,
            cmc               REAL NOT NULL,
            color_identity    TEXT NOT NULL,
            color_indicator   TEXT,
            colors            TEXT,
            defense           TEXT,
            edhrec_rank       INTEGER,
            game_changer      INTEGER,
            hand_modifier     TEXT,
            keywords          TEXT NOT NULL,
            legalities        TEXT NOT NULL,
            life_modifier     TEXT,
            loyalty           TEXT,
            mana_cost         TEXT,
            oracle_text       TEXT,
            penny_rank        INTEGER,
            power             TEXT,
            produced_mana     TEXT,
            reserved          INTEGER NOT NULL,
            toughness         TEXT,
            type_line         TEXT NOT NULL,
            updated_at        TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_cards_name ON cards(name);

        -- One row per printing; compound fields are JSON text
        CREATE TABLE IF NOT EXISTS printings (
            id                  TEXT NOT NULL PRIMARY KEY,
            oracle_id           TEXT NOT NULL REFERENCES cards(oracle_id),
            arena_id            INTEGER,
            lang                TEXT NOT NULL,
            mtgo_id             INTEGER,
            mtgo_foil_id        INTEGER,
            multiverse_ids      TEXT,
            tcgplayer_id        INTEGER,
            tcgplayer_etched_id INTEGER,
            cardmarket_id       INTEGER,
            object              TEXT NOT NULL,
            scryfall_uri        TEXT,
            uri                 TEXT,
            artist              TEXT,
            artist_ids          TEXT,
            attraction_lights   TEXT,
            booster             INTEGER NOT NULL,
            border_color        TEXT NOT NULL,
            card_back_id        TEXT NOT NULL,
            collector_number    TEXT NOT NULL,
            content_warning     INTEGER,
            digital             INTEGER NOT NULL,
            finishes            TEXT NOT NULL,
            foil                INTEGER NOT NULL,
            nonfoil             INTEGER NOT NULL,
            flavor_name         TEXT,
            flavor_text         TEXT,
            frame_effects       TEXT,
            frame               TEXT NOT NULL,
            full_art            INTEGER NOT NULL,
            games               TEXT NOT NULL,
            highres_image       INTEGER NOT NULL,
            illustration_id     TEXT,
            image_status        TEXT NOT NULL,
            image_uris          TEXT,
            oversized           INTEGER NOT NULL,
            prices              TEXT NOT NULL,
            printed_name        TEXT,
            printed_text        TEXT,
            printed_type_line   TEXT,
            promo               INTEGER NOT NULL,
            promo_types         TEXT,
            purchase_uris       TEXT,
            rarity              TEXT NOT NULL,
            related_uris        TEXT NOT NULL,
            released_at         TEXT NOT NULL,
            reprint             INTEGER NOT NULL,
            scryfall_set_uri    TEXT,
            set_name            TEXT NOT NULL,
            set_search_uri      TEXT,
            set_type            TEXT NOT NULL,
            set_uri             TEXT,
            set_code            TEXT NOT NULL,
            set_id              TEXT NOT NULL,
            story_spotlight     INTEGER NOT NULL,
            textless            INTEGER NOT NULL,
            variation           INTEGER NOT NULL,
            variation_of        TEXT,
            security_stamp      TEXT,
            watermark           TEXT,
            preview             TEXT,
            updated_at          TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_printings_oracle_id ON printings(oracle_id);
        CREATE INDEX IF NOT EXISTS idx_printings_set_code ON printings(set_code);
        CREATE INDEX IF NOT EXISTS idx_printings_rarity ON printings(rarity);
        CREATE INDEX IF NOT EXISTS idx_printings_games ON printings(games);
        ",
    )?;

    log::info!("Database schema initialized");
    Ok(())
}

/// Insert or overwrite the oracle-level row for a card
pub fn upsert_card(conn: &Connection, card: &CardRecord) -> DbResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO cards (
            oracle_id, name, layout, prints_search_uri, rulings_uri, all_parts,
            card_faces, cmc, color_identity, color_indicator, colors, defense,
            edhrec_rank, game_changer, hand_modifier, keywords, legalities,
            life_modifier, loyalty, mana_cost, oracle_text, penny_rank, power,
            produced_mana, reserved, toughness, type_line
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
            ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27
        )
        ON CONFLICT(oracle_id) DO UPDATE SET
            name              = excluded.name,
            layout            = excluded.layout,
            prints_search_uri = excluded.prints_search_uri,
            rulings_uri       = excluded.rulings_uri,
            all_parts         = excluded.all_parts,
            card_faces        = excluded.card_faces,
            cmc               = excluded.cmc,
            color_identity    = excluded.color_identity,
            color_indicator   = excluded.color_indicator,
            colors            = excluded.colors,
            defense           = excluded.defense,
            edhrec_rank       = excluded.edhrec_rank,
            game_changer      = excluded.game_changer,
            hand_modifier     = excluded.hand_modifier,
            keywords          = excluded.keywords,
            legalities        = excluded.legalities,
            life_modifier     = excluded.life_modifier,
            loyalty           = excluded.loyalty,
            mana_cost         = excluded.mana_cost,
            oracle_text       = excluded.oracle_text,
            penny_rank        = excluded.penny_rank,
            power             = excluded.power,
            produced_mana     = excluded.produced_mana,
            reserved          = excluded.reserved,
            toughness         = excluded.toughness,
            type_line         = excluded.type_line,
            updated_at        = datetime('now')",
    )?;

    stmt.execute(params![
        card.oracle_id,
        card.name,
        card.layout,
        card.prints_search_uri,
        card.rulings_uri,
        card.all_parts,
        card.card_faces,
        card.cmc,
        card.color_identity,
        card.color_indicator,
        card.colors,
        card.defense,
        card.edhrec_rank,
        card.game_changer,
        card.hand_modifier,
        card.keywords,
        card.legalities,
        card.life_modifier,
        card.loyalty,
        card.mana_cost,
        card.oracle_text,
        card.penny_rank,
        card.power,
        card.produced_mana,
        card.reserved,
        card.toughness,
        card.type_line,
    ])?;
    Ok(())
}

/// Insert or overwrite one printing row. Its card must already be stored.
pub fn upsert_printing(conn: &Connection, printing: &PrintingRecord) -> DbResult<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO printings (
            id, oracle_id, arena_id, lang, mtgo_id, mtgo_foil_id, multiverse_ids,
            tcgplayer_id, tcgplayer_etched_id, cardmarket_id, object, scryfall_uri,
            uri, artist, artist_ids, attraction_lights, booster, border_color,
            card_back_id, collector_number, content_warning, digital, finishes, foil,
            nonfoil, flavor_name, flavor_text, frame_effects, frame, full_art, games,
            highres_image, illustration_id, image_status, image_uris, oversized,
            prices, printed_name, printed_text, printed_type_line, promo, promo_types,
            purchase_uris, rarity, related_uris, released_at, reprint,
            scryfall_set_uri, set_name, set_search_uri, set_type, set_uri, set_code,
            set_id, story_spotlight, textless, variation, variation_of, security_stamp,
            watermark, preview
        ) VALUES (
            ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
            ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28, ?29, ?30, ?31, ?32,
            ?33, ?34, ?35, ?36, ?37, ?38, ?39, ?40, ?41, ?42, ?43, ?44, ?45, ?46, ?47,
            ?48, ?49, ?50, ?51, ?52, ?53, ?54, ?55, ?56, ?57, ?58, ?59, ?60, ?61
        )
        ON CONFLICT(id) DO UPDATE SET
            oracle_id           = excluded.oracle_id,
            arena_id            = excluded.arena_id,
            lang                = excluded.lang,
            mtgo_id             = excluded.mtgo_id,
            mtgo_foil_id        = excluded.mtgo_foil_id,
            multiverse_ids      = excluded.multiverse_ids,
            tcgplayer_id        = excluded.tcgplayer_id,
            tcgplayer_etched_id = excluded.tcgplayer_etched_id,
            cardmarket_id       = excluded.cardmarket_id,
            object              = excluded.object,
            scryfall_uri        = excluded.scryfall_uri,
            uri                 = excluded.uri,
            artist              = excluded.artist,
            artist_ids          = excluded.artist_ids,
            attraction_lights   = excluded.attraction_lights,
            booster             = excluded.booster,
            border_color        = excluded.border_color,
            card_back_id        = excluded.card_back_id,
            collector_number    = excluded.collector_number,
            content_warning     = excluded.content_warning,
            digital             = excluded.digital,
            finishes            = excluded.finishes,
            foil                = excluded.foil,
            nonfoil             = excluded.nonfoil,
            flavor_name         = excluded.flavor_name,
            flavor_text         = excluded.flavor_text,
            frame_effects       = excluded.frame_effects,
            frame               = excluded.frame,
            full_art            = excluded.full_art,
            games               = excluded.games,
            highres_image       = excluded.highres_image,
            illustration_id     = excluded.illustration_id,
            image_status        = excluded.image_status,
            image_uris          = excluded.image_uris,
            oversized           = excluded.oversized,
            prices              = excluded.prices,
            printed_name        = excluded.printed_name,
            printed_text        = excluded.printed_text,
            printed_type_line   = excluded.printed_type_line,
            promo               = excluded.promo,
            promo_types         = excluded.promo_types,
            purchase_uris       = excluded.purchase_uris,
            rarity              = excluded.rarity,
            related_uris        = excluded.related_uris,
            released_at         = excluded.released_at,
            reprint             = excluded.reprint,
            scryfall_set_uri    = excluded.scryfall_set_uri,
            set_name            = excluded.set_name,
            set_search_uri      = excluded.set_search_uri,
            set_type            = excluded.set_type,
            set_uri             = excluded.set_uri,
            set_code            = excluded.set_code,
            set_id              = excluded.set_id,
            story_spotlight     = excluded.story_spotlight,
            textless            = excluded.textless,
            variation           = excluded.variation,
            variation_of        = excluded.variation_of,
            security_stamp      = excluded.security_stamp,
            watermark           = excluded.watermark,
            preview             = excluded.preview,
            updated_at          = datetime('now')",
    )?;

    stmt.execute(params![
        printing.id,
        printing.oracle_id,
        printing.arena_id,
        printing.lang,
        printing.mtgo_id,
        printing.mtgo_foil_id,
        printing.multiverse_ids,
        printing.tcgplayer_id,
        printing.tcgplayer_etched_id,
        printing.cardmarket_id,
        printing.object,
        printing.scryfall_uri,
        printing.uri,
        printing.artist,
        printing.artist_ids,
        printing.attraction_lights,
        printing.booster,
        printing.border_color,
        printing.card_back_id,
        printing.collector_number,
        printing.content_warning,
        printing.digital,
        printing.finishes,
        printing.foil,
        printing.nonfoil,
        printing.flavor_name,
        printing.flavor_text,
        printing.frame_effects,
        printing.frame,
        printing.full_art,
        printing.games,
        printing.highres_image,
        printing.illustration_id,
        printing.image_status,
        printing.image_uris,
        printing.oversized,
        printing.prices,
        printing.printed_name,
        printing.printed_text,
        printing.printed_type_line,
        printing.promo,
        printing.promo_types,
        printing.purchase_uris,
        printing.rarity,
        printing.related_uris,
        printing.released_at,
        printing.reprint,
        printing.scryfall_set_uri,
        printing.set_name,
        printing.set_search_uri,
        printing.set_type,
        printing.set_uri,
        printing.set_code,
        printing.set_id,
        printing.story_spotlight,
        printing.textless,
        printing.variation,
        printing.variation_of,
        printing.security_stamp,
        printing.watermark,
        printing.preview,
    ])?;
    Ok(())
}

/// Result of loading one card and its printings
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoadResult {
    /// Number of printing rows written
    pub printings_upserted: usize,
    /// Number of printing rows that failed and were skipped
    pub printings_failed: usize,
}

/// Upsert a card, then each of its printings.
///
/// A failing card row is returned as an error and no printings are written.
/// A failing printing row is logged and skipped; the remaining printings
/// are still written.
pub fn load_card(
    conn: &Connection,
    card: &CardRecord,
    printings: &[PrintingRecord],
) -> DbResult<LoadResult> {
    upsert_card(conn, card)?;

    let mut result = LoadResult::default();
    for printing in printings {
        match upsert_printing(conn, printing) {
            Ok(()) => {
                result.printings_upserted += 1;
                log::debug!(
                    "Upserted {} ({} - {})",
                    card.name,
                    printing.set_code,
                    printing.rarity
                );
            }
            Err(e) => {
                result.printings_failed += 1;
                log::warn!(
                    "Error inserting printing {} ({}): {}",
                    card.name,
                    printing.set_code,
                    e
                );
            }
        }
    }

    Ok(result)
}

/// Read every stored card joined with its printings' games and rarity
pub fn load_card_rows(conn: &Connection) -> DbResult<Vec<StoredCardRow>> {
    let mut stmt = conn.prepare(
        "SELECT c.oracle_id, c.name, c.layout, c.cmc, c.type_line, c.mana_cost,
                c.oracle_text, c.color_identity, c.colors, c.keywords, c.game_changer,
                p.id, p.games, p.rarity
         FROM cards c
         LEFT JOIN printings p ON p.oracle_id = c.oracle_id
         ORDER BY c.name COLLATE NOCASE, c.oracle_id, p.released_at, p.id",
    )?;

    let rows: DbResult<Vec<StoredCardRow>> = stmt
        .query_map([], |row| {
            Ok(StoredCardRow {
                oracle_id: row.get(0)?,
                name: row.get(1)?,
                layout: row.get(2)?,
                cmc: row.get(3)?,
                type_line: row.get(4)?,
                mana_cost: row.get(5)?,
                oracle_text: row.get(6)?,
                color_identity: row.get(7)?,
                colors: row.get(8)?,
                keywords: row.get(9)?,
                game_changer: row.get(10)?,
                printing_id: row.get(11)?,
                printing_games: row.get(12)?,
                printing_rarity: row.get(13)?,
            })
        })?
        .collect();
    rows
}

/// Stored cards with their printing facts merged, ordered by name.
///
/// Rows whose stored JSON cannot be read are logged and left out.
pub fn load_card_views(conn: &Connection) -> DbResult<Vec<CardView>> {
    let rows = load_card_rows(conn)?;
    Ok(merge_card_views(&rows))
}

/// Printing ids stored for one oracle identity
pub fn get_printings_for_card(conn: &Connection, oracle_id: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT id FROM printings WHERE oracle_id = ?1 ORDER BY id")?;
    let ids: DbResult<Vec<String>> = stmt
        .query_map(params![oracle_id], |row| row.get(0))?
        .collect();
    ids
}

/// Get total count of cards in database
pub fn get_card_count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM cards", [], |row| row.get(0))
}

/// Get total count of printings in database
pub fn get_printing_count(conn: &Connection) -> DbResult<i64> {
    conn.query_row("SELECT COUNT(*) FROM printings", [], |row| row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mtg_common::Card;

    /// Create an in-memory database for testing
    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn wire_card(json: serde_json::Value) -> Card {
        mtg_common::decode(&json.to_string()).unwrap()
    }

    fn make_test_card(oracle_id: &str, name: &str) -> CardRecord {
        CardRecord::from_card(&wire_card(serde_json::json!({
            "id": format!("{oracle_id}-print"),
            "oracle_id": oracle_id,
            "name": name,
            "layout": "normal",
            "type_line": "Instant",
            "color_identity": ["R"],
            "colors": ["R"]
        })))
        .unwrap()
    }

    fn make_test_printing(id: &str, oracle_id: &str, games: &[&str], rarity: &str) -> PrintingRecord {
        PrintingRecord::from_card(&wire_card(serde_json::json!({
            "id": id,
            "oracle_id": oracle_id,
            "name": "Test",
            "set": "tst",
            "rarity": rarity,
            "games": games,
            "finishes": ["nonfoil"],
            "released_at": "2024-01-01"
        })))
        .unwrap()
    }

    #[test]
    fn init_schema_creates_tables() {
        let conn = test_db();

        for table in ["cards", "printings"] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                    params![table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {table}");
        }
    }

    #[test]
    fn init_schema_creates_indexes() {
        let conn = test_db();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name IN
                 ('idx_cards_name', 'idx_printings_set_code', 'idx_printings_rarity', 'idx_printings_games')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn init_schema_is_idempotent() {
        let conn = test_db();
        init_schema(&conn).unwrap();
    }

    #[test]
    fn upsert_card_inserts_new_card() {
        let conn = test_db();
        upsert_card(&conn, &make_test_card("o1", "Lightning Bolt")).unwrap();

        assert_eq!(get_card_count(&conn).unwrap(), 1);
        let (name, colors): (String, Option<String>) = conn
            .query_row(
                "SELECT name, colors FROM cards WHERE oracle_id = ?1",
                params!["o1"],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(name, "Lightning Bolt");
        assert_eq!(colors.as_deref(), Some(r#"["R"]"#));
    }

    #[test]
    fn upsert_card_overwrites_existing() {
        let conn = test_db();
        upsert_card(&conn, &make_test_card("o1", "Lightning Bolt")).unwrap();
        upsert_card(&conn, &make_test_card("o1", "Lightning Bolt (Updated)")).unwrap();

        assert_eq!(get_card_count(&conn).unwrap(), 1);
        let name: String = conn
            .query_row(
                "SELECT name FROM cards WHERE oracle_id = ?1",
                params!["o1"],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(name, "Lightning Bolt (Updated)");
    }

    #[test]
    fn upsert_card_keeps_existing_printings() {
        let conn = test_db();
        upsert_card(&conn, &make_test_card("o1", "Bolt")).unwrap();
        upsert_printing(&conn, &make_test_printing("p1", "o1", &["paper"], "rare")).unwrap();

        upsert_card(&conn, &make_test_card("o1", "Bolt v2")).unwrap();
        assert_eq!(get_printings_for_card(&conn, "o1").unwrap(), vec!["p1".to_string()]);
    }

    #[test]
    fn upsert_printing_overwrites_existing() {
        let conn = test_db();
        upsert_card(&conn, &make_test_card("o1", "Bolt")).unwrap();
        upsert_printing(&conn, &make_test_printing("p1", "o1", &["paper"], "rare")).unwrap();
        upsert_printing(&conn, &make_test_printing("p1", "o1", &["paper", "mtgo"], "mythic"))
            .unwrap();

        assert_eq!(get_printing_count(&conn).unwrap(), 1);
        let (games, rarity): (String, String) = conn
            .query_row(
                "SELECT games, rarity FROM printings WHERE id = ?1",
                params!["p1"],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(games, r#"["paper","mtgo"]"#);
        assert_eq!(rarity, "mythic");
    }

    #[test]
    fn upsert_printing_stores_derived_finish_flags() {
        let conn = test_db();
        upsert_card(&conn, &make_test_card("o1", "Bolt")).unwrap();
        upsert_printing(&conn, &make_test_printing("p1", "o1", &["paper"], "rare")).unwrap();

        let (foil, nonfoil): (bool, bool) = conn
            .query_row(
                "SELECT foil, nonfoil FROM printings WHERE id = ?1",
                params!["p1"],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert!(!foil);
        assert!(nonfoil);
    }

    #[test]
    fn printing_without_card_violates_foreign_key() {
        let conn = test_db();
        let result = upsert_printing(&conn, &make_test_printing("p1", "ghost", &["paper"], "rare"));
        assert!(result.is_err());
        assert_eq!(get_printing_count(&conn).unwrap(), 0);
    }

    #[test]
    fn load_card_skips_failing_printing_and_continues() {
        let conn = test_db();
        let card = make_test_card("o1", "Bolt");
        let printings = vec![
            make_test_printing("p1", "o1", &["paper"], "rare"),
            make_test_printing("p2", "missing-oracle", &["paper"], "rare"),
            make_test_printing("p3", "o1", &["mtgo"], "rare"),
        ];

        let result = load_card(&conn, &card, &printings).unwrap();
        assert_eq!(
            result,
            LoadResult {
                printings_upserted: 2,
                printings_failed: 1
            }
        );
        assert_eq!(
            get_printings_for_card(&conn, "o1").unwrap(),
            vec!["p1".to_string(), "p3".to_string()]
        );
    }

    #[test]
    fn load_card_twice_leaves_one_row_per_key() {
        let conn = test_db();
        let card = make_test_card("o1", "Bolt");
        let printings = vec![make_test_printing("p1", "o1", &["paper"], "mythic")];

        load_card(&conn, &card, &printings).unwrap();
        load_card(&conn, &card, &printings).unwrap();

        assert_eq!(get_card_count(&conn).unwrap(), 1);
        assert_eq!(get_printing_count(&conn).unwrap(), 1);
    }

    #[test]
    fn load_card_views_skips_unreadable_printing() {
        let conn = test_db();
        load_card(
            &conn,
            &make_test_card("o1", "Bolt"),
            &[
                make_test_printing("p1", "o1", &["paper"], "rare"),
                make_test_printing("p2", "o1", &["mtgo"], "rare"),
            ],
        )
        .unwrap();
        load_card(
            &conn,
            &make_test_card("o2", "Counterspell"),
            &[make_test_printing("p3", "o2", &["paper"], "mythic")],
        )
        .unwrap();

        // Comma-joined value left behind by an older writer
        conn.execute(
            "UPDATE printings SET games = 'paper,arena' WHERE id = ?1",
            params!["p2"],
        )
        .unwrap();

        let views = load_card_views(&conn).unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, "Bolt");
        assert_eq!(views[0].printing_count, 1);
        assert!(!views[0].is_available_on("arena"));
        assert_eq!(views[1].name, "Counterspell");
    }

    #[test]
    fn load_card_views_skips_unreadable_card() {
        let conn = test_db();
        upsert_card(&conn, &make_test_card("o1", "Bolt")).unwrap();
        upsert_card(&conn, &make_test_card("o2", "Counterspell")).unwrap();
        conn.execute(
            "UPDATE cards SET color_identity = 'R' WHERE oracle_id = ?1",
            params!["o1"],
        )
        .unwrap();

        let views = load_card_views(&conn).unwrap();
        let names: Vec<&str> = views.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Counterspell"]);
    }

    #[test]
    fn load_card_views_unions_games() {
        let conn = test_db();
        let card = make_test_card("o1", "Bolt");
        load_card(
            &conn,
            &card,
            &[
                make_test_printing("p1", "o1", &["paper", "mtgo"], "rare"),
                make_test_printing("p2", "o1", &["paper", "arena"], "mythic"),
            ],
        )
        .unwrap();
        upsert_card(&conn, &make_test_card("o2", "Alpha Strike")).unwrap();

        let views = load_card_views(&conn).unwrap();
        assert_eq!(views.len(), 2);
        // Ordered by name
        assert_eq!(views[0].name, "Alpha Strike");
        assert!(views[0].games.is_empty());

        let games: Vec<&str> = views[1].games.iter().map(String::as_str).collect();
        assert_eq!(games, vec!["arena", "mtgo", "paper"]);
        assert_eq!(views[1].printing_count, 2);
        assert_eq!(views[1].colors, Some(vec!["R".to_string()]));
    }

    #[test]
    fn counts_start_at_zero() {
        let conn = test_db();
        assert_eq!(get_card_count(&conn).unwrap(), 0);
        assert_eq!(get_printing_count(&conn).unwrap(), 0);
    }

    #[test]
    fn open_database_creates_file_and_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scryfall.db");

        let conn = open_database(&path).unwrap();
        upsert_card(&conn, &make_test_card("o1", "Bolt")).unwrap();
        drop(conn);

        let reopened = open_database(&path).unwrap();
        assert_eq!(get_card_count(&reopened).unwrap(), 1);
    }
}
