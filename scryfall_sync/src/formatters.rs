use crate::normalize::CardView;
use crate::sync::SyncReport;
use mtg_common::{Card, Set};

/// Platforms shown in the card table, in column order
pub const TABLE_GAMES: [(&str, &str); 3] = [("paper", "Paper"), ("mtgo", "MTGO"), ("arena", "Arena")];

/// Rarity abbreviations of a card's printings on one platform, lowest first.
/// Empty when the card has no printing there.
pub fn rarity_cell(view: &CardView, game: &str) -> String {
    let Some(rarities) = view.rarities_by_game.get(game) else {
        return String::new();
    };

    let mut abbrevs: Vec<&str> = Vec::new();
    for rarity in rarities {
        let abbrev = rarity.abbrev();
        if !abbrevs.contains(&abbrev) {
            abbrevs.push(abbrev);
        }
    }
    abbrevs.join(", ")
}

pub fn format_card_table(views: &[CardView]) -> String {
    let mut output = String::new();

    let rows: Vec<(&str, Vec<String>)> = views
        .iter()
        .map(|view| {
            let cells = TABLE_GAMES
                .iter()
                .map(|(game, _)| rarity_cell(view, game))
                .collect();
            (view.name.as_str(), cells)
        })
        .collect();

    // Calculate column widths for alignment
    let mut name_width = "Card Name".len();
    let mut cell_widths: Vec<usize> = TABLE_GAMES.iter().map(|(_, title)| title.len()).collect();
    for (name, cells) in &rows {
        name_width = name_width.max(name.chars().count());
        for (width, cell) in cell_widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.len());
        }
    }

    output.push_str(&format!("{:<name_width$}", "Card Name"));
    for ((_, title), &width) in TABLE_GAMES.iter().zip(&cell_widths) {
        output.push_str(&format!("  {title:<width$}"));
    }
    output.push('\n');

    output.push_str(&"-".repeat(name_width));
    for width in &cell_widths {
        output.push_str("  ");
        output.push_str(&"-".repeat(*width));
    }
    output.push('\n');

    for (name, cells) in &rows {
        output.push_str(&format!("{name:<name_width$}"));
        for (cell, &width) in cells.iter().zip(&cell_widths) {
            output.push_str(&format!("  {cell:<width$}"));
        }
        output.push('\n');
    }

    output.push_str(&format!("\n{} cards\n", views.len()));
    output
}

/// One line per card (name, set, rarity), at most `limit` lines
pub fn format_search_results(cards: &[Card], limit: usize) -> String {
    if cards.is_empty() {
        return "No cards found.\n".to_string();
    }

    let mut output = String::new();
    for card in cards.iter().take(limit) {
        output.push_str(&format!(
            "- {} ({}, {})\n",
            card.name,
            card.set.to_uppercase(),
            card.rarity
        ));
    }

    if cards.len() > limit {
        output.push_str(&format!("... and {} more\n", cards.len() - limit));
    }
    output
}

pub fn format_set(set: &Set) -> String {
    let mut output = format!("{} ({})\n", set.name, set.code.to_uppercase());
    output.push_str(&format!("  Type: {}\n", set.set_type));
    if let Some(released_at) = &set.released_at {
        output.push_str(&format!("  Released: {released_at}\n"));
    }
    if let Some(block) = &set.block {
        output.push_str(&format!("  Block: {block}\n"));
    }
    output.push_str(&format!("  Cards: {}\n", set.card_count));
    if set.digital {
        output.push_str("  Digital only\n");
    }
    if let Some(uri) = &set.scryfall_uri {
        output.push_str(&format!("  {uri}\n"));
    }
    output
}

pub fn format_card_detail(card: &Card) -> String {
    let mut output = card.name.clone();
    if let Some(mana_cost) = card.mana_cost.as_deref().filter(|m| !m.is_empty()) {
        output.push_str(&format!(" {mana_cost}"));
    }
    output.push('\n');

    if !card.type_line.is_empty() {
        output.push_str(&format!("{}\n", card.type_line));
    }

    match &card.card_faces {
        Some(faces) if card.oracle_text.is_none() => {
            for face in faces {
                output.push_str(&format!("  // {}", face.name));
                if !face.mana_cost.is_empty() {
                    output.push_str(&format!(" {}", face.mana_cost));
                }
                output.push('\n');
                if let Some(text) = &face.oracle_text {
                    output.push_str(&format!("  {text}\n"));
                }
            }
        }
        _ => {
            if let Some(text) = &card.oracle_text {
                output.push_str(&format!("{text}\n"));
            }
        }
    }

    if let (Some(power), Some(toughness)) = (&card.power, &card.toughness) {
        output.push_str(&format!("{power}/{toughness}\n"));
    }
    if let Some(loyalty) = &card.loyalty {
        output.push_str(&format!("Loyalty: {loyalty}\n"));
    }

    output.push_str(&format!(
        "{} #{} ({})",
        card.set.to_uppercase(),
        card.collector_number,
        card.rarity
    ));
    if !card.games.is_empty() {
        output.push_str(&format!(" - {}", card.games.join(", ")));
    }
    output.push('\n');
    output
}

pub fn format_sync_report(report: &SyncReport) -> String {
    let mut output = format!(
        "Inserted {} filtered cards ({} printings) into database\n",
        report.cards_upserted, report.printings_upserted
    );
    output.push_str(&format!(
        "  {} found, {} skipped by filter, {} failed\n",
        report.found, report.skipped, report.failed
    ));
    if report.printings_failed > 0 {
        output.push_str(&format!(
            "  WARNING: {} printings could not be stored\n",
            report.printings_failed
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{merge_card_views, StoredCardRow};

    fn view(name: &str, printings: &[(&str, &str)]) -> CardView {
        let rows: Vec<StoredCardRow> = printings
            .iter()
            .enumerate()
            .map(|(i, (games, rarity))| StoredCardRow {
                oracle_id: "o1".to_string(),
                name: name.to_string(),
                color_identity: "[]".to_string(),
                keywords: "[]".to_string(),
                printing_id: Some(format!("p{i}")),
                printing_games: Some(games.to_string()),
                printing_rarity: Some(rarity.to_string()),
                ..Default::default()
            })
            .collect();
        merge_card_views(&rows).remove(0)
    }

    fn card(json: serde_json::Value) -> Card {
        mtg_common::decode(&json.to_string()).unwrap()
    }

    #[test]
    fn rarity_cell_orders_by_rank() {
        let v = view(
            "Bolt",
            &[
                (r#"["paper"]"#, "mythic"),
                (r#"["paper","mtgo"]"#, "common"),
                (r#"["paper"]"#, "rare"),
            ],
        );
        assert_eq!(rarity_cell(&v, "paper"), "c, r, m");
        assert_eq!(rarity_cell(&v, "mtgo"), "c");
        assert_eq!(rarity_cell(&v, "arena"), "");
    }

    #[test]
    fn rarity_cell_collapses_unknown_rarities() {
        let v = view(
            "Odd",
            &[(r#"["paper"]"#, "special"), (r#"["paper"]"#, "bonus")],
        );
        assert_eq!(rarity_cell(&v, "paper"), "?");
    }

    #[test]
    fn card_table_has_header_and_rows() {
        let views = vec![
            view("Ragavan, Nimble Pilferer", &[(r#"["paper","mtgo"]"#, "mythic")]),
            view("Bolt", &[(r#"["arena"]"#, "rare")]),
        ];
        let output = format_card_table(&views);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("Card Name"));
        assert!(lines[0].contains("Paper") && lines[0].contains("MTGO") && lines[0].contains("Arena"));
        assert!(lines[1].starts_with("---"));
        assert!(lines[2].starts_with("Ragavan, Nimble Pilferer  m"));
        assert!(lines[3].starts_with("Bolt"));
        assert!(output.contains("2 cards"));
    }

    #[test]
    fn card_table_columns_align() {
        let views = vec![
            view("Ox", &[(r#"["arena"]"#, "rare")]),
            view("Shivan Dragon", &[(r#"["arena"]"#, "mythic")]),
        ];
        let output = format_card_table(&views);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[2].find('r'), lines[3].find('m'));
    }

    #[test]
    fn empty_table_still_has_header() {
        let output = format_card_table(&[]);
        assert!(output.starts_with("Card Name"));
        assert!(output.contains("0 cards"));
    }

    #[test]
    fn search_results_respect_limit() {
        let cards: Vec<Card> = (0..5)
            .map(|i| {
                card(serde_json::json!({
                    "id": format!("{i}"),
                    "name": format!("Card {i}"),
                    "set": "lea",
                    "rarity": "rare"
                }))
            })
            .collect();

        let output = format_search_results(&cards, 3);
        assert!(output.contains("- Card 0 (LEA, rare)"));
        assert!(!output.contains("Card 3"));
        assert!(output.contains("... and 2 more"));
    }

    #[test]
    fn search_results_empty() {
        assert_eq!(format_search_results(&[], 10), "No cards found.\n");
    }

    #[test]
    fn set_summary() {
        let set: Set = mtg_common::decode(
            r#"{ "id": "s1", "code": "lea", "name": "Limited Edition Alpha",
                 "set_type": "core", "released_at": "1993-08-05", "card_count": 295 }"#,
        )
        .unwrap();
        let output = format_set(&set);
        assert!(output.starts_with("Limited Edition Alpha (LEA)"));
        assert!(output.contains("Type: core"));
        assert!(output.contains("Released: 1993-08-05"));
        assert!(output.contains("Cards: 295"));
    }

    #[test]
    fn card_detail_single_faced() {
        let output = format_card_detail(&card(serde_json::json!({
            "id": "1",
            "name": "Grizzly Bears",
            "mana_cost": "{1}{G}",
            "type_line": "Creature Bear",
            "power": "2",
            "toughness": "2",
            "set": "lea",
            "collector_number": "196",
            "rarity": "common",
            "games": ["paper"]
        })));
        assert!(output.starts_with("Grizzly Bears {1}{G}\n"));
        assert!(output.contains("2/2"));
        assert!(output.contains("LEA #196 (common) - paper"));
    }

    #[test]
    fn card_detail_lists_faces() {
        let output = format_card_detail(&card(serde_json::json!({
            "id": "1",
            "name": "Fire // Ice",
            "type_line": "Instant // Instant",
            "card_faces": [
                { "name": "Fire", "mana_cost": "{1}{R}", "oracle_text": "Fire deals 2 damage divided as you choose among one or two targets." },
                { "name": "Ice", "mana_cost": "{1}{U}", "oracle_text": "Tap target permanent.\nDraw a card." }
            ]
        })));
        assert!(output.contains("// Fire {1}{R}"));
        assert!(output.contains("// Ice {1}{U}"));
        assert!(output.contains("Tap target permanent."));
    }

    #[test]
    fn sync_report_summary() {
        let report = SyncReport {
            found: 10,
            skipped: 6,
            failed: 1,
            cards_upserted: 3,
            printings_upserted: 12,
            printings_failed: 0,
        };
        let output = format_sync_report(&report);
        assert!(output.contains("Inserted 3 filtered cards (12 printings)"));
        assert!(output.contains("10 found, 6 skipped by filter, 1 failed"));
        assert!(!output.contains("WARNING"));
    }

    #[test]
    fn sync_report_warns_about_failed_printings() {
        let report = SyncReport {
            printings_failed: 2,
            ..Default::default()
        };
        assert!(format_sync_report(&report).contains("WARNING: 2 printings"));
    }
}
