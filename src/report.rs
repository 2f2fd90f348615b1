//! Terminal rendering of sniper results.

use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Table};

use crate::analysis::{format_recency, win_rate_percent};
use crate::models::SnipedPlayer;

pub const NO_SNIPERS: &str = "No snipers found! (No recent shared matches)";

/// One table row: player, games with, win rate, last played.
pub fn row(player: &SnipedPlayer, now: DateTime<Utc>) -> [String; 4] {
    [
        player.riot_id(),
        player.total_games.to_string(),
        format!("{}%", win_rate_percent(player.wins, player.total_games)),
        format_recency(player.last_played(), now),
    ]
}

/// Render the snipers table, or the "no snipers" line when empty.
pub fn render(snipers: &[SnipedPlayer], match_count: u32, now: DateTime<Utc>) -> String {
    if snipers.is_empty() {
        return NO_SNIPERS.to_string();
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Player").add_attribute(Attribute::Bold),
        Cell::new("Games With").add_attribute(Attribute::Bold),
        Cell::new("Win Rate").add_attribute(Attribute::Bold),
        Cell::new("Last Played").add_attribute(Attribute::Bold),
    ]);

    for player in snipers {
        let [name, games, win_rate, last] = row(player, now);
        table.add_row(vec![
            Cell::new(name),
            Cell::new(games).set_alignment(CellAlignment::Right),
            Cell::new(win_rate).set_alignment(CellAlignment::Right),
            Cell::new(last),
        ]);
    }

    format!(
        "Potential Snipers (shared matches in last {} games)\n{}",
        match_count, table
    )
}
