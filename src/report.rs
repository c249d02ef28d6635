use serde::Serialize;

use crate::data::filter;
use crate::data::model::{Player, Roster};
use crate::error::{Error, Result};
use crate::stats::Summary;

// ---------------------------------------------------------------------------
// Player lines
// ---------------------------------------------------------------------------

/// The one-line listing form of a player.
///
/// Base versions (Common, Rare) carry no rarity suffix; every special
/// edition is spelled out after the rating. The presentation layer shows
/// this string verbatim, so its shape is a contract.
pub fn format_player(player: &Player) -> String {
    let mut line = format!("{} {} [{}]", player.name, player.surname, player.rating);
    if !player.rarity.is_base() {
        line.push_str(&format!("[{}]", player.rarity));
    }
    line
}

/// Per-position listing of one league's players.
///
/// Lines are [`format_player`] strings, sorted case-insensitively within
/// each position group; identical lines collapse to a single `"… xN"` entry.
pub fn league_listing(roster: &Roster, league: &str) -> Vec<(String, Vec<String>)> {
    filter::league_position_groups(roster, league)
        .into_iter()
        .map(|(label, group)| {
            let mut lines: Vec<String> = group.players().iter().map(format_player).collect();
            lines.sort_by_key(|l| l.to_lowercase());
            (label, collapse_duplicates(&lines))
        })
        .collect()
}

fn collapse_duplicates(lines: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let mut n = 1;
        while i + n < lines.len() && lines[i + n] == lines[i] {
            n += 1;
        }
        if n > 1 {
            out.push(format!("{} x{n}", lines[i]));
        } else {
            out.push(lines[i].clone());
        }
        i += n;
    }
    out
}

// ---------------------------------------------------------------------------
// Summary rendering
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SummaryRow<'a> {
    statistic: &'a str,
    value: String,
}

impl Summary {
    /// The summary as a two-column Markdown table.
    pub fn to_markdown(&self) -> String {
        let mut out = String::from("| Statistic | Value |\n| --- | --- |\n");
        for (label, value) in self.display_rows() {
            out.push_str(&format!("| {label} | {value} |\n"));
        }
        out
    }

    /// The summary as CSV `statistic,value` rows. Values stay raw numbers
    /// so the output pastes cleanly into a spreadsheet.
    pub fn to_csv(&self) -> Result<String> {
        let rows = [
            SummaryRow { statistic: "players", value: self.players.to_string() },
            SummaryRow { statistic: "rating_total", value: self.rating_total.to_string() },
            SummaryRow { statistic: "rating_mean", value: format!("{:.1}", self.rating_mean) },
            SummaryRow { statistic: "rating_median", value: self.rating_median.to_string() },
            SummaryRow { statistic: "rating_mode", value: self.rating_mode.to_string() },
            SummaryRow { statistic: "gold", value: self.tiers.gold.to_string() },
            SummaryRow { statistic: "silver", value: self.tiers.silver.to_string() },
            SummaryRow { statistic: "bronze", value: self.tiers.bronze.to_string() },
        ];

        let mut writer = csv::Writer::from_writer(Vec::new());
        for row in rows {
            writer.serialize(row)?;
        }
        let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn display_rows(&self) -> [(&'static str, String); 8] {
        [
            ("Players", group_thousands(self.players as u64)),
            ("Total rating", group_thousands(self.rating_total)),
            ("Mean rating", format!("{:.1}", self.rating_mean)),
            ("Median rating", self.rating_median.to_string()),
            ("Mode rating", self.rating_mode.to_string()),
            ("Gold players", group_thousands(self.tiers.gold as u64)),
            ("Silver players", group_thousands(self.tiers.silver as u64)),
            ("Bronze players", group_thousands(self.tiers.bronze as u64)),
        ]
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Rarity;
    use crate::stats::TierCounts;

    fn player(name: &str, surname: &str, rating: u8, rarity: Rarity) -> Player {
        Player {
            id: 1,
            name: name.to_string(),
            surname: surname.to_string(),
            rating,
            position: 25,
            club: "Club".to_string(),
            league: "League".to_string(),
            rarity,
            on_loan: false,
        }
    }

    #[test]
    fn base_rarities_get_no_suffix() {
        let rare = player("Leo", "Messi", 91, Rarity::Rare);
        assert_eq!(format_player(&rare), "Leo Messi [91]");

        let common = player("Jude", "Bellingham", 88, Rarity::Common);
        assert_eq!(format_player(&common), "Jude Bellingham [88]");
    }

    #[test]
    fn special_editions_are_spelled_out() {
        let totw = player("Leo", "Messi", 91, Rarity::TeamOfTheWeek);
        assert_eq!(format_player(&totw), "Leo Messi [91][Team of the Week]");

        let hero = player("Lothar", "Matthaus", 89, Rarity::Special("Hero".to_string()));
        assert_eq!(format_player(&hero), "Lothar Matthaus [89][Hero]");
    }

    #[test]
    fn listing_sorts_and_collapses_duplicate_lines() {
        let mut a = player("alan", "Shearer", 87, Rarity::Common);
        a.position = 25;
        let mut b = player("Zlatan", "Ibrahimovic", 87, Rarity::Common);
        b.position = 25;
        let c = b.clone();
        let mut d = player("Bobby", "Charlton", 86, Rarity::Common);
        d.position = 14;

        let roster = Roster::new(vec![b, d, a, c]);
        let listing = league_listing(&roster, "League");

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].0, "CM");
        assert_eq!(listing[0].1, ["Bobby Charlton [86]"]);
        assert_eq!(listing[1].0, "ST");
        assert_eq!(
            listing[1].1,
            ["alan Shearer [87]", "Zlatan Ibrahimovic [87] x2"]
        );
    }

    #[test]
    fn markdown_table_groups_counts_and_rounds_the_mean() {
        let summary = Summary {
            players: 1234,
            rating_total: 98765,
            rating_mean: 80.04,
            rating_median: 81,
            rating_mode: 79,
            tiers: TierCounts { gold: 1000, silver: 200, bronze: 34 },
        };

        let md = summary.to_markdown();
        assert!(md.starts_with("| Statistic | Value |\n| --- | --- |\n"));
        assert!(md.contains("| Players | 1,234 |"));
        assert!(md.contains("| Total rating | 98,765 |"));
        assert!(md.contains("| Mean rating | 80.0 |"));
        assert!(md.contains("| Gold players | 1,000 |"));
    }

    #[test]
    fn csv_rows_keep_raw_numbers() {
        let summary = Summary {
            players: 1234,
            rating_total: 98765,
            rating_mean: 80.04,
            rating_median: 81,
            rating_mode: 79,
            tiers: TierCounts { gold: 1000, silver: 200, bronze: 34 },
        };

        let text = summary.to_csv().unwrap();
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let rows: Vec<(String, String)> = reader
            .deserialize()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], ("players".to_string(), "1234".to_string()));
        assert_eq!(rows[2], ("rating_mean".to_string(), "80.0".to_string()));
        assert_eq!(rows[5], ("gold".to_string(), "1000".to_string()));
    }

    #[test]
    fn thousands_grouping_inserts_commas_every_three_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
