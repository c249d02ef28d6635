use std::path::Path;
use std::str::FromStr;

use log::info;

use super::model::{Attr, Player, Rarity, Roster};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a roster from a club-export CSV file.
///
/// The export is a plain comma-separated file with a header row. Columns may
/// appear in any order and columns outside the attribute vocabulary are
/// ignored. A header-only file loads as a zero-row roster; missing files,
/// missing columns and malformed cells fail with a typed error.
pub fn load_roster(path: &Path) -> Result<Roster> {
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::Reader::from_path(path)?;
    let columns = resolve_columns(reader.headers()?)?;

    let mut players = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        players.push(parse_player(&record, &columns, row_no)?);
    }

    info!("loaded {} players from {}", players.len(), path.display());
    Ok(Roster::new(players))
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Column index of each attribute in the header row, in `Attr::ALL` order.
struct Columns([usize; Attr::ALL.len()]);

impl Columns {
    fn cell<'r>(&self, record: &'r csv::StringRecord, attr: Attr) -> &'r str {
        record.get(self.0[attr as usize]).unwrap_or("").trim()
    }
}

/// Locate every vocabulary header in the file's header row.
/// All missing columns are collected so the error names them at once.
fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns> {
    let mut indices = [0usize; Attr::ALL.len()];
    let mut missing = Vec::new();

    for attr in Attr::ALL {
        match headers.iter().position(|h| h.trim() == attr.header()) {
            Some(idx) => indices[attr as usize] = idx,
            None => missing.push(attr.header().to_string()),
        }
    }

    if missing.is_empty() {
        Ok(Columns(indices))
    } else {
        Err(Error::MissingColumns { missing })
    }
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

fn parse_player(record: &csv::StringRecord, columns: &Columns, row_no: usize) -> Result<Player> {
    Ok(Player {
        id: parse_cell(columns.cell(record, Attr::Id), Attr::Id, row_no)?,
        name: columns.cell(record, Attr::Name).to_string(),
        surname: columns.cell(record, Attr::Surname).to_string(),
        rating: parse_cell(columns.cell(record, Attr::Rating), Attr::Rating, row_no)?,
        position: parse_cell(columns.cell(record, Attr::Position), Attr::Position, row_no)?,
        club: columns.cell(record, Attr::Club).to_string(),
        league: columns.cell(record, Attr::League).to_string(),
        rarity: Rarity::parse(columns.cell(record, Attr::Rarity)),
        on_loan: parse_flag(columns.cell(record, Attr::Loans), row_no)?,
    })
}

fn parse_cell<T: FromStr>(raw: &str, attr: Attr, row_no: usize) -> Result<T> {
    raw.parse().map_err(|_| Error::InvalidCell {
        row: row_no,
        column: attr.header(),
        value: raw.to_string(),
    })
}

/// The loan column carries `0` / `1`.
fn parse_flag(raw: &str, row_no: usize) -> Result<bool> {
    match raw {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(Error::InvalidCell {
            row: row_no,
            column: Attr::Loans.header(),
            value: raw.to_string(),
        }),
    }
}
