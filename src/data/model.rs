use std::fmt;

// ---------------------------------------------------------------------------
// Attr – the logical attribute vocabulary
// ---------------------------------------------------------------------------

/// Logical player attributes, decoupled from the export's header spelling.
///
/// All dynamic column access goes through this table, so the literal header
/// strings appear in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attr {
    Id,
    Name,
    Surname,
    Rating,
    Position,
    Club,
    League,
    Rarity,
    Loans,
}

impl Attr {
    /// Every attribute, in export column order.
    pub const ALL: [Attr; 9] = [
        Attr::Id,
        Attr::Name,
        Attr::Surname,
        Attr::Rating,
        Attr::Position,
        Attr::Club,
        Attr::League,
        Attr::Rarity,
        Attr::Loans,
    ];

    /// Header string used for this attribute in club exports.
    pub fn header(self) -> &'static str {
        match self {
            Attr::Id => "Id",
            Attr::Name => "Name",
            Attr::Surname => "Lastname",
            Attr::Rating => "Rating",
            Attr::Position => "Position",
            Attr::Club => "Club",
            Attr::League => "League",
            Attr::Rarity => "Rarity",
            Attr::Loans => "Loans",
        }
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

// ---------------------------------------------------------------------------
// AttrValue – a single cell addressed through the vocabulary
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
///
/// Used as `BTreeMap` / `BTreeSet` keys downstream, so it must be `Ord`;
/// every numeric attribute is integral, which keeps the derive valid.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttrValue {
    Int(i64),
    Text(String),
    Flag(bool),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(i) => write!(f, "{i}"),
            AttrValue::Text(s) => write!(f, "{s}"),
            AttrValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Position – the closed position-code table
// ---------------------------------------------------------------------------

/// On-pitch position as encoded by club exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    Goalkeeper,
    RightWingBack,
    RightBack,
    CentreBack,
    LeftBack,
    LeftWingBack,
    DefensiveMidfield,
    RightMidfield,
    CentreMidfield,
    LeftMidfield,
    AttackingMidfield,
    CentreForward,
    RightWing,
    Striker,
    LeftWing,
}

/// Grouping label for position codes outside the table.
pub const UNKNOWN_POSITION: &str = "Unknown";

impl Position {
    /// Decode an export position code. Codes outside the table yield `None`
    /// so the caller can keep the raw value instead of dropping the row.
    pub fn from_code(code: u8) -> Option<Position> {
        match code {
            0 => Some(Position::Goalkeeper),
            2 => Some(Position::RightWingBack),
            3 => Some(Position::RightBack),
            5 => Some(Position::CentreBack),
            7 => Some(Position::LeftBack),
            8 => Some(Position::LeftWingBack),
            10 => Some(Position::DefensiveMidfield),
            12 => Some(Position::RightMidfield),
            14 => Some(Position::CentreMidfield),
            16 => Some(Position::LeftMidfield),
            18 => Some(Position::AttackingMidfield),
            21 => Some(Position::CentreForward),
            23 => Some(Position::RightWing),
            25 => Some(Position::Striker),
            27 => Some(Position::LeftWing),
            _ => None,
        }
    }

    /// Short label shown in listings.
    pub fn label(self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::RightWingBack => "RWB",
            Position::RightBack => "RB",
            Position::CentreBack => "CB",
            Position::LeftBack => "LB",
            Position::LeftWingBack => "LWB",
            Position::DefensiveMidfield => "CDM",
            Position::RightMidfield => "RM",
            Position::CentreMidfield => "CM",
            Position::LeftMidfield => "LM",
            Position::AttackingMidfield => "CAM",
            Position::CentreForward => "CF",
            Position::RightWing => "RW",
            Position::Striker => "ST",
            Position::LeftWing => "LW",
        }
    }
}

/// Listing label for a raw position code, `"Unknown"` when unmapped.
pub fn position_label(code: u8) -> &'static str {
    Position::from_code(code).map_or(UNKNOWN_POSITION, Position::label)
}

// ---------------------------------------------------------------------------
// Rarity – card versions
// ---------------------------------------------------------------------------

/// Card rarity. `Common` and `Rare` are the base versions; any other name
/// in the export is carried through verbatim as a special edition.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Rare,
    TeamOfTheWeek,
    Special(String),
}

impl Rarity {
    /// Parse an export rarity cell, case-insensitively for the known names.
    pub fn parse(s: &str) -> Rarity {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("common") {
            Rarity::Common
        } else if trimmed.eq_ignore_ascii_case("rare") {
            Rarity::Rare
        } else if trimmed.eq_ignore_ascii_case("team of the week") {
            Rarity::TeamOfTheWeek
        } else {
            Rarity::Special(trimmed.to_string())
        }
    }

    /// Whether this is a base (non-special) card version.
    pub fn is_base(&self) -> bool {
        matches!(self, Rarity::Common | Rarity::Rare)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "Common"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::TeamOfTheWeek => write!(f, "Team of the Week"),
            Rarity::Special(name) => write!(f, "{name}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Player – one row of the roster
// ---------------------------------------------------------------------------

/// A single player card (one row of the source export).
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: u64,
    pub name: String,
    pub surname: String,
    /// Overall rating on the 0..=100 scale.
    pub rating: u8,
    /// Raw export position code; unmapped codes survive into grouping.
    pub position: u8,
    pub club: String,
    pub league: String,
    pub rarity: Rarity,
    pub on_loan: bool,
}

impl Player {
    /// The cell for a logical attribute.
    pub fn value(&self, attr: Attr) -> AttrValue {
        match attr {
            Attr::Id => AttrValue::Int(self.id as i64),
            Attr::Name => AttrValue::Text(self.name.clone()),
            Attr::Surname => AttrValue::Text(self.surname.clone()),
            Attr::Rating => AttrValue::Int(i64::from(self.rating)),
            Attr::Position => AttrValue::Int(i64::from(self.position)),
            Attr::Club => AttrValue::Text(self.club.clone()),
            Attr::League => AttrValue::Text(self.league.clone()),
            Attr::Rarity => AttrValue::Text(self.rarity.to_string()),
            Attr::Loans => AttrValue::Flag(self.on_loan),
        }
    }

    /// Listing label for this player's position.
    pub fn position_label(&self) -> &'static str {
        position_label(self.position)
    }
}

// ---------------------------------------------------------------------------
// Roster – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An ordered, immutable collection of players from one snapshot file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    /// Wrap an ordered set of players (used by the loader and by filters).
    pub fn new(players: Vec<Player>) -> Self {
        Roster { players }
    }

    /// All players, in source row order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster has no rows.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Header strings of the attribute vocabulary, in export column order.
    pub fn column_names() -> [&'static str; 9] {
        Attr::ALL.map(Attr::header)
    }
}
