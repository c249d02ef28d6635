/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  club export .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Roster
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Roster   │  Vec<Player>, attribute vocabulary
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply attribute predicates → sub-rosters
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
