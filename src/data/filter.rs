use std::collections::{BTreeMap, BTreeSet};

use super::model::{Attr, AttrValue, Player, Roster};

// ---------------------------------------------------------------------------
// Subset selection
// ---------------------------------------------------------------------------

/// Rows whose cell for `attr` equals `value`, in source order.
pub fn filter_equals(roster: &Roster, attr: Attr, value: &AttrValue) -> Roster {
    filter_by(roster, |p| p.value(attr) == *value)
}

/// Rows whose cell for `attr` is at most `value` in the `AttrValue` order.
pub fn filter_at_most(roster: &Roster, attr: Attr, value: &AttrValue) -> Roster {
    filter_by(roster, |p| p.value(attr) <= *value)
}

/// Sequential AND of equality predicates; an empty list selects everything.
/// Equivalent to nesting [`filter_equals`] calls left to right.
pub fn filter_chain(roster: &Roster, predicates: &[(Attr, AttrValue)]) -> Roster {
    let mut current = roster.clone();
    for (attr, value) in predicates {
        current = filter_equals(&current, *attr, value);
    }
    current
}

fn filter_by(roster: &Roster, keep: impl Fn(&Player) -> bool) -> Roster {
    Roster::new(
        roster
            .players()
            .iter()
            .filter(|p| keep(p))
            .cloned()
            .collect(),
    )
}

// ---------------------------------------------------------------------------
// Distinct values and grouping
// ---------------------------------------------------------------------------

/// Unique values of an attribute, sorted case-insensitively by their string
/// representation so pickers get a stable order regardless of source order.
pub fn distinct_values(roster: &Roster, attr: Attr) -> Vec<AttrValue> {
    let mut values: Vec<AttrValue> = roster
        .players()
        .iter()
        .map(|p| p.value(attr))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    values.sort_by_key(|v| v.to_string().to_lowercase());
    values
}

/// Sorted distinct league names.
pub fn leagues(roster: &Roster) -> Vec<String> {
    distinct_values(roster, Attr::League)
        .into_iter()
        .map(|v| v.to_string())
        .collect()
}

/// Group one league's players by position label.
///
/// The league subset is split per observed position code; codes outside the
/// position table all land in the `"Unknown"` bucket, so every row of the
/// league appears in exactly one group.
pub fn league_position_groups(roster: &Roster, league: &str) -> BTreeMap<String, Roster> {
    let in_league = filter_equals(roster, Attr::League, &AttrValue::Text(league.to_string()));

    let mut groups: BTreeMap<String, Vec<Player>> = BTreeMap::new();
    for player in in_league.players() {
        groups
            .entry(player.position_label().to_string())
            .or_default()
            .push(player.clone());
    }

    groups
        .into_iter()
        .map(|(label, players)| (label, Roster::new(players)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Rarity;

    fn player(id: u64, surname: &str, rating: u8, position: u8, club: &str, league: &str) -> Player {
        Player {
            id,
            name: "Test".to_string(),
            surname: surname.to_string(),
            rating,
            position,
            club: club.to_string(),
            league: league.to_string(),
            rarity: Rarity::Common,
            on_loan: false,
        }
    }

    fn sample() -> Roster {
        Roster::new(vec![
            player(1, "Saka", 87, 23, "Arsenal", "Premier League"),
            player(2, "Rice", 86, 10, "Arsenal", "Premier League"),
            player(3, "Vinicius", 90, 27, "Real Madrid", "LALIGA EA SPORTS"),
            player(4, "Rodri", 89, 10, "Manchester City", "Premier League"),
            player(5, "Mystery", 70, 99, "Arsenal", "Premier League"),
        ])
    }

    #[test]
    fn equality_filter_preserves_source_order() {
        let arsenal = filter_equals(&sample(), Attr::Club, &AttrValue::Text("Arsenal".into()));
        let surnames: Vec<_> = arsenal.players().iter().map(|p| p.surname.as_str()).collect();
        assert_eq!(surnames, ["Saka", "Rice", "Mystery"]);
    }

    #[test]
    fn threshold_filter_is_inclusive() {
        let at_most = filter_at_most(&sample(), Attr::Rating, &AttrValue::Int(87));
        let ids: Vec<_> = at_most.players().iter().map(|p| p.id).collect();
        assert_eq!(ids, [1, 2, 5]);
    }

    #[test]
    fn empty_chain_returns_everything() {
        assert_eq!(filter_chain(&sample(), &[]), sample());
    }

    #[test]
    fn chain_matches_nested_equality_filters() {
        let roster = sample();
        let league = AttrValue::Text("Premier League".into());
        let club = AttrValue::Text("Arsenal".into());

        let chained = filter_chain(
            &roster,
            &[
                (Attr::League, league.clone()),
                (Attr::Club, club.clone()),
            ],
        );
        let nested = filter_equals(&filter_equals(&roster, Attr::League, &league), Attr::Club, &club);

        assert_eq!(chained, nested);
        assert_eq!(chained.len(), 3);
    }

    #[test]
    fn distinct_values_sort_case_insensitively() {
        let roster = Roster::new(vec![
            player(1, "A", 80, 25, "zeta", "L"),
            player(2, "B", 81, 25, "Alpha", "L"),
            player(3, "C", 82, 25, "beta", "L"),
            player(4, "D", 83, 25, "Alpha", "L"),
        ]);
        let names: Vec<_> = distinct_values(&roster, Attr::Club)
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(names, ["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn league_groups_cover_every_observed_position() {
        let roster = sample();
        let groups = league_position_groups(&roster, "Premier League");

        let labels: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(labels, ["CDM", "RW", "Unknown"]);
        assert_eq!(groups["CDM"].len(), 2);
        assert_eq!(groups["Unknown"].players()[0].surname, "Mystery");

        let grouped: usize = groups.values().map(Roster::len).sum();
        let in_league = filter_equals(&roster, Attr::League, &AttrValue::Text("Premier League".into()));
        assert_eq!(grouped, in_league.len());
    }

    #[test]
    fn unmapped_codes_share_the_unknown_bucket() {
        let roster = Roster::new(vec![
            player(1, "A", 80, 99, "C", "L"),
            player(2, "B", 81, 42, "C", "L"),
        ]);
        let groups = league_position_groups(&roster, "L");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Unknown"].len(), 2);
    }

    #[test]
    fn leagues_are_sorted_and_distinct() {
        assert_eq!(leagues(&sample()), ["LALIGA EA SPORTS", "Premier League"]);
    }
}
