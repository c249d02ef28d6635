use std::collections::BTreeMap;

use crate::data::model::{Attr, AttrValue, Rarity, Roster};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Scalar statistics
// ---------------------------------------------------------------------------

/// Number of players.
pub fn count(roster: &Roster) -> usize {
    roster.len()
}

/// Sum of all ratings.
pub fn rating_sum(roster: &Roster) -> u64 {
    roster.players().iter().map(|p| u64::from(p.rating)).sum()
}

/// Minimum and maximum rating.
pub fn rating_bounds(roster: &Roster) -> Result<(u8, u8)> {
    if roster.is_empty() {
        return Err(Error::EmptyRoster);
    }
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for p in roster.players() {
        min = min.min(p.rating);
        max = max.max(p.rating);
    }
    Ok((min, max))
}

/// Integer histogram bin edges spanning the rating range.
///
/// One edge per integer rating from `min` through `max`, plus a sentinel
/// edge one above `max` so the final `[max, max+1)` bucket still captures
/// the top rating.
pub fn rating_bins(roster: &Roster) -> Result<Vec<u32>> {
    let (min, max) = rating_bounds(roster)?;
    Ok((u32::from(min)..=u32::from(max) + 1).collect())
}

/// Arithmetic mean of the ratings.
pub fn rating_mean(roster: &Roster) -> Result<f64> {
    if roster.is_empty() {
        return Err(Error::EmptyRoster);
    }
    Ok(rating_sum(roster) as f64 / roster.len() as f64)
}

/// Floor of the statistical median rating.
pub fn rating_median(roster: &Roster) -> Result<u8> {
    if roster.is_empty() {
        return Err(Error::EmptyRoster);
    }
    let mut ratings: Vec<u8> = roster.players().iter().map(|p| p.rating).collect();
    ratings.sort_unstable();

    let mid = ratings.len() / 2;
    let median = if ratings.len() % 2 == 1 {
        ratings[mid]
    } else {
        ((u16::from(ratings[mid - 1]) + u16::from(ratings[mid])) / 2) as u8
    };
    Ok(median)
}

/// Most frequent rating. Ties resolve to the lowest tied value, so the
/// result is deterministic regardless of row order.
pub fn rating_mode(roster: &Roster) -> Result<u8> {
    if roster.is_empty() {
        return Err(Error::EmptyRoster);
    }
    let mut freq: BTreeMap<u8, usize> = BTreeMap::new();
    for p in roster.players() {
        *freq.entry(p.rating).or_default() += 1;
    }

    // BTreeMap iterates lowest rating first; strict `>` keeps the first max.
    let mut best = (0u8, 0usize);
    for (rating, n) in freq {
        if n > best.1 {
            best = (rating, n);
        }
    }
    Ok(best.0)
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

/// Rating-based card tier with fixed inclusive boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    /// Tier for a rating. Ratings above 100 sit outside every tier.
    pub fn of(rating: u8) -> Option<Tier> {
        match rating {
            0..=64 => Some(Tier::Bronze),
            65..=74 => Some(Tier::Silver),
            75..=100 => Some(Tier::Gold),
            _ => None,
        }
    }
}

/// Per-tier player counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

pub fn tier_counts(roster: &Roster) -> TierCounts {
    let mut counts = TierCounts::default();
    for p in roster.players() {
        match Tier::of(p.rating) {
            Some(Tier::Gold) => counts.gold += 1,
            Some(Tier::Silver) => counts.silver += 1,
            Some(Tier::Bronze) => counts.bronze += 1,
            None => {}
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Frequency statistics
// ---------------------------------------------------------------------------

/// Players whose card is exactly the given rarity.
pub fn rarity_count(roster: &Roster, rarity: &Rarity) -> usize {
    roster
        .players()
        .iter()
        .filter(|p| p.rarity == *rarity)
        .count()
}

/// Rows per distinct value of an attribute.
///
/// Every distinct value appears exactly once as a key, so the counts always
/// sum to the roster size.
pub fn frequency_table(roster: &Roster, attr: Attr) -> BTreeMap<AttrValue, usize> {
    let mut table = BTreeMap::new();
    for p in roster.players() {
        *table.entry(p.value(attr)).or_default() += 1;
    }
    table
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregate view of one roster, the rows a summary panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub players: usize,
    pub rating_total: u64,
    pub rating_mean: f64,
    pub rating_median: u8,
    pub rating_mode: u8,
    pub tiers: TierCounts,
}

/// Compute the scalar statistics in one call.
pub fn summarize(roster: &Roster) -> Result<Summary> {
    Ok(Summary {
        players: count(roster),
        rating_total: rating_sum(roster),
        rating_mean: rating_mean(roster)?,
        rating_median: rating_median(roster)?,
        rating_mode: rating_mode(roster)?,
        tiers: tier_counts(roster),
    })
}
