//! Difficulty selection and the item filters it drives.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Difficulty chosen once per play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Tier tag carried by catalog items. An item with no tags is shown on every tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyKey {
    Kuratko,
    Listicka,
    Lev,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn key(self) -> DifficultyKey {
        match self {
            Difficulty::Easy => DifficultyKey::Kuratko,
            Difficulty::Medium => DifficultyKey::Listicka,
            Difficulty::Hard => DifficultyKey::Lev,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Kuřátko",
            Difficulty::Medium => "Lištička",
            Difficulty::Hard => "Lev",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Difficulty::Easy => "🐣",
            Difficulty::Medium => "🦊",
            Difficulty::Hard => "🦁",
        }
    }

    /// Upper bound on cards shown at once in a flashcard level.
    pub fn max_display(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Number of answer buttons in the counting game.
    pub fn counting_options(self) -> usize {
        self.max_display()
    }

    pub fn sequence_len(self) -> usize {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
        }
    }

    pub fn distractors(self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 4,
        }
    }

    pub fn palette_size(self) -> usize {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
        }
    }

    /// Decode a persisted value. Accepts both the JSON-quoted form (`"\"easy\""`)
    /// and the bare legacy string (`easy`).
    pub fn from_stored(raw: &str) -> Option<Difficulty> {
        let raw = raw.trim();
        if let Ok(d) = raw.parse::<Difficulty>() {
            return Some(d);
        }
        serde_json::from_str::<Option<Difficulty>>(raw).ok().flatten()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(GameError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Tiers an item is offered on. `None` means every tier; an explicit list,
/// even an empty one, is taken literally.
pub type Tiers = Option<&'static [DifficultyKey]>;

/// Anything in the catalog that can be restricted to difficulty tiers.
pub trait Tiered {
    fn tiers(&self) -> Tiers;

    fn available_on(&self, difficulty: Difficulty) -> bool {
        self.tiers().is_none_or(|tiers| tiers.contains(&difficulty.key()))
    }
}

pub fn filter_by_difficulty<T: Tiered + Clone>(items: &[T], difficulty: Difficulty) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.available_on(difficulty))
        .cloned()
        .collect()
}

/// Cards for one flashcard level: filtered by tier, then a random subset when
/// more remain than both the level and the difficulty allow.
pub fn items_for_level<T: Tiered + Clone, R: Rng + ?Sized>(
    items: &[T],
    max_display: usize,
    difficulty: Difficulty,
    rng: &mut R,
) -> Vec<T> {
    let mut filtered = filter_by_difficulty(items, difficulty);
    let limit = max_display.min(difficulty.max_display());
    if filtered.len() > limit {
        filtered.shuffle(rng);
        filtered.truncate(limit);
    }
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[derive(Clone, Debug, PartialEq)]
    struct Card(&'static str, Tiers);

    impl Tiered for Card {
        fn tiers(&self) -> Tiers {
            self.1
        }
    }

    const CARDS: [Card; 4] = [
        Card("cat", None),
        Card("dog", Some(&[DifficultyKey::Kuratko, DifficultyKey::Lev])),
        Card("owl", Some(&[DifficultyKey::Lev])),
        Card("pig", Some(&[DifficultyKey::Listicka])),
    ];

    #[test]
    fn untagged_items_pass_every_filter() {
        for d in Difficulty::ALL {
            assert!(filter_by_difficulty(&CARDS, d).contains(&CARDS[0]));
        }
    }

    #[test]
    fn empty_tier_list_is_never_offered() {
        let retired = [Card("yak", Some(&[]))];
        for d in Difficulty::ALL {
            assert!(filter_by_difficulty(&retired, d).is_empty());
        }
    }

    #[test]
    fn filter_keeps_matching_tier_only() {
        let easy: Vec<_> = filter_by_difficulty(&CARDS, Difficulty::Easy)
            .into_iter()
            .map(|c| c.0)
            .collect();
        assert_eq!(easy, vec!["cat", "dog"]);
        let hard: Vec<_> = filter_by_difficulty(&CARDS, Difficulty::Hard)
            .into_iter()
            .map(|c| c.0)
            .collect();
        assert_eq!(hard, vec!["cat", "dog", "owl"]);
    }

    #[test]
    fn items_for_level_respects_both_limits() {
        let mut rng = SmallRng::seed_from_u64(7);
        let picked = items_for_level(&CARDS, 2, Difficulty::Hard, &mut rng);
        assert_eq!(picked.len(), 2);
        // Few enough items: original order is kept.
        let kept = items_for_level(&CARDS, 6, Difficulty::Easy, &mut rng);
        assert_eq!(kept, vec![CARDS[0].clone(), CARDS[1].clone()]);
    }

    #[test]
    fn stored_values_accept_legacy_and_json() {
        assert_eq!(Difficulty::from_stored("easy"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_stored("\"hard\""), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_stored("null"), None);
        assert_eq!(Difficulty::from_stored("{oops"), None);
    }
}
