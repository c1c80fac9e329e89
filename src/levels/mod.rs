//! Static level catalog.
//!
//! Levels are defined once, in play order, and never mutated. Each level carries
//! a kind-specific payload; the grouping engine only looks at the kind, the
//! mini-games read the payload. Vocabulary lives in the themed data files below.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::difficulty::{Difficulty, DifficultyKey, Tiered, Tiers, filter_by_difficulty};

mod catalog;
mod words_home;
mod words_minigames;
mod words_nature;

pub use catalog::LEVELS;

// Tier shorthands for the data files.
const EVERY: Tiers = None;
const FROM_MEDIUM: Tiers = Some(&[DifficultyKey::Listicka, DifficultyKey::Lev]);
const HARD_ONLY: Tiers = Some(&[DifficultyKey::Lev]);

// --- Content types ------------------------------------------------------------

/// One flashcard word: English name (spoken), emoji and Czech caption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LevelItem {
    pub name: &'static str,
    pub emoji: &'static str,
    pub czech: &'static str,
    #[serde(skip)]
    pub tiers: Tiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ColorItem {
    pub name: &'static str,
    pub czech: &'static str,
    /// CSS color used to paint a shape.
    pub color: &'static str,
    #[serde(skip)]
    pub tiers: Tiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ShapeItem {
    pub name: &'static str,
    pub czech: &'static str,
    #[serde(skip)]
    pub tiers: Tiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub name: &'static str,
    pub czech: &'static str,
    pub emoji: &'static str,
    pub css_class: &'static str,
}

/// A word to sort plus the destination it belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DragDropItem {
    pub item: LevelItem,
    pub belongs_to: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CountingObject {
    pub name: &'static str,
    pub name_singular: &'static str,
    pub emoji: &'static str,
    pub czech: &'static str,
    pub czech_singular: &'static str,
    #[serde(skip)]
    pub tiers: Tiers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DrinkItem {
    pub name: &'static str,
    pub emoji: &'static str,
    pub czech: &'static str,
    #[serde(skip)]
    pub tiers: Tiers,
}

macro_rules! tiered {
    ($($ty:ty),*) => {
        $(impl Tiered for $ty {
            fn tiers(&self) -> Tiers {
                self.tiers
            }
        })*
    };
}

tiered!(LevelItem, ColorItem, ShapeItem, CountingObject, DrinkItem);

impl Tiered for DragDropItem {
    fn tiers(&self) -> Tiers {
        self.item.tiers
    }
}

// --- Levels -------------------------------------------------------------------

#[derive(Clone, Copy, Debug)]
pub enum LevelContent {
    Standard {
        items: &'static [LevelItem],
        max_display: usize,
    },
    /// Replays the standard levels in `range` (inclusive) as a review round.
    AutoReview { range: (usize, usize) },
    Coloring {
        colors: &'static [ColorItem],
        shapes: &'static [ShapeItem],
    },
    Memory,
    DragDrop {
        destinations: &'static [Destination],
        items: &'static [DragDropItem],
        items_per_round: usize,
    },
    Counting { objects: &'static [CountingObject] },
    Restaurant {
        drinks: &'static [DrinkItem],
        customers: &'static [&'static str],
        customers_to_serve: usize,
    },
    Rhythm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LevelKind {
    Standard,
    AutoReview,
    Coloring,
    Memory,
    DragDrop,
    Counting,
    Restaurant,
    Rhythm,
}

impl LevelKind {
    /// Mini-game levels always sit alone in their own map group.
    pub fn is_mini_game(self) -> bool {
        matches!(
            self,
            LevelKind::Memory
                | LevelKind::Coloring
                | LevelKind::DragDrop
                | LevelKind::Counting
                | LevelKind::Restaurant
                | LevelKind::Rhythm
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LevelKind::Standard => "standard",
            LevelKind::AutoReview => "autoReview",
            LevelKind::Coloring => "coloring",
            LevelKind::Memory => "memory",
            LevelKind::DragDrop => "dragDrop",
            LevelKind::Counting => "counting",
            LevelKind::Restaurant => "restaurant",
            LevelKind::Rhythm => "rhythm",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Level {
    pub name: &'static str,
    pub content: LevelContent,
}

impl Level {
    pub const fn new(name: &'static str, content: LevelContent) -> Self {
        Self { name, content }
    }

    pub const fn standard(name: &'static str, items: &'static [LevelItem]) -> Self {
        Self::new(
            name,
            LevelContent::Standard {
                items,
                max_display: 6,
            },
        )
    }

    pub fn kind(&self) -> LevelKind {
        match self.content {
            LevelContent::Standard { .. } => LevelKind::Standard,
            LevelContent::AutoReview { .. } => LevelKind::AutoReview,
            LevelContent::Coloring { .. } => LevelKind::Coloring,
            LevelContent::Memory => LevelKind::Memory,
            LevelContent::DragDrop { .. } => LevelKind::DragDrop,
            LevelContent::Counting { .. } => LevelKind::Counting,
            LevelContent::Restaurant { .. } => LevelKind::Restaurant,
            LevelContent::Rhythm => LevelKind::Rhythm,
        }
    }

    pub fn is_mini_game(&self) -> bool {
        self.kind().is_mini_game()
    }

    /// Flashcard words of a standard level; empty for every other kind.
    pub fn standard_items(&self) -> &'static [LevelItem] {
        match self.content {
            LevelContent::Standard { items, .. } => items,
            _ => &[],
        }
    }

    /// Map tile icon.
    pub fn icon(&self, locked: bool) -> &'static str {
        if locked {
            return "🔒";
        }
        match self.content {
            LevelContent::AutoReview { .. } => "🔄",
            LevelContent::Memory => "🃏",
            LevelContent::Coloring { .. } => "🎨",
            LevelContent::DragDrop { .. } => "🎯",
            LevelContent::Counting { .. } => "🔢",
            LevelContent::Restaurant { .. } => "🍽️",
            LevelContent::Rhythm => "🎵",
            LevelContent::Standard { items, .. } => items.first().map(|i| i.emoji).unwrap_or("🎮"),
        }
    }
}

/// The built-in catalog.
pub fn levels() -> &'static [Level] {
    &LEVELS
}

/// Difficulty-filtered words of every standard level whose index falls in `range`.
/// Indices past the end of `levels` are skipped.
pub fn standard_items(
    levels: &[Level],
    range: RangeInclusive<usize>,
    difficulty: Difficulty,
) -> Vec<LevelItem> {
    range
        .filter_map(|i| levels.get(i))
        .flat_map(|level| filter_by_difficulty(level.standard_items(), difficulty))
        .collect()
}
