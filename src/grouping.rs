//! Level grouping engine.
//!
//! Splits the ordered level list into the groups shown on the map and derives
//! each group's completion and lock flags from the set of completed levels.
//! Everything here is recomputed from scratch on every call; nothing is cached.
//!
//! Grouping rules, applied left to right:
//! - a mini-game level always forms a group of its own,
//! - flashcard (standard / auto-review) levels batch up to [`MAX_GROUP_SIZE`].
//!
//! A group is completed when all of its levels are completed. Group `k` is
//! unlocked once `k - 1` groups (anywhere on the map) are completed, so the
//! first group is never locked.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::levels::Level;

/// Cap on consecutive flashcard levels in one group.
pub const MAX_GROUP_SIZE: usize = 5;

/// Number of leading groups that award a crown; later groups award a diamond.
pub const CROWN_GROUPS: usize = 5;

#[derive(Clone, Copy, Debug)]
pub struct GroupedLevel<'a> {
    pub level: &'a Level,
    /// Position of the level in the full catalog.
    pub index: usize,
}

#[derive(Clone, Debug)]
pub struct LevelGroup<'a> {
    /// 1-based, equal to the position in the group list plus one.
    pub group_number: usize,
    pub levels: Vec<GroupedLevel<'a>>,
    pub is_locked: bool,
    pub is_completed: bool,
}

impl LevelGroup<'_> {
    /// 0-based group index, as used for rewards and the inventory.
    pub fn index(&self) -> usize {
        self.group_number - 1
    }

    pub fn reward(&self) -> Reward {
        Reward::for_group(self.index())
    }

    pub fn contains(&self, level_index: usize) -> bool {
        self.levels.iter().any(|l| l.index == level_index)
    }

    pub fn level_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.levels.iter().map(|l| l.index)
    }
}

/// Reward earned by completing a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Reward {
    Crown,
    Diamond,
}

impl Reward {
    pub fn for_group(group_index: usize) -> Reward {
        if group_index < CROWN_GROUPS {
            Reward::Crown
        } else {
            Reward::Diamond
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Reward::Crown => "👑",
            Reward::Diamond => "💎",
        }
    }

    /// Accusative Czech noun used in the congratulation message.
    pub fn czech_name(self) -> &'static str {
        match self {
            Reward::Crown => "korunu",
            Reward::Diamond => "diamant",
        }
    }
}

/// Partition `levels` into map groups and flag each one.
///
/// Indices in `completed` that do not belong to any level are ignored.
pub fn calculate_groups<'a>(levels: &'a [Level], completed: &BTreeSet<usize>) -> Vec<LevelGroup<'a>> {
    let mut groups: Vec<LevelGroup<'a>> = Vec::new();
    let mut current: Vec<GroupedLevel<'a>> = Vec::new();

    for (index, level) in levels.iter().enumerate() {
        let prev_is_mini_game = index > 0 && levels[index - 1].is_mini_game();
        let starts_group = index == 0
            || level.is_mini_game()
            || prev_is_mini_game
            || current.len() >= MAX_GROUP_SIZE;

        if starts_group && !current.is_empty() {
            flush(&mut groups, &mut current);
        }
        current.push(GroupedLevel { level, index });
    }
    flush(&mut groups, &mut current);

    for group in &mut groups {
        let done = group.levels.iter().all(|l| completed.contains(&l.index));
        group.is_completed = done;
    }
    let completed_groups = groups.iter().filter(|g| g.is_completed).count();
    for group in &mut groups {
        group.is_locked = group.group_number > completed_groups + 1;
    }

    groups
}

fn flush<'a>(groups: &mut Vec<LevelGroup<'a>>, current: &mut Vec<GroupedLevel<'a>>) {
    if current.is_empty() {
        return;
    }
    groups.push(LevelGroup {
        group_number: groups.len() + 1,
        levels: std::mem::take(current),
        is_locked: false,
        is_completed: false,
    });
}

/// 0-based indices of every completed group, ascending.
pub fn completed_group_indices(levels: &[Level], completed: &BTreeSet<usize>) -> Vec<usize> {
    calculate_groups(levels, completed)
        .iter()
        .filter(|g| g.is_completed)
        .map(LevelGroup::index)
        .collect()
}

/// Group that holds `level_index`, if the index is in range.
pub fn group_of(levels: &[Level], level_index: usize) -> Option<usize> {
    calculate_groups(levels, &BTreeSet::new())
        .iter()
        .find(|g| g.contains(level_index))
        .map(LevelGroup::index)
}

/// Whether the level at `level_index` can be opened from the map.
pub fn is_level_unlocked(levels: &[Level], completed: &BTreeSet<usize>, level_index: usize) -> bool {
    calculate_groups(levels, completed)
        .iter()
        .find(|g| g.contains(level_index))
        .is_some_and(|g| !g.is_locked)
}
