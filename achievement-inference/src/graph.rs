//! Derived prerequisite index.
//!
//! Edges run from an achievement to each of its declared prerequisites. The index
//! stores immediate children and the full descendant closure per achievement, and is
//! rebuilt from scratch whenever the achievement map changes.

use std::collections::{BTreeSet, HashMap};

use crate::types::{Achievement, AchievementId};

static EMPTY: BTreeSet<AchievementId> = BTreeSet::new();

/// Immediate-child and descendant sets for every achievement.
#[derive(Debug, Default)]
pub struct PrerequisiteIndex {
    children: HashMap<AchievementId, BTreeSet<AchievementId>>,
    descendants: HashMap<AchievementId, BTreeSet<AchievementId>>,
}

impl PrerequisiteIndex {
    /// Build the index over a set of achievements.
    ///
    /// Prerequisite ids without a matching achievement still appear as children and
    /// descendants; traversal simply stops there.
    pub fn build<'a>(achievements: impl IntoIterator<Item = &'a Achievement>) -> Self {
        let children: HashMap<AchievementId, BTreeSet<AchievementId>> = achievements
            .into_iter()
            .map(|a| (a.id, a.prerequisite_ids.iter().copied().collect()))
            .collect();

        let mut index = Self {
            children,
            descendants: HashMap::new(),
        };

        let descendants = index
            .children
            .keys()
            .map(|&id| (id, index.collect_descendants(id)))
            .collect();
        index.descendants = descendants;

        index
    }

    /// Depth-first walk from `id`'s children. Each id is visited once, so cycles
    /// terminate; an id on a cycle ends up in its own descendant set.
    fn collect_descendants(&self, id: AchievementId) -> BTreeSet<AchievementId> {
        let mut visited = BTreeSet::new();
        let mut stack: Vec<AchievementId> = self.children(id).iter().copied().collect();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            stack.extend(self.children(current).iter().copied());
        }

        visited
    }

    /// Declared prerequisites of `id`; empty for unknown ids.
    pub fn children(&self, id: AchievementId) -> &BTreeSet<AchievementId> {
        self.children.get(&id).unwrap_or(&EMPTY)
    }

    /// Everything reachable from `id` in one or more hops; empty for unknown ids.
    pub fn descendants(&self, id: AchievementId) -> &BTreeSet<AchievementId> {
        self.descendants.get(&id).unwrap_or(&EMPTY)
    }

    /// Achievements reachable from themselves, in ascending id order.
    pub fn cyclic_ids(&self) -> Vec<AchievementId> {
        let mut ids: Vec<AchievementId> = self
            .descendants
            .iter()
            .filter(|(id, reachable)| reachable.contains(*id))
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
