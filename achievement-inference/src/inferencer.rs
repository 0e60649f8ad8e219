//! The achievement inferencer.
//!
//! Owns the achievement and goal maps plus the derived [`PrerequisiteIndex`], and
//! answers lookup, graph and XP queries over them. Every query is total: ids that do
//! not resolve give `None`, an empty collection or zero.

use std::collections::{BTreeSet, HashSet};
use std::iter;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::InferencerConfig;
use crate::error::Result;
use crate::graph::PrerequisiteIndex;
use crate::ordered::IdMap;
use crate::types::{decode_achievements, decode_goals, Achievement, AchievementId, Goal, GoalId, Xp};

/// Derives progress, XP totals and prerequisite relationships from raw records.
///
/// # Example
///
/// ```
/// use achievement_inference::{Achievement, AchievementInferencer, Goal};
///
/// let inferencer = AchievementInferencer::new(
///     vec![Achievement::new(1, "Runes").with_goals([1, 2])],
///     vec![Goal::new(1, "a").with_xp(100, 100), Goal::new(2, "b").with_xp(20, 100)],
/// );
///
/// assert_eq!(inferencer.get_achievement_xp(1), 120);
/// assert_eq!(inferencer.get_achievement_max_xp(1), 200);
/// ```
#[derive(Debug)]
pub struct AchievementInferencer {
    config: InferencerConfig,
    achievements: IdMap<AchievementId, Achievement>,
    goals: IdMap<GoalId, Goal>,
    index: PrerequisiteIndex,
}

impl AchievementInferencer {
    /// Build an inferencer with default config.
    ///
    /// Entries are inserted in input order, so a repeated id keeps the last value.
    pub fn new<A, G>(achievements: A, goals: G) -> Self
    where
        A: IntoIterator,
        A::Item: Into<Arc<Achievement>>,
        G: IntoIterator,
        G::Item: Into<Arc<Goal>>,
    {
        Self::with_config(InferencerConfig::default(), achievements, goals)
    }

    /// Build an inferencer with explicit config.
    pub fn with_config<A, G>(config: InferencerConfig, achievements: A, goals: G) -> Self
    where
        A: IntoIterator,
        A::Item: Into<Arc<Achievement>>,
        G: IntoIterator,
        G::Item: Into<Arc<Goal>>,
    {
        let mut inferencer = Self {
            config,
            achievements: IdMap::new(),
            goals: IdMap::new(),
            index: PrerequisiteIndex::default(),
        };
        inferencer.set_all(achievements, goals);
        inferencer
    }

    /// Build an inferencer from two JSON arrays in the frontend's record shape.
    pub fn from_json(achievements_json: &str, goals_json: &str) -> Result<Self> {
        let achievements = decode_achievements(achievements_json)?;
        let goals = decode_goals(goals_json)?;
        Ok(Self::new(achievements, goals))
    }

    pub fn config(&self) -> &InferencerConfig {
        &self.config
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace both maps wholesale and rebuild the index.
    pub fn set_all<A, G>(&mut self, achievements: A, goals: G)
    where
        A: IntoIterator,
        A::Item: Into<Arc<Achievement>>,
        G: IntoIterator,
        G::Item: Into<Arc<Goal>>,
    {
        self.achievements.clear();
        self.goals.clear();

        for achievement in achievements {
            let achievement = achievement.into();
            self.achievements.insert(achievement.id, achievement);
        }
        for goal in goals {
            let goal = goal.into();
            self.goals.insert(goal.id, goal);
        }

        self.rebuild();
    }

    /// Insert or overwrite an achievement. Returns the replaced record.
    pub fn insert_achievement(&mut self, achievement: impl Into<Arc<Achievement>>) -> Option<Arc<Achievement>> {
        let achievement = achievement.into();
        let previous = self.achievements.insert(achievement.id, achievement);
        self.rebuild();
        previous
    }

    /// Remove an achievement. Other achievements' prerequisite lists are left as-is.
    pub fn remove_achievement(&mut self, id: AchievementId) -> Option<Arc<Achievement>> {
        let removed = self.achievements.remove(&id);
        self.rebuild();
        removed
    }

    /// Insert or overwrite a goal. Returns the replaced record.
    pub fn insert_goal(&mut self, goal: impl Into<Arc<Goal>>) -> Option<Arc<Goal>> {
        let goal = goal.into();
        let previous = self.goals.insert(goal.id, goal);
        self.rebuild();
        previous
    }

    /// Remove a goal. Achievements referencing it are left as-is.
    pub fn remove_goal(&mut self, id: GoalId) -> Option<Arc<Goal>> {
        let removed = self.goals.remove(&id);
        self.rebuild();
        removed
    }

    fn rebuild(&mut self) {
        self.index = PrerequisiteIndex::build(self.achievements.values().map(|a| &**a));

        debug!(
            achievements = self.achievements.len(),
            goals = self.goals.len(),
            "Rebuilt prerequisite index"
        );

        if self.config.warn_on_dangling_references {
            self.report_dangling_references();
        }

        if self.config.warn_on_cycles {
            for id in self.index.cyclic_ids() {
                warn!(achievement_id = id, "Achievement is its own prerequisite descendant");
            }
        }
    }

    fn report_dangling_references(&self) {
        for achievement in self.achievements.values() {
            for &prerequisite_id in &achievement.prerequisite_ids {
                if !self.achievements.contains(&prerequisite_id) {
                    warn!(
                        achievement_id = achievement.id,
                        prerequisite_id, "Prerequisite does not resolve to an achievement"
                    );
                }
            }
            for &goal_id in &achievement.goal_ids {
                if !self.goals.contains(&goal_id) {
                    warn!(achievement_id = achievement.id, goal_id, "Goal does not resolve");
                }
            }
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn get_achievement(&self, id: AchievementId) -> Option<Arc<Achievement>> {
        self.achievements.get(&id).cloned()
    }

    pub fn get_goal(&self, id: GoalId) -> Option<Arc<Goal>> {
        self.goals.get(&id).cloned()
    }

    /// Same record as [`get_goal`](Self::get_goal), under the name the
    /// frontend uses when reading a goal's definition.
    pub fn get_goal_definition(&self, id: GoalId) -> Option<Arc<Goal>> {
        self.get_goal(id)
    }

    /// All achievements in insertion order.
    pub fn get_all_achievements(&self) -> Vec<Arc<Achievement>> {
        self.achievements.values().cloned().collect()
    }

    /// All goals in insertion order.
    pub fn get_all_goals(&self) -> Vec<Arc<Goal>> {
        self.goals.values().cloned().collect()
    }

    pub fn get_all_achievement_ids(&self) -> Vec<AchievementId> {
        self.achievements.ids().collect()
    }

    pub fn get_all_goal_ids(&self) -> Vec<GoalId> {
        self.goals.ids().collect()
    }

    pub fn get_title_by_id(&self, id: AchievementId) -> Option<&str> {
        self.achievements.get(&id).map(|a| a.title.as_str())
    }

    /// Id of the first achievement (in enumeration order) with exactly this title.
    pub fn get_id_by_title(&self, title: &str) -> Option<AchievementId> {
        self.achievements.values().find(|a| a.title == title).map(|a| a.id)
    }

    pub fn get_text_by_id(&self, id: GoalId) -> Option<&str> {
        self.goals.get(&id).map(|g| g.text.as_str())
    }

    /// Id of the first goal (in enumeration order) with exactly this text.
    pub fn get_id_by_text(&self, text: &str) -> Option<GoalId> {
        self.goals.values().find(|g| g.text == text).map(|g| g.id)
    }

    /// Ids of achievements flagged as tasks, in enumeration order.
    pub fn list_task_ids(&self) -> Vec<AchievementId> {
        self.achievements.values().filter(|a| a.is_task).map(|a| a.id).collect()
    }

    /// Task ids ordered by display position. Equal positions keep enumeration order.
    pub fn list_sorted_task_ids(&self) -> Vec<AchievementId> {
        let mut tasks: Vec<(i32, AchievementId)> = self
            .achievements
            .values()
            .filter(|a| a.is_task)
            .map(|a| (a.position, a.id))
            .collect();
        tasks.sort_by_key(|&(position, _)| position);
        tasks.into_iter().map(|(_, id)| id).collect()
    }

    /// Goals attached to an achievement, last-declared first. Unresolved ids are skipped.
    pub fn list_goals(&self, id: AchievementId) -> Vec<Arc<Goal>> {
        match self.achievements.get(&id) {
            Some(achievement) => achievement
                .goal_ids
                .iter()
                .rev()
                .filter_map(|goal_id| self.goals.get(goal_id).cloned())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Goals of an achievement followed by the goals of each declared prerequisite,
    /// deduplicated by goal id.
    pub fn list_prerequisite_goals(&self, id: AchievementId) -> Vec<Arc<Goal>> {
        let Some(achievement) = self.achievements.get(&id) else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        iter::once(id)
            .chain(achievement.prerequisite_ids.iter().copied())
            .flat_map(|achievement_id| self.list_goals(achievement_id))
            .filter(|goal| seen.insert(goal.id))
            .collect()
    }

    // =========================================================================
    // Graph
    // =========================================================================

    /// Whether `child_id` is a declared prerequisite of `parent_id`.
    pub fn is_immediate_child(&self, parent_id: AchievementId, child_id: AchievementId) -> bool {
        self.index.children(parent_id).contains(&child_id)
    }

    pub fn get_immediate_children(&self, id: AchievementId) -> BTreeSet<AchievementId> {
        self.index.children(id).clone()
    }

    /// Whether `id` is reachable from `ancestor_id` in one or more prerequisite hops.
    pub fn is_descendant(&self, ancestor_id: AchievementId, id: AchievementId) -> bool {
        self.index.descendants(ancestor_id).contains(&id)
    }

    pub fn get_descendants(&self, id: AchievementId) -> BTreeSet<AchievementId> {
        self.index.descendants(id).clone()
    }

    /// Achievements that could become new prerequisites of `id`: every id except `id`
    /// and its current descendants, in enumeration order.
    pub fn list_available_prerequisite_ids(&self, id: AchievementId) -> Vec<AchievementId> {
        let descendants = self.index.descendants(id);
        self.achievements
            .ids()
            .filter(|candidate| *candidate != id && !descendants.contains(candidate))
            .collect()
    }

    pub(crate) fn descendants_of(&self, id: AchievementId) -> &BTreeSet<AchievementId> {
        self.index.descendants(id)
    }

    // =========================================================================
    // XP
    // =========================================================================

    fn resolved_goals(&self, id: AchievementId) -> impl Iterator<Item = &Arc<Goal>> + '_ {
        self.achievements
            .get(&id)
            .into_iter()
            .flat_map(|a| a.goal_ids.iter())
            .filter_map(move |goal_id| self.goals.get(goal_id))
    }

    /// Sum of `xp` over the achievement's resolved goals.
    pub fn get_achievement_xp(&self, id: AchievementId) -> Xp {
        clamped_sum(self.resolved_goals(id).map(|g| g.xp))
    }

    /// Sum of `max_xp` over the achievement's resolved goals.
    pub fn get_achievement_max_xp(&self, id: AchievementId) -> Xp {
        clamped_sum(self.resolved_goals(id).map(|g| g.max_xp))
    }

    /// `xp / max_xp`, or 0 when `max_xp` is 0.
    pub fn get_progress_frac(&self, id: AchievementId) -> f64 {
        let max_xp = self.get_achievement_max_xp(id);
        if max_xp == 0 {
            return 0.0;
        }
        self.get_achievement_xp(id) as f64 / max_xp as f64
    }

    /// Sum of `xp` over every goal, linked or not.
    pub fn get_total_xp(&self) -> Xp {
        clamped_sum(self.goals.values().map(|g| g.xp))
    }
}

/// Sums in `i128` and clamps back into `Xp`, so extreme values saturate
/// instead of overflowing.
fn clamped_sum(values: impl Iterator<Item = Xp>) -> Xp {
    let total: i128 = values.map(i128::from).sum();
    total.clamp(i128::from(Xp::MIN), i128::from(Xp::MAX)) as Xp
}
