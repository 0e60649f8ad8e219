//! Deadline, release and completion inference.
//!
//! Completion is judged over an achievement's whole prerequisite subtree: it is
//! complete once every resolved goal in the subtree is completed. `now` is always
//! passed in so callers control the clock.

use std::iter;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::inferencer::AchievementInferencer;
use crate::types::{Achievement, AchievementId, AchievementStatus};

impl AchievementInferencer {
    fn subtree(&self, id: AchievementId) -> impl Iterator<Item = Arc<Achievement>> + '_ {
        iter::once(id)
            .chain(self.descendants_of(id).iter().copied())
            .filter_map(move |achievement_id| self.get_achievement(achievement_id))
    }

    /// Whether the achievement's subtree has at least one resolved goal and all of
    /// them are completed.
    pub fn is_completed(&self, id: AchievementId) -> bool {
        let mut any_goal = false;

        for achievement in self.subtree(id) {
            for goal_id in &achievement.goal_ids {
                let Some(goal) = self.get_goal(*goal_id) else {
                    continue;
                };
                if !goal.completed {
                    return false;
                }
                any_goal = true;
            }
        }

        any_goal
    }

    /// Status of an achievement at `now`; `None` for unknown ids.
    pub fn get_status(&self, id: AchievementId, now: DateTime<Utc>) -> Option<AchievementStatus> {
        let achievement = self.get_achievement(id)?;

        let status = if self.is_completed(id) {
            AchievementStatus::Completed
        } else if achievement.release.is_some_and(|release| release > now) {
            AchievementStatus::Unreleased
        } else if achievement.deadline.is_some_and(|deadline| deadline <= now) {
            AchievementStatus::Expired
        } else {
            AchievementStatus::Active
        };

        Some(status)
    }

    /// Earliest deadline after `now` across the achievement and its descendants.
    pub fn get_display_deadline(&self, id: AchievementId, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.subtree(id)
            .filter_map(|achievement| achievement.deadline)
            .filter(|deadline| *deadline > now)
            .min()
    }
}
