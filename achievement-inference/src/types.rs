//! Achievement and goal records.
//!
//! These mirror the frontend's `AchievementItem` and `AchievementGoal` shapes and
//! (de)serialize as camelCase JSON. With the `typescript` feature enabled they can be
//! exported through ts-rs so the frontend and this crate share one definition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Identifier of an achievement.
pub type AchievementId = i32;

/// Identifier of a goal.
pub type GoalId = i32;

/// Experience points. Signed, since values are passed through unvalidated.
pub type Xp = i64;

/// Ability category an achievement trains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub enum AchievementAbility {
    Core,
    Effort,
    Exploration,
    Community,
}

impl Default for AchievementAbility {
    fn default() -> Self {
        Self::Core
    }
}

/// Presentation metadata shown when an achievement is opened.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct AchievementView {
    pub cover_image: String,
    pub description: String,
    pub completion_text: String,
}

/// A user-facing milestone with prerequisites and linked goals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    pub id: AchievementId,
    pub title: String,
    pub ability: AchievementAbility,
    pub is_task: bool,
    /// Achievements that must precede this one, in declaration order
    pub prerequisite_ids: Vec<AchievementId>,
    /// Goals contributing XP to this achievement, in declaration order
    pub goal_ids: Vec<GoalId>,
    /// Display ordering among tasks
    pub position: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release: Option<DateTime<Utc>>,
    pub card_background: String,
    pub view: AchievementView,
}

impl Achievement {
    /// Create an achievement with the given id and title.
    pub fn new(id: AchievementId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder: mark as a task at the given display position.
    pub fn as_task(mut self, position: i32) -> Self {
        self.is_task = true;
        self.position = position;
        self
    }

    /// Builder: set prerequisite ids.
    pub fn with_prerequisites(mut self, ids: impl IntoIterator<Item = AchievementId>) -> Self {
        self.prerequisite_ids = ids.into_iter().collect();
        self
    }

    /// Builder: set goal ids.
    pub fn with_goals(mut self, ids: impl IntoIterator<Item = GoalId>) -> Self {
        self.goal_ids = ids.into_iter().collect();
        self
    }

    /// Builder: set deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Builder: set release time.
    pub fn with_release(mut self, release: DateTime<Utc>) -> Self {
        self.release = Some(release);
        self
    }
}

/// How a goal's progress is earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "type")]
pub enum GoalMeta {
    /// Awarded by hand
    Manual {
        #[serde(rename = "maxXp", default)]
        max_xp: Xp,
    },
    /// Earned by completing an assessment
    Assessment {
        #[serde(rename = "assessmentNumber", default)]
        assessment_number: String,
        #[serde(rename = "requiredCompletionFrac", default)]
        required_completion_frac: f64,
    },
    /// Earned when a condition evaluates true; the condition tree is opaque here
    Binary {
        #[serde(default)]
        condition: serde_json::Value,
        #[serde(rename = "maxXp", default)]
        max_xp: Xp,
    },
}

impl Default for GoalMeta {
    fn default() -> Self {
        Self::Manual { max_xp: 0 }
    }
}

/// A quantifiable sub-objective contributing XP toward achievements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase", default)]
pub struct Goal {
    pub id: GoalId,
    pub text: String,
    pub meta: GoalMeta,
    /// Integral only; a fractional value fails decoding.
    pub xp: Xp,
    pub max_xp: Xp,
    pub completed: bool,
}

impl Goal {
    /// Create a goal with the given id and text.
    pub fn new(id: GoalId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            ..Default::default()
        }
    }

    /// Builder: set earned and attainable XP.
    pub fn with_xp(mut self, xp: Xp, max_xp: Xp) -> Self {
        self.xp = xp;
        self.max_xp = max_xp;
        self
    }

    /// Builder: mark completed.
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

/// Lifecycle state of an achievement at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AchievementStatus {
    /// Released, not yet completed, deadline not passed
    Active,
    /// Every goal in the subtree is completed
    Completed,
    /// Deadline passed before completion
    Expired,
    /// Release time still in the future
    Unreleased,
}

impl AchievementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Expired => "EXPIRED",
            Self::Unreleased => "UNRELEASED",
        }
    }
}

/// Decode a JSON array of achievements.
pub fn decode_achievements(json: &str) -> Result<Vec<Achievement>> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a JSON array of goals.
pub fn decode_goals(json: &str) -> Result<Vec<Goal>> {
    Ok(serde_json::from_str(json)?)
}
