//! Achievement WASM - Browser bindings for achievement inference
//!
//! Exposes [`achievement_inference::AchievementInferencer`] to the frontend as a JS
//! class. Records cross the boundary as JSON strings in the frontend's
//! `AchievementItem` / `AchievementGoal` shapes; id lists come back as `Int32Array`.
//!
//! ## Usage in JavaScript
//!
//! ```javascript
//! import init, { AchievementInferencer } from 'achievement-wasm';
//!
//! await init();
//!
//! const inferencer = new AchievementInferencer(
//!   JSON.stringify(achievements),
//!   JSON.stringify(goals)
//! );
//!
//! inferencer.get_descendants(1);             // Int32Array [2, 3, 4, 5]
//! inferencer.get_progress_frac(1);           // 0.6
//! JSON.parse(inferencer.get_achievement(1)); // { id: 1, title: ... }
//! ```
//!
//! ## Build
//!
//! ```bash
//! wasm-pack build --target web --out-dir pkg
//! ```

use achievement_inference::{
    decode_achievements, decode_goals, Achievement, AchievementId, AchievementInferencer as Inferencer, Goal,
    GoalId, InferenceError, InferencerConfig,
};
use chrono::{DateTime, Utc};
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Report a rejected payload. Goes to the browser console in WASM, to `tracing`
/// natively.
fn report_error(context: &str, err: &InferenceError) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&format!("{}: {}", context, err)));

    #[cfg(not(target_arch = "wasm32"))]
    tracing::warn!(context, error = %err, "Rejected achievement payload");
}

fn to_js_error(context: &str, err: InferenceError) -> JsError {
    report_error(context, &err);
    JsError::new(&err.to_string())
}

/// Current time in milliseconds since the epoch.
fn current_time_ms() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Utc::now().timestamp_millis() as f64
    }
}

/// Non-finite or out-of-range input falls back to the current time.
fn time_from_ms(millis: f64) -> DateTime<Utc> {
    millis
        .is_finite()
        .then(|| DateTime::from_timestamp_millis(millis as i64))
        .flatten()
        .or_else(|| DateTime::from_timestamp_millis(current_time_ms() as i64))
        .unwrap_or_default()
}

fn to_json<T: serde::Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}

// ============================================================================
// Inferencer
// ============================================================================

/// Achievement inferencer for the browser.
#[wasm_bindgen(js_name = AchievementInferencer)]
pub struct WasmAchievementInferencer {
    inner: Inferencer,
}

/// Native-side entry points. These return Rust errors so they can be used and
/// tested off the JS boundary.
impl WasmAchievementInferencer {
    pub fn try_new(achievements_json: &str, goals_json: &str) -> achievement_inference::Result<Self> {
        Ok(Self {
            inner: Inferencer::from_json(achievements_json, goals_json)?,
        })
    }

    pub fn try_with_config(
        config_json: &str,
        achievements_json: &str,
        goals_json: &str,
    ) -> achievement_inference::Result<Self> {
        let config = InferencerConfig::from_json(config_json)?;
        let achievements = decode_achievements(achievements_json)?;
        let goals = decode_goals(goals_json)?;
        Ok(Self {
            inner: Inferencer::with_config(config, achievements, goals),
        })
    }

    pub fn try_set_all(&mut self, achievements_json: &str, goals_json: &str) -> achievement_inference::Result<()> {
        let achievements = decode_achievements(achievements_json)?;
        let goals = decode_goals(goals_json)?;
        self.inner.set_all(achievements, goals);
        Ok(())
    }

    pub fn try_upsert_achievement(&mut self, achievement_json: &str) -> achievement_inference::Result<()> {
        let achievement: Achievement = serde_json::from_str(achievement_json)?;
        self.inner.insert_achievement(achievement);
        Ok(())
    }

    pub fn try_upsert_goal(&mut self, goal_json: &str) -> achievement_inference::Result<()> {
        let goal: Goal = serde_json::from_str(goal_json)?;
        self.inner.insert_goal(goal);
        Ok(())
    }

    pub fn inner(&self) -> &Inferencer {
        &self.inner
    }
}

#[wasm_bindgen(js_class = AchievementInferencer)]
impl WasmAchievementInferencer {
    /// Create an inferencer from JSON arrays of achievements and goals.
    #[wasm_bindgen(constructor)]
    pub fn new(achievements_json: &str, goals_json: &str) -> Result<WasmAchievementInferencer, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        set_panic_hook();

        Self::try_new(achievements_json, goals_json).map_err(|e| to_js_error("new", e))
    }

    /// Create an inferencer with a JSON config object.
    ///
    /// ```javascript
    /// AchievementInferencer.with_config('{"warn_on_cycles": false}', achievements, goals);
    /// ```
    #[wasm_bindgen]
    pub fn with_config(
        config_json: &str,
        achievements_json: &str,
        goals_json: &str,
    ) -> Result<WasmAchievementInferencer, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        set_panic_hook();

        Self::try_with_config(config_json, achievements_json, goals_json).map_err(|e| to_js_error("with_config", e))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace all achievements and goals.
    #[wasm_bindgen]
    pub fn set_all(&mut self, achievements_json: &str, goals_json: &str) -> Result<(), JsError> {
        self.try_set_all(achievements_json, goals_json).map_err(|e| to_js_error("set_all", e))
    }

    /// Insert or overwrite one achievement.
    #[wasm_bindgen]
    pub fn upsert_achievement(&mut self, achievement_json: &str) -> Result<(), JsError> {
        self.try_upsert_achievement(achievement_json)
            .map_err(|e| to_js_error("upsert_achievement", e))
    }

    /// Insert or overwrite one goal.
    #[wasm_bindgen]
    pub fn upsert_goal(&mut self, goal_json: &str) -> Result<(), JsError> {
        self.try_upsert_goal(goal_json).map_err(|e| to_js_error("upsert_goal", e))
    }

    /// Remove an achievement. Returns whether it existed.
    #[wasm_bindgen]
    pub fn remove_achievement(&mut self, id: AchievementId) -> bool {
        self.inner.remove_achievement(id).is_some()
    }

    /// Remove a goal. Returns whether it existed.
    #[wasm_bindgen]
    pub fn remove_goal(&mut self, id: GoalId) -> bool {
        self.inner.remove_goal(id).is_some()
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Achievement as JSON, or undefined.
    #[wasm_bindgen]
    pub fn get_achievement(&self, id: AchievementId) -> Option<String> {
        self.inner.get_achievement(id).and_then(|a| to_json(&*a))
    }

    /// Goal as JSON, or undefined.
    #[wasm_bindgen]
    pub fn get_goal(&self, id: GoalId) -> Option<String> {
        self.inner.get_goal(id).and_then(|g| to_json(&*g))
    }

    #[wasm_bindgen]
    pub fn get_goal_definition(&self, id: GoalId) -> Option<String> {
        self.inner.get_goal_definition(id).and_then(|g| to_json(&*g))
    }

    /// JSON array of all achievements in insertion order.
    #[wasm_bindgen]
    pub fn get_all_achievements(&self) -> String {
        let achievements = self.inner.get_all_achievements();
        let achievements: Vec<&Achievement> = achievements.iter().map(|a| &**a).collect();
        to_json(&achievements).unwrap_or_else(|| "[]".to_string())
    }

    /// JSON array of all goals in insertion order.
    #[wasm_bindgen]
    pub fn get_all_goals(&self) -> String {
        let goals = self.inner.get_all_goals();
        let goals: Vec<&Goal> = goals.iter().map(|g| &**g).collect();
        to_json(&goals).unwrap_or_else(|| "[]".to_string())
    }

    #[wasm_bindgen]
    pub fn get_all_achievement_ids(&self) -> Vec<AchievementId> {
        self.inner.get_all_achievement_ids()
    }

    #[wasm_bindgen]
    pub fn get_all_goal_ids(&self) -> Vec<GoalId> {
        self.inner.get_all_goal_ids()
    }

    #[wasm_bindgen]
    pub fn get_title_by_id(&self, id: AchievementId) -> Option<String> {
        self.inner.get_title_by_id(id).map(str::to_string)
    }

    #[wasm_bindgen]
    pub fn get_id_by_title(&self, title: &str) -> Option<AchievementId> {
        self.inner.get_id_by_title(title)
    }

    #[wasm_bindgen]
    pub fn get_text_by_id(&self, id: GoalId) -> Option<String> {
        self.inner.get_text_by_id(id).map(str::to_string)
    }

    #[wasm_bindgen]
    pub fn get_id_by_text(&self, text: &str) -> Option<GoalId> {
        self.inner.get_id_by_text(text)
    }

    #[wasm_bindgen]
    pub fn list_task_ids(&self) -> Vec<AchievementId> {
        self.inner.list_task_ids()
    }

    #[wasm_bindgen]
    pub fn list_sorted_task_ids(&self) -> Vec<AchievementId> {
        self.inner.list_sorted_task_ids()
    }

    /// JSON array of the achievement's goals, last-declared first.
    #[wasm_bindgen]
    pub fn list_goals(&self, id: AchievementId) -> String {
        let goals = self.inner.list_goals(id);
        let goals: Vec<&Goal> = goals.iter().map(|g| &**g).collect();
        to_json(&goals).unwrap_or_else(|| "[]".to_string())
    }

    /// JSON array of the achievement's own and prerequisites' goals.
    #[wasm_bindgen]
    pub fn list_prerequisite_goals(&self, id: AchievementId) -> String {
        let goals = self.inner.list_prerequisite_goals(id);
        let goals: Vec<&Goal> = goals.iter().map(|g| &**g).collect();
        to_json(&goals).unwrap_or_else(|| "[]".to_string())
    }

    // =========================================================================
    // Graph
    // =========================================================================

    #[wasm_bindgen]
    pub fn is_immediate_child(&self, parent_id: AchievementId, child_id: AchievementId) -> bool {
        self.inner.is_immediate_child(parent_id, child_id)
    }

    /// Declared prerequisites, ascending.
    #[wasm_bindgen]
    pub fn get_immediate_children(&self, id: AchievementId) -> Vec<AchievementId> {
        self.inner.get_immediate_children(id).into_iter().collect()
    }

    #[wasm_bindgen]
    pub fn is_descendant(&self, ancestor_id: AchievementId, id: AchievementId) -> bool {
        self.inner.is_descendant(ancestor_id, id)
    }

    /// All transitive prerequisites, ascending.
    #[wasm_bindgen]
    pub fn get_descendants(&self, id: AchievementId) -> Vec<AchievementId> {
        self.inner.get_descendants(id).into_iter().collect()
    }

    #[wasm_bindgen]
    pub fn list_available_prerequisite_ids(&self, id: AchievementId) -> Vec<AchievementId> {
        self.inner.list_available_prerequisite_ids(id)
    }

    // =========================================================================
    // XP
    // =========================================================================

    #[wasm_bindgen]
    pub fn get_achievement_xp(&self, id: AchievementId) -> f64 {
        self.inner.get_achievement_xp(id) as f64
    }

    #[wasm_bindgen]
    pub fn get_achievement_max_xp(&self, id: AchievementId) -> f64 {
        self.inner.get_achievement_max_xp(id) as f64
    }

    #[wasm_bindgen]
    pub fn get_progress_frac(&self, id: AchievementId) -> f64 {
        self.inner.get_progress_frac(id)
    }

    #[wasm_bindgen]
    pub fn get_total_xp(&self) -> f64 {
        self.inner.get_total_xp() as f64
    }

    // =========================================================================
    // Status
    // =========================================================================

    #[wasm_bindgen]
    pub fn is_completed(&self, id: AchievementId) -> bool {
        self.inner.is_completed(id)
    }

    /// Status string ("ACTIVE", "COMPLETED", "EXPIRED", "UNRELEASED") at `now_ms`,
    /// or at the current time when omitted.
    #[wasm_bindgen]
    pub fn get_status(&self, id: AchievementId, now_ms: Option<f64>) -> Option<String> {
        let now = time_from_ms(now_ms.unwrap_or_else(current_time_ms));
        self.inner.get_status(id, now).map(|status| status.as_str().to_string())
    }

    /// Nearest upcoming deadline in the achievement's subtree, in epoch milliseconds.
    #[wasm_bindgen]
    pub fn get_display_deadline(&self, id: AchievementId, now_ms: Option<f64>) -> Option<f64> {
        let now = time_from_ms(now_ms.unwrap_or_else(current_time_ms));
        self.inner
            .get_display_deadline(id, now)
            .map(|deadline| deadline.timestamp_millis() as f64)
    }
}
