//! Achievement inference for Source Academy
//!
//! Derives progress, XP totals and prerequisite relationships from raw achievement
//! and goal records:
//!
//! - **Deduplication**: records are keyed by id; later entries win
//! - **Prerequisite graph**: immediate children and descendant closure per achievement
//! - **XP aggregation**: per-achievement sums and progress fractions over linked goals
//! - **Status**: completion, release and deadline inference
//!
//! # Key Components
//!
//! - [`AchievementInferencer`]: owns the records and answers every query
//! - [`PrerequisiteIndex`]: the derived graph index, rebuilt on every mutation
//! - [`IdMap`]: insertion-ordered id-keyed storage of shared records
//!
//! # Example
//!
//! ```
//! use achievement_inference::{Achievement, AchievementInferencer, Goal};
//!
//! let inferencer = AchievementInferencer::new(
//!     vec![
//!         Achievement::new(1, "Rune Master").with_prerequisites([2]),
//!         Achievement::new(2, "Rune Novice").with_goals([1]),
//!     ],
//!     vec![Goal::new(1, "Draw a heart").with_xp(50, 100)],
//! );
//!
//! assert!(inferencer.is_descendant(1, 2));
//! assert_eq!(inferencer.get_progress_frac(2), 0.5);
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod inferencer;
pub mod ordered;
pub mod status;
pub mod types;

// Re-export main types
pub use config::InferencerConfig;
pub use error::{InferenceError, Result};
pub use graph::PrerequisiteIndex;
pub use inferencer::AchievementInferencer;
pub use ordered::IdMap;
pub use types::*;
