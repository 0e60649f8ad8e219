//! Inferencer behavior over realistic achievement sets

use std::collections::BTreeSet;
use std::sync::Arc;

use achievement_inference::{
    Achievement, AchievementAbility, AchievementInferencer, AchievementView, Goal, GoalMeta,
};

fn test_achievement(id: i32) -> Achievement {
    Achievement {
        id,
        title: "Test Achievement".to_string(),
        ability: AchievementAbility::Core,
        card_background: "card-background/default.png".to_string(),
        view: AchievementView {
            cover_image: "cover-image/default.png".to_string(),
            description: "This is a test achievement".to_string(),
            completion_text: "Congratulations! You've completed the test achievement!".to_string(),
        },
        ..Default::default()
    }
}

fn test_goal(id: i32) -> Goal {
    Goal {
        id,
        text: "Test Goal".to_string(),
        meta: GoalMeta::Manual { max_xp: 0 },
        ..Default::default()
    }
}

fn set(ids: &[i32]) -> BTreeSet<i32> {
    ids.iter().copied().collect()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_accepts_empty_inputs() {
    let inferencer = AchievementInferencer::new(Vec::<Achievement>::new(), Vec::<Goal>::new());
    assert!(inferencer.get_all_achievements().is_empty());
    assert!(inferencer.get_all_goals().is_empty());

    let inferencer = AchievementInferencer::new(vec![test_achievement(0)], Vec::<Goal>::new());
    assert_eq!(*inferencer.get_all_achievements()[0], test_achievement(0));
    assert!(inferencer.get_all_goals().is_empty());

    let inferencer = AchievementInferencer::new(Vec::<Achievement>::new(), vec![test_goal(0)]);
    assert!(inferencer.get_all_achievements().is_empty());
    assert_eq!(*inferencer.get_all_goals()[0], test_goal(0));
}

#[test]
fn test_overlapping_ids_keep_last_occurrence() {
    let achievement1 = Arc::new(test_achievement(1));
    let achievement2 = Arc::new(test_achievement(2));
    let achievement3 = Arc::new(test_achievement(2));

    let goal1 = Arc::new(test_goal(1));
    let goal2 = Arc::new(test_goal(1));
    let goal3 = Arc::new(test_goal(2));

    let inferencer = AchievementInferencer::new(
        vec![achievement1.clone(), achievement2.clone(), achievement3.clone()],
        vec![goal1.clone(), goal2.clone(), goal3.clone()],
    );

    assert_eq!(inferencer.get_all_achievement_ids(), vec![1, 2]);
    assert_eq!(inferencer.get_all_goal_ids(), vec![1, 2]);

    assert!(Arc::ptr_eq(&inferencer.get_achievement(1).unwrap(), &achievement1));
    assert!(!Arc::ptr_eq(&inferencer.get_achievement(2).unwrap(), &achievement2));
    assert!(Arc::ptr_eq(&inferencer.get_achievement(2).unwrap(), &achievement3));
    assert!(!Arc::ptr_eq(&inferencer.get_goal(1).unwrap(), &goal1));
    assert!(Arc::ptr_eq(&inferencer.get_goal(1).unwrap(), &goal2));
    assert!(Arc::ptr_eq(&inferencer.get_goal(2).unwrap(), &goal3));
}

#[test]
fn test_goal_definition_shares_identity_with_get_goal() {
    let goal1 = Arc::new(test_goal(1));
    let goal2 = Arc::new(test_goal(1));
    let inferencer = AchievementInferencer::new(Vec::<Achievement>::new(), vec![goal1.clone(), goal2.clone()]);

    let Some(definition) = inferencer.get_goal_definition(1) else {
        panic!("goal 1 should resolve");
    };
    assert!(Arc::ptr_eq(&definition, &goal2));
    assert!(!Arc::ptr_eq(&definition, &goal1));
    assert!(Arc::ptr_eq(&definition, &inferencer.get_goal(1).unwrap()));
    assert!(inferencer.get_goal_definition(99).is_none());
}

#[test]
fn test_surviving_entry_takes_last_position() {
    let inferencer = AchievementInferencer::new(
        vec![test_achievement(1), test_achievement(2), test_achievement(1)],
        Vec::<Goal>::new(),
    );
    assert_eq!(inferencer.get_all_achievement_ids(), vec![2, 1]);
}

#[test]
fn test_overwrite_does_not_touch_held_record() {
    let original = Arc::new(Achievement {
        title: "Before".to_string(),
        ..test_achievement(1)
    });
    let mut inferencer = AchievementInferencer::new(vec![original.clone()], Vec::<Goal>::new());

    inferencer.insert_achievement(Achievement {
        title: "After".to_string(),
        ..test_achievement(1)
    });

    assert_eq!(original.title, "Before");
    assert_eq!(inferencer.get_title_by_id(1), Some("After"));
}

#[test]
fn test_from_json() {
    let inferencer = AchievementInferencer::from_json(
        r#"[{"id": 1, "title": "Runes", "goalIds": [1]}]"#,
        r#"[{"id": 1, "text": "Draw", "xp": 30, "maxXp": 60}]"#,
    )
    .unwrap();

    assert_eq!(inferencer.get_progress_frac(1), 0.5);
    assert!(AchievementInferencer::from_json("[", "[]").is_err());
}

// =============================================================================
// Getters
// =============================================================================

#[test]
fn test_list_goals_last_declared_first() {
    let goal1 = Arc::new(test_goal(1));
    let goal2 = Arc::new(test_goal(2));

    let inferencer = AchievementInferencer::new(
        vec![
            Achievement { goal_ids: vec![2, 1], ..test_achievement(1) },
            Achievement { goal_ids: vec![], ..test_achievement(2) },
        ],
        vec![goal1.clone(), goal2.clone()],
    );

    let goals = inferencer.list_goals(1);
    assert_eq!(goals.len(), 2);
    assert!(Arc::ptr_eq(&goals[0], &goal1));
    assert!(Arc::ptr_eq(&goals[1], &goal2));
    assert!(inferencer.list_goals(2).is_empty());
}

#[test]
fn test_list_prerequisite_goals() {
    let goal1 = Arc::new(test_goal(1));
    let goal2 = Arc::new(test_goal(2));

    let inferencer = AchievementInferencer::new(
        vec![
            Achievement { prerequisite_ids: vec![2], ..test_achievement(1) },
            Achievement { goal_ids: vec![2, 1], ..test_achievement(2) },
        ],
        vec![goal1.clone(), goal2.clone()],
    );

    let goals = inferencer.list_prerequisite_goals(1);
    assert_eq!(goals.len(), 2);
    assert!(Arc::ptr_eq(&goals[0], &goal1));
    assert!(Arc::ptr_eq(&goals[1], &goal2));
}

#[test]
fn test_task_ids() {
    let inferencer = AchievementInferencer::new(
        vec![
            test_achievement(0).as_task(3),
            test_achievement(1),
            test_achievement(4).as_task(1),
            test_achievement(8).as_task(0),
            test_achievement(13).as_task(5),
            test_achievement(16),
        ],
        Vec::<Goal>::new(),
    );

    assert_eq!(inferencer.list_task_ids(), vec![0, 4, 8, 13]);
    assert_eq!(inferencer.list_sorted_task_ids(), vec![8, 4, 0, 13]);
}

#[test]
fn test_title_lookup() {
    let title = "AcH1Ev3m3Nt t1tL3 h3R3";
    let inferencer = AchievementInferencer::new(
        vec![Achievement { title: title.to_string(), ..test_achievement(123) }],
        Vec::<Goal>::new(),
    );

    assert_eq!(inferencer.get_title_by_id(1), None);
    assert_eq!(inferencer.get_title_by_id(123), Some(title));
    assert_eq!(inferencer.get_id_by_title("IUisL0v3"), None);
    assert_eq!(inferencer.get_id_by_title(title), Some(123));
}

#[test]
fn test_title_lookup_returns_first_match() {
    let inferencer = AchievementInferencer::new(
        vec![test_achievement(7), test_achievement(3)],
        Vec::<Goal>::new(),
    );
    assert_eq!(inferencer.get_id_by_title("Test Achievement"), Some(7));
}

#[test]
fn test_text_lookup() {
    let text = "g0@L T3xt h3R3";
    let inferencer = AchievementInferencer::new(
        Vec::<Achievement>::new(),
        vec![Goal { text: text.to_string(), ..test_goal(123) }],
    );

    assert_eq!(inferencer.get_text_by_id(1), None);
    assert_eq!(inferencer.get_text_by_id(123), Some(text));
    assert_eq!(inferencer.get_id_by_text("IUisL0v3"), None);
    assert_eq!(inferencer.get_id_by_text(text), Some(123));
}

// =============================================================================
// Prerequisite system
// =============================================================================

fn prerequisite_inferencer() -> AchievementInferencer {
    AchievementInferencer::new(
        vec![
            Achievement { prerequisite_ids: vec![2, 3], ..test_achievement(1) },
            test_achievement(2),
            Achievement { prerequisite_ids: vec![4], ..test_achievement(3) },
            Achievement { prerequisite_ids: vec![5], ..test_achievement(4) },
            test_achievement(5),
        ],
        Vec::<Goal>::new(),
    )
}

#[test]
fn test_is_immediate_child() {
    let inferencer = prerequisite_inferencer();
    assert!(inferencer.is_immediate_child(1, 2));
    assert!(inferencer.is_immediate_child(1, 3));
    assert!(!inferencer.is_immediate_child(1, 4));
    assert!(!inferencer.is_immediate_child(1, 5));
    assert!(!inferencer.is_immediate_child(1, 101));
}

#[test]
fn test_get_immediate_children() {
    let inferencer = prerequisite_inferencer();
    assert_eq!(inferencer.get_immediate_children(1), set(&[2, 3]));
    assert_eq!(inferencer.get_immediate_children(2), set(&[]));
    assert_eq!(inferencer.get_immediate_children(3), set(&[4]));
    assert_eq!(inferencer.get_immediate_children(4), set(&[5]));
    assert_eq!(inferencer.get_immediate_children(101), set(&[]));
}

#[test]
fn test_is_descendant() {
    let inferencer = prerequisite_inferencer();
    assert!(inferencer.is_descendant(1, 2));
    assert!(inferencer.is_descendant(1, 3));
    assert!(inferencer.is_descendant(1, 4));
    assert!(inferencer.is_descendant(1, 5));
    assert!(!inferencer.is_descendant(1, 101));
    assert!(!inferencer.is_descendant(1, 1));
}

#[test]
fn test_get_descendants() {
    let inferencer = prerequisite_inferencer();
    assert_eq!(inferencer.get_descendants(1), set(&[2, 3, 4, 5]));
    assert_eq!(inferencer.get_descendants(2), set(&[]));
    assert_eq!(inferencer.get_descendants(3), set(&[4, 5]));
    assert_eq!(inferencer.get_descendants(4), set(&[5]));
    assert_eq!(inferencer.get_descendants(101), set(&[]));
}

#[test]
fn test_list_available_prerequisite_ids() {
    let inferencer = prerequisite_inferencer();
    assert_eq!(inferencer.list_available_prerequisite_ids(1), Vec::<i32>::new());
    assert_eq!(inferencer.list_available_prerequisite_ids(2), vec![3, 4, 5]);
    assert_eq!(inferencer.list_available_prerequisite_ids(3), vec![2]);
    assert_eq!(inferencer.list_available_prerequisite_ids(4), vec![2]);
    assert_eq!(inferencer.list_available_prerequisite_ids(5), vec![2]);
    assert_eq!(inferencer.list_available_prerequisite_ids(101), vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_cyclic_prerequisites_terminate() {
    let inferencer = AchievementInferencer::new(
        vec![
            Achievement { prerequisite_ids: vec![2], ..test_achievement(1) },
            Achievement { prerequisite_ids: vec![1], ..test_achievement(2) },
        ],
        Vec::<Goal>::new(),
    );

    assert_eq!(inferencer.get_descendants(1), set(&[1, 2]));
    assert!(inferencer.list_available_prerequisite_ids(1).is_empty());
}

// =============================================================================
// XP system
// =============================================================================

fn xp_inferencer() -> AchievementInferencer {
    AchievementInferencer::new(
        vec![
            Achievement { goal_ids: vec![1, 2], ..test_achievement(1) },
            Achievement { goal_ids: vec![], ..test_achievement(2) },
        ],
        vec![
            Goal { xp: 100, max_xp: 100, ..test_goal(1) },
            Goal { xp: 20, max_xp: 100, ..test_goal(2) },
            Goal { xp: 3, max_xp: 100, ..test_goal(3) },
        ],
    )
}

#[test]
fn test_achievement_xp() {
    let inferencer = xp_inferencer();
    assert_eq!(inferencer.get_achievement_xp(1), 120);
    assert_eq!(inferencer.get_achievement_xp(2), 0);
    assert_eq!(inferencer.get_achievement_xp(101), 0);
}

#[test]
fn test_achievement_max_xp() {
    let inferencer = xp_inferencer();
    assert_eq!(inferencer.get_achievement_max_xp(1), 200);
    assert_eq!(inferencer.get_achievement_max_xp(2), 0);
}

#[test]
fn test_total_xp() {
    assert_eq!(xp_inferencer().get_total_xp(), 123);
}

#[test]
fn test_progress_frac() {
    let inferencer = xp_inferencer();
    assert!((inferencer.get_progress_frac(1) - 120.0 / 200.0).abs() < 1e-9);
    assert_eq!(inferencer.get_progress_frac(2), 0.0);
    assert_eq!(inferencer.get_progress_frac(101), 0.0);
}

#[test]
fn test_unresolved_goals_contribute_nothing() {
    let inferencer = AchievementInferencer::new(
        vec![Achievement { goal_ids: vec![1, 77], ..test_achievement(1) }],
        vec![Goal { xp: 10, max_xp: 40, ..test_goal(1) }],
    );

    assert_eq!(inferencer.get_achievement_xp(1), 10);
    assert_eq!(inferencer.get_achievement_max_xp(1), 40);
    assert_eq!(inferencer.get_progress_frac(1), 0.25);
}

#[test]
fn test_total_xp_saturates_from_json() {
    let goals = format!(
        r#"[{{"id": 1, "text": "a", "xp": {max}, "maxXp": {max}}}, {{"id": 2, "text": "b", "xp": 1, "maxXp": 1}}]"#,
        max = i64::MAX
    );
    let achievements = r#"[{"id": 1, "title": "one", "goalIds": [1, 2]}]"#;
    let inferencer = AchievementInferencer::from_json(achievements, &goals).unwrap();

    assert_eq!(inferencer.get_total_xp(), i64::MAX);
    assert_eq!(inferencer.get_achievement_xp(1), i64::MAX);
    assert_eq!(inferencer.get_achievement_max_xp(1), i64::MAX);
    assert_eq!(inferencer.get_progress_frac(1), 1.0);
}
