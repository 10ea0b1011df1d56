// ABOUTME: Integration tests for session rewards, weather bonuses, and daily quest progress
// ABOUTME: Rewards are computed from stopped-session summaries and the shared weather store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::{FixedOffset, TimeZone, Utc};
use hand_chicken::models::ActivityState;
use hand_chicken::rewards::{
    DailyQuestGoal, DailyQuestProgress, RewardContext, SessionRewards, DAILY_QUESTS,
};
use hand_chicken::session::SessionSummary;
use hand_chicken::weather::WeatherStore;
use serde_json::json;
use uuid::Uuid;

fn summary(duration_secs: u64, steps: u64) -> SessionSummary {
    SessionSummary {
        session_id: Uuid::new_v4(),
        started_at: Utc::now(),
        duration_secs,
        steps,
        final_activity: ActivityState::Walking,
        last_calibration: None,
    }
}

#[test]
fn test_plain_afternoon_session() {
    let context = RewardContext {
        local_start_hour: 15,
        raining: false,
    };
    let rewards = SessionRewards::compute(&summary(600, 1010), &context);
    assert_eq!(
        rewards,
        SessionRewards {
            stamina: 60,
            satiety: 50,
            mood: 40,
        }
    );
}

#[test]
fn test_short_session_earns_nothing() {
    let context = RewardContext {
        local_start_hour: 15,
        raining: false,
    };
    assert_eq!(
        SessionRewards::compute(&summary(9, 19), &context),
        SessionRewards::default()
    );
}

#[test]
fn test_early_bird_in_the_rain_stacks_bonuses() {
    let weather = WeatherStore::new();
    weather.set_manual_rain(true);
    let started = FixedOffset::east_opt(8 * 3600)
        .unwrap()
        .with_ymd_and_hms(2025, 5, 1, 7, 30, 0)
        .unwrap();

    let context = RewardContext::for_start(&started, &weather);
    assert_eq!(context.local_start_hour, 7);
    assert!(context.raining);
    assert!(context.is_early_bird());

    // 1.15 * 1.2 = 1.38
    let rewards = SessionRewards::compute(&summary(600, 1010), &context);
    assert_eq!(
        rewards,
        SessionRewards {
            stamina: 82,
            satiety: 69,
            mood: 55,
        }
    );
}

#[test]
fn test_reported_rain_counts_without_manual_toggle() {
    let weather = WeatherStore::new();
    weather.set_reported_rain(true);
    assert!(!weather.manual_rain());
    let started = Utc.with_ymd_and_hms(2025, 5, 1, 18, 0, 0).unwrap();
    let context = RewardContext::for_start(&started, &weather);
    assert!(context.raining);
    assert!(!context.is_early_bird());
    assert!((context.multiplier() - 1.2).abs() < 1e-12);
}

#[test]
fn test_daily_quest_table() {
    let goals: Vec<_> = DAILY_QUESTS.iter().map(|quest| quest.goal).collect();
    assert_eq!(
        goals,
        vec![
            DailyQuestGoal::Login,
            DailyQuestGoal::ExerciseSeconds(600),
            DailyQuestGoal::Steps(5000),
        ]
    );
    assert!(DAILY_QUESTS.iter().all(|quest| quest.reward_mood == 5));
}

#[test]
fn test_daily_progress_from_backend_counters() {
    let data = json!({
        "quest_1_claimed": 1,
        "daily_exercise_seconds": 540,
        "daily_steps": 5200,
    });
    let progress = DailyQuestProgress::from_backend(&data);
    assert_eq!(progress.len(), 3);

    assert!(progress[0].claimed);
    assert!(!progress[0].claimable);

    assert!(!progress[1].claimed);
    assert!(!progress[1].claimable);

    assert!(!progress[2].claimed);
    assert!(progress[2].claimable);
}

#[test]
fn test_explicit_claimable_flag_wins() {
    let data = json!({ "quest_3_claimable": "", "daily_steps": 9000 });
    let progress = DailyQuestProgress::from_backend(&data);
    assert!(!progress[2].claimable);
    assert!(progress[0].claimable);
}
