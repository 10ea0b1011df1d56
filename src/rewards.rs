// ABOUTME: End-of-session pet rewards and the daily quest table
// ABOUTME: Converts session duration and steps into stat deltas with early-bird and rain bonuses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Rewards
//!
//! Stamina, satiety, and mood earned by an exercise session, plus the
//! claim state of the three daily quests as reported by the backend.

use crate::session::SessionSummary;
use crate::weather::WeatherStore;
use chrono::{DateTime, TimeZone, Timelike};
use hand_chicken_core::constants::rewards::{
    DAILY_EXERCISE_SECONDS_GOAL, DAILY_STEPS_GOAL, EARLY_BIRD_END_HOUR, EARLY_BIRD_MULTIPLIER,
    EARLY_BIRD_START_HOUR, RAIN_MULTIPLIER, SECONDS_PER_MOOD, SECONDS_PER_STAMINA,
    STEPS_PER_SATIETY,
};
use serde::Serialize;
use serde_json::Value;

/// Conditions that scale a session's rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardContext {
    /// Local hour (0-23) at which the session started
    pub local_start_hour: u32,
    /// Whether it was raining when the session ended
    pub raining: bool,
}

impl RewardContext {
    /// Context from a session start time in the user's time zone and the shared weather
    #[must_use]
    pub fn for_start<Tz: TimeZone>(started_at: &DateTime<Tz>, weather: &WeatherStore) -> Self {
        Self {
            local_start_hour: started_at.hour(),
            raining: weather.is_raining(),
        }
    }

    /// Whether the session started in the early-bird window
    #[must_use]
    pub const fn is_early_bird(&self) -> bool {
        self.local_start_hour >= EARLY_BIRD_START_HOUR && self.local_start_hour < EARLY_BIRD_END_HOUR
    }

    /// Combined bonus multiplier
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        let mut multiplier = 1.0;
        if self.is_early_bird() {
            multiplier *= EARLY_BIRD_MULTIPLIER;
        }
        if self.raining {
            multiplier *= RAIN_MULTIPLIER;
        }
        multiplier
    }
}

/// Stat deltas earned by one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SessionRewards {
    /// One point per ten seconds
    pub stamina: u64,
    /// One point per twenty steps
    pub satiety: u64,
    /// One point per fifteen seconds
    pub mood: u64,
}

impl SessionRewards {
    /// Rewards for a stopped session
    #[must_use]
    pub fn compute(summary: &SessionSummary, context: &RewardContext) -> Self {
        Self::from_totals(summary.duration_secs, summary.steps, context)
    }

    /// Rewards for raw totals
    #[must_use]
    pub fn from_totals(duration_secs: u64, steps: u64, context: &RewardContext) -> Self {
        let multiplier = context.multiplier();
        let scaled = |amount: u64, per_point: f64| (amount as f64 * multiplier / per_point).floor() as u64;
        Self {
            stamina: scaled(duration_secs, SECONDS_PER_STAMINA),
            satiety: scaled(steps, STEPS_PER_SATIETY),
            mood: scaled(duration_secs, SECONDS_PER_MOOD),
        }
    }
}

/// What a daily quest asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DailyQuestGoal {
    /// Open the app
    Login,
    /// Accumulate exercise time
    ExerciseSeconds(u64),
    /// Accumulate steps
    Steps(u64),
}

/// Static daily quest definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyQuest {
    /// Backend quest identifier
    pub id: u32,
    /// Completion condition
    pub goal: DailyQuestGoal,
    /// Strength granted on claim
    pub reward_strength: u32,
    /// Stamina granted on claim
    pub reward_stamina: u32,
    /// Mood granted on claim
    pub reward_mood: u32,
}

/// The three quests offered every day
pub const DAILY_QUESTS: [DailyQuest; 3] = [
    DailyQuest {
        id: 1,
        goal: DailyQuestGoal::Login,
        reward_strength: 5,
        reward_stamina: 5,
        reward_mood: 5,
    },
    DailyQuest {
        id: 2,
        goal: DailyQuestGoal::ExerciseSeconds(DAILY_EXERCISE_SECONDS_GOAL),
        reward_strength: 10,
        reward_stamina: 0,
        reward_mood: 5,
    },
    DailyQuest {
        id: 3,
        goal: DailyQuestGoal::Steps(DAILY_STEPS_GOAL),
        reward_strength: 10,
        reward_stamina: 0,
        reward_mood: 5,
    },
];

/// Claim state of one daily quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyQuestProgress {
    /// Quest definition
    pub quest: DailyQuest,
    /// Already claimed today
    pub claimed: bool,
    /// Reward can be claimed now
    pub claimable: bool,
}

impl DailyQuestProgress {
    /// Interpret the backend's daily quest document.
    ///
    /// Explicit `quest_N_claimed` wins over the older `quest_N_completed`.
    /// Explicit `quest_N_claimable` wins over a value derived from
    /// `daily_exercise_seconds` and `daily_steps`.
    #[must_use]
    pub fn from_backend(data: &Value) -> Vec<Self> {
        DAILY_QUESTS
            .iter()
            .map(|quest| {
                let id = quest.id;
                let claimed = data
                    .get(format!("quest_{id}_claimed"))
                    .or_else(|| data.get(format!("quest_{id}_completed")))
                    .is_some_and(truthy);
                let claimable = data.get(format!("quest_{id}_claimable")).map_or_else(
                    || !claimed && goal_met(quest.goal, data),
                    truthy,
                );
                Self {
                    quest: *quest,
                    claimed,
                    claimable,
                }
            })
            .collect()
    }
}

fn goal_met(goal: DailyQuestGoal, data: &Value) -> bool {
    let counter = |key: &str| data.get(key).and_then(Value::as_f64).unwrap_or(0.0);
    match goal {
        DailyQuestGoal::Login => true,
        DailyQuestGoal::ExerciseSeconds(target) => counter("daily_exercise_seconds") >= target as f64,
        DailyQuestGoal::Steps(target) => counter("daily_steps") >= target as f64,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
