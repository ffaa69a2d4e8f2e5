use std::time::Duration;

/// Reported as `time_left_seconds` for modes without a clock.
pub const UNLIMITED_TIME_SECONDS: u64 = 999_999;

#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    pub time_attack_duration: Duration, // Clock for TIME_ATTACK sessions
    pub survival_lives: u32,            // Starting lives for SURVIVAL sessions
    pub hint_point_penalty: u32,        // Points a TIME_ATTACK hint costs
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            time_attack_duration: Duration::from_secs(120), // 2 minutes
            survival_lives: 3,
            hint_point_penalty: 5,
        }
    }
}

impl GameRules {
    pub fn new(time_attack_duration: Duration, survival_lives: u32, hint_point_penalty: u32) -> Self {
        Self {
            time_attack_duration,
            survival_lives,
            hint_point_penalty,
        }
    }
}
