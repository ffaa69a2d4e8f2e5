use game_types::{Difficulty, GameDifficulty};
use rand::Rng;
use rand::seq::index;

pub const STREAK_BONUS_STEP: u32 = 5;
pub const MAX_STREAK_STEPS: u32 = 10;
pub const MAX_TIME_BONUS: u32 = 20;
pub const HINT_MASK: char = '_';

pub struct ScoringEngine;

impl ScoringEngine {
    /// Base points for a session's nominal difficulty. `Random` falls back to
    /// the midpoint; prefer `base_points_for_word` when the drawn word is known.
    pub fn base_points(difficulty: GameDifficulty) -> u32 {
        match difficulty.fixed() {
            Some(difficulty) => Self::base_points_for_word(difficulty),
            None => 20,
        }
    }

    pub fn base_points_for_word(difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => 10,
            Difficulty::Medium => 20,
            Difficulty::Hard => 30,
        }
    }

    /// 0 at streak 1, +5 per further consecutive answer, capped at 50.
    pub fn streak_bonus(streak_count: u32) -> u32 {
        streak_count.saturating_sub(1).min(MAX_STREAK_STEPS) * STREAK_BONUS_STEP
    }

    pub fn time_bonus(seconds_left: u64) -> u32 {
        (seconds_left / 3).min(MAX_TIME_BONUS as u64) as u32
    }

    /// Points for a correct answer at the given (already incremented) streak.
    pub fn correct_answer_points(base_points: u32, streak_count: u32, seconds_left: u64) -> u32 {
        base_points + Self::streak_bonus(streak_count) + Self::time_bonus(seconds_left)
    }

    /// Mask a fresh random 40-60% of the word's positions.
    pub fn hint(word: &str) -> String {
        Self::hint_with(word, &mut rand::thread_rng())
    }

    pub fn hint_with<R: Rng>(word: &str, rng: &mut R) -> String {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return String::new();
        }

        let fraction = 0.4 + rng.gen_range(0.0..0.2);
        let mask_count = ((chars.len() as f64 * fraction) as usize).min(chars.len());

        let mut masked = vec![false; chars.len()];
        for position in index::sample(rng, chars.len(), mask_count) {
            masked[position] = true;
        }

        chars
            .iter()
            .zip(masked)
            .map(|(&ch, hide)| if hide { HINT_MASK } else { ch })
            .collect()
    }
}
