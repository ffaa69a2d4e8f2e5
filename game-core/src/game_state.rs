use game_types::{
    Difficulty, GameDifficulty, GameError, GameMode, GameStateResponse, PlayerId, Word, WordId,
};
use std::time::Instant;

use crate::{GameRules, ScoringEngine, UNLIMITED_TIME_SECONDS, WordScrambler};

/// The word in play. Built in one piece from a drawn word so the answer,
/// its scramble and its id can never drift apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Round {
    pub word_id: WordId,
    pub original_word: String,
    pub scrambled_word: String,
    pub category: String,
    pub image_url: Option<String>,
    pub difficulty: Difficulty, // Actual difficulty of the drawn word
}

impl Round {
    pub fn from_word(word: Word) -> Self {
        let scrambled_word = WordScrambler::scramble(&word.text);
        Self {
            word_id: word.id,
            original_word: word.text,
            scrambled_word,
            category: word.category,
            image_url: word.image_url,
            difficulty: word.difficulty,
        }
    }
}

/// Mode-specific budget. Chosen once at session start and never switched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Deadline(Instant),
    Lives(u32),
}

/// Case-insensitive comparison after trimming both sides.
pub fn answers_match(submitted: &str, expected: &str) -> bool {
    submitted.trim().to_lowercase() == expected.trim().to_lowercase()
}

#[derive(Debug, Clone)]
pub struct GameSessionState {
    pub player_id: PlayerId,
    pub difficulty: GameDifficulty,
    pub score: u32,
    pub streak_count: u32,
    budget: Budget,
    round: Round,
}

impl GameSessionState {
    pub fn new(
        player_id: PlayerId,
        difficulty: GameDifficulty,
        game_mode: GameMode,
        rules: &GameRules,
        first_word: Word,
        now: Instant,
    ) -> Self {
        let budget = match game_mode {
            GameMode::TimeAttack => Budget::Deadline(now + rules.time_attack_duration),
            GameMode::Survival => Budget::Lives(rules.survival_lives),
        };

        Self {
            player_id,
            difficulty,
            score: 0,
            streak_count: 0,
            budget,
            round: Round::from_word(first_word),
        }
    }

    pub fn game_mode(&self) -> GameMode {
        match self.budget {
            Budget::Deadline(_) => GameMode::TimeAttack,
            Budget::Lives(_) => GameMode::Survival,
        }
    }

    pub fn budget(&self) -> Budget {
        self.budget
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn begin_round(&mut self, word: Word) {
        self.round = Round::from_word(word);
    }

    /// Lives left in SURVIVAL; always 0 in TIME_ATTACK.
    pub fn lives(&self) -> u32 {
        match self.budget {
            Budget::Lives(lives) => lives,
            Budget::Deadline(_) => 0,
        }
    }

    /// SURVIVAL never runs out of time.
    pub fn is_time_up(&self, now: Instant) -> bool {
        match self.budget {
            Budget::Deadline(deadline) => now >= deadline,
            Budget::Lives(_) => false,
        }
    }

    pub fn time_left_seconds(&self, now: Instant) -> u64 {
        match self.budget {
            Budget::Deadline(deadline) => deadline.saturating_duration_since(now).as_secs(),
            Budget::Lives(_) => UNLIMITED_TIME_SECONDS,
        }
    }

    pub fn is_out_of_lives(&self) -> bool {
        matches!(self.budget, Budget::Lives(0))
    }

    /// Returns the lives remaining; a no-op outside SURVIVAL.
    pub fn lose_life(&mut self) -> u32 {
        if let Budget::Lives(lives) = &mut self.budget {
            *lives = lives.saturating_sub(1);
        }
        self.lives()
    }

    pub fn is_correct_answer(&self, answer: &str) -> bool {
        answers_match(answer, &self.round.original_word)
    }

    /// Base points for the current round. RANDOM sessions score by the
    /// drawn word's own difficulty.
    pub fn round_base_points(&self) -> u32 {
        match self.difficulty {
            GameDifficulty::Random => ScoringEngine::base_points_for_word(self.round.difficulty),
            nominal => ScoringEngine::base_points(nominal),
        }
    }

    /// Bump the streak and add the round's points. Returns the points awarded.
    pub fn record_correct_answer(&mut self, now: Instant) -> u32 {
        self.streak_count += 1;
        let points = ScoringEngine::correct_answer_points(
            self.round_base_points(),
            self.streak_count,
            self.time_left_seconds(now),
        );
        self.score += points;
        points
    }

    pub fn record_wrong_answer(&mut self) {
        self.streak_count = 0;
    }

    /// Charge for a hint: a life in SURVIVAL (refused at one life or fewer),
    /// points floored at zero in TIME_ATTACK. Leaves the state untouched on error.
    pub fn charge_hint(&mut self, rules: &GameRules) -> Result<(), GameError> {
        match &mut self.budget {
            Budget::Lives(lives) => {
                if *lives <= 1 {
                    return Err(GameError::InsufficientLives { lives: *lives });
                }
                *lives -= 1;
            }
            Budget::Deadline(_) => {
                self.score = self.score.saturating_sub(rules.hint_point_penalty);
            }
        }
        Ok(())
    }

    pub fn to_response(
        &self,
        now: Instant,
        is_correct: bool,
        correct_answer: Option<String>,
    ) -> GameStateResponse {
        GameStateResponse {
            scrambled_word: Some(self.round.scrambled_word.clone()),
            score: self.score,
            streak_count: self.streak_count,
            time_left_seconds: self.time_left_seconds(now),
            is_correct,
            correct_answer,
            is_game_over: false,
            current_word_id: Some(self.round.word_id),
            category: Some(self.round.category.clone()),
            image_url: self.round.image_url.clone(),
            game_mode: self.game_mode(),
            lives: self.lives(),
        }
    }

    pub fn to_game_over_response(&self) -> GameStateResponse {
        GameStateResponse::game_over(self.score, self.game_mode(), self.lives())
    }
}
