use crate::WordId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

/// Difficulty carried by a stored word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}'")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EASY" => Ok(Difficulty::Easy),
            "MEDIUM" => Ok(Difficulty::Medium),
            "HARD" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Word selection policy requested when a game starts.
/// `Random` draws from every difficulty and scores by the drawn word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum GameDifficulty {
    Easy,
    Medium,
    Hard,
    Random,
}

impl GameDifficulty {
    /// The word-level difficulty this policy filters on, `None` for `Random`.
    pub fn fixed(self) -> Option<Difficulty> {
        match self {
            GameDifficulty::Easy => Some(Difficulty::Easy),
            GameDifficulty::Medium => Some(Difficulty::Medium),
            GameDifficulty::Hard => Some(Difficulty::Hard),
            GameDifficulty::Random => None,
        }
    }
}

impl From<Difficulty> for GameDifficulty {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => GameDifficulty::Easy,
            Difficulty::Medium => GameDifficulty::Medium,
            Difficulty::Hard => GameDifficulty::Hard,
        }
    }
}

impl fmt::Display for GameDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fixed() {
            Some(difficulty) => difficulty.fmt(f),
            None => f.write_str("RANDOM"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum GameMode {
    #[default]
    TimeAttack, // Bounded by a wall-clock deadline
    Survival,   // Bounded by a life count
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::TimeAttack => f.write_str("TIME_ATTACK"),
            GameMode::Survival => f.write_str("SURVIVAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Word {
    pub id: WordId,
    pub text: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub image_url: Option<String>,
}

/// Snapshot of a session handed back after every engine call.
/// Round fields are `None` once the game is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GameStateResponse {
    pub scrambled_word: Option<String>,
    pub score: u32,
    pub streak_count: u32,
    pub time_left_seconds: u64,
    pub is_correct: bool,
    pub correct_answer: Option<String>,
    pub is_game_over: bool,
    pub current_word_id: Option<WordId>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub game_mode: GameMode,
    pub lives: u32,
}

impl GameStateResponse {
    pub fn game_over(final_score: u32, game_mode: GameMode, lives: u32) -> Self {
        Self {
            scrambled_word: None,
            score: final_score,
            streak_count: 0,
            time_left_seconds: 0,
            is_correct: false,
            correct_answer: None,
            is_game_over: true,
            current_word_id: None,
            category: None,
            image_url: None,
            game_mode,
            lives,
        }
    }
}

/// Kids mode reveals the letters in order for letter-tile UIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct KidsWordResponse {
    pub word_id: WordId,
    pub image_url: Option<String>,
    pub letters: Vec<char>,
}
