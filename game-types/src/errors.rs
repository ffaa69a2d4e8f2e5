use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{GameDifficulty, WordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
pub enum GameError {
    #[error("no game is in progress")]
    NoActiveSession,
    #[error("game time has run out")]
    TimeExpired,
    #[error("not enough lives left to use a hint ({lives} remaining)")]
    InsufficientLives { lives: u32 },
    #[error("no word available for difficulty {difficulty}")]
    NoWordAvailable { difficulty: GameDifficulty },
    #[error("word {word_id} not found")]
    WordNotFound { word_id: WordId },
    #[error("word store unavailable: {message}")]
    WordStoreUnavailable { message: String },
}
