use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use game_types::{Difficulty, GameDifficulty, GameMode, PlayerId, Word, WordId};

/// Source of playable words. `Ok(None)` means nothing matched; `Err` means
/// the backend itself failed.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// Store-level random draw for one difficulty. A store that cannot pick
    /// randomly may return `Ok(None)` and let the caller pick from the full list.
    async fn random_word(&self, difficulty: Difficulty) -> Result<Option<Word>>;

    /// Store-level random draw ignoring difficulty.
    async fn random_word_any(&self) -> Result<Option<Word>>;

    async fn words_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Word>>;

    async fn all_words(&self) -> Result<Vec<Word>>;

    async fn word_by_id(&self, id: WordId) -> Result<Option<Word>>;

    /// An EASY word from a picture-friendly category that has an image.
    async fn random_kids_word(&self) -> Result<Option<Word>>;
}

/// A finished session's result, written once per session.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub player_id: PlayerId,
    pub score: u32,
    pub difficulty: GameDifficulty,
    pub game_mode: GameMode,
    pub played_at: DateTime<Utc>,
}

#[async_trait]
pub trait ScoreSink: Send + Sync {
    async fn record(&self, record: ScoreRecord) -> Result<()>;
}
