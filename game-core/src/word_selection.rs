use game_types::{GameDifficulty, GameError, Word};
use rand::seq::SliceRandom;
use std::sync::Arc;
use tracing::{info, warn};

use crate::WordStore;

/// Draws words for a difficulty policy: store-level random pick first, then a
/// random pick over the full filtered list for stores that cannot do the former.
#[derive(Clone)]
pub struct WordSelector {
    store: Arc<dyn WordStore>,
}

impl WordSelector {
    pub fn new(store: Arc<dyn WordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn WordStore> {
        &self.store
    }

    pub async fn draw(&self, difficulty: GameDifficulty) -> Result<Word, GameError> {
        let drawn = match difficulty.fixed() {
            Some(fixed) => self.store.random_word(fixed).await,
            None => self.store.random_word_any().await,
        }
        .map_err(store_unavailable)?;

        if let Some(word) = drawn {
            log_random_draw(difficulty, &word);
            return Ok(word);
        }

        info!("Falling back to full word list for difficulty {}", difficulty);
        let candidates = match difficulty.fixed() {
            Some(fixed) => self.store.words_by_difficulty(fixed).await,
            None => self.store.all_words().await,
        }
        .map_err(store_unavailable)?;

        let picked = candidates.choose(&mut rand::thread_rng()).cloned();
        match picked {
            Some(word) => {
                log_random_draw(difficulty, &word);
                Ok(word)
            }
            None => {
                warn!("No words found for difficulty {}", difficulty);
                Err(GameError::NoWordAvailable { difficulty })
            }
        }
    }
}

fn log_random_draw(difficulty: GameDifficulty, word: &Word) {
    if difficulty == GameDifficulty::Random {
        info!("Random word drawn with actual difficulty {}", word.difficulty);
    }
}

pub(crate) fn store_unavailable(err: anyhow::Error) -> GameError {
    warn!("Word store failure: {:#}", err);
    GameError::WordStoreUnavailable {
        message: err.to_string(),
    }
}
