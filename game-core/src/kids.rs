use game_types::{Difficulty, GameDifficulty, GameError, KidsWordResponse, Word, WordId};
use std::sync::Arc;
use tracing::info;

use crate::{WordStore, answers_match, word_selection::store_unavailable};

/// Categories with pictures simple enough for kids mode.
pub const KIDS_CATEGORIES: [&str; 3] = ["HEWAN", "BUAH", "BENDA"];

pub fn is_kids_friendly(word: &Word) -> bool {
    word.difficulty == Difficulty::Easy
        && word.image_url.is_some()
        && KIDS_CATEGORIES
            .iter()
            .any(|category| category.eq_ignore_ascii_case(word.category.trim()))
}

/// Picture-word side mode. Stateless: no session, no score.
#[derive(Clone)]
pub struct KidsMode {
    words: Arc<dyn WordStore>,
}

impl KidsMode {
    pub fn new(words: Arc<dyn WordStore>) -> Self {
        Self { words }
    }

    pub async fn next_word(&self) -> Result<KidsWordResponse, GameError> {
        let word = self
            .words
            .random_kids_word()
            .await
            .map_err(store_unavailable)?
            .ok_or(GameError::NoWordAvailable {
                difficulty: GameDifficulty::Easy,
            })?;

        info!("Serving kids mode word {}", word.id);

        Ok(KidsWordResponse {
            word_id: word.id,
            image_url: word.image_url,
            letters: word.text.chars().collect(),
        })
    }

    pub async fn check_answer(&self, word_id: WordId, submitted: &str) -> Result<bool, GameError> {
        let word = self
            .words
            .word_by_id(word_id)
            .await
            .map_err(store_unavailable)?
            .ok_or(GameError::WordNotFound { word_id })?;

        let is_correct = answers_match(submitted, &word.text);
        info!(
            "Kids mode answer for word {}: submitted '{}', correct: {}",
            word_id, submitted, is_correct
        );
        Ok(is_correct)
    }
}
