#![allow(dead_code)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use game_core::{GameEngine, GameRules, ScoreRecord, ScoreSink, WordStore, is_kids_friendly};
use game_types::{Difficulty, PlayerId, Word, WordId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

/// Creates a word with a fresh id
pub fn create_word(text: &str, category: &str, difficulty: Difficulty) -> Word {
    Word {
        id: Uuid::new_v4(),
        text: text.to_string(),
        category: category.to_string(),
        difficulty,
        image_url: None,
    }
}

pub fn create_picture_word(text: &str, category: &str, image: &str) -> Word {
    Word {
        image_url: Some(image.to_string()),
        ..create_word(text, category, Difficulty::Easy)
    }
}

/// A small mixed-difficulty word pool
pub fn standard_words() -> Vec<Word> {
    vec![
        create_word("KUCING", "HEWAN", Difficulty::Easy),
        create_word("PISANG", "BUAH", Difficulty::Easy),
        create_word("MEJA", "BENDA", Difficulty::Easy),
        create_word("JERAPAH", "HEWAN", Difficulty::Medium),
        create_word("SEMANGKA", "BUAH", Difficulty::Medium),
        create_word("ENSIKLOPEDIA", "BENDA", Difficulty::Hard),
    ]
}

/// Word store that hands out matching words in rotation, so consecutive
/// draws never repeat while more than one word matches.
pub struct ScriptedWordStore {
    words: Vec<Word>,
    supports_random: bool,
    fail_after: Option<usize>,
    cursor: AtomicUsize,
    draws: AtomicUsize,
}

impl ScriptedWordStore {
    pub fn new(words: Vec<Word>) -> Self {
        Self {
            words,
            supports_random: true,
            fail_after: None,
            cursor: AtomicUsize::new(0),
            draws: AtomicUsize::new(0),
        }
    }

    /// Store whose random queries always come back empty
    pub fn without_random(words: Vec<Word>) -> Self {
        Self {
            supports_random: false,
            ..Self::new(words)
        }
    }

    /// Store that errors on every draw after the first `draws`
    pub fn failing_after(words: Vec<Word>, draws: usize) -> Self {
        Self {
            fail_after: Some(draws),
            ..Self::new(words)
        }
    }

    pub fn draw_count(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }

    fn next_matching(&self, filter: impl Fn(&Word) -> bool) -> Result<Option<Word>> {
        let draw = self.draws.fetch_add(1, Ordering::SeqCst);
        if self.fail_after.is_some_and(|limit| draw >= limit) {
            return Err(anyhow!("word store offline"));
        }
        if !self.supports_random {
            return Ok(None);
        }

        let matching: Vec<&Word> = self.words.iter().filter(|w| filter(w)).collect();
        if matching.is_empty() {
            return Ok(None);
        }
        let index = self.cursor.fetch_add(1, Ordering::SeqCst) % matching.len();
        Ok(Some(matching[index].clone()))
    }
}

#[async_trait]
impl WordStore for ScriptedWordStore {
    async fn random_word(&self, difficulty: Difficulty) -> Result<Option<Word>> {
        self.next_matching(|w| w.difficulty == difficulty)
    }

    async fn random_word_any(&self) -> Result<Option<Word>> {
        self.next_matching(|_| true)
    }

    async fn words_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Word>> {
        Ok(self
            .words
            .iter()
            .filter(|w| w.difficulty == difficulty)
            .cloned()
            .collect())
    }

    async fn all_words(&self) -> Result<Vec<Word>> {
        Ok(self.words.clone())
    }

    async fn word_by_id(&self, id: WordId) -> Result<Option<Word>> {
        Ok(self.words.iter().find(|w| w.id == id).cloned())
    }

    async fn random_kids_word(&self) -> Result<Option<Word>> {
        self.next_matching(is_kids_friendly)
    }
}

/// Score sink collecting everything it is asked to record
#[derive(Clone, Default)]
pub struct RecordingScoreSink {
    records: Arc<Mutex<Vec<ScoreRecord>>>,
}

impl RecordingScoreSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ScoreRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl ScoreSink for RecordingScoreSink {
    async fn record(&self, record: ScoreRecord) -> Result<()> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }
}

/// Score sink that always fails
pub struct FailingScoreSink;

#[async_trait]
impl ScoreSink for FailingScoreSink {
    async fn record(&self, _record: ScoreRecord) -> Result<()> {
        Err(anyhow!("database unavailable"))
    }
}

/// Test setup wiring an engine to in-memory collaborators
pub struct TestEngineSetup {
    pub engine: Arc<GameEngine>,
    pub store: Arc<ScriptedWordStore>,
    pub scores: RecordingScoreSink,
}

impl TestEngineSetup {
    pub fn new() -> Self {
        Self::with_store(ScriptedWordStore::new(standard_words()))
    }

    pub fn with_store(store: ScriptedWordStore) -> Self {
        Self::with_store_and_rules(store, GameRules::default())
    }

    pub fn with_rules(rules: GameRules) -> Self {
        Self::with_store_and_rules(ScriptedWordStore::new(standard_words()), rules)
    }

    pub fn with_store_and_rules(store: ScriptedWordStore, rules: GameRules) -> Self {
        let store = Arc::new(store);
        let scores = RecordingScoreSink::new();
        let engine = Arc::new(GameEngine::new(
            store.clone(),
            Arc::new(scores.clone()),
            rules,
        ));
        Self {
            engine,
            store,
            scores,
        }
    }

    /// The unscrambled answer of the round currently in play
    pub async fn current_answer(&self, session_id: &str) -> String {
        let guard = self.engine.sessions().lock(session_id).await;
        (*guard)
            .as_ref()
            .map(|state| state.round().original_word.clone())
            .expect("session should be active")
    }
}

/// Rules with a TIME_ATTACK clock that has already run out
pub fn expired_clock_rules() -> GameRules {
    GameRules {
        time_attack_duration: Duration::ZERO,
        ..GameRules::default()
    }
}

pub fn new_player() -> PlayerId {
    Uuid::new_v4()
}
