use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

use game_core::{is_kids_friendly, WordStore};
use game_types::{Difficulty, Word, WordId};

/// Word pool held in memory, loaded once from a word list.
///
/// Format, one word per line: `word,category,difficulty[,image_url]`.
/// Blank lines and `#` comments are skipped.
pub struct WordRepository {
    words: Vec<Word>,
}

impl WordRepository {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    pub fn from_word_list(contents: &str) -> Result<Self> {
        let mut words = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if let Some(word) = parse_line(line).with_context(|| format!("line {}", index + 1))? {
                words.push(word);
            }
        }
        Ok(Self::new(words))
    }

    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading word list {}", path.display()))?;
        let repository = Self::from_word_list(&contents)
            .with_context(|| format!("parsing word list {}", path.display()))?;

        info!("Loaded {} words from {}", repository.len(), path.display());
        Ok(repository)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn count_by_difficulty(&self, difficulty: Difficulty) -> usize {
        self.words
            .iter()
            .filter(|word| word.difficulty == difficulty)
            .count()
    }

    fn pick(&self, filter: impl Fn(&Word) -> bool) -> Option<Word> {
        let matching: Vec<&Word> = self.words.iter().filter(|word| filter(word)).collect();
        matching.choose(&mut rand::thread_rng()).map(|word| (*word).clone())
    }
}

fn parse_line(line: &str) -> Result<Option<Word>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let (text, category, difficulty, image_url) = match fields.as_slice() {
        [text, category, difficulty] => (*text, *category, *difficulty, None),
        [text, category, difficulty, image] => (*text, *category, *difficulty, Some(*image)),
        _ => {
            return Err(anyhow!(
                "expected word,category,difficulty[,image_url], got '{}'",
                line
            ))
        }
    };

    if text.is_empty() {
        return Err(anyhow!("empty word"));
    }

    Ok(Some(Word {
        id: Uuid::new_v4(),
        text: text.to_string(),
        category: category.to_uppercase(),
        difficulty: difficulty.parse()?,
        image_url: image_url.filter(|url| !url.is_empty()).map(str::to_string),
    }))
}

#[async_trait]
impl WordStore for WordRepository {
    async fn random_word(&self, difficulty: Difficulty) -> Result<Option<Word>> {
        Ok(self.pick(|word| word.difficulty == difficulty))
    }

    async fn random_word_any(&self) -> Result<Option<Word>> {
        Ok(self.pick(|_| true))
    }

    async fn words_by_difficulty(&self, difficulty: Difficulty) -> Result<Vec<Word>> {
        Ok(self
            .words
            .iter()
            .filter(|word| word.difficulty == difficulty)
            .cloned()
            .collect())
    }

    async fn all_words(&self) -> Result<Vec<Word>> {
        Ok(self.words.clone())
    }

    async fn word_by_id(&self, id: WordId) -> Result<Option<Word>> {
        Ok(self.words.iter().find(|word| word.id == id).cloned())
    }

    async fn random_kids_word(&self) -> Result<Option<Word>> {
        Ok(self.pick(is_kids_friendly))
    }
}
