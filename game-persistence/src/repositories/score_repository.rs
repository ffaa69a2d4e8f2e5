use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use game_core::{ScoreRecord, ScoreSink};
use game_types::PlayerId;

/// Finished-session scores kept in memory.
#[derive(Default)]
pub struct ScoreRepository {
    records: RwLock<Vec<ScoreRecord>>,
}

impl ScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A player's scores, highest first.
    pub async fn scores_for_player(&self, player_id: PlayerId) -> Vec<ScoreRecord> {
        let mut scores: Vec<ScoreRecord> = self
            .records
            .read()
            .await
            .iter()
            .filter(|record| record.player_id == player_id)
            .cloned()
            .collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores
    }

    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl ScoreSink for ScoreRepository {
    async fn record(&self, record: ScoreRecord) -> Result<()> {
        info!(
            "Game score saved: {} points for player {}",
            record.score, record.player_id
        );
        self.records.write().await.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use game_types::{GameDifficulty, GameMode};
    use uuid::Uuid;

    fn record(player_id: PlayerId, score: u32) -> ScoreRecord {
        ScoreRecord {
            player_id,
            score,
            difficulty: GameDifficulty::Easy,
            game_mode: GameMode::TimeAttack,
            played_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_scores_for_player_sorted() {
        let repository = ScoreRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repository.record(record(alice, 30)).await.unwrap();
        repository.record(record(bob, 100)).await.unwrap();
        repository.record(record(alice, 75)).await.unwrap();

        assert_eq!(repository.count().await, 3);

        let scores = repository.scores_for_player(alice).await;
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].score, 75);
        assert_eq!(scores[1].score, 30);

        assert!(repository.scores_for_player(Uuid::new_v4()).await.is_empty());
    }
}
