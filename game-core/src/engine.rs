use chrono::Utc;
use game_types::{GameDifficulty, GameError, GameMode, GameStateResponse, PlayerId};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::{
    GameRules, GameSessionState, ScoreRecord, ScoreSink, ScoringEngine, SessionGuard,
    SessionRegistry, WordSelector, WordStore,
};

/// Drives single-player sessions: start, answer, hint, state and end.
///
/// Every operation holds its session's lock for its whole duration, so two
/// requests against one session never interleave. Mutations are made on a
/// copy and written back only once the operation can no longer fail.
/// Expiry is evaluated lazily: a session only ends when a call observes its
/// deadline passed or its lives exhausted.
pub struct GameEngine {
    sessions: SessionRegistry,
    words: WordSelector,
    scores: Arc<dyn ScoreSink>,
    rules: GameRules,
}

impl GameEngine {
    pub fn new(words: Arc<dyn WordStore>, scores: Arc<dyn ScoreSink>, rules: GameRules) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            words: WordSelector::new(words),
            scores,
            rules,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Start a fresh session, replacing the caller's own session under this
    /// handle. A handle held by another player is left untouched.
    pub async fn start(
        &self,
        session_id: &str,
        player_id: PlayerId,
        difficulty: GameDifficulty,
        game_mode: GameMode,
    ) -> Result<GameStateResponse, GameError> {
        let mut slot = self.sessions.lock(session_id).await;
        if slot.is_some() {
            Self::active_session(&slot, player_id)?;
        }

        let word = self.words.draw(difficulty).await?;
        let now = Instant::now();
        let state = GameSessionState::new(player_id, difficulty, game_mode, &self.rules, word, now);

        if slot.is_some() {
            warn!(
                "Player {} restarted session {}; previous game discarded",
                player_id, session_id
            );
        }
        info!(
            "Player {} started {} game on {} difficulty",
            player_id, game_mode, difficulty
        );

        let response = state.to_response(now, false, None);
        *slot = Some(state);
        Ok(response)
    }

    pub async fn submit_answer(
        &self,
        session_id: &str,
        player_id: PlayerId,
        answer: &str,
    ) -> Result<GameStateResponse, GameError> {
        let mut slot = self.sessions.lock(session_id).await;
        let now = Instant::now();

        let mut state = Self::active_session(&slot, player_id)?.clone();

        if state.is_time_up(now) {
            info!("Player {} answered after the deadline", player_id);
            return Ok(self.finish(slot, player_id, state).await);
        }

        let is_correct = state.is_correct_answer(answer);
        let mut correct_answer = None;

        if is_correct {
            let points = state.record_correct_answer(now);
            info!(
                "Player {} answered correctly: +{} (base={}, streak={}), score {}",
                player_id,
                points,
                state.round_base_points(),
                state.streak_count,
                state.score
            );
        } else {
            correct_answer = Some(state.round().original_word.clone());
            state.record_wrong_answer();

            if state.game_mode() == GameMode::Survival {
                let remaining = state.lose_life();
                info!(
                    "Player {} lost a life in SURVIVAL mode. Remaining lives: {}",
                    player_id, remaining
                );
                if state.is_out_of_lives() {
                    return Ok(self.finish(slot, player_id, state).await);
                }
            }
        }

        let next_word = self.words.draw(state.difficulty).await?;
        state.begin_round(next_word);

        let response = state.to_response(now, is_correct, correct_answer);
        *slot = Some(state);
        Ok(response)
    }

    /// Charge the hint penalty and return the masked answer. The round and its
    /// correctness bookkeeping are left alone.
    pub async fn get_hint(&self, session_id: &str, player_id: PlayerId) -> Result<String, GameError> {
        let mut slot = self.sessions.lock(session_id).await;
        let now = Instant::now();

        let mut state = Self::active_session(&slot, player_id)?.clone();
        if state.is_time_up(now) {
            return Err(GameError::TimeExpired);
        }

        state.charge_hint(&self.rules)?;
        match state.game_mode() {
            GameMode::Survival => info!(
                "Player {} used a hint in SURVIVAL mode. Remaining lives: {}",
                player_id,
                state.lives()
            ),
            GameMode::TimeAttack => info!(
                "Player {} used a hint in TIME_ATTACK mode. Score now {}",
                player_id, state.score
            ),
        }

        let hint = ScoringEngine::hint(&state.round().original_word);
        *slot = Some(state);
        Ok(hint)
    }

    /// Current snapshot, or the game-over result if the clock has run out.
    pub async fn get_state(
        &self,
        session_id: &str,
        player_id: PlayerId,
    ) -> Result<GameStateResponse, GameError> {
        let slot = self.sessions.lock(session_id).await;
        let now = Instant::now();

        let state = Self::active_session(&slot, player_id)?;
        if state.is_time_up(now) {
            let state = state.clone();
            return Ok(self.finish(slot, player_id, state).await);
        }

        Ok(state.to_response(now, false, None))
    }

    pub async fn end(
        &self,
        session_id: &str,
        player_id: PlayerId,
    ) -> Result<GameStateResponse, GameError> {
        let slot = self.sessions.lock(session_id).await;
        let state = Self::active_session(&slot, player_id)?.clone();
        Ok(self.finish(slot, player_id, state).await)
    }

    /// A session under this handle that belongs to `player_id`.
    fn active_session(
        slot: &SessionGuard,
        player_id: PlayerId,
    ) -> Result<&GameSessionState, GameError> {
        match &**slot {
            Some(state) if state.player_id == player_id => Ok(state),
            Some(state) => {
                warn!(
                    "Player {} addressed a session owned by {}",
                    player_id, state.player_id
                );
                Err(GameError::NoActiveSession)
            }
            None => Err(GameError::NoActiveSession),
        }
    }

    /// Tear the session down, then record its score with the lock released.
    async fn finish(
        &self,
        mut slot: SessionGuard,
        player_id: PlayerId,
        state: GameSessionState,
    ) -> GameStateResponse {
        *slot = None;
        drop(slot);

        info!(
            "Game over for player {}: {} points in {} mode",
            player_id,
            state.score,
            state.game_mode()
        );

        let record = ScoreRecord {
            player_id,
            score: state.score,
            difficulty: state.difficulty,
            game_mode: state.game_mode(),
            played_at: Utc::now(),
        };
        // A lost score record must not change what the player sees
        if let Err(e) = self.scores.record(record).await {
            error!("Failed to save game score for player {}: {:#}", player_id, e);
        }

        state.to_game_over_response()
    }
}
