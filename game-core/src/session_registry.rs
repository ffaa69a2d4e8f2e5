use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use crate::GameSessionState;

/// Opaque handle the request layer uses to address a session.
pub type SessionId = String;

type SessionSlot = Arc<Mutex<Option<GameSessionState>>>;

/// Exclusive access to one session slot. Held for an engine operation's full
/// duration and released on drop, whichever way the operation exits.
pub type SessionGuard = OwnedMutexGuard<Option<GameSessionState>>;

/// Session storage with one lock per handle. Different handles never contend;
/// the map itself is only touched long enough to clone a slot.
#[derive(Default)]
pub struct SessionRegistry {
    slots: DashMap<SessionId, SessionSlot>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the slot for `session_id`, creating an empty one if needed.
    pub async fn lock(&self, session_id: &str) -> SessionGuard {
        let slot = self
            .slots
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(None)))
            .clone();
        // The map shard lock is released before waiting on the slot
        slot.lock_owned().await
    }

    /// Lock an existing slot without creating one.
    pub async fn lock_existing(&self, session_id: &str) -> Option<SessionGuard> {
        let slot = self.slots.get(session_id).map(|entry| entry.value().clone())?;
        Some(slot.lock_owned().await)
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Count slots currently holding a session. Slots that are busy are
    /// counted as active.
    pub fn active_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|entry| match entry.value().try_lock() {
                Ok(slot) => slot.is_some(),
                Err(_) => true,
            })
            .count()
    }

    /// Drop empty slots nobody is using. Never ends a live session.
    pub fn prune_idle(&self) -> usize {
        let before = self.slots.len();
        self.slots.retain(|_, slot| {
            // A guard or a waiter elsewhere holds another reference
            if Arc::strong_count(slot) > 1 {
                return true;
            }
            match slot.try_lock() {
                Ok(state) => state.is_some(),
                Err(_) => true,
            }
        });
        let removed = before.saturating_sub(self.slots.len());
        if removed > 0 {
            debug!("Pruned {} idle session slots", removed);
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameRules;
    use game_types::{Difficulty, GameDifficulty, GameMode, Word};
    use std::time::{Duration, Instant};
    use uuid::Uuid;

    fn test_state() -> GameSessionState {
        let word = Word {
            id: Uuid::new_v4(),
            text: "APEL".to_string(),
            category: "BUAH".to_string(),
            difficulty: Difficulty::Easy,
            image_url: None,
        };
        GameSessionState::new(
            Uuid::new_v4(),
            GameDifficulty::Easy,
            GameMode::Survival,
            &GameRules::default(),
            word,
            Instant::now(),
        )
    }

    #[tokio::test]
    async fn test_lock_creates_empty_slot() {
        let registry = SessionRegistry::new();
        assert!(registry.lock_existing("alice").await.is_none());

        let guard = registry.lock("alice").await;
        assert!(guard.is_none());
        drop(guard);

        assert_eq!(registry.slot_count(), 1);
        assert!(registry.lock_existing("alice").await.is_some());
    }

    #[tokio::test]
    async fn test_state_persists_between_locks() {
        let registry = SessionRegistry::new();
        {
            let mut guard = registry.lock("alice").await;
            *guard = Some(test_state());
        }

        let guard = registry.lock("alice").await;
        assert!(guard.is_some());
        assert_eq!(registry.active_count(), 1);
    }

    #[tokio::test]
    async fn test_same_session_is_exclusive() {
        let registry = Arc::new(SessionRegistry::new());
        let guard = registry.lock("alice").await;

        let contender = {
            let registry = registry.clone();
            tokio::spawn(async move {
                let _guard = registry.lock("alice").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should acquire the lock once released")
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_sessions_do_not_contend() {
        let registry = SessionRegistry::new();
        let _alice = registry.lock("alice").await;

        let bob = tokio::time::timeout(Duration::from_millis(100), registry.lock("bob")).await;
        assert!(bob.is_ok());
    }

    #[tokio::test]
    async fn test_prune_keeps_live_and_locked_slots() {
        let registry = SessionRegistry::new();
        {
            let mut guard = registry.lock("live").await;
            *guard = Some(test_state());
        }
        drop(registry.lock("finished").await);
        let held = registry.lock("busy").await;

        assert_eq!(registry.prune_idle(), 1);
        assert_eq!(registry.slot_count(), 2);
        assert!(registry.lock_existing("finished").await.is_none());

        drop(held);
        assert_eq!(registry.prune_idle(), 1);
        assert_eq!(registry.slot_count(), 1);
    }
}
