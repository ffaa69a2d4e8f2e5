use game_core::SessionId;
use game_types::PlayerId;
use uuid::Uuid;
use warp::Filter;

/// Player id as resolved by the upstream identity provider. Trusted as-is.
pub const PLAYER_HEADER: &str = "x-player-id";
/// Optional session handle; defaults to the player id.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub player_id: PlayerId,
    pub session_id: SessionId,
}

impl Caller {
    pub fn resolve(player: Option<String>, session: Option<String>) -> Result<Self, String> {
        let player = player.ok_or_else(|| format!("Missing {} header", PLAYER_HEADER))?;
        let player_id = Uuid::parse_str(player.trim())
            .map_err(|_| format!("Invalid {} header", PLAYER_HEADER))?;

        let session_id = session
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| player_id.to_string());

        Ok(Self {
            player_id,
            session_id,
        })
    }
}

pub fn with_caller()
-> impl Filter<Extract = (Result<Caller, String>,), Error = warp::Rejection> + Clone {
    warp::header::optional::<String>(PLAYER_HEADER)
        .and(warp::header::optional::<String>(SESSION_HEADER))
        .map(Caller::resolve)
}
