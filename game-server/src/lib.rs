use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::warn;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

use crate::identity::{Caller, with_caller};
use game_core::{GameEngine, KidsMode};
use game_types::{
    CheckAnswerRequest, CheckAnswerResponse, ErrorResponse, GameError, HintResponse,
    StartGameRequest, SubmitAnswerRequest,
};

pub mod config;
pub mod identity;

type JsonReply = WithStatus<Json>;

pub fn create_routes(
    engine: Arc<GameEngine>,
    kids: Arc<KidsMode>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let engine_filter = warp::any().map({
        let engine = engine.clone();
        move || engine.clone()
    });

    let kids_filter = warp::any().map({
        let kids = kids.clone();
        move || kids.clone()
    });

    let start = warp::path!("api" / "game" / "start")
        .and(warp::post())
        .and(with_caller())
        .and(warp::body::json())
        .and(engine_filter.clone())
        .and_then(handle_start);

    let submit = warp::path!("api" / "game" / "submit")
        .and(warp::post())
        .and(with_caller())
        .and(warp::body::json())
        .and(engine_filter.clone())
        .and_then(handle_submit);

    let state = warp::path!("api" / "game" / "state")
        .and(warp::get())
        .and(with_caller())
        .and(engine_filter.clone())
        .and_then(handle_state);

    let hint = warp::path!("api" / "game" / "hint")
        .and(warp::get())
        .and(with_caller())
        .and(engine_filter.clone())
        .and_then(handle_hint);

    let end = warp::path!("api" / "game" / "end")
        .and(warp::post())
        .and(with_caller())
        .and(engine_filter.clone())
        .and_then(handle_end);

    let kids_new = warp::path!("api" / "game" / "kids" / "new")
        .and(warp::get())
        .and(kids_filter.clone())
        .and_then(handle_kids_new);

    let kids_check = warp::path!("api" / "game" / "kids" / "check")
        .and(warp::post())
        .and(warp::body::json())
        .and(kids_filter.clone())
        .and_then(handle_kids_check);

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec![
            "content-type",
            identity::PLAYER_HEADER,
            identity::SESSION_HEADER,
        ])
        .allow_methods(vec!["GET", "POST"]);

    start
        .or(submit)
        .or(state)
        .or(hint)
        .or(end)
        .or(kids_new)
        .or(kids_check)
        .or(health)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::log("word_scramble"))
}

fn json_reply<T: Serialize>(body: &T, status: StatusCode) -> JsonReply {
    warp::reply::with_status(warp::reply::json(body), status)
}

fn error_reply(message: String, status: StatusCode) -> JsonReply {
    json_reply(&ErrorResponse { error: message }, status)
}

fn status_for(error: &GameError) -> StatusCode {
    match error {
        GameError::NoActiveSession | GameError::WordNotFound { .. } => StatusCode::NOT_FOUND,
        GameError::WordStoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        GameError::TimeExpired
        | GameError::InsufficientLives { .. }
        | GameError::NoWordAvailable { .. } => StatusCode::BAD_REQUEST,
    }
}

fn game_reply<T: Serialize>(result: Result<T, GameError>) -> JsonReply {
    match result {
        Ok(body) => json_reply(&body, StatusCode::OK),
        Err(err) => error_reply(err.to_string(), status_for(&err)),
    }
}

fn unauthorized(message: String) -> JsonReply {
    error_reply(message, StatusCode::UNAUTHORIZED)
}

/// Turns warp's own rejections into the same `{error}` body as game errors.
async fn handle_rejection(err: warp::Rejection) -> Result<JsonReply, Infallible> {
    let reply = if err.is_not_found() {
        error_reply("route not found".to_string(), StatusCode::NOT_FOUND)
    } else if let Some(e) = err.find::<warp::body::BodyDeserializeError>() {
        error_reply(format!("invalid request body: {}", e), StatusCode::BAD_REQUEST)
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        error_reply(
            "request body must be JSON".to_string(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        error_reply(
            "method not allowed".to_string(),
            StatusCode::METHOD_NOT_ALLOWED,
        )
    } else {
        warn!("Unhandled rejection: {:?}", err);
        error_reply(
            "internal server error".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    };
    Ok(reply)
}

async fn handle_start(
    caller: Result<Caller, String>,
    request: StartGameRequest,
    engine: Arc<GameEngine>,
) -> Result<JsonReply, warp::Rejection> {
    let caller = match caller {
        Ok(caller) => caller,
        Err(message) => return Ok(unauthorized(message)),
    };

    let result = engine
        .start(
            &caller.session_id,
            caller.player_id,
            request.difficulty,
            request.game_mode,
        )
        .await;
    Ok(game_reply(result))
}

async fn handle_submit(
    caller: Result<Caller, String>,
    request: SubmitAnswerRequest,
    engine: Arc<GameEngine>,
) -> Result<JsonReply, warp::Rejection> {
    let caller = match caller {
        Ok(caller) => caller,
        Err(message) => return Ok(unauthorized(message)),
    };

    let result = engine
        .submit_answer(&caller.session_id, caller.player_id, &request.answer)
        .await;
    Ok(game_reply(result))
}

async fn handle_state(
    caller: Result<Caller, String>,
    engine: Arc<GameEngine>,
) -> Result<JsonReply, warp::Rejection> {
    let caller = match caller {
        Ok(caller) => caller,
        Err(message) => return Ok(unauthorized(message)),
    };

    Ok(game_reply(
        engine.get_state(&caller.session_id, caller.player_id).await,
    ))
}

async fn handle_hint(
    caller: Result<Caller, String>,
    engine: Arc<GameEngine>,
) -> Result<JsonReply, warp::Rejection> {
    let caller = match caller {
        Ok(caller) => caller,
        Err(message) => return Ok(unauthorized(message)),
    };

    let result = engine
        .get_hint(&caller.session_id, caller.player_id)
        .await
        .map(|hint| HintResponse { hint });
    Ok(game_reply(result))
}

async fn handle_end(
    caller: Result<Caller, String>,
    engine: Arc<GameEngine>,
) -> Result<JsonReply, warp::Rejection> {
    let caller = match caller {
        Ok(caller) => caller,
        Err(message) => return Ok(unauthorized(message)),
    };

    Ok(game_reply(
        engine.end(&caller.session_id, caller.player_id).await,
    ))
}

async fn handle_kids_new(kids: Arc<KidsMode>) -> Result<JsonReply, warp::Rejection> {
    Ok(game_reply(kids.next_word().await))
}

async fn handle_kids_check(
    request: CheckAnswerRequest,
    kids: Arc<KidsMode>,
) -> Result<JsonReply, warp::Rejection> {
    let result = kids
        .check_answer(request.word_id, &request.submitted_answer)
        .await
        .map(|is_correct| CheckAnswerResponse { is_correct });
    Ok(game_reply(result))
}
