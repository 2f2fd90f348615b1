use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{parse_region, ApiError, ApiJson};
use crate::models::LiveGame;
use crate::pipeline::PipelineError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckGameRequest {
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InGameResponse {
    #[serde(flatten)]
    pub game: LiveGame,
    pub in_game: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotInGameResponse {
    pub error: String,
    pub in_game: bool,
}

/// Not being in a game is a normal answer, not an error status.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CheckGameResponse {
    InGame(InGameResponse),
    NotInGame(NotInGameResponse),
}

pub async fn check_game(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CheckGameRequest>,
) -> Result<Json<CheckGameResponse>, ApiError> {
    let game_name = req.game_name.as_deref().map(str::trim).unwrap_or_default();
    let tag_line = req.tag_line.as_deref().map(str::trim).unwrap_or_default();
    if game_name.is_empty() || tag_line.is_empty() {
        return Err(ApiError::BadRequest(
            "Missing gameName or tagLine".to_string(),
        ));
    }
    let region = parse_region(req.region.as_deref(), state.default_region)?;

    match state
        .snipe_check
        .check_game(game_name, tag_line, region)
        .await
    {
        Ok((_, game)) => Ok(Json(CheckGameResponse::InGame(InGameResponse {
            game,
            in_game: true,
        }))),
        Err(PipelineError::NotInGame) => Ok(Json(CheckGameResponse::NotInGame(
            NotInGameResponse {
                error: PipelineError::NotInGame.to_string(),
                in_game: false,
            },
        ))),
        Err(e) => Err(e.into()),
    }
}
