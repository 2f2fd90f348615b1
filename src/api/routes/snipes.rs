use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::{parse_region, ApiError, ApiJson};
use crate::models::{LobbyPlayer, Puuid, SnipedPlayer};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeSnipesRequest {
    pub user_puuid: Option<Puuid>,
    #[serde(default)]
    pub participants: Vec<LobbyPlayer>,
    pub region: Option<String>,
}

pub async fn analyze_snipes(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AnalyzeSnipesRequest>,
) -> Result<Json<Vec<SnipedPlayer>>, ApiError> {
    let user_puuid = match req.user_puuid {
        Some(p) if !p.as_str().is_empty() && !req.participants.is_empty() => p,
        _ => {
            return Err(ApiError::BadRequest(
                "Missing userPuuid or participants".to_string(),
            ))
        }
    };
    let region = parse_region(req.region.as_deref(), state.default_region)?;

    let snipers = state
        .snipe_check
        .analyze_lobby(&user_puuid, &req.participants, region, state.match_count)
        .await?;

    Ok(Json(snipers))
}
