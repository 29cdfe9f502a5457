//! `/api/award` CRUD.
//!
//! Mutations answer with a bare status code and an empty body.

use crate::error::ServerResult;
use crate::extract::JsonBody;
use crate::routes::run_blocking;
use crate::state::ServerState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog::award::award_id_from_body;
use catalog::{Award, AwardRename, AwardService, NewAward};
use std::sync::Arc;

pub async fn list_awards(State(state): State<Arc<ServerState>>) -> ServerResult<Json<Vec<Award>>> {
    let database = state.database.clone();
    let awards = run_blocking(move || AwardService::connect(&database)?.list()).await?;
    Ok(Json(awards))
}

pub async fn create_award(
    State(state): State<Arc<ServerState>>,
    JsonBody(body): JsonBody,
) -> ServerResult<StatusCode> {
    let NewAward { name } = NewAward::from_body(&body)?;
    let database = state.database.clone();

    run_blocking(move || AwardService::connect(&database)?.create(&name)).await?;
    Ok(StatusCode::CREATED)
}

pub async fn update_award(
    State(state): State<Arc<ServerState>>,
    JsonBody(body): JsonBody,
) -> ServerResult<StatusCode> {
    let AwardRename { award_id, name } = AwardRename::from_body(&body)?;
    let database = state.database.clone();

    run_blocking(move || AwardService::connect(&database)?.update(award_id, &name)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_award(
    State(state): State<Arc<ServerState>>,
    JsonBody(body): JsonBody,
) -> ServerResult<StatusCode> {
    let award_id = award_id_from_body(&body)?;
    let database = state.database.clone();

    run_blocking(move || AwardService::connect(&database)?.delete(award_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
