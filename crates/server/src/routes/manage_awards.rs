//! `/api/manage_awards`: attach an award to a paper or detach it.

use crate::error::ServerResult;
use crate::extract::SanitizedJson;
use crate::routes::run_blocking;
use crate::state::ServerState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use catalog::assignment::content_id_from_body;
use catalog::{AwardAssignment, AwardAssignmentService};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn assign_award(
    State(state): State<Arc<ServerState>>,
    SanitizedJson(body): SanitizedJson,
) -> ServerResult<(StatusCode, Json<MessageResponse>)> {
    let assignment = AwardAssignment::from_body(&body)?;
    let database = state.database.clone();

    run_blocking(move || AwardAssignmentService::connect(&database)?.assign(assignment)).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Award assigned successfully",
        }),
    ))
}

pub async fn remove_award(
    State(state): State<Arc<ServerState>>,
    SanitizedJson(body): SanitizedJson,
) -> ServerResult<Json<MessageResponse>> {
    let content_id = content_id_from_body(&body)?;
    let database = state.database.clone();

    run_blocking(move || AwardAssignmentService::connect(&database)?.remove(content_id)).await?;

    Ok(Json(MessageResponse {
        message: "Award removed successfully",
    }))
}
