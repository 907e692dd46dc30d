use axum::{Json, extract::State};
use chrono::Utc;

use duet_core::time_remaining;
use duet_types::api::{CountdownResponse, MetaResponse};

use crate::auth::AppState;

/// GET /countdown — recomputes from the wall clock on every call. The
/// 1-second tick cadence belongs to the consuming client; once the target
/// passes this keeps answering all zeros.
pub async fn get_countdown(State(state): State<AppState>) -> Json<CountdownResponse> {
    let remaining = time_remaining(state.reunion_target, Utc::now());

    Json(CountdownResponse {
        target: state.reunion_target,
        complete: remaining.is_complete(),
        remaining,
    })
}

/// GET /meta — instance details shown before login.
pub async fn get_meta(State(state): State<AppState>) -> Json<MetaResponse> {
    Json(MetaResponse {
        app_title: state.couple.app_title.clone(),
        partner1: state.couple.partner1.clone(),
        partner2: state.couple.partner2.clone(),
        relationship_start: state.couple.relationship_start,
    })
}
