use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::AppResult,
    extract::Payload,
    models::{SignupPayload, UserView},
};

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<SignupPayload>,
) -> AppResult<(StatusCode, Json<UserView>)> {
    let new_user = payload.resolve()?;
    let user = state.store.signup(new_user, state.config.bcrypt_cost).await?;
    tracing::info!(user_id = user.id, "user signed up");
    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}
