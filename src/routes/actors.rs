use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::AppResult,
    extract::{PathId, Payload},
    models::{ActorPayload, ActorView},
    validation::current_year,
};

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<ActorView>>> {
    let actors = state.store.list_actors().await?;
    Ok(Json(actors.iter().map(ActorView::from).collect()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<ActorPayload>,
) -> AppResult<(StatusCode, Json<ActorView>)> {
    let fields = payload.resolve(None, current_year())?;
    let actor = state.store.create_actor(fields).await?;
    tracing::info!(actor_id = actor.id, "actor created");
    Ok((StatusCode::CREATED, Json(ActorView::from(&actor))))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
) -> AppResult<Json<ActorView>> {
    let actor = state.store.get_actor(id).await?;
    Ok(Json(ActorView::from(&actor)))
}

pub async fn replace(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
    Payload(payload): Payload<ActorPayload>,
) -> AppResult<Json<ActorView>> {
    update(&state, id, payload, false).await
}

pub async fn patch(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
    Payload(payload): Payload<ActorPayload>,
) -> AppResult<Json<ActorView>> {
    update(&state, id, payload, true).await
}

async fn update(
    state: &AppState,
    id: i32,
    payload: ActorPayload,
    partial: bool,
) -> AppResult<Json<ActorView>> {
    let stored = state.store.get_actor(id).await?;
    let fields = payload.resolve(partial.then_some(&stored), current_year())?;
    let actor = state.store.update_actor(id, fields).await?;
    Ok(Json(ActorView::from(&actor)))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_actor(id).await?;
    tracing::info!(actor_id = id, "actor deleted");
    Ok(StatusCode::NO_CONTENT)
}
