use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::AppResult,
    extract::{Params, PathId, Payload},
    filters::OscarFilter,
    models::{DirectorPayload, DirectorView, OscarPayload, OscarView},
    validation::current_year,
};

pub async fn list_oscars(
    State(state): State<Arc<AppState>>,
    Params(filter): Params<OscarFilter>,
) -> AppResult<Json<Vec<OscarView>>> {
    tracing::debug!(?filter, "listing oscars");
    let oscars = state.store.list_oscars(&filter).await?;
    Ok(Json(oscars.iter().map(OscarView::from).collect()))
}

pub async fn create_oscar(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<OscarPayload>,
) -> AppResult<(StatusCode, Json<OscarView>)> {
    let fields = payload.resolve(None, current_year())?;
    let oscar = state.store.create_oscar(fields).await?;
    tracing::info!(oscar_id = oscar.id, movie_id = oscar.movie_id, "oscar created");
    Ok((StatusCode::CREATED, Json(OscarView::from(&oscar))))
}

pub async fn get_oscar(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
) -> AppResult<Json<OscarView>> {
    let oscar = state.store.get_oscar(id).await?;
    Ok(Json(OscarView::from(&oscar)))
}

pub async fn replace_oscar(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
    Payload(payload): Payload<OscarPayload>,
) -> AppResult<Json<OscarView>> {
    update_oscar(&state, id, payload, false).await
}

pub async fn patch_oscar(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
    Payload(payload): Payload<OscarPayload>,
) -> AppResult<Json<OscarView>> {
    update_oscar(&state, id, payload, true).await
}

async fn update_oscar(
    state: &AppState,
    id: i32,
    payload: OscarPayload,
    partial: bool,
) -> AppResult<Json<OscarView>> {
    let stored = state.store.get_oscar(id).await?;
    let fields = payload.resolve(partial.then_some(&stored), current_year())?;
    let oscar = state.store.update_oscar(id, fields).await?;
    Ok(Json(OscarView::from(&oscar)))
}

pub async fn delete_oscar(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_oscar(id).await?;
    tracing::info!(oscar_id = id, "oscar deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_directors(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<DirectorView>>> {
    let directors = state.store.list_directors().await?;
    Ok(Json(directors.iter().map(DirectorView::from).collect()))
}

pub async fn create_director(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<DirectorPayload>,
) -> AppResult<(StatusCode, Json<DirectorView>)> {
    let name = payload.resolve()?;
    let director = state.store.create_director(name).await?;
    tracing::info!(director_id = director.id, "director created");
    Ok((StatusCode::CREATED, Json(DirectorView::from(&director))))
}

pub async fn get_director(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
) -> AppResult<Json<DirectorView>> {
    let director = state.store.get_director(id).await?;
    Ok(Json(DirectorView::from(&director)))
}

pub async fn delete_director(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_director(id).await?;
    tracing::info!(director_id = id, "director deleted");
    Ok(StatusCode::NO_CONTENT)
}
