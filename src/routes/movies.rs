use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::AppResult,
    extract::{Params, PathId, Payload},
    filters::MovieFilter,
    models::{
        AddCastPayload, CastMember, CreatedMovie, MovieActorView, MovieDetail, MoviePayload,
        MovieSummary,
    },
    validation::current_year,
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    Params(filter): Params<MovieFilter>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    tracing::debug!(?filter, "listing movies");
    let movies = state.store.list_movies(&filter).await?;
    Ok(Json(movies.iter().map(MovieSummary::from).collect()))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Payload(payload): Payload<MoviePayload>,
) -> AppResult<(StatusCode, Json<CreatedMovie>)> {
    let (fields, cast) = payload.into_new(current_year())?;
    let (movie, cast) = state.store.create_movie(fields, cast).await?;
    tracing::info!(movie_id = movie.id, cast = cast.len(), "movie created");
    Ok((StatusCode::CREATED, Json(CreatedMovie::new(&movie, &cast))))
}

pub async fn retrieve(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
) -> AppResult<Json<MovieDetail>> {
    let movie = state.store.get_movie(id).await?;
    Ok(Json(MovieDetail::from(&movie)))
}

pub async fn replace(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
    Payload(payload): Payload<MoviePayload>,
) -> AppResult<Json<MovieDetail>> {
    update(&state, id, payload, false).await
}

pub async fn patch(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
    Payload(payload): Payload<MoviePayload>,
) -> AppResult<Json<MovieDetail>> {
    update(&state, id, payload, true).await
}

async fn update(
    state: &AppState,
    id: i32,
    payload: MoviePayload,
    partial: bool,
) -> AppResult<Json<MovieDetail>> {
    let stored = state.store.get_movie(id).await?;
    let fields = payload.into_update(partial.then_some(&stored), current_year())?;
    let movie = state.store.update_movie(id, fields).await?;
    tracing::info!(movie_id = movie.id, partial, "movie updated");
    Ok(Json(MovieDetail::from(&movie)))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_movie(id).await?;
    tracing::info!(movie_id = id, "movie deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn cast(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
) -> AppResult<Json<Vec<CastMember>>> {
    let cast = state.store.list_cast(id).await?;
    Ok(Json(cast.iter().map(|(role, actor)| CastMember::new(role, actor)).collect()))
}

pub async fn add_actor(
    State(state): State<Arc<AppState>>,
    PathId(id): PathId<i32>,
    Payload(payload): Payload<AddCastPayload>,
) -> AppResult<(StatusCode, Json<MovieActorView>)> {
    let entry = payload.resolve()?;
    let role = state.store.add_cast_member(id, entry).await?;
    tracing::info!(movie_id = id, actor_id = role.actor_id, "actor added to cast");
    Ok((StatusCode::CREATED, Json(MovieActorView::from(&role))))
}

pub async fn remove_actor(
    State(state): State<Arc<AppState>>,
    PathId((movie_id, actor_id)): PathId<(i32, i32)>,
) -> AppResult<StatusCode> {
    state.store.remove_cast_member(movie_id, actor_id).await?;
    tracing::info!(movie_id, actor_id, "actor removed from cast");
    Ok(StatusCode::NO_CONTENT)
}
