use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    error::AppResult,
    extract::{Params, PathId, Payload},
    filters::RatingFilter,
    models::{AverageRating, CreatedRating, RatingPayload, RatingView},
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    Params(filter): Params<RatingFilter>,
) -> AppResult<Json<Vec<RatingView>>> {
    tracing::debug!(?filter, "listing ratings");
    let ratings = state.store.list_ratings(&filter).await?;
    Ok(Json(ratings.iter().map(RatingView::from).collect()))
}

pub async fn for_movie(
    State(state): State<Arc<AppState>>,
    PathId(movie_id): PathId<i32>,
) -> AppResult<Json<Vec<RatingView>>> {
    let ratings = state.store.list_movie_ratings(movie_id).await?;
    Ok(Json(ratings.iter().map(RatingView::from).collect()))
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    PathId(movie_id): PathId<i32>,
    Payload(payload): Payload<RatingPayload>,
) -> AppResult<(StatusCode, Json<CreatedRating>)> {
    let score = payload.resolve()?;
    let rating = state.store.add_rating(movie_id, score).await?;
    tracing::info!(movie_id, rating_id = rating.id, score, "rating added");
    Ok((StatusCode::CREATED, Json(CreatedRating::from(&rating))))
}

pub async fn average(
    State(state): State<Arc<AppState>>,
    PathId(movie_id): PathId<i32>,
) -> AppResult<Json<AverageRating>> {
    let avg_rating = state.store.average_rating(movie_id).await?;
    Ok(Json(AverageRating { avg_rating }))
}

pub async fn destroy(
    State(state): State<Arc<AppState>>,
    PathId(rating_id): PathId<i32>,
) -> AppResult<StatusCode> {
    state.store.delete_rating(rating_id).await?;
    tracing::info!(rating_id, "rating deleted");
    Ok(StatusCode::NO_CONTENT)
}
