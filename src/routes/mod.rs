mod accounts;
mod actors;
mod awards;
mod movies;
mod ratings;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(movies::list).post(movies::create))
        .route(
            "/movies/{id}",
            get(movies::retrieve)
                .put(movies::replace)
                .patch(movies::patch)
                .delete(movies::destroy),
        )
        .route("/movies/{id}/actors", get(movies::cast))
        .route("/movies/{id}/actor", put(movies::add_actor).post(movies::add_actor))
        .route("/movie_actors/{movie_id}/{actor_id}", delete(movies::remove_actor))
        .route("/movies/{id}/ratings", get(ratings::for_movie).post(ratings::add))
        .route("/movies/{id}/ratings/", post(ratings::add))
        .route("/movies/{id}/ratings/avg", get(ratings::average))
        .route("/ratings", get(ratings::list))
        .route("/ratings/delete/{rating_id}", delete(ratings::destroy))
        .route("/ratings/delete/{rating_id}/", delete(ratings::destroy))
        .route("/actors", get(actors::list).post(actors::create))
        .route(
            "/actors/{id}",
            get(actors::retrieve)
                .put(actors::replace)
                .patch(actors::patch)
                .delete(actors::destroy),
        )
        .route("/oscars", get(awards::list_oscars).post(awards::create_oscar))
        .route(
            "/oscars/{id}",
            get(awards::get_oscar)
                .put(awards::replace_oscar)
                .patch(awards::patch_oscar)
                .delete(awards::delete_oscar),
        )
        .route("/directors", get(awards::list_directors).post(awards::create_director))
        .route("/directors/{id}", get(awards::get_director).delete(awards::delete_director))
        .route("/signup", post(accounts::signup))
        .with_state(state)
}
