use jiff::civil::Date;
use serde::{Deserialize, Deserializer, Serialize};

use crate::entities::{actor, director, movie, movie_actor, oscar, rating, user};

// Request bodies. Every field is optional at the serde level so that missing
// values are reported per field by the validation layer instead of failing
// deserialization as a whole.

#[derive(Debug, Default, Deserialize)]
pub struct MoviePayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_in_min: Option<f64>,
    pub release_year: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub pic_url: Option<Option<String>>,
    pub cast: Option<Vec<CastPayload>>,
}

/// Keeps an explicit `null` apart from an absent field: absent is `None`,
/// `null` is `Some(None)`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Default, Deserialize)]
pub struct CastPayload {
    pub actor: Option<i32>,
    pub salary: Option<i32>,
    pub main_role: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddCastPayload {
    pub actor_name: Option<String>,
    pub salary: Option<i32>,
    pub main_role: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActorPayload {
    pub name: Option<String>,
    pub birth_year: Option<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RatingPayload {
    pub rating: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OscarPayload {
    pub year: Option<i32>,
    pub nomination: Option<String>,
    pub movie: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub actor: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub director: Option<Option<i32>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectorPayload {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignupPayload {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

// Validated values, ready to persist.

#[derive(Clone, Debug, PartialEq)]
pub struct MovieFields {
    pub name: String,
    pub description: String,
    pub duration_in_min: f64,
    pub release_year: i32,
    pub pic_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewCastMember {
    pub actor_id: i32,
    pub salary: i32,
    pub main_role: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastByName {
    pub actor_name: String,
    pub salary: i32,
    pub main_role: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActorFields {
    pub name: String,
    pub birth_year: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OscarFields {
    pub year: i32,
    pub nomination: String,
    pub movie_id: i32,
    pub actor_id: Option<i32>,
    pub director_id: Option<i32>,
}

pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

// Response bodies.

#[derive(Clone, Debug, Serialize)]
pub struct MovieSummary {
    pub id: i32,
    pub name: String,
    pub release_year: i32,
    pub duration_in_min: f64,
    pub pic_url: Option<String>,
}

impl From<&movie::Model> for MovieSummary {
    fn from(m: &movie::Model) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            release_year: m.release_year,
            duration_in_min: m.duration_in_min,
            pic_url: m.pic_url.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieDetail {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub duration_in_min: f64,
    pub release_year: i32,
    pub pic_url: Option<String>,
}

impl From<&movie::Model> for MovieDetail {
    fn from(m: &movie::Model) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            description: m.description.clone(),
            duration_in_min: m.duration_in_min,
            release_year: m.release_year,
            pic_url: m.pic_url.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CastEntry {
    pub actor: i32,
    pub salary: i32,
    pub main_role: bool,
}

impl From<&movie_actor::Model> for CastEntry {
    fn from(m: &movie_actor::Model) -> Self {
        Self { actor: m.actor_id, salary: m.salary, main_role: m.main_role }
    }
}

/// A freshly created movie together with the cast rows written with it.
#[derive(Clone, Debug, Serialize)]
pub struct CreatedMovie {
    #[serde(flatten)]
    pub movie: MovieDetail,
    pub cast: Vec<CastEntry>,
}

impl CreatedMovie {
    pub fn new(movie: &movie::Model, cast: &[movie_actor::Model]) -> Self {
        Self { movie: movie.into(), cast: cast.iter().map(CastEntry::from).collect() }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ActorView {
    pub id: i32,
    pub name: String,
    pub birth_year: i32,
}

impl From<&actor::Model> for ActorView {
    fn from(m: &actor::Model) -> Self {
        Self { id: m.id, name: m.name.clone(), birth_year: m.birth_year }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CastMember {
    pub actor: ActorView,
    pub salary: i32,
    pub main_role: bool,
}

impl CastMember {
    pub fn new(role: &movie_actor::Model, actor: &actor::Model) -> Self {
        Self { actor: actor.into(), salary: role.salary, main_role: role.main_role }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieActorView {
    pub id: i32,
    pub movie: i32,
    pub actor: i32,
    pub salary: i32,
    pub main_role: bool,
}

impl From<&movie_actor::Model> for MovieActorView {
    fn from(m: &movie_actor::Model) -> Self {
        Self {
            id: m.id,
            movie: m.movie_id,
            actor: m.actor_id,
            salary: m.salary,
            main_role: m.main_role,
        }
    }
}

fn parse_rating_date(m: &rating::Model) -> Option<Date> {
    match m.rating_date.parse() {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::warn!(
                rating_id = m.id,
                stored = %m.rating_date,
                error = %err,
                "unreadable rating date"
            );
            None
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RatingView {
    pub rating: i16,
    pub rating_date: Option<Date>,
}

impl From<&rating::Model> for RatingView {
    fn from(m: &rating::Model) -> Self {
        Self { rating: m.rating, rating_date: parse_rating_date(m) }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CreatedRating {
    pub id: i32,
    pub rating_date: Option<Date>,
    pub rating: i16,
}

impl From<&rating::Model> for CreatedRating {
    fn from(m: &rating::Model) -> Self {
        Self { id: m.id, rating_date: parse_rating_date(m), rating: m.rating }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct AverageRating {
    pub avg_rating: Option<f64>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OscarView {
    pub id: i32,
    pub year: i32,
    pub nomination: String,
    pub movie: i32,
    pub actor: Option<i32>,
    pub director: Option<i32>,
}

impl From<&oscar::Model> for OscarView {
    fn from(m: &oscar::Model) -> Self {
        Self {
            id: m.id,
            year: m.year,
            nomination: m.nomination.clone(),
            movie: m.movie_id,
            actor: m.actor_id,
            director: m.director_id,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct DirectorView {
    pub id: i32,
    pub name: String,
}

impl From<&director::Model> for DirectorView {
    fn from(m: &director::Model) -> Self {
        Self { id: m.id, name: m.name.clone() }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct UserView {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&user::Model> for UserView {
    fn from(m: &user::Model) -> Self {
        Self {
            id: m.id,
            username: m.username.clone(),
            email: m.email.clone(),
            first_name: m.first_name.clone(),
            last_name: m.last_name.clone(),
        }
    }
}
