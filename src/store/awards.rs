use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};

use super::Store;
use crate::{
    entities::{actor, director, movie, oscar},
    error::{AppError, AppResult, FieldErrors},
    filters::OscarFilter,
    models::OscarFields,
};

/// Field errors for every reference in `fields` that points nowhere.
async fn check_references<C: ConnectionTrait>(
    conn: &C,
    fields: &OscarFields,
) -> Result<FieldErrors, DbErr> {
    let mut errors = FieldErrors::default();
    if movie::Entity::find_by_id(fields.movie_id).one(conn).await?.is_none() {
        errors.add("movie", format!("Movie with id {} does not exist", fields.movie_id));
    }
    if let Some(actor_id) = fields.actor_id {
        if actor::Entity::find_by_id(actor_id).one(conn).await?.is_none() {
            errors.add("actor", format!("Actor with id {actor_id} does not exist"));
        }
    }
    if let Some(director_id) = fields.director_id {
        if director::Entity::find_by_id(director_id).one(conn).await?.is_none() {
            errors.add("director", format!("Director with id {director_id} does not exist"));
        }
    }
    Ok(errors)
}

impl Store {
    pub async fn list_oscars(&self, filter: &OscarFilter) -> AppResult<Vec<oscar::Model>> {
        let oscars = oscar::Entity::find()
            .filter(filter.condition())
            .order_by_asc(oscar::Column::Year)
            .order_by_asc(oscar::Column::Id)
            .all(&self.db)
            .await?;
        Ok(oscars)
    }

    pub async fn get_oscar(&self, id: i32) -> AppResult<oscar::Model> {
        oscar::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("oscar"))
    }

    pub async fn create_oscar(&self, fields: OscarFields) -> AppResult<oscar::Model> {
        check_references(&self.db, &fields).await?.check()?;

        let oscar = oscar::ActiveModel {
            id: Default::default(),
            year: Set(fields.year),
            nomination: Set(fields.nomination),
            movie_id: Set(fields.movie_id),
            actor_id: Set(fields.actor_id),
            director_id: Set(fields.director_id),
        }
        .insert(&self.db)
        .await?;
        Ok(oscar)
    }

    pub async fn update_oscar(&self, id: i32, fields: OscarFields) -> AppResult<oscar::Model> {
        let mut active: oscar::ActiveModel = self.get_oscar(id).await?.into();
        check_references(&self.db, &fields).await?.check()?;

        active.year = Set(fields.year);
        active.nomination = Set(fields.nomination);
        active.movie_id = Set(fields.movie_id);
        active.actor_id = Set(fields.actor_id);
        active.director_id = Set(fields.director_id);
        Ok(active.update(&self.db).await?)
    }

    pub async fn delete_oscar(&self, id: i32) -> AppResult<()> {
        let result = oscar::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("oscar"));
        }
        Ok(())
    }

    pub async fn list_directors(&self) -> AppResult<Vec<director::Model>> {
        let directors =
            director::Entity::find().order_by_asc(director::Column::Id).all(&self.db).await?;
        Ok(directors)
    }

    pub async fn get_director(&self, id: i32) -> AppResult<director::Model> {
        director::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("director"))
    }

    pub async fn create_director(&self, name: String) -> AppResult<director::Model> {
        let director = director::ActiveModel { id: Default::default(), name: Set(name) }
            .insert(&self.db)
            .await?;
        Ok(director)
    }

    /// Awards naming the director go with it.
    pub async fn delete_director(&self, id: i32) -> AppResult<()> {
        let result = director::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("director"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::AppError,
        filters::OscarFilter,
        models::OscarFields,
        store::testing::{memory_store, seed_actor, seed_movie},
    };

    fn award(year: i32, nomination: &str, movie_id: i32) -> OscarFields {
        OscarFields {
            year,
            nomination: nomination.to_string(),
            movie_id,
            actor_id: None,
            director_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_oscar_checks_references() {
        let store = memory_store().await;
        let movie = seed_movie(&store, "Amadeus", 160.0).await;

        let mut fields = award(1985, "Best Picture", movie.id + 1);
        fields.actor_id = Some(42);
        fields.director_id = Some(7);
        let AppError::Validation(errors) = store.create_oscar(fields).await.unwrap_err() else {
            panic!("expected validation error");
        };
        for field in ["movie", "actor", "director"] {
            assert!(errors.get(field).is_some(), "{field} not reported");
        }

        let director = store.create_director("Milos Forman".to_string()).await.unwrap();
        let mut fields = award(1985, "Best Director", movie.id);
        fields.director_id = Some(director.id);
        let oscar = store.create_oscar(fields).await.unwrap();
        assert_eq!(oscar.director_id, Some(director.id));
        assert_eq!(store.get_oscar(oscar.id).await.unwrap(), oscar);
    }

    #[tokio::test]
    async fn test_oscar_filters() {
        let store = memory_store().await;
        let movie = seed_movie(&store, "Amadeus", 160.0).await;
        store.create_oscar(award(1985, "Best Picture", movie.id)).await.unwrap();
        store.create_oscar(award(1985, "Best Actor in a Leading Role", movie.id)).await.unwrap();
        store.create_oscar(award(1990, "Best Picture", movie.id)).await.unwrap();

        let exact = OscarFilter { year: Some(1985), ..Default::default() };
        assert_eq!(store.list_oscars(&exact).await.unwrap().len(), 2);

        let picture = OscarFilter {
            nomination: Some("best picture".to_string()),
            year_from: Some(1986),
            ..Default::default()
        };
        let found = store.list_oscars(&picture).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].year, 1990);

        let until = OscarFilter { year_to: Some(1985), ..Default::default() };
        assert_eq!(store.list_oscars(&until).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_oscars_follow_their_references() {
        let store = memory_store().await;
        let movie = seed_movie(&store, "Amadeus", 160.0).await;
        let actor = seed_actor(&store, "F. Murray Abraham").await;
        let director = store.create_director("Milos Forman".to_string()).await.unwrap();

        let mut acting = award(1985, "Best Actor", movie.id);
        acting.actor_id = Some(actor.id);
        let acting = store.create_oscar(acting).await.unwrap();
        let mut directing = award(1985, "Best Director", movie.id);
        directing.director_id = Some(director.id);
        let directing = store.create_oscar(directing).await.unwrap();
        let picture = store.create_oscar(award(1985, "Best Picture", movie.id)).await.unwrap();

        store.delete_actor(actor.id).await.unwrap();
        assert!(store.get_oscar(acting.id).await.is_err());
        store.delete_director(director.id).await.unwrap();
        assert!(store.get_oscar(directing.id).await.is_err());

        store.delete_movie(movie.id).await.unwrap();
        assert!(matches!(store.get_oscar(picture.id).await, Err(AppError::NotFound("oscar"))));
    }
}
