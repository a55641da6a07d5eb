use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::Store;
use crate::{
    entities::{actor, movie, movie_actor},
    error::{AppError, AppResult, FieldErrors},
    filters::MovieFilter,
    models::{CastByName, MovieFields, NewCastMember},
};

const DUPLICATE_NAME: &str = "movie with this name already exists.";

async fn name_taken<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    except: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = movie::Entity::find().filter(movie::Column::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(movie::Column::Id.ne(id));
    }
    Ok(query.one(conn).await?.is_some())
}

impl Store {
    pub async fn list_movies(&self, filter: &MovieFilter) -> AppResult<Vec<movie::Model>> {
        let movies = movie::Entity::find()
            .filter(filter.condition())
            .order_by_asc(movie::Column::Id)
            .all(&self.db)
            .await?;
        Ok(movies)
    }

    pub async fn get_movie(&self, id: i32) -> AppResult<movie::Model> {
        movie::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("movie"))
    }

    /// Writes the movie and its cast in one transaction; a bad cast entry
    /// leaves nothing behind.
    pub async fn create_movie(
        &self,
        fields: MovieFields,
        cast: Vec<NewCastMember>,
    ) -> AppResult<(movie::Model, Vec<movie_actor::Model>)> {
        let txn = self.db.begin().await?;

        if name_taken(&txn, &fields.name, None).await? {
            return Err(FieldErrors::single("name", DUPLICATE_NAME).into());
        }

        let mut errors = FieldErrors::default();
        for (i, member) in cast.iter().enumerate() {
            if actor::Entity::find_by_id(member.actor_id).one(&txn).await?.is_none() {
                errors.add(
                    &format!("cast[{i}].actor"),
                    format!("Actor with id {} does not exist", member.actor_id),
                );
            }
        }
        errors.check()?;

        let movie = movie::ActiveModel {
            id: Default::default(),
            name: Set(fields.name),
            description: Set(fields.description),
            duration_in_min: Set(fields.duration_in_min),
            release_year: Set(fields.release_year),
            pic_url: Set(fields.pic_url),
        }
        .insert(&txn)
        .await?;

        let mut roles = Vec::with_capacity(cast.len());
        for member in cast {
            let role = movie_actor::ActiveModel {
                id: Default::default(),
                movie_id: Set(movie.id),
                actor_id: Set(member.actor_id),
                salary: Set(member.salary),
                main_role: Set(member.main_role),
            }
            .insert(&txn)
            .await?;
            roles.push(role);
        }

        txn.commit().await?;

        Ok((movie, roles))
    }

    pub async fn update_movie(&self, id: i32, fields: MovieFields) -> AppResult<movie::Model> {
        let movie = self.get_movie(id).await?;

        if name_taken(&self.db, &fields.name, Some(id)).await? {
            return Err(FieldErrors::single("name", DUPLICATE_NAME).into());
        }

        let mut active: movie::ActiveModel = movie.into();
        active.name = Set(fields.name);
        active.description = Set(fields.description);
        active.duration_in_min = Set(fields.duration_in_min);
        active.release_year = Set(fields.release_year);
        active.pic_url = Set(fields.pic_url);

        Ok(active.update(&self.db).await?)
    }

    /// Cast rows, ratings and awards go with the movie through `ON DELETE CASCADE`.
    pub async fn delete_movie(&self, id: i32) -> AppResult<()> {
        let result = movie::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("movie"));
        }
        Ok(())
    }

    pub async fn list_cast(
        &self,
        movie_id: i32,
    ) -> AppResult<Vec<(movie_actor::Model, actor::Model)>> {
        let movie = self.get_movie(movie_id).await?;

        let rows = movie
            .find_related(movie_actor::Entity)
            .find_also_related(actor::Entity)
            .order_by_asc(movie_actor::Column::Id)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().filter_map(|(role, actor)| actor.map(|a| (role, a))).collect())
    }

    /// Adds the first actor with exactly this name to the movie's cast.
    pub async fn add_cast_member(
        &self,
        movie_id: i32,
        entry: CastByName,
    ) -> AppResult<movie_actor::Model> {
        let movie = self.get_movie(movie_id).await?;

        let actor = actor::Entity::find()
            .filter(actor::Column::Name.eq(entry.actor_name.as_str()))
            .order_by_asc(actor::Column::Id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("actor"))?;

        let already_cast = movie_actor::Entity::find()
            .filter(movie_actor::Column::MovieId.eq(movie.id))
            .filter(movie_actor::Column::ActorId.eq(actor.id))
            .one(&self.db)
            .await?
            .is_some();
        if already_cast {
            return Err(FieldErrors::single(
                "actor_name",
                format!("{} is already in the cast of {}", actor.name, movie.name),
            )
            .into());
        }

        let role = movie_actor::ActiveModel {
            id: Default::default(),
            movie_id: Set(movie.id),
            actor_id: Set(actor.id),
            salary: Set(entry.salary),
            main_role: Set(entry.main_role),
        }
        .insert(&self.db)
        .await?;

        Ok(role)
    }

    pub async fn remove_cast_member(&self, movie_id: i32, actor_id: i32) -> AppResult<()> {
        let movie = self.get_movie(movie_id).await?;

        let result = movie_actor::Entity::delete_many()
            .filter(movie_actor::Column::MovieId.eq(movie.id))
            .filter(movie_actor::Column::ActorId.eq(actor_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("cast member"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{EntityTrait, PaginatorTrait};

    use crate::{
        entities::{movie, movie_actor, rating},
        error::AppError,
        filters::MovieFilter,
        models::{CastByName, NewCastMember},
        store::testing::{memory_store, movie_fields, seed_actor, seed_movie},
    };

    #[tokio::test]
    async fn test_create_movie_with_cast() {
        let store = memory_store().await;
        let pacino = seed_actor(&store, "Al Pacino").await;
        let de_niro = seed_actor(&store, "Robert De Niro").await;

        let cast = vec![
            NewCastMember { actor_id: pacino.id, salary: 6_000_000, main_role: true },
            NewCastMember { actor_id: de_niro.id, salary: 6_000_000, main_role: true },
        ];
        let (movie, roles) =
            store.create_movie(movie_fields("Heat", 1995, 170.0), cast).await.unwrap();

        assert_eq!(roles.len(), 2);
        assert!(roles.iter().all(|r| r.movie_id == movie.id));

        let listed = store.list_cast(movie.id).await.unwrap();
        let names: Vec<_> = listed.iter().map(|(_, a)| a.name.as_str()).collect();
        assert_eq!(names, ["Al Pacino", "Robert De Niro"]);
    }

    #[tokio::test]
    async fn test_missing_cast_actor_creates_nothing() {
        let store = memory_store().await;
        let actor = seed_actor(&store, "Val Kilmer").await;

        let cast = vec![
            NewCastMember { actor_id: actor.id, salary: 1, main_role: false },
            NewCastMember { actor_id: actor.id + 100, salary: 1, main_role: false },
        ];
        let err = store.create_movie(movie_fields("Heat", 1995, 170.0), cast).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        assert!(store.list_movies(&MovieFilter::default()).await.unwrap().is_empty());
        assert_eq!(movie_actor::Entity::find().count(store.db()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_cast_insert_rolls_back_movie() {
        let store = memory_store().await;
        let actor = seed_actor(&store, "Val Kilmer").await;

        // the second row collides with the first on (movie, actor)
        let cast = vec![
            NewCastMember { actor_id: actor.id, salary: 1, main_role: false },
            NewCastMember { actor_id: actor.id, salary: 2, main_role: true },
        ];
        assert!(store.create_movie(movie_fields("Heat", 1995, 170.0), cast).await.is_err());

        assert_eq!(movie::Entity::find().count(store.db()).await.unwrap(), 0);
        assert_eq!(movie_actor::Entity::find().count(store.db()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_movie_names_are_unique() {
        let store = memory_store().await;
        seed_movie(&store, "Heat", 170.0).await;

        let err = store
            .create_movie(movie_fields("Heat", 2000, 100.0), Vec::new())
            .await
            .unwrap_err();
        let AppError::Validation(errors) = err else { panic!("expected validation error") };
        assert!(errors.get("name").is_some());

        let other = seed_movie(&store, "Ronin", 122.0).await;
        assert!(store.update_movie(other.id, movie_fields("Heat", 1998, 122.0)).await.is_err());
        assert!(store.update_movie(other.id, movie_fields("Ronin", 1998, 122.0)).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_movie_cascades() {
        let store = memory_store().await;
        let actor = seed_actor(&store, "Jean Reno").await;
        let movie = seed_movie(&store, "Ronin", 122.0).await;
        store
            .add_cast_member(
                movie.id,
                CastByName { actor_name: "Jean Reno".to_string(), salary: 10, main_role: false },
            )
            .await
            .unwrap();
        store.add_rating(movie.id, 8).await.unwrap();
        store.add_rating(movie.id, 6).await.unwrap();

        store.delete_movie(movie.id).await.unwrap();

        assert_eq!(movie_actor::Entity::find().count(store.db()).await.unwrap(), 0);
        assert_eq!(rating::Entity::find().count(store.db()).await.unwrap(), 0);
        assert!(store.get_actor(actor.id).await.is_ok());
        assert!(matches!(store.delete_movie(movie.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_add_and_remove_cast_member() {
        let store = memory_store().await;
        let actor = seed_actor(&store, "Natalie Portman").await;
        let movie = seed_movie(&store, "Leon", 110.0).await;

        let missing = store
            .add_cast_member(
                movie.id,
                CastByName { actor_name: "Nobody".to_string(), salary: 1, main_role: false },
            )
            .await;
        assert!(matches!(missing, Err(AppError::NotFound("actor"))));

        let entry =
            CastByName { actor_name: "Natalie Portman".to_string(), salary: 500, main_role: false };
        let role = store.add_cast_member(movie.id, entry.clone()).await.unwrap();
        assert_eq!(role.actor_id, actor.id);
        assert!(matches!(
            store.add_cast_member(movie.id, entry).await,
            Err(AppError::Validation(_))
        ));

        store.remove_cast_member(movie.id, actor.id).await.unwrap();
        assert!(store.list_cast(movie.id).await.unwrap().is_empty());
        assert!(matches!(
            store.remove_cast_member(movie.id, actor.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
