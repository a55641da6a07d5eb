use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};

use super::Store;
use crate::{
    entities::actor,
    error::{AppError, AppResult},
    models::ActorFields,
};

impl Store {
    pub async fn list_actors(&self) -> AppResult<Vec<actor::Model>> {
        let actors = actor::Entity::find().order_by_asc(actor::Column::Id).all(&self.db).await?;
        Ok(actors)
    }

    pub async fn get_actor(&self, id: i32) -> AppResult<actor::Model> {
        actor::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound("actor"))
    }

    pub async fn create_actor(&self, fields: ActorFields) -> AppResult<actor::Model> {
        let actor = actor::ActiveModel {
            id: Default::default(),
            name: Set(fields.name),
            birth_year: Set(fields.birth_year),
        }
        .insert(&self.db)
        .await?;
        Ok(actor)
    }

    pub async fn update_actor(&self, id: i32, fields: ActorFields) -> AppResult<actor::Model> {
        let mut active: actor::ActiveModel = self.get_actor(id).await?.into();
        active.name = Set(fields.name);
        active.birth_year = Set(fields.birth_year);
        Ok(active.update(&self.db).await?)
    }

    /// Removes the actor's cast rows and awards along with it.
    pub async fn delete_actor(&self, id: i32) -> AppResult<()> {
        let result = actor::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("actor"));
        }
        Ok(())
    }
}
