use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
    sea_query::{Expr, Func, SimpleExpr},
};

use super::{Store, today};
use crate::{
    entities::rating,
    error::{AppError, AppResult},
    filters::RatingFilter,
};

impl Store {
    pub async fn list_ratings(&self, filter: &RatingFilter) -> AppResult<Vec<rating::Model>> {
        let ratings = rating::Entity::find()
            .filter(filter.condition())
            .order_by_asc(rating::Column::RatingDate)
            .order_by_asc(rating::Column::Id)
            .all(&self.db)
            .await?;
        Ok(ratings)
    }

    pub async fn list_movie_ratings(&self, movie_id: i32) -> AppResult<Vec<rating::Model>> {
        let movie = self.get_movie(movie_id).await?;
        let ratings = movie
            .find_related(rating::Entity)
            .order_by_asc(rating::Column::Id)
            .all(&self.db)
            .await?;
        Ok(ratings)
    }

    /// Rates the movie, dated today.
    pub async fn add_rating(&self, movie_id: i32, score: i16) -> AppResult<rating::Model> {
        let movie = self.get_movie(movie_id).await?;
        let rating = rating::ActiveModel {
            id: Default::default(),
            movie_id: Set(movie.id),
            rating: Set(score),
            rating_date: Set(today().to_string()),
        }
        .insert(&self.db)
        .await?;
        Ok(rating)
    }

    pub async fn delete_rating(&self, id: i32) -> AppResult<()> {
        let result = rating::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("rating"));
        }
        Ok(())
    }

    /// `AVG` over the movie's ratings; `None` when it has none.
    pub async fn average_rating(&self, movie_id: i32) -> AppResult<Option<f64>> {
        let movie = self.get_movie(movie_id).await?;
        let average: Option<Option<f64>> = rating::Entity::find()
            .select_only()
            .column_as(SimpleExpr::from(Func::avg(Expr::col(rating::Column::Rating))), "avg_rating")
            .filter(rating::Column::MovieId.eq(movie.id))
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(average.flatten())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use sea_orm::{ActiveModelTrait, Set};

    use crate::{
        entities::rating,
        error::AppError,
        filters::RatingFilter,
        store::testing::{memory_store, seed_movie},
    };

    #[tokio::test]
    async fn test_average_rating() {
        let store = memory_store().await;
        let movie = seed_movie(&store, "Alien", 117.0).await;
        let other = seed_movie(&store, "Aliens", 137.0).await;

        assert_eq!(store.average_rating(movie.id).await.unwrap(), None);

        for score in [5, 7, 9] {
            store.add_rating(movie.id, score).await.unwrap();
        }
        store.add_rating(other.id, 1).await.unwrap();

        assert_eq!(store.average_rating(movie.id).await.unwrap(), Some(7.0));
        assert!(matches!(store.average_rating(movie.id + 100).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ratings_are_dated_today() {
        let store = memory_store().await;
        let movie = seed_movie(&store, "Alien", 117.0).await;
        let rating = store.add_rating(movie.id, 10).await.unwrap();

        assert_eq!(rating.rating_date, jiff::Zoned::now().date().to_string());
        assert_eq!(store.list_movie_ratings(movie.id).await.unwrap(), vec![rating.clone()]);

        store.delete_rating(rating.id).await.unwrap();
        assert!(store.list_movie_ratings(movie.id).await.unwrap().is_empty());
        assert!(matches!(store.delete_rating(rating.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let store = memory_store().await;
        let movie = seed_movie(&store, "Alien", 117.0).await;
        for day in ["2024-01-31", "2024-02-01", "2024-02-15", "2024-02-29", "2024-03-01"] {
            rating::ActiveModel {
                id: Default::default(),
                movie_id: Set(movie.id),
                rating: Set(5),
                rating_date: Set(day.to_string()),
            }
            .insert(store.db())
            .await
            .unwrap();
        }

        let february = RatingFilter {
            from_date: Some(date(2024, 2, 1)),
            to_date: Some(date(2024, 2, 29)),
        };
        let days: Vec<_> = store
            .list_ratings(&february)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.rating_date)
            .collect();
        assert_eq!(days, ["2024-02-01", "2024-02-15", "2024-02-29"]);

        let since = RatingFilter { from_date: Some(date(2024, 2, 29)), to_date: None };
        assert_eq!(store.list_ratings(&since).await.unwrap().len(), 2);
        assert_eq!(store.list_ratings(&RatingFilter::default()).await.unwrap().len(), 5);
    }
}
