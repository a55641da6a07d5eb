//! Query-string filters and the store conditions they translate to.
//!
//! Every filter is optional; the ones present are combined with AND.

use jiff::civil::Date;
use sea_orm::{
    ColumnTrait, Condition,
    sea_query::{Expr, Func, LikeExpr, SimpleExpr},
};
use serde::Deserialize;

use crate::entities::{movie, oscar, rating};

fn lower<C: ColumnTrait + 'static>(column: C) -> Expr {
    Expr::expr(Func::lower(Expr::col(column)))
}

// SQLite's LOWER() only folds ASCII, so the value side must fold the same way.
fn fold(value: &str) -> String {
    value.to_ascii_lowercase()
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn lower_eq<C: ColumnTrait + 'static>(column: C, value: &str) -> SimpleExpr {
    lower(column).eq(fold(value))
}

fn lower_contains<C: ColumnTrait + 'static>(column: C, value: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&fold(value)));
    lower(column).like(LikeExpr::new(pattern).escape('\\'))
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct MovieFilter {
    pub name: Option<String>,
    pub duration_from: Option<f64>,
    pub duration_to: Option<f64>,
    pub description: Option<String>,
}

impl MovieFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(name) = &self.name {
            condition = condition.add(lower_eq(movie::Column::Name, name));
        }
        if let Some(from) = self.duration_from {
            condition = condition.add(movie::Column::DurationInMin.gte(from));
        }
        if let Some(to) = self.duration_to {
            condition = condition.add(movie::Column::DurationInMin.lte(to));
        }
        if let Some(description) = &self.description {
            condition = condition.add(lower_contains(movie::Column::Description, description));
        }
        condition
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct OscarFilter {
    pub year: Option<i32>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub nomination: Option<String>,
}

impl OscarFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(year) = self.year {
            condition = condition.add(oscar::Column::Year.eq(year));
        }
        if let Some(from) = self.year_from {
            condition = condition.add(oscar::Column::Year.gte(from));
        }
        if let Some(to) = self.year_to {
            condition = condition.add(oscar::Column::Year.lte(to));
        }
        if let Some(nomination) = &self.nomination {
            condition = condition.add(lower_contains(oscar::Column::Nomination, nomination));
        }
        condition
    }
}

/// Inclusive rating-date bounds.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RatingFilter {
    pub from_date: Option<Date>,
    pub to_date: Option<Date>,
}

impl RatingFilter {
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(from) = self.from_date {
            condition = condition.add(rating::Column::RatingDate.gte(from.to_string()));
        }
        if let Some(to) = self.to_date {
            condition = condition.add(rating::Column::RatingDate.lte(to.to_string()));
        }
        condition
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::store::testing::{memory_store, seed_movie};

    #[tokio::test]
    async fn test_duration_range_is_inclusive() {
        let store = memory_store().await;
        let movies =
            [("Short", 89.0), ("Lower", 90.0), ("Mid", 105.5), ("Upper", 120.0), ("Long", 121.0)];
        for (name, duration) in movies {
            seed_movie(&store, name, duration).await;
        }

        let filter = MovieFilter {
            duration_from: Some(90.0),
            duration_to: Some(120.0),
            ..Default::default()
        };
        let names: Vec<_> =
            store.list_movies(&filter).await.unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["Lower", "Mid", "Upper"]);
    }

    #[tokio::test]
    async fn test_name_and_description_ignore_case() {
        let store = memory_store().await;
        seed_movie(&store, "The Thing", 109.0).await;
        seed_movie(&store, "The Thing From Another World", 87.0).await;

        let by_name = MovieFilter { name: Some("the THING".to_string()), ..Default::default() };
        let found = store.list_movies(&by_name).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "The Thing");

        // descriptions are "<name> description"
        let by_description =
            MovieFilter { description: Some("ANOTHER world".to_string()), ..Default::default() };
        let found = store.list_movies(&by_description).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "The Thing From Another World");

        let combined = MovieFilter {
            description: Some("thing".to_string()),
            duration_to: Some(100.0),
            ..Default::default()
        };
        assert_eq!(store.list_movies(&combined).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_non_ascii_names_match() {
        let store = memory_store().await;
        seed_movie(&store, "Émile", 95.0).await;
        seed_movie(&store, "Amélie", 122.0).await;

        let exact = MovieFilter { name: Some("Émile".to_string()), ..Default::default() };
        let found = store.list_movies(&exact).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Émile");

        let mixed_ascii = MovieFilter { name: Some("AMéLIE".to_string()), ..Default::default() };
        assert_eq!(store.list_movies(&mixed_ascii).await.unwrap().len(), 1);

        let contains =
            MovieFilter { description: Some("émile desc".to_string()), ..Default::default() };
        assert_eq!(store.list_movies(&contains).await.unwrap().len(), 0);
        let contains =
            MovieFilter { description: Some("Émile DESC".to_string()), ..Default::default() };
        assert_eq!(store.list_movies(&contains).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_like_wildcards_are_literal() {
        let store = memory_store().await;
        seed_movie(&store, "Heat", 170.0).await;
        seed_movie(&store, "100%_Pure", 90.0).await;

        for wildcard in ["%", "_", "h_at"] {
            let filter =
                MovieFilter { description: Some(wildcard.to_string()), ..Default::default() };
            let names: Vec<_> =
                store.list_movies(&filter).await.unwrap().into_iter().map(|m| m.name).collect();
            if wildcard == "h_at" {
                assert!(names.is_empty());
            } else {
                assert_eq!(names, ["100%_Pure"]);
            }
        }

        let filter = MovieFilter { description: Some("0%_p".to_string()), ..Default::default() };
        assert_eq!(store.list_movies(&filter).await.unwrap().len(), 1);
        assert_eq!(escape_like(r"a\b%c_d"), r"a\\b\%c\_d");
    }

    #[test]
    fn test_empty_filters_match_everything() {
        assert!(MovieFilter::default().condition().is_empty());
        assert!(OscarFilter::default().condition().is_empty());
        assert!(RatingFilter::default().condition().is_empty());

        let bounded = RatingFilter { from_date: Some(date(2024, 1, 1)), to_date: None };
        assert_eq!(bounded.condition().len(), 1);
    }
}
