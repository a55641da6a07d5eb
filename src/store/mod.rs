mod actors;
mod awards;
mod movies;
mod ratings;
mod users;

use sea_orm::DatabaseConnection;

/// Data access for every entity, on top of one connection pool.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
}

impl Store {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
