use anyhow::{Context, anyhow};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

use super::{Store, now_sec};
use crate::{
    entities::user,
    error::{AppResult, FieldErrors},
    models::NewUser,
};

impl Store {
    /// Creates an account keyed by email. The password is bcrypt-hashed on the
    /// blocking pool before it reaches the database.
    pub async fn signup(&self, new_user: NewUser, bcrypt_cost: u32) -> AppResult<user::Model> {
        let taken = user::Entity::find()
            .filter(user::Column::Email.eq(new_user.email.as_str()))
            .one(&self.db)
            .await?
            .is_some();
        if taken {
            return Err(FieldErrors::single("email", "user with this email already exists.").into());
        }

        let password = new_user.password;
        let hashed_password = tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt_cost))
            .await
            .context("password hashing task failed")?
            .map_err(|e| anyhow!("Failed to hash password: {}", e))?;

        let user = user::ActiveModel {
            id: Default::default(),
            username: Set(new_user.email.clone()),
            email: Set(new_user.email),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            password: Set(hashed_password),
            date_joined: Set(now_sec()),
        }
        .insert(&self.db)
        .await?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::AppError, models::NewUser, store::testing::memory_store};

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_hashes_password() {
        let store = memory_store().await;
        let user = store.signup(new_user("ada@example.com", "difference-engine"), 4).await.unwrap();

        assert_eq!(user.username, "ada@example.com");
        assert_ne!(user.password, "difference-engine");
        assert!(bcrypt::verify("difference-engine", &user.password).unwrap());
        assert!(!bcrypt::verify("analytical-engine", &user.password).unwrap());
    }

    #[tokio::test]
    async fn test_signup_rejects_taken_email() {
        let store = memory_store().await;
        store.signup(new_user("ada@example.com", "difference-engine"), 4).await.unwrap();

        let err = store.signup(new_user("ada@example.com", "other-password"), 4).await.unwrap_err();
        let AppError::Validation(errors) = err else { panic!("expected validation error") };
        assert!(errors.get("email").is_some());
    }
}
