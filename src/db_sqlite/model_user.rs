use sqlx::{SqlitePool, error::ErrorKind};
use std::fmt;

use crate::{api::AppError, argon::ArgonHash};

#[derive(sqlx::FromRow, Clone, PartialEq, Eq)]
pub struct ModelUser {
    pub user_id: i64,
    pub login: String,
    pub email: String,
    password: String,
}

/// Password hash is masked
impl fmt::Debug for ModelUser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ModelUser")
            .field("user_id", &self.user_id)
            .field("login", &self.login)
            .field("email", &self.email)
            .field("password", &"*".repeat(self.password.len()))
            .finish()
    }
}

impl ModelUser {
    pub async fn get(db: &SqlitePool, login: &str) -> Result<Option<Self>, AppError> {
        let query = r"
SELECT
    user_id,
    login,
    email,
    password
FROM
    users
WHERE
    login = ?";
        Ok(sqlx::query_as::<_, Self>(query)
            .bind(login)
            .fetch_optional(db)
            .await?)
    }

    /// Insert a new user, the password is stored as an argon2id hash.
    /// Returns false if any field is empty, as such a user could never log in,
    /// or if the insert breaks any constraint, the login and email uniqueness constraints being the ones that matter,
    /// no distinction is made between which one was hit
    pub async fn register_user(
        db: &SqlitePool,
        login: &str,
        email: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        if [login, email, password].iter().any(|i| i.is_empty()) {
            return Ok(false);
        }
        let password_hash = ArgonHash::new(password).await?;
        let query = r"
INSERT INTO
    users (login, email, password)
VALUES
    (?, ?, ?)";
        match sqlx::query(query)
            .bind(login)
            .bind(email)
            .bind(password_hash.as_str())
            .execute(db)
            .await
        {
            Ok(_) => Ok(true),
            Err(sqlx::Error::Database(e)) if !matches!(e.kind(), ErrorKind::Other) => {
                tracing::debug!("register_user constraint: {e}");
                Ok(false)
            }
            Err(e) => Err(AppError::SqlxError(e)),
        }
    }

    /// True only if login matches a row exactly, and the password verifies against that rows hash
    pub async fn check_user_exists(
        db: &SqlitePool,
        login: &str,
        password: &str,
    ) -> Result<bool, AppError> {
        if login.is_empty() || password.is_empty() {
            return Ok(false);
        }
        let Some(user) = Self::get(db, login).await? else {
            return Ok(false);
        };
        match ArgonHash::try_from(user.password) {
            Ok(password_hash) => password_hash.verify_password(password).await,
            Err(e) => {
                tracing::warn!("user_id {}: {e}", user.user_id);
                Ok(false)
            }
        }
    }

    pub async fn check_login_exists(db: &SqlitePool, login: &str) -> Result<bool, AppError> {
        let query = "SELECT EXISTS(SELECT 1 FROM users WHERE login = ?)";
        Ok(sqlx::query_scalar::<_, bool>(query)
            .bind(login)
            .fetch_one(db)
            .await?)
    }

    pub async fn check_email_exists(db: &SqlitePool, email: &str) -> Result<bool, AppError> {
        let query = "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)";
        Ok(sqlx::query_scalar::<_, bool>(query)
            .bind(email)
            .fetch_one(db)
            .await?)
    }
}
