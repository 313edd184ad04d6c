use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// Caller role. Stored as text in the `users.role` column and carried in
/// JWT claims; unknown strings are rejected at parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model - SQL persistence layer
///
/// The latest issued token pair is stored on the row and replaced on every
/// login.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub role: String,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// Find user by email
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a user with this email already exists
    pub async fn email_exists(email: &str, pool: &PgPool) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await
    }

    /// Insert new user
    pub async fn insert(&self, pool: &PgPool) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (id, email, first_name, last_name, password_hash, role)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(self.id)
        .bind(&self.email)
        .bind(&self.first_name)
        .bind(&self.last_name)
        .bind(&self.password_hash)
        .bind(&self.role)
        .fetch_one(pool)
        .await
    }

    /// Store the latest issued token pair on the user row
    pub async fn store_tokens(
        id: Uuid,
        token: &str,
        refresh_token: &str,
        pool: &PgPool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE users SET token = $2, refresh_token = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(token)
        .bind(refresh_token)
        .execute(pool)
        .await?;

        Ok(())
    }
}
