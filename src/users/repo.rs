use std::sync::Mutex;

use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use thiserror::Error;

/// One row of the `users` table. The table also carries a nullable
/// `phone_number` column from a later migration that nothing reads yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub profile_picture: Option<String>,
}

#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub profile_picture: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("email {0} is already taken")]
    EmailTaken(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

/// Persistence seam for the `User` entity. Every operation is a single-row,
/// single-statement unit of work; `update` and `delete` are silent no-ops
/// when the id does not exist.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, StoreError>;
    async fn get(&self, id: i32) -> Result<Option<User>, StoreError>;
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;
    async fn update(&self, id: i32, name: &str, email: &str) -> Result<(), StoreError>;
    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, profile_picture
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get(&self, id: i32) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, profile_picture
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, profile_picture)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, profile_picture
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.profile_picture)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .map_or(false, |db| db.is_unique_violation())
            {
                StoreError::EmailTaken(user.email.clone())
            } else {
                StoreError::Db(e)
            }
        })?;
        Ok(created)
    }

    async fn update(&self, id: i32, name: &str, email: &str) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $2, email = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        sqlx::query(r#"DELETE FROM users WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

/// In-memory store backing `AppState::fake()`. Ids are assigned from a
/// monotonic counter and never reused, matching the database sequence.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    rows: Vec<User>,
    last_id: i32,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.inner.lock().expect("user store lock").rows.clone())
    }

    async fn get(&self, id: i32) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().expect("user store lock");
        Ok(inner.rows.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().expect("user store lock");
        if inner.rows.iter().any(|u| u.email == user.email) {
            return Err(StoreError::EmailTaken(user.email));
        }
        inner.last_id += 1;
        let created = User {
            id: inner.last_id,
            name: user.name,
            email: user.email,
            profile_picture: user.profile_picture,
        };
        inner.rows.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, name: &str, email: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("user store lock");
        if let Some(row) = inner.rows.iter_mut().find(|u| u.id == id) {
            row.name = name.to_string();
            row.email = email.to_string();
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("user store lock");
        inner.rows.retain(|u| u.id != id);
        Ok(())
    }
}
