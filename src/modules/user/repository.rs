use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_seller: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    NotFound,
    UnexpectedError,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: String) -> Result<Option<User>>;

    /// Flags the user as a seller. There is no way back.
    async fn mark_as_seller(&self, id: String) -> Result<()>;
}

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: String) -> Result<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(&id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while fetching user with id {}: {}", id, err);
                Error::UnexpectedError
            })
    }

    async fn mark_as_seller(&self, id: String) -> Result<()> {
        let result = sqlx::query(
            "
            UPDATE users
            SET
                is_seller = TRUE,
                updated_at = NOW()
            WHERE
                id = $1
            ",
        )
        .bind(&id)
        .execute(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while marking user with id {} as a seller: {}",
                id,
                err
            );
            Error::UnexpectedError
        })?;

        if result.rows_affected() == 0 {
            tracing::warn!("No user with id {} to mark as a seller", id);
            return Err(Error::NotFound);
        }

        Ok(())
    }
}
