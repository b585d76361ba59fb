use crate::utils::database;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub owner_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

impl Shop {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

pub struct CreateShopPayload {
    pub name: String,
    pub avatar: String,
    pub owner_id: String,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    DuplicateName,
    UnexpectedError,
}

#[async_trait]
pub trait ShopRepository: Send + Sync {
    /// Inserts a shop. Fails with [`Error::DuplicateName`] when the name is
    /// already taken, no matter what an earlier lookup reported.
    async fn create(&self, payload: CreateShopPayload) -> Result<Shop>;

    async fn find_by_id(&self, id: String) -> Result<Option<Shop>>;

    async fn find_by_name(&self, name: String) -> Result<Option<Shop>>;

    async fn delete_by_id(&self, id: String) -> Result<()>;
}

pub struct PgShopRepository {
    pool: PgPool,
}

impl PgShopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShopRepository for PgShopRepository {
    async fn create(&self, payload: CreateShopPayload) -> Result<Shop> {
        sqlx::query_as::<_, Shop>(
            "
            INSERT INTO shops (
                id,
                name,
                avatar,
                owner_id
            )
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(Ulid::new().to_string())
        .bind(&payload.name)
        .bind(&payload.avatar)
        .bind(&payload.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| {
            if database::is_unique_violation(&err) {
                tracing::warn!("Shop name {} was taken concurrently", payload.name);
                return Error::DuplicateName;
            }

            tracing::error!("Error occurred while trying to create a shop: {}", err);
            Error::UnexpectedError
        })
    }

    async fn find_by_id(&self, id: String) -> Result<Option<Shop>> {
        sqlx::query_as::<_, Shop>("SELECT * FROM shops WHERE id = $1")
            .bind(&id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!("Error occurred while fetching shop with id {}: {}", id, err);
                Error::UnexpectedError
            })
    }

    async fn find_by_name(&self, name: String) -> Result<Option<Shop>> {
        sqlx::query_as::<_, Shop>("SELECT * FROM shops WHERE name = $1")
            .bind(&name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                tracing::error!(
                    "Error occurred while fetching shop with name {}: {}",
                    name,
                    err
                );
                Error::UnexpectedError
            })
    }

    async fn delete_by_id(&self, id: String) -> Result<()> {
        sqlx::query("DELETE FROM shops WHERE id = $1")
            .bind(&id)
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|err| {
                tracing::error!("Error occurred while deleting shop with id {}: {}", id, err);
                Error::UnexpectedError
            })
    }
}
