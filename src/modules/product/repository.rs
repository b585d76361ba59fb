use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::{types::BigDecimal, PgPool};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub image: Option<String>,
    pub shop_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_many_by_shop_id(&self, shop_id: String) -> Result<Vec<Product>, Error>;
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_many_by_shop_id(&self, shop_id: String) -> Result<Vec<Product>, Error> {
        sqlx::query_as::<_, Product>(
            "
            SELECT
                *
            FROM
                products
            WHERE
                shop_id = $1
            ORDER BY
                created_at ASC
            ",
        )
        .bind(&shop_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching products of shop with id {}: {}",
                shop_id,
                err
            );
            Error::UnexpectedError
        })
    }
}
