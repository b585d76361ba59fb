use crate::{
    modules::{
        auth::repository::{PgSessionRepository, SessionRepository},
        product::repository::{PgProductRepository, ProductRepository},
        shop::repository::{PgShopRepository, ShopRepository},
        user::repository::{PgUserRepository, UserRepository},
    },
    utils::{
        database,
        storage::{LocalStorage, Storage},
    },
};
use async_trait::async_trait;
use std::{env, fmt, path::PathBuf, sync::Arc};

pub const SHOP_IMAGES_DIR: &str = "shopImages";

#[derive(Clone, Debug, PartialEq)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Debug)]
pub enum Error {
    MissingVariable(&'static str),
    InvalidPort(String),
    DatabaseUnavailable,
    MigrationFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariable(name) => write!(f, "{} not set", name),
            Self::InvalidPort(port) => write!(f, "Invalid PORT number: {}", port),
            Self::DatabaseUnavailable => write!(f, "Failed to connect to the database"),
            Self::MigrationFailed => write!(f, "Failed to run database migrations"),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
    pub public_dir: PathBuf,
}

/// Everything a request handler may touch.
#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub users: Arc<dyn UserRepository>,
    pub shops: Arc<dyn ShopRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub storage: Arc<dyn Storage>,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
    pub public_dir: PathBuf,
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| Error::MissingVariable("DATABASE_URL"))?;
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let raw_port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        let port = raw_port
            .parse::<u32>()
            .map_err(|_| Error::InvalidPort(raw_port.clone()))?;
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let public_dir = env::var("PUBLIC_DIR").unwrap_or_else(|_| "public".to_string());

        Ok(Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
                public_dir: PathBuf::from(public_dir),
            },
        })
    }
}

impl AppConfig {
    pub fn into_context(self) -> AppContext {
        AppContext {
            host: self.host,
            environment: self.environment,
            port: self.port,
            url: self.url,
            public_dir: self.public_dir,
        }
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Result<Context, Error>;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Result<Context, Error> {
        let db_conn = database::connect(self.database.url.as_str()).await?;
        database::migrate(&db_conn).await?;

        let shop_images = self.app.public_dir.join(SHOP_IMAGES_DIR);

        Ok(Context {
            app: self.app.into_context(),
            users: Arc::new(PgUserRepository::new(db_conn.pool.clone())),
            shops: Arc::new(PgShopRepository::new(db_conn.pool.clone())),
            products: Arc::new(PgProductRepository::new(db_conn.pool.clone())),
            sessions: Arc::new(PgSessionRepository::new(db_conn.pool.clone())),
            storage: Arc::new(LocalStorage::new(shop_images)),
        })
    }
}
