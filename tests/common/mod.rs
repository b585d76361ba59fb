#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use bytes::Bytes;
use chrono::{Duration, NaiveDateTime, Utc};
use serde_json::Value;
use shophut_backend_rs::{
    app,
    modules::{
        auth::repository::{self as session_repository, Session, SessionRepository},
        product::repository::{self as product_repository, Product, ProductRepository},
        shop::repository::{self as shop_repository, CreateShopPayload, Shop, ShopRepository},
        user::repository::{self as user_repository, User, UserRepository},
    },
    types::{AppContext, AppEnvironment, Context, SHOP_IMAGES_DIR},
    utils::storage::{self, LocalStorage, Storage},
};
use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};
use tempfile::TempDir;
use tower::util::ServiceExt;
use ulid::Ulid;

pub const ALICE_TOKEN: &str = "alice-access-token";
pub const BOB_TOKEN: &str = "bob-access-token";
pub const EXPIRED_TOKEN: &str = "expired-access-token";

const BOUNDARY: &str = "shophut-test-boundary";

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn user(email: &str) -> User {
    User {
        id: Ulid::new().to_string(),
        email: email.to_string(),
        first_name: String::from("Test"),
        last_name: String::from("User"),
        is_seller: false,
        created_at: now(),
        updated_at: None,
    }
}

#[derive(Default)]
pub struct InMemoryUsers {
    pub users: Mutex<Vec<User>>,
    pub fail_updates: bool,
}

impl InMemoryUsers {
    pub fn get(&self, id: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: String) -> Result<Option<User>, user_repository::Error> {
        Ok(self.get(&id))
    }

    async fn mark_as_seller(&self, id: String) -> Result<(), user_repository::Error> {
        if self.fail_updates {
            return Err(user_repository::Error::UnexpectedError);
        }

        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or(user_repository::Error::NotFound)?;
        user.is_seller = true;
        user.updated_at = Some(now());

        Ok(())
    }
}

/// Enforces name uniqueness on insert the way the database index does.
#[derive(Default)]
pub struct InMemoryShops {
    pub shops: Mutex<Vec<Shop>>,
    /// Makes `find_by_name` miss, as if a concurrent request inserted the
    /// same name between the lookup and the insert.
    pub stale_lookups: bool,
    pub fail_creates: bool,
    pub fail_deletes: bool,
}

impl InMemoryShops {
    pub fn all(&self) -> Vec<Shop> {
        self.shops.lock().unwrap().clone()
    }

    pub fn seed(&self, name: &str, owner_id: &str) -> Shop {
        let shop = Shop {
            id: Ulid::new().to_string(),
            name: name.to_string(),
            avatar: String::from("seeded.png"),
            owner_id: owner_id.to_string(),
            created_at: now(),
            updated_at: None,
        };
        self.shops.lock().unwrap().push(shop.clone());
        shop
    }
}

#[async_trait]
impl ShopRepository for InMemoryShops {
    async fn create(&self, payload: CreateShopPayload) -> Result<Shop, shop_repository::Error> {
        if self.fail_creates {
            return Err(shop_repository::Error::UnexpectedError);
        }

        let mut shops = self.shops.lock().unwrap();

        if shops.iter().any(|shop| shop.name == payload.name) {
            return Err(shop_repository::Error::DuplicateName);
        }

        let shop = Shop {
            id: Ulid::new().to_string(),
            name: payload.name,
            avatar: payload.avatar,
            owner_id: payload.owner_id,
            created_at: now(),
            updated_at: None,
        };
        shops.push(shop.clone());

        Ok(shop)
    }

    async fn find_by_id(&self, id: String) -> Result<Option<Shop>, shop_repository::Error> {
        Ok(self.all().into_iter().find(|shop| shop.id == id))
    }

    async fn find_by_name(&self, name: String) -> Result<Option<Shop>, shop_repository::Error> {
        if self.stale_lookups {
            return Ok(None);
        }

        Ok(self.all().into_iter().find(|shop| shop.name == name))
    }

    async fn delete_by_id(&self, id: String) -> Result<(), shop_repository::Error> {
        if self.fail_deletes {
            return Err(shop_repository::Error::UnexpectedError);
        }

        self.shops.lock().unwrap().retain(|shop| shop.id != id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryProducts {
    pub products: Mutex<Vec<Product>>,
}

impl InMemoryProducts {
    pub fn seed(&self, name: &str, price: &str, shop_id: &str) -> Product {
        use sqlx::types::BigDecimal;
        use std::str::FromStr;

        let product = Product {
            id: Ulid::new().to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            price: BigDecimal::from_str(price).unwrap(),
            image: None,
            shop_id: shop_id.to_string(),
            created_at: now(),
            updated_at: None,
        };
        self.products.lock().unwrap().push(product.clone());
        product
    }
}

#[async_trait]
impl ProductRepository for InMemoryProducts {
    async fn find_many_by_shop_id(
        &self,
        shop_id: String,
    ) -> Result<Vec<Product>, product_repository::Error> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|product| product.shop_id == shop_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemorySessions {
    pub sessions: Vec<Session>,
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn find_by_access_token(
        &self,
        access_token: String,
    ) -> Result<Option<Session>, session_repository::Error> {
        Ok(self
            .sessions
            .iter()
            .find(|session| session.access_token == access_token)
            .cloned())
    }
}

pub struct FailingStorage;

#[async_trait]
impl Storage for FailingStorage {
    async fn put(&self, _: &str, _: Bytes) -> Result<(), storage::Error> {
        Err(storage::Error::UploadFailed)
    }

    async fn remove(&self, _: &str) -> Result<(), storage::Error> {
        Err(storage::Error::DeleteFailed)
    }
}

fn session(user: &User, access_token: &str, expires_at: NaiveDateTime) -> Session {
    Session {
        id: Ulid::new().to_string(),
        user_id: user.id.clone(),
        access_token: access_token.to_string(),
        access_token_expires_at: expires_at,
        created_at: now(),
    }
}

#[derive(Default)]
pub struct Options {
    pub stale_lookups: bool,
    pub fail_shop_creates: bool,
    pub fail_shop_deletes: bool,
    pub fail_user_updates: bool,
    pub failing_storage: bool,
}

pub struct TestApp {
    pub router: Router,
    pub alice: User,
    pub bob: User,
    pub users: Arc<InMemoryUsers>,
    pub shops: Arc<InMemoryShops>,
    pub products: Arc<InMemoryProducts>,
    pub public_dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        let alice = user("alice@example.com");
        let bob = user("bob@example.com");

        let users = Arc::new(InMemoryUsers {
            users: Mutex::new(vec![alice.clone(), bob.clone()]),
            fail_updates: options.fail_user_updates,
        });
        let shops = Arc::new(InMemoryShops {
            stale_lookups: options.stale_lookups,
            fail_creates: options.fail_shop_creates,
            fail_deletes: options.fail_shop_deletes,
            ..Default::default()
        });
        let products = Arc::new(InMemoryProducts::default());
        let sessions = Arc::new(InMemorySessions {
            sessions: vec![
                session(&alice, ALICE_TOKEN, now() + Duration::hours(1)),
                session(&bob, BOB_TOKEN, now() + Duration::hours(1)),
                session(&bob, EXPIRED_TOKEN, now() - Duration::hours(1)),
            ],
        });

        let public_dir = tempfile::tempdir().unwrap();
        let storage: Arc<dyn Storage> = if options.failing_storage {
            Arc::new(FailingStorage)
        } else {
            Arc::new(LocalStorage::new(public_dir.path().join(SHOP_IMAGES_DIR)))
        };

        let ctx = Arc::new(Context {
            app: AppContext {
                host: String::from("127.0.0.1"),
                environment: AppEnvironment::Development,
                port: 8000,
                url: String::from("http://127.0.0.1:8000"),
                public_dir: public_dir.path().to_path_buf(),
            },
            users: users.clone(),
            shops: shops.clone(),
            products: products.clone(),
            sessions,
            storage,
        });

        Self {
            router: app::router(ctx),
            alice,
            bob,
            users,
            shops,
            products,
            public_dir,
        }
    }

    pub fn shop_images_dir(&self) -> PathBuf {
        self.public_dir.path().join(SHOP_IMAGES_DIR)
    }

    pub fn stored_avatars(&self) -> Vec<String> {
        match std::fs::read_dir(self.shop_images_dir()) {
            Ok(entries) => entries
                .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => vec![],
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub struct Avatar<'a> {
    pub content_type: &'a str,
    pub contents: &'a [u8],
}

pub const PNG: Avatar<'static> = Avatar {
    content_type: "image/png",
    contents: b"\x89PNG\r\n\x1a\nfake-image",
};

pub fn multipart_body(name: Option<&str>, avatar: Option<Avatar>) -> Vec<u8> {
    let mut body: Vec<u8> = vec![];

    if let Some(name) = name {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n{}\r\n",
                BOUNDARY, name
            )
            .as_bytes(),
        );
    }

    if let Some(avatar) = avatar {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"avatar\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, avatar.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(avatar.contents);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn create_shop_request(
    token: Option<&str>,
    name: Option<&str>,
    avatar: Option<Avatar>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/shop/create")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder
        .body(Body::from(multipart_body(name, avatar)))
        .unwrap()
}

pub fn shop_details_request(token: Option<&str>, query: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("GET")
        .uri(format!("/api/shop/details{}", query));

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder.body(Body::empty()).unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
