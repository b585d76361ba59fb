pub mod auth;
pub mod product;
pub mod shop;
pub mod user;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new().nest("/shop", shop::get_router())
}
