use super::repository::Session;
use crate::modules::user::repository::User;
use crate::types::Context;
use axum::extract::{Extension, FromRequestParts};
use axum::http::{request::Parts, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

enum Error {
    InvalidSession,
}

async fn get_session(ctx: &Context, access_token: String) -> Result<Session, Error> {
    let session = ctx
        .sessions
        .find_by_access_token(access_token)
        .await
        .map_err(|_| Error::InvalidSession)?
        .ok_or(Error::InvalidSession)?;

    if session.is_expired() {
        tracing::debug!("Rejected expired session {}", session.id);
        return Err(Error::InvalidSession);
    }

    Ok(session)
}

async fn get_user_from_token(ctx: &Context, access_token: String) -> Result<User, Error> {
    let session = get_session(ctx, access_token).await?;

    ctx.users
        .find_by_id(session.user_id)
        .await
        .map_err(|_| Error::InvalidSession)?
        .ok_or(Error::InvalidSession)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "isSuccess": false,
            "message": "Invalid session token"
        })),
    )
        .into_response()
}

/// The caller resolved from `Authorization: Bearer <access token>`.
///
/// Use `Option<Auth>` on routes where signing in is optional; any failure to
/// resolve the caller then yields `None` instead of a rejection.
#[derive(Serialize, Clone, Debug)]
pub struct Auth {
    pub user: User,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| {
                tracing::error!("Request context is missing: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            })?;

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| unauthorized())?;

        get_user_from_token(&ctx, bearer.token().to_string())
            .await
            .map(|user| Self { user })
            .map_err(|_| unauthorized())
    }
}
