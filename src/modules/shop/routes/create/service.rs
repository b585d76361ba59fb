use super::types::{request, response};
use crate::{
    modules::shop::repository::{self, CreateShopPayload},
    types::Context,
};
use std::sync::Arc;
use uuid::Uuid;

/// `image/png` -> `png`, `image/svg+xml; charset=utf-8` -> `svg+xml`.
fn extension_from_mime(mime: &str) -> Option<String> {
    let (r#type, subtype) = mime.split_once('/')?;
    let subtype = subtype.split(';').next().unwrap_or_default().trim();

    let is_valid = !r#type.trim().is_empty()
        && !subtype.is_empty()
        && subtype
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    if !is_valid {
        return None;
    }

    Some(subtype.to_ascii_lowercase())
}

async fn discard_avatar(ctx: &Context, file_name: &str) {
    if ctx.storage.remove(file_name).await.is_err() {
        tracing::error!("Left an orphaned avatar behind: {}", file_name);
    }
}

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let request::Payload { body, auth } = payload;

    let (name, avatar) = match (body.name, body.avatar) {
        (Some(name), Some(avatar)) if !name.is_empty() && !avatar.contents.is_empty() => {
            (name, avatar)
        }
        _ => return Err(response::Error::MissingFields),
    };

    if name.contains(' ') {
        return Err(response::Error::NameContainsSpaces);
    }

    let extension = avatar
        .metadata
        .content_type
        .as_deref()
        .and_then(extension_from_mime)
        .ok_or_else(|| {
            tracing::warn!(
                "Rejected avatar with content type {:?}",
                avatar.metadata.content_type
            );
            response::Error::InvalidAvatarType
        })?;

    if ctx
        .shops
        .find_by_name(name.clone())
        .await
        .map_err(|_| response::Error::FailedToCreateShop)?
        .is_some()
    {
        return Err(response::Error::NameAlreadyExists);
    }

    let file_name = format!("{}.{}", Uuid::new_v4(), extension);

    ctx.storage
        .put(&file_name, avatar.contents)
        .await
        .map_err(|err| {
            tracing::error!("Failed to store avatar {}: {:?}", file_name, err);
            response::Error::FailedToCreateShop
        })?;

    let shop = match ctx
        .shops
        .create(CreateShopPayload {
            name,
            avatar: file_name.clone(),
            owner_id: auth.user.id.clone(),
        })
        .await
    {
        Ok(shop) => shop,
        Err(err) => {
            discard_avatar(&ctx, &file_name).await;

            return Err(match err {
                repository::Error::DuplicateName => response::Error::NameAlreadyExists,
                repository::Error::UnexpectedError => response::Error::FailedToCreateShop,
            });
        }
    };

    if let Err(err) = ctx.users.mark_as_seller(auth.user.id.clone()).await {
        tracing::error!(
            "Failed to mark user {} as a seller, rolling back shop {}: {:?}",
            auth.user.id,
            shop.id,
            err
        );

        // A shop that survives the rollback keeps its avatar.
        match ctx.shops.delete_by_id(shop.id.clone()).await {
            Ok(_) => discard_avatar(&ctx, &file_name).await,
            Err(_) => tracing::error!(
                "Failed to roll back shop {}, keeping avatar {}",
                shop.id,
                file_name
            ),
        }

        return Err(response::Error::FailedToCreateShop);
    }

    tracing::info!("User {} created shop {} ({})", auth.user.id, shop.name, shop.id);

    Ok(response::Success::ShopCreated)
}
