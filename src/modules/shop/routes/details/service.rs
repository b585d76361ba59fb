use super::types::{request, response};
use crate::types::Context;
use std::sync::Arc;
use ulid::Ulid;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    let shop_id = payload
        .filters
        .shop_id
        .map(|shop_id| shop_id.trim().to_string())
        .filter(|shop_id| !shop_id.is_empty())
        .ok_or(response::Error::MissingShopId)?;

    // Ids are ULIDs; anything else cannot name a shop.
    if Ulid::from_string(&shop_id).is_err() {
        tracing::debug!("Rejected malformed shop id {:?}", shop_id);
        return Err(response::Error::ShopNotFound);
    }

    let shop = ctx
        .shops
        .find_by_id(shop_id)
        .await
        .map_err(|_| response::Error::FailedToFetchShop)?
        .ok_or(response::Error::ShopNotFound)?;

    let products = ctx
        .products
        .find_many_by_shop_id(shop.id.clone())
        .await
        .map_err(|_| response::Error::FailedToFetchShop)?;

    let is_owner = payload
        .auth
        .map(|auth| shop.is_owned_by(&auth.user.id))
        .unwrap_or(false);

    Ok(response::Success::Shop {
        shop,
        is_owner,
        products,
    })
}
