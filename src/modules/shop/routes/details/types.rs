pub mod request {
    use crate::modules::auth::middleware::Auth;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct Filters {
        pub shop_id: Option<String>,
    }

    pub struct Payload {
        pub filters: Filters,
        pub auth: Option<Auth>,
    }
}

pub mod response {
    use crate::modules::{product::repository::Product, shop::repository::Shop};
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    pub enum Success {
        Shop {
            shop: Shop,
            is_owner: bool,
            products: Vec<Product>,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::Shop {
                    shop,
                    is_owner,
                    products,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "isSuccess": true,
                        "shop": shop,
                        "isOwner": is_owner,
                        "products": products
                    })),
                )
                    .into_response(),
            }
        }
    }

    #[derive(Debug, PartialEq)]
    pub enum Error {
        MissingShopId,
        ShopNotFound,
        FailedToFetchShop,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            let message = match self {
                Self::MissingShopId => "Please provide a shop id",
                Self::ShopNotFound => "Shop not found",
                Self::FailedToFetchShop => "Failed to fetch shop",
            };

            (
                StatusCode::OK,
                Json(json!({
                    "isSuccess": false,
                    "message": message
                })),
            )
                .into_response()
        }
    }

    pub type Response = Result<Success, Error>;
}
