pub mod request {
    use crate::modules::auth::middleware::Auth;
    use axum_typed_multipart::{FieldData, TryFromMultipart};
    use bytes::Bytes;

    // Missing fields are reported by the service, not the extractor.
    #[derive(TryFromMultipart)]
    pub struct Body {
        pub name: Option<String>,
        #[form_data(limit = "10MiB")]
        pub avatar: Option<FieldData<Bytes>>,
    }

    pub struct Payload {
        pub body: Body,
        pub auth: Auth,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    pub enum Success {
        ShopCreated,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::ShopCreated => (
                    StatusCode::OK,
                    Json(json!({
                        "isSuccess": true,
                        "message": "Shop created successfully"
                    })),
                )
                    .into_response(),
            }
        }
    }

    #[derive(Debug, PartialEq)]
    pub enum Error {
        MissingFields,
        NameContainsSpaces,
        InvalidAvatarType,
        NameAlreadyExists,
        FailedToCreateShop,
    }

    impl Error {
        pub fn message(&self) -> &'static str {
            match self {
                Self::MissingFields => "Please fill in all fields",
                Self::NameContainsSpaces => "Shop name cannot contain spaces",
                Self::InvalidAvatarType => "Avatar must have a valid file type",
                Self::NameAlreadyExists => "Shop name already exists",
                Self::FailedToCreateShop => "Error creating new shop",
            }
        }
    }

    // Failures travel as 200s; clients branch on `isSuccess`.
    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            (
                StatusCode::OK,
                Json(json!({
                    "isSuccess": false,
                    "message": self.message()
                })),
            )
                .into_response()
        }
    }

    pub type Response = Result<Success, Error>;
}
