use axum::extract::FromRequest;

use crate::error::ApiError;

/// `Json` whose rejections come back in the same envelope as every other error
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
