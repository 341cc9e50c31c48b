use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::JsonApiError;

/// JSON body whose rejections render as `JsonApiError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(JsonApiError))]
pub struct ApiJson<T>(pub T);

/// Query string whose rejections render as `JsonApiError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(JsonApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters whose rejections render as `JsonApiError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(JsonApiError))]
pub struct ApiPath<T>(pub T);
