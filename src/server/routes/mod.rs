mod categories;
mod questions;
mod quizzes;

use axum::extract::{FromRequest, FromRequestParts};

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

use super::errors::ApiError;

/// JSON body whose rejection is a 422 envelope.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
struct JsonBody<T>(T);

/// Path parameters; a mismatch reads as a missing resource.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
struct PathParam<T>(T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
struct QueryParams<T>(T);
