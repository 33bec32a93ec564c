//! Success envelope.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Wraps a payload as `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    data: T,
}

impl<T: Serialize> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for Data<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `{"message": ...}` payload used by action endpoints.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Data<Self> {
        Data::new(Self {
            message: message.into(),
        })
    }
}
