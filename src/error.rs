use axum::{
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    /// The upstream could not be reached or its response could not be read.
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),
    #[error("invalid upstream origin: {0}")]
    OriginParse(#[from] url::ParseError),
    #[error("invalid upstream origin: {0}")]
    InvalidOrigin(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
