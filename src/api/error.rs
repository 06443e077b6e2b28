use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

/// Errors returned by the REST handlers, rendered as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    /// Upstream request failed. The cause stays in the logs; clients only
    /// see which resource could not be fetched.
    #[error("failed to fetch {what}")]
    Upstream {
        what: &'static str,
        cause: anyhow::Error,
    },
}

impl ApiError {
    /// `map_err` adapter tagging an upstream failure with the resource name.
    pub fn upstream(what: &'static str) -> impl FnOnce(anyhow::Error) -> Self {
        move |cause| Self::Upstream { what, cause }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Upstream { what, cause } = &self {
            error!(what, error = %format!("{cause:#}"), "upstream request failed");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_maps_to_500() {
        let err = ApiError::upstream("news")(anyhow::anyhow!("connection refused"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "failed to fetch news");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let resp = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
