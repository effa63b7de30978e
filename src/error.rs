use axum::response::{Html, IntoResponse, Response};

/// Failures of the catalog client and its two remote collaborators.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("request to the movie service failed: {0}")]
    Transport(#[from] wreq::Error),

    #[error("{method} {url} returned status {status}")]
    Status { method: &'static str, url: String, status: u16 },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("post aborted, id assignment failed: {0}")]
    IdAssignment(#[source] Box<CatalogError>),

    #[error("movie {0} is not on the current list")]
    UnknownCard(u64),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "request failed");
        let body = crate::templates::error_fragment(&self.to_string());
        let mut resp = Html(body).into_response();
        crate::routes::target(&mut resp, "#content", "outer");
        resp
    }
}

pub type AppResult<T> = Result<T, AppError>;
