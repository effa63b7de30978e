mod catalog;
mod collection;
mod config;
mod error;
mod filter;
mod models;
mod routes;
mod sort;
mod templates;
#[cfg(test)]
mod testing;
mod tmdb;

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    catalog::{Catalog, CatalogSettings},
    collection::RestCollection,
    config::Config,
    tmdb::TmdbClient,
};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt().with_env_filter(config.log_filter.as_str()).init();

    let http = wreq::Client::builder().timeout(config.http_timeout).build()?;

    let collection = RestCollection::new(http.clone(), config.movies_api_url.clone());
    let tmdb = TmdbClient::new(
        http,
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
    );
    let catalog = Catalog::new(
        Arc::new(collection),
        Arc::new(tmdb),
        CatalogSettings {
            image_base: config.tmdb_image_base.clone(),
            no_poster: config.no_poster_sentinel.clone(),
        },
    );

    let state = Arc::new(AppState { catalog: Arc::new(catalog) });

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, movies = %config.movies_api_url, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/movies", get(routes::list).post(routes::create))
        .route("/movies/new", get(routes::add_form))
        .route("/movies/{id}", get(routes::details))
        .route("/movies/{id}/edit", get(routes::edit_form).post(routes::submit_edit))
        .route("/movies/{id}/delete", get(routes::confirm_delete).post(routes::delete))
        .route("/cards", get(routes::cards))
        .route("/dialog/close", get(routes::close_dialog))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
