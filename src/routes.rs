use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Form, Path, Query, State, rejection::FormRejection},
    http::HeaderValue,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    AppState,
    error::AppResult,
    models::{Movie, MovieEdit, NewMovie},
    sort::{SortField, SortOrder, SortSpec},
    templates,
};

pub async fn index() -> Html<String> {
    Html(templates::index_page())
}

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    sort: Option<SortField>,
    order: Option<SortOrder>,
}

impl SortQuery {
    /// Missing parts fall back to the current selection.
    fn resolve(&self, current: SortSpec) -> Option<SortSpec> {
        if self.sort.is_none() && self.order.is_none() {
            return None;
        }
        Some(SortSpec::new(
            self.sort.unwrap_or(current.field),
            self.order.unwrap_or(current.order),
        ))
    }
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SortQuery>,
) -> AppResult<Response> {
    let catalog = &state.catalog;
    let movies = catalog.refresh(q.resolve(catalog.sort())).await?;
    Ok(list_response(&state, &movies))
}

pub async fn add_form() -> Response {
    fragment(templates::add_form(), "#modal", "outer")
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    form: Result<Form<NewMovie>, FormRejection>,
) -> AppResult<Response> {
    let Form(new) = form.context("the new movie form could not be read")?;
    let movies = state.catalog.add_movie(new).await?;
    Ok(list_response(&state, &movies))
}

pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Response> {
    let movie = state.catalog.lookup(id)?;
    let body = templates::details_fragment(&movie, &state.catalog.settings().no_poster);
    Ok(fragment(body, &format!("#card-{id}"), "outer"))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Response> {
    debug!(id, "user edit event");
    let movie = state.catalog.lookup(id)?;
    Ok(fragment(templates::edit_form(&movie), "#modal", "outer"))
}

pub async fn submit_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    form: Result<Form<MovieEdit>, FormRejection>,
) -> AppResult<Response> {
    let Form(edit) = form.context("the edit form could not be read")?;
    let movies = state.catalog.edit_movie(id, edit).await?;
    Ok(list_response(&state, &movies))
}

pub async fn confirm_delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Response> {
    debug!(id, "user delete event");
    let movie = state.catalog.lookup(id)?;
    Ok(fragment(templates::confirm_delete(&movie), "#modal", "outer"))
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> AppResult<Response> {
    let movies = state.catalog.delete_movie(id).await?;
    Ok(list_response(&state, &movies))
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    filter: String,
}

pub async fn cards(State(state): State<Arc<AppState>>, Query(q): Query<FilterQuery>) -> Response {
    let movies = state.catalog.rendered();
    let body = templates::cards_fragment(&movies, &q.filter, &state.catalog.settings().no_poster);
    fragment(body, "#movie-display", "outer")
}

pub async fn close_dialog() -> Response {
    fragment(templates::empty_dialog(), "#modal", "outer")
}

/// The refreshed list also closes whatever dialog led to it. Both elements
/// carry their own id, so no selector is sent and each replaces its namesake.
fn list_response(state: &AppState, movies: &[Movie]) -> Response {
    let list =
        templates::list_fragment(movies, state.catalog.sort(), &state.catalog.settings().no_poster);
    let mut resp = Html(format!("{list}{}", templates::empty_dialog())).into_response();
    resp.headers_mut().insert("datastar-mode", HeaderValue::from_static("outer"));
    resp
}

fn fragment(body: String, selector: &str, mode: &'static str) -> Response {
    let mut resp = Html(body).into_response();
    target(&mut resp, selector, mode);
    resp
}

/// Tells the page where to swap a fragment in.
pub fn target(resp: &mut Response, selector: &str, mode: &'static str) {
    if let Ok(selector) = HeaderValue::from_str(selector) {
        resp.headers_mut().insert("datastar-selector", selector);
    }
    resp.headers_mut().insert("datastar-mode", HeaderValue::from_static(mode));
}
