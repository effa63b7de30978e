use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicU64, Ordering},
    },
};

use tracing::{debug, info, warn};

use crate::{
    collection::MovieCollection,
    error::{CatalogError, CatalogResult},
    models::{Movie, MovieEdit, NewMovie, split_list},
    sort::SortSpec,
    tmdb::MetadataSearch,
};

/// Poster value some records carry when a lookup produced nothing.
const PLACEHOLDER_POSTER: &str = "N/A";

#[derive(Clone, Debug)]
pub struct CatalogSettings {
    pub image_base: String,
    pub no_poster: String,
}

/// The list most recently handed out for rendering, keyed by card.
#[derive(Default)]
struct View {
    ticket: u64,
    sort: SortSpec,
    movies: Vec<Movie>,
    cards: HashMap<u64, Movie>,
}

pub struct Catalog {
    collection: Arc<dyn MovieCollection>,
    metadata: Arc<dyn MetadataSearch>,
    settings: CatalogSettings,
    tickets: AtomicU64,
    view: RwLock<View>,
}

impl Catalog {
    pub fn new(
        collection: Arc<dyn MovieCollection>,
        metadata: Arc<dyn MetadataSearch>,
        settings: CatalogSettings,
    ) -> Self {
        Self {
            collection,
            metadata,
            settings,
            tickets: AtomicU64::new(0),
            view: RwLock::new(View::default()),
        }
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub fn sort(&self) -> SortSpec {
        self.read().sort
    }

    /// Movies as last rendered, in display order.
    pub fn rendered(&self) -> Vec<Movie> {
        self.read().movies.clone()
    }

    /// The record behind a rendered card. Never re-fetched.
    pub fn lookup(&self, id: u64) -> CatalogResult<Movie> {
        self.read().cards.get(&id).cloned().ok_or(CatalogError::UnknownCard(id))
    }

    /// Fetches the whole collection, orders it and installs it as the rendered
    /// list. A refresh that finishes after a newer one has been installed is
    /// dropped and the newer list is returned instead.
    pub async fn refresh(&self, sort: Option<SortSpec>) -> CatalogResult<Vec<Movie>> {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(sort) = sort {
            debug!(field = sort.field.as_str(), order = sort.order.as_str(), "sort changed");
            self.write().sort = sort;
        }

        let mut movies = self.collection.list().await?;

        let mut view = self.write();
        if ticket < view.ticket {
            debug!(ticket, installed = view.ticket, "discarding stale refresh");
            return Ok(view.movies.clone());
        }
        view.sort.apply(&mut movies);
        view.cards = movies.iter().map(|m| (m.id, m.clone())).collect();
        view.movies = movies;
        view.ticket = ticket;
        debug!(ticket, count = view.movies.len(), "list refreshed");
        Ok(view.movies.clone())
    }

    pub async fn add_movie(&self, new: NewMovie) -> CatalogResult<Vec<Movie>> {
        debug!(title = %new.title, rating = new.rating, "add movie");

        let existing = self.collection.list().await.map_err(|err| {
            warn!(error = %err, "post aborted, id assignment failed");
            CatalogError::IdAssignment(Box::new(err))
        })?;
        let id = next_free_id(existing.iter().map(|m| m.id));

        let mut movie = Movie {
            id,
            title: new.title,
            rating: new.rating,
            genre: split_list(&new.genre),
            ..Default::default()
        };
        self.enrich(&mut movie).await;

        self.collection.create(&movie).await?;
        info!(id, title = %movie.title, "movie added");

        self.refresh(None).await
    }

    pub async fn edit_movie(&self, card: u64, edit: MovieEdit) -> CatalogResult<Vec<Movie>> {
        let original = self.lookup(card)?;
        debug!(id = original.id, "edit movie");

        let mut movie = edit.into_movie(original.id);
        self.enrich(&mut movie).await;

        self.collection.replace(&movie).await?;
        info!(id = movie.id, title = %movie.title, "movie updated");

        self.refresh(None).await
    }

    pub async fn delete_movie(&self, card: u64) -> CatalogResult<Vec<Movie>> {
        let movie = self.lookup(card)?;

        self.collection.remove(movie.id).await?;
        info!(id = movie.id, title = %movie.title, "movie deleted");

        self.refresh(None).await
    }

    /// Best-effort poster lookup. Leaves the record with either a resolved
    /// poster URL or the no-poster sentinel; never fails.
    pub async fn enrich(&self, movie: &mut Movie) {
        if !self.needs_poster(&movie.poster) {
            return;
        }

        let title = movie.title.trim().to_string();
        if title.is_empty() {
            movie.poster = self.settings.no_poster.clone();
            return;
        }

        match self.metadata.search_movie(&title).await {
            Ok(Some(hit)) => {
                if movie.plot.trim().is_empty() {
                    if let Some(overview) = &hit.overview {
                        movie.plot = overview.clone();
                    }
                }
                if movie.year.trim().is_empty() {
                    if let Some(year) = hit.release_year() {
                        movie.year = year.to_string();
                    }
                }
                if let Some(path) = hit.poster_path {
                    movie.poster = self.poster_url(&path);
                    debug!(title = %title, poster = %movie.poster, "poster resolved");
                    return;
                }
                debug!(title = %title, "first match has no poster");
            },
            Ok(None) => debug!(title = %title, "no metadata match"),
            Err(err) => warn!(title = %title, error = %err, "metadata search failed"),
        }

        movie.poster = self.settings.no_poster.clone();
    }

    fn needs_poster(&self, poster: &str) -> bool {
        let poster = poster.trim();
        poster.is_empty() || poster == PLACEHOLDER_POSTER || poster == self.settings.no_poster
    }

    fn poster_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.settings.image_base.trim_end_matches('/'),
            path.trim().trim_start_matches('/')
        )
    }

    fn read(&self) -> RwLockReadGuard<'_, View> {
        self.view.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, View> {
        self.view.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Smallest positive id not already taken.
pub fn next_free_id(ids: impl IntoIterator<Item = u64>) -> u64 {
    let taken: HashSet<u64> = ids.into_iter().collect();
    let ceiling = taken.len() as u64 + 1;
    (1..=ceiling).find(|id| !taken.contains(id)).unwrap_or(ceiling)
}
