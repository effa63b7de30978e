//! In-memory stand-ins for the two remote services.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    collection::MovieCollection,
    error::{CatalogError, CatalogResult},
    models::Movie,
    tmdb::{MetadataSearch, SearchHit},
};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    List,
    Create(Movie),
    Replace(Movie),
    Remove(u64),
}

/// Parks one `list` call after it has read the rows, until released.
#[derive(Default)]
pub struct ListGate {
    pub entered: Notify,
    pub release: Notify,
}

#[derive(Default)]
pub struct MemoryCollection {
    rows: Mutex<Vec<Movie>>,
    calls: Mutex<Vec<Call>>,
    offline: AtomicBool,
    gate: Mutex<Option<Arc<ListGate>>>,
}

impl MemoryCollection {
    pub fn with(rows: Vec<Movie>) -> Self {
        Self { rows: Mutex::new(rows), ..Default::default() }
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn rows(&self) -> Vec<Movie> {
        self.rows.lock().unwrap().clone()
    }

    pub fn set_rows(&self, rows: Vec<Movie>) {
        *self.rows.lock().unwrap() = rows;
    }

    pub fn hold_next_list(&self) -> Arc<ListGate> {
        let gate = Arc::new(ListGate::default());
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    fn record(&self, call: Call, method: &'static str) -> CatalogResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.offline.load(Ordering::SeqCst) {
            return Err(CatalogError::Status { method, url: "memory://movies".into(), status: 503 });
        }
        Ok(())
    }
}

#[async_trait]
impl MovieCollection for MemoryCollection {
    async fn list(&self) -> CatalogResult<Vec<Movie>> {
        self.record(Call::List, "GET")?;
        let rows = self.rows();
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
        Ok(rows)
    }

    async fn create(&self, movie: &Movie) -> CatalogResult<()> {
        self.record(Call::Create(movie.clone()), "POST")?;
        self.rows.lock().unwrap().push(movie.clone());
        Ok(())
    }

    async fn replace(&self, movie: &Movie) -> CatalogResult<()> {
        self.record(Call::Replace(movie.clone()), "PUT")?;
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|m| m.id == movie.id) {
            Some(slot) => *slot = movie.clone(),
            None => {
                return Err(CatalogError::Status {
                    method: "PUT",
                    url: format!("memory://movies/{}", movie.id),
                    status: 404,
                });
            },
        }
        Ok(())
    }

    async fn remove(&self, id: u64) -> CatalogResult<()> {
        self.record(Call::Remove(id), "DELETE")?;
        self.rows.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }
}

/// Answers searches from a fixed title table; anything else has no results.
#[derive(Default)]
pub struct StubSearch {
    hits: HashMap<String, SearchHit>,
    queries: Mutex<Vec<String>>,
    broken: bool,
}

impl StubSearch {
    pub fn with(hits: impl IntoIterator<Item = (&'static str, SearchHit)>) -> Self {
        Self { hits: hits.into_iter().map(|(t, h)| (t.to_string(), h)).collect(), ..Default::default() }
    }

    pub fn broken() -> Self {
        Self { broken: true, ..Default::default() }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataSearch for StubSearch {
    async fn search_movie(&self, title: &str) -> CatalogResult<Option<SearchHit>> {
        self.queries.lock().unwrap().push(title.to_string());
        if self.broken {
            return Err(CatalogError::Status {
                method: "GET",
                url: "stub://search/movie".into(),
                status: 500,
            });
        }
        Ok(self.hits.get(title).cloned())
    }
}

pub fn movie(id: u64, title: &str, rating: i64) -> Movie {
    Movie { id, title: title.to_string(), rating, ..Default::default() }
}
