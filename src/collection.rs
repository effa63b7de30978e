use async_trait::async_trait;
use tracing::debug;
use wreq::header::{CONTENT_TYPE, HeaderValue};

use crate::{
    error::{CatalogError, CatalogResult},
    models::Movie,
};

/// The remote REST resource that owns the movie list.
#[async_trait]
pub trait MovieCollection: Send + Sync {
    async fn list(&self) -> CatalogResult<Vec<Movie>>;
    async fn create(&self, movie: &Movie) -> CatalogResult<()>;
    async fn replace(&self, movie: &Movie) -> CatalogResult<()>;
    async fn remove(&self, id: u64) -> CatalogResult<()>;
}

pub struct RestCollection {
    client: wreq::Client,
    base_url: String,
}

impl RestCollection {
    pub fn new(client: wreq::Client, base_url: String) -> Self {
        Self { client, base_url: base_url.trim_end_matches('/').to_string() }
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn send(
        &self,
        method: &'static str,
        url: String,
        req: wreq::RequestBuilder,
    ) -> CatalogResult<wreq::Response> {
        debug!(method, url = %url, "movie service request");
        let resp = req.header(CONTENT_TYPE, HeaderValue::from_static("application/json")).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status { method, url, status: status.as_u16() });
        }
        Ok(resp)
    }
}

#[async_trait]
impl MovieCollection for RestCollection {
    async fn list(&self) -> CatalogResult<Vec<Movie>> {
        let url = self.base_url.clone();
        let resp = self.send("GET", url.clone(), self.client.get(&url)).await?;
        let body = resp.bytes().await?;
        let movies: Vec<Movie> =
            serde_json::from_slice(&body).map_err(|source| CatalogError::Decode { url, source })?;
        debug!(count = movies.len(), "fetched movies");
        Ok(movies)
    }

    async fn create(&self, movie: &Movie) -> CatalogResult<()> {
        let url = self.base_url.clone();
        self.send("POST", url.clone(), self.client.post(&url).json(movie)).await?;
        Ok(())
    }

    async fn replace(&self, movie: &Movie) -> CatalogResult<()> {
        let url = self.item_url(movie.id);
        self.send("PUT", url.clone(), self.client.put(&url).json(movie)).await?;
        Ok(())
    }

    async fn remove(&self, id: u64) -> CatalogResult<()> {
        let url = self.item_url(id);
        self.send("DELETE", url.clone(), self.client.delete(&url)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        extract::{Path, State},
        http::{HeaderMap, StatusCode},
        routing::{get, put},
    };
    use serde_json::{Value, json};

    use super::*;

    type Rows = Arc<Mutex<Vec<Value>>>;

    async fn list(State(rows): State<Rows>) -> Json<Vec<Value>> {
        Json(rows.lock().unwrap().clone())
    }

    async fn create(
        State(rows): State<Rows>,
        headers: HeaderMap,
        Json(row): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        assert_eq!(headers[axum::http::header::CONTENT_TYPE], "application/json");
        rows.lock().unwrap().push(row.clone());
        (StatusCode::CREATED, Json(row))
    }

    async fn replace(
        State(rows): State<Rows>,
        Path(id): Path<u64>,
        Json(row): Json<Value>,
    ) -> Result<Json<Value>, StatusCode> {
        let mut rows = rows.lock().unwrap();
        let slot = rows.iter_mut().find(|r| r["id"] == json!(id)).ok_or(StatusCode::NOT_FOUND)?;
        *slot = row.clone();
        Ok(Json(row))
    }

    async fn remove(State(rows): State<Rows>, Path(id): Path<u64>) -> StatusCode {
        let mut rows = rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r["id"] != json!(id));
        if rows.len() == before { StatusCode::NOT_FOUND } else { StatusCode::OK }
    }

    async fn serve(rows: Rows) -> String {
        let app = Router::new()
            .route("/movies", get(list).post(create))
            .route("/movies/{id}", put(replace).delete(remove))
            .with_state(rows);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}/movies/")
    }

    fn client() -> wreq::Client {
        wreq::Client::builder().build().unwrap()
    }

    #[tokio::test]
    async fn round_trips_through_a_json_rest_resource() {
        let rows: Rows = Arc::new(Mutex::new(vec![json!({
            "id": 1, "title": "Alien", "rating": "5", "genre": "Horror, Sci-Fi"
        })]));
        let collection = RestCollection::new(client(), serve(rows.clone()).await);

        let movies = collection.list().await.unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].genre, vec!["Horror", "Sci-Fi"]);

        let heat = Movie { id: 2, title: "Heat".into(), rating: 4, ..Default::default() };
        collection.create(&heat).await.unwrap();

        let mut alien = movies[0].clone();
        alien.rating = 3;
        collection.replace(&alien).await.unwrap();

        collection.remove(2).await.unwrap();

        let movies = collection.list().await.unwrap();
        assert_eq!(movies.iter().map(|m| (m.id, m.rating)).collect::<Vec<_>>(), vec![(1, 3)]);
        assert_eq!(rows.lock().unwrap()[0]["genre"], json!(["Horror", "Sci-Fi"]));
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let collection =
            RestCollection::new(client(), serve(Arc::new(Mutex::new(Vec::new()))).await);
        let err = collection.remove(9).await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { method: "DELETE", status: 404, .. }));
    }

    #[tokio::test]
    async fn garbage_body_is_a_decode_error() {
        let rows: Rows = Arc::new(Mutex::new(vec![json!({ "title": "no id" })]));
        let collection = RestCollection::new(client(), serve(rows).await);
        assert!(matches!(collection.list().await, Err(CatalogError::Decode { .. })));
    }
}
