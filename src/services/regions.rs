use crate::errors::ServiceError;
use serde_json::Value;
use tracing::instrument;

/// Proxy over the public regional-data API. Responses are passed through
/// with the geo-coordinate and place-id noise stripped from each item.
#[derive(Clone)]
pub struct RegionService {
    http: reqwest::Client,
    base_url: String,
}

const STRIPPED_KEYS: [&str; 2] = ["coordinates", "google_place_id"];

impl RegionService {
    pub fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    #[instrument(skip(self))]
    pub async fn provinces(&self) -> Result<Vec<Value>, ServiceError> {
        self.fetch("provinces.json").await
    }

    #[instrument(skip(self))]
    pub async fn regencies(&self, code: &str) -> Result<Vec<Value>, ServiceError> {
        self.fetch(&format!("regencies/{code}.json")).await
    }

    #[instrument(skip(self))]
    pub async fn districts(&self, code: &str) -> Result<Vec<Value>, ServiceError> {
        self.fetch(&format!("districts/{code}.json")).await
    }

    async fn fetch(&self, path: &str) -> Result<Vec<Value>, ServiceError> {
        let url = format!("{}/{}", self.base_url, path);
        let body: Value = self.http.get(&url).send().await?.json().await?;

        let items = body
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Ok(items.into_iter().map(strip_geo_keys).collect())
    }
}

fn strip_geo_keys(mut item: Value) -> Value {
    if let Some(map) = item.as_object_mut() {
        for key in STRIPPED_KEYS {
            map.remove(key);
        }
    }
    item
}
