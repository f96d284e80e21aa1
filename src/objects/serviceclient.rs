use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Response};
use serde::Serialize;

use crate::objects::product::Product;

/// HTTP client for the objects REST resource.
///
/// One instance owns the underlying connection pool and is meant to be built
/// once and shared by reference for the whole run.
pub struct ServiceClient {
    client: Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a new client for the given collection URL.
    pub fn new(base_url: &str) -> Result<Self, String> {
        Self::from_builder(base_url, Client::builder())
    }

    /// Create a client from a preconfigured transport builder. The JSON
    /// `Accept` header is always added.
    pub fn from_builder(base_url: &str, builder: ClientBuilder) -> Result<Self, String> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = builder
            .default_headers(headers)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the object collection, used for creation.
    pub fn collection_url(&self) -> &str {
        &self.base_url
    }

    /// URL of a single object.
    pub fn object_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(id))
    }

    /// Retrieve a single object. Returns `None` on a non-success status.
    pub async fn fetch(&self, url: &str) -> Result<Option<Product>, String> {
        log::debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        read_product("GET", resp).await
    }

    /// Create an object. The returned product carries the server-assigned id.
    pub async fn create(&self, url: &str, product: &Product) -> Result<Option<Product>, String> {
        log::debug!("POST {}", url);

        let resp = self
            .client
            .post(url)
            .json(product)
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        read_product("POST", resp).await
    }

    /// Replace an object with the full representation in `product`.
    pub async fn update(&self, url: &str, product: &Product) -> Result<Option<Product>, String> {
        log::debug!("PUT {}", url);

        let resp = self
            .client
            .put(url)
            .json(product)
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        read_product("PUT", resp).await
    }

    /// Merge an arbitrary partial body into an object.
    pub async fn partial_update<T>(&self, url: &str, patch: &T) -> Result<Option<Product>, String>
    where
        T: Serialize + ?Sized,
    {
        log::debug!("PATCH {}", url);

        let resp = self
            .client
            .patch(url)
            .json(patch)
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        read_product("PATCH", resp).await
    }

    /// Delete an object. Returns whether the service reported success.
    pub async fn delete(&self, url: &str) -> Result<bool, String> {
        log::debug!("DELETE {}", url);

        let resp = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        if !is_success("DELETE", &resp) {
            return Ok(false);
        }

        log::info!("Product deleted successfully.");
        Ok(true)
    }
}

/// Check the status and log a diagnostic when it is not 2xx.
fn is_success(verb: &str, resp: &Response) -> bool {
    let status = resp.status();
    if status.is_success() {
        return true;
    }

    log::warn!(
        "{} error: {} - {}",
        verb,
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );
    false
}

async fn read_product(verb: &str, resp: Response) -> Result<Option<Product>, String> {
    if !is_success(verb, &resp) {
        return Ok(None);
    }

    let product = resp
        .json::<Product>()
        .await
        .map_err(|e| format!("Failed to parse JSON: {e}"))?;

    Ok(Some(product))
}
