use std::time::Duration;

use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};

use crate::core::Result;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON client bound to a base address.
///
/// A non-success status is reported as `Ok(None)` rather than an error;
/// only transport and decoding failures are errors.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        tracing::info!(path, "Initiating GET request");
        let response = self.client.get(self.url(path)).send().await?;

        read_json(response).await
    }

    pub async fn post<T, Y>(&self, path: &str, body: &T) -> Result<Option<Y>>
    where
        T: Serialize + ?Sized,
        Y: DeserializeOwned,
    {
        tracing::info!(path, "Initiating POST request");
        let response = self.client.post(self.url(path)).json(body).send().await?;

        read_json(response).await
    }

    pub async fn put<T, Y>(&self, path: &str, body: &T) -> Result<Option<Y>>
    where
        T: Serialize + ?Sized,
        Y: DeserializeOwned,
    {
        tracing::info!(path, "Initiating PUT request");
        let response = self.client.put(self.url(path)).json(body).send().await?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
    let status = response.status();
    if !status.is_success() {
        tracing::info!(status = %status, "Request completed with failed status code");
        return Ok(None);
    }

    tracing::info!(status = %status, "Request completed with success status code");
    let content = response.text().await?;

    Ok(Some(serde_json::from_str(&content)?))
}
