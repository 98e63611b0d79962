use reqwest::Client;
use sift_core::{Error, Result};
use std::future::Future;
use std::time::Duration;
use url::Url;

/// Somewhere raw resource bytes can be fetched from.
pub trait Source {
    fn fetch(&self, resource: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Fetches resources over HTTP(S).
#[derive(Clone)]
pub struct WebSource {
    client: Client,
}

impl WebSource {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(timeout)
            .build()
            .map_err(|e| Error::fetch("<client>", e))?;
        Ok(Self { client })
    }
}

impl Source for WebSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>> {
        let url = Url::parse(resource).map_err(|e| Error::fetch(resource, e))?;
        let resp = self.client.get(url).send().await.map_err(|e| Error::fetch(resource, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::fetch(resource, format!("status {status}")));
        }
        let bytes = resp.bytes().await.map_err(|e| Error::fetch(resource, e))?;
        tracing::debug!(resource, bytes = bytes.len(), "fetched");
        Ok(bytes.to_vec())
    }
}

/// Returns the same canned payload, or the same error, for every resource.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub data: Vec<u8>,
    pub error: Option<String>,
}

impl StaticSource {
    pub fn new(data: impl Into<Vec<u8>>) -> Self { Self { data: data.into(), error: None } }

    pub fn failing(reason: impl Into<String>) -> Self { Self { data: Vec::new(), error: Some(reason.into()) } }
}

impl Source for StaticSource {
    async fn fetch(&self, resource: &str) -> Result<Vec<u8>> {
        match &self.error {
            Some(reason) => Err(Error::fetch(resource, reason)),
            None => Ok(self.data.clone()),
        }
    }
}
