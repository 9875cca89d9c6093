use reqwest::{Client, Method};
use url::Url;

use crate::{
    Error,
    error::Result,
};

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().build().map_err(|e| {
            Error::State(format!("Http error: creating client error {}", e))
        })?;

        Ok(Self { client })
    }

    pub async fn get(&self, url: &Url) -> Result<Vec<u8>> {
        self.fetch(url, Method::GET, None, None).await
    }

    // One network round trip per call, no retries, no caching. Callers
    // wanting retry or backoff must layer it on top.
    pub async fn fetch(&self,
        url: &Url,
        method: Method,
        headers: Option<&[(&str, &str)]>,
        body: Option<Vec<u8>>
    ) -> Result<Vec<u8>> {
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(headers) = headers {
            for (name, value) in headers {
                request = request.header(*name, *value);
            }
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let rsp = request.send().await.map_err(|e| {
            Error::Transport(format!("Http error: sending request to {} error {}", url, e))
        })?;

        let status = rsp.status();
        if !status.is_success() {
            return Err(Error::Server(format!("Http error: {} {} responded {}", method, url, status)));
        }

        let bytes = rsp.bytes().await.map_err(|e| {
            Error::Transport(format!("Http error: reading response body from {} error {}", url, e))
        })?;

        Ok(bytes.to_vec())
    }
}
