//! HTTP seam between the provider client and the network

use async_trait::async_trait;
use log::{error, trace};

/// Status and raw body of a provider response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply
{   pub status: u16
  , pub body: String
}

impl HttpReply
{   pub fn is_success(&self) -> bool
    {   (200..300).contains(&self.status)
    }
}

/// Issues a single JSON POST. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync
{   async fn post_json(
      &self
    , url: &str
    , headers: &[(&'static str, String)]
    , body: &serde_json::Value
    ) -> Result<HttpReply, crate::error::Error>;
}

/// reqwest-backed transport; uses the client's default timeouts
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport
{   http_client: reqwest::Client
}

impl ReqwestTransport
{   pub fn new() -> Self
    {   ReqwestTransport
        {   http_client: reqwest::Client::new()
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport
{   async fn post_json(
      &self
    , url: &str
    , headers: &[(&'static str, String)]
    , body: &serde_json::Value
    ) -> Result<HttpReply, crate::error::Error>
    {   let mut request = self.http_client.post(url);
        for (name, value) in headers
        {   request = request.header(*name, value);
        }

        let response = request
          .json(body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            crate::error::Error::HttpError(e.to_string())
          })?;

        let status = response.status().as_u16();
        trace!("Response status from {}: {}", url, status);

        let body = response.text().await.map_err(|e| {
          error!("Failed reading response body: {}", e);
          crate::error::Error::HttpError(e.to_string())
        })?;

        Ok(HttpReply { status, body })
    }
}
