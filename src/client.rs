use std::sync::Arc;

use log::{debug, error, info, trace};

use crate::transport::Transport;

/// Dispatches built prompts to the configured provider.
///
/// Stateless apart from the shared transport; one call per request,
/// no retries, no fallback to another provider.
#[derive(Clone)]
pub struct ProviderClient
{   transport: Arc<dyn Transport>
  , site: crate::config::SiteInfo
}

impl ProviderClient
{   pub fn new(
      transport: Arc<dyn Transport>
    , site: crate::config::SiteInfo
    ) -> Self
    {   debug!("Creating ProviderClient");
        ProviderClient
        {   transport
          , site
        }
    }

    /// Send `prompt` to `provider_id` and return the extracted replies
    pub async fn dispatch(
      &self
    , provider_id: &str
    , credential: &str
    , prompt: &str
    ) -> Result<Vec<String>, crate::error::Error>
    {   let provider = provider_id.parse::<crate::Provider>()
          .map_err(|e| {
            error!("Unsupported provider: {}", provider_id);
            e
          })?;
        debug!("Dispatching prompt to {}", provider);

        let request = provider
          .build_request(credential, prompt, &self.site)?;

        let reply = self.transport
          .post_json(request.url, &request.headers, &request.body)
          .await?;

        if !reply.is_success()
        {   error!("{} API error ({}): {}", provider, reply.status, reply.body);
            return Err(classify_failure(provider, reply.status));
        }

        trace!("{} response body: {}", provider, reply.body);
        let body: serde_json::Value = serde_json::from_str(&reply.body)
          .map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        let content = provider.extract_completion(body)
          .map_err(|e| {
            error!("{} response had no usable completion: {}", provider, e);
            e
          })?;

        let replies = crate::replies::extract_replies(&content);
        info!("{} returned {} replies", provider, replies.len());
        Ok(replies)
    }
}

/// Map a non-2xx provider status onto the error taxonomy
pub fn classify_failure(
  provider: crate::Provider
, status: u16
) -> crate::error::Error
{   match status
    {   401 => crate::error::Error::InvalidCredential(provider)
      , 402 => crate::error::Error::InsufficientBalance(provider)
      , other => crate::error::Error::Upstream(other)
    }
}
