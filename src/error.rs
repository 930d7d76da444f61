use std::fmt;

/// Error type for quarrel operations
///
/// Every variant maps to exactly one HTTP response in `server`;
/// variants carrying a `String` keep the detail for logging only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Request body failed validation
    Validation(String)
  , /// No API key configured on the server
    MissingApiKey
  , /// Provider identifier is not one of the known providers
    UnsupportedProvider(String)
  , /// Provider rejected the credential (HTTP 401)
    InvalidCredential(crate::Provider)
  , /// Provider account has no credit left (HTTP 402)
    InsufficientBalance(crate::Provider)
  , /// Provider answered with any other non-2xx status
    Upstream(u16)
  , /// Network-level failure talking to the provider
    HttpError(String)
  , /// Provider body (or request body) was not valid JSON
    ParseError(String)
  , /// 2xx response did not carry a completion we could read
    NoValidReply
  , /// Generic error
    Other(String)
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Validation(msg) => {
              write!(f, "Validation error: {}", msg)
            }
          , Error::MissingApiKey => {
              write!(f, "AI service API key is not configured")
            }
          , Error::UnsupportedProvider(provider) => {
              write!(f, "Unsupported provider: {}", provider)
            }
          , Error::InvalidCredential(provider) => {
              write!(f,
                "Invalid API key for {} (expected {})",
                provider,
                provider.key_format_hint()
              )
            }
          , Error::InsufficientBalance(provider) => {
              write!(f,
                "Insufficient balance on {}, top up at {}",
                provider,
                provider.credit_url()
              )
            }
          , Error::Upstream(status) => {
              write!(f, "API request failed: {}", status)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoValidReply => {
              write!(f, "No valid reply received")
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn test_display_names_provider_hint()
    {   let msg = Error::InvalidCredential(crate::Provider::Claude)
          .to_string();
        assert!(msg.contains("claude"));
        assert!(msg.contains("sk-ant-api03-xxxxxx..."));
    }

    #[test]
    fn test_display_upstream_status()
    {   assert_eq!(
          Error::Upstream(503).to_string(),
          "API request failed: 503"
        );
    }
}
