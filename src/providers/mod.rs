//! LLM provider templates
//!
//! Each provider is plain data: where to POST, which headers to send,
//! which wire schema the body and the reply follow, and the remediation
//! text shown when the provider rejects the key or the account is empty.

pub mod chat;
pub mod messages;

use log::trace;

/// Sampling temperature sent to every provider
pub const TEMPERATURE: f64 = 0.8;
/// Output token cap sent to every provider
pub const MAX_TOKENS: u32 = 800;

/// The closed set of supported providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider
{   /// OpenRouter (unified API over many providers)
    OpenRouter
  , /// DeepSeek platform
    DeepSeek
  , /// Anthropic (Claude models)
    Claude
}

/// Body/reply shape a provider speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema
{   /// OpenAI-compatible `chat/completions`
    Chat
  , /// Anthropic `messages`
    Messages
}

/// Fixed per-provider data
#[derive(Debug, Clone, Copy)]
pub struct ProviderTemplate
{   pub id: &'static str
  , pub endpoint: &'static str
  , pub model: &'static str
  , pub schema: Schema
  , /// Example of a well-formed key, shown on 401
    pub key_format_hint: &'static str
  , /// Billing page, shown on 402
    pub credit_url: &'static str
}

const OPENROUTER: ProviderTemplate = ProviderTemplate
{   id: "openrouter"
  , endpoint: "https://openrouter.ai/api/v1/chat/completions"
  , model: "deepseek/deepseek-chat"
  , schema: Schema::Chat
  , key_format_hint: "sk-or-v1-xxxxxx..."
  , credit_url: "https://openrouter.ai/settings/credits"
};

const DEEPSEEK: ProviderTemplate = ProviderTemplate
{   id: "deepseek"
  , endpoint: "https://api.deepseek.com/chat/completions"
  , model: "deepseek-chat"
  , schema: Schema::Chat
  , key_format_hint: "sk-xxxxxx..."
  , credit_url: "https://platform.deepseek.com/usage"
};

const CLAUDE: ProviderTemplate = ProviderTemplate
{   id: "claude"
  , endpoint: "https://api.anthropic.com/v1/messages"
  , model: "claude-3-haiku-20240307"
  , schema: Schema::Messages
  , key_format_hint: "sk-ant-api03-xxxxxx..."
  , credit_url: "https://console.anthropic.com/settings/billing"
};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A fully shaped provider call, built fresh for every request
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest
{   pub url: &'static str
  , pub headers: Vec<(&'static str, String)>
  , pub body: serde_json::Value
}

impl ProviderRequest
{   /// Header value by (case-insensitive) name
    pub fn header(&self, name: &str) -> Option<&str>
    {   self.headers
          .iter()
          .find(|(k, _)| k.eq_ignore_ascii_case(name))
          .map(|(_, v)| v.as_str())
    }
}

impl Provider
{   pub const ALL: [Provider; 3] = [
      Provider::OpenRouter
    , Provider::DeepSeek
    , Provider::Claude
    ];

    pub fn template(self) -> &'static ProviderTemplate
    {   match self
        {   Provider::OpenRouter => &OPENROUTER
          , Provider::DeepSeek => &DEEPSEEK
          , Provider::Claude => &CLAUDE
        }
    }

    pub fn as_str(self) -> &'static str
    {   self.template().id
    }

    pub fn key_format_hint(self) -> &'static str
    {   self.template().key_format_hint
    }

    pub fn credit_url(self) -> &'static str
    {   self.template().credit_url
    }

    /// Shape the HTTP call for `prompt`
    pub fn build_request(
      self
    , credential: &str
    , prompt: &str
    , site: &crate::config::SiteInfo
    ) -> Result<ProviderRequest, crate::error::Error>
    {   let template = self.template();

        let mut headers = vec![
          ("Authorization", format!("Bearer {}", credential))
        , ("Content-Type", "application/json".to_string())
        ];
        match self
        {   Provider::OpenRouter => {
              headers.push(("HTTP-Referer", site.url.clone()));
              headers.push(("X-Title", site.name.clone()));
            }
          , Provider::DeepSeek => {}
          , Provider::Claude => {
              headers.push(("x-api-key", credential.to_string()));
              headers.push((
                "anthropic-version"
              , ANTHROPIC_VERSION.to_string()
              ));
            }
        }

        let system = crate::prompt::SYSTEM_MESSAGE;
        let body = match template.schema
        {   Schema::Chat => serde_json::to_value(
              chat::ChatRequest::new(template.model, system, prompt)
            )
          , Schema::Messages => serde_json::to_value(
              messages::MessagesRequest::new(
                template.model, system, prompt
              )
            )
        }.map_err(|e| crate::error::Error::Other(e.to_string()))?;

        trace!("{} request body: {}", self, body);
        Ok(ProviderRequest
        {   url: template.endpoint
          , headers
          , body
        })
    }

    /// Pull the completion text out of a 2xx body
    pub fn extract_completion(
      self
    , body: serde_json::Value
    ) -> Result<String, crate::error::Error>
    {   match self.template().schema
        {   Schema::Chat => chat::completion_text(body)
          , Schema::Messages => messages::completion_text(body)
        }
    }
}

impl std::fmt::Display for Provider
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider
{   type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {   let wanted = s.to_lowercase();
        Provider::ALL
          .into_iter()
          .find(|p| p.as_str() == wanted)
          .ok_or_else(|| {
            crate::error::Error::UnsupportedProvider(s.to_string())
          })
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::config::SiteInfo;

    #[test]
    fn test_parse_is_case_insensitive()
    {   assert_eq!("OpenRouter".parse::<Provider>(), Ok(Provider::OpenRouter));
        assert_eq!("deepseek".parse::<Provider>(), Ok(Provider::DeepSeek));
        assert_eq!("CLAUDE".parse::<Provider>(), Ok(Provider::Claude));
        assert_eq!(
          "gemini".parse::<Provider>(),
          Err(crate::error::Error::UnsupportedProvider("gemini".to_string()))
        );
    }

    #[test]
    fn test_hints_and_urls_are_distinct()
    {   for a in Provider::ALL
        {   for b in Provider::ALL
            {   if a != b
                {   assert_ne!(a.key_format_hint(), b.key_format_hint());
                    assert_ne!(a.credit_url(), b.credit_url());
                }
            }
        }
    }

    #[test]
    fn test_openrouter_headers()
    {   let site = SiteInfo
        {   url: "https://example.org".to_string()
          , name: "Example".to_string()
        };
        let req = Provider::OpenRouter
          .build_request("sk-or-v1-abc", "hi", &site)
          .unwrap();
        assert_eq!(req.url, "https://openrouter.ai/api/v1/chat/completions");
        assert_eq!(req.header("authorization"), Some("Bearer sk-or-v1-abc"));
        assert_eq!(req.header("Content-Type"), Some("application/json"));
        assert_eq!(req.header("HTTP-Referer"), Some("https://example.org"));
        assert_eq!(req.header("X-Title"), Some("Example"));
        assert_eq!(req.header("x-api-key"), None);
        assert_eq!(req.body["model"], "deepseek/deepseek-chat");
    }

    #[test]
    fn test_deepseek_headers()
    {   let req = Provider::DeepSeek
          .build_request("sk-abc", "hi", &SiteInfo::default())
          .unwrap();
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.url, "https://api.deepseek.com/chat/completions");
        assert_eq!(req.body["model"], "deepseek-chat");
        assert_eq!(req.body["messages"][0]["role"], "system");
        assert_eq!(req.body["messages"][1]["content"], "hi");
        assert_eq!(req.body["temperature"], 0.8);
        assert_eq!(req.body["max_tokens"], 800);
    }

    #[test]
    fn test_claude_headers_and_body()
    {   let req = Provider::Claude
          .build_request("sk-ant-api03-abc", "hi", &SiteInfo::default())
          .unwrap();
        assert_eq!(req.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(req.header("Authorization"), Some("Bearer sk-ant-api03-abc"));
        assert_eq!(req.header("x-api-key"), Some("sk-ant-api03-abc"));
        assert_eq!(req.header("anthropic-version"), Some("2023-06-01"));
        assert_eq!(req.header("HTTP-Referer"), None);

        let messages = req.body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        let expected = format!("{}\n\nhi", crate::prompt::SYSTEM_MESSAGE);
        assert_eq!(messages[0]["content"], expected.as_str());
        assert_eq!(req.body["model"], "claude-3-haiku-20240307");
        assert_eq!(req.body["max_tokens"], 800);
    }
}
