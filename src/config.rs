//! Server configuration, read once from the environment at startup

use serde::{Deserialize, Serialize};
use log::{debug, warn};

pub const DEFAULT_PROVIDER: &str = "openrouter";
pub const DEFAULT_SITE_URL: &str = "https://quarrel-winner.com";
pub const DEFAULT_SITE_NAME: &str = "QuarrelWinner";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Attribution values some providers want on every request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfo
{   /// Sent as `HTTP-Referer`
    pub url: String
  , /// Sent as `X-Title`
    pub name: String
}

impl Default for SiteInfo
{   fn default() -> Self
    {   SiteInfo
        {   url: DEFAULT_SITE_URL.to_string()
          , name: DEFAULT_SITE_NAME.to_string()
        }
    }
}

/// Quarrel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuarrelConfig
{   /// Provider credential (`AI_API_KEY`)
    pub api_key: Option<String>
  , /// Provider identifier (`AI_SERVICE_PROVIDER`), checked per request
    pub provider: String
  , /// Attribution (`SITE_URL`, `SITE_NAME`)
    pub site: SiteInfo
  , /// Listen address (`BIND_ADDR`)
    pub bind_addr: String
}

impl Default for QuarrelConfig
{   fn default() -> Self
    {   QuarrelConfig
        {   api_key: None
          , provider: DEFAULT_PROVIDER.to_string()
          , site: SiteInfo::default()
          , bind_addr: DEFAULT_BIND_ADDR.to_string()
        }
    }
}

impl QuarrelConfig
{   /// Load `.env` (if any) and read the process environment
    pub fn from_env() -> Self
    {   if let Err(e) = dotenvy::dotenv()
        {   debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
      where F: Fn(&str) -> Option<String>
    {   let get = |key: &str| {
          lookup(key).filter(|v| !v.trim().is_empty())
        };
        let defaults = QuarrelConfig::default();

        let config = QuarrelConfig
        {   api_key: get("AI_API_KEY")
          , provider: get("AI_SERVICE_PROVIDER")
              .unwrap_or(defaults.provider)
          , site: SiteInfo
            {   url: get("SITE_URL").unwrap_or(defaults.site.url)
              , name: get("SITE_NAME").unwrap_or(defaults.site.name)
            }
          , bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr)
        };

        if config.api_key.is_none()
        {   warn!("AI_API_KEY is not set; every request will fail");
        }
        if config.provider.parse::<crate::Provider>().is_err()
        {   warn!("Unsupported AI_SERVICE_PROVIDER: {}", config.provider);
        }
        debug!(
          "Loaded config: provider={} bind={}",
          config.provider, config.bind_addr
        );
        config
    }
}
