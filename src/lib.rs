pub mod error;
pub mod config;
pub mod providers;
pub mod request;
pub mod prompt;
pub mod replies;
pub mod transport;
pub mod client;
pub mod history;
pub mod server;

use serde::{Deserialize, Serialize};

pub use providers::Provider;

/*

quarrel: ask an LLM for three sharp-but-civil comebacks to something
somebody said to you, with a 1..10 knob for how hard to hit back.

quarrel/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Shared structures (Intensity) and re-exports
│   ├── main.rs         # Server binary
│   ├── error.rs        # Error taxonomy
│   ├── config.rs       # Environment configuration
│   ├── prompt.rs       # Prompt builder
│   ├── replies.rs      # Numbered-line reply extraction
│   ├── providers/      # Provider templates and wire schemas
│   │   ├── mod.rs      # Provider enum and per-provider data
│   │   ├── chat.rs     # OpenAI-compatible chat completions
│   │   └── messages.rs # Anthropic messages API
│   ├── transport.rs    # HTTP seam (reqwest)
│   ├── client.rs       # Provider dispatch + status classification
│   ├── request.rs      # Endpoint request/response types
│   ├── server.rs       # axum router and handler
│   └── history.rs      # Client-side bounded history
└── tests/

*/

/// Lowest accepted intensity
pub const MIN_INTENSITY: u8 = 1;
/// Highest accepted intensity
pub const MAX_INTENSITY: u8 = 10;

/// Tone intensity, always within `MIN_INTENSITY..=MAX_INTENSITY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity
{   /// Returns `None` when `level` is outside 1..=10
    pub fn new(level: u8) -> Option<Self>
    {   if (MIN_INTENSITY..=MAX_INTENSITY).contains(&level)
        {   Some(Intensity(level))
        } else
        {   None
        }
    }

    pub fn get(self) -> u8
    {   self.0
    }

    /// The tone band this level falls in
    pub fn band(self) -> IntensityBand
    {   match self.0
        {   0..=2 => IntensityBand::Gentle
          , 3..=4 => IntensityBand::Firm
          , 5..=6 => IntensityBand::Reasoned
          , 7..=8 => IntensityBand::Sharp
          , _ => IntensityBand::Forceful
        }
    }
}

impl TryFrom<u8> for Intensity
{   type Error = crate::error::Error;

    fn try_from(level: u8) -> Result<Self, Self::Error>
    {   Intensity::new(level).ok_or_else(|| {
          crate::error::Error::Validation(
            format!("intensity out of range: {}", level)
          )
        })
    }
}

impl From<Intensity> for u8
{   fn from(intensity: Intensity) -> u8
    {   intensity.0
    }
}

impl std::fmt::Display for Intensity
{   fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
      -> std::fmt::Result
    {   write!(f, "{}", self.0)
    }
}

/// Five tone bands, in order of increasing assertiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntensityBand
{   /// 1-2
    Gentle
  , /// 3-4
    Firm
  , /// 5-6
    Reasoned
  , /// 7-8
    Sharp
  , /// 9-10
    Forceful
}

impl IntensityBand
{   /// Tone instruction embedded in the prompt
    pub fn tone_instruction(self) -> &'static str
    {   match self
        {   IntensityBand::Gentle =>
              "语气要温和友善，以理服人，避免任何冲突性言辞，重点在于沟通和理解"
          , IntensityBand::Firm =>
              "语气要礼貌但坚定，可以表达不同观点，但要保持尊重，重点在于讲道理"
          , IntensityBand::Reasoned =>
              "语气要据理力争，可以适当使用反问和对比，但要有理有据，重点在于逻辑反驳"
          , IntensityBand::Sharp =>
              "语气要犀利有力，可以使用讽刺和强烈反驳，但要避免人身攻击，重点在于有力回击"
          , IntensityBand::Forceful =>
              "语气要非常强烈，可以使用尖锐犀利的言辞进行反驳，但绝对不能人身攻击或使用脏话，重点在于气势压倒"
        }
    }

    /// Style instruction embedded in the prompt
    pub fn style_instruction(self) -> &'static str
    {   match self
        {   IntensityBand::Gentle => "温和理性，以事实和逻辑为主"
          , IntensityBand::Firm => "坚定有礼，既有原则又有风度"
          , IntensityBand::Reasoned => "据理力争，逻辑清晰且有说服力"
          , IntensityBand::Sharp => "犀利反击，言辞锋利但有理有据"
          , IntensityBand::Forceful => "气势如虹，用强烈的语气和犀利的逻辑压倒对方"
        }
    }

    /// Short display label shown next to the slider
    pub fn label(self) -> &'static str
    {   match self
        {   IntensityBand::Gentle => "温和友善"
          , IntensityBand::Firm => "礼貌坚定"
          , IntensityBand::Reasoned => "据理力争"
          , IntensityBand::Sharp => "犀利反击"
          , IntensityBand::Forceful => "核武级别"
        }
    }

    pub fn emoji(self) -> &'static str
    {   match self
        {   IntensityBand::Gentle => "😊"
          , IntensityBand::Firm => "🤔"
          , IntensityBand::Reasoned => "😤"
          , IntensityBand::Sharp => "🔥"
          , IntensityBand::Forceful => "💥"
        }
    }
}
