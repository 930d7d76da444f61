//! Anthropic `messages` schema (Claude)

use serde::{Deserialize, Serialize};

use super::chat::ChatMessage;

/// Field order follows Anthropic's documented example body
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest
{   pub model: String
  , pub max_tokens: u32
  , pub messages: Vec<ChatMessage>
  , pub temperature: f64
}

impl MessagesRequest
{   /// One user message: system persona, blank line, prompt
    pub fn new(model: &str, system: &str, prompt: &str) -> Self
    {   MessagesRequest
        {   model: model.to_string()
          , max_tokens: super::MAX_TOKENS
          , messages: vec![
              ChatMessage
              {   role: "user".to_string()
                , content: format!("{}\n\n{}", system, prompt)
              }
            ]
          , temperature: super::TEMPERATURE
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse
{   #[serde(default)]
    pub content: Vec<ContentBlock>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock
{   #[serde(default)]
    pub text: serde_json::Value
}

/// `content[0].text`.
///
/// Missing, null, false, 0 or empty text is `NoValidReply`; any other
/// non-string text is a broken body, `ParseError`.
pub fn completion_text(body: serde_json::Value)
  -> Result<String, crate::error::Error>
{   use serde_json::Value;

    let block = serde_json::from_value::<MessagesResponse>(body)
      .ok()
      .and_then(|r| r.content.into_iter().next())
      .ok_or(crate::error::Error::NoValidReply)?;

    match block.text
    {   Value::String(text) if !text.is_empty() => Ok(text)
      , Value::Null | Value::Bool(false) | Value::String(_) => {
          Err(crate::error::Error::NoValidReply)
        }
      , Value::Number(n) if n.as_f64() == Some(0.0) => {
          Err(crate::error::Error::NoValidReply)
        }
      , other => Err(crate::error::Error::ParseError(
          format!("completion text is not a string: {}", other)
        ))
    }
}
