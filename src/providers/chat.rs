//! OpenAI-compatible `chat/completions` schema (OpenRouter, DeepSeek)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub temperature: f64
  , pub max_tokens: u32
}

impl ChatRequest
{   /// System persona plus the user prompt, as two messages
    pub fn new(model: &str, system: &str, prompt: &str) -> Self
    {   ChatRequest
        {   model: model.to_string()
          , messages: vec![
              ChatMessage
              {   role: "system".to_string()
                , content: system.to_string()
              }
            , ChatMessage
              {   role: "user".to_string()
                , content: prompt.to_string()
              }
            ]
          , temperature: super::TEMPERATURE
          , max_tokens: super::MAX_TOKENS
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse
{   #[serde(default)]
    pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: Option<ChoiceMessage>
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage
{   #[serde(default)]
    pub content: serde_json::Value
}

/// `choices[0].message.content`.
///
/// No message at all is `NoValidReply`; a message whose content is not
/// a string (null included) is a broken body, `ParseError`.
pub fn completion_text(body: serde_json::Value)
  -> Result<String, crate::error::Error>
{   let message = serde_json::from_value::<ChatResponse>(body)
      .ok()
      .and_then(|r| r.choices.into_iter().next())
      .and_then(|c| c.message)
      .ok_or(crate::error::Error::NoValidReply)?;

    match message.content
    {   serde_json::Value::String(text) => Ok(text)
      , other => Err(crate::error::Error::ParseError(
          format!("completion content is not a string: {}", other)
        ))
    }
}
