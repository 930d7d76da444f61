//! Request and response bodies of the quarrel endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown when `input` is missing, not a string, or blank
pub const MSG_EMPTY_INPUT: &str = "请输入对方的话";
/// Shown when `intensity` is missing, not an integer, or out of range
pub const MSG_BAD_INTENSITY: &str = "强度值无效";

/// Validated quarrel request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarrelRequest
{   /// The remark to answer, already trimmed
    pub input: String
  , pub intensity: crate::Intensity
}

impl QuarrelRequest
{   /// Validate a raw JSON body.
    ///
    /// Works on `Value` rather than a derived struct so that a string
    /// `"5"` or a `null` intensity is a validation failure, not a
    /// deserialization failure.
    pub fn from_value(body: &Value)
      -> Result<Self, crate::error::Error>
    {   let input = body.get("input")
          .and_then(Value::as_str)
          .map(str::trim)
          .filter(|s| !s.is_empty())
          .ok_or_else(|| {
            crate::error::Error::Validation(MSG_EMPTY_INPUT.to_string())
          })?;

        let intensity = body.get("intensity")
          .and_then(integral)
          .and_then(|n| u8::try_from(n).ok())
          .and_then(crate::Intensity::new)
          .ok_or_else(|| {
            crate::error::Error::Validation(MSG_BAD_INTENSITY.to_string())
          })?;

        Ok(QuarrelRequest
        {   input: input.to_string()
          , intensity
        })
    }
}

/// Integer value of a JSON number, accepting `5.0` but not `5.5`
fn integral(value: &Value) -> Option<i64>
{   if let Some(n) = value.as_i64()
    {   return Some(n);
    }
    value.as_f64()
      .filter(|f| f.fract() == 0.0 && f.is_finite())
      .map(|f| f as i64)
}

/// Successful quarrel response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarrelResponse
{   /// One to three replies
    pub replies: Vec<String>
  , /// Epoch milliseconds
    pub timestamp: i64
  , pub input: String
  , pub intensity: crate::Intensity
  , pub provider: String
}

/// Error body; `details` only carries remediation text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody
{   pub error: String
  , #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>
}

impl ErrorBody
{   pub fn new(error: impl Into<String>) -> Self
    {   ErrorBody
        {   error: error.into()
          , details: None
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self
    {   self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn rejects(body: Value, msg: &str)
    {   assert_eq!(
          QuarrelRequest::from_value(&body),
          Err(Error::Validation(msg.to_string())),
          "body: {}", body
        );
    }

    #[test]
    fn test_accepts_and_trims()
    {   let req = QuarrelRequest::from_value(
          &json!({ "input": "  你这个人怎么这样？\n", "intensity": 5 })
        ).unwrap();
        assert_eq!(req.input, "你这个人怎么这样？");
        assert_eq!(req.intensity.get(), 5);
    }

    #[test]
    fn test_accepts_integral_float()
    {   let req = QuarrelRequest::from_value(
          &json!({ "input": "x", "intensity": 10.0 })
        ).unwrap();
        assert_eq!(req.intensity.get(), 10);
    }

    #[test]
    fn test_rejects_bad_intensity()
    {   for intensity in [
          json!(0), json!(11), json!("5"), json!(null)
        , json!(5.5), json!(-3), json!(300), json!([5])
        ]
        {   rejects(json!({ "input": "x", "intensity": intensity }), MSG_BAD_INTENSITY);
        }
        rejects(json!({ "input": "x" }), MSG_BAD_INTENSITY);
    }

    #[test]
    fn test_rejects_bad_input()
    {   for input in [json!(""), json!("   "), json!(null), json!(42)]
        {   rejects(json!({ "input": input, "intensity": 5 }), MSG_EMPTY_INPUT);
        }
        rejects(json!({ "intensity": 5 }), MSG_EMPTY_INPUT);
        rejects(json!([1, 2]), MSG_EMPTY_INPUT);
    }

    #[test]
    fn test_error_body_omits_empty_details()
    {   let body = serde_json::to_value(ErrorBody::new("boom")).unwrap();
        assert_eq!(body, json!({ "error": "boom" }));
    }
}
