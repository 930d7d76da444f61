//! Reply extraction from a free-text completion

use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;

/// Returned alone when the completion has no numbered lines
pub const FALLBACK_REPLY: &str = "回复生成失败，请重试";

/// ECMAScript whitespace: includes U+FEFF, excludes U+0085
const JS_SPACE_CLASS: &str =
  r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

fn numbered_prefix() -> &'static Regex
{   static PREFIX: OnceLock<Regex> = OnceLock::new();
    // ASCII digits, a dot, one space. "1)", "1 -" and "１." lines are dropped.
    PREFIX.get_or_init(|| {
      Regex::new(&format!(r"^[0-9]+\.{}", JS_SPACE_CLASS))
        .expect("static regex")
    })
}

fn is_js_space(c: char) -> bool
{   matches!(c,
      '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
    | '\u{A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}'
    | '\u{2028}' | '\u{2029}' | '\u{202F}' | '\u{205F}'
    | '\u{3000}' | '\u{FEFF}'
    )
}

/// Up to `REPLY_COUNT` replies, or the fallback. Never empty.
pub fn extract_replies(content: &str) -> Vec<String>
{   let prefix = numbered_prefix();
    let replies: Vec<String> = content
      .split('\n')
      .filter(|line| prefix.is_match(line))
      .map(|line| prefix.replace(line, "")
        .trim_matches(is_js_space)
        .to_string())
      .filter(|reply| !reply.is_empty())
      .take(crate::prompt::REPLY_COUNT)
      .collect();

    if replies.is_empty()
    {   warn!("Completion contained no numbered replies");
        return vec![FALLBACK_REPLY.to_string()];
    }
    debug!("Extracted {} replies", replies.len());
    replies
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn test_drops_extra_lines()
    {   assert_eq!(
          extract_replies("1. A\n2. B\n3. C\nextra"),
          vec!["A", "B", "C"]
        );
    }

    #[test]
    fn test_fallback_when_nothing_numbered()
    {   assert_eq!(
          extract_replies("Sure! Here are some ideas:\n- one\n- two"),
          vec![FALLBACK_REPLY]
        );
        assert_eq!(extract_replies(""), vec![FALLBACK_REPLY]);
    }

    #[test]
    fn test_caps_at_three_in_order()
    {   assert_eq!(
          extract_replies("1. A\n2. B\n3. C\n4. D\n5. E"),
          vec!["A", "B", "C"]
        );
    }

    #[test]
    fn test_strict_prefix()
    {   let content = "1) paren\n2 - dash\n3.nospace\n10. ten\n 4. indented";
        assert_eq!(extract_replies(content), vec!["ten"]);
    }

    #[test]
    fn test_non_ascii_digits_are_not_numbers()
    {   assert_eq!(
          extract_replies("１. fullwidth\n١. arabic\n९. devanagari"),
          vec![FALLBACK_REPLY]
        );
        assert_eq!(
          extract_replies("１. fullwidth\n2. ascii"),
          vec!["ascii"]
        );
    }

    #[test]
    fn test_whitespace_edges()
    {   // U+3000 counts as the separator, U+0085 does not
        assert_eq!(
          extract_replies("1.\u{3000}ideographic\n2.\u{85}nel"),
          vec!["ideographic"]
        );
        // BOM is trimmed, NEL is kept
        assert_eq!(
          extract_replies("1. \u{FEFF}bom\u{FEFF}\n2. \u{85}nel"),
          vec!["bom", "\u{85}nel"]
        );
    }

    #[test]
    fn test_trims_and_skips_blank_replies()
    {   let content = "intro\r\n1.   A  \r\n2. \n3. B\r\n";
        assert_eq!(extract_replies(content), vec!["A", "B"]);
    }

    #[test]
    fn test_only_first_prefix_is_stripped()
    {   assert_eq!(extract_replies("1. 2. nested"), vec!["2. nested"]);
    }
}
