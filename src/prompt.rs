//! Prompt construction
//!
//! The instruction text is the same for every provider; only the tone
//! and style lines change, and only at band boundaries.

use crate::Intensity;

/// Persona sent alongside the prompt (system role, or prefixed for Claude)
pub const SYSTEM_MESSAGE: &str =
  "你是一个专业的沟通和辩论助手，擅长帮助用户进行有理有据的回应。你的回复要智慧、有逻辑、有说服力，但绝不能包含人身攻击或不当内容。";

/// Number of replies the model is asked for
pub const REPLY_COUNT: usize = 3;

/// Build the user prompt for `input` at `intensity`.
///
/// `input` is embedded verbatim; callers trim it beforehand.
pub fn build_prompt(input: &str, intensity: Intensity) -> String
{   let band = intensity.band();
    format!(
"你是一个专业的辩论和沟通助手，用户想要回应别人的话。请为用户生成3条不同风格的回复。

用户输入的话：\"{input}\"
语气强烈程度：{level}/10
语气要求：{tone}
风格要求：{style}

请生成3条回复，要求：
1. 每条回复都要针对性强，直击要害
2. 三条回复要有不同的角度和策略：
   - 第一条：逻辑反驳型（用事实和逻辑反驳）
   - 第二条：反问质疑型（用反问让对方思考）
   - 第三条：价值观输出型（表达自己的立场和价值观）
3. 每条回复控制在30-50字之间，简洁有力
4. 语言要符合中文表达习惯，自然流畅
5. 绝对不能包含人身攻击、脏话或不当内容
6. 要体现出智慧和修养，即使在强烈反驳时也要有理有据

请直接返回3条回复，用数字序号标注，格式如下：
1. [第一条回复]
2. [第二条回复]
3. [第三条回复]"
    , input = input
    , level = intensity.get()
    , tone = band.tone_instruction()
    , style = band.style_instruction()
    )
}
