// src/prompts.rs
//! Instruction prompts sent to the model, one per mode.

#![deny(missing_docs)]

use crate::correction::Mode;

/// Placeholder replaced by the user's text.
pub const INPUT_PLACEHOLDER: &str = "{{INPUT_TEXT}}";

/// Shared rules prepended to the fix prompt.
pub const GLOBAL_SYSTEM_PROMPT: &str = "You are a professional writing assistant.

You must follow these rules strictly:
- Support both Chinese and English input naturally.
- Do NOT mix languages unless the original text does.
- Be conservative: do not change meaning unless required for correctness.
- Output must strictly follow the format required by the mode.
- Do not include extra explanations unless explicitly asked.";

/// Task for fix mode.
pub const FIX_PROMPT: &str = "Task:
Fix grammatical errors, awkward phrasing, and obvious fluency issues in the following text.

Rules:
- Only fix incorrect or unnatural parts.
- Do NOT rewrite for style.
- Do NOT add or remove information.
- Keep tone and register unchanged.
- Output ONLY the corrected text.
- No explanations, no quotes, no markdown.

Text:
{{INPUT_TEXT}}";

/// Task for suggest mode.
pub const SUGGEST_PROMPT: &str = "Task:
Provide alternative corrected versions of the following text.

Rules:
- Provide 2 to 3 suggested corrections.
- Each suggestion should focus on fixing issues or improving clarity.
- Do NOT explain the suggestions.
- Do NOT include the original text.
- Output MUST follow this exact format:

1. <suggested version>
2. <suggested version>
3. <suggested version (optional)>

Text:
{{INPUT_TEXT}}
";

/// Task for rewrite mode.
pub const REWRITE_PROMPT: &str = "Task:
Rewrite the following text to improve clarity, fluency, and naturalness.

Rules:
- Provide 2 to 3 alternative rewrites.
- Each version should have a slightly different style or emphasis.
- Do NOT explain the differences.
- Do NOT include the original text.
- Output MUST follow this exact format:

1. <rewrite version>
2. <rewrite version>
3. <rewrite version (optional)>

Text:
{{INPUT_TEXT}}
";

/// The raw template for `mode`, placeholder included.
pub fn template(mode: Mode) -> String {
    match mode {
        Mode::Fix => format!("{GLOBAL_SYSTEM_PROMPT}\n\n{FIX_PROMPT}"),
        Mode::Suggest => SUGGEST_PROMPT.to_string(),
        Mode::Rewrite => REWRITE_PROMPT.to_string(),
    }
}

/// System prompt for `mode` with `text` substituted verbatim.
pub fn system_prompt(mode: Mode, text: &str) -> String {
    template(mode).replace(INPUT_PLACEHOLDER, text)
}
