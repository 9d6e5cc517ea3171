// Shared prompt fragments.
// Each caller that needs LLM calls defines its own prompts.rs alongside it.
// This file contains the cross-cutting pieces.

/// Appended to prompts whose output is used verbatim.
pub const PLAIN_TEXT_ONLY: &str = "Respond ONLY with the requested text. \
    Do not add commentary, headings, explanations or markdown formatting.";

/// Forbids template gaps in prose the user will send as-is.
pub const NO_PLACEHOLDERS: &str = "DO NOT LEAVE ANY AREA UNFILLED WITH PLACEHOLDERS \
    LIKE '{company name}', simply fill it out to your best knowledge.";
