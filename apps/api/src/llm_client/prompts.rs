// Shared prompt constants.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting system prompts.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for section rewriting: LaTeX in, LaTeX out.
pub const LATEX_ONLY_SYSTEM: &str = "You are an expert resume writer who edits LaTeX resumes. \
    Respond with the requested LaTeX only. \
    Do NOT wrap the output in markdown code fences. \
    Do NOT add commentary before or after the LaTeX. \
    Escape LaTeX special characters (% $ & # _) in plain text.";
