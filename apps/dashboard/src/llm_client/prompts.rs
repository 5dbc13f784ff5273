// Shared prompt fragments. Each service that calls the model keeps its own
// prompts.rs alongside it and composes these in.

/// Instruction fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction fragment that forbids inventing facts absent from the document.
pub const GROUNDING_INSTRUCTION: &str = "\
    Every extracted field must come from the supplied document. \
    Do NOT infer, interpolate, or invent details. \
    If the document does not contain a value, return an empty string or empty list.";
