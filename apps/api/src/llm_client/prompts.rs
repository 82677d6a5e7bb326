// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Appended to every instruction so answers reach farmers in their language.
pub const INDONESIAN_ONLY: &str = "Selalu jawab dalam Bahasa Indonesia yang sederhana.";
