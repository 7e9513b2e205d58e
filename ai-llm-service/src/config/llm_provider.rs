/// Represents the provider (backend) used for generative text inference.
///
/// Only Google Gemini (AI Studio `v1beta`) is wired today. Adding another
/// backend means a new variant here plus a service under `services/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini `generateContent` API.
    Gemini,
}
