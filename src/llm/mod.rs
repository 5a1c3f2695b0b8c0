// LLM Module - Text improvement through the Gemini API
//
// Locates the text to improve, builds the instruction prompt from the
// user's settings, and sends it through a generation client.

pub mod client;
pub mod config;
pub mod improver;
pub mod prompts;
pub mod sentence_detector;
pub mod settings_store;

// Re-export commonly used types
pub use client::{ClientError, GenerationClient};
#[cfg(feature = "gemini")]
pub use client::GeminiClient;
pub use config::{
    Configuration, CustomStyle, ImprovementLevel, Settings, StyleError, AVAILABLE_MODELS,
    BUILTIN_STYLES,
};
pub use improver::{ImproveError, Improver};
pub use prompts::build_improvement_prompt;
pub use sentence_detector::{locate_in_buffer, locate_sentence, SentenceInfo};
pub use settings_store::{JsonFileStore, MemoryStore, SettingsStore, StoreError};
