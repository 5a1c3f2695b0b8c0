// Gemini Polish - Improve the sentence before the cursor with Gemini
//
// Host editors implement the `editor` ports; everything else is driven
// through `llm::Improver`.

pub mod editor;
pub mod logging;
pub mod position;

pub mod llm;

// Wire format and result types
pub mod llm_types;
