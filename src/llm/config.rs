// LLM Configuration - Models, writing styles and the settings record
//
// Defines the Gemini models offered to the user, the built-in writing
// styles, and the persisted settings the prompt builder reads from.

use serde::{Deserialize, Serialize};

/// Configuration for a Gemini model
#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub id: &'static str,
    pub name: &'static str,
}

/// Models offered in the model picker
pub static AVAILABLE_MODELS: &[ModelConfig] = &[
    ModelConfig {
        id: "gemini-2.5-pro",
        name: "Gemini 2.5 Pro",
    },
    ModelConfig {
        id: "gemini-2.5-flash",
        name: "Gemini 2.5 Flash",
    },
    ModelConfig {
        id: "gemini-2.5-flash-lite",
        name: "Gemini 2.5 Flash Lite",
    },
];

/// Get model config by ID
pub fn get_model_config(id: &str) -> Option<&'static ModelConfig> {
    AVAILABLE_MODELS.iter().find(|m| m.id == id)
}

/// Get the default model ID
pub fn default_model_id() -> &'static str {
    "gemini-2.5-flash-lite"
}

/// Name of the built-in style that adds no tone instruction
pub const DEFAULT_STYLE: &str = "Default";

/// A built-in writing style and its tone instruction
#[derive(Debug, Clone)]
pub struct BuiltinStyle {
    pub name: &'static str,
    /// Empty for `Default`
    pub prompt: &'static str,
}

pub static BUILTIN_STYLES: &[BuiltinStyle] = &[
    BuiltinStyle {
        name: DEFAULT_STYLE,
        prompt: "",
    },
    BuiltinStyle {
        name: "Academic",
        prompt: "The tone should be academic.",
    },
    BuiltinStyle {
        name: "Business",
        prompt: "The tone should be professional and suitable for business communication.",
    },
    BuiltinStyle {
        name: "Casual",
        prompt: "The tone should be casual and friendly.",
    },
    BuiltinStyle {
        name: "Creative",
        prompt: "The tone should be creative and engaging.",
    },
    BuiltinStyle {
        name: "Technical",
        prompt: "The tone should be technical and precise.",
    },
];

/// Get a built-in style by its exact (case-sensitive) name
pub fn get_builtin_style(name: &str) -> Option<&'static BuiltinStyle> {
    BUILTIN_STYLES.iter().find(|s| s.name == name)
}

/// How much the model is allowed to change the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImprovementLevel {
    /// Grammar and spelling only
    Grammar,
    /// Grammar plus sentence structure and flow
    Structure,
    /// Grammar, structure, word choice and style
    #[default]
    Style,
}

impl ImprovementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grammar => "grammar",
            Self::Structure => "structure",
            Self::Style => "style",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Grammar => "Grammar & Spelling Only",
            Self::Structure => "Grammar & Structure",
            Self::Style => "Grammar, Structure, & Style",
        }
    }
}

/// A user-defined writing style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomStyle {
    pub name: String,
    pub prompt: String,
}

/// Read-only snapshot of the settings the prompt builder needs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Configuration {
    pub improvement_level: ImprovementLevel,
    pub writing_style: String,
    pub custom_styles: Vec<CustomStyle>,
}

impl Configuration {
    /// Resolve the tone instruction for the selected writing style
    ///
    /// Built-in styles are checked first, then custom styles by exact name.
    /// Unknown names resolve to `None`, as does `Default`.
    pub fn style_prompt(&self) -> Option<&str> {
        let prompt = match get_builtin_style(&self.writing_style) {
            Some(builtin) => builtin.prompt,
            None => self
                .custom_styles
                .iter()
                .find(|s| s.name == self.writing_style)
                .map(|s| s.prompt.as_str())
                .unwrap_or_else(|| {
                    tracing::debug!(
                        "style_prompt: no style named {:?}, using no addendum",
                        self.writing_style
                    );
                    ""
                }),
        };

        (!prompt.is_empty()).then_some(prompt)
    }
}

/// The persisted plugin settings
///
/// Missing fields in a stored record fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    /// Stored for the host; never bound to a key by this crate
    pub trigger_key: String,
    pub improvement_level: ImprovementLevel,
    pub writing_style: String,
    pub custom_styles: Vec<CustomStyle>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model_id().to_string(),
            trigger_key: "Ctrl+G".to_string(),
            improvement_level: ImprovementLevel::default(),
            writing_style: DEFAULT_STYLE.to_string(),
            custom_styles: Vec::new(),
        }
    }
}

impl Settings {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Snapshot the prompt-relevant fields
    pub fn configuration(&self) -> Configuration {
        Configuration {
            improvement_level: self.improvement_level,
            writing_style: self.writing_style.clone(),
            custom_styles: self.custom_styles.clone(),
        }
    }

    /// Style names in picker order: built-ins first, then custom styles
    pub fn available_styles(&self) -> Vec<&str> {
        BUILTIN_STYLES
            .iter()
            .map(|s| s.name)
            .chain(self.custom_styles.iter().map(|s| s.name.as_str()))
            .collect()
    }

    /// Append a custom style
    ///
    /// Names must be non-empty and must not match a built-in or an existing
    /// custom style (case-sensitive).
    pub fn add_custom_style(&mut self, name: &str, prompt: &str) -> Result<(), StyleError> {
        if name.is_empty() {
            return Err(StyleError::EmptyName);
        }
        if prompt.is_empty() {
            return Err(StyleError::EmptyPrompt);
        }
        if get_builtin_style(name).is_some() {
            return Err(StyleError::ReservedName(name.to_string()));
        }
        if self.custom_styles.iter().any(|s| s.name == name) {
            return Err(StyleError::DuplicateName(name.to_string()));
        }

        self.custom_styles.push(CustomStyle {
            name: name.to_string(),
            prompt: prompt.to_string(),
        });
        tracing::info!(
            "add_custom_style: added style, total={}",
            self.custom_styles.len()
        );
        Ok(())
    }

    /// Remove a custom style by name
    ///
    /// The selected writing style is left untouched; if it pointed at the
    /// removed style, prompts fall back to no style addendum.
    pub fn remove_custom_style(&mut self, name: &str) -> Option<CustomStyle> {
        let index = self.custom_styles.iter().position(|s| s.name == name)?;
        Some(self.custom_styles.remove(index))
    }
}

/// Error type for custom style management
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    EmptyName,
    EmptyPrompt,
    ReservedName(String),
    DuplicateName(String),
}

impl std::fmt::Display for StyleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Style name must not be empty"),
            Self::EmptyPrompt => write!(f, "Style prompt must not be empty"),
            Self::ReservedName(name) => write!(f, "'{name}' is a built-in style"),
            Self::DuplicateName(name) => write!(f, "A style named '{name}' already exists"),
        }
    }
}

impl std::error::Error for StyleError {}
