// LLM Prompts - Instruction text for text improvement requests
//
// The prompt is a base instruction chosen by improvement level, an optional
// tone sentence from the writing style, two fixed directives, and the text.

use crate::llm::config::{Configuration, ImprovementLevel};

/// Build the improvement prompt for `text`
///
/// Deterministic and infallible: an unknown writing style simply adds no
/// tone instruction. `text` is appended verbatim after a `Text:` label.
pub fn build_improvement_prompt(text: &str, config: &Configuration) -> String {
    let mut prompt = String::from(get_level_instruction(config.improvement_level));

    if let Some(style_prompt) = config.style_prompt() {
        prompt.push(' ');
        prompt.push_str(style_prompt);
    }

    prompt.push_str("\nMaintain the original meaning.");
    prompt.push_str("\nDo not add extra text or explanations, just return the improved text.");
    prompt.push_str("\n\nText: ");
    prompt.push_str(text);

    tracing::debug!(
        "build_improvement_prompt: level={} text_len={} prompt_len={}",
        config.improvement_level.as_str(),
        text.len(),
        prompt.len()
    );

    prompt
}

/// Get the base instruction for an improvement level
fn get_level_instruction(level: ImprovementLevel) -> &'static str {
    match level {
        ImprovementLevel::Grammar => {
            "Please ONLY correct any grammar and spelling errors in the following text."
        }
        ImprovementLevel::Structure => {
            "Please ONLY correct grammar and spelling, and improve sentence structure \
             and flow for the following text."
        }
        ImprovementLevel::Style => {
            "Please correct grammar and spelling, improve sentence structure, \
             and enhance word choice and writing style for the following text."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::config::CustomStyle;

    fn config(level: ImprovementLevel, style: &str) -> Configuration {
        Configuration {
            improvement_level: level,
            writing_style: style.to_string(),
            custom_styles: vec![CustomStyle {
                name: "Witty".to_string(),
                prompt: "Be witty.".to_string(),
            }],
        }
    }

    #[test]
    fn test_build_prompt_exact_layout() {
        let prompt = build_improvement_prompt(
            "their going home",
            &config(ImprovementLevel::Grammar, "Default"),
        );

        assert_eq!(
            prompt,
            "Please ONLY correct any grammar and spelling errors in the following text.\n\
             Maintain the original meaning.\n\
             Do not add extra text or explanations, just return the improved text.\n\
             \n\
             Text: their going home"
        );
    }

    #[test]
    fn test_build_prompt_with_builtin_style() {
        let prompt = build_improvement_prompt(
            "hello",
            &config(ImprovementLevel::Structure, "Academic"),
        );

        assert!(prompt.starts_with(
            "Please ONLY correct grammar and spelling, and improve sentence structure and flow \
             for the following text. The tone should be academic.\n"
        ));
    }

    #[test]
    fn test_build_prompt_deterministic() {
        let cfg = config(ImprovementLevel::Style, "Witty");

        assert_eq!(
            build_improvement_prompt("Same input.", &cfg),
            build_improvement_prompt("Same input.", &cfg)
        );
    }

    #[test]
    fn test_level_instructions_different() {
        let grammar = get_level_instruction(ImprovementLevel::Grammar);
        let structure = get_level_instruction(ImprovementLevel::Structure);
        let style = get_level_instruction(ImprovementLevel::Style);

        assert_ne!(grammar, structure);
        assert_ne!(grammar, style);
        assert_ne!(structure, style);
    }

    #[test]
    fn test_grammar_level_has_no_structure_or_style_wording() {
        let prompt = build_improvement_prompt(
            "Sentence structure matters.",
            &config(ImprovementLevel::Grammar, "Default"),
        );
        let instruction = prompt.split("\n\nText: ").next().unwrap();

        assert!(!instruction.contains("improve sentence structure"));
        assert!(!instruction.contains("word choice"));

        let style_prompt =
            build_improvement_prompt("x", &config(ImprovementLevel::Style, "Default"));
        assert!(style_prompt.contains("enhance word choice"));
    }

    #[test]
    fn test_custom_style_included_once() {
        let prompt = build_improvement_prompt(
            "Some text",
            &config(ImprovementLevel::Style, "Witty"),
        );

        assert_eq!(prompt.matches("Be witty.").count(), 1);
        assert!(prompt.contains("writing style for the following text. Be witty.\n"));
    }

    #[test]
    fn test_unknown_style_adds_nothing() {
        let unknown = build_improvement_prompt(
            "Some text",
            &config(ImprovementLevel::Style, "Unknown"),
        );
        let default = build_improvement_prompt(
            "Some text",
            &config(ImprovementLevel::Style, "Default"),
        );

        assert_eq!(unknown, default);
        assert!(!unknown.contains("Be witty."));
    }

    #[test]
    fn test_text_included_verbatim() {
        let text = "  Multi-line\ntext with {braces}, \"quotes\" and trailing space ";
        for level in [
            ImprovementLevel::Grammar,
            ImprovementLevel::Structure,
            ImprovementLevel::Style,
        ] {
            let prompt = build_improvement_prompt(text, &config(level, "Witty"));
            assert!(prompt.contains(text));
            assert!(prompt.ends_with(text));
        }
    }
}
