//! Prompt text sent to the generation service for a single question.

use crate::quiz::Difficulty;

/// Categories used when the configuration does not name any.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "syntax",
    "types",
    "ownership",
    "concurrency",
    "traits",
    "errors",
    "collections",
];

fn difficulty_guidance(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "basic concepts a beginner should know",
        Difficulty::Medium => "intermediate concepts that need some practice",
        Difficulty::Hard => "advanced concepts, edge cases and subtle behaviour",
    }
}

/// Build the request asking for exactly one JSON question object.
pub fn build_prompt(language: &str, difficulty: Difficulty, category: &str) -> String {
    format!(
        r#"You are an expert {language} instructor writing quiz material.

Write ONE multiple-choice question about {language}.
Topic: {category}
Level: {level} ({guidance})

Rules:
- exactly 4 options, only one of them correct
- "resposta" must repeat the correct option text exactly
- the explanation should teach, not just restate the answer

Reply with ONLY this JSON object and nothing else:
{{
  "questao": "question text",
  "opcoes": ["option 1", "option 2", "option 3", "option 4"],
  "resposta": "the correct option, copied exactly",
  "explicacao": "why it is correct",
  "dificuldade": "{level}",
  "categoria": "{category}"
}}"#,
        language = language,
        category = category,
        level = difficulty.wire_name(),
        guidance = difficulty_guidance(difficulty),
    )
}
