//! Turning raw model output into a validated question.
//!
//! The model is not trusted to return clean JSON: it may wrap the object in
//! commentary or code fences. The first balanced `{...}` span is extracted,
//! decoded, and checked against the question schema.

use serde::{Deserialize, Deserializer};

use crate::errors::GenerationError;
use crate::quiz::{Difficulty, Question};

/// Number of options a generated question must carry.
pub const REQUIRED_OPTIONS: usize = 4;

/// Candidate record as the model emits it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratedQuestion {
    #[serde(rename = "questao", deserialize_with = "null_as_default")]
    pub prompt: String,
    #[serde(rename = "opcoes", deserialize_with = "null_as_default")]
    pub options: Vec<String>,
    #[serde(rename = "resposta", deserialize_with = "null_as_default")]
    pub answer: String,
    #[serde(rename = "explicacao", deserialize_with = "null_as_default")]
    pub explanation: String,
    #[serde(rename = "dificuldade", deserialize_with = "null_as_default")]
    pub difficulty: String,
    #[serde(rename = "categoria", deserialize_with = "null_as_default")]
    pub category: String,
}

/// Models sometimes emit `null` for fields they have nothing to say about.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl GeneratedQuestion {
    /// Check the schema rules. No normalization is applied.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.prompt.is_empty() {
            return Err(GenerationError::SchemaViolation(
                "question text is empty".to_string(),
            ));
        }

        if self.options.len() != REQUIRED_OPTIONS {
            return Err(GenerationError::SchemaViolation(format!(
                "expected exactly {} options, found {}",
                REQUIRED_OPTIONS,
                self.options.len()
            )));
        }

        let answer = self.answer.trim();
        if !self.options.iter().any(|o| o.trim() == answer) {
            return Err(GenerationError::SchemaViolation(format!(
                "answer '{}' is not one of the options",
                self.answer
            )));
        }

        Ok(())
    }

    /// Build the final question. Missing or unknown tier and category fall
    /// back to what was requested.
    pub fn into_question(self, id: u32, requested: Difficulty, category: &str) -> Question {
        let difficulty = Difficulty::from_label(&self.difficulty).unwrap_or(requested);
        let category = if self.category.trim().is_empty() {
            category.to_string()
        } else {
            self.category
        };
        Question {
            id,
            prompt: self.prompt,
            options: self.options,
            answer: self.answer,
            explanation: self.explanation,
            difficulty,
            category,
        }
    }
}

/// Return the first balanced `{...}` span in `text`.
///
/// Braces inside JSON string literals are ignored. `None` if there is no
/// opening brace or it is never closed.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract, decode, and validate a candidate from raw model output.
pub fn parse_generated(raw: &str) -> Result<GeneratedQuestion, GenerationError> {
    let span = extract_json_object(raw).ok_or_else(|| {
        GenerationError::MalformedResponse("no JSON object found in response".to_string())
    })?;

    let candidate: GeneratedQuestion = serde_json::from_str(span)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid question JSON: {}", e)))?;

    candidate.validate()?;
    Ok(candidate)
}
