use serde::Deserialize;

use crate::models::{Audience, FactStatus, ProductKind};

use super::parser::{RawAnalysis, RawIdentification};
use super::translate::translate_label;
use super::types::{ClarifyingQuestion, ComplianceFact, IdentificationResult, ProductAnalysis};

/// Score substituted when the reply carries no usable score.
pub const DEFAULT_SCORE: u8 = 50;

/// Placeholder description when the reply carries none.
pub const FALLBACK_DESCRIPTION: &str = "Apraksts nav pieejams.";

/// Placeholder product name: the untranslatable-category form the heuristic
/// engine also uses.
pub fn fallback_product_name() -> String {
    translate_label("Unknown Product")
}

/// Validate phase for identification replies: substitute placeholders for
/// missing strings, coerce enum axes to their defaults, and drop malformed
/// question entries.
pub fn normalize_identification(raw: RawIdentification) -> IdentificationResult {
    let product_name = non_empty(raw.product_name).unwrap_or_else(fallback_product_name);
    let description =
        non_empty(raw.description).unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    let predicted_type = raw
        .predicted_type
        .as_deref()
        .map(ProductKind::coerce)
        .unwrap_or_default();
    let predicted_audience = raw
        .predicted_audience
        .as_deref()
        .map(Audience::coerce)
        .unwrap_or_default();

    let clarifying_questions = raw
        .clarifying_questions
        .iter()
        .filter_map(normalize_question)
        .collect();

    IdentificationResult {
        product_name,
        description,
        predicted_type,
        predicted_audience,
        clarifying_questions,
    }
}

/// Validate phase for analysis replies. `fallback_name` is the best name
/// known to the caller (usually from the scan context).
pub fn normalize_analysis(raw: RawAnalysis, fallback_name: &str) -> ProductAnalysis {
    let product_name = non_empty(raw.product_name)
        .or_else(|| non_empty(Some(fallback_name.to_string())))
        .unwrap_or_else(fallback_product_name);
    let description =
        non_empty(raw.description).unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    let mut facts: Vec<ComplianceFact> = Vec::with_capacity(raw.facts.len());
    for (index, value) in raw.facts.iter().enumerate() {
        match normalize_fact(value, index) {
            Some(fact) => facts.push(fact),
            None => tracing::warn!(index, "dropping malformed compliance fact"),
        }
    }

    ProductAnalysis {
        product_name,
        description,
        facts,
        compliance_score: normalize_score(raw.compliance_score.as_ref()),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Deserialize)]
struct RawQuestion {
    question: Option<String>,
    #[serde(default)]
    options: Vec<serde_json::Value>,
}

/// A question survives only with non-empty text and 2–4 non-empty string
/// options; anything else is dropped rather than surfaced half-formed.
fn normalize_question(value: &serde_json::Value) -> Option<ClarifyingQuestion> {
    let raw: RawQuestion = serde_json::from_value(value.clone()).ok()?;
    let question = non_empty(raw.question)?;
    let options: Vec<String> = raw
        .options
        .iter()
        .filter_map(|o| non_empty(o.as_str().map(str::to_string)))
        .collect();
    if !(2..=4).contains(&options.len()) {
        return None;
    }
    Some(ClarifyingQuestion { question, options })
}

#[derive(Deserialize)]
struct RawFact {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    source: Option<String>,
    status: Option<String>,
}

fn normalize_fact(value: &serde_json::Value, index: usize) -> Option<ComplianceFact> {
    let raw: RawFact = serde_json::from_value(value.clone()).ok()?;
    let title = non_empty(raw.title)?;
    Some(ComplianceFact {
        id: non_empty(raw.id).unwrap_or_else(|| format!("fact-{}", index + 1)),
        title,
        description: non_empty(raw.description).unwrap_or_default(),
        source: non_empty(raw.source).unwrap_or_else(|| "visual analysis".to_string()),
        status: raw
            .status
            .as_deref()
            .map(FactStatus::coerce)
            .unwrap_or_default(),
    })
}

fn normalize_score(value: Option<&serde_json::Value>) -> u8 {
    match value.and_then(|v| v.as_f64()) {
        Some(score) => score.round().clamp(0.0, 100.0) as u8,
        None => DEFAULT_SCORE,
    }
}
