use crate::evidence::Evidence;

use super::rules::{seed_facts, RULES};
use super::translate::translate_label;
use super::types::{ComplianceFact, ProductAnalysis};

/// How many prominent text lines feed the brand/model hint.
const PROMINENT_TEXT_LINES: usize = 2;

/// Deterministic, network-free compliance analysis over vision evidence.
///
/// Used as the zero-configuration baseline and as the fallback whenever the
/// reasoning service is unusable. Pure function over its input: missing
/// evidence degrades to the two seed facts, never to an error.
pub fn analyze_heuristically(evidence: &Evidence) -> ProductAnalysis {
    let prominent = evidence.prominent_text(PROMINENT_TEXT_LINES).join(" ");

    let category = translate_label(
        evidence
            .confident_labels()
            .next()
            .map(|l| l.name.as_str())
            .unwrap_or("Unknown Product"),
    );

    let product_name = if prominent.is_empty() {
        category.clone()
    } else {
        format!("{category} ({prominent})")
    };

    let mut facts = seed_facts();

    // Keyword matching over all confident label names plus prominent text.
    let haystack = full_context(evidence, &prominent);
    for rule in RULES {
        if rule.matches(&haystack) {
            facts.push(rule.fact());
        }
    }

    let compliance_score = score_facts(&facts);

    let description = if prominent.is_empty() {
        format!("{category} identificēts ar vizuālo analīzi.")
    } else {
        format!("{category} identificēts ar vizuālo analīzi. Atrasts teksts: {prominent}")
    };

    tracing::debug!(
        product_name = %product_name,
        facts = facts.len(),
        score = compliance_score,
        "heuristic analysis complete"
    );

    ProductAnalysis {
        product_name,
        description,
        facts,
        compliance_score,
    }
}

/// Rounded arithmetic mean of per-fact status weights; empty facts score 0.
pub fn score_facts(facts: &[ComplianceFact]) -> u8 {
    if facts.is_empty() {
        return 0;
    }
    let sum: u32 = facts.iter().map(|f| f.status.score()).sum();
    (f64::from(sum) / facts.len() as f64).round() as u8
}

fn full_context(evidence: &Evidence, prominent: &str) -> String {
    let labels = evidence
        .confident_labels()
        .map(|l| l.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{labels} {}", prominent.to_lowercase())
}
