use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PipelineError;
use crate::models::{Audience, FactStatus, ProductKind};

/// One atomic compliance statement about the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceFact {
    /// Stable short identifier, unique within one report.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Citation: a regulation code or "visual analysis".
    pub source: String,
    pub status: FactStatus,
}

/// Complete compliance report for one scanned product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductAnalysis {
    pub product_name: String,
    pub description: String,
    /// Insertion order = evaluation order.
    pub facts: Vec<ComplianceFact>,
    /// Aggregate score, always within 0–100.
    pub compliance_score: u8,
}

/// A discrete-choice question generated during identification to narrow down
/// applicable regulation before the analysis stage runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClarifyingQuestion {
    pub question: String,
    /// 2–4 mutually exclusive answer options.
    pub options: Vec<String>,
}

/// Result of the identification stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    pub product_name: String,
    pub description: String,
    pub predicted_type: ProductKind,
    pub predicted_audience: Audience,
    pub clarifying_questions: Vec<ClarifyingQuestion>,
}

/// Context accumulated between identification and analysis. Owned by the
/// orchestrator for the duration of one identify→analyze round trip; the
/// surrounding application collects the user's selections and answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanContext {
    pub product_name: String,
    /// Resolved display label for the product-type selection, not the raw id.
    pub product_type: String,
    /// Resolved display label for the audience selection.
    pub target_audience: String,
    /// Clarifying-question text → chosen option text.
    #[serde(default)]
    pub answers: BTreeMap<String, String>,
}

/// Generative reasoning service abstraction (allows mocking).
///
/// One prompt plus one image in, one raw text reply out. Treated as
/// unreliable: may time out, return non-conforming text, or be entirely
/// unconfigured.
pub trait ReasoningClient: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
    ) -> Result<String, PipelineError>;
}
