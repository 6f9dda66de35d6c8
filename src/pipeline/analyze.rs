use std::sync::Arc;

use crate::config::ScanConfig;
use crate::models::FactStatus;

use super::parser::{decode_reply, RawAnalysis};
use super::prompt::build_analysis_prompt;
use super::rules::seed_facts;
use super::types::{ComplianceFact, ProductAnalysis, ReasoningClient, ScanContext};
use super::validation::{normalize_analysis, DEFAULT_SCORE};
use super::PipelineError;

/// Stage two of the scan: the full compliance report, conditioned on the
/// image plus everything learned since identification.
///
/// Like identification, this stage absorbs every recoverable failure: the
/// caller always receives a schema-valid report, possibly of fallback quality.
pub struct AnalysisStage {
    config: ScanConfig,
    client: Arc<dyn ReasoningClient>,
}

impl AnalysisStage {
    pub fn new(config: ScanConfig, client: Arc<dyn ReasoningClient>) -> Self {
        Self { config, client }
    }

    pub fn analyze(
        &self,
        image: &[u8],
        mime_type: &str,
        context: &ScanContext,
    ) -> ProductAnalysis {
        let _span = tracing::info_span!(
            "analyze_compliance",
            product_name = %context.product_name,
            answers = context.answers.len(),
        )
        .entered();

        if !self.config.has_reasoning_credential() {
            tracing::debug!("no reasoning credential configured, using generic report");
            return offline_report(context);
        }

        let prompt = build_analysis_prompt(context);
        let reply = match self.client.generate(&prompt, image, mime_type) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "analysis call failed");
                return error_report(context, &e);
            }
        };

        match decode_reply::<RawAnalysis>(&reply) {
            Ok(raw) => {
                let report = normalize_analysis(raw, &context.product_name);
                tracing::info!(
                    facts = report.facts.len(),
                    score = report.compliance_score,
                    "analysis complete"
                );
                report
            }
            Err(e) => {
                tracing::warn!(error = %e, "analysis reply failed validation");
                error_report(context, &e)
            }
        }
    }
}

/// Generic two-fact report for unconfigured deployments.
fn offline_report(context: &ScanContext) -> ProductAnalysis {
    ProductAnalysis {
        product_name: context.product_name.clone(),
        description: format!(
            "{} — vispārīgs atbilstības pārskats bez AI analīzes.",
            context.product_name
        ),
        facts: seed_facts(),
        compliance_score: DEFAULT_SCORE,
    }
}

/// Two-fact fallback after a failed generative call: the general-safety seed
/// fact plus an identification echo carrying the error detail.
fn error_report(context: &ScanContext, error: &PipelineError) -> ProductAnalysis {
    let general_safety = seed_facts().remove(0);
    ProductAnalysis {
        product_name: context.product_name.clone(),
        description: format!(
            "{} — padziļinātā analīze neizdevās, pieejams tikai vispārīgs pārskats.",
            context.product_name
        ),
        facts: vec![
            general_safety,
            ComplianceFact {
                id: "identification-echo".into(),
                title: "Produkta identifikācija".into(),
                description: error.to_string(),
                source: "visual analysis".into(),
                status: FactStatus::Unknown,
            },
        ],
        compliance_score: DEFAULT_SCORE,
    }
}
