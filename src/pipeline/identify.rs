use std::sync::Arc;

use crate::config::ScanConfig;
use crate::models::{Audience, ProductKind};

use super::parser::{decode_reply, RawIdentification};
use super::prompt::IDENTIFICATION_PROMPT;
use super::types::{IdentificationResult, ReasoningClient};
use super::validation::{fallback_product_name, normalize_identification};
use super::PipelineError;

/// Stage one of the scan: name the product, classify it on both axes, and
/// produce clarifying questions for the user.
///
/// Never fails the request: a missing credential or a bad reply degrades to
/// a default or error-carrying result the caller can still render.
pub struct IdentificationStage {
    config: ScanConfig,
    client: Arc<dyn ReasoningClient>,
}

impl IdentificationStage {
    pub fn new(config: ScanConfig, client: Arc<dyn ReasoningClient>) -> Self {
        Self { config, client }
    }

    pub fn identify(&self, image: &[u8], mime_type: &str) -> IdentificationResult {
        let _span =
            tracing::info_span!("identify_product", image_size = image.len()).entered();

        // Checked precondition, not an error path: unconfigured deployments
        // go straight to the offline default without an outbound call.
        if !self.config.has_reasoning_credential() {
            tracing::debug!("no reasoning credential configured, using offline default");
            return offline_default();
        }

        let reply = match self.client.generate(IDENTIFICATION_PROMPT, image, mime_type) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "identification call failed");
                return error_result(&e);
            }
        };

        match decode_reply::<RawIdentification>(&reply) {
            Ok(raw) => {
                let result = normalize_identification(raw);
                tracing::info!(
                    product_name = %result.product_name,
                    questions = result.clarifying_questions.len(),
                    "identification complete"
                );
                result
            }
            Err(e) => {
                tracing::warn!(error = %e, "identification reply failed validation");
                error_result(&e)
            }
        }
    }
}

/// Safe default when no reasoning credential is configured.
fn offline_default() -> IdentificationResult {
    IdentificationResult {
        product_name: fallback_product_name(),
        description: "Produkta identifikācija bez AI pakalpojuma nav pieejama.".into(),
        predicted_type: ProductKind::Physical,
        predicted_audience: Audience::B2c,
        clarifying_questions: vec![],
    }
}

/// Terminal-for-the-request result carrying the error detail. Surfaced to the
/// caller instead of retried; the process itself is unaffected.
fn error_result(error: &PipelineError) -> IdentificationResult {
    IdentificationResult {
        product_name: "error".into(),
        description: error.to_string(),
        predicted_type: ProductKind::Physical,
        predicted_audience: Audience::B2c,
        clarifying_questions: vec![],
    }
}
