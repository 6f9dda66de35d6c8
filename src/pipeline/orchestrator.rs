use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::config::ScanConfig;
use crate::evidence::Evidence;

use super::analyze::AnalysisStage;
use super::heuristic::analyze_heuristically;
use super::identify::IdentificationStage;
use super::types::{IdentificationResult, ProductAnalysis, ReasoningClient, ScanContext};

/// Caller-contract violations — the only failures the orchestrator raises.
/// Everything recoverable is absorbed inside the stages.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("scan is in state {actual}, expected {expected}")]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("scan context incomplete: {0}")]
    IncompleteContext(String),
}

/// Per-scan lifecycle. Identification always completes (its own fallbacks
/// count), so the only conditional transition is the caller supplying a
/// complete context for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Identifying,
    AwaitingUserInput,
    Analyzing,
    Done,
}

impl ScanState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Identifying => "identifying",
            Self::AwaitingUserInput => "awaiting_user_input",
            Self::Analyzing => "analyzing",
            Self::Done => "done",
        }
    }
}

/// State held for one identify→analyze round trip. Created fresh per scan
/// request and discarded with the response.
#[derive(Debug)]
pub struct ScanSession {
    pub scan_id: Uuid,
    state: ScanState,
    identification: Option<IdentificationResult>,
}

impl ScanSession {
    fn new() -> Self {
        Self {
            scan_id: Uuid::new_v4(),
            state: ScanState::Identifying,
            identification: None,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn identification(&self) -> Option<&IdentificationResult> {
        self.identification.as_ref()
    }
}

/// Public entry point for the surrounding application: sequences the two
/// generative stages, enforces their ordering, and exposes the heuristic
/// engine for the evidence-only path.
pub struct ScanPipeline {
    identification: IdentificationStage,
    analysis: AnalysisStage,
}

impl ScanPipeline {
    pub fn new(config: ScanConfig, client: Arc<dyn ReasoningClient>) -> Self {
        Self {
            identification: IdentificationStage::new(config.clone(), client.clone()),
            analysis: AnalysisStage::new(config, client),
        }
    }

    /// Start a new scan in the `Identifying` state.
    pub fn begin(&self) -> ScanSession {
        ScanSession::new()
    }

    /// Run identification. Transitions to `AwaitingUserInput` unconditionally:
    /// the stage's own fallbacks count as completed identification.
    pub fn identify(
        &self,
        session: &mut ScanSession,
        image: &[u8],
        mime_type: &str,
    ) -> Result<IdentificationResult, ScanError> {
        self.expect_state(session, ScanState::Identifying)?;
        let _span =
            tracing::info_span!("scan_identify", scan_id = %session.scan_id).entered();

        let result = self.identification.identify(image, mime_type);
        session.identification = Some(result.clone());
        session.state = ScanState::AwaitingUserInput;
        Ok(result)
    }

    /// Run compliance analysis with the caller-populated context. Requires a
    /// completed identification and an answer for every clarifying question.
    pub fn analyze(
        &self,
        session: &mut ScanSession,
        image: &[u8],
        mime_type: &str,
        context: &ScanContext,
    ) -> Result<ProductAnalysis, ScanError> {
        self.expect_state(session, ScanState::AwaitingUserInput)?;
        self.check_context(session, context)?;

        let _span = tracing::info_span!("scan_analyze", scan_id = %session.scan_id).entered();
        session.state = ScanState::Analyzing;
        let report = self.analysis.analyze(image, mime_type, context);
        session.state = ScanState::Done;
        Ok(report)
    }

    /// Deterministic analysis when evidence is the only available input.
    /// Independent of any session: the heuristic engine substitutes for the
    /// generative stages, it does not share their lifecycle.
    pub fn scan_evidence(&self, evidence: &Evidence) -> ProductAnalysis {
        analyze_heuristically(evidence)
    }

    fn expect_state(&self, session: &ScanSession, expected: ScanState) -> Result<(), ScanError> {
        if session.state != expected {
            return Err(ScanError::InvalidState {
                expected: expected.as_str(),
                actual: session.state.as_str(),
            });
        }
        Ok(())
    }

    /// A complete context names the product, both axis selections, and an
    /// answer for every clarifying question identification produced.
    fn check_context(
        &self,
        session: &ScanSession,
        context: &ScanContext,
    ) -> Result<(), ScanError> {
        if context.product_name.trim().is_empty() {
            return Err(ScanError::IncompleteContext("product name missing".into()));
        }
        if context.product_type.trim().is_empty() {
            return Err(ScanError::IncompleteContext("product type not selected".into()));
        }
        if context.target_audience.trim().is_empty() {
            return Err(ScanError::IncompleteContext(
                "target audience not selected".into(),
            ));
        }

        if let Some(identification) = &session.identification {
            for question in &identification.clarifying_questions {
                if !context.answers.contains_key(&question.question) {
                    return Err(ScanError::IncompleteContext(format!(
                        "unanswered question: {}",
                        question.question
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::gemini::MockReasoningClient;
    use std::collections::BTreeMap;

    fn identification_reply() -> String {
        r#"```json
{
  "productName": "Quadcopter drone",
  "description": "A small consumer quadcopter.",
  "predictedType": "physical",
  "predictedAudience": "b2c",
  "clarifyingQuestions": [
    {"question": "Maximum speed?", "options": ["under 19 m/s", "19 m/s or more"]}
  ]
}
```"#
            .to_string()
    }

    fn analysis_reply() -> String {
        r#"```json
{
  "productName": "Quadcopter drone",
  "description": "Consumer quadcopter.",
  "facts": [
    {"id": "gpsr", "title": "GPSR", "description": "d", "source": "EU 2023/988", "status": "unknown"},
    {"id": "red", "title": "RED", "description": "d", "source": "2014/53/EU", "status": "warning"}
  ],
  "complianceScore": 62
}
```"#
            .to_string()
    }

    fn answered_context() -> ScanContext {
        let mut answers = BTreeMap::new();
        answers.insert("Maximum speed?".to_string(), "under 19 m/s".to_string());
        ScanContext {
            product_name: "Quadcopter drone".into(),
            product_type: "Fiziska prece".into(),
            target_audience: "B2C".into(),
            answers,
        }
    }

    fn pipeline_with(client: MockReasoningClient) -> ScanPipeline {
        ScanPipeline::new(ScanConfig::new(Some("key".into())), Arc::new(client))
    }

    #[test]
    fn full_round_trip_reaches_done() {
        let pipeline = pipeline_with(MockReasoningClient::with_responses(vec![
            Ok(identification_reply()),
            Ok(analysis_reply()),
        ]));
        let mut session = pipeline.begin();
        assert_eq!(session.state(), ScanState::Identifying);

        let identification = pipeline.identify(&mut session, b"img", "image/jpeg").unwrap();
        assert_eq!(identification.product_name, "Quadcopter drone");
        assert_eq!(session.state(), ScanState::AwaitingUserInput);

        let report = pipeline
            .analyze(&mut session, b"img", "image/jpeg", &answered_context())
            .unwrap();
        assert_eq!(report.compliance_score, 62);
        assert_eq!(report.facts.len(), 2);
        assert_eq!(session.state(), ScanState::Done);
    }

    #[test]
    fn analyze_before_identify_is_invalid_state() {
        let pipeline = pipeline_with(MockReasoningClient::new("unused"));
        let mut session = pipeline.begin();

        let result = pipeline.analyze(&mut session, b"img", "image/jpeg", &answered_context());
        assert!(matches!(result, Err(ScanError::InvalidState { .. })));
        assert_eq!(session.state(), ScanState::Identifying);
    }

    #[test]
    fn identify_twice_is_invalid_state() {
        let pipeline = pipeline_with(MockReasoningClient::new(&identification_reply()));
        let mut session = pipeline.begin();

        pipeline.identify(&mut session, b"img", "image/jpeg").unwrap();
        let result = pipeline.identify(&mut session, b"img", "image/jpeg");
        assert!(matches!(result, Err(ScanError::InvalidState { .. })));
    }

    #[test]
    fn unanswered_question_blocks_analysis() {
        let pipeline = pipeline_with(MockReasoningClient::with_responses(vec![
            Ok(identification_reply()),
            Ok(analysis_reply()),
        ]));
        let mut session = pipeline.begin();
        pipeline.identify(&mut session, b"img", "image/jpeg").unwrap();

        let mut context = answered_context();
        context.answers.clear();
        let result = pipeline.analyze(&mut session, b"img", "image/jpeg", &context);
        assert!(matches!(result, Err(ScanError::IncompleteContext(_))));

        // Still awaiting input; a corrected context may proceed.
        assert_eq!(session.state(), ScanState::AwaitingUserInput);
        let report = pipeline
            .analyze(&mut session, b"img", "image/jpeg", &answered_context())
            .unwrap();
        assert_eq!(session.state(), ScanState::Done);
        assert_eq!(report.facts.len(), 2);
    }

    #[test]
    fn missing_axis_selection_blocks_analysis() {
        let pipeline = pipeline_with(MockReasoningClient::new(&identification_reply()));
        let mut session = pipeline.begin();
        pipeline.identify(&mut session, b"img", "image/jpeg").unwrap();

        let mut context = answered_context();
        context.product_type.clear();
        let result = pipeline.analyze(&mut session, b"img", "image/jpeg", &context);
        assert!(matches!(result, Err(ScanError::IncompleteContext(_))));
    }

    #[test]
    fn failed_identification_still_advances_the_scan() {
        let pipeline = pipeline_with(MockReasoningClient::failing("connection reset"));
        let mut session = pipeline.begin();

        let identification = pipeline.identify(&mut session, b"img", "image/jpeg").unwrap();
        assert_eq!(identification.product_name, "error");
        assert_eq!(session.state(), ScanState::AwaitingUserInput);

        // No questions to answer, so a minimal context completes the scan.
        let context = ScanContext {
            product_name: "Manual entry".into(),
            product_type: "Fiziska prece".into(),
            target_audience: "B2C".into(),
            answers: BTreeMap::new(),
        };
        let report = pipeline
            .analyze(&mut session, b"img", "image/jpeg", &context)
            .unwrap();
        assert_eq!(report.facts.len(), 2);
        assert_eq!(session.state(), ScanState::Done);
    }

    #[test]
    fn unconfigured_pipeline_makes_no_outbound_calls_end_to_end() {
        let client = Arc::new(MockReasoningClient::new("unused"));
        let pipeline = ScanPipeline::new(ScanConfig::unconfigured(), client.clone());
        let mut session = pipeline.begin();

        let identification = pipeline.identify(&mut session, b"img", "image/jpeg").unwrap();
        assert!(identification.clarifying_questions.is_empty());

        let context = ScanContext {
            product_name: identification.product_name.clone(),
            product_type: "Fiziska prece".into(),
            target_audience: "B2C".into(),
            answers: BTreeMap::new(),
        };
        let report = pipeline
            .analyze(&mut session, b"img", "image/jpeg", &context)
            .unwrap();

        assert_eq!(client.call_count(), 0);
        assert!(report.compliance_score <= 100);
        assert!(!report.product_name.is_empty());
        assert_eq!(session.state(), ScanState::Done);
    }

    #[test]
    fn evidence_path_is_session_independent() {
        use crate::evidence::{DetectedLabel, Evidence};

        let pipeline = pipeline_with(MockReasoningClient::new("unused"));
        let evidence = Evidence {
            labels: vec![DetectedLabel {
                name: "Toy".into(),
                confidence: 90.0,
            }],
            text_lines: vec![],
        };
        let report = pipeline.scan_evidence(&evidence);
        assert_eq!(report.compliance_score, 58);
        assert!(report.facts.iter().any(|f| f.id == "toy-safety"));
    }
}
