use serde::Deserialize;

use super::PipelineError;

/// Raw identification reply, before validation. All fields tolerant: the
/// validator decides what a missing or malformed field becomes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawIdentification {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub predicted_type: Option<String>,
    pub predicted_audience: Option<String>,
    #[serde(default)]
    pub clarifying_questions: Vec<serde_json::Value>,
}

/// Raw analysis reply, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysis {
    pub product_name: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub facts: Vec<serde_json::Value>,
    pub compliance_score: Option<serde_json::Value>,
}

/// Decode phase of the two-phase decode-then-validate step.
///
/// Locates the JSON payload in the model's free-text reply and deserializes
/// it. Failure here is unrecoverable for the reply; the calling stage treats
/// it like a transport failure.
pub fn decode_reply<T: for<'de> Deserialize<'de>>(reply: &str) -> Result<T, PipelineError> {
    let payload = extract_json_payload(reply)?;
    serde_json::from_str(payload).map_err(|e| PipelineError::JsonParsing(e.to_string()))
}

/// Find the JSON object in a reply. Models wrap payloads inconsistently:
/// a ```json fence, a bare ``` fence, or no fence at all.
fn extract_json_payload(reply: &str) -> Result<&str, PipelineError> {
    if let Some(fenced) = extract_fenced(reply, "```json") {
        return Ok(fenced);
    }
    if let Some(fenced) = extract_fenced(reply, "```") {
        return Ok(fenced);
    }

    // Naked object: widest brace span.
    let start = reply.find('{');
    let end = reply.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(reply[start..=end].trim()),
        _ => Err(PipelineError::MalformedResponse(
            "no JSON payload found in reply".into(),
        )),
    }
}

fn extract_fenced<'a>(reply: &'a str, fence: &str) -> Option<&'a str> {
    let start = reply.find(fence)? + fence.len();
    let end = reply[start..].find("```")?;
    Some(reply[start..start + end].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_json_fenced_payload() {
        let reply = "Here is the report:\n```json\n{\"productName\": \"Drone\"}\n```\nDone.";
        let raw: RawIdentification = decode_reply(reply).unwrap();
        assert_eq!(raw.product_name.as_deref(), Some("Drone"));
    }

    #[test]
    fn decodes_bare_fenced_payload() {
        let reply = "```\n{\"productName\": \"Drone\", \"description\": \"Quadcopter\"}\n```";
        let raw: RawIdentification = decode_reply(reply).unwrap();
        assert_eq!(raw.description.as_deref(), Some("Quadcopter"));
    }

    #[test]
    fn decodes_naked_object() {
        let reply = "Sure! {\"productName\": \"Drone\", \"facts\": [], \"complianceScore\": 72}";
        let raw: RawAnalysis = decode_reply(reply).unwrap();
        assert_eq!(raw.product_name.as_deref(), Some("Drone"));
        assert_eq!(raw.compliance_score, Some(serde_json::json!(72)));
    }

    #[test]
    fn missing_payload_is_malformed() {
        let result: Result<RawIdentification, _> = decode_reply("No JSON here, just prose.");
        assert!(matches!(result, Err(PipelineError::MalformedResponse(_))));
    }

    #[test]
    fn invalid_json_is_a_parsing_error() {
        let result: Result<RawIdentification, _> = decode_reply("```json\n{broken\n```");
        assert!(matches!(result, Err(PipelineError::JsonParsing(_))));
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let reply = r#"{"productName": "Drone", "brandGuess": "Acme", "confidence": 0.8}"#;
        let raw: RawIdentification = decode_reply(reply).unwrap();
        assert_eq!(raw.product_name.as_deref(), Some("Drone"));
        assert!(raw.clarifying_questions.is_empty());
    }

    #[test]
    fn facts_default_to_empty() {
        let raw: RawAnalysis = decode_reply(r#"{"productName": "Drone"}"#).unwrap();
        assert!(raw.facts.is_empty());
        assert!(raw.compliance_score.is_none());
    }
}
