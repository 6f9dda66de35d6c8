use super::types::ScanContext;

/// Identification task prompt. One request: name and describe the product
/// from pixel content, classify it on both axes, and propose clarifying
/// questions that narrow down applicable regulation.
pub const IDENTIFICATION_PROMPT: &str = r#"You are a product identification assistant for an EU consumer-protection compliance check.

Look at the attached product photograph and respond with a single JSON object.

RULES:
1. Identify the product from its visible physical characteristics ONLY. Ignore marketing claims, slogans, and promotional text printed on the packaging.
2. Give a short functional product name and a neutral one-sentence description.
3. Classify the product on two axes:
   - predictedType: one of "physical", "digital_content", "digital_service", "combined"
   - predictedAudience: one of "b2b", "b2c", "mixed"
4. Propose 2-3 clarifying questions whose answers change which EU regulation applies. Each question must have 2-4 concrete, mutually exclusive answer options: use numeric thresholds for power or speed (e.g. "under 19 m/s" / "19 m/s or more"), connectivity presence (e.g. "yes, wireless" / "no"), or plain "yes" / "no" / "unsure".
5. Output ONLY the JSON object, wrapped in a ```json fence.

OUTPUT FORMAT:
```json
{
  "productName": "short functional name",
  "description": "neutral one-sentence description",
  "predictedType": "physical",
  "predictedAudience": "b2c",
  "clarifyingQuestions": [
    {
      "question": "question text",
      "options": ["option 1", "option 2"]
    }
  ]
}
```"#;

/// Build the compliance-analysis prompt from the accumulated scan context.
pub fn build_analysis_prompt(context: &ScanContext) -> String {
    let answers = if context.answers.is_empty() {
        "  (none)".to_string()
    } else {
        context
            .answers
            .iter()
            .map(|(q, a)| format!("  - {q}: {a}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        r#"You are an EU consumer-protection compliance assistant. Assess the product in the attached photograph for a commercial seller preparing a listing.

PRODUCT CONTEXT:
- Product name: {name}
- Product type: {kind}
- Target audience: {audience}
- Clarifying answers:
{answers}

TASK:
Produce a compliance report with 6-8 facts. Weight the facts toward:
1. Material and safety composition visible in the photograph.
2. EU directives applicable given the product type and target audience.
3. Whether the visible labeling is appropriate for the stated audience.

Each fact needs: a short stable id, a title, a description, a source (the regulation code, or "visual analysis" for observations), and a status that is exactly one of "compliant", "warning", "non-compliant", "unknown".

Also give an overall complianceScore between 0 and 100.

Output ONLY the JSON object, wrapped in a ```json fence.

OUTPUT FORMAT:
```json
{{
  "productName": "{name}",
  "description": "one-sentence product summary",
  "facts": [
    {{
      "id": "short-id",
      "title": "fact title",
      "description": "what the seller must check or do",
      "source": "EU 2023/988",
      "status": "warning"
    }}
  ],
  "complianceScore": 50
}}
```"#,
        name = context.product_name,
        kind = context.product_type,
        audience = context.target_audience,
        answers = answers,
    )
}
