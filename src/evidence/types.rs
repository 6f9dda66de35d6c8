use serde::{Deserialize, Serialize};

/// Labels below this confidence are excluded from heuristic reasoning.
pub const LABEL_CONFIDENCE_FLOOR: f32 = 75.0;

/// Text lines must exceed this confidence to count as prominent text.
pub const PROMINENT_TEXT_CONFIDENCE: f32 = 85.0;

/// One object/category label detected in the image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedLabel {
    pub name: String,
    pub confidence: f32,
}

/// Granularity of a detected text fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextKind {
    Line,
    Word,
}

/// One OCR text fragment detected in the image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTextLine {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: TextKind,
    pub confidence: f32,
}

/// Combined vision output for one image, validated at the extraction boundary
/// so downstream consumers never re-check shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(default)]
    pub labels: Vec<DetectedLabel>,
    #[serde(default)]
    pub text_lines: Vec<DetectedTextLine>,
}

impl Evidence {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty() && self.text_lines.is_empty()
    }

    /// Labels confident enough for heuristic reasoning, in detection order.
    pub fn confident_labels(&self) -> impl Iterator<Item = &DetectedLabel> {
        self.labels
            .iter()
            .filter(|l| l.confidence >= LABEL_CONFIDENCE_FLOOR)
    }

    /// Up to `max` highest-confidence LINE fragments above the prominence
    /// threshold — the de facto brand/model hint on product packaging.
    pub fn prominent_text(&self, max: usize) -> Vec<&str> {
        let mut lines: Vec<&DetectedTextLine> = self
            .text_lines
            .iter()
            .filter(|t| t.kind == TextKind::Line && t.confidence > PROMINENT_TEXT_CONFIDENCE)
            .collect();
        lines.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        lines.into_iter().take(max).map(|t| t.text.as_str()).collect()
    }
}
