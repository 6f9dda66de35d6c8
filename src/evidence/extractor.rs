use std::thread;

use super::types::{DetectedLabel, DetectedTextLine, Evidence};
use super::ExtractionError;

/// Object/category detection half of the vision collaborator.
pub trait LabelDetector: Send + Sync {
    fn detect_labels(&self, image: &[u8]) -> Result<Vec<DetectedLabel>, ExtractionError>;
}

/// OCR half of the vision collaborator.
pub trait TextDetector: Send + Sync {
    fn detect_text(&self, image: &[u8]) -> Result<Vec<DetectedTextLine>, ExtractionError>;
}

/// Run both detection branches concurrently and join into one `Evidence`.
///
/// A transport failure on one branch degrades that branch to an empty
/// collection — the heuristic engine still runs on whatever was obtained.
/// An invalid image is a hard failure from either branch: there is nothing
/// to analyze at all, so it propagates.
pub fn extract_evidence(
    labels: &dyn LabelDetector,
    text: &dyn TextDetector,
    image: &[u8],
) -> Result<Evidence, ExtractionError> {
    let (label_result, text_result) = thread::scope(|s| {
        let label_handle = s.spawn(|| labels.detect_labels(image));
        let text_handle = s.spawn(|| text.detect_text(image));
        (
            join_branch(label_handle, ExtractionError::LabelTransport),
            join_branch(text_handle, ExtractionError::TextTransport),
        )
    });

    let labels = match label_result {
        Ok(labels) => labels,
        Err(e @ ExtractionError::InvalidImage(_)) => return Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "label detection failed, continuing without labels");
            Vec::new()
        }
    };

    let text_lines = match text_result {
        Ok(lines) => lines,
        Err(e @ ExtractionError::InvalidImage(_)) => return Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "text detection failed, continuing without text");
            Vec::new()
        }
    };

    tracing::debug!(
        labels = labels.len(),
        text_lines = text_lines.len(),
        "evidence extraction complete"
    );

    Ok(Evidence { labels, text_lines })
}

/// A panicked detector thread is treated as a transport failure on its branch.
fn join_branch<T>(
    handle: thread::ScopedJoinHandle<'_, Result<T, ExtractionError>>,
    on_panic: fn(String) -> ExtractionError,
) -> Result<T, ExtractionError> {
    handle
        .join()
        .unwrap_or_else(|_| Err(on_panic("detector panicked".into())))
}
