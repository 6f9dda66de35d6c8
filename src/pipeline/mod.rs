pub mod analyze;
pub mod gemini;
pub mod heuristic;
pub mod identify;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod rules;
pub mod translate;
pub mod types;
pub mod validation;

pub use analyze::*;
pub use gemini::*;
pub use heuristic::*;
pub use identify::*;
pub use orchestrator::*;
pub use parser::*;
pub use prompt::*;
pub use rules::*;
pub use translate::*;
pub use types::*;
pub use validation::*;

use thiserror::Error;

/// Failures at the reasoning-service boundary. All of these are recoverable:
/// the stage that encounters one falls back instead of failing the scan.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("reasoning service unreachable at {0}")]
    Connection(String),

    #[error("reasoning service returned error (status {status}): {body}")]
    ServiceError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("malformed reasoning reply: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("response parsing error: {0}")]
    ResponseParsing(String),
}
