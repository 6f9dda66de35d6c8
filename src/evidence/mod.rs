pub mod extractor;
pub mod types;

pub use extractor::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The collaborator could not read the image at all (corrupt bytes,
    /// unsupported format). The one failure the pipeline cannot paper over.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    #[error("label detection transport error: {0}")]
    LabelTransport(String),

    #[error("text detection transport error: {0}")]
    TextTransport(String),
}
