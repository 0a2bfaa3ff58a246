use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrdError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Line numbers are 0-based, counted over the raw input lines.
    #[error("Check CRD format at line {line}: {content}")]
    Format { line: usize, content: String },

    #[error("Invalid value for field '{field}' on line {line}: '{value}'")]
    InvalidField {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Required ATOM field '{field}' must be defined")]
    MissingField { field: &'static str },

    #[error("CRD files contain a single frame; frame index {index} is out of range")]
    FrameIndex { index: usize },

    #[error("Header declares {declared} atoms but {parsed} coordinate records were found")]
    AtomCountMismatch { declared: usize, parsed: usize },

    #[error("No CRD header or atom records found")]
    EmptyFile,
}
