/// Failure to turn mesh bytes into a template. The part using it is skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("empty mesh buffer for {filename}")]
    Empty { filename: String },

    #[error("unsupported mesh format: {filename}")]
    UnsupportedFormat { filename: String },

    #[error("malformed mesh {filename}: {reason}")]
    Malformed { filename: String, reason: String },
}

/// Errors from [`Assembler::run`](crate::Assembler::run).
///
/// Missing or undecodable geometry is never an error; only cancellation stops
/// an assembly early.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssembleError {
    #[error("scene assembly cancelled after {completed_parts} of {total_parts} parts")]
    Cancelled {
        completed_parts: usize,
        total_parts: usize,
    },
}
