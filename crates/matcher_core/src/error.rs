use std::fmt;

use thiserror::Error;

/// The three remote steps of a workflow run, in the order they execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStep {
    Upload,
    Analyze,
    GenerateMatches,
}

impl PipelineStep {
    /// The single user-facing message shown when this step fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            PipelineStep::Upload => "Resume upload failed.",
            PipelineStep::Analyze => "Skill analysis failed.",
            PipelineStep::GenerateMatches => "Failed to generate matches.",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStep::Upload => write!(f, "upload"),
            PipelineStep::Analyze => write!(f, "analyze"),
            PipelineStep::GenerateMatches => write!(f, "generate matches"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// The selected file is not a PDF. Raised before any network call.
    #[error("Please select a valid PDF file.")]
    InvalidInput { media_type: String },
    /// The action is not allowed in the current workflow stage.
    #[error("{reason}")]
    Precondition { reason: &'static str },
    /// A remote call failed, could not be reached or answered with a
    /// response missing required fields.
    #[error("{}", .step.failure_message())]
    NetworkOrProtocol { step: PipelineStep, detail: String },
}

impl WorkflowError {
    pub(crate) const NO_FILE: &'static str = "Please select a file before submitting.";
    pub(crate) const RUN_ACTIVE: &'static str = "A resume is already being processed.";
}
