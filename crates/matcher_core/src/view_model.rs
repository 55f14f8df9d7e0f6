use crate::{AnalysisResult, CandidateId, Stage};

/// Everything a front end needs to draw the upload page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowViewModel {
    pub stage: Stage,
    pub status_message: String,
    pub error: Option<String>,
    /// File the next submit would upload.
    pub file_name: Option<String>,
    /// False while a run is active or when no file is held.
    pub can_submit: bool,
    pub analysis: Option<AnalysisResult>,
    /// Set once upload succeeded; the key for the matches view.
    pub candidate_id: Option<CandidateId>,
    /// File the shown results belong to.
    pub run_file_name: Option<String>,
    pub dirty: bool,
}
