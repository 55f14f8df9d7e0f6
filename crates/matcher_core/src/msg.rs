use crate::{AnalysisResult, CandidateId, ResumeFile, RunId};

/// Outcome of a remote call; the error is a human-readable detail string.
pub type RemoteResult<T> = Result<T, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a resume document.
    FileSelected(ResumeFile),
    /// User pressed submit.
    SubmitClicked,
    /// User asked to start over.
    ResetClicked,
    /// Upload call returned.
    UploadFinished {
        run: RunId,
        result: RemoteResult<CandidateId>,
    },
    /// Analyze call returned.
    AnalysisFinished {
        run: RunId,
        result: RemoteResult<AnalysisResult>,
    },
    /// Generate-matches call returned. The response body is not used.
    MatchesGenerated { run: RunId, result: RemoteResult<()> },
}
