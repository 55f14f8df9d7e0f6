use crate::{CandidateId, ResumeFile, RunId};

/// Remote call requested by `update`. At most one is emitted per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    UploadResume { run: RunId, file: ResumeFile },
    AnalyzeResume { run: RunId, candidate_id: CandidateId },
    GenerateMatches { run: RunId, candidate_id: CandidateId },
}

impl Effect {
    pub fn run(&self) -> RunId {
        match self {
            Effect::UploadResume { run, .. }
            | Effect::AnalyzeResume { run, .. }
            | Effect::GenerateMatches { run, .. } => *run,
        }
    }
}
