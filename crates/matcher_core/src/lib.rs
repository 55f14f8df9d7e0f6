//! Matcher core: pure upload-workflow state machine, job search and
//! view-model helpers.
mod effect;
mod error;
mod matches;
mod model;
mod msg;
mod search;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use error::{PipelineStep, WorkflowError};
pub use matches::MatchesView;
pub use model::{
    is_accepted_media_type, AnalysisResult, CandidateId, Job, JobId, Match, ResumeFile,
    ACCEPTED_MEDIA_TYPE,
};
pub use msg::{Msg, RemoteResult};
pub use search::{filter_jobs, JobSearchFilter};
pub use state::{RunId, Stage, WorkflowState};
pub use update::update;
pub use view_model::WorkflowViewModel;
