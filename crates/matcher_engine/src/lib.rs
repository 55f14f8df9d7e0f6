//! Matcher engine: remote service client and effect execution.
mod driver;
mod engine;
mod listing;
mod service;
mod settings;
mod types;

pub use driver::{ProgressSink, WorkflowDriver};
pub use engine::{EngineError, EngineHandle};
pub use listing::{load_jobs, load_matches_view, JobListing};
pub use service::{MatchService, ReqwestMatchService};
pub use settings::ServiceSettings;
pub use types::{EngineEvent, FailureKind, ServiceError};
