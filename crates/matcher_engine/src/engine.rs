use std::io;
use std::sync::Arc;

use matcher_core::{CandidateId, MatchesView, ResumeFile, WorkflowError, WorkflowState};
use thiserror::Error;

use crate::driver::{ProgressSink, WorkflowDriver};
use crate::listing::{load_jobs, load_matches_view, JobListing};
use crate::{MatchService, ReqwestMatchService, ServiceError, ServiceSettings};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

/// Blocking front door to the engine for synchronous callers.
pub struct EngineHandle {
    runtime: tokio::runtime::Runtime,
    service: Arc<dyn MatchService>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> Result<Self, EngineError> {
        let service = ReqwestMatchService::new(settings)?;
        Self::with_service(Arc::new(service))
    }

    pub fn with_service(service: Arc<dyn MatchService>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self { runtime, service })
    }

    pub fn load_jobs(&self) -> JobListing {
        self.runtime.block_on(load_jobs(self.service.as_ref()))
    }

    pub fn matches_view(&self, candidate_id: &CandidateId) -> MatchesView {
        self.runtime
            .block_on(load_matches_view(self.service.as_ref(), candidate_id))
    }

    pub fn ping(&self) -> Result<(), ServiceError> {
        self.runtime.block_on(self.service.ping())
    }

    /// Selects `file` and runs one workflow to completion or first failure.
    pub fn run_workflow(
        &self,
        file: ResumeFile,
        sink: Arc<dyn ProgressSink>,
    ) -> (WorkflowState, Result<(), WorkflowError>) {
        let mut driver = WorkflowDriver::new(self.service.clone()).with_progress_sink(sink);
        if let Err(err) = driver.select_file(file) {
            return (driver.into_state(), Err(err));
        }
        let outcome = self.runtime.block_on(driver.submit());
        (driver.into_state(), outcome)
    }
}
