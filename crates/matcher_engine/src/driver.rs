use std::collections::VecDeque;
use std::sync::Arc;

use matcher_core::{update, Effect, Msg, ResumeFile, WorkflowError, WorkflowState};
use matcher_logging::{matcher_info, matcher_warn};

use crate::{EngineEvent, MatchService, ServiceError};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

/// Runs the upload workflow against a [`MatchService`].
///
/// Every state change goes through [`matcher_core::update`]; the driver only
/// executes the effect it returns and feeds the call's result back in. A
/// remote call is awaited before the next message is dispatched, so two calls
/// are never in flight together.
pub struct WorkflowDriver {
    service: Arc<dyn MatchService>,
    state: WorkflowState,
    sink: Option<Arc<dyn ProgressSink>>,
}

impl WorkflowDriver {
    pub fn new(service: Arc<dyn MatchService>) -> Self {
        Self {
            service,
            state: WorkflowState::new(),
            sink: None,
        }
    }

    pub fn with_progress_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn into_state(self) -> WorkflowState {
        self.state
    }

    /// Fails with [`WorkflowError::InvalidInput`] for anything but a PDF.
    pub fn select_file(&mut self, file: ResumeFile) -> Result<(), WorkflowError> {
        self.dispatch(Msg::FileSelected(file));
        match self.state.error() {
            Some(err @ WorkflowError::InvalidInput { .. }) => Err(err.clone()),
            _ => Ok(()),
        }
    }

    /// Runs upload, analyze and generate-matches in order, stopping at the
    /// first failure. Returns the error the workflow ended with, if any.
    pub async fn submit(&mut self) -> Result<(), WorkflowError> {
        let mut pending: VecDeque<Effect> = self.dispatch(Msg::SubmitClicked).into();
        while let Some(effect) = pending.pop_front() {
            let msg = self.execute(effect).await;
            pending.extend(self.dispatch(msg));
        }
        match self.state.error() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    pub fn reset(&mut self) {
        self.dispatch(Msg::ResetClicked);
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let previous = self.state.stage();
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        if self.state.stage() != previous {
            if let Some(sink) = &self.sink {
                sink.emit(EngineEvent::StageChanged {
                    run: self.state.run(),
                    stage: self.state.stage(),
                    status: self.state.status_message().to_string(),
                });
            }
        }
        effects
    }

    async fn execute(&self, effect: Effect) -> Msg {
        match effect {
            Effect::UploadResume { run, file } => {
                let result = self.service.upload_resume(&file).await;
                if let Ok(candidate_id) = &result {
                    matcher_info!("Run {} uploaded {} as candidate {}", run, file.name, candidate_id);
                }
                Msg::UploadFinished {
                    run,
                    result: describe(result, "upload"),
                }
            }
            Effect::AnalyzeResume { run, candidate_id } => {
                let result = self.service.analyze_resume(&candidate_id).await;
                Msg::AnalysisFinished {
                    run,
                    result: describe(result, "analyze"),
                }
            }
            Effect::GenerateMatches { run, candidate_id } => {
                let result = self.service.generate_matches(&candidate_id).await;
                Msg::MatchesGenerated {
                    run,
                    result: describe(result, "generate matches"),
                }
            }
        }
    }
}

fn describe<T>(result: Result<T, ServiceError>, call: &str) -> Result<T, String> {
    result.map_err(|err| {
        matcher_warn!("{} call failed: {}", call, err);
        err.to_string()
    })
}
