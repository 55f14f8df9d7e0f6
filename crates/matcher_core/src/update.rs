use matcher_logging::{matcher_debug, matcher_info};

use crate::{Effect, Msg, PipelineStep, RunId, Stage, WorkflowError, WorkflowState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Each message yields at most one effect, and a remote step's effect is only
/// produced by the success message of the step before it, so the three calls
/// of a run are strictly sequential.
pub fn update(mut state: WorkflowState, msg: Msg) -> (WorkflowState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(file) => {
            if file.is_accepted() {
                state.select_file(file);
            } else {
                state.reject(WorkflowError::InvalidInput {
                    media_type: file.media_type,
                });
            }
            Vec::new()
        }
        Msg::SubmitClicked => {
            if state.stage().is_busy() {
                state.reject(WorkflowError::Precondition {
                    reason: WorkflowError::RUN_ACTIVE,
                });
                return (state, Vec::new());
            }
            match state.begin_run() {
                Some((run, file)) => {
                    matcher_info!("Run {} started for {}", run, file.name);
                    vec![Effect::UploadResume { run, file }]
                }
                None => {
                    state.reject(WorkflowError::Precondition {
                        reason: WorkflowError::NO_FILE,
                    });
                    Vec::new()
                }
            }
        }
        Msg::ResetClicked => {
            state.reset();
            Vec::new()
        }
        Msg::UploadFinished { run, result } => {
            if !state.accepts(run, Stage::Uploading) {
                return ignore_stale(state, run, "upload");
            }
            match result {
                Ok(candidate_id) => {
                    state.begin_analysis(candidate_id.clone());
                    vec![Effect::AnalyzeResume { run, candidate_id }]
                }
                Err(detail) => {
                    fail(&mut state, PipelineStep::Upload, detail);
                    Vec::new()
                }
            }
        }
        Msg::AnalysisFinished { run, result } => {
            if !state.accepts(run, Stage::Analyzing) {
                return ignore_stale(state, run, "analysis");
            }
            match (result, state.candidate_id().cloned()) {
                (Ok(analysis), Some(candidate_id)) => {
                    state.begin_generation(analysis);
                    vec![Effect::GenerateMatches { run, candidate_id }]
                }
                (Ok(_), None) => {
                    fail(
                        &mut state,
                        PipelineStep::Analyze,
                        "no candidate id recorded for this run".to_string(),
                    );
                    Vec::new()
                }
                (Err(detail), _) => {
                    fail(&mut state, PipelineStep::Analyze, detail);
                    Vec::new()
                }
            }
        }
        Msg::MatchesGenerated { run, result } => {
            if !state.accepts(run, Stage::GeneratingMatches) {
                return ignore_stale(state, run, "match generation");
            }
            match result {
                Ok(()) => {
                    state.complete();
                    matcher_info!("Run {} complete", run);
                }
                Err(detail) => fail(&mut state, PipelineStep::GenerateMatches, detail),
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn fail(state: &mut WorkflowState, step: PipelineStep, detail: String) {
    matcher_info!("Run {} failed at {} step: {}", state.run(), step, detail);
    state.fail(WorkflowError::NetworkOrProtocol { step, detail });
}

fn ignore_stale(state: WorkflowState, run: RunId, what: &str) -> (WorkflowState, Vec<Effect>) {
    matcher_debug!(
        "Ignoring {} result for run {} (current run {}, stage {:?})",
        what,
        run,
        state.run(),
        state.stage()
    );
    (state, Vec::new())
}
