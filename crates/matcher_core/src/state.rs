use crate::view_model::WorkflowViewModel;
use crate::{AnalysisResult, CandidateId, ResumeFile, WorkflowError};

/// Identifies one workflow run. Results tagged with an older id are stale.
pub type RunId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Idle,
    FileSelected,
    Uploading,
    Analyzing,
    GeneratingMatches,
    Complete,
    Failed,
}

impl Stage {
    /// A remote call is in flight.
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            Stage::Uploading | Stage::Analyzing | Stage::GeneratingMatches
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Complete | Stage::Failed)
    }
}

pub(crate) const IDLE_STATUS: &str = "Select a PDF to begin.";
pub(crate) const UPLOADING_STATUS: &str = "Step 1/3: Uploading resume...";
pub(crate) const ANALYZING_STATUS: &str = "Step 2/3: Analyzing skills...";
pub(crate) const GENERATING_STATUS: &str = "Step 3/3: Generating job matches...";
pub(crate) const COMPLETE_STATUS: &str = "Analysis complete! Ready to view matches.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowState {
    stage: Stage,
    file: Option<ResumeFile>,
    status_message: String,
    error: Option<WorkflowError>,
    analysis: Option<AnalysisResult>,
    candidate_id: Option<CandidateId>,
    /// Name of the file the current or last run uploaded.
    run_file_name: Option<String>,
    run: RunId,
    dirty: bool,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            stage: Stage::Idle,
            file: None,
            status_message: IDLE_STATUS.to_string(),
            error: None,
            analysis: None,
            candidate_id: None,
            run_file_name: None,
            run: 0,
            dirty: false,
        }
    }
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> WorkflowViewModel {
        WorkflowViewModel {
            stage: self.stage,
            status_message: self.status_message.clone(),
            error: self.error.as_ref().map(ToString::to_string),
            file_name: self.file.as_ref().map(|file| file.name.clone()),
            can_submit: self.file.is_some() && !self.stage.is_busy(),
            analysis: self.analysis.clone(),
            candidate_id: self.candidate_id.clone(),
            run_file_name: self.run_file_name.clone(),
            dirty: self.dirty,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn file(&self) -> Option<&ResumeFile> {
        self.file.as_ref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        self.error.as_ref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn candidate_id(&self) -> Option<&CandidateId> {
        self.candidate_id.as_ref()
    }

    /// The file the results of this run belong to. Differs from [`Self::file`]
    /// when another file was picked while the run was active.
    pub fn run_file_name(&self) -> Option<&str> {
        self.run_file_name.as_deref()
    }

    pub fn run(&self) -> RunId {
        self.run
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn select_file(&mut self, file: ResumeFile) {
        // A run in flight keeps its label; the new file waits for the next submit.
        if !self.stage.is_busy() {
            self.stage = Stage::FileSelected;
            self.status_message = format!("Selected file: {}", file.name);
            self.analysis = None;
            self.candidate_id = None;
            self.run_file_name = None;
        }
        self.file = Some(file);
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn reject(&mut self, error: WorkflowError) {
        self.error = Some(error);
        self.dirty = true;
    }

    /// Starts a new run and returns its id together with the file to upload.
    pub(crate) fn begin_run(&mut self) -> Option<(RunId, ResumeFile)> {
        let file = self.file.clone()?;
        self.run += 1;
        self.stage = Stage::Uploading;
        self.status_message = UPLOADING_STATUS.to_string();
        self.error = None;
        self.analysis = None;
        self.candidate_id = None;
        self.run_file_name = Some(file.name.clone());
        self.dirty = true;
        Some((self.run, file))
    }

    pub(crate) fn begin_analysis(&mut self, candidate_id: CandidateId) {
        self.stage = Stage::Analyzing;
        self.status_message = ANALYZING_STATUS.to_string();
        self.candidate_id = Some(candidate_id);
        self.dirty = true;
    }

    pub(crate) fn begin_generation(&mut self, analysis: AnalysisResult) {
        self.stage = Stage::GeneratingMatches;
        self.status_message = GENERATING_STATUS.to_string();
        self.analysis = Some(analysis);
        self.dirty = true;
    }

    pub(crate) fn complete(&mut self) {
        self.stage = Stage::Complete;
        self.status_message = COMPLETE_STATUS.to_string();
        self.error = None;
        self.dirty = true;
    }

    /// The status message is left as it was so it names the step that failed.
    pub(crate) fn fail(&mut self, error: WorkflowError) {
        self.stage = Stage::Failed;
        self.error = Some(error);
        self.dirty = true;
    }

    pub(crate) fn reset(&mut self) {
        let run = self.run + 1;
        *self = Self {
            run,
            dirty: true,
            ..Self::default()
        };
    }

    /// True when a result for `run` may still change this state.
    pub(crate) fn accepts(&self, run: RunId, expected: Stage) -> bool {
        self.run == run && self.stage == expected
    }
}
