use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use matcher_core::{CandidateId, WorkflowState};
use matcher_logging::{matcher_info, matcher_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

const STATE_FILENAME: &str = ".matcher_state.ron";

/// Summary of the last workflow run that reached `Complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastRun {
    pub candidate_id: String,
    pub file_name: String,
    pub skills: Vec<String>,
    pub completed_utc: String,
}

impl LastRun {
    /// Builds a record from a completed state; `None` if the run never got a
    /// candidate id.
    pub fn from_state(state: &WorkflowState, completed_utc: String) -> Option<Self> {
        let candidate_id = state.candidate_id()?;
        Some(Self {
            candidate_id: candidate_id.to_string(),
            file_name: state.run_file_name().unwrap_or_default().to_string(),
            skills: state
                .analysis()
                .map(|analysis| analysis.skills.clone())
                .unwrap_or_default(),
            completed_utc,
        })
    }

    pub fn candidate_id(&self) -> CandidateId {
        CandidateId::new(self.candidate_id.clone())
    }
}

pub fn load_last_run(state_dir: &Path) -> Option<LastRun> {
    let path = state_dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
        Err(err) => {
            matcher_warn!("Failed to read last run from {:?}: {}", path, err);
            return None;
        }
    };

    match ron::from_str(&content) {
        Ok(run) => Some(run),
        Err(err) => {
            matcher_warn!("Failed to parse last run from {:?}: {}", path, err);
            None
        }
    }
}

/// Writes the record next to a temp file and renames it into place, so a
/// crash never leaves a half-written state file.
pub fn save_last_run(state_dir: &Path, run: &LastRun) -> Result<()> {
    fs::create_dir_all(state_dir)
        .with_context(|| format!("Failed to create state directory {}", state_dir.display()))?;

    let content = ron::ser::to_string_pretty(run, ron::ser::PrettyConfig::new())
        .context("Failed to serialize last run")?;

    let mut tmp = NamedTempFile::new_in(state_dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    let target = state_dir.join(STATE_FILENAME);
    tmp.persist(&target)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    matcher_info!("Recorded candidate {} in {:?}", run.candidate_id, target);
    Ok(())
}
