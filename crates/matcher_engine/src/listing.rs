use matcher_core::{CandidateId, Job, MatchesView};
use matcher_logging::{matcher_info, matcher_warn};

use crate::MatchService;

/// Result of fetching the job listing.
///
/// A failed fetch does not block browsing; it yields an empty listing that
/// carries the reason as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobListing {
    pub jobs: Vec<Job>,
    pub warning: Option<String>,
}

impl JobListing {
    pub fn loaded(jobs: Vec<Job>) -> Self {
        Self {
            jobs,
            warning: None,
        }
    }

    pub fn empty_with_warning(reason: impl Into<String>) -> Self {
        Self {
            jobs: Vec::new(),
            warning: Some(reason.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.warning.is_some()
    }
}

pub async fn load_jobs(service: &dyn MatchService) -> JobListing {
    match service.list_jobs().await {
        Ok(jobs) => {
            matcher_info!("Loaded {} jobs", jobs.len());
            JobListing::loaded(jobs)
        }
        Err(err) => {
            matcher_warn!("Job listing unavailable, showing none: {}", err);
            JobListing::empty_with_warning(err.to_string())
        }
    }
}

/// Fetches a candidate's matches fresh and classifies the outcome.
pub async fn load_matches_view(service: &dyn MatchService, candidate_id: &CandidateId) -> MatchesView {
    let result = service.fetch_matches(candidate_id).await;
    if let Err(err) = &result {
        matcher_warn!("Fetching matches for candidate {} failed: {}", candidate_id, err);
    }
    MatchesView::from_fetch(result)
}
