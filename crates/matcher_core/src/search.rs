use crate::Job;

/// Holds the job listing and the view derived from the current query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobSearchFilter {
    jobs: Vec<Job>,
    visible: Vec<Job>,
}

impl JobSearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the authoritative list and shows all of it.
    pub fn set_jobs(&mut self, jobs: Vec<Job>) {
        self.visible = jobs.clone();
        self.jobs = jobs;
    }

    /// Recomputes the visible jobs for `query` and returns them.
    pub fn search(&mut self, query: Option<&str>) -> &[Job] {
        self.visible = filter_jobs(&self.jobs, query);
        &self.visible
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn visible(&self) -> &[Job] {
        &self.visible
    }
}

/// Case-insensitive substring match on job titles, preserving listing order.
///
/// `None` and the empty string both select every job.
pub fn filter_jobs(jobs: &[Job], query: Option<&str>) -> Vec<Job> {
    let needle = match query {
        Some(query) if !query.is_empty() => query.to_lowercase(),
        _ => return jobs.to_vec(),
    };
    jobs.iter()
        .filter(|job| job.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
