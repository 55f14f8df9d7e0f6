use std::fmt::Write;

use matcher_core::{Job, MatchesView, WorkflowViewModel};
use matcher_engine::JobListing;

pub fn render_jobs(listing: &JobListing, visible: &[Job]) -> String {
    let mut out = String::new();
    if let Some(warning) = &listing.warning {
        let _ = writeln!(out, "warning: job listing unavailable ({warning})");
    }
    if visible.is_empty() {
        out.push_str("No jobs found.\n");
        return out;
    }
    for job in visible {
        let _ = writeln!(out, "[{}] {}", job.id, job.title);
        if !job.description.is_empty() {
            let _ = writeln!(out, "    {}", job.description);
        }
    }
    out
}

pub fn render_workflow(view: &WorkflowViewModel) -> String {
    let mut out = String::new();
    if let Some(error) = &view.error {
        let _ = writeln!(out, "Error: {error}");
    }
    let Some(analysis) = &view.analysis else {
        return out;
    };
    out.push_str("Analysis Complete\n");
    if analysis.skills.is_empty() {
        out.push_str("Extracted skills: none\n");
    } else {
        let _ = writeln!(out, "Extracted skills: {}", analysis.skills.join(", "));
    }
    let _ = writeln!(out, "Resume preview: {}", analysis.resume_text_preview);
    if let Some(candidate_id) = &view.candidate_id {
        let _ = writeln!(out, "See job matches: matcher matches {candidate_id}");
    }
    out
}

pub fn render_matches(view: &MatchesView) -> String {
    let mut out = String::new();
    match view {
        MatchesView::NetworkOrServerError { message } => {
            let _ = writeln!(out, "An error occurred: {message}");
        }
        MatchesView::NoMatches => {
            out.push_str("No suitable matches found.\n");
        }
        MatchesView::MatchesFound(matches) => {
            for found in matches {
                let _ = writeln!(out, "{} - {}% match", found.job_title, found.score);
                let _ = writeln!(out, "    matching: {}", found.matched_skills.join(", "));
                let _ = writeln!(out, "    missing:  {}", found.missing_skills.join(", "));
            }
        }
    }
    out
}
