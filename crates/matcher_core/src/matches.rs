use crate::Match;

/// What the matches page shows for a candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchesView {
    NetworkOrServerError { message: String },
    NoMatches,
    /// Kept in the order the service returned them.
    MatchesFound(Vec<Match>),
}

impl MatchesView {
    pub fn from_fetch<E: ToString>(result: Result<Vec<Match>, E>) -> Self {
        match result {
            Err(err) => MatchesView::NetworkOrServerError {
                message: err.to_string(),
            },
            Ok(matches) if matches.is_empty() => MatchesView::NoMatches,
            Ok(matches) => MatchesView::MatchesFound(matches),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, MatchesView::NetworkOrServerError { .. })
    }
}
