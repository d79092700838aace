//! Job search assistant: free-text query over the job board port.

pub mod handlers;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::score::Score;
use crate::workflow::Workflow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub location: String,
    /// Human-readable age of the posting, e.g. "Il y a 2 jours".
    pub posted: String,
    pub match_score: Score,
    pub source: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub query: String,
    pub jobs: Vec<JobPosting>,
    /// True when nothing matched and the whole catalogue was returned instead.
    pub fallback: bool,
}

/// Case-insensitive substring match on title, company or location.
/// An empty match set falls back to every posting, never to an empty list.
pub fn search_postings(postings: &[JobPosting], query: &str) -> SearchOutcome {
    let needle = query.trim().to_lowercase();
    let matched: Vec<JobPosting> = postings
        .iter()
        .filter(|job| {
            job.title.to_lowercase().contains(&needle)
                || job.company.to_lowercase().contains(&needle)
                || job.location.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect();

    let fallback = matched.is_empty();
    SearchOutcome {
        query: query.to_string(),
        jobs: if fallback { postings.to_vec() } else { matched },
        fallback,
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct JobAssistant {
    pub query: String,
    /// Set by the first search; suggestions are hidden afterwards.
    pub has_searched: bool,
    pub search: Workflow<SearchOutcome>,
}

impl JobAssistant {
    pub fn set_query(&mut self, query: String) -> Result<(), AppError> {
        self.search.ensure_editable()?;
        self.query = query;
        Ok(())
    }

    pub fn begin_search(&mut self) -> Result<String, AppError> {
        self.search.ensure_editable()?;
        if self.query.trim().is_empty() {
            return Err(AppError::Validation("Search query is empty".to_string()));
        }
        self.search.begin()?;
        self.has_searched = true;
        Ok(self.query.clone())
    }

    pub fn complete(&mut self, outcome: Result<SearchOutcome, AppError>) -> bool {
        self.search.resolve(outcome)
    }

    pub fn reset(&mut self) {
        self.search.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::sample_jobs;

    #[test]
    fn test_matches_location_case_insensitively() {
        let outcome = search_postings(&sample_jobs(), "CASABLANCA");
        assert!(!outcome.fallback);
        let ids: Vec<u32> = outcome.jobs.iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_matches_company() {
        let outcome = search_postings(&sample_jobs(), "finance");
        assert_eq!(outcome.jobs.len(), 1);
        assert_eq!(outcome.jobs[0].title, "Data Analyst");
    }

    #[test]
    fn test_no_match_returns_full_sample() {
        let outcome = search_postings(&sample_jobs(), "astronaute à Tanger");
        assert!(outcome.fallback);
        assert_eq!(outcome.jobs, sample_jobs());
        assert_eq!(outcome.query, "astronaute à Tanger");
    }

    #[test]
    fn test_blank_query_rejected() {
        let mut page = JobAssistant::default();
        page.set_query("   ".to_string()).unwrap();
        assert!(matches!(page.begin_search(), Err(AppError::Validation(_))));
        assert!(!page.has_searched);
    }

    #[test]
    fn test_search_marks_has_searched_and_locks_query() {
        let mut page = JobAssistant::default();
        page.set_query("DevOps".to_string()).unwrap();
        assert_eq!(page.begin_search().unwrap(), "DevOps");
        assert!(page.has_searched);
        assert!(page.set_query("other".to_string()).is_err());

        page.complete(Ok(search_postings(&sample_jobs(), "DevOps")));
        assert_eq!(page.search.result().unwrap().jobs.len(), 1);
        page.reset();
        assert!(page.has_searched);
    }
}
