//! Request and outcome types for a site race.

use std::fmt;

use crate::search::fetcher::FetchError;

/// One search: the sites to probe and the text to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub addresses: Vec<String>,
    pub search_text: String,
}

impl SearchRequest {
    pub fn new<I, S>(addresses: I, search_text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            addresses: addresses.into_iter().map(Into::into).collect(),
            search_text: search_text.into(),
        }
    }
}

/// Result of probing a single site. Emitted exactly once per address.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The body contained the search text.
    Matched(String),
    /// The body was fetched but did not contain the search text.
    NotMatched(String),
    /// The fetch failed; never counts as a match.
    Failed { address: String, cause: FetchError },
}

impl ProbeOutcome {
    pub fn address(&self) -> &str {
        match self {
            ProbeOutcome::Matched(address) | ProbeOutcome::NotMatched(address) => address,
            ProbeOutcome::Failed { address, .. } => address,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, ProbeOutcome::Matched(_))
    }

    /// Metric label for this outcome.
    pub fn label(&self) -> &'static str {
        match self {
            ProbeOutcome::Matched(_) => "matched",
            ProbeOutcome::NotMatched(_) => "not_matched",
            ProbeOutcome::Failed { .. } => "failed",
        }
    }
}

/// The single answer of a race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceResult {
    Found(String),
    NotFound,
}

impl RaceResult {
    pub fn found_at(&self) -> Option<&str> {
        match self {
            RaceResult::Found(address) => Some(address),
            RaceResult::NotFound => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RaceResult::Found(_) => "found",
            RaceResult::NotFound => "not_found",
        }
    }
}

impl fmt::Display for RaceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceResult::Found(address) => write!(f, "found at {}", address),
            RaceResult::NotFound => write!(f, "not found"),
        }
    }
}
