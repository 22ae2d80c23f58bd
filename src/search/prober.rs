//! Per-site probe: fetch, then test the body.

use std::future::Future;

use crate::search::fetcher::Fetcher;
use crate::search::matcher::contains_text;
use crate::search::types::ProbeOutcome;

/// Checks one address for the search text.
///
/// Implementations never fail: every error path is reported as
/// [`ProbeOutcome::Failed`] so the coordinator can treat all probes alike.
pub trait SiteProbe: Send + Sync + 'static {
    fn probe<'a>(
        &'a self,
        address: &'a str,
        search_text: &'a str,
    ) -> impl Future<Output = ProbeOutcome> + Send + 'a;
}

/// The network-backed probe.
#[derive(Debug, Clone)]
pub struct SiteProber {
    fetcher: Fetcher,
}

impl SiteProber {
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }
}

impl SiteProbe for SiteProber {
    fn probe<'a>(
        &'a self,
        address: &'a str,
        search_text: &'a str,
    ) -> impl Future<Output = ProbeOutcome> + Send + 'a {
        async move {
            match self.fetcher.fetch(address).await {
                Ok(body) if contains_text(&body, search_text) => {
                    ProbeOutcome::Matched(address.to_string())
                }
                Ok(_) => ProbeOutcome::NotMatched(address.to_string()),
                Err(cause) => ProbeOutcome::Failed {
                    address: address.to_string(),
                    cause,
                },
            }
        }
    }
}
