//! Race coordination across sites.
//!
//! # Responsibilities
//! - Spawn one probe task per address, all at once
//! - Resolve to the first matching address, or to "not found" once every probe reported
//! - Absorb per-site failures; they are logged and counted, never returned
//!
//! # Design Decisions
//! - Probe outcomes are merged into one mpsc channel in arrival order. The
//!   channel closing (last sender dropped) is the completion signal.
//! - Channel capacity equals the probe count, so no probe ever blocks on delivery
//!   after the race has resolved.
//! - Which of several simultaneous matches wins is whichever outcome is received first.
//! - Stragglers keep running after resolution unless `race.cancel_stragglers` is set.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::{RaceConfig, ServiceConfig};
use crate::observability::metrics;
use crate::search::fetcher::{FetchError, Fetcher};
use crate::search::prober::{SiteProbe, SiteProber};
use crate::search::types::{ProbeOutcome, RaceResult, SearchRequest};

/// Races probes across a set of sites.
#[derive(Debug)]
pub struct RaceCoordinator<P = SiteProber> {
    prober: Arc<P>,
    cancel_stragglers: bool,
}

impl<P> Clone for RaceCoordinator<P> {
    fn clone(&self) -> Self {
        Self {
            prober: Arc::clone(&self.prober),
            cancel_stragglers: self.cancel_stragglers,
        }
    }
}

impl RaceCoordinator<SiteProber> {
    /// Build the network-backed coordinator from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, FetchError> {
        let fetcher = Fetcher::new(&config.fetch)?;
        Ok(Self::new(SiteProber::new(fetcher), &config.race))
    }
}

impl<P: SiteProbe> RaceCoordinator<P> {
    pub fn new(prober: P, config: &RaceConfig) -> Self {
        Self {
            prober: Arc::new(prober),
            cancel_stragglers: config.cancel_stragglers,
        }
    }

    /// Run one race. Never fails: per-site errors only ever mean "no match here".
    pub async fn race(&self, request: SearchRequest) -> RaceResult {
        let start_time = Instant::now();
        let SearchRequest {
            addresses,
            search_text,
        } = request;
        let site_count = addresses.len();

        if addresses.is_empty() {
            tracing::debug!("No sites given, nothing to race");
            metrics::record_race(&RaceResult::NotFound, start_time);
            return RaceResult::NotFound;
        }

        let search_text: Arc<str> = Arc::from(search_text);
        let cancel = CancellationToken::new();
        let (outcome_tx, mut outcome_rx) = mpsc::channel(site_count);

        for address in addresses {
            let prober = Arc::clone(&self.prober);
            let search_text = Arc::clone(&search_text);
            let outcome_tx = outcome_tx.clone();
            let cancel = cancel.clone();

            tokio::spawn(async move {
                let outcome = tokio::select! {
                    outcome = prober.probe(&address, &search_text) => outcome,
                    _ = cancel.cancelled() => {
                        tracing::debug!(address = %address, "Probe cancelled after race resolved");
                        return;
                    }
                };
                metrics::record_probe(&outcome);
                // The receiver is gone once the race has resolved.
                let _ = outcome_tx.send(outcome).await;
            });
        }
        drop(outcome_tx);

        let result = first_match(&mut outcome_rx).await;

        if self.cancel_stragglers {
            cancel.cancel();
        }

        tracing::info!(
            sites = site_count,
            result = %result,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Race resolved"
        );
        metrics::record_race(&result, start_time);

        result
    }
}

/// Consume outcomes until one matches or every probe has reported.
async fn first_match(outcomes: &mut mpsc::Receiver<ProbeOutcome>) -> RaceResult {
    while let Some(outcome) = outcomes.recv().await {
        match outcome {
            ProbeOutcome::Matched(address) => return RaceResult::Found(address),
            ProbeOutcome::NotMatched(address) => {
                tracing::debug!(address = %address, "Site does not contain search text");
            }
            ProbeOutcome::Failed { address, cause } => {
                tracing::warn!(address = %address, error = %cause, "Site probe failed");
            }
        }
    }
    RaceResult::NotFound
}
