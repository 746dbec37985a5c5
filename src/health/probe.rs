//! Health endpoint probing.

use std::time::Instant;

use log::{debug, error, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use super::policy::{HealthPolicy, HealthState, HealthTracker};
use crate::error_handling::ProbeError;

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: String,
    pub database_connected: bool,
    /// RFC 3339 time at which the report was produced
    pub timestamp: String,
}

/// Performs one health probe.
///
/// Succeeds only on a 2xx response whose JSON body reports `"healthy"`. The
/// client's own timeout bounds the request.
pub async fn probe_once(client: &Client, url: &str) -> Result<HealthReport, ProbeError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProbeError::Status(status.as_u16()));
    }

    let report: HealthReport = response.json().await?;
    if report.status != "healthy" {
        return Err(ProbeError::Unhealthy(report.status));
    }
    Ok(report)
}

/// Probes `url` every `policy.interval` until `cancel` fires.
///
/// Cancellation also interrupts a probe in flight. Each state transition is
/// logged. Returns the last observed state.
pub async fn monitor(
    client: &Client,
    url: &str,
    policy: HealthPolicy,
    cancel: CancellationToken,
) -> HealthState {
    let mut tracker = HealthTracker::new(policy, Instant::now());
    let mut interval = tokio::time::interval(policy.interval);
    info!(
        "Monitoring {url} every {}s (timeout {}s, retries {}, start period {}s)",
        policy.interval.as_secs(),
        policy.timeout.as_secs(),
        policy.retries,
        policy.start_period.as_secs()
    );

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = cancel.cancelled() => break,
        }

        let result = tokio::select! {
            result = probe_once(client, url) => result,
            _ = cancel.cancelled() => break,
        };

        let success = match result {
            Ok(report) => {
                debug!(
                    "Probe ok (database_connected={}, timestamp={})",
                    report.database_connected, report.timestamp
                );
                true
            }
            Err(e) => {
                warn!(
                    "Probe failed ({}/{}): {e}",
                    tracker.failure_streak() + 1,
                    policy.retries
                );
                false
            }
        };

        if let Some(transition) = tracker.record(success, Instant::now()) {
            match transition.to {
                HealthState::Unhealthy => error!(
                    "Health state changed: {} -> {}",
                    transition.from, transition.to
                ),
                _ => info!(
                    "Health state changed: {} -> {}",
                    transition.from, transition.to
                ),
            }
        }
    }

    tracker.state()
}
