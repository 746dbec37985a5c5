//! Container health checking.
//!
//! The `healthcheck` command replaces the curl-based probe in the container
//! definition, and `monitor` applies the same policy continuously from the
//! outside.

mod policy;
mod probe;

pub use policy::{HealthPolicy, HealthState, HealthTracker, Transition};
pub use probe::{monitor, probe_once, HealthReport};
