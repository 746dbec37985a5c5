//! HTTP client initialization for health probes.

use std::time::Duration;

use reqwest::Client;

use crate::error_handling::InitializationError;

/// Builds the client used by the `healthcheck` and `monitor` commands.
///
/// Redirects are not followed: the health endpoint answers directly or the
/// probe fails.
pub fn init_probe_client(timeout: Duration) -> Result<Client, InitializationError> {
    let client = Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(concat!("esya_ticketing-probe/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_probe_client() {
        assert!(init_probe_client(Duration::from_secs(10)).is_ok());
    }
}
