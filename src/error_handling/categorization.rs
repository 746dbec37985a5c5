//! Retry strategy and error categorization.

use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::MailError;

/// Creates the exponential backoff strategy used for SMTP delivery.
///
/// Delays are `RETRY_FACTOR_MS * RETRY_BASE^n` (500ms, 1s, ...), capped at
/// `RETRY_MAX_DELAY_SECS`, and limited to `RETRY_MAX_RETRIES` retries.
///
/// # Returns
///
/// A retry strategy iterator ready for use with `tokio_retry::Retry`.
pub fn get_retry_strategy() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(crate::config::RETRY_BASE)
        .factor(crate::config::RETRY_FACTOR_MS)
        .max_delay(Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS))
        .take(crate::config::RETRY_MAX_RETRIES)
}

/// Determines whether a mail error may succeed on a later attempt.
///
/// Transient SMTP replies (4xx), timeouts and connection failures are
/// retriable. Permanent replies (5xx), bad addresses, message build errors and
/// missing credentials are not.
pub fn is_retriable_mail_error(error: &MailError) -> bool {
    match error {
        MailError::NotConfigured
        | MailError::Address(_)
        | MailError::ContentType(_)
        | MailError::Message(_) => false,
        // Remaining kinds: transient replies, timeouts, connection and TLS failures
        MailError::Transport(e) => !(e.is_permanent() || e.is_client() || e.is_response()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_strategy_delays() {
        let delays: Vec<Duration> = get_retry_strategy().collect();
        assert_eq!(delays.len(), crate::config::RETRY_MAX_RETRIES);
        assert_eq!(delays[0], Duration::from_millis(500));
        assert_eq!(delays[1], Duration::from_millis(1000));
    }

    #[test]
    fn test_retry_strategy_is_capped() {
        let max = Duration::from_secs(crate::config::RETRY_MAX_DELAY_SECS);
        assert!(get_retry_strategy().all(|d| d <= max));
    }

    #[test]
    fn test_configuration_errors_are_not_retriable() {
        assert!(!is_retriable_mail_error(&MailError::NotConfigured));

        let address_err = "not-an-address"
            .parse::<lettre::Address>()
            .expect_err("should not parse");
        assert!(!is_retriable_mail_error(&MailError::Address(address_err)));
    }
}
