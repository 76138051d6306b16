//! Property-based tests for the rolling request window

use chrono::{Duration, TimeZone, Utc};
use postcraft::rate_limit::{RateLimitConfig, RateLimiter};
use proptest::prelude::*;

proptest! {
    /// Within any window at most `max_requests` calls are admitted, and every
    /// rejection carries the window length as the retry hint.
    #[test]
    fn admissions_never_exceed_quota(gaps in prop::collection::vec(0i64..30_000, 1..60)) {
        let config = RateLimitConfig::default();
        let limiter = RateLimiter::new(config.clone());
        let window_ms = (config.window_secs * 1000) as i64;
        let mut now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let mut admitted: Vec<i64> = Vec::new();

        for gap in gaps {
            now = now + Duration::milliseconds(gap);
            let now_ms = now.timestamp_millis();
            match limiter.check_at("client", now) {
                Ok(admission) => {
                    admitted.push(now_ms);
                    let in_window = admitted.iter().filter(|t| now_ms - **t < window_ms).count();
                    prop_assert!(in_window <= config.max_requests);
                    prop_assert_eq!(admission.remaining, config.max_requests - in_window);
                }
                Err(limited) => {
                    prop_assert_eq!(limited.retry_after_secs, config.window_secs);
                    let in_window = admitted.iter().filter(|t| now_ms - **t < window_ms).count();
                    prop_assert_eq!(in_window, config.max_requests);
                }
            }
        }
    }
}
