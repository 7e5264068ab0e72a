//! Time-to-live arithmetic.
//!
//! A requested ttl of zero or less means the drop never expires by time;
//! the upload form sends 0 for "keep until read" and the server clamps
//! rather than rejects.

use chrono::{DateTime, Duration, Utc};

/// Compute the absolute expiry for a requested ttl in minutes.
///
/// `ttl_minutes <= 0` means no expiry.
pub fn compute_expiry(now: DateTime<Utc>, ttl_minutes: i64) -> Option<DateTime<Utc>> {
    if ttl_minutes <= 0 {
        None
    } else {
        Some(now + Duration::minutes(ttl_minutes))
    }
}

/// Whether a record with this expiry is still retrievable at `now`.
pub fn is_live(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match expires_at {
        None => true,
        Some(at) => at > now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_ttl_is_added_to_now() {
        let now = Utc::now();
        let expiry = compute_expiry(now, 5).expect("should have expiry");
        assert_eq!(expiry, now + Duration::minutes(5));
    }

    #[test]
    fn zero_ttl_means_no_expiry() {
        assert!(compute_expiry(Utc::now(), 0).is_none());
    }

    #[test]
    fn negative_ttl_means_no_expiry() {
        assert!(compute_expiry(Utc::now(), -30).is_none());
    }

    #[test]
    fn live_without_expiry() {
        assert!(is_live(None, Utc::now()));
    }

    #[test]
    fn live_before_expiry() {
        let now = Utc::now();
        assert!(is_live(Some(now + Duration::minutes(1)), now));
    }

    #[test]
    fn dead_at_expiry_instant() {
        let now = Utc::now();
        assert!(!is_live(Some(now), now));
    }

    #[test]
    fn dead_after_expiry() {
        let now = Utc::now();
        assert!(!is_live(Some(now - Duration::seconds(1)), now));
    }
}
