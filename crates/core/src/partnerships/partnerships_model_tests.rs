//! Tests for partnership models and remote-error classification.

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::partnerships::{classify_remote_error, PartnerError, Partnership};

    #[test]
    fn test_partnership_canonicalizes_user_ordering() {
        let p = Partnership::new(
            "p-1".to_string(),
            "zoe".to_string(),
            "amir".to_string(),
            Utc::now(),
        );
        assert_eq!(p.user1_id, "amir");
        assert_eq!(p.user2_id, "zoe");
        assert!(p.user1_id < p.user2_id);
    }

    #[test]
    fn test_partner_of() {
        let p = Partnership::new(
            "p-1".to_string(),
            "amir".to_string(),
            "zoe".to_string(),
            Utc::now(),
        );
        assert_eq!(p.partner_of("amir"), Some("zoe"));
        assert_eq!(p.partner_of("zoe"), Some("amir"));
        assert_eq!(p.partner_of("stranger"), None);
    }

    #[test]
    fn test_classify_remote_error_taxonomy() {
        assert_eq!(
            classify_remote_error("Invalid code provided"),
            PartnerError::InvalidCode
        );
        assert_eq!(
            classify_remote_error("This invite has expired"),
            PartnerError::Expired
        );
        assert_eq!(
            classify_remote_error("You cannot accept your own invite"),
            PartnerError::SelfInvite
        );
        assert_eq!(
            classify_remote_error("User already has a partner"),
            PartnerError::AlreadyHasPartner
        );
        assert_eq!(
            classify_remote_error("No partnership found for user"),
            PartnerError::NoPartnership
        );
        assert_eq!(
            classify_remote_error("Too many requests, rate limit exceeded"),
            PartnerError::RateLimited
        );
    }

    #[test]
    fn test_session_expired_wins_over_generic_expired() {
        assert_eq!(
            classify_remote_error("Session expired, please sign in again"),
            PartnerError::SessionExpired
        );
    }

    #[test]
    fn test_network_errors_keep_the_message() {
        match classify_remote_error("connection reset by peer") {
            PartnerError::NetworkError(msg) => assert!(msg.contains("connection")),
            other => panic!("expected NetworkError, got {other:?}"),
        }
    }

    #[test]
    fn test_unmatched_message_falls_back_to_unknown() {
        match classify_remote_error("flux capacitor misaligned") {
            PartnerError::Unknown(msg) => assert_eq!(msg, "flux capacitor misaligned"),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }
}
