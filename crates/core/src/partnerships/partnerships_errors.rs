//! Partner/invite error taxonomy.

use thiserror::Error;

/// Domain errors for invite and partnership operations.
///
/// Derived from the remote authority's error messages; see
/// [`classify_remote_error`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartnerError {
    #[error("invite code is invalid")]
    InvalidCode,

    #[error("invite code has expired")]
    Expired,

    #[error("cannot accept your own invite")]
    SelfInvite,

    #[error("user already has a partner")]
    AlreadyHasPartner,

    #[error("user has no partnership")]
    NoPartnership,

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("rate limited by remote authority")]
    RateLimited,

    #[error("session expired, re-authentication required")]
    SessionExpired,

    /// Unmatched remote message, kept verbatim for diagnostics.
    #[error("partner operation failed: {0}")]
    Unknown(String),
}

/// Maps a remote error message to the typed taxonomy by substring matching.
///
/// The remote authority only exposes message strings today, so this is the
/// single place that brittle matching is allowed to live. Unmatched messages
/// fall back to [`PartnerError::Unknown`] carrying the original text.
pub fn classify_remote_error(message: &str) -> PartnerError {
    let lower = message.to_lowercase();

    // "session expired" must be checked before the generic "expired"
    if lower.contains("session expired") || lower.contains("not authenticated") {
        return PartnerError::SessionExpired;
    }
    if lower.contains("rate limit") || lower.contains("too many requests") {
        return PartnerError::RateLimited;
    }
    if lower.contains("own invite") || lower.contains("yourself") {
        return PartnerError::SelfInvite;
    }
    if lower.contains("already has a partner") || lower.contains("already paired") {
        return PartnerError::AlreadyHasPartner;
    }
    if lower.contains("no partnership") || lower.contains("not paired") {
        return PartnerError::NoPartnership;
    }
    if lower.contains("expired") {
        return PartnerError::Expired;
    }
    if lower.contains("invalid code") || lower.contains("code not found") {
        return PartnerError::InvalidCode;
    }
    if lower.contains("network")
        || lower.contains("connection")
        || lower.contains("timed out")
        || lower.contains("timeout")
    {
        return PartnerError::NetworkError(message.to_string());
    }
    PartnerError::Unknown(message.to_string())
}
