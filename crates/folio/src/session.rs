//! Caller identity
//!
//! Login and OAuth happen elsewhere; what reaches Folio is a token and an
//! issuer id. A session is passed explicitly into every resolver call.

/// Token value the auth layer hands out for sessions without backend access.
pub const DEFAULT_LOCAL_ONLY_TOKEN: &str = "local-only";

/// The identity an operation runs as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    issuer_id: Option<String>,
    authenticated: bool,
}

impl Session {
    /// A session with no identity at all.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A logged-in session with a backend token and issuer id.
    pub fn authenticated(token: impl Into<String>, issuer_id: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            issuer_id: Some(issuer_id.into()),
            authenticated: true,
        }
    }

    /// Build a session from the raw parts the auth layer provides.
    pub fn from_parts(token: Option<String>, issuer_id: Option<String>, authenticated: bool) -> Self {
        Self {
            token,
            issuer_id,
            authenticated,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn issuer_id(&self) -> Option<&str> {
        self.issuer_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether operations for this session may go to the remote API.
    ///
    /// Requires an authenticated session holding a non-empty token that is
    /// not `local_only_token`, plus an issuer id.
    pub fn is_remote_eligible(&self, local_only_token: &str) -> bool {
        self.remote_credentials(local_only_token).is_some()
    }

    /// Token and issuer id, when the session is remote eligible.
    pub(crate) fn remote_credentials(&self, local_only_token: &str) -> Option<(&str, &str)> {
        if !self.authenticated {
            return None;
        }
        let token = self
            .token
            .as_deref()
            .filter(|t| !t.is_empty() && *t != local_only_token)?;
        let issuer = self.issuer_id.as_deref().filter(|i| !i.is_empty())?;
        Some((token, issuer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_is_eligible() {
        let session = Session::authenticated("abc", "42");
        assert!(session.is_remote_eligible(DEFAULT_LOCAL_ONLY_TOKEN));
    }

    #[test]
    fn test_sentinel_never_eligible() {
        let session = Session::authenticated(DEFAULT_LOCAL_ONLY_TOKEN, "42");
        assert!(!session.is_remote_eligible(DEFAULT_LOCAL_ONLY_TOKEN));

        let custom = Session::authenticated("offline", "42");
        assert!(!custom.is_remote_eligible("offline"));
        assert!(custom.is_remote_eligible(DEFAULT_LOCAL_ONLY_TOKEN));
    }

    #[test]
    fn test_missing_pieces() {
        assert!(!Session::anonymous().is_remote_eligible(DEFAULT_LOCAL_ONLY_TOKEN));

        let no_issuer = Session::from_parts(Some("abc".into()), None, true);
        assert!(!no_issuer.is_remote_eligible(DEFAULT_LOCAL_ONLY_TOKEN));

        let empty_token = Session::from_parts(Some(String::new()), Some("42".into()), true);
        assert!(!empty_token.is_remote_eligible(DEFAULT_LOCAL_ONLY_TOKEN));

        let logged_out = Session::from_parts(Some("abc".into()), Some("42".into()), false);
        assert!(!logged_out.is_remote_eligible(DEFAULT_LOCAL_ONLY_TOKEN));
    }
}
