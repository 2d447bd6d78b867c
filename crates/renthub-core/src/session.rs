// Session state model
//
// One Session value describes the whole authentication state of a running
// client. It is produced only by the session store; everything else reads.
// Invariant: `user` is present iff `token` is present.

use serde::{Deserialize, Serialize};

use crate::user::UserProfile;

/// Client-held authentication state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Authenticated identity, absent while logged out
    pub user: Option<UserProfile>,
    /// Bearer credential backing `user`
    pub token: Option<String>,
    /// True while an auth operation is in flight
    pub is_loading: bool,
    /// Message from the most recent failed operation
    pub error: Option<String>,
}

impl Session {
    /// Startup state: nothing known yet, initialization pending
    pub fn loading() -> Self {
        Session {
            user: None,
            token: None,
            is_loading: true,
            error: None,
        }
    }

    /// Settled, logged-out state
    pub fn unauthenticated() -> Self {
        Session {
            user: None,
            token: None,
            is_loading: false,
            error: None,
        }
    }

    /// Settled, logged-in state
    pub fn authenticated(user: UserProfile, token: impl Into<String>) -> Self {
        Session {
            user: Some(user),
            token: Some(token.into()),
            is_loading: false,
            error: None,
        }
    }

    /// Settled failure state: logged out, with the failure message retained
    pub fn failed(error: impl Into<String>) -> Self {
        Session {
            user: None,
            token: None,
            is_loading: false,
            error: Some(error.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;

    fn tenant() -> UserProfile {
        UserProfile {
            id: 1,
            email: "a@b.com".to_string(),
            full_name: "Abel Bekele".to_string(),
            role: UserRole::Tenant,
            phone_number: None,
            profile_picture: None,
        }
    }

    #[test]
    fn test_default_is_loading() {
        let session = Session::default();
        assert!(session.is_loading);
        assert!(!session.is_authenticated());
        assert!(session.error.is_none());
    }

    #[test]
    fn test_user_and_token_travel_together() {
        let session = Session::authenticated(tenant(), "T1");
        assert!(session.is_authenticated());
        assert_eq!(session.token.as_deref(), Some("T1"));
        assert!(!session.is_loading);

        for settled in [Session::unauthenticated(), Session::failed("boom")] {
            assert!(settled.user.is_none());
            assert!(settled.token.is_none());
        }
    }

    #[test]
    fn test_failed_retains_message() {
        let session = Session::failed("Incorrect email or password");
        assert_eq!(session.error.as_deref(), Some("Incorrect email or password"));
        assert!(!session.is_loading);
        assert!(!session.is_authenticated());
    }
}
