// Route guard policy
//
// Pure decision function from session state to a navigation outcome.
// While initialization is still running the answer is Loading, never a
// redirect; redirecting before the persisted credential has been checked
// would bounce a logged-in user through the login page on every reload.

use serde::{Deserialize, Serialize};

use crate::session::Session;

/// The two guarded route classes of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    /// Dashboard, properties: requires an authenticated session
    Protected,
    /// Login, register: requires an unauthenticated session
    GuestOnly,
}

/// Where a denied navigation is sent instead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectTarget {
    Login,
    Dashboard,
}

impl RedirectTarget {
    /// Application path of the target route
    pub fn path(&self) -> &'static str {
        match self {
            RedirectTarget::Login => "/login",
            RedirectTarget::Dashboard => "/dashboard",
        }
    }
}

/// Outcome of evaluating a guard for one navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "decision", content = "target")]
pub enum RouteDecision {
    /// Render the requested view
    Render,
    /// Send the navigation elsewhere
    Redirect(RedirectTarget),
    /// Show a neutral placeholder until initialization settles
    Loading,
}

/// Evaluate the guard policy for a route class against the current session.
pub fn evaluate(route: RouteClass, session: &Session) -> RouteDecision {
    if session.is_loading {
        return RouteDecision::Loading;
    }

    match (route, session.is_authenticated()) {
        (RouteClass::Protected, true) => RouteDecision::Render,
        (RouteClass::Protected, false) => RouteDecision::Redirect(RedirectTarget::Login),
        (RouteClass::GuestOnly, false) => RouteDecision::Render,
        (RouteClass::GuestOnly, true) => RouteDecision::Redirect(RedirectTarget::Dashboard),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{UserProfile, UserRole};

    fn authenticated() -> Session {
        Session::authenticated(
            UserProfile {
                id: 1,
                email: "a@b.com".to_string(),
                full_name: "Abel Bekele".to_string(),
                role: UserRole::Tenant,
                phone_number: None,
                profile_picture: None,
            },
            "T1",
        )
    }

    #[test]
    fn test_loading_always_shows_placeholder() {
        let session = Session::loading();
        assert_eq!(evaluate(RouteClass::Protected, &session), RouteDecision::Loading);
        assert_eq!(evaluate(RouteClass::GuestOnly, &session), RouteDecision::Loading);
    }

    #[test]
    fn test_protected_requires_user() {
        assert_eq!(
            evaluate(RouteClass::Protected, &authenticated()),
            RouteDecision::Render
        );
        assert_eq!(
            evaluate(RouteClass::Protected, &Session::unauthenticated()),
            RouteDecision::Redirect(RedirectTarget::Login)
        );
    }

    #[test]
    fn test_guest_only_requires_no_user() {
        assert_eq!(
            evaluate(RouteClass::GuestOnly, &Session::unauthenticated()),
            RouteDecision::Render
        );
        assert_eq!(
            evaluate(RouteClass::GuestOnly, &authenticated()),
            RouteDecision::Redirect(RedirectTarget::Dashboard)
        );
    }

    #[test]
    fn test_failed_session_counts_as_unauthenticated() {
        let session = Session::failed("Incorrect email or password");
        assert_eq!(
            evaluate(RouteClass::Protected, &session),
            RouteDecision::Redirect(RedirectTarget::Login)
        );
        assert_eq!(evaluate(RouteClass::GuestOnly, &session), RouteDecision::Render);
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        for session in [
            Session::loading(),
            Session::unauthenticated(),
            Session::failed("x"),
            authenticated(),
        ] {
            for route in [RouteClass::Protected, RouteClass::GuestOnly] {
                let first = evaluate(route, &session);
                let second = evaluate(route, &session);
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn test_guards_never_both_render_for_one_session() {
        for session in [Session::unauthenticated(), Session::failed("x"), authenticated()] {
            let protected = evaluate(RouteClass::Protected, &session);
            let guest = evaluate(RouteClass::GuestOnly, &session);
            assert!(
                !(protected == RouteDecision::Render && guest == RouteDecision::Render),
                "both guards rendered for {session:?}"
            );
        }
    }

    #[test]
    fn test_redirect_targets_map_to_paths() {
        assert_eq!(RedirectTarget::Login.path(), "/login");
        assert_eq!(RedirectTarget::Dashboard.path(), "/dashboard");
    }
}
