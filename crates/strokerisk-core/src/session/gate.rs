//! Session gate: decides whether a protected view may render.

use serde::Serialize;

use super::model::{AuthUser, SessionState};

/// Route unauthenticated visitors are sent to.
pub const DEFAULT_SIGN_IN_ROUTE: &str = "/login";

/// What a gated view should do for the latest session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "detail", rename_all = "snake_case")]
pub enum GateDecision {
    /// Session not reported yet: show the neutral "checking" placeholder.
    Checking,
    /// No session: navigate to the sign-in route (issued once).
    Redirect(String),
    /// No session and the redirect was already issued: render nothing.
    Hidden,
    /// Session present: render the guarded children.
    Render(AuthUser),
}

impl GateDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Result of guarding a subtree built by a closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    Checking,
    Redirect(String),
    Hidden,
    Render(T),
}

/// Three-state wrapper around a protected view.
///
/// One instance corresponds to one mounted view. It redirects exactly once
/// per transition into [`SessionState::Absent`]; leaving `Absent` re-arms the
/// redirect. It never mutates the session.
#[derive(Debug, Clone)]
pub struct SessionGate {
    sign_in_route: String,
    redirected: bool,
}

impl Default for SessionGate {
    fn default() -> Self {
        Self::new(DEFAULT_SIGN_IN_ROUTE)
    }
}

impl SessionGate {
    pub fn new(sign_in_route: impl Into<String>) -> Self {
        Self {
            sign_in_route: sign_in_route.into(),
            redirected: false,
        }
    }

    pub fn sign_in_route(&self) -> &str {
        &self.sign_in_route
    }

    pub fn has_redirected(&self) -> bool {
        self.redirected
    }

    /// Feeds the latest session state through the gate.
    pub fn observe(&mut self, state: &SessionState) -> GateDecision {
        match state {
            SessionState::Settling => {
                self.redirected = false;
                GateDecision::Checking
            }
            SessionState::Present(user) => {
                self.redirected = false;
                GateDecision::Render(user.clone())
            }
            SessionState::Absent if self.redirected => GateDecision::Hidden,
            SessionState::Absent => {
                self.redirected = true;
                GateDecision::Redirect(self.sign_in_route.clone())
            }
        }
    }

    /// Builds the guarded children only when a session is present.
    pub fn guard<T>(&mut self, state: &SessionState, children: impl FnOnce(&AuthUser) -> T) -> Gated<T> {
        match self.observe(state) {
            GateDecision::Checking => Gated::Checking,
            GateDecision::Redirect(route) => Gated::Redirect(route),
            GateDecision::Hidden => Gated::Hidden,
            GateDecision::Render(user) => Gated::Render(children(&user)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> AuthUser {
        AuthUser {
            uid: "1".to_string(),
            email: "user@example.com".to_string(),
            display_name: Some("John Doe".to_string()),
        }
    }

    #[test]
    fn test_settling_shows_placeholder_without_redirect() {
        let mut gate = SessionGate::default();
        assert_eq!(gate.observe(&SessionState::Settling), GateDecision::Checking);
        assert_eq!(gate.observe(&SessionState::Settling), GateDecision::Checking);
        assert!(!gate.has_redirected());
    }

    #[test]
    fn test_absent_redirects_once() {
        let mut gate = SessionGate::new("/signin");
        assert_eq!(
            gate.observe(&SessionState::Absent),
            GateDecision::Redirect("/signin".to_string())
        );
        assert_eq!(gate.observe(&SessionState::Absent), GateDecision::Hidden);
        assert_eq!(gate.observe(&SessionState::Absent), GateDecision::Hidden);
    }

    #[test]
    fn test_each_transition_into_absent_redirects() {
        let mut gate = SessionGate::default();
        assert!(gate.observe(&SessionState::Absent).is_redirect());
        assert!(gate.observe(&SessionState::Present(user())).is_render());
        assert!(gate.observe(&SessionState::Absent).is_redirect());
    }

    #[test]
    fn test_renders_only_when_present() {
        let mut gate = SessionGate::default();
        let states = [
            SessionState::Settling,
            SessionState::Absent,
            SessionState::Present(user()),
        ];
        for state in &states {
            let rendered = gate.guard(state, |u| u.greeting_name().to_string());
            assert_eq!(
                matches!(rendered, Gated::Render(_)),
                matches!(state, SessionState::Present(_))
            );
        }
        assert_eq!(
            gate.guard(&SessionState::Present(user()), |u| u.uid.clone()),
            Gated::Render("1".to_string())
        );
    }

    #[test]
    fn test_greeting_name_falls_back_to_email() {
        let mut anonymous = user();
        anonymous.display_name = Some("  ".to_string());
        assert_eq!(anonymous.greeting_name(), "user@example.com");
        assert_eq!(user().greeting_name(), "John Doe");
    }
}
