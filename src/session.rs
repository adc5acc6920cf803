use std::rc::Rc;

use crate::api::models::Role;

/// Who is signed in, if anyone. Lives only as long as the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Session {
    role: Option<Role>,
}

/// The only two things that can happen to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Role),
    SignedOut,
}

impl Session {
    pub fn signed_out() -> Self {
        Self { role: None }
    }

    pub fn signed_in(role: Role) -> Self {
        Self { role: Some(role) }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_signed_in(&self) -> bool {
        self.role.is_some()
    }

    /// Apply an event, returning whether the session changed.
    ///
    /// Signing in over an existing session is refused; the role of a live
    /// session never changes.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        match (self.role, event) {
            (None, SessionEvent::SignedIn(role)) => {
                self.role = Some(role);
                true
            }
            (Some(_), SessionEvent::SignedOut) => {
                self.role = None;
                true
            }
            _ => false,
        }
    }
}

/// Capability handed to views that may change the session (login page,
/// navigation bar). Views never hold the session itself.
pub type SessionUpdate = Rc<dyn Fn(SessionEvent)>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_then_sign_out() {
        let mut session = Session::default();
        assert!(!session.is_signed_in());
        assert!(session.apply(SessionEvent::SignedIn(Role::Hospital)));
        assert_eq!(session.role(), Some(Role::Hospital));
        assert!(session.apply(SessionEvent::SignedOut));
        assert_eq!(session, Session::signed_out());
    }

    #[test]
    fn role_is_fixed_while_signed_in() {
        let mut session = Session::signed_in(Role::Citizen);
        assert!(!session.apply(SessionEvent::SignedIn(Role::Hospital)));
        assert_eq!(session.role(), Some(Role::Citizen));
    }

    #[test]
    fn signing_out_twice_is_a_no_op() {
        let mut session = Session::signed_out();
        assert!(!session.apply(SessionEvent::SignedOut));
    }
}
