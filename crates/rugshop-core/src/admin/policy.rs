//! Who may manage the catalogue, and the route guard built on it.

use serde::{Deserialize, Serialize};

/// Path that is always reachable so an admin can sign in.
pub const LOGIN_PATH: &str = "/admin/login";

/// A signed-in user as reported by the auth gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
}

impl Identity {
    pub fn with_email(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: Some(email.into()),
        }
    }
}

/// Decides whether an identity may use the admin pages.
pub trait AuthorizationPolicy {
    fn is_authorized(&self, identity: &Identity) -> bool;
}

impl<F> AuthorizationPolicy for F
where
    F: Fn(&Identity) -> bool,
{
    fn is_authorized(&self, identity: &Identity) -> bool {
        self(identity)
    }
}

/// Single-tenant policy: one configured admin e-mail, compared
/// case-insensitively. An empty configured address authorizes nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleAdminPolicy {
    admin_email: String,
}

impl SingleAdminPolicy {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into().trim().to_lowercase(),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }
}

impl AuthorizationPolicy for SingleAdminPolicy {
    fn is_authorized(&self, identity: &Identity) -> bool {
        if self.admin_email.is_empty() {
            return false;
        }
        identity
            .email
            .as_deref()
            .is_some_and(|email| email.trim().to_lowercase() == self.admin_email)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
}

/// Gate for every page under `/admin`.
pub fn guard_route<P>(path: &str, identity: Option<&Identity>, policy: &P) -> GuardDecision
where
    P: AuthorizationPolicy + ?Sized,
{
    if path == LOGIN_PATH {
        return GuardDecision::Allow;
    }
    match identity {
        Some(identity) if policy.is_authorized(identity) => GuardDecision::Allow,
        _ => GuardDecision::RedirectToLogin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> SingleAdminPolicy {
        SingleAdminPolicy::new("Owner@Example.com")
    }

    #[test]
    fn test_single_admin_is_case_insensitive() {
        let policy = policy();
        assert!(policy.is_authorized(&Identity::with_email("u1", "owner@example.COM")));
        assert!(!policy.is_authorized(&Identity::with_email("u2", "guest@example.com")));
        assert!(!policy.is_authorized(&Identity { uid: "u3".into(), email: None }));
    }

    #[test]
    fn test_empty_admin_email_authorizes_nobody() {
        let policy = SingleAdminPolicy::new("  ");
        assert!(!policy.is_authorized(&Identity::with_email("u1", "")));
    }

    #[test]
    fn test_closure_policy() {
        let staff = |identity: &Identity| identity.uid.starts_with("staff-");
        assert!(staff.is_authorized(&Identity::with_email("staff-1", "a@b.c")));
        assert!(!staff.is_authorized(&Identity::with_email("user-1", "a@b.c")));
    }

    #[test]
    fn test_guard_route() {
        let policy = policy();
        let admin = Identity::with_email("u1", "owner@example.com");
        let guest = Identity::with_email("u2", "guest@example.com");

        assert_eq!(guard_route(LOGIN_PATH, None, &policy), GuardDecision::Allow);
        assert_eq!(guard_route("/admin/products", None, &policy), GuardDecision::RedirectToLogin);
        assert_eq!(
            guard_route("/admin/products", Some(&guest), &policy),
            GuardDecision::RedirectToLogin
        );
        assert_eq!(guard_route("/admin/products", Some(&admin), &policy), GuardDecision::Allow);
    }

    #[test]
    fn test_guard_accepts_trait_object() {
        let policy: Box<dyn AuthorizationPolicy> = Box::new(policy());
        let admin = Identity::with_email("u1", "owner@example.com");
        assert_eq!(guard_route("/admin", Some(&admin), policy.as_ref()), GuardDecision::Allow);
    }
}
