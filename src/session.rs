use anyhow::Result;
use tracing::warn;

use crate::models::{User, UserRole};
use crate::storage::LocalStore;

pub const SESSION_KEY: &str = "ticketyUser";

// Closed two-account system. No account creation, no password change.
const CREDENTIALS: [(&str, &str, UserRole); 2] = [
    ("admin", "admin123", UserRole::Admin),
    ("user", "user123", UserRole::User),
];

/// The currently authenticated identity, mirrored to the local store under a
/// fixed key. At most one session per process.
pub struct SessionStore<'a> {
    store: &'a LocalStore,
    current: Option<User>,
}

impl<'a> SessionStore<'a> {
    /// Rehydrate the session from the store. Absent or malformed data means
    /// no session; never fails.
    pub fn restore(store: &'a LocalStore) -> Self {
        let current = store.get(SESSION_KEY).and_then(|raw| {
            match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "discarding malformed session data");
                    None
                }
            }
        });
        SessionStore { store, current }
    }

    pub fn current(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// Check the credentials against the two fixed accounts, gated by the
    /// claimed role. `Ok(false)` is a plain authentication failure with no
    /// state change and no write.
    pub fn login(&mut self, username: &str, password: &str, as_role: UserRole) -> Result<bool> {
        let matched = CREDENTIALS
            .iter()
            .any(|(u, p, r)| *u == username && *p == password && *r == as_role);

        if !matched {
            return Ok(false);
        }

        let user = User {
            username: username.to_string(),
            role: as_role,
        };
        self.store.set(SESSION_KEY, &serde_json::to_string(&user)?)?;
        self.current = Some(user);
        Ok(true)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.current = None;
        self.store.remove(SESSION_KEY)
    }
}
