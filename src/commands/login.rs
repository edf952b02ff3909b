use anyhow::{bail, Result};

use crate::models::UserRole;
use crate::session::SessionStore;
use crate::storage::LocalStore;

pub fn login(store: &LocalStore, username: &str, password: &str, role: &str) -> Result<()> {
    let as_role: UserRole = match role.parse() {
        Ok(r) => r,
        Err(e) => bail!("{}", e),
    };

    let mut session = SessionStore::restore(store);
    if !session.login(username, password, as_role)? {
        bail!("Invalid username, password, or role.");
    }

    println!("Logged in as {} ({}).", username, as_role);
    match as_role {
        UserRole::Admin => println!("Open the dashboard with 'tickety list'."),
        UserRole::User => println!("Submit a request with 'tickety request'."),
    }
    Ok(())
}

pub fn logout(store: &LocalStore) -> Result<()> {
    let mut session = SessionStore::restore(store);
    session.logout()?;
    println!("Logged out. Run 'tickety login' to sign in again.");
    Ok(())
}

pub fn whoami(store: &LocalStore) -> Result<()> {
    let session = SessionStore::restore(store);
    match session.current() {
        Some(user) => println!("{} ({})", user.username, user.role),
        None => println!("Not logged in."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SESSION_KEY;
    use tempfile::tempdir;

    fn setup_test_store() -> (LocalStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(&dir.path().join("test.db")).unwrap();
        (store, dir)
    }

    #[test]
    fn test_login_success_persists_session() {
        let (store, _dir) = setup_test_store();
        login(&store, "admin", "admin123", "admin").unwrap();
        assert!(store.get(SESSION_KEY).is_some());
    }

    #[test]
    fn test_login_bad_credentials() {
        let (store, _dir) = setup_test_store();
        assert!(login(&store, "admin", "nope", "admin").is_err());
        assert_eq!(store.get(SESSION_KEY), None);
    }

    #[test]
    fn test_login_unknown_role() {
        let (store, _dir) = setup_test_store();
        assert!(login(&store, "admin", "admin123", "root").is_err());
    }

    #[test]
    fn test_logout_removes_key() {
        let (store, _dir) = setup_test_store();
        login(&store, "user", "user123", "user").unwrap();
        logout(&store).unwrap();
        assert_eq!(store.get(SESSION_KEY), None);
    }

    #[test]
    fn test_whoami_never_fails() {
        let (store, _dir) = setup_test_store();
        assert!(whoami(&store).is_ok());
        login(&store, "user", "user123", "user").unwrap();
        assert!(whoami(&store).is_ok());
    }
}
