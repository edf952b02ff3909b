use anyhow::{bail, Result};

use crate::commands::{require_session, validate_choice, POST_NAMES, PROBLEM_TYPES, SITES};
use crate::models::TicketSubmission;
use crate::session::SessionStore;
use crate::storage::LocalStore;
use crate::tickets::TicketStore;

/// Submit a device/issue request. Field validation lives here; the ticket
/// store accepts the submission as-is.
pub fn run(
    store: &LocalStore,
    name: &str,
    matricule: &str,
    site: &str,
    post_name: &str,
    problem: &str,
) -> Result<()> {
    let session = SessionStore::restore(store);
    require_session(&session)?;

    if name.trim().chars().count() < 2 {
        bail!("Name must be at least 2 characters.");
    }
    if matricule.trim().is_empty() {
        bail!("Matricule is required.");
    }
    validate_choice("site", site, &SITES)?;
    validate_choice("post name", post_name, &POST_NAMES)?;
    validate_choice("problem type", problem, &PROBLEM_TYPES)?;

    let mut tickets = TicketStore::restore(store)?;
    let ticket = tickets.create(TicketSubmission {
        name: name.to_string(),
        matricule: matricule.to_string(),
        site: site.to_string(),
        post_name: post_name.to_string(),
        device_problem: problem.to_string(),
    })?;

    println!("Submitted request {}: {}", ticket.id, ticket.issue_description);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::login;
    use tempfile::tempdir;

    fn setup_logged_in_store() -> (LocalStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(&dir.path().join("test.db")).unwrap();
        login::login(&store, "user", "user123", "user").unwrap();
        (store, dir)
    }

    #[test]
    fn test_run_requires_session() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(&dir.path().join("test.db")).unwrap();
        let result = run(&store, "Jean Dupont", "M1", "misfat 1", "Manager", "écran");
        assert!(result.is_err());
    }

    #[test]
    fn test_run_creates_ticket() {
        let (store, _dir) = setup_logged_in_store();
        run(&store, "Jean Dupont", "M1", "misfat 1", "Manager", "écran").unwrap();
        let tickets = TicketStore::restore(&store).unwrap();
        assert_eq!(tickets.list().len(), 1);
        assert_eq!(tickets.list()[0].site, "misfat 1");
    }

    #[test]
    fn test_run_rejects_short_name() {
        let (store, _dir) = setup_logged_in_store();
        assert!(run(&store, "J", "M1", "misfat 1", "Manager", "écran").is_err());
    }

    #[test]
    fn test_run_rejects_empty_matricule() {
        let (store, _dir) = setup_logged_in_store();
        assert!(run(&store, "Jean", "  ", "misfat 1", "Manager", "écran").is_err());
    }

    #[test]
    fn test_run_rejects_unknown_site() {
        let (store, _dir) = setup_logged_in_store();
        assert!(run(&store, "Jean", "M1", "misfat 9", "Manager", "écran").is_err());
    }

    #[test]
    fn test_run_rejects_unknown_problem() {
        let (store, _dir) = setup_logged_in_store();
        assert!(run(&store, "Jean", "M1", "misfat 1", "Manager", "clavier").is_err());
        // Nothing reached the store
        let tickets = TicketStore::restore(&store).unwrap();
        assert!(tickets.list().is_empty());
    }
}
