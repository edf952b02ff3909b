use anyhow::{bail, Result};

use crate::commands::{require_admin, validate_choice, OS_TYPES, PC_TYPES, SITES};
use crate::models::ReportSubmission;
use crate::reports::ReportStore;
use crate::session::SessionStore;
use crate::storage::LocalStore;

pub fn submit(
    store: &LocalStore,
    site: &str,
    post_name: &str,
    problem: &str,
    os: &str,
    pc_type: &str,
    description: &str,
) -> Result<()> {
    let session = SessionStore::restore(store);
    require_admin(&session)?;

    validate_choice("site", site, &SITES)?;
    validate_choice("os", os, &OS_TYPES)?;
    validate_choice("pc type", pc_type, &PC_TYPES)?;
    if post_name.trim().is_empty() {
        bail!("Post name is required.");
    }
    if problem.trim().is_empty() {
        bail!("Problem is required.");
    }
    if description.trim().is_empty() {
        bail!("Description is required.");
    }

    let mut reports = ReportStore::restore(store)?;
    let report = reports.create(ReportSubmission {
        site: site.to_string(),
        post_name: post_name.to_string(),
        problem: problem.to_string(),
        os: os.to_string(),
        pc_type: pc_type.to_string(),
        description: description.to_string(),
    })?;

    println!("Filed report {}", report.id);
    Ok(())
}

pub fn list(store: &LocalStore) -> Result<()> {
    let session = SessionStore::restore(store);
    require_admin(&session)?;

    let reports = ReportStore::restore(store)?;
    if reports.list().is_empty() {
        println!("No reports found.");
        return Ok(());
    }

    for report in reports.list() {
        println!("{}: {}", report.id, report.problem);
        println!("  Site: {} - {}", report.site, report.post_name);
        println!("  Machine: {} ({})", report.pc_type, report.os);
        println!("  Filed: {}", report.created_at.format("%Y-%m-%d %H:%M:%S"));
        for line in report.description.lines() {
            println!("  {}", line);
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::login;
    use tempfile::tempdir;

    fn setup_admin_store() -> (LocalStore, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(&dir.path().join("test.db")).unwrap();
        login::login(&store, "admin", "admin123", "admin").unwrap();
        (store, dir)
    }

    #[test]
    fn test_submit_requires_admin() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(&dir.path().join("test.db")).unwrap();
        login::login(&store, "user", "user123", "user").unwrap();
        let result = submit(
            &store, "misfat 1", "Manager", "probleme ecran", "windows 10", "other", "desc",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_submit_creates_report() {
        let (store, _dir) = setup_admin_store();
        submit(
            &store,
            "misfat 3",
            "Designer",
            "probleme ecran",
            "windows 11",
            "dell intel",
            "L'écran clignote",
        )
        .unwrap();
        let reports = ReportStore::restore(&store).unwrap();
        assert_eq!(reports.list().len(), 1);
        assert_eq!(reports.list()[0].site, "misfat 3");
    }

    #[test]
    fn test_submit_rejects_unknown_os() {
        let (store, _dir) = setup_admin_store();
        let result = submit(
            &store, "misfat 1", "Manager", "probleme ecran", "windows 7", "other", "desc",
        );
        assert!(result.is_err());
        assert!(ReportStore::restore(&store).unwrap().list().is_empty());
    }

    #[test]
    fn test_submit_rejects_empty_description() {
        let (store, _dir) = setup_admin_store();
        let result = submit(
            &store, "misfat 1", "Manager", "probleme ecran", "windows 10", "other", "  ",
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_list_empty_and_filled() {
        let (store, _dir) = setup_admin_store();
        assert!(list(&store).is_ok());
        submit(
            &store, "misfat 1", "Manager", "probleme ecran", "windows 10", "other", "desc",
        )
        .unwrap();
        assert!(list(&store).is_ok());
    }
}
