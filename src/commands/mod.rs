pub mod export;
pub mod init;
pub mod list;
pub mod login;
pub mod report;
pub mod request;
pub mod status;

use anyhow::{bail, Result};

use crate::models::{User, UserRole};
use crate::session::SessionStore;

// Fixed deployment lists the submission forms select from.
pub(crate) const SITES: [&str; 3] = ["misfat 1", "misfat 2", "misfat 3"];
pub(crate) const POST_NAMES: [&str; 4] =
    ["Manager", "Développeur", "Designer", "Personnel de soutien"];
pub(crate) const PROBLEM_TYPES: [&str; 4] =
    ["imprimante étiquette", "code barre", "souris", "écran"];
pub(crate) const OS_TYPES: [&str; 2] = ["windows 10", "windows 11"];
pub(crate) const PC_TYPES: [&str; 2] = ["dell intel", "other"];

pub(crate) fn require_session<'a>(session: &'a SessionStore<'_>) -> Result<&'a User> {
    match session.current() {
        Some(user) => Ok(user),
        None => bail!("Not logged in. Run 'tickety login' first."),
    }
}

pub(crate) fn require_admin<'a>(session: &'a SessionStore<'_>) -> Result<&'a User> {
    let user = require_session(session)?;
    if user.role != UserRole::Admin {
        bail!("This command requires the admin role.");
    }
    Ok(user)
}

pub(crate) fn validate_choice(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        bail!(
            "Invalid {} '{}'. Must be one of: {}",
            field,
            value,
            allowed.join(", ")
        );
    }
    Ok(())
}
