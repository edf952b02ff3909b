use anyhow::{bail, Result};

use crate::commands::require_admin;
use crate::models::TicketStatus;
use crate::session::SessionStore;
use crate::storage::LocalStore;
use crate::tickets::TicketStore;

// Only the transitions the dashboard offers: a pending ticket can be marked
// done or cancelled; a triaged ticket can be reopened. The store itself
// accepts any status; the gate lives here.

pub fn done(store: &LocalStore, id: &str) -> Result<()> {
    triage(store, id, TicketStatus::Done)
}

pub fn cancel(store: &LocalStore, id: &str) -> Result<()> {
    triage(store, id, TicketStatus::Cancelled)
}

fn triage(store: &LocalStore, id: &str, status: TicketStatus) -> Result<()> {
    let session = SessionStore::restore(store);
    require_admin(&session)?;

    let mut tickets = TicketStore::restore(store)?;
    match tickets.get(id) {
        Some(t) if t.status == TicketStatus::Pending => {}
        Some(t) => bail!("Ticket {} is already {}. Reopen it first.", id, t.status),
        None => bail!("Ticket {} not found", id),
    }

    tickets.update_status(id, status)?;
    println!("Marked {} as {}", id, status);
    Ok(())
}

pub fn reopen(store: &LocalStore, id: &str) -> Result<()> {
    let session = SessionStore::restore(store);
    require_admin(&session)?;

    let mut tickets = TicketStore::restore(store)?;
    match tickets.get(id) {
        Some(t) if t.status != TicketStatus::Pending => {}
        Some(_) => bail!("Ticket {} is still pending.", id),
        None => bail!("Ticket {} not found", id),
    }

    tickets.update_status(id, TicketStatus::Pending)?;
    println!("Reopened {}", id);
    Ok(())
}
