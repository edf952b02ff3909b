use anyhow::{bail, Result};

use crate::commands::require_admin;
use crate::models::TicketStatus;
use crate::session::SessionStore;
use crate::storage::LocalStore;
use crate::tickets::TicketStore;

/// List tickets, newest first. `pending` is the active queue; `done` and
/// `cancelled` make up the archive.
pub fn run(store: &LocalStore, status: &str) -> Result<()> {
    let session = SessionStore::restore(store);
    require_admin(&session)?;

    let filter: Option<TicketStatus> = if status == "all" {
        None
    } else {
        match status.parse() {
            Ok(s) => Some(s),
            Err(e) => bail!("{}", e),
        }
    };

    let tickets = TicketStore::restore(store)?;
    let visible: Vec<_> = tickets
        .list()
        .iter()
        .filter(|t| filter.map_or(true, |s| t.status == s))
        .collect();

    if visible.is_empty() {
        println!("No tickets found.");
        return Ok(());
    }

    for ticket in visible {
        println!(
            "{:<12} [{:<9}] {:<24} {:<28} {:<8} {}",
            ticket.id,
            ticket.status.to_string(),
            truncate(&ticket.user_name, 24),
            truncate(&ticket.issue_description, 28),
            ticket.priority.to_string(),
            ticket.created_at.format("%Y-%m-%d")
        );
    }

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars - 3).collect();
        format!("{}...", truncated)
    }
}
