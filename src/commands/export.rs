use anyhow::{Context, Result};
use std::fs;

use crate::commands::require_admin;
use crate::models::Ticket;
use crate::session::SessionStore;
use crate::storage::LocalStore;
use crate::tickets::TicketStore;

const CSV_HEADER: &str = "ID,Submitted By,Device Name,Issue Description,Priority,Status,Created At";

/// Wrap a cell in double quotes when it contains a comma, quote, or newline,
/// doubling any quotes inside. Other cells are written bare.
fn escape_csv_cell(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

fn csv_row(ticket: &Ticket) -> String {
    [
        escape_csv_cell(&ticket.id),
        escape_csv_cell(&ticket.submitted_by),
        escape_csv_cell(&ticket.device_name),
        escape_csv_cell(&ticket.issue_description),
        escape_csv_cell(&ticket.priority.to_string()),
        escape_csv_cell(&ticket.status.to_string()),
        escape_csv_cell(&ticket.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
    ]
    .join(",")
}

fn build_csv(tickets: &[Ticket]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');
    let rows: Vec<String> = tickets.iter().map(csv_row).collect();
    csv.push_str(&rows.join("\n"));
    csv
}

pub fn run(store: &LocalStore, output_path: &str) -> Result<()> {
    let session = SessionStore::restore(store);
    require_admin(&session)?;

    let tickets = TicketStore::restore(store)?;
    let csv = build_csv(tickets.list());

    fs::write(output_path, csv).context("Failed to write export file")?;
    eprintln!("Exported {} tickets to {}", tickets.list().len(), output_path);
    Ok(())
}
