use anyhow::Result;
use chrono::Utc;
use tracing::warn;

use crate::models::{next_id, Ticket, TicketPriority, TicketStatus, TicketSubmission};
use crate::storage::LocalStore;

pub const TICKETS_KEY: &str = "ticketyTickets";

const ID_PREFIX: &str = "TICKET-";
const ID_WIDTH: usize = 4;

/// The tickets collection plus its persistence mirror. The collection is
/// loaded once at construction and rewritten in full on every mutation.
/// Newest tickets come first.
pub struct TicketStore<'a> {
    store: &'a LocalStore,
    tickets: Vec<Ticket>,
}

impl<'a> TicketStore<'a> {
    /// Rehydrate from the store. Absent or malformed content falls back to
    /// the default empty collection, which is persisted immediately so the
    /// key exists on the next load.
    pub fn restore(store: &'a LocalStore) -> Result<Self> {
        if let Some(raw) = store.get(TICKETS_KEY) {
            match serde_json::from_str::<Vec<Ticket>>(&raw) {
                Ok(tickets) => return Ok(TicketStore { store, tickets }),
                Err(e) => {
                    warn!(error = %e, "discarding malformed ticket data");
                }
            }
        }
        let fresh = TicketStore {
            store,
            tickets: Vec::new(),
        };
        fresh.persist()?;
        Ok(fresh)
    }

    /// Create a ticket from a validated submission. New tickets always start
    /// `Pending` with `Medium` priority (the request form does not collect
    /// priority) and are prepended to the collection.
    pub fn create(&mut self, submission: TicketSubmission) -> Result<Ticket> {
        let ticket = Ticket {
            id: next_id(ID_PREFIX, ID_WIDTH, self.tickets.iter().map(|t| t.id.as_str())),
            issue_description: format!("Problème avec {}", submission.device_problem),
            device_name: submission.device_problem,
            priority: TicketPriority::Medium,
            status: TicketStatus::Pending,
            submitted_by: "user".to_string(),
            created_at: Utc::now(),
            site: submission.site,
            post_name: submission.post_name,
            user_name: submission.name,
            user_matricule: submission.matricule,
        };
        self.tickets.insert(0, ticket.clone());
        self.persist()?;
        Ok(ticket)
    }

    /// Replace the status of the matching ticket in place, leaving every
    /// other field untouched. An unknown id is a no-op, not an error; nothing
    /// is written in that case.
    pub fn update_status(&mut self, ticket_id: &str, status: TicketStatus) -> Result<bool> {
        match self.tickets.iter_mut().find(|t| t.id == ticket_id) {
            Some(ticket) => {
                ticket.status = status;
                self.persist()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn get(&self, ticket_id: &str) -> Option<&Ticket> {
        self.tickets.iter().find(|t| t.id == ticket_id)
    }

    pub fn list(&self) -> &[Ticket] {
        &self.tickets
    }

    fn persist(&self) -> Result<()> {
        self.store
            .set(TICKETS_KEY, &serde_json::to_string(&self.tickets)?)
    }
}
