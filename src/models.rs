use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::User => write!(f, "user"),
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "user" => Ok(UserRole::User),
            other => Err(format!("Unknown role '{}'. Must be admin or user", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketStatus {
    Pending,
    Done,
    Cancelled,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Pending => write!(f, "Pending"),
            TicketStatus::Done => write!(f, "Done"),
            TicketStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" | "Pending" => Ok(TicketStatus::Pending),
            "done" | "Done" => Ok(TicketStatus::Done),
            "cancelled" | "Cancelled" => Ok(TicketStatus::Cancelled),
            other => Err(format!(
                "Unknown status '{}'. Must be pending, done, or cancelled",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketPriority::Low => write!(f, "Low"),
            TicketPriority::Medium => write!(f, "Medium"),
            TicketPriority::High => write!(f, "High"),
        }
    }
}

/// An IT support request with a triage status. Field names in the persisted
/// JSON are camelCase, matching the layout earlier deployments wrote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub device_name: String,
    pub issue_description: String,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub submitted_by: String,
    pub created_at: DateTime<Utc>,
    pub site: String,
    pub post_name: String,
    pub user_name: String,
    pub user_matricule: String,
}

/// An immutable site incident record. Append-only; no update or delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub site: String,
    pub post_name: String,
    pub problem: String,
    pub os: String,
    pub pc_type: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Canonical input for ticket creation. Validation happens at the command
/// layer; the store accepts this shape as-is.
#[derive(Debug, Clone)]
pub struct TicketSubmission {
    pub name: String,
    pub matricule: String,
    pub site: String,
    pub post_name: String,
    pub device_problem: String,
}

/// Canonical input for report creation.
#[derive(Debug, Clone)]
pub struct ReportSubmission {
    pub site: String,
    pub post_name: String,
    pub problem: String,
    pub os: String,
    pub pc_type: String,
    pub description: String,
}

/// Allocate the next id for a collection: prefix plus a zero-padded counter
/// one above the highest numeric suffix already present. Ids that don't match
/// the prefix or don't parse are skipped.
pub(crate) fn next_id<'a>(
    prefix: &str,
    width: usize,
    existing: impl Iterator<Item = &'a str>,
) -> String {
    let max = existing
        .filter_map(|id| id.strip_prefix(prefix))
        .filter_map(|n| n.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{:0width$}", prefix, max + 1, width = width)
}
