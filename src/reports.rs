use anyhow::Result;
use chrono::Utc;
use tracing::warn;

use crate::models::{next_id, Report, ReportSubmission};
use crate::storage::LocalStore;

pub const REPORTS_KEY: &str = "coswinPlusReports";

const ID_PREFIX: &str = "REPORT-";
const ID_WIDTH: usize = 6;

/// The reports collection plus its persistence mirror. Reports are
/// append-only: no update, no delete, no status.
pub struct ReportStore<'a> {
    store: &'a LocalStore,
    reports: Vec<Report>,
}

impl<'a> ReportStore<'a> {
    /// Same fallback discipline as the ticket store: absent or malformed
    /// content yields the empty default, persisted immediately.
    pub fn restore(store: &'a LocalStore) -> Result<Self> {
        if let Some(raw) = store.get(REPORTS_KEY) {
            match serde_json::from_str::<Vec<Report>>(&raw) {
                Ok(reports) => return Ok(ReportStore { store, reports }),
                Err(e) => {
                    warn!(error = %e, "discarding malformed report data");
                }
            }
        }
        let fresh = ReportStore {
            store,
            reports: Vec::new(),
        };
        fresh.persist()?;
        Ok(fresh)
    }

    pub fn create(&mut self, submission: ReportSubmission) -> Result<Report> {
        let report = Report {
            id: next_id(ID_PREFIX, ID_WIDTH, self.reports.iter().map(|r| r.id.as_str())),
            site: submission.site,
            post_name: submission.post_name,
            problem: submission.problem,
            os: submission.os,
            pc_type: submission.pc_type,
            description: submission.description,
            created_at: Utc::now(),
        };
        self.reports.insert(0, report.clone());
        self.persist()?;
        Ok(report)
    }

    pub fn list(&self) -> &[Report] {
        &self.reports
    }

    fn persist(&self) -> Result<()> {
        self.store
            .set(REPORTS_KEY, &serde_json::to_string(&self.reports)?)
    }
}
