// src/leads/store.rs
use crate::domain::activity::ActivityEntry;
use crate::domain::lead::{Lead, LeadPatch, NewLead};
use crate::errors::ServerError;

/// The persistence boundary for leads. The core talks to this and
/// nothing else; the web layer hands it the SQLite implementation.
/// No method ever deletes a lead.
pub trait LeadStore {
    /// Insert a new lead with a fresh id and `status = new`.
    fn create_lead(&self, fields: &NewLead, now: i64) -> Result<Lead, ServerError>;

    fn get_lead(&self, id: &str) -> Result<Lead, ServerError>;

    /// Apply `patch` and append `entry` (if any) in one transaction.
    /// `expected_version` must match the stored version, otherwise the
    /// update is rejected with `Conflict` and nothing is written.
    /// Returns the record as stored after the update.
    fn update_lead(
        &self,
        id: &str,
        expected_version: i64,
        patch: &LeadPatch,
        entry: Option<&ActivityEntry>,
    ) -> Result<Lead, ServerError>;

    fn list_leads(&self) -> Result<Vec<Lead>, ServerError>;

    /// Full history for one lead, in append order.
    fn activity_for(&self, lead_id: &str) -> Result<Vec<ActivityEntry>, ServerError>;
}
