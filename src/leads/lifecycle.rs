// src/leads/lifecycle.rs
use chrono::NaiveDateTime;

use crate::domain::activity::{ActivityDetail, ActivityEntry};
use crate::domain::lead::{Lead, LeadPatch, LeadStatus};
use crate::errors::ServerError;
use crate::events::bus::LeadBus;
use crate::events::types::LeadSignal;
use crate::leads::store::LeadStore;

/// Mediates every mutation of an existing lead: status transitions,
/// note appends, follow-up scheduling. Borrows the caller's lead and
/// returns the store-confirmed record; if the store call fails, the
/// caller's copy is untouched and nothing has been written. Nothing
/// here retries.
pub struct LeadLifecycle<'a> {
    store: &'a dyn LeadStore,
    bus: &'a LeadBus,
}

impl<'a> LeadLifecycle<'a> {
    pub fn new(store: &'a dyn LeadStore, bus: &'a LeadBus) -> Self {
        Self { store, bus }
    }

    /// Move `lead` to `new_status`. Any status may follow any other;
    /// `converted_at` is stamped on the first entry into `converted`
    /// and never cleared afterwards.
    pub fn transition(
        &self,
        lead: &Lead,
        new_status: LeadStatus,
        now: i64,
    ) -> Result<Lead, ServerError> {
        let mut patch = LeadPatch {
            status: Some(new_status),
            ..Default::default()
        };
        if new_status == LeadStatus::Converted && lead.converted_at.is_none() {
            patch.converted_at = Some(now);
        }

        let entry = ActivityEntry {
            occurred_at: now,
            detail: ActivityDetail::StatusChanged {
                from: lead.status,
                to: new_status,
            },
        };

        let updated = self
            .store
            .update_lead(&lead.id, lead.version, &patch, Some(&entry))?;

        tracing::info!(
            lead_id = %updated.id,
            from = %lead.status,
            to = %new_status,
            "lead status changed"
        );
        self.bus.emit(LeadSignal::StatusChanged {
            lead_id: updated.id.clone(),
            from: lead.status,
            to: new_status,
        });
        Ok(updated)
    }

    /// Append a free-text note. Not idempotent: every call records a
    /// distinct entry.
    pub fn append_note(&self, lead: &Lead, text: &str, now: i64) -> Result<Lead, ServerError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ServerError::Validation("note text must not be empty".into()));
        }

        let entry = ActivityEntry {
            occurred_at: now,
            detail: ActivityDetail::NoteAdded {
                text: text.to_string(),
            },
        };

        let updated =
            self.store
                .update_lead(&lead.id, lead.version, &LeadPatch::default(), Some(&entry))?;

        self.bus.emit(LeadSignal::NoteAdded {
            lead_id: updated.id.clone(),
        });
        Ok(updated)
    }

    /// Record a commitment to contact the lead again. The status is
    /// not touched. Reminder delivery is someone else's job; this only
    /// records the commitment in the history.
    pub fn schedule_follow_up(
        &self,
        lead: &Lead,
        scheduled_for: NaiveDateTime,
        note: Option<&str>,
        now: i64,
    ) -> Result<Lead, ServerError> {
        let note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from);

        let entry = ActivityEntry {
            occurred_at: now,
            detail: ActivityDetail::FollowUpScheduled {
                scheduled_for,
                note,
            },
        };

        let updated =
            self.store
                .update_lead(&lead.id, lead.version, &LeadPatch::default(), Some(&entry))?;

        self.bus.emit(LeadSignal::FollowUpScheduled {
            lead_id: updated.id.clone(),
            scheduled_for,
        });
        Ok(updated)
    }
}
