// src/events/types.rs
use chrono::NaiveDateTime;

use crate::domain::lead::LeadStatus;

/// What the rest of the process can observe about lead mutations.
/// Exactly one signal per successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum LeadSignal {
    Created {
        lead_id: String,
        lead_source: String,
    },
    StatusChanged {
        lead_id: String,
        from: LeadStatus,
        to: LeadStatus,
    },
    NoteAdded {
        lead_id: String,
    },
    FollowUpScheduled {
        lead_id: String,
        scheduled_for: NaiveDateTime,
    },
}

impl LeadSignal {
    pub fn lead_id(&self) -> &str {
        match self {
            LeadSignal::Created { lead_id, .. }
            | LeadSignal::StatusChanged { lead_id, .. }
            | LeadSignal::NoteAdded { lead_id }
            | LeadSignal::FollowUpScheduled { lead_id, .. } => lead_id,
        }
    }
}
