// src/domain/activity.rs
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::lead::LeadStatus;

/// One record in a lead's append-only history. Entries are only ever
/// appended; nothing edits or removes a prior entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub occurred_at: i64,
    #[serde(flatten)]
    pub detail: ActivityDetail,
}

/// What happened. Tagged so stored rows stay queryable by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityDetail {
    NoteAdded {
        text: String,
    },
    FollowUpScheduled {
        scheduled_for: NaiveDateTime,
        note: Option<String>,
    },
    StatusChanged {
        from: LeadStatus,
        to: LeadStatus,
    },
}

impl ActivityDetail {
    pub fn kind(&self) -> &'static str {
        match self {
            ActivityDetail::NoteAdded { .. } => "note_added",
            ActivityDetail::FollowUpScheduled { .. } => "follow_up_scheduled",
            ActivityDetail::StatusChanged { .. } => "status_changed",
        }
    }
}

/// Render the history to its display text: one block per entry, a
/// bracketed timestamp header, blank-line separated, oldest first.
/// Presentation only; the output is never parsed back into entries.
pub fn render_history(entries: &[ActivityEntry]) -> String {
    let blocks: Vec<String> = entries.iter().map(render_entry).collect();
    blocks.join("\n\n")
}

pub fn render_entry(entry: &ActivityEntry) -> String {
    let stamp = format_timestamp(entry.occurred_at);
    match &entry.detail {
        ActivityDetail::NoteAdded { text } => format!("[{stamp}] {text}"),
        ActivityDetail::FollowUpScheduled {
            scheduled_for,
            note,
        } => {
            let when = scheduled_for.format("%Y-%m-%dT%H:%M:%S");
            match note {
                Some(n) => format!("[{stamp}] FOLLOW-UP SCHEDULED: {when}\n{n}"),
                None => format!("[{stamp}] FOLLOW-UP SCHEDULED: {when}"),
            }
        }
        ActivityDetail::StatusChanged { from, to } => {
            format!("[{stamp}] Status changed: {from} -> {to}")
        }
    }
}

fn format_timestamp(ts: i64) -> String {
    match DateTime::from_timestamp(ts, 0) {
        Some(dt) => dt.naive_utc().format("%Y-%m-%d %H:%M").to_string(),
        None => ts.to_string(),
    }
}
