// src/domain/lead.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ServerError;

/// Pipeline stage of a lead. The set is flat: any status may follow
/// any other, and nothing is enforced about ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        }
    }

    /// `converted` and `lost` are conventionally treated as terminal
    /// in the UI. Nothing prevents further transitions out of them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LeadStatus::Converted | LeadStatus::Lost)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "qualified" => Ok(LeadStatus::Qualified),
            "converted" => Ok(LeadStatus::Converted),
            "lost" => Ok(LeadStatus::Lost),
            other => Err(ServerError::InvalidStatus(format!(
                "unknown lead status: {other}"
            ))),
        }
    }
}

/// A lead as stored. `version` increments on every successful update;
/// an update must present the version it read or it is rejected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    /// Original inquiry text. Immutable after creation.
    pub message: Option<String>,
    pub property_address: Option<String>,
    pub property_id: Option<String>,
    /// Capture channel tag ("website", "callback_widget", ...). Set once.
    pub lead_source: String,
    pub status: LeadStatus,
    pub created_at: i64,
    /// Stamped the first time status reaches `converted`, then never
    /// cleared, even if the status later moves away.
    pub converted_at: Option<i64>,
    pub version: i64,
}

/// Fields a capture surface provides. Status is not among them: every
/// new lead starts at `new`.
#[derive(Debug, Clone)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub property_address: Option<String>,
    pub property_id: Option<String>,
    pub lead_source: String,
}

/// Partial update applied by `update_lead`. `message` and
/// `lead_source` are set once at capture and stay out of the patch;
/// `status` and `converted_at` are written by the state machine only.
#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<LeadStatus>,
    pub converted_at: Option<i64>,
}
