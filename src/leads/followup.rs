// src/leads/followup.rs
use chrono::{Duration, NaiveDateTime, NaiveTime};

use crate::errors::ServerError;

/// Accepts the HTML datetime-local shapes, with and without seconds.
pub fn parse_scheduled_for(raw: &str) -> Result<NaiveDateTime, ServerError> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| ServerError::Validation(format!("invalid follow-up datetime: {raw}")))
}

/// Named offsets the lead detail form offers. Pure: everything derives
/// from the `now` handed in, nothing is persisted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUpPreset {
    TomorrowMorning,
    InThreeDays,
    NextWeek,
}

impl FollowUpPreset {
    pub const ALL: [FollowUpPreset; 3] = [
        FollowUpPreset::TomorrowMorning,
        FollowUpPreset::InThreeDays,
        FollowUpPreset::NextWeek,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FollowUpPreset::TomorrowMorning => "Tomorrow 10am",
            FollowUpPreset::InThreeDays => "In 3 days",
            FollowUpPreset::NextWeek => "Next week",
        }
    }

    pub fn param(&self) -> &'static str {
        match self {
            FollowUpPreset::TomorrowMorning => "tomorrow",
            FollowUpPreset::InThreeDays => "three_days",
            FollowUpPreset::NextWeek => "next_week",
        }
    }

    pub fn from_param(s: &str) -> Option<FollowUpPreset> {
        match s {
            "tomorrow" => Some(FollowUpPreset::TomorrowMorning),
            "three_days" => Some(FollowUpPreset::InThreeDays),
            "next_week" => Some(FollowUpPreset::NextWeek),
            _ => None,
        }
    }

    /// Resolve to a concrete datetime. Day offsets land at 10:00, the
    /// week offset keeps the current time of day.
    pub fn resolve(&self, now: NaiveDateTime) -> NaiveDateTime {
        let morning = NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default();
        match self {
            FollowUpPreset::TomorrowMorning => (now.date() + Duration::days(1)).and_time(morning),
            FollowUpPreset::InThreeDays => (now.date() + Duration::days(3)).and_time(morning),
            FollowUpPreset::NextWeek => now + Duration::days(7),
        }
    }
}
