// src/domain/filters.rs
use crate::domain::lead::{Lead, LeadStatus};

/// Admin list filtering. Applied in memory after the fetch; the store
/// is never asked to filter.
#[derive(Debug, Clone, Default)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub source: Option<String>,
    /// Case-insensitive substring over name and email.
    pub q: Option<String>,
    pub created_from: Option<i64>,
    pub created_to: Option<i64>,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(status) = self.status {
            if lead.status != status {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if &lead.lead_source != source {
                return false;
            }
        }
        if let Some(q) = &self.q {
            let q = q.to_lowercase();
            let hit = lead.name.to_lowercase().contains(&q)
                || lead.email.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        if let Some(from) = self.created_from {
            if lead.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.created_to {
            if lead.created_at > to {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeadSort {
    #[default]
    NewestFirst,
    OldestFirst,
    Name,
}

impl LeadSort {
    pub fn from_param(s: &str) -> LeadSort {
        match s {
            "oldest" => LeadSort::OldestFirst,
            "name" => LeadSort::Name,
            _ => LeadSort::NewestFirst,
        }
    }
}

/// Shape the fetched leads for display.
pub fn apply(leads: Vec<Lead>, filter: &LeadFilter, sort: LeadSort) -> Vec<Lead> {
    let mut out: Vec<Lead> = leads.into_iter().filter(|l| filter.matches(l)).collect();
    match sort {
        LeadSort::NewestFirst => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        LeadSort::OldestFirst => out.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        LeadSort::Name => out.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
    }
    out
}
