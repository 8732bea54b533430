use maud::{html, Markup};

use crate::domain::lead::LeadStatus;

pub fn status_badge(status: LeadStatus) -> Markup {
    let color = match status {
        LeadStatus::New => "#dbeafe",
        LeadStatus::Contacted => "#fef9c3",
        LeadStatus::Qualified => "#dcfce7",
        LeadStatus::Converted => "#bbf7d0",
        LeadStatus::Lost => "#fee2e2",
    };
    html! {
        span style=(format!("background: {color}; padding: 2px 6px; border-radius: 4px; font-size: 0.85em;")) {
            (status)
        }
    }
}
