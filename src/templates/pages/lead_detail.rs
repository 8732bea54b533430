// templates/pages/lead_detail.rs

use chrono::DateTime;
use maud::{html, Markup};

use crate::domain::activity::{render_history, ActivityEntry};
use crate::domain::lead::{Lead, LeadStatus};
use crate::leads::followup::FollowUpPreset;
use crate::templates::{desktop_layout, status_badge};

pub struct LeadDetailVm {
    pub lead: Lead,
    pub history: Vec<ActivityEntry>,
    /// Advisory lower bound for the follow-up picker ("%Y-%m-%dT%H:%M").
    pub min_follow_up: String,
}

pub fn lead_detail_page(vm: &LeadDetailVm) -> Markup {
    let lead = &vm.lead;
    desktop_layout(
        &format!("Lead: {}", lead.name),
        html! {
            main class="container" {
                p { a href="/admin/leads" { "< Back to leads" } }
                h1 {
                    (lead.name) " " (status_badge(lead.status))
                    @if lead.status.is_terminal() {
                        span style="color: #6b7280; font-size: 0.6em;" { " closed" }
                    }
                }

                div class="card" style="margin-bottom: 2rem;" {
                    table style="border-collapse: collapse;" {
                        tr {
                            th style="padding: 4px 12px 4px 0; text-align: left;" { "Source" }
                            td { (lead.lead_source) }
                        }
                        @if let Some(address) = &lead.property_address {
                            tr {
                                th style="padding: 4px 12px 4px 0; text-align: left;" { "Property" }
                                td { (address) }
                            }
                        }
                        @if let Some(message) = &lead.message {
                            tr {
                                th style="padding: 4px 12px 4px 0; text-align: left;" { "Inquiry" }
                                td { (message) }
                            }
                        }
                        tr {
                            th style="padding: 4px 12px 4px 0; text-align: left;" { "Created" }
                            td { (stamp_value(Some(lead.created_at))) }
                        }
                        @if lead.converted_at.is_some() {
                            tr {
                                th style="padding: 4px 12px 4px 0; text-align: left;" { "Converted" }
                                td { (stamp_value(lead.converted_at)) }
                            }
                        }
                    }
                }

                div class="card" style="margin-bottom: 2rem;" {
                    h3 { "Contact" }
                    form action=(format!("/admin/leads/{}/contact", lead.id)) method="post" style="display: flex; gap: 10px; flex-wrap: wrap; align-items: flex-end;" {
                        input type="hidden" name="version" value=(lead.version);
                        label { "Name"
                            input type="text" name="name" value=(lead.name) required;
                        }
                        label { "Email"
                            input type="email" name="email" value=(lead.email) required;
                        }
                        label { "Phone"
                            input type="tel" name="phone" value=(lead.phone.as_deref().unwrap_or(""));
                        }
                        button type="submit" { "Save" }
                    }
                }

                div class="card" style="margin-bottom: 2rem;" {
                    h3 { "Status" }
                    div style="display: flex; gap: 8px;" {
                        @for status in LeadStatus::ALL {
                            @if status != lead.status {
                                form action=(format!("/admin/leads/{}/status", lead.id)) method="post" style="margin: 0;" {
                                    input type="hidden" name="status" value=(status.as_str());
                                    input type="hidden" name="version" value=(lead.version);
                                    button type="submit" style="padding: 6px 12px; border: 1px solid #ccc; border-radius: 4px; cursor: pointer;" {
                                        "Mark " (status)
                                    }
                                }
                            }
                        }
                    }
                }

                div class="card" style="margin-bottom: 2rem;" {
                    h3 { "Add note" }
                    form action=(format!("/admin/leads/{}/notes", lead.id)) method="post" class="stack" {
                        input type="hidden" name="version" value=(lead.version);
                        textarea name="text" rows="3" required {}
                        button type="submit" { "Save note" }
                    }
                }

                div class="card" style="margin-bottom: 2rem;" {
                    h3 { "Schedule follow-up" }
                    form action=(format!("/admin/leads/{}/follow-up", lead.id)) method="post" class="stack" {
                        input type="hidden" name="version" value=(lead.version);
                        label { "When"
                            input type="datetime-local" name="scheduled_for" min=(vm.min_follow_up);
                        }
                        label { "What to discuss"
                            input type="text" name="note";
                        }
                        div style="display: flex; gap: 8px; align-items: center;" {
                            button type="submit" { "Schedule" }
                            @for preset in FollowUpPreset::ALL {
                                button type="submit" name="preset" value=(preset.param())
                                    style="padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; cursor: pointer;" {
                                    (preset.label())
                                }
                            }
                        }
                    }
                }

                div class="card" {
                    h3 { "Activity" }
                    @if vm.history.is_empty() {
                        p style="color: #6b7280;" { "Nothing yet." }
                    } @else {
                        pre style="white-space: pre-wrap; font-family: inherit;" {
                            (render_history(&vm.history))
                        }
                    }
                }
            }
        },
    )
}

fn stamp_value(ts: Option<i64>) -> String {
    match ts.and_then(|t| DateTime::from_timestamp(t, 0)) {
        Some(dt) => dt.naive_utc().format("%Y-%m-%d %H:%M").to_string(),
        None => String::new(),
    }
}
