// templates/pages/leads.rs

use chrono::DateTime;
use maud::{html, Markup};

use crate::domain::filters::{LeadFilter, LeadSort};
use crate::domain::lead::{Lead, LeadStatus};
use crate::templates::{desktop_layout, status_badge};

pub struct LeadsVm {
    pub leads: Vec<Lead>,
    pub filter: LeadFilter,
    pub sort: LeadSort,
    pub status_counts: Vec<(LeadStatus, i64)>,
    pub new_this_month: i64,
}

pub fn leads_page(vm: &LeadsVm) -> Markup {
    desktop_layout(
        "Leads",
        html! {
            main class="container" {
                h1 { "Leads" }

                div class="card" style="margin-bottom: 1rem;" {
                    @for (status, n) in &vm.status_counts {
                        span style="margin-right: 1rem;" {
                            (status_badge(*status)) " " (n)
                        }
                    }
                    span style="color: #6b7280;" { (vm.new_this_month) " new this month" }
                }

                div class="card" style="margin-bottom: 2rem;" {
                    form action="/admin/leads" method="get" style="display: flex; gap: 10px; flex-wrap: wrap; align-items: flex-end;" {
                        label { "Status"
                            select name="status" {
                                option value="" { "Any" }
                                @for status in LeadStatus::ALL {
                                    option value=(status.as_str()) selected[vm.filter.status == Some(status)] {
                                        (status)
                                    }
                                }
                            }
                        }
                        label { "Source"
                            input type="text" name="source" value=(vm.filter.source.as_deref().unwrap_or(""));
                        }
                        label { "Name or email"
                            input type="text" name="q" value=(vm.filter.q.as_deref().unwrap_or(""));
                        }
                        label { "From"
                            input type="date" name="from" value=(day_value(vm.filter.created_from));
                        }
                        label { "To"
                            input type="date" name="to" value=(day_value(vm.filter.created_to));
                        }
                        label { "Sort"
                            select name="sort" {
                                option value="newest" selected[vm.sort == LeadSort::NewestFirst] { "Newest first" }
                                option value="oldest" selected[vm.sort == LeadSort::OldestFirst] { "Oldest first" }
                                option value="name" selected[vm.sort == LeadSort::Name] { "Name" }
                            }
                        }
                        button type="submit" { "Apply" }
                    }
                }

                div class="card" style="margin-bottom: 2rem;" {
                    div style="overflow-x: auto;" {
                        table style="width: 100%; border-collapse: collapse;" {
                            thead {
                                tr {
                                    th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Name" }
                                    th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Email" }
                                    th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Phone" }
                                    th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Source" }
                                    th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Status" }
                                    th style="padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;" { "Created" }
                                }
                            }
                            tbody {
                                @if vm.leads.is_empty() {
                                    tr {
                                        td colspan="6" style="padding: 16px; color: #6b7280;" { "No leads match." }
                                    }
                                }
                                @for lead in &vm.leads {
                                    tr {
                                        td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" {
                                            a href=(format!("/admin/leads/{}", lead.id)) { (lead.name) }
                                        }
                                        td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { (lead.email) }
                                        td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" {
                                            (lead.phone.as_deref().unwrap_or("-"))
                                        }
                                        td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { (lead.lead_source) }
                                        td style="padding: 8px; border-bottom: 1px solid #f3f4f6;" { (status_badge(lead.status)) }
                                        td style="padding: 8px; border-bottom: 1px solid #f3f4f6; color: #6b7280;" {
                                            (day_value(Some(lead.created_at)))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                div class="card" {
                    h3 { "Quick add" }
                    form action="/admin/leads" method="post" style="display: flex; gap: 10px; flex-wrap: wrap; align-items: flex-end;" {
                        label { "Name"
                            input type="text" name="name" required;
                        }
                        label { "Email"
                            input type="email" name="email" required;
                        }
                        label { "Phone"
                            input type="tel" name="phone";
                        }
                        label { "Note"
                            input type="text" name="message";
                        }
                        button type="submit" { "Add lead" }
                    }
                }
            }
        },
    )
}

fn day_value(ts: Option<i64>) -> String {
    match ts.and_then(|t| DateTime::from_timestamp(t, 0)) {
        Some(dt) => dt.naive_utc().format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}
