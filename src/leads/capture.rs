// src/leads/capture.rs
use crate::domain::lead::{Lead, NewLead};
use crate::errors::ServerError;
use crate::events::bus::LeadBus;
use crate::events::types::LeadSignal;
use crate::leads::store::LeadStore;

/// Raw fields from a capture surface (contact form, callback widget,
/// valuation form, admin quick-add) before validation.
#[derive(Debug, Clone, Default)]
pub struct CaptureForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
    pub property_address: Option<String>,
    pub property_id: Option<String>,
    pub lead_source: String,
}

impl CaptureForm {
    /// Field presence/shape checks happen here, not in the core.
    /// A failure never reaches the store.
    pub fn validate(self) -> Result<NewLead, ServerError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ServerError::Validation("name is required".into()));
        }

        let email = normalize_email(&self.email)?;

        let lead_source = match self.lead_source.trim() {
            "" => "website".to_string(),
            s => s.to_string(),
        };

        Ok(NewLead {
            name,
            email,
            phone: none_if_blank(self.phone),
            message: none_if_blank(self.message),
            property_address: none_if_blank(self.property_address),
            property_id: none_if_blank(self.property_id),
            lead_source,
        })
    }
}

/// Validate and persist a captured lead, announcing it on the bus.
pub fn capture_lead(
    store: &dyn LeadStore,
    bus: &LeadBus,
    form: CaptureForm,
    now: i64,
) -> Result<Lead, ServerError> {
    let fields = form.validate()?;
    let lead = store.create_lead(&fields, now)?;

    tracing::info!(lead_id = %lead.id, source = %lead.lead_source, "lead captured");
    bus.emit(LeadSignal::Created {
        lead_id: lead.id.clone(),
        lead_source: lead.lead_source.clone(),
    });
    Ok(lead)
}

/// Trim + lowercase, minimal sanity check.
pub fn normalize_email(email: &str) -> Result<String, ServerError> {
    let e = email.trim().to_lowercase();
    if e.is_empty() || !e.contains('@') || e.starts_with('@') || e.ends_with('@') {
        return Err(ServerError::Validation("invalid email".into()));
    }
    Ok(e)
}

fn none_if_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}
