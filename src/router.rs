use std::collections::HashMap;
use std::io::Read;
use std::time::{SystemTime, UNIX_EPOCH};

use astra::Request;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use url::form_urlencoded;

use crate::db::leads::SqliteLeadStore;
use crate::domain::filters::{self, LeadFilter, LeadSort};
use crate::domain::lead::{LeadPatch, LeadStatus};
use crate::errors::ServerError;
use crate::events::bus::LeadBus;
use crate::leads::capture::{capture_lead, normalize_email, CaptureForm};
use crate::leads::followup::{parse_scheduled_for, FollowUpPreset};
use crate::leads::lifecycle::LeadLifecycle;
use crate::leads::store::LeadStore;
use crate::responses::{html_response, redirect_response, ResultResp};
use crate::templates::pages;

pub fn handle(req: Request, store: &SqliteLeadStore, bus: &LeadBus) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => html_response(pages::home_page()),
        ("GET", ["valuation"]) => html_response(pages::valuation_page()),
        ("GET", ["thanks"]) => html_response(pages::thanks_page()),

        // capture surfaces; each tags its channel
        ("POST", ["leads", "contact"]) => handle_capture(req, store, bus, "website"),
        ("POST", ["leads", "callback"]) => handle_capture(req, store, bus, "callback_widget"),
        ("POST", ["leads", "valuation"]) => handle_capture(req, store, bus, "home_valuation"),

        ("GET", ["admin", "leads"]) => admin_leads_page(&req, store),
        ("POST", ["admin", "leads"]) => admin_quick_add(req, store, bus),
        ("GET", ["admin", "leads", id]) => admin_lead_detail(store, id),
        ("POST", ["admin", "leads", id, "contact"]) => admin_post_contact(req, store, id),
        ("POST", ["admin", "leads", id, "status"]) => admin_post_status(req, store, bus, id),
        ("POST", ["admin", "leads", id, "notes"]) => admin_post_note(req, store, bus, id),
        ("POST", ["admin", "leads", id, "follow-up"]) => admin_post_follow_up(req, store, bus, id),

        _ => Err(ServerError::NotFound),
    }
}

fn handle_capture(
    req: Request,
    store: &SqliteLeadStore,
    bus: &LeadBus,
    source: &str,
) -> ResultResp {
    let form = parse_form(req)?;
    let capture = CaptureForm {
        name: field(&form, "name"),
        email: field(&form, "email"),
        phone: form.get("phone").cloned(),
        message: form.get("message").cloned(),
        property_address: form.get("property_address").cloned(),
        property_id: form.get("property_id").cloned(),
        lead_source: source.to_string(),
    };

    capture_lead(store, bus, capture, now_unix())?;
    redirect_response("/thanks")
}

fn admin_quick_add(req: Request, store: &SqliteLeadStore, bus: &LeadBus) -> ResultResp {
    let form = parse_form(req)?;
    let capture = CaptureForm {
        name: field(&form, "name"),
        email: field(&form, "email"),
        phone: form.get("phone").cloned(),
        message: form.get("message").cloned(),
        property_address: form.get("property_address").cloned(),
        property_id: form.get("property_id").cloned(),
        lead_source: "manual".to_string(),
    };

    capture_lead(store, bus, capture, now_unix())?;
    redirect_response("/admin/leads")
}

fn admin_leads_page(req: &Request, store: &SqliteLeadStore) -> ResultResp {
    let params = parse_query(req);

    let status = match params.get("status").map(String::as_str) {
        Some("") | None => None,
        Some(s) => Some(s.parse::<LeadStatus>()?),
    };
    let filter = LeadFilter {
        status,
        source: nonempty(params.get("source")),
        q: nonempty(params.get("q")),
        created_from: parse_day(params.get("from"), false)?,
        created_to: parse_day(params.get("to"), true)?,
    };
    let sort = params
        .get("sort")
        .map(String::as_str)
        .map(LeadSort::from_param)
        .unwrap_or_default();

    let leads = filters::apply(store.list_leads()?, &filter, sort);

    let vm = pages::LeadsVm {
        leads,
        status_counts: store.status_counts()?,
        new_this_month: store.count_leads_this_month(now_unix())?,
        filter,
        sort,
    };
    html_response(pages::leads_page(&vm))
}

fn admin_lead_detail(store: &SqliteLeadStore, id: &str) -> ResultResp {
    let lead = store.get_lead(id)?;
    let history = store.activity_for(id)?;
    let vm = pages::LeadDetailVm {
        lead,
        history,
        min_follow_up: now_naive().format("%Y-%m-%dT%H:%M").to_string(),
    };
    html_response(pages::lead_detail_page(&vm))
}

fn admin_post_contact(req: Request, store: &SqliteLeadStore, id: &str) -> ResultResp {
    let form = parse_form(req)?;
    let version = parse_version(&form)?;

    let name = field(&form, "name").trim().to_string();
    if name.is_empty() {
        return Err(ServerError::Validation("name is required".into()));
    }
    let email = normalize_email(&field(&form, "email"))?;

    let patch = LeadPatch {
        name: Some(name),
        email: Some(email),
        phone: nonempty(form.get("phone")),
        ..Default::default()
    };
    store.update_lead(id, version, &patch, None)?;
    redirect_response(&format!("/admin/leads/{id}"))
}

fn admin_post_status(
    req: Request,
    store: &SqliteLeadStore,
    bus: &LeadBus,
    id: &str,
) -> ResultResp {
    let form = parse_form(req)?;
    let new_status = field(&form, "status").parse::<LeadStatus>()?;
    let version = parse_version(&form)?;

    let mut lead = store.get_lead(id)?;
    // act on the version the form was rendered with, not the one just
    // fetched, so a stale submission surfaces as a conflict
    lead.version = version;

    LeadLifecycle::new(store, bus).transition(&lead, new_status, now_unix())?;
    redirect_response(&format!("/admin/leads/{id}"))
}

fn admin_post_note(req: Request, store: &SqliteLeadStore, bus: &LeadBus, id: &str) -> ResultResp {
    let form = parse_form(req)?;
    let version = parse_version(&form)?;
    let text = field(&form, "text");

    let mut lead = store.get_lead(id)?;
    lead.version = version;

    LeadLifecycle::new(store, bus).append_note(&lead, &text, now_unix())?;
    redirect_response(&format!("/admin/leads/{id}"))
}

fn admin_post_follow_up(
    req: Request,
    store: &SqliteLeadStore,
    bus: &LeadBus,
    id: &str,
) -> ResultResp {
    let form = parse_form(req)?;
    let version = parse_version(&form)?;

    let scheduled_for = match form
        .get("preset")
        .map(String::as_str)
        .and_then(FollowUpPreset::from_param)
    {
        Some(preset) => preset.resolve(now_naive()),
        None => parse_scheduled_for(&field(&form, "scheduled_for"))?,
    };
    let note = form.get("note").cloned();

    let mut lead = store.get_lead(id)?;
    lead.version = version;

    LeadLifecycle::new(store, bus).schedule_follow_up(
        &lead,
        scheduled_for,
        note.as_deref(),
        now_unix(),
    )?;
    redirect_response(&format!("/admin/leads/{id}"))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    let mut map = HashMap::new();
    if let Some(q) = req.uri().query() {
        for (k, v) in form_urlencoded::parse(q.as_bytes()) {
            map.insert(k.into_owned(), v.into_owned());
        }
    }
    map
}

fn parse_form(req: Request) -> Result<HashMap<String, String>, ServerError> {
    let mut raw = Vec::new();
    req.into_body()
        .reader()
        .read_to_end(&mut raw)
        .map_err(|e| ServerError::BadRequest(format!("could not read request body: {e}")))?;

    let mut map = HashMap::new();
    for (k, v) in form_urlencoded::parse(&raw) {
        map.insert(k.into_owned(), v.into_owned());
    }
    Ok(map)
}

fn field(form: &HashMap<String, String>, name: &str) -> String {
    form.get(name).cloned().unwrap_or_default()
}

fn nonempty(raw: Option<&String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_version(form: &HashMap<String, String>) -> Result<i64, ServerError> {
    field(form, "version")
        .parse::<i64>()
        .map_err(|_| ServerError::BadRequest("missing or invalid version".into()))
}

/// "YYYY-MM-DD" to unix seconds; `end_of_day` pins to 23:59:59 so the
/// range check stays inclusive.
fn parse_day(raw: Option<&String>, end_of_day: bool) -> Result<Option<i64>, ServerError> {
    let Some(raw) = raw.map(|s| s.trim()).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ServerError::BadRequest(format!("invalid date: {raw}")))?;

    let start = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    Ok(Some(if end_of_day { start + 86_399 } else { start }))
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

fn now_naive() -> NaiveDateTime {
    Utc::now().naive_utc()
}
