// src/db/leads.rs
use base64::Engine;
use rand::{rngs::OsRng, RngCore};
use rusqlite::{params, Connection, OptionalExtension};
use time::OffsetDateTime;

use crate::db::connection::Database;
use crate::domain::activity::ActivityEntry;
use crate::domain::lead::{Lead, LeadPatch, LeadStatus, NewLead};
use crate::errors::ServerError;
use crate::leads::store::LeadStore;

const SQL_LEAD_COUNTS_BY_STATUS: &str = include_str!("../../sql/lead_counts_by_status.sql");

const LEAD_COLUMNS: &str = "id, name, email, phone, message, property_address, property_id, \
     lead_source, status, created_at, converted_at, version";

/// The production `LeadStore`: one row per lead, one `lead_events` row
/// per history entry, every update guarded by the version the caller
/// read.
#[derive(Clone)]
pub struct SqliteLeadStore {
    db: Database,
}

impl SqliteLeadStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Leads created in the current calendar month (UTC), for the
    /// admin list header.
    pub fn count_leads_this_month(&self, now: i64) -> Result<i64, ServerError> {
        let dt =
            OffsetDateTime::from_unix_timestamp(now).unwrap_or_else(|_| OffsetDateTime::now_utc());

        let start_of_month = dt
            .replace_day(1)
            .unwrap_or(dt) // day 1 is valid for every month
            .replace_time(time::Time::MIDNIGHT)
            .unix_timestamp();

        self.db.with_conn(|conn| {
            conn.query_row(
                "select count(*) from leads where created_at >= ?",
                params![start_of_month],
                |r| r.get(0),
            )
            .map_err(|e| ServerError::DbError(format!("count leads failed: {e}")))
        })
    }

    pub fn status_counts(&self) -> Result<Vec<(LeadStatus, i64)>, ServerError> {
        let raw = self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(SQL_LEAD_COUNTS_BY_STATUS)
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
                })
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let mut out = Vec::new();
            for r in rows {
                out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
            }
            Ok(out)
        })?;

        let mut out = Vec::with_capacity(raw.len());
        for (status, n) in raw {
            out.push((status.parse::<LeadStatus>()?, n));
        }
        Ok(out)
    }
}

impl LeadStore for SqliteLeadStore {
    fn create_lead(&self, fields: &NewLead, now: i64) -> Result<Lead, ServerError> {
        let id = new_lead_id();

        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                insert into leads
                  (id, name, email, phone, message, property_address, property_id,
                   lead_source, status, created_at, version)
                values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 'new', ?9, 1)
                "#,
                params![
                    id,
                    fields.name,
                    fields.email,
                    fields.phone,
                    fields.message,
                    fields.property_address,
                    fields.property_id,
                    fields.lead_source,
                    now
                ],
            )
            .map_err(|e| ServerError::DbError(format!("insert lead failed: {e}")))?;
            Ok(())
        })?;

        Ok(Lead {
            id,
            name: fields.name.clone(),
            email: fields.email.clone(),
            phone: fields.phone.clone(),
            message: fields.message.clone(),
            property_address: fields.property_address.clone(),
            property_id: fields.property_id.clone(),
            lead_source: fields.lead_source.clone(),
            status: LeadStatus::New,
            created_at: now,
            converted_at: None,
            version: 1,
        })
    }

    fn get_lead(&self, id: &str) -> Result<Lead, ServerError> {
        self.db
            .with_conn(|conn| select_lead(conn, id))?
            .ok_or(ServerError::NotFound)
    }

    fn update_lead(
        &self,
        id: &str,
        expected_version: i64,
        patch: &LeadPatch,
        entry: Option<&ActivityEntry>,
    ) -> Result<Lead, ServerError> {
        self.db.with_conn(|conn| {
            let tx = conn
                .transaction()
                .map_err(|e| ServerError::DbError(format!("begin tx failed: {e}")))?;

            let Some(current) = select_lead(&tx, id)? else {
                return Err(ServerError::NotFound);
            };
            if current.version != expected_version {
                return Err(ServerError::Conflict(format!(
                    "lead {id} is at version {}, update carried {expected_version}",
                    current.version
                )));
            }

            let name = patch.name.clone().unwrap_or(current.name);
            let email = patch.email.clone().unwrap_or(current.email);
            let phone = patch.phone.clone().or(current.phone);
            let status = patch.status.unwrap_or(current.status);
            // one-way ratchet: a set converted_at is never overwritten
            let converted_at = current.converted_at.or(patch.converted_at);
            let new_version = current.version + 1;

            // version guard in the WHERE so only one writer wins
            let updated = tx
                .execute(
                    r#"
                    update leads
                    set name = ?1, email = ?2, phone = ?3, status = ?4,
                        converted_at = ?5, version = ?6
                    where id = ?7 and version = ?8
                    "#,
                    params![
                        name,
                        email,
                        phone,
                        status.as_str(),
                        converted_at,
                        new_version,
                        id,
                        expected_version
                    ],
                )
                .map_err(|e| ServerError::DbError(format!("update lead failed: {e}")))?;

            if updated != 1 {
                return Err(ServerError::Conflict(format!(
                    "lead {id} changed underneath the update"
                )));
            }

            if let Some(entry) = entry {
                insert_activity(&tx, id, entry)?;
            }

            tx.commit()
                .map_err(|e| ServerError::DbError(format!("commit tx failed: {e}")))?;

            Ok(Lead {
                id: id.to_string(),
                name,
                email,
                phone,
                message: current.message,
                property_address: current.property_address,
                property_id: current.property_id,
                lead_source: current.lead_source,
                status,
                created_at: current.created_at,
                converted_at,
                version: new_version,
            })
        })
    }

    fn list_leads(&self) -> Result<Vec<Lead>, ServerError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "select {LEAD_COLUMNS} from leads order by created_at desc, id"
                ))
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let rows = stmt
                .query_map([], lead_from_row)
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let mut out = Vec::new();
            for row in rows {
                out.push(row.map_err(|e| ServerError::DbError(e.to_string()))?);
            }
            Ok(out)
        })
    }

    fn activity_for(&self, lead_id: &str) -> Result<Vec<ActivityEntry>, ServerError> {
        self.db.with_conn(|conn| {
            let mut stmt = conn
                .prepare("select payload from lead_events where lead_id = ? order by id")
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let rows = stmt
                .query_map(params![lead_id], |row| row.get::<_, String>(0))
                .map_err(|e| ServerError::DbError(e.to_string()))?;

            let mut out = Vec::new();
            for payload in rows {
                let payload = payload.map_err(|e| ServerError::DbError(e.to_string()))?;
                let entry: ActivityEntry = serde_json::from_str(&payload).map_err(|e| {
                    ServerError::DbError(format!("decode activity payload failed: {e}"))
                })?;
                out.push(entry);
            }
            Ok(out)
        })
    }
}

fn insert_activity(
    conn: &Connection,
    lead_id: &str,
    entry: &ActivityEntry,
) -> Result<(), ServerError> {
    let payload = serde_json::to_string(entry)
        .map_err(|e| ServerError::DbError(format!("encode activity payload failed: {e}")))?;

    conn.execute(
        "insert into lead_events (lead_id, kind, occurred_at, payload) values (?1, ?2, ?3, ?4)",
        params![lead_id, entry.detail.kind(), entry.occurred_at, payload],
    )
    .map_err(|e| ServerError::DbError(format!("insert activity failed: {e}")))?;
    Ok(())
}

fn select_lead(conn: &Connection, id: &str) -> Result<Option<Lead>, ServerError> {
    conn.query_row(
        &format!("select {LEAD_COLUMNS} from leads where id = ?"),
        params![id],
        lead_from_row,
    )
    .optional()
    .map_err(|e| ServerError::DbError(format!("select lead failed: {e}")))
}

fn lead_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lead> {
    let status_raw: String = row.get(8)?;
    let status = status_raw.parse::<LeadStatus>().map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            8,
            rusqlite::types::Type::Text,
            format!("unknown lead status: {status_raw}").into(),
        )
    })?;

    Ok(Lead {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        message: row.get(4)?,
        property_address: row.get(5)?,
        property_id: row.get(6)?,
        lead_source: row.get(7)?,
        status,
        created_at: row.get(9)?,
        converted_at: row.get(10)?,
        version: row.get(11)?,
    })
}

/// Opaque lead id: "ld_" + 12 URL-safe chars (9 random bytes).
fn new_lead_id() -> String {
    let mut raw = [0u8; 9];
    OsRng.fill_bytes(&mut raw);
    format!(
        "ld_{}",
        base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(raw)
    )
}
