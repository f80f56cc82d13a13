// src/db/events.rs
use chrono::Utc;
use rand::rngs::OsRng;
use rusqlite::{params, Connection, OptionalExtension};

use crate::auth::token::generate_token;
use crate::db::connection::Database;
use crate::domain::{EventDocument, EventDraft, EventRecord};
use crate::errors::ServerError;
use crate::store::{EventSource, EventStore, ListOrder};

/// 15 random bytes -> 20 URL-safe characters, the same length as hosted document ids.
const EVENT_ID_BYTES: usize = 15;

const SQL_LIST_UNORDERED: &str = "select id, document from events order by created_at, id";

const SQL_LIST_BY_DATE_DESC: &str = r#"
    select id, document
    from events
    order by event_date is null, event_date desc, created_at desc
"#;

/// Events collection kept as JSON documents in SQLite.
#[derive(Clone)]
pub struct SqliteEventStore {
    db: Database,
}

impl SqliteEventStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn decode_row(id: String, document: &str) -> Result<EventRecord, ServerError> {
    let doc: EventDocument = serde_json::from_str(document)
        .map_err(|e| ServerError::DbError(format!("corrupt event document {id}: {e}")))?;
    Ok(doc.into_record(Some(id)))
}

fn encode(draft: &EventDraft) -> Result<(String, Option<String>), ServerError> {
    let doc = EventDocument::from(draft);
    let event_date = doc.date.clone();
    let json = serde_json::to_string(&doc)
        .map_err(|e| ServerError::DbError(format!("encode event failed: {e}")))?;
    Ok((json, event_date))
}

fn list(conn: &Connection, order: ListOrder) -> Result<Vec<EventRecord>, ServerError> {
    let sql = match order {
        ListOrder::Unordered => SQL_LIST_UNORDERED,
        ListOrder::DateDescending => SQL_LIST_BY_DATE_DESC,
    };

    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        let (id, document) = r.map_err(|e| ServerError::DbError(e.to_string()))?;
        out.push(decode_row(id, &document)?);
    }
    Ok(out)
}

impl EventSource for SqliteEventStore {
    fn list_events(&self, order: ListOrder) -> Result<Vec<EventRecord>, ServerError> {
        self.db.with_conn(|conn| list(conn, order))
    }

    fn get_event(&self, id: &str) -> Result<Option<EventRecord>, ServerError> {
        self.db.with_conn(|conn| {
            let document: Option<String> = conn
                .query_row(
                    "select document from events where id = ?",
                    params![id],
                    |r| r.get(0),
                )
                .optional()
                .map_err(|e| ServerError::DbError(format!("select event failed: {e}")))?;

            document
                .map(|doc| decode_row(id.to_string(), &doc))
                .transpose()
        })
    }
}

impl EventStore for SqliteEventStore {
    fn insert_event(&self, draft: &EventDraft) -> Result<String, ServerError> {
        let (document, event_date) = encode(draft)?;
        let id = generate_token(&mut OsRng, EVENT_ID_BYTES);
        let now = Utc::now();

        self.db.with_conn(|conn| {
            conn.execute(
                r#"
                insert into events (id, document, event_date, created_at, updated_at)
                values (?, ?, ?, ?, ?)
                "#,
                params![id, document, event_date, now, now],
            )
            .map_err(|e| ServerError::DbError(format!("insert event failed: {e}")))?;
            Ok(())
        })?;

        tracing::info!(%id, title = %draft.title, "event created");
        Ok(id)
    }

    fn update_event(&self, id: &str, draft: &EventDraft) -> Result<(), ServerError> {
        let (document, event_date) = encode(draft)?;
        let now = Utc::now();

        let changed = self.db.with_conn(|conn| {
            conn.execute(
                r#"
                update events
                set document = ?, event_date = ?, updated_at = ?
                where id = ?
                "#,
                params![document, event_date, now, id],
            )
            .map_err(|e| ServerError::DbError(format!("update event failed: {e}")))
        })?;

        if changed == 0 {
            return Err(ServerError::NotFound);
        }

        tracing::info!(%id, title = %draft.title, "event updated");
        Ok(())
    }

    fn delete_event(&self, id: &str) -> Result<(), ServerError> {
        let changed = self.db.with_conn(|conn| {
            conn.execute("delete from events where id = ?", params![id])
                .map_err(|e| ServerError::DbError(format!("delete event failed: {e}")))
        })?;

        if changed == 0 {
            return Err(ServerError::NotFound);
        }

        tracing::info!(%id, "event deleted");
        Ok(())
    }
}
