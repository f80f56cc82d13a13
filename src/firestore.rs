// src/firestore.rs
//! Read-only access to a hosted Firestore `events` collection over its REST API.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;

use crate::domain::{EventDocument, EventRecord};
use crate::errors::ServerError;
use crate::store::{EventSource, ListOrder};

const FIRESTORE_API: &str = "https://firestore.googleapis.com/v1";
const PAGE_SIZE: usize = 300;

pub struct FirestoreEventSource {
    project_id: String,
    api_key: Option<String>,
    collection: String,
    client: Client,
}

// Firestore document
//  ├── name    "projects/{p}/databases/(default)/documents/events/{id}"
//  └── fields  { field: { stringValue | booleanValue | mapValue | nullValue | ... } }

#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<FirestoreDocument>,
    next_page_token: Option<String>,
}

impl FirestoreEventSource {
    pub fn new(project_id: impl Into<String>, api_key: Option<String>) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServerError::RemoteError(format!("build http client failed: {e}")))?;

        Ok(Self {
            project_id: project_id.into(),
            api_key,
            collection: "events".to_string(),
            client,
        })
    }

    fn collection_url(&self) -> String {
        format!(
            "{FIRESTORE_API}/projects/{}/databases/(default)/documents/{}",
            self.project_id, self.collection
        )
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, ServerError> {
        let mut req = self.client.get(url).query(query);
        if let Some(key) = &self.api_key {
            req = req.query(&[("key", key)]);
        }

        let resp = req
            .send()
            .map_err(|e| ServerError::RemoteError(format!("request failed: {e}")))?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(ServerError::RemoteError(format!("firestore {status}: {text}")));
        }

        resp.json::<T>()
            .map(Some)
            .map_err(|e| ServerError::RemoteError(format!("decode response failed: {e}")))
    }
}

impl EventSource for FirestoreEventSource {
    fn list_events(&self, order: ListOrder) -> Result<Vec<EventRecord>, ServerError> {
        let mut out = Vec::new();
        let mut page_token: Option<String> = None;
        let url = self.collection_url();

        loop {
            let mut query = vec![("pageSize", PAGE_SIZE.to_string())];
            if order == ListOrder::DateDescending {
                query.push(("orderBy", "date desc".to_string()));
            }
            if let Some(token) = page_token.take() {
                query.push(("pageToken", token));
            }

            let Some(page) = self.get_json::<ListDocumentsResponse>(&url, &query)? else {
                break;
            };

            for doc in page.documents {
                out.push(decode_document(doc)?);
            }

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(count = out.len(), "fetched events from firestore");
        Ok(out)
    }

    fn get_event(&self, id: &str) -> Result<Option<EventRecord>, ServerError> {
        let url = format!("{}/{id}", self.collection_url());
        self.get_json::<FirestoreDocument>(&url, &[])?
            .map(decode_document)
            .transpose()
    }
}

fn decode_document(doc: FirestoreDocument) -> Result<EventRecord, ServerError> {
    let id = doc.name.rsplit('/').next().map(str::to_string);
    let plain = Value::Object(plain_fields(doc.fields));
    let parsed: EventDocument = serde_json::from_value(plain)
        .map_err(|e| ServerError::RemoteError(format!("unexpected document shape {:?}: {e}", id)))?;
    Ok(parsed.into_record(id))
}

fn plain_fields(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(k, v)| (k, plain_value(v)))
        .collect()
}

/// Unwrap Firestore's typed value envelope (`{"stringValue": "x"}` -> `"x"`).
fn plain_value(value: Value) -> Value {
    let Value::Object(mut typed) = value else {
        return value;
    };

    if let Some(v) = typed.remove("stringValue") {
        return v;
    }
    if let Some(v) = typed.remove("booleanValue") {
        return v;
    }
    if let Some(Value::String(s)) = typed.remove("integerValue") {
        return s.parse::<i64>().map(Value::from).unwrap_or(Value::String(s));
    }
    if let Some(v) = typed.remove("doubleValue") {
        return v;
    }
    if let Some(v) = typed.remove("timestampValue") {
        return v;
    }
    if typed.remove("nullValue").is_some() {
        return Value::Null;
    }
    if let Some(Value::Object(mut map)) = typed.remove("mapValue") {
        let fields = match map.remove("fields") {
            Some(Value::Object(f)) => f,
            _ => Map::new(),
        };
        return Value::Object(plain_fields(fields));
    }
    if let Some(Value::Object(mut arr)) = typed.remove("arrayValue") {
        let values = match arr.remove("values") {
            Some(Value::Array(v)) => v,
            _ => Vec::new(),
        };
        return Value::Array(values.into_iter().map(plain_value).collect());
    }

    Value::Null
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;
    use chrono::NaiveDate;
    use serde_json::json;

    fn doc(value: Value) -> FirestoreDocument {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_typed_fields_and_id() {
        let rec = decode_document(doc(json!({
            "name": "projects/terminus/databases/(default)/documents/events/AbC123",
            "fields": {
                "title": { "stringValue": "Blockchain 101 Workshop" },
                "description": { "stringValue": "Intro" },
                "date": { "stringValue": "2025-11-10" },
                "displayTime": { "stringValue": "5:00 PM" },
                "recurring": { "booleanValue": false },
                "location": { "mapValue": { "fields": {
                    "name": { "stringValue": "Atlanta Blockchain Center" }
                } } },
                "link": { "nullValue": null },
                "createdAt": { "timestampValue": "2025-10-01T12:00:00Z" }
            }
        })))
        .unwrap();

        assert_eq!(rec.id.as_deref(), Some("AbC123"));
        assert_eq!(rec.title, "Blockchain 101 Workshop");
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2025, 11, 10));
        assert_eq!(rec.display_time.as_deref(), Some("5:00 PM"));
        assert_eq!(
            rec.location,
            Location::Structured {
                name: "Atlanta Blockchain Center".into(),
                address: None
            }
        );
        assert_eq!(rec.link, None);
    }

    #[test]
    fn legacy_string_location_survives_decoding() {
        let rec = decode_document(doc(json!({
            "name": "projects/p/databases/(default)/documents/events/x",
            "fields": {
                "title": { "stringValue": "Old" },
                "recurring": { "booleanValue": true },
                "location": { "stringValue": "Somewhere" }
            }
        })))
        .unwrap();
        assert!(rec.recurring);
        assert_eq!(rec.location, Location::Legacy("Somewhere".into()));
    }

    #[test]
    fn list_response_with_no_documents() {
        let page: ListDocumentsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn integer_and_array_values_are_unwrapped() {
        let v = plain_value(json!({ "arrayValue": { "values": [
            { "integerValue": "42" },
            { "stringValue": "x" }
        ] } }));
        assert_eq!(v, json!([42, "x"]));
    }
}
