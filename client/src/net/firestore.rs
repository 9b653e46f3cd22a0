//! Hosted document store adapter (Firestore REST v1).
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard reads the record collection with a structured query ordered
//! by creation time and writes back three fields: the hidden flag, the status
//! and the violation value. Requests carry the signed-in operator's id token.
//!
//! DESIGN
//! ======
//! URL building, typed-value encoding/decoding and response parsing are pure
//! functions so they can be unit tested natively. Only the `send_*` helpers
//! touch the network and they compile to stubs outside the browser.
//!
//! TRADE-OFFS
//! ==========
//! A multi-document hide is one atomic commit per chunk of
//! [`MAX_WRITES_PER_COMMIT`] writes. Chunks commit in order and a failure stops
//! the remaining chunks, so a large hide may apply partially.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "firestore_test.rs"]
mod firestore_test;

use std::hash::{DefaultHasher, Hash, Hasher};

use records::config::{DashboardConfig, RecordSchema};
use records::record::{Notification, sort_newest_first};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::error::BackendError;

const API_ROOT: &str = "https://firestore.googleapis.com/v1";

/// Upper bound on writes in one commit request.
pub const MAX_WRITES_PER_COMMIT: usize = 500;

/// One document as returned by `runQuery`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name; the id is its last segment.
    pub name: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default)]
    pub update_time: Option<String>,
}

impl Document {
    #[must_use]
    pub fn id(&self) -> &str {
        document_id(&self.name)
    }
}

#[derive(Deserialize)]
struct QueryResult {
    #[serde(default)]
    document: Option<Document>,
}

// =============================================================================
// URLS AND REQUEST BODIES
// =============================================================================

fn database_path(project_id: &str) -> String {
    format!("projects/{project_id}/databases/(default)/documents")
}

#[must_use]
pub fn document_name(project_id: &str, collection: &str, id: &str) -> String {
    format!("{}/{collection}/{id}", database_path(project_id))
}

#[must_use]
pub fn document_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[must_use]
pub fn run_query_url(project_id: &str) -> String {
    format!("{API_ROOT}/{}:runQuery", database_path(project_id))
}

#[must_use]
pub fn commit_url(project_id: &str) -> String {
    format!("{API_ROOT}/{}:commit", database_path(project_id))
}

/// `PATCH` URL updating only `field_path` of an existing document.
#[must_use]
pub fn patch_url(project_id: &str, collection: &str, id: &str, field_path: &str) -> String {
    format!(
        "{API_ROOT}/{}?updateMask.fieldPaths={field_path}&currentDocument.exists=true",
        document_name(project_id, collection, id)
    )
}

/// All documents of `collection`, newest first by `order_path`.
#[must_use]
pub fn run_query_body(collection: &str, order_path: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "orderBy": [{ "field": { "fieldPath": order_path }, "direction": "DESCENDING" }],
        }
    })
}

/// Document body setting the (possibly dotted) `field_path` to `value`.
#[must_use]
pub fn patch_body(field_path: &str, value: &Value) -> Value {
    json!({ "fields": nested_fields(field_path, value) })
}

fn nested_fields(field_path: &str, value: &Value) -> Map<String, Value> {
    let mut segments = field_path.rsplit('.');
    let leaf = segments.next().unwrap_or(field_path);
    let mut fields = Map::new();
    fields.insert(leaf.to_owned(), encode_value(value));
    for parent in segments {
        let mut outer = Map::new();
        outer.insert(parent.to_owned(), json!({ "mapValue": { "fields": fields } }));
        fields = outer;
    }
    fields
}

/// Commit bodies marking every id hidden, at most
/// [`MAX_WRITES_PER_COMMIT`] writes each.
#[must_use]
pub fn hide_commit_bodies(project_id: &str, collection: &str, ids: &[String], hidden_path: &str) -> Vec<Value> {
    ids.chunks(MAX_WRITES_PER_COMMIT)
        .map(|chunk| {
            let writes: Vec<Value> = chunk
                .iter()
                .map(|id| {
                    json!({
                        "update": {
                            "name": document_name(project_id, collection, id),
                            "fields": nested_fields(hidden_path, &Value::Bool(true)),
                        },
                        "updateMask": { "fieldPaths": [hidden_path] },
                        "currentDocument": { "exists": true },
                    })
                })
                .collect();
            json!({ "writes": writes })
        })
        .collect()
}

// =============================================================================
// TYPED VALUES
// =============================================================================

/// Encode plain JSON as a typed document value.
#[must_use]
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) if n.is_i64() || n.is_u64() => json!({ "integerValue": n.to_string() }),
        Value::Number(n) => json!({ "doubleValue": n }),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            json!({ "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() } })
        }
        Value::Object(map) => {
            let fields: Map<String, Value> = map.iter().map(|(k, v)| (k.clone(), encode_value(v))).collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

/// Decode a typed document value into plain JSON.
///
/// Integers arrive as strings and become numbers; timestamps, references and
/// bytes stay strings. Unknown shapes decode to `null`.
#[must_use]
pub fn decode_value(typed: &Value) -> Value {
    let Some((kind, inner)) = typed.as_object().and_then(|m| m.iter().next()) else {
        return Value::Null;
    };
    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" | "booleanValue" | "doubleValue" => {
            inner.clone()
        }
        "integerValue" => match inner {
            Value::String(raw) => raw.parse::<i64>().map_or_else(|_| inner.clone(), Value::from),
            other => other.clone(),
        },
        "mapValue" => Value::Object(decode_fields(inner.get("fields"))),
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        "geoPointValue" => inner.clone(),
        _ => Value::Null,
    }
}

/// Decode a typed `fields` map.
#[must_use]
pub fn decode_fields(fields: Option<&Value>) -> Map<String, Value> {
    fields
        .and_then(Value::as_object)
        .map(|m| m.iter().map(|(k, v)| (k.clone(), decode_value(v))).collect())
        .unwrap_or_default()
}

// =============================================================================
// RESPONSES
// =============================================================================

/// Parse a `runQuery` response body into documents, in response order.
///
/// # Errors
///
/// Returns [`BackendError::Decode`] when the body is not a result array.
pub fn parse_run_query(body: &str) -> Result<Vec<Document>, BackendError> {
    let results: Vec<QueryResult> =
        serde_json::from_str(body).map_err(|e| BackendError::Decode(format!("runQuery: {e}")))?;
    Ok(results
        .into_iter()
        .filter_map(|r| r.document)
        .map(|mut doc| {
            doc.fields = decode_fields(Some(&Value::Object(doc.fields)));
            doc
        })
        .collect())
}

/// Change detector for a result set: document names and update times, in order.
#[must_use]
pub fn fingerprint(docs: &[Document]) -> u64 {
    let mut hasher = DefaultHasher::new();
    docs.len().hash(&mut hasher);
    for doc in docs {
        doc.name.hash(&mut hasher);
        doc.update_time.hash(&mut hasher);
    }
    hasher.finish()
}

/// Decode documents into records, newest first.
#[must_use]
pub fn to_records(docs: &[Document], schema: &RecordSchema) -> Vec<Notification> {
    let mut out: Vec<Notification> = docs
        .iter()
        .map(|doc| Notification::from_document(doc.id(), &doc.fields, schema))
        .collect();
    sort_newest_first(&mut out);
    out
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Run the record query once.
///
/// # Errors
///
/// Returns a [`BackendError`] when the request fails or the body is malformed.
pub async fn send_query(config: &DashboardConfig, id_token: &str) -> Result<Vec<Document>, BackendError> {
    #[cfg(feature = "hydrate")]
    {
        let body = run_query_body(&config.backend.collection, config.schema.order_path());
        let text = send_json("POST", &run_query_url(&config.backend.project_id), id_token, &body).await?;
        parse_run_query(&text)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, id_token);
        Err(BackendError::Transport("not available on server".to_owned()))
    }
}

/// Set one field of one record.
///
/// # Errors
///
/// Returns a [`BackendError`] when the document is missing or the request fails.
pub async fn send_patch(
    config: &DashboardConfig,
    id_token: &str,
    id: &str,
    field_path: &str,
    value: &Value,
) -> Result<(), BackendError> {
    #[cfg(feature = "hydrate")]
    {
        let url = patch_url(&config.backend.project_id, &config.backend.collection, id, field_path);
        send_json("PATCH", &url, id_token, &patch_body(field_path, value)).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, id_token, id, field_path, value);
        Err(BackendError::Transport("not available on server".to_owned()))
    }
}

/// Mark every id hidden using chunked atomic commits.
///
/// # Errors
///
/// Returns the first failing chunk's [`BackendError`]; earlier chunks stay applied.
pub async fn send_hide_all(config: &DashboardConfig, id_token: &str, ids: &[String]) -> Result<(), BackendError> {
    #[cfg(feature = "hydrate")]
    {
        let url = commit_url(&config.backend.project_id);
        let bodies =
            hide_commit_bodies(&config.backend.project_id, &config.backend.collection, ids, config.schema.hidden_path());
        for body in &bodies {
            send_json("POST", &url, id_token, body).await?;
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (config, id_token, ids);
        Err(BackendError::Transport("not available on server".to_owned()))
    }
}

#[cfg(feature = "hydrate")]
async fn send_json(method: &str, url: &str, id_token: &str, body: &Value) -> Result<String, BackendError> {
    use gloo_net::http::Request;

    let builder = match method {
        "PATCH" => Request::patch(url),
        _ => Request::post(url),
    };
    let resp = builder
        .header("Authorization", &format!("Bearer {id_token}"))
        .json(body)
        .map_err(|e| BackendError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?;
    let status = resp.status();
    let text = resp.text().await.map_err(|e| BackendError::Decode(e.to_string()))?;
    if !resp.ok() {
        return Err(BackendError::from_response(status, &text));
    }
    Ok(text)
}
