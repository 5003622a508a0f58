use axum::body::Body;
use axum::extract::{Query, Request};
use axum::http::{header, HeaderMap, Uri};
use serde_json::Value;
use std::error::Error as _;

use super::AccessDenial;

/// One occurrence of the target field.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetValue {
    /// A string or number, trimmed.
    Text(String),
    /// Present but not a scalar (array, object or bool); carries the JSON text.
    Malformed(String),
}

impl TargetValue {
    pub fn raw(&self) -> &str {
        match self {
            TargetValue::Text(s) | TargetValue::Malformed(s) => s,
        }
    }
}

/// Collect every occurrence of `field` from the JSON body and the query
/// string. Returns the request rebuilt with its body intact.
///
/// Handlers may read either source, so the gate has to clear all of them.
/// Blank strings and `null` count as absent. Only JSON bodies are buffered,
/// up to `max_body_bytes`.
pub async fn extract_targets(
    req: Request,
    field: &str,
    max_body_bytes: usize,
) -> Result<(Request, Vec<TargetValue>), AccessDenial> {
    let (parts, body) = req.into_parts();
    let mut found = Vec::new();

    let body = if is_json(&parts.headers) {
        let bytes = axum::body::to_bytes(body, max_body_bytes)
            .await
            .map_err(|e| buffer_failure(e, field, max_body_bytes))?;
        found.extend(body_value(&bytes, field));
        Body::from(bytes)
    } else {
        body
    };

    found.extend(query_values(&parts.uri, field));

    Ok((Request::from_parts(parts, body), found))
}

fn buffer_failure(err: axum::Error, field: &str, limit: usize) -> AccessDenial {
    let over_limit = std::iter::successors(err.source(), |e: &&(dyn std::error::Error + 'static)| (*e).source())
        .any(|e| e.is::<http_body_util::LengthLimitError>());
    if over_limit {
        tracing::warn!(field, limit, "request body over limit");
        AccessDenial::TooLarge
    } else {
        tracing::error!(error = %err, field, "failed to buffer request body");
        AccessDenial::Unexpected
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Malformed JSON yields `None`; the handler's own extractor reports it.
fn body_value(bytes: &[u8], field: &str) -> Option<TargetValue> {
    if bytes.is_empty() {
        return None;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map.get(field).and_then(classify),
        _ => None,
    }
}

fn query_values(uri: &Uri, field: &str) -> Vec<TargetValue> {
    let Ok(Query(pairs)) = Query::<Vec<(String, String)>>::try_from_uri(uri) else {
        return Vec::new();
    };
    pairs
        .into_iter()
        .filter(|(key, _)| key == field)
        .filter_map(|(_, v)| non_blank(&v))
        .map(TargetValue::Text)
        .collect()
}

fn classify(value: &Value) -> Option<TargetValue> {
    match value {
        Value::Null => None,
        Value::String(s) => non_blank(s).map(TargetValue::Text),
        Value::Number(n) => Some(TargetValue::Text(n.to_string())),
        other => Some(TargetValue::Malformed(other.to_string())),
    }
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
