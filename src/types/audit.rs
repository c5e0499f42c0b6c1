use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One recorded session event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEntry {
    pub id: String,
    /// Dotted action name, e.g. `book.opened` or `settings.updated`.
    pub action: String,
    pub resource_id: Option<String>,
    pub details: DetailKind,
    pub created_at: i64,
}

/// Classified audit detail payload.
///
/// Incoming details are classified exactly once, at record time; rendering
/// then dispatches on the variant instead of sniffing object shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum DetailKind {
    /// Field-level before/after pairs.
    Changes(BTreeMap<String, (String, String)>),
    /// A small bag of named values.
    Fields(BTreeMap<String, String>),
    /// A plain human-readable message.
    Message(String),
    /// A recorded failure.
    Error(String),
    /// Anything else; carries the number of data points seen.
    Generic(usize),
}

impl DetailKind {
    /// Classifies a raw JSON detail payload into a tagged variant.
    pub fn classify(details: &Value) -> DetailKind {
        match details {
            Value::Null => DetailKind::Generic(0),
            Value::String(s) => DetailKind::Message(s.clone()),
            Value::Object(map) => {
                if let Some(Value::Object(changes)) = map.get("changes") {
                    let pairs = changes
                        .iter()
                        .filter_map(|(field, v)| {
                            let arr = v.as_array()?;
                            if arr.len() == 2 {
                                Some((
                                    field.clone(),
                                    (scalar_string(&arr[0]), scalar_string(&arr[1])),
                                ))
                            } else {
                                None
                            }
                        })
                        .collect();
                    return DetailKind::Changes(pairs);
                }
                if let Some(msg) = map.get("message").and_then(Value::as_str) {
                    return DetailKind::Message(msg.to_string());
                }
                if let Some(err) = map.get("error").and_then(Value::as_str) {
                    return DetailKind::Error(err.to_string());
                }
                if map.len() <= 2 && map.values().all(|v| !v.is_object() && !v.is_array()) {
                    let fields = map
                        .iter()
                        .map(|(k, v)| (k.clone(), scalar_string(v)))
                        .collect();
                    return DetailKind::Fields(fields);
                }
                DetailKind::Generic(map.len())
            }
            other => DetailKind::Message(scalar_string(other)),
        }
    }

    /// Renders the variant as the human-readable summary shown in the
    /// back-office activity list.
    pub fn format(&self) -> String {
        match self {
            DetailKind::Changes(pairs) => {
                if pairs.is_empty() {
                    return "Information was updated".to_string();
                }
                pairs
                    .iter()
                    .map(|(field, (from, to))| {
                        format!(
                            "{} changed from \"{}\" to \"{}\"",
                            humanize_field(field),
                            from,
                            to
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ")
            }
            DetailKind::Fields(fields) => fields
                .iter()
                .map(|(key, value)| match key.as_str() {
                    "ip_address" => format!("From {}", value),
                    "user_agent" => format!(
                        "Using {}",
                        value.split_whitespace().next().unwrap_or(value)
                    ),
                    _ => format!("{}: {}", humanize_field(key), value),
                })
                .collect::<Vec<_>>()
                .join(" \u{2022} "),
            DetailKind::Message(msg) => {
                if msg.chars().count() > 80 {
                    let truncated: String = msg.chars().take(80).collect();
                    format!("{}...", truncated)
                } else {
                    msg.clone()
                }
            }
            DetailKind::Error(err) => format!("Issue encountered: {}", err),
            DetailKind::Generic(0) => "No additional details".to_string(),
            DetailKind::Generic(count) => {
                format!("Activity completed with {} data points", count)
            }
        }
    }
}

/// `snake_case_field` → `Snake Case Field`.
fn humanize_field(field: &str) -> String {
    field
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
