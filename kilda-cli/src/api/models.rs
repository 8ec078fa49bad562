//! Wire models for the OpenKilda GUI REST API

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// A switch record as returned by `switch/{id}` and `switch/list`.
///
/// Only the fields the console displays are typed. The body exactly as
/// received is kept in `raw`; that is what gets persisted and printed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SwitchDetail {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub switch_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default)]
    pub discrepancy: Option<Discrepancy>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    #[serde(skip)]
    pub raw: Value,
}

impl SwitchDetail {
    /// Interpret a response body. `null` and `{}` mean "no such switch".
    pub fn from_value(value: Value) -> Result<Option<Self>> {
        match &value {
            Value::Null => return Ok(None),
            Value::Object(map) if map.is_empty() => return Ok(None),
            _ => {}
        }

        Self::from_record(value).map(Some)
    }

    /// Parse one record, keeping the untouched body alongside the typed view
    pub fn from_record(value: Value) -> Result<Self> {
        let mut detail: Self =
            serde_json::from_value(value.clone()).context("Failed to parse switch detail")?;
        detail.raw = value;
        Ok(detail)
    }

    /// The discrepancy status values, if the record flags a status mismatch.
    pub fn status_discrepancy(&self) -> Option<&StatusValue> {
        const EMPTY: &StatusValue = &StatusValue {
            controller_status: None,
            inventory_status: None,
        };

        let discrepancy = self.discrepancy.as_ref()?;
        if !discrepancy.status {
            return None;
        }
        Some(discrepancy.status_value.as_ref().unwrap_or(EMPTY))
    }
}

/// Controller vs. inventory comparison attached to a switch
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Discrepancy {
    #[serde(default, deserialize_with = "truthy")]
    pub status: bool,
    #[serde(rename = "status-value", default)]
    pub status_value: Option<StatusValue>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Status values are shown verbatim; non-string scalars are stringified
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatusValue {
    #[serde(rename = "controller-status", default, deserialize_with = "scalar_as_string")]
    pub controller_status: Option<String>,
    #[serde(rename = "inventory-status", default, deserialize_with = "scalar_as_string")]
    pub inventory_status: Option<String>,
}

/// Response of `store/switch-store-config`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwitchStoreConfig {
    #[serde(default)]
    pub urls: Map<String, Value>,
}

impl SwitchStoreConfig {
    /// The store counts as configured once its `get-all-switches` url is set
    pub fn is_configured(&self) -> bool {
        self.urls
            .get("get-all-switches")
            .and_then(|entry| entry.get("url"))
            .is_some_and(|url| !url.is_null())
    }
}

/// Broadcast payload of the store-setting notifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSetting {
    pub enabled: bool,
}

/// Millisecond timestamp sent as `_` to defeat HTTP caches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheBuster(pub i64);

impl CacheBuster {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp_millis())
    }

    pub fn as_query(&self) -> [(&'static str, String); 1] {
        [("_", self.0.to_string())]
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    })
}

fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accept the loose truthiness the backend uses for flags
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_like_bodies_are_not_found() {
        assert!(SwitchDetail::from_value(Value::Null).unwrap().is_none());
        assert!(SwitchDetail::from_value(json!({})).unwrap().is_none());
    }

    #[test]
    fn test_parse_hyphenated_discrepancy() {
        let detail = SwitchDetail::from_value(json!({
            "switch_id": "00:00:00:00:00:00:00:01",
            "name": "sw-1",
            "address": "10.0.0.1",
            "hostname": "sw-1.lab",
            "description": null,
            "state": "ACTIVATED",
            "discrepancy": {
                "status": true,
                "status-value": { "controller-status": "UP" }
            },
            "of_version": "OF_13"
        }))
        .unwrap()
        .unwrap();

        assert_eq!(detail.description, "");
        assert_eq!(detail.extra.get("of_version"), Some(&json!("OF_13")));

        let status = detail.status_discrepancy().unwrap();
        assert_eq!(status.controller_status.as_deref(), Some("UP"));
        assert_eq!(status.inventory_status, None);
    }

    #[test]
    fn test_false_status_is_not_a_discrepancy() {
        let detail = SwitchDetail::from_value(json!({
            "switch_id": "00:00:00:00:00:00:00:02",
            "discrepancy": { "status": false }
        }))
        .unwrap()
        .unwrap();

        assert!(detail.status_discrepancy().is_none());
    }

    #[test]
    fn test_raw_record_is_kept_as_received() {
        let raw = json!({
            "switch_id": "00:00:00:00:00:00:00:03",
            "name": "sw-3",
            "description": null,
            "state": "DEACTIVATED",
            "discrepancy": { "status": 1 },
            "pop": "lab-1"
        });
        let detail = SwitchDetail::from_value(raw.clone()).unwrap().unwrap();

        assert_eq!(detail.description, "");
        assert_eq!(detail.address, "");
        assert!(detail.status_discrepancy().is_some());
        assert_eq!(detail.raw, raw);
        assert!(detail.raw.get("address").is_none());
    }

    #[test]
    fn test_non_string_status_values_are_stringified() {
        let detail = SwitchDetail::from_value(json!({
            "switch_id": "00:00:00:00:00:00:00:04",
            "discrepancy": {
                "status": true,
                "status-value": { "controller-status": 1, "inventory-status": false }
            }
        }))
        .unwrap()
        .unwrap();

        let status = detail.status_discrepancy().unwrap();
        assert_eq!(status.controller_status.as_deref(), Some("1"));
        assert_eq!(status.inventory_status.as_deref(), Some("false"));
    }

    #[test]
    fn test_store_config_detection() {
        let configured: SwitchStoreConfig = serde_json::from_value(json!({
            "urls": { "get-all-switches": { "url": "http://inventory/switches" } }
        }))
        .unwrap();
        assert!(configured.is_configured());

        let missing: SwitchStoreConfig = serde_json::from_value(json!({})).unwrap();
        assert!(!missing.is_configured());
    }
}
