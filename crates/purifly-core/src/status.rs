// ── Status snapshot ──
//
// An immutable, complete view of one device's reported state. Snapshots
// are only ever replaced wholesale by the coordinator, never mutated, so a
// reader holding an `Arc<StatusSnapshot>` can never observe a torn update.

use chrono::{DateTime, Utc};
use serde_json::Value;

use purifly_api::StatusMap;

// Well-known vendor field names used for display metadata.
const FIELD_NAME: &str = "name";
const FIELD_MODEL: &str = "type";
const FIELD_DEVICE_ID: &str = "DeviceId";

/// One complete device status observation.
///
/// The field bag is treated as opaque key/value data; no schema is
/// enforced. The well-known display fields get typed accessors, everything
/// else goes through [`get`](Self::get).
#[derive(Debug, Clone, PartialEq)]
pub struct StatusSnapshot {
    values: StatusMap,
    observed_at: DateTime<Utc>,
}

impl StatusSnapshot {
    pub fn new(values: StatusMap) -> Self {
        Self {
            values,
            observed_at: Utc::now(),
        }
    }

    /// Look up a raw reported field by vendor key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// The full reported field bag.
    pub fn values(&self) -> &StatusMap {
        &self.values
    }

    /// When this snapshot was observed (UTC).
    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Display metadata the device reports about itself.
    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            name: self.string_field(FIELD_NAME),
            model: self.string_field(FIELD_MODEL),
            device_id: self.string_field(FIELD_DEVICE_ID),
        }
    }

    fn string_field(&self, key: &str) -> Option<String> {
        self.values.get(key).and_then(Value::as_str).map(String::from)
    }
}

/// Self-reported identity of a device, as extracted from its status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceInfo {
    pub name: Option<String>,
    pub model: Option<String>,
    pub device_id: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample_map() -> StatusMap {
        let mut map = StatusMap::new();
        map.insert("name".into(), json!("Living room"));
        map.insert("type".into(), json!("AC3858"));
        map.insert("DeviceId".into(), json!("abc123"));
        map.insert("pwr".into(), json!("1"));
        map.insert("aqil".into(), json!(75));
        map
    }

    #[test]
    fn device_info_from_well_known_fields() {
        let snap = StatusSnapshot::new(sample_map());
        let info = snap.device_info();

        assert_eq!(info.name.as_deref(), Some("Living room"));
        assert_eq!(info.model.as_deref(), Some("AC3858"));
        assert_eq!(info.device_id.as_deref(), Some("abc123"));
    }

    #[test]
    fn device_info_tolerates_missing_fields() {
        let snap = StatusSnapshot::new(StatusMap::new());
        assert_eq!(snap.device_info(), DeviceInfo::default());
    }

    #[test]
    fn get_returns_raw_fields() {
        let snap = StatusSnapshot::new(sample_map());
        assert_eq!(snap.get("aqil").unwrap(), &json!(75));
        assert!(snap.get("nope").is_none());
    }
}
