use serde_json::{Map, Value};

/// Value substituted for any field a record does not carry.
pub const PLACEHOLDER: &str = "N/A";

/// One phone's specification data, kept as the loosely-typed JSON object it was loaded from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(Map<String, Value>);

/// All records of one run, in discovery order.
pub type RecordSet = Vec<Record>;

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Record(fields)
    }

    /// Wraps a JSON object. Anything else is not a record.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Record(map)),
            _ => None,
        }
    }

    /// Walks a dotted path (`misc.price.usd`, `main_camera.sensors.0`).
    /// Numeric segments index into arrays. Any missing or mistyped segment yields `None`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.0.get(segments.next()?)?;
        for segment in segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }

    /// Scalar at `path` as trimmed text. Null, blank strings and containers count as missing.
    pub fn text(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            Value::String(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn text_or(&self, path: &str, default: &str) -> String {
        self.text(path).unwrap_or_else(|| default.to_string())
    }

    /// First path in `paths` that resolves to text.
    pub fn first_text(&self, paths: &[&str]) -> Option<String> {
        paths.iter().find_map(|p| self.text(p))
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        Record::from_value(v).unwrap()
    }

    #[test]
    fn nested_lookup() {
        let r = record(json!({"misc": {"price": {"usd": "$399.99"}}}));
        assert_eq!(r.text("misc.price.usd").as_deref(), Some("$399.99"));
    }

    #[test]
    fn missing_chain_falls_back() {
        let r = record(json!({}));
        assert_eq!(r.text_or("misc.price.usd", PLACEHOLDER), "N/A");
        assert_eq!(r.text_or("a.b.c.d.e.f.g", "x"), "x");
        assert!(r.get("").is_none());
    }

    #[test]
    fn mistyped_intermediate_is_missing() {
        let r = record(json!({"misc": "cheap", "battery": null, "platform": [1, 2]}));
        assert!(r.get("misc.price.usd").is_none());
        assert!(r.get("battery.type").is_none());
        assert!(r.get("platform.chipset").is_none());
    }

    #[test]
    fn array_index_segments() {
        let r = record(json!({"main_camera": {"sensors": ["50 MP, f/1.8", "12 MP"]}}));
        assert_eq!(r.text("main_camera.sensors.0").as_deref(), Some("50 MP, f/1.8"));
        assert_eq!(r.text("main_camera.sensors.1").as_deref(), Some("12 MP"));
        assert!(r.text("main_camera.sensors.2").is_none());
        assert!(r.text("main_camera.sensors.first").is_none());
        // containers are not text
        assert!(r.text("main_camera.sensors").is_none());
    }

    #[test]
    fn scalars_and_blanks() {
        let r = record(json!({"a": 4, "b": true, "c": "   ", "d": null, "e": " x "}));
        assert_eq!(r.text("a").as_deref(), Some("4"));
        assert_eq!(r.text("b").as_deref(), Some("true"));
        assert!(r.text("c").is_none());
        assert!(r.text("d").is_none());
        assert_eq!(r.text("e").as_deref(), Some("x"));
    }

    #[test]
    fn first_text_takes_first_hit() {
        let r = record(json!({"specs": {"processor": "Exynos 1580"}}));
        assert_eq!(
            r.first_text(&["platform.chipset", "specs.processor"]).as_deref(),
            Some("Exynos 1580")
        );
        assert!(r.first_text(&["x", "y"]).is_none());
    }

    #[test]
    fn non_objects_are_not_records() {
        assert!(Record::from_value(json!([1])).is_none());
        assert!(Record::from_value(json!("x")).is_none());
        assert!(Record::from_value(Value::Null).is_none());
    }
}
