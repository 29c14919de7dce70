use std::sync::LazyLock;

use regex::Regex;

use crate::record::{Record, PLACEHOLDER};

// grouped thousands (comma, space or nbsp), plain digits, or a bare fraction
static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\d{1,3}(?:[, \x{A0}]\d{3})+|\d+)(?:\.\d+)?|\.\d+").unwrap()
});

/// Name used when a record carries no identity fields.
pub const UNKNOWN_NAME: &str = "Unknown phone";

/// Row labels of the spec table, in display order.
pub const LABELS: [&str; 6] = ["Display", "Processor", "Battery", "Camera", "OS", "Price"];

/// A record projected onto the fields the page shows. Every display field is already defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneView {
    pub name: String,
    pub brand: Option<String>,
    pub image: Option<String>,
    pub display: String,
    pub processor: String,
    pub battery: String,
    pub camera: String,
    pub os: String,
    /// Price as written in the record, currency symbol and all.
    pub price: String,
    /// Bare numeric price for structured data; empty when the record has none.
    pub price_value: String,
    pub description: String,
}

impl PhoneView {
    pub fn from_record(record: &Record) -> Self {
        let name = display_name(record);

        let display_type = record.text("display.type");
        let chipset = record.text("platform.chipset");
        let description = describe(&name, display_type.as_deref(), chipset.as_deref());

        let display = join_present(&[record.text("display.size"), display_type])
            .or_else(|| record.text("specs.display"))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let raw_price = record.text("misc.price.usd");
        let price_value = raw_price
            .as_deref()
            .and_then(normalize_price)
            .unwrap_or_default();

        PhoneView {
            brand: record.text("brand"),
            image: record.text("image_url"),
            display,
            processor: chipset
                .or_else(|| record.text("specs.processor"))
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            battery: record
                .first_text(&["battery.type", "specs.battery"])
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            camera: record
                .first_text(&["main_camera.sensors.0", "main_camera.setup"])
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            os: record.text_or("platform.os", PLACEHOLDER),
            price: raw_price.unwrap_or_else(|| PLACEHOLDER.to_string()),
            price_value,
            description,
            name,
        }
    }

    /// `(label, value)` pairs in `LABELS` order.
    pub fn rows(&self) -> [(&'static str, &str); 6] {
        [
            (LABELS[0], self.display.as_str()),
            (LABELS[1], self.processor.as_str()),
            (LABELS[2], self.battery.as_str()),
            (LABELS[3], self.camera.as_str()),
            (LABELS[4], self.os.as_str()),
            (LABELS[5], self.price.as_str()),
        ]
    }
}

/// `name`, else `brand model`, else `model`, else a placeholder.
pub fn display_name(record: &Record) -> String {
    if let Some(name) = record.text("name") {
        return name;
    }
    match (record.text("brand"), record.text("model")) {
        (Some(brand), Some(model)) if model.starts_with(&brand) => model,
        (Some(brand), Some(model)) => format!("{} {}", brand, model),
        (None, Some(model)) => model,
        _ => UNKNOWN_NAME.to_string(),
    }
}

/// First number in a price string with thousands separators dropped.
/// `"$1,299.00"` and `"$1 299.00"` become `"1299.00"`, `"$.99"` becomes `".99"`;
/// a string with no digits yields `None`.
pub fn normalize_price(raw: &str) -> Option<String> {
    PRICE_RE.find(raw).map(|m| {
        m.as_str()
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect()
    })
}

fn describe(name: &str, display_type: Option<&str>, chipset: Option<&str>) -> String {
    match (display_type, chipset) {
        (Some(d), Some(c)) => format!("Detailed specifications for {} featuring {} and {}.", name, d, c),
        (Some(one), None) | (None, Some(one)) => {
            format!("Detailed specifications for {} featuring {}.", name, one)
        }
        (None, None) => format!("Detailed specifications for {}.", name),
    }
}

fn join_present(parts: &[Option<String>]) -> Option<String> {
    let joined = parts.iter().flatten().map(String::as_str).collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view(v: serde_json::Value) -> PhoneView {
        PhoneView::from_record(&Record::from_value(v).unwrap())
    }

    #[test]
    fn price_normalization() {
        assert_eq!(normalize_price("$1,299.00").as_deref(), Some("1299.00"));
        assert_eq!(normalize_price("$399.99").as_deref(), Some("399.99"));
        assert_eq!(normalize_price("€ 479").as_deref(), Some("479"));
        assert_eq!(normalize_price("About 12,500 INR").as_deref(), Some("12500"));
        assert_eq!(normalize_price("$.99").as_deref(), Some(".99"));
        assert_eq!(normalize_price("$1 299.00").as_deref(), Some("1299.00"));
        assert_eq!(normalize_price("1\u{a0}299,00 €").as_deref(), Some("1299"));
        assert_eq!(normalize_price("1299.00").as_deref(), Some("1299.00"));
        assert_eq!(normalize_price("TBA"), None);
        assert_eq!(normalize_price(""), None);
    }

    #[test]
    fn price_normalization_idempotent() {
        for raw in ["$1,299.00", "399.99", "USD 2,000", "199.00", "$.99", "$1 299.00"] {
            let once = normalize_price(raw).unwrap();
            assert_eq!(normalize_price(&once).as_deref(), Some(once.as_str()), "{raw}");
        }
    }

    #[test]
    fn empty_record_is_all_placeholders() {
        let v = view(json!({}));
        assert_eq!(v.name, UNKNOWN_NAME);
        assert!(v.image.is_none());
        assert!(v.brand.is_none());
        for (_, value) in v.rows() {
            assert_eq!(value, PLACEHOLDER);
        }
        assert_eq!(v.price_value, "");
        assert_eq!(v.description, "Detailed specifications for Unknown phone.");
    }

    #[test]
    fn full_record() {
        let v = view(json!({
            "brand": "Samsung",
            "model": "Galaxy A56",
            "image_url": "https://img.example/a56.png",
            "display": {"size": "6.7 inches", "type": "Super AMOLED+"},
            "platform": {"chipset": "Exynos 1580", "os": "Android 15"},
            "battery": {"type": "5000 mAh"},
            "main_camera": {"setup": "Triple", "sensors": ["50 MP, f/1.8", "12 MP"]},
            "misc": {"price": {"usd": "$1,299.00"}}
        }));
        assert_eq!(v.name, "Samsung Galaxy A56");
        assert_eq!(v.display, "6.7 inches Super AMOLED+");
        assert_eq!(v.processor, "Exynos 1580");
        assert_eq!(v.battery, "5000 mAh");
        assert_eq!(v.camera, "50 MP, f/1.8");
        assert_eq!(v.os, "Android 15");
        assert_eq!(v.price, "$1,299.00");
        assert_eq!(v.price_value, "1299.00");
        assert_eq!(
            v.description,
            "Detailed specifications for Samsung Galaxy A56 featuring Super AMOLED+ and Exynos 1580."
        );
    }

    #[test]
    fn rows_fixed_order() {
        let v = view(json!({"display": {"size": "6.1 in"}}));
        let labels: Vec<_> = v.rows().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, LABELS);
        assert_eq!(v.rows()[0].1, "6.1 in");
        assert_eq!(v.rows()[1].1, PLACEHOLDER);
    }

    #[test]
    fn camera_falls_back_to_setup() {
        let v = view(json!({"main_camera": {"setup": "Dual", "sensors": []}}));
        assert_eq!(v.camera, "Dual");
    }

    #[test]
    fn legacy_specs_shape() {
        let v = view(json!({
            "brand": "Google",
            "model": "Pixel 9",
            "specs": {"display": "6.3\" OLED", "processor": "Tensor G4", "battery": "4700 mAh"}
        }));
        assert_eq!(v.name, "Google Pixel 9");
        assert_eq!(v.display, "6.3\" OLED");
        assert_eq!(v.processor, "Tensor G4");
        assert_eq!(v.battery, "4700 mAh");
    }

    #[test]
    fn naming_rules() {
        assert_eq!(view(json!({"name": "Nothing Phone (3a)", "brand": "X"})).name, "Nothing Phone (3a)");
        assert_eq!(view(json!({"model": "Galaxy A56"})).name, "Galaxy A56");
        assert_eq!(view(json!({"brand": "Samsung"})).name, UNKNOWN_NAME);
        assert_eq!(
            view(json!({"brand": "Samsung", "model": "Samsung Galaxy A56"})).name,
            "Samsung Galaxy A56"
        );
    }
}
