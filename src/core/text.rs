use serde_json::Value;

use crate::models::FieldMap;

/// Turn one record into a single normalized token string.
///
/// Descriptive fields are taken in the order the category profile lists
/// them: trimmed, lower-cased, appended when non-empty. Every entry of the
/// `attributes` mapping then contributes one `<key>_<value>` token with both
/// sides lower-cased. Tokens are joined with single spaces.
///
/// An empty result is a valid signal meaning the record has no
/// distinguishing descriptive content. Identical input always yields an
/// identical string: field order comes from the profile and attribute order
/// from the map's key ordering.
pub fn normalize_record(fields: &FieldMap, descriptive_fields: &[&str]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for &field in descriptive_fields {
        if let Some(value) = fields.get(field) {
            let text = scalar_text(value);
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed.to_lowercase());
            }
        }
    }

    if let Some(Value::Object(attributes)) = fields.get("attributes") {
        // Visit attributes in key order regardless of how the map arrived
        let ordered: std::collections::BTreeMap<&String, &Value> = attributes.iter().collect();
        for (name, value) in ordered {
            let cleaned = attribute_text(value);
            parts.push(format!(
                "{}_{}",
                name.to_lowercase(),
                cleaned.to_lowercase()
            ));
        }
    }

    parts.join(" ")
}

/// Render a descriptive field value as plain text. Lists flatten to their
/// elements separated by spaces; nested objects carry no descriptive text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(" "),
        Value::Null | Value::Object(_) => String::new(),
    }
}

/// Render an attribute value: strip surrounding quoting from strings, join
/// lists with spaces, stringify scalars.
fn attribute_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim_matches('"').to_string(),
        other => scalar_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> FieldMap {
        serde_json::from_value(value).unwrap()
    }

    const BASE: &[&str] = &["preferred_area", "cuisine", "theme", "description"];

    #[test]
    fn test_descriptive_fields_trimmed_and_lowercased() {
        let record = fields(json!({
            "preferred_area": "  Downtown  ",
            "theme": "RUSTIC",
            "description": "",
        }));

        assert_eq!(normalize_record(&record, BASE), "downtown rustic");
    }

    #[test]
    fn test_field_order_follows_profile_not_record() {
        let record = fields(json!({
            "description": "garden venue",
            "preferred_area": "suburbs",
        }));

        // preferred_area listed first in the profile, so it leads
        assert_eq!(normalize_record(&record, BASE), "suburbs garden venue");
    }

    #[test]
    fn test_numeric_field_is_stringified() {
        let record = fields(json!({ "description": 42 }));
        assert_eq!(normalize_record(&record, BASE), "42");
    }

    #[test]
    fn test_attribute_tokens() {
        let record = fields(json!({
            "description": "rooftop venue",
            "attributes": {
                "Guest Count": "\"120\"",
                "Style": ["Modern", "Industrial"],
                "Parking": true,
            },
        }));

        assert_eq!(
            normalize_record(&record, BASE),
            "rooftop venue guest count_120 parking_true style_modern industrial"
        );
    }

    #[test]
    fn test_attribute_order_is_key_order() {
        let record = fields(json!({
            "attributes": { "b": "2", "a": "1" },
        }));

        assert_eq!(normalize_record(&record, BASE), "a_1 b_2");
    }

    #[test]
    fn test_empty_record_yields_empty_string() {
        let record = FieldMap::new();
        assert_eq!(normalize_record(&record, BASE), "");
    }

    #[test]
    fn test_irrelevant_fields_ignored() {
        let record = fields(json!({
            "id": 7,
            "event_service_id": 3,
            "budget": 5000,
        }));

        assert_eq!(normalize_record(&record, BASE), "");
    }

    #[test]
    fn test_deterministic_output() {
        let record = fields(json!({
            "preferred_area": "downtown",
            "attributes": { "Cuisine": "levantine", "Seating": "outdoor" },
        }));

        let first = normalize_record(&record, BASE);
        let second = normalize_record(&record, BASE);
        assert_eq!(first, second);
    }
}
