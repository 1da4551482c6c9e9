//! Small documents to seed a test world with.

use battlecards_types::Document;
use serde_json::{Value, json};

/// Two cards: one with a populated tab, one empty.
pub fn sample_document() -> Value {
    json!({
        "initech": {
            "title": "Initech",
            "subtitle": "Legacy **TPS** reporting vendor.",
            "tabs": [
                {
                    "id": "initech-overview",
                    "title": "Overview",
                    "headers": ["Feature", "Our Product", "Initech"],
                    "description": "Quick comparison.",
                    "content": [
                        {"row": ["Reports", "Live dashboards", "Cover sheets"], "details": ["They still fax."]},
                        {"row": ["Support", "24/7 chat", "Business hours"], "details": []}
                    ]
                }
            ]
        },
        "hooli": {
            "title": "Hooli",
            "subtitle": "",
            "tabs": []
        }
    })
}

/// A card whose only row still stores its details as a single string.
pub fn legacy_document() -> Value {
    json!({
        "vandelay": {
            "title": "Vandelay Industries",
            "subtitle": "Importer and exporter.",
            "tabs": [
                {
                    "id": "vandelay-overview",
                    "title": "Overview",
                    "headers": ["Feature", "Us"],
                    "content": [
                        {"row": ["Latex", "Yes"], "details": "Written before bullet lists existed."}
                    ]
                }
            ]
        }
    })
}

/// Parse a fixture, panicking on malformed input.
pub fn document(value: Value) -> Document {
    Document::from_value(value).expect("fixture must be a mapping")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_documents() {
        let doc = document(sample_document());
        assert_eq!(doc.card_ids().collect::<Vec<_>>(), ["initech", "hooli"]);
        assert_eq!(doc.row_count("initech", "initech-overview"), Some(2));

        let legacy = document(legacy_document());
        assert!(legacy.contains_card("vandelay"));
    }
}
