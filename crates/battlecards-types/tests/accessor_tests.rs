use anyhow::Result;
use battlecards_types::{Document, Path};
use serde_json::json;

fn doc() -> Document {
    Document::from_value(json!({
        "card1": {
            "title": "Card One",
            "subtitle": "Sub",
            "tabs": [{
                "id": "card1-overview-1",
                "title": "Overview",
                "headers": ["Feature", "Us", "Them"],
                "content": [
                    {"row": ["a0", "a1", "a2"], "details": ["a-detail"]},
                    {"row": ["b0", "b1", "b2"], "details": []},
                    {"row": ["c0", "c1", "c2"], "details": ["c-detail"]}
                ]
            }]
        }
    }))
    .unwrap()
}

#[test]
fn test_set_then_get_round_trips() -> Result<()> {
    let mut doc = doc();
    let cases = [
        ("card1.title", json!("Renamed")),
        ("card1.tabs[0].headers[1]", json!("Ours")),
        ("card1.tabs[0].content[2].row[1]", json!("**bold**")),
        ("card1.tabs[0].content[0].details[0]", json!("changed")),
        ("card1.tabs[0].description", json!("new field on a mapping")),
    ];

    for (raw, value) in cases {
        let path = Path::parse(raw)?;
        doc.set(&path, value.clone())?;
        assert_eq!(doc.get(&path), Some(&value), "round trip failed for {}", raw);
    }
    Ok(())
}

#[test]
fn test_delete_shifts_later_indices_down() -> Result<()> {
    let mut doc = doc();
    let former_third = doc
        .get(&Path::parse("card1.tabs[0].content[2]")?)
        .cloned()
        .unwrap();

    doc.delete(&Path::parse("card1.tabs[0].content[1]")?)?;

    assert_eq!(
        doc.get(&Path::parse("card1.tabs[0].content[1]")?),
        Some(&former_third)
    );
    assert_eq!(doc.get(&Path::parse("card1.tabs[0].content[2]")?), None);
    Ok(())
}

#[test]
fn test_get_absent_intermediate_is_none_not_error() -> Result<()> {
    let doc = doc();
    assert_eq!(doc.get(&Path::parse("card2.tabs[0].title")?), None);
    assert_eq!(doc.get(&Path::parse("card1.tabs[9].title")?), None);
    Ok(())
}

#[test]
fn test_delete_card_key() -> Result<()> {
    let mut doc = doc();
    doc.delete(&Path::parse("card1")?)?;
    assert!(doc.is_empty());
    Ok(())
}
