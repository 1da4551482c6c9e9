//! Assertions over the JSON tree printed by `show --format json`.

use crate::CliResult;
use anyhow::{Context, Result};
use predicates::prelude::*;
use serde_json::Value;

fn active<'a>(items: &'a Value, what: &str) -> Result<&'a Value> {
    items
        .as_array()
        .with_context(|| format!("Expected '{}' array in JSON", what))?
        .iter()
        .find(|item| item["active"] == Value::Bool(true))
        .with_context(|| format!("No active entry in '{}'", what))
}

/// Card ids in navigation order.
pub fn nav_card_ids(tree: &Value) -> Result<Vec<String>> {
    tree["nav"]
        .as_array()
        .context("Expected 'nav' array in JSON")?
        .iter()
        .map(|item| {
            item["card_id"]
                .as_str()
                .map(str::to_string)
                .context("nav entry missing card_id")
        })
        .collect()
}

pub fn assert_active_card(tree: &Value, card_id: &str) -> Result<()> {
    let card = active(&tree["cards"], "cards")?;
    if card["card_id"] != card_id {
        anyhow::bail!("Expected active card {}, got {}", card_id, card["card_id"]);
    }
    Ok(())
}

pub fn assert_active_tab(tree: &Value, tab_id: &str) -> Result<()> {
    let card = active(&tree["cards"], "cards")?;
    let tab = active(&card["tabs"], "tabs")?;
    if tab["tab_id"] != tab_id {
        anyhow::bail!("Expected active tab {}, got {}", tab_id, tab["tab_id"]);
    }
    Ok(())
}

/// Indices of expanded rows in the active tab of the active card.
pub fn expanded_rows(tree: &Value) -> Result<Vec<u64>> {
    let card = active(&tree["cards"], "cards")?;
    let tab = active(&card["tabs"], "tabs")?;
    let rows = tab["rows"].as_array().context("Expected 'rows' array")?;
    Ok(rows
        .iter()
        .filter(|row| row["expanded"] == Value::Bool(true))
        .filter_map(|row| row["index"].as_u64())
        .collect())
}

pub fn assert_success(result: &CliResult) -> Result<()> {
    if !result.success() {
        anyhow::bail!(
            "command failed ({}):\nstdout:\n{}\nstderr:\n{}",
            result.status,
            result.stdout,
            result.stderr
        );
    }
    Ok(())
}

pub fn assert_stdout_contains(result: &CliResult, needle: &str) -> Result<()> {
    if !predicate::str::contains(needle).eval(result.stdout()) {
        anyhow::bail!("stdout does not contain {:?}:\n{}", needle, result.stdout);
    }
    Ok(())
}

pub fn assert_stderr_contains(result: &CliResult, needle: &str) -> Result<()> {
    if !predicate::str::contains(needle).eval(result.stderr()) {
        anyhow::bail!("stderr does not contain {:?}:\n{}", needle, result.stderr);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Value {
        json!({
            "nav": [{"card_id": "a", "active": false}, {"card_id": "b", "active": true}],
            "cards": [
                {"card_id": "a", "active": false, "tabs": []},
                {"card_id": "b", "active": true, "tabs": [
                    {"tab_id": "b-x", "active": true, "rows": [
                        {"index": 0, "expanded": false},
                        {"index": 1, "expanded": true}
                    ]}
                ]}
            ]
        })
    }

    #[test]
    fn test_tree_helpers() -> Result<()> {
        let tree = tree();
        assert_eq!(nav_card_ids(&tree)?, ["a", "b"]);
        assert_active_card(&tree, "b")?;
        assert_active_tab(&tree, "b-x")?;
        assert!(assert_active_card(&tree, "a").is_err());
        assert_eq!(expanded_rows(&tree)?, [1]);
        Ok(())
    }
}
