use anyhow::Result;
use battlecards_testing::assertions::{assert_stderr_contains, assert_success};
use battlecards_testing::fixtures::sample_document;
use battlecards_testing::TestWorld;
use serde_json::{json, Value};

const PASSWORD: &str = "sales123";

fn world() -> TestWorld {
    TestWorld::new().with_seed(&sample_document())
}

fn edit(world: &TestWorld, args: &[&str]) -> Result<battlecards_testing::CliResult> {
    let mut full = vec!["edit", "--password", PASSWORD];
    full.extend_from_slice(args);
    world.run(&full)
}

fn saved(world: &TestWorld) -> Result<Value> {
    Ok(world.snapshot()?.expect("snapshot should exist"))
}

#[test]
fn test_set_text_field() -> Result<()> {
    let world = world();

    let result = edit(&world, &["set", "initech.tabs[0].content[1].row[2]", "Never"])?;
    assert_success(&result)?;
    assert_eq!(result.stdout(), "updated: initech.tabs[0].content[1].row[2]\n");

    assert_eq!(saved(&world)?["initech"]["tabs"][0]["content"][1]["row"][2], "Never");
    Ok(())
}

#[test]
fn test_set_json_value() -> Result<()> {
    let world = world();

    let result = edit(
        &world,
        &["set", "--json", "initech.tabs[0].headers", r#"["Area", "Us", "Them"]"#],
    )?;
    assert_success(&result)?;
    assert_eq!(
        saved(&world)?["initech"]["tabs"][0]["headers"],
        json!(["Area", "Us", "Them"])
    );
    Ok(())
}

#[test]
fn test_set_unknown_path_changes_nothing() -> Result<()> {
    let world = world();

    let result = edit(&world, &["set", "nobody.title", "Ghost"])?;
    assert!(!result.success());
    assert_stderr_contains(&result, "Nothing changed")?;
    assert_eq!(saved(&world)?, sample_document());
    Ok(())
}

#[test]
fn test_set_cannot_add_a_header_past_the_end() -> Result<()> {
    let world = world();

    let result = edit(&world, &["set", "initech.tabs[0].headers[3]", "Extra"])?;
    assert!(!result.success());
    assert_stderr_contains(&result, "Nothing changed")?;
    assert_eq!(saved(&world)?, sample_document());
    Ok(())
}

#[test]
fn test_wrong_password_is_refused() -> Result<()> {
    let world = world();

    let result = world.run(&["edit", "--password", "nope", "add-card", "Pied Piper"])?;
    assert!(!result.success());
    assert_stderr_contains(&result, "Incorrect password")?;
    assert_eq!(saved(&world)?, sample_document());
    Ok(())
}

#[test]
fn test_password_from_environment() -> Result<()> {
    let world = world().with_env("BATTLECARDS_PASSWORD", PASSWORD);

    let result = world.run(&["edit", "add-card", "Pied Piper"])?;
    assert_success(&result)?;
    assert!(saved(&world)?.get("pied-piper").is_some());
    Ok(())
}

#[test]
fn test_missing_password_without_terminal_fails() -> Result<()> {
    let world = world();

    let result = world.run(&["edit", "add-card", "Pied Piper"])?;
    assert!(!result.success());
    assert_stderr_contains(&result, "Editing needs a password")?;
    Ok(())
}

#[test]
fn test_configured_password_replaces_default() -> Result<()> {
    let world = TestWorld::new().with_config("[edit]\npassword = \"letmein\"\n");

    let refused = world.run(&["edit", "--password", PASSWORD, "add-card", "Hooli"])?;
    assert!(!refused.success());

    let accepted = world.run(&["edit", "--password", "letmein", "add-card", "Hooli"])?;
    assert_success(&accepted)?;
    Ok(())
}

#[test]
fn test_add_card_json_result() -> Result<()> {
    let world = world();

    let result = world.run(&[
        "--format", "json", "edit", "--password", PASSWORD, "add-card", "Pied Piper",
    ])?;
    assert_success(&result)?;

    let out = result.json()?;
    assert_eq!(out["operation"], "added card");
    assert_eq!(out["path"], "pied-piper");

    let card = &saved(&world)?["pied-piper"];
    assert_eq!(card["title"], "Pied Piper");
    assert_eq!(card["tabs"], json!([]));
    Ok(())
}

#[test]
fn test_duplicate_card_is_rejected() -> Result<()> {
    let world = world();

    let result = edit(&world, &["add-card", "Initech"])?;
    assert!(!result.success());
    assert_eq!(saved(&world)?, sample_document());
    Ok(())
}

#[test]
fn test_blank_card_title_is_rejected() -> Result<()> {
    let world = world();

    let result = edit(&world, &["add-card", "   "])?;
    assert!(!result.success());
    assert_stderr_contains(&result, "must not be empty")?;
    Ok(())
}

#[test]
fn test_add_tab_gets_generated_id() -> Result<()> {
    let world = world();

    let result = edit(&world, &["add-tab", "hooli", "Pricing"])?;
    assert_success(&result)?;
    assert!(result.stdout().starts_with("added tab: hooli-pricing-"));

    let tab = &saved(&world)?["hooli"]["tabs"][0];
    assert_eq!(tab["title"], "Pricing");
    assert!(tab["id"].as_str().unwrap().starts_with("hooli-pricing-"));
    assert_eq!(tab["content"], json!([]));
    Ok(())
}

#[test]
fn test_add_column_extends_every_row() -> Result<()> {
    let world = world();

    let result = edit(&world, &["add-column", "initech.tabs[0]", "Notes"])?;
    assert_success(&result)?;

    let tab = &saved(&world)?["initech"]["tabs"][0];
    assert_eq!(tab["headers"][3], "Notes");
    for row in tab["content"].as_array().unwrap() {
        assert_eq!(row["row"].as_array().unwrap().len(), 4);
    }
    Ok(())
}

#[test]
fn test_add_row_reports_its_index() -> Result<()> {
    let world = world();

    let result = edit(&world, &["add-row", "initech.tabs[0].content"])?;
    assert_success(&result)?;
    assert_eq!(result.stdout(), "added row: initech.tabs[0].content[2]\n");

    let content = &saved(&world)?["initech"]["tabs"][0]["content"];
    assert_eq!(content.as_array().unwrap().len(), 3);
    assert_eq!(content[2]["details"], json!([]));
    Ok(())
}

#[test]
fn test_add_detail_to_empty_list() -> Result<()> {
    let world = world();

    let result = edit(&world, &["add-detail", "initech.tabs[0].content[1].details"])?;
    assert_success(&result)?;
    assert_eq!(
        result.stdout(),
        "added detail: initech.tabs[0].content[1].details[0]\n"
    );
    Ok(())
}

#[test]
fn test_add_row_to_wrong_path_changes_nothing() -> Result<()> {
    let world = world();

    let result = edit(&world, &["add-row", "initech.title"])?;
    assert!(!result.success());
    assert_eq!(saved(&world)?, sample_document());
    Ok(())
}

#[test]
fn test_delete_needs_confirmation() -> Result<()> {
    let world = world();

    let declined = world.run_with_stdin(
        &["edit", "--password", PASSWORD, "delete", "initech.tabs[0].content[0]"],
        "n\n",
    )?;
    assert_success(&declined)?;
    assert_stderr_contains(&declined, "Cancelled.")?;
    assert_eq!(saved(&world)?, sample_document());

    let confirmed = world.run_with_stdin(
        &["edit", "--password", PASSWORD, "delete", "initech.tabs[0].content[0]"],
        "y\n",
    )?;
    assert_success(&confirmed)?;

    let content = &saved(&world)?["initech"]["tabs"][0]["content"];
    assert_eq!(content.as_array().unwrap().len(), 1);
    assert_eq!(content[0]["row"][0], "Support");
    Ok(())
}

#[test]
fn test_delete_card_with_yes() -> Result<()> {
    let world = world();

    let result = edit(&world, &["delete", "--yes", "hooli"])?;
    assert_success(&result)?;
    assert_eq!(result.stdout(), "deleted: hooli\n");
    assert!(saved(&world)?.get("hooli").is_none());
    Ok(())
}

#[test]
fn test_delete_missing_item_fails() -> Result<()> {
    let world = world();

    let result = edit(&world, &["delete", "--yes", "initech.tabs[0].content[9]"])?;
    assert!(!result.success());
    assert_stderr_contains(&result, "could not be deleted")?;
    Ok(())
}

#[test]
fn test_edits_show_up_in_next_render() -> Result<()> {
    let world = world();
    assert_success(&edit(&world, &["set", "initech.title", "Initech Corp"])?)?;

    let result = world.run(&["show"])?;
    assert_success(&result)?;
    assert!(result.stdout().contains("Initech Corp (initech)"));
    Ok(())
}
