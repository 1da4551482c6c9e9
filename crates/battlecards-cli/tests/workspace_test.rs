use anyhow::Result;
use battlecards_testing::assertions::{
    assert_stderr_contains, assert_stdout_contains, assert_success,
};
use battlecards_testing::fixtures::sample_document;
use battlecards_testing::TestWorld;

#[test]
fn test_init_writes_config_once() -> Result<()> {
    let world = TestWorld::new();
    let config_path = world.data_dir().join("config.toml");

    let result = world.run(&["init"])?;
    assert_success(&result)?;
    assert_stdout_contains(&result, "Wrote")?;

    let written = std::fs::read_to_string(&config_path)?;
    assert!(written.contains("password = \"sales123\""));
    assert!(written.contains("[defaults]"));

    std::fs::write(&config_path, "[edit]\npassword = \"mine\"\n")?;
    let again = world.run(&["init"])?;
    assert_success(&again)?;
    assert_stdout_contains(&again, "Config already exists")?;
    assert_eq!(std::fs::read_to_string(&config_path)?, "[edit]\npassword = \"mine\"\n");

    let forced = world.run(&["init", "--force"])?;
    assert_success(&forced)?;
    assert!(std::fs::read_to_string(&config_path)?.contains("sales123"));
    Ok(())
}

#[test]
fn test_config_masks_password() -> Result<()> {
    let world = TestWorld::new().with_config("[edit]\npassword = \"letmein\"\n");

    let result = world.run(&["config"])?;
    assert_success(&result)?;
    assert_stdout_contains(&result, "********")?;
    assert!(!result.stdout().contains("letmein"));

    let json = world.run(&["--format", "json", "config"])?.json()?;
    assert_eq!(json["exists"], true);
    assert_eq!(json["config"]["edit"]["password"], "********");
    assert_eq!(json["config"]["storage"]["key"], "battleCardData");
    Ok(())
}

#[test]
fn test_config_without_file_shows_defaults() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["config"])?;
    assert_success(&result)?;
    assert_stdout_contains(&result, "not found, using defaults")?;
    Ok(())
}

#[test]
fn test_broken_config_names_the_file() -> Result<()> {
    let world = TestWorld::new().with_config("[storage\nkey = ");

    let result = world.run(&["show"])?;
    assert!(!result.success());
    assert_stderr_contains(&result, "config.toml")?;
    Ok(())
}

#[test]
fn test_reset_restores_seed() -> Result<()> {
    let world = TestWorld::new().with_seed(&sample_document());
    let added = world.run(&["edit", "--password", "sales123", "add-card", "Pied Piper"])?;
    assert_success(&added)?;

    let declined = world.run_with_stdin(&["reset"], "no\n")?;
    assert_success(&declined)?;
    assert!(world.snapshot()?.unwrap().get("pied-piper").is_some());

    let result = world.run_with_stdin(&["reset"], "y\n")?;
    assert_success(&result)?;
    assert_stdout_contains(&result, "loaded 2 cards from the seed")?;
    assert_eq!(world.snapshot()?, Some(sample_document()));
    Ok(())
}

#[test]
fn test_reset_with_missing_seed_starts_empty() -> Result<()> {
    let world = TestWorld::new().with_config("[seed]\npath = \"missing.json\"\n");

    let result = world.run(&["reset", "--yes"])?;
    assert_success(&result)?;
    assert_stdout_contains(&result, "starting empty")?;

    let shown = world.run(&["show"])?;
    assert_success(&shown)?;
    assert_eq!(shown.stdout(), "No cards yet.\n");
    Ok(())
}

#[test]
#[allow(deprecated)]
fn test_data_dir_from_environment() -> Result<()> {
    let world = TestWorld::new();
    let other = world.temp_dir().join("elsewhere");

    assert_cmd::Command::cargo_bin("battlecards")?
        .env("BATTLECARDS_PATH", &other)
        .env_remove("BATTLECARDS_PASSWORD")
        .arg("show")
        .assert()
        .success()
        .stdout(predicates::str::contains("Acme Cloud (acme-cloud)"));

    assert!(other.join("storage").join("battleCardData.json").exists());
    Ok(())
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["--help"])?;
    assert_success(&result)?;
    assert_stdout_contains(&result, "Browse and edit competitive battle cards")?;
    for command in ["browse", "show", "get", "edit", "reset", "init", "config"] {
        assert_stdout_contains(&result, command)?;
    }

    let edit = world.run(&["edit", "--help"])?;
    assert_stdout_contains(&edit, "add-detail")?;
    assert_stdout_contains(&edit, "BATTLECARDS_PASSWORD")?;
    Ok(())
}
