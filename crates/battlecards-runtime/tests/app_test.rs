use anyhow::Result;
use battlecards_engine::{Action, ActionKind};
use battlecards_runtime::{
    App, AppError, AppSettings, Config, EditInput, EditOutcome, GateOutcome, PasswordGate,
    ScriptedPrompter,
};
use battlecards_store::{DocumentStore, LoadSource, MemoryStorage, StoreError};
use battlecards_types::Path;
use serde_json::json;
use tempfile::TempDir;

fn app() -> App {
    app_with(AppSettings::default())
}

fn app_with(settings: AppSettings) -> App {
    let (app, report) = App::new(DocumentStore::new(MemoryStorage::new()), settings);
    assert_eq!(report.source, LoadSource::Seed);
    app
}

fn editing() -> App {
    let mut app = app();
    assert_eq!(app.enter_edit_mode("sales123"), GateOutcome::Entered);
    app
}

fn p(s: &str) -> Path {
    Path::parse(s).unwrap()
}

#[test]
fn test_initial_view_selects_first_card() {
    let app = app();
    let card = app.tree().active_card().unwrap();
    assert_eq!(card.card_id, "acme-cloud");
    assert_eq!(card.active_tab().unwrap().tab_id, "acme-cloud-overview");
    assert!(!app.tree().edit_mode);
}

#[test]
fn test_wrong_password_is_rejected_not_an_error() {
    let mut app = app();
    assert_eq!(app.enter_edit_mode("nope"), GateOutcome::Rejected);
    assert!(!app.is_edit_mode());
    assert!(matches!(
        app.add_card("Hooli"),
        Err(AppError::EditModeRequired)
    ));
}

#[test]
fn test_custom_gate() {
    let mut app = app_with(AppSettings {
        gate: PasswordGate::plain("letmein"),
        strict_paths: false,
    });
    assert_eq!(app.enter_edit_mode("sales123"), GateOutcome::Rejected);
    assert_eq!(app.enter_edit_mode("letmein"), GateOutcome::Entered);
    assert!(app.tree().edit_mode);
}

#[test]
fn test_new_card_becomes_active() -> Result<()> {
    let mut app = editing();
    let id = app.add_card("Salesforce")?.unwrap();

    assert_eq!(app.view().active_card(), Some(id.as_str()));
    assert_eq!(app.tree().active_card().unwrap().card_id, "salesforce");

    let err = app.add_card("Salesforce").unwrap_err();
    assert!(matches!(err, AppError::Store(StoreError::DuplicateId { .. })));
    assert!(err.is_user_facing());
    Ok(())
}

#[test]
fn test_blank_prompt_answer_is_cancel() -> Result<()> {
    let mut app = editing();
    let before = app.document().clone();
    assert_eq!(app.add_card("   ")?, None);
    assert_eq!(app.add_tab("acme-cloud", "")?, None);
    assert!(!app.add_column(&p("acme-cloud.tabs[0]"), "")?);
    assert_eq!(app.document(), &before);
    Ok(())
}

#[test]
fn test_new_tab_becomes_active_sub_tab() -> Result<()> {
    let mut app = editing();
    let tab = app.add_tab("acme-cloud", "Pricing")?.unwrap();
    let card = app.tree().active_card().unwrap();
    assert_eq!(card.active_tab().unwrap().tab_id, tab);
    Ok(())
}

#[test]
fn test_same_title_tabs_are_selectable_on_their_own() -> Result<()> {
    let mut app = editing();
    let first = app.add_tab("acme-cloud", "Pricing")?.unwrap();
    let second = app.add_tab("acme-cloud", "Pricing")?.unwrap();
    assert_ne!(first, second);

    for id in [&first, &second, &first] {
        assert!(app.select_sub_tab(id));
        let card = app.tree().active_card().unwrap();
        assert_eq!(&card.active_tab().unwrap().tab_id, id);
        let active: Vec<&str> = card
            .sub_tabs
            .iter()
            .filter(|link| link.active)
            .map(|link| link.tab_id.as_str())
            .collect();
        assert_eq!(active, [id.as_str()]);
    }
    Ok(())
}

#[test]
fn test_expansion_survives_mutation_elsewhere() -> Result<()> {
    let mut app = editing();
    app.toggle_row("acme-cloud", "acme-cloud-overview", 2);
    app.update_field(&p("acme-cloud.title"), json!("Acme Cloud Inc"))?;

    let tab = app.tree().active_card().unwrap().active_tab().unwrap();
    assert!(tab.rows[2].expanded);
    assert_eq!(app.tree().nav[0].title, "Acme Cloud Inc");
    Ok(())
}

#[test]
fn test_deleting_a_row_keeps_expansion_on_the_same_row() -> Result<()> {
    let mut app = editing();
    app.toggle_row("acme-cloud", "acme-cloud-overview", 2);

    app.delete(&p("acme-cloud.tabs[0].content[0]"))?;

    let tab = app.tree().active_card().unwrap().active_tab().unwrap();
    assert_eq!(tab.rows.len(), 2);
    assert!(tab.rows[1].expanded);
    assert_eq!(tab.rows[1].cells[0].raw, "Integrations");
    assert!(!tab.rows[0].expanded);
    Ok(())
}

#[test]
fn test_deleting_a_detail_leaves_expansion_alone() -> Result<()> {
    let mut app = editing();
    app.toggle_row("acme-cloud", "acme-cloud-overview", 0);
    app.toggle_row("acme-cloud", "acme-cloud-overview", 1);

    app.delete(&p("acme-cloud.tabs[0].content[0].details[1]"))?;

    let tab = app.tree().active_card().unwrap().active_tab().unwrap();
    assert_eq!(tab.rows.len(), 3);
    assert!(tab.rows[0].expanded);
    assert!(tab.rows[1].expanded);
    assert!(!tab.rows[2].expanded);
    Ok(())
}

#[test]
fn test_deleting_active_card_moves_to_first_remaining() -> Result<()> {
    let mut app = editing();
    app.select_card("globex-studio");
    app.delete(&p("globex-studio"))?;
    assert_eq!(app.view().active_card(), Some("acme-cloud"));
    Ok(())
}

#[test]
fn test_edit_session_commit_writes_and_rerenders() -> Result<()> {
    let mut app = editing();
    let path = p("acme-cloud.tabs[0].content[0].row[2]");

    let session = app.begin_edit(&path)?.unwrap();
    assert_eq!(session.buffer(), "Per user, per month");
    assert!(session.is_multiline());

    app.edit_input(EditInput::End)?;
    for c in " **only**".chars() {
        app.edit_input(EditInput::Char(c))?;
    }
    let outcome = app.edit_input(EditInput::Confirm { shift: false })?;

    assert!(matches!(outcome, Some(EditOutcome::Commit(_))));
    assert!(app.session().is_none());
    assert_eq!(
        app.document().get(&path),
        Some(&json!("Per user, per month **only**"))
    );
    assert_eq!(
        app.tree().find_editable(&path).unwrap().raw,
        "Per user, per month **only**"
    );
    Ok(())
}

#[test]
fn test_edit_session_abort_leaves_document() -> Result<()> {
    let mut app = editing();
    let before = app.document().clone();

    app.begin_edit(&p("acme-cloud.title"))?;
    app.edit_input(EditInput::Char('!'))?;
    assert_eq!(app.edit_input(EditInput::Cancel)?, Some(EditOutcome::Abort));

    assert_eq!(app.document(), &before);
    assert!(app.session().is_none());
    Ok(())
}

#[test]
fn test_opening_second_session_commits_first() -> Result<()> {
    let mut app = editing();
    app.begin_edit(&p("acme-cloud.title"))?;
    app.edit_input(EditInput::Char('!'))?;

    app.begin_edit(&p("acme-cloud.subtitle"))?;

    assert_eq!(
        app.document().get(&p("acme-cloud.title")),
        Some(&json!("Acme Cloud!"))
    );
    assert_eq!(app.session().unwrap().path(), &p("acme-cloud.subtitle"));
    Ok(())
}

#[test]
fn test_exit_edit_mode_commits_open_session() -> Result<()> {
    let mut app = editing();
    app.begin_edit(&p("globex-studio.title"))?;
    app.edit_input(EditInput::Char('?'))?;

    app.exit_edit_mode()?;

    assert!(!app.is_edit_mode());
    assert_eq!(
        app.document().get(&p("globex-studio.title")),
        Some(&json!("Globex Studio?"))
    );
    assert_eq!(app.tree().all_actions().count(), 0);
    Ok(())
}

#[test]
fn test_unknown_path_is_ignored_unless_strict() -> Result<()> {
    let mut lenient = editing();
    let before = lenient.document().clone();
    assert_eq!(lenient.delete(&p("acme-cloud.tabs[7]"))?, None);
    assert!(lenient.begin_edit(&p("nobody.title"))?.is_none());
    assert_eq!(lenient.document(), &before);

    let mut strict = app_with(AppSettings {
        strict_paths: true,
        ..AppSettings::default()
    });
    strict.enter_edit_mode("sales123");
    assert!(matches!(
        strict.delete(&p("acme-cloud.tabs[7]")),
        Err(AppError::Path(_))
    ));
    Ok(())
}

#[test]
fn test_perform_add_card_uses_prompt() -> Result<()> {
    let mut app = editing();
    let add_card = Action::new(ActionKind::AddCard, Path::root());

    let mut prompter = ScriptedPrompter::confirming().answer("Initech");
    assert!(app.perform(&add_card, &mut prompter)?);
    assert_eq!(prompter.asked(), ["Enter New Card Title (e.g., Salesforce)"]);
    assert!(app.document().contains_card("initech"));

    let mut cancelled = ScriptedPrompter::confirming().cancel();
    assert!(!app.perform(&add_card, &mut cancelled)?);
    Ok(())
}

#[test]
fn test_perform_delete_needs_confirmation() -> Result<()> {
    let mut app = editing();
    let action = app
        .tree()
        .find_action(ActionKind::DeleteRow, &p("acme-cloud.tabs[0].content[1]"))
        .cloned()
        .unwrap();

    assert!(!app.perform(&action, &mut ScriptedPrompter::declining())?);
    assert_eq!(app.document().row_count("acme-cloud", "acme-cloud-overview"), Some(3));

    assert!(app.perform(&action, &mut ScriptedPrompter::confirming())?);
    assert_eq!(app.document().row_count("acme-cloud", "acme-cloud-overview"), Some(2));
    Ok(())
}

#[test]
fn test_perform_add_tab_and_column() -> Result<()> {
    let mut app = editing();
    let add_tab = Action::new(ActionKind::AddTab, p("globex-studio.tabs"));
    let mut prompter = ScriptedPrompter::confirming().answer("Pricing").answer("Support");

    assert!(app.perform(&add_tab, &mut prompter)?);
    let add_column = Action::new(ActionKind::AddColumn, p("globex-studio.tabs[0]"));
    assert!(app.perform(&add_column, &mut prompter)?);

    assert_eq!(
        app.document().get(&p("globex-studio.tabs[0].headers[3]")),
        Some(&json!("Support"))
    );
    Ok(())
}

#[test]
fn test_add_detail_expands_its_row() -> Result<()> {
    let mut app = editing();
    app.add_detail(&p("acme-cloud.tabs[0].content[2].details"))?;
    assert!(app.view().is_expanded("acme-cloud", "acme-cloud-overview", 2));
    Ok(())
}

#[test]
fn test_open_workspace_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = Config::default();

    let (mut app, report) = App::open(temp_dir.path(), &config)?;
    assert_eq!(report.source, LoadSource::Seed);
    assert!(temp_dir.path().join("storage/battleCardData.json").exists());

    app.enter_edit_mode("sales123");
    app.add_card("Hooli")?;

    let (reopened, report) = App::open(temp_dir.path(), &config)?;
    assert_eq!(report.source, LoadSource::Snapshot);
    assert!(reopened.document().contains_card("hooli"));

    let mut app = reopened;
    app.reset()?;
    assert!(!app.document().contains_card("hooli"));
    assert_eq!(app.load_source(), LoadSource::Seed);
    Ok(())
}
