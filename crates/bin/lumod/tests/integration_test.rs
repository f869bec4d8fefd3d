//! End-to-end tests for the full lumod stack.
//!
//! Each test wires the real command service to a real file store (in a
//! temp directory) and the virtual lamp — the same composition `--dry-run`
//! uses — and drives it with raw input lines.

use std::path::{Path, PathBuf};

use lumo_adapter_parser_openai::OpenAiCommandParser;
use lumo_adapter_storage_file::FileStateStore;
use lumo_adapter_virtual::VirtualLamp;
use lumo_app::ports::StateStore;
use lumo_app::services::{CommandOutcome, CommandService};
use lumo_domain::lamp::LampState;
use lumo_domain::warmth::Warmth;

type DryRunService = CommandService<OpenAiCommandParser, FileStateStore, VirtualLamp>;

/// Build the dry-run composition: rules-only parsing, JSON file store,
/// virtual lamp.
fn wired(dir: &tempfile::TempDir) -> (DryRunService, VirtualLamp, PathBuf) {
    let path = dir.path().join("state.json");
    let store = FileStateStore::new(&path).expect("temp dir should be writable");
    let lamp = VirtualLamp::new();
    let service = CommandService::new(None::<OpenAiCommandParser>, store, lamp.clone());
    (service, lamp, path)
}

async fn persisted(path: &Path) -> LampState {
    FileStateStore::new(path)
        .expect("store should reopen")
        .load()
        .await
        .expect("load never fails")
}

#[tokio::test]
async fn should_apply_brightness_and_warmth_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let (service, lamp, path) = wired(&dir);

    let outcome = service.handle_line("set to 30% and warm").await.unwrap();

    let expected = LampState {
        power: true,
        brightness: 30,
        warmth: Warmth::Warm,
    };
    assert_eq!(outcome, CommandOutcome::Applied(expected));
    assert_eq!(lamp.last_applied(), Some(expected));
    assert_eq!(persisted(&path).await, expected);
}

#[tokio::test]
async fn should_restore_prior_settings_after_off_then_on() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _, path) = wired(&dir);

    service.handle_line("70% and warm").await.unwrap();
    service.handle_line("turn off").await.unwrap();

    let off = persisted(&path).await;
    assert!(!off.power);
    assert_eq!(off.brightness, 70);
    assert_eq!(off.warmth, Warmth::Warm);

    service.handle_line("turn on").await.unwrap();

    let restored = persisted(&path).await;
    assert!(restored.power);
    assert_eq!(restored.brightness, 70);
    assert_eq!(restored.warmth, Warmth::Warm);
}

#[tokio::test]
async fn should_not_touch_state_or_lamp_for_unrecognized_input() {
    let dir = tempfile::tempdir().unwrap();
    let (service, lamp, path) = wired(&dir);

    let outcome = service
        .handle_line("what's the weather like")
        .await
        .unwrap();

    assert_eq!(outcome, CommandOutcome::NoOp);
    assert!(!path.exists());
    assert_eq!(lamp.last_applied(), None);
}

#[tokio::test]
async fn should_recover_when_state_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _, path) = wired(&dir);
    std::fs::write(&path, "garbage {{{").unwrap();

    let outcome = service.handle_line("set to 25%").await.unwrap();

    // The corrupt record degraded to the default, then the command applied.
    assert!(matches!(outcome, CommandOutcome::Applied(state) if state.brightness == 25));
    assert_eq!(persisted(&path).await.brightness, 25);
}

#[tokio::test]
async fn should_follow_cool_and_max_brightness_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _, path) = wired(&dir);

    service.handle_line("warm and 20%").await.unwrap();
    service
        .handle_line("make it cool and max brightness")
        .await
        .unwrap();

    let state = persisted(&path).await;
    assert!(state.power);
    assert_eq!(state.brightness, 100);
    assert_eq!(state.warmth, Warmth::Cool);
}

#[tokio::test]
async fn should_persist_off_while_remembering_levels() {
    let dir = tempfile::tempdir().unwrap();
    let (service, lamp, path) = wired(&dir);

    service.handle_line("45% and neutral").await.unwrap();
    let outcome = service.handle_line("turn off").await.unwrap();

    let stored = persisted(&path).await;
    assert!(matches!(outcome, CommandOutcome::Applied(state) if !state.power));
    assert!(!stored.power);
    assert_eq!(stored.brightness, 45);
    assert_eq!(stored.warmth, Warmth::Neutral);
    assert_eq!(lamp.last_applied().map(|state| state.power), Some(false));
}

#[tokio::test]
async fn should_survive_a_stream_of_mixed_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let (service, _, _) = wired(&dir);

    for line in [
        "turn on",
        "",
        "???",
        "set to 300%",
        "max",
        "min",
        "turn off",
        "resume",
    ] {
        // Every line must resolve without an error — the loop never dies.
        assert!(service.handle_line(line).await.is_ok());
    }
}
