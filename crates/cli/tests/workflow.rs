//! Checks on the CI workflow that builds this binary.

use std::path::Path;

use serde_yaml::Value;

const WORKFLOW: &str = include_str!("../../../.github/workflows/ci.yml");

fn workflow() -> Value {
    serde_yaml::from_str(WORKFLOW).expect("workflow is valid YAML")
}

fn build_job(workflow: &Value) -> &Value {
    &workflow["jobs"]["build"]
}

fn strings(value: &Value) -> Vec<&str> {
    value
        .as_sequence()
        .expect("sequence")
        .iter()
        .map(|v| v.as_str().expect("string"))
        .collect()
}

#[test]
fn triggers_on_push_pull_request_and_dispatch() {
    let workflow = workflow();
    let on = workflow["on"].as_mapping().expect("trigger mapping");
    let mut triggers: Vec<&str> = on.keys().filter_map(Value::as_str).collect();
    triggers.sort_unstable();
    assert_eq!(triggers, vec!["pull_request", "push", "workflow_dispatch"]);

    for event in ["push", "pull_request"] {
        assert_eq!(strings(&workflow["on"][event]["branches"]), vec!["main"]);
        let ignored = strings(&workflow["on"][event]["paths-ignore"]);
        assert!(ignored.contains(&"**.md"), "{event} should ignore docs-only changes");
    }
}

#[test]
fn matrix_expands_to_six_independent_cells() {
    let workflow = workflow();
    let strategy = &build_job(&workflow)["strategy"];
    assert_eq!(strategy["fail-fast"].as_bool(), Some(false));

    let os = strings(&strategy["matrix"]["os"]);
    let features = strings(&strategy["matrix"]["features"]);
    assert_eq!(os, vec!["ubuntu-latest", "windows-latest", "macos-latest"]);
    assert_eq!(features, vec!["", "--features cli/zip"]);

    let cells: Vec<(&str, &str)> = os
        .iter()
        .flat_map(|o| features.iter().map(move |f| (*o, *f)))
        .collect();
    assert_eq!(cells.len(), 6);
}

#[test]
fn steps_run_in_declared_order() {
    let workflow = workflow();
    let steps = build_job(&workflow)["steps"].as_sequence().expect("steps");

    let uses: Vec<&str> = steps.iter().filter_map(|s| s["uses"].as_str()).collect();
    assert!(uses[0].starts_with("actions/checkout@"));
    assert!(uses[1].starts_with("actions/cache@"));
    assert!(uses[2].starts_with("dtolnay/rust-toolchain@"));
    assert!(uses[3].starts_with("actions/upload-artifact@"));

    let commands: Vec<&str> = steps.iter().filter_map(|s| s["run"].as_str()).collect();
    let expected = [
        "cargo check",
        "cargo test",
        "cargo clippy",
        "cargo fmt",
        "cargo build --release",
    ];
    assert_eq!(commands.len(), expected.len());
    for (command, prefix) in commands.iter().zip(expected) {
        assert!(command.starts_with(prefix), "{command:?} should start with {prefix:?}");
    }
    assert!(commands[2].ends_with("-- -D warnings"));
    assert!(commands[3].ends_with("--check"));

    let last = steps.last().expect("at least one step");
    let last_uses = last["uses"].as_str().unwrap_or_default();
    assert!(last_uses.starts_with("actions/upload-artifact@"));
    assert!(last["with"]["name"].as_str().is_some());
}

#[test]
fn cache_is_keyed_by_lock_file() {
    let workflow = workflow();
    let steps = build_job(&workflow)["steps"].as_sequence().expect("steps");
    let cache = steps
        .iter()
        .find(|s| s["uses"].as_str().is_some_and(|u| u.starts_with("actions/cache@")))
        .expect("cache step");
    let key = cache["with"]["key"].as_str().expect("cache key");
    assert!(key.contains("hashFiles('**/Cargo.lock')"));

    let lock = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../Cargo.lock");
    assert!(lock.is_file(), "the cache key hashes {}", lock.display());
}
