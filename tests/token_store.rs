//! File-backed and in-memory credential caches.

use std::fs;

use etrade_chains::EtradeError;
use etrade_chains::token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
use etrade_chains::types::auth::Credential;
use etrade_chains::types::enums::Environment;
use serde_json::{Value, json};

fn cred(tag: &str) -> Credential {
    Credential::new(format!("token-{tag}"), format!("secret-{tag}"))
}

#[test]
fn load_missing_file_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join(".etrade_oauth"));
    assert_eq!(store.load(Environment::Sandbox), None);
    assert_eq!(store.load(Environment::Live), None);
}

#[test]
fn load_garbage_or_wrong_shape_is_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".etrade_oauth");
    let store = FileTokenStore::new(&path);

    for content in [
        "not json at all",
        "[1, 2, 3]",
        r#"{"live": {"oauth_token": "t"}}"#,
        r#"{"live": "just a string"}"#,
        r#"{"sandbox": {"oauth_token": "t", "oauth_token_secret": "s"}}"#,
    ] {
        fs::write(&path, content).unwrap();
        assert_eq!(store.load(Environment::Live), None, "content: {content}");
    }
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileTokenStore::new(dir.path().join(".etrade_oauth"));

    store.save(Environment::Sandbox, &cred("sb")).unwrap();
    assert_eq!(store.load(Environment::Sandbox), Some(cred("sb")));
    assert_eq!(store.load(Environment::Live), None);
}

#[test]
fn save_merges_with_other_environment() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".etrade_oauth");
    let mut store = FileTokenStore::new(&path);

    store.save(Environment::Live, &cred("live")).unwrap();
    store.save(Environment::Sandbox, &cred("sb")).unwrap();
    store.save(Environment::Sandbox, &cred("sb2")).unwrap();

    assert_eq!(store.load(Environment::Live), Some(cred("live")));
    assert_eq!(store.load(Environment::Sandbox), Some(cred("sb2")));

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(
        on_disk,
        json!({
            "live": { "oauth_token": "token-live", "oauth_token_secret": "secret-live" },
            "sandbox": { "oauth_token": "token-sb2", "oauth_token_secret": "secret-sb2" },
        })
    );
}

#[test]
fn save_keeps_unrelated_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".etrade_oauth");
    fs::write(&path, r#"{"note": "hand edited"}"#).unwrap();

    let mut store = FileTokenStore::new(&path);
    store.save(Environment::Live, &cred("live")).unwrap();

    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["note"], json!("hand edited"));
    assert_eq!(on_disk["live"]["oauth_token"], json!("token-live"));
}

#[test]
fn save_over_corrupt_file_fails_and_leaves_it_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".etrade_oauth");
    let mut store = FileTokenStore::new(&path);

    for content in ["{ truncated", "[]", "\"string\""] {
        fs::write(&path, content).unwrap();
        let err = store.save(Environment::Live, &cred("live")).unwrap_err();
        assert!(matches!(err, EtradeError::TokenStore { .. }), "content: {content}");
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }
}

#[cfg(unix)]
#[test]
fn saved_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".etrade_oauth");
    fs::write(&path, "{}").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

    let mut store = FileTokenStore::new(&path);
    store.save(Environment::Live, &cred("live")).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn save_leaves_no_temporary_files_behind() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileTokenStore::new(dir.path().join(".etrade_oauth"));
    store.save(Environment::Live, &cred("live")).unwrap();
    store.save(Environment::Sandbox, &cred("sb")).unwrap();

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(names, [".etrade_oauth"]);
}

#[test]
fn memory_store_round_trips() {
    let mut store = MemoryTokenStore::new().with_credential(Environment::Live, cred("live"));
    assert_eq!(store.load(Environment::Live), Some(cred("live")));
    assert_eq!(store.load(Environment::Sandbox), None);

    store.save(Environment::Sandbox, &cred("sb")).unwrap();
    assert_eq!(store.load(Environment::Sandbox), Some(cred("sb")));
}
