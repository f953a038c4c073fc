//! Tests for root initialization and bank operations
//!
//! These tests verify:
//! - Root resolution (fallback path, env var, idempotent creation)
//! - Bank creation and already-exists signaling
//! - Lookups with type checking
//! - Name validation (no filesystem mutation on rejection)
//! - Recursive removal

use std::io::ErrorKind;

use fdb::{Config, FdbError, Root, TypeFilter};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_root() -> (TempDir, Root) {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .root_env("FDB_TEST_UNSET_ROOT")
        .fallback_root(temp_dir.path().join("fdb"))
        .build();
    let root = Root::init(&config).unwrap();
    (temp_dir, root)
}

fn assert_not_found(err: FdbError) {
    match err {
        FdbError::Io(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
        other => panic!("expected NotFound IO error, got {other:?}"),
    }
}

// =============================================================================
// Root Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_root_directory() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("fresh");
    let config = Config::builder()
        .root_env("FDB_TEST_UNSET_ROOT")
        .fallback_root(&target)
        .build();

    assert!(!target.exists());
    let root = Root::init(&config).unwrap();
    assert!(target.is_dir());
    assert_eq!(root.path(), target.canonicalize().unwrap());
}

#[test]
fn test_init_existing_directory_is_success() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .root_env("FDB_TEST_UNSET_ROOT")
        .fallback_root(temp_dir.path())
        .build();

    // The temp directory already exists; init must still succeed.
    let root = Root::init(&config).unwrap();
    assert_eq!(root.path(), temp_dir.path().canonicalize().unwrap());
}

#[test]
fn test_init_reads_environment_variable() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("from_env");
    std::env::set_var("FDB_TEST_ENV_ROOT", &target);

    let config = Config::builder()
        .root_env("FDB_TEST_ENV_ROOT")
        .fallback_root("/nonexistent/never/used")
        .build();

    let root = Root::init(&config).unwrap();
    assert_eq!(root.path(), target.canonicalize().unwrap());
}

#[test]
fn test_init_empty_environment_variable_falls_back() {
    let temp_dir = TempDir::new().unwrap();
    std::env::set_var("FDB_TEST_EMPTY_ROOT", "");

    let config = Config::builder()
        .root_env("FDB_TEST_EMPTY_ROOT")
        .fallback_root(temp_dir.path().join("fallback"))
        .build();

    let root = Root::init(&config).unwrap();
    assert!(root.path().ends_with("fallback"));
}

#[test]
fn test_default_config_values() {
    let config = Config::default();
    assert_eq!(config.root_env, "FDB_ROOT");
    assert_eq!(config.fallback_root, std::path::PathBuf::from("/var/fdb"));
}

// =============================================================================
// Bank Creation Tests
// =============================================================================

#[test]
fn test_create_bank() {
    let (_temp, root) = setup_root();

    let outcome = root.create_bank("users").unwrap();
    let bank = outcome.created().expect("first creation is fresh");

    assert!(bank.path().is_dir());
    assert_eq!(bank.name().as_deref(), Some("users"));
}

#[test]
fn test_create_bank_twice_signals_already_exists() {
    let (_temp, root) = setup_root();

    let first = root.create_bank("users").unwrap();
    assert!(!first.already_exists());

    let second = root.create_bank("users").unwrap();
    assert!(second.already_exists());
    assert!(second.created().is_none());

    // The existing directory is untouched.
    assert!(root.bank("users").is_ok());
}

#[test]
fn test_create_bank_over_registry_is_wrong_type() {
    let (_temp, root) = setup_root();
    root.create_registry("record").unwrap();

    let err = root.create_bank("record").unwrap_err();
    assert!(matches!(err, FdbError::WrongType { .. }));
}

#[test]
fn test_create_bank_rejects_separator_in_name() {
    let (_temp, root) = setup_root();

    let err = root.create_bank("a/b").unwrap_err();
    assert!(matches!(err, FdbError::InvalidName(_)));

    // Rejection happens before any filesystem call: nothing was created.
    assert_eq!(root.count(TypeFilter::Any).unwrap(), 0);
}

#[test]
fn test_nested_banks() {
    let (_temp, root) = setup_root();

    let users = root.create_bank("users").unwrap().created().unwrap();
    let admins = users.create_bank("admins").unwrap().created().unwrap();

    assert!(admins.path().starts_with(users.path()));
    assert!(users.bank("admins").is_ok());
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookup_bank_found() {
    let (_temp, root) = setup_root();
    root.create_bank("users").unwrap();

    let bank = root.bank("users").unwrap();
    assert!(bank.path().is_dir());
}

#[test]
fn test_lookup_bank_absent() {
    let (_temp, root) = setup_root();
    assert_not_found(root.bank("missing").unwrap_err());
}

#[test]
fn test_lookup_bank_on_registry_is_wrong_type() {
    let (_temp, root) = setup_root();
    root.create_registry("record").unwrap();

    let err = root.bank("record").unwrap_err();
    assert!(matches!(err, FdbError::WrongType { .. }));
}

#[test]
fn test_lookup_registry_on_bank_is_wrong_type() {
    let (_temp, root) = setup_root();
    root.create_bank("users").unwrap();

    let err = root.registry("users").unwrap_err();
    assert!(matches!(err, FdbError::WrongType { .. }));
}

#[test]
fn test_lookup_rejects_separator_in_name() {
    let (_temp, root) = setup_root();
    assert!(matches!(
        root.bank("../escape").unwrap_err(),
        FdbError::InvalidName(_)
    ));
    assert!(matches!(
        root.registry("a/b").unwrap_err(),
        FdbError::InvalidName(_)
    ));
}

// =============================================================================
// Removal Tests
// =============================================================================

#[test]
fn test_remove_bank_recursive() {
    let (_temp, root) = setup_root();

    let users = root.create_bank("users").unwrap().created().unwrap();
    let admins = users.create_bank("admins").unwrap().created().unwrap();
    admins.create_registry("bob").unwrap();
    users.create_registry("alice").unwrap();

    root.bank("users").unwrap().remove().unwrap();

    assert_not_found(root.bank("users").unwrap_err());
}

#[test]
fn test_remove_missing_bank_fails() {
    let (_temp, root) = setup_root();

    // Build a handle, delete the directory underneath it, then remove.
    let users = root.create_bank("users").unwrap().created().unwrap();
    let stale = root.bank("users").unwrap();
    users.remove().unwrap();

    assert!(stale.remove().is_err());
}

#[test]
fn test_remove_empty_bank() {
    let (_temp, root) = setup_root();
    let bank = root.create_bank("empty").unwrap().created().unwrap();

    bank.remove().unwrap();
    assert_not_found(root.bank("empty").unwrap_err());
}
