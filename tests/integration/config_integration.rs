//! Configuration loading from explicit files.

use anagen::config::{ConfigLoader, WORKSPACE_CONFIG_FILE};
use anagen::scaffold::Variant;
use tempfile::TempDir;

#[test]
fn test_explicit_file_overrides_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(WORKSPACE_CONFIG_FILE);
    std::fs::write(
        &path,
        "[resolver]\nredirector = \"infn\"\npreview = 5\n\n[scaffold]\nvariant = \"basic\"\n\n[submit]\njob_flavour = \"workday\"\n",
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    assert_eq!(config.resolver.redirector, "infn");
    assert_eq!(config.resolver.preview, 5);
    assert_eq!(config.resolver.query_program, "dasgoclient");
    assert_eq!(config.scaffold.variant, Variant::Basic);
    assert_eq!(config.scaffold.class_name, "CMSAnalyzer");
    assert_eq!(config.submit.job_flavour, "workday");
    assert_eq!(config.submit.submit_program, "condor_submit");
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    assert!(ConfigLoader::load_from_file(&temp_dir.path().join("absent.toml")).is_err());
}
